//! # Terminal Renderer
//!
//! Writes the composed form to a [`RenderStream`], mapping semantic span
//! styles to crossterm attributes.

use super::form_view::{FormView, SpanStyle, ViewLine};
use crate::form::events::FormFocus;
use crate::form::io::RenderStream;
use crate::form::models::FormModel;
use anyhow::Result;
use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};

// Helper macro to convert crossterm errors to anyhow errors
macro_rules! queue_term {
    ($($arg:expr),* $(,)?) => {
        queue!($($arg),*).map_err(anyhow::Error::from)
    };
}

/// Trait for rendering views
pub trait ViewRenderer {
    /// Prepare the terminal (raw mode, alternate screen)
    fn initialize(&mut self) -> Result<()>;

    /// Redraw the whole form
    fn render_full(&mut self, form: &FormModel, focus: FormFocus) -> Result<()>;

    /// Restore the terminal
    fn cleanup(&mut self) -> Result<()>;
}

/// Renderer writing through a [`RenderStream`]
pub struct TerminalRenderer<RS: RenderStream> {
    render_stream: RS,
    terminal_size: (u16, u16),
}

impl<RS: RenderStream> TerminalRenderer<RS> {
    pub fn with_render_stream(render_stream: RS) -> Result<Self> {
        let terminal_size = render_stream.get_size()?;
        Ok(Self {
            render_stream,
            terminal_size,
        })
    }

    pub fn update_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    pub fn render_stream(&self) -> &RS {
        &self.render_stream
    }

    fn apply_style(&mut self, style: SpanStyle) -> Result<()> {
        let out = &mut self.render_stream;
        match style {
            SpanStyle::Plain => {}
            SpanStyle::Label => queue_term!(out, SetAttribute(Attribute::Bold))?,
            SpanStyle::Input { focused } => {
                if focused {
                    queue_term!(out, SetAttribute(Attribute::Underlined))?;
                }
            }
            SpanStyle::Placeholder { focused } => {
                queue_term!(out, SetForegroundColor(Color::DarkGrey))?;
                if focused {
                    queue_term!(out, SetAttribute(Attribute::Underlined))?;
                }
            }
            SpanStyle::Error | SpanStyle::Duplicate => {
                queue_term!(out, SetForegroundColor(Color::Red))?
            }
            SpanStyle::Checking => {
                queue_term!(out, SetForegroundColor(Color::AnsiValue(208)))?
            }
            SpanStyle::Button { focused, enabled } => {
                if !enabled {
                    queue_term!(out, SetAttribute(Attribute::Dim))?;
                }
                if focused {
                    queue_term!(out, SetAttribute(Attribute::Reverse))?;
                }
            }
            SpanStyle::TableHeader => queue_term!(
                out,
                SetAttribute(Attribute::Bold),
                SetAttribute(Attribute::Reverse)
            )?,
            SpanStyle::Hint => queue_term!(out, SetForegroundColor(Color::DarkGrey))?,
        }
        Ok(())
    }

    fn render_line(&mut self, row: u16, line: &ViewLine) -> Result<()> {
        self.render_stream.move_cursor(0, row)?;
        for span in &line.spans {
            self.apply_style(span.style)?;
            queue_term!(
                self.render_stream,
                Print(&span.text),
                SetAttribute(Attribute::Reset),
                ResetColor
            )?;
        }
        queue_term!(self.render_stream, Clear(ClearType::UntilNewLine))?;
        Ok(())
    }
}

impl<RS: RenderStream> ViewRenderer for TerminalRenderer<RS> {
    fn initialize(&mut self) -> Result<()> {
        self.render_stream.enable_raw_mode()?;
        self.render_stream.enter_alternate_screen()?;
        self.render_stream.hide_cursor()?;
        self.render_stream.clear_screen()?;
        Ok(())
    }

    fn render_full(&mut self, form: &FormModel, focus: FormFocus) -> Result<()> {
        let (width, height) = self.terminal_size;
        let lines = FormView::compose(form, focus, width);

        // Rows that do not fit are cut off at the bottom
        let visible = lines.len().min(height as usize);
        for (row, line) in lines.iter().take(visible).enumerate() {
            self.render_line(row as u16, line)?;
        }
        if visible < height as usize {
            self.render_stream.move_cursor(0, visible as u16)?;
            queue_term!(self.render_stream, Clear(ClearType::FromCursorDown))?;
        }

        self.render_stream.flush()?;
        tracing::trace!("Rendered {} of {} lines", visible, lines.len());
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        self.render_stream.show_cursor()?;
        self.render_stream.leave_alternate_screen()?;
        self.render_stream.disable_raw_mode()?;
        Ok(())
    }
}
