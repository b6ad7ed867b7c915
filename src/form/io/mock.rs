//! # Mock I/O Implementations for Testing
//!
//! In-memory event and render streams. The render stream records every
//! command and keeps a plain-text copy of the screen so tests can assert on
//! what the user would see without parsing escape sequences.

use super::{EventStream, RenderStream, TerminalSize};
use anyhow::Result;
use crossterm::event::Event;
use std::collections::VecDeque;
use std::io::Write;
use std::time::Duration;

/// Event stream replaying pre-programmed events
#[derive(Debug, Default)]
pub struct MockEventStream {
    events: VecDeque<Event>,
}

impl MockEventStream {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

impl EventStream for MockEventStream {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No events available"))
    }
}

/// Recorded render command for verification
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    ClearScreen,
    MoveCursor(u16, u16),
    HideCursor,
    ShowCursor,
    EnterAlternateScreen,
    LeaveAlternateScreen,
    EnableRawMode,
    DisableRawMode,
    Write(Vec<u8>),
    Flush,
}

/// Render stream that records commands and tracks visible text
pub struct MockRenderStream {
    commands: Vec<RenderCommand>,
    screen: Vec<Vec<char>>,
    cursor: (u16, u16),
    in_escape: bool,
    terminal_size: TerminalSize,
    raw_mode: bool,
    alternate_screen: bool,
}

impl MockRenderStream {
    pub fn new() -> Self {
        Self::with_size((80, 24))
    }

    pub fn with_size(size: TerminalSize) -> Self {
        Self {
            commands: Vec::new(),
            screen: Vec::new(),
            cursor: (0, 0),
            in_escape: false,
            terminal_size: size,
            raw_mode: false,
            alternate_screen: false,
        }
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn has_command(&self, command: &RenderCommand) -> bool {
        self.commands.contains(command)
    }

    pub fn is_raw_mode(&self) -> bool {
        self.raw_mode
    }

    pub fn is_alternate_screen(&self) -> bool {
        self.alternate_screen
    }

    /// Visible screen rows with trailing blanks trimmed
    pub fn screen_lines(&self) -> Vec<String> {
        self.screen
            .iter()
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect()
    }

    /// All visible rows joined by newlines
    pub fn screen_text(&self) -> String {
        self.screen_lines().join("\n")
    }

    /// Every byte written, escape sequences included
    pub fn raw_output(&self) -> String {
        let bytes: Vec<u8> = self
            .commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::Write(bytes) => Some(bytes.as_slice()),
                _ => None,
            })
            .flatten()
            .copied()
            .collect();
        String::from_utf8_lossy(&bytes).to_string()
    }

    fn put_char(&mut self, ch: char) {
        let (x, y) = (self.cursor.0 as usize, self.cursor.1 as usize);
        if self.screen.len() <= y {
            self.screen.resize(y + 1, Vec::new());
        }
        let row = &mut self.screen[y];
        if row.len() <= x {
            row.resize(x + 1, ' ');
        }
        row[x] = ch;
        self.cursor.0 = self.cursor.0.saturating_add(1);
    }

    fn feed(&mut self, text: &str) {
        for ch in text.chars() {
            if self.in_escape {
                // CSI sequences end with a byte in '@'..='~' other than '['
                if ch != '[' && ('@'..='~').contains(&ch) {
                    self.in_escape = false;
                }
                continue;
            }
            match ch {
                '\x1b' => self.in_escape = true,
                '\r' => self.cursor.0 = 0,
                '\n' => {
                    self.cursor.0 = 0;
                    self.cursor.1 = self.cursor.1.saturating_add(1);
                }
                _ => self.put_char(ch),
            }
        }
    }
}

impl Default for MockRenderStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.commands.push(RenderCommand::Write(buf.to_vec()));
        let text = String::from_utf8_lossy(buf).to_string();
        self.feed(&text);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.commands.push(RenderCommand::Flush);
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn clear_screen(&mut self) -> Result<()> {
        self.commands.push(RenderCommand::ClearScreen);
        self.screen.clear();
        Ok(())
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.commands.push(RenderCommand::MoveCursor(x, y));
        self.cursor = (x, y);
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.commands.push(RenderCommand::HideCursor);
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.commands.push(RenderCommand::ShowCursor);
        Ok(())
    }

    fn get_size(&self) -> Result<TerminalSize> {
        Ok(self.terminal_size)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        self.commands.push(RenderCommand::EnterAlternateScreen);
        self.alternate_screen = true;
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        self.commands.push(RenderCommand::LeaveAlternateScreen);
        self.alternate_screen = false;
        Ok(())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        self.commands.push(RenderCommand::EnableRawMode);
        self.raw_mode = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        self.commands.push(RenderCommand::DisableRawMode);
        self.raw_mode = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn mock_event_stream_should_provide_events_in_order() {
        let mut stream = MockEventStream::new(vec![
            Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::empty())),
            Event::Key(KeyEvent::new(KeyCode::Tab, KeyModifiers::empty())),
        ]);

        assert!(stream.poll(Duration::ZERO).unwrap());
        match stream.read().unwrap() {
            Event::Key(key) => assert_eq!(key.code, KeyCode::Char('a')),
            other => panic!("Expected key event, got {other:?}"),
        }
        match stream.read().unwrap() {
            Event::Key(key) => assert_eq!(key.code, KeyCode::Tab),
            other => panic!("Expected key event, got {other:?}"),
        }

        assert!(!stream.poll(Duration::ZERO).unwrap());
        assert!(stream.read().is_err());
    }

    #[test]
    fn mock_render_stream_should_record_commands() {
        let mut stream = MockRenderStream::new();

        stream.clear_screen().unwrap();
        stream.move_cursor(2, 1).unwrap();
        stream.write_all(b"Hello").unwrap();
        stream.flush().unwrap();

        assert_eq!(
            stream.commands(),
            &[
                RenderCommand::ClearScreen,
                RenderCommand::MoveCursor(2, 1),
                RenderCommand::Write(b"Hello".to_vec()),
                RenderCommand::Flush,
            ]
        );
        assert_eq!(stream.screen_lines(), vec!["", "  Hello"]);
    }

    #[test]
    fn screen_text_should_skip_escape_sequences() {
        let mut stream = MockRenderStream::new();
        stream.write_all(b"\x1b[1mName\x1b[0m \x1b[38;5;208mok\x1b[K").unwrap();
        assert_eq!(stream.screen_text(), "Name ok");
    }

    #[test]
    fn mock_render_stream_should_track_terminal_modes() {
        let mut stream = MockRenderStream::with_size((120, 40));
        assert_eq!(stream.get_size().unwrap(), (120, 40));

        stream.enable_raw_mode().unwrap();
        stream.enter_alternate_screen().unwrap();
        assert!(stream.is_raw_mode());
        assert!(stream.is_alternate_screen());

        stream.disable_raw_mode().unwrap();
        stream.leave_alternate_screen().unwrap();
        assert!(!stream.is_raw_mode());
        assert!(!stream.is_alternate_screen());
    }
}
