//! # Form Action Commands
//!
//! Submitting the form and clearing the results table.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use super::{Command, CommandContext, CommandEvent};
use crate::form::events::FormFocus;

/// Submit with Enter from the fields or the Add button.
///
/// The event is produced even when the form cannot be submitted; the
/// submit itself re-checks and records the attempt so errors show up.
pub struct SubmitCommand;

impl Command for SubmitCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Enter)
            && matches!(
                context.focus(),
                FormFocus::Name | FormFocus::Location | FormFocus::Add
            )
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::SubmitRequested])
    }

    fn name(&self) -> &'static str {
        "Submit"
    }
}

/// Clear the table with Enter or Space on the Clear button
pub struct ClearCommand;

impl Command for ClearCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.focus() == FormFocus::Clear
            && matches!(event.code, KeyCode::Enter | KeyCode::Char(' '))
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::ClearRequested])
    }

    fn name(&self) -> &'static str {
        "Clear"
    }
}
