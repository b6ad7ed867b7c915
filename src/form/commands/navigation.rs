//! # Navigation Commands
//!
//! Focus movement between controls and location selection.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent};
use crate::form::events::{FormFocus, StepDirection};

/// Move focus with Tab / Shift+Tab
pub struct FocusMoveCommand;

impl Command for FocusMoveCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Tab | KeyCode::BackTab)
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let backward =
            event.code == KeyCode::BackTab || event.modifiers.contains(KeyModifiers::SHIFT);
        let direction = if backward {
            StepDirection::Backward
        } else {
            StepDirection::Forward
        };
        Ok(vec![CommandEvent::FocusMoveRequested { direction }])
    }

    fn name(&self) -> &'static str {
        "FocusMove"
    }
}

/// Pick the previous/next location with the arrow keys
pub struct LocationStepCommand;

impl Command for LocationStepCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.focus() == FormFocus::Location
            && matches!(
                event.code,
                KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right
            )
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let direction = match event.code {
            KeyCode::Up | KeyCode::Left => StepDirection::Backward,
            _ => StepDirection::Forward,
        };
        Ok(vec![CommandEvent::LocationStepRequested { direction }])
    }

    fn name(&self) -> &'static str {
        "LocationStep"
    }
}
