//! # Name Editing Commands
//!
//! Typing into the name field.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent};
use crate::form::events::FormFocus;

/// Insert a printable character into the name
pub struct NameInsertCommand;

impl Command for NameInsertCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.focus() == FormFocus::Name
            && matches!(event.code, KeyCode::Char(_))
            && !event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        match event.code {
            KeyCode::Char(ch) => Ok(vec![CommandEvent::NameCharInsertRequested { ch }]),
            _ => Ok(vec![CommandEvent::NoAction]),
        }
    }

    fn name(&self) -> &'static str {
        "NameInsert"
    }
}

/// Delete the last character of the name (Backspace)
pub struct NameBackspaceCommand;

impl Command for NameBackspaceCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.focus() == FormFocus::Name && matches!(event.code, KeyCode::Backspace)
    }

    fn execute(&self, _event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        // Backspace on an empty field changes nothing and triggers no check
        if context.state.name.is_empty() {
            return Ok(vec![CommandEvent::NoAction]);
        }
        Ok(vec![CommandEvent::NameBackspaceRequested])
    }

    fn name(&self) -> &'static str {
        "NameBackspace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::commands::context::test_context;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn insert_should_be_relevant_for_chars_in_name_field() {
        let context = test_context(FormFocus::Name);
        let cmd = NameInsertCommand;

        assert!(cmd.is_relevant(&context, &key(KeyCode::Char('a'), KeyModifiers::NONE)));
        assert!(cmd.is_relevant(&context, &key(KeyCode::Char('A'), KeyModifiers::SHIFT)));
        assert!(cmd.is_relevant(&context, &key(KeyCode::Char(' '), KeyModifiers::NONE)));
        assert!(!cmd.is_relevant(&context, &key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn insert_should_not_be_relevant_outside_name_field() {
        let context = test_context(FormFocus::Location);
        assert!(!NameInsertCommand.is_relevant(&context, &key(KeyCode::Char('a'), KeyModifiers::NONE)));
    }

    #[test]
    fn insert_should_produce_char_event() {
        let context = test_context(FormFocus::Name);
        let events = NameInsertCommand
            .execute(key(KeyCode::Char('z'), KeyModifiers::NONE), &context)
            .unwrap();
        assert_eq!(events, vec![CommandEvent::NameCharInsertRequested { ch: 'z' }]);
    }

    #[test]
    fn backspace_on_empty_name_should_do_nothing() {
        let context = test_context(FormFocus::Name);
        let events = NameBackspaceCommand
            .execute(key(KeyCode::Backspace, KeyModifiers::NONE), &context)
            .unwrap();
        assert_eq!(events, vec![CommandEvent::NoAction]);
    }

    #[test]
    fn backspace_should_request_deletion() {
        let mut context = test_context(FormFocus::Name);
        context.state.name = "Al".to_string();
        let events = NameBackspaceCommand
            .execute(key(KeyCode::Backspace, KeyModifiers::NONE), &context)
            .unwrap();
        assert_eq!(events, vec![CommandEvent::NameBackspaceRequested]);
    }
}
