//! # Command Context
//!
//! Read-only view of the form handed to commands.

use crate::form::controller::FormController;
use crate::form::events::FormFocus;

/// Read-only snapshot of form state for commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub focus: FormFocus,
    pub name: String,
    pub can_submit: bool,
}

impl FormSnapshot {
    /// Create snapshot from the current controller state
    pub fn from_form(form: &FormController, focus: FormFocus) -> Self {
        let fields = form.model().fields();
        Self {
            focus,
            name: fields.name().to_string(),
            can_submit: form.can_submit(),
        }
    }
}

/// Base context available to all commands
pub struct CommandContext {
    pub state: FormSnapshot,
}

impl CommandContext {
    pub fn new(state: FormSnapshot) -> Self {
        Self { state }
    }

    pub fn focus(&self) -> FormFocus {
        self.state.focus
    }
}

#[cfg(test)]
pub(crate) fn test_context(focus: FormFocus) -> CommandContext {
    CommandContext::new(FormSnapshot {
        focus,
        name: String::new(),
        can_submit: false,
    })
}
