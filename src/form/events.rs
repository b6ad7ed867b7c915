//! # Form Events
//!
//! Messages delivered from background tasks to the form controller, and the
//! small enums shared by commands, the controller and the views.

/// Completion of an asynchronous collaborator call
#[derive(Debug, Clone, PartialEq)]
pub enum FormMessage {
    /// A name availability check finished
    NameValidated {
        request_id: u64,
        name: String,
        outcome: Result<bool, String>,
    },
    /// The location fetch finished
    LocationsLoaded(Result<Vec<String>, String>),
}

/// What to do with availability results for names no longer in the field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StalePolicy {
    /// Apply every result in arrival order (the last completed call wins)
    #[default]
    LastResponseWins,
    /// Apply only the latest check, and only while its name equals the field value
    DiscardStale,
}

/// Direction for focus movement and option stepping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Forward,
    Backward,
}

/// The focusable controls of the form, in tab order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FormFocus {
    #[default]
    Name,
    Location,
    Clear,
    Add,
}

impl FormFocus {
    const ORDER: [FormFocus; 4] = [
        FormFocus::Name,
        FormFocus::Location,
        FormFocus::Clear,
        FormFocus::Add,
    ];

    /// Next control in tab order, wrapping at both ends
    pub fn step(self, direction: StepDirection) -> Self {
        let len = Self::ORDER.len();
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let next = match direction {
            StepDirection::Forward => (index + 1) % len,
            StepDirection::Backward => (index + len - 1) % len,
        };
        Self::ORDER[next]
    }
}
