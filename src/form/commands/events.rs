//! # Command Events
//!
//! Events produced by commands that describe what should happen.
//! Commands produce these events, and the application controller applies
//! them to the form. Commands suggest, the controller decides.

use crate::form::events::StepDirection;

/// Events that commands can produce to request changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandEvent {
    /// Append a character to the name
    NameCharInsertRequested { ch: char },

    /// Remove the last character of the name
    NameBackspaceRequested,

    /// Select the adjacent location option
    LocationStepRequested { direction: StepDirection },

    /// Move focus to the adjacent control
    FocusMoveRequested { direction: StepDirection },

    /// Submit the form
    SubmitRequested,

    /// Empty the results table
    ClearRequested,

    /// Request to quit application
    QuitRequested,

    /// No action needed
    NoAction,
}
