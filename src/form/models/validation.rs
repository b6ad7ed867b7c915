//! # Validation Model
//!
//! Field error kinds, the strongly-typed per-field error structure and the
//! name availability state driven by the asynchronous validator.

use super::entry::EntryTable;
use super::fields::FormFields;
use std::fmt;

/// Every user-facing field error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Name field is empty
    NameRequired,
    /// The availability API reported the name as taken
    NameTaken,
    /// The availability check itself failed
    NameValidationFailed,
    /// No location selected
    LocationRequired,
}

impl ErrorKind {
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::NameRequired => "Please enter a name",
            ErrorKind::NameTaken => "This name is already taken",
            ErrorKind::NameValidationFailed => "Error validating name",
            ErrorKind::LocationRequired => "Please select a location",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Per-field errors. The single answer to "is this field valid".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<ErrorKind>,
    pub location: Option<ErrorKind>,
}

impl FieldErrors {
    /// Required-field checks combined with the latest availability verdict
    pub fn check(fields: &FormFields, validation: &ValidationState) -> Self {
        let name = if fields.name().is_empty() {
            Some(ErrorKind::NameRequired)
        } else {
            validation.error
        };
        let location = if fields.location().is_empty() {
            Some(ErrorKind::LocationRequired)
        } else {
            None
        };
        Self { name, location }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.location.is_none()
    }
}

/// Name availability state, recomputed on every name change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationState {
    pub error: Option<ErrorKind>,
    pub is_available: bool,
    pub is_checking: bool,
    pub is_duplicate: bool,
}

impl Default for ValidationState {
    fn default() -> Self {
        Self {
            error: None,
            is_available: true,
            is_checking: false,
            is_duplicate: false,
        }
    }
}

impl ValidationState {
    /// Empty name: reported available, blocked later by the required check.
    /// The checking and duplicate flags are left as they are.
    pub fn mark_empty_name(&mut self) {
        self.error = Some(ErrorKind::NameRequired);
        self.is_available = true;
    }

    pub fn mark_checking(&mut self) {
        self.is_checking = true;
    }

    /// Apply a validator verdict for `name`
    pub fn apply_verdict(&mut self, name: &str, available: bool, entries: &EntryTable) {
        self.error = if available {
            None
        } else {
            Some(ErrorKind::NameTaken)
        };
        self.is_available = available;
        self.is_duplicate = entries.contains_name(name);
        self.is_checking = false;
    }

    /// Apply a failed validator call
    pub fn apply_failure(&mut self) {
        self.error = Some(ErrorKind::NameValidationFailed);
        self.is_available = false;
        self.is_checking = false;
    }

    /// Inline error text, empty when there is none
    pub fn error_message(&self) -> &'static str {
        self.error.map(|kind| kind.message()).unwrap_or("")
    }
}
