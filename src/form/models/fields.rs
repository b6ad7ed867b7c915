//! # Field State
//!
//! Current (possibly unsubmitted) values of the name and location inputs,
//! plus which of them the user has interacted with.

/// Current values of the form inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    name: String,
    location: String,
}

impl FormFields {
    pub fn new<N: Into<String>, L: Into<String>>(name: N, location: L) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    pub fn set_location<S: Into<String>>(&mut self, location: S) {
        self.location = location.into();
    }

    /// Back to empty values
    pub fn reset(&mut self) {
        self.name.clear();
        self.location.clear();
    }
}

/// Which fields have been edited, left, or included in a submit attempt.
///
/// Only controls which errors are shown; eligibility ignores it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchedFields {
    pub name: bool,
    pub location: bool,
}

impl TouchedFields {
    pub fn touch_all(&mut self) {
        self.name = true;
        self.location = true;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
