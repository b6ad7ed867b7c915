//! # Location List
//!
//! Selectable locations fetched once at mount. The dropdown placeholder is
//! not part of the list and can never be selected.

use crate::form::events::StepDirection;

/// Text shown while no location is selected
pub const LOCATION_PLACEHOLDER: &str = "Select Location";

/// Ordered, read-only list of selectable locations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationList {
    locations: Vec<String>,
}

impl LocationList {
    pub fn new(locations: Vec<String>) -> Self {
        Self { locations }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn position(&self, location: &str) -> Option<usize> {
        self.locations.iter().position(|item| item == location)
    }

    /// The option adjacent to `current` in `direction`.
    ///
    /// From the placeholder (or an unknown value) forward picks the first
    /// option and backward picks the last. Stepping stops at either end, it
    /// never wraps back onto the placeholder.
    pub fn step(&self, current: &str, direction: StepDirection) -> Option<&str> {
        if self.locations.is_empty() {
            return None;
        }
        let last = self.locations.len() - 1;
        let index = match (self.position(current), direction) {
            (None, StepDirection::Forward) => 0,
            (None, StepDirection::Backward) => last,
            (Some(i), StepDirection::Forward) => (i + 1).min(last),
            (Some(i), StepDirection::Backward) => i.saturating_sub(1),
        };
        self.locations.get(index).map(String::as_str)
    }
}
