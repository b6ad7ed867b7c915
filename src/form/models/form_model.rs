//! # Form Model
//!
//! The complete, synchronous state of the entry form with one transition
//! function per event. Asynchronous plumbing lives in the controller; this
//! type never awaits anything.

use super::entry::{Entry, EntryTable};
use super::fields::{FormFields, TouchedFields};
use super::locations::LocationList;
use super::validation::{FieldErrors, ValidationState};

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The entry was appended and the fields were reset
    Accepted(Entry),
    /// Preconditions failed, nothing but the touched flags changed
    Rejected(FieldErrors),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormModel {
    fields: FormFields,
    touched: TouchedFields,
    validation: ValidationState,
    entries: EntryTable,
    locations: LocationList,
}

impl FormModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn touched(&self) -> TouchedFields {
        self.touched
    }

    pub fn validation(&self) -> &ValidationState {
        &self.validation
    }

    pub fn entries(&self) -> &EntryTable {
        &self.entries
    }

    pub fn locations(&self) -> &LocationList {
        &self.locations
    }

    /// Store a new name value
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.fields.set_name(name);
        self.touched.name = true;
    }

    /// Store a new location value
    pub fn set_location<S: Into<String>>(&mut self, location: S) {
        self.fields.set_location(location);
        self.touched.location = true;
    }

    /// The location control lost focus
    pub fn touch_location(&mut self) {
        self.touched.location = true;
    }

    pub fn set_locations(&mut self, locations: LocationList) {
        self.locations = locations;
    }

    /// Start validating `name`. Returns true when the validator must be called.
    pub fn begin_name_check(&mut self, name: &str) -> bool {
        if name.is_empty() {
            self.validation.mark_empty_name();
            return false;
        }
        self.validation.mark_checking();
        true
    }

    pub fn apply_name_verdict(&mut self, name: &str, available: bool) {
        self.validation.apply_verdict(name, available, &self.entries);
    }

    pub fn apply_name_failure(&mut self) {
        self.validation.apply_failure();
    }

    /// No check is outstanding any more
    pub fn end_name_check(&mut self) {
        self.validation.is_checking = false;
    }

    /// Required-field and availability errors of the current values
    pub fn field_errors(&self) -> FieldErrors {
        FieldErrors::check(&self.fields, &self.validation)
    }

    /// Errors of fields the user has interacted with
    pub fn visible_errors(&self) -> FieldErrors {
        let errors = self.field_errors();
        FieldErrors {
            name: errors
                .name
                .filter(|_| self.touched.name || self.validation.error.is_some()),
            location: errors.location.filter(|_| self.touched.location),
        }
    }

    pub fn can_submit(&self) -> bool {
        let v = &self.validation;
        self.field_errors().is_empty()
            && !v.is_checking
            && v.error.is_none()
            && v.is_available
            && !v.is_duplicate
    }

    /// Append the current values if every precondition holds
    pub fn submit(&mut self) -> SubmitOutcome {
        self.touched.touch_all();

        if !self.can_submit() {
            let errors = self.field_errors();
            tracing::debug!(
                "Submit rejected: errors={:?}, validation={:?}",
                errors,
                self.validation
            );
            return SubmitOutcome::Rejected(errors);
        }

        let entry = Entry::new(self.fields.name(), self.fields.location());
        self.entries.push(entry.clone());
        self.fields.reset();
        self.touched.reset();
        tracing::debug!("Entry accepted: {:?} ({} total)", entry, self.entries.len());
        SubmitOutcome::Accepted(entry)
    }

    /// Drop every accepted entry; the fields keep their values
    pub fn clear(&mut self) {
        self.entries.clear();
        tracing::debug!("Entry table cleared");
    }
}
