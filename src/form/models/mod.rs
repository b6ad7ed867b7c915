//! # Models
//!
//! Plain data owned by the form controller: field values, validation state,
//! accepted entries and the location list.

pub mod entry;
pub mod fields;
pub mod form_model;
pub mod locations;
pub mod validation;

pub use entry::{Entry, EntryTable};
pub use fields::{FormFields, TouchedFields};
pub use form_model::{FormModel, SubmitOutcome};
pub use locations::{LocationList, LOCATION_PLACEHOLDER};
pub use validation::{ErrorKind, FieldErrors, ValidationState};
