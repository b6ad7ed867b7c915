//! # Form Module
//!
//! The name/location registration form, split the same way as the rest of
//! the application:
//!
//! - `models`: form state, validation and the entry table
//! - `controller`: owns the model and runs availability checks in the background
//! - `services`: location and name-availability collaborators (HTTP and offline)
//! - `commands`: key handling that turns input into [`CommandEvent`]s
//! - `views`: layout and terminal rendering
//! - `io`: terminal event and render streams, with in-memory doubles
//! - `controllers`: the event loop tying it together

pub mod commands;
pub mod controller;
pub mod controllers;
pub mod events;
pub mod io;
pub mod models;
pub mod services;
pub mod testing;
pub mod views;

pub use commands::{CommandEvent, CommandRegistry};
pub use controller::FormController;
pub use controllers::{build_services, AppController};
pub use events::{FormFocus, FormMessage, StalePolicy, StepDirection};
pub use models::{
    Entry, EntryTable, ErrorKind, FieldErrors, FormFields, FormModel, LocationList,
    SubmitOutcome, TouchedFields, ValidationState, LOCATION_PLACEHOLDER,
};
pub use services::{FormServices, HttpFormApi, LocationProvider, MockFormApi, NameValidator};
