//! # Controllers Module
//!
//! The terminal event loop that drives the form.

pub mod app_controller;

pub use app_controller::{build_services, AppController};
