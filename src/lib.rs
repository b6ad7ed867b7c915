//! # Nameline - Terminal Name Registration Form
//!
//! A small terminal form that collects a name and a location, checks the
//! name against an availability service as you type, and keeps the accepted
//! entries in a table.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   Key events   ┌──────────────┐  CommandEvents  ┌────────────────┐
//! │  Terminal   │───────────────►│   Commands   │────────────────►│ AppController  │
//! └─────────────┘                └──────────────┘                 └───────┬────────┘
//!        ▲                                                                │
//!        │ render                                                         ▼
//! ┌─────────────┐    reads     ┌──────────────┐   FormMessage    ┌────────────────┐
//! │    Views    │◄─────────────│  FormModel   │◄─────────────────│ FormController │
//! └─────────────┘              └──────────────┘   (mpsc)         └───────┬────────┘
//!                                                                        │ spawn
//!                                                                        ▼
//!                                                                ┌────────────────┐
//!                                                                │    Services    │
//!                                                                └────────────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod form;

pub use cmd_args::CommandLineArgs;
pub use config::AppConfig;
pub use form::*;
