//! # Presentation Layer
//!
//! [`FormView`] lays the form out as styled lines; [`TerminalRenderer`]
//! writes those lines to a render stream.

pub mod form_view;
pub mod terminal_renderer;

pub use form_view::{FormView, Span, SpanStyle, ViewLine};
pub use terminal_renderer::{TerminalRenderer, ViewRenderer};
