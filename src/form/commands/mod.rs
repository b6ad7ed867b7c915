//! # Command Pattern Implementation
//!
//! Commands map key events to [`CommandEvent`]s. Each command checks whether
//! it is relevant for the focused control, and the registry executes the
//! first relevant one. Commands never touch the form directly.

use anyhow::Result;
use crossterm::event::KeyEvent;

pub mod actions;
pub mod app;
pub mod context;
pub mod editing;
pub mod events;
pub mod navigation;

pub use actions::{ClearCommand, SubmitCommand};
pub use app::AppTerminateCommand;
pub use context::{CommandContext, FormSnapshot};
pub use editing::{NameBackspaceCommand, NameInsertCommand};
pub use events::CommandEvent;
pub use navigation::{FocusMoveCommand, LocationStepCommand};

/// Command trait
///
/// Commands check relevancy against a read-only snapshot and describe the
/// change they want as events.
pub trait Command: Send + Sync {
    /// Check if command is relevant for current state and event
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool;

    /// Produce the events this key press asks for
    fn execute(&self, event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>>;

    /// Get command name for debugging
    fn name(&self) -> &'static str;
}

/// Type alias for the boxed command list
type CommandCollection = Vec<Box<dyn Command>>;

/// Registry that holds all available commands
pub struct CommandRegistry {
    commands: CommandCollection,
}

impl CommandRegistry {
    /// Create new command registry with default commands
    pub fn new() -> Self {
        let mut registry = Self {
            commands: Vec::new(),
        };

        registry.register_default_commands();
        registry
    }

    /// Register all default commands. Order matters: first match wins.
    fn register_default_commands(&mut self) {
        // Application commands
        self.add_command(Box::new(AppTerminateCommand));

        // Navigation commands
        self.add_command(Box::new(FocusMoveCommand));
        self.add_command(Box::new(LocationStepCommand));

        // Form actions
        self.add_command(Box::new(ClearCommand));
        self.add_command(Box::new(SubmitCommand));

        // Name editing commands
        self.add_command(Box::new(NameBackspaceCommand));
        self.add_command(Box::new(NameInsertCommand));
    }

    /// Add a command to the registry
    pub fn add_command(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    /// Process a key event through all commands
    pub fn process_event(
        &self,
        event: KeyEvent,
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        for command in &self.commands {
            if command.is_relevant(context, &event) {
                tracing::debug!("Command {} handles {:?}", command.name(), event.code);
                return command.execute(event, context);
            }
        }
        tracing::trace!("No command for {:?} on {:?}", event.code, context.focus());
        Ok(Vec::new())
    }

    /// Get all commands (for testing/debugging)
    pub fn commands(&self) -> &CommandCollection {
        &self.commands
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
