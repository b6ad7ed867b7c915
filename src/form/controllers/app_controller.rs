//! # Application Controller
//!
//! Runs the terminal event loop: key presses go through the command registry,
//! the resulting command events are applied to the form controller, finished
//! background calls are drained, and the screen is redrawn when anything
//! changed.

use crate::cmd_args::CommandLineArgs;
use crate::config::AppConfig;
use crate::form::{
    commands::{CommandContext, CommandEvent, CommandRegistry, FormSnapshot},
    controller::FormController,
    events::{FormFocus, StepDirection},
    io::{EventStream, RenderStream, TerminalEventStream, TerminalRenderStream},
    models::SubmitOutcome,
    services::{FormServices, HttpFormApi, MockFormApi},
    views::{TerminalRenderer, ViewRenderer},
};
use anyhow::Result;
use crossterm::event::{Event, KeyEventKind};
use std::io;
use std::time::Duration;

/// How long to wait for input before checking for finished background calls
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Build the collaborators selected by the configuration
pub fn build_services(config: &AppConfig) -> Result<FormServices> {
    match &config.api_url {
        Some(url) => {
            tracing::info!("Using availability API at {}", url);
            Ok(FormServices::from_api(HttpFormApi::new(
                url,
                config.request_timeout,
            )?))
        }
        None => {
            tracing::info!("No API URL configured, using the offline mock API");
            Ok(FormServices::from_api(MockFormApi::new(config.mock_delay)))
        }
    }
}

/// The main application controller
pub struct AppController<ES: EventStream, RS: RenderStream> {
    form: FormController,
    focus: FormFocus,
    view_renderer: TerminalRenderer<RS>,
    command_registry: CommandRegistry,
    event_stream: ES,
    should_quit: bool,
}

impl AppController<TerminalEventStream, TerminalRenderStream<io::Stdout>> {
    /// Create a controller bound to the real terminal
    pub fn new(cmd_args: &CommandLineArgs) -> Result<Self> {
        let config = AppConfig::load(cmd_args)?;
        let services = build_services(&config)?;
        Self::with_io_streams(
            &config,
            services,
            TerminalEventStream::new(),
            TerminalRenderStream::new(),
        )
    }
}

impl<ES: EventStream, RS: RenderStream> AppController<ES, RS> {
    /// Create a controller with injected collaborators and I/O streams
    pub fn with_io_streams(
        config: &AppConfig,
        services: FormServices,
        event_stream: ES,
        render_stream: RS,
    ) -> Result<Self> {
        let view_renderer = TerminalRenderer::with_render_stream(render_stream)?;
        tracing::debug!("AppController created with {:?}", config);

        Ok(Self {
            form: FormController::new(services, config.stale_policy),
            focus: FormFocus::default(),
            view_renderer,
            command_registry: CommandRegistry::new(),
            event_stream,
            should_quit: false,
        })
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormController {
        &mut self.form
    }

    pub fn focus(&self) -> FormFocus {
        self.focus
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn view_renderer(&self) -> &TerminalRenderer<RS> {
        &self.view_renderer
    }

    /// Run until the user quits. The terminal is restored even on error.
    pub async fn run(&mut self) -> Result<()> {
        self.view_renderer.initialize()?;
        let result = self.event_loop().await;
        self.view_renderer.cleanup()?;
        result
    }

    async fn event_loop(&mut self) -> Result<()> {
        self.form.mount();
        self.render()?;

        while !self.should_quit {
            let mut dirty = false;

            if self.event_stream.poll(POLL_INTERVAL)? {
                let event = self.event_stream.read()?;
                dirty |= self.handle_event(event)?;
            }

            if self.form.poll_messages() > 0 {
                dirty = true;
            }

            if dirty && !self.should_quit {
                self.render()?;
            }

            // Let spawned checks make progress on a single-threaded runtime
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    /// Redraw the whole form
    pub fn render(&mut self) -> Result<()> {
        self.view_renderer
            .render_full(self.form.model(), self.focus)
    }

    /// Handle one terminal event. Returns true when a redraw is needed.
    pub fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key_event) => {
                if key_event.kind == KeyEventKind::Release {
                    return Ok(false);
                }
                tracing::debug!("Received key event: {:?}", key_event);

                let context =
                    CommandContext::new(FormSnapshot::from_form(&self.form, self.focus));
                let events = self.command_registry.process_event(key_event, &context)?;

                let mut changed = false;
                for event in events {
                    changed |= self.apply_command_event(event);
                }
                Ok(changed)
            }
            Event::Resize(width, height) => {
                self.view_renderer.update_size(width, height);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Apply a command event to the form. Returns true when state changed.
    pub fn apply_command_event(&mut self, event: CommandEvent) -> bool {
        match event {
            CommandEvent::NameCharInsertRequested { ch } => {
                let mut name = self.form.model().fields().name().to_string();
                name.push(ch);
                self.form.on_name_change(name);
            }
            CommandEvent::NameBackspaceRequested => {
                let mut name = self.form.model().fields().name().to_string();
                name.pop();
                self.form.on_name_change(name);
            }
            CommandEvent::LocationStepRequested { direction } => {
                self.form.step_location(direction);
            }
            CommandEvent::FocusMoveRequested { direction } => {
                self.move_focus(direction);
            }
            CommandEvent::SubmitRequested => {
                if let SubmitOutcome::Accepted(entry) = self.form.submit() {
                    tracing::info!("Added {} / {}", entry.name(), entry.location());
                    self.focus = FormFocus::Name;
                }
            }
            CommandEvent::ClearRequested => {
                self.form.clear();
            }
            CommandEvent::QuitRequested => {
                self.should_quit = true;
            }
            CommandEvent::NoAction => return false,
        }
        true
    }

    fn move_focus(&mut self, direction: StepDirection) {
        let next = self.focus.step(direction);
        if self.focus == FormFocus::Location && next != FormFocus::Location {
            self.form.on_location_blur();
        }
        tracing::debug!("Focus {:?} -> {:?}", self.focus, next);
        self.focus = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::io::{MockEventStream, MockRenderStream, RenderCommand};
    use crate::form::testing::{ScriptedLocations, ScriptedNameValidator};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::sync::Arc;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn create_app(
        validator: Arc<ScriptedNameValidator>,
        events: Vec<Event>,
    ) -> AppController<MockEventStream, MockRenderStream> {
        let services = FormServices::new(Arc::new(ScriptedLocations::new(["NY", "LA"])), validator);
        AppController::with_io_streams(
            &AppConfig::default(),
            services,
            MockEventStream::new(events),
            MockRenderStream::new(),
        )
        .unwrap()
    }

    #[test]
    fn build_services_should_pick_adapter_from_config() {
        assert!(build_services(&AppConfig::default()).is_ok());

        let config = AppConfig {
            api_url: Some("http://localhost:8080".to_string()),
            ..AppConfig::default()
        };
        assert!(build_services(&config).is_ok());
    }

    #[tokio::test]
    async fn typing_should_edit_name_and_validate_each_keystroke() {
        let validator = Arc::new(ScriptedNameValidator::new());
        let mut app = create_app(validator.clone(), vec![]);

        for ch in ['B', 'o', 'b'] {
            assert!(app.handle_event(key(KeyCode::Char(ch))).unwrap());
        }
        app.handle_event(key(KeyCode::Backspace)).unwrap();
        app.form_mut().settle().await;

        assert_eq!(app.form().model().fields().name(), "Bo");
        assert_eq!(validator.calls(), vec!["B", "Bo", "Bob", "Bo"]);
    }

    #[tokio::test]
    async fn leaving_location_should_mark_it_touched() {
        let mut app = create_app(Arc::new(ScriptedNameValidator::new()), vec![]);

        app.handle_event(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.focus(), FormFocus::Location);
        assert!(!app.form().model().touched().location);

        app.handle_event(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.focus(), FormFocus::Clear);
        assert!(app.form().model().touched().location);
        assert_eq!(
            app.form().visible_errors().location.map(|e| e.message()),
            Some("Please select a location")
        );
    }

    #[tokio::test]
    async fn full_entry_flow_should_add_row_and_refocus_name() {
        let mut app = create_app(Arc::new(ScriptedNameValidator::new()), vec![]);
        app.form_mut().mount();
        app.form_mut().settle().await;

        for ch in "Alice".chars() {
            app.handle_event(key(KeyCode::Char(ch))).unwrap();
        }
        app.handle_event(key(KeyCode::Tab)).unwrap();
        app.handle_event(key(KeyCode::Down)).unwrap();
        app.form_mut().settle().await;
        app.handle_event(key(KeyCode::Tab)).unwrap();
        app.handle_event(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.focus(), FormFocus::Add);

        app.handle_event(key(KeyCode::Enter)).unwrap();

        let entries: Vec<(String, String)> = app
            .form()
            .model()
            .entries()
            .iter()
            .map(|e| (e.name().to_string(), e.location().to_string()))
            .collect();
        assert_eq!(entries, vec![("Alice".to_string(), "NY".to_string())]);
        assert_eq!(app.focus(), FormFocus::Name);
        assert_eq!(app.form().model().fields().name(), "");
    }

    #[tokio::test]
    async fn quit_key_should_stop_run_and_restore_terminal() {
        let mut app = create_app(
            Arc::new(ScriptedNameValidator::new()),
            vec![key(KeyCode::Char('A')), key(KeyCode::Esc)],
        );

        app.run().await.unwrap();

        assert!(app.should_quit());
        let stream = app.view_renderer().render_stream();
        assert!(stream.has_command(&RenderCommand::EnterAlternateScreen));
        assert!(stream.has_command(&RenderCommand::LeaveAlternateScreen));
        assert!(!stream.is_raw_mode());
    }

    #[tokio::test]
    async fn resize_should_request_redraw() {
        let mut app = create_app(Arc::new(ScriptedNameValidator::new()), vec![]);
        assert!(app.handle_event(Event::Resize(100, 30)).unwrap());
        assert_eq!(app.view_renderer().terminal_size(), (100, 30));
    }
}
