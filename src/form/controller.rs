//! # Form Controller
//!
//! Owns the [`FormModel`] and runs the collaborator calls. Every name change
//! spawns an availability check on the tokio runtime; nothing is debounced or
//! cancelled. Completed calls come back as [`FormMessage`]s over a channel
//! and are applied in arrival order, so without [`StalePolicy::DiscardStale`]
//! the last call to finish wins even when its name is no longer current.

use crate::form::events::{FormMessage, StalePolicy, StepDirection};
use crate::form::models::{FieldErrors, FormModel, LocationList, SubmitOutcome};
use crate::form::services::FormServices;
use tokio::sync::mpsc;

/// Capacity of the completion channel
const MESSAGE_CHANNEL_CAPACITY: usize = 64;

pub struct FormController {
    model: FormModel,
    services: FormServices,
    stale_policy: StalePolicy,
    message_sender: mpsc::Sender<FormMessage>,
    message_receiver: mpsc::Receiver<FormMessage>,
    next_request_id: u64,
    pending_validations: usize,
    locations_pending: bool,
    mounted: bool,
}

impl FormController {
    pub fn new(services: FormServices, stale_policy: StalePolicy) -> Self {
        let (message_sender, message_receiver) = mpsc::channel(MESSAGE_CHANNEL_CAPACITY);
        Self {
            model: FormModel::new(),
            services,
            stale_policy,
            message_sender,
            message_receiver,
            next_request_id: 0,
            pending_validations: 0,
            locations_pending: false,
            mounted: false,
        }
    }

    pub fn model(&self) -> &FormModel {
        &self.model
    }

    pub fn stale_policy(&self) -> StalePolicy {
        self.stale_policy
    }

    /// Number of availability checks that have not reported back yet
    pub fn pending_validations(&self) -> usize {
        self.pending_validations
    }

    /// True while any collaborator call is outstanding
    pub fn has_pending_work(&self) -> bool {
        self.pending_validations > 0 || self.locations_pending
    }

    /// Start the one-time location fetch. Later calls are ignored.
    pub fn mount(&mut self) {
        if self.mounted {
            tracing::warn!("Form already mounted, location fetch not repeated");
            return;
        }
        self.mounted = true;
        self.locations_pending = true;

        let provider = self.services.locations.clone();
        let sender = self.message_sender.clone();
        tokio::spawn(async move {
            let outcome = provider.get_locations().await.map_err(|e| format!("{e:#}"));
            // Receiver may have been dropped with the form
            let _ = sender.send(FormMessage::LocationsLoaded(outcome)).await;
        });
    }

    /// The name input changed
    pub fn on_name_change<S: Into<String>>(&mut self, new_name: S) {
        let new_name = new_name.into();
        self.model.set_name(new_name.clone());
        self.validate_name(new_name);
    }

    /// Check `name` for availability (fire-and-forget)
    pub fn validate_name(&mut self, name: String) {
        if !self.model.begin_name_check(&name) {
            tracing::debug!("Empty name, availability check skipped");
            return;
        }

        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.pending_validations += 1;
        tracing::debug!("Availability check #{} for {:?}", request_id, name);

        let validator = self.services.validator.clone();
        let sender = self.message_sender.clone();
        tokio::spawn(async move {
            let outcome = validator
                .is_name_valid(&name)
                .await
                .map_err(|e| format!("{e:#}"));
            let _ = sender
                .send(FormMessage::NameValidated {
                    request_id,
                    name,
                    outcome,
                })
                .await;
        });
    }

    /// The location selection changed
    pub fn on_location_change<S: Into<String>>(&mut self, new_location: S) {
        self.model.set_location(new_location);
    }

    /// Step the location selection through the fetched list
    pub fn step_location(&mut self, direction: StepDirection) {
        let current = self.model.fields().location().to_string();
        let next = self
            .model
            .locations()
            .step(&current, direction)
            .map(str::to_string);
        match next {
            Some(location) => self.on_location_change(location),
            None => tracing::debug!("No locations to select from"),
        }
    }

    /// The location control lost focus
    pub fn on_location_blur(&mut self) {
        self.model.touch_location();
    }

    pub fn can_submit(&self) -> bool {
        self.model.can_submit()
    }

    pub fn visible_errors(&self) -> FieldErrors {
        self.model.visible_errors()
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        self.model.submit()
    }

    pub fn clear(&mut self) {
        self.model.clear();
    }

    /// Apply one completed collaborator call
    pub fn apply_message(&mut self, message: FormMessage) {
        match message {
            FormMessage::NameValidated {
                request_id,
                name,
                outcome,
            } => {
                self.pending_validations = self.pending_validations.saturating_sub(1);

                if self.stale_policy == StalePolicy::DiscardStale
                    && (request_id != self.next_request_id || name != self.model.fields().name())
                {
                    tracing::debug!(
                        "Discarding stale availability result #{} for {:?}",
                        request_id,
                        name
                    );
                    // A name cleared mid-check issues no new call to end the check
                    if self.pending_validations == 0 {
                        self.model.end_name_check();
                    }
                    return;
                }

                match outcome {
                    Ok(available) => {
                        tracing::debug!(
                            "Availability result #{} for {:?}: {}",
                            request_id,
                            name,
                            available
                        );
                        self.model.apply_name_verdict(&name, available);
                    }
                    Err(message) => {
                        tracing::error!("Error validating name {:?}: {}", name, message);
                        self.model.apply_name_failure();
                    }
                }
            }
            FormMessage::LocationsLoaded(outcome) => {
                self.locations_pending = false;
                match outcome {
                    Ok(locations) => {
                        tracing::debug!("Loaded {} locations", locations.len());
                        self.model.set_locations(LocationList::new(locations));
                    }
                    Err(message) => {
                        tracing::error!("Failed to load locations: {}", message);
                    }
                }
            }
        }
    }

    /// Apply every completed call without waiting. Returns how many were applied.
    pub fn poll_messages(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.message_receiver.try_recv() {
            self.apply_message(message);
            applied += 1;
        }
        applied
    }

    /// Wait for the next completed call and apply it.
    ///
    /// Returns false when nothing is outstanding.
    pub async fn next_message(&mut self) -> bool {
        if !self.has_pending_work() {
            return false;
        }
        match self.message_receiver.recv().await {
            Some(message) => {
                self.apply_message(message);
                true
            }
            None => false,
        }
    }

    /// Wait until every outstanding call has been applied
    pub async fn settle(&mut self) {
        while self.next_message().await {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::models::{Entry, ErrorKind};
    use crate::form::testing::{ScriptedLocations, ScriptedNameValidator};
    use std::sync::Arc;

    fn controller_with(
        validator: Arc<ScriptedNameValidator>,
        policy: StalePolicy,
    ) -> FormController {
        let services = FormServices::new(Arc::new(ScriptedLocations::new(["NY", "LA"])), validator);
        FormController::new(services, policy)
    }

    #[tokio::test]
    async fn empty_name_should_not_call_validator() {
        let validator = Arc::new(ScriptedNameValidator::new());
        let mut form = controller_with(validator.clone(), StalePolicy::default());

        form.on_name_change("");
        form.settle().await;

        assert!(validator.calls().is_empty());
        assert_eq!(form.model().validation().error, Some(ErrorKind::NameRequired));
        assert!(!form.can_submit());
    }

    #[tokio::test]
    async fn checking_flag_should_be_set_until_completion() {
        let validator = Arc::new(ScriptedNameValidator::new());
        let held = validator.hold("Alice");
        let mut form = controller_with(validator, StalePolicy::default());

        form.on_name_change("Alice");
        assert!(form.model().validation().is_checking);
        assert_eq!(form.pending_validations(), 1);

        held.resolve(true);
        form.settle().await;

        assert!(!form.model().validation().is_checking);
        assert!(form.model().validation().is_available);
        assert_eq!(form.pending_validations(), 0);
    }

    #[tokio::test]
    async fn validator_failure_should_map_to_inline_error() {
        let validator = Arc::new(ScriptedNameValidator::new());
        validator.fail("Alice", "connection refused");
        let mut form = controller_with(validator, StalePolicy::default());

        form.on_name_change("Alice");
        form.settle().await;

        let validation = form.model().validation();
        assert!(!validation.is_available);
        assert_eq!(validation.error_message(), "Error validating name");
        assert!(!validation.is_checking);
    }

    #[tokio::test]
    async fn stale_result_should_win_when_it_finishes_last() {
        let validator = Arc::new(ScriptedNameValidator::new());
        let first = validator.hold("Al");
        let second = validator.hold("Ali");
        let mut form = controller_with(validator, StalePolicy::LastResponseWins);

        form.on_name_change("Al");
        form.on_name_change("Ali");

        second.resolve(true);
        assert!(form.next_message().await);
        first.resolve(false);
        assert!(form.next_message().await);

        assert_eq!(form.model().fields().name(), "Ali");
        assert_eq!(form.model().validation().error, Some(ErrorKind::NameTaken));
        assert!(!form.model().validation().is_available);
    }

    #[tokio::test]
    async fn stale_result_should_be_dropped_when_discarding() {
        let validator = Arc::new(ScriptedNameValidator::new());
        let first = validator.hold("Al");
        let second = validator.hold("Ali");
        let mut form = controller_with(validator, StalePolicy::DiscardStale);

        form.on_name_change("Al");
        form.on_name_change("Ali");

        second.resolve(true);
        assert!(form.next_message().await);
        first.resolve(false);
        assert!(form.next_message().await);

        assert_eq!(form.model().validation().error, None);
        assert!(form.model().validation().is_available);
        assert!(!form.model().validation().is_checking);
    }

    #[tokio::test]
    async fn clearing_name_mid_check_should_end_checking_when_discarding() {
        let validator = Arc::new(ScriptedNameValidator::new());
        let held = validator.hold("A");
        let mut form = controller_with(validator, StalePolicy::DiscardStale);

        form.on_name_change("A");
        form.on_name_change("");
        held.resolve(true);
        form.settle().await;

        assert!(!form.has_pending_work());
        assert!(!form.model().validation().is_checking);
        assert_eq!(form.model().validation().error, Some(ErrorKind::NameRequired));
        assert!(!form.can_submit());
    }

    #[tokio::test]
    async fn older_check_for_retyped_name_should_be_dropped_when_discarding() {
        let validator = Arc::new(ScriptedNameValidator::new());
        let older = validator.hold("Al");
        let newer = validator.hold("Al");
        let mut form = controller_with(validator, StalePolicy::DiscardStale);

        form.on_name_change("Al");
        form.on_name_change("Alx");
        form.on_name_change("Al");

        newer.resolve(true);
        assert!(form.next_message().await);
        assert!(form.next_message().await);
        older.resolve(false);
        form.settle().await;

        assert!(form.model().validation().is_available);
        assert_eq!(form.model().validation().error, None);
    }

    #[tokio::test]
    async fn mount_should_fetch_locations_once() {
        let provider = Arc::new(ScriptedLocations::new(["NY", "LA"]));
        let services = FormServices::new(provider.clone(), Arc::new(ScriptedNameValidator::new()));
        let mut form = FormController::new(services, StalePolicy::default());

        form.mount();
        form.mount();
        form.settle().await;

        assert_eq!(provider.call_count(), 1);
        assert_eq!(form.model().locations().as_slice(), &["NY", "LA"]);
    }

    #[tokio::test]
    async fn failed_location_fetch_should_leave_list_empty() {
        let services = FormServices::new(
            Arc::new(ScriptedLocations::failing("offline")),
            Arc::new(ScriptedNameValidator::new()),
        );
        let mut form = FormController::new(services, StalePolicy::default());

        form.mount();
        form.settle().await;

        assert!(form.model().locations().is_empty());
        assert!(!form.has_pending_work());
    }

    #[tokio::test]
    async fn step_location_should_walk_fetched_list() {
        let mut form = controller_with(Arc::new(ScriptedNameValidator::new()), StalePolicy::default());
        form.mount();
        form.settle().await;

        form.step_location(StepDirection::Forward);
        assert_eq!(form.model().fields().location(), "NY");
        form.step_location(StepDirection::Forward);
        assert_eq!(form.model().fields().location(), "LA");
        form.step_location(StepDirection::Backward);
        assert_eq!(form.model().fields().location(), "NY");
    }

    #[tokio::test]
    async fn submit_then_retype_should_flag_duplicate() {
        let validator = Arc::new(ScriptedNameValidator::new());
        let mut form = controller_with(validator, StalePolicy::default());

        form.on_name_change("Alice");
        form.on_location_change("NY");
        form.settle().await;
        assert!(form.submit().is_accepted());
        assert_eq!(form.model().entries().as_slice(), &[Entry::new("Alice", "NY")]);

        form.on_name_change("Alice");
        form.on_location_change("NY");
        form.settle().await;

        assert!(form.model().validation().is_duplicate);
        assert!(!form.can_submit());
        assert!(!form.submit().is_accepted());
    }

    #[tokio::test]
    async fn poll_messages_should_not_block_without_completions() {
        let mut form = controller_with(Arc::new(ScriptedNameValidator::new()), StalePolicy::default());
        assert_eq!(form.poll_messages(), 0);
        assert!(!form.next_message().await);
    }
}
