//! # Scripted Collaborators
//!
//! Deterministic collaborators for driving the form controller in tests.
//! Responses can be preset per name or held back and released in any order,
//! which makes the out-of-order completion of overlapping checks observable.

use super::services::{LocationProvider, NameValidator};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::oneshot;

type Verdict = Result<bool, String>;

/// Handle to release one held validator call
pub struct HeldResponse {
    sender: oneshot::Sender<Verdict>,
}

impl HeldResponse {
    /// Complete the call with a verdict
    pub fn resolve(self, available: bool) {
        let _ = self.sender.send(Ok(available));
    }

    /// Complete the call with an error
    pub fn reject<S: Into<String>>(self, message: S) {
        let _ = self.sender.send(Err(message.into()));
    }
}

/// Name validator whose answers are scripted by the test
#[derive(Default)]
pub struct ScriptedNameValidator {
    held: Mutex<HashMap<String, VecDeque<oneshot::Receiver<Verdict>>>>,
    verdicts: Mutex<HashMap<String, Verdict>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedNameValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every call for `name` immediately with `available`
    pub fn respond(&self, name: &str, available: bool) {
        self.verdicts
            .lock()
            .unwrap()
            .insert(name.to_string(), Ok(available));
    }

    /// Fail every call for `name` immediately
    pub fn fail(&self, name: &str, message: &str) {
        self.verdicts
            .lock()
            .unwrap()
            .insert(name.to_string(), Err(message.to_string()));
    }

    /// Hold the next call for `name` until the returned handle is released
    pub fn hold(&self, name: &str) -> HeldResponse {
        let (sender, receiver) = oneshot::channel();
        self.held
            .lock()
            .unwrap()
            .entry(name.to_string())
            .or_default()
            .push_back(receiver);
        HeldResponse { sender }
    }

    /// Names passed to the validator so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NameValidator for ScriptedNameValidator {
    async fn is_name_valid(&self, name: &str) -> Result<bool> {
        self.calls.lock().unwrap().push(name.to_string());

        let held = self
            .held
            .lock()
            .unwrap()
            .get_mut(name)
            .and_then(VecDeque::pop_front);

        let verdict = match held {
            Some(receiver) => receiver
                .await
                .unwrap_or_else(|_| Err("held response dropped".to_string())),
            None => self
                .verdicts
                .lock()
                .unwrap()
                .get(name)
                .cloned()
                .unwrap_or(Ok(true)),
        };

        verdict.map_err(|message| anyhow::anyhow!(message))
    }
}

/// Location provider returning a fixed result and counting calls
pub struct ScriptedLocations {
    result: Result<Vec<String>, String>,
    calls: AtomicUsize,
}

impl ScriptedLocations {
    pub fn new<I, S>(locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            result: Ok(locations.into_iter().map(Into::into).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationProvider for ScriptedLocations {
    async fn get_locations(&self) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result
            .clone()
            .map_err(|message| anyhow::anyhow!(message))
    }
}
