//! # Services Layer
//!
//! The two external collaborators of the form, expressed as traits, plus
//! the adapters that implement them:
//!
//! - [`HttpFormApi`]: a remote availability API over HTTP
//! - [`MockFormApi`]: an offline stand-in with simulated latency

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub mod http;
pub mod mock;

pub use http::HttpFormApi;
pub use mock::MockFormApi;

/// Supplies the selectable locations, fetched once at mount
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn get_locations(&self) -> Result<Vec<String>>;
}

/// Reports whether a candidate name is still available
#[async_trait]
pub trait NameValidator: Send + Sync {
    async fn is_name_valid(&self, name: &str) -> Result<bool>;
}

/// Both collaborators, shared between the controller and spawned tasks
#[derive(Clone)]
pub struct FormServices {
    pub locations: Arc<dyn LocationProvider>,
    pub validator: Arc<dyn NameValidator>,
}

impl FormServices {
    pub fn new(locations: Arc<dyn LocationProvider>, validator: Arc<dyn NameValidator>) -> Self {
        Self {
            locations,
            validator,
        }
    }

    /// Use one adapter for both roles
    pub fn from_api<A>(api: A) -> Self
    where
        A: LocationProvider + NameValidator + 'static,
    {
        let api = Arc::new(api);
        Self {
            locations: api.clone(),
            validator: api,
        }
    }
}
