//! The prediction-provider seam.
//!
//! The detector treats every provider as an opaque async attempt that either
//! yields a [`Prediction`] or fails. The failure cause goes into the
//! `model_fail` event and is otherwise ignored; it never reaches the caller.

use crate::record::Prediction;
use async_trait::async_trait;
use std::sync::Arc;

/// Error raised by a single provider attempt
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ProviderError {
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A named asynchronous prediction model
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable identifier, recorded in events and results
    fn id(&self) -> &str;

    /// Run one prediction attempt. Single shot: no internal retry, and the
    /// detector imposes no timeout on it.
    async fn predict(&self) -> Result<Prediction, ProviderError>;
}

/// Ordered sequence of providers, fixed at detector construction and
/// immutable for the detector's lifetime.
#[derive(Clone)]
pub struct ProviderChain {
    providers: Vec<Arc<dyn Provider>>,
}

impl ProviderChain {
    pub fn new(providers: Vec<Arc<dyn Provider>>) -> Self {
        Self { providers }
    }

    /// Providers in priority order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Provider>> {
        self.providers.iter()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
