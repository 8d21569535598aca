//! Fallback orchestrator: cache first, then the provider chain in strict
//! priority order.
//!
//! Flow per call:
//! 1. Cache consult (when enabled) - a fresh hit returns immediately with
//!    zero models invoked.
//! 2. One attempt per provider, in order, each logged. A later model never
//!    starts before the previous one has rejected.
//! 3. First success wins and is written back to the cache (when enabled);
//!    total exhaustion surfaces as [`DetectError::AllProvidersFailed`].

use crate::cache::AnswerCache;
use crate::events::{DetectEvent, EventSink, TracingSink};
use crate::provider::ProviderChain;
use crate::record::DetectionRecord;
use std::sync::Arc;
use std::time::Instant;

/// Per-call options for [`Detector::detect`]
#[derive(Debug, Clone, Copy)]
pub struct DetectOptions {
    /// Read and update the answer cache
    pub use_cache: bool,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self { use_cache: true }
    }
}

/// Terminal detection failure surfaced to the caller
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetectError {
    /// Every provider in the chain rejected this call
    #[error("All models failed")]
    AllProvidersFailed,
}

/// Orchestrates detection calls over an injected provider chain.
///
/// Chain and cache are owned by the instance, so independent detectors can
/// coexist (tests construct several without cross-contamination). The
/// detector is shared across concurrent calls behind an `Arc`; within one
/// call, provider attempts are strictly sequential.
///
/// Known limitation: no timeout is enforced on a provider attempt. A
/// provider that never settles stalls that call's task indefinitely.
pub struct Detector {
    chain: ProviderChain,
    cache: AnswerCache,
    events: Arc<dyn EventSink>,
}

impl Detector {
    /// Detector with the default five-minute cache and the tracing sink
    pub fn new(chain: ProviderChain) -> Self {
        Self::with_parts(chain, AnswerCache::new(), Arc::new(TracingSink))
    }

    /// Full dependency injection; tests use this to observe events
    pub fn with_parts(chain: ProviderChain, cache: AnswerCache, events: Arc<dyn EventSink>) -> Self {
        Self {
            chain,
            cache,
            events,
        }
    }

    /// Produce a [`DetectionRecord`] for `question`, preferring the cache,
    /// else trying providers in chain order until one succeeds.
    pub async fn detect(
        &self,
        question: &str,
        opts: DetectOptions,
    ) -> Result<DetectionRecord, DetectError> {
        let start = Instant::now();

        if opts.use_cache {
            if let Some(record) = self.cache.get(question) {
                self.events.emit(DetectEvent::CacheHit {
                    question: question.to_string(),
                    provider: record.provider.clone(),
                });
                return Ok(record);
            }
        }

        let chain_start = Instant::now();
        let mut outcome = None;

        for provider in self.chain.iter() {
            self.events.emit(DetectEvent::ModelTry {
                question: question.to_string(),
                provider: provider.id().to_string(),
            });

            match provider.predict().await {
                Ok(prediction) => {
                    outcome = Some(prediction);
                    break;
                }
                Err(err) => {
                    self.events.emit(DetectEvent::ModelFail {
                        question: question.to_string(),
                        provider: provider.id().to_string(),
                        error: err.to_string(),
                    });
                }
            }
        }

        let Some(prediction) = outcome else {
            self.events.emit(DetectEvent::DetectError {
                question: question.to_string(),
                elapsed_ms: chain_start.elapsed().as_millis() as u64,
            });
            return Err(DetectError::AllProvidersFailed);
        };

        let record = DetectionRecord {
            question: question.to_string(),
            provider: prediction.provider,
            confidence: prediction.confidence,
            label: prediction.label,
            elapsed_ms: start.elapsed().as_millis() as u64,
            served_from_cache: false,
        };

        self.events.emit(DetectEvent::DetectOk {
            question: question.to_string(),
            provider: record.provider.clone(),
            elapsed_ms: record.elapsed_ms,
        });

        if opts.use_cache {
            self.cache.put(question, &record);
        }

        Ok(record)
    }
}
