//! Turing Detector core library
//!
//! Decides whether an interview answer reads as human- or AI-written by
//! asking a chain of prediction models in strict priority order, falling
//! back to the next model when one fails, with short-lived caching of the
//! last-known-good result per question.
//!
//! The crate is transport-agnostic: `turingd` wires it to HTTP and supplies
//! the concrete models.

pub mod cache;
pub mod detector;
pub mod events;
pub mod provider;
pub mod record;

pub use cache::{AnswerCache, DEFAULT_TTL};
pub use detector::{DetectError, DetectOptions, Detector};
pub use events::{DetectEvent, EventSink, LogEntry, TracingSink};
pub use provider::{Provider, ProviderChain, ProviderError};
pub use record::{DetectionRecord, Label, Prediction};
