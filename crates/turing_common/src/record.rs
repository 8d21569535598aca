//! Wire-visible data model for detection results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Verdict a prediction model assigns to an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Human,
    #[serde(rename = "AI")]
    Ai,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Human => write!(f, "Human"),
            Label::Ai => write!(f, "AI"),
        }
    }
}

/// Raw output of a single prediction model, immutable once produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Model that produced this prediction
    pub provider: String,
    /// Model confidence in [0, 1]
    pub confidence: f64,
    pub label: Label,
}

/// Final result of one `detect` call; built fresh each time, never mutated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub question: String,
    pub provider: String,
    pub confidence: f64,
    pub label: Label,
    /// Wall-clock duration of the call; 0 when served from cache
    pub elapsed_ms: u64,
    pub served_from_cache: bool,
}
