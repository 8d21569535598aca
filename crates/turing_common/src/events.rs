//! Structured event log for the detection pipeline.
//!
//! Every attempt is recorded as one flat JSON line with a `ts` timestamp:
//! `cache_hit`, `model_try`, `model_fail`, `detect_ok`, `detect_error` from
//! the detector, plus `server_listen` and `shutdown` from the daemon.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event kinds, tagged with their wire name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DetectEvent {
    /// A fresh cached record satisfied the call; no model was invoked
    CacheHit { question: String, provider: String },
    /// About to invoke one model in the chain
    ModelTry { question: String, provider: String },
    /// One model rejected; the chain advances to the next
    ModelFail {
        question: String,
        provider: String,
        error: String,
    },
    /// A model succeeded and the record was returned
    DetectOk {
        question: String,
        provider: String,
        elapsed_ms: u64,
    },
    /// Every model in the chain failed
    DetectError { question: String, elapsed_ms: u64 },
    /// Daemon bound its listen socket
    ServerListen { port: u16 },
    /// Daemon received a termination signal
    Shutdown { signal: String },
}

impl DetectEvent {
    /// Event name as it appears on the wire
    pub fn name(&self) -> &'static str {
        match self {
            DetectEvent::CacheHit { .. } => "cache_hit",
            DetectEvent::ModelTry { .. } => "model_try",
            DetectEvent::ModelFail { .. } => "model_fail",
            DetectEvent::DetectOk { .. } => "detect_ok",
            DetectEvent::DetectError { .. } => "detect_error",
            DetectEvent::ServerListen { .. } => "server_listen",
            DetectEvent::Shutdown { .. } => "shutdown",
        }
    }
}

/// One emitted log line: timestamp plus the flattened event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub ts: DateTime<Utc>,
    #[serde(flatten)]
    pub event: DetectEvent,
}

impl LogEntry {
    pub fn new(event: DetectEvent) -> Self {
        Self {
            ts: Utc::now(),
            event,
        }
    }
}

/// Where detection events go.
///
/// Emission is fire-and-forget: a sink must never propagate failure into
/// the detect call.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: DetectEvent);
}

/// Production sink: one JSON line per event through `tracing`
#[derive(Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: DetectEvent) {
        match serde_json::to_string(&LogEntry::new(event)) {
            Ok(line) => tracing::info!(target: "events", "{}", line),
            Err(e) => tracing::warn!("failed to serialize event: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let event = DetectEvent::CacheHit {
            question: "Q1".to_string(),
            provider: "ModelA".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "cache_hit");
        assert_eq!(json["question"], "Q1");
        assert_eq!(json["provider"], "ModelA");
    }

    #[test]
    fn test_model_fail_carries_error_message() {
        let event = DetectEvent::ModelFail {
            question: "Q1".to_string(),
            provider: "ModelB".to_string(),
            error: "ModelB failed".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "model_fail");
        assert_eq!(json["error"], "ModelB failed");
    }

    #[test]
    fn test_name_matches_serialized_tag() {
        let events = vec![
            DetectEvent::CacheHit {
                question: String::new(),
                provider: String::new(),
            },
            DetectEvent::ModelTry {
                question: String::new(),
                provider: String::new(),
            },
            DetectEvent::ModelFail {
                question: String::new(),
                provider: String::new(),
                error: String::new(),
            },
            DetectEvent::DetectOk {
                question: String::new(),
                provider: String::new(),
                elapsed_ms: 0,
            },
            DetectEvent::DetectError {
                question: String::new(),
                elapsed_ms: 0,
            },
            DetectEvent::ServerListen { port: 3000 },
            DetectEvent::Shutdown {
                signal: "SIGINT".to_string(),
            },
        ];

        for event in events {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["event"], event.name());
        }
    }

    #[test]
    fn test_log_entry_is_flat_with_timestamp() {
        let entry = LogEntry::new(DetectEvent::DetectOk {
            question: "Q1".to_string(),
            provider: "ModelC".to_string(),
            elapsed_ms: 3120,
        });

        let json = serde_json::to_value(&entry).unwrap();
        // Flat record: payload fields sit next to ts, not nested
        assert!(json["ts"].is_string());
        assert_eq!(json["event"], "detect_ok");
        assert_eq!(json["elapsed_ms"], 3120);
        assert!(json.get("kind").is_none());
    }
}
