//! Response Parser: validates raw model text as a list of scored entries.
//!
//! Never errors. Any failure is logged and reported as an empty list, which the
//! orchestrator treats as "try the next prompt strategy".

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::llm_client::strip_json_fences;

/// Keys every entry must carry.
pub const REQUIRED_KEYS: [&str; 3] = ["id", "name", "score"];

/// One validated response entry. Only key presence is checked here; the
/// orchestrator decides what to do with a non-numeric `score`.
pub type ScoreEntry = Map<String, Value>;

pub fn parse_response(raw: &str) -> Vec<ScoreEntry> {
    let cleaned = strip_json_fences(raw);
    debug!("After fence stripping: {}", cleaned);

    if !cleaned.starts_with('[') {
        warn!("Model output does not appear to be a JSON array");
        return Vec::new();
    }

    let parsed: Value = match serde_json::from_str(cleaned) {
        Ok(v) => v,
        Err(e) => {
            warn!("Failed to parse model output as JSON: {e}");
            debug!("Unparseable model output: {}", raw);
            return Vec::new();
        }
    };

    let Value::Array(items) = parsed else {
        warn!("Model output parsed but is not a JSON array");
        return Vec::new();
    };

    let mut entries = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(entry) if REQUIRED_KEYS.iter().all(|k| entry.contains_key(*k)) => {
                entries.push(entry)
            }
            _ => {
                warn!("Entry {index} is missing one of {REQUIRED_KEYS:?}; rejecting response");
                return Vec::new();
            }
        }
    }

    entries
}
