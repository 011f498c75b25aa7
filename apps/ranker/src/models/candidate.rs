use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A cleaned candidate row: column name → string value, in sheet column order.
///
/// Written once by the record cleaner and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateRecord {
    fields: Map<String, Value>,
}

impl CandidateRecord {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), Value::String(v.into())))
            .collect();
        Self { fields }
    }

    /// Exact-name lookup. Non-string values (hand-edited files) read as absent.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).and_then(Value::as_str)
    }

    /// Case-insensitive lookup: `name` finds a `Name` column.
    pub fn get_ignore_case(&self, column: &str) -> Option<&str> {
        self.get(column).or_else(|| {
            self.fields
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(column))
                .and_then(|(_, v)| v.as_str())
        })
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn all_values_are_strings(&self) -> bool {
        self.fields.values().all(Value::is_string)
    }
}

/// A model-scored candidate as returned in the final ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub id: String,
    pub name: String,
    /// Kept as the model sent it, so `90` stays `90` in the output.
    pub score: Number,
    pub highlights: Vec<String>,
}

impl ScoredCandidate {
    /// Builds a scored candidate from one parsed response entry.
    ///
    /// Returns `None` when `score` is missing or not numeric. `id` may arrive as a
    /// number and `highlights` as a single string; both are coerced.
    pub fn from_entry(entry: &Map<String, Value>) -> Option<Self> {
        let score = match entry.get("score")? {
            Value::Number(n) if n.as_f64().is_some_and(f64::is_finite) => n.clone(),
            _ => return None,
        };

        Some(Self {
            id: value_to_text(entry.get("id")),
            name: value_to_text(entry.get("name")),
            score,
            highlights: match entry.get("highlights") {
                Some(Value::Array(items)) => items
                    .iter()
                    .map(|item| value_to_text(Some(item)))
                    .collect(),
                Some(Value::String(s)) => vec![s.clone()],
                _ => Vec::new(),
            },
        })
    }

    pub fn score_value(&self) -> f64 {
        self.score.as_f64().unwrap_or(f64::NAN)
    }
}

fn value_to_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
