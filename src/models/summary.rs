use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A generated summary with its citation sources.
///
/// Citation keys look like `<1.2>`: profile number, then passage number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary: String,
    pub citations: BTreeMap<String, String>,
}

impl SummaryResult {
    /// Source text for a citation key such as `<1.2>`
    pub fn citation(&self, key: &str) -> Option<&str> {
        self.citations.get(key).map(String::as_str)
    }
}

/// Body of the summarize endpoint: a summary, or the backend's error object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SummaryResponse {
    Summary(SummaryResult),
    Error { error: String },
}
