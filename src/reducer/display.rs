//! Display derivation
//!
//! The shell renders one markdown document per request. When the whole
//! transcript is a summary object, its citation keys become links to the
//! profiles they cite; otherwise the transcript is shown as-is.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::models::{Profile, SummaryResult};
use crate::reducer::transcript::Transcript;

/// Link target used when a citation cannot be matched to a profile
pub const PLACEHOLDER_TARGET: &str = "#";

/// Citation keys inside a summary, e.g. `<3.2>`
static CITATION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(\d+\.\d+)>").expect("Invalid citation regex pattern"));

/// A citation key rewritten into a markdown link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCitation {
    /// Key as it appears in the summary, e.g. `<1.2>`
    pub key: String,
    /// Link text, the key without brackets
    pub label: String,
    /// Citation source text, `None` if the key is missing from the citations
    pub source: Option<String>,
    /// First name extracted from the source
    pub first_name: Option<String>,
    /// Profile URL, or [`PLACEHOLDER_TARGET`]
    pub target: String,
}

impl ResolvedCitation {
    /// Whether the citation was matched to a profile
    pub fn is_resolved(&self) -> bool {
        self.target != PLACEHOLDER_TARGET
    }

    /// Markdown link for this citation
    pub fn to_markdown(&self) -> String {
        format!("[{}]({})", self.label, self.target)
    }
}

/// Value the shell renders for a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayValue {
    /// The raw transcript text
    Plain { markdown: String },
    /// A summary with citation keys rewritten into links
    Summary {
        markdown: String,
        citations: Vec<ResolvedCitation>,
    },
}

impl DisplayValue {
    pub fn markdown(&self) -> &str {
        match self {
            DisplayValue::Plain { markdown } | DisplayValue::Summary { markdown, .. } => markdown,
        }
    }

    pub fn is_summary(&self) -> bool {
        matches!(self, DisplayValue::Summary { .. })
    }

    /// Citations resolved in a summary, empty for plain output
    pub fn citations(&self) -> &[ResolvedCitation] {
        match self {
            DisplayValue::Plain { .. } => &[],
            DisplayValue::Summary { citations, .. } => citations,
        }
    }
}

impl Default for DisplayValue {
    fn default() -> Self {
        DisplayValue::Plain {
            markdown: String::new(),
        }
    }
}

/// Derive the display value from the whole transcript.
///
/// The transcript is parsed as one JSON document. A document with a `summary`
/// string and a `citations` map is rendered with resolved citation links;
/// anything else falls back to the plain transcript text. Never mutates the
/// transcript, so repeated calls with the same inputs return equal values.
pub fn derive_display(transcript: &Transcript, profiles: &[Profile]) -> DisplayValue {
    let text = transcript.as_text();
    match serde_json::from_str::<SummaryResult>(text) {
        Ok(result) => {
            let (markdown, citations) = resolve_citations(&result, profiles);
            DisplayValue::Summary {
                markdown,
                citations,
            }
        }
        Err(_) => DisplayValue::Plain {
            markdown: text.to_string(),
        },
    }
}

/// Rewrite every citation key in the summary into a markdown link.
///
/// Returns the rewritten text and each distinct key in order of first
/// appearance.
pub fn resolve_citations(
    result: &SummaryResult,
    profiles: &[Profile],
) -> (String, Vec<ResolvedCitation>) {
    let mut resolved: Vec<ResolvedCitation> = Vec::new();

    let markdown = CITATION_REGEX.replace_all(&result.summary, |caps: &Captures| {
        let citation = resolve_one(&caps[0], &caps[1], result, profiles);
        let link = citation.to_markdown();
        if !resolved.iter().any(|c| c.key == citation.key) {
            resolved.push(citation);
        }
        link
    });

    (markdown.into_owned(), resolved)
}

fn resolve_one(
    key: &str,
    label: &str,
    result: &SummaryResult,
    profiles: &[Profile],
) -> ResolvedCitation {
    let source = result.citation(key);
    let first_name = source.and_then(candidate_first_name);
    let target = first_name
        .and_then(|name| profiles.iter().find(|p| p.first_name == name))
        .and_then(Profile::link_target)
        .unwrap_or(PLACEHOLDER_TARGET);

    if source.is_none() {
        tracing::debug!(key, "Citation key missing from citations map");
    }

    ResolvedCitation {
        key: key.to_string(),
        label: label.to_string(),
        source: source.map(str::to_string),
        first_name: first_name.map(str::to_string),
        target: target.to_string(),
    }
}

/// Extract the candidate first name from a citation source.
///
/// The segment before the first comma is split on single spaces and its
/// second word is taken, which matches the backend's `Name: First Last, ...`
/// header. A leading space counts as an empty first word. When the segment
/// has no non-empty second word, the citation is read as `Last, First, ...`
/// and the first word after the comma is used instead.
pub fn candidate_first_name(citation: &str) -> Option<&str> {
    let mut segments = citation.split(',');
    let leading = segments.next().unwrap_or_default();
    if let Some(second) = leading.split(' ').nth(1).filter(|w| !w.is_empty()) {
        return Some(second);
    }
    segments.next().and_then(|s| s.split_whitespace().next())
}
