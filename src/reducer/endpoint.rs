//! Endpoint tag
//!
//! The backend does not label its payloads, so the caller names the endpoint
//! it is consuming and the payload is interpreted accordingly.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::{Organization, Profile, SummaryResponse};
use crate::reducer::transcript::Transcript;

/// Backend endpoint a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Organization search by name
    Organizations,
    /// People search within one organization
    People,
    /// Profile summarization
    Summary,
}

/// How an endpoint frames its response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// `data: ` lines streamed over the response body
    EventStream,
    /// One JSON document, delivered as a single payload
    JsonBody,
}

/// Caller-visible state produced by a successfully parsed payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadUpdate {
    Organizations(Vec<Organization>),
    Profiles(Vec<Profile>),
    Summary(SummaryResponse),
}

impl Endpoint {
    /// Path relative to the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Organizations => "/api/get_orgs",
            Endpoint::People => "/api/get_people",
            Endpoint::Summary => "/api/summarize_profiles",
        }
    }

    pub fn framing(&self) -> Framing {
        match self {
            Endpoint::Organizations | Endpoint::People => Framing::EventStream,
            Endpoint::Summary => Framing::JsonBody,
        }
    }

    /// Transcript a new request to this endpoint starts from.
    ///
    /// The summary transcript starts empty so the final document parses as a
    /// whole.
    pub fn initial_transcript(&self) -> Transcript {
        match self {
            Endpoint::People => Transcript::new().with_line("Initiating search..."),
            Endpoint::Organizations | Endpoint::Summary => Transcript::new(),
        }
    }

    /// Noun used in parse error lines
    pub fn payload_label(&self) -> &'static str {
        match self {
            Endpoint::Organizations => "organization",
            Endpoint::People => "profile",
            Endpoint::Summary => "summary",
        }
    }

    /// Parse a payload into this endpoint's update, plus the transcript line
    /// that records it.
    pub(crate) fn parse_payload(
        &self,
        json: &str,
    ) -> Result<(PayloadUpdate, String), serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        match self {
            Endpoint::Organizations => {
                let orgs: Vec<Organization> = typed(&value)?;
                let line = serde_json::to_string_pretty(&value)?;
                Ok((PayloadUpdate::Organizations(orgs), line))
            }
            Endpoint::People => {
                let profiles: Vec<Profile> = typed(&value)?;
                let line = format!("Profiles set: {} profiles", profiles.len());
                Ok((PayloadUpdate::Profiles(profiles), line))
            }
            Endpoint::Summary => {
                let response: SummaryResponse = typed(&value)?;
                let line = serde_json::to_string_pretty(&value)?;
                Ok((PayloadUpdate::Summary(response), line))
            }
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

fn typed<T: DeserializeOwned>(value: &Value) -> Result<T, serde_json::Error> {
    T::deserialize(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_and_framing() {
        assert_eq!(Endpoint::Organizations.path(), "/api/get_orgs");
        assert_eq!(Endpoint::People.path(), "/api/get_people");
        assert_eq!(Endpoint::Summary.path(), "/api/summarize_profiles");
        assert_eq!(Endpoint::People.framing(), Framing::EventStream);
        assert_eq!(Endpoint::Summary.framing(), Framing::JsonBody);
    }

    #[test]
    fn test_initial_transcripts() {
        assert!(Endpoint::Organizations.initial_transcript().is_empty());
        assert!(Endpoint::Summary.initial_transcript().is_empty());
        assert_eq!(
            Endpoint::People.initial_transcript().as_text(),
            "Initiating search...\n"
        );
    }

    #[test]
    fn test_parse_organizations_pretty_prints() {
        let (update, line) = Endpoint::Organizations
            .parse_payload(r#"[{"id":"1","name":"Acme","linkedin_url":null}]"#)
            .unwrap();
        match update {
            PayloadUpdate::Organizations(orgs) => assert_eq!(orgs[0].name, "Acme"),
            other => panic!("Expected Organizations, got {:?}", other),
        }
        assert!(line.starts_with("[\n  {"));
        assert!(line.contains("\"name\": \"Acme\""));
    }

    #[test]
    fn test_parse_profiles_status_line() {
        let (update, line) = Endpoint::People
            .parse_payload(r#"[{"linkedin_url":"u","first_name":"A","last_name":"B","title":"T"}]"#)
            .unwrap();
        assert!(matches!(update, PayloadUpdate::Profiles(ref p) if p.len() == 1));
        assert_eq!(line, "Profiles set: 1 profiles");
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(Endpoint::People.parse_payload(r#"{"descriptions":[]}"#).is_err());
        assert!(Endpoint::Organizations.parse_payload("42").is_err());
        assert!(Endpoint::Summary.parse_payload("[]").is_err());
    }

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(Endpoint::Organizations.parse_payload("No results found.").is_err());
    }
}
