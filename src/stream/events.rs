//! Protocol event types
//!
//! The event vocabulary is closed: a protocol line is either a progress log
//! with one of the [`LogKind`] prefixes, or a payload carrying raw JSON text.

use serde::{Deserialize, Serialize};

/// Progress message prefixes recognized by the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    Found,
    Searching,
    Sending,
    Received,
}

impl LogKind {
    /// All log kinds, in the order they are checked
    pub const ALL: [LogKind; 4] = [
        LogKind::Found,
        LogKind::Searching,
        LogKind::Sending,
        LogKind::Received,
    ];

    /// The literal prefix that identifies this kind
    pub fn prefix(&self) -> &'static str {
        match self {
            LogKind::Found => "Found",
            LogKind::Searching => "Searching",
            LogKind::Sending => "Sending",
            LogKind::Received => "Received",
        }
    }

    /// Match the start of a protocol line against the known prefixes
    pub fn detect(text: &str) -> Option<LogKind> {
        Self::ALL
            .into_iter()
            .find(|kind| text.starts_with(kind.prefix()))
    }
}

/// A decoded protocol event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProtocolEvent {
    /// Human-readable progress message
    LogLine { kind: LogKind, text: String },
    /// Raw JSON-encoded value, not yet parsed
    Payload { json: String },
}

impl ProtocolEvent {
    /// Build a log line event, detecting its kind from the text.
    ///
    /// Returns `None` if the text does not start with a known log prefix.
    pub fn log(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        LogKind::detect(&text).map(|kind| ProtocolEvent::LogLine { kind, text })
    }

    /// Build a payload event
    pub fn payload(json: impl Into<String>) -> Self {
        ProtocolEvent::Payload { json: json.into() }
    }

    /// Get the event type name as a string
    pub fn event_type_name(&self) -> &'static str {
        match self {
            ProtocolEvent::LogLine { .. } => "log",
            ProtocolEvent::Payload { .. } => "payload",
        }
    }

    /// The text carried by the event, without the protocol marker
    pub fn text(&self) -> &str {
        match self {
            ProtocolEvent::LogLine { text, .. } => text,
            ProtocolEvent::Payload { json } => json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_kind_detect() {
        assert_eq!(LogKind::detect("Found 3 organizations."), Some(LogKind::Found));
        assert_eq!(
            LogKind::detect("Searching for people..."),
            Some(LogKind::Searching)
        );
        assert_eq!(
            LogKind::detect("Sending request for page 1..."),
            Some(LogKind::Sending)
        );
        assert_eq!(
            LogKind::detect("Received response for page 1..."),
            Some(LogKind::Received)
        );
    }

    #[test]
    fn test_log_kind_detect_is_case_sensitive() {
        assert_eq!(LogKind::detect("found 3"), None);
        assert_eq!(LogKind::detect(" Found 3"), None);
        assert_eq!(LogKind::detect("[]"), None);
    }

    #[test]
    fn test_log_kind_prefix_round_trip() {
        for kind in LogKind::ALL {
            assert_eq!(LogKind::detect(kind.prefix()), Some(kind));
        }
    }

    #[test]
    fn test_protocol_event_log_constructor() {
        assert_eq!(
            ProtocolEvent::log("Found 2 people on page 1..."),
            Some(ProtocolEvent::LogLine {
                kind: LogKind::Found,
                text: "Found 2 people on page 1...".to_string(),
            })
        );
        assert_eq!(ProtocolEvent::log("No results found."), None);
    }

    #[test]
    fn test_event_type_name() {
        assert_eq!(ProtocolEvent::payload("[]").event_type_name(), "payload");
        let log = ProtocolEvent::log("Searching...").unwrap();
        assert_eq!(log.event_type_name(), "log");
        assert_eq!(log.text(), "Searching...");
    }
}
