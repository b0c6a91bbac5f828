//! The event fold

use crate::models::Profile;
use crate::reducer::display::{derive_display, DisplayValue};
use crate::reducer::endpoint::{Endpoint, PayloadUpdate};
use crate::reducer::transcript::Transcript;
use crate::stream::ProtocolEvent;

/// Result of folding a batch of events
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduction {
    /// Transcript with every event of the batch appended
    pub transcript: Transcript,
    /// State updates from payloads that parsed, in arrival order
    pub updates: Vec<PayloadUpdate>,
    /// Display value derived from the new transcript
    pub display: DisplayValue,
    /// Number of payloads in the batch that failed to parse
    pub parse_errors: usize,
}

/// Fold `events` into `transcript`.
///
/// - A log line is appended as-is.
/// - A payload is parsed according to `endpoint`. On success its update is
///   returned and the endpoint's transcript line is appended; on failure a
///   single error line is appended and the fold continues.
///
/// The display value is derived from the resulting transcript and `profiles`.
pub fn reduce(
    transcript: Transcript,
    endpoint: Endpoint,
    events: &[ProtocolEvent],
    profiles: &[Profile],
) -> Reduction {
    let mut transcript = transcript;
    let mut updates = Vec::new();
    let mut parse_errors = 0;

    for event in events {
        match event {
            ProtocolEvent::LogLine { text, .. } => {
                transcript.push_line(text.as_str());
            }
            ProtocolEvent::Payload { json } => match endpoint.parse_payload(json) {
                Ok((update, line)) => {
                    tracing::debug!(endpoint = %endpoint, "Applied payload");
                    transcript.push_line(line);
                    updates.push(update);
                }
                Err(e) => {
                    tracing::warn!(endpoint = %endpoint, error = %e, "Failed to parse payload");
                    parse_errors += 1;
                    transcript.push_line(format!(
                        "Error parsing {} data: {}",
                        endpoint.payload_label(),
                        e
                    ));
                }
            },
        }
    }

    let display = derive_display(&transcript, profiles);

    Reduction {
        transcript,
        updates,
        display,
        parse_errors,
    }
}
