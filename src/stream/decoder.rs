//! Line framing for streamed responses
//!
//! [`DecoderState`] is an owned value threaded through every call: each
//! `decode` consumes the previous state and returns the next one together with
//! the events completed by the chunk. Framing happens on raw bytes, so a
//! multi-byte character split across chunks is reassembled before the line is
//! turned into text (`\n` never occurs inside a UTF-8 sequence).

use crate::stream::events::ProtocolEvent;

/// Marker that identifies a protocol line
pub const DATA_MARKER: &str = "data: ";

/// Decoder state carried across chunks of one response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecoderState {
    /// Bytes after the last newline seen so far
    pending: Vec<u8>,
    /// Set once end-of-stream has been processed
    finished: bool,
}

impl DecoderState {
    /// Create a fresh decoder state for a new response
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether end-of-stream has been processed
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of buffered bytes that do not yet form a complete line
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Feed one chunk, returning the new state and every event it completed.
    ///
    /// Chunks delivered after [`DecoderState::finish`] are ignored.
    pub fn decode(mut self, chunk: &[u8]) -> (Self, Vec<ProtocolEvent>) {
        if self.finished {
            tracing::trace!(bytes = chunk.len(), "Ignoring chunk after end of stream");
            return (self, Vec::new());
        }

        // Pending bytes never contain a newline, only the new chunk is scanned
        let mut search_from = self.pending.len();
        self.pending.extend_from_slice(chunk);

        let mut events = Vec::new();
        let mut start = 0;
        while let Some(offset) = self.pending[search_from..].iter().position(|&b| b == b'\n') {
            let end = search_from + offset;
            if let Some(event) = frame_line(&self.pending[start..end]) {
                events.push(event);
            }
            start = end + 1;
            search_from = start;
        }
        self.pending.drain(..start);

        (self, events)
    }

    /// Process end-of-stream: the pending partial line, if any, is treated as
    /// complete. The returned state produces no further events.
    pub fn finish(mut self) -> (Self, Vec<ProtocolEvent>) {
        if self.finished {
            return (self, Vec::new());
        }
        self.finished = true;

        let rest = std::mem::take(&mut self.pending);
        let events = if rest.is_empty() {
            Vec::new()
        } else {
            frame_line(&rest).into_iter().collect()
        };

        (self, events)
    }
}

/// Feed one chunk to `state`. See [`DecoderState::decode`].
pub fn decode(state: DecoderState, chunk: &[u8]) -> (DecoderState, Vec<ProtocolEvent>) {
    state.decode(chunk)
}

/// Signal end-of-stream to `state`. See [`DecoderState::finish`].
pub fn finish(state: DecoderState) -> (DecoderState, Vec<ProtocolEvent>) {
    state.finish()
}

/// Classify one complete line of text.
///
/// Returns `None` for lines without the `data: ` marker.
pub fn classify_line(line: &str) -> Option<ProtocolEvent> {
    let rest = line.strip_prefix(DATA_MARKER)?;
    Some(ProtocolEvent::log(rest).unwrap_or_else(|| ProtocolEvent::payload(rest)))
}

fn frame_line(raw: &[u8]) -> Option<ProtocolEvent> {
    let text = String::from_utf8_lossy(raw);
    let line: &str = text.strip_suffix('\r').unwrap_or(&text);
    let event = classify_line(line);
    if event.is_none() && !line.is_empty() {
        tracing::trace!(line = %line, "Dropping line without data marker");
    }
    event
}
