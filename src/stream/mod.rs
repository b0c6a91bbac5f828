//! Streamed response decoder
//!
//! Turns the chunked body of a backend response into discrete protocol events.
//! The backend writes one logical line per event:
//! - `data: <text>` - protocol line, everything else is ignored
//! - `<text>` starting with `Found`, `Searching`, `Sending` or `Received` - progress log
//! - any other `<text>` - raw JSON payload
//!
//! # Module structure
//! - `events` - Event type definitions (ProtocolEvent, LogKind)
//! - `decoder` - Line framing state machine (DecoderState, decode, finish)

mod decoder;
mod events;

pub use decoder::{classify_line, decode, finish, DecoderState, DATA_MARKER};
pub use events::{LogKind, ProtocolEvent};
