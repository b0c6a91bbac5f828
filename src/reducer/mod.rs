//! Output reducer
//!
//! Folds decoded protocol events into a per-request [`Transcript`] and derives
//! the value the shell displays from it.
//!
//! # Module structure
//! - `transcript` - Append-only transcript of one request
//! - `endpoint` - Endpoint tag deciding how payloads are interpreted
//! - `display` - Display derivation and citation link resolution
//! - `reduce` - The fold itself

mod display;
mod endpoint;
mod reduce;
mod transcript;

pub use display::{
    candidate_first_name, derive_display, resolve_citations, DisplayValue, ResolvedCitation,
    PLACEHOLDER_TARGET,
};
pub use endpoint::{Endpoint, Framing, PayloadUpdate};
pub use reduce::{reduce, Reduction};
pub use transcript::Transcript;
