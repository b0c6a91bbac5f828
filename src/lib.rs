//! orgscout - organization and people search client
//!
//! Streams organization, people and summary results from the search backend,
//! folds them into a transcript, and renders the result for the terminal.
//!
//! The core is two pure steps: [`stream`] turns response chunks into protocol
//! events, and [`reducer`] folds events into a transcript and display value.
//! Everything else is plumbing around them.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod markdown;
pub mod models;
pub mod reducer;
pub mod stream;
pub mod traits;
