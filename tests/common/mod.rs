//! Common test utilities for integration tests.
//!
//! Fixtures mirror what the search backend sends: `data: ` framed progress
//! lines and JSON payloads for the streamed endpoints, and a plain JSON body
//! for the summary endpoint.

pub mod mocks;

#[allow(unused_imports)]
pub use mocks::*;

use orgscout::models::Profile;

/// Org search stream: two progress lines and one payload.
#[allow(dead_code)]
pub const ORGS_STREAM: &str = "data: Searching for organizations named Acme\n\
data: Found 2 organizations\n\
data: [{\"id\":101,\"name\":\"Acme\",\"linkedin_url\":\"https://li/company/acme\"},{\"id\":\"102\",\"name\":\"Acme Labs\",\"linkedin_url\":null}]\n";

/// People search stream with a non-protocol line, a CRLF line and no
/// trailing newline on the last line.
#[allow(dead_code)]
pub const PEOPLE_STREAM: &str = "data: Searching people at Acme\r\n\
: keep-alive\n\
\n\
data: Received 2 results from search\n\
data: [{\"linkedin_url\":\"https://li/john\",\"first_name\":\"John\",\"last_name\":\"Smith\",\"title\":\"CEO\"},{\"linkedin_url\":\"https://li/zoë\",\"first_name\":\"Zoë\",\"last_name\":\"Müller\",\"title\":\"CTO\"}]";

/// Summary body citing both people and one unknown source.
#[allow(dead_code)]
pub fn summary_body() -> serde_json::Value {
    serde_json::json!({
        "summary": "Acme is led by John <1.1> with Zoë <2.1> on tech. Revenue grew <3.1>.",
        "citations": {
            "<1.1>": "Smith, John, CEO",
            "<2.1>": "Name: Zoë Müller, Current Title: CTO",
            "<3.1>": "Annual report 2023"
        }
    })
}

/// Profiles matching [`PEOPLE_STREAM`].
#[allow(dead_code)]
pub fn test_profiles() -> Vec<Profile> {
    vec![
        Profile::new("https://li/john", "John", "Smith", "CEO"),
        Profile::new("https://li/zoë", "Zoë", "Müller", "CTO"),
    ]
}

/// Split `input` into chunks at the given byte offsets.
#[allow(dead_code)]
pub fn split_at_offsets<'a>(input: &'a [u8], offsets: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::with_capacity(offsets.len() + 1);
    let mut start = 0;
    for &offset in offsets {
        chunks.push(&input[start..offset]);
        start = offset;
    }
    chunks.push(&input[start..]);
    chunks
}
