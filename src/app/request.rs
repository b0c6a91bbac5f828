//! Request execution.

use futures_util::StreamExt;
use serde::Serialize;

use crate::app::Session;
use crate::client::{ClientError, ScoutClient};
use crate::reducer::Endpoint;
use crate::stream::ProtocolEvent;
use crate::traits::HttpClient;

/// Largest number of already-delivered events folded in one step
const MAX_BATCH: usize = 64;

/// Run one request to completion, folding its events into `session`.
pub async fn run_request<C, B>(
    session: &mut Session,
    client: &ScoutClient<C>,
    endpoint: Endpoint,
    body: &B,
) -> Result<(), ClientError>
where
    C: HttpClient + 'static,
    B: Serialize,
{
    run_request_with(session, client, endpoint, body, |_| {}).await
}

/// Like [`run_request`], calling `observer` after every folded batch.
///
/// A failure is recorded in the transcript as an `Error: ...` line before it
/// is returned. Events that arrived before a mid-stream failure stay applied.
pub async fn run_request_with<C, B, F>(
    session: &mut Session,
    client: &ScoutClient<C>,
    endpoint: Endpoint,
    body: &B,
    mut observer: F,
) -> Result<(), ClientError>
where
    C: HttpClient + 'static,
    B: Serialize,
    F: FnMut(&Session),
{
    session.begin(endpoint);
    observer(session);

    let stream = match client.events(endpoint, body).await {
        Ok(stream) => stream,
        Err(e) => {
            session.record_failure(&e);
            observer(session);
            return Err(e);
        }
    };

    let mut batches = stream.ready_chunks(MAX_BATCH);
    while let Some(batch) = batches.next().await {
        let mut events: Vec<ProtocolEvent> = Vec::with_capacity(batch.len());
        let mut failure = None;
        for item in batch {
            match item {
                Ok(event) => events.push(event),
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }

        if !events.is_empty() {
            session.apply_events(&events);
            observer(session);
        }

        if let Some(e) = failure {
            session.record_failure(&e);
            observer(session);
            return Err(e);
        }
    }

    Ok(())
}
