//! Backend API client.
//!
//! [`ScoutClient`] sends a request to one [`Endpoint`] and hands back the
//! response as a stream of [`ProtocolEvent`]s. Streamed endpoints are fed
//! through the line decoder chunk by chunk; the summary endpoint returns a
//! single JSON body which is yielded as one payload event.
//!
//! Dropping the returned stream abandons the request.

use futures_util::stream::{self, Stream};
use futures_util::StreamExt;
use serde::Serialize;
use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;
use uuid::Uuid;

use crate::adapters::ReqwestHttpClient;
use crate::config::ClientConfig;
use crate::models::{OrgSearchRequest, PeopleSearchRequest, SummarizeRequest};
use crate::reducer::{Endpoint, Framing};
use crate::stream::{DecoderState, ProtocolEvent};
use crate::traits::{ByteStream, Headers, HttpClient, HttpError};

/// Header carrying the per-request id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Events of one request, in arrival order.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<ProtocolEvent, ClientError>> + Send>>;

/// Error type for API client operations
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport failed
    #[error("{0}")]
    Http(HttpError),
    /// Backend answered with a non-2xx status
    #[error("HTTP error! status: {status}")]
    ServerError { status: u16, message: String },
    /// Request body could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A request needs a selection that has not been made
    #[error("No {0} selected")]
    MissingSelection(&'static str),
}

impl ClientError {
    /// HTTP status, if the backend answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<HttpError> for ClientError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::ServerError { status, message } => {
                ClientError::ServerError { status, message }
            }
            other => ClientError::Http(other),
        }
    }
}

/// Client for the organization search backend.
pub struct ScoutClient<C: HttpClient = ReqwestHttpClient> {
    http: Arc<C>,
    config: ClientConfig,
}

impl ScoutClient<ReqwestHttpClient> {
    /// Client using reqwest with the configured connect timeout.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = ReqwestHttpClient::with_connect_timeout(config.request_timeout)?;
        Ok(Self::with_http_client(http, config))
    }
}

impl<C: HttpClient + 'static> ScoutClient<C> {
    pub fn with_http_client(http: C, config: ClientConfig) -> Self {
        Self {
            http: Arc::new(http),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Stream organizations matching a name.
    pub async fn search_orgs(&self, request: &OrgSearchRequest) -> Result<EventStream, ClientError> {
        self.events(Endpoint::Organizations, request).await
    }

    /// Stream people of an organization matching a title.
    pub async fn search_people(
        &self,
        request: &PeopleSearchRequest,
    ) -> Result<EventStream, ClientError> {
        self.events(Endpoint::People, request).await
    }

    /// Request a summary of the given profiles.
    pub async fn summarize(&self, request: &SummarizeRequest) -> Result<EventStream, ClientError> {
        self.events(Endpoint::Summary, request).await
    }

    /// Send `body` to `endpoint` and return its events.
    ///
    /// Fails before yielding anything if the body cannot be serialized, the
    /// connection fails, or the status is not 2xx. A transport error after
    /// the response started is yielded as the last item of the stream.
    pub async fn events<B: Serialize>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<EventStream, ClientError> {
        let body = serde_json::to_string(body)?;
        let url = self.config.endpoint_url(endpoint.path());
        let request_id = Uuid::new_v4().to_string();

        let mut headers = Headers::new();
        headers.insert(REQUEST_ID_HEADER.to_string(), request_id.clone());

        tracing::info!(request_id = %request_id, endpoint = %endpoint, "Starting request");

        match endpoint.framing() {
            Framing::EventStream => {
                let bytes = self.http.post_stream(&url, &body, &headers).await?;
                Ok(decode_stream(bytes, endpoint, request_id))
            }
            Framing::JsonBody => {
                let response = self.http.post(&url, &body, &headers).await?;
                if !response.is_success() {
                    return Err(ClientError::ServerError {
                        status: response.status,
                        message: response.text_lossy(),
                    });
                }
                tracing::info!(request_id = %request_id, endpoint = %endpoint, "Request finished");
                let item: Result<ProtocolEvent, ClientError> =
                    Ok(ProtocolEvent::payload(response.text_lossy()));
                Ok(Box::pin(stream::iter(std::iter::once(item))))
            }
        }
    }
}

struct DecodeState {
    bytes: ByteStream,
    // None once the body ended or failed
    decoder: Option<DecoderState>,
    ready: VecDeque<ProtocolEvent>,
    endpoint: Endpoint,
    request_id: String,
    yielded: usize,
}

/// Run a byte stream through the line decoder.
fn decode_stream(bytes: ByteStream, endpoint: Endpoint, request_id: String) -> EventStream {
    let state = DecodeState {
        bytes,
        decoder: Some(DecoderState::new()),
        ready: VecDeque::new(),
        endpoint,
        request_id,
        yielded: 0,
    };

    let events = stream::unfold(state, |mut state| async move {
        loop {
            if let Some(event) = state.ready.pop_front() {
                state.yielded += 1;
                return Some((Ok(event), state));
            }

            let Some(decoder) = state.decoder.take() else {
                return None;
            };

            match state.bytes.next().await {
                Some(Ok(chunk)) => {
                    let (decoder, events) = decoder.decode(&chunk);
                    state.decoder = Some(decoder);
                    state.ready.extend(events);
                }
                Some(Err(e)) => {
                    tracing::warn!(
                        request_id = %state.request_id,
                        endpoint = %state.endpoint,
                        error = %e,
                        "Response stream failed"
                    );
                    return Some((Err(ClientError::from(e)), state));
                }
                None => {
                    let (_, events) = decoder.finish();
                    state.ready.extend(events);
                    tracing::info!(
                        request_id = %state.request_id,
                        endpoint = %state.endpoint,
                        events = state.yielded + state.ready.len(),
                        "Request finished"
                    );
                }
            }
        }
    });

    Box::pin(events)
}
