//! Transport seam for the event stream.
//!
//! [`EventTransport`] is the only thing the stream client knows about
//! the network: one call to open a connection, yielding a
//! [`FrameSource`] of raw frames. The production implementation is
//! [`SseTransport`] over a persistent HTTP response body; tests drive
//! the client with scripted transports.

use std::collections::VecDeque;

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;

use taskdeck_core::{TaskdeckError, TaskdeckResult, WireFrame};

use crate::config::ClientConfig;
use crate::sse::SseDecoder;

/// Opens transport connections for one logical subscription.
#[async_trait]
pub trait EventTransport: Send + Sync {
    /// Open a connection and return the stream of raw frames.
    async fn connect(&self) -> TaskdeckResult<Box<dyn FrameSource>>;
}

/// One live connection delivering raw frames in wire order.
#[async_trait]
pub trait FrameSource: Send {
    /// Next frame from the connection.
    ///
    /// `Some(Err(_))` is a transport-level failure; `None` is an orderly
    /// server-side close. Both end the connection.
    async fn next_frame(&mut self) -> Option<TaskdeckResult<WireFrame>>;
}

/// SSE transport over a persistent HTTP connection.
pub struct SseTransport {
    http: reqwest::Client,
    url: String,
}

impl SseTransport {
    /// Create a transport for the configured events endpoint.
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: config.events_url(),
        }
    }
}

#[async_trait]
impl EventTransport for SseTransport {
    async fn connect(&self) -> TaskdeckResult<Box<dyn FrameSource>> {
        let response = self
            .http
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await
            .map_err(|e| TaskdeckError::network(format!("event stream connect failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TaskdeckError::api(
                status.as_u16(),
                "event stream endpoint refused the connection",
            ));
        }

        tracing::debug!(url = %self.url, "event stream connected");

        Ok(Box::new(SseFrameSource {
            body: response.bytes_stream().boxed(),
            decoder: SseDecoder::new(),
            pending: VecDeque::new(),
        }))
    }
}

struct SseFrameSource {
    body: BoxStream<'static, reqwest::Result<bytes::Bytes>>,
    decoder: SseDecoder,
    pending: VecDeque<WireFrame>,
}

#[async_trait]
impl FrameSource for SseFrameSource {
    async fn next_frame(&mut self) -> Option<TaskdeckResult<WireFrame>> {
        loop {
            if let Some(frame) = self.pending.pop_front() {
                return Some(Ok(frame));
            }
            match self.body.next().await {
                Some(Ok(chunk)) => {
                    self.pending.extend(self.decoder.feed(&chunk));
                }
                Some(Err(e)) => {
                    return Some(Err(TaskdeckError::network(format!(
                        "event stream read failed: {e}"
                    ))));
                }
                None => return None,
            }
        }
    }
}
