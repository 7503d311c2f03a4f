//! Networking layer for the Taskdeck board client.
//!
//! The centerpiece is [`EventStreamClient`]: a reconnecting client for
//! the board service's server-push event stream. It opens one transport
//! connection, normalizes raw frames into domain [`TaskEvent`]s, drives
//! capped exponential backoff on failure, and exposes connection-state
//! notifications through an optional observer. The stream is a
//! convenience channel: the board stays fully usable through the plain
//! request/response [`ApiClient`] while the stream is down, so retries
//! are unbounded and failures never surface as hard errors.
//!
//! ```no_run
//! use taskdeck_client::{ClientConfig, EventStreamClient, SubscribeOptions};
//!
//! # async fn run() {
//! let config = ClientConfig::default();
//! let client = EventStreamClient::from_config(&config);
//! let subscription = client.subscribe(SubscribeOptions {
//!     on_event: Box::new(|event| println!("{event:?}")),
//!     on_state_change: None,
//!     on_parse_error: None,
//! });
//! // ... later
//! subscription.shutdown().await;
//! # }
//! ```

pub mod api;
pub mod backoff;
pub mod config;
pub mod sse;
pub mod stream;
pub mod transport;

pub use api::ApiClient;
pub use backoff::BackoffPolicy;
pub use config::{ClientConfig, RetryConfig};
pub use sse::SseDecoder;
pub use stream::{
    EventStreamClient, SubscribeOptions, Subscription, Unsubscriber,
};
pub use transport::{EventTransport, FrameSource, SseTransport};

pub use taskdeck_core::{ConnectionState, ParseError, TaskEvent, TaskdeckError, WireFrame};
