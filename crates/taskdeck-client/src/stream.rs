//! Reconnecting client for the board's server-push event stream.
//!
//! One subscription owns one driver task. The task holds the only
//! transport connection and the only pending retry timer, so the
//! single-connection invariant is structural rather than checked. All
//! sink callbacks run on the driver task, one at a time, in the order
//! frames arrive from the transport.
//!
//! Failure handling follows the backoff-and-retry path: a transport
//! error or server close discards the connection, reports
//! `Disconnected`, sleeps the current backoff delay, then retries with
//! a fresh `Connecting`. Retries are unbounded; a persistent outage is
//! an observable state, not an error. Malformed frames are reported and
//! skipped without touching the connection.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use taskdeck_core::{parse_frame, ConnectionState, ParseError, TaskEvent};

use crate::backoff::BackoffPolicy;
use crate::config::{ClientConfig, RetryConfig};
use crate::transport::{EventTransport, FrameSource, SseTransport};

/// Callback invoked once per parsed domain event.
pub type EventSink = Box<dyn FnMut(TaskEvent) + Send>;

/// Callback invoked on every connection-state transition.
pub type StateSink = Box<dyn FnMut(ConnectionState) + Send>;

/// Callback invoked for each non-fatal frame parse failure.
pub type ParseErrorSink = Box<dyn FnMut(ParseError) + Send>;

/// Sinks attached to one subscription.
///
/// Only `on_event` is required; the optional observers change nothing
/// about client behavior when absent.
pub struct SubscribeOptions {
    /// Receives every successfully parsed event, in frame order
    pub on_event: EventSink,
    /// Observes connection-state transitions, including the initial
    /// `Connecting`
    pub on_state_change: Option<StateSink>,
    /// Observes malformed-frame reports; failures are also logged
    pub on_parse_error: Option<ParseErrorSink>,
}

impl SubscribeOptions {
    /// Options with just an event sink.
    pub fn events(on_event: EventSink) -> Self {
        Self {
            on_event,
            on_state_change: None,
            on_parse_error: None,
        }
    }
}

/// Factory for stream subscriptions against one transport.
pub struct EventStreamClient {
    transport: Arc<dyn EventTransport>,
    retry: RetryConfig,
}

impl EventStreamClient {
    /// Create a client over an explicit transport.
    pub fn new(transport: Arc<dyn EventTransport>, retry: RetryConfig) -> Self {
        Self { transport, retry }
    }

    /// Create a client over the SSE transport for the configured endpoint.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(Arc::new(SseTransport::new(config)), config.retry.clone())
    }

    /// Open a subscription and start delivering events.
    ///
    /// The first connection attempt begins immediately; the returned
    /// [`Subscription`] is the sole handle to the stream's resources.
    pub fn subscribe(&self, options: SubscribeOptions) -> Subscription {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let driver = Driver {
            transport: Arc::clone(&self.transport),
            options,
            backoff: BackoffPolicy::new(self.retry.clone()),
            cancel: cancel_rx,
        };
        let task = tokio::spawn(driver.run());
        Subscription {
            canceller: Unsubscriber { cancel: cancel_tx },
            driver: Some(task),
        }
    }
}

/// Cloneable teardown handle, safe to call from inside a handler.
#[derive(Clone)]
pub struct Unsubscriber {
    cancel: watch::Sender<bool>,
}

impl Unsubscriber {
    /// Cancel the subscription. Repeated calls are no-ops.
    pub fn unsubscribe(&self) {
        let was_cancelled = self.cancel.send_replace(true);
        if !was_cancelled {
            debug!("event stream subscription cancelled");
        }
    }
}

/// Owning handle for one active (or retrying) stream subscription.
///
/// Tearing down closes the active transport connection if any, cancels
/// any pending retry, and emits one final `Disconnected` transition.
/// Dropping the handle tears down as well, so a subscription never
/// outlives its owner holding an open connection or a live timer.
pub struct Subscription {
    canceller: Unsubscriber,
    driver: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Tear the subscription down. Idempotent.
    pub fn unsubscribe(&self) {
        self.canceller.unsubscribe();
    }

    /// A cloneable handle for tearing down from inside a handler.
    pub fn unsubscriber(&self) -> Unsubscriber {
        self.canceller.clone()
    }

    /// Tear down and wait for the driver task to finish.
    pub async fn shutdown(mut self) {
        self.canceller.unsubscribe();
        if let Some(task) = self.driver.take() {
            let _ = task.await;
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.canceller.unsubscribe();
    }
}

/// Resolves once the subscription is cancelled.
async fn cancelled(mut cancel: watch::Receiver<bool>) {
    // A closed channel means every handle is gone; treat it as cancelled.
    let _ = cancel.wait_for(|flag| *flag).await;
}

enum PumpEnd {
    Cancelled,
    TransportLost,
}

struct Driver {
    transport: Arc<dyn EventTransport>,
    options: SubscribeOptions,
    backoff: BackoffPolicy,
    cancel: watch::Receiver<bool>,
}

impl Driver {
    fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    /// Emit a state transition unless the subscription is torn down.
    fn emit_state(&mut self, state: ConnectionState) {
        if self.is_cancelled() {
            return;
        }
        if let Some(sink) = self.options.on_state_change.as_mut() {
            sink(state);
        }
    }

    async fn run(mut self) {
        loop {
            if self.is_cancelled() {
                break;
            }
            self.emit_state(ConnectionState::Connecting);

            let connected = tokio::select! {
                _ = cancelled(self.cancel.clone()) => break,
                result = self.transport.connect() => result,
            };

            match connected {
                Ok(source) => {
                    self.emit_state(ConnectionState::Connected);
                    self.backoff.reset();
                    if let PumpEnd::Cancelled = self.pump(source).await {
                        break;
                    }
                    self.emit_state(ConnectionState::Disconnected);
                }
                Err(error) => {
                    warn!(error = %error, "event stream connection failed");
                    self.emit_state(ConnectionState::Disconnected);
                }
            }

            let delay = self.backoff.current_delay();
            warn!(
                delay_ms = delay.as_millis() as u64,
                "event stream disconnected, retrying"
            );
            tokio::select! {
                _ = cancelled(self.cancel.clone()) => break,
                () = tokio::time::sleep(delay) => {}
            }
            self.backoff.advance();
        }

        // Final transition, exactly once, regardless of where the loop
        // was interrupted.
        if let Some(sink) = self.options.on_state_change.as_mut() {
            sink(ConnectionState::Disconnected);
        }
    }

    /// Deliver frames from one live connection until it ends.
    ///
    /// The source is dropped on return, so the transport is closed
    /// before any retry is scheduled.
    async fn pump(&mut self, mut source: Box<dyn FrameSource>) -> PumpEnd {
        loop {
            let frame = tokio::select! {
                _ = cancelled(self.cancel.clone()) => return PumpEnd::Cancelled,
                frame = source.next_frame() => frame,
            };

            match frame {
                Some(Ok(frame)) => match parse_frame(&frame) {
                    Ok(event) => {
                        // A handler may have torn us down on the
                        // previous callback.
                        if self.is_cancelled() {
                            return PumpEnd::Cancelled;
                        }
                        (self.options.on_event)(event);
                    }
                    Err(error) => {
                        warn!(tag = %frame.event, error = %error, "dropping malformed stream frame");
                        if self.is_cancelled() {
                            return PumpEnd::Cancelled;
                        }
                        if let Some(sink) = self.options.on_parse_error.as_mut() {
                            sink(error);
                        }
                    }
                },
                Some(Err(error)) => {
                    warn!(error = %error, "event stream transport error");
                    return PumpEnd::TransportLost;
                }
                None => {
                    debug!("event stream closed by server");
                    return PumpEnd::TransportLost;
                }
            }
        }
    }
}
