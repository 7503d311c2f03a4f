//! Incremental decoder for `text/event-stream` bodies.
//!
//! The service terminates each frame with a blank line and writes
//! `event:` and `data:` fields, e.g.
//!
//! ```text
//! event: task_created
//! data: {"id": "t-1", ...}
//!
//! ```
//!
//! Bytes arrive in arbitrary chunk sizes, so the decoder buffers until a
//! complete line is available. Multiple `data:` lines within one frame
//! are joined with `\n`; comment lines (leading `:`) and fields this
//! client does not use (`id:`, `retry:`) are skipped.

use taskdeck_core::WireFrame;

/// Default event name for frames that never set an `event:` field.
const DEFAULT_EVENT: &str = "message";

/// Streaming SSE frame decoder.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
}

impl SseDecoder {
    /// Create an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of body bytes and drain any frames it completes.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<WireFrame> {
        self.buffer.extend_from_slice(chunk);
        let mut frames = Vec::new();

        while let Some(line_end) = self.buffer.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=line_end).collect();
            let line = String::from_utf8_lossy(&raw);
            let line = line.trim_end_matches(['\n', '\r']);

            if line.is_empty() {
                if let Some(frame) = self.dispatch() {
                    frames.push(frame);
                }
                continue;
            }
            self.field(line);
        }

        frames
    }

    fn field(&mut self, line: &str) {
        // Comment lines keep the connection warm and carry nothing.
        if line.starts_with(':') {
            return;
        }

        let (name, value) = match line.split_once(':') {
            Some((name, value)) => (name, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match name {
            "event" => self.event = Some(value.to_string()),
            "data" => self.data.push(value.to_string()),
            _ => {}
        }
    }

    fn dispatch(&mut self) -> Option<WireFrame> {
        if self.event.is_none() && self.data.is_empty() {
            return None;
        }
        let event = self.event.take().unwrap_or_else(|| DEFAULT_EVENT.to_string());
        let data = std::mem::take(&mut self.data).join("\n");
        Some(WireFrame { event, data })
    }
}
