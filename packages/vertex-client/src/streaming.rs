//! SSE streaming parser for Gemini `streamGenerateContent?alt=sse`.
//!
//! Converts a raw `reqwest` byte stream into `GenerateContentChunk` values.
//! Lines are buffered as bytes so a multi-byte character split across network
//! reads decodes correctly. The stream ends when the connection closes; Gemini
//! sends no terminal sentinel.

use bytes::Bytes;
use futures::stream::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::error::VertexError;
use crate::types::GenerateContentResponse;

/// A single chunk from a streaming generation.
#[derive(Debug, Clone)]
pub struct GenerateContentChunk {
    /// The text delta for this chunk.
    pub text: String,
    /// Set on the final chunk of a candidate (e.g. "STOP", "MAX_TOKENS").
    pub finish_reason: Option<String>,
}

/// Stream adapter that converts raw SSE bytes into `GenerateContentChunk` values.
pub struct GenerateContentStream {
    inner: Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>,
    buffer: Vec<u8>,
    finished: bool,
}

impl GenerateContentStream {
    pub(crate) fn new(
        byte_stream: impl Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
    ) -> Self {
        Self {
            inner: Box::pin(byte_stream),
            buffer: Vec::new(),
            finished: false,
        }
    }
}

impl Stream for GenerateContentStream {
    type Item = Result<GenerateContentChunk, VertexError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(chunk) = try_parse_line(&mut this.buffer) {
                return Poll::Ready(Some(chunk));
            }

            if this.finished {
                // A final event may arrive without a trailing newline
                if this.buffer.iter().all(u8::is_ascii_whitespace) {
                    this.buffer.clear();
                    return Poll::Ready(None);
                }
                this.buffer.push(b'\n');
                continue;
            }

            match Pin::new(&mut this.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => this.buffer.extend_from_slice(&bytes),
                Poll::Ready(Some(Err(e))) => {
                    return Poll::Ready(Some(Err(VertexError::Network(e.to_string()))));
                }
                Poll::Ready(None) => this.finished = true,
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Try to extract and parse a complete SSE data line from the buffer.
/// Returns `None` if no complete data line is available yet.
fn try_parse_line(buffer: &mut Vec<u8>) -> Option<Result<GenerateContentChunk, VertexError>> {
    loop {
        let newline_pos = buffer.iter().position(|b| *b == b'\n')?;
        let raw: Vec<u8> = buffer.drain(..=newline_pos).collect();

        let line = match std::str::from_utf8(&raw) {
            Ok(line) => line.trim(),
            Err(e) => {
                return Some(Err(VertexError::Parse(format!(
                    "Invalid UTF-8 in stream: {}",
                    e
                ))));
            }
        };

        // Blank lines separate events; "event:", "id:" etc. carry nothing we use
        let Some(data) = line.strip_prefix("data:") else {
            continue;
        };
        let data = data.trim();
        if data.is_empty() {
            continue;
        }

        return Some(
            serde_json::from_str::<GenerateContentResponse>(data)
                .map(|raw| GenerateContentChunk {
                    text: raw.text(),
                    finish_reason: raw.finish_reason().map(str::to_string),
                })
                .map_err(|e| {
                    VertexError::Parse(format!(
                        "Failed to parse stream chunk: {} (data: {})",
                        e,
                        data.chars().take(200).collect::<String>()
                    ))
                }),
        );
    }
}
