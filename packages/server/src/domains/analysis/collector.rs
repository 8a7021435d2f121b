//! Deadline-bounded consumption of a model's text stream.

use futures::StreamExt;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, warn};

use super::errors::AnalysisError;
use crate::kernel::TextStream;

/// Default wall-clock budget for reading a model response.
pub const STREAM_BUDGET: Duration = Duration::from_secs(30);

/// Text accumulated from a stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedText {
    pub text: String,
    pub fragments: usize,
    /// The budget ran out before the stream ended; `text` is partial.
    pub timed_out: bool,
}

/// Append fragments until the stream ends or `budget` elapses.
///
/// The budget starts when consumption starts. On timeout the partial text is
/// returned as a success so the extractor can salvage it. A stream error is
/// an `AiService` failure.
pub async fn collect_stream(
    mut stream: TextStream,
    budget: Duration,
) -> Result<CollectedText, AnalysisError> {
    let deadline = Instant::now() + budget;
    let mut collected = CollectedText::default();

    loop {
        match timeout_at(deadline, stream.next()).await {
            Ok(Some(Ok(fragment))) => {
                collected.text.push_str(&fragment);
                collected.fragments += 1;
            }
            Ok(Some(Err(e))) => {
                warn!(
                    error = %e,
                    received_chars = collected.text.len(),
                    "Model stream failed"
                );
                return Err(e.into());
            }
            Ok(None) => break,
            Err(_) => {
                warn!(
                    budget_secs = budget.as_secs(),
                    received_chars = collected.text.len(),
                    "Streaming timeout reached, processing partial response"
                );
                collected.timed_out = true;
                break;
            }
        }
    }

    debug!(
        fragments = collected.fragments,
        chars = collected.text.len(),
        timed_out = collected.timed_out,
        "Collected model response"
    );
    Ok(collected)
}
