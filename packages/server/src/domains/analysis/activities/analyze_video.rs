//! End-to-end analysis of one video.
//!
//! URL parse, metadata, comments, prompt, streamed model output, extraction.
//! Stages run strictly in order and the first failure aborts the request.

use tracing::{debug, info, warn};

use crate::domains::analysis::collector::collect_stream;
use crate::domains::analysis::comments::{fetch_comments, fetch_video_info};
use crate::domains::analysis::json_extract::{extract_analysis, ExtractionSource};
use crate::domains::analysis::models::{AnalysisData, AnalysisResult};
use crate::domains::analysis::prompt::build_prompt;
use crate::domains::analysis::video_url::VideoReference;
use crate::domains::analysis::AnalysisError;
use crate::kernel::ServerDeps;

/// Analyze the comments of the video at `raw_url`.
///
/// A video whose comments are all filtered out gets a canned result and no
/// model call.
pub async fn analyze_video(deps: &ServerDeps, raw_url: &str) -> Result<AnalysisData, AnalysisError> {
    let reference = VideoReference::parse(raw_url)?;
    let video_id = reference.video_id;
    info!(video_id = %video_id, "Starting comment analysis");

    let video = fetch_video_info(deps.video_platform.as_ref(), &video_id).await?;
    let comments = fetch_comments(deps.video_platform.as_ref(), &video_id).await?;

    if comments.is_empty() {
        info!(video_id = %video_id, "No usable comments, skipping AI analysis");
        return Ok(AnalysisData {
            video_id,
            video_title: video.title,
            comments_analyzed: 0,
            analysis: AnalysisResult::no_comments(),
        });
    }

    let prompt = build_prompt(&comments);
    debug!(video_id = %video_id, prompt_chars = prompt.len(), "Built analysis prompt");

    let stream = deps.text_generator.stream_text(&prompt).await?;
    let collected = collect_stream(stream, deps.ai_stream_budget).await?;

    let extraction = extract_analysis(&collected.text);
    if matches!(
        extraction.source,
        ExtractionSource::ParseFallback | ExtractionSource::TextFallback
    ) {
        warn!(
            video_id = %video_id,
            source = ?extraction.source,
            timed_out = collected.timed_out,
            "Model response had no usable JSON"
        );
    }

    info!(
        video_id = %video_id,
        comments_analyzed = comments.len(),
        sentiment = %extraction.analysis.sentiment,
        topics = extraction.analysis.topics.len(),
        source = ?extraction.source,
        "Comment analysis complete"
    );

    Ok(AnalysisData {
        video_id,
        video_title: video.title,
        comments_analyzed: comments.len(),
        analysis: extraction.analysis,
    })
}
