use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Extension},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{error, warn};

use crate::domains::analysis::{analyze_video, AnalysisError, ResponseEnvelope};
use crate::server::app::AppState;

/// Comment analysis endpoint
///
/// Served on every path. Only `POST` with a JSON object carrying a non-empty
/// string `videoUrl` is analyzed. Body rejections (over the size limit, broken
/// stream) and malformed JSON get the standard failure envelope, and the method
/// is checked before the body is looked at.
pub async fn analyze_handler(
    Extension(state): Extension<AppState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let result = if method != Method::POST {
        Err(AnalysisError::MethodNotAllowed)
    } else {
        match body {
            Ok(body) => match video_url(&body) {
                Some(url) => analyze_video(&state.deps, &url).await,
                None => Err(AnalysisError::InvalidRequest),
            },
            Err(rejection) => {
                warn!(
                    status = %rejection.status(),
                    error = %rejection.body_text(),
                    "Request body rejected"
                );
                Err(AnalysisError::InvalidRequest)
            }
        }
    };

    match result {
        Ok(data) => (StatusCode::OK, Json(ResponseEnvelope::success(data))).into_response(),
        Err(err) => {
            if err.status().is_server_error() {
                error!(error = %err, code = err.code(), "Analysis request failed");
            } else {
                warn!(error = %err, code = err.code(), %method, "Analysis request rejected");
            }
            err.into_response()
        }
    }
}

fn video_url(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("videoUrl")?
        .as_str()
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}
