/// Character budget for comment text inside the prompt.
pub const MAX_PROMPT_COMMENT_CHARS: usize = 8000;

/// Build the analysis prompt.
///
/// Comments are joined with blank lines and cut at [`MAX_PROMPT_COMMENT_CHARS`]
/// characters without regard to comment boundaries; a cut is marked with `...`.
pub fn build_prompt(comments: &[String]) -> String {
    let joined = comments.join("\n\n");
    let limited = match joined.char_indices().nth(MAX_PROMPT_COMMENT_CHARS) {
        Some((cut, _)) => format!("{}...", &joined[..cut]),
        None => joined,
    };

    format!(
        "Analyze these YouTube comments and return JSON:\n\n\
         Comments: {}\n\n\
         Return JSON like this: {{\"sentiment\": \"Positive\", \"topics\": [\"music\", \"nostalgia\"]}}",
        limited
    )
}
