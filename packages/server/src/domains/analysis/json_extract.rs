//! Recovery of a `{sentiment, topics}` object from raw model output.
//!
//! Model output arrives as free text that may wrap the JSON in prose or a
//! fenced code block, or stop mid-structure when the stream budget runs out.
//! Extraction is total: every input yields an [`AnalysisResult`] with a
//! non-empty sentiment and at least one topic.
//!
//! Candidates are tried in a fixed order and the first match wins, even when
//! it later fails to parse:
//!
//! 1. first `{` through last `}`
//! 2. a ```` ```json ```` fenced block
//! 3. any ```` ``` ```` fenced block starting with `{`
//! 4. first `{` through end of text, passed through a [`JsonRepair`]
//!
//! Text with no `{` at all goes to a keyword/word-frequency fallback.
//!
//! The default [`BalanceRepair`] assumes the cut happened inside a string in
//! the `topics` array or just after one of its elements. A cut inside a key
//! fails to parse after repair and lands on the fixed parse fallback.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use super::models::AnalysisResult;

lazy_static! {
    static ref JSON_FENCE: Regex = Regex::new(r"(?s)```json\s*(\{.*?)\s*```").unwrap();

    static ref GENERIC_FENCE: Regex = Regex::new(r"(?s)```\s*(\{.*?)\s*```").unwrap();

    // Comma left dangling before a closer
    static ref TRAILING_COMMA: Regex = Regex::new(r",\s*([\]}])").unwrap();

    static ref WORD: Regex = Regex::new(r"\b\w+\b").unwrap();
}

const FALLBACK_SENTIMENT: &str = "Mixed";
const PARSE_FAILURE_TOPIC: &str = "Unable to parse AI response";
const NO_STRUCTURE_TOPIC: &str = "Unable to analyze - no structured response from AI";
const NO_TOPICS_TOPIC: &str = "No topics identified";
const MAX_FALLBACK_TOPICS: usize = 5;

const STOP_WORDS: &[&str] = &[
    "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is", "are",
    "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will", "would",
    "could", "should", "may", "might", "can", "this", "that", "these", "those", "i", "you", "he",
    "she", "it", "we", "they", "me", "him", "her", "us", "them", "my", "your", "his", "its",
    "our", "their", "mine", "yours", "hers", "ours", "theirs",
];

/// Which attempt produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionSource {
    DirectObject,
    JsonFence,
    GenericFence,
    Repaired,
    /// A candidate was found but did not parse into the expected shape.
    ParseFallback,
    /// No `{` in the text.
    TextFallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub analysis: AnalysisResult,
    pub source: ExtractionSource,
}

/// Structural repair of a JSON object cut off before its end.
pub trait JsonRepair: Send + Sync {
    /// `fragment` starts at the first `{` and runs to the end of the text.
    fn repair(&self, fragment: &str) -> String;
}

/// Close a dangling string, then close brackets and braces by count.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalanceRepair;

impl JsonRepair for BalanceRepair {
    fn repair(&self, fragment: &str) -> String {
        let missing_braces = count(fragment, '{').saturating_sub(count(fragment, '}'));

        let mut lines: Vec<String> = fragment.split('\n').map(str::to_string).collect();
        if let Some(last) = lines.last_mut() {
            if count(last, '"') % 2 == 1 {
                last.push('"');
            }
            // Assume the cut was inside an array of strings
            let trimmed = last.trim();
            if !trimmed.is_empty()
                && !trimmed.ends_with(']')
                && !trimmed.ends_with('}')
                && !trimmed.ends_with(',')
            {
                last.push(',');
            }
        }
        let mut repaired = lines.join("\n");

        let missing_brackets = count(&repaired, '[').saturating_sub(count(&repaired, ']'));
        repaired.extend(std::iter::repeat(']').take(missing_brackets));
        repaired.extend(std::iter::repeat('}').take(missing_braces));

        TRAILING_COMMA.replace_all(&repaired, "$1").into_owned()
    }
}

fn count(text: &str, needle: char) -> usize {
    text.chars().filter(|c| *c == needle).count()
}

/// Ordered-attempt extractor with a pluggable repair strategy.
#[derive(Debug, Clone, Default)]
pub struct JsonExtractor<R = BalanceRepair> {
    repair: R,
}

impl<R: JsonRepair> JsonExtractor<R> {
    pub fn new(repair: R) -> Self {
        Self { repair }
    }

    pub fn extract(&self, raw: &str) -> Extraction {
        let Some((candidate, source)) = self.candidate(raw) else {
            debug!(chars = raw.len(), "No JSON object in model output, using text fallback");
            return Extraction {
                analysis: text_fallback(raw),
                source: ExtractionSource::TextFallback,
            };
        };

        match parse_analysis(&candidate) {
            Some(analysis) => Extraction { analysis, source },
            None => {
                warn!(
                    ?source,
                    candidate = %candidate.chars().take(200).collect::<String>(),
                    "Model output did not parse as an analysis object"
                );
                Extraction {
                    analysis: AnalysisResult::new(
                        FALLBACK_SENTIMENT,
                        vec![PARSE_FAILURE_TOPIC.to_string()],
                    ),
                    source: ExtractionSource::ParseFallback,
                }
            }
        }
    }

    fn candidate(&self, raw: &str) -> Option<(String, ExtractionSource)> {
        let open = raw.find('{')?;

        if let Some(close) = raw.rfind('}') {
            if close > open {
                return Some((raw[open..=close].to_string(), ExtractionSource::DirectObject));
            }
        }

        if let Some(captures) = JSON_FENCE.captures(raw) {
            return Some((captures[1].to_string(), ExtractionSource::JsonFence));
        }

        if let Some(captures) = GENERIC_FENCE.captures(raw) {
            return Some((captures[1].to_string(), ExtractionSource::GenericFence));
        }

        let repaired = self.repair.repair(&raw[open..]);
        debug!(repaired = %repaired, "Repaired truncated JSON");
        Some((repaired, ExtractionSource::Repaired))
    }
}

/// Extract with the default [`BalanceRepair`] strategy.
pub fn extract_analysis(raw: &str) -> Extraction {
    JsonExtractor::new(BalanceRepair).extract(raw)
}

/// Strict parse plus shape check: non-empty string `sentiment`, array `topics`.
fn parse_analysis(candidate: &str) -> Option<AnalysisResult> {
    let value: Value = serde_json::from_str(candidate).ok()?;

    let sentiment = value.get("sentiment")?.as_str()?;
    if sentiment.trim().is_empty() {
        return None;
    }

    let mut topics: Vec<String> = value
        .get("topics")?
        .as_array()?
        .iter()
        .filter_map(|topic| topic.as_str())
        .map(str::to_string)
        .collect();
    if topics.is_empty() {
        topics.push(NO_TOPICS_TOPIC.to_string());
    }

    Some(AnalysisResult::new(sentiment, topics))
}

/// Keyword sentiment and word-based topics for output with no JSON at all.
fn text_fallback(raw: &str) -> AnalysisResult {
    let lower = raw.to_lowercase();
    let sentiment = if lower.contains("positive") {
        "Positive"
    } else if lower.contains("negative") {
        "Negative"
    } else {
        FALLBACK_SENTIMENT
    };

    let mut topics: Vec<String> = Vec::new();
    for word in WORD.find_iter(raw).map(|m| m.as_str()) {
        if topics.len() == MAX_FALLBACK_TOPICS {
            break;
        }
        if word.chars().count() <= 3 || STOP_WORDS.contains(&word.to_lowercase().as_str()) {
            continue;
        }
        if !topics.iter().any(|t| t == word) {
            topics.push(word.to_string());
        }
    }
    if topics.is_empty() {
        topics.push(NO_STRUCTURE_TOPIC.to_string());
    }

    AnalysisResult::new(sentiment, topics)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn assert_total(extraction: &Extraction) {
        assert!(!extraction.analysis.sentiment.is_empty());
        assert!(!extraction.analysis.topics.is_empty());
    }

    #[test]
    fn test_well_formed_object_round_trips() {
        let raw = r#"{"sentiment":"Positive","topics":["a","b c","nostalgia"]}"#;

        let extraction = extract_analysis(raw);

        assert_eq!(extraction.source, ExtractionSource::DirectObject);
        assert_eq!(
            extraction.analysis,
            AnalysisResult::new("Positive", topics(&["a", "b c", "nostalgia"]))
        );
    }

    #[test]
    fn test_object_wrapped_in_prose() {
        let raw = "Sure! Here is the analysis:\n{\"sentiment\": \"Negative\", \"topics\": [\"audio\"]}\nLet me know.";

        let extraction = extract_analysis(raw);

        assert_eq!(extraction.source, ExtractionSource::DirectObject);
        assert_eq!(extraction.analysis, AnalysisResult::new("Negative", topics(&["audio"])));
    }

    #[test]
    fn test_complete_json_fence() {
        let raw = "```json\n{\n  \"sentiment\": \"Mixed\",\n  \"topics\": [\"pricing\", \"support\"]\n}\n```";

        let extraction = extract_analysis(raw);

        assert_eq!(extraction.analysis, AnalysisResult::new("Mixed", topics(&["pricing", "support"])));
    }

    #[test]
    fn test_closed_fence_with_unclosed_object_uses_fence_candidate() {
        let raw = "```json\n{\"sentiment\": \"Positive\", \"topics\": [\"x\"\n```";

        let extraction = extract_analysis(raw);

        // Fenced interior is chosen as-is and does not parse
        assert_eq!(extraction.source, ExtractionSource::ParseFallback);
        assert_eq!(
            extraction.analysis,
            AnalysisResult::new("Mixed", topics(&["Unable to parse AI response"]))
        );
    }

    #[test]
    fn test_generic_fence_candidate() {
        let repair = BalanceRepair;
        let extractor = JsonExtractor::new(repair);
        let raw = "```\n{\"sentiment\": \"Positive\"\n```";

        let extraction = extractor.extract(raw);

        assert_eq!(extraction.source, ExtractionSource::ParseFallback);
        assert_total(&extraction);
    }

    #[test]
    fn test_truncated_inside_array_string_is_repaired() {
        let raw = "```json\n{\n  \"sentiment\": \"Positive\",\n  \"topics\": [\n    \"a\",\n    \"b";

        let extraction = extract_analysis(raw);

        assert_eq!(extraction.source, ExtractionSource::Repaired);
        assert_eq!(extraction.analysis, AnalysisResult::new("Positive", topics(&["a", "b"])));
    }

    #[test]
    fn test_repair_output_shape() {
        let repaired = BalanceRepair.repair("{\n  \"sentiment\": \"Positive\",\n  \"topics\": [\n    \"a\",\n    \"b");

        let value: Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value, serde_json::json!({"sentiment": "Positive", "topics": ["a", "b"]}));
        assert!(!repaired.contains(",]"));
    }

    #[test]
    fn test_truncated_after_complete_element() {
        let raw = "{\"sentiment\": \"Negative\", \"topics\": [\"lag\", \"crashes\",";

        let extraction = extract_analysis(raw);

        assert_eq!(extraction.source, ExtractionSource::Repaired);
        assert_eq!(extraction.analysis, AnalysisResult::new("Negative", topics(&["lag", "crashes"])));
    }

    #[test]
    fn test_truncated_real_world_response() {
        let raw = "```json\n{\n  \"sentiment\": \"Positive\",\n  \"topics\": [\n    \"Rickrolling (the meme/prank)\",\n    \"Genuine appreciation for the song";

        let extraction = extract_analysis(raw);

        assert_eq!(
            extraction.analysis.topics,
            topics(&["Rickrolling (the meme/prank)", "Genuine appreciation for the song"])
        );
    }

    #[test]
    fn test_truncated_mid_key_still_total() {
        let raw = "{\"sentiment\": \"Positive\", \"top";

        let extraction = extract_analysis(raw);

        assert_eq!(extraction.source, ExtractionSource::ParseFallback);
        assert_total(&extraction);
    }

    #[test]
    fn test_plain_prose_uses_text_fallback() {
        let raw = "Overall the viewers are very positive about the soundtrack and the soundtrack remix.";

        let extraction = extract_analysis(raw);

        assert_eq!(extraction.source, ExtractionSource::TextFallback);
        assert_eq!(extraction.analysis.sentiment, "Positive");
        assert_eq!(
            extraction.analysis.topics,
            topics(&["Overall", "viewers", "very", "positive", "about"])
        );
    }

    #[test]
    fn test_text_fallback_deduplicates_before_capping() {
        let raw = "music music music great vocals vocals and lyrics, also drums plus guitar";

        let analysis = extract_analysis(raw).analysis;

        assert_eq!(analysis.sentiment, "Mixed");
        assert_eq!(analysis.topics, topics(&["music", "great", "vocals", "lyrics", "also"]));
    }

    #[test]
    fn test_text_fallback_negative_and_stop_words() {
        let analysis = extract_analysis("They were NEGATIVE").analysis;

        assert_eq!(analysis.sentiment, "Negative");
        assert_eq!(analysis.topics, topics(&["NEGATIVE"]));
    }

    #[test]
    fn test_empty_input() {
        let extraction = extract_analysis("");

        assert_eq!(extraction.source, ExtractionSource::TextFallback);
        assert_eq!(
            extraction.analysis,
            AnalysisResult::new("Mixed", topics(&["Unable to analyze - no structured response from AI"]))
        );
    }

    #[test]
    fn test_wrong_shape_falls_back() {
        for raw in [
            r#"{"sentiment": "", "topics": ["a"]}"#,
            r#"{"sentiment": "Positive", "topics": "a"}"#,
            r#"{"sentiment": 3, "topics": ["a"]}"#,
            r#"{"topics": ["a"]}"#,
            r#"{"sentiment": "Positive"}"#,
        ] {
            let extraction = extract_analysis(raw);
            assert_eq!(extraction.source, ExtractionSource::ParseFallback, "{}", raw);
            assert_total(&extraction);
        }
    }

    #[test]
    fn test_empty_topics_get_placeholder() {
        let analysis = extract_analysis(r#"{"sentiment": "Positive", "topics": []}"#).analysis;

        assert_eq!(analysis.topics, topics(&["No topics identified"]));
    }

    #[test]
    fn test_non_string_topics_are_dropped() {
        let analysis = extract_analysis(r#"{"sentiment": "Positive", "topics": ["a", 2, null, "b"]}"#).analysis;

        assert_eq!(analysis.topics, topics(&["a", "b"]));
    }

    #[test]
    fn test_totality_over_assorted_inputs() {
        for raw in [
            "",
            "   ",
            "lol",
            "{",
            "}{",
            "[[[",
            "{\"sentiment\": \"Pos",
            "```json\n",
            "```json\n{\"sentiment\": \"Positive\", \"topics\": [\"a\", \"b",
            "{\"a\": {\"b\": [1, 2, {\"c\": \"d",
            "\"\"\"\"\"{",
        ] {
            assert_total(&extract_analysis(raw));
        }
    }

    struct NoRepair;

    impl JsonRepair for NoRepair {
        fn repair(&self, fragment: &str) -> String {
            fragment.to_string()
        }
    }

    #[test]
    fn test_repair_strategy_is_swappable() {
        let raw = "{\"sentiment\": \"Positive\", \"topics\": [\"a\", \"b";

        let extraction = JsonExtractor::new(NoRepair).extract(raw);

        assert_eq!(extraction.source, ExtractionSource::ParseFallback);
    }
}
