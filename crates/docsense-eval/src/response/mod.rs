//! Parsing of raw model responses
//!
//! Classifier output is nominally JSON but often arrives wrapped in
//! Markdown fences, with comments, trailing commas, Python literals or
//! unescaped quotes. [`ResponseParser`] tries progressively more
//! aggressive clean-ups and stops at the first one that yields JSON.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Value, json};

use crate::error::{EvalError, EvalResult};

static FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```(?:json)?\s*").expect("valid regex"));
static FENCE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*```$").expect("valid regex"));
static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//[^\n]*").expect("valid regex"));
static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid regex"));
static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("valid regex"));
static PY_TRUE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bTrue\b").expect("valid regex"));
static PY_FALSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bFalse\b").expect("valid regex"));
static PY_NONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bNone\b").expect("valid regex"));

/// Clean-up stage that produced the parsed value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// Input was already valid JSON
    Direct,
    /// Fences stripped and the JSON block extracted
    Extracted,
    /// Comments, trailing commas and Python literals fixed
    Cleaned,
    /// Inner quotes escaped
    QuotesFixed,
}

/// Parser for raw classifier / extractor output
#[derive(Debug, Clone, Copy)]
pub struct ResponseParser {
    strict: bool,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::strict()
    }
}

impl ResponseParser {
    /// Fail with [`EvalError::ResponseParse`] when nothing works
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Return a `{raw_text, error, clean_attempt}` object instead of failing
    pub fn lenient() -> Self {
        Self { strict: false }
    }

    /// Parse a response into JSON
    pub fn parse(&self, raw: &str) -> EvalResult<Value> {
        self.parse_with_strategy(raw).map(|(value, _)| value)
    }

    /// Parse a response and report which clean-up stage succeeded
    pub fn parse_with_strategy(&self, raw: &str) -> EvalResult<(Value, ParseStrategy)> {
        if let Ok(value) = serde_json::from_str(raw) {
            return Ok((value, ParseStrategy::Direct));
        }

        let mut last_error = String::new();
        let mut clean_attempt = raw.to_string();

        match extract_json_block(&remove_markdown_fences(raw)) {
            Ok(block) => {
                let stages: [(ParseStrategy, fn(&str) -> String); 3] = [
                    (ParseStrategy::Extracted, |s| s.to_string()),
                    (ParseStrategy::Cleaned, aggressive_clean),
                    (ParseStrategy::QuotesFixed, |s| {
                        fix_unescaped_quotes(&aggressive_clean(s))
                    }),
                ];

                for (strategy, stage) in stages {
                    clean_attempt = stage(block);
                    match serde_json::from_str(&clean_attempt) {
                        Ok(value) => {
                            tracing::debug!("Parsed model response using {:?}", strategy);
                            return Ok((value, strategy));
                        }
                        Err(e) => last_error = e.to_string(),
                    }
                }
            }
            Err(e) => last_error = e,
        }

        tracing::warn!(
            "Failed to parse model response as JSON after all strategies: {}",
            last_error
        );

        if self.strict {
            Err(EvalError::ResponseParse {
                message: last_error,
            })
        } else {
            Ok((
                json!({
                    "raw_text": raw,
                    "error": last_error,
                    "clean_attempt": clean_attempt,
                }),
                ParseStrategy::Direct,
            ))
        }
    }
}

/// Read the `document_type` of a parsed classification, falling back to `unknown_label`
pub fn predicted_label(value: &Value, unknown_label: &str) -> String {
    value
        .get("document_type")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .unwrap_or(unknown_label)
        .to_string()
}

fn remove_markdown_fences(text: &str) -> String {
    let text = FENCE_OPEN.replace(text.trim(), "");
    FENCE_CLOSE.replace(&text, "").trim().to_string()
}

/// Slice out the outermost object, or the outermost array if it starts first
fn extract_json_block(text: &str) -> Result<&str, String> {
    let obj = text.find('{').zip(text.rfind('}'));
    let arr = text.find('[').zip(text.rfind(']'));

    match (obj, arr) {
        (Some((start, end)), arr) if start < end && arr.is_none_or(|(a, _)| start < a) => {
            Ok(&text[start..=end])
        }
        (_, Some((start, end))) if start < end => Ok(&text[start..=end]),
        _ => Err("No JSON object or array found in response".to_string()),
    }
}

fn aggressive_clean(text: &str) -> String {
    let text = LINE_COMMENT.replace_all(text, "");
    let text = BLOCK_COMMENT.replace_all(&text, "");
    let text = TRAILING_COMMA.replace_all(&text, "$1");
    let text = PY_TRUE.replace_all(&text, "true");
    let text = PY_FALSE.replace_all(&text, "false");
    PY_NONE.replace_all(&text, "null").into_owned()
}

/// Escape quotes that appear inside string values
///
/// A quote closes a string only when the next non-blank character is one
/// of `, } ] :` or it is the last character of the input.
fn fix_unescaped_quotes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    let mut in_string = false;
    let mut escape_next = false;

    for (i, &ch) in chars.iter().enumerate() {
        if escape_next {
            out.push(ch);
            escape_next = false;
            continue;
        }
        match ch {
            '\\' => {
                out.push(ch);
                escape_next = true;
            }
            '"' if !in_string => {
                out.push(ch);
                in_string = true;
            }
            '"' => {
                let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
                match next {
                    None | Some(',') | Some('}') | Some(']') | Some(':') => {
                        out.push(ch);
                        in_string = false;
                    }
                    Some(_) => out.push_str("\\\""),
                }
            }
            _ => out.push(ch),
        }
    }

    out
}
