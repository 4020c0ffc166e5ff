//! Prompt text to tag tokens.
//!
//! Weighting syntax understood by the common generators is stripped in a
//! fixed order: angle-bracket directives (`<lora:x:0.8>`), parenthesised
//! weights (`(tag:1.2)`), emphasis braces and brackets, and finally any
//! loose `:1.2` markers. What is left is split on `,` `;` and newlines.

use regex::Regex;
use std::sync::LazyLock;

/// Pieces shorter than this (in characters) are dropped.
pub const MIN_TOKEN_CHARS: usize = 2;

static ANGLE_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("angle directive pattern"));
static WEIGHTED_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]*):[0-9.]+\)").expect("weighted group pattern"));
static EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[{}\[\]]").expect("emphasis pattern"));
static LOOSE_WEIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":[0-9.]+").expect("loose weight pattern"));
static DELIMITERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;\n]+").expect("delimiter pattern"));

/// Strips the weighting syntax without splitting.
pub fn strip_weights(text: &str) -> String {
    let text = ANGLE_DIRECTIVE.replace_all(text, "");
    let text = WEIGHTED_GROUP.replace_all(&text, "$1");
    let text = EMPHASIS.replace_all(&text, "");
    LOOSE_WEIGHT.replace_all(&text, "").into_owned()
}

pub fn tokenize(text: &str) -> Vec<String> {
    let stripped = strip_weights(text);
    let tokens: Vec<String> = DELIMITERS
        .split(&stripped)
        .map(str::trim)
        .filter(|piece| piece.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect();
    log::debug!("tokenized {} chars into {} tokens", text.len(), tokens.len());
    tokens
}
