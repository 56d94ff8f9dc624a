// Cleans model output for display: internal reasoning blocks out first,
// then markdown decoration. Total and pure; an empty result is the
// caller's problem, never an error here.

use once_cell::sync::Lazy;
use regex::Regex;

static THINK_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<think>.*?</think>\n?").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static BOLD_UNDERSCORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"__(.*?)__").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*#{1,6}\s+").unwrap());
static HORIZONTAL_RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*[-_]{3,}\s*$").unwrap());
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[\t ]*[-–—•]\s+").unwrap());
static ORDERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*\d+[).:]\s+").unwrap());
static EXTRA_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Removes every `<think>...</think>` block (plus one trailing newline each)
/// and trims the remainder.
pub fn strip_reasoning(raw: &str) -> String {
    THINK_BLOCK.replace_all(raw, "").trim().to_string()
}

/// Full display cleanup: reasoning blocks, then bold/italic markers, heading
/// markers, horizontal rules, bullet and ordered-list markers, and runs of
/// blank lines collapsed to one.
pub fn sanitize(raw: &str) -> String {
    let text = strip_reasoning(raw);
    let text = BOLD.replace_all(&text, "${1}");
    let text = BOLD_UNDERSCORE.replace_all(&text, "${1}");
    let text = ITALIC.replace_all(&text, "${1}");
    let text = HEADING.replace_all(&text, "");
    let text = HORIZONTAL_RULE.replace_all(&text, "");
    let text = BULLET.replace_all(&text, "");
    let text = ORDERED.replace_all(&text, "");
    let text = EXTRA_NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}
