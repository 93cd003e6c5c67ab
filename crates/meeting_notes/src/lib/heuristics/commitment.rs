//! Recognition of "I will ..." commitments and their "by <Month> <day>" deadlines.

use std::sync::LazyLock;

use regex::Regex;

const MONTHS: &str = "January|February|March|April|May|June|July|August|September|October|\
                      November|December|Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sept|Sep|Oct|Nov|Dec";

static AFFIRMED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:Yes,\s+)?I\s+will\s+([^.!?]+)").unwrap());

static WILL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:I\s+)?will\s+([^.!?]+)").unwrap());

static DEADLINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\s*\bby\s+((?:{MONTHS})\.?\s+\d{{1,2}}(?:st|nd|rd|th)?)\b"
    ))
    .unwrap()
});

/// A commitment phrase with its deadline separated out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commitment {
    pub description: String,
    pub deadline: Option<String>,
}

/// Finds the task a speaker commits to in `text`.
///
/// An affirmation ("Yes, I will ...") is matched case-sensitively, anything else as a
/// case-insensitive "(I) will ...". The phrase runs to the end of the sentence.
pub fn find_commitment(text: &str) -> Option<Commitment> {
    let captures = if text.contains("Yes,") && text.contains("will") {
        AFFIRMED_RE.captures(text)
    } else {
        WILL_RE.captures(text)
    }?;
    let phrase = captures.get(1)?.as_str().trim();

    let deadline = DEADLINE_RE
        .captures(phrase)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());
    let description = DEADLINE_RE.replace_all(phrase, "").trim().to_string();

    Some(Commitment {
        description,
        deadline,
    })
}
