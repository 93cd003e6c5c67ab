//! Transcript input and speaker-turn recognition.

use std::{ops::Deref, sync::LazyLock};

use regex::Regex;

use crate::error::Error;

static SPEAKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z\s()]+?):\s*(.*)$").unwrap());

static PARENTHETICAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)").unwrap());

/// A speaker turn written as `Name: utterance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerTurn<'a> {
    /// Display name with parenthetical annotations such as `(PM)` removed.
    pub speaker: String,
    pub utterance: &'a str,
}

impl<'a> SpeakerTurn<'a> {
    /// Splits a trimmed line into speaker and utterance.
    ///
    /// Returns `None` when the line has no `Name:` prefix, or when nothing is left of the name
    /// once annotations are removed.
    pub fn parse(line: &'a str) -> Option<Self> {
        let captures = SPEAKER_RE.captures(line)?;
        let speaker = clean_speaker_name(captures.get(1)?.as_str());
        if speaker.is_empty() {
            return None;
        }

        Some(SpeakerTurn {
            speaker,
            utterance: captures.get(2).map_or("", |m| m.as_str()),
        })
    }
}

fn clean_speaker_name(raw: &str) -> String {
    PARENTHETICAL_RE.replace_all(raw, "").trim().to_string()
}

/// Meeting transcript text that satisfies the minimum-content precondition of the API.
///
/// The analysis engine accepts any `&str`; this type is for callers that want to reject
/// near-empty submissions before analysing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript(String);

impl Transcript {
    pub const MIN_LEN: usize = 10;

    pub fn parse(text: impl Into<String>) -> Result<Self, Error> {
        let text = text.into();
        let len = text.trim().chars().count();
        if len < Self::MIN_LEN {
            return Err(Error::TranscriptTooShort {
                len,
                min: Self::MIN_LEN,
            });
        }
        Ok(Transcript(text))
    }
}

impl Deref for Transcript {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
