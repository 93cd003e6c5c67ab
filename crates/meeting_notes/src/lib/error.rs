#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    ParseError(&'static str),
    #[error("Failed to deserialize model response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Transcript too short: {len} characters, need at least {min}")]
    TranscriptTooShort { len: usize, min: usize },
}
