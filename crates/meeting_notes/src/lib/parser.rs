//! # Model response parser
//!
//! Language models wrap the JSON they were asked for in prose or markdown fences. This module
//! recovers the outermost `{...}` span from such text and deserializes it.

use std::{ops::Deref, sync::LazyLock};

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::Error;

static JSON_OBJECT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

/// Free text returned by a generative model.
pub struct ModelResponse(String);

impl Deref for ModelResponse {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl ModelResponse {
    pub fn new(text: String) -> Self {
        ModelResponse(text)
    }

    /// Returns the span from the first `{` to the last `}`, if there is one.
    pub fn json_span(&self) -> Option<&str> {
        JSON_OBJECT_RE.find(self).map(|m| m.as_str())
    }

    /// Deserializes the outermost JSON object embedded in the response.
    ///
    /// # Returns
    /// * `Ok(T)` if an object was found and matches `T`.
    /// * `Err(Error::ParseError)` if the response holds no `{...}` span.
    /// * `Err(Error::Json)` if the span is not valid JSON for `T`.
    pub fn to_json<T>(&self) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let span = self.json_span().ok_or(Error::ParseError(
            "Failed to locate a JSON object in the model response",
        ))?;

        Ok(serde_json::from_str(span)?)
    }
}

impl From<String> for ModelResponse {
    fn from(value: String) -> Self {
        ModelResponse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DraftAnalysis;
    use serde_json::{json, Value};

    #[test]
    fn test_successful_extraction() {
        let text = r#"Here is the analysis you asked for:
            {"summary": "Short sync", "keyPoints": ["a"], "actionItems": []}
            Let me know if you need anything else."#;

        let response = ModelResponse::from(text.to_string());
        let result = response.to_json::<Value>();
        assert!(result.is_ok(), "Failed to extract JSON: {:?}", result.err());
        assert_eq!(
            result.unwrap(),
            json!({"summary": "Short sync", "keyPoints": ["a"], "actionItems": []})
        );
    }

    #[test]
    fn test_extraction_from_markdown_fence() {
        let text = "```json\n{\n  \"summary\": \"Planning\",\n  \"actionItems\": [{\"description\": \"ship\"}]\n}\n```";

        let response = ModelResponse::new(text.to_string());
        let analysis = response
            .to_json::<DraftAnalysis>()
            .expect("Failed to extract fenced JSON");
        assert_eq!(analysis.summary, "Planning");
        assert_eq!(analysis.action_items.len(), 1);
        assert!(analysis.key_points.is_empty());
    }

    #[test]
    fn test_span_covers_nested_objects() {
        let response = ModelResponse::new(r#"x {"a": {"b": 1}} y"#.to_string());
        assert_eq!(response.json_span(), Some(r#"{"a": {"b": 1}}"#));
    }

    #[test]
    fn test_extraction_with_no_data() {
        let response = ModelResponse::new("I could not analyse this transcript.".to_string());
        let result = response.to_json::<Value>();
        assert!(matches!(result, Err(Error::ParseError(_))));
    }

    #[test]
    fn test_extraction_with_invalid_json() {
        let response = ModelResponse::new("{summary: unquoted}".to_string());
        let result = response.to_json::<Value>();
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_two_objects_make_one_invalid_span() {
        let response = ModelResponse::new(r#"{"a": 1} and {"b": 2}"#.to_string());
        assert!(matches!(response.to_json::<Value>(), Err(Error::Json(_))));
    }
}
