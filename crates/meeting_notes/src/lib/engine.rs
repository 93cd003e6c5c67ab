//! # Analysis engine
//!
//! Turns a transcript into an [`AnalysisResult`]. When a [`Generator`] is configured the
//! engine first asks it for the analysis; a missing generator, a failed or slow call, or a
//! response without usable JSON all fall through to the local [`heuristics`] pipeline.
//! Either way the caller gets a result with the same shape, and never an error.

pub mod builder;

use std::time::Duration;

use chrono::Utc;

use crate::{
    heuristics,
    parser::ModelResponse,
    types::{ActionItem, AnalysisResult, DraftAnalysis},
    Generator, NoGenerator,
};

pub use builder::AnalysisEngineBuilder;

/// Why the local pipeline produced a result instead of the generator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FallbackReason {
    #[error("no generator configured")]
    NotConfigured,
    #[error("generator did not answer within {0:?}")]
    Timeout(Duration),
    #[error("generator failed: {0}")]
    Generation(String),
    #[error("malformed generator response: {0}")]
    MalformedResponse(String),
}

/// Outcome of one analysis, tagged with the path that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    Delegated(AnalysisResult),
    Fallback {
        result: AnalysisResult,
        reason: FallbackReason,
    },
}

impl Analysis {
    pub fn result(&self) -> &AnalysisResult {
        match self {
            Analysis::Delegated(result) | Analysis::Fallback { result, .. } => result,
        }
    }

    pub fn into_result(self) -> AnalysisResult {
        match self {
            Analysis::Delegated(result) | Analysis::Fallback { result, .. } => result,
        }
    }

    pub fn is_delegated(&self) -> bool {
        matches!(self, Analysis::Delegated(_))
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            Analysis::Delegated(_) => None,
            Analysis::Fallback { reason, .. } => Some(reason),
        }
    }
}

#[derive(Debug)]
pub struct AnalysisEngine<G = NoGenerator>
where
    G: Generator + Send + Sync + 'static,
{
    generator: Option<G>,
    timeout: Duration,
}

impl AnalysisEngine {
    /// An engine that always runs the local pipeline.
    pub fn offline() -> Self {
        AnalysisEngineBuilder::new().build()
    }
}

impl<G> AnalysisEngine<G>
where
    G: Generator + Send + Sync + 'static,
{
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    const ANALYSIS_PROMPT: &'static str = include_str!("./llm/prompts/analysis_0.txt");

    pub fn is_delegating(&self) -> bool {
        self.generator.is_some()
    }

    /// Model of the configured generator, if any.
    pub fn model(&self) -> Option<&str> {
        self.generator.as_ref().map(|g| g.model())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The prompt sent to the generator for `transcript`.
    pub fn prompt(transcript: &str) -> String {
        Self::ANALYSIS_PROMPT.replace("{transcript}", transcript)
    }

    /// Analyses `transcript`, reporting which path produced the result.
    #[tracing::instrument(
        skip_all,
        fields(len = transcript.len(), model = self.model().unwrap_or("none"))
    )]
    pub async fn run(&self, transcript: &str) -> Analysis {
        match self.delegate(transcript).await {
            Ok(result) => {
                tracing::info!(
                    action_items = result.action_items.len(),
                    "Analysis produced by generator"
                );
                Analysis::Delegated(result)
            }
            Err(reason) => {
                if reason == FallbackReason::NotConfigured {
                    tracing::debug!("No generator configured, using heuristic analysis");
                } else {
                    tracing::warn!(reason = %reason, "Falling back to heuristic analysis");
                }

                Analysis::Fallback {
                    result: heuristics::analyze(transcript),
                    reason,
                }
            }
        }
    }

    pub async fn analyze(&self, transcript: &str) -> AnalysisResult {
        self.run(transcript).await.into_result()
    }

    pub async fn extract_action_items(&self, transcript: &str) -> Vec<ActionItem> {
        self.analyze(transcript).await.action_items
    }

    /// Single attempt at generator analysis; there is no retry.
    async fn delegate(&self, transcript: &str) -> Result<AnalysisResult, FallbackReason> {
        let generator = self
            .generator
            .as_ref()
            .ok_or(FallbackReason::NotConfigured)?;

        let prompt = Self::prompt(transcript);
        let text = tokio::time::timeout(self.timeout, generator.generate(&prompt))
            .await
            .map_err(|_| FallbackReason::Timeout(self.timeout))?
            .map_err(|e| FallbackReason::Generation(e.to_string()))?;

        let draft = ModelResponse::from(text)
            .to_json::<DraftAnalysis>()
            .map_err(|e| FallbackReason::MalformedResponse(e.to_string()))?;

        Ok(draft.into_result(Utc::now()))
    }
}
