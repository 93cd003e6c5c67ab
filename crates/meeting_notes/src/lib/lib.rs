//! Meeting transcript analysis: summary, key points and action items with owners, deadlines
//! and priorities.
//!
//! The [`AnalysisEngine`] optionally delegates to a generative model and otherwise runs the
//! deterministic [`heuristics`] pipeline.

mod engine;
mod error;
pub mod heuristics;
mod llm;
pub mod parser;
pub mod tracing;
pub mod transcript;
pub mod types;

pub use engine::{Analysis, AnalysisEngine, AnalysisEngineBuilder, FallbackReason};
pub use error::Error;
pub use llm::generator::{Generator, NoGenerator};
pub use llm::openai;
pub use transcript::Transcript;
pub use types::{ActionItem, AnalysisResult, Priority, Status};
