//! # Heuristic analysis
//!
//! The local, deterministic analysis pipeline. It needs no network, no runtime and no shared
//! state: every call builds its own lexicon and item list, so concurrent calls are independent.
//!
//! Stages run in this order:
//! 1. [`PriorityLexicon::build`] harvests priority keywords from explicit declarations.
//! 2. [`extract_action_items`] turns commitment lines into deduplicated action items.
//! 3. [`select_key_points`] picks up to three topical highlights.
//! 4. [`compose_summary`] phrases a one-line summary from the item count.

mod commitment;
pub mod extractor;
pub mod key_points;
pub mod lexicon;
pub mod summary;

pub use commitment::{find_commitment, Commitment};
pub use extractor::extract_action_items;
pub use key_points::select_key_points;
pub use lexicon::PriorityLexicon;
pub use summary::compose_summary;

use chrono::Utc;

use crate::types::AnalysisResult;

/// Runs the full local pipeline over `text`.
#[tracing::instrument(skip_all, fields(len = text.len()))]
pub fn analyze(text: &str) -> AnalysisResult {
    let created_at = Utc::now();

    let lexicon = PriorityLexicon::build(text);
    let action_items = extract_action_items(text, &lexicon, created_at);
    let key_points = select_key_points(text);
    let summary = compose_summary(action_items.len());

    tracing::debug!(
        action_items = action_items.len(),
        key_points = key_points.len(),
        "Heuristic analysis complete"
    );

    AnalysisResult {
        summary,
        key_points,
        action_items,
        duration: None,
        participant_count: None,
    }
}
