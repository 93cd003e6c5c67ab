//! Line-by-line extraction of action items from commitment statements.

use chrono::{DateTime, Utc};
use itertools::Itertools;

use super::{commitment::find_commitment, lexicon::PriorityLexicon};
use crate::{
    transcript::SpeakerTurn,
    types::{ActionItem, Priority},
};

/// Substrings that make a line worth inspecting for a commitment.
const COMMITMENT_MARKERS: [&str; 3] = ["I will", "i will", "Yes"];

const UNATTRIBUTED_OWNER: &str = "Team Member";
const MIN_DESCRIPTION_CHARS: usize = 3;
const DEDUP_PREFIX_CHARS: usize = 40;

pub const PLACEHOLDER_DESCRIPTION: &str = "Review meeting notes and follow up with team";
pub const PLACEHOLDER_OWNER: &str = "Team";

/// Remembers who spoke on the previous line so an unattributed line can inherit the speaker.
#[derive(Debug, Default)]
struct SpeakerCarry {
    previous: Option<String>,
}

impl SpeakerCarry {
    /// Records the speaker of the current line (if any) and returns the previous line's.
    fn advance(&mut self, current: Option<&SpeakerTurn<'_>>) -> Option<String> {
        std::mem::replace(&mut self.previous, current.map(|t| t.speaker.clone()))
    }
}

/// Extracts deduplicated action items in transcript order.
///
/// Priority comes from a declaration about the commitment on the same line when there is one,
/// otherwise from `lexicon`. Every item is stamped with `created_at`. When no line yields a
/// commitment a single placeholder item is returned, so the result is never empty.
#[tracing::instrument(skip_all)]
pub fn extract_action_items(
    text: &str,
    lexicon: &PriorityLexicon,
    created_at: DateTime<Utc>,
) -> Vec<ActionItem> {
    let mut carry = SpeakerCarry::default();

    let items = text
        .lines()
        .filter_map(|raw| {
            let line = raw.trim();
            let turn = SpeakerTurn::parse(line);
            let previous_speaker = carry.advance(turn.as_ref());

            if line.is_empty() || !COMMITMENT_MARKERS.iter().any(|m| line.contains(m)) {
                return None;
            }

            let (owner, task_text) = match turn {
                Some(SpeakerTurn { speaker, utterance }) => (speaker, utterance),
                None => (
                    previous_speaker.unwrap_or_else(|| UNATTRIBUTED_OWNER.to_string()),
                    line,
                ),
            };

            let commitment = find_commitment(task_text)?;
            if commitment.description.chars().count() < MIN_DESCRIPTION_CHARS {
                return None;
            }

            let declared = PriorityLexicon::declared_on_line(line);

            Some((owner, commitment, declared))
        })
        .unique_by(|(owner, commitment, _)| {
            (
                owner.clone(),
                commitment
                    .description
                    .chars()
                    .take(DEDUP_PREFIX_CHARS)
                    .collect::<String>(),
            )
        })
        .map(|(owner, commitment, declared)| {
            let priority =
                declared.unwrap_or_else(|| lexicon.classify(&commitment.description));
            ActionItem::new(
                commitment.description,
                Some(owner),
                commitment.deadline,
                priority,
                created_at,
            )
        })
        .collect::<Vec<_>>();

    if items.is_empty() {
        tracing::debug!("No commitments found, using placeholder action item");
        return vec![ActionItem::new(
            PLACEHOLDER_DESCRIPTION,
            Some(PLACEHOLDER_OWNER.to_string()),
            None,
            Priority::Medium,
            created_at,
        )];
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;

    fn extract(text: &str) -> Vec<ActionItem> {
        extract_action_items(text, &PriorityLexicon::build(text), Utc::now())
    }

    #[test]
    fn test_affirmed_commitment_with_deadline_and_priority() {
        let items =
            extract("Alice: Yes, I will finish the login module by March 5. This is high priority.");

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.description, "finish the login module");
        assert_eq!(item.owner.as_deref(), Some("Alice"));
        assert_eq!(item.deadline.as_deref(), Some("March 5"));
        assert_eq!(item.priority, Priority::High);
        assert_eq!(item.status, Status::Pending);
    }

    #[test]
    fn test_plain_commitment_defaults() {
        let items = extract("Bob: I will write documentation.");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "write documentation");
        assert_eq!(items[0].owner.as_deref(), Some("Bob"));
        assert_eq!(items[0].deadline, None);
        assert_eq!(items[0].priority, Priority::Medium);
    }

    #[test]
    fn test_owner_carries_over_from_previous_line() {
        let items = extract("Dana (QA Lead): Can someone own the test plan?\nYes, I will draft it by Friday 3.");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].owner.as_deref(), Some("Dana"));
        assert_eq!(items[0].description, "draft it by Friday 3");
    }

    #[test]
    fn test_owner_carry_only_reaches_one_line_back() {
        let items = extract("Dana: Any volunteers?\n\nI will update the roadmap.");
        assert_eq!(items[0].owner.as_deref(), Some("Team Member"));
    }

    #[test]
    fn test_unattributed_first_line_gets_placeholder_owner() {
        let items = extract("I will book the room.");
        assert_eq!(items[0].owner.as_deref(), Some("Team Member"));
        assert_eq!(items[0].description, "book the room");
    }

    #[test]
    fn test_duplicate_commitments_collapse() {
        let items = extract("Eve: I will fix the build.\nFrank: ok\nEve: I will fix the build.");
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_dedup_key_uses_first_forty_characters() {
        let text = "Eve: I will migrate the reporting pipeline to the new warehouse cluster.\n\
                    Eve: I will migrate the reporting pipeline to the new warehouse in May.";
        let items = extract(text);
        assert_eq!(items.len(), 1);
        assert!(items[0].description.ends_with("cluster"));
    }

    #[test]
    fn test_same_task_different_owners_kept() {
        let items = extract("Eve: I will fix the build.\nFrank: I will fix the build.");
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].owner.as_deref(), Some("Frank"));
    }

    #[test]
    fn test_short_descriptions_are_discarded() {
        let items = extract("Gus: I will go.\nHal: I will test the API.");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].owner.as_deref(), Some("Hal"));
    }

    #[test]
    fn test_yes_without_commitment_is_skipped() {
        let items = extract("Ivy: Yes, that works.\nJon: I will send the invite.");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, "send the invite");
    }

    #[test]
    fn test_no_commitments_yields_placeholder() {
        let items = extract("Kim: The weather is nice.\nLee: Agreed.");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].description, PLACEHOLDER_DESCRIPTION);
        assert_eq!(items[0].owner.as_deref(), Some(PLACEHOLDER_OWNER));
        assert_eq!(items[0].deadline, None);
        assert_eq!(items[0].priority, Priority::Medium);
    }

    #[test]
    fn test_items_share_batch_timestamp_and_unique_ids() {
        let now = Utc::now();
        let text = "A: I will do one thing.\nB: I will do another thing.";
        let items = extract_action_items(text, &PriorityLexicon::default(), now);

        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.created_at == now));
        assert_ne!(items[0].id, items[1].id);
    }

    #[test]
    fn test_back_referenced_priority_stays_with_its_item() {
        let items = extract(
            "Bob: I will write the tests. This is low priority.\nAlice: I will write the release notes.",
        );
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].priority, Priority::Low);
        assert_eq!(items[1].owner.as_deref(), Some("Alice"));
        assert_eq!(items[1].priority, Priority::Medium);
    }

    #[test]
    fn test_back_referenced_words_are_not_keywords() {
        let items = extract(
            "Ann: I will prepare slides for the demo. This is high priority.\nBen: I will update the format guide.",
        );
        assert_eq!(items[0].priority, Priority::High);
        assert_eq!(items[1].description, "update the format guide");
        assert_eq!(items[1].priority, Priority::Medium);
    }

    #[test]
    fn test_back_reference_overrides_keyword_match() {
        let items = extract(
            "Login is high priority.\nCy: I will polish the login page. That is low priority.",
        );
        assert_eq!(items[0].priority, Priority::Low);
    }

    #[test]
    fn test_low_priority_list_applies() {
        let text = "Low priority: styling tweaks.\nMia: I will handle the styling.";
        let items = extract(text);
        assert_eq!(items[0].priority, Priority::Low);
    }
}
