//! Priority keywords harvested from explicit declarations in a transcript.
//!
//! Two declaration shapes are recognised for each tier:
//!
//! * `"<one or two words> is|are <tier> priority"`, e.g. "Login module is high priority"
//! * `"<tier> priority: <comma separated list>"`, e.g. "Low priority: docs, cleanup"
//!
//! The sets are independent, so a token may land in more than one tier. Conflicts are
//! resolved when classifying, where the higher tier wins.
//!
//! A declaration about "this" or "that" right after a commitment ("I will fix the importer.
//! This is high priority.") is about that commitment only; see
//! [`PriorityLexicon::declared_on_line`].

use std::sync::LazyLock;

use regex::Regex;

use super::commitment::find_commitment;
use crate::types::Priority;

const STOP_WORDS: [&str; 4] = ["are", "is", "the", "and"];

/// Subjects that point back at the commitment made earlier on the same line.
const BACK_REFERENCES: [&str; 3] = ["this", "that", "it"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclarationKind {
    Subject,
    List,
}

#[derive(Debug)]
struct DeclarationRule {
    tier: Priority,
    kind: DeclarationKind,
    re: Regex,
}

static DECLARATION_RULES: LazyLock<Vec<DeclarationRule>> = LazyLock::new(|| {
    Priority::ALL
        .iter()
        .flat_map(|&tier| {
            [
                DeclarationRule {
                    tier,
                    kind: DeclarationKind::Subject,
                    re: Regex::new(&format!(
                        r"(?i)([a-z]+(?:\s+[a-z]+)?)\s+(?:is|are)\s+{tier}\s+priority"
                    ))
                    .unwrap(),
                },
                DeclarationRule {
                    tier,
                    kind: DeclarationKind::List,
                    re: Regex::new(&format!(r"(?i){tier}\s+priority[:\s]+([^.\n]+)")).unwrap(),
                },
            ]
        })
        .collect()
});

/// Per-transcript keyword sets, one per priority tier, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityLexicon {
    high: Vec<String>,
    medium: Vec<String>,
    low: Vec<String>,
}

impl PriorityLexicon {
    #[tracing::instrument(skip_all)]
    pub fn build(text: &str) -> Self {
        let mut lexicon = PriorityLexicon::default();

        for rule in DECLARATION_RULES.iter() {
            for captures in rule.re.captures_iter(text) {
                let Some(phrase) = captures.get(1) else {
                    continue;
                };

                match rule.kind {
                    DeclarationKind::Subject => {
                        let phrase = phrase.as_str().to_lowercase();
                        for word in phrase.split_whitespace() {
                            if is_significant(word) {
                                lexicon.insert(rule.tier, word);
                            }
                        }
                    }
                    DeclarationKind::List => {
                        for entry in phrase.as_str().split(',') {
                            let entry = entry.trim().to_lowercase();
                            for word in entry.split_whitespace() {
                                if is_significant(word) && !STOP_WORDS.contains(&word) {
                                    lexicon.insert(rule.tier, word);
                                }
                            }
                        }
                    }
                }
            }
        }

        tracing::debug!(
            high = lexicon.high.len(),
            medium = lexicon.medium.len(),
            low = lexicon.low.len(),
            "Built priority lexicon"
        );

        lexicon
    }

    /// Tier declared for the commitment on `line` itself, as in
    /// "I will fix the importer. This is high priority."
    ///
    /// Only a declaration whose subject ends in "this", "that" or "it" and that follows a
    /// commitment on the same line counts. The result applies to that line's item alone.
    pub fn declared_on_line(line: &str) -> Option<Priority> {
        DECLARATION_RULES
            .iter()
            .filter(|rule| rule.kind == DeclarationKind::Subject)
            .flat_map(|rule| rule.re.captures_iter(line).map(move |c| (rule.tier, c)))
            .filter_map(|(tier, captures)| {
                let declaration = captures.get(0)?;
                let subject = captures.get(1)?.as_str().to_lowercase();
                let last = subject.split_whitespace().last()?;
                (BACK_REFERENCES.contains(&last)
                    && find_commitment(&line[..declaration.start()]).is_some())
                .then_some((declaration.start(), tier))
            })
            .min_by_key(|(start, _)| *start)
            .map(|(_, tier)| tier)
    }

    pub fn keywords(&self, tier: Priority) -> &[String] {
        match tier {
            Priority::High => &self.high,
            Priority::Medium => &self.medium,
            Priority::Low => &self.low,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.high.is_empty() && self.medium.is_empty() && self.low.is_empty()
    }

    /// Classifies a task description by keyword containment.
    ///
    /// Tiers are checked high, then medium, then low; the first tier with any keyword
    /// contained in the lowercased description decides. No match leaves the default, medium.
    pub fn classify(&self, description: &str) -> Priority {
        let description = description.to_lowercase();

        Priority::ALL
            .into_iter()
            .find(|&tier| {
                self.keywords(tier)
                    .iter()
                    .any(|keyword| description.contains(keyword.as_str()))
            })
            .unwrap_or_default()
    }

    fn insert(&mut self, tier: Priority, token: &str) {
        let set = match tier {
            Priority::High => &mut self.high,
            Priority::Medium => &mut self.medium,
            Priority::Low => &mut self.low,
        };
        if !set.iter().any(|t| t == token) {
            set.push(token.to_string());
        }
    }
}

fn is_significant(word: &str) -> bool {
    word.chars().count() > 2
}
