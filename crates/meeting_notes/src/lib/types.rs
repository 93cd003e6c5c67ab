//! Records produced by transcript analysis.
//!
//! Field names on the wire are fixed (`summary`, `keyPoints`, `actionItems`, `createdAt`, ...)
//! because the stores and exporters downstream read them verbatim.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::heuristics::key_points::MAX_KEY_POINTS;

/// Urgency tier of an action item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!("unknown priority '{other}'")),
        }
    }
}

/// Progress of an action item. Analysis only ever creates `Pending` items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Status::Pending),
            "in-progress" | "in_progress" => Ok(Status::InProgress),
            "completed" => Ok(Status::Completed),
            other => Err(format!("unknown status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: Uuid,
    pub description: String,
    pub owner: Option<String>,
    pub deadline: Option<String>,
    pub priority: Priority,
    pub status: Status,
    pub created_at: DateTime<Utc>,
}

impl ActionItem {
    /// Creates a pending item with a fresh id, stamped with the batch time `created_at`.
    pub fn new(
        description: impl Into<String>,
        owner: Option<String>,
        deadline: Option<String>,
        priority: Priority,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            owner,
            deadline,
            priority,
            status: Status::Pending,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: String,
    pub key_points: Vec<String>,
    pub action_items: Vec<ActionItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_count: Option<u32>,
}

/// Analysis as returned by a language model, before ids and timestamps are assigned.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftAnalysis {
    pub summary: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<DraftActionItem>,
}

impl DraftAnalysis {
    /// Stamps every item with a fresh id and `created_at`, and caps the key points.
    pub fn into_result(self, created_at: DateTime<Utc>) -> AnalysisResult {
        AnalysisResult {
            summary: self.summary,
            key_points: self.key_points.into_iter().take(MAX_KEY_POINTS).collect(),
            action_items: self
                .action_items
                .into_iter()
                .map(|item| item.into_action_item(created_at))
                .collect(),
            duration: None,
            participant_count: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DraftActionItem {
    pub description: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub priority: Priority,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Status,
}

impl DraftActionItem {
    pub fn into_action_item(self, created_at: DateTime<Utc>) -> ActionItem {
        ActionItem {
            id: Uuid::new_v4(),
            description: self.description,
            owner: self.owner.filter(|o| !o.trim().is_empty()),
            deadline: self.deadline.filter(|d| !d.trim().is_empty()),
            priority: self.priority,
            status: self.status,
            created_at,
        }
    }
}

// models write "High", "urgent" or null as often as the requested lowercase tiers
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()).unwrap_or_default())
}
