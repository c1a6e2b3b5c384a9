// Core data structures for the homework watcher

use serde::{Deserialize, Serialize};
use std::fmt;

/// Review status of a submitted homework
///
/// This is the status catalog: every code the review API may report maps to
/// exactly one verdict. Any other code is rejected by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Look up a status by its API code (exact match)
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Get the API code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Human-readable verdict sent to the chat
    pub fn verdict(&self) -> &'static str {
        match self {
            Self::Approved => "The work has been reviewed: the reviewer liked everything. Hooray!",
            Self::Reviewing => "The work has been taken for review.",
            Self::Rejected => "The work has been reviewed: the reviewer has comments.",
        }
    }

    /// Get all statuses
    pub fn all() -> Vec<Self> {
        vec![Self::Approved, Self::Reviewing, Self::Rejected]
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single homework review record extracted from the API response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Homework {
    #[serde(rename = "homework_name")]
    pub name: String,
    pub status: HomeworkStatus,
}

impl Homework {
    /// Notification text announcing this homework's current status
    pub fn status_message(&self) -> String {
        format!(
            "Homework review status changed for \"{}\". {}",
            self.name,
            self.status.verdict()
        )
    }
}
