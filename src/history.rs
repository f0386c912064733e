//! In-memory session history
//!
//! Long-lived conversation display state belongs to the caller, not the
//! pipeline. Lives only as long as the process.

use crate::pipeline::Sentiment;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One rendered turn of the session
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum HistoryEntry {
    User {
        text: String,
        at: DateTime<Utc>,
    },
    Bot {
        text: String,
        sentiment: Sentiment,
        at: DateTime<Utc>,
    },
}

impl HistoryEntry {
    #[allow(dead_code)] // Used by display code and tests
    pub fn text(&self) -> &str {
        match self {
            HistoryEntry::User { text, .. } | HistoryEntry::Bot { text, .. } => text,
        }
    }
}

#[derive(Debug, Default)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed exchange: the user's text as submitted, then the
    /// reply with the sentiment computed for that submission.
    pub fn record_exchange(&mut self, user_text: &str, reply: &str, sentiment: Sentiment) {
        let at = Utc::now();
        self.entries.push(HistoryEntry::User {
            text: user_text.to_string(),
            at,
        });
        self.entries.push(HistoryEntry::Bot {
            text: reply.to_string(),
            sentiment,
            at,
        });
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[allow(dead_code)] // Utility method
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
