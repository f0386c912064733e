//! Keyword sentiment classifier

use serde::Serialize;
use std::fmt;

const POSITIVE_KEYWORDS: &[&str] = &["good", "great"];
const NEGATIVE_KEYWORDS: &[&str] = &["bad", "sad"];

/// Coarse three-way sentiment label.
///
/// Serialized as the display label so API consumers see the same text
/// that is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sentiment {
    #[serde(rename = "Positive 😊")]
    Positive,
    #[serde(rename = "Negative 😞")]
    Negative,
    #[serde(rename = "Neutral 😐")]
    Neutral,
}

impl Sentiment {
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive 😊",
            Sentiment::Negative => "Negative 😞",
            Sentiment::Neutral => "Neutral 😐",
        }
    }

    /// Case-insensitive substring match; the positive set is checked first,
    /// so text holding both kinds of keyword is positive.
    pub fn classify(text: &str) -> Self {
        let lowered = text.to_lowercase();
        let mentions = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));

        if mentions(POSITIVE_KEYWORDS) {
            Sentiment::Positive
        } else if mentions(NEGATIVE_KEYWORDS) {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
