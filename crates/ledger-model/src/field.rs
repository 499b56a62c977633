use serde::{Deserialize, Serialize};
use std::fmt;

/// A column of the canonical general-ledger target schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationField {
    /// Stable catalog key (also the database column name).
    pub key: String,
    /// Display label; searches match on it alongside the key.
    pub label: String,
    /// Whether an import is complete only once this field is mapped.
    pub required: bool,
    /// Static prior for how reliable automatic mapping to this field is (0.0 to 1.0).
    pub confidence: f32,
    pub description: String,
}

impl DestinationField {
    pub fn new(key: impl Into<String>, required: bool, confidence: f32) -> Self {
        let key = key.into();
        Self {
            label: key.clone(),
            key,
            required,
            confidence,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn tier(&self) -> ConfidenceTier {
        ConfidenceTier::from_confidence(self.confidence)
    }

    /// Confidence rendered as a whole percentage.
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }

    /// Case-insensitive substring match over key and label.
    ///
    /// Descriptions are not searched. An empty term matches.
    pub fn matches(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        self.key.to_lowercase().contains(&term) || self.label.to_lowercase().contains(&term)
    }
}

/// Reliability band derived from a field's static confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    /// No automatic mapping should be trusted (below 0.5).
    None,
    /// 0.5 up to 0.7.
    Low,
    /// 0.7 up to 0.9.
    Medium,
    /// 0.9 and above.
    High,
}

impl ConfidenceTier {
    pub fn from_confidence(confidence: f32) -> Self {
        if confidence >= 0.9 {
            ConfidenceTier::High
        } else if confidence >= 0.7 {
            ConfidenceTier::Medium
        } else if confidence >= 0.5 {
            ConfidenceTier::Low
        } else {
            ConfidenceTier::None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "high",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::Low => "low",
            ConfidenceTier::None => "none",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
