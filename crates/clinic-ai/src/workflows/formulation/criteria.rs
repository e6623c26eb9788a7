use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Minimum trimmed length, in characters, of an N/A justification.
pub const MIN_JUSTIFICATION_CHARS: usize = 10;

/// Escape valve letting a criterion count as satisfied without data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotApplicable {
    pub flagged: bool,
    pub reason: String,
}

impl NotApplicable {
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            flagged: true,
            reason: reason.into(),
        }
    }

    /// Flagged and carrying a justification of at least [`MIN_JUSTIFICATION_CHARS`].
    pub fn is_justified(&self) -> bool {
        self.flagged && self.reason.trim().chars().count() >= MIN_JUSTIFICATION_CHARS
    }
}

/// Weighted checklist item consumed by the readiness aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Criterion {
    pub id: String,
    pub description: String,
    pub category: String,
    pub weight: f64,
    pub satisfied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub met_date: Option<NaiveDate>,
}

impl Default for Criterion {
    fn default() -> Self {
        Self::new(String::new(), String::new(), 1.0)
    }
}

impl Criterion {
    pub fn new(id: impl Into<String>, description: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            category: String::new(),
            weight,
            satisfied: false,
            met_date: None,
        }
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn met_on(mut self, date: NaiveDate) -> Self {
        self.satisfied = true;
        self.met_date = Some(date);
        self
    }

    pub fn met(mut self) -> Self {
        self.satisfied = true;
        self
    }

    /// Weight counted by the aggregator; non-positive or non-finite weights count as zero.
    pub fn effective_weight(&self) -> f64 {
        if self.weight.is_finite() && self.weight > 0.0 {
            self.weight
        } else {
            0.0
        }
    }
}

pub fn has_text(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn has_optional_text(value: Option<&str>) -> bool {
    value.map(has_text).unwrap_or(false)
}

/// At least one entry with non-blank text.
pub fn has_entries(items: &[String]) -> bool {
    items.iter().any(|item| has_text(item))
}

/// Plain test passes, or the N/A escape valve is justified.
pub fn satisfied_or_justified(present: bool, not_applicable: &NotApplicable) -> bool {
    present || not_applicable.is_justified()
}
