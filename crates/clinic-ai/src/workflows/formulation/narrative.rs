use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of superseded versions kept, most recent first.
pub const HISTORY_LIMIT: usize = 20;

/// Narrative length change, in characters, that must be exceeded to count as material.
pub const MATERIAL_LENGTH_DELTA: usize = 50;

/// Narrative length change beyond which a hypothesis revision counts as major.
pub const MAJOR_LENGTH_DELTA: usize = 200;

/// One saved state of the explanatory narrative and its diagnosis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeDraft {
    pub narrative: String,
    pub diagnosis: Option<String>,
}

impl NarrativeDraft {
    pub fn new(narrative: impl Into<String>, diagnosis: Option<&str>) -> Self {
        Self {
            narrative: narrative.into(),
            diagnosis: diagnosis.map(str::to_string),
        }
    }

    /// Blank diagnoses count as absent.
    fn diagnosis_text(&self) -> Option<&str> {
        self.diagnosis
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    fn narrative_chars(&self) -> usize {
        self.narrative.chars().count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeChangeType {
    DiagnosisRemoved,
    DiagnosisAdded,
    Combined,
    DiagnosisModified,
    HypothesisMajor,
    HypothesisMinor,
}

impl NarrativeChangeType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::DiagnosisRemoved => "Diagnosis removed",
            Self::DiagnosisAdded => "Diagnosis added",
            Self::Combined => "Diagnosis and hypothesis revised",
            Self::DiagnosisModified => "Diagnosis modified",
            Self::HypothesisMajor => "Major hypothesis revision",
            Self::HypothesisMinor => "Minor hypothesis revision",
        }
    }
}

/// Identifier and timestamp supplied by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionStamp {
    pub id: String,
    pub recorded_at: DateTime<Utc>,
}

/// A superseded narrative state kept in the change log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeVersion {
    pub id: String,
    pub recorded_at: DateTime<Utc>,
    pub narrative: String,
    pub diagnosis: Option<String>,
    pub change_reason: String,
    pub change_type: NarrativeChangeType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DiagnosisChange {
    Unchanged,
    Added,
    Removed,
    Modified,
}

fn diagnosis_change(previous: &NarrativeDraft, next: &NarrativeDraft) -> DiagnosisChange {
    match (previous.diagnosis_text(), next.diagnosis_text()) {
        (None, None) => DiagnosisChange::Unchanged,
        (None, Some(_)) => DiagnosisChange::Added,
        (Some(_), None) => DiagnosisChange::Removed,
        (Some(before), Some(after)) if before == after => DiagnosisChange::Unchanged,
        (Some(_), Some(_)) => DiagnosisChange::Modified,
    }
}

/// Change type of a material edit, or `None` when the edit should not be versioned.
pub fn classify_change(
    previous: &NarrativeDraft,
    next: &NarrativeDraft,
) -> Option<NarrativeChangeType> {
    let length_delta = previous.narrative_chars().abs_diff(next.narrative_chars());
    let narrative_material =
        length_delta > MATERIAL_LENGTH_DELTA && previous.narrative != next.narrative;

    match diagnosis_change(previous, next) {
        DiagnosisChange::Removed => Some(NarrativeChangeType::DiagnosisRemoved),
        DiagnosisChange::Added => Some(NarrativeChangeType::DiagnosisAdded),
        DiagnosisChange::Modified if narrative_material => Some(NarrativeChangeType::Combined),
        DiagnosisChange::Modified => Some(NarrativeChangeType::DiagnosisModified),
        DiagnosisChange::Unchanged if !narrative_material => None,
        DiagnosisChange::Unchanged if length_delta > MAJOR_LENGTH_DELTA => {
            Some(NarrativeChangeType::HypothesisMajor)
        }
        DiagnosisChange::Unchanged => Some(NarrativeChangeType::HypothesisMinor),
    }
}

pub fn should_version(previous: &NarrativeDraft, next: &NarrativeDraft) -> bool {
    classify_change(previous, next).is_some()
}

/// Log entry preserving `previous`, or `None` when the edit is not material.
pub fn build_history_entry(
    previous: &NarrativeDraft,
    next: &NarrativeDraft,
    stamp: VersionStamp,
    change_reason: Option<&str>,
) -> Option<NarrativeVersion> {
    let change_type = classify_change(previous, next)?;
    let change_reason = change_reason
        .map(str::trim)
        .filter(|reason| !reason.is_empty())
        .unwrap_or(change_type.label())
        .to_string();

    Some(NarrativeVersion {
        id: stamp.id,
        recorded_at: stamp.recorded_at,
        narrative: previous.narrative.clone(),
        diagnosis: previous.diagnosis.clone(),
        change_reason,
        change_type,
    })
}

/// New history with the superseded version prepended, capped at [`HISTORY_LIMIT`].
/// Non-material edits return the history unchanged.
pub fn append_history_if_material(
    history: &[NarrativeVersion],
    previous: &NarrativeDraft,
    next: &NarrativeDraft,
    stamp: VersionStamp,
    change_reason: Option<&str>,
) -> Vec<NarrativeVersion> {
    let Some(entry) = build_history_entry(previous, next, stamp, change_reason) else {
        return history.to_vec();
    };

    std::iter::once(entry)
        .chain(history.iter().cloned())
        .take(HISTORY_LIMIT)
        .collect()
}
