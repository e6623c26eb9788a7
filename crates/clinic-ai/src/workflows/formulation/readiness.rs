use super::criteria::Criterion;
use super::domain::ClinicalSnapshot;
use serde::{Deserialize, Serialize};

/// Maps a readiness percentage onto caller-defined status tiers.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadinessTiers<S> {
    floor: S,
    thresholds: Vec<(u8, S)>,
}

impl<S: Copy> ReadinessTiers<S> {
    /// `thresholds` are minimum percentages; `floor` applies below all of them.
    pub fn new(floor: S, thresholds: impl IntoIterator<Item = (u8, S)>) -> Self {
        let mut thresholds: Vec<(u8, S)> = thresholds.into_iter().collect();
        thresholds.sort_by(|a, b| b.0.cmp(&a.0));
        Self { floor, thresholds }
    }

    pub fn floor(&self) -> S {
        self.floor
    }

    pub fn status_for(&self, percent: u8) -> S {
        self.thresholds
            .iter()
            .find(|(minimum, _)| percent >= *minimum)
            .map(|(_, status)| *status)
            .unwrap_or(self.floor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadinessResult<S> {
    pub percent: u8,
    pub status: S,
    pub met_criteria: usize,
    pub total_criteria: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unmet: Vec<String>,
}

/// Weighted share of satisfied criteria, rounded to a whole percent.
pub fn compute_readiness<S: Copy>(
    criteria: &[Criterion],
    tiers: &ReadinessTiers<S>,
) -> ReadinessResult<S> {
    let total_weight: f64 = criteria.iter().map(Criterion::effective_weight).sum();
    let met_weight: f64 = criteria
        .iter()
        .filter(|criterion| criterion.satisfied)
        .map(Criterion::effective_weight)
        .sum();

    let met_criteria = criteria.iter().filter(|criterion| criterion.satisfied).count();
    let unmet = criteria
        .iter()
        .filter(|criterion| !criterion.satisfied)
        .map(|criterion| criterion.id.clone())
        .collect();

    let (percent, status) = if total_weight > 0.0 {
        let percent = ((met_weight / total_weight) * 100.0).round().clamp(0.0, 100.0) as u8;
        (percent, tiers.status_for(percent))
    } else {
        (0, tiers.floor())
    };

    ReadinessResult {
        percent,
        status,
        met_criteria,
        total_criteria: criteria.len(),
        unmet,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DischargeStatus {
    NotIndicated,
    InPreparation,
    Ready,
}

impl DischargeStatus {
    pub fn tiers() -> ReadinessTiers<Self> {
        ReadinessTiers::new(
            Self::NotIndicated,
            [(75, Self::Ready), (50, Self::InPreparation)],
        )
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NotIndicated => "Not indicated",
            Self::InPreparation => "In preparation",
            Self::Ready => "Ready",
        }
    }
}

pub fn discharge_readiness(snapshot: &ClinicalSnapshot) -> ReadinessResult<DischargeStatus> {
    compute_readiness(&snapshot.discharge_criteria, &DischargeStatus::tiers())
}
