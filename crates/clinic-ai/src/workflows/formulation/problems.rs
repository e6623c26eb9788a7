use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Upper bound of the severity and functional-impact scales.
pub const SCALE_MAX: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemStatus {
    #[default]
    Active,
    Improved,
    Resolved,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Problem {
    pub id: String,
    pub text: String,
    pub severity: u8,
    pub functional_impact: Option<u8>,
    pub priority_rank: Option<u32>,
    pub is_focus: bool,
    pub status: ProblemStatus,
}

fn clamp_scale(value: i32) -> u8 {
    value.clamp(0, SCALE_MAX as i32) as u8
}

impl Problem {
    pub fn new(id: impl Into<String>, text: impl Into<String>, severity: i32) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            severity: clamp_scale(severity),
            ..Self::default()
        }
    }

    pub fn with_functional_impact(mut self, impact: i32) -> Self {
        self.set_functional_impact(impact);
        self
    }

    /// Ranks start at 1; zero clears the rank.
    pub fn with_priority_rank(mut self, rank: u32) -> Self {
        self.priority_rank = (rank > 0).then_some(rank);
        self
    }

    pub fn as_focus(mut self) -> Self {
        self.is_focus = true;
        self
    }

    pub fn with_status(mut self, status: ProblemStatus) -> Self {
        self.status = status;
        self
    }

    pub fn set_severity(&mut self, severity: i32) {
        self.severity = clamp_scale(severity);
    }

    pub fn set_functional_impact(&mut self, impact: i32) {
        self.functional_impact = Some(clamp_scale(impact));
    }

    pub fn is_active(&self) -> bool {
        self.status == ProblemStatus::Active
    }

    /// Priority rank, if any. A stored rank of zero counts as unranked.
    pub fn rank(&self) -> Option<u32> {
        self.priority_rank.filter(|rank| *rank > 0)
    }
}

/// Two or more active problems sharing one priority rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriorityConflict {
    pub rank: u32,
    pub problem_ids: Vec<String>,
}

/// Duplicate ranks among active problems, ordered by rank. Reported, never corrected.
pub fn priority_conflicts(problems: &[Problem]) -> Vec<PriorityConflict> {
    let mut by_rank: BTreeMap<u32, Vec<String>> = BTreeMap::new();
    for problem in problems.iter().filter(|problem| problem.is_active()) {
        if let Some(rank) = problem.rank() {
            by_rank.entry(rank).or_default().push(problem.id.clone());
        }
    }

    by_rank
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|(rank, problem_ids)| PriorityConflict { rank, problem_ids })
        .collect()
}

/// Reason the active problem list does not yet have a coherent priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriorityGap {
    NoRankedProblem,
    DuplicateRanks(Vec<PriorityConflict>),
}

/// Priority is coherent when an active problem is ranked and no two active ranks collide.
/// A ranked problem also satisfies the "focus or ranked" condition, so focus flags alone
/// never make the list coherent.
pub fn priority_gap(problems: &[Problem]) -> Option<PriorityGap> {
    let any_ranked = problems
        .iter()
        .any(|problem| problem.is_active() && problem.rank().is_some());
    if !any_ranked {
        return Some(PriorityGap::NoRankedProblem);
    }

    let conflicts = priority_conflicts(problems);
    if !conflicts.is_empty() {
        return Some(PriorityGap::DuplicateRanks(conflicts));
    }

    None
}

/// Active problems by rank (unranked last), focus first, then severity descending.
pub fn ranked_active_problems(problems: &[Problem]) -> Vec<&Problem> {
    let mut active: Vec<&Problem> = problems.iter().filter(|problem| problem.is_active()).collect();
    active.sort_by(|a, b| {
        let rank_a = a.rank().unwrap_or(u32::MAX);
        let rank_b = b.rank().unwrap_or(u32::MAX);
        rank_a
            .cmp(&rank_b)
            .then_with(|| b.is_focus.cmp(&a.is_focus))
            .then_with(|| b.severity.cmp(&a.severity))
    });
    active
}
