//! Scoring, readiness, and next-action rules for the case-formulation workflow.
//!
//! Every operation is a pure function of its inputs: snapshots go in, derived values
//! come out, and nothing is persisted here.

pub mod criteria;
pub mod domain;
pub mod goals;
pub mod narrative;
pub mod phases;
pub mod problems;
pub mod progress;
pub mod readiness;
pub mod recommendation;

#[cfg(test)]
mod tests;

pub use criteria::{Criterion, NotApplicable, MIN_JUSTIFICATION_CHARS};
pub use domain::{
    AssessmentRecord, ClinicalSnapshot, EvidenceLinks, ExternalSources, FormulationRecord,
    Intervention, MechanismMap, MechanismQuadrant, ProcessEdge, ProcessNetwork, QuadrantKind,
    ReassessmentSchedule, SessionRecord, SharedUnderstanding, TargetView, TreatmentGoal,
    WorkflowPhase,
};
pub use goals::{
    attainment_readiness, mean_attainment_level, record_goal_evaluation, AttainmentGoal,
    AttainmentStatus, GasLevel, GoalEvaluation, GoalLevelError, GoalStatus, LevelDescriptions,
};
pub use narrative::{
    append_history_if_material, build_history_entry, classify_change, should_version,
    NarrativeChangeType, NarrativeDraft, NarrativeVersion, VersionStamp, HISTORY_LIMIT,
};
pub use phases::{
    evaluate_phase, phase_checklists, phase_score, CheckKey, PhaseCheck, PhaseChecklist,
};
pub use problems::{
    priority_conflicts, ranked_active_problems, PriorityConflict, Problem, ProblemStatus,
};
pub use progress::{aggregate_scores, compute_workflow_progress, PhaseScore, WorkflowProgress};
pub use readiness::{
    compute_readiness, discharge_readiness, DischargeStatus, ReadinessResult, ReadinessTiers,
};
pub use recommendation::{resolve_next_action, NextAction, PROCESS_COMPLETE_ACTION};
