use super::criteria::{has_entries, has_optional_text, has_text, satisfied_or_justified};
use super::domain::{ClinicalSnapshot, QuadrantKind, TargetView, WorkflowPhase};
use super::problems::{priority_gap, PriorityGap};
use serde::Serialize;
use tracing::warn;

/// Points a phase is worth when every check is met.
pub const PHASE_MAX_SCORE: u8 = 100;

/// Minimum explanatory narrative length, in trimmed characters, that must be exceeded.
pub const FORMULATION_NARRATIVE_MIN_CHARS: usize = 100;

pub const MONITORING_MIN_SESSIONS: usize = 3;

/// Progress every goal needs before discharge counts as attained.
pub const DISCHARGE_GOAL_PROGRESS: f64 = 80.0;

/// Running discharge score that unlocks the consolidation bonus.
pub const DISCHARGE_BONUS_THRESHOLD: u8 = 80;

/// Single completion predicate shared by progress aggregation and recommendations.
pub fn is_phase_complete(score: u8) -> bool {
    score >= PHASE_MAX_SCORE
}

/// Sub-check identifiers, in the priority order each phase evaluates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKey {
    IntakeNarrative,
    ExternalSources,
    InstrumentApplied,
    ReassessmentSchedule,
    ActiveProblems,
    CoherentPriority,
    SharedUnderstanding,
    MechanismQuadrants,
    MaintainingProcesses,
    EvidenceLinks,
    ExplanatoryNarrative,
    PrimaryDiagnosis,
    GoalsDefined,
    InterventionsPlanned,
    GoalProgress,
    SessionVolume,
    Reassessment,
    GoalsAttained,
    DischargeCriteriaMet,
    DischargeConsolidation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseCheck {
    pub key: CheckKey,
    pub points: u8,
    pub met: bool,
    /// What to do when the check is unmet.
    pub action: String,
    pub target_view: TargetView,
}

impl PhaseCheck {
    fn new(
        key: CheckKey,
        points: u8,
        met: bool,
        action: impl Into<String>,
        target_view: TargetView,
    ) -> Self {
        Self {
            key,
            points,
            met,
            action: action.into(),
            target_view,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseChecklist {
    pub phase: WorkflowPhase,
    pub checks: Vec<PhaseCheck>,
}

impl PhaseChecklist {
    pub fn score(&self) -> u8 {
        self.checks
            .iter()
            .filter(|check| check.met)
            .map(|check| check.points)
            .sum()
    }

    pub fn is_complete(&self) -> bool {
        is_phase_complete(self.score())
    }

    pub fn first_unmet(&self) -> Option<&PhaseCheck> {
        self.checks.iter().find(|check| !check.met)
    }

    pub fn outstanding(&self) -> Vec<CheckKey> {
        self.checks
            .iter()
            .filter(|check| !check.met)
            .map(|check| check.key)
            .collect()
    }
}

/// Checklists for every phase, in workflow order.
pub fn phase_checklists(snapshot: &ClinicalSnapshot) -> [PhaseChecklist; WorkflowPhase::COUNT] {
    WorkflowPhase::ordered().map(|phase| evaluate_phase(phase, snapshot))
}

pub fn evaluate_phase(phase: WorkflowPhase, snapshot: &ClinicalSnapshot) -> PhaseChecklist {
    let checks = match phase {
        WorkflowPhase::Assessment => assessment_checks(snapshot),
        WorkflowPhase::ProblemList => problem_list_checks(snapshot),
        WorkflowPhase::Mechanisms => mechanism_checks(snapshot),
        WorkflowPhase::Formulation => formulation_checks(snapshot),
        WorkflowPhase::Treatment => treatment_checks(snapshot),
        WorkflowPhase::Monitoring => monitoring_checks(snapshot),
        WorkflowPhase::Discharge => discharge_checks(snapshot),
    };

    PhaseChecklist { phase, checks }
}

pub fn phase_score(phase: WorkflowPhase, snapshot: &ClinicalSnapshot) -> u8 {
    evaluate_phase(phase, snapshot).score()
}

fn assessment_checks(snapshot: &ClinicalSnapshot) -> Vec<PhaseCheck> {
    let sources = &snapshot.external_sources;
    let schedule = &snapshot.reassessment_schedule;
    let schedule_present =
        has_entries(&schedule.instruments) && has_optional_text(schedule.frequency.as_deref());

    vec![
        PhaseCheck::new(
            CheckKey::IntakeNarrative,
            30,
            has_text(&snapshot.anamnesis),
            "Fill out the structured intake narrative",
            TargetView::Intake,
        ),
        PhaseCheck::new(
            CheckKey::ExternalSources,
            20,
            satisfied_or_justified(has_entries(&sources.sources), &sources.not_applicable),
            "Record external information sources or mark them N/A with a justification",
            TargetView::ExternalSources,
        ),
        PhaseCheck::new(
            CheckKey::InstrumentApplied,
            30,
            !snapshot.assessments.is_empty(),
            "Apply a standardized assessment instrument",
            TargetView::Instruments,
        ),
        PhaseCheck::new(
            CheckKey::ReassessmentSchedule,
            20,
            satisfied_or_justified(schedule_present, &schedule.not_applicable),
            "Set a reassessment schedule (instruments and frequency) or mark it N/A with a justification",
            TargetView::ReassessmentPlan,
        ),
    ]
}

fn problem_list_checks(snapshot: &ClinicalSnapshot) -> Vec<PhaseCheck> {
    let has_active = snapshot.problems.iter().any(|problem| problem.is_active());

    let gap = priority_gap(&snapshot.problems);
    let priority_action = match &gap {
        Some(PriorityGap::DuplicateRanks(conflicts)) => {
            for conflict in conflicts {
                warn!(
                    rank = conflict.rank,
                    problems = ?conflict.problem_ids,
                    "active problems share a priority rank"
                );
            }
            let ranks: Vec<String> = conflicts
                .iter()
                .map(|conflict| conflict.rank.to_string())
                .collect();
            format!(
                "Resolve duplicate priority ranks among active problems (rank {})",
                ranks.join(", ")
            )
        }
        _ => "Rank the active problems by priority".to_string(),
    };

    let agreement = &snapshot.shared_understanding;
    let agreed = agreement.reviewed && has_optional_text(agreement.agreement.as_deref());

    vec![
        PhaseCheck::new(
            CheckKey::ActiveProblems,
            40,
            has_active,
            "Add at least one active problem to the problem list",
            TargetView::ProblemList,
        ),
        PhaseCheck::new(
            CheckKey::CoherentPriority,
            30,
            gap.is_none(),
            priority_action,
            TargetView::ProblemList,
        ),
        PhaseCheck::new(
            CheckKey::SharedUnderstanding,
            30,
            agreed,
            "Review the problem list with the patient and record the shared understanding",
            TargetView::SharedUnderstanding,
        ),
    ]
}

fn mechanism_checks(snapshot: &ClinicalSnapshot) -> Vec<PhaseCheck> {
    let mechanisms = &snapshot.mechanisms;

    let missing_quadrant = QuadrantKind::ordered().into_iter().find(|kind| {
        let quadrant = mechanisms.quadrant(*kind);
        !satisfied_or_justified(has_entries(&quadrant.items), &quadrant.not_applicable)
    });
    let quadrant_action = match missing_quadrant {
        Some(kind) => format!(
            "Document {} or mark them N/A with a justification",
            kind.label()
        ),
        None => "Complete all four mechanism quadrants".to_string(),
    };

    let has_processes = has_entries(&mechanisms.maintaining_processes);
    let has_beliefs_or_patterns =
        has_entries(&mechanisms.core_beliefs) || has_entries(&mechanisms.observable_patterns);
    let process_action = if has_processes {
        "Add core beliefs or observable patterns behind the maintaining processes"
    } else {
        "List at least one maintaining process"
    };

    let evidenced = mechanisms.evidence.any()
        || snapshot
            .sessions
            .iter()
            .any(|session| !session.process_network.is_empty());

    vec![
        PhaseCheck::new(
            CheckKey::MechanismQuadrants,
            40,
            missing_quadrant.is_none(),
            quadrant_action,
            TargetView::Mechanisms,
        ),
        PhaseCheck::new(
            CheckKey::MaintainingProcesses,
            30,
            has_processes && has_beliefs_or_patterns,
            process_action,
            TargetView::Mechanisms,
        ),
        PhaseCheck::new(
            CheckKey::EvidenceLinks,
            30,
            evidenced,
            "Link the mechanisms to evidence or map a session process network",
            TargetView::ProcessNetwork,
        ),
    ]
}

fn formulation_checks(snapshot: &ClinicalSnapshot) -> Vec<PhaseCheck> {
    let formulation = &snapshot.formulation;
    let narrative_chars = formulation.narrative.trim().chars().count();

    vec![
        PhaseCheck::new(
            CheckKey::ExplanatoryNarrative,
            50,
            narrative_chars > FORMULATION_NARRATIVE_MIN_CHARS,
            format!(
                "Write the explanatory formulation narrative (more than {} characters)",
                FORMULATION_NARRATIVE_MIN_CHARS
            ),
            TargetView::Formulation,
        ),
        PhaseCheck::new(
            CheckKey::PrimaryDiagnosis,
            50,
            satisfied_or_justified(
                has_optional_text(formulation.diagnosis.as_deref()),
                &formulation.diagnosis_not_applicable,
            ),
            "Record a primary diagnosis or mark it N/A with a justification",
            TargetView::Formulation,
        ),
    ]
}

fn treatment_checks(snapshot: &ClinicalSnapshot) -> Vec<PhaseCheck> {
    vec![
        PhaseCheck::new(
            CheckKey::GoalsDefined,
            30,
            !snapshot.goals.is_empty(),
            "Define at least one treatment goal",
            TargetView::TreatmentPlan,
        ),
        PhaseCheck::new(
            CheckKey::InterventionsPlanned,
            30,
            !snapshot.interventions.is_empty(),
            "Plan at least one intervention",
            TargetView::TreatmentPlan,
        ),
        PhaseCheck::new(
            CheckKey::GoalProgress,
            40,
            snapshot.goals.iter().any(|goal| goal.progress > 0.0),
            "Record progress on at least one treatment goal",
            TargetView::TreatmentPlan,
        ),
    ]
}

fn monitoring_checks(snapshot: &ClinicalSnapshot) -> Vec<PhaseCheck> {
    let sessions = snapshot.sessions.len();

    vec![
        PhaseCheck::new(
            CheckKey::SessionVolume,
            50,
            sessions >= MONITORING_MIN_SESSIONS,
            format!(
                "Document at least {} sessions ({} so far)",
                MONITORING_MIN_SESSIONS, sessions
            ),
            TargetView::Sessions,
        ),
        PhaseCheck::new(
            CheckKey::Reassessment,
            50,
            snapshot.assessments.len() > 1,
            "Re-apply a standardized instrument to measure change",
            TargetView::Instruments,
        ),
    ]
}

fn discharge_checks(snapshot: &ClinicalSnapshot) -> Vec<PhaseCheck> {
    let goals = &snapshot.goals;
    let goals_attained = !goals.is_empty()
        && goals
            .iter()
            .all(|goal| goal.progress >= DISCHARGE_GOAL_PROGRESS);
    let goal_action = if goals.is_empty() {
        "Define treatment goals before planning discharge".to_string()
    } else {
        format!(
            "Bring every treatment goal to at least {DISCHARGE_GOAL_PROGRESS:.0}% progress"
        )
    };

    let criteria = &snapshot.discharge_criteria;
    let criteria_met = !criteria.is_empty() && criteria.iter().all(|criterion| criterion.satisfied);
    let criteria_action = if criteria.is_empty() {
        "Define discharge criteria"
    } else {
        "Mark the remaining discharge criteria as achieved"
    };

    let mut checks = vec![
        PhaseCheck::new(
            CheckKey::GoalsAttained,
            40,
            goals_attained,
            goal_action,
            TargetView::TreatmentPlan,
        ),
        PhaseCheck::new(
            CheckKey::DischargeCriteriaMet,
            40,
            criteria_met,
            criteria_action,
            TargetView::Discharge,
        ),
    ];

    // The bonus only counts once the running score already reaches the threshold.
    let running: u8 = checks
        .iter()
        .filter(|check| check.met)
        .map(|check| check.points)
        .sum();
    checks.push(PhaseCheck::new(
        CheckKey::DischargeConsolidation,
        20,
        running >= DISCHARGE_BONUS_THRESHOLD,
        "Confirm discharge readiness with the patient",
        TargetView::Discharge,
    ));

    checks
}
