use super::criteria::{Criterion, NotApplicable};
use super::goals::AttainmentGoal;
use super::problems::Problem;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed stages of the case-formulation workflow, in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowPhase {
    Assessment,
    ProblemList,
    Mechanisms,
    Formulation,
    Treatment,
    Monitoring,
    Discharge,
}

impl WorkflowPhase {
    pub const COUNT: usize = 7;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::Assessment,
            Self::ProblemList,
            Self::Mechanisms,
            Self::Formulation,
            Self::Treatment,
            Self::Monitoring,
            Self::Discharge,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Assessment => "Assessment",
            Self::ProblemList => "Problem List",
            Self::Mechanisms => "Mechanisms",
            Self::Formulation => "Formulation",
            Self::Treatment => "Treatment",
            Self::Monitoring => "Monitoring",
            Self::Discharge => "Discharge",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assessment => "assessment",
            Self::ProblemList => "problem_list",
            Self::Mechanisms => "mechanisms",
            Self::Formulation => "formulation",
            Self::Treatment => "treatment",
            Self::Monitoring => "monitoring",
            Self::Discharge => "discharge",
        }
    }
}

/// Screen of the clinic application where a recommended action is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetView {
    Intake,
    ExternalSources,
    Instruments,
    ReassessmentPlan,
    ProblemList,
    SharedUnderstanding,
    Mechanisms,
    ProcessNetwork,
    Formulation,
    TreatmentPlan,
    Sessions,
    Discharge,
}

impl TargetView {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Intake => "intake",
            Self::ExternalSources => "external_sources",
            Self::Instruments => "instruments",
            Self::ReassessmentPlan => "reassessment_plan",
            Self::ProblemList => "problem_list",
            Self::SharedUnderstanding => "shared_understanding",
            Self::Mechanisms => "mechanisms",
            Self::ProcessNetwork => "process_network",
            Self::Formulation => "formulation",
            Self::TreatmentPlan => "treatment_plan",
            Self::Sessions => "sessions",
            Self::Discharge => "discharge",
        }
    }
}

/// Read-only view of one patient's record, as loaded by the persistence layer.
///
/// Every field defaults to empty so partial records deserialize cleanly; the
/// scoring rules treat anything missing as unmet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicalSnapshot {
    pub anamnesis: String,
    pub external_sources: ExternalSources,
    pub assessments: Vec<AssessmentRecord>,
    pub reassessment_schedule: ReassessmentSchedule,
    pub problems: Vec<Problem>,
    pub shared_understanding: SharedUnderstanding,
    pub mechanisms: MechanismMap,
    pub formulation: FormulationRecord,
    pub goals: Vec<TreatmentGoal>,
    pub interventions: Vec<Intervention>,
    pub sessions: Vec<SessionRecord>,
    pub discharge_criteria: Vec<Criterion>,
    pub attainment_goals: Vec<AttainmentGoal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalSources {
    pub sources: Vec<String>,
    pub not_applicable: NotApplicable,
}

/// One administration of a standardized instrument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentRecord {
    pub instrument: String,
    pub administered_on: Option<NaiveDate>,
    pub total_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReassessmentSchedule {
    pub instruments: Vec<String>,
    pub frequency: Option<String>,
    pub not_applicable: NotApplicable,
}

/// Patient and clinician agreement on the problem list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharedUnderstanding {
    pub reviewed: bool,
    pub agreement: Option<String>,
}

/// One of the four mechanism buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MechanismQuadrant {
    pub items: Vec<String>,
    pub not_applicable: NotApplicable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuadrantKind {
    Precipitants,
    Origins,
    Resources,
    Obstacles,
}

impl QuadrantKind {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Precipitants,
            Self::Origins,
            Self::Resources,
            Self::Obstacles,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Precipitants => "precipitating factors",
            Self::Origins => "developmental origins",
            Self::Resources => "resources",
            Self::Obstacles => "obstacles",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MechanismMap {
    pub precipitants: MechanismQuadrant,
    pub origins: MechanismQuadrant,
    pub resources: MechanismQuadrant,
    pub obstacles: MechanismQuadrant,
    pub maintaining_processes: Vec<String>,
    pub core_beliefs: Vec<String>,
    pub observable_patterns: Vec<String>,
    pub evidence: EvidenceLinks,
}

impl MechanismMap {
    pub fn quadrant(&self, kind: QuadrantKind) -> &MechanismQuadrant {
        match kind {
            QuadrantKind::Precipitants => &self.precipitants,
            QuadrantKind::Origins => &self.origins,
            QuadrantKind::Resources => &self.resources,
            QuadrantKind::Obstacles => &self.obstacles,
        }
    }
}

/// Flags recording which other parts of the record back the mechanism map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceLinks {
    pub sessions: bool,
    pub assessments: bool,
    pub problems: bool,
}

impl EvidenceLinks {
    pub fn any(&self) -> bool {
        self.sessions || self.assessments || self.problems
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormulationRecord {
    pub narrative: String,
    pub diagnosis: Option<String>,
    pub diagnosis_not_applicable: NotApplicable,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreatmentGoal {
    pub id: String,
    pub description: String,
    /// Percent complete, 0-100.
    pub progress: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Intervention {
    pub id: String,
    pub name: String,
    pub goal_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionRecord {
    pub id: String,
    pub date: Option<NaiveDate>,
    pub process_network: ProcessNetwork,
}

/// Per-session map of processes and the links between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessNetwork {
    pub nodes: Vec<String>,
    pub edges: Vec<ProcessEdge>,
}

impl ProcessNetwork {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessEdge {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
}
