use super::domain::{ClinicalSnapshot, WorkflowPhase};
use super::phases::{is_phase_complete, phase_checklists, CheckKey, PhaseChecklist};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseScore {
    pub phase: WorkflowPhase,
    pub score: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outstanding: Vec<CheckKey>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowProgress {
    pub scores: [PhaseScore; WorkflowPhase::COUNT],
    pub overall: u8,
    pub current_phase: WorkflowPhase,
}

impl WorkflowProgress {
    pub fn score_for(&self, phase: WorkflowPhase) -> u8 {
        self.scores
            .iter()
            .find(|entry| entry.phase == phase)
            .map(|entry| entry.score)
            .unwrap_or(0)
    }

    pub fn is_complete(&self) -> bool {
        self.scores.iter().all(|entry| is_phase_complete(entry.score))
    }
}

/// Overall score and current phase from raw phase scores given in workflow order.
pub fn aggregate_scores(scores: [u8; WorkflowPhase::COUNT]) -> WorkflowProgress {
    let phases = WorkflowPhase::ordered();
    let entries = std::array::from_fn(|index| PhaseScore {
        phase: phases[index],
        score: scores[index],
        outstanding: Vec::new(),
    });
    build_progress(entries)
}

pub fn compute_workflow_progress(snapshot: &ClinicalSnapshot) -> WorkflowProgress {
    let entries = phase_checklists(snapshot).map(|checklist| PhaseScore {
        phase: checklist.phase,
        score: checklist.score(),
        outstanding: checklist.outstanding(),
    });
    let progress = build_progress(entries);

    debug!(
        overall = progress.overall,
        current_phase = progress.current_phase.as_str(),
        "computed workflow progress"
    );

    progress
}

/// First phase in workflow order that is not complete.
pub(crate) fn first_incomplete(checklists: &[PhaseChecklist]) -> Option<&PhaseChecklist> {
    checklists.iter().find(|checklist| !checklist.is_complete())
}

fn build_progress(scores: [PhaseScore; WorkflowPhase::COUNT]) -> WorkflowProgress {
    let total: u32 = scores.iter().map(|entry| u32::from(entry.score)).sum();
    let overall = (f64::from(total) / WorkflowPhase::COUNT as f64)
        .round()
        .clamp(0.0, 100.0) as u8;

    let current_phase = scores
        .iter()
        .find(|entry| !is_phase_complete(entry.score))
        .map(|entry| entry.phase)
        .unwrap_or(WorkflowPhase::Discharge);

    WorkflowProgress {
        scores,
        overall,
        current_phase,
    }
}
