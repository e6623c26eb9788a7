use super::domain::{ClinicalSnapshot, TargetView, WorkflowPhase};
use super::phases::{phase_checklists, CheckKey};
use super::progress::first_incomplete;
use serde::Serialize;
use tracing::debug;

pub const PROCESS_COMPLETE_ACTION: &str =
    "Process complete: every workflow phase is documented";

/// The single most specific thing to do next, and where to do it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextAction {
    pub action: String,
    pub target_view: Option<TargetView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<WorkflowPhase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<CheckKey>,
}

impl NextAction {
    fn complete() -> Self {
        Self {
            action: PROCESS_COMPLETE_ACTION.to_string(),
            target_view: None,
            phase: None,
            check: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.target_view.is_none()
    }
}

/// Walks phases in workflow order and returns the first unmet check of the first incomplete phase.
pub fn resolve_next_action(snapshot: &ClinicalSnapshot) -> NextAction {
    let checklists = phase_checklists(snapshot);

    let next = first_incomplete(&checklists)
        .and_then(|checklist| {
            checklist.first_unmet().map(|check| NextAction {
                action: check.action.clone(),
                target_view: Some(check.target_view),
                phase: Some(checklist.phase),
                check: Some(check.key),
            })
        })
        .unwrap_or_else(NextAction::complete);

    debug!(
        action = %next.action,
        target_view = next.target_view.map(TargetView::as_str),
        "resolved next action"
    );

    next
}
