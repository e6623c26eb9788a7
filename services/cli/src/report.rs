use clinic_ai::config::ReportFormat;
use clinic_ai::error::AppError;
use clinic_ai::workflows::formulation::{
    attainment_readiness, compute_readiness, compute_workflow_progress, discharge_readiness,
    mean_attainment_level, priority_conflicts, resolve_next_action, AttainmentStatus,
    ClinicalSnapshot, Criterion, DischargeStatus, NextAction, PriorityConflict, ReadinessResult,
    WorkflowProgress,
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ProgressReport {
    pub(crate) progress: WorkflowProgress,
    pub(crate) next_action: NextAction,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) priority_conflicts: Vec<PriorityConflict>,
    pub(crate) discharge: ReadinessResult<DischargeStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) goal_attainment: Option<GoalAttainmentSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct GoalAttainmentSummary {
    pub(crate) mean_level: Option<f64>,
    pub(crate) readiness: ReadinessResult<AttainmentStatus>,
}

impl ProgressReport {
    pub(crate) fn build(snapshot: &ClinicalSnapshot) -> Self {
        let goal_attainment = (!snapshot.attainment_goals.is_empty()).then(|| {
            GoalAttainmentSummary {
                mean_level: mean_attainment_level(&snapshot.attainment_goals),
                readiness: attainment_readiness(&snapshot.attainment_goals),
            }
        });

        Self {
            progress: compute_workflow_progress(snapshot),
            next_action: resolve_next_action(snapshot),
            priority_conflicts: priority_conflicts(&snapshot.problems),
            discharge: discharge_readiness(snapshot),
            goal_attainment,
        }
    }
}

pub(crate) fn render_progress(report: &ProgressReport, format: ReportFormat) -> Result<(), AppError> {
    match format {
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        ReportFormat::Text => print_progress(report),
    }
    Ok(())
}

fn print_progress(report: &ProgressReport) {
    let progress = &report.progress;

    println!("Workflow progress: {}%", progress.overall);
    println!("Current phase: {}", progress.current_phase.label());

    println!("\nPhase scores");
    for entry in &progress.scores {
        println!("- {}: {}/100", entry.phase.label(), entry.score);
    }

    println!("\nNext action");
    match report.next_action.target_view {
        Some(view) => println!("- {} (open: {})", report.next_action.action, view.as_str()),
        None => println!("- {}", report.next_action.action),
    }

    if !report.priority_conflicts.is_empty() {
        println!("\nPriority warnings");
        for conflict in &report.priority_conflicts {
            println!(
                "- rank {} shared by {}",
                conflict.rank,
                conflict.problem_ids.join(", ")
            );
        }
    }

    println!(
        "\nDischarge readiness: {}% ({}), {}/{} criteria met",
        report.discharge.percent,
        report.discharge.status.label(),
        report.discharge.met_criteria,
        report.discharge.total_criteria
    );

    if let Some(summary) = &report.goal_attainment {
        let mean = summary
            .mean_level
            .map(|level| format!("{level:+.2}"))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "Goal attainment: mean level {}, {}% at or above expected ({})",
            mean,
            summary.readiness.percent,
            summary.readiness.status.label()
        );
    }
}

pub(crate) fn render_readiness(criteria: &[Criterion], format: ReportFormat) -> Result<(), AppError> {
    let result = compute_readiness(criteria, &DischargeStatus::tiers());
    match format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        ReportFormat::Text => {
            println!(
                "Readiness: {}% ({}), {}/{} criteria met",
                result.percent,
                result.status.label(),
                result.met_criteria,
                result.total_criteria
            );
            if !result.unmet.is_empty() {
                println!("Outstanding: {}", result.unmet.join(", "));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::sample_snapshot;

    #[test]
    fn report_collects_progress_and_readiness() {
        let report = ProgressReport::build(&sample_snapshot());

        assert_eq!(report.progress.scores.len(), 7);
        assert!(!report.next_action.is_terminal());
        assert_eq!(report.priority_conflicts.len(), 1);
        assert!(report.goal_attainment.is_some());
    }

    #[test]
    fn empty_record_omits_goal_attainment() {
        let report = ProgressReport::build(&ClinicalSnapshot::default());
        assert!(report.goal_attainment.is_none());
        let value = serde_json::to_value(&report).expect("report serializes");
        assert!(value.get("goal_attainment").is_none());
        assert_eq!(value["discharge"]["status"], "not_indicated");
    }
}
