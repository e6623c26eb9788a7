use chrono::NaiveDate;
use clinic_ai::error::AppError;
use clinic_ai::workflows::formulation::{
    compute_workflow_progress, discharge_readiness, mean_attainment_level, phase_score,
    record_goal_evaluation, resolve_next_action, AttainmentGoal, ClinicalSnapshot,
    DischargeStatus, GasLevel, TargetView, WorkflowPhase,
};
use serde_json::json;

fn partial_record() -> ClinicalSnapshot {
    serde_json::from_value(json!({
        "anamnesis": "Presenting with health anxiety after a cardiac scare in 2023.",
        "external_sources": {
            "not_applicable": { "flagged": true, "reason": "Patient declined collateral contact" }
        },
        "assessments": [
            { "instrument": "HAI-18", "administered_on": "2025-01-06", "total_score": 31.0 }
        ],
        "reassessment_schedule": { "instruments": ["HAI-18"], "frequency": "every 6 weeks" },
        "problems": [
            { "id": "p1", "text": "Checking heart rate", "severity": 8, "priority_rank": 1, "is_focus": true },
            { "id": "p2", "text": "Reassurance seeking", "severity": 6, "priority_rank": 2 }
        ],
        "mechanisms": {
            "precipitants": { "items": ["cardiac scare"] },
            "origins": { "items": ["parent with chronic illness"] },
            "resources": { "items": ["regular exercise"] },
            "obstacles": { "not_applicable": { "flagged": true, "reason": "none identified so far" } },
            "maintaining_processes": ["body checking"]
        },
        "sessions": [ { "id": "s1", "date": "2025-01-13" } ]
    }))
    .expect("snapshot json is valid")
}

#[test]
fn partial_record_deserializes_with_defaults() {
    let snapshot = partial_record();
    assert!(snapshot.goals.is_empty());
    assert!(snapshot.formulation.narrative.is_empty());
    assert!(!snapshot.shared_understanding.reviewed);
}

#[test]
fn partial_record_progress_and_next_action() {
    let snapshot = partial_record();

    let progress = compute_workflow_progress(&snapshot);
    assert_eq!(progress.score_for(WorkflowPhase::Assessment), 100);
    assert_eq!(progress.score_for(WorkflowPhase::ProblemList), 70);
    assert_eq!(progress.score_for(WorkflowPhase::Mechanisms), 40);
    assert_eq!(progress.score_for(WorkflowPhase::Formulation), 0);
    // (100 + 70 + 40) / 7 = 30
    assert_eq!(progress.overall, 30);
    assert_eq!(progress.current_phase, WorkflowPhase::ProblemList);

    let next = resolve_next_action(&snapshot);
    assert_eq!(next.target_view, Some(TargetView::SharedUnderstanding));

    assert_eq!(
        discharge_readiness(&snapshot).status,
        DischargeStatus::NotIndicated
    );
}

#[test]
fn sparse_nested_records_deserialize_with_defaults() {
    let snapshot: ClinicalSnapshot = serde_json::from_value(json!({
        "discharge_criteria": [ { "id": "dc1", "satisfied": true } ],
        "attainment_goals": [ { "id": "g1" } ]
    }))
    .expect("sparse snapshot json is valid");

    assert!(snapshot.discharge_criteria[0].description.is_empty());
    assert_eq!(snapshot.discharge_criteria[0].weight, 1.0);
    assert!(snapshot.attainment_goals[0].title.is_empty());
    assert_eq!(mean_attainment_level(&snapshot.attainment_goals), Some(0.0));

    let readiness = discharge_readiness(&snapshot);
    assert_eq!(readiness.percent, 100);
    assert_eq!(readiness.status, DischargeStatus::Ready);
}

#[test]
fn zero_priority_rank_earns_no_priority_points() {
    let snapshot: ClinicalSnapshot = serde_json::from_value(json!({
        "problems": [ { "id": "p1", "text": "Checking heart rate", "priority_rank": 0 } ]
    }))
    .expect("snapshot json is valid");

    assert_eq!(phase_score(WorkflowPhase::ProblemList, &snapshot), 40);
}

#[test]
fn progress_serializes_with_snake_case_identifiers() {
    let progress = compute_workflow_progress(&partial_record());
    let value = serde_json::to_value(&progress).expect("progress serializes");

    assert_eq!(value["current_phase"], "problem_list");
    assert_eq!(value["scores"].as_array().map(Vec::len), Some(7));
    assert_eq!(value["scores"][1]["outstanding"][0], "shared_understanding");

    let next = serde_json::to_value(resolve_next_action(&partial_record())).expect("serializes");
    assert_eq!(next["target_view"], "shared_understanding");
}

#[test]
fn goal_evaluations_flow_through_the_public_api() {
    let evaluated_on = NaiveDate::from_ymd_opt(2025, 2, 3).expect("valid date");
    let goal = AttainmentGoal::new("gas-1", "Reduce body checking to once a day");
    assert_eq!(goal.current_level(), GasLevel::Expected);

    let goal = record_goal_evaluation(&goal, 1, "checks twice a day", evaluated_on)
        .expect("level is on the scale");
    assert_eq!(mean_attainment_level(&[goal.clone()]), Some(1.0));

    let rejected: AppError = record_goal_evaluation(&goal, 7, "", evaluated_on)
        .expect_err("level 7 is off the scale")
        .into();
    assert!(rejected.to_string().contains("outside the -2..=2 scale"));
}
