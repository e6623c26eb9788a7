use super::common::*;
use crate::workflows::formulation::{
    compute_readiness, discharge_readiness, ClinicalSnapshot, Criterion, DischargeStatus,
    ReadinessTiers,
};

fn weighted(id: &str, weight: f64, satisfied: bool) -> Criterion {
    let criterion = Criterion::new(id, format!("criterion {id}"), weight);
    if satisfied {
        criterion.met()
    } else {
        criterion
    }
}

#[test]
fn empty_checklist_is_not_indicated() {
    let result = compute_readiness(&[], &DischargeStatus::tiers());
    assert_eq!(result.percent, 0);
    assert_eq!(result.status, DischargeStatus::NotIndicated);
    assert_eq!(result.total_criteria, 0);
}

#[test]
fn percent_is_weighted_and_rounded() {
    let criteria = vec![weighted("a", 2.0, true), weighted("b", 1.0, false)];
    let result = compute_readiness(&criteria, &DischargeStatus::tiers());
    // 2 / 3 = 66.67
    assert_eq!(result.percent, 67);
    assert_eq!(result.status, DischargeStatus::InPreparation);
    assert_eq!(result.met_criteria, 1);
    assert_eq!(result.unmet, vec!["b".to_string()]);
}

#[test]
fn tier_boundaries_are_inclusive() {
    let tiers = DischargeStatus::tiers();

    let ready = compute_readiness(&[weighted("a", 3.0, true), weighted("b", 1.0, false)], &tiers);
    assert_eq!((ready.percent, ready.status), (75, DischargeStatus::Ready));

    let half = compute_readiness(&[weighted("a", 1.0, true), weighted("b", 1.0, false)], &tiers);
    assert_eq!((half.percent, half.status), (50, DischargeStatus::InPreparation));

    let below = compute_readiness(&[weighted("a", 49.0, true), weighted("b", 51.0, false)], &tiers);
    assert_eq!((below.percent, below.status), (49, DischargeStatus::NotIndicated));
}

#[test]
fn zero_weight_criteria_are_ignored() {
    let tiers = DischargeStatus::tiers();
    let criteria = vec![weighted("a", 1.0, true), weighted("free", 0.0, false)];
    assert_eq!(compute_readiness(&criteria, &tiers).percent, 100);

    let weightless = vec![weighted("a", 0.0, true), weighted("b", 0.0, true)];
    let result = compute_readiness(&weightless, &tiers);
    assert_eq!(result.percent, 0);
    assert_eq!(result.status, DischargeStatus::NotIndicated);
}

#[test]
fn adding_a_satisfied_criterion_never_lowers_readiness() {
    let tiers = DischargeStatus::tiers();
    let mut criteria = vec![weighted("a", 1.0, false), weighted("b", 2.0, true)];
    let mut previous = compute_readiness(&criteria, &tiers).percent;

    for (index, weight) in [0.5, 4.0, 1.0, 10.0].into_iter().enumerate() {
        criteria.push(weighted(&format!("extra-{index}"), weight, true));
        let current = compute_readiness(&criteria, &tiers).percent;
        assert!(current >= previous);
        assert!(current <= 100);
        previous = current;
    }
}

#[test]
fn caller_supplied_tiers_are_honoured() {
    let tiers = ReadinessTiers::new("none", [(90, "full"), (60, "most"), (30, "some")]);
    let criteria = vec![weighted("a", 1.0, true), weighted("b", 1.0, true), weighted("c", 1.0, false)];
    let result = compute_readiness(&criteria, &tiers);
    assert_eq!(result.percent, 67);
    assert_eq!(result.status, "most");
    assert_eq!(tiers.status_for(29), "none");
    assert_eq!(tiers.status_for(100), "full");
}

#[test]
fn discharge_readiness_reads_snapshot_criteria() {
    let complete = discharge_readiness(&complete_snapshot());
    assert_eq!(complete.percent, 100);
    assert_eq!(complete.status, DischargeStatus::Ready);

    let mut snapshot = complete_snapshot();
    snapshot.discharge_criteria[0].satisfied = false;
    let partial = discharge_readiness(&snapshot);
    assert_eq!(partial.percent, 33);
    assert_eq!(partial.status, DischargeStatus::NotIndicated);

    let empty = discharge_readiness(&ClinicalSnapshot::default());
    assert_eq!(empty.status, DischargeStatus::NotIndicated);
}
