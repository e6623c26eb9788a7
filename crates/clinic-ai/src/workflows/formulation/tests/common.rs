use chrono::{NaiveDate, TimeZone, Utc};

use crate::workflows::formulation::{
    AssessmentRecord, ClinicalSnapshot, Criterion, EvidenceLinks, ExternalSources,
    FormulationRecord, Intervention, MechanismMap, MechanismQuadrant, NotApplicable, Problem,
    ProcessNetwork, ReassessmentSchedule, SessionRecord, SharedUnderstanding, TreatmentGoal,
    VersionStamp,
};

pub(super) fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).expect("valid date")
}

pub(super) fn stamp(sequence: u32) -> VersionStamp {
    VersionStamp {
        id: format!("rev-{sequence:03}"),
        recorded_at: Utc
            .with_ymd_and_hms(2025, 4, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp")
            + chrono::Duration::minutes(i64::from(sequence)),
    }
}

pub(super) fn quadrant(item: &str) -> MechanismQuadrant {
    MechanismQuadrant {
        items: vec![item.to_string()],
        not_applicable: NotApplicable::default(),
    }
}

pub(super) fn not_applicable_quadrant(reason: &str) -> MechanismQuadrant {
    MechanismQuadrant {
        items: Vec::new(),
        not_applicable: NotApplicable::with_reason(reason),
    }
}

pub(super) fn session(id: &str, day: u32) -> SessionRecord {
    SessionRecord {
        id: id.to_string(),
        date: Some(date(2, day)),
        process_network: ProcessNetwork::default(),
    }
}

pub(super) fn assessment(instrument: &str, day: u32, total: f64) -> AssessmentRecord {
    AssessmentRecord {
        instrument: instrument.to_string(),
        administered_on: Some(date(1, day)),
        total_score: Some(total),
    }
}

pub(super) fn goal(id: &str, progress: f64) -> TreatmentGoal {
    TreatmentGoal {
        id: id.to_string(),
        description: format!("goal {id}"),
        progress,
    }
}

pub(super) fn formulation_narrative() -> String {
    "Low mood is maintained by withdrawal from valued activity, which removes positive \
     reinforcement and confirms the belief of being a burden to others at home and at work."
        .to_string()
}

/// A record where every phase scores 100.
pub(super) fn complete_snapshot() -> ClinicalSnapshot {
    ClinicalSnapshot {
        anamnesis: "Referred by GP after six months of low mood and withdrawal.".to_string(),
        external_sources: ExternalSources {
            sources: vec!["GP referral letter".to_string()],
            not_applicable: NotApplicable::default(),
        },
        assessments: vec![assessment("PHQ-9", 8, 19.0), assessment("PHQ-9", 29, 12.0)],
        reassessment_schedule: ReassessmentSchedule {
            instruments: vec!["PHQ-9".to_string()],
            frequency: Some("every 4 sessions".to_string()),
            not_applicable: NotApplicable::default(),
        },
        problems: vec![
            Problem::new("p1", "Low mood", 7)
                .with_priority_rank(1)
                .as_focus(),
            Problem::new("p2", "Social withdrawal", 6).with_priority_rank(2),
        ],
        shared_understanding: SharedUnderstanding {
            reviewed: true,
            agreement: Some("Patient agrees mood and withdrawal come first".to_string()),
        },
        mechanisms: MechanismMap {
            precipitants: quadrant("job loss"),
            origins: quadrant("critical parenting"),
            resources: quadrant("supportive sibling"),
            obstacles: quadrant("shift work"),
            maintaining_processes: vec!["behavioural avoidance".to_string()],
            core_beliefs: vec!["I am a burden".to_string()],
            observable_patterns: Vec::new(),
            evidence: EvidenceLinks {
                sessions: true,
                ..EvidenceLinks::default()
            },
        },
        formulation: FormulationRecord {
            narrative: formulation_narrative(),
            diagnosis: Some("F32.1 Moderate depressive episode".to_string()),
            diagnosis_not_applicable: NotApplicable::default(),
        },
        goals: vec![goal("g1", 85.0), goal("g2", 90.0)],
        interventions: vec![Intervention {
            id: "i1".to_string(),
            name: "Behavioural activation".to_string(),
            goal_id: Some("g1".to_string()),
        }],
        sessions: vec![session("s1", 3), session("s2", 10), session("s3", 17)],
        discharge_criteria: vec![
            Criterion::new("dc1", "PHQ-9 below 10 on two readings", 2.0).met_on(date(3, 3)),
            Criterion::new("dc2", "Relapse plan written", 1.0).met_on(date(3, 10)),
        ],
        attainment_goals: Vec::new(),
    }
}
