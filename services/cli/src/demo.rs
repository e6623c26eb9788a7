use crate::report::{render_progress, ProgressReport};
use chrono::{Local, NaiveDate, Utc};
use clap::Args;
use clinic_ai::config::ReportFormat;
use clinic_ai::error::AppError;
use clinic_ai::workflows::formulation::{
    append_history_if_material, record_goal_evaluation, AssessmentRecord, AttainmentGoal,
    ClinicalSnapshot, Criterion, ExternalSources, FormulationRecord, LevelDescriptions,
    MechanismMap, MechanismQuadrant, NarrativeDraft, NotApplicable, Problem, SessionRecord,
    TreatmentGoal, VersionStamp,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Attainment level (-2..=2) to record for the sample goal before reporting
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) goal_level: Option<i64>,
    /// Output format (text or json); overrides APP_REPORT_FORMAT
    #[arg(long, value_parser = crate::cli::parse_format)]
    pub(crate) format: Option<ReportFormat>,
}

pub(crate) fn run_demo(args: DemoArgs, default_format: ReportFormat) -> Result<(), AppError> {
    let DemoArgs { goal_level, format } = args;
    let format = format.unwrap_or(default_format);
    let today = Local::now().date_naive();

    let mut snapshot = sample_snapshot();
    if let Some(level) = goal_level {
        apply_goal_level(&mut snapshot, level, today)?;
    }

    render_progress(&ProgressReport::build(&snapshot), format)?;

    if format == ReportFormat::Text {
        print_narrative_revision(&snapshot);
    }

    Ok(())
}

/// Records `level` against the first attainment goal, if the record has one.
fn apply_goal_level(
    snapshot: &mut ClinicalSnapshot,
    level: i64,
    date: NaiveDate,
) -> Result<(), AppError> {
    if let Some(goal) = snapshot.attainment_goals.first_mut() {
        *goal = record_goal_evaluation(goal, level, "recorded from demo", date)?;
    }
    Ok(())
}

fn print_narrative_revision(snapshot: &ClinicalSnapshot) {
    let previous = NarrativeDraft::new(
        snapshot.formulation.narrative.clone(),
        snapshot.formulation.diagnosis.as_deref(),
    );
    let next = NarrativeDraft::new(
        format!(
            "{} Panic cues generalised to supermarkets after the second session.",
            previous.narrative
        ),
        Some("F41.0 Panic disorder"),
    );
    let stamp = VersionStamp {
        id: "demo-rev-1".to_string(),
        recorded_at: Utc::now(),
    };

    let history = append_history_if_material(&[], &previous, &next, stamp, None);
    println!("\nNarrative revision");
    match history.first() {
        Some(entry) => println!(
            "- versioned as {} ({})",
            entry.change_reason,
            entry.recorded_at.format("%Y-%m-%d %H:%M")
        ),
        None => println!("- edit too small to version"),
    }
}

fn sample_date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).unwrap_or_default()
}

/// Record midway through treatment, with one duplicated problem rank.
pub(crate) fn sample_snapshot() -> ClinicalSnapshot {
    let quadrant = |item: &str| MechanismQuadrant {
        items: vec![item.to_string()],
        not_applicable: NotApplicable::default(),
    };

    ClinicalSnapshot {
        anamnesis: "Recurrent panic attacks on public transport since spring; avoids the underground."
            .to_string(),
        external_sources: ExternalSources {
            sources: Vec::new(),
            not_applicable: NotApplicable::with_reason("Self-referral, no prior treatment records"),
        },
        assessments: vec![AssessmentRecord {
            instrument: "PDSS".to_string(),
            administered_on: Some(sample_date(1, 14)),
            total_score: Some(16.0),
        }],
        problems: vec![
            Problem::new("p1", "Panic attacks", 8)
                .with_functional_impact(7)
                .with_priority_rank(1)
                .as_focus(),
            Problem::new("p2", "Travel avoidance", 6).with_priority_rank(1),
        ],
        mechanisms: MechanismMap {
            precipitants: quadrant("work relocation"),
            origins: quadrant("anxious parent modelling"),
            resources: quadrant("supportive partner"),
            obstacles: quadrant("long commute"),
            maintaining_processes: vec!["safety behaviours".to_string()],
            core_beliefs: vec!["I will lose control".to_string()],
            ..MechanismMap::default()
        },
        formulation: FormulationRecord {
            narrative: "Catastrophic misinterpretation of bodily sensations drives panic; \
                        avoidance and safety behaviours prevent disconfirmation."
                .to_string(),
            diagnosis: Some("F41.0 Panic disorder".to_string()),
            diagnosis_not_applicable: NotApplicable::default(),
        },
        goals: vec![TreatmentGoal {
            id: "g1".to_string(),
            description: "Commute by train three days a week".to_string(),
            progress: 35.0,
        }],
        sessions: vec![SessionRecord {
            id: "s1".to_string(),
            date: Some(sample_date(1, 21)),
            ..SessionRecord::default()
        }],
        discharge_criteria: vec![
            Criterion::new("dc1", "No panic attacks for four weeks", 2.0),
            Criterion::new("dc2", "Relapse prevention plan written", 1.0),
        ],
        attainment_goals: vec![AttainmentGoal::new("gas1", "Travel by train unaccompanied")
            .with_levels(LevelDescriptions {
                much_less_than_expected: "Does not travel by train".to_string(),
                less_than_expected: "Travels one stop accompanied".to_string(),
                expected: "Travels three stops unaccompanied".to_string(),
                better_than_expected: "Commutes twice a week".to_string(),
                much_better_than_expected: "Commutes daily".to_string(),
            })],
        ..ClinicalSnapshot::default()
    }
}
