use super::criteria::Criterion;
use super::readiness::{compute_readiness, ReadinessResult, ReadinessTiers};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Goal Attainment Scaling level, -2 through +2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum GasLevel {
    MuchLessThanExpected,
    LessThanExpected,
    #[default]
    Expected,
    BetterThanExpected,
    MuchBetterThanExpected,
}

impl GasLevel {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::MuchLessThanExpected,
            Self::LessThanExpected,
            Self::Expected,
            Self::BetterThanExpected,
            Self::MuchBetterThanExpected,
        ]
    }

    pub const fn value(self) -> i64 {
        match self {
            Self::MuchLessThanExpected => -2,
            Self::LessThanExpected => -1,
            Self::Expected => 0,
            Self::BetterThanExpected => 1,
            Self::MuchBetterThanExpected => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::MuchLessThanExpected => "Much less than expected",
            Self::LessThanExpected => "Less than expected",
            Self::Expected => "Expected outcome",
            Self::BetterThanExpected => "Better than expected",
            Self::MuchBetterThanExpected => "Much better than expected",
        }
    }
}

/// Raised when a level outside -2..=2 is recorded. Levels are never clamped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GoalLevelError {
    #[error("goal attainment level {0} is outside the -2..=2 scale")]
    OutOfRange(i64),
}

impl TryFrom<i64> for GasLevel {
    type Error = GoalLevelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -2 => Ok(Self::MuchLessThanExpected),
            -1 => Ok(Self::LessThanExpected),
            0 => Ok(Self::Expected),
            1 => Ok(Self::BetterThanExpected),
            2 => Ok(Self::MuchBetterThanExpected),
            other => Err(GoalLevelError::OutOfRange(other)),
        }
    }
}

impl From<GasLevel> for i64 {
    fn from(level: GasLevel) -> Self {
        level.value()
    }
}

/// Text describing what each level looks like for one goal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelDescriptions {
    pub much_less_than_expected: String,
    pub less_than_expected: String,
    pub expected: String,
    pub better_than_expected: String,
    pub much_better_than_expected: String,
}

impl LevelDescriptions {
    pub fn describe(&self, level: GasLevel) -> &str {
        match level {
            GasLevel::MuchLessThanExpected => &self.much_less_than_expected,
            GasLevel::LessThanExpected => &self.less_than_expected,
            GasLevel::Expected => &self.expected,
            GasLevel::BetterThanExpected => &self.better_than_expected,
            GasLevel::MuchBetterThanExpected => &self.much_better_than_expected,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalEvaluation {
    pub date: Option<NaiveDate>,
    pub level: GasLevel,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    Active,
    Achieved,
    Discontinued,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttainmentGoal {
    pub id: String,
    pub title: String,
    pub levels: LevelDescriptions,
    pub weight: f64,
    pub status: GoalStatus,
    /// Append-only, oldest first.
    pub evaluations: Vec<GoalEvaluation>,
}

impl Default for AttainmentGoal {
    fn default() -> Self {
        Self::new(String::new(), String::new())
    }
}

impl AttainmentGoal {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            levels: LevelDescriptions::default(),
            weight: 1.0,
            status: GoalStatus::Active,
            evaluations: Vec::new(),
        }
    }

    pub fn with_levels(mut self, levels: LevelDescriptions) -> Self {
        self.levels = levels;
        self
    }

    /// Most recently recorded level, or the expected outcome when none is recorded.
    pub fn current_level(&self) -> GasLevel {
        self.evaluations
            .last()
            .map(|evaluation| evaluation.level)
            .unwrap_or_default()
    }

    pub fn is_active(&self) -> bool {
        self.status == GoalStatus::Active
    }
}

/// Returns a copy of `goal` with one more evaluation appended.
pub fn record_goal_evaluation(
    goal: &AttainmentGoal,
    level: i64,
    notes: impl Into<String>,
    date: NaiveDate,
) -> Result<AttainmentGoal, GoalLevelError> {
    let level = GasLevel::try_from(level)?;

    let mut updated = goal.clone();
    updated.evaluations.push(GoalEvaluation {
        date: Some(date),
        level,
        notes: notes.into(),
    });
    Ok(updated)
}

/// Mean current level across active goals; `None` when no goal is active.
pub fn mean_attainment_level(goals: &[AttainmentGoal]) -> Option<f64> {
    let levels: Vec<i64> = goals
        .iter()
        .filter(|goal| goal.is_active())
        .map(|goal| goal.current_level().value())
        .collect();

    if levels.is_empty() {
        return None;
    }

    Some(levels.iter().sum::<i64>() as f64 / levels.len() as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttainmentStatus {
    OffTrack,
    Stalled,
    Progressing,
    OnTrack,
}

impl AttainmentStatus {
    pub fn tiers() -> ReadinessTiers<Self> {
        ReadinessTiers::new(
            Self::OffTrack,
            [(75, Self::OnTrack), (50, Self::Progressing), (25, Self::Stalled)],
        )
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::OffTrack => "Off track",
            Self::Stalled => "Stalled",
            Self::Progressing => "Progressing",
            Self::OnTrack => "On track",
        }
    }
}

/// Weighted share of active goals currently at or above the expected outcome.
pub fn attainment_readiness(goals: &[AttainmentGoal]) -> ReadinessResult<AttainmentStatus> {
    let criteria: Vec<Criterion> = goals
        .iter()
        .filter(|goal| goal.is_active())
        .map(|goal| {
            let criterion = Criterion::new(goal.id.clone(), goal.title.clone(), goal.weight)
                .in_category("goal_attainment");
            if goal.current_level() >= GasLevel::Expected {
                match goal.evaluations.last().and_then(|evaluation| evaluation.date) {
                    Some(date) => criterion.met_on(date),
                    None => criterion.met(),
                }
            } else {
                criterion
            }
        })
        .collect();

    compute_readiness(&criteria, &AttainmentStatus::tiers())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).expect("valid date")
    }

    #[test]
    fn unevaluated_goal_sits_at_baseline() {
        let goal = AttainmentGoal::new("g1", "Return to work part-time");
        assert_eq!(goal.current_level(), GasLevel::Expected);
        assert_eq!(goal.current_level().value(), 0);
        assert!(goal.evaluations.is_empty());
    }

    #[test]
    fn recording_appends_and_updates_current_level() {
        let goal = AttainmentGoal::new("g1", "Sleep six hours");
        let goal = record_goal_evaluation(&goal, -1, "still waking at 4am", date(3))
            .expect("level in range");
        let goal = record_goal_evaluation(&goal, 2, "sleeping through", date(17))
            .expect("level in range");

        assert_eq!(goal.current_level(), GasLevel::MuchBetterThanExpected);
        let levels: Vec<GasLevel> = goal.evaluations.iter().map(|entry| entry.level).collect();
        assert_eq!(
            levels,
            vec![GasLevel::LessThanExpected, GasLevel::MuchBetterThanExpected]
        );
    }

    #[test]
    fn out_of_range_levels_are_rejected_not_clamped() {
        let goal = AttainmentGoal::new("g1", "Attend group weekly");
        let err = record_goal_evaluation(&goal, 3, "", date(1)).expect_err("3 is off the scale");
        assert_eq!(err, GoalLevelError::OutOfRange(3));
        assert!(record_goal_evaluation(&goal, -3, "", date(1)).is_err());
        assert!(goal.evaluations.is_empty());
    }

    #[test]
    fn mean_level_only_counts_active_goals() {
        let active = record_goal_evaluation(&AttainmentGoal::new("a", "a"), 2, "", date(1))
            .expect("level in range");
        let baseline = AttainmentGoal::new("b", "b");
        let mut closed = record_goal_evaluation(&AttainmentGoal::new("c", "c"), -2, "", date(1))
            .expect("level in range");
        closed.status = GoalStatus::Discontinued;

        assert_eq!(mean_attainment_level(&[active, baseline, closed.clone()]), Some(1.0));
        assert_eq!(mean_attainment_level(&[closed]), None);
        assert_eq!(mean_attainment_level(&[]), None);
    }

    #[test]
    fn attainment_readiness_uses_goal_weights() {
        let mut heavy = record_goal_evaluation(&AttainmentGoal::new("heavy", "h"), 1, "", date(2))
            .expect("level in range");
        heavy.weight = 3.0;
        let light = record_goal_evaluation(&AttainmentGoal::new("light", "l"), -1, "", date(2))
            .expect("level in range");

        let result = attainment_readiness(&[heavy, light]);
        assert_eq!(result.percent, 75);
        assert_eq!(result.status, AttainmentStatus::OnTrack);
        assert_eq!(result.unmet, vec!["light".to_string()]);
    }

    #[test]
    fn levels_deserialize_from_integers() {
        let evaluation: GoalEvaluation =
            serde_json::from_str(r#"{"date":"2025-03-01","level":-2}"#).expect("valid json");
        assert_eq!(evaluation.level, GasLevel::MuchLessThanExpected);
        assert!(serde_json::from_str::<GoalEvaluation>(r#"{"date":"2025-03-01","level":5}"#)
            .is_err());
    }

    #[test]
    fn sparse_goal_records_fall_back_to_defaults() {
        let goal: AttainmentGoal =
            serde_json::from_str(r#"{"id":"g1","evaluations":[{"level":1}]}"#).expect("valid json");
        assert!(goal.title.is_empty());
        assert_eq!(goal.weight, 1.0);
        assert!(goal.is_active());
        assert_eq!(goal.evaluations[0].date, None);
        assert_eq!(goal.current_level(), GasLevel::BetterThanExpected);

        let result = attainment_readiness(&[goal]);
        assert_eq!(result.percent, 100);
        assert_eq!(result.status, AttainmentStatus::OnTrack);
    }
}
