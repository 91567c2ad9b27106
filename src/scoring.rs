//! Scoring policy
//!
//! Experience-point rewards and statistics buckets for graded answers.

use serde::{Deserialize, Serialize};

use crate::grading::{GradedOutcome, Level};

/// Statistics bucket of a graded answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Correct,
    Partial,
    Incorrect,
}

/// Experience points for a level: 1 → 10, 2 → 6, 0.5 → 5, 3 → 4, 0 → 0
pub fn experience_points(level: Level) -> u32 {
    match level {
        Level::Exact => 10,
        Level::RightRoot => 6,
        Level::FunctionOnly => 5,
        Level::RightFunction => 4,
        Level::Incorrect => 0,
    }
}

/// Experience points for a raw level value as stored in attempt records.
/// Unknown values earn nothing.
pub fn experience_points_for_value(value: f64) -> u32 {
    Level::from_value(value).map_or(0, experience_points)
}

/// Level 0.5 counts as partial, alongside 2 and 3.
pub fn bucket(level: Level) -> Bucket {
    match level {
        Level::Exact => Bucket::Correct,
        Level::RightRoot | Level::RightFunction | Level::FunctionOnly => Bucket::Partial,
        Level::Incorrect => Bucket::Incorrect,
    }
}

pub fn bucket_for_value(value: f64) -> Bucket {
    Level::from_value(value).map_or(Bucket::Incorrect, bucket)
}

/// Total experience points for an outcome, cadence bonus included
pub fn reward(outcome: &GradedOutcome) -> u32 {
    experience_points(outcome.level) + outcome.cadence_bonus
}
