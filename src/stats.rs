//! Attempt statistics
//!
//! Folds graded answers into bucket counts, experience points, an average score and
//! per-degree / per-cadence breakdowns keyed by the correct chord.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::descriptor::ChordDescriptor;
use crate::grading::GradedOutcome;
use crate::scoring::{self, Bucket};

/// Counts of answers per statistics bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketCounts {
    pub correct: u32,
    pub partial: u32,
    pub incorrect: u32,
}

impl BucketCounts {
    pub fn add(&mut self, bucket: Bucket) {
        match bucket {
            Bucket::Correct => self.correct += 1,
            Bucket::Partial => self.partial += 1,
            Bucket::Incorrect => self.incorrect += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.correct + self.partial + self.incorrect
    }
}

/// Running totals for one attempt at an exercise
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptSummary {
    pub answered: u32,
    pub buckets: BucketCounts,
    /// Level rewards plus cadence bonuses
    pub total_xp: u32,
    pub cadence_bonus_xp: u32,
    /// Mean score as a percentage (0-100)
    pub percentage: f64,
    pub by_degree: BTreeMap<String, BucketCounts>,
    pub by_cadence: BTreeMap<String, BucketCounts>,
    #[serde(skip)]
    score_total: f64,
}

impl AttemptSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one graded answer. `correct` is the marker's correct chord.
    pub fn record(&mut self, correct: &ChordDescriptor, outcome: &GradedOutcome) {
        let bucket = scoring::bucket(outcome.level);

        self.answered += 1;
        self.buckets.add(bucket);
        self.total_xp += scoring::reward(outcome);
        self.cadence_bonus_xp += outcome.cadence_bonus;
        self.score_total += outcome.score;
        self.percentage = self.score_total / f64::from(self.answered) * 100.0;

        self.by_degree
            .entry(correct.root_label())
            .or_default()
            .add(bucket);
        if let Some(cadence) = correct.cadence {
            self.by_cadence
                .entry(cadence.as_str().to_string())
                .or_default()
                .add(bucket);
        }
    }

    pub fn from_outcomes<'a, I>(graded: I) -> Self
    where
        I: IntoIterator<Item = (&'a ChordDescriptor, &'a GradedOutcome)>,
    {
        graded
            .into_iter()
            .fold(Self::new(), |mut summary, (correct, outcome)| {
                summary.record(correct, outcome);
                summary
            })
    }
}
