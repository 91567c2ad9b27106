//! # Exercises
//!
//! An exercise is a piece of music with markers at playback timestamps; each marker
//! carries the correct chord. A learner's submission is a list of answers, one per
//! marker, which is graded marker by marker and folded into an [`AttemptSummary`].
//!
//! ## Exercise Format (YAML)
//! ```yaml
//! title: Cadences in G
//! key: G
//! mode: major              # or minor-natural
//! base-octave: 3           # optional, default 4
//! function-only-available: false
//! markers:
//!   - time: 0.0
//!     answer: I
//!   - time: 2.5
//!     answer: { degree: V, figure: "7", cadence: perfect }
//! ```
//!
//! ## Submission Format (YAML or JSON)
//! ```yaml
//! answers:
//!   - I
//!   - { degree: V, figure: "65" }
//!   - null                 # unanswered
//! ```
//!
//! ## Validation Rules
//! - At least one marker
//! - Timestamps are finite, non-negative and non-decreasing
//! - Base octave within the playable register
//! - Every correct answer names a degree
//!
//! ## Related Modules
//! - `grading` - Grades each answer
//! - `realize` - Renders each correct chord for playback
//! - `stats` - Aggregates the results

use serde::{Deserialize, Serialize};

use crate::descriptor::ChordDescriptor;
use crate::error::NumeralsError;
use crate::grading::{grade, GradeOptions, GradedOutcome};
use crate::realize::{realize, MAX_OCTAVE, MIN_OCTAVE};
use crate::scale::{Mode, Tonality};
use crate::scoring;
use crate::stats::AttemptSummary;

fn default_key() -> String {
    "C".to_string()
}

fn default_base_octave() -> i8 {
    4
}

/// One timestamped chord in an exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Playback position in seconds
    #[serde(alias = "timestamp")]
    pub time: f64,
    pub answer: ChordDescriptor,
}

/// Exercise definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Exercise {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default = "default_key", alias = "tonic")]
    pub key: String,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "default_base_octave")]
    pub base_octave: i8,
    #[serde(default)]
    pub function_only_available: bool,
    pub markers: Vec<Marker>,
}

impl Exercise {
    pub fn from_yaml(source: &str) -> Result<Self, NumeralsError> {
        serde_yaml::from_str(source).map_err(|e| NumeralsError::ExerciseError(e.to_string()))
    }

    pub fn tonality(&self) -> Tonality {
        Tonality::new(self.key.clone(), self.mode)
    }

    pub fn grade_options(&self) -> GradeOptions {
        GradeOptions {
            function_only_available: self.function_only_available,
        }
    }
}

/// A learner's answers, in marker order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub answers: Vec<Option<ChordDescriptor>>,
}

impl Submission {
    /// Parse a submission. JSON documents are accepted as well as YAML.
    pub fn from_yaml(source: &str) -> Result<Self, NumeralsError> {
        serde_yaml::from_str(source).map_err(|e| NumeralsError::AnswerError(e.to_string()))
    }
}

/// Validate an exercise before grading
pub fn validate_exercise(exercise: &Exercise) -> Result<(), NumeralsError> {
    if exercise.markers.is_empty() {
        return Err(NumeralsError::ExerciseError(
            "exercise has no markers".to_string(),
        ));
    }
    if !(MIN_OCTAVE..=MAX_OCTAVE).contains(&exercise.base_octave) {
        return Err(NumeralsError::ExerciseError(format!(
            "base-octave {} is outside the playable range {}-{}",
            exercise.base_octave, MIN_OCTAVE, MAX_OCTAVE
        )));
    }

    let mut previous: Option<f64> = None;
    for (i, marker) in exercise.markers.iter().enumerate() {
        let number = i + 1;
        if !marker.time.is_finite() || marker.time < 0.0 {
            return Err(NumeralsError::MarkerError {
                marker: number,
                message: format!("timestamp {} must be a non-negative number", marker.time),
            });
        }
        if let Some(prev) = previous {
            if marker.time < prev {
                return Err(NumeralsError::MarkerError {
                    marker: number,
                    message: format!(
                        "timestamp {} is earlier than the previous marker ({})",
                        marker.time, prev
                    ),
                });
            }
        }
        if marker.answer.degree.is_none() {
            return Err(NumeralsError::MarkerError {
                marker: number,
                message: "correct answer has no recognizable degree".to_string(),
            });
        }
        previous = Some(marker.time);
    }
    Ok(())
}

/// Grading result for a single marker
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerResult {
    /// 1-indexed marker number
    pub marker: usize,
    pub time: f64,
    pub expected: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given: Option<String>,
    /// Correct chord as note names, bass first
    pub pitches: Vec<String>,
    pub outcome: GradedOutcome,
    pub xp: u32,
}

/// Graded attempt at a whole exercise
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub results: Vec<MarkerResult>,
    pub summary: AttemptSummary,
}

/// Grade a learner's answers against every marker of an exercise.
///
/// Answers are matched to markers by position. Missing trailing answers are graded
/// as unanswered; answers beyond the last marker are ignored.
///
/// # Examples
/// ```
/// use numerals::exercise::{grade_exercise, Exercise};
/// use numerals::numeral::parse_numeral;
///
/// let exercise = Exercise::from_yaml(
///     "key: C\nmarkers:\n  - { time: 0, answer: I }\n  - { time: 1, answer: V }\n",
/// )
/// .unwrap();
/// let report = grade_exercise(&exercise, &[Some(parse_numeral("I"))]);
///
/// assert_eq!(report.summary.buckets.correct, 1);
/// assert_eq!(report.summary.buckets.incorrect, 1);
/// assert_eq!(report.results[0].pitches, vec!["C4", "E4", "G4"]);
/// ```
pub fn grade_exercise(exercise: &Exercise, answers: &[Option<ChordDescriptor>]) -> ExerciseReport {
    let tonality = exercise.tonality();
    let options = exercise.grade_options();

    tracing::debug!(
        markers = exercise.markers.len(),
        answers = answers.len(),
        key = %exercise.key,
        "grading exercise"
    );
    if answers.len() > exercise.markers.len() {
        tracing::warn!(
            "{} answers for {} markers, ignoring the extra answers",
            answers.len(),
            exercise.markers.len()
        );
    }

    let mut summary = AttemptSummary::new();
    let mut results = Vec::with_capacity(exercise.markers.len());

    for (i, marker) in exercise.markers.iter().enumerate() {
        let answer = answers.get(i).and_then(Option::as_ref);
        let outcome = grade(answer, &marker.answer, None, &options);
        let voicing = realize(&marker.answer, &tonality, exercise.base_octave);

        tracing::trace!(marker = i + 1, level = %outcome.level, "graded marker");
        summary.record(&marker.answer, &outcome);

        results.push(MarkerResult {
            marker: i + 1,
            time: marker.time,
            expected: marker.answer.to_string(),
            given: answer.map(ToString::to_string),
            pitches: voicing.names(),
            outcome,
            xp: scoring::reward(&outcome),
        });
    }

    tracing::info!(
        total_xp = summary.total_xp,
        percentage = summary.percentage,
        "exercise graded"
    );

    ExerciseReport {
        title: exercise.title.clone(),
        results,
        summary,
    }
}
