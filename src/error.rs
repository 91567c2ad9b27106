//! # Error Types
//!
//! Errors only exist at the boundary where exercises and learner submissions are
//! loaded from text. Chord realization, grading and scoring are total functions and
//! never return errors; malformed-but-structurally-valid chord fields fall back to
//! defaults instead.
//!
//! ## Error Types
//! - `ExerciseError` - Exercise document could not be read (bad YAML, wrong field types)
//! - `AnswerError` - Learner submission could not be read
//! - `MarkerError` - Exercise is readable but a marker is semantically invalid
//!
//! ## Usage
//! ```rust
//! use numerals::{Exercise, NumeralsError};
//!
//! match Exercise::from_yaml("markers: 12") {
//!     Ok(_) => unreachable!(),
//!     Err(NumeralsError::ExerciseError(message)) => eprintln!("{}", message),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NumeralsError {
    /// The exercise document is not valid YAML or has fields of the wrong type.
    ///
    /// # Example
    /// ```
    /// # use numerals::NumeralsError;
    /// let err = NumeralsError::ExerciseError("markers: invalid type".to_string());
    /// assert_eq!(err.to_string(), "Invalid exercise: markers: invalid type");
    /// ```
    #[error("Invalid exercise: {0}")]
    ExerciseError(String),

    /// The learner submission is not valid YAML/JSON or has fields of the wrong type.
    ///
    /// # Example
    /// ```
    /// # use numerals::NumeralsError;
    /// let err = NumeralsError::AnswerError("expected a sequence".to_string());
    /// assert_eq!(err.to_string(), "Invalid answers: expected a sequence");
    /// ```
    #[error("Invalid answers: {0}")]
    AnswerError(String),

    /// Semantic validation error for a single marker (1-indexed).
    ///
    /// # Example
    /// ```
    /// # use numerals::NumeralsError;
    /// let err = NumeralsError::MarkerError {
    ///     marker: 3,
    ///     message: "timestamp 1.5 is earlier than the previous marker (2)".to_string(),
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Marker 3: timestamp 1.5 is earlier than the previous marker (2)"
    /// );
    /// ```
    #[error("Marker {marker}: {message}")]
    MarkerError { marker: usize, message: String },
}
