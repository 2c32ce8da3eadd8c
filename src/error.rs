//! Error types for the Points Allocation Engine.
//!
//! The calculators themselves are total functions and never fail. Errors
//! only arise at mutation and assembly boundaries (weights, month keys,
//! daily logs, production inputs) and while loading configuration.

use thiserror::Error;

/// The main error type for the Points Allocation Engine.
///
/// # Example
///
/// ```
/// use points_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/weaving.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/weaving.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value broke one of its invariants.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// A year/month pair does not name a calendar month.
    #[error("Invalid month: {year}-{month}")]
    InvalidMonth {
        /// The requested year.
        year: i32,
        /// The requested month number.
        month: u32,
    },

    /// A month key string was not of the form `YYYY-MM`.
    #[error("Invalid month key '{key}': expected YYYY-MM")]
    InvalidMonthKey {
        /// The rejected key.
        key: String,
    },

    /// A blend weight was outside 0..=100 or the pair did not sum to 100.
    #[error("Invalid weight '{field}': {value}")]
    InvalidWeight {
        /// The weight field that was rejected.
        field: String,
        /// The rejected value.
        value: u32,
    },

    /// A daily attendance entry was rejected.
    #[error("Invalid daily log entry for day {day}: {message}")]
    InvalidDailyLog {
        /// The day-of-month of the entry.
        day: u32,
        /// A description of the problem.
        message: String,
    },

    /// Weaving production inputs were out of their declared domain.
    #[error("Invalid production data field '{field}': {message}")]
    InvalidProductionData {
        /// The offending field.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// No salary record exists for the employee in the month.
    #[error("No salary record for employee '{employee_id}' in {month}")]
    RecordNotFound {
        /// The employee that was looked up.
        employee_id: String,
        /// The month key that was searched.
        month: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
