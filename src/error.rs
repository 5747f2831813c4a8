//! Error types for building holiday configurations.

/// Errors raised while building or loading holiday rules.
///
/// Classifying a date never fails; only configuration and argument parsing do.
#[derive(Debug, thiserror::Error)]
pub enum HolidayError {
    /// A fixed holiday entry that is not a zero-padded, existing `MM-DD`.
    #[error("invalid fixed holiday entry: {entry:?} (expected MM-DD)")]
    InvalidMonthDay { entry: String },

    /// A lunar holiday record lasting zero days.
    #[error("holiday {name:?} must last at least one day")]
    InvalidDuration { name: String },

    /// A lunar anchor date that does not exist.
    #[error("invalid anchor date for holiday {name:?}: {date}")]
    InvalidAnchorDate { name: String, date: String },

    /// A lunar anchor observed outside the base year it is projected from.
    #[error("holiday {name:?} is anchored in {year}, expected {expected}")]
    AnchorYear { name: String, year: i32, expected: i32 },

    #[error("unknown region: {name:?}")]
    UnknownRegion { name: String },

    #[error("invalid year: {arg:?}")]
    InvalidYear { arg: String },

    #[error("could not parse holiday configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("could not read holiday configuration from the environment: {0}")]
    EnvVar(#[from] std::env::VarError),
}
