use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("invalid configuration: {field}: {reason}")]
    Config { field: &'static str, reason: String },

    #[error("invalid time string '{input}': {reason}")]
    TimeFormat { input: String, reason: String },

    #[error("invalid minute count {0}: must be non-negative")]
    NegativeMinutes(i64),
}

pub type SimResult<T> = Result<T, SimError>;
