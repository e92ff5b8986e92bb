use thiserror::Error;

/// The three outcomes the core ever returns. Solver infeasibility is data,
/// not an exception; only malformed input and unexpected internal failure
/// are represented as errors.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("bad input: {which}: {why}")]
    BadInput { which: String, why: String },

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ScheduleError {
    pub fn bad_input(which: impl Into<String>, why: impl Into<String>) -> Self {
        ScheduleError::BadInput {
            which: which.into(),
            why: why.into(),
        }
    }
}
