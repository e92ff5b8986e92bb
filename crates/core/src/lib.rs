pub mod conflicts;
pub mod error;
pub mod index;
pub mod stats;
pub mod validate;

pub use conflicts::find_conflicts;
pub use error::ScheduleError;
pub use index::{build_index, Index};
pub use stats::compute_statistics;
pub use validate::{validate_size, validate_structure};

pub use types::{ScheduleCell, ScheduleInstance};

/// Grid dimensions and solver tuning the driver needs. Read once from
/// configuration and passed down unchanged; never mutated mid-solve.
#[derive(Clone, Copy, Debug)]
pub struct SolveConfig {
    pub days: usize,
    pub periods: usize,
    pub time_limit_secs: u64,
    pub workers: u32,
}

impl Default for SolveConfig {
    fn default() -> Self {
        SolveConfig {
            days: 6,
            periods: 6,
            time_limit_secs: 30,
            workers: 8,
        }
    }
}

/// Outcome of a solve attempt. Infeasibility is returned as data, never as
/// an error — only malformed input or an unexpected internal failure uses
/// [`ScheduleError`].
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    Optimal {
        cells: Vec<ScheduleCell>,
        solve_time: f64,
    },
    Feasible {
        cells: Vec<ScheduleCell>,
        solve_time: f64,
    },
    Infeasible {
        solve_time: f64,
    },
}

/// The model-building and solving engine. Synchronous and request-scoped:
/// one call builds one model, runs the solver to completion or timeout, and
/// returns. No shared mutable state is held across calls. Callers that
/// invoke this from an async context should run it on a blocking thread
/// (`tokio::task::spawn_blocking`), since a solve can occupy the full time
/// budget.
pub trait Solver: Send + Sync {
    fn solve(
        &self,
        inst: &ScheduleInstance,
        idx: &Index,
        config: &SolveConfig,
    ) -> Result<SolveOutcome, ScheduleError>;
}

/// Runs structural validation and index construction, the two steps every
/// entry point needs before doing anything solver-specific.
pub fn prepare(
    inst: &ScheduleInstance,
    config: &SolveConfig,
) -> Result<Index, ScheduleError> {
    validate::validate_structure(inst)?;
    validate::validate_size(inst, config.days, config.periods)?;
    index::build_index(inst, config.days, config.periods)
}
