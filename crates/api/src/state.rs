use std::sync::Arc;

use sched_core::Solver;
use sched_solver::IlpSolver;

use crate::config::AppConfig;

/// Process-level service object, constructed once at startup with owned
/// configuration. Per-request handlers hold no mutable state beyond this
/// shared, immutable `AppState` (it derives `Clone` cheaply: the solver is
/// behind an `Arc` and the config is a small owned struct).
#[derive(Clone)]
pub struct AppState {
    pub solver: Arc<dyn Solver>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            solver: Arc::new(IlpSolver::new()),
            config,
        }
    }
}
