use sched_core::SolveConfig;

/// Process configuration, read once at startup from the environment into an
/// owned struct. Handlers never read `std::env` directly.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub solve: SolveConfig,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> Self {
        AppConfig {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_or("PORT", 8000u16),
            debug: env_or("DEBUG", false),
            solve: SolveConfig {
                days: env_or("SCHED_DAYS", 6usize),
                periods: env_or("SCHED_PERIODS", 6usize),
                time_limit_secs: env_or("SCHED_TIME_LIMIT", 30u64),
                workers: env_or("SCHED_WORKERS", 8u32),
            },
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_grid() {
        let cfg = AppConfig {
            host: "0.0.0.0".into(),
            port: 8000,
            debug: false,
            solve: SolveConfig::default(),
        };
        assert_eq!(cfg.solve.days, 6);
        assert_eq!(cfg.solve.periods, 6);
        assert_eq!(cfg.solve.time_limit_secs, 30);
        assert_eq!(cfg.solve.workers, 8);
    }
}
