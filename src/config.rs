use std::env;
use std::path::PathBuf;

/// Log filter, e.g. `debug` or `meal_planner=trace`. Falls back to `RUST_LOG`.
pub const LOG_ENV_VAR: &str = "MEAL_PLANNER_LOG";
/// Default profile JSON path when `--profile` is not given.
pub const PROFILE_ENV_VAR: &str = "MEAL_PLANNER_PROFILE";
/// Default meal plan CSV path when `--plan` is not given.
pub const PLAN_ENV_VAR: &str = "MEAL_PLANNER_PLAN";

const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_PROFILE_PATH: &str = "profile.json";
const DEFAULT_PLAN_PATH: &str = "meal_plan.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub log_filter: String,
    pub profile_path: PathBuf,
    pub plan_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            profile_path: PathBuf::from(DEFAULT_PROFILE_PATH),
            plan_path: PathBuf::from(DEFAULT_PLAN_PATH),
        }
    }
}

impl AppConfig {
    /// Reads the process environment, after loading a `.env` file if one exists.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            log_filter: lookup(LOG_ENV_VAR)
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_filter),
            profile_path: lookup(PROFILE_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.profile_path),
            plan_path: lookup(PLAN_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.plan_path),
        }
    }

    /// Command line paths take precedence over the environment.
    pub fn with_overrides(mut self, profile: Option<PathBuf>, plan: Option<PathBuf>) -> Self {
        if let Some(profile) = profile {
            self.profile_path = profile;
        }
        if let Some(plan) = plan {
            self.plan_path = plan;
        }
        self
    }
}
