//! Runtime configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use combat_core::BehaviorConfig;

/// Settings for one simulation run.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Overrides `BehaviorConfig::max_update_range` when set.
    pub max_update_range: Option<u32>,
    /// Base seed for every deterministic roll.
    pub seed: u64,
    /// Number of frames to simulate.
    pub frames: u64,
    /// Scenario name, resolved to `scenarios/{name}.ron` in the content dir.
    pub scenario: String,
    /// Content directory; `None` uses the bundled data.
    pub content_dir: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_update_range: None,
            seed: 0,
            frames: 600,
            scenario: "skirmish".to_string(),
            content_dir: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `COMBAT_MAX_UPDATE_RANGE`
    /// - `COMBAT_SEED`
    /// - `COMBAT_FRAMES`
    /// - `COMBAT_SCENARIO`
    /// - `COMBAT_CONTENT_DIR`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(range) = read_env::<u32>("COMBAT_MAX_UPDATE_RANGE") {
            config.max_update_range = Some(range);
        }

        if let Some(seed) = read_env::<u64>("COMBAT_SEED") {
            config.seed = seed;
        }

        if let Some(frames) = read_env::<u64>("COMBAT_FRAMES") {
            config.frames = frames.max(1);
        }

        if let Some(scenario) = read_env::<String>("COMBAT_SCENARIO") {
            config.scenario = scenario;
        }

        if let Some(dir) = read_env::<PathBuf>("COMBAT_CONTENT_DIR") {
            config.content_dir = Some(dir);
        }

        config
    }

    /// Applies the environment overrides on top of a loaded behavior config.
    pub fn apply(&self, behavior: BehaviorConfig) -> BehaviorConfig {
        match self.max_update_range {
            Some(range) => behavior.with_max_update_range(range),
            None => behavior,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
