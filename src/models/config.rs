use serde::{Deserialize, Serialize};

/// Default number of regeneration rounds before giving up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// How the regeneration loop chooses a replacement among catalog candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickStrategy {
    /// Uniformly random candidate, optionally seeded
    #[default]
    Random,
    /// First candidate whose name differs from the current component
    FirstDifferent,
}

/// Regeneration settings from `BuildCheck Settings.yaml`.
///
/// Every field has a default so a partial (or missing) file is valid.
/// Environment variables prefixed `BUILDCHECK_` override file values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegenerationSettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default)]
    pub strategy: PickStrategy,

    /// Fixed seed for the random strategy; entropy-seeded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    #[serde(default)]
    pub debug_mode: bool,
}

impl Default for RegenerationSettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            strategy: PickStrategy::default(),
            seed: None,
            debug_mode: false,
        }
    }
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}
