// BuildCheck - PC build compatibility checker
//
// This is the library crate containing the compatibility rules, the
// auto-regeneration loop and their data structures.
// The binary crate (main.rs) provides the command-line entry point.

use std::sync::LazyLock;

pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{
    CompatibilityIssue, CompatibilityResult, Component, ComponentCatalog, ComponentCategory,
    RegenerationResult, RegenerationSettings,
};
pub use services::{CompatibilityChecker, RandomPicker, RegenerationService};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

static DEFAULT_CHECKER: LazyLock<CompatibilityChecker> = LazyLock::new(CompatibilityChecker::new);

static DEFAULT_REGENERATOR: LazyLock<RegenerationService> =
    LazyLock::new(RegenerationService::default);

/// Check a component list with the default rule set.
///
/// Pure and infallible; see [`CompatibilityChecker::check`].
pub fn check_compatibility(components: &[Component]) -> CompatibilityResult {
    DEFAULT_CHECKER.check(components)
}

/// Repair a build against the built-in catalog, picking replacements at random.
///
/// Use [`RegenerationService::regenerate`] with an explicit picker for
/// reproducible results or a custom catalog.
pub fn auto_regenerate_components(components: &[Component]) -> RegenerationResult {
    DEFAULT_REGENERATOR.regenerate(components, &mut RandomPicker::from_entropy())
}
