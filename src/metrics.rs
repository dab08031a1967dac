// Run metrics module
//
// Lightweight counters summarising checks and regeneration runs

use crate::models::{CompatibilityResult, RegenerationResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Run metrics
///
/// Uses atomic operations so a single instance can be shared between threads
/// checking builds in parallel. Logged on shutdown via [`Metrics::log_summary`].
#[derive(Debug)]
pub struct Metrics {
    /// Builds checked without regeneration
    pub builds_checked: AtomicU64,

    /// Checked builds that were compatible
    pub builds_compatible: AtomicU64,

    /// Checks that failed with an internal extraction error
    pub check_failures: AtomicU64,

    /// Regeneration runs performed
    pub regeneration_runs: AtomicU64,

    /// Regeneration runs that ended fully compatible
    pub regenerations_resolved: AtomicU64,

    /// Total regeneration attempts across all runs
    pub regeneration_attempts: AtomicU64,

    /// Total categories replaced across all runs
    pub categories_replaced: AtomicU64,

    /// Start time of the run
    start_time: Instant,
}

impl Metrics {
    /// Create a new Metrics instance
    pub fn new() -> Self {
        Self {
            builds_checked: AtomicU64::new(0),
            builds_compatible: AtomicU64::new(0),
            check_failures: AtomicU64::new(0),
            regeneration_runs: AtomicU64::new(0),
            regenerations_resolved: AtomicU64::new(0),
            regeneration_attempts: AtomicU64::new(0),
            categories_replaced: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record the verdict of a plain check
    pub fn record_check(&self, result: &CompatibilityResult) {
        self.builds_checked.fetch_add(1, Ordering::Relaxed);
        if result.is_compatible {
            self.builds_compatible.fetch_add(1, Ordering::Relaxed);
        }
        if !result.success {
            self.check_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record the outcome of a regeneration run
    pub fn record_regeneration(&self, result: &RegenerationResult) {
        self.regeneration_runs.fetch_add(1, Ordering::Relaxed);
        if result.is_fully_compatible {
            self.regenerations_resolved.fetch_add(1, Ordering::Relaxed);
        }
        if result.error.is_some() {
            self.check_failures.fetch_add(1, Ordering::Relaxed);
        }
        self.regeneration_attempts
            .fetch_add(u64::from(result.regeneration_attempts), Ordering::Relaxed);
        self.categories_replaced
            .fetch_add(result.regenerated_components.len() as u64, Ordering::Relaxed);
    }

    /// Get total uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Average attempts per regeneration run
    pub fn avg_attempts(&self) -> f64 {
        let attempts = self.regeneration_attempts.load(Ordering::Relaxed);
        let runs = self.regeneration_runs.load(Ordering::Relaxed);
        if runs > 0 {
            attempts as f64 / runs as f64
        } else {
            0.0
        }
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Run Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Checks: {} run, {} compatible, {} failed",
            self.builds_checked.load(Ordering::Relaxed),
            self.builds_compatible.load(Ordering::Relaxed),
            self.check_failures.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Regeneration: {} runs, {} resolved, {} categories replaced (avg {:.2} attempts)",
            self.regeneration_runs.load(Ordering::Relaxed),
            self.regenerations_resolved.load(Ordering::Relaxed),
            self.categories_replaced.load(Ordering::Relaxed),
            self.avg_attempts()
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
