//! Auto-regeneration: repair an incompatible build by substituting components.
//!
//! The loop re-runs the [`CompatibilityChecker`] after each round of
//! substitutions. Every category named by a blocking issue is replaced with a
//! candidate from the [`ComponentCatalog`], chosen by a [`CandidatePicker`].
//! The picker does not reason about the other side of a conflict, so a round
//! may swap a CPU for another CPU with the same wrong socket. Convergence is
//! therefore probabilistic and bounded by `max_attempts`; an incompatible
//! final build is a normal outcome, not an error.

use super::compatibility::CompatibilityChecker;
use crate::models::{
    Component, ComponentCatalog, ComponentCategory, DEFAULT_MAX_ATTEMPTS, PickStrategy,
    RegenerationResult, RegenerationSettings,
};
use indexmap::IndexSet;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Chooses a replacement among catalog candidates.
///
/// Returns the index of the chosen candidate, or `None` to leave the current
/// component in place for this round.
#[cfg_attr(test, mockall::automock)]
pub trait CandidatePicker {
    fn pick(&mut self, current: &Component, candidates: &[Component]) -> Option<usize>;
}

/// Uniform random choice among all candidates, including the current one
#[derive(Debug, Clone)]
pub struct RandomPicker<R = StdRng> {
    rng: R,
}

impl RandomPicker<StdRng> {
    /// Seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible picks for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomPicker<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> CandidatePicker for RandomPicker<R> {
    fn pick(&mut self, _current: &Component, candidates: &[Component]) -> Option<usize> {
        if candidates.is_empty() {
            return None;
        }
        Some(self.rng.gen_range(0..candidates.len()))
    }
}

/// Deterministic choice: the first candidate whose name differs from the current one
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstDifferentPicker;

impl CandidatePicker for FirstDifferentPicker {
    fn pick(&mut self, current: &Component, candidates: &[Component]) -> Option<usize> {
        candidates.iter().position(|c| c.name != current.name)
    }
}

/// Build the picker described by `settings`
pub fn picker_for(settings: &RegenerationSettings) -> Box<dyn CandidatePicker> {
    match (settings.strategy, settings.seed) {
        (PickStrategy::FirstDifferent, _) => Box::new(FirstDifferentPicker),
        (PickStrategy::Random, Some(seed)) => Box::new(RandomPicker::seeded(seed)),
        (PickStrategy::Random, None) => Box::new(RandomPicker::from_entropy()),
    }
}

/// Service running the bounded check-and-substitute loop.
///
/// Holds the checker, the catalog it substitutes from, and the attempt budget.
/// It keeps no state between calls; the picker is passed per call so callers
/// decide whether picks are random, seeded or deterministic.
#[derive(Debug, Clone)]
pub struct RegenerationService {
    checker: CompatibilityChecker,
    catalog: ComponentCatalog,
    max_attempts: u32,
}

impl RegenerationService {
    /// Create a service over `catalog` with the default attempt budget
    pub fn new(catalog: ComponentCatalog) -> Self {
        Self {
            checker: CompatibilityChecker::new(),
            catalog,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Create a service using the attempt budget from `settings`
    pub fn from_settings(catalog: ComponentCatalog, settings: &RegenerationSettings) -> Self {
        Self::new(catalog).with_max_attempts(settings.max_attempts)
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn catalog(&self) -> &ComponentCatalog {
        &self.catalog
    }

    pub fn checker(&self) -> &CompatibilityChecker {
        &self.checker
    }

    /// Run the regeneration loop on a copy of `components`.
    ///
    /// Returns as soon as a check passes. Otherwise substitutes every
    /// implicated category found in both the catalog and the build, counts the
    /// round, and tries again. Stops early when the issues name no categories
    /// or when a round could not substitute anything. The returned verdict
    /// always comes from a fresh check of the final build.
    pub fn regenerate<P>(&self, components: &[Component], picker: &mut P) -> RegenerationResult
    where
        P: CandidatePicker + ?Sized,
    {
        let mut current = components.to_vec();
        let mut regenerated = IndexSet::new();
        let mut attempts = 0;

        while attempts < self.max_attempts {
            let check = self.checker.check(&current);

            if check.is_compatible {
                tracing::info!(
                    "Build compatible after {} regeneration attempts ({} categories replaced)",
                    attempts,
                    regenerated.len()
                );
                return RegenerationResult::from_check(current, regenerated, attempts, check);
            }

            let implicated: IndexSet<ComponentCategory> = check
                .issues
                .iter()
                .flat_map(|issue| issue.components.iter().copied())
                .collect();

            if implicated.is_empty() {
                tracing::warn!(
                    "Build incompatible but no categories implicated, stopping regeneration"
                );
                break;
            }

            let mut replaced_any = false;
            for category in implicated {
                if self.replace(&mut current, category, picker) {
                    regenerated.insert(category);
                    replaced_any = true;
                }
            }

            attempts += 1;

            if !replaced_any {
                tracing::warn!(
                    "No implicated category could be replaced on attempt {}, stopping regeneration",
                    attempts
                );
                break;
            }
        }

        let check = self.checker.check(&current);
        if check.is_compatible {
            tracing::info!("Build compatible after {} regeneration attempts", attempts);
        } else {
            tracing::info!(
                "Build still incompatible after {} regeneration attempts ({} issues remaining)",
                attempts,
                check.issues.len()
            );
        }
        RegenerationResult::from_check(current, regenerated, attempts, check)
    }

    /// Replace the first component of `category` with the picker's choice.
    ///
    /// Returns false when the catalog has no candidates, the build has no
    /// component of that category, or the picker declined.
    fn replace<P>(
        &self,
        current: &mut [Component],
        category: ComponentCategory,
        picker: &mut P,
    ) -> bool
    where
        P: CandidatePicker + ?Sized,
    {
        let Some(candidates) = self.catalog.candidates(category) else {
            tracing::debug!("No catalog candidates for {}, skipping", category);
            return false;
        };
        let Some(slot) = current.iter_mut().find(|c| c.is(category)) else {
            return false;
        };
        let Some(replacement) = picker
            .pick(slot, candidates)
            .and_then(|index| candidates.get(index))
        else {
            return false;
        };

        tracing::debug!("Replacing {} '{}' with '{}'", category, slot.name, replacement.name);
        *slot = replacement.clone();
        true
    }
}

impl Default for RegenerationService {
    fn default() -> Self {
        Self::new(ComponentCatalog::builtin())
    }
}
