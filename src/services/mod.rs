//! Services module - Pure business logic for build compatibility.
//!
//! The services are framework-agnostic: no I/O, no global mutable state, and
//! every input is an explicit parameter, which keeps them testable and usable
//! from any front end.
//!
//! # Components
//!
//! - [`CompatibilityChecker`]: Runs the fixed rule set over a component list and
//!   returns a [`CompatibilityResult`](crate::models::CompatibilityResult):
//!   - CPU/motherboard and CPU/cooler socket matching
//!   - RAM generation matching
//!   - PSU headroom against estimated CPU and GPU draw
//!   - Case/motherboard form factor fit
//!   - Storage interface support
//!
//! - [`RegenerationService`]: Wraps the checker in a bounded loop that
//!   substitutes implicated components from a
//!   [`ComponentCatalog`](crate::models::ComponentCatalog) until the build is
//!   compatible or the attempt budget runs out.
//!
//! - [`CandidatePicker`]: Seam for choosing replacements. [`RandomPicker`] is
//!   uniform (optionally seeded); [`FirstDifferentPicker`] is deterministic.
//!
//! - [`extraction`]: Typed attribute extraction from free-text specs
//!   ([`Socket`], [`RamType`], [`FormFactor`], [`StorageInterface`]).
//!
//! # Usage Example
//!
//! ```ignore
//! use buildcheck::models::{Component, ComponentCatalog};
//! use buildcheck::services::{CompatibilityChecker, FirstDifferentPicker, RegenerationService};
//!
//! let build = vec![
//!     Component::new("CPU", "AMD Ryzen 5 7600X", "6-Core, 4.7GHz, Socket AM5"),
//!     Component::new("Motherboard", "MSI PRO B760M-A", "LGA1700, DDR4, PCIe 5.0"),
//! ];
//!
//! let verdict = CompatibilityChecker::new().check(&build);
//! assert!(!verdict.is_compatible);
//!
//! let service = RegenerationService::new(ComponentCatalog::builtin());
//! let repaired = service.regenerate(&build, &mut FirstDifferentPicker);
//! ```

pub mod compatibility;
pub mod extraction;
pub mod regeneration;

pub use compatibility::{CompatibilityChecker, MIN_PSU_HEADROOM_WATTS};
pub use extraction::{
    ExtractionError, FormFactor, RamType, Socket, SpecExtractor, StorageInterface,
};
pub use regeneration::{
    CandidatePicker, FirstDifferentPicker, RandomPicker, RegenerationService, picker_for,
};
