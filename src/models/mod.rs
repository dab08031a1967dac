//! Data models for the build compatibility checker.
//!
//! This module contains the core data structures exchanged with callers:
//! - [`Component`]: A selected hardware component (`category`, `name`, free-text `specs`)
//! - [`ComponentCategory`]: The fixed set of categories rules know about
//! - [`CompatibilityIssue`] / [`CompatibilityResult`]: Verdict of a single check
//! - [`RegenerationResult`]: Outcome of the auto-regeneration loop
//! - [`ComponentCatalog`]: Substitution source loaded from `Component Catalog.yaml`
//! - [`RegenerationSettings`]: Loop settings loaded from `BuildCheck Settings.yaml`
//!
//! # Architecture Note
//!
//! Verdicts are transient and built per call. They serialize with camelCase
//! field names, which is the shape external collaborators consume; the
//! settings file keeps snake_case keys to match its environment overrides.

pub mod catalog;
pub mod compatibility;
pub mod component;
pub mod config;

pub use catalog::ComponentCatalog;
pub use compatibility::{
    CompatibilityIssue, CompatibilityResult, CompatibilityRule, RegenerationResult, Severity,
};
pub use component::{Component, ComponentCategory, UnknownCategory, find_component};
pub use config::{DEFAULT_MAX_ATTEMPTS, PickStrategy, RegenerationSettings};
