use super::component::{Component, ComponentCategory};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How strongly a finding affects the build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks the build
    Error,
    /// Worth showing, never blocks
    Warning,
    /// Confirmation that a rule passed
    Info,
}

/// The rule that produced a finding.
///
/// Serialized as the rule's display name, which is what consumers see in the
/// `category` field of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompatibilityRule {
    #[serde(rename = "CPU Socket")]
    CpuSocket,
    #[serde(rename = "RAM Type")]
    RamType,
    #[serde(rename = "CPU Cooler Socket")]
    CpuCoolerSocket,
    #[serde(rename = "PSU Wattage")]
    PsuWattage,
    #[serde(rename = "Case Compatibility")]
    CaseCompatibility,
    #[serde(rename = "Storage Interface")]
    StorageInterface,
}

impl CompatibilityRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompatibilityRule::CpuSocket => "CPU Socket",
            CompatibilityRule::RamType => "RAM Type",
            CompatibilityRule::CpuCoolerSocket => "CPU Cooler Socket",
            CompatibilityRule::PsuWattage => "PSU Wattage",
            CompatibilityRule::CaseCompatibility => "Case Compatibility",
            CompatibilityRule::StorageInterface => "Storage Interface",
        }
    }
}

impl fmt::Display for CompatibilityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding of the compatibility checker.
///
/// The same shape is used for blocking issues, warnings and confirmations;
/// which list it lands in is decided by `severity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityIssue {
    pub severity: Severity,
    pub category: CompatibilityRule,
    pub message: String,
    /// Component categories implicated by this finding, in rule order
    pub components: Vec<ComponentCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl CompatibilityIssue {
    pub fn error(
        category: CompatibilityRule,
        message: impl Into<String>,
        components: Vec<ComponentCategory>,
    ) -> Self {
        Self::with_severity(Severity::Error, category, message, components)
    }

    pub fn warning(
        category: CompatibilityRule,
        message: impl Into<String>,
        components: Vec<ComponentCategory>,
    ) -> Self {
        Self::with_severity(Severity::Warning, category, message, components)
    }

    pub fn info(
        category: CompatibilityRule,
        message: impl Into<String>,
        components: Vec<ComponentCategory>,
    ) -> Self {
        Self::with_severity(Severity::Info, category, message, components)
    }

    /// Attach a suggestion shown verbatim to the user
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    fn with_severity(
        severity: Severity,
        category: CompatibilityRule,
        message: impl Into<String>,
        components: Vec<ComponentCategory>,
    ) -> Self {
        Self {
            severity,
            category,
            message: message.into(),
            components,
            suggestion: None,
        }
    }
}

/// Verdict of a single compatibility check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityResult {
    /// True iff `issues` is empty
    pub is_compatible: bool,
    pub issues: Vec<CompatibilityIssue>,
    pub warnings: Vec<CompatibilityIssue>,
    pub infos: Vec<CompatibilityIssue>,
    /// False when an internal extraction failure aborted the check
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CompatibilityResult {
    /// Build a successful verdict from the collected findings
    pub fn from_findings(
        issues: Vec<CompatibilityIssue>,
        warnings: Vec<CompatibilityIssue>,
        infos: Vec<CompatibilityIssue>,
    ) -> Self {
        Self {
            is_compatible: issues.is_empty(),
            issues,
            warnings,
            infos,
            success: true,
            error: None,
        }
    }

    /// Verdict for a check that could not be evaluated
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            is_compatible: false,
            issues: Vec::new(),
            warnings: Vec::new(),
            infos: Vec::new(),
            success: false,
            error: Some(error.into()),
        }
    }

    /// Finds every entry (issue, warning or info) produced by `rule`
    pub fn findings_for(
        &self,
        rule: CompatibilityRule,
    ) -> impl Iterator<Item = &CompatibilityIssue> {
        self.issues
            .iter()
            .chain(&self.warnings)
            .chain(&self.infos)
            .filter(move |issue| issue.category == rule)
    }
}

/// Outcome of the auto-regeneration loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerationResult {
    /// The build after all substitutions
    pub components: Vec<Component>,
    /// Categories that were substituted at least once, in first-touched order
    pub regenerated_components: IndexSet<ComponentCategory>,
    pub issues: Vec<CompatibilityIssue>,
    pub warnings: Vec<CompatibilityIssue>,
    pub infos: Vec<CompatibilityIssue>,
    pub is_fully_compatible: bool,
    pub regeneration_attempts: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RegenerationResult {
    /// Combine the final build state with the check that judged it
    pub fn from_check(
        components: Vec<Component>,
        regenerated_components: IndexSet<ComponentCategory>,
        regeneration_attempts: u32,
        check: CompatibilityResult,
    ) -> Self {
        Self {
            components,
            regenerated_components,
            is_fully_compatible: check.is_compatible,
            issues: check.issues,
            warnings: check.warnings,
            infos: check.infos,
            regeneration_attempts,
            error: check.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_findings_compatible_only_without_issues() {
        let warning = CompatibilityIssue::warning(
            CompatibilityRule::PsuWattage,
            "Low PSU headroom",
            vec![ComponentCategory::Psu],
        );
        let result = CompatibilityResult::from_findings(Vec::new(), vec![warning], Vec::new());
        assert!(result.is_compatible);
        assert!(result.success);

        let error = CompatibilityIssue::error(
            CompatibilityRule::CpuSocket,
            "mismatch",
            vec![ComponentCategory::Cpu, ComponentCategory::Motherboard],
        );
        let result = CompatibilityResult::from_findings(vec![error], Vec::new(), Vec::new());
        assert!(!result.is_compatible);
    }

    #[test]
    fn test_failed_result() {
        let result = CompatibilityResult::failed("boom");
        assert!(!result.success);
        assert!(!result.is_compatible);
        assert!(result.issues.is_empty() && result.warnings.is_empty() && result.infos.is_empty());
        assert_eq!(result.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_issue_serializes_with_wire_names() {
        let issue = CompatibilityIssue::error(
            CompatibilityRule::CpuCoolerSocket,
            "Cooler mismatch",
            vec![ComponentCategory::CpuCooler, ComponentCategory::Cpu],
        )
        .with_suggestion("Choose another cooler");

        let yaml = serde_yaml_ng::to_string(&issue).unwrap();
        assert!(yaml.contains("severity: error"));
        assert!(yaml.contains("category: CPU Cooler Socket"));
        assert!(yaml.contains("- CPU Cooler"));
        assert!(yaml.contains("suggestion: Choose another cooler"));
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let yaml = serde_yaml_ng::to_string(&CompatibilityResult::from_findings(
            Vec::new(),
            Vec::new(),
            Vec::new(),
        ))
        .unwrap();
        assert!(yaml.contains("isCompatible: true"));
        assert!(!yaml.contains("error"));
    }
}
