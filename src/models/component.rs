use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed set of component categories a build is made of.
///
/// The serialized form is the exact display name (`"CPU Cooler"`, not
/// `"CpuCooler"`), which is also what [`Component::category`] carries on the
/// wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentCategory {
    #[serde(rename = "CPU")]
    Cpu,
    #[serde(rename = "GPU")]
    Gpu,
    #[serde(rename = "Motherboard")]
    Motherboard,
    #[serde(rename = "RAM")]
    Ram,
    #[serde(rename = "PSU")]
    Psu,
    #[serde(rename = "Case")]
    Case,
    #[serde(rename = "CPU Cooler")]
    CpuCooler,
    #[serde(rename = "Storage")]
    Storage,
}

impl ComponentCategory {
    /// All categories in catalog order
    pub const ALL: [ComponentCategory; 8] = [
        ComponentCategory::Cpu,
        ComponentCategory::Gpu,
        ComponentCategory::Motherboard,
        ComponentCategory::Ram,
        ComponentCategory::Psu,
        ComponentCategory::Case,
        ComponentCategory::CpuCooler,
        ComponentCategory::Storage,
    ];

    /// Display name as used in component lists and issue payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentCategory::Cpu => "CPU",
            ComponentCategory::Gpu => "GPU",
            ComponentCategory::Motherboard => "Motherboard",
            ComponentCategory::Ram => "RAM",
            ComponentCategory::Psu => "PSU",
            ComponentCategory::Case => "Case",
            ComponentCategory::CpuCooler => "CPU Cooler",
            ComponentCategory::Storage => "Storage",
        }
    }
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the fixed category names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown component category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for ComponentCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A single selected hardware component.
///
/// `category` stays a plain string so that lists coming from external
/// collaborators can carry categories this crate has no rules for; those are
/// carried through untouched. `specs` is free text and is only ever pattern
/// matched, never parsed into a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub category: String,
    pub name: String,
    pub specs: String,
}

impl Component {
    pub fn new(
        category: impl Into<String>,
        name: impl Into<String>,
        specs: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            specs: specs.into(),
        }
    }

    /// Whether this component belongs to `category` (exact name match)
    pub fn is(&self, category: ComponentCategory) -> bool {
        self.category == category.as_str()
    }
}

/// Find the first component of a category.
///
/// Later components of the same category are ignored, so a build with two
/// GPUs is evaluated against the first one only.
pub fn find_component(
    components: &[Component],
    category: ComponentCategory,
) -> Option<&Component> {
    components.iter().find(|c| c.is(category))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names_round_trip() {
        for category in ComponentCategory::ALL {
            assert_eq!(category.as_str().parse::<ComponentCategory>(), Ok(category));
        }
        assert_eq!(ComponentCategory::CpuCooler.to_string(), "CPU Cooler");
    }

    #[test]
    fn test_unknown_category() {
        let err = "Monitor".parse::<ComponentCategory>().unwrap_err();
        assert_eq!(err, UnknownCategory("Monitor".to_string()));
        assert!("cpu".parse::<ComponentCategory>().is_err());
    }

    #[test]
    fn test_find_component_returns_first_match() {
        let components = vec![
            Component::new("GPU", "NVIDIA RTX 4070", "12GB GDDR6X"),
            Component::new("GPU", "NVIDIA RTX 4090", "24GB GDDR6X"),
        ];

        let gpu = find_component(&components, ComponentCategory::Gpu).unwrap();
        assert_eq!(gpu.name, "NVIDIA RTX 4070");
        assert!(find_component(&components, ComponentCategory::Cpu).is_none());
    }

    #[test]
    fn test_category_serializes_as_display_name() {
        let yaml = serde_yaml_ng::to_string(&ComponentCategory::CpuCooler).unwrap();
        assert_eq!(yaml.trim(), "CPU Cooler");
    }
}
