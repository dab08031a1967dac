use super::component::{Component, ComponentCategory};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Substitution source for the regeneration loop.
///
/// Maps each category to an ordered list of candidate components. The catalog
/// is read-only once built; the regeneration service only ever borrows it.
/// Stored on disk as `Component Catalog.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentCatalog {
    pub version: String,

    #[serde(rename = "Components", default)]
    pub components: IndexMap<ComponentCategory, Vec<Component>>,
}

impl ComponentCatalog {
    /// An empty catalog. Regeneration against it never substitutes anything.
    pub fn empty() -> Self {
        Self {
            version: String::new(),
            components: IndexMap::new(),
        }
    }

    /// Candidates for a category, or `None` if the catalog has no usable entries
    pub fn candidates(&self, category: ComponentCategory) -> Option<&[Component]> {
        self.components
            .get(&category)
            .map(Vec::as_slice)
            .filter(|candidates| !candidates.is_empty())
    }

    /// Add a candidate (builder pattern)
    pub fn with_candidate(mut self, category: ComponentCategory, name: &str, specs: &str) -> Self {
        self.components
            .entry(category)
            .or_default()
            .push(Component::new(category.as_str(), name, specs));
        self
    }

    /// Total number of candidates across all categories
    pub fn len(&self) -> usize {
        self.components.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rewrite candidate categories that disagree with the key they are listed under.
    ///
    /// Returns the number of entries changed.
    pub fn normalize(&mut self) -> usize {
        let mut fixed = 0;
        for (category, candidates) in self.components.iter_mut() {
            for candidate in candidates.iter_mut().filter(|c| !c.is(*category)) {
                tracing::warn!(
                    "Catalog entry '{}' listed under {} has category '{}', normalizing",
                    candidate.name,
                    category,
                    candidate.category
                );
                candidate.category = category.as_str().to_string();
                fixed += 1;
            }
        }
        fixed
    }

    /// The built-in catalog shipped with the application
    pub fn builtin() -> Self {
        use ComponentCategory::*;

        Self {
            version: "1.0.0".to_string(),
            components: IndexMap::new(),
        }
        .with_candidate(Cpu, "AMD Ryzen 5 7600X", "6-Core, 4.7GHz, Socket AM5")
        .with_candidate(Cpu, "AMD Ryzen 9 7950X", "16-Core, 4.5GHz, Socket AM5")
        .with_candidate(Cpu, "Intel Core i5-13600K", "14-Core, 3.5GHz, Socket LGA1700")
        .with_candidate(Cpu, "Intel Core i7-13700K", "16-Core, 3.4GHz, Socket LGA1700")
        .with_candidate(Cpu, "Intel Core i9-13900KS", "24-Core, 6.0GHz, Socket LGA1700")
        .with_candidate(Gpu, "NVIDIA RTX 4070", "12GB GDDR6X, PCIe 4.0")
        .with_candidate(Gpu, "NVIDIA RTX 4080", "16GB GDDR6X, PCIe 4.0")
        .with_candidate(Gpu, "NVIDIA RTX 4090", "24GB GDDR6X, PCIe 4.0")
        .with_candidate(Motherboard, "ASUS ROG STRIX B650-E", "AM5, PCIe 5.0, WiFi 6E, DDR5")
        .with_candidate(Motherboard, "ASUS TUF B550-PLUS", "AM4, DDR4, PCIe 4.0")
        .with_candidate(Motherboard, "MSI PRO B760M-A", "LGA1700, DDR4, PCIe 5.0")
        .with_candidate(Motherboard, "ASUS ROG MAXIMUS Z790", "LGA1700, PCIe 5.0, WiFi 7, DDR5")
        .with_candidate(Ram, "Corsair Vengeance RGB 32GB", "DDR5 6000MHz, Cas 30")
        .with_candidate(Ram, "Kingston Fury Beast 16GB", "DDR4 3200MHz, Cas 16")
        .with_candidate(Ram, "G.Skill Trident Z5 64GB", "DDR5 6000MHz, CAS 28")
        .with_candidate(Psu, "Corsair RM750x", "750W, 80+ Gold, Modular")
        .with_candidate(Psu, "Corsair RM850x", "850W, 80+ Gold, Modular")
        .with_candidate(Psu, "Corsair HX1200i", "1200W, 80+ Platinum, Modular")
        .with_candidate(Psu, "Corsair HX1500i", "1500W, 80+ Platinum, Modular")
        .with_candidate(Case, "Lian Li Lancool 3", "ATX, Tempered Glass, 3x Fans")
        .with_candidate(Case, "Lian Li A4-H2O", "Mini-ITX, Aluminum, Compact")
        .with_candidate(Case, "Corsair 5000T RGB", "E-ATX, Tempered Glass, 6x Fans")
        .with_candidate(CpuCooler, "Noctua NH-D15", "Dual Tower, 140mm Fans, Socket AM5")
        .with_candidate(CpuCooler, "NZXT Kraken X73", "360mm AIO, RGB")
        .with_candidate(Storage, "Samsung 990 Pro 1TB", "NVMe M.2, PCIe 4.0, 7100MB/s")
        .with_candidate(Storage, "WD Blue 500GB", "SSD, SATA, 550MB/s")
    }
}

impl Default for ComponentCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
