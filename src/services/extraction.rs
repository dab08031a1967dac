//! Typed attribute extraction from free-text component specs.
//!
//! Component specs are whatever text the catalog or the user supplied, e.g.
//! `"6-Core, 4.7GHz, Socket AM5"` or `"AM5, PCIe 5.0, WiFi 6E, DDR5"`. Each
//! extractor looks for one attribute and returns `None` when the text does not
//! mention it. Absence is never an error; the rules that need the attribute
//! are simply skipped.
//!
//! The only failure mode is a match that cannot be turned into a value (a
//! RAM token without a generation digit), reported as [`ExtractionError`].
//!
//! # Ordering-sensitive matches
//!
//! Form factors are matched by substring, and `"ATX"` is a substring of
//! `"E-ATX"`. [`extract_form_factor`] therefore checks E-ATX before ATX.

use crate::models::Component;
use regex::Regex;
use std::fmt;
use thiserror::Error;

/// Errors raised when a matched token cannot be converted into a typed value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Malformed {attribute} token: {token}")]
    MalformedToken {
        attribute: &'static str,
        token: String,
    },
}

/// CPU socket standard shared by CPUs, motherboards and coolers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Socket {
    Am5,
    Am4,
    Lga1700,
    Lga1200,
    Tr4,
    Strx4,
    Sp3,
    /// Any other token following the word "Socket", upper-cased
    Other(String),
}

impl Socket {
    /// Map an upper-cased token to a socket
    fn from_token(token: &str) -> Self {
        match token {
            "AM5" => Socket::Am5,
            "AM4" => Socket::Am4,
            "LGA1700" => Socket::Lga1700,
            "LGA1200" => Socket::Lga1200,
            "TR4" => Socket::Tr4,
            "STRX4" => Socket::Strx4,
            "SP3" => Socket::Sp3,
            other => Socket::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Socket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Socket::Am5 => "AM5",
            Socket::Am4 => "AM4",
            Socket::Lga1700 => "LGA1700",
            Socket::Lga1200 => "LGA1200",
            Socket::Tr4 => "TR4",
            Socket::Strx4 => "STRX4",
            Socket::Sp3 => "SP3",
            Socket::Other(token) => token,
        };
        f.write_str(name)
    }
}

/// Memory standard, e.g. DDR5 or LPDDR5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RamType {
    pub low_power: bool,
    pub generation: u8,
}

impl fmt::Display for RamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.low_power {
            write!(f, "LPDDR{}", self.generation)
        } else {
            write!(f, "DDR{}", self.generation)
        }
    }
}

/// Motherboard/case size standard, ordered smallest to largest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormFactor {
    MiniItx,
    MicroAtx,
    Atx,
    EAtx,
}

impl FormFactor {
    /// Position in the size hierarchy, Mini-ITX = 1 through E-ATX = 4
    pub fn rank(&self) -> u8 {
        match self {
            FormFactor::MiniItx => 1,
            FormFactor::MicroAtx => 2,
            FormFactor::Atx => 3,
            FormFactor::EAtx => 4,
        }
    }

    /// Whether a case of this size can hold a motherboard of `board` size
    pub fn fits(&self, board: FormFactor) -> bool {
        self.rank() >= board.rank()
    }
}

impl fmt::Display for FormFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormFactor::MiniItx => "Mini-ITX",
            FormFactor::MicroAtx => "Micro-ATX",
            FormFactor::Atx => "ATX",
            FormFactor::EAtx => "E-ATX",
        })
    }
}

/// Storage attachment interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageInterface {
    Nvme,
    Sata,
    M2,
}

impl fmt::Display for StorageInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StorageInterface::Nvme => "NVMe",
            StorageInterface::Sata => "SATA",
            StorageInterface::M2 => "M.2",
        })
    }
}

/// Watts added to CPU and GPU draw for everything else in the system
pub const BASELINE_SYSTEM_WATTS: u32 = 50;

/// CPU power estimates keyed by model substring, first match wins
pub const CPU_POWER_TABLE: &[(&str, u32)] = &[
    ("Ryzen 9 7950X", 162),
    ("Ryzen 9", 140),
    ("Ryzen 7", 105),
    ("Ryzen 5", 65),
    ("Core i9", 150),
    ("Core i7", 125),
    ("Core i5", 65),
];

/// Estimate used for CPUs not in [`CPU_POWER_TABLE`]
pub const DEFAULT_CPU_WATTS: u32 = 95;

/// GPU power estimates keyed by model substring, first match wins
pub const GPU_POWER_TABLE: &[(&str, u32)] = &[
    ("RTX 4090", 575),
    ("RTX 4080", 320),
    ("RTX 4070", 200),
    ("RTX 4060", 115),
];

/// Estimate used for GPUs not in [`GPU_POWER_TABLE`]
pub const DEFAULT_GPU_WATTS: u32 = 200;

/// Extractor for the regex-based attributes.
///
/// Patterns are compiled once at construction; a single extractor can be
/// shared by any number of threads.
///
/// - `socket_pattern`: `Socket\s+([A-Z0-9]+)`, e.g. "Socket AM5"
/// - `socket_token_pattern`: bare socket names such as "LGA1700", word-bounded
/// - `ram_pattern`: `DDR[0-9]` or `LPDDR[0-9]`
/// - `wattage_pattern`: `([0-9]+)W`, e.g. "850W"
///
/// All patterns are case-insensitive.
#[derive(Debug, Clone)]
pub struct SpecExtractor {
    socket_pattern: Regex,
    socket_token_pattern: Regex,
    ram_pattern: Regex,
    wattage_pattern: Regex,
}

impl SpecExtractor {
    /// Create a new SpecExtractor with compiled regex patterns
    pub fn new() -> Self {
        Self {
            socket_pattern: Regex::new(r"(?i)Socket\s+([A-Z0-9]+)").expect("Invalid socket regex"),
            socket_token_pattern: Regex::new(r"(?i)\b(AM5|AM4|LGA1700|LGA1200|TR4|sTRX4|SP3)\b")
                .expect("Invalid socket token regex"),
            ram_pattern: Regex::new(r"(?i)(LPDDR[0-9]|DDR[0-9])").expect("Invalid RAM regex"),
            wattage_pattern: Regex::new(r"(?i)([0-9]+)W").expect("Invalid wattage regex"),
        }
    }

    /// Extract the CPU socket.
    ///
    /// An explicit "Socket XYZ" mention wins over a bare socket name anywhere
    /// in the text.
    pub fn extract_socket(&self, specs: &str) -> Option<Socket> {
        [&self.socket_pattern, &self.socket_token_pattern]
            .into_iter()
            .find_map(|pattern| pattern.captures(specs))
            .map(|caps| Socket::from_token(&caps[1].to_uppercase()))
    }

    /// Extract the memory standard
    pub fn extract_ram_type(&self, specs: &str) -> Result<Option<RamType>, ExtractionError> {
        let Some(caps) = self.ram_pattern.captures(specs) else {
            return Ok(None);
        };
        let token = caps[1].to_uppercase();

        let generation = token
            .chars()
            .last()
            .and_then(|c| c.to_digit(10))
            .and_then(|d| u8::try_from(d).ok())
            .ok_or_else(|| ExtractionError::MalformedToken {
                attribute: "RAM type",
                token: token.clone(),
            })?;

        Ok(Some(RamType {
            low_power: token.starts_with("LP"),
            generation,
        }))
    }

    /// Extract the PSU rating in watts.
    ///
    /// A rating of zero is treated as no rating at all. Figures too large for
    /// `u32` saturate at `u32::MAX`.
    pub fn extract_wattage(&self, specs: &str) -> Option<u32> {
        let caps = self.wattage_pattern.captures(specs)?;
        // the pattern only admits digits, so overflow is the sole parse failure
        let watts = caps[1].parse::<u32>().unwrap_or(u32::MAX);
        (watts > 0).then_some(watts)
    }
}

impl Default for SpecExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract a motherboard or case form factor.
///
/// Matching is case-sensitive and runs in the fixed priority order E-ATX,
/// ATX, Micro-ATX (or mATX), Mini-ITX. E-ATX must precede ATX since it
/// contains it. Text naming Micro-ATX also contains "ATX" and therefore
/// classifies as ATX; only text without a plain "ATX" substring reaches the
/// smaller sizes.
pub fn extract_form_factor(specs: &str) -> Option<FormFactor> {
    if specs.contains("E-ATX") {
        Some(FormFactor::EAtx)
    } else if specs.contains("ATX") {
        Some(FormFactor::Atx)
    } else if specs.contains("Micro-ATX") || specs.contains("mATX") {
        Some(FormFactor::MicroAtx)
    } else if specs.contains("Mini-ITX") {
        Some(FormFactor::MiniItx)
    } else {
        None
    }
}

/// Extract the interface a storage drive uses (NVMe, then SATA, then M.2)
pub fn extract_storage_interface(specs: &str) -> Option<StorageInterface> {
    if specs.contains("NVMe") {
        Some(StorageInterface::Nvme)
    } else if specs.contains("SATA") {
        Some(StorageInterface::Sata)
    } else if specs.contains("M.2") {
        Some(StorageInterface::M2)
    } else {
        None
    }
}

/// Interfaces a motherboard supports; boards that mention none support SATA
pub fn motherboard_storage_support(specs: &str) -> Vec<StorageInterface> {
    let mut supported = Vec::new();
    if specs.contains("NVMe") || specs.contains("M.2") {
        supported.push(StorageInterface::Nvme);
    }
    if specs.contains("SATA") {
        supported.push(StorageInterface::Sata);
    }
    if supported.is_empty() {
        supported.push(StorageInterface::Sata);
    }
    supported
}

/// Estimated CPU draw in watts, from the model name and spec text
pub fn estimate_cpu_power(cpu: &Component) -> u32 {
    lookup_power(cpu, CPU_POWER_TABLE).unwrap_or(DEFAULT_CPU_WATTS)
}

/// Estimated GPU draw in watts, from the model name and spec text
pub fn estimate_gpu_power(gpu: &Component) -> u32 {
    lookup_power(gpu, GPU_POWER_TABLE).unwrap_or(DEFAULT_GPU_WATTS)
}

fn lookup_power(component: &Component, table: &[(&str, u32)]) -> Option<u32> {
    let haystack = format!("{} {}", component.name, component.specs);
    table
        .iter()
        .find(|(model, _)| haystack.contains(model))
        .map(|(_, watts)| *watts)
}
