use super::extraction::{
    BASELINE_SYSTEM_WATTS, ExtractionError, SpecExtractor, estimate_cpu_power,
    estimate_gpu_power, extract_form_factor, extract_storage_interface,
    motherboard_storage_support,
};
use crate::models::{
    CompatibilityIssue, CompatibilityResult, CompatibilityRule, Component, ComponentCategory,
    find_component,
};

/// Minimum spare PSU capacity, in watts, before a low-headroom warning
pub const MIN_PSU_HEADROOM_WATTS: i64 = 100;

/// Findings collected while the rules run
#[derive(Debug, Default)]
struct Findings {
    issues: Vec<CompatibilityIssue>,
    warnings: Vec<CompatibilityIssue>,
    infos: Vec<CompatibilityIssue>,
}

impl Findings {
    fn into_result(self) -> CompatibilityResult {
        CompatibilityResult::from_findings(self.issues, self.warnings, self.infos)
    }
}

/// Components a build is evaluated on, first of each category
struct Build<'a> {
    cpu: Option<&'a Component>,
    gpu: Option<&'a Component>,
    motherboard: Option<&'a Component>,
    ram: Option<&'a Component>,
    psu: Option<&'a Component>,
    cooler: Option<&'a Component>,
    storage: Option<&'a Component>,
    case: Option<&'a Component>,
}

impl<'a> Build<'a> {
    fn from_components(components: &'a [Component]) -> Self {
        Self {
            cpu: find_component(components, ComponentCategory::Cpu),
            gpu: find_component(components, ComponentCategory::Gpu),
            motherboard: find_component(components, ComponentCategory::Motherboard),
            ram: find_component(components, ComponentCategory::Ram),
            psu: find_component(components, ComponentCategory::Psu),
            cooler: find_component(components, ComponentCategory::CpuCooler),
            storage: find_component(components, ComponentCategory::Storage),
            case: find_component(components, ComponentCategory::Case),
        }
    }
}

/// Hand-authored compatibility rules over free-text component specs.
///
/// Six independent rules run on every check:
///
/// | Rule | Components | Blocks |
/// |---|---|---|
/// | CPU Socket | CPU, Motherboard | yes |
/// | RAM Type | RAM, Motherboard | yes |
/// | CPU Cooler Socket | CPU, CPU Cooler | yes |
/// | PSU Wattage | CPU, GPU, PSU | no (warning) |
/// | Case Compatibility | Motherboard, Case | yes |
/// | Storage Interface | Storage, Motherboard | no (warning) |
///
/// A rule whose components are missing from the build, or whose attributes
/// cannot be found in the spec text, is skipped without a finding.
///
/// The checker holds only compiled patterns, so it is cheap to share and
/// [`check`](Self::check) is a pure function of its input.
#[derive(Debug, Clone, Default)]
pub struct CompatibilityChecker {
    extractor: SpecExtractor,
}

impl CompatibilityChecker {
    pub fn new() -> Self {
        Self {
            extractor: SpecExtractor::new(),
        }
    }

    /// Check a component list and return the verdict.
    ///
    /// Never fails: an extraction error turns into a result with
    /// `success == false` and the error message, with no findings.
    pub fn check(&self, components: &[Component]) -> CompatibilityResult {
        match self.evaluate(components) {
            Ok(findings) => {
                let result = findings.into_result();
                tracing::debug!(
                    "Checked {} components - issues: {}, warnings: {}, infos: {}",
                    components.len(),
                    result.issues.len(),
                    result.warnings.len(),
                    result.infos.len()
                );
                result
            }
            Err(e) => {
                tracing::warn!("Compatibility check failed: {}", e);
                CompatibilityResult::failed(e.to_string())
            }
        }
    }

    fn evaluate(&self, components: &[Component]) -> Result<Findings, ExtractionError> {
        let build = Build::from_components(components);
        let mut findings = Findings::default();

        self.check_cpu_socket(&build, &mut findings);
        self.check_ram_type(&build, &mut findings)?;
        self.check_cooler_socket(&build, &mut findings);
        self.check_psu_wattage(&build, &mut findings);
        check_case_size(&build, &mut findings);
        check_storage_interface(&build, &mut findings);

        Ok(findings)
    }

    fn check_cpu_socket(&self, build: &Build<'_>, findings: &mut Findings) {
        let (Some(cpu), Some(motherboard)) = (build.cpu, build.motherboard) else {
            return;
        };
        let (Some(cpu_socket), Some(mb_socket)) = (
            self.extractor.extract_socket(&cpu.specs),
            self.extractor.extract_socket(&motherboard.specs),
        ) else {
            return;
        };

        let components = vec![ComponentCategory::Cpu, ComponentCategory::Motherboard];
        if cpu_socket != mb_socket {
            findings.issues.push(
                CompatibilityIssue::error(
                    CompatibilityRule::CpuSocket,
                    format!(
                        "CPU socket mismatch: {} CPU is not compatible with {} motherboard",
                        cpu_socket, mb_socket
                    ),
                    components,
                )
                .with_suggestion(format!(
                    "Choose a {} socket CPU or a motherboard with {} socket",
                    mb_socket, cpu_socket
                )),
            );
        } else {
            findings.infos.push(CompatibilityIssue::info(
                CompatibilityRule::CpuSocket,
                format!("CPU and motherboard sockets are compatible ({})", cpu_socket),
                components,
            ));
        }
    }

    fn check_ram_type(
        &self,
        build: &Build<'_>,
        findings: &mut Findings,
    ) -> Result<(), ExtractionError> {
        let (Some(ram), Some(motherboard)) = (build.ram, build.motherboard) else {
            return Ok(());
        };
        let ram_type = self.extractor.extract_ram_type(&ram.specs)?;
        let mb_ram_type = self.extractor.extract_ram_type(&motherboard.specs)?;
        let (Some(ram_type), Some(mb_ram_type)) = (ram_type, mb_ram_type) else {
            return Ok(());
        };

        let components = vec![ComponentCategory::Ram, ComponentCategory::Motherboard];
        if ram_type != mb_ram_type {
            findings.issues.push(
                CompatibilityIssue::error(
                    CompatibilityRule::RamType,
                    format!(
                        "RAM type mismatch: {} RAM is not compatible with {} motherboard",
                        ram_type, mb_ram_type
                    ),
                    components,
                )
                .with_suggestion(format!(
                    "Use {} RAM or choose a {} compatible motherboard",
                    mb_ram_type, ram_type
                )),
            );
        } else {
            findings.infos.push(CompatibilityIssue::info(
                CompatibilityRule::RamType,
                format!("RAM and motherboard types are compatible ({})", ram_type),
                components,
            ));
        }
        Ok(())
    }

    fn check_cooler_socket(&self, build: &Build<'_>, findings: &mut Findings) {
        let (Some(cpu), Some(cooler)) = (build.cpu, build.cooler) else {
            return;
        };
        let (Some(cpu_socket), Some(cooler_socket)) = (
            self.extractor.extract_socket(&cpu.specs),
            self.extractor.extract_socket(&cooler.specs),
        ) else {
            return;
        };

        let components = vec![ComponentCategory::CpuCooler, ComponentCategory::Cpu];
        if cpu_socket != cooler_socket {
            findings.issues.push(
                CompatibilityIssue::error(
                    CompatibilityRule::CpuCoolerSocket,
                    format!(
                        "CPU cooler socket mismatch: Cooler supports {} but CPU is {}",
                        cooler_socket, cpu_socket
                    ),
                    components,
                )
                .with_suggestion(format!(
                    "Choose a cooler compatible with {} socket",
                    cpu_socket
                )),
            );
        } else {
            findings.infos.push(CompatibilityIssue::info(
                CompatibilityRule::CpuCoolerSocket,
                format!("CPU cooler supports the CPU socket ({})", cpu_socket),
                components,
            ));
        }
    }

    fn check_psu_wattage(&self, build: &Build<'_>, findings: &mut Findings) {
        let (Some(cpu), Some(gpu), Some(psu)) = (build.cpu, build.gpu, build.psu) else {
            return;
        };
        let Some(psu_wattage) = self.extractor.extract_wattage(&psu.specs) else {
            return;
        };

        let total_power = i64::from(estimate_cpu_power(cpu))
            + i64::from(estimate_gpu_power(gpu))
            + i64::from(BASELINE_SYSTEM_WATTS);
        let headroom = i64::from(psu_wattage) - total_power;

        tracing::debug!(
            "PSU budget - cpu: {}, gpu: {}, psu: {}W, headroom: {}W",
            cpu.name,
            gpu.name,
            psu_wattage,
            headroom
        );

        if headroom < MIN_PSU_HEADROOM_WATTS {
            findings.warnings.push(
                CompatibilityIssue::warning(
                    CompatibilityRule::PsuWattage,
                    format!(
                        "Low PSU headroom: {}W remaining ({}W used of {}W)",
                        headroom, total_power, psu_wattage
                    ),
                    vec![ComponentCategory::Psu, ComponentCategory::Cpu, ComponentCategory::Gpu],
                )
                .with_suggestion("Consider upgrading to a higher wattage PSU for better stability"),
            );
        } else {
            findings.infos.push(CompatibilityIssue::info(
                CompatibilityRule::PsuWattage,
                format!(
                    "PSU has adequate headroom: {}W remaining ({}W used of {}W)",
                    headroom, total_power, psu_wattage
                ),
                vec![ComponentCategory::Psu],
            ));
        }
    }
}

fn check_case_size(build: &Build<'_>, findings: &mut Findings) {
    let (Some(motherboard), Some(case)) = (build.motherboard, build.case) else {
        return;
    };
    let (Some(mb_size), Some(case_size)) = (
        extract_form_factor(&motherboard.specs),
        extract_form_factor(&case.specs),
    ) else {
        return;
    };

    let components = vec![ComponentCategory::Case, ComponentCategory::Motherboard];
    if !case_size.fits(mb_size) {
        findings.issues.push(
            CompatibilityIssue::error(
                CompatibilityRule::CaseCompatibility,
                format!("{} motherboard is not compatible with {} case", mb_size, case_size),
                components,
            )
            .with_suggestion(format!("Choose a case that supports {} motherboards", mb_size)),
        );
    } else {
        findings.infos.push(CompatibilityIssue::info(
            CompatibilityRule::CaseCompatibility,
            format!("{} motherboard is compatible with {} case", mb_size, case_size),
            components,
        ));
    }
}

fn check_storage_interface(build: &Build<'_>, findings: &mut Findings) {
    let (Some(storage), Some(motherboard)) = (build.storage, build.motherboard) else {
        return;
    };
    let Some(storage_type) = extract_storage_interface(&storage.specs) else {
        return;
    };

    let supported = motherboard_storage_support(&motherboard.specs);
    if !supported.contains(&storage_type) {
        let supported_names = supported
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/");
        findings.warnings.push(CompatibilityIssue::warning(
            CompatibilityRule::StorageInterface,
            format!(
                "Storage interface may not be optimal: {} on {} motherboard",
                storage_type, supported_names
            ),
            vec![ComponentCategory::Storage, ComponentCategory::Motherboard],
        ));
    }
}
