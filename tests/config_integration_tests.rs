//! Integration tests for ConfigManager and configuration file handling
//!
//! These tests verify:
//! - Catalog loading, saving and the built-in fallback
//! - Settings loading, saving and defaults
//! - Hand-written YAML files are accepted
//! - A loaded catalog drives regeneration

use buildcheck::config::load_build;
use buildcheck::models::{DEFAULT_MAX_ATTEMPTS, PickStrategy};
use buildcheck::services::FirstDifferentPicker;
use buildcheck::{ComponentCatalog, ComponentCategory, ConfigManager, RegenerationService};
use camino::Utf8PathBuf;
use std::fs;
use tempfile::TempDir;

fn create_test_config_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, config_path)
}

#[test]
fn test_create_config_manager() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    assert_eq!(manager.data_dir(), &config_path);
}

#[test]
fn test_data_directory_is_created() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let nested = config_path.join("BuildCheck Data");

    let manager = ConfigManager::new(&nested).unwrap();

    assert!(nested.exists());
    assert!(manager.catalog_path().starts_with(&nested));
}

#[test]
fn test_load_default_catalog() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    // Catalog file doesn't exist, should return the built-in one
    let catalog = manager.load_catalog().unwrap();

    assert_eq!(catalog.len(), 26);
    for category in ComponentCategory::ALL {
        assert!(catalog.candidates(category).is_some(), "missing {}", category);
    }
}

#[test]
fn test_load_default_settings() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let settings = manager.load_settings().unwrap();

    assert_eq!(settings.max_attempts, DEFAULT_MAX_ATTEMPTS);
    assert_eq!(settings.strategy, PickStrategy::Random);
    assert!(!settings.debug_mode);
}

#[test]
fn test_save_and_load_catalog() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let mut catalog = manager.load_catalog().unwrap();
    catalog.version = "2.0.0".to_string();
    manager.save_catalog(&catalog).unwrap();

    let loaded = manager.load_catalog().unwrap();
    assert_eq!(loaded.version, "2.0.0");
    assert_eq!(loaded, catalog);
}

#[test]
fn test_hand_written_catalog() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let yaml = r#"
version: "1.1.0"
Components:
  Motherboard:
    - category: Motherboard
      name: ASUS ROG STRIX B650-E
      specs: AM5, PCIe 5.0, WiFi 6E, DDR5
  CPU Cooler:
    - category: CPU
      name: Noctua NH-D15
      specs: Dual Tower, 140mm Fans, Socket AM5
"#;
    fs::write(manager.catalog_path(), yaml).unwrap();

    let catalog = manager.load_catalog().unwrap();

    assert_eq!(catalog.version, "1.1.0");
    assert_eq!(catalog.len(), 2);
    assert!(catalog.candidates(ComponentCategory::Cpu).is_none());
    // Misfiled entry is normalized to the category it is listed under
    let coolers = catalog.candidates(ComponentCategory::CpuCooler).unwrap();
    assert_eq!(coolers[0].category, "CPU Cooler");
}

#[test]
fn test_invalid_catalog_is_an_error() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    fs::write(manager.catalog_path(), "Components:\n  Monitor: []\n").unwrap();

    let err = manager.load_catalog().unwrap_err();
    assert!(err.to_string().contains("Failed to parse catalog"));
}

#[test]
fn test_hand_written_settings() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    fs::write(manager.settings_path(), "max_attempts: 9\nstrategy: first_different\n").unwrap();

    let settings = manager.load_settings().unwrap();
    assert_eq!(settings.max_attempts, 9);
    assert_eq!(settings.strategy, PickStrategy::FirstDifferent);
    assert_eq!(settings.seed, None);
}

#[test]
fn test_loaded_catalog_drives_regeneration() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let catalog = ComponentCatalog::empty().with_candidate(
        ComponentCategory::Case,
        "Corsair 5000T RGB",
        "E-ATX, Tempered Glass, 6x Fans",
    );
    manager.save_catalog(&catalog).unwrap();

    let build_path = config_path.join("itx-build.yaml");
    fs::write(
        &build_path,
        "- category: Case\n  name: Lian Li A4-H2O\n  specs: Mini-ITX, Aluminum, Compact\n\
         - category: Motherboard\n  name: ASUS ROG STRIX B650-E\n  specs: ATX, AM5, DDR5\n",
    )
    .unwrap();

    let build = load_build(&build_path).unwrap();
    let service = RegenerationService::new(manager.load_catalog().unwrap());
    let result = service.regenerate(&build, &mut FirstDifferentPicker);

    assert!(result.is_fully_compatible);
    assert_eq!(result.regeneration_attempts, 1);
    assert_eq!(result.components[0].name, "Corsair 5000T RGB");
}
