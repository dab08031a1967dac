use crate::models::{Component, ComponentCatalog, RegenerationSettings};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// File name of the component catalog inside the data directory
pub const CATALOG_FILE: &str = "Component Catalog.yaml";

/// File name of the regeneration settings inside the data directory
pub const SETTINGS_FILE: &str = "BuildCheck Settings.yaml";

/// Prefix of environment variables overriding settings, e.g. `BUILDCHECK_MAX_ATTEMPTS`
pub const ENV_PREFIX: &str = "BUILDCHECK";

/// Configuration manager for loading and saving YAML configuration files.
///
/// Manages two files:
/// - Catalog (`Component Catalog.yaml`): Replacement candidates per category
/// - Settings (`BuildCheck Settings.yaml`): Regeneration loop settings, layered
///   with `BUILDCHECK_*` environment variables
#[derive(Debug, Clone)]
pub struct ConfigManager {
    data_dir: Utf8PathBuf,
    catalog_path: Utf8PathBuf,
    settings_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified data directory.
    ///
    /// # Arguments
    /// * `data_dir` - Directory containing configuration files (e.g., "BuildCheck Data")
    ///
    /// # Returns
    /// A new ConfigManager instance
    pub fn new<P: AsRef<Utf8Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();

        // Create data directory if it doesn't exist
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir)
                .with_context(|| format!("Failed to create data directory: {}", data_dir))?;
        }

        Ok(Self {
            catalog_path: data_dir.join(CATALOG_FILE),
            settings_path: data_dir.join(SETTINGS_FILE),
            data_dir,
        })
    }

    /// Load the component catalog.
    ///
    /// # Returns
    /// The loaded catalog, or the built-in catalog if the file doesn't exist.
    /// Entries listed under the wrong category are normalized to their key.
    pub fn load_catalog(&self) -> Result<ComponentCatalog> {
        if !self.catalog_path.exists() {
            tracing::warn!(
                "Catalog file not found at {}, using built-in catalog",
                self.catalog_path
            );
            return Ok(ComponentCatalog::builtin());
        }

        let file_contents = fs::read_to_string(&self.catalog_path)
            .with_context(|| format!("Failed to read catalog: {}", self.catalog_path))?;

        let mut catalog: ComponentCatalog = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse catalog: {}", self.catalog_path))?;

        let fixed = catalog.normalize();
        if fixed > 0 {
            tracing::warn!("Normalized {} catalog entries in {}", fixed, self.catalog_path);
        }

        tracing::info!(
            "Loaded catalog v{} from {} ({} candidates)",
            catalog.version,
            self.catalog_path,
            catalog.len()
        );
        Ok(catalog)
    }

    /// Save the component catalog.
    ///
    /// # Arguments
    /// * `catalog` - The catalog to save
    pub fn save_catalog(&self, catalog: &ComponentCatalog) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(catalog).context("Failed to serialize catalog to YAML")?;

        fs::write(&self.catalog_path, yaml_string)
            .with_context(|| format!("Failed to write catalog: {}", self.catalog_path))?;

        tracing::info!("Saved catalog to {}", self.catalog_path);
        Ok(())
    }

    /// Load regeneration settings.
    ///
    /// Values come from the settings file (optional) and are then overridden by
    /// `BUILDCHECK_*` environment variables. Missing values use defaults.
    pub fn load_settings(&self) -> Result<RegenerationSettings> {
        if !self.settings_path.exists() {
            tracing::debug!(
                "Settings file not found at {}, using defaults and environment",
                self.settings_path
            );
        }

        let settings = ::config::Config::builder()
            .add_source(
                ::config::File::new(self.settings_path.as_str(), ::config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .with_context(|| format!("Failed to load settings: {}", self.settings_path))?
            .try_deserialize::<RegenerationSettings>()
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        tracing::info!(
            "Loaded settings - max_attempts: {}, strategy: {:?}, seed: {:?}",
            settings.max_attempts,
            settings.strategy,
            settings.seed
        );
        Ok(settings)
    }

    /// Save regeneration settings.
    ///
    /// # Arguments
    /// * `settings` - The settings to save
    pub fn save_settings(&self, settings: &RegenerationSettings) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(settings).context("Failed to serialize settings to YAML")?;

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    /// Get the data directory path.
    pub fn data_dir(&self) -> &Utf8Path {
        &self.data_dir
    }

    /// Path of the catalog file
    pub fn catalog_path(&self) -> &Utf8Path {
        &self.catalog_path
    }

    /// Path of the settings file
    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }
}

/// Load a build (a YAML sequence of components) from a file
pub fn load_build(path: &Utf8Path) -> Result<Vec<Component>> {
    let file_contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read build file: {}", path))?;

    let components: Vec<Component> = serde_yaml_ng::from_str(&file_contents)
        .with_context(|| format!("Failed to parse build file: {}", path))?;

    tracing::debug!("Loaded {} components from {}", components.len(), path);
    Ok(components)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ComponentCategory, PickStrategy};
    use tempfile::TempDir;

    fn create_test_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let manager = ConfigManager::new(&config_path).unwrap();
        (manager, temp_dir)
    }

    #[test]
    fn test_create_config_manager() {
        let (manager, _temp_dir) = create_test_config_manager();
        assert!(manager.catalog_path().as_str().ends_with(CATALOG_FILE));
        assert!(manager.settings_path().as_str().ends_with(SETTINGS_FILE));
    }

    #[test]
    fn test_missing_catalog_falls_back_to_builtin() {
        let (manager, _temp_dir) = create_test_config_manager();
        let catalog = manager.load_catalog().unwrap();
        assert_eq!(catalog, ComponentCatalog::builtin());
    }

    #[test]
    fn test_load_save_catalog() {
        let (manager, _temp_dir) = create_test_config_manager();

        let catalog = ComponentCatalog::empty().with_candidate(
            ComponentCategory::Psu,
            "Seasonic Prime TX-1000",
            "1000W, 80+ Titanium",
        );
        manager.save_catalog(&catalog).unwrap();

        let loaded = manager.load_catalog().unwrap();
        assert_eq!(loaded, catalog);
    }

    #[test]
    fn test_load_save_settings() {
        let (manager, _temp_dir) = create_test_config_manager();

        let settings = RegenerationSettings {
            max_attempts: 3,
            strategy: PickStrategy::FirstDifferent,
            seed: Some(7),
            debug_mode: true,
        };
        manager.save_settings(&settings).unwrap();

        let loaded = manager.load_settings().unwrap();
        assert_eq!(loaded.max_attempts, 3);
        assert_eq!(loaded.strategy, PickStrategy::FirstDifferent);
        assert_eq!(loaded.seed, Some(7));
        assert!(loaded.debug_mode);
    }

    #[test]
    fn test_load_build() {
        let (manager, _temp_dir) = create_test_config_manager();
        let path = manager.data_dir().join("build.yaml");
        fs::write(
            &path,
            "- category: CPU\n  name: AMD Ryzen 5 7600X\n  specs: 6-Core, 4.7GHz, Socket AM5\n",
        )
        .unwrap();

        let build = load_build(&path).unwrap();
        assert_eq!(build.len(), 1);
        assert_eq!(build[0].specs, "6-Core, 4.7GHz, Socket AM5");
    }

    #[test]
    fn test_load_build_missing_file() {
        let (manager, _temp_dir) = create_test_config_manager();
        let err = load_build(&manager.data_dir().join("missing.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read build file"));
    }
}
