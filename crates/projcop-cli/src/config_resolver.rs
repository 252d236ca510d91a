//! Configuration file resolution with global fallback.
//!
//! Resolves the rule configuration using a deterministic priority order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `{project dir}/projcop.xml` or `.projcop.xml`
//! 3. `$PROJCOP_CONFIG_DIR/config.xml` or `~/.projcop/config.xml`
//! 4. No config found → an empty `<Rules/>` document

use anyhow::{Context, Result};
use projcop_core::ConfigDocument;
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Loaded from the global config directory (`~/.projcop/`).
    Global(PathBuf),
    /// No config found; every rule runs with an empty section.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config was loaded from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }

    /// Reads and parses the configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not well-formed XML.
    pub fn load(&self) -> Result<ConfigDocument> {
        let Some(path) = self.path() else {
            tracing::debug!("No configuration file found, using an empty configuration");
            return Ok(ConfigDocument::empty());
        };
        if self.is_global() {
            tracing::info!("Using global config: {}", path.display());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;
        Ok(ConfigDocument::parse_named(&path.display().to_string(), &content)?)
    }
}

/// Project-level config file names, checked in order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["projcop.xml", ".projcop.xml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.xml";

/// Environment variable overriding the global config directory.
const CONFIG_DIR_ENV: &str = "PROJCOP_CONFIG_DIR";

/// Resolves the configuration file path.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

/// Testable core: accepts `global_dir` as parameter to avoid env var races.
fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    for name in PROJECT_CONFIG_NAMES {
        let candidate = project_dir.join(name);
        if candidate.exists() {
            tracing::debug!("Found project config: {}", candidate.display());
            return ConfigSource::Project(candidate);
        }
    }

    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_CONFIG_NAME);
        if candidate.exists() {
            tracing::debug!("Found global config: {}", candidate.display());
            return ConfigSource::Global(candidate);
        }
    }

    ConfigSource::Default
}

/// Returns the global config directory path.
///
/// Resolution: `$PROJCOP_CONFIG_DIR` > `~/.projcop/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".projcop"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_takes_priority_over_project() {
        let tmp = TempDir::new().unwrap();
        let explicit = tmp.path().join("custom.xml");
        fs::write(&explicit, "<Rules/>").unwrap();

        let project = tmp.path().join("project");
        fs::create_dir(&project).unwrap();
        fs::write(project.join("projcop.xml"), "<Rules/>").unwrap();

        let result = resolve_inner(&project, Some(&explicit), None);
        assert_eq!(result, ConfigSource::Explicit(explicit));
    }

    #[test]
    fn explicit_does_not_check_existence() {
        let result = resolve_inner(Path::new("/tmp"), Some(Path::new("/nonexistent.xml")), None);
        assert_eq!(
            result,
            ConfigSource::Explicit(PathBuf::from("/nonexistent.xml"))
        );
        assert!(result.load().is_err());
    }

    #[test]
    fn plain_name_preferred_over_dot_prefix() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".projcop.xml"), "<Rules/>").unwrap();
        assert_eq!(
            resolve_inner(tmp.path(), None, None),
            ConfigSource::Project(tmp.path().join(".projcop.xml"))
        );

        fs::write(tmp.path().join("projcop.xml"), "<Rules/>").unwrap();
        assert_eq!(
            resolve_inner(tmp.path(), None, None),
            ConfigSource::Project(tmp.path().join("projcop.xml"))
        );
    }

    #[test]
    fn global_fallback_when_no_project_config() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.xml"), "<Rules/>").unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Global(global.path().join("config.xml")));
        assert!(result.is_global());
    }

    #[test]
    fn global_skipped_when_project_config_exists() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("projcop.xml"), "<Rules/>").unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.xml"), "<Rules/>").unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert!(matches!(result, ConfigSource::Project(_)));
    }

    #[test]
    fn no_config_anywhere_loads_empty_document() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Default);
        assert!(result.path().is_none());
        assert_eq!(result.load().unwrap(), ConfigDocument::empty());
    }

    #[test]
    fn load_parses_rule_sections() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("projcop.xml");
        fs::write(&path, r#"<Rules><WarningLevel enabled="false"/></Rules>"#).unwrap();

        let config = ConfigSource::Project(path).load().unwrap();
        assert!(!config.is_rule_enabled("WarningLevel"));
        assert!(config.is_rule_enabled("TreatWarningsAsErrors"));
    }

    #[test]
    fn load_reports_malformed_xml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("projcop.xml");
        fs::write(&path, "<Rules>").unwrap();

        let err = ConfigSource::Project(path).load().unwrap_err();
        assert!(err.downcast_ref::<projcop_core::XmlError>().is_some());
    }
}
