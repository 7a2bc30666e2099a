//! Configuration handling for worklog
//!
//! Settings are stored as TOML. A run reads them from the first of:
//! an explicit `--config` path, the nearest `.worklog.toml` in the working
//! directory or a parent, or `~/.config/worklog/config.toml` (global).
//! A missing file means defaults; a malformed one is an error.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use crate::domain::{ConfigError, Settings};

/// File name of a project-local settings file
pub const PROJECT_CONFIG_FILE: &str = ".worklog.toml";

/// Persistence for the settings record
pub trait SettingsStore {
    /// Loads settings, or `None` if nothing has been stored yet
    fn load(&self) -> Result<Option<Settings>>;

    /// Replaces the stored settings
    fn save(&self, settings: &Settings) -> Result<()>;
}

/// Settings stored in a TOML file
#[derive(Debug, Clone)]
pub struct TomlSettingsStore {
    path: PathBuf,
}

impl TomlSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the settings file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the settings file exists
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

impl SettingsStore for TomlSettingsStore {
    fn load(&self) -> Result<Option<Settings>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config: {}", self.path.display()))?;

        let settings = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", self.path.display()))?;

        Ok(Some(settings))
    }

    /// Writes atomically (temp file + rename)
    fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| {
                format!("Failed to create config directory: {}", dir.display())
            })?;
        }

        let content = toml::to_string_pretty(settings).context("Failed to serialize config")?;

        let temp_path = self.path.with_extension("toml.tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })
    }
}

/// Where the active settings came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path given on the command line or in `WORKLOG_CONFIG`
    Explicit(PathBuf),
    /// A `.worklog.toml` found from the working directory upwards
    Project(PathBuf),
    /// The per-user config file
    Global(PathBuf),
    /// Nothing stored, built-in defaults
    Defaults,
}

impl ConfigSource {
    /// Returns the file backing this source, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Explicit(p) | ConfigSource::Project(p) | ConfigSource::Global(p) => {
                Some(p)
            }
            ConfigSource::Defaults => None,
        }
    }

    /// Short label for display
    pub fn label(&self) -> &'static str {
        match self {
            ConfigSource::Explicit(_) => "explicit",
            ConfigSource::Project(_) => "project",
            ConfigSource::Global(_) => "global",
            ConfigSource::Defaults => "defaults",
        }
    }
}

/// Resolved configuration for one invocation
#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    pub source: ConfigSource,
}

impl Config {
    /// Loads settings, honouring an explicit path if given
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let settings = TomlSettingsStore::new(path).load()?.unwrap_or_default();
            debug!(path = %path.display(), "loaded explicit config");
            return Ok(Self {
                settings,
                source: ConfigSource::Explicit(path.to_path_buf()),
            });
        }

        let candidates = Self::find_project_config()
            .map(ConfigSource::Project)
            .into_iter()
            .chain(Self::global_config_path().map(ConfigSource::Global));

        for source in candidates {
            let Some(path) = source.path() else { continue };
            if let Some(settings) = TomlSettingsStore::new(path).load()? {
                debug!(path = %path.display(), source = source.label(), "loaded config");
                return Ok(Self { settings, source });
            }
        }

        debug!("no config file found, using defaults");
        Ok(Self {
            settings: Settings::default(),
            source: ConfigSource::Defaults,
        })
    }

    /// Returns the store that writes should go to
    ///
    /// Writes follow reads: the file the settings came from, otherwise the
    /// global config file.
    pub fn writable_store(&self) -> Result<TomlSettingsStore> {
        let path = match self.source.path() {
            Some(path) => path.to_path_buf(),
            None => Self::global_config_path()
                .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?,
        };
        Ok(TomlSettingsStore::new(path))
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "worklog", "worklog").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Finds the nearest `.worklog.toml` from the working directory upwards
    pub fn find_project_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::find_project_config_from(&current)
    }

    /// Finds the nearest `.worklog.toml` from `start` upwards
    pub fn find_project_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(PROJECT_CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_none() {
        let dir = TempDir::new().unwrap();
        let store = TomlSettingsStore::new(dir.path().join("config.toml"));

        assert!(!store.exists());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = TomlSettingsStore::new(dir.path().join("nested").join("config.toml"));

        let mut settings = Settings::default();
        settings.target_heading = "## Done".to_string();
        settings.exclude_tag_patterns = vec!["#work/a".to_string(), "#work/b".to_string()];
        settings.canceled_check_char = '/';
        settings.daily_note_dir = Some(dir.path().join("daily"));

        store.save(&settings).unwrap();
        assert!(store.exists());

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn atomic_write_no_temp_file_left() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let store = TomlSettingsStore::new(&path);

        store.save(&Settings::default()).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "target_heading = [unclosed").unwrap();

        let err = TomlSettingsStore::new(&path).load().unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config"));
    }

    #[test]
    fn explicit_path_missing_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.settings, Settings::default());
        assert_eq!(config.source, ConfigSource::Explicit(path.clone()));
        assert_eq!(config.writable_store().unwrap().path(), path);
    }

    #[test]
    fn explicit_path_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("worklog.toml");
        fs::write(&path, "target_tag_prefix = \"#job/\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.settings.target_tag_prefix, "#job/");
        assert_eq!(config.source.label(), "explicit");
    }

    #[test]
    fn project_config_found_from_subdirectory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PROJECT_CONFIG_FILE), "").unwrap();

        let sub_dir = dir.path().join("notes").join("2024");
        fs::create_dir_all(&sub_dir).unwrap();

        let found = Config::find_project_config_from(&sub_dir);
        assert_eq!(found, Some(dir.path().join(PROJECT_CONFIG_FILE)));
    }

    #[test]
    fn project_config_absent() {
        let dir = TempDir::new().unwrap();
        let sub_dir = dir.path().join("a");
        fs::create_dir_all(&sub_dir).unwrap();

        // A stray .worklog.toml higher up the real filesystem would be found,
        // so only check that nothing inside the temp dir matches.
        let found = Config::find_project_config_from(&sub_dir);
        assert!(found.map_or(true, |p| !p.starts_with(dir.path())));
    }
}
