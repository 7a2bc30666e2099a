//! Config commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::domain::{ConfigError, Settings, SETTING_KEYS};
use crate::storage::{Config, SettingsStore, TomlSettingsStore, PROJECT_CONFIG_FILE};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the active settings
    Show,

    /// Show which settings file is in use
    Path,

    /// Print a single setting
    Get {
        /// Setting name
        key: String,
    },

    /// Change a single setting
    ///
    /// Examples:
    ///   worklog config set target_heading "## Done today"
    ///   worklog config set exclude_tag_patterns "#work/routine,#work/meeting"
    ///   worklog config set include_sub_headings true
    Set {
        /// Setting name
        key: String,

        /// New value
        value: String,
    },

    /// Write a settings file with the defaults
    Init {
        /// Create `.worklog.toml` in the current directory
        #[arg(long)]
        project: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(cmd: ConfigCommands, config: &Config, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(config, output),
        ConfigCommands::Path => path(config, output),
        ConfigCommands::Get { key } => get(config, output, &key),
        ConfigCommands::Set { key, value } => set(config, output, &key, &value),
        ConfigCommands::Init { project, force } => init(config, output, project, force),
    }
}

fn show(config: &Config, output: &Output) -> Result<()> {
    if output.is_json() {
        output.data(&config.settings);
        return Ok(());
    }

    match config.source.path() {
        Some(path) => println!("# {} ({})", path.display(), config.source.label()),
        None => println!("# built-in defaults"),
    }
    print!("{}", toml::to_string_pretty(&config.settings)?);
    Ok(())
}

fn path(config: &Config, output: &Output) -> Result<()> {
    let store = config.writable_store()?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "source": config.source.label(),
            "path": store.path().display().to_string(),
            "exists": store.exists(),
        }));
    } else {
        println!("{}", store.path().display());
    }
    Ok(())
}

fn get(config: &Config, output: &Output, key: &str) -> Result<()> {
    let value = config.settings.get(key)?;

    if output.is_json() {
        output.data(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }
    Ok(())
}

fn set(config: &Config, output: &Output, key: &str, value: &str) -> Result<()> {
    let mut settings = config.settings.clone();
    settings.set(key, value).map_err(|e| match e {
        ConfigError::UnknownKey(_) => {
            anyhow::anyhow!("{}. Known keys: {}", e, SETTING_KEYS.join(", "))
        }
        other => other.into(),
    })?;

    let store = config.writable_store()?;
    store.save(&settings)?;

    output.success(&format!(
        "Set {} = {} in {}",
        key,
        settings.get(key)?,
        store.path().display()
    ));
    Ok(())
}

fn init(config: &Config, output: &Output, project: bool, force: bool) -> Result<()> {
    let store = if project {
        TomlSettingsStore::new(std::env::current_dir()?.join(PROJECT_CONFIG_FILE))
    } else {
        config.writable_store()?
    };

    if store.exists() && !force {
        anyhow::bail!(
            "Config already exists at {} (use --force to overwrite)",
            store.path().display()
        );
    }

    store.save(&Settings::default())?;
    output.success(&format!("Wrote default settings to {}", store.path().display()));
    Ok(())
}
