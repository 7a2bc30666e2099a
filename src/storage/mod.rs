//! # Storage Layer
//!
//! Everything the pipeline reads from outside: the settings file and the
//! markdown document to report on.
//!
//! ## Settings Locations
//!
//! | Source | Location |
//! |--------|----------|
//! | Explicit | `--config <path>` or `$WORKLOG_CONFIG` |
//! | Project | nearest `.worklog.toml` from the working directory up |
//! | Global | `~/.config/worklog/config.toml` (platform config dir) |
//!
//! The first existing file wins; with none, built-in defaults apply.
//!
//! ## Document Sources
//!
//! - [`FileDocument`] - a markdown file given on the command line
//! - [`StdinDocument`] - text piped on standard input
//! - [`DailyNote`] - `<daily_note_dir>/<date>.md` for a given day
//!
//! ## Key Types
//!
//! - [`Config`] - resolved settings plus where they came from
//! - [`SettingsStore`] - load/save seam, implemented by [`TomlSettingsStore`]
//! - [`DocumentSource`] - read seam for the document text

mod config;
mod document;

pub use config::{Config, ConfigSource, SettingsStore, TomlSettingsStore, PROJECT_CONFIG_FILE};
pub use document::{DailyNote, DocumentSource, FileDocument, StdinDocument, TextDocument};
