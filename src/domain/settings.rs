//! Report settings
//!
//! The settings record is read-only for the duration of a run. It is loaded
//! once per invocation (see [`crate::storage::Config`]), overridden from the
//! command line where requested, and passed by reference through the pipeline.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Unknown configuration key: '{0}'")]
    UnknownKey(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Keys accepted by [`Settings::set`], in display order
pub const SETTING_KEYS: &[&str] = &[
    "target_heading",
    "target_tag_prefix",
    "exclude_tag_patterns",
    "sub_item_check_char",
    "canceled_check_char",
    "schedule_prefix",
    "include_schedule_items",
    "include_sub_headings",
    "remove_anchors",
    "daily_note_dir",
    "daily_note_format",
];

/// Configuration for extracting and formatting a work log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Heading line whose section holds the checklist
    pub target_heading: String,

    /// Tag prefix that marks a reportable task (e.g. `#work/`)
    pub target_tag_prefix: String,

    /// Tags that exclude a task, matched against whole tags
    pub exclude_tag_patterns: Vec<String>,

    /// Check character a sub-item needs to be kept
    pub sub_item_check_char: char,

    /// Check character that marks a canceled task
    pub canceled_check_char: char,

    /// Marker at the start of calendar-linked entries
    pub schedule_prefix: String,

    /// Keep schedule items even when they carry no target tag
    pub include_schedule_items: bool,

    /// Keep collecting past sub-headings of the target heading
    pub include_sub_headings: bool,

    /// Strip `^block-id` anchors from task text
    pub remove_anchors: bool,

    /// Directory holding daily notes
    pub daily_note_dir: Option<PathBuf>,

    /// `strftime` pattern of daily note file stems
    pub daily_note_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_heading: "## 今日やったこと".to_string(),
            target_tag_prefix: "#work/".to_string(),
            exclude_tag_patterns: vec!["#work/routine".to_string()],
            sub_item_check_char: 'k',
            canceled_check_char: '-',
            schedule_prefix: "📅".to_string(),
            include_schedule_items: false,
            include_sub_headings: false,
            remove_anchors: true,
            daily_note_dir: None,
            daily_note_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl Settings {
    /// Updates a single field from its textual form
    ///
    /// `exclude_tag_patterns` takes a comma-separated list; entries are trimmed
    /// and empty entries dropped. An empty `daily_note_dir` clears it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "target_heading" => self.target_heading = value.to_string(),
            "target_tag_prefix" => self.target_tag_prefix = value.to_string(),
            "exclude_tag_patterns" => self.exclude_tag_patterns = parse_pattern_list(value),
            "sub_item_check_char" => self.sub_item_check_char = parse_check_char(key, value)?,
            "canceled_check_char" => self.canceled_check_char = parse_check_char(key, value)?,
            "schedule_prefix" => self.schedule_prefix = value.to_string(),
            "include_schedule_items" => self.include_schedule_items = parse_bool(key, value)?,
            "include_sub_headings" => self.include_sub_headings = parse_bool(key, value)?,
            "remove_anchors" => self.remove_anchors = parse_bool(key, value)?,
            "daily_note_dir" => {
                self.daily_note_dir = if value.trim().is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            "daily_note_format" => {
                if value.trim().is_empty() {
                    return Err(ConfigError::Invalid(
                        "daily_note_format must not be empty".to_string(),
                    ));
                }
                self.daily_note_format = value.to_string()
            }
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// Returns the textual form of a field, as accepted by [`Settings::set`]
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "target_heading" => self.target_heading.clone(),
            "target_tag_prefix" => self.target_tag_prefix.clone(),
            "exclude_tag_patterns" => self.exclude_tag_patterns.join(","),
            "sub_item_check_char" => self.sub_item_check_char.to_string(),
            "canceled_check_char" => self.canceled_check_char.to_string(),
            "schedule_prefix" => self.schedule_prefix.clone(),
            "include_schedule_items" => self.include_schedule_items.to_string(),
            "include_sub_headings" => self.include_sub_headings.to_string(),
            "remove_anchors" => self.remove_anchors.to_string(),
            "daily_note_dir" => self
                .daily_note_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            "daily_note_format" => self.daily_note_format.clone(),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }
}

fn parse_pattern_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_check_char(key: &str, value: &str) -> Result<char, ConfigError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConfigError::Invalid(format!(
            "{} must be exactly one character, got '{}'",
            key, value
        ))),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ConfigError::Invalid(format!(
            "{} expects true or false, got '{}'",
            key, value
        ))),
    }
}
