//! Arguments shared by the report and tasks commands

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;

use crate::domain::Settings;
use crate::storage::{DailyNote, DocumentSource, FileDocument, StdinDocument};

/// Which document to read
#[derive(Debug, Args)]
pub struct DocumentArgs {
    /// Markdown file to read (defaults to today's daily note)
    #[arg(conflicts_with_all = ["stdin", "date"])]
    pub file: Option<PathBuf>,

    /// Read the document from standard input
    #[arg(long, conflicts_with = "date")]
    pub stdin: bool,

    /// Daily note date (YYYY-MM-DD) instead of today
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

impl DocumentArgs {
    /// Resolves the document source for these arguments
    pub fn source(&self, settings: &Settings) -> Result<Box<dyn DocumentSource>> {
        if let Some(file) = &self.file {
            return Ok(Box::new(FileDocument::new(file)));
        }

        if self.stdin {
            return Ok(Box::new(StdinDocument));
        }

        let dir = settings.daily_note_dir.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "No document given. Pass a FILE, use --stdin, or set daily_note_dir with 'worklog config set'."
            )
        })?;
        let date = self.date.unwrap_or_else(|| Local::now().date_naive());

        Ok(Box::new(DailyNote::new(dir, &settings.daily_note_format, date)?))
    }
}

/// One-off changes to the loaded settings
#[derive(Debug, Args, Default)]
pub struct SettingsOverrides {
    /// Heading whose section holds the checklist
    #[arg(long)]
    pub heading: Option<String>,

    /// Tag prefix that marks reportable tasks
    #[arg(long)]
    pub tag_prefix: Option<String>,

    /// Tag that drops a task (repeatable, replaces the configured list)
    #[arg(long = "exclude", value_name = "TAG")]
    pub exclude: Vec<String>,

    /// Keep schedule items regardless of tags
    #[arg(long)]
    pub include_schedule_items: bool,

    /// Collect tasks under sub-headings too
    #[arg(long)]
    pub include_sub_headings: bool,

    /// Leave `^block-id` anchors in place
    #[arg(long)]
    pub keep_anchors: bool,
}

impl SettingsOverrides {
    /// Returns a copy of `settings` with these overrides applied
    pub fn apply(&self, settings: &Settings) -> Settings {
        let mut settings = settings.clone();

        if let Some(heading) = &self.heading {
            settings.target_heading = heading.clone();
        }
        if let Some(prefix) = &self.tag_prefix {
            settings.target_tag_prefix = prefix.clone();
        }
        if !self.exclude.is_empty() {
            settings.exclude_tag_patterns = self.exclude.clone();
        }
        if self.include_schedule_items {
            settings.include_schedule_items = true;
        }
        if self.include_sub_headings {
            settings.include_sub_headings = true;
        }
        if self.keep_anchors {
            settings.remove_anchors = false;
        }

        settings
    }
}
