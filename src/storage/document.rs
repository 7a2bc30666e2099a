//! Document sources
//!
//! A document source hands the pipeline the full text of one markdown note.
//! `Ok(None)` means there is nothing to operate on (the note does not exist).

use std::fmt::Write as _;
use std::fs;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::domain::ConfigError;

/// Supplies the text of the document to report on
pub trait DocumentSource {
    /// Reads the whole document, or `None` if there is no document
    fn read(&self) -> Result<Option<String>>;

    /// Describes the source for messages
    fn describe(&self) -> String;
}

/// A markdown file on disk
#[derive(Debug, Clone)]
pub struct FileDocument {
    path: PathBuf,
}

impl FileDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for FileDocument {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read document: {}", self.path.display())),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Standard input, read to the end
#[derive(Debug, Clone, Default)]
pub struct StdinDocument;

impl DocumentSource for StdinDocument {
    fn read(&self) -> Result<Option<String>> {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read document from stdin")?;
        Ok(Some(content))
    }

    fn describe(&self) -> String {
        "<stdin>".to_string()
    }
}

/// The daily note for a given date
///
/// The file is `<dir>/<date formatted with format>.md`.
#[derive(Debug, Clone)]
pub struct DailyNote {
    file: FileDocument,
}

impl DailyNote {
    pub fn new(dir: &Path, format: &str, date: NaiveDate) -> Result<Self> {
        Ok(Self {
            file: FileDocument::new(Self::path_for(dir, format, date)?),
        })
    }

    /// Returns the note path for a date
    pub fn path_for(dir: &Path, format: &str, date: NaiveDate) -> Result<PathBuf> {
        let mut stem = String::new();
        write!(stem, "{}", date.format(format)).map_err(|_| {
            ConfigError::Invalid(format!(
                "daily_note_format '{}' is not a valid date format",
                format
            ))
        })?;
        Ok(dir.join(format!("{}.md", stem)))
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl DocumentSource for DailyNote {
    fn read(&self) -> Result<Option<String>> {
        self.file.read()
    }

    fn describe(&self) -> String {
        format!("daily note {}", self.file.describe())
    }
}

/// Text already in memory
#[derive(Debug, Clone)]
pub struct TextDocument(pub String);

impl DocumentSource for TextDocument {
    fn read(&self) -> Result<Option<String>> {
        Ok(Some(self.0.clone()))
    }

    fn describe(&self) -> String {
        "<text>".to_string()
    }
}
