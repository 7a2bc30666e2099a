//! Work log assembly
//!
//! [`build_report`] is the pipeline entry point: it locates the configured
//! section, parses and filters its checklist, and formats what is left.
//! [`format_tasks`] is the last stage on its own.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::filter::{filter_by_tag, filter_sub_items};
use super::outline::locate_section;
use super::settings::Settings;
use super::task::{parse_task_list, Task};
use super::transform::{apply_strikethrough, ContentTransformer};

const SUB_ITEM_INDENT: &str = "    ";

/// Reasons a run produces no report
///
/// None of these is fatal; they are surfaced to the user as notices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("Heading '{heading}' was not found")]
    HeadingNotFound { heading: String },

    #[error("No tasks found under '{heading}'")]
    NoTasks { heading: String },

    #[error("No tasks to report after filtering")]
    NothingToReport,
}

/// A formatted work log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Number of tasks in the report, sub-items included
    pub count: usize,

    /// The formatted bullet list
    pub text: String,
}

/// Extracts the tasks under the configured heading, unfiltered
pub fn extract_tasks(document: &str, settings: &Settings) -> Result<Vec<Task>, ReportError> {
    let heading = settings.target_heading.as_str();
    let Some(lines) = locate_section(document, heading, settings.include_sub_headings.into())
    else {
        debug!(heading, "target heading not found");
        return Err(ReportError::HeadingNotFound {
            heading: heading.to_string(),
        });
    };
    debug!(heading, lines = lines.len(), "collected section");

    let tasks = parse_task_list(&lines, &settings.schedule_prefix);
    debug!(tasks = tasks.len(), "parsed checklist");
    Ok(tasks)
}

/// Applies the tag filter, then the sub-item filter
pub fn filter_tasks(tasks: Vec<Task>, settings: &Settings) -> Vec<Task> {
    let tagged = filter_by_tag(
        tasks,
        &settings.target_tag_prefix,
        &settings.exclude_tag_patterns,
        settings.include_schedule_items,
    );
    debug!(tasks = tagged.len(), "after tag filter");

    let filtered = filter_sub_items(tagged, settings.sub_item_check_char);
    debug!(tasks = filtered.len(), "after sub-item filter");
    filtered
}

/// Runs the whole pipeline over a document
pub fn build_report(document: &str, settings: &Settings) -> Result<Report, ReportError> {
    let tasks = extract_tasks(document, settings)?;
    if tasks.is_empty() {
        return Err(ReportError::NoTasks {
            heading: settings.target_heading.clone(),
        });
    }

    let filtered = filter_tasks(tasks, settings);
    if filtered.is_empty() {
        return Err(ReportError::NothingToReport);
    }

    Ok(Report {
        count: filtered.len(),
        text: format_tasks(&filtered, settings),
    })
}

/// Formats tasks as an indented bullet list, one line per task
pub fn format_tasks(tasks: &[Task], settings: &Settings) -> String {
    let transformer = ContentTransformer::new(settings);
    tasks
        .iter()
        .map(|task| format_task(task, &transformer, settings))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_task(task: &Task, transformer: &ContentTransformer, settings: &Settings) -> String {
    let mut content = transformer.apply(&task.content);

    let prefix = settings.schedule_prefix.as_str();
    if task.content.starts_with(prefix) && !content.starts_with(prefix) {
        content = format!("{} {}", prefix, content);
    }

    if task.check_char == settings.canceled_check_char {
        content = apply_strikethrough(&content);
    }

    let indent = if task.is_parent() { "" } else { SUB_ITEM_INDENT };
    format!("{}- {}", indent, content)
}
