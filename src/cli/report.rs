//! Report command

use anyhow::{Context, Result};
use clap::Args;
use tracing::{error, info};

use super::args::{DocumentArgs, SettingsOverrides};
use super::clipboard::{Clipboard, SystemClipboard};
use super::output::Output;
use crate::domain::{build_report, Report, ReportError, Settings};
use crate::storage::{Config, DocumentSource};

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    #[command(flatten)]
    pub overrides: SettingsOverrides,

    /// Copy the report to the system clipboard instead of printing it
    #[arg(long, short)]
    pub copy: bool,
}

/// Result of running the pipeline against a document source
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The source had no document
    NoDocument { source: String },
    /// The document produced no report
    Empty(ReportError),
    /// A report is ready
    Ready(Report),
}

/// Reads the document and builds the report
pub fn generate(source: &dyn DocumentSource, settings: &Settings) -> Result<Outcome> {
    let Some(document) = source.read()? else {
        return Ok(Outcome::NoDocument {
            source: source.describe(),
        });
    };

    match build_report(&document, settings) {
        Ok(report) => Ok(Outcome::Ready(report)),
        Err(reason) => Ok(Outcome::Empty(reason)),
    }
}

/// Places the report on the clipboard
pub fn copy_report(clipboard: &mut dyn Clipboard, report: &Report) -> Result<()> {
    clipboard
        .write_text(&report.text)
        .context("Failed to copy to clipboard")
        .inspect_err(|e| error!("{:#}", e))?;
    info!(count = report.count, "copied report to clipboard");
    Ok(())
}

pub fn run(args: ReportArgs, config: &Config, output: &Output) -> Result<()> {
    let settings = args.overrides.apply(&config.settings);
    let source = args.document.source(&settings)?;

    match generate(source.as_ref(), &settings)? {
        Outcome::NoDocument { source } => {
            notify_empty(output, &format!("Nothing to do: {} does not exist", source));
        }
        Outcome::Empty(reason) => notify_empty(output, &reason.to_string()),
        Outcome::Ready(report) => {
            if args.copy {
                copy_report(&mut SystemClipboard, &report)?;
            }
            show_report(output, &report, &settings, args.copy);
        }
    }

    Ok(())
}

fn notify_empty(output: &Output, message: &str) {
    if output.is_json() {
        output.data(&serde_json::json!({
            "count": 0,
            "report": "",
            "notice": message,
        }));
    } else {
        output.notice(message);
    }
}

fn show_report(output: &Output, report: &Report, settings: &Settings, copied: bool) {
    if output.is_json() {
        output.data(&serde_json::json!({
            "count": report.count,
            "report": report.text,
            "heading": settings.target_heading,
            "copied": copied,
        }));
    } else if copied {
        output.success(&format!(
            "Copied {} task{} to clipboard",
            report.count,
            if report.count == 1 { "" } else { "s" }
        ));
    } else {
        output.text(&report.text);
    }
}
