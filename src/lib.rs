//! worklog - turn a daily note checklist into a publishable work log
//!
//! The checklist under a target heading is parsed into tasks, filtered by
//! tag and check character, and rewritten into a compact bullet list ready
//! to paste into a status update.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{build_report, Report, ReportError, Settings, Task};
