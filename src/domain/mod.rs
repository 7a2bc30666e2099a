//! Domain models for the work log pipeline
//!
//! Contains the core business logic without any I/O concerns. Data flows
//! one way: [`outline`] slices a section out of the document, [`task`]
//! parses its checklist, [`filter`] selects reportable tasks, and
//! [`report`] rewrites them through [`transform`] into the final list.

pub mod filter;
pub mod outline;
pub mod report;
pub mod settings;
pub mod task;
pub mod transform;

pub use filter::{filter_by_tag, filter_sub_items, TagFilter};
pub use outline::{locate_section, SubHeadings};
pub use report::{build_report, extract_tasks, filter_tasks, format_tasks, Report, ReportError};
pub use settings::{ConfigError, Settings, SETTING_KEYS};
pub use task::{parse_task_list, Task};
pub use transform::{format_task_content, ContentTransformer};
