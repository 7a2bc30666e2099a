//! # Command-Line Interface
//!
//! The host side of the pipeline: reads the document, resolves settings,
//! and delivers the report.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `report` | Build the work log, print it or `--copy` it to the clipboard |
//! | `tasks` | List parsed checklist items (`--all` skips filtering) |
//! | `config` | `show`, `path`, `get`, `set`, `init` |
//!
//! ## Output Formats
//!
//! All commands support `--format`:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug logs on stderr; `RUST_LOG` works too:
//! ```bash
//! worklog --verbose report note.md
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod args;
mod clipboard;
mod config_cmd;
mod output;
mod report;
mod tasks;

pub use app::{run, Cli, Commands};
pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard, SystemClipboard};
pub use output::{Output, OutputFormat};
pub use report::{copy_report, generate, Outcome};
