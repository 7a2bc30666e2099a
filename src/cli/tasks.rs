//! Tasks command: inspect parsed checklist items

use anyhow::Result;
use clap::Args;

use super::args::{DocumentArgs, SettingsOverrides};
use super::output::Output;
use crate::domain::{extract_tasks, filter_tasks, Task};
use crate::storage::Config;

#[derive(Debug, Args)]
pub struct TasksArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    #[command(flatten)]
    pub overrides: SettingsOverrides,

    /// Show every checklist item under the heading, not just reportable ones
    #[arg(long)]
    pub all: bool,
}

pub fn run(args: TasksArgs, config: &Config, output: &Output) -> Result<()> {
    let settings = args.overrides.apply(&config.settings);
    let source = args.document.source(&settings)?;

    let Some(document) = source.read()? else {
        output.notice(&format!("Nothing to do: {} does not exist", source.describe()));
        return Ok(());
    };

    let tasks = match extract_tasks(&document, &settings) {
        Ok(tasks) => tasks,
        Err(reason) => {
            output.notice(&reason.to_string());
            return Ok(());
        }
    };

    let tasks = if args.all {
        tasks
    } else {
        filter_tasks(tasks, &settings)
    };

    if output.is_json() {
        output.data(&tasks);
    } else if tasks.is_empty() {
        println!("No tasks found.");
    } else {
        print_table(&tasks);
    }

    Ok(())
}

fn print_table(tasks: &[Task]) {
    println!("{:<6} {:<5} {:<5} CONTENT", "LINE", "LEVEL", "CHECK");
    println!("{}", "-".repeat(60));
    for task in tasks {
        let marker = if task.is_schedule_item { " (schedule)" } else { "" };
        println!(
            "{:<6} {:<5} [{}]   {}{}",
            task.line_number, task.level, task.check_char, task.content, marker
        );
    }
    println!();
    println!("{} task(s)", tasks.len());
}
