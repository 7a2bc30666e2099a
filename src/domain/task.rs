//! Checklist task model and parser
//!
//! A checklist item is a line of the form `- [c] text`, optionally indented.
//! Tasks carry no parent link: a level-1 task belongs to whichever level-0
//! task precedes it in the sequence.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static CHECKLIST_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)- \[(.)\] (.+)$").unwrap());

// ASCII word characters only, so `#work/開発` yields `#work/`.
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#[0-9A-Za-z_/]+").unwrap());

/// Indentation of a sub-item when a task is rendered back to a checklist line
const SUB_ITEM_INDENT: &str = "\t";

/// A single checklist item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    /// Item text with the checklist marker stripped
    pub content: String,

    /// 0 for a top-level item, 1 for any indented item
    pub level: u8,

    /// Character between the brackets
    pub check_char: char,

    /// Tags in order of appearance, duplicates kept
    pub tags: Vec<String>,

    /// Zero-based index within the parsed line sequence
    pub line_number: usize,

    /// Content starts with the schedule prefix
    pub is_schedule_item: bool,
}

impl Task {
    /// Parses one line, returning `None` when it is not a checklist item
    pub fn parse(line: &str, line_number: usize, schedule_prefix: &str) -> Option<Self> {
        let caps = CHECKLIST_LINE.captures(line)?;

        let indent = caps.get(1).map_or("", |m| m.as_str());
        let check_char = caps.get(2)?.as_str().chars().next()?;
        let content = caps.get(3)?.as_str();

        Some(Self {
            content: content.to_string(),
            level: if indent.is_empty() { 0 } else { 1 },
            check_char,
            tags: extract_tags(content),
            line_number,
            is_schedule_item: is_schedule_content(content, schedule_prefix),
        })
    }

    /// Returns true for a top-level item
    pub fn is_parent(&self) -> bool {
        self.level == 0
    }

    /// Renders the task back to a checklist line
    pub fn to_checklist_line(&self) -> String {
        let indent = if self.is_parent() { "" } else { SUB_ITEM_INDENT };
        format!("{}- [{}] {}", indent, self.check_char, self.content)
    }
}

/// Parses checklist items out of a line sequence, skipping everything else
pub fn parse_task_list<S: AsRef<str>>(lines: &[S], schedule_prefix: &str) -> Vec<Task> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| Task::parse(line.as_ref(), i, schedule_prefix))
        .collect()
}

/// Extracts `#tag` tokens from text
pub fn extract_tags(text: &str) -> Vec<String> {
    TAG.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

fn is_schedule_content(content: &str, schedule_prefix: &str) -> bool {
    content.trim_start().starts_with(schedule_prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SCHEDULE: &str = "📅";

    #[test]
    fn parse_top_level_task() {
        let task = Task::parse("- [x] Task 1 #work/dev", 0, SCHEDULE).unwrap();
        assert_eq!(task.content, "Task 1 #work/dev");
        assert_eq!(task.level, 0);
        assert_eq!(task.check_char, 'x');
        assert_eq!(task.tags, vec!["#work/dev"]);
        assert!(!task.is_schedule_item);
    }

    #[test]
    fn parse_unchecked_task() {
        let task = Task::parse("- [ ] Todo", 3, SCHEDULE).unwrap();
        assert_eq!(task.check_char, ' ');
        assert_eq!(task.line_number, 3);
    }

    #[test]
    fn any_indentation_is_level_one() {
        for line in ["\t- [k] Sub", "  - [k] Sub", "\t\t\t- [k] Sub"] {
            let task = Task::parse(line, 0, SCHEDULE).unwrap();
            assert_eq!(task.level, 1, "line {:?}", line);
            assert_eq!(task.content, "Sub");
        }
    }

    #[test]
    fn non_checklist_lines_are_skipped() {
        for line in [
            "",
            "Some text",
            "- plain bullet",
            "- [x]",
            "- [x] ",
            "- [xx] two chars",
            "* [x] star bullet",
            "## Heading",
        ] {
            assert!(Task::parse(line, 0, SCHEDULE).is_none(), "line {:?}", line);
        }
    }

    #[test]
    fn custom_check_chars() {
        let task = Task::parse("- [✓] Unicode mark", 0, SCHEDULE).unwrap();
        assert_eq!(task.check_char, '✓');
    }

    #[test]
    fn extract_multiple_tags_in_order() {
        assert_eq!(
            extract_tags("Fix #work/dev and #urgent then #work/dev again"),
            vec!["#work/dev", "#urgent", "#work/dev"]
        );
        assert!(extract_tags("no tags here").is_empty());
        assert_eq!(extract_tags("#a/b/c_d"), vec!["#a/b/c_d"]);
    }

    #[test]
    fn tags_stop_at_non_ascii() {
        assert_eq!(extract_tags("作業 #work/開発"), vec!["#work/"]);
        assert_eq!(extract_tags("#work/dev日本 #日本"), vec!["#work/dev"]);
        assert_eq!(extract_tags("今日やったこと #work/review"), vec!["#work/review"]);
    }

    #[test]
    fn schedule_items() {
        let task = Task::parse("- [x] 📅 10:30 Standup #work/mtg", 0, SCHEDULE).unwrap();
        assert!(task.is_schedule_item);

        let task = Task::parse("- [x]  📅 leading space", 0, SCHEDULE).unwrap();
        assert!(task.is_schedule_item);

        let task = Task::parse("- [x] Meeting 📅", 0, SCHEDULE).unwrap();
        assert!(!task.is_schedule_item);

        let task = Task::parse("- [x] 🗓️ other marker", 0, SCHEDULE).unwrap();
        assert!(!task.is_schedule_item);

    }

    #[test]
    fn empty_schedule_prefix_marks_every_task() {
        let task = Task::parse("- [x] anything", 0, "").unwrap();
        assert!(task.is_schedule_item);

        let task = Task::parse("\t- [k] sub", 0, "").unwrap();
        assert!(task.is_schedule_item);
    }

    #[test]
    fn parse_list_numbers_by_input_position() {
        let lines = ["intro", "- [x] Task 1", "", "\t- [k] Sub", "- [-] Task 2"];
        let tasks = parse_task_list(&lines, SCHEDULE);

        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].line_number, 1);
        assert_eq!(tasks[1].line_number, 3);
        assert_eq!(tasks[1].level, 1);
        assert_eq!(tasks[2].line_number, 4);
        assert_eq!(tasks[2].check_char, '-');
    }

    proptest! {
        #[test]
        fn checklist_line_round_trips(
            content in "[a-zA-Z0-9 #/_\\-\\[\\]()]{0,30}[a-zA-Z0-9]",
            check_char in prop::sample::select(vec![' ', 'x', '-', 'k', '>', '✓']),
            level in 0u8..=1,
            line_number in 0usize..1000,
        ) {
            let indent = if level == 0 { "" } else { "\t" };
            let line = format!("{}- [{}] {}", indent, check_char, content);
            let task = Task::parse(&line, line_number, SCHEDULE).unwrap();

            prop_assert_eq!(&task.content, &content);
            prop_assert_eq!(task.level, level);
            prop_assert_eq!(task.check_char, check_char);

            let reparsed = Task::parse(&task.to_checklist_line(), line_number, SCHEDULE).unwrap();
            prop_assert_eq!(reparsed, task);
        }

        #[test]
        fn tags_all_start_with_hash(text in "\\PC{0,40}") {
            for tag in extract_tags(&text) {
                prop_assert!(tag.starts_with('#'));
                prop_assert!(tag.len() > 1);
                prop_assert!(text.contains(&tag));
            }
        }
    }
}
