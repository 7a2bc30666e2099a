//! Task filtering
//!
//! Two independent passes, applied in order: [`filter_by_tag`] decides which
//! top-level tasks are reportable, then [`filter_sub_items`] decides which
//! sub-items are kept. Neither pass looks at the other's criteria, so a
//! sub-item can survive even when the task above it was dropped.

use super::task::Task;

/// Tag-based selection of top-level tasks
#[derive(Debug, Clone, Copy)]
pub struct TagFilter<'a> {
    /// Prefix a tag needs for its task to be kept
    pub tag_prefix: &'a str,

    /// Whole tags that drop a task
    pub exclude_patterns: &'a [String],

    /// Keep schedule items regardless of their tags
    pub include_schedule_items: bool,
}

impl TagFilter<'_> {
    /// Returns true if the task survives the tag filter
    ///
    /// Sub-items always pass; their fate is decided by [`filter_sub_items`].
    pub fn accepts(&self, task: &Task) -> bool {
        if !task.is_parent() {
            return true;
        }

        if self.is_excluded(task) {
            return false;
        }

        if self.include_schedule_items && task.is_schedule_item {
            return true;
        }

        task.tags.iter().any(|tag| tag.starts_with(self.tag_prefix))
    }

    fn is_excluded(&self, task: &Task) -> bool {
        task.tags
            .iter()
            .any(|tag| self.exclude_patterns.iter().any(|pattern| pattern == tag))
    }
}

/// Keeps sub-items and the top-level tasks selected by tag
pub fn filter_by_tag(
    tasks: Vec<Task>,
    tag_prefix: &str,
    exclude_patterns: &[String],
    include_schedule_items: bool,
) -> Vec<Task> {
    let filter = TagFilter {
        tag_prefix,
        exclude_patterns,
        include_schedule_items,
    };

    tasks.into_iter().filter(|task| filter.accepts(task)).collect()
}

/// Keeps top-level tasks and the sub-items marked with `check_char`
pub fn filter_sub_items(tasks: Vec<Task>, check_char: char) -> Vec<Task> {
    tasks
        .into_iter()
        .filter(|task| task.is_parent() || task.check_char == check_char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::extract_tags;
    use proptest::prelude::*;

    fn task(content: &str, level: u8, check_char: char) -> Task {
        Task {
            content: content.to_string(),
            level,
            check_char,
            tags: extract_tags(content),
            line_number: 0,
            is_schedule_item: content.starts_with("📅"),
        }
    }

    fn excludes() -> Vec<String> {
        vec!["#work/routine".to_string()]
    }

    fn contents(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.content.as_str()).collect()
    }

    #[test]
    fn keeps_tasks_with_target_prefix() {
        let tasks = vec![
            task("Task 1 #work/dev", 0, 'x'),
            task("Task 2 #personal", 0, 'x'),
            task("Task 3 #work/review", 0, 'x'),
            task("Task 4", 0, 'x'),
        ];

        let filtered = filter_by_tag(tasks, "#work/", &excludes(), false);
        assert_eq!(contents(&filtered), vec!["Task 1 #work/dev", "Task 3 #work/review"]);
    }

    #[test]
    fn excluded_tag_wins_over_target_tag() {
        let tasks = vec![
            task("Daily standup #work/routine", 0, 'x'),
            task("Standup and dev #work/routine #work/dev", 0, 'x'),
            task("Routine-ish #work/routine2", 0, 'x'),
        ];

        let filtered = filter_by_tag(tasks, "#work/", &excludes(), false);
        assert_eq!(contents(&filtered), vec!["Routine-ish #work/routine2"]);
    }

    #[test]
    fn exclusion_is_independent_of_prefix() {
        let tasks = vec![task("Task #work/dev #private", 0, 'x')];
        let filtered = filter_by_tag(tasks, "#work/", &["#private".to_string()], false);
        assert!(filtered.is_empty());
    }

    #[test]
    fn japanese_tags_match_on_ascii_part() {
        // `#work/開発` is scanned as `#work/`, which the exclusion does not name
        let tasks = vec![task("作業 #work/開発", 0, 'x')];
        let filtered = filter_by_tag(tasks, "#work/", &["#work/開発".to_string()], false);
        assert_eq!(contents(&filtered), vec!["作業 #work/開発"]);
    }

    #[test]
    fn sub_items_pass_tag_filter() {
        let tasks = vec![
            task("Parent #personal", 0, 'x'),
            task("Child without tag", 1, 'k'),
            task("Child #work/routine", 1, 'x'),
        ];

        let filtered = filter_by_tag(tasks, "#work/", &excludes(), false);
        assert_eq!(contents(&filtered), vec!["Child without tag", "Child #work/routine"]);
    }

    #[test]
    fn schedule_items_need_tag_unless_included() {
        let tasks = vec![
            task("📅 10:00 Standup", 0, 'x'),
            task("📅 11:00 Review #work/dev", 0, 'x'),
        ];

        let filtered = filter_by_tag(tasks.clone(), "#work/", &excludes(), false);
        assert_eq!(contents(&filtered), vec!["📅 11:00 Review #work/dev"]);

        let filtered = filter_by_tag(tasks, "#work/", &excludes(), true);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn included_schedule_items_still_honour_exclusions() {
        let tasks = vec![
            task("📅 09:00 Routine sync #work/routine", 0, 'x'),
            task("📅 13:00 Lunch #personal", 0, 'x'),
        ];

        let filtered = filter_by_tag(tasks, "#work/", &excludes(), true);
        assert_eq!(contents(&filtered), vec!["📅 13:00 Lunch #personal"]);
    }

    #[test]
    fn sub_items_filtered_by_check_char() {
        let tasks = vec![
            task("Parent", 0, 'x'),
            task("Kept", 1, 'k'),
            task("Done sub", 1, 'x'),
            task("Open sub", 1, ' '),
            task("Canceled parent", 0, '-'),
        ];

        let filtered = filter_sub_items(tasks, 'k');
        assert_eq!(contents(&filtered), vec!["Parent", "Kept", "Canceled parent"]);
    }

    #[test]
    fn filters_compose_without_parent_link() {
        let tasks = vec![
            task("Dropped parent #personal", 0, 'x'),
            task("Orphan kept", 1, 'k'),
            task("Orphan dropped", 1, 'x'),
            task("Kept parent #work/dev", 0, 'x'),
        ];

        let filtered = filter_sub_items(filter_by_tag(tasks, "#work/", &excludes(), false), 'k');
        assert_eq!(contents(&filtered), vec!["Orphan kept", "Kept parent #work/dev"]);
    }

    #[test]
    fn empty_input() {
        assert!(filter_by_tag(vec![], "#work/", &excludes(), true).is_empty());
        assert!(filter_sub_items(vec![], 'k').is_empty());
    }

    proptest! {
        #[test]
        fn tag_filter_never_drops_sub_items_or_keeps_untagged_parents(
            items in prop::collection::vec(
                (
                    prop::sample::select(vec!["#work/dev", "#work/routine", "#home", "#workx", ""]),
                    0u8..=1,
                ),
                0..20,
            ),
        ) {
            let tasks: Vec<Task> = items
                .iter()
                .map(|(tag, level)| task(&format!("Item {}", tag), *level, 'x'))
                .collect();
            let sub_items = tasks.iter().filter(|t| t.level == 1).count();

            let filtered = filter_by_tag(tasks, "#work/", &excludes(), false);

            prop_assert_eq!(filtered.iter().filter(|t| t.level == 1).count(), sub_items);
            for kept in filtered.iter().filter(|t| t.level == 0) {
                prop_assert!(kept.tags.iter().any(|t| t.starts_with("#work/")));
                prop_assert!(!kept.tags.iter().any(|t| t == "#work/routine"));
            }
        }
    }
}
