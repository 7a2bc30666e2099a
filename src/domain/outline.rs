//! Outline scanning
//!
//! Finds a heading in a markdown document and slices out the lines of its
//! section. A section ends at the next heading of the same or a higher
//! level. Sub-headings either end the section or are skipped over,
//! depending on [`SubHeadings`].

use std::sync::LazyLock;

use regex::Regex;

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s").unwrap());

/// What to do with sub-headings of the target heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubHeadings {
    /// The first sub-heading closes the section
    #[default]
    Stop,
    /// Sub-heading lines are dropped and collection continues
    Include,
}

impl From<bool> for SubHeadings {
    fn from(include: bool) -> Self {
        if include {
            SubHeadings::Include
        } else {
            SubHeadings::Stop
        }
    }
}

/// Returns the heading level of a line, or `None` if it is not a heading
///
/// Surrounding whitespace is ignored, so `"  ## Notes"` is a level-2 heading.
pub fn heading_level(line: &str) -> Option<usize> {
    HEADING
        .captures(line.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.len())
}

/// Returns the index of the first line equal to `heading`, both sides trimmed
pub fn find_heading(document: &str, heading: &str) -> Option<usize> {
    let heading = heading.trim();
    document.lines().position(|line| line.trim() == heading)
}

/// Collects the lines of the section under `heading`
///
/// Returns `None` when the heading does not occur in the document, and an
/// empty vector when it does but its section has no lines.
///
/// If `heading` itself is not a heading line, every heading after it counts
/// as a sub-heading.
pub fn locate_section<'a>(
    document: &'a str,
    heading: &str,
    sub_headings: SubHeadings,
) -> Option<Vec<&'a str>> {
    let start = find_heading(document, heading)?;
    let target_level = heading_level(heading);

    let mut section = Vec::new();
    for line in document.lines().skip(start + 1) {
        let Some(level) = heading_level(line) else {
            section.push(line);
            continue;
        };

        if target_level.is_some_and(|target| level <= target) {
            break;
        }

        match sub_headings {
            SubHeadings::Stop => break,
            SubHeadings::Include => continue,
        }
    }

    Some(section)
}
