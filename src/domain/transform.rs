//! Task text rewriting
//!
//! Each rewrite is a pure function over a string and is a no-op when its
//! pattern is absent. [`ContentTransformer`] chains them in a fixed order:
//!
//! 1. tag stylization (`#work/dev` → `*dev*`)
//! 2. internal link unwrapping (`[[note|alias]]` → `alias`)
//! 3. anchor stripping (`text ^block-1` → `text`), when enabled
//! 4. GitHub issue/PR URL shortening
//!
//! GitHub URLs are shortened last so the links it produces are not unwrapped
//! again by step 2.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::settings::Settings;

static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

static WIKI_LINK_ALIAS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]|]+)\|([^\]]+)\]\]").unwrap());

static WIKI_LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").unwrap());

static ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\^[0-9A-Za-z_-]+|#\^[0-9A-Za-z_-]+").unwrap());

static GITHUB_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https://github\.com/([^/]+)/([^/]+)/(issues|pulls)/(\d+)(\S*)").unwrap()
});

/// Rewrites tags carrying `prefix` to `*suffix*`
///
/// The prefix is matched literally. An empty prefix leaves the text alone.
pub fn convert_tag(text: &str, prefix: &str) -> String {
    match tag_pattern(prefix) {
        Some(pattern) => pattern.replace_all(text, "*${1}*").into_owned(),
        None => text.to_string(),
    }
}

fn tag_pattern(prefix: &str) -> Option<Regex> {
    if prefix.is_empty() {
        return None;
    }
    // An escaped literal followed by an ASCII word class always compiles.
    Regex::new(&format!(r"{}([0-9A-Za-z_]+)", regex::escape(prefix))).ok()
}

/// Unwraps internal links to their visible text
///
/// `[label](target)` becomes `label` unless the target is an `http(s)://`
/// URL. `[[target|alias]]` becomes `alias` and `[[target]]` becomes `target`.
/// Scanning resumes inside an external link, so internal links nested in
/// its target are still unwrapped.
pub fn remove_internal_links(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut copied = 0;
    let mut search_from = 0;

    while let Some(caps) = MARKDOWN_LINK.captures_at(text, search_from) {
        let Some(link) = caps.get(0) else { break };

        let target = &caps[2];
        if target.starts_with("http://") || target.starts_with("https://") {
            // `[` is one byte, so this stays on a char boundary
            search_from = link.start() + 1;
            continue;
        }

        result.push_str(&text[copied..link.start()]);
        result.push_str(&caps[1]);
        copied = link.end();
        search_from = link.end();
    }
    result.push_str(&text[copied..]);

    let result = WIKI_LINK_ALIAS.replace_all(&result, "${2}");
    WIKI_LINK.replace_all(&result, "${1}").into_owned()
}

/// Removes `^block-id` anchors
///
/// An anchor counts only after whitespace (removed with it) or after `#`
/// (which is kept), so `5^2` survives.
pub fn remove_anchors(text: &str) -> String {
    ANCHOR
        .replace_all(text, |caps: &Captures| {
            if caps[0].starts_with('#') {
                "#"
            } else {
                ""
            }
        })
        .into_owned()
}

/// Shortens GitHub issue and PR URLs to `[repo#123](url)`
///
/// URLs sitting in the target of a markdown link (right after `](`) are left
/// as they are.
pub fn format_github_url(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut copied = 0;
    let mut search_from = 0;

    while let Some(caps) = GITHUB_URL.captures_at(text, search_from) {
        let Some(url) = caps.get(0) else { break };

        if text[..url.start()].ends_with("](") {
            search_from = url.start() + 1;
            continue;
        }

        result.push_str(&text[copied..url.start()]);
        result.push_str(&format!("[{}#{}]({})", &caps[2], &caps[4], url.as_str()));
        copied = url.end();
        search_from = url.end();
    }

    result.push_str(&text[copied..]);
    result
}

/// Wraps text in strikethrough markers
pub fn apply_strikethrough(text: &str) -> String {
    format!("~{}~", text)
}

/// The transform chain, compiled once per set of settings
#[derive(Debug, Clone)]
pub struct ContentTransformer {
    tag_pattern: Option<Regex>,
    remove_anchors: bool,
}

impl ContentTransformer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            tag_pattern: tag_pattern(&settings.target_tag_prefix),
            remove_anchors: settings.remove_anchors,
        }
    }

    /// Runs every rewrite over `content`, in order
    pub fn apply(&self, content: &str) -> String {
        let converted = match &self.tag_pattern {
            Some(pattern) => pattern.replace_all(content, "*${1}*"),
            None => Cow::Borrowed(content),
        };

        let mut result = remove_internal_links(&converted);
        if self.remove_anchors {
            result = remove_anchors(&result);
        }
        format_github_url(&result)
    }
}

/// Runs the transform chain over a single piece of task text
pub fn format_task_content(content: &str, settings: &Settings) -> String {
    ContentTransformer::new(settings).apply(content)
}
