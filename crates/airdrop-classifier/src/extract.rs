//! Title and task extraction from unstructured text

use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

/// Maximum title length in characters before the ellipsis is appended
pub const TITLE_MAX_CHARS: usize = 100;

const ELLIPSIS: &str = "...";

/// Characters captured after a keyword by the fallback strategy
const KEYWORD_CONTEXT_CHARS: usize = 50;

/// Numbered (`1.`) or bulleted (`•`, `-`, `*`) list items, one per line.
static TASK_LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:[0-9]+\.|[•\-*])\s*(.+)$").expect("valid task line regex")
});

/// First non-blank line of `text`, truncated to [`TITLE_MAX_CHARS`]
///
/// Falls back to the whole text (same truncation) when every line is blank.
///
/// # Examples
///
/// ```
/// use airdrop_classifier::extract_title;
///
/// assert_eq!(extract_title("\r\n  Zk drop season 2  \r\nDetails below"), "Zk drop season 2");
/// assert_eq!(extract_title(&"a".repeat(120)).len(), 103);
/// ```
pub fn extract_title(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(truncate)
        .unwrap_or_else(|| truncate(text))
}

fn truncate(s: &str) -> String {
    match s.char_indices().nth(TITLE_MAX_CHARS) {
        Some((cut, _)) => format!("{}{}", &s[..cut], ELLIPSIS),
        None => s.to_string(),
    }
}

/// Action items found in `text`, one `- item` per line
///
/// Structured list items win. Only when the text has none does the
/// keyword-context fallback run: for each keyword in order, every whole-word
/// occurrence plus up to 50 following characters on the same line becomes an
/// item ending in `...`. Returns `None` when neither strategy finds anything.
pub fn extract_tasks<K: AsRef<str>>(text: &str, keywords: &[K]) -> Option<String> {
    let mut tasks = structured_tasks(text);

    if tasks.is_empty() {
        tasks = keyword_context_tasks(text, keywords);
    }

    let joined = tasks.join("\n");
    let trimmed = joined.trim_end();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn structured_tasks(text: &str) -> Vec<String> {
    TASK_LINE_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|body| format!("- {}", body.as_str().trim()))
        .collect()
}

fn keyword_context_tasks<K: AsRef<str>>(text: &str, keywords: &[K]) -> Vec<String> {
    let mut tasks = Vec::new();

    for keyword in keywords {
        let keyword = keyword.as_ref();
        if keyword.is_empty() {
            continue;
        }

        let pattern = format!(
            r"(?i)\b{}\b.{{0,{}}}",
            regex::escape(keyword),
            KEYWORD_CONTEXT_CHARS
        );
        let re = match Regex::new(&pattern) {
            Ok(re) => re,
            Err(e) => {
                warn!("Skipping keyword '{}' for task extraction: {}", keyword, e);
                continue;
            }
        };

        for found in re.find_iter(text) {
            tasks.push(format!("- {}{}", found.as_str().trim(), ELLIPSIS));
        }
    }

    tasks
}
