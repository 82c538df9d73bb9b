//! Worksheet names derived from section labels.
//!
//! Names are cut at the first `(`, stripped of characters Excel rejects,
//! limited to 31 characters, and made unique with an occurrence suffix.
//! Excel compares sheet names case-insensitively, so occurrences are counted
//! that way too. A name may not start or end with `'`.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::constants::sheet::{
    FALLBACK_NAME, ILLEGAL_CHARS_PATTERN, MAX_NAME_CHARS, SUFFIX_PREFIX_CHARS, SUMMARY_SHEET,
};

static ILLEGAL_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(ILLEGAL_CHARS_PATTERN).expect("sheet name pattern is a valid regex")
});

/// Clean a section label into a sheet name candidate (before truncation)
pub fn clean_label(label: &str) -> String {
    let head = label.split('(').next().unwrap_or_default().trim();
    let cleaned = ILLEGAL_CHARS.replace_all(head, " ");
    let cleaned = cleaned.trim_matches(|c: char| c == '\'' || c.is_whitespace());
    if cleaned.trim().is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Stateful namer
///
/// Occurrence counts are kept per cleaned name, and every emitted name is
/// remembered so that truncation or a literal `"X 2"` label cannot produce a
/// name that is already in use.
#[derive(Debug, Default)]
pub struct SheetNamer {
    seen: HashMap<String, usize>,
    taken: HashSet<String>,
}

impl SheetNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Namer that treats `names` as already taken
    pub fn with_reserved(names: &[&str]) -> Self {
        let mut namer = Self::new();
        for name in names {
            let key = name.to_lowercase();
            namer.seen.insert(key.clone(), 1);
            namer.taken.insert(key);
        }
        namer
    }

    /// Name for the next label in order
    pub fn next_name(&mut self, label: &str) -> String {
        let cleaned = clean_label(label);
        let key = cleaned.to_lowercase();
        let mut count = self.seen.get(&key).copied().unwrap_or(0) + 1;

        let mut name = if count == 1 {
            truncate_chars(&cleaned, MAX_NAME_CHARS)
                .trim_end_matches(|c: char| c == '\'' || c.is_whitespace())
                .to_string()
        } else {
            suffixed(&cleaned, count)
        };
        while self.taken.contains(&name.to_lowercase()) {
            count += 1;
            name = suffixed(&cleaned, count);
        }

        self.seen.insert(key, count);
        self.taken.insert(name.to_lowercase());
        name
    }
}

fn suffixed(cleaned: &str, count: usize) -> String {
    let name = format!("{} {}", truncate_chars(cleaned, SUFFIX_PREFIX_CHARS), count);
    truncate_chars(&name, MAX_NAME_CHARS)
}

/// Names for an ordered list of labels
pub fn sheet_names<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    let mut namer = SheetNamer::new();
    labels.iter().map(|l| namer.next_name(l.as_ref())).collect()
}

/// Names for section sheets that follow the summary sheet
pub fn section_sheet_names<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    let mut namer = SheetNamer::with_reserved(&[SUMMARY_SHEET]);
    labels.iter().map(|l| namer.next_name(l.as_ref())).collect()
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
