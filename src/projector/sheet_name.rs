//! Worksheet naming rules

use std::collections::HashSet;

/// Longest name a worksheet may carry
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Name used when sanitizing leaves nothing behind
pub const FALLBACK_SHEET_NAME: &str = "Sheet";

const INVALID_CHARS: [char; 7] = ['\\', '/', '*', '?', ':', '[', ']'];

/// Make a JSON key usable as a worksheet name.
///
/// Invalid characters become `_`, the result is cut to 31 characters and
/// trimmed. Apostrophes are not allowed at either end of a name, so they are
/// trimmed as well. A key made of nothing but invalid characters and
/// whitespace falls back to `"Sheet"` rather than a row of underscores.
pub fn sanitize_sheet_name(raw: &str) -> String {
    let kept: Vec<char> = raw.chars().take(MAX_SHEET_NAME_LEN).collect();
    let has_content = kept
        .iter()
        .any(|c| !INVALID_CHARS.contains(c) && !c.is_whitespace() && *c != '\'');
    if !has_content {
        return FALLBACK_SHEET_NAME.to_string();
    }

    let replaced: String = kept
        .into_iter()
        .map(|c| if INVALID_CHARS.contains(&c) { '_' } else { c })
        .collect();

    let trimmed = replaced.trim().trim_matches('\'').trim();
    if trimmed.is_empty() {
        FALLBACK_SHEET_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Hands out sanitized names that are unique within one workbook.
///
/// Names compare case-insensitively, the way spreadsheet applications do.
/// A repeated name gets a ` (2)`, ` (3)`, ... suffix, shortening the base so
/// the result still fits in 31 characters.
#[derive(Debug, Default)]
pub struct SheetNamer {
    used: HashSet<String>,
}

impl SheetNamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, raw: &str) -> String {
        let base = sanitize_sheet_name(raw);
        if self.used.insert(base.to_lowercase()) {
            return base;
        }

        let mut n = 2usize;
        loop {
            let suffix = format!(" ({})", n);
            let keep = MAX_SHEET_NAME_LEN.saturating_sub(suffix.chars().count());
            let stem: String = base.chars().take(keep).collect();
            let candidate = format!("{}{}", stem.trim_end(), suffix);
            if self.used.insert(candidate.to_lowercase()) {
                tracing::warn!(
                    "Sheet name '{}' already used; renamed to '{}'",
                    base,
                    candidate
                );
                return candidate;
            }
            n += 1;
        }
    }
}
