use crate::case_model::{is_word_end, is_word_start, match_leading_case};
use crate::markers::{Marker, MarkerCategory, MarkerTable, DEFAULT_ABBREVIATIONS, NUMBER_SLANG};
use aho_corasick::{AhoCorasick, MatchKind};
use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

/// Abbreviations and the words they stand for, matched on word boundaries.
#[derive(Debug, Clone)]
pub struct AbbreviationTable {
    table: MarkerTable,
    matcher: Option<AhoCorasick>,
}

impl Default for AbbreviationTable {
    fn default() -> Self {
        Self::new(
            DEFAULT_ABBREVIATIONS
                .iter()
                .map(|(short, long)| ((*short).to_string(), (*long).to_string())),
        )
    }
}

impl AbbreviationTable {
    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        let table = MarkerTable::new(entries.into_iter().map(|(short, long)| {
            Marker::new(short, MarkerCategory::Abbreviation).with_replacement(long)
        }));

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(table.texts())
            .map_err(|e| warn!("abbreviation matcher unavailable: {e}"))
            .ok();

        Self { table, matcher }
    }

    /// Default table extended (or overridden) by `extra`
    pub fn with_extra<'a>(extra: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        let mut entries: Vec<(String, String)> = extra
            .into_iter()
            .map(|(short, long)| (short.clone(), long.clone()))
            .collect();
        for (short, long) in DEFAULT_ABBREVIATIONS {
            if !entries.iter().any(|(s, _)| s.eq_ignore_ascii_case(short)) {
                entries.push(((*short).to_string(), (*long).to_string()));
            }
        }
        Self::new(entries)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Replace every whole-word abbreviation in `name` with its full word.
    ///
    /// Returns `None` when nothing was expanded.
    pub fn expand(&self, name: &str) -> Option<String> {
        let matcher = self.matcher.as_ref()?;
        let mut out = String::with_capacity(name.len() + 16);
        let mut last = 0;
        let mut changed = false;

        for found in matcher.find_iter(name) {
            let (start, end) = (found.start(), found.end());
            if !is_word_start(name, start) || !is_word_end(name, end) {
                continue;
            }
            let Some(replacement) = self
                .table
                .iter()
                .nth(found.pattern().as_usize())
                .and_then(|marker| marker.replacement.as_deref())
            else {
                continue;
            };

            let text = &name[start..end];
            out.push_str(&name[last..start]);
            out.push_str(&match_leading_case(replacement, text));
            last = end;
            changed = true;
        }

        if !changed {
            return None;
        }
        out.push_str(&name[last..]);
        Some(out)
    }
}

static NUMBER_SLANG_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn number_slang_pattern() -> Option<&'static Regex> {
    NUMBER_SLANG_PATTERN
        .get_or_init(|| {
            let digits: String = NUMBER_SLANG.iter().map(|(digit, _)| *digit).collect();
            Regex::new(&format!("[{digits}][A-Z][a-z]")).ok()
        })
        .as_ref()
}

/// Replace digits used as words between two words ("Convert2String").
///
/// Returns `None` when the name has no such digit.
pub fn replace_number_slang(name: &str) -> Option<String> {
    let pattern = number_slang_pattern()?;
    let bytes = name.as_bytes();
    let mut out = String::with_capacity(name.len() + 8);
    let mut last = 0;

    for found in pattern.find_iter(name) {
        let start = found.start();
        if start == 0 || !bytes[start - 1].is_ascii_alphabetic() {
            continue;
        }
        let digit = &name[start..=start];
        let Some((_, word)) = NUMBER_SLANG.iter().find(|(d, _)| *d == digit) else {
            continue;
        };
        out.push_str(&name[last..start]);
        out.push_str(word);
        last = start + 1;
    }

    if last == 0 {
        return None;
    }
    out.push_str(&name[last..]);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_expand_pascal_and_camel() {
        let table = AbbreviationTable::default();
        assert_eq!(table.expand("ErrorMsg").as_deref(), Some("ErrorMessage"));
        assert_eq!(table.expand("msgText").as_deref(), Some("messageText"));
        assert_eq!(table.expand("m_btnOk").as_deref(), Some("m_buttonOk"));
        assert_eq!(table.expand("SrcIdx").as_deref(), Some("SourceIndex"));
    }

    #[test]
    fn test_expand_prefers_longest_abbreviation() {
        let table = AbbreviationTable::default();
        assert_eq!(table.expand("ParseArgs").as_deref(), Some("ParseArguments"));
        assert_eq!(table.expand("QueryParams").as_deref(), Some("QueryParameters"));
    }

    #[test]
    fn test_expand_ignores_partial_words() {
        let table = AbbreviationTable::default();
        assert_eq!(table.expand("Argument"), None);
        assert_eq!(table.expand("PhoneNumber"), None);
        assert_eq!(table.expand("Destination"), None);
        assert_eq!(table.expand("Request"), None);
        assert_eq!(table.expand("Customer"), None);
    }

    #[test]
    fn test_with_extra_overrides_defaults() {
        let mut extra = BTreeMap::new();
        extra.insert("Ctx".to_string(), "Container".to_string());
        extra.insert("Repo".to_string(), "Repository".to_string());
        let table = AbbreviationTable::with_extra(&extra);

        assert_eq!(table.expand("RequestCtx").as_deref(), Some("RequestContainer"));
        assert_eq!(table.expand("UserRepo").as_deref(), Some("UserRepository"));
        assert_eq!(table.expand("ErrorMsg").as_deref(), Some("ErrorMessage"));
    }

    #[test]
    fn test_replace_number_slang() {
        assert_eq!(replace_number_slang("Convert2String").as_deref(), Some("ConvertToString"));
        assert_eq!(replace_number_slang("str2Int").as_deref(), Some("strToInt"));
        assert_eq!(replace_number_slang("Ready4Use").as_deref(), Some("ReadyForUse"));
    }

    #[test]
    fn test_number_slang_leaves_real_numbers() {
        assert_eq!(replace_number_slang("Vector2D"), None);
        assert_eq!(replace_number_slang("Base64Encoder"), None);
        assert_eq!(replace_number_slang("2Fast"), None);
        assert_eq!(replace_number_slang("Customer"), None);
    }
}
