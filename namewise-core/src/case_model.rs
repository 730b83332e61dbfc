use crate::acronym::{default_acronym_set, AcronymSet};
use serde::{Deserialize, Serialize};

/// Explicit string comparison mode, threaded through every morphology function.
///
/// Both modes are ordinal: no locale rules apply. `OrdinalIgnoreCase` folds
/// ASCII letters only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CaseMode {
    Ordinal,
    #[default]
    OrdinalIgnoreCase,
}

impl CaseMode {
    pub fn equals(self, a: &str, b: &str) -> bool {
        match self {
            Self::Ordinal => a == b,
            Self::OrdinalIgnoreCase => a.eq_ignore_ascii_case(b),
        }
    }

    pub fn starts_with(self, text: &str, prefix: &str) -> bool {
        text.len() >= prefix.len()
            && text.is_char_boundary(prefix.len())
            && self.equals(&text[..prefix.len()], prefix)
    }

    pub fn ends_with(self, text: &str, suffix: &str) -> bool {
        text.len() >= suffix.len()
            && text.is_char_boundary(text.len() - suffix.len())
            && self.equals(&text[text.len() - suffix.len()..], suffix)
    }
}

/// Split an identifier into words.
///
/// Underscores separate words, a lower-to-upper transition starts a new word,
/// and an upper-case run keeps a known acronym together ("XMLParser" gives
/// "XML", "Parser"). Digits stay attached to the word they follow.
pub fn split_words(s: &str) -> Vec<&str> {
    split_words_with_acronyms(s, default_acronym_set())
}

pub fn split_words_with_acronyms<'a>(s: &'a str, acronyms: &AcronymSet) -> Vec<&'a str> {
    let bytes = s.as_bytes();
    let mut words = Vec::new();
    let mut start: Option<usize> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if b == b'_' {
            if let Some(st) = start.take() {
                words.push(&s[st..i]);
            }
            i += 1;
            continue;
        }

        if b.is_ascii_uppercase() {
            let prev = if i > 0 { bytes[i - 1] } else { b'_' };

            // A known acronym starting here becomes its own word when a word
            // boundary (or the end) follows it.
            if start.is_none() || !prev.is_ascii_uppercase() {
                if let Some(len) = acronyms.longest_match_at(s, i) {
                    let end = i + len;
                    let boundary = end == bytes.len()
                        || bytes[end] == b'_'
                        || bytes[end].is_ascii_digit()
                        || (bytes[end].is_ascii_uppercase()
                            && (end + 1 == bytes.len() || bytes[end + 1].is_ascii_lowercase()));
                    if boundary {
                        if let Some(st) = start.take() {
                            words.push(&s[st..i]);
                        }
                        words.push(&s[i..end]);
                        i = end;
                        continue;
                    }
                }
            }

            let split = match start {
                None => false,
                Some(_) if prev.is_ascii_lowercase() || prev.is_ascii_digit() => true,
                // "ABCDef": the last upper-case letter of a run starts the next word
                Some(_) => {
                    prev.is_ascii_uppercase()
                        && i + 1 < bytes.len()
                        && bytes[i + 1].is_ascii_lowercase()
                },
            };

            if split {
                if let Some(st) = start.take() {
                    words.push(&s[st..i]);
                }
            }
        }

        if start.is_none() {
            start = Some(i);
        }
        i += 1;
    }

    if let Some(st) = start {
        words.push(&s[st..]);
    }

    words
}

/// First word of an identifier, or the empty string.
pub fn first_word(s: &str) -> &str {
    split_words(s).first().copied().unwrap_or("")
}

/// Last word of an identifier together with its byte offset.
pub fn last_word(s: &str) -> Option<(usize, &str)> {
    let word = split_words(s).pop()?;
    let offset = word.as_ptr() as usize - s.as_ptr() as usize;
    Some((offset, word))
}

pub fn starts_upper(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_uppercase)
}

pub fn starts_lower(s: &str) -> bool {
    s.chars().next().is_some_and(char::is_lowercase)
}

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Lower-case the first character, leaving the rest untouched.
pub fn decapitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Give `word` the same leading-letter case as `template`.
pub fn match_leading_case(word: &str, template: &str) -> String {
    if starts_lower(template) {
        decapitalize_first(word)
    } else if starts_upper(template) {
        capitalize_first(word)
    } else {
        word.to_string()
    }
}

/// Re-apply the case the original identifier had at byte `index`.
///
/// After a word is cut out of an identifier, the character that moves into
/// `index` may carry the wrong case for the identifier's convention (a
/// camelCase name must keep starting lower-case). Returns `candidate` with the
/// character at `index` set to the case found at `index` in `original`.
pub fn rematch_case_at(original: &str, candidate: &str, index: usize) -> String {
    let (Some(orig), Some(cand)) = (
        original.get(index..).and_then(|s| s.chars().next()),
        candidate.get(index..).and_then(|s| s.chars().next()),
    ) else {
        return candidate.to_string();
    };

    let fixed: String = if orig.is_uppercase() && cand.is_lowercase() {
        cand.to_uppercase().collect()
    } else if orig.is_lowercase() && cand.is_uppercase() {
        cand.to_lowercase().collect()
    } else {
        return candidate.to_string();
    };

    let mut out = String::with_capacity(candidate.len());
    out.push_str(&candidate[..index]);
    out.push_str(&fixed);
    out.push_str(&candidate[index + cand.len_utf8()..]);
    out
}

/// True when a word may begin at byte `index` of `s`.
pub fn is_word_start(s: &str, index: usize) -> bool {
    if index == 0 {
        return true;
    }
    let bytes = s.as_bytes();
    match (bytes.get(index - 1), bytes.get(index)) {
        (Some(b'_'), Some(_)) => true,
        (Some(prev), Some(cur)) => {
            cur.is_ascii_uppercase()
                && (prev.is_ascii_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_ascii_uppercase()
                        && bytes.get(index + 1).is_some_and(u8::is_ascii_lowercase)))
        },
        _ => false,
    }
}

/// True when a word may end right before byte `index` of `s`.
pub fn is_word_end(s: &str, index: usize) -> bool {
    match s.as_bytes().get(index) {
        None => true,
        Some(next) => *next == b'_' || next.is_ascii_uppercase() || next.is_ascii_digit(),
    }
}
