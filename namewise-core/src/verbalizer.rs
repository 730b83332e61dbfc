//! Verb forms recovered from (or synthesized for) identifiers.

use crate::case_model::{first_word, CaseMode};
use crate::markers::{verb_prefixes, NOUN_TO_VERB};

/// True when `name` starts with an accepted verb followed by a word boundary.
///
/// Prefixes are tried longest first, then alphabetically, so "Register" is
/// preferred over "Re..." style shorter entries.
pub fn starts_with_verb(name: &str) -> bool {
    verb_prefixes().iter().any(|prefix| {
        CaseMode::Ordinal.starts_with(name, &prefix.text)
            && name[prefix.text.len()..]
                .chars()
                .next()
                .map_or(true, char::is_uppercase)
    })
}

/// Turn a verb-derived noun ("Registration") back into its verb ("Register").
///
/// Returns `(false, name)` when the name already starts with an accepted
/// verb, when no noun ending matches, or when the rewrite changes nothing.
pub fn try_make_verb(name: &str) -> (bool, String) {
    if name.trim().is_empty() || starts_with_verb(name) {
        return (false, name.to_string());
    }

    for (noun_ending, verb_ending) in NOUN_TO_VERB {
        // Keep at least two letters of stem ("Session" is not "Sess")
        if name.len() >= noun_ending.len() + 2 && CaseMode::Ordinal.ends_with(name, noun_ending) {
            let verb = format!("{}{verb_ending}", &name[..name.len() - noun_ending.len()]);
            if verb == name {
                return (false, name.to_string());
            }
            return (true, verb);
        }
    }

    (false, name.to_string())
}

/// Gerund ("-ing") form of the leading verb of `name`.
///
/// "Load" gives "Loading", "Close" gives "Closing", "Run" gives "Running";
/// the remaining words are kept ("SaveChanges" gives "SavingChanges").
pub fn make_gerund(name: &str) -> String {
    let word = first_word(name);
    if word.is_empty() {
        return name.to_string();
    }

    let offset = word.as_ptr() as usize - name.as_ptr() as usize;
    format!(
        "{}{}{}",
        &name[..offset],
        gerund_word(word),
        &name[offset + word.len()..]
    )
}

fn gerund_word(word: &str) -> String {
    let lower = word.to_ascii_lowercase();

    if lower.ends_with("ing") {
        return word.to_string();
    }
    if lower.ends_with("ie") {
        return format!("{}ying", &word[..word.len() - 2]);
    }
    if lower.len() > 2
        && lower.ends_with('e')
        && !(lower.ends_with("ee") || lower.ends_with("ye") || lower.ends_with("oe"))
    {
        return format!("{}ing", &word[..word.len() - 1]);
    }
    if doubles_final_consonant(&lower) {
        let last = &word[word.len() - 1..];
        return format!("{word}{last}ing");
    }

    format!("{word}ing")
}

/// One-syllable consonant-vowel-consonant words double their last letter.
fn doubles_final_consonant(lower: &str) -> bool {
    let bytes = lower.as_bytes();
    let is_vowel = |b: u8| b"aeiou".contains(&b);
    let n = bytes.len();
    if n < 3 || !lower.is_ascii() {
        return false;
    }

    let (c1, v, c2) = (bytes[n - 3], bytes[n - 2], bytes[n - 1]);
    !is_vowel(c1)
        && is_vowel(v)
        && !is_vowel(c2)
        && !b"wxy".contains(&c2)
        && bytes.iter().filter(|b| is_vowel(**b)).count() == 1
}
