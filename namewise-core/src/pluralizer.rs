//! Plural and singular forms of identifier nouns.
//!
//! These are table-driven heuristics tuned for identifiers, not English at
//! large: "Index" becomes "Indices", "Data" and "Information" never change,
//! and a few words ("bases", "sources") are rewritten to the vocabulary the
//! naming rules expect.

use crate::case_model::{first_word, is_word_start, last_word, match_leading_case, CaseMode};
use crate::entity_marker::{has_marker, strip_entity_marker};
use crate::markers::{split_field_prefix, ALLOWED_COLLECTION_NAMES, COMPOUND_SUFFIXES};

/// Exact rewrites applied to a computed plural
const PLURAL_OVERRIDES: &[(&str, &str)] = &[("bases", "items"), ("sources", "source")];

/// Words ending in "s" that are not plurals
const SINGULAR_EXEMPT: &[&str] = &[
    "Alias", "Always", "Atlas", "Bias", "Canvas", "Gas", "Lens", "News", "Series", "Species",
];

/// Nouns whose singular ends in "ie", so "-ies" only loses the "s"
const IE_NOUNS: &[&str] = &[
    "Calories", "Cookies", "Lies", "Movies", "Pies", "Rookies", "Selfies", "Ties", "Zombies",
];

/// Propose the plural name for a collection-like identifier.
///
/// Returns `None` when the name is an accepted collection name ("list",
/// "playList"), when nothing is left once the collection suffix is removed,
/// or when the proposal would equal `name`.
pub fn pluralize<S: AsRef<str>>(name: &str, comparison: CaseMode, suffixes: &[S]) -> Option<String> {
    if name.trim().is_empty() {
        return None;
    }

    let (prefix, rest) = split_field_prefix(name);
    if ALLOWED_COLLECTION_NAMES
        .iter()
        .any(|allowed| comparison.equals(rest, allowed))
    {
        return None;
    }

    let stem = match suffixes
        .iter()
        .map(AsRef::as_ref)
        .find(|suffix| !suffix.is_empty() && comparison.ends_with(rest, suffix))
    {
        Some(suffix) => &rest[..rest.len() - suffix.len()],
        None => rest,
    };
    if stem.is_empty() {
        return None;
    }

    let stem = if has_marker(stem) {
        strip_entity_marker(stem)
    } else {
        stem.to_string()
    };

    // A first word that already ends in "s" reads as plural ("ItemsToProcess")
    let plural = if CaseMode::OrdinalIgnoreCase.ends_with(first_word(&stem), "s") {
        stem
    } else {
        make_plural(&stem)
    };

    let proposed = format!("{prefix}{}", apply_overrides(&plural));
    (proposed != name).then_some(proposed)
}

/// Plural form of a noun (or of the last noun of a compound identifier).
pub fn make_plural(noun: &str) -> String {
    if noun.trim().is_empty() {
        return noun.to_string();
    }

    let ends = |suffix: &str| CaseMode::OrdinalIgnoreCase.ends_with(noun, suffix);
    let cut = |count: usize| &noun[..noun.len() - count];

    if ends("ay") || ends("ey") {
        return format!("{noun}s");
    }
    if ends("y") {
        return format!("{}ies", cut(1));
    }
    if ends("ays") || ends("eys") {
        return noun.to_string();
    }
    if ends("ys") {
        return format!("{}ies", cut(2));
    }
    if ends("ss") {
        return format!("{noun}es");
    }
    if ends("ed") {
        return noun.to_string();
    }
    if ends("child") {
        return format!("{noun}ren");
    }
    if ends("children") {
        return noun.to_string();
    }
    if ends("complete") {
        return match_leading_case("all", noun);
    }
    if ends("datas") {
        return cut(1).to_string();
    }
    if ends("data") {
        return noun.to_string();
    }
    if ends("ndex") {
        return format!("{}ices", cut(2));
    }
    if ends("nformations") {
        return cut(1).to_string();
    }
    if ends("nformation") {
        return noun.to_string();
    }

    for suffix in COMPOUND_SUFFIXES {
        let start = noun.len().saturating_sub(suffix.len());
        if start > 0
            && CaseMode::OrdinalIgnoreCase.ends_with(noun, suffix)
            && is_word_start(noun, start)
        {
            let stem = cut(suffix.len()).trim_end_matches('_');
            if !stem.is_empty() {
                return make_plural(stem);
            }
        }
    }

    if has_marker(noun) {
        let stripped = strip_entity_marker(noun);
        if stripped != noun {
            return make_plural(&stripped);
        }
    }

    if ends("s") {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

/// Singular form of the last word of `noun`.
pub fn make_singular(noun: &str) -> String {
    let Some((offset, word)) = last_word(noun) else {
        return noun.to_string();
    };

    let tail = &noun[offset + word.len()..];
    format!("{}{}{tail}", &noun[..offset], singular_word(word))
}

fn singular_word(word: &str) -> String {
    let ends = |suffix: &str| CaseMode::OrdinalIgnoreCase.ends_with(word, suffix);
    let cut = |count: usize| &word[..word.len() - count];

    if SINGULAR_EXEMPT
        .iter()
        .any(|exempt| exempt.eq_ignore_ascii_case(word))
    {
        return word.to_string();
    }
    if ends("children") {
        return cut(3).to_string();
    }
    if ends("data") || ends("nformation") {
        return word.to_string();
    }
    if ends("ndices") {
        return format!("{}ex", cut(4));
    }
    if IE_NOUNS.iter().any(|noun| noun.eq_ignore_ascii_case(word)) {
        return cut(1).to_string();
    }
    if ends("ies") && word.len() > 3 {
        return format!("{}y", cut(3));
    }
    if ends("sses") || ends("shes") || ends("tches") || ends("rches") || ends("xes") || ends("uses") {
        return cut(2).to_string();
    }
    if ends("ss") || ends("us") || ends("is") || ends("ics") {
        return word.to_string();
    }
    if ends("s") && word.len() > 1 {
        return cut(1).to_string();
    }

    word.to_string()
}

fn apply_overrides(plural: &str) -> String {
    PLURAL_OVERRIDES
        .iter()
        .find(|(from, _)| from.eq_ignore_ascii_case(plural))
        .map_or_else(|| plural.to_string(), |(_, to)| match_leading_case(to, plural))
}

/// True when the last word of `name` reads as a plural noun.
pub fn looks_plural(name: &str) -> bool {
    match last_word(name) {
        Some((_, word)) => word.len() > 1 && singular_word(word) != word,
        None => false,
    }
}
