use crate::abbreviation::{replace_number_slang, AbbreviationTable};
use crate::case_model::CaseMode;
use crate::config::MorphologyConfig;
use crate::entity_marker;
use crate::interner::{Memo, StringCache};
use crate::markers::split_field_prefix;
use crate::pluralizer;
use crate::verbalizer;
use std::sync::Arc;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PluralKey {
    name: Arc<str>,
    mode: CaseMode,
    suffixes: Arc<str>,
}

/// The morphology engine with its caches.
///
/// One instance is normally created per process and shared (it is `Send +
/// Sync`); tests build isolated instances. Results are memoized per input and
/// never invalidated, since they are pure functions of fixed tables.
#[derive(Debug)]
pub struct Morphology {
    cache: Arc<StringCache>,
    plurals: Memo<PluralKey, Option<Arc<str>>>,
    verbs: Memo<Arc<str>, Option<Arc<str>>>,
    abbreviations: AbbreviationTable,
    extra_allowed_names: Vec<String>,
}

impl Morphology {
    pub fn new(cache: Arc<StringCache>) -> Self {
        Self {
            cache,
            plurals: Memo::new(),
            verbs: Memo::new(),
            abbreviations: AbbreviationTable::default(),
            extra_allowed_names: Vec::new(),
        }
    }

    pub fn with_config(cache: Arc<StringCache>, config: &MorphologyConfig) -> Self {
        Self {
            abbreviations: AbbreviationTable::with_extra(&config.abbreviations),
            extra_allowed_names: config.extra_allowed_names.clone(),
            ..Self::new(cache)
        }
    }

    pub fn cache(&self) -> &Arc<StringCache> {
        &self.cache
    }

    /// Memoized [`pluralizer::pluralize`], honouring configured allowed names.
    pub fn pluralize<S: AsRef<str>>(
        &self,
        name: &str,
        comparison: CaseMode,
        suffixes: &[S],
    ) -> Option<String> {
        let (_, rest) = split_field_prefix(name);
        if self
            .extra_allowed_names
            .iter()
            .any(|allowed| comparison.equals(rest, allowed))
        {
            return None;
        }

        let signature = suffixes
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("|");
        let key = PluralKey {
            name: self.cache.intern_str(name),
            mode: comparison,
            suffixes: self.cache.intern_str(&signature),
        };

        self.plurals
            .get_or_compute(key, || {
                let result = pluralizer::pluralize(name, comparison, suffixes);
                trace!(name, ?comparison, ?result, "computed plural");
                result.map(|plural| self.cache.intern_str(&plural))
            })
            .map(|plural| plural.to_string())
    }

    pub fn make_plural(&self, noun: &str) -> String {
        pluralizer::make_plural(noun)
    }

    pub fn make_singular(&self, noun: &str) -> String {
        pluralizer::make_singular(noun)
    }

    /// Memoized [`verbalizer::try_make_verb`].
    pub fn try_make_verb(&self, name: &str) -> (bool, String) {
        let key = self.cache.intern_str(name);
        let verb = self.verbs.get_or_compute(key, || {
            let (ok, verb) = verbalizer::try_make_verb(name);
            trace!(name, ok, verb = %verb, "computed verb");
            ok.then(|| self.cache.intern_str(&verb))
        });

        match verb {
            Some(verb) => (true, verb.to_string()),
            None => (false, name.to_string()),
        }
    }

    pub fn make_gerund(&self, name: &str) -> String {
        verbalizer::make_gerund(name)
    }

    pub fn has_marker(&self, name: &str) -> bool {
        entity_marker::has_marker(name)
    }

    pub fn strip_entity_marker(&self, name: &str) -> String {
        entity_marker::strip_entity_marker(name)
    }

    pub fn expand_abbreviations(&self, name: &str) -> Option<String> {
        self.abbreviations.expand(name)
    }

    pub fn replace_number_slang(&self, name: &str) -> Option<String> {
        replace_number_slang(name)
    }
}

impl Default for Morphology {
    fn default() -> Self {
        Self::new(Arc::new(StringCache::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::thread;

    #[test]
    fn test_pluralize_is_memoized() {
        let morphology = Morphology::default();
        let first = morphology.pluralize("CustomerList", CaseMode::OrdinalIgnoreCase, &["List"]);
        let cached = morphology.cache().len();
        let second = morphology.pluralize("CustomerList", CaseMode::OrdinalIgnoreCase, &["List"]);

        assert_eq!(first.as_deref(), Some("Customers"));
        assert_eq!(first, second);
        assert_eq!(morphology.cache().len(), cached);
        assert_eq!(morphology.plurals.len(), 1);
    }

    #[test]
    fn test_memo_key_includes_mode_and_suffixes() {
        let morphology = Morphology::default();
        assert_eq!(
            morphology.pluralize("CustomerLIST", CaseMode::Ordinal, &["List"]).as_deref(),
            Some("CustomerLISTs")
        );
        assert_eq!(
            morphology
                .pluralize("CustomerLIST", CaseMode::OrdinalIgnoreCase, &["List"])
                .as_deref(),
            Some("Customers")
        );
        assert_eq!(
            morphology.pluralize("CustomerLIST", CaseMode::Ordinal, &["LIST"]).as_deref(),
            Some("Customers")
        );
        assert_eq!(morphology.plurals.len(), 3);
    }

    #[test]
    fn test_try_make_verb_is_memoized() {
        let morphology = Morphology::default();
        assert_eq!(morphology.try_make_verb("Registration"), (true, "Register".to_string()));
        assert_eq!(morphology.try_make_verb("Registration"), (true, "Register".to_string()));
        assert_eq!(morphology.try_make_verb("Register"), (false, "Register".to_string()));
        assert_eq!(morphology.verbs.len(), 2);
    }

    #[test]
    fn test_config_extends_tables() {
        let mut abbreviations = BTreeMap::new();
        abbreviations.insert("Repo".to_string(), "Repository".to_string());
        let config = MorphologyConfig {
            extra_allowed_names: vec!["todoList".to_string()],
            abbreviations,
            ..MorphologyConfig::default()
        };
        let morphology = Morphology::with_config(Arc::new(StringCache::new()), &config);

        assert_eq!(morphology.pluralize("todoList", CaseMode::Ordinal, &["List"]), None);
        assert_eq!(morphology.pluralize("_todoList", CaseMode::Ordinal, &["List"]), None);
        assert_eq!(morphology.pluralize("m_todoList", CaseMode::Ordinal, &["List"]), None);
        assert_eq!(
            morphology.pluralize("itemList", CaseMode::Ordinal, &["List"]).as_deref(),
            Some("items")
        );
        assert_eq!(
            morphology.expand_abbreviations("UserRepo").as_deref(),
            Some("UserRepository")
        );
    }

    #[test]
    fn test_shared_across_threads() {
        let morphology = Arc::new(Morphology::default());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let morphology = Arc::clone(&morphology);
                thread::spawn(move || {
                    morphology.pluralize("EntryList", CaseMode::OrdinalIgnoreCase, &["List"])
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().as_deref(), Some("Entries"));
        }
        assert_eq!(morphology.plurals.len(), 1);
    }
}
