//! The built-in naming rules.

use crate::case_model::{
    capitalize_first, is_word_end, is_word_start, last_word, match_leading_case, split_words,
    CaseMode,
};
use crate::config::Config;
use crate::markers::{
    boolean_prefixes, collection_suffixes, field_prefixes, split_field_prefix, test_markers,
    Marker, MarkerCategory, MarkerTable,
};
use crate::pluralizer::looks_plural;
use crate::rule::{Rule, RuleError, RuleSet};
use crate::symbol::{KindSet, SpecialType, SymbolKind};
use crate::verbalizer::starts_with_verb;
use std::sync::Arc;

const VALUE_KINDS: KindSet = KindSet::of(&[
    SymbolKind::Field,
    SymbolKind::Property,
    SymbolKind::Parameter,
    SymbolKind::LocalVariable,
]);

const NAMED_ELEMENT_KINDS: KindSet = KindSet::of(&[
    SymbolKind::Type,
    SymbolKind::Method,
    SymbolKind::Property,
    SymbolKind::Event,
    SymbolKind::Field,
    SymbolKind::Parameter,
    SymbolKind::LocalVariable,
]);

/// Type names that are plural by convention
const PLURAL_TYPE_EXEMPT: &[&str] = &[
    "Arguments",
    "Credentials",
    "Details",
    "Extensions",
    "Helpers",
    "Metrics",
    "Options",
    "Settings",
    "Statistics",
    "Tests",
    "Utils",
];

/// How the catalog matches collection suffixes
#[derive(Debug, Clone)]
pub struct CatalogOptions {
    pub comparison: CaseMode,
    pub collection_suffixes: Vec<String>,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            comparison: CaseMode::OrdinalIgnoreCase,
            collection_suffixes: collection_suffixes().texts().map(str::to_string).collect(),
        }
    }
}

impl CatalogOptions {
    pub fn from_config(config: &Config) -> Self {
        let mut options = Self::default();
        if config.defaults.case_sensitive {
            options.comparison = CaseMode::Ordinal;
        }
        // Longest suffix first, configured ones included
        let table = MarkerTable::new(
            options
                .collection_suffixes
                .iter()
                .chain(&config.morphology.extra_collection_suffixes)
                .map(|text| Marker::new(text.as_str(), MarkerCategory::Collection)),
        );
        options.collection_suffixes = table.texts().map(str::to_string).collect();
        options
    }
}

/// All built-in rules, in evaluation order
pub fn builtin_rules(options: &CatalogOptions) -> Result<RuleSet, RuleError> {
    let mut rules = RuleSet::new();
    for rule in [
        collection_suffix(options),
        entity_marker(),
        method_noun(),
        boolean_flag(),
        field_prefix(),
        abbreviation(),
        number_slang(),
        plural_type_name(),
        test_marker(),
        event_on_prefix(),
        event_verb(),
    ] {
        rules.register(rule)?;
    }
    Ok(rules)
}

fn collection_suffix(options: &CatalogOptions) -> Rule {
    let comparison = options.comparison;
    let suffixes: Arc<[String]> = options.collection_suffixes.clone().into();
    let matcher = Arc::clone(&suffixes);

    Rule::new(
        "NW1001",
        VALUE_KINDS,
        move |ctx| {
            ctx.symbol.special_type() == SpecialType::Enumerable
                && matcher
                    .iter()
                    .any(|suffix| comparison.ends_with(ctx.name(), suffix))
        },
        move |ctx| ctx.morphology.pluralize(ctx.name(), comparison, &suffixes[..]),
    )
    .with_description("Collections are named as plurals, not by their container type")
}

fn entity_marker() -> Rule {
    Rule::new(
        "NW1002",
        KindSet::of(&[
            SymbolKind::Type,
            SymbolKind::Property,
            SymbolKind::Field,
            SymbolKind::Parameter,
            SymbolKind::LocalVariable,
        ]),
        |ctx| ctx.morphology.has_marker(ctx.name()),
        |ctx| Some(ctx.morphology.strip_entity_marker(ctx.name())),
    )
    .with_description("Names do not carry Entity or Model markers")
}

fn method_noun() -> Rule {
    Rule::new(
        "NW1003",
        KindSet::of(&[SymbolKind::Method]),
        |ctx| !ctx.symbol.is_override() && !ctx.symbol.is_interface_implementation(),
        |ctx| {
            let (ok, verb) = ctx.morphology.try_make_verb(ctx.name());
            ok.then_some(verb)
        },
    )
    .with_description("Methods are named with a verb")
}

fn boolean_flag() -> Rule {
    Rule::new(
        "NW1004",
        VALUE_KINDS,
        |ctx| ctx.symbol.special_type() == SpecialType::Boolean && has_flag_suffix(ctx.name()),
        |ctx| {
            let stem = &ctx.name()[..ctx.name().len() - "Flag".len()];
            let (prefix, rest) = split_field_prefix(stem);
            let bare_prefix = field_prefixes().find_exact(stem, CaseMode::Ordinal).is_some();
            if rest.is_empty() || bare_prefix {
                return None;
            }
            if starts_with_question(rest) {
                return Some(stem.to_string());
            }
            let question = format!("Is{}", capitalize_first(rest));
            Some(format!("{prefix}{}", match_leading_case(&question, rest)))
        },
    )
    .with_description("Booleans read as a question instead of ending in Flag")
}

fn has_flag_suffix(name: &str) -> bool {
    let start = name.len().saturating_sub("Flag".len());
    start > 0 && name.ends_with("Flag") && is_word_start(name, start)
}

fn starts_with_question(name: &str) -> bool {
    let word = capitalize_first(name);
    boolean_prefixes().iter().any(|prefix| {
        word.starts_with(prefix.text.as_str()) && is_word_end(&word, prefix.text.len())
    })
}

fn field_prefix() -> Rule {
    Rule::new(
        "NW1005",
        KindSet::of(&[SymbolKind::Field]),
        |ctx| matches!(split_field_prefix(ctx.name()).0, "m_" | "s_" | "t_"),
        |ctx| {
            let (_, rest) = split_field_prefix(ctx.name());
            Some(format!("_{rest}"))
        },
    )
    .with_description("Fields use a plain underscore prefix")
}

fn abbreviation() -> Rule {
    Rule::new(
        "NW1006",
        NAMED_ELEMENT_KINDS,
        |ctx| ctx.name().len() > 2,
        |ctx| ctx.morphology.expand_abbreviations(ctx.name()),
    )
    .with_description("Words are spelled out instead of abbreviated")
}

fn number_slang() -> Rule {
    Rule::new(
        "NW1007",
        NAMED_ELEMENT_KINDS,
        |ctx| ctx.name().contains(['2', '4']),
        |ctx| ctx.morphology.replace_number_slang(ctx.name()),
    )
    .with_description("Digits are not used in place of To and For")
}

fn plural_type_name() -> Rule {
    Rule::new(
        "NW1008",
        KindSet::of(&[SymbolKind::Type]),
        |ctx| {
            !matches!(
                ctx.symbol.special_type(),
                SpecialType::Enumerable | SpecialType::Enum
            ) && looks_plural(ctx.name())
                && !last_word(ctx.name())
                    .is_some_and(|(_, word)| PLURAL_TYPE_EXEMPT.contains(&word))
        },
        |ctx| Some(ctx.morphology.make_singular(ctx.name())),
    )
    .with_description("Types other than collections and enums have singular names")
}

fn test_marker() -> Rule {
    Rule::new(
        "NW1009",
        KindSet::of(&[SymbolKind::Type, SymbolKind::Method]),
        |ctx| {
            !ctx.symbol
                .ancestors()
                .any(|ancestor| ancestor.name().contains("Test"))
                && strip_test_marker(ctx.name()).is_some()
        },
        |ctx| strip_test_marker(ctx.name()),
    )
    .with_description("Test doubles live in test code")
}

/// `name` without a leading or trailing test marker word
fn strip_test_marker(name: &str) -> Option<String> {
    let markers = test_markers();

    if let Some(marker) = markers.find_prefix(name, CaseMode::Ordinal) {
        let rest = &name[marker.text.len()..];
        if !rest.is_empty() && is_word_start(name, marker.text.len()) {
            return Some(match_leading_case(rest, name));
        }
    }

    if let Some(marker) = markers.find_suffix(name, CaseMode::Ordinal) {
        let start = name.len() - marker.text.len();
        if start > 0 && is_word_start(name, start) {
            return Some(name[..start].to_string());
        }
    }

    None
}

fn event_on_prefix() -> Rule {
    Rule::new(
        "NW1010",
        KindSet::of(&[SymbolKind::Event]),
        |ctx| ctx.name().len() > 2 && ctx.name().starts_with("On") && is_word_start(ctx.name(), 2),
        |ctx| Some(ctx.name()[2..].to_string()),
    )
    .with_description("Events are not prefixed with On")
}

fn event_verb() -> Rule {
    Rule::new(
        "NW1011",
        KindSet::of(&[SymbolKind::Event]),
        |ctx| {
            split_words(ctx.name()).len() == 1
                && starts_with_verb(ctx.name())
                && !starts_with_question(ctx.name())
        },
        |ctx| Some(ctx.morphology.make_gerund(ctx.name())),
    )
    .with_description("Events raised before an action are named with a gerund")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Dispatcher;
    use crate::morphology::Morphology;
    use crate::symbol::{Symbol, TypeDescriptor};

    fn propose(symbol: &Symbol) -> Vec<(String, String)> {
        let rules = builtin_rules(&CatalogOptions::default()).unwrap();
        Dispatcher::new(Arc::new(Morphology::default()))
            .dispatch_set(symbol, &rules)
            .into_iter()
            .map(|issue| (issue.rule_id, issue.proposed_name))
            .collect()
    }

    fn pair(id: &str, name: &str) -> (String, String) {
        (id.to_string(), name.to_string())
    }

    fn enumerable() -> TypeDescriptor {
        TypeDescriptor::new("List")
            .with_special(SpecialType::Enumerable)
            .with_generic_arity(1)
    }

    fn boolean() -> TypeDescriptor {
        TypeDescriptor::new("bool").with_special(SpecialType::Boolean)
    }

    #[test]
    fn test_catalog_registers_all_rules() {
        let rules = builtin_rules(&CatalogOptions::default()).unwrap();
        let ids: Vec<&str> = rules.rules().iter().map(Rule::id).collect();
        assert_eq!(
            ids,
            vec![
                "NW1001", "NW1002", "NW1003", "NW1004", "NW1005", "NW1006", "NW1007", "NW1008",
                "NW1009", "NW1010", "NW1011"
            ]
        );
        assert!(rules.rules().iter().all(|rule| !rule.description().is_empty()));
    }

    #[test]
    fn test_collection_suffix_needs_enumerable_type() {
        let typed = Symbol::new("CustomerList", SymbolKind::Field).with_type(enumerable());
        let untyped = Symbol::new("CustomerList", SymbolKind::Field);

        assert_eq!(propose(&typed), vec![pair("NW1001", "Customers")]);
        assert!(propose(&untyped).is_empty());
    }

    #[test]
    fn test_allowed_collection_name_has_no_issue() {
        let symbol = Symbol::new("playList", SymbolKind::Property).with_type(enumerable());
        assert!(propose(&symbol).is_empty());
    }

    #[test]
    fn test_entity_marker() {
        let symbol = Symbol::new("CustomerModel", SymbolKind::Type);
        assert_eq!(propose(&symbol), vec![pair("NW1002", "Customer")]);

        let lone = Symbol::new("Entity", SymbolKind::Type);
        assert!(propose(&lone).is_empty());
    }

    #[test]
    fn test_method_noun_skips_overrides() {
        let method = Symbol::new("Registration", SymbolKind::Method);
        let overriding = Symbol::new("Registration", SymbolKind::Method).with_override(true);
        let implementing =
            Symbol::new("Registration", SymbolKind::Method).with_interface_implementation(true);

        assert_eq!(propose(&method), vec![pair("NW1003", "Register")]);
        assert!(propose(&overriding).is_empty());
        assert!(propose(&implementing).is_empty());
    }

    #[test]
    fn test_boolean_flag() {
        let question = Symbol::new("IsEnabledFlag", SymbolKind::Property).with_type(boolean());
        let bare = Symbol::new("enabledFlag", SymbolKind::Parameter).with_type(boolean());
        let field = Symbol::new("_visibleFlag", SymbolKind::Field).with_type(boolean());
        let not_bool = Symbol::new("enabledFlag", SymbolKind::Parameter);

        assert_eq!(propose(&question), vec![pair("NW1004", "IsEnabled")]);
        assert_eq!(propose(&bare), vec![pair("NW1004", "isEnabled")]);
        assert_eq!(propose(&field), vec![pair("NW1004", "_isVisible")]);
        assert!(propose(&not_bool).is_empty());
    }

    #[test]
    fn test_boolean_flag_on_bare_field_prefix() {
        for name in ["_Flag", "m_Flag", "s_Flag", "t_Flag"] {
            let symbol = Symbol::new(name, SymbolKind::Field).with_type(boolean());
            let issues = propose(&symbol);
            assert!(
                issues.iter().all(|(id, _)| id != "NW1004"),
                "{name}: {issues:?}"
            );
        }
    }

    #[test]
    fn test_field_prefix() {
        let symbol = Symbol::new("m_count", SymbolKind::Field);
        assert_eq!(propose(&symbol), vec![pair("NW1005", "_count")]);

        let local = Symbol::new("m_count", SymbolKind::LocalVariable);
        assert!(propose(&local).is_empty());
    }

    #[test]
    fn test_several_rules_fire_on_one_symbol() {
        let symbol = Symbol::new("m_errorMsg", SymbolKind::Field);
        assert_eq!(
            propose(&symbol),
            vec![pair("NW1005", "_errorMsg"), pair("NW1006", "m_errorMessage")]
        );
    }

    #[test]
    fn test_number_slang() {
        let symbol = Symbol::new("Convert2String", SymbolKind::Method);
        assert_eq!(propose(&symbol), vec![pair("NW1007", "ConvertToString")]);
    }

    #[test]
    fn test_plural_type_name() {
        let plural = Symbol::new("CustomerOrders", SymbolKind::Type);
        let settings = Symbol::new("AppSettings", SymbolKind::Type);
        let collection = Symbol::new("CustomerOrders", SymbolKind::Type).with_type(enumerable());

        assert_eq!(propose(&plural), vec![pair("NW1008", "CustomerOrder")]);
        assert!(propose(&settings).is_empty());
        assert!(propose(&collection).is_empty());
    }

    #[test]
    fn test_test_marker_outside_test_code() {
        let service = Symbol::new("MockPaymentGateway", SymbolKind::Type);
        assert_eq!(propose(&service), vec![pair("NW1009", "PaymentGateway")]);

        let fixture = Arc::new(Symbol::new("PaymentTests", SymbolKind::Type));
        let in_tests =
            Symbol::new("PaymentGatewayStub", SymbolKind::Type).with_containing(&fixture);
        assert!(propose(&in_tests).is_empty());

        let mocking = Symbol::new("Mockingbird", SymbolKind::Type);
        assert!(propose(&mocking).is_empty());
    }

    #[test]
    fn test_event_names() {
        let on = Symbol::new("OnClosed", SymbolKind::Event);
        let verb = Symbol::new("Close", SymbolKind::Event);
        let one = Symbol::new("Once", SymbolKind::Event);

        assert_eq!(propose(&on), vec![pair("NW1010", "Closed")]);
        assert_eq!(propose(&verb), vec![pair("NW1011", "Closing")]);
        assert!(propose(&one).is_empty());
    }

    #[test]
    fn test_event_verb_skips_question_words() {
        for name in ["Is", "Has", "Can", "Was"] {
            let symbol = Symbol::new(name, SymbolKind::Event);
            assert!(propose(&symbol).is_empty(), "{name}");
        }

        let verb = Symbol::new("Do", SymbolKind::Event);
        assert_eq!(propose(&verb), vec![pair("NW1011", "Doing")]);
    }

    #[test]
    fn test_case_sensitive_options() {
        let mut config = Config::default();
        config.defaults.case_sensitive = true;
        config.morphology.extra_collection_suffixes = vec!["Bag".to_string()];
        let options = CatalogOptions::from_config(&config);

        assert_eq!(options.comparison, CaseMode::Ordinal);
        assert_eq!(options.collection_suffixes.last().map(String::as_str), Some("Bag"));
    }

    #[test]
    fn test_configured_suffixes_match_longest_first() {
        let mut config = Config::default();
        config.morphology.extra_collection_suffixes = vec!["ItemList".to_string()];
        let options = CatalogOptions::from_config(&config);

        let lengths: Vec<usize> = options.collection_suffixes.iter().map(String::len).collect();
        assert!(lengths.windows(2).all(|pair| pair[0] >= pair[1]));

        let rules = builtin_rules(&options).unwrap();
        let symbol = Symbol::new("OrderItemList", SymbolKind::Field).with_type(enumerable());
        let issues: Vec<_> = Dispatcher::new(Arc::new(Morphology::default()))
            .dispatch_set(&symbol, &rules)
            .into_iter()
            .map(|issue| (issue.rule_id, issue.proposed_name))
            .collect();
        assert_eq!(issues, vec![pair("NW1001", "Orders")]);
    }
}
