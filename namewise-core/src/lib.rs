#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod abbreviation;
pub mod acronym;
pub mod case_model;
pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod entity_marker;
pub mod interner;
pub mod markers;
pub mod morphology;
pub mod output;
pub mod pluralizer;
pub mod rule;
pub mod symbol;
pub mod verbalizer;

pub use case_model::{split_words, CaseMode};
pub use catalog::{builtin_rules, CatalogOptions};
pub use config::Config;
pub use dispatch::{DispatchStats, Dispatcher, StatsSnapshot};
pub use entity_marker::{has_marker, strip_entity_marker};
pub use interner::{Memo, StringCache};
pub use morphology::Morphology;
pub use output::{
    CheckResult, MorphologyResult, OutputFormat, OutputFormatter, RuleInfo, RuleListResult,
};
pub use rule::{Evaluation, NamingIssue, Rule, RuleContext, RuleError, RuleSet};
pub use symbol::{
    Accessibility, KindSet, SpecialType, Symbol, SymbolKind, SymbolRecord, SymbolTable,
    TypeDescriptor,
};
