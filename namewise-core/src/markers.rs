//! Static marker tables consulted by the morphology engine and the rule catalog.
//!
//! Every table is ordered longest entry first, ties broken ordinally, so a
//! lookup never settles on a shorter partial match ("Helpers" before
//! "Helper", "ObservableCollection" before "Collection").

use crate::case_model::CaseMode;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// What a recognized prefix or suffix means
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerCategory {
    Collection,
    BooleanQuestion,
    Entity,
    Abbreviation,
    NumberWord,
    Test,
    FieldPrefix,
    VerbPrefix,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub text: String,
    pub category: MarkerCategory,
    /// Word the marker should be rewritten to, when the category has one
    pub replacement: Option<String>,
}

impl Marker {
    pub fn new(text: impl Into<String>, category: MarkerCategory) -> Self {
        Self {
            text: text.into(),
            category,
            replacement: None,
        }
    }

    pub fn with_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.replacement = Some(replacement.into());
        self
    }
}

/// Ordered prefix/suffix table
#[derive(Debug, Clone, Default)]
pub struct MarkerTable {
    entries: Vec<Marker>,
}

impl MarkerTable {
    pub fn new(entries: impl IntoIterator<Item = Marker>) -> Self {
        let mut entries: Vec<Marker> = entries.into_iter().collect();
        entries.sort_by(|a, b| b.text.len().cmp(&a.text.len()).then_with(|| a.text.cmp(&b.text)));
        entries.dedup_by(|a, b| a.text == b.text);
        Self { entries }
    }

    pub fn from_texts(texts: &[&str], category: MarkerCategory) -> Self {
        Self::new(texts.iter().map(|t| Marker::new(*t, category)))
    }

    /// Longest entry `name` ends with
    pub fn find_suffix(&self, name: &str, mode: CaseMode) -> Option<&Marker> {
        self.entries.iter().find(|m| mode.ends_with(name, &m.text))
    }

    /// Longest entry `name` starts with
    pub fn find_prefix(&self, name: &str, mode: CaseMode) -> Option<&Marker> {
        self.entries.iter().find(|m| mode.starts_with(name, &m.text))
    }

    pub fn find_exact(&self, name: &str, mode: CaseMode) -> Option<&Marker> {
        self.entries.iter().find(|m| mode.equals(name, &m.text))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.entries.iter()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|m| m.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collection-type suffixes in PascalCase and camelCase
pub const COLLECTION_SUFFIXES: &[&str] = &[
    "ObservableCollection",
    "observableCollection",
    "ReadOnlyCollection",
    "readOnlyCollection",
    "Collection",
    "collection",
    "Dictionary",
    "dictionary",
    "Enumerable",
    "enumerable",
    "HashSet",
    "hashSet",
    "Array",
    "array",
    "Queue",
    "queue",
    "Stack",
    "stack",
    "List",
    "list",
];

/// Collection names that are acceptable as they are
pub const ALLOWED_COLLECTION_NAMES: &[&str] = &[
    "map",
    "array",
    "list",
    "stack",
    "dictionary",
    "blackList",
    "whiteList",
    "playList",
];

pub const ENTITY_MARKERS: &[&str] = &["Entities", "Entity", "Models", "Model"];

/// Field prefixes, longest first; the empty prefix is implied
pub const FIELD_PREFIXES: &[&str] = &["m_", "s_", "t_", "_"];

pub const BOOLEAN_PREFIXES: &[&str] = &[
    "Are", "Can", "Contains", "Does", "Has", "Is", "Must", "Should", "Was", "Were", "Will",
];

pub const TEST_MARKERS: &[&str] = &["Dummy", "Fake", "Mock", "Spy", "Stub"];

/// Compound suffixes removed before a stem is pluralized
pub const COMPOUND_SUFFIXES: &[&str] = &["ToConvert", "ToModel"];

/// Digits used as slang for short words between two words ("Convert2String")
pub const NUMBER_SLANG: &[(&str, &str)] = &[("2", "To"), ("4", "For")];

pub const DEFAULT_ABBREVIATIONS: &[(&str, &str)] = &[
    ("Args", "Arguments"),
    ("Arg", "Argument"),
    ("Attrs", "Attributes"),
    ("Attr", "Attribute"),
    ("Btn", "Button"),
    ("Calc", "Calculate"),
    ("Cfg", "Configuration"),
    ("Cnt", "Count"),
    ("Ctx", "Context"),
    ("Dest", "Destination"),
    ("Dst", "Destination"),
    ("Idx", "Index"),
    ("Img", "Image"),
    ("Lbl", "Label"),
    ("Mgr", "Manager"),
    ("Msg", "Message"),
    ("Num", "Number"),
    ("Params", "Parameters"),
    ("Param", "Parameter"),
    ("Props", "Properties"),
    ("Prop", "Property"),
    ("Ptr", "Pointer"),
    ("Pwd", "Password"),
    ("Req", "Request"),
    ("Resp", "Response"),
    ("Src", "Source"),
    ("Tmp", "Temporary"),
    ("Txt", "Text"),
    ("Usr", "User"),
];

/// Method-name prefixes that already read as a verb
pub const VERB_PREFIXES: &[&str] = &[
    "Abort", "Accept", "Activate", "Add", "Adjust", "Allow", "Analyze", "Append", "Apply",
    "Arrange", "Assert", "Assign", "Attach", "Begin", "Build", "Calculate", "Call", "Cancel",
    "Change", "Check", "Clean", "Clear", "Clone", "Close", "Collect", "Combine", "Compare",
    "Compile", "Compute", "Configure", "Connect", "Contains", "Convert", "Copy", "Count",
    "Create", "Decode", "Decrease", "Delete", "Dequeue", "Deserialize", "Detach", "Determine",
    "Disable", "Dispose", "Do", "Download", "Enable", "Encode", "End", "Enqueue", "Ensure",
    "Evaluate", "Execute", "Export", "Extract", "Fill", "Filter", "Find", "Finish", "Flush",
    "Format", "Generate", "Get", "Handle", "Has", "Hide", "Import", "Increase", "Initialize",
    "Insert", "Install", "Invoke", "Is", "Load", "Lock", "Log", "Make", "Map", "Merge", "Move",
    "Navigate", "Normalize", "Notify", "Open", "Parse", "Perform", "Pop", "Prepare", "Print",
    "Process", "Publish", "Push", "Query", "Raise", "Read", "Receive", "Refresh", "Register",
    "Release", "Reload", "Remove", "Rename", "Render", "Replace", "Report", "Request", "Reset",
    "Resolve", "Restore", "Retrieve", "Return", "Run", "Save", "Scan", "Search", "Select",
    "Send", "Serialize", "Set", "Show", "Sort", "Split", "Start", "Stop", "Store", "Subscribe",
    "Throw", "Toggle", "Transform", "Translate", "Try", "Unlock", "Unregister", "Unsubscribe",
    "Update", "Upload", "Validate", "Verify", "Visit", "Wait", "Write",
];

/// Noun endings and the verb endings they derive from, most specific first.
///
/// Order matters: "Registration" must hit "stration" before "ation" turns it
/// into "Registrate". This table is scanned in order, not re-sorted.
pub const NOUN_TO_VERB: &[(&str, &str)] = &[
    ("stration", "ster"),
    ("mentation", "ment"),
    ("ification", "ify"),
    ("cellation", "cel"),
    ("scription", "scribe"),
    ("ization", "ize"),
    ("isation", "ise"),
    ("llation", "ll"),
    ("ception", "ceive"),
    ("sumption", "sume"),
    ("olution", "olve"),
    ("ution", "ute"),
    ("letion", "lete"),
    ("ction", "ct"),
    ("ission", "it"),
    ("ession", "ess"),
    ("ansion", "and"),
    ("ension", "end"),
    ("ersion", "ert"),
    ("ision", "ide"),
    ("usion", "ude"),
    ("osion", "ode"),
    ("rison", "re"),
    ("ation", "ate"),
    ("ieval", "ieve"),
    ("ival", "ive"),
    ("oval", "ove"),
];

static COLLECTION_TABLE: OnceLock<MarkerTable> = OnceLock::new();
static ENTITY_TABLE: OnceLock<MarkerTable> = OnceLock::new();
static FIELD_PREFIX_TABLE: OnceLock<MarkerTable> = OnceLock::new();
static BOOLEAN_TABLE: OnceLock<MarkerTable> = OnceLock::new();
static TEST_TABLE: OnceLock<MarkerTable> = OnceLock::new();
static VERB_PREFIX_TABLE: OnceLock<MarkerTable> = OnceLock::new();

pub fn collection_suffixes() -> &'static MarkerTable {
    COLLECTION_TABLE
        .get_or_init(|| MarkerTable::from_texts(COLLECTION_SUFFIXES, MarkerCategory::Collection))
}

pub fn entity_markers() -> &'static MarkerTable {
    ENTITY_TABLE.get_or_init(|| {
        MarkerTable::new(ENTITY_MARKERS.iter().map(|m| {
            let replacement = if m.ends_with('s') { "Entities" } else { "Entity" };
            Marker::new(*m, MarkerCategory::Entity).with_replacement(replacement)
        }))
    })
}

pub fn field_prefixes() -> &'static MarkerTable {
    FIELD_PREFIX_TABLE
        .get_or_init(|| MarkerTable::from_texts(FIELD_PREFIXES, MarkerCategory::FieldPrefix))
}

pub fn boolean_prefixes() -> &'static MarkerTable {
    BOOLEAN_TABLE
        .get_or_init(|| MarkerTable::from_texts(BOOLEAN_PREFIXES, MarkerCategory::BooleanQuestion))
}

pub fn test_markers() -> &'static MarkerTable {
    TEST_TABLE.get_or_init(|| MarkerTable::from_texts(TEST_MARKERS, MarkerCategory::Test))
}

/// Verb prefixes, searched longest then alphabetical
pub fn verb_prefixes() -> &'static MarkerTable {
    VERB_PREFIX_TABLE
        .get_or_init(|| MarkerTable::from_texts(VERB_PREFIXES, MarkerCategory::VerbPrefix))
}

/// Split a field prefix off `name`, returning `(prefix, rest)`.
///
/// A name made only of a prefix (`"_"`) keeps it as the rest.
pub fn split_field_prefix(name: &str) -> (&str, &str) {
    match field_prefixes().find_prefix(name, CaseMode::Ordinal) {
        Some(prefix) if name.len() > prefix.text.len() => name.split_at(prefix.text.len()),
        _ => ("", name),
    }
}
