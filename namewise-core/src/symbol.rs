//! Read-only view of the program elements the rules look at.

use crate::interner::StringCache;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, OnceLock, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Namespace,
    Type,
    Method,
    Property,
    Event,
    Field,
    Parameter,
    LocalVariable,
}

impl SymbolKind {
    pub const COUNT: usize = 8;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Namespace,
        Self::Type,
        Self::Method,
        Self::Property,
        Self::Event,
        Self::Field,
        Self::Parameter,
        Self::LocalVariable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Namespace => "namespace",
            Self::Type => "type",
            Self::Method => "method",
            Self::Property => "property",
            Self::Event => "event",
            Self::Field => "field",
            Self::Parameter => "parameter",
            Self::LocalVariable => "local_variable",
        }
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of symbol kinds a rule applies to
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KindSet(u8);

impl KindSet {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self(u8::MAX);

    pub const fn of(kinds: &[SymbolKind]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < kinds.len() {
            bits |= kinds[i].bit();
            i += 1;
        }
        Self(bits)
    }

    pub const fn contains(self, kind: SymbolKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn insert(&mut self, kind: SymbolKind) {
        self.0 |= kind.bit();
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = SymbolKind> {
        SymbolKind::ALL.into_iter().filter(move |kind| self.contains(*kind))
    }
}

impl FromIterator<SymbolKind> for KindSet {
    fn from_iter<I: IntoIterator<Item = SymbolKind>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

impl fmt::Debug for KindSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    #[default]
    NotApplicable,
    Private,
    Protected,
    Internal,
    ProtectedInternal,
    Public,
}

/// Well-known types some rules care about
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialType {
    #[default]
    None,
    Boolean,
    String,
    Enumerable,
    Enum,
    Void,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,
    #[serde(default)]
    pub special: SpecialType,
    #[serde(default)]
    pub generic_arity: usize,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            special: SpecialType::None,
            generic_arity: 0,
        }
    }

    pub fn with_special(mut self, special: SpecialType) -> Self {
        self.special = special;
        self
    }

    pub fn with_generic_arity(mut self, arity: usize) -> Self {
        self.generic_arity = arity;
        self
    }
}

type TypeResolver = Arc<dyn Fn() -> Option<TypeDescriptor> + Send + Sync>;

/// A named program element.
///
/// Symbols are built by the host and never mutated by the rules. The
/// containing symbol is held weakly, so the host must keep parents alive
/// for as long as their children are analysed (see [`SymbolTable`]). The
/// type descriptor is resolved at most once, on first request.
pub struct Symbol {
    name: Arc<str>,
    kind: SymbolKind,
    containing: Option<Weak<Symbol>>,
    accessibility: Accessibility,
    is_override: bool,
    is_interface_implementation: bool,
    resolved_type: OnceLock<Option<TypeDescriptor>>,
    resolver: Option<TypeResolver>,
}

impl Symbol {
    pub fn new(name: impl Into<Arc<str>>, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            kind,
            containing: None,
            accessibility: Accessibility::default(),
            is_override: false,
            is_interface_implementation: false,
            resolved_type: OnceLock::new(),
            resolver: None,
        }
    }

    pub fn with_containing(mut self, parent: &Arc<Symbol>) -> Self {
        self.containing = Some(Arc::downgrade(parent));
        self
    }

    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn with_override(mut self, is_override: bool) -> Self {
        self.is_override = is_override;
        self
    }

    pub fn with_interface_implementation(mut self, implements: bool) -> Self {
        self.is_interface_implementation = implements;
        self
    }

    /// Attach an already-known type
    pub fn with_type(self, descriptor: TypeDescriptor) -> Self {
        let _ = self.resolved_type.set(Some(descriptor));
        self
    }

    /// Attach a resolver run the first time the type is asked for
    pub fn with_type_resolver(
        mut self,
        resolver: impl Fn() -> Option<TypeDescriptor> + Send + Sync + 'static,
    ) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shared_name(&self) -> &Arc<str> {
        &self.name
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn accessibility(&self) -> Accessibility {
        self.accessibility
    }

    pub fn is_override(&self) -> bool {
        self.is_override
    }

    pub fn is_interface_implementation(&self) -> bool {
        self.is_interface_implementation
    }

    pub fn type_descriptor(&self) -> Option<&TypeDescriptor> {
        self.resolved_type
            .get_or_init(|| self.resolver.as_ref().and_then(|resolve| resolve()))
            .as_ref()
    }

    pub fn special_type(&self) -> SpecialType {
        self.type_descriptor()
            .map_or(SpecialType::None, |descriptor| descriptor.special)
    }

    /// The containing symbol, if it is still alive
    pub fn containing_symbol(&self) -> Option<Arc<Symbol>> {
        self.containing.as_ref().and_then(Weak::upgrade)
    }

    /// Containing symbols from the innermost outwards
    pub fn ancestors(&self) -> impl Iterator<Item = Arc<Symbol>> {
        std::iter::successors(self.containing_symbol(), |symbol| symbol.containing_symbol())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Symbol")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("accessibility", &self.accessibility)
            .field("is_override", &self.is_override)
            .field("is_interface_implementation", &self.is_interface_implementation)
            .field("type", &self.resolved_type.get())
            .field("containing", &self.containing_symbol().map(|s| s.name.clone()))
            .finish_non_exhaustive()
    }
}

/// Serialized form of a symbol, with its containing symbols nested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRecord {
    pub name: String,
    pub kind: SymbolKind,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(default)]
    pub is_override: bool,
    #[serde(default)]
    pub is_interface_implementation: bool,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_descriptor: Option<TypeDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containing: Option<Box<SymbolRecord>>,
}

/// Symbols built from records, owning every containing symbol they point to
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Arc<Symbol>>,
    parents: Vec<Arc<Symbol>>,
}

impl SymbolTable {
    pub fn from_records(records: &[SymbolRecord], cache: &StringCache) -> Self {
        let mut table = Self::default();
        for record in records {
            let symbol = table.build(record, cache);
            table.symbols.push(symbol);
        }
        table
    }

    pub fn from_json(text: &str, cache: &StringCache) -> serde_json::Result<Self> {
        let records: Vec<SymbolRecord> = serde_json::from_str(text)?;
        Ok(Self::from_records(&records, cache))
    }

    fn build(&mut self, record: &SymbolRecord, cache: &StringCache) -> Arc<Symbol> {
        let mut symbol = Symbol::new(cache.intern_str(&record.name), record.kind)
            .with_accessibility(record.accessibility)
            .with_override(record.is_override)
            .with_interface_implementation(record.is_interface_implementation);

        if let Some(descriptor) = &record.type_descriptor {
            symbol = symbol.with_type(descriptor.clone());
        }
        if let Some(parent) = &record.containing {
            let parent = self.build(parent, cache);
            symbol = symbol.with_containing(&parent);
            self.parents.push(parent);
        }

        Arc::new(symbol)
    }

    pub fn symbols(&self) -> &[Arc<Symbol>] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_kind_set() {
        let set = KindSet::of(&[SymbolKind::Field, SymbolKind::Property]);
        assert!(set.contains(SymbolKind::Field));
        assert!(set.contains(SymbolKind::Property));
        assert!(!set.contains(SymbolKind::Method));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![SymbolKind::Property, SymbolKind::Field]);
        assert!(KindSet::EMPTY.is_empty());
        assert!(SymbolKind::ALL.iter().all(|kind| KindSet::ALL.contains(*kind)));
    }

    #[test]
    fn test_type_is_resolved_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let symbol = Symbol::new("IsEnabled", SymbolKind::Property).with_type_resolver(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Some(TypeDescriptor::new("bool").with_special(SpecialType::Boolean))
        });

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(symbol.special_type(), SpecialType::Boolean);
        assert_eq!(symbol.special_type(), SpecialType::Boolean);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_containing_symbol_is_weak() {
        let parent = Arc::new(Symbol::new("CustomerTests", SymbolKind::Type));
        let child = Symbol::new("MockRepository", SymbolKind::Method).with_containing(&parent);

        assert_eq!(child.containing_symbol().map(|p| p.name().to_string()).as_deref(), Some("CustomerTests"));
        drop(parent);
        assert!(child.containing_symbol().is_none());
        assert_eq!(child.ancestors().count(), 0);
    }

    #[test]
    fn test_table_from_json_keeps_parents_alive() {
        let json = r#"[
            {
                "name": "customerList",
                "kind": "field",
                "accessibility": "private",
                "type": { "name": "List", "special": "enumerable", "generic_arity": 1 },
                "containing": {
                    "name": "CustomerService",
                    "kind": "type",
                    "containing": { "name": "Shop.Sales", "kind": "namespace" }
                }
            },
            { "name": "Registration", "kind": "method", "is_override": true }
        ]"#;

        let cache = StringCache::new();
        let table = SymbolTable::from_json(json, &cache).unwrap();
        assert_eq!(table.len(), 2);

        let field = &table.symbols()[0];
        assert_eq!(field.kind(), SymbolKind::Field);
        assert_eq!(field.accessibility(), Accessibility::Private);
        assert_eq!(field.special_type(), SpecialType::Enumerable);
        let ancestors: Vec<String> = field.ancestors().map(|s| s.name().to_string()).collect();
        assert_eq!(ancestors, vec!["CustomerService", "Shop.Sales"]);

        let method = &table.symbols()[1];
        assert!(method.is_override());
        assert!(method.type_descriptor().is_none());
    }

    #[test]
    fn test_names_are_interned() {
        let cache = StringCache::new();
        let records = vec![
            SymbolRecord {
                name: "Customer".to_string(),
                kind: SymbolKind::Type,
                accessibility: Accessibility::Public,
                is_override: false,
                is_interface_implementation: false,
                type_descriptor: None,
                containing: None,
            };
            2
        ];
        let table = SymbolTable::from_records(&records, &cache);
        assert!(Arc::ptr_eq(
            table.symbols()[0].shared_name(),
            table.symbols()[1].shared_name()
        ));
    }
}
