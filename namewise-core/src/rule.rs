//! Naming rules as data: an id, the kinds it applies to, and two closures.

use crate::morphology::Morphology;
use crate::symbol::{KindSet, Symbol, SymbolKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// What a rule's closures see
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    pub symbol: &'a Symbol,
    pub morphology: &'a Morphology,
}

impl RuleContext<'_> {
    pub fn name(&self) -> &str {
        self.symbol.name()
    }
}

type Predicate = Arc<dyn Fn(&RuleContext<'_>) -> bool + Send + Sync>;
type Proposer = Arc<dyn Fn(&RuleContext<'_>) -> Option<String> + Send + Sync>;

/// A naming rule.
///
/// The predicate decides whether the rule looks at a symbol at all; the
/// proposer is only run when it returns true. Both must be pure: the same
/// symbol always gets the same answer.
#[derive(Clone)]
pub struct Rule {
    id: String,
    description: String,
    applies_to: KindSet,
    predicate: Predicate,
    proposer: Proposer,
}

impl Rule {
    pub fn new(
        id: impl Into<String>,
        applies_to: KindSet,
        predicate: impl Fn(&RuleContext<'_>) -> bool + Send + Sync + 'static,
        proposer: impl Fn(&RuleContext<'_>) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            applies_to,
            predicate: Arc::new(predicate),
            proposer: Arc::new(proposer),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn applies_to(&self) -> KindSet {
        self.applies_to
    }

    pub fn applies(&self, kind: SymbolKind) -> bool {
        self.applies_to.contains(kind)
    }

    pub(crate) fn should_analyze(&self, ctx: &RuleContext<'_>) -> bool {
        (self.predicate)(ctx)
    }

    pub(crate) fn propose(&self, ctx: &RuleContext<'_>) -> Option<String> {
        (self.proposer)(ctx)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("applies_to", &self.applies_to)
            .finish_non_exhaustive()
    }
}

/// Outcome of one rule on one symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// Not applicable, or the rule could not produce an answer
    Skip,
    NoIssue,
    Issue(String),
}

/// A proposed rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingIssue {
    pub symbol_name: String,
    pub kind: SymbolKind,
    pub proposed_name: String,
    pub rule_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("rule id must not be empty")]
    EmptyId,

    #[error("rule {0} does not apply to any symbol kind")]
    NoKinds(String),

    #[error("rule {0} is already registered")]
    DuplicateId(String),
}

/// Rules in registration order, indexed by the kinds they apply to
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
    by_kind: [Vec<usize>; SymbolKind::COUNT],
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, rule: Rule) -> Result<(), RuleError> {
        if rule.id.trim().is_empty() {
            return Err(RuleError::EmptyId);
        }
        if rule.applies_to.is_empty() {
            return Err(RuleError::NoKinds(rule.id));
        }
        if self.get(&rule.id).is_some() {
            return Err(RuleError::DuplicateId(rule.id));
        }

        let index = self.rules.len();
        for kind in rule.applies_to.iter() {
            self.by_kind[kind as usize].push(index);
        }
        self.rules.push(rule);
        Ok(())
    }

    /// A copy without the rules whose ids are listed.
    ///
    /// Ids that match no rule are logged and ignored.
    pub fn without<S: AsRef<str>>(&self, disabled: &[S]) -> Self {
        for id in disabled {
            if self.get(id.as_ref()).is_none() {
                warn!(rule = id.as_ref(), "cannot disable unknown rule");
            }
        }

        let mut set = Self::new();
        for rule in &self.rules {
            if disabled.iter().any(|id| id.as_ref() == rule.id) {
                continue;
            }
            let index = set.rules.len();
            for kind in rule.applies_to.iter() {
                set.by_kind[kind as usize].push(index);
            }
            set.rules.push(rule.clone());
        }
        set
    }

    /// Rules applying to `kind`, in registration order
    pub fn for_kind(&self, kind: SymbolKind) -> impl Iterator<Item = &Rule> {
        self.by_kind[kind as usize].iter().map(|index| &self.rules[*index])
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
