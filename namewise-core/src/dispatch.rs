use crate::morphology::Morphology;
use crate::rule::{Evaluation, NamingIssue, Rule, RuleContext, RuleSet};
use crate::symbol::Symbol;
use rayon::prelude::*;
use serde::Serialize;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Counts of evaluation outcomes since the dispatcher was created
#[derive(Debug, Default)]
pub struct DispatchStats {
    evaluations: AtomicUsize,
    skipped: AtomicUsize,
    clean: AtomicUsize,
    issues: AtomicUsize,
    panics: AtomicUsize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub evaluations: usize,
    pub skipped: usize,
    pub clean: usize,
    pub issues: usize,
    pub panics: usize,
}

impl DispatchStats {
    fn record(&self, evaluation: &Evaluation) {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        let counter = match evaluation {
            Evaluation::Skip => &self.skipped,
            Evaluation::NoIssue => &self.clean,
            Evaluation::Issue(_) => &self.issues,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            evaluations: self.evaluations.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            clean: self.clean.load(Ordering::Relaxed),
            issues: self.issues.load(Ordering::Relaxed),
            panics: self.panics.load(Ordering::Relaxed),
        }
    }
}

/// Routes symbols to the rules that apply to their kind.
///
/// Rules are evaluated in the order given; every rule that fires produces
/// its own issue. A rule that panics is skipped for that symbol and the
/// remaining rules still run.
#[derive(Debug)]
pub struct Dispatcher {
    morphology: Arc<Morphology>,
    stats: DispatchStats,
}

impl Dispatcher {
    pub fn new(morphology: Arc<Morphology>) -> Self {
        Self {
            morphology,
            stats: DispatchStats::default(),
        }
    }

    pub fn morphology(&self) -> &Morphology {
        &self.morphology
    }

    pub fn stats(&self) -> &DispatchStats {
        &self.stats
    }

    /// Run one rule against one symbol
    pub fn evaluate(&self, symbol: &Symbol, rule: &Rule) -> Evaluation {
        let evaluation = self.evaluate_inner(symbol, rule);
        self.stats.record(&evaluation);
        evaluation
    }

    fn evaluate_inner(&self, symbol: &Symbol, rule: &Rule) -> Evaluation {
        if !rule.applies(symbol.kind()) {
            return Evaluation::Skip;
        }

        let ctx = RuleContext {
            symbol,
            morphology: &self.morphology,
        };

        match catch_unwind(AssertUnwindSafe(|| rule.should_analyze(&ctx))) {
            Ok(true) => {},
            Ok(false) => return Evaluation::Skip,
            Err(_) => {
                self.stats.panics.fetch_add(1, Ordering::Relaxed);
                warn!(rule = rule.id(), symbol = symbol.name(), "rule predicate panicked");
                return Evaluation::Skip;
            },
        }

        let proposed = match catch_unwind(AssertUnwindSafe(|| rule.propose(&ctx))) {
            Ok(Some(proposed)) => proposed,
            Ok(None) => {
                debug!(rule = rule.id(), symbol = symbol.name(), "no better name");
                return Evaluation::Skip;
            },
            Err(_) => {
                self.stats.panics.fetch_add(1, Ordering::Relaxed);
                warn!(rule = rule.id(), symbol = symbol.name(), "rule proposer panicked");
                return Evaluation::Skip;
            },
        };

        if proposed.trim().is_empty() || proposed == symbol.name() {
            Evaluation::NoIssue
        } else {
            Evaluation::Issue(proposed)
        }
    }

    /// Issues for `symbol` from every applicable rule in `rules`, in order
    pub fn dispatch(&self, symbol: &Symbol, rules: &[Rule]) -> Vec<NamingIssue> {
        self.collect(symbol, rules.iter())
    }

    /// Like [`dispatch`](Self::dispatch), using the set's kind index
    pub fn dispatch_set(&self, symbol: &Symbol, rules: &RuleSet) -> Vec<NamingIssue> {
        self.collect(symbol, rules.for_kind(symbol.kind()))
    }

    /// Dispatch many symbols in parallel.
    ///
    /// Issues come back grouped by symbol in input order, so the output does
    /// not depend on scheduling.
    pub fn dispatch_all(&self, symbols: &[Arc<Symbol>], rules: &RuleSet) -> Vec<NamingIssue> {
        let per_symbol: Vec<Vec<NamingIssue>> = symbols
            .par_iter()
            .map(|symbol| self.dispatch_set(symbol, rules))
            .collect();

        let issues: Vec<NamingIssue> = per_symbol.into_iter().flatten().collect();
        debug!(symbols = symbols.len(), issues = issues.len(), "dispatch complete");
        issues
    }

    fn collect<'r>(
        &self,
        symbol: &Symbol,
        rules: impl Iterator<Item = &'r Rule>,
    ) -> Vec<NamingIssue> {
        debug_assert!(!symbol.name().is_empty(), "symbol without a name");

        rules
            .filter_map(|rule| match self.evaluate(symbol, rule) {
                Evaluation::Issue(proposed_name) => Some(NamingIssue {
                    symbol_name: symbol.name().to_string(),
                    kind: symbol.kind(),
                    proposed_name,
                    rule_id: rule.id().to_string(),
                }),
                Evaluation::Skip | Evaluation::NoIssue => None,
            })
            .collect()
    }
}
