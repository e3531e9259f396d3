//! CNF formulas.
use std::fmt;
use std::iter::Extend;

use crate::lit::Lit;

/// A conjunction of clauses, each a disjunction of literals.
///
/// All literals live in one shared buffer, `clause_ends[i]` is the end of clause `i` within it.
#[derive(Clone, Default)]
pub struct CnfFormula {
    var_count: usize,
    literals: Vec<Lit>,
    clause_ends: Vec<usize>,
}

impl CnfFormula {
    /// An empty formula over zero variables.
    pub fn new() -> CnfFormula {
        CnfFormula::default()
    }

    /// Number of variables covered by the formula.
    ///
    /// At least one more than the largest variable index used, but may be larger when variables
    /// without occurrences were declared using [`set_var_count`](CnfFormula::set_var_count).
    pub fn var_count(&self) -> usize {
        self.var_count
    }

    /// Declare at least `count` variables.
    ///
    /// The variable count never shrinks.
    pub fn set_var_count(&mut self, count: usize) {
        self.var_count = self.var_count.max(count);
    }

    /// Number of clauses.
    pub fn len(&self) -> usize {
        self.clause_ends.len()
    }

    /// Whether the formula has no clauses.
    pub fn is_empty(&self) -> bool {
        self.clause_ends.is_empty()
    }

    /// Appends a clause.
    ///
    /// Accepts iterators over `Lit` as well as over `&Lit`.
    pub fn add_clause<L>(&mut self, literals: impl IntoIterator<Item = L>)
    where
        Vec<Lit>: Extend<L>,
    {
        let start = self.literals.len();
        self.literals.extend(literals);

        if let Some(max_index) = self.literals[start..].iter().map(|lit| lit.index()).max() {
            self.set_var_count(max_index + 1);
        }

        self.clause_ends.push(self.literals.len());
    }

    /// The clauses in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &[Lit]> {
        let literals = &self.literals;
        let starts = Some(0).into_iter().chain(self.clause_ends.iter().cloned());
        starts
            .zip(self.clause_ends.iter())
            .map(move |(start, &end)| &literals[start..end])
    }
}

/// Collects any iterable of clauses, each an iterable of literals.
impl<F, I, L> From<F> for CnfFormula
where
    F: IntoIterator<Item = I>,
    I: IntoIterator<Item = L>,
    Vec<Lit>: Extend<L>,
{
    fn from(clauses: F) -> CnfFormula {
        let mut formula = CnfFormula::new();
        for clause in clauses {
            formula.add_clause(clause);
        }
        formula
    }
}

/// Prints the variable count followed by the list of clauses.
impl fmt::Debug for CnfFormula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} vars ", self.var_count)?;
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Formulas are equal when they have the same variable count and the same clauses in the same
/// order.
impl PartialEq for CnfFormula {
    fn eq(&self, other: &CnfFormula) -> bool {
        self.var_count == other.var_count
            && self.clause_ends == other.clause_ends
            && self.literals == other.literals
    }
}

impl Eq for CnfFormula {}

#[cfg(any(test, feature = "proptest-strategies"))]
#[doc(hidden)]
pub mod strategy {
    use super::*;

    use proptest::{collection::SizeRange, prelude::*, *};

    use crate::lit::strategy::lit;

    /// Random clauses as nested vectors.
    pub fn vec_formula(
        vars: impl Strategy<Value = usize>,
        clauses: impl Into<SizeRange>,
        clause_len: impl Into<SizeRange>,
    ) -> impl Strategy<Value = Vec<Vec<Lit>>> {
        let clauses = clauses.into();
        let clause_len = clause_len.into();

        vars.prop_ind_flat_map(move |vars| {
            collection::vec(
                collection::vec(lit(0..vars), clause_len.clone()),
                clauses.clone(),
            )
        })
    }

    /// Random formulas, declaring all `vars` variables even when some do not occur.
    pub fn cnf_formula(
        vars: impl Strategy<Value = usize>,
        clauses: impl Into<SizeRange>,
        clause_len: impl Into<SizeRange>,
    ) -> impl Strategy<Value = CnfFormula> {
        let clauses = clauses.into();
        let clause_len = clause_len.into();

        vars.prop_flat_map(move |vars| {
            collection::vec(
                collection::vec(lit(0..vars), clause_len.clone()),
                clauses.clone(),
            )
            .prop_map(move |clauses| {
                let mut formula = CnfFormula::from(clauses);
                formula.set_var_count(vars);
                formula
            })
        })
        // Shrinking nested vectors of literals gets too slow
        .no_shrink()
    }
}
