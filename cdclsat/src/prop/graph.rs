//! The implication graph.
use cdclsat_formula::{lit::LitIdx, Lit, Var};

use crate::clause::{ClauseDb, ClauseRef};

/// Cause of an assignment.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Reason {
    /// A branching decision.
    Decision,
    /// Assigned at level 0 without a clause, e.g. a pure literal.
    Root,
    /// Propagated by a clause, the assigned literal is at position 0 of the clause.
    Clause(ClauseRef),
}

impl Reason {
    /// The literals that caused the propagation.
    ///
    /// These are all false and assigned before the propagated literal.
    pub fn lits<'a>(&self, db: &'a ClauseDb) -> &'a [Lit] {
        match *self {
            Reason::Decision | Reason::Root => &[],
            Reason::Clause(cref) => &db.clause(cref).lits()[1..],
        }
    }

    /// True for assignments that were propagated by a clause.
    pub fn is_clause(&self) -> bool {
        match self {
            Reason::Clause(_) => true,
            _ => false,
        }
    }
}

/// Propagation that resulted in a conflict.
///
/// Refers to the clause with all literals false.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Conflict(pub ClauseRef);

impl Conflict {
    /// The literals that caused the conflict.
    pub fn lits<'a>(&self, db: &'a ClauseDb) -> &'a [Lit] {
        db.clause(self.0).lits()
    }
}

/// Node and incoming edges of the implication graph.
#[derive(Copy, Clone)]
pub struct ImplNode {
    pub reason: Reason,
    pub level: LitIdx,
}

/// The implication graph.
///
/// This is a DAG having all assigned variables as nodes. It has decisions and root assignments as
/// sources. For each propagated assignment it has incoming edges from the literals whose
/// assignment caused the propagation to happen.
#[derive(Default)]
pub struct ImplGraph {
    /// Contains only valid data for indices of assigned variables.
    pub nodes: Vec<ImplNode>,
}

impl ImplGraph {
    /// Update structures for a new variable count.
    pub fn set_var_count(&mut self, count: usize) {
        self.nodes.resize(
            count,
            ImplNode {
                reason: Reason::Decision,
                level: 0,
            },
        );
    }

    /// Get the reason for an assigned variable.
    ///
    /// Returns stale data if the variable isn't assigned.
    pub fn reason(&self, var: Var) -> &Reason {
        &self.nodes[var.index()].reason
    }

    /// Get the decision level of an assigned variable.
    ///
    /// Returns stale data if the variable isn't assigned.
    pub fn level(&self, var: Var) -> usize {
        self.nodes[var.index()].level as usize
    }
}
