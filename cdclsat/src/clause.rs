//! Clause storage.
use cdclsat_formula::Lit;

pub mod db;

pub use db::{ClauseDb, ClauseRef};

/// A stored clause.
///
/// The literal order is significant: for clauses with two or more literals, the literals at
/// position 0 and 1 are the watched literals. When a clause is the reason for an assignment, the
/// assigned literal is at position 0.
#[derive(Clone, Debug)]
pub struct Clause {
    lits: Vec<Lit>,
    learned: bool,
}

impl Clause {
    /// The clause's literals.
    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }

    /// Mutable slice of the clause's literals.
    ///
    /// Permuting them is allowed, but the watchlists have to be kept consistent.
    pub fn lits_mut(&mut self) -> &mut [Lit] {
        &mut self.lits
    }

    /// Whether the clause was derived by conflict analysis.
    pub fn is_learned(&self) -> bool {
        self.learned
    }
}
