//! Watchlists to detect clauses that became unit.
//!
//! Each clause with at least two literals is watched by exactly two of its literals, kept at
//! positions 0 and 1 of the clause. A clause of length one is watched by its single literal. The
//! watchlist of a literal lists the clauses it watches.
//!
//! While propagating, a clause is only inspected when one of its watched literals becomes false.
//! The watch is then moved to a non-false literal of the clause, permuting the literals so that the
//! watched literals stay in front. If no replacement exists, the clause is unit under the current
//! assignment (the other watched literal is implied) or conflicting.
//!
//! Each watch also stores a blocking literal of the clause. When it is true the clause is satisfied
//! and the clause itself does not need to be accessed. A clause can thus have two false watched
//! literals while being satisfied by a literal assigned no later than both of them. Unassigning
//! variables on backtracking keeps this property, so watchlists are never updated on backtracking.
use cdclsat_formula::{Lit, LitCoding};

use crate::clause::ClauseRef;

/// A watch on a clause.
#[derive(Copy, Clone, Debug)]
pub struct Watch {
    /// Clause which has the watching lit in position 0 or 1.
    pub cref: ClauseRef,
    /// A lit of the clause, may be the watching lit for clauses of length one.
    pub blocking: Lit,
}

/// Per literal lists of watched clauses.
#[derive(Default)]
pub struct Watchlists {
    coding: LitCoding,
    watches: Vec<Vec<Watch>>,
}

impl Watchlists {
    /// Update structures for a new variable count.
    pub fn set_var_count(&mut self, count: usize) {
        let old_count = self.coding.var_count();
        if count == old_count {
            return;
        }
        // Negative literals are placed after all positive ones, so they need to be moved.
        let mut negative = self.watches.split_off(old_count);
        self.watches.resize(count, vec![]);
        negative.resize(count, vec![]);
        self.watches.append(&mut negative);
        self.coding = LitCoding::new(count);
    }

    /// Start watching a clause.
    ///
    /// `lits` are the literals of the clause, only the first two are watched.
    pub fn watch_clause(&mut self, cref: ClauseRef, lits: &[Lit]) {
        match *lits {
            [] => (),
            [lit] => self.add_watch(lit, Watch { cref, blocking: lit }),
            [first, second, ..] => {
                self.add_watch(
                    first,
                    Watch {
                        cref,
                        blocking: second,
                    },
                );
                self.add_watch(
                    second,
                    Watch {
                        cref,
                        blocking: first,
                    },
                );
            }
        }
    }

    /// Clauses watched by the given literal.
    pub fn watchers_of(&self, lit: Lit) -> &[Watch] {
        &self.watches[self.coding.code(lit)]
    }

    /// Mutable list of clauses watched by the given literal.
    pub fn watchers_of_mut(&mut self, lit: Lit) -> &mut Vec<Watch> {
        let code = self.coding.code(lit);
        &mut self.watches[code]
    }

    /// Make a literal watch a clause.
    pub fn add_watch(&mut self, lit: Lit, watch: Watch) {
        let code = self.coding.code(lit);
        self.watches[code].push(watch)
    }
}
