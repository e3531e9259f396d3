//! Database of all stored clauses.
use partial_ref::{partial, PartialRef};

use cdclsat_formula::{Lit, Var};

use crate::context::{ClauseDbP, Context, WatchlistsP};

use super::Clause;

/// Compact reference to a stored clause.
///
/// Clauses are never removed, so a reference stays valid for the lifetime of the solver.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ClauseRef {
    index: u32,
}

impl ClauseRef {
    pub fn from_index(index: usize) -> ClauseRef {
        ClauseRef {
            index: index as u32,
        }
    }

    pub fn index(self) -> usize {
        self.index as usize
    }
}

/// Append only store of original and learned clauses.
///
/// Also keeps per variable occurrence counts over the original clauses, which seed the initial
/// branching activities and are used to detect pure literals.
#[derive(Default)]
pub struct ClauseDb {
    clauses: Vec<Clause>,
    learned_count: usize,
    /// Number of positive and negative occurrences in original clauses.
    occurrences: Vec<[usize; 2]>,
}

impl ClauseDb {
    /// Update structures for a new variable count.
    pub fn set_var_count(&mut self, count: usize) {
        self.occurrences.resize(count, [0, 0]);
    }

    pub fn clause(&self, cref: ClauseRef) -> &Clause {
        &self.clauses[cref.index()]
    }

    pub fn clause_mut(&mut self, cref: ClauseRef) -> &mut Clause {
        &mut self.clauses[cref.index()]
    }

    /// Number of stored clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Number of learned clauses.
    pub fn learned_count(&self) -> usize {
        self.learned_count
    }

    /// References to all stored clauses in insertion order.
    pub fn clause_refs(&self) -> impl Iterator<Item = ClauseRef> {
        (0..self.clauses.len()).map(ClauseRef::from_index)
    }

    /// Number of positive and negative occurrences of a variable in original clauses.
    pub fn occurrences(&self, var: Var) -> [usize; 2] {
        self.occurrences[var.index()]
    }

    /// Occurrence counts for all variables, indexed by variable.
    pub fn all_occurrences(&self) -> &[[usize; 2]] {
        &self.occurrences
    }
}

/// Store a new clause and watch it.
///
/// The literals at position 0 and 1 become the watched literals. Clauses of length one get a
/// single watch. Original clauses update the occurrence counts.
pub fn add_clause(
    mut ctx: partial!(Context, mut ClauseDbP, mut WatchlistsP),
    lits: &[Lit],
    learned: bool,
) -> ClauseRef {
    debug_assert!(!lits.is_empty());

    let (db, mut ctx) = ctx.split_part_mut(ClauseDbP);

    let cref = ClauseRef::from_index(db.clauses.len());

    if learned {
        db.learned_count += 1;
    } else {
        debug_assert_eq!(db.learned_count, 0, "original clause added after learning");
        for &lit in lits {
            db.occurrences[lit.index()][lit.is_negative() as usize] += 1;
        }
    }

    db.clauses.push(Clause {
        lits: lits.to_vec(),
        learned,
    });

    ctx.part_mut(WatchlistsP).watch_clause(cref, lits);

    cref
}

#[cfg(test)]
mod tests {
    use super::*;

    use partial_ref::IntoPartialRefMut;

    use cdclsat_formula::{lit, lits, var};

    use crate::context::set_var_count;

    #[test]
    fn counts_original_occurrences() {
        let mut ctx = Context::default();
        let mut ctx = ctx.into_partial_ref_mut();

        set_var_count(ctx.borrow(), 3);

        let first = add_clause(ctx.borrow(), &lits![1, -2, 3], false);
        let second = add_clause(ctx.borrow(), &lits![-1, -2], false);
        let learned = add_clause(ctx.borrow(), &lits![1, 2], true);

        let db = ctx.part(ClauseDbP);

        assert_eq!(db.len(), 3);
        assert_eq!(db.learned_count(), 1);
        assert_eq!(db.occurrences(var!(1)), [1, 1]);
        assert_eq!(db.occurrences(var!(2)), [0, 2]);
        assert_eq!(db.occurrences(var!(3)), [1, 0]);

        assert!(!db.clause(first).is_learned());
        assert!(db.clause(learned).is_learned());
        assert_eq!(db.clause(second).lits(), &lits![-1, -2][..]);
        assert_eq!(
            db.clause_refs().collect::<Vec<_>>(),
            vec![first, second, learned]
        );

        let watchlists = ctx.part(WatchlistsP);
        assert!(watchlists
            .watchers_of(lit!(-2))
            .iter()
            .any(|watch| watch.cref == first));
        assert!(watchlists
            .watchers_of(lit!(1))
            .iter()
            .any(|watch| watch.cref == first));
        assert!(watchlists.watchers_of(lit!(3)).is_empty());
    }
}
