//! Learns a new clause by analyzing a conflict.
use std::mem::swap;

use partial_ref::{partial, PartialRef};

use cdclsat_formula::{Lit, Var};

use crate::context::{AnalyzeConflictP, ClauseDbP, Context, ImplGraphP, TrailP, VsidsP};
use crate::prop::{Conflict, ImplGraph};

/// Temporaries for conflict analysis
#[derive(Default)]
pub struct AnalyzeConflict {
    /// This is the learned clause after analysis finishes.
    clause: Vec<Lit>,
    /// Number of literals in the current clause at the current level.
    current_level_count: usize,
    /// Variables in the current clause.
    var_flags: Vec<bool>,
    /// Entries to clean in `var_flags`.
    to_clean: Vec<Var>,
}

impl AnalyzeConflict {
    /// Update structures for a new variable count.
    pub fn set_var_count(&mut self, count: usize) {
        self.var_flags.resize(count, false);
    }

    /// The learned clause.
    ///
    /// The asserting literal is at position 0, a literal of the backjump level at position 1.
    pub fn clause(&self) -> &[Lit] {
        &self.clause
    }

    /// Add a literal to the current clause.
    fn add_literal(&mut self, graph: &ImplGraph, current_level: usize, lit: Lit) {
        let lit_level = graph.level(lit.var());
        // No need to add literals that are assigned at level 0 or already present
        if lit_level > 0 && !self.var_flags[lit.index()] {
            self.var_flags[lit.index()] = true;
            self.to_clean.push(lit.var());
            if lit_level == current_level {
                self.current_level_count += 1;
            } else {
                self.clause.push(lit);
            }
        }
    }
}

/// Learns a new clause by analyzing a conflict.
///
/// Resolves the conflicting clause with the reasons of current level assignments, in reverse
/// trail order, until a single current level literal is left (the first unique implication
/// point). Resolution also stops at a decision. All variables of the learned clause are bumped.
///
/// Must not be called at decision level 0. Returns the lowest decision level that makes the
/// learned clause asserting.
pub fn analyze_conflict(
    mut ctx: partial!(
        Context,
        mut AnalyzeConflictP,
        mut VsidsP,
        ClauseDbP,
        ImplGraphP,
        TrailP,
    ),
    conflict: Conflict,
) -> usize {
    let (analyze, mut ctx) = ctx.split_part_mut(AnalyzeConflictP);
    let (vsids, ctx) = ctx.split_part_mut(VsidsP);

    let db = ctx.part(ClauseDbP);
    let graph = ctx.part(ImplGraphP);
    let trail = ctx.part(TrailP);

    let current_level = trail.current_level();
    debug_assert!(current_level > 0);

    analyze.clause.clear();
    analyze.current_level_count = 0;

    // We start with all the literals of the conflicted clause
    for &lit in conflict.lits(db) {
        analyze.add_literal(graph, current_level, lit);
    }

    debug_assert!(analyze.current_level_count > 0);

    // To get rid of all but one literal of the current level, we resolve the clause with the reason
    // for those literals. The correct order for this is reverse chronological.
    let mut pivot = None;

    for &lit in trail.trail().iter().rev() {
        // Is the lit present in the current clause?
        if !analyze.var_flags[lit.index()] {
            continue;
        }
        analyze.var_flags[lit.index()] = false;
        analyze.current_level_count -= 1;

        pivot = Some(lit);

        let reason = graph.reason(lit.var());
        if analyze.current_level_count == 0 || !reason.is_clause() {
            break;
        }

        for &reason_lit in reason.lits(db) {
            analyze.add_literal(graph, current_level, reason_lit);
        }
    }

    // The pivot is the last current level literal, so the clause asserts its negation. It goes to
    // position 0.
    if let Some(pivot) = pivot {
        analyze.clause.push(!pivot);
        let end = analyze.clause.len() - 1;
        analyze.clause.swap(0, end);
    }

    for var in analyze.to_clean.drain(..) {
        analyze.var_flags[var.index()] = false;
    }

    for &lit in analyze.clause.iter() {
        vsids.bump(lit.var());
    }

    // We find the highest level literal besides the asserted literal and move it into position 1.
    // This keeps the watchlist invariant intact when backjumping.
    let mut backjump_to = 0;

    if analyze.clause.len() > 1 {
        let (prefix, rest) = analyze.clause.split_at_mut(2);
        let lit_1 = &mut prefix[1];
        backjump_to = graph.level(lit_1.var());
        for lit in rest.iter_mut() {
            let lit_level = graph.level(lit.var());
            if lit_level > backjump_to {
                backjump_to = lit_level;
                swap(lit_1, lit);
            }
        }
    }

    backjump_to
}

#[cfg(test)]
mod tests {
    use super::*;

    use partial_ref::IntoPartialRefMut;

    use cdclsat_formula::{lit, lits, var};

    use crate::clause::db;
    use crate::context::set_var_count;
    use crate::prop::{enqueue_assignment, propagate, Reason};

    #[test]
    fn learns_first_uip() {
        let mut ctx = Context::default();
        let mut ctx = ctx.into_partial_ref_mut();

        set_var_count(ctx.borrow(), 6);

        for clause in [
            &lits![-1, 2][..],
            &lits![-2, -3, 4][..],
            &lits![-4, 5][..],
            &lits![-4, 6][..],
            &lits![-5, -6][..],
        ]
        .iter()
        {
            db::add_clause(ctx.borrow(), clause, false);
        }

        ctx.part_mut(TrailP).new_decision_level();
        enqueue_assignment(ctx.borrow(), lit!(1), Reason::Decision);
        propagate(ctx.borrow()).unwrap();

        ctx.part_mut(TrailP).new_decision_level();
        enqueue_assignment(ctx.borrow(), lit!(3), Reason::Decision);

        let conflict = match propagate(ctx.borrow()) {
            Err(conflict) => conflict,
            Ok(()) => panic!("expected a conflict"),
        };

        let backjump_to = analyze_conflict(ctx.borrow(), conflict);

        // Both 5 and 6 are implied by 4, the first UIP.
        assert_eq!(ctx.part(AnalyzeConflictP).clause(), &lits![-4][..]);
        assert_eq!(backjump_to, 0);

        assert!(ctx.part(VsidsP).activity(var!(4)) > 0.0);
        assert_eq!(ctx.part(VsidsP).activity(var!(5)), 0.0);
        assert!(ctx
            .part(AnalyzeConflictP)
            .var_flags
            .iter()
            .all(|&flag| !flag));
    }

    #[test]
    fn second_literal_has_backjump_level() {
        let mut ctx = Context::default();
        let mut ctx = ctx.into_partial_ref_mut();

        set_var_count(ctx.borrow(), 5);

        for clause in [&lits![-1, -2, -4, 5][..], &lits![-1, -4, -5][..]].iter() {
            db::add_clause(ctx.borrow(), clause, false);
        }

        for &decision in lits![1, 2, 3, 4].iter() {
            ctx.part_mut(TrailP).new_decision_level();
            enqueue_assignment(ctx.borrow(), decision, Reason::Decision);
            if decision != lit!(4) {
                propagate(ctx.borrow()).unwrap();
            }
        }

        let conflict = match propagate(ctx.borrow()) {
            Err(conflict) => conflict,
            Ok(()) => panic!("expected a conflict"),
        };

        let backjump_to = analyze_conflict(ctx.borrow(), conflict);
        let clause = ctx.part(AnalyzeConflictP).clause();

        assert_eq!(clause[0], lit!(-4));
        assert_eq!(clause.len(), 3);
        assert_eq!(clause[1], lit!(-2));
        assert_eq!(backjump_to, 2);
    }
}
