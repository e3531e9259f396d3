//! Loading a formula into the solver.
use log::warn;
use partial_ref::{partial, PartialRef};

use cdclsat_formula::Lit;

use crate::clause::db;
use crate::context::{
    AssignmentP, ClauseDbP, Context, ImplGraphP, SolverStateP, StatsP, TrailP, VsidsP,
    WatchlistsP,
};
use crate::prop::{enqueue_assignment, Reason};
use crate::state::SatState;

/// Adds a clause to the current formula.
///
/// Duplicate literals are removed and tautologies are dropped. Each literal of a stored clause
/// bumps the activity of its variable, so activities start out as occurrence counts. Unit clauses
/// are assigned at level 0. The empty clause makes the formula unsatisfiable.
///
/// Clauses added after the search started are ignored.
pub fn load_clause(
    mut ctx: partial!(
        Context,
        mut AssignmentP,
        mut ClauseDbP,
        mut ImplGraphP,
        mut SolverStateP,
        mut StatsP,
        mut TrailP,
        mut VsidsP,
        mut WatchlistsP,
    ),
    lits: &[Lit],
) {
    let state = ctx.part(SolverStateP);
    if state.search_started {
        warn!("ignoring clause {:?} added after the search started", lits);
        return;
    }
    if state.sat_state == SatState::Unsat {
        return;
    }

    let mut lits = lits.to_vec();
    lits.sort_unstable_by_key(|lit| (lit.index(), lit.is_negative()));
    lits.dedup();

    // Sorted by variable, so complementary literals are adjacent
    if lits.windows(2).any(|pair| pair[0] == !pair[1]) {
        return;
    }

    for &lit in lits.iter() {
        ctx.part_mut(VsidsP).bump(lit.var());
    }

    match lits[..] {
        [] => ctx.part_mut(SolverStateP).sat_state = SatState::Unsat,
        [lit] => {
            let cref = db::add_clause(ctx.borrow(), &lits, false);
            match ctx.part(AssignmentP).lit_value(lit) {
                Some(true) => (),
                Some(false) => ctx.part_mut(SolverStateP).sat_state = SatState::Unsat,
                None => {
                    enqueue_assignment(ctx.borrow(), lit, Reason::Clause(cref));
                    ctx.part_mut(StatsP).propagations += 1;
                }
            }
        }
        _ => {
            db::add_clause(ctx.borrow(), &lits, false);
        }
    }
}
