//! Propagation of watched clauses.
use std::mem::replace;

use partial_ref::{partial, PartialRef};
use vec_mut_scan::VecMutScan;

use cdclsat_formula::Lit;

use crate::context::{AssignmentP, ClauseDbP, Context, ImplGraphP, StatsP, TrailP, WatchlistsP};

use super::enqueue_assignment;
use super::{Conflict, Reason, Watch};

/// Propagate all literals implied by clauses watched by the negation of the given literal.
///
/// On conflict return the clause with all literals false.
///
/// See [`prop::watch`](crate::prop::watch) for the invariants that this has to uphold.
#[inline(never)]
pub fn propagate_watched(
    mut ctx: partial!(
        Context,
        mut AssignmentP,
        mut ClauseDbP,
        mut ImplGraphP,
        mut StatsP,
        mut TrailP,
        mut WatchlistsP,
    ),
    lit: Lit,
) -> Result<(), Conflict> {
    let (watchlists, mut ctx) = ctx.split_part_mut(WatchlistsP);
    let (db, mut ctx) = ctx.split_part_mut(ClauseDbP);

    let false_lit = !lit;

    // Temporarily move the watches out, so we are free to add watches to other lists. A watch is
    // only ever moved to a non-false literal, so this list does not receive new watches.
    let mut watches = replace(watchlists.watchers_of_mut(false_lit), vec![]);

    let mut scan = VecMutScan::new(&mut watches);

    let mut result = Ok(());

    'watches: while let Some(watch) = scan.next() {
        if ctx.part(AssignmentP).lit_is_true(watch.blocking) {
            continue;
        }

        let cref = watch.cref;
        let lits = db.clause_mut(cref).lits_mut();

        if lits.len() == 1 {
            result = Err(Conflict(cref));
            break;
        }

        // Keep the false literal at position 1, so a propagated literal ends up at position 0.
        if lits[0] == false_lit {
            lits.swap(0, 1);
        }
        let first = lits[0];

        let new_watch = Watch {
            cref,
            blocking: first,
        };

        if first != watch.blocking && ctx.part(AssignmentP).lit_is_true(first) {
            watch.replace(new_watch);
            continue;
        }

        let (initial, rest) = lits.split_at_mut(2);

        for rest_lit_ref in rest.iter_mut() {
            let rest_lit = *rest_lit_ref;
            if !ctx.part(AssignmentP).lit_is_false(rest_lit) {
                initial[1] = rest_lit;
                *rest_lit_ref = false_lit;

                watchlists.add_watch(rest_lit, new_watch);
                watch.remove();

                continue 'watches;
            }
        }

        // No replacement found, the clause is unit or conflicting.
        watch.replace(new_watch);

        if ctx.part(AssignmentP).lit_is_false(first) {
            result = Err(Conflict(cref));
            break;
        }

        enqueue_assignment(ctx.borrow(), first, Reason::Clause(cref));
        ctx.part_mut(StatsP).propagations += 1;
    }

    drop(scan);
    *watchlists.watchers_of_mut(false_lit) = watches;

    result
}
