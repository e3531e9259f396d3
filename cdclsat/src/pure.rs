//! Pure literal assignment.
//!
//! A variable occurring with a single polarity in the original clauses can be assigned that
//! polarity. This satisfies all clauses containing it and falsifies none, so it preserves
//! satisfiability.
use log::debug;
use partial_ref::{partial, PartialRef};

use cdclsat_formula::Var;

use crate::context::{AssignmentP, ClauseDbP, Context, ImplGraphP, TrailP};
use crate::prop::{enqueue_assignment, Reason};

/// Assign all unassigned pure literals at level 0.
///
/// Returns the number of assigned literals. Does not propagate.
pub fn assign_pure_literals(
    mut ctx: partial!(Context, mut AssignmentP, mut ImplGraphP, mut TrailP, ClauseDbP),
) -> usize {
    debug_assert_eq!(ctx.part(TrailP).current_level(), 0);

    let (db, mut ctx) = ctx.split_part(ClauseDbP);

    let mut count = 0;

    for (index, &[positive, negative]) in db.all_occurrences().iter().enumerate() {
        let polarity = match (positive, negative) {
            (0, 0) => continue,
            (_, 0) => true,
            (0, _) => false,
            _ => continue,
        };
        let var = Var::from_index(index);
        if ctx.part(AssignmentP).var_value(var).is_some() {
            continue;
        }
        enqueue_assignment(ctx.borrow(), var.lit(polarity), Reason::Root);
        count += 1;
    }

    debug!("assigned {} pure literals", count);

    count
}
