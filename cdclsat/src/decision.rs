//! Decision heuristics.
use log::trace;
use partial_ref::{partial, PartialRef};

use crate::{
    context::{parts::*, Context},
    prop::{enqueue_assignment, Reason},
};

pub mod phase;
pub mod vsids;

/// Make a decision and enqueue it.
///
/// Returns `false` if no decision was made because all variables are assigned.
pub fn make_decision(
    mut ctx: partial!(
        Context,
        mut AssignmentP,
        mut ImplGraphP,
        mut PhaseP,
        mut StatsP,
        mut TrailP,
        VsidsP,
    ),
) -> bool {
    let decision_var = match ctx
        .part(VsidsP)
        .select(ctx.part(AssignmentP).assignment())
    {
        Some(var) => var,
        None => return false,
    };

    let saved_phase = ctx.part(AssignmentP).saved_phase(decision_var);
    let decision = decision_var.lit(ctx.part_mut(PhaseP).choose(saved_phase));

    ctx.part_mut(TrailP).new_decision_level();
    ctx.part_mut(StatsP).decisions += 1;

    trace!(
        "decision {} at level {}",
        decision,
        ctx.part(TrailP).current_level()
    );

    enqueue_assignment(ctx.borrow(), decision, Reason::Decision);

    true
}
