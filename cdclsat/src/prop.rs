//! Unit propagation.
use partial_ref::{partial, PartialRef};

use crate::context::{AssignmentP, ClauseDbP, Context, ImplGraphP, StatsP, TrailP, WatchlistsP};

pub mod assignment;
pub mod graph;
pub mod watch;
pub mod watched;

pub use assignment::{backtrack, enqueue_assignment, Assignment, Trail};
pub use graph::{Conflict, ImplGraph, Reason};
pub use watch::{Watch, Watchlists};

/// Propagate enqueued assignments.
///
/// Returns when all enqueued assignments are propagated, including newly propagated assignemnts,
/// or if there is a conflict.
///
/// On conflict the first clause found with all literals false is returned. The trail and assignment
/// are left as they were when the conflict was detected.
pub fn propagate(
    mut ctx: partial!(
        Context,
        mut AssignmentP,
        mut ClauseDbP,
        mut ImplGraphP,
        mut StatsP,
        mut TrailP,
        mut WatchlistsP,
    ),
) -> Result<(), Conflict> {
    while let Some(lit) = ctx.part(TrailP).queue_head() {
        ctx.part_mut(TrailP).pop_queue();
        watched::propagate_watched(ctx.borrow(), lit)?;
    }
    Ok(())
}

/// Propagate all assignments on the trail, including those that were propagated before.
///
/// Used once before searching, after clauses were loaded and literals were assigned at level 0.
/// Clauses loaded after some of their literals became false have false watched literals, these
/// are repaired by visiting every assignment.
pub fn full_propagate(
    mut ctx: partial!(
        Context,
        mut AssignmentP,
        mut ClauseDbP,
        mut ImplGraphP,
        mut StatsP,
        mut TrailP,
        mut WatchlistsP,
    ),
) -> Result<(), Conflict> {
    ctx.part_mut(TrailP).rewind_queue();
    propagate(ctx.borrow())
}
