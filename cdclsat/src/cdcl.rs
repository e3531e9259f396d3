//! Conflict driven clause learning.
use log::{debug, trace};
use partial_ref::{partial, PartialRef};

use crate::analyze_conflict::analyze_conflict;
use crate::clause::db;
use crate::context::{
    AnalyzeConflictP, AssignmentP, ClauseDbP, Context, ImplGraphP, PhaseP, ScheduleP,
    SolverConfigP, SolverStateP, StatsP, TrailP, VsidsP, WatchlistsP,
};
use crate::decision::make_decision;
use crate::prop::{backtrack, enqueue_assignment, full_propagate, propagate, Conflict, Reason};
use crate::pure::assign_pure_literals;
use crate::state::SatState;

/// Prepare the loaded formula for searching.
///
/// Assigns pure literals and propagates all level 0 assignments. Clauses added afterwards are
/// ignored. Does nothing when called again.
pub fn start_search(
    mut ctx: partial!(
        Context,
        mut AssignmentP,
        mut ClauseDbP,
        mut ImplGraphP,
        mut SolverStateP,
        mut StatsP,
        mut TrailP,
        mut WatchlistsP,
        SolverConfigP,
    ),
) {
    let state = ctx.part_mut(SolverStateP);
    if state.search_started {
        return;
    }
    state.search_started = true;

    if state.sat_state != SatState::Unknown {
        return;
    }

    if ctx.part(SolverConfigP).pure_literals {
        assign_pure_literals(ctx.borrow());
    }

    if full_propagate(ctx.borrow()).is_err() {
        debug!("conflict at level 0 before searching");
        ctx.part_mut(StatsP).conflicts += 1;
        ctx.part_mut(SolverStateP).sat_state = SatState::Unsat;
    }
}

/// Find a conflict, learn a clause and backjump.
///
/// Updates the satisfiability state when a satisfying assignment or a conflict at level 0 is
/// found.
pub fn conflict_step(
    mut ctx: partial!(
        Context,
        mut AnalyzeConflictP,
        mut AssignmentP,
        mut ClauseDbP,
        mut ImplGraphP,
        mut PhaseP,
        mut ScheduleP,
        mut SolverStateP,
        mut StatsP,
        mut TrailP,
        mut VsidsP,
        mut WatchlistsP,
        SolverConfigP,
    ),
) {
    match find_conflict(ctx.borrow()) {
        Ok(()) => ctx.part_mut(SolverStateP).sat_state = SatState::Sat,
        Err(conflict) => resolve_conflict(ctx.borrow(), conflict),
    }
}

/// Propagate and make decisions until there is a conflict.
///
/// Returns `Err` if a conflict was found and `Ok` if a satisfying assignment was found instead.
pub fn find_conflict(
    mut ctx: partial!(
        Context,
        mut AssignmentP,
        mut ClauseDbP,
        mut ImplGraphP,
        mut PhaseP,
        mut StatsP,
        mut TrailP,
        mut WatchlistsP,
        VsidsP,
    ),
) -> Result<(), Conflict> {
    loop {
        propagate(ctx.borrow())?;

        if !make_decision(ctx.borrow()) {
            return Ok(());
        }
    }
}

/// Learn from a conflict and backjump.
///
/// A conflict at level 0 makes the formula unsatisfiable. Otherwise the learned clause is stored
/// and, unless a restart is due, its asserting literal is assigned at the backjump level. On a
/// restart all decisions are undone and the learned clause is only asserted when it is asserting
/// at level 0.
pub fn resolve_conflict(
    mut ctx: partial!(
        Context,
        mut AnalyzeConflictP,
        mut AssignmentP,
        mut ClauseDbP,
        mut ImplGraphP,
        mut ScheduleP,
        mut SolverStateP,
        mut StatsP,
        mut TrailP,
        mut VsidsP,
        mut WatchlistsP,
        SolverConfigP,
    ),
    conflict: Conflict,
) {
    ctx.part_mut(StatsP).conflicts += 1;

    if ctx.part(TrailP).current_level() == 0 {
        debug!("conflict at level 0");
        ctx.part_mut(SolverStateP).sat_state = SatState::Unsat;
        return;
    }

    let backjump_to = analyze_conflict(ctx.borrow(), conflict);

    let (analyze, mut ctx) = ctx.split_part(AnalyzeConflictP);

    let clause = analyze.clause();

    trace!("learned {:?}, backjump to {}", clause, backjump_to);

    let cref = db::add_clause(ctx.borrow(), clause, true);
    ctx.part_mut(StatsP).learned_clauses += 1;

    let config = ctx.part(SolverConfigP);
    let decay_interval = config.vsids_decay_interval;
    let restart_scale = config.luby_restart_interval_scale;

    if ctx.part(ClauseDbP).learned_count() as u64 % decay_interval == 0 {
        ctx.part_mut(VsidsP).decay();
    }

    let target_level = if ctx.part_mut(ScheduleP).record_conflict(restart_scale) {
        ctx.part_mut(StatsP).restarts += 1;
        0
    } else {
        backjump_to
    };

    backtrack(ctx.borrow(), target_level);

    // A learned unit stays asserting after a restart to level 0, so it is assigned right away
    // instead of waiting for the next conflict.
    if target_level == backjump_to {
        enqueue_assignment(ctx.borrow(), clause[0], Reason::Clause(cref));
        ctx.part_mut(StatsP).propagations += 1;
    }
}
