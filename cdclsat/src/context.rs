//! Central solver data structure.
use partial_ref::{part, partial, PartialRef, PartialRefTarget};

use crate::analyze_conflict::AnalyzeConflict;
use crate::clause::ClauseDb;
use crate::config::SolverConfig;
use crate::decision::{phase::Phase, vsids::Vsids};
use crate::prop::{Assignment, ImplGraph, Trail, Watchlists};
use crate::schedule::Schedule;
use crate::state::SolverState;
use crate::stats::SolverStats;

/// Part declarations for the [`Context`] struct.
pub mod parts {
    use super::*;

    part!(pub AnalyzeConflictP: AnalyzeConflict);
    part!(pub AssignmentP: Assignment);
    part!(pub ClauseDbP: ClauseDb);
    part!(pub ImplGraphP: ImplGraph);
    part!(pub PhaseP: Phase);
    part!(pub ScheduleP: Schedule);
    part!(pub SolverConfigP: SolverConfig);
    part!(pub SolverStateP: SolverState);
    part!(pub StatsP: SolverStats);
    part!(pub TrailP: Trail);
    part!(pub VsidsP: Vsids);
    part!(pub WatchlistsP: Watchlists);
}

pub use parts::*;

/// Central solver data structure.
///
/// This struct contains all data kept by the solver. Functions operating on multiple fields of the
/// context take partial references provided by the `partial_ref` crate. The partial reference type
/// documents which parts a function reads and which it modifies.
#[derive(PartialRefTarget, Default)]
pub struct Context {
    #[part(AnalyzeConflictP)]
    analyze_conflict: AnalyzeConflict,
    #[part(AssignmentP)]
    assignment: Assignment,
    #[part(ClauseDbP)]
    clause_db: ClauseDb,
    #[part(ImplGraphP)]
    impl_graph: ImplGraph,
    #[part(PhaseP)]
    phase: Phase,
    #[part(ScheduleP)]
    schedule: Schedule,
    #[part(SolverConfigP)]
    solver_config: SolverConfig,
    #[part(SolverStateP)]
    solver_state: SolverState,
    #[part(StatsP)]
    stats: SolverStats,
    #[part(TrailP)]
    trail: Trail,
    #[part(VsidsP)]
    vsids: Vsids,
    #[part(WatchlistsP)]
    watchlists: Watchlists,
}

/// Update structures for a new variable count.
pub fn set_var_count(
    mut ctx: partial!(
        Context,
        mut AnalyzeConflictP,
        mut AssignmentP,
        mut ClauseDbP,
        mut ImplGraphP,
        mut VsidsP,
        mut WatchlistsP,
    ),
    count: usize,
) {
    ctx.part_mut(AnalyzeConflictP).set_var_count(count);
    ctx.part_mut(AssignmentP).set_var_count(count);
    ctx.part_mut(ClauseDbP).set_var_count(count);
    ctx.part_mut(ImplGraphP).set_var_count(count);
    ctx.part_mut(VsidsP).set_var_count(count);
    ctx.part_mut(WatchlistsP).set_var_count(count);
}

/// Increases the variable count to at least the given value.
pub fn ensure_var_count(
    mut ctx: partial!(
        Context,
        mut AnalyzeConflictP,
        mut AssignmentP,
        mut ClauseDbP,
        mut ImplGraphP,
        mut VsidsP,
        mut WatchlistsP,
    ),
    count: usize,
) {
    if count > ctx.part(AssignmentP).assignment().len() {
        set_var_count(ctx.borrow(), count)
    }
}
