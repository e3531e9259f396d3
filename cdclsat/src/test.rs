//! Helpers for unit tests.
use partial_ref::{partial, PartialRef};

use cdclsat_formula::{CnfFormula, Lit, Var};

use crate::context::{AssignmentP, ClauseDbP, Context, ImplGraphP, TrailP, WatchlistsP};
use crate::prop::Reason;

/// Whether a formula is satisfiable, by enumerating all assignments.
///
/// Only usable for formulas with few variables.
pub fn brute_force_sat(formula: &CnfFormula) -> bool {
    let var_count = formula.var_count();
    assert!(var_count <= 20);

    (0..1u64 << var_count).any(|bits| {
        formula.iter().all(|clause| {
            clause
                .iter()
                .any(|&lit| ((bits >> lit.index()) & 1 == 1) == lit.is_positive())
        })
    })
}

/// Whether every assignment satisfying the formula also satisfies the clause.
pub fn brute_force_implied(formula: &CnfFormula, clause: &[Lit]) -> bool {
    let mut with_negation = formula.clone();
    for &lit in clause {
        with_negation.add_clause(&[!lit]);
    }
    !brute_force_sat(&with_negation)
}

/// Assert that the watchlists are consistent with the clause database and the assignment.
///
/// Must be called when no assignment is waiting for propagation.
pub fn check_watch_invariant(ctx: partial!(Context, AssignmentP, ClauseDbP, WatchlistsP)) {
    let db = ctx.part(ClauseDbP);
    let assignment = ctx.part(AssignmentP);
    let watchlists = ctx.part(WatchlistsP);

    for cref in db.clause_refs() {
        let lits = db.clause(cref).lits();
        let watched = &lits[..lits.len().min(2)];

        for &lit in watched {
            assert!(
                watchlists
                    .watchers_of(lit)
                    .iter()
                    .any(|watch| watch.cref == cref),
                "{:?} not watched by {:?}",
                lits,
                lit
            );
        }

        let satisfied = lits.iter().any(|&lit| assignment.lit_is_true(lit));
        let watch_ok = watched.iter().any(|&lit| !assignment.lit_is_false(lit));

        assert!(
            satisfied || watch_ok,
            "both watches of {:?} are false in an unsatisfied clause",
            lits
        );

        if !satisfied && lits.len() >= 2 {
            // An unsatisfied clause with a false watch would have propagated the other one.
            assert!(
                watched.iter().all(|&lit| !assignment.lit_is_false(lit)),
                "unit clause {:?} not propagated",
                lits
            );
        }
    }
}

/// Assert that the trail is consistent with the assignment and the implication graph.
///
/// Decision levels along the trail never decrease. A literal propagated by a clause is at
/// position 0 of that clause, and all other literals of the clause are false and assigned earlier
/// on the trail.
pub fn check_trail(ctx: partial!(Context, AssignmentP, ClauseDbP, ImplGraphP, TrailP)) {
    let assignment = ctx.part(AssignmentP);
    let db = ctx.part(ClauseDbP);
    let graph = ctx.part(ImplGraphP);
    let trail = ctx.part(TrailP).trail();

    let mut position = vec![None; assignment.assignment().len()];

    let mut level = 0;
    for (index, &lit) in trail.iter().enumerate() {
        assert!(assignment.lit_is_true(lit));
        let lit_level = graph.level(lit.var());
        assert!(lit_level >= level, "trail levels decrease at {:?}", lit);
        level = lit_level;

        if let Reason::Clause(cref) = *graph.reason(lit.var()) {
            let lits = db.clause(cref).lits();
            assert_eq!(lits[0], lit, "{:?} propagated by {:?}", lit, lits);
            for &cause in &lits[1..] {
                assert!(assignment.lit_is_false(cause), "{:?} in {:?}", cause, lits);
                assert!(
                    position[cause.index()].is_some(),
                    "{:?} propagated by {:?} before {:?} was assigned",
                    lit,
                    lits,
                    cause
                );
            }
        }

        position[lit.index()] = Some(index);
    }
    assert!(level <= ctx.part(TrailP).current_level());

    let assigned = assignment
        .assignment()
        .iter()
        .filter(|value| value.is_some())
        .count();
    assert_eq!(assigned, trail.len());
}

/// Variable with the given 1-based number, for use with the assignment.
pub fn value_of(ctx: partial!(Context, AssignmentP), number: isize) -> Option<bool> {
    ctx.part(AssignmentP).var_value(Var::from_dimacs(number))
}
