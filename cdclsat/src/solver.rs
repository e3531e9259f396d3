//! Boolean satisfiability solver.
use std::io;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use partial_ref::{IntoPartialRef, IntoPartialRefMut, PartialRef};

use anyhow::Error;
use log::info;
use thiserror::Error;

use cdclsat_dimacs::DimacsParser;
use cdclsat_formula::{CnfFormula, Lit, Var};

use crate::cdcl::{conflict_step, start_search};
use crate::config::{ConfigError, SolverConfigUpdate};
use crate::context::{
    ensure_var_count, AssignmentP, Context, PhaseP, SolverConfigP, SolverStateP, StatsP, VsidsP,
};
use crate::load::load_clause;
use crate::state::SatState;
use crate::stats::SolverStats;

/// Possible errors while solving a formula.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SolverError {
    #[error("The solver was interrupted")]
    Interrupted,
}

/// A boolean satisfiability solver.
#[derive(Default)]
pub struct Solver {
    ctx: Box<Context>,
}

impl Solver {
    /// Create a new solver.
    pub fn new() -> Solver {
        Solver::default()
    }

    /// Change the solver configuration.
    ///
    /// Nothing is changed when the update contains an invalid value.
    pub fn config(&mut self, update: &SolverConfigUpdate) -> Result<(), ConfigError> {
        let mut ctx = self.ctx.into_partial_ref_mut();
        update.apply(ctx.part_mut(SolverConfigP))?;

        let config = ctx.part(SolverConfigP).clone();
        ctx.part_mut(VsidsP).set_decay(config.vsids_decay);
        if let Some(seed) = config.random_seed {
            ctx.part_mut(PhaseP).reseed(seed);
        }
        Ok(())
    }

    /// Add a formula to the solver.
    ///
    /// Clauses added after the first call to [`solve`](Solver::solve) are ignored.
    pub fn add_formula(&mut self, formula: &CnfFormula) {
        let mut ctx = self.ctx.into_partial_ref_mut();
        ensure_var_count(ctx.borrow(), formula.var_count());
        for clause in formula.iter() {
            load_clause(ctx.borrow(), clause);
        }
    }

    /// Reads and adds a formula in DIMACS CNF format.
    ///
    /// Using this avoids creating a temporary [`CnfFormula`].
    pub fn add_dimacs_cnf(&mut self, input: impl io::Read) -> Result<(), Error> {
        let parser = DimacsParser::parse_incremental(input, |parser| {
            self.add_formula(&parser.take_formula());
            Ok(())
        })?;

        info!(
            "Parsed formula with {} variables and {} clauses",
            parser.var_count(),
            parser.clause_count()
        );

        Ok(())
    }

    /// Check the satisfiability of the current formula.
    ///
    /// Returns `Ok(true)` if a satisfying assignment was found and `Ok(false)` if the formula is
    /// unsatisfiable. Calling this again returns the same result without searching.
    ///
    /// The flag returned by [`interrupt_flag`](Solver::interrupt_flag) is checked once per
    /// conflict. When it is set the search stops with [`SolverError::Interrupted`]. The search can
    /// be continued by clearing the flag and calling this again.
    pub fn solve(&mut self) -> Result<bool, SolverError> {
        let mut ctx = self.ctx.into_partial_ref_mut();

        start_search(ctx.borrow());

        let interrupt = ctx.part(SolverStateP).interrupt.clone();

        loop {
            match ctx.part(SolverStateP).sat_state {
                SatState::Sat => return Ok(true),
                SatState::Unsat => return Ok(false),
                SatState::Unknown => (),
            }

            if interrupt.load(Ordering::Relaxed) {
                info!("Search interrupted");
                return Err(SolverError::Interrupted);
            }

            conflict_step(ctx.borrow());
        }
    }

    /// Set of literals that satisfy the formula.
    ///
    /// Contains one literal per variable. Only available after `solve` returned `Ok(true)`.
    pub fn model(&self) -> Option<Vec<Lit>> {
        let ctx = self.ctx.into_partial_ref();
        if ctx.part(SolverStateP).sat_state == SatState::Sat {
            Some(
                ctx.part(AssignmentP)
                    .assignment()
                    .iter()
                    .enumerate()
                    .flat_map(|(index, assignment)| {
                        assignment.map(|polarity| Var::from_index(index).lit(polarity))
                    })
                    .collect(),
            )
        } else {
            None
        }
    }

    /// Counters collected during the search.
    pub fn stats(&self) -> SolverStats {
        let ctx = self.ctx.into_partial_ref();
        *ctx.part(StatsP)
    }

    /// Flag to stop a running search from another thread.
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        let ctx = self.ctx.into_partial_ref();
        ctx.part(SolverStateP).interrupt.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    use cdclsat_dimacs::write_dimacs;
    use cdclsat_formula::{
        cnf_formula, lit, lits,
        test::{pigeon_hole, sat_formula, sgen_unsat_formula},
    };

    use crate::test::brute_force_sat;

    #[test]
    fn unit_chain_unsat() {
        let mut solver = Solver::new();
        solver.add_formula(&cnf_formula![
            1;
            -1, 2;
            -2;
        ]);

        assert_eq!(solver.solve(), Ok(false));
        assert_eq!(solver.model(), None);

        let stats = solver.stats();
        assert_eq!(stats.decisions, 0);
        assert_eq!(stats.propagations, 2);
        assert_eq!(stats.conflicts, 1);
    }

    #[test]
    fn single_clause_sat() {
        let mut solver = Solver::new();
        solver.add_formula(&cnf_formula![1, 2;]);

        assert_eq!(solver.solve(), Ok(true));

        let model = solver.model().unwrap();
        assert!(model.contains(&lit!(1)) || model.contains(&lit!(2)));
        assert_eq!(solver.stats().decisions, 0);
    }

    #[test]
    fn empty_formula_sat() {
        let mut solver = Solver::new();
        assert_eq!(solver.solve(), Ok(true));
        assert_eq!(solver.model(), Some(vec![]));
    }

    #[test]
    fn unused_vars_get_a_value() {
        let mut solver = Solver::new();
        let mut formula = cnf_formula![-2;];
        formula.set_var_count(3);
        solver.add_formula(&formula);

        assert_eq!(solver.solve(), Ok(true));
        let model = solver.model().unwrap();
        assert_eq!(model.len(), 3);
        assert!(model.contains(&lit!(-2)));
    }

    #[test]
    fn pigeon_hole_learns() {
        let mut solver = Solver::new();
        solver.add_formula(&pigeon_hole(3, 2));

        assert_eq!(solver.solve(), Ok(false));
        assert!(solver.stats().learned_clauses >= 1);
        assert!(solver.stats().restarts >= 1);
    }

    #[test]
    fn solve_is_idempotent() {
        let mut solver = Solver::new();
        solver.add_formula(&pigeon_hole(4, 3));

        assert_eq!(solver.solve(), Ok(false));
        let stats = solver.stats();

        assert_eq!(solver.solve(), Ok(false));
        assert_eq!(solver.stats(), stats);
    }

    #[test]
    fn clauses_after_solve_are_ignored() {
        let mut solver = Solver::new();
        solver.add_formula(&cnf_formula![1, 2;]);
        assert_eq!(solver.solve(), Ok(true));

        solver.add_formula(&cnf_formula![-1; -2;]);
        assert_eq!(solver.solve(), Ok(true));
    }

    #[test]
    fn interrupted() {
        let mut solver = Solver::new();
        solver.add_formula(&pigeon_hole(5, 4));

        let flag = solver.interrupt_flag();
        flag.store(true, Ordering::Relaxed);

        assert_eq!(solver.solve(), Err(SolverError::Interrupted));
        assert_eq!(solver.model(), None);

        flag.store(false, Ordering::Relaxed);
        assert_eq!(solver.solve(), Ok(false));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut solver = Solver::new();

        let update = SolverConfigUpdate {
            vsids_decay: Some(1.5),
            ..SolverConfigUpdate::new()
        };
        assert!(solver.config(&update).is_err());

        let update = SolverConfigUpdate {
            vsids_decay: Some(0.8),
            random_seed: Some(5),
            pure_literals: Some(false),
            ..SolverConfigUpdate::new()
        };
        solver.config(&update).unwrap();

        solver.add_formula(&cnf_formula![1, 2;]);
        assert_eq!(solver.solve(), Ok(true));
        assert!(solver.stats().decisions >= 1);
    }

    #[test]
    fn seeded_runs_repeat() {
        let formula = pigeon_hole(5, 4);
        let mut runs = vec![];

        for _ in 0..2 {
            let mut solver = Solver::new();
            solver
                .config(&SolverConfigUpdate {
                    random_seed: Some(11),
                    ..SolverConfigUpdate::new()
                })
                .unwrap();
            solver.add_formula(&formula);
            assert_eq!(solver.solve(), Ok(false));
            runs.push(solver.stats());
        }

        assert_eq!(runs[0], runs[1]);
    }

    #[test]
    fn dimacs_input() {
        let mut solver = Solver::new();
        solver
            .add_dimacs_cnf(&b"c example\np cnf 3 2\n1 -2 0\n2 3 0\n"[..])
            .unwrap();
        assert_eq!(solver.solve(), Ok(true));

        let model = solver.model().unwrap();
        for clause in [&lits![1, -2][..], &lits![2, 3][..]].iter() {
            assert!(clause.iter().any(|lit| model.contains(lit)));
        }
    }

    #[test]
    fn dimacs_errors_are_reported() {
        let mut solver = Solver::new();
        assert!(solver.add_dimacs_cnf(&b"p cnf 1 1\n1 x 0\n"[..]).is_err());
    }

    proptest! {
        #[test]
        fn sgen_unsat(formula in sgen_unsat_formula(1..7usize)) {
            let mut solver = Solver::new();

            solver.add_formula(&formula);

            prop_assert_eq!(solver.solve(), Ok(false));
        }

        #[test]
        fn sat(formula in sat_formula(4..20usize, 10..100usize, 0.05..0.2, 0.9..1.0)) {
            let mut solver = Solver::new();

            solver.add_formula(&formula);

            prop_assert_eq!(solver.solve(), Ok(true));

            let model = solver.model().unwrap();

            for clause in formula.iter() {
                prop_assert!(clause.iter().any(|lit| model.contains(lit)));
            }
        }

        #[test]
        fn sat_via_dimacs(formula in sat_formula(4..20usize, 10..100usize, 0.05..0.2, 0.9..1.0)) {
            let mut solver = Solver::new();

            let mut dimacs = vec![];

            write_dimacs(&mut dimacs, &formula).unwrap();

            solver.add_dimacs_cnf(&mut &dimacs[..]).unwrap();

            prop_assert_eq!(solver.solve(), Ok(true));

            let model = solver.model().unwrap();

            for clause in formula.iter() {
                prop_assert!(clause.iter().any(|lit| model.contains(lit)));
            }
        }

        #[test]
        fn random_small_formulas(
            formula in cdclsat_formula::cnf::strategy::cnf_formula(1..12usize, 0..50, 1..4),
            seed in any::<u64>(),
        ) {
            let mut solver = Solver::new();
            solver.config(&SolverConfigUpdate {
                random_seed: Some(seed),
                ..SolverConfigUpdate::new()
            }).unwrap();

            solver.add_formula(&formula);

            let result = solver.solve();
            prop_assert_eq!(result, Ok(brute_force_sat(&formula)));

            if let Some(model) = solver.model() {
                prop_assert_eq!(model.len(), formula.var_count());
                for clause in formula.iter() {
                    prop_assert!(clause.iter().any(|lit| model.contains(lit)));
                }
            }
        }
    }
}
