use std::collections::HashSet;

use cdclsat::config::SolverConfigUpdate;
use cdclsat::lit::Lit;
use cdclsat::solver::Solver;

macro_rules! test_cnf {
    ($name:ident, $result:expr) => {
        #[test]
        fn $name() {
            let cnf = include_bytes!(concat!("cnfs/", stringify!($name), ".cnf"));
            let formula = cdclsat::dimacs::DimacsParser::parse(&cnf[..]).expect("parsing failed");

            for &pure_literals in [true, false].iter() {
                let mut solver = Solver::new();
                solver
                    .config(&SolverConfigUpdate {
                        pure_literals: Some(pure_literals),
                        random_seed: Some(0),
                        ..SolverConfigUpdate::new()
                    })
                    .expect("invalid config");
                solver.add_formula(&formula);
                let result = $result;
                assert_eq!(solver.solve().expect("solve failed"), result);
                if result {
                    let model: HashSet<Lit> = solver.model().unwrap().into_iter().collect();
                    for clause in formula.iter() {
                        assert!(clause.iter().any(|&lit| model.contains(&lit)));
                    }
                } else {
                    assert_eq!(solver.model(), None);
                }
            }
        }
    };
}

test_cnf!(unit_chain_unsat, false);
test_cnf!(php_5_4_unsat, false);
test_cnf!(sgen_13_unsat, false);
test_cnf!(coloring_5_3_sat, true);
test_cnf!(planted_3sat_60_sat, true);

#[test]
fn dimacs_stream() {
    let _ = env_logger::builder().is_test(true).try_init();

    let cnf = include_bytes!("cnfs/php_5_4_unsat.cnf");
    let mut solver = Solver::new();
    solver.add_dimacs_cnf(&cnf[..]).expect("parsing failed");
    assert_eq!(solver.solve().expect("solve failed"), false);

    let stats = solver.stats();
    assert!(stats.conflicts > 0);
    assert_eq!(stats.learned_clauses + 1, stats.conflicts);
}
