//! cdclsat is a [CDCL][cdcl] based SAT solver. Given a boolean formula in [conjunctive normal
//! form][cnf], it either finds a variable assignment that makes the formula true or determines
//! that no such assignment exists.
//!
//! The search combines two-watched-literal unit propagation, the VSIDS branching heuristic with
//! phase saving, first-UIP conflict analysis with non-chronological backjumping and Luby sequence
//! restarts. Before the search starts, variables occurring with only one polarity are assigned.
//!
//! [cdcl]: https://en.wikipedia.org/wiki/Conflict-Driven_Clause_Learning
//! [cnf]: https://en.wikipedia.org/wiki/Conjunctive_normal_form

pub mod config;
pub mod solver;
pub mod stats;

mod analyze_conflict;
mod cdcl;
mod clause;
mod context;
mod decision;
mod load;
mod prop;
mod pure;
mod schedule;
mod state;

#[cfg(test)]
mod test;

pub use cdclsat_formula::{cnf, lit, CnfFormula, Lit, Var};

pub mod dimacs {
    //! DIMACS CNF parser and writer.
    pub use cdclsat_dimacs::*;
}
