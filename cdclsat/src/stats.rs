//! Search statistics.
use std::fmt;

/// Counters updated during the search.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub struct SolverStats {
    /// Number of branching decisions.
    pub decisions: u64,
    /// Number of assignments forced by a clause.
    ///
    /// This includes unit clauses of the input and asserted learned literals.
    pub propagations: u64,
    /// Number of conflicting clauses found, including a final conflict at level 0.
    pub conflicts: u64,
    /// Number of clauses learned from conflicts.
    pub learned_clauses: u64,
    /// Number of restarts.
    pub restarts: u64,
}

impl fmt::Display for SolverStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "decisions: {}", self.decisions)?;
        writeln!(f, "propagations: {}", self.propagations)?;
        writeln!(f, "conflicts: {}", self.conflicts)?;
        writeln!(f, "learned clauses: {}", self.learned_clauses)?;
        write!(f, "restarts: {}", self.restarts)
    }
}
