//! The VSIDS branching heuristic.
//!
//! The VSIDS (Variable State Independent Decaying Sum) branching heuristic keeps an activity value
//! for each variable. The variables of each learned clause are bumped, which means that their
//! activity is increased by the current bump value. Periodically all activities are decayed by
//! multiplying them with a constant below 1.
//!
//! When a decision is made, it branches on the variable with the highest activity among the
//! unassigned variables. The activities start out as the number of occurrences of each variable in
//! the input formula.

use ordered_float::OrderedFloat;

use cdclsat_formula::Var;

use crate::config::SolverConfig;

/// Rescale activities if any value exceeds this value.
const RESCALE_LIMIT: f64 = 1e100;

/// The VSIDS branching heuristic.
///
/// As an optimization instead of decaying all activities, the bump value is divided by the decay
/// factor. When this would cause a value to overflow all activities and the bump value are scaled
/// down. Apart from a scaling factor that is the same for all involved values, this is equivalent
/// to the naive implementation. As we only care about the order of activities we can ignore the
/// scaling factor.
///
/// Selection is a linear scan over all variables, ties go to the variable with the lowest index.
pub struct Vsids {
    /// The activity of each variable.
    activity: Vec<OrderedFloat<f64>>,
    /// The value to add on bumping.
    bump: f64,
    /// The inverse of the decay factor.
    inv_decay: f64,
}

impl Default for Vsids {
    fn default() -> Vsids {
        Vsids {
            activity: vec![],
            bump: 1.0,
            inv_decay: 1.0 / SolverConfig::default().vsids_decay,
        }
    }
}

impl Vsids {
    /// Update structures for a new variable count.
    pub fn set_var_count(&mut self, count: usize) {
        self.activity.resize(count, OrderedFloat(0.0));
    }

    /// Change the decay factor.
    pub fn set_decay(&mut self, decay: f64) {
        debug_assert!(decay > 0.0 && decay < 1.0);
        self.inv_decay = 1.0 / decay;
    }

    /// Current activity of a variable.
    pub fn activity(&self, var: Var) -> f64 {
        self.activity[var.index()].0
    }

    /// Bump a variable by increasing its activity.
    pub fn bump(&mut self, var: Var) {
        let value = &mut self.activity[var.index()];
        value.0 += self.bump;
        if value.0 > RESCALE_LIMIT {
            self.rescale();
        }
    }

    /// Decay all variable activities.
    pub fn decay(&mut self) {
        self.bump *= self.inv_decay;
        if self.bump > RESCALE_LIMIT {
            self.rescale();
        }
    }

    /// Rescale all values to avoid an overflow.
    fn rescale(&mut self) {
        let rescale_factor = 1.0 / RESCALE_LIMIT;
        for activity in &mut self.activity {
            activity.0 *= rescale_factor;
        }
        self.bump *= rescale_factor;
    }

    /// The unassigned variable with the highest activity.
    ///
    /// Returns `None` when all variables are assigned.
    pub fn select(&self, assignment: &[Option<bool>]) -> Option<Var> {
        let mut best: Option<(usize, OrderedFloat<f64>)> = None;
        for (index, (&activity, value)) in self.activity.iter().zip(assignment).enumerate() {
            if value.is_some() {
                continue;
            }
            match best {
                Some((_, best_activity)) if best_activity >= activity => (),
                _ => best = Some((index, activity)),
            }
        }
        best.map(|(index, _)| Var::from_index(index))
    }
}
