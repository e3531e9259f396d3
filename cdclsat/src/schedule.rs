//! Restart scheduling.
use log::debug;

mod luby;

use luby::LubySequence;

/// Decides when to restart the search.
///
/// A restart happens after a number of conflicts given by the current term of the Luby sequence
/// times a configurable scale. Each restart advances to the next term.
pub struct Schedule {
    conflicts_since_restart: u64,
    luby_term: u64,
    luby: LubySequence,
}

impl Default for Schedule {
    fn default() -> Schedule {
        let mut luby = LubySequence::default();
        Schedule {
            conflicts_since_restart: 0,
            luby_term: luby.advance(),
            luby,
        }
    }
}

impl Schedule {
    /// Count a conflict, returns whether the search should restart.
    pub fn record_conflict(&mut self, scale: u64) -> bool {
        self.conflicts_since_restart += 1;
        if self.conflicts_since_restart >= self.luby_term * scale {
            debug!(
                "restart after {} conflicts",
                self.conflicts_since_restart
            );
            self.conflicts_since_restart = 0;
            self.luby_term = self.luby.advance();
            true
        } else {
            false
        }
    }
}
