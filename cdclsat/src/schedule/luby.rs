//! The reluctant doubling Luby sequence.
//!
//! This sequence is [A182105](https://oeis.org/A182105): 1, 1, 2, 1, 1, 2, 4, 1, 1, 2, ...

/// Infinite iterator yielding the Luby sequence.
///
/// Uses the `(u, v)` pair method by Knuth, which computes each term in constant time.
pub struct LubySequence {
    u: u64,
    v: u64,
}

impl Default for LubySequence {
    fn default() -> LubySequence {
        LubySequence { u: 1, v: 1 }
    }
}

impl LubySequence {
    /// Yields the next number of the Luby sequence.
    pub fn advance(&mut self) -> u64 {
        let term = self.v;

        // u & -u is the lowest set bit of u
        if self.u & self.u.wrapping_neg() == self.v {
            self.u += 1;
            self.v = 1;
        } else {
            self.v *= 2;
        }

        term
    }
}

impl Iterator for LubySequence {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        Some(self.advance())
    }
}
