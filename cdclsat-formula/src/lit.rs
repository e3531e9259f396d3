//! Literals and variables.
use std::{fmt, ops};

/// The backing type used to represent variable indices.
pub type LitIdx = u32;

/// The backing type used to represent literals.
///
/// Literals are stored as signed integers, the sign encodes the polarity.
pub type LitNumber = i32;

/// A boolean variable, identified by its index.
///
/// Indices are 0-based. Input and output use the 1-based DIMACS numbering instead, where `-n`
/// denotes the negation of variable `n`.
///
/// Indices above `Var::max_var().index()` are not supported.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Var {
    index: LitIdx,
}

impl Var {
    /// The variable with the given positive 1-based DIMACS number.
    #[inline]
    pub fn from_dimacs(number: isize) -> Var {
        debug_assert!(number > 0);
        Var::from_index((number - 1) as usize)
    }

    /// The variable with the given 0-based index.
    #[inline]
    pub fn from_index(index: usize) -> Var {
        debug_assert!(index <= Var::max_var().index());
        Var {
            index: index as LitIdx,
        }
    }

    /// 1-based DIMACS number of the variable.
    #[inline]
    pub fn to_dimacs(self) -> isize {
        (self.index + 1) as isize
    }

    /// 0-based index of the variable.
    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Largest supported variable.
    ///
    /// Leaves headroom in [`LitNumber`] so that negated numbers and parser arithmetic never
    /// overflow.
    pub const fn max_var() -> Var {
        Var {
            index: (LitNumber::max_value() >> 4) as LitIdx,
        }
    }

    /// Largest supported variable count.
    pub const fn max_count() -> usize {
        Self::max_var().index() + 1
    }

    /// Literal of this variable, positive when `polarity` is true.
    #[inline]
    pub fn lit(self, polarity: bool) -> Lit {
        Lit::from_var(self, polarity)
    }

    /// The variable itself as a literal.
    #[inline]
    pub fn positive(self) -> Lit {
        Lit::positive(self)
    }

    /// The negation of the variable.
    #[inline]
    pub fn negative(self) -> Lit {
        Lit::negative(self)
    }
}

/// Prints the DIMACS number.
impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A variable or its negation.
///
/// Stored as the signed 1-based number of the variable, negative for a negated variable. This is
/// exactly the DIMACS encoding, zero is never a valid literal.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Lit {
    number: LitNumber,
}

impl Lit {
    /// Literal of `var`, positive when `polarity` is true.
    #[inline]
    pub fn from_var(var: Var, polarity: bool) -> Lit {
        let number = (var.index + 1) as LitNumber;
        Lit {
            number: if polarity { number } else { -number },
        }
    }

    /// Positive literal of `var`.
    #[inline]
    pub fn positive(var: Var) -> Lit {
        Lit::from_var(var, true)
    }

    /// Negative literal of `var`.
    #[inline]
    pub fn negative(var: Var) -> Lit {
        Lit::from_var(var, false)
    }

    /// Literal of the variable with the given 0-based index.
    #[inline]
    pub fn from_index(index: usize, polarity: bool) -> Lit {
        Lit::from_var(Var::from_index(index), polarity)
    }

    /// Literal with the given non-zero DIMACS number.
    #[inline]
    pub fn from_dimacs(number: isize) -> Lit {
        Lit::from_var(Var::from_dimacs(number.abs()), number > 0)
    }

    /// Signed DIMACS number of the literal.
    #[inline]
    pub fn to_dimacs(self) -> isize {
        self.number as isize
    }

    /// 0-based index of the variable.
    #[inline]
    pub fn index(self) -> usize {
        (self.number.abs() - 1) as usize
    }

    /// Variable of the literal.
    #[inline]
    pub fn var(self) -> Var {
        Var {
            index: (self.number.abs() - 1) as LitIdx,
        }
    }

    /// Whether this is a negated variable.
    #[inline]
    pub fn is_negative(self) -> bool {
        self.number < 0
    }

    /// Whether this is a non-negated variable.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.number > 0
    }
}

impl ops::Not for Lit {
    type Output = Lit;

    #[inline]
    fn not(self) -> Lit {
        Lit {
            number: -self.number,
        }
    }
}

/// Negates the literal when the right hand side is `true`.
impl ops::BitXor<bool> for Lit {
    type Output = Lit;

    #[inline]
    fn bitxor(self, rhs: bool) -> Lit {
        if rhs {
            !self
        } else {
            self
        }
    }
}

impl From<Var> for Lit {
    #[inline]
    fn from(var: Var) -> Lit {
        Lit::positive(var)
    }
}

/// Prints the DIMACS number.
impl fmt::Debug for Lit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Bijection between the literals over a fixed number of variables and a dense index range.
///
/// Positive literals occupy `0..var_count`, negative literals `var_count..2 * var_count`, both in
/// variable order. This is used to index per-literal tables like watchlists.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub struct LitCoding {
    var_count: usize,
}

impl LitCoding {
    /// Coding for literals over the given number of variables.
    pub fn new(var_count: usize) -> LitCoding {
        LitCoding { var_count }
    }

    /// Number of variables covered.
    pub fn var_count(&self) -> usize {
        self.var_count
    }

    /// Size of the encoded range, two times the variable count.
    pub fn len(&self) -> usize {
        self.var_count * 2
    }

    /// Whether no literal can be encoded.
    pub fn is_empty(&self) -> bool {
        self.var_count == 0
    }

    /// Position of a literal in the dense range.
    #[inline]
    pub fn code(&self, lit: Lit) -> usize {
        debug_assert!(lit.index() < self.var_count);
        if lit.is_positive() {
            lit.index()
        } else {
            self.var_count + lit.index()
        }
    }

    /// The literal at a position of the dense range, opposite of `code`.
    #[inline]
    pub fn lit(&self, code: usize) -> Lit {
        debug_assert!(code < self.len());
        if code < self.var_count {
            Lit::from_index(code, true)
        } else {
            Lit::from_index(code - self.var_count, false)
        }
    }
}

#[cfg(any(test, feature = "proptest-strategies"))]
#[doc(hidden)]
pub mod strategy {
    use super::*;
    use proptest::{prelude::*, *};

    pub fn var(index: impl Strategy<Value = usize>) -> impl Strategy<Value = Var> {
        index.prop_map(|index| Var::from_index(index))
    }

    pub fn lit(index: impl Strategy<Value = usize>) -> impl Strategy<Value = Lit> {
        (var(index), bool::ANY).prop_map(|(var, polarity)| var.lit(polarity))
    }
}
