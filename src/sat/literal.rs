#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Variables and literals.
//!
//! Variables are dense, zero based identifiers. A literal packs a variable and a
//! polarity into a single integer: `2 * var + 1` for the positive literal and
//! `2 * var` for the negative one. Negation therefore flips the lowest bit and the
//! variable is recovered by halving the identifier. Clause ordering, hashing and the
//! watch lists all rely on this exact layout.

use core::ops::{Neg, Not};
use std::fmt;

/// Number of variables whose literals fit the 32-bit encoding.
pub const MAX_VARIABLES: usize = 1 << 31;

/// A Boolean variable, identified by its zero based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Variable(u32);

impl Variable {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The underlying variable number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The variable number as an index into per-variable arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for Variable {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// A variable together with a polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Literal(u32);

impl Literal {
    /// Wraps a raw literal identifier. Odd identifiers are positive, even ones negative.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Builds the literal of `var` with the given polarity.
    #[must_use]
    pub const fn from_var(var: Variable, positive: bool) -> Self {
        Self(var.0 * 2 + positive as u32)
    }

    /// The underlying literal identifier.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The literal identifier as an index into per-literal arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn variable(self) -> Variable {
        Variable(self.0 / 2)
    }

    #[must_use]
    pub const fn negate(self) -> Self {
        Self(self.0 ^ 1)
    }

    /// `+1` for a positive literal, `-1` for a negative one.
    #[must_use]
    pub const fn sign(self) -> i8 {
        if self.is_positive() { 1 } else { -1 }
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 & 1 == 1
    }

    /// Converts a signed, 1-based DIMACS literal.
    ///
    /// Returns `None` for `0`, which DIMACS reserves as the clause terminator.
    #[must_use]
    pub const fn from_dimacs(value: i32) -> Option<Self> {
        if value == 0 {
            return None;
        }
        let var = Variable(value.unsigned_abs() - 1);
        Some(Self::from_var(var, value > 0))
    }

    /// The signed, 1-based DIMACS form: `sign * (var + 1)`.
    ///
    /// # Panics
    ///
    /// If the variable number does not fit into an `i32`.
    #[must_use]
    pub fn to_dimacs(self) -> i32 {
        let magnitude = i32::try_from(self.variable().get() + 1)
            .unwrap_or_else(|_| panic!("variable {} has no DIMACS representation", self.variable()));
        i32::from(self.sign()) * magnitude
    }
}

/// The positive literal of `x`.
#[must_use]
pub const fn pos(x: Variable) -> Literal {
    Literal::from_var(x, true)
}

/// The negative literal of `x`.
#[must_use]
pub const fn neg(x: Variable) -> Literal {
    Literal::from_var(x, false)
}

/// The variable of `l`.
#[must_use]
pub const fn var(l: Literal) -> Variable {
    l.variable()
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl Neg for &Literal {
    type Output = Literal;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Not for &Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl From<u32> for Literal {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_positive() {
            write!(f, "{}", self.variable())
        } else {
            write!(f, "¬{}", self.variable())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_ctors() {
        let x = Variable::new(3);
        let l = Literal::new(7);
        assert_eq!(l.get(), 7);
        assert_eq!(x.get(), 3);
        assert_eq!(x, Variable::from(3));
    }

    #[test]
    fn test_literal_sign_and_negation() {
        let l = Literal::new(4);
        assert_eq!(l.sign(), -1);
        assert_eq!(l.negate(), Literal::new(5));
        assert_eq!(l.negate().sign(), 1);
        assert_eq!(!l, -l);
    }

    #[test]
    fn test_conversion_var_lit() {
        let x = Variable::new(2);
        assert_eq!(pos(x), Literal::new(5));
        assert_eq!(neg(x), Literal::new(4));
        assert_eq!(var(pos(x)), x);
        assert_eq!(var(neg(x)), x);
        assert_eq!(var(Literal::new(7)), Variable::new(3));
    }

    #[test]
    fn test_encoding_properties() {
        for v in 0..64 {
            let x = Variable::new(v);
            assert_eq!(var(pos(x)), x);
            assert_eq!(var(neg(x)), x);
            assert_eq!(pos(x).sign(), 1);
            assert_eq!(neg(x).sign(), -1);
            assert_eq!(pos(x).negate().negate(), pos(x));
            assert_eq!(pos(x).negate(), neg(x));
        }
    }

    #[test]
    fn test_dimacs_conversion() {
        assert_eq!(Literal::from_dimacs(1), Some(pos(Variable::new(0))));
        assert_eq!(Literal::from_dimacs(-3), Some(neg(Variable::new(2))));
        assert_eq!(Literal::from_dimacs(0), None);
        assert_eq!(pos(Variable::new(4)).to_dimacs(), 5);
        assert_eq!(neg(Variable::new(0)).to_dimacs(), -1);
    }

    #[test]
    fn test_display() {
        assert_eq!(pos(Variable::new(3)).to_string(), "x3");
        assert_eq!(neg(Variable::new(3)).to_string(), "¬x3");
    }
}
