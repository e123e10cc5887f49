//! Core algebraic traits.
//!
//! The central trait is [Ring], with two binary operations, addition and
//! multiplication. A ring has an associated element type that should not be
//! confused with the ring itself: the ring of integers [Z](integer::Z) has
//! elements of type [Integer](integer::Integer), a finite field
//! [Zp](finite_field::Zp) has elements in Montgomery form. Elements do not
//! implement the arithmetic operations themselves; the ring does, which keeps
//! element types small and lets the same polynomial code run over any
//! coefficient domain.
//!
//! [EuclideanDomain] adds remainders, quotients and gcds, and [Field] adds
//! division and inversion.

pub mod finite_field;
pub mod integer;

use std::fmt::{Debug, Display};
use std::hash::Hash;

use integer::Integer;

/// A set with addition and multiplication.
pub trait Ring: Clone + PartialEq + Eq + Hash + Debug {
    type Element: Clone + PartialEq + Eq + Hash + PartialOrd + Ord + Debug + Display;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element);
    /// Compute `a += b * c`.
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element);
    /// Compute `a -= b * c`.
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element);
    fn neg(&self, a: &Self::Element) -> Self::Element;
    fn zero(&self) -> Self::Element;
    fn one(&self) -> Self::Element;
    /// The element `n * 1`.
    fn nth(&self, n: u64) -> Self::Element;
    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element;
    fn is_zero(a: &Self::Element) -> bool;
    fn is_one(&self, a: &Self::Element) -> bool;
    /// `true` iff `gcd(1, x)` is `1` for every `x`, so content computations
    /// can stop early at a unit.
    fn one_is_gcd_unit() -> bool;
    fn characteristic(&self) -> Integer;
}

/// A ring with division with remainder and gcds.
pub trait EuclideanDomain: Ring {
    fn rem(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element);
    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
}

/// A ring where every nonzero element has an inverse.
pub trait Field: EuclideanDomain {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn inv(&self, a: &Self::Element) -> Self::Element;
}
