//! The ring of integers with arbitrary-precision fallback.

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use rug::ops::Pow as RugPow;
use rug::Integer as MultiPrecisionInteger;

use crate::utils;

use super::finite_field::Zp;
use super::{EuclideanDomain, Ring};

pub const SMALL_PRIMES: [i64; 100] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293, 307,
    311, 313, 317, 331, 337, 347, 349, 353, 359, 367, 373, 379, 383, 389, 397, 401, 409, 419, 421,
    431, 433, 439, 443, 449, 457, 461, 463, 467, 479, 487, 491, 499, 503, 509, 521, 523, 541,
];

/// The ring of integers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct IntegerRing;

/// The ring of integers.
pub const Z: IntegerRing = IntegerRing::new();

impl IntegerRing {
    pub const fn new() -> IntegerRing {
        IntegerRing
    }
}

/// A signed integer, stored inline when it fits a machine word.
///
/// Values in `i64` range are always in the [Natural](Integer::Natural)
/// variant: every operation that could leave a small value in a
/// [Large](Integer::Large) demotes it, so derived equality and hashing
/// coincide with numerical equality.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Integer {
    Natural(i64),
    Large(MultiPrecisionInteger),
}

impl Default for Integer {
    fn default() -> Self {
        Integer::zero()
    }
}

impl Integer {
    pub const fn new(num: i64) -> Integer {
        Integer::Natural(num)
    }

    pub const fn zero() -> Integer {
        Integer::Natural(0)
    }

    pub const fn one() -> Integer {
        Integer::Natural(1)
    }

    /// Wrap a multi-precision integer, demoting it if it fits a machine word.
    pub fn from_large(n: MultiPrecisionInteger) -> Integer {
        if let Some(n) = n.to_i64() {
            Integer::Natural(n)
        } else {
            Integer::Large(n)
        }
    }

    pub fn to_multi_prec(self) -> MultiPrecisionInteger {
        match self {
            Integer::Natural(n) => n.into(),
            Integer::Large(r) => r,
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        match self {
            Integer::Natural(n) => *n == 0,
            Integer::Large(_) => false,
        }
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        match self {
            Integer::Natural(n) => *n == 1,
            Integer::Large(_) => false,
        }
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        match self {
            Integer::Natural(n) => *n < 0,
            Integer::Large(r) => r.cmp0() == Ordering::Less,
        }
    }

    #[inline]
    pub fn is_odd(&self) -> bool {
        match self {
            Integer::Natural(n) => n & 1 == 1,
            Integer::Large(r) => r.is_odd(),
        }
    }

    pub fn abs(&self) -> Integer {
        match self {
            Integer::Natural(n) => {
                if let Some(n) = n.checked_abs() {
                    Integer::Natural(n)
                } else {
                    Integer::Large(MultiPrecisionInteger::from(*n).abs())
                }
            }
            Integer::Large(r) => Integer::Large(r.clone().abs()),
        }
    }

    /// Compare the absolute values of `self` and `other`.
    pub fn abs_cmp(&self, other: &Integer) -> Ordering {
        match (self, other) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                n1.unsigned_abs().cmp(&n2.unsigned_abs())
            }
            (Integer::Natural(n1), Integer::Large(r2)) => {
                MultiPrecisionInteger::from(*n1).cmp_abs(r2)
            }
            (Integer::Large(r1), Integer::Natural(n2)) => {
                r1.cmp_abs(&MultiPrecisionInteger::from(*n2))
            }
            (Integer::Large(r1), Integer::Large(r2)) => r1.cmp_abs(r2),
        }
    }

    pub fn pow(&self, e: u64) -> Integer {
        if e > u32::MAX as u64 {
            panic!("Power of exponentiation is larger than 2^32: {}", e);
        }
        let e = e as u32;

        match self {
            Integer::Natural(n) => {
                if let Some(pn) = n.checked_pow(e) {
                    Integer::Natural(pn)
                } else {
                    Integer::Large(MultiPrecisionInteger::from(*n).pow(e))
                }
            }
            Integer::Large(r) => Integer::from_large(r.clone().pow(e)),
        }
    }

    /// Compute the Euclidean quotient and remainder, with `0 <= r < |b|`.
    pub fn quot_rem(&self, b: &Integer) -> (Integer, Integer) {
        if b.is_zero() {
            panic!("Cannot divide by zero");
        }

        match (self, b) {
            (Integer::Natural(aa), Integer::Natural(bb)) => {
                if let Some(q) = aa.checked_div_euclid(*bb) {
                    (Integer::Natural(q), self - &(b * &Integer::Natural(q)))
                } else {
                    // i64::MIN / -1
                    (
                        Integer::Large(-MultiPrecisionInteger::from(i64::MIN)),
                        Integer::zero(),
                    )
                }
            }
            (Integer::Natural(aa), Integer::Large(bb)) => {
                // |a| < |b|
                if *aa < 0 {
                    if bb.cmp0() == Ordering::Greater {
                        (
                            Integer::Natural(-1),
                            Integer::from_large(MultiPrecisionInteger::from(*aa + bb)),
                        )
                    } else {
                        (
                            Integer::Natural(1),
                            Integer::from_large(MultiPrecisionInteger::from(*aa - bb)),
                        )
                    }
                } else {
                    (Integer::zero(), Integer::Natural(*aa))
                }
            }
            (Integer::Large(aa), Integer::Natural(bb)) => {
                let (q, r) = aa.clone().div_rem_euc(MultiPrecisionInteger::from(*bb));
                (Integer::from_large(q), Integer::from_large(r))
            }
            (Integer::Large(aa), Integer::Large(bb)) => {
                let (q, r) = aa.clone().div_rem_euc(bb.clone());
                (Integer::from_large(q), Integer::from_large(r))
            }
        }
    }

    pub fn gcd(&self, b: &Integer) -> Integer {
        match (self, b) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                let gcd = utils::gcd_signed(*n1, *n2);
                if gcd <= i64::MAX as u64 {
                    Integer::Natural(gcd as i64)
                } else {
                    // n1 == n2 == i64::MIN
                    Integer::Large(MultiPrecisionInteger::from(gcd))
                }
            }
            (Integer::Natural(n1), Integer::Large(r2))
            | (Integer::Large(r2), Integer::Natural(n1)) => {
                let r1 = MultiPrecisionInteger::from(*n1);
                Integer::from_large(r1.gcd(r2))
            }
            (Integer::Large(r1), Integer::Large(r2)) => Integer::from_large(r1.clone().gcd(r2)),
        }
    }

    /// Map `self` into `(-p/2, p/2]` for a positive modulus `p`.
    pub fn symmetric_mod(&self, p: &Integer) -> Integer {
        let c = self.quot_rem(p).1;

        if &c + &c > *p {
            &c - p
        } else {
            c
        }
    }

    /// The inverse of `self` modulo a positive `m`, if it exists.
    ///
    /// Panics when `gcd(self, m) != 1`.
    pub fn mod_inverse(&self, m: &Integer) -> Integer {
        let mut r0 = self.quot_rem(m).1;
        let mut r1 = m.clone();
        let mut s0 = Integer::one();
        let mut s1 = Integer::zero();

        while !r1.is_zero() {
            let (q, r) = r0.quot_rem(&r1);
            let s = &s0 - &(&q * &s1);
            (r0, r1) = (r1, r);
            (s0, s1) = (s1, s);
        }

        assert!(r0.is_one(), "{} is not invertible mod {}", self, m);

        s0.quot_rem(m).1
    }

    /// The number of bits needed to represent the absolute value.
    pub fn significant_bits(&self) -> u32 {
        match self {
            Integer::Natural(n) => 64 - n.unsigned_abs().leading_zeros(),
            Integer::Large(r) => r.significant_bits(),
        }
    }

    /// Map `self` into the field of integers modulo the prime of `field`.
    pub fn to_finite_field(&self, field: &Zp) -> <Zp as Ring>::Element {
        match self {
            &Integer::Natural(n) => field.to_element(n.rem_euclid(field.get_prime() as i64) as u32),
            Integer::Large(r) => field.to_element(r.mod_u(field.get_prime())),
        }
    }
}

impl From<i64> for Integer {
    #[inline]
    fn from(n: i64) -> Integer {
        Integer::Natural(n)
    }
}

impl From<i32> for Integer {
    #[inline]
    fn from(n: i32) -> Integer {
        Integer::Natural(n as i64)
    }
}

impl From<u32> for Integer {
    #[inline]
    fn from(n: u32) -> Integer {
        Integer::Natural(n as i64)
    }
}

impl From<u64> for Integer {
    #[inline]
    fn from(n: u64) -> Integer {
        if n <= i64::MAX as u64 {
            Integer::Natural(n as i64)
        } else {
            Integer::Large(MultiPrecisionInteger::from(n))
        }
    }
}

impl From<usize> for Integer {
    #[inline]
    fn from(n: usize) -> Integer {
        (n as u64).into()
    }
}

impl From<MultiPrecisionInteger> for Integer {
    #[inline]
    fn from(n: MultiPrecisionInteger) -> Integer {
        Integer::from_large(n)
    }
}

impl FromStr for Integer {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() <= 20 {
            if let Ok(n) = s.parse::<i64>() {
                return Ok(Integer::Natural(n));
            }
        }

        if let Ok(n) = s.parse::<MultiPrecisionInteger>() {
            Ok(Integer::from_large(n))
        } else {
            Err("could not parse integer")
        }
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Integer::Natural(n) => Display::fmt(n, f),
            Integer::Large(r) => Display::fmt(r, f),
        }
    }
}

impl Debug for Integer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Integer::Natural(n) => Debug::fmt(n, f),
            Integer::Large(r) => Debug::fmt(r, f),
        }
    }
}

impl PartialOrd for Integer {
    #[inline]
    fn partial_cmp(&self, other: &Integer) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Integer) -> Ordering {
        match (self, other) {
            (Integer::Natural(n1), Integer::Natural(n2)) => n1.cmp(n2),
            (Integer::Natural(n1), Integer::Large(r2)) => n1.partial_cmp(r2).unwrap(),
            (Integer::Large(r1), Integer::Natural(n2)) => r1.partial_cmp(n2).unwrap(),
            (Integer::Large(r1), Integer::Large(r2)) => r1.cmp(r2),
        }
    }
}

impl Ring for IntegerRing {
    type Element = Integer;

    #[inline]
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a + b
    }

    #[inline]
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a - b
    }

    #[inline]
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a * b
    }

    #[inline]
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a += b;
    }

    #[inline]
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a -= b;
    }

    #[inline]
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a *= b;
    }

    #[inline]
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a += &(b * c);
    }

    #[inline]
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a -= &(b * c);
    }

    #[inline]
    fn neg(&self, a: &Self::Element) -> Self::Element {
        -a
    }

    #[inline]
    fn zero(&self) -> Self::Element {
        Integer::zero()
    }

    #[inline]
    fn one(&self) -> Self::Element {
        Integer::one()
    }

    #[inline]
    fn nth(&self, n: u64) -> Self::Element {
        n.into()
    }

    #[inline]
    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        b.pow(e)
    }

    #[inline]
    fn is_zero(a: &Self::Element) -> bool {
        a.is_zero()
    }

    #[inline]
    fn is_one(&self, a: &Self::Element) -> bool {
        a.is_one()
    }

    fn one_is_gcd_unit() -> bool {
        true
    }

    fn characteristic(&self) -> Integer {
        Integer::zero()
    }
}

impl EuclideanDomain for IntegerRing {
    #[inline]
    fn rem(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.quot_rem(b).1
    }

    #[inline]
    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        a.quot_rem(b)
    }

    #[inline]
    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.gcd(b)
    }
}

impl<'a, 'b> Add<&'b Integer> for &'a Integer {
    type Output = Integer;

    fn add(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                if let Some(num) = n1.checked_add(*n2) {
                    Integer::Natural(num)
                } else {
                    Integer::Large(MultiPrecisionInteger::from(*n1) + *n2)
                }
            }
            (Integer::Natural(n1), Integer::Large(r2))
            | (Integer::Large(r2), Integer::Natural(n1)) => {
                Integer::from_large(MultiPrecisionInteger::from(*n1 + r2))
            }
            (Integer::Large(r1), Integer::Large(r2)) => {
                Integer::from_large(MultiPrecisionInteger::from(r1 + r2))
            }
        }
    }
}

impl<'a, 'b> Sub<&'b Integer> for &'a Integer {
    type Output = Integer;

    fn sub(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                if let Some(num) = n1.checked_sub(*n2) {
                    Integer::Natural(num)
                } else {
                    Integer::Large(MultiPrecisionInteger::from(*n1) - *n2)
                }
            }
            (Integer::Natural(n1), Integer::Large(r2)) => {
                Integer::from_large(MultiPrecisionInteger::from(*n1 - r2))
            }
            (Integer::Large(r1), Integer::Natural(n2)) => {
                Integer::from_large(MultiPrecisionInteger::from(r1 - *n2))
            }
            (Integer::Large(r1), Integer::Large(r2)) => {
                Integer::from_large(MultiPrecisionInteger::from(r1 - r2))
            }
        }
    }
}

impl<'a, 'b> Mul<&'b Integer> for &'a Integer {
    type Output = Integer;

    fn mul(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                if let Some(nn) = n1.checked_mul(*n2) {
                    Integer::Natural(nn)
                } else {
                    Integer::Large(MultiPrecisionInteger::from(*n1) * *n2)
                }
            }
            (Integer::Natural(n1), Integer::Large(r2))
            | (Integer::Large(r2), Integer::Natural(n1)) => {
                Integer::from_large(MultiPrecisionInteger::from(*n1 * r2))
            }
            (Integer::Large(r1), Integer::Large(r2)) => {
                Integer::Large(MultiPrecisionInteger::from(r1 * r2))
            }
        }
    }
}

impl<'a, 'b> Div<&'b Integer> for &'a Integer {
    type Output = Integer;

    fn div(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(n1), Integer::Natural(n2)) => {
                if let Some(nn) = n1.checked_div(*n2) {
                    Integer::Natural(nn)
                } else {
                    // i64::MIN / -1
                    Integer::Large(-MultiPrecisionInteger::from(i64::MIN))
                }
            }
            (Integer::Natural(n1), Integer::Large(r2)) => {
                Integer::from_large(MultiPrecisionInteger::from(*n1) / r2)
            }
            (Integer::Large(r1), Integer::Natural(n2)) => {
                Integer::from_large(MultiPrecisionInteger::from(r1 / *n2))
            }
            (Integer::Large(r1), Integer::Large(r2)) => {
                Integer::from_large(MultiPrecisionInteger::from(r1 / r2))
            }
        }
    }
}

impl<'b> Add<&'b Integer> for Integer {
    type Output = Integer;

    #[inline(always)]
    fn add(self, rhs: &'b Integer) -> Integer {
        if let Integer::Large(r) = self {
            match rhs {
                Integer::Natural(n) => Integer::from_large(r + *n),
                Integer::Large(n) => Integer::from_large(r + n),
            }
        } else {
            &self + rhs
        }
    }
}

impl Add<Integer> for Integer {
    type Output = Integer;

    #[inline(always)]
    fn add(self, rhs: Integer) -> Integer {
        self + &rhs
    }
}

impl<'b> Sub<&'b Integer> for Integer {
    type Output = Integer;

    #[inline(always)]
    fn sub(self, rhs: &'b Integer) -> Integer {
        if let Integer::Large(r) = self {
            match rhs {
                Integer::Natural(n) => Integer::from_large(r - *n),
                Integer::Large(n) => Integer::from_large(r - n),
            }
        } else {
            &self - rhs
        }
    }
}

impl Sub<Integer> for Integer {
    type Output = Integer;

    #[inline(always)]
    fn sub(self, rhs: Integer) -> Integer {
        self - &rhs
    }
}

impl<'b> Mul<&'b Integer> for Integer {
    type Output = Integer;

    #[inline(always)]
    fn mul(self, rhs: &'b Integer) -> Integer {
        if let Integer::Large(r) = self {
            match rhs {
                Integer::Natural(n) => Integer::from_large(r * *n),
                Integer::Large(n) => Integer::from_large(r * n),
            }
        } else {
            &self * rhs
        }
    }
}

impl Mul<Integer> for Integer {
    type Output = Integer;

    #[inline(always)]
    fn mul(self, rhs: Integer) -> Integer {
        self * &rhs
    }
}

impl<'a> AddAssign<&'a Integer> for Integer {
    #[inline]
    fn add_assign(&mut self, rhs: &'a Integer) {
        *self = std::mem::replace(self, Integer::zero()) + rhs;
    }
}

impl<'a> SubAssign<&'a Integer> for Integer {
    #[inline]
    fn sub_assign(&mut self, rhs: &'a Integer) {
        *self = std::mem::replace(self, Integer::zero()) - rhs;
    }
}

impl<'a> MulAssign<&'a Integer> for Integer {
    #[inline]
    fn mul_assign(&mut self, rhs: &'a Integer) {
        *self = std::mem::replace(self, Integer::zero()) * rhs;
    }
}

impl<'a> DivAssign<&'a Integer> for Integer {
    #[inline]
    fn div_assign(&mut self, rhs: &'a Integer) {
        *self = &*self / rhs;
    }
}

impl Neg for Integer {
    type Output = Integer;

    fn neg(self) -> Integer {
        match self {
            Integer::Natural(n) => {
                if let Some(neg) = n.checked_neg() {
                    Integer::Natural(neg)
                } else {
                    Integer::Large(-MultiPrecisionInteger::from(i64::MIN))
                }
            }
            Integer::Large(r) => Integer::from_large(-r),
        }
    }
}

impl<'a> Neg for &'a Integer {
    type Output = Integer;

    #[inline]
    fn neg(self) -> Integer {
        self.clone().neg()
    }
}

#[cfg(test)]
mod test {
    use std::cmp::Ordering;
    use std::str::FromStr;

    use rug::Integer as MultiPrecisionInteger;

    use super::{Integer, Z};
    use crate::domains::EuclideanDomain;

    #[test]
    fn promotion_and_demotion() {
        let a = Integer::Natural(i64::MAX);
        let b = &a + &Integer::one();
        assert!(matches!(b, Integer::Large(_)));

        let c = &b - &Integer::one();
        assert_eq!(c, a);
        assert!(matches!(c, Integer::Natural(_)));

        let d = -Integer::Natural(i64::MIN);
        assert!(matches!(d, Integer::Large(_)));
        assert_eq!(-d, Integer::Natural(i64::MIN));
    }

    #[test]
    fn euclidean_quot_rem() {
        let (q, r) = Integer::Natural(-7).quot_rem(&Integer::Natural(3));
        assert_eq!(q, Integer::Natural(-3));
        assert_eq!(r, Integer::Natural(2));

        let (q, r) = Integer::Natural(-7).quot_rem(&Integer::Natural(-3));
        assert_eq!(q, Integer::Natural(3));
        assert_eq!(r, Integer::Natural(2));

        let big = Integer::from_large(MultiPrecisionInteger::from(i64::MAX) * 10 + 3);
        let (q, r) = big.quot_rem(&Integer::Natural(i64::MAX));
        assert_eq!(q, Integer::Natural(10));
        assert_eq!(r, Integer::Natural(3));
    }

    #[test]
    fn gcd() {
        assert_eq!(
            Z.gcd(&Integer::Natural(4 * 3 * 7), &Integer::Natural(-2 * 3 * 5)),
            Integer::Natural(6)
        );
        assert_eq!(
            Z.gcd(&Integer::Natural(i64::MIN), &Integer::Natural(i64::MIN)),
            Integer::from_large(MultiPrecisionInteger::from(i64::MIN).abs())
        );

        let big = Integer::from_large(MultiPrecisionInteger::from(3) << 100);
        assert_eq!(Z.gcd(&big, &Integer::Natural(6)), Integer::Natural(6));
        assert_eq!(Z.gcd(&big, &Integer::Natural(9)), Integer::Natural(3));
    }

    #[test]
    fn symmetric_mod() {
        let p = Integer::Natural(7);
        assert_eq!(Integer::Natural(3).symmetric_mod(&p), Integer::Natural(3));
        assert_eq!(Integer::Natural(4).symmetric_mod(&p), Integer::Natural(-3));
        assert_eq!(Integer::Natural(-10).symmetric_mod(&p), Integer::Natural(-3));
        assert_eq!(Integer::Natural(14).symmetric_mod(&p), Integer::Natural(0));
    }

    #[test]
    fn abs_cmp() {
        let big = Integer::from_large(-(MultiPrecisionInteger::from(1) << 70u32));
        assert_eq!(
            Integer::Natural(-5).abs_cmp(&Integer::Natural(3)),
            Ordering::Greater
        );
        assert_eq!(Integer::Natural(5).abs_cmp(&big), Ordering::Less);
        assert_eq!(big.abs_cmp(&Integer::Natural(-5)), Ordering::Greater);
    }

    #[test]
    fn pow() {
        assert_eq!(Integer::Natural(3).pow(4), Integer::Natural(81));
        assert_eq!(
            Integer::Natural(2).pow(64),
            Integer::from_large(MultiPrecisionInteger::from(1) << 64)
        );
    }

    #[test]
    fn parse() {
        assert_eq!(Integer::from_str("-123").unwrap(), Integer::Natural(-123));
        let huge = Integer::from_str("123456789012345678901234567890").unwrap();
        assert!(matches!(huge, Integer::Large(_)));
        assert_eq!(huge.to_string(), "123456789012345678901234567890");
    }
}
