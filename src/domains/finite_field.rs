//! The field of integers modulo a 32-bit prime, in Montgomery form.

use super::integer::Integer;
use super::{EuclideanDomain, Field, Ring};

const HENSEL_LIFTING_MASK: [u8; 128] = [
    255, 85, 51, 73, 199, 93, 59, 17, 15, 229, 195, 89, 215, 237, 203, 33, 31, 117, 83, 105, 231,
    125, 91, 49, 47, 5, 227, 121, 247, 13, 235, 65, 63, 149, 115, 137, 7, 157, 123, 81, 79, 37, 3,
    153, 23, 45, 11, 97, 95, 181, 147, 169, 39, 189, 155, 113, 111, 69, 35, 185, 55, 77, 43, 129,
    127, 213, 179, 201, 71, 221, 187, 145, 143, 101, 67, 217, 87, 109, 75, 161, 159, 245, 211, 233,
    103, 253, 219, 177, 175, 133, 99, 249, 119, 141, 107, 193, 191, 21, 243, 9, 135, 29, 251, 209,
    207, 165, 131, 25, 151, 173, 139, 225, 223, 53, 19, 41, 167, 61, 27, 241, 239, 197, 163, 57,
    183, 205, 171, 1,
];

/// The field of integers modulo an odd 32-bit prime.
///
/// Elements are stored in Montgomery form, so conversion with
/// [to_element](Zp::to_element) and [from_element](Zp::from_element) is
/// required at the boundary.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Zp {
    p: u32,
    m: u32,
    one: u32,
}

impl Zp {
    /// Create a new finite field with odd prime `p`.
    pub fn new(p: u32) -> Zp {
        if p % 2 == 0 {
            panic!("Even modulus {} is not supported", p);
        }

        Zp {
            p,
            m: Self::inv_2_32(p),
            one: Self::get_one(p),
        }
    }

    #[inline]
    pub fn get_prime(&self) -> u32 {
        self.p
    }

    /// Returns the unit element in Montgomery form, i.e. 2^32 mod p.
    fn get_one(a: u32) -> u32 {
        if a as u64 <= 1u64 << 31 {
            let res = (((1u64 << 31) % a as u64) << 1) as u32;

            if res < a { res } else { res - a }
        } else {
            a.wrapping_neg()
        }
    }

    /// Returns -a^-1 mod 2^32.
    fn inv_2_32(a: u32) -> u32 {
        let mut ret: u32 = HENSEL_LIFTING_MASK[((a >> 1) & 127) as usize] as u32;
        ret = ret.wrapping_mul(a.wrapping_mul(ret).wrapping_add(2));
        ret = ret.wrapping_mul(a.wrapping_mul(ret).wrapping_add(2));
        ret
    }

    /// Convert a number from `[0, p)` to Montgomery form.
    #[inline(always)]
    pub fn to_element(&self, a: u32) -> u32 {
        (((a as u64) << 32) % self.p as u64) as u32
    }

    /// Convert a number from Montgomery form to standard form.
    #[inline(always)]
    pub fn from_element(&self, a: &u32) -> u32 {
        self.mul(a, &1)
    }

    /// Convert a number from Montgomery form to an integer in `[0, p)`.
    #[inline]
    pub fn to_integer(&self, a: &u32) -> Integer {
        Integer::Natural(self.from_element(a) as i64)
    }

    /// Convert a number from Montgomery form to an integer in `(-p/2, p/2]`.
    #[inline]
    pub fn to_symmetric_integer(&self, a: &u32) -> Integer {
        let i = self.from_element(a);

        if i as u64 * 2 > self.p as u64 {
            Integer::Natural(i as i64 - self.p as i64)
        } else {
            Integer::Natural(i as i64)
        }
    }
}

impl Ring for Zp {
    type Element = u32;

    /// Add two numbers in Montgomery form.
    #[inline(always)]
    fn add(&self, a: &u32, b: &u32) -> u32 {
        let mut t = *a as u64 + *b as u64;

        if t >= self.p as u64 {
            t -= self.p as u64;
        }

        t as u32
    }

    /// Subtract `b` from `a`, where `a` and `b` are in Montgomery form.
    #[inline(always)]
    fn sub(&self, a: &u32, b: &u32) -> u32 {
        if *a >= *b {
            a - b
        } else {
            a + (self.p - b)
        }
    }

    /// Multiply two numbers in Montgomery form.
    #[inline(always)]
    fn mul(&self, a: &u32, b: &u32) -> u32 {
        let t = *a as u64 * *b as u64;
        let m = (t as u32).wrapping_mul(self.m);
        let (t, overflow) = t.overflowing_add(m as u64 * self.p as u64);
        let u = (t >> 32) as u32;

        if overflow {
            u.wrapping_sub(self.p)
        } else if u >= self.p {
            u - self.p
        } else {
            u
        }
    }

    #[inline(always)]
    fn add_assign(&self, a: &mut u32, b: &u32) {
        *a = self.add(a, b);
    }

    #[inline(always)]
    fn sub_assign(&self, a: &mut u32, b: &u32) {
        *a = self.sub(a, b);
    }

    #[inline(always)]
    fn mul_assign(&self, a: &mut u32, b: &u32) {
        *a = self.mul(a, b);
    }

    #[inline(always)]
    fn add_mul_assign(&self, a: &mut u32, b: &u32, c: &u32) {
        self.add_assign(a, &self.mul(b, c));
    }

    #[inline(always)]
    fn sub_mul_assign(&self, a: &mut u32, b: &u32, c: &u32) {
        self.sub_assign(a, &self.mul(b, c));
    }

    /// Computes -a mod p.
    #[inline]
    fn neg(&self, a: &u32) -> u32 {
        if *a == 0 { *a } else { self.p - a }
    }

    #[inline]
    fn zero(&self) -> u32 {
        0
    }

    /// Return the unit element in Montgomery form.
    #[inline]
    fn one(&self) -> u32 {
        self.one
    }

    #[inline]
    fn nth(&self, n: u64) -> u32 {
        self.to_element((n % self.p as u64) as u32)
    }

    /// Compute b^e mod p.
    #[inline]
    fn pow(&self, b: &u32, mut e: u64) -> u32 {
        if e >= self.p as u64 - 1 {
            e %= self.p as u64 - 1;
        }

        if e == 0 {
            return self.one();
        }

        let mut x = *b;
        let mut y = self.one();
        while e != 1 {
            if e % 2 == 1 {
                y = self.mul(&y, &x);
            }

            x = self.mul(&x, &x);
            e /= 2;
        }

        self.mul(&x, &y)
    }

    #[inline]
    fn is_zero(a: &u32) -> bool {
        *a == 0
    }

    #[inline]
    fn is_one(&self, a: &u32) -> bool {
        *a == self.one
    }

    fn one_is_gcd_unit() -> bool {
        true
    }

    fn characteristic(&self) -> Integer {
        self.p.into()
    }
}

impl EuclideanDomain for Zp {
    #[inline]
    fn rem(&self, _: &u32, _: &u32) -> u32 {
        0
    }

    #[inline]
    fn quot_rem(&self, a: &u32, b: &u32) -> (u32, u32) {
        (self.mul(a, &self.inv(b)), 0)
    }

    #[inline]
    fn gcd(&self, _: &u32, _: &u32) -> u32 {
        self.one()
    }
}

impl Field for Zp {
    #[inline]
    fn div(&self, a: &u32, b: &u32) -> u32 {
        self.mul(a, &self.inv(b))
    }

    #[inline]
    fn div_assign(&self, a: &mut u32, b: &u32) {
        *a = self.mul(a, &self.inv(b));
    }

    /// Computes a^-1 mod p.
    fn inv(&self, a: &u32) -> u32 {
        if *a == 0 {
            panic!("0 is not invertible mod {}", self.p);
        }

        // apply multiplication with 1 twice to get the correct scaling of R=2^32
        // see the paper [Montgomery Arithmetic from a Software Perspective](https://eprint.iacr.org/2017/1057.pdf)
        let x_mont = self.mul(&self.mul(a, &1), &1);

        // extended Euclidean algorithm: a x + b p = gcd(x, p) = 1 or a x = 1 (mod p)
        let mut u1: u32 = 1;
        let mut u3 = x_mont;
        let mut v1: u32 = 0;
        let mut v3 = self.p;
        let mut even_iter: bool = true;

        while v3 != 0 {
            let q = u3 / v3;
            let t3 = u3 % v3;
            let t1 = u1 + q * v1;
            u1 = v1;
            v1 = t1;
            u3 = v3;
            v3 = t3;
            even_iter = !even_iter;
        }

        assert!(u3 == 1, "{} is not invertible mod {}", a, self.p);

        if even_iter {
            u1
        } else {
            self.p - u1
        }
    }
}

#[cfg(test)]
mod test {
    use super::Zp;
    use crate::domains::{Field, Ring};

    #[test]
    fn element_conversion() {
        for p in [17, 101, 4293491017, 2147483659] {
            let f = Zp::new(p);
            for a in [0u32, 1, 2, 16, p - 1] {
                assert_eq!(f.from_element(&f.to_element(a)), a);
            }
        }
    }

    #[test]
    fn arithmetic() {
        let p = 4293491017u32;
        let f = Zp::new(p);

        let a = f.to_element(123456789);
        let b = f.to_element(987654321);

        let sum = f.from_element(&f.add(&a, &b));
        assert_eq!(sum as u64, (123456789u64 + 987654321) % p as u64);

        let prod = f.from_element(&f.mul(&a, &b));
        assert_eq!(prod as u64, (123456789u64 * 987654321) % p as u64);

        let diff = f.from_element(&f.sub(&b, &a));
        assert_eq!(diff as u64, (987654321 - 123456789) as u64);

        assert_eq!(f.add(&a, &f.neg(&a)), 0);
    }

    #[test]
    fn inverse() {
        let f = Zp::new(2147483659);

        for a in [1u32, 2, 3, 12345, 2147483658] {
            let e = f.to_element(a);
            assert!(f.is_one(&f.mul(&e, &f.inv(&e))));
        }
    }

    #[test]
    fn pow() {
        let f = Zp::new(101);

        let b = f.to_element(3);
        let mut expected = f.one();
        for e in 0..12 {
            assert_eq!(f.pow(&b, e), expected);
            expected = f.mul(&expected, &b);
        }

        // Fermat reduction of the exponent
        assert_eq!(f.pow(&b, 100), f.one());
        assert_eq!(f.pow(&b, 101), b);
    }

    #[test]
    fn symmetric_form() {
        let f = Zp::new(17);

        assert_eq!(f.to_symmetric_integer(&f.to_element(5)), 5.into());
        assert_eq!(f.to_symmetric_integer(&f.to_element(13)), (-4).into());
        assert_eq!(f.to_symmetric_integer(&f.to_element(8)), 8.into());
        assert_eq!(f.to_symmetric_integer(&f.to_element(9)), (-8).into());
    }
}
