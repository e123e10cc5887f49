//! Greatest common divisor computation for multivariate polynomials over
//! the integers.

use std::borrow::Cow;
use std::cmp::Ordering;

use smallvec::{smallvec, SmallVec};
use tracing::debug;

use crate::domains::finite_field::Zp;
use crate::domains::integer::{Integer, IntegerRing, SMALL_PRIMES, Z};
use crate::domains::{EuclideanDomain, Ring};

use super::polynomial::MultivariatePolynomial;
use super::{Exponent, INLINED_EXPONENTS};

// 100 large u32 primes starting from the 203213901st prime number
pub const LARGE_U32_PRIMES: [u32; 100] = [
    4293490987, 4293491603, 4293492277, 4293492857, 4293491017, 4293491621, 4293492283, 4293492881,
    4293491023, 4293491639, 4293492293, 4293492893, 4293491051, 4293491659, 4293492331, 4293492941,
    4293491149, 4293491701, 4293492349, 4293492977, 4293491171, 4293491711, 4293492383, 4293493037,
    4293491221, 4293491747, 4293492403, 4293493049, 4293491261, 4293491779, 4293492421, 4293493069,
    4293491269, 4293491791, 4293492431, 4293493081, 4293491273, 4293491819, 4293492487, 4293493091,
    4293491281, 4293491849, 4293492499, 4293493117, 4293491299, 4293491863, 4293492523, 4293493121,
    4293491303, 4293491887, 4293492583, 4293493159, 4293491311, 4293491897, 4293492587, 4293493163,
    4293491327, 4293491911, 4293492649, 4293493207, 4293491329, 4293491953, 4293492661, 4293493229,
    4293491399, 4293491957, 4293492673, 4293493241, 4293491431, 4293492017, 4293492701, 4293493261,
    4293491467, 4293492023, 4293492739, 4293493319, 4293491509, 4293492097, 4293492751, 4293493363,
    4293491539, 4293492101, 4293492769, 4293493367, 4293491551, 4293492107, 4293492779, 4293493409,
    4293491561, 4293492113, 4293492781, 4293493423, 4293491567, 4293492139, 4293492811, 4293493433,
    4293491591, 4293492169, 4293492821, 4293493487,
];

#[derive(Debug)]
pub enum HeuristicGcdError {
    MaxSizeExceeded,
    BadReconstruction,
}

impl<E: Exponent> MultivariatePolynomial<IntegerRing, E> {
    /// Get the content of a multivariate polynomial viewed as a
    /// univariate polynomial in `x`.
    pub fn univariate_content(&self, x: usize) -> Self {
        let a = self.to_univariate_polynomial_list(x);

        let mut f = Vec::with_capacity(a.len());
        for (c, _) in a {
            f.push(c);
        }

        Self::gcd_multiple(f)
    }

    /// Compute the gcd of the univariate contents in `x`.
    pub fn univariate_content_gcd(&self, b: &Self, x: usize) -> Self {
        let af = self.to_univariate_polynomial_list(x);
        let bf = b.to_univariate_polynomial_list(x);

        let mut f = Vec::with_capacity(af.len() + bf.len());
        for (c, _) in af.into_iter().chain(bf) {
            f.push(c);
        }

        Self::gcd_multiple(f)
    }

    /// Apply a gcd repeatedly to a list of polynomials.
    pub fn repeated_gcd(mut f: Vec<Self>) -> Self {
        if f.len() == 1 {
            return f.swap_remove(0);
        }

        if f.len() == 2 {
            return Self::gcd(&f[0], &f[1]);
        }

        f.sort_unstable_by_key(|p| p.nterms());

        let mut gcd = f.pop().unwrap();
        for p in f {
            if gcd.is_one() {
                return gcd;
            }

            gcd = Self::gcd(&gcd, &p);
        }
        gcd
    }

    /// Compute the gcd of multiple polynomials efficiently.
    /// `gcd(f0,f1,f2,...)=gcd(f0,f1+k2*f(2)+k3*f(3))`
    /// with high likelihood.
    pub fn gcd_multiple(mut f: Vec<Self>) -> Self {
        assert!(!f.is_empty());

        let mut prime_index = 1; // skip prime 2
        let mut loop_counter = 0;
        loop {
            if f.len() == 1 {
                return f.swap_remove(0);
            }

            if f.len() == 2 {
                return Self::gcd(&f[0], &f[1]);
            }

            // if any entry is a number, the gcd is the gcd of the contents
            if let Some(n) = f.iter().find(|x| x.is_constant()) {
                let mut gcd = n.content();
                for x in f.iter() {
                    if gcd.is_one() {
                        break;
                    }

                    gcd = x.field.gcd(&gcd, &x.content());
                }
                return n.constant(gcd);
            }

            // take the smallest element
            let index_smallest = f
                .iter()
                .enumerate()
                .min_by_key(|(_, v)| v.nterms())
                .unwrap()
                .0;

            let a = f.swap_remove(index_smallest);

            // add all other polynomials with small prime prefactors
            let term_bound = f.iter().map(|x| x.nterms()).sum();
            let mut b = a.zero_with_capacity(term_bound);

            // prevent sampling f[i] and f[i+prime_len] with the same
            // prefactor every iteration
            let num_primes = if f.len() % SMALL_PRIMES.len() == 0 {
                SMALL_PRIMES.len() - 1
            } else {
                SMALL_PRIMES.len()
            };

            for p in f.iter() {
                let k = Integer::Natural(SMALL_PRIMES[prime_index % num_primes]);
                prime_index += 1;
                b = b + p.clone().mul_coeff(k);
            }

            let mut gcd = Self::gcd(&a, &b);

            if gcd.is_one() {
                return gcd;
            }

            // remove the content from the gcd before the division test as the
            // odds of an unlucky content are high
            let content = gcd.content();
            gcd = gcd.div_coeff(&content);
            let mut content_gcd = content;

            let old_length = f.len();

            f.retain(|x| {
                if x.divides(&gcd).is_some() {
                    content_gcd = gcd.field.gcd(&content_gcd, &x.content());
                    false
                } else {
                    true
                }
            });

            gcd = gcd.mul_coeff(content_gcd);

            if f.is_empty() {
                return gcd;
            }

            debug!(
                "multiple gcd not found in one try, current estimate: {}",
                gcd
            );

            f.push(gcd);

            if f.len() == old_length + 1 && loop_counter > 5 {
                debug!("multiple gcd failed, falling back to pairwise gcds");
                return Self::repeated_gcd(f);
            }

            loop_counter += 1;
        }
    }

    /// Compute the gcd for simple cases.
    #[inline(always)]
    fn simple_gcd(a: &Self, b: &Self) -> Option<Self> {
        if a == b {
            return Some(a.clone());
        }

        if a.is_zero() {
            return Some(b.clone());
        }
        if b.is_zero() {
            return Some(a.clone());
        }

        if a.is_one() {
            return Some(a.clone());
        }

        if b.is_one() {
            return Some(b.clone());
        }

        if a.is_constant() {
            let mut gcd = a.coefficients[0].clone();
            for c in &b.coefficients {
                gcd = a.field.gcd(&gcd, c);
                if gcd.is_one() {
                    break;
                }
            }
            return Some(a.constant(gcd));
        }

        if b.is_constant() {
            let mut gcd = b.coefficients[0].clone();
            for c in &a.coefficients {
                gcd = a.field.gcd(&gcd, c);
                if gcd.is_one() {
                    break;
                }
            }
            return Some(a.constant(gcd));
        }

        None
    }

    /// Compute the gcd of two multivariate polynomials. The result has a
    /// positive leading coefficient.
    pub fn gcd(a: &Self, b: &Self) -> Self {
        debug_assert_eq!(a.get_vars_ref(), b.get_vars_ref());
        debug!("gcd of {} and {}", a, b);

        if let Some(g) = Self::simple_gcd(a, b) {
            debug!("simple gcd: {}", g);
            return Self::normalize(g);
        }

        // a and b are only copied when needed
        let mut a = Cow::Borrowed(a);
        let mut b = Cow::Borrowed(b);

        // determine the maximum shared power of every variable
        let mut shared_degree: SmallVec<[E; INLINED_EXPONENTS]> = a.exponents(0).into();
        for p in [&a, &b] {
            for e in p.exponents_iter() {
                for (md, v) in shared_degree.iter_mut().zip(e) {
                    *md = (*md).min(*v);
                }
            }
        }

        // divide out the common monomial factor
        if shared_degree.iter().any(|d| *d != E::zero()) {
            let aa = a.to_mut();
            let nvars = aa.nvars();
            for e in aa.exponents.chunks_mut(nvars) {
                for (v, d) in e.iter_mut().zip(&shared_degree) {
                    *v = *v - *d;
                }
            }

            let bb = b.to_mut();
            let nvars = bb.nvars();
            for e in bb.exponents.chunks_mut(nvars) {
                for (v, d) in e.iter_mut().zip(&shared_degree) {
                    *v = *v - *d;
                }
            }
        }

        let mut base_degree: SmallVec<[Option<E>; INLINED_EXPONENTS]> = smallvec![None; a.nvars()];

        /// Undo the simplifications made to the input polynomials and
        /// normalize the sign of the gcd.
        #[inline(always)]
        fn rescale_gcd<E: Exponent>(
            mut g: MultivariatePolynomial<IntegerRing, E>,
            shared_degree: &[E],
            base_degree: &[Option<E>],
            content: &MultivariatePolynomial<IntegerRing, E>,
        ) -> MultivariatePolynomial<IntegerRing, E> {
            if !content.is_one() {
                g = g * content;
            }

            if shared_degree.iter().any(|d| *d > E::zero())
                || base_degree
                    .iter()
                    .any(|d| d.map(|bd| bd > E::one()).unwrap_or(false))
            {
                let nvars = g.nvars();
                for e in g.exponents.chunks_mut(nvars) {
                    for ((v, d), s) in e.iter_mut().zip(base_degree).zip(shared_degree) {
                        if let Some(d) = d {
                            *v = *v * *d;
                        }

                        *v += *s;
                    }
                }
            }

            MultivariatePolynomial::normalize(g)
        }

        if let Some(g) = Self::simple_gcd(&a, &b) {
            return rescale_gcd(g, &shared_degree, &base_degree, &a.one());
        }

        // check if the polynomials are functions of x^n, n > 1
        for p in [&a, &b] {
            for t in p.into_iter() {
                for (md, v) in base_degree.iter_mut().zip(t.exponents) {
                    if !v.is_zero() {
                        if let Some(mm) = md.as_mut() {
                            if *mm != E::one() {
                                *mm = mm.gcd(v);
                            }
                        } else {
                            *md = Some(*v);
                        }
                    }
                }
            }
        }

        // rename x^base_deg to x
        if base_degree
            .iter()
            .any(|d| d.is_some() && d.unwrap() > E::one())
        {
            let aa = a.to_mut();
            let nvars = aa.nvars();
            for e in aa.exponents.chunks_mut(nvars) {
                for (v, d) in e.iter_mut().zip(&base_degree) {
                    if let Some(d) = d {
                        *v = *v / *d;
                    }
                }
            }

            let bb = b.to_mut();
            let nvars = bb.nvars();
            for e in bb.exponents.chunks_mut(nvars) {
                for (v, d) in e.iter_mut().zip(&base_degree) {
                    if let Some(d) = d {
                        *v = *v / *d;
                    }
                }
            }
        }

        if let Some(gcd) = Self::try_heuristic_gcd(&a, &b) {
            debug!("heuristic gcd succeeded: {}", gcd.0);
            return rescale_gcd(gcd.0, &shared_degree, &base_degree, &a.one());
        }

        // store which variables appear in which expression
        let mut scratch: SmallVec<[i32; INLINED_EXPONENTS]> = smallvec![0i32; a.nvars()];
        for (p, inc) in [(&a, 1), (&b, 2)] {
            for t in p.into_iter() {
                for (e, ee) in scratch.iter_mut().zip(t.exponents) {
                    if !ee.is_zero() {
                        *e |= inc;
                    }
                }
            }
        }

        if a == b {
            return rescale_gcd(a.into_owned(), &shared_degree, &base_degree, &b.one());
        }

        // compute the gcd efficiently if some variables do not occur in both
        // polynomials
        if scratch.iter().any(|x| *x > 0 && *x < 3) {
            let only_a: SmallVec<[_; INLINED_EXPONENTS]> = scratch
                .iter()
                .enumerate()
                .filter_map(|(i, v)| if *v == 1 { Some(i) } else { None })
                .collect();

            let only_b: SmallVec<[_; INLINED_EXPONENTS]> = scratch
                .iter()
                .enumerate()
                .filter_map(|(i, v)| if *v == 2 { Some(i) } else { None })
                .collect();

            // the gcd must divide every coefficient of the monomials in the
            // variables that occur in one polynomial only
            let a1 = a.to_multivariate_polynomial_list(&only_a);
            let b1 = b.to_multivariate_polynomial_list(&only_b);

            let f = a1.into_values().chain(b1.into_values()).collect();

            return rescale_gcd(
                Self::gcd_multiple(f),
                &shared_degree,
                &base_degree,
                &a.one(),
            );
        }

        // try if b divides a or vice versa, doing a heuristic length check first
        if a.nterms() >= b.nterms() && a.divides(&b).is_some() {
            return rescale_gcd(b.into_owned(), &shared_degree, &base_degree, &a.one());
        }
        if a.nterms() <= b.nterms() && b.divides(&a).is_some() {
            return rescale_gcd(a.into_owned(), &shared_degree, &base_degree, &b.one());
        }

        // check if a polynomial is linear in a variable and compute the gcd
        // using the univariate content
        for (p1, p2) in [(&a, &b), (&b, &a)] {
            if let Some(var) = (0..p1.nvars()).find(|v| p1.degree(*v) == E::one()) {
                let mut cont = p1.univariate_content(var);

                let p1_prim = p1.as_ref() / &cont;

                if !cont.is_one() {
                    let cont_p2 = p2.univariate_content(var);
                    cont = Self::gcd(&cont, &cont_p2);
                }

                if p2.divides(&p1_prim).is_some() {
                    return rescale_gcd(p1_prim, &shared_degree, &base_degree, &cont);
                } else {
                    return rescale_gcd(cont, &shared_degree, &base_degree, &p1.one());
                }
            }
        }

        let vars: SmallVec<[_; INLINED_EXPONENTS]> = scratch
            .iter()
            .enumerate()
            .filter_map(|(i, v)| if *v == 3 { Some(i) } else { None })
            .collect();

        // select the main variable with the smallest shared degree to keep
        // the pseudo-remainder growth down
        let var = *vars
            .iter()
            .min_by_key(|&&v| a.degree(v).min(b.degree(v)))
            .unwrap();

        // strip the univariate contents wrt the main variable
        let cont_a = a.univariate_content(var);
        let cont_b = b.univariate_content(var);
        let content = Self::gcd(&cont_a, &cont_b);

        let a_prim = a.as_ref() / &cont_a;
        let b_prim = b.as_ref() / &cont_b;

        let g = Self::gcd_prs(a_prim, b_prim, var);

        rescale_gcd(g, &shared_degree, &base_degree, &content)
    }

    /// Compute the gcd of two polynomials that are primitive wrt `var` with
    /// a primitive polynomial remainder sequence.
    fn gcd_prs(mut a: Self, mut b: Self, var: usize) -> Self {
        debug!("prs gcd of {} and {} in variable {}", a, b, var);

        if a.degree(var) < b.degree(var) {
            std::mem::swap(&mut a, &mut b);
        }

        loop {
            if b.is_zero() {
                break;
            }

            if b.is_one() {
                a = b;
                break;
            }

            let r = a.pseudo_remainder(&b, var);
            a = b;
            b = if r.is_zero() {
                r
            } else {
                let cont = r.univariate_content(var);
                &r / &cont
            };
        }

        a
    }

    /// Compute a remainder of `self` and `div` viewed as univariate
    /// polynomials in `var`, where every reduction step is premultiplied by
    /// the leading coefficient of `div` to keep the division exact.
    fn pseudo_remainder(&self, div: &Self, var: usize) -> Self {
        debug_assert!(!div.is_zero());

        let lc_div = div.univariate_lcoeff(var);
        let div_deg = div.degree(var);

        let mut r = self.clone();
        while !r.is_zero() && r.degree(var) >= div_deg {
            let lc_r = r.univariate_lcoeff(var);

            let mut xpow = vec![E::zero(); r.nvars()];
            xpow[var] = r.degree(var) - div_deg;

            r = r * &lc_div - (div * &lc_r).mul_exp(&xpow);
        }

        r
    }

    /// Perform the heuristic gcd algorithm when the degrees are small enough
    /// for the evaluation points to stay manageable.
    fn try_heuristic_gcd(a: &Self, b: &Self) -> Option<(Self, Self, Self)> {
        let mut max_deg_a = 0;
        let mut contains_a: SmallVec<[bool; INLINED_EXPONENTS]> = smallvec![false; a.nvars()];
        for t in a {
            let mut deg = 1;
            for (var, e) in t.exponents.iter().enumerate() {
                let v = e.to_u32() as usize;
                if v > 0 {
                    contains_a[var] = true;
                    deg *= v + 1;
                }
            }

            if deg > max_deg_a {
                max_deg_a = deg;
            }
        }

        let mut max_deg_b = 0;
        let mut contains_b: SmallVec<[bool; INLINED_EXPONENTS]> = smallvec![false; b.nvars()];
        for t in b {
            let mut deg = 1;
            for (var, e) in t.exponents.iter().enumerate() {
                let v = e.to_u32() as usize;
                if v > 0 {
                    contains_b[var] = true;
                    deg *= v + 1;
                }
            }

            if deg > max_deg_b {
                max_deg_b = deg;
            }
        }

        let num_shared_vars = contains_a
            .iter()
            .zip(&contains_b)
            .filter(|(a, b)| **a && **b)
            .count();

        if max_deg_a < 20 || max_deg_b < 20 || num_shared_vars < 3 && max_deg_a.min(max_deg_b) < 150
        {
            a.heuristic_gcd(b).ok()
        } else {
            None
        }
    }

    /// Perform a heuristic gcd algorithm: evaluate the polynomials at a
    /// large integer and reconstruct the gcd from the integer gcd of the
    /// images by xi-adic expansion with the symmetric modulus.
    pub fn heuristic_gcd(&self, b: &Self) -> Result<(Self, Self, Self), HeuristicGcdError> {
        fn interpolate<E: Exponent>(
            mut gamma: MultivariatePolynomial<IntegerRing, E>,
            var: usize,
            xi: &Integer,
        ) -> MultivariatePolynomial<IntegerRing, E> {
            let mut g = gamma.zero();
            let mut i = 0;
            let xi_half = xi / &Integer::Natural(2);
            while !gamma.is_zero() {
                // create the xi-adic representation using the symmetric modulus
                let mut g_i = gamma.zero_with_capacity(gamma.nterms());
                for m in &gamma {
                    let mut c = Z.quot_rem(m.coefficient, xi).1;

                    if c > xi_half {
                        c -= xi;
                    }

                    if !c.is_zero() {
                        g_i.append_monomial(c, m.exponents);
                    }
                }

                // multiply with var^i
                let mut g_i_2 = g_i.clone();
                let nvars = g_i_2.nvars();
                for x in g_i_2.exponents.chunks_mut(nvars) {
                    x[var] = E::from_u32(i);
                }

                g = g + g_i_2;

                gamma = (gamma - g_i).div_coeff(xi);
                i += 1;
            }
            g
        }

        // extract the integer content
        let content_gcd = self.field.gcd(&self.content(), &b.content());

        let mut a = Cow::Borrowed(self);
        let mut b = Cow::Borrowed(b);

        if !content_gcd.is_one() {
            a = Cow::Owned(a.into_owned().div_coeff(&content_gcd));
            b = Cow::Owned(b.into_owned().div_coeff(&content_gcd));
        }

        if let Some(var) =
            (0..a.nvars()).find(|x| a.degree(*x) > E::zero() && b.degree(*x) > E::zero())
        {
            let max_a = a
                .coefficients
                .iter()
                .max_by(|x1, x2| x1.abs_cmp(x2))
                .unwrap_or(&Integer::Natural(0));

            let max_b = b
                .coefficients
                .iter()
                .max_by(|x1, x2| x1.abs_cmp(x2))
                .unwrap_or(&Integer::Natural(0));

            let min = if max_a.abs_cmp(max_b) == Ordering::Greater {
                max_b.abs()
            } else {
                max_a.abs()
            };

            let mut xi = &(&min * &Integer::Natural(2)) + &Integer::Natural(29);

            for retry in 0..6 {
                debug!("heuristic gcd round {}, xi={}", retry, xi);
                match &xi * &Integer::Natural(a.degree(var).max(b.degree(var)).to_u32() as i64) {
                    Integer::Natural(_) => {}
                    Integer::Large(r) => {
                        if r.significant_bits() > 256 {
                            return Err(HeuristicGcdError::MaxSizeExceeded);
                        }
                    }
                }

                let aa = a.replace(var, &xi);
                let bb = b.replace(var, &xi);

                let (gamma, co_fac_p, co_fac_q) = match aa.heuristic_gcd(&bb) {
                    Ok(x) => x,
                    Err(HeuristicGcdError::MaxSizeExceeded) => {
                        return Err(HeuristicGcdError::MaxSizeExceeded);
                    }
                    Err(HeuristicGcdError::BadReconstruction) => {
                        xi = Z
                            .quot_rem(&(&xi * &Integer::Natural(73794)), &Integer::Natural(27011))
                            .0;
                        continue;
                    }
                };

                let g = interpolate(gamma, var, &xi);
                let g_cont = g.content();

                let gc = g.div_coeff(&g_cont);

                if let Some(q) = a.divides(&gc) {
                    if let Some(q1) = b.divides(&gc) {
                        return Ok((gc.mul_coeff(content_gcd), q, q1));
                    }
                }

                if !co_fac_p.is_zero() {
                    let a_co_fac = interpolate(co_fac_p, var, &xi);

                    if let Some(q) = a.divides(&a_co_fac) {
                        if let Some(q1) = b.divides(&q) {
                            return Ok((q.mul_coeff(content_gcd), a_co_fac, q1));
                        }
                    }
                }

                if !co_fac_q.is_zero() {
                    let b_co_fac = interpolate(co_fac_q, var, &xi);

                    if let Some(q) = b.divides(&b_co_fac) {
                        if let Some(q1) = a.divides(&q) {
                            return Ok((q.mul_coeff(content_gcd), q1, b_co_fac));
                        }
                    }
                }

                xi = Z
                    .quot_rem(&(&xi * &Integer::Natural(73794)), &Integer::Natural(27011))
                    .0;
            }

            Err(HeuristicGcdError::BadReconstruction)
        } else {
            Ok((a.constant(content_gcd), a.into_owned(), b.into_owned()))
        }
    }

    /// Compute the least common multiple of two polynomials. The result has
    /// a positive leading coefficient.
    pub fn lcm(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return self.zero();
        }

        let g = Self::gcd(self, other);
        Self::normalize((self / &g) * other)
    }

    /// Flip the sign when the leading coefficient is negative.
    fn normalize(a: Self) -> Self {
        if a.lcoeff().is_negative() {
            -a
        } else {
            a
        }
    }
}

impl<E: Exponent> MultivariatePolynomial<Zp, E> {
    /// Univariate gcd over a finite field by the Euclidean algorithm. The
    /// result is monic.
    pub fn univariate_gcd(&self, other: &Self) -> Self {
        if self.is_zero() {
            return other.clone().make_monic();
        }
        if other.is_zero() {
            return self.clone().make_monic();
        }

        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let r = a.quot_rem_univariate(&mut b).1;
            (a, b) = (b, r);
        }

        a.make_monic()
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::domains::integer::{Integer, Z};
    use crate::poly::polynomial::MultivariatePolynomial;
    use crate::var::Variable;

    fn poly(
        terms: &[(i64, &[u16])],
        names: &[&str],
    ) -> MultivariatePolynomial<crate::domains::integer::IntegerRing, u16> {
        let vars = Arc::new(
            names
                .iter()
                .map(|n| Variable::new(n).unwrap())
                .collect::<Vec<_>>(),
        );
        let mut p = MultivariatePolynomial::new(&Z, Some(terms.len()), vars);
        for (c, e) in terms {
            p.append_monomial(Integer::Natural(*c), e);
        }
        p
    }

    #[test]
    fn trivial_cases() {
        let x = poly(&[(1, &[1, 0])], &["x", "y"]);
        let zero = x.zero();

        assert_eq!(MultivariatePolynomial::gcd(&x, &zero), x);
        assert_eq!(MultivariatePolynomial::gcd(&zero, &x), x);
        assert_eq!(MultivariatePolynomial::gcd(&x, &x), x);

        let c1 = poly(&[(12, &[0, 0])], &["x", "y"]);
        let c2 = poly(&[(18, &[0, 0])], &["x", "y"]);
        assert_eq!(
            MultivariatePolynomial::gcd(&c1, &c2),
            poly(&[(6, &[0, 0])], &["x", "y"])
        );
    }

    #[test]
    fn monomials() {
        // gcd(6x^2y, 4xy^2) = 2xy
        let a = poly(&[(6, &[2, 1])], &["x", "y"]);
        let b = poly(&[(4, &[1, 2])], &["x", "y"]);
        assert_eq!(
            MultivariatePolynomial::gcd(&a, &b),
            poly(&[(2, &[1, 1])], &["x", "y"])
        );
    }

    #[test]
    fn common_factor() {
        // gcd((1+x)(1-y), (1+x)(1+y)) = 1+x
        let f = poly(&[(1, &[0, 0]), (1, &[1, 0])], &["x", "y"]);
        let g1 = poly(&[(1, &[0, 0]), (-1, &[0, 1])], &["x", "y"]);
        let g2 = poly(&[(1, &[0, 0]), (1, &[0, 1])], &["x", "y"]);

        let a = &f * &g1;
        let b = &f * &g2;
        assert_eq!(MultivariatePolynomial::gcd(&a, &b), f);
    }

    #[test]
    fn sign_normalization() {
        // gcd(-2x, -4x^2) = 2x
        let a = poly(&[(-2, &[1])], &["x"]);
        let b = poly(&[(-4, &[2])], &["x"]);
        assert_eq!(
            MultivariatePolynomial::gcd(&a, &b),
            poly(&[(2, &[1])], &["x"])
        );
    }

    #[test]
    fn trivariate() {
        // the cofactors share no variables with each other
        let g = poly(
            &[(1, &[0, 0, 0]), (-1, &[0, 0, 1]), (-1, &[0, 0, 2])],
            &["x", "y", "z"],
        );
        let a = &g * &poly(
            &[(1, &[0, 0, 0]), (1, &[1, 0, 0]), (-1, &[0, 1, 0])],
            &["x", "y", "z"],
        );
        let b = &g * &poly(
            &[(1, &[0, 0, 0]), (1, &[0, 1, 0]), (1, &[0, 0, 1])],
            &["x", "y", "z"],
        );

        assert_eq!(MultivariatePolynomial::gcd(&a, &b), g);
    }

    #[test]
    fn coprime() {
        let a = poly(&[(1, &[0, 0]), (1, &[1, 0])], &["x", "y"]);
        let b = poly(&[(1, &[0, 0]), (1, &[0, 1])], &["x", "y"]);
        assert!(MultivariatePolynomial::gcd(&a, &b).is_one());
    }

    #[test]
    fn lcm() {
        let a = poly(&[(2, &[1, 0])], &["x", "y"]);
        let b = poly(&[(3, &[0, 1])], &["x", "y"]);
        assert_eq!(a.lcm(&b), poly(&[(6, &[1, 1])], &["x", "y"]));

        assert!(a.lcm(&a.zero()).is_zero());
    }

    #[test]
    fn gcd_multiple() {
        let f = poly(&[(1, &[1, 0]), (1, &[0, 1])], &["x", "y"]);
        let ms = vec![
            &f * &poly(&[(2, &[1, 0])], &["x", "y"]),
            &f * &poly(&[(1, &[0, 1]), (3, &[1, 1])], &["x", "y"]),
            &f * &poly(&[(5, &[0, 0]), (1, &[2, 0])], &["x", "y"]),
        ];

        assert_eq!(MultivariatePolynomial::gcd_multiple(ms), f);
    }
}
