//! Factorization of multivariate polynomials over the integers.

use std::sync::Arc;

use rand::{thread_rng, Rng};
use tracing::debug;

use crate::domains::finite_field::Zp;
use crate::domains::integer::{Integer, IntegerRing, Z};
use crate::domains::{EuclideanDomain, Ring};
use crate::var::Variable;

use super::gcd::LARGE_U32_PRIMES;
use super::polynomial::MultivariatePolynomial;
use super::Exponent;

pub trait Factorize: Sized {
    /// Perform a square-free factorization.
    /// The output is `a_1^e1*...*a_n^e_n`
    /// where each `a_i` is relative prime.
    fn square_free_factorization(&self) -> Vec<(Self, usize)>;
    /// Factor a univariate polynomial over its coefficient ring.
    fn factor_univariate(&self) -> Vec<(Self, usize)>;
    /// Perform a full factorization into irreducible factors.
    fn factor(&self) -> Vec<(Self, usize)>;
}

/// Iterator over all subsets of size `k` of `{0,...,n-1}`, in
/// lexicographic order.
struct CombinationIterator {
    n: usize,
    indices: Vec<usize>,
    first: bool,
}

impl CombinationIterator {
    fn new(n: usize, k: usize) -> CombinationIterator {
        CombinationIterator {
            n,
            indices: (0..k).collect(),
            first: true,
        }
    }

    fn next(&mut self) -> Option<&[usize]> {
        if self.indices.len() > self.n {
            return None;
        }

        if self.first {
            self.first = false;
            return Some(&self.indices);
        }

        let k = self.indices.len();
        let mut i = k;
        loop {
            if i == 0 {
                return None;
            }
            i -= 1;
            if self.indices[i] != i + self.n - k {
                break;
            }
        }

        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }

        Some(&self.indices)
    }
}

impl<E: Exponent> MultivariatePolynomial<IntegerRing, E> {
    /// Find factors that do not contain all variables.
    pub fn factor_separable(&self) -> Vec<Self> {
        let mut stripped = self.clone();

        let mut factors = vec![];
        for x in 0..self.nvars() {
            if self.degree(x) == E::zero() {
                continue;
            }

            let c = stripped.to_univariate_polynomial_list(x);
            let cs = c.into_iter().map(|x| x.0).collect();

            let gcd = Self::gcd_multiple(cs);

            if !gcd.is_constant() {
                stripped = &stripped / &gcd;
                let mut fs = gcd.factor_separable();
                factors.extend(fs.drain(..));
            }
        }

        factors.push(stripped);
        factors
    }

    /// Perform a square free factorization using Yun's algorithm.
    ///
    /// All variables must occur in every factor.
    fn square_free_factorization_0_char(&self) -> Vec<(Self, usize)> {
        if self.is_constant() {
            if self.is_one() {
                return vec![];
            } else {
                return vec![(self.clone(), 1)];
            }
        }

        // any variable can be selected
        // select the one with the lowest degree
        let lowest_rank_var = (0..self.nvars())
            .filter_map(|x| {
                let d = self.degree(x);
                if d > E::zero() {
                    Some((x, d))
                } else {
                    None
                }
            })
            .min_by_key(|a| a.1)
            .unwrap()
            .0;

        let b = self.derivative(lowest_rank_var);
        let c = Self::gcd(self, &b);

        if c.is_one() {
            return vec![(self.clone(), 1)];
        }

        let mut factors = vec![];

        let mut w = self / &c;
        let mut y = &b / &c;

        let mut i = 1;
        while !w.is_constant() {
            let z = y - w.derivative(lowest_rank_var);
            let g = Self::gcd(&w, &z);
            w = &w / &g;
            y = &z / &g;

            if !g.is_one() {
                factors.push((g, i));
            }
            i += 1
        }

        factors
    }
}

impl<E: Exponent> Factorize for MultivariatePolynomial<IntegerRing, E> {
    fn square_free_factorization(&self) -> Vec<(Self, usize)> {
        if self.is_zero() {
            return vec![];
        }

        let c = self.content();
        let stripped = self.clone().div_coeff(&c);

        let mut factors = vec![];

        if !c.is_one() {
            factors.push((self.constant(c), 1));
        }

        let fs = stripped.factor_separable();

        for f in fs {
            let mut nf = f.square_free_factorization_0_char();
            factors.extend(nf.drain(..));
        }

        if factors.is_empty() {
            factors.push((self.one(), 1))
        }

        factors
    }

    fn factor_univariate(&self) -> Vec<(Self, usize)> {
        let sf = self.square_free_factorization();

        let mut factors = vec![];
        for (f, p) in sf {
            debug!("square-free part {} with power {}", f, p);
            factors.extend(f.factor_reconstruct().into_iter().map(|ff| (ff, p)));
        }

        factors
    }

    /// Factor the polynomial into its unit, monomial factors and irreducible
    /// polynomial factors.
    fn factor(&self) -> Vec<(Self, usize)> {
        if self.is_zero() {
            return vec![];
        }

        // split off the unit and the integer content
        let mut content = self.content();
        if self.lcoeff().is_negative() {
            content = -content;
        }

        let mut rest = self.clone().div_coeff(&content);

        let mut factors = vec![];
        if !content.is_one() {
            factors.push((self.constant(content), 1));
        }

        // split off the monomial factors
        let nvars = rest.nvars();
        for v in 0..nvars {
            let min_pow = rest
                .exponents_iter()
                .map(|e| e[v])
                .min()
                .unwrap_or(E::zero());

            if min_pow > E::zero() {
                let mut e = vec![E::zero(); nvars];
                e[v] = E::one();
                factors.push((rest.monomial(Integer::one(), e), min_pow.to_u32() as usize));

                for es in rest.exponents.chunks_mut(nvars) {
                    es[v] = es[v] - min_pow;
                }
            }
        }

        for f in rest.factor_separable() {
            for (sf, pow) in f.square_free_factorization_0_char() {
                if sf.is_constant() {
                    // only a possible sign, which was already extracted
                    debug_assert!(sf.is_one());
                    continue;
                }

                let active_vars = (0..sf.nvars()).filter(|&v| sf.degree(v) > E::zero()).count();

                let irreducibles = if active_vars <= 1 {
                    sf.factor_reconstruct()
                } else {
                    sf.factor_multivariate()
                };

                for irr in irreducibles {
                    factors.push((irr, pow));
                }
            }
        }

        if factors.is_empty() {
            factors.push((self.one(), 1));
        }

        // merge duplicates and sort the factors for a reproducible order
        let mut merged: Vec<(Self, usize)> = Vec::with_capacity(factors.len());
        for (f, p) in factors {
            if let Some(e) = merged.iter_mut().find(|(g, _)| *g == f) {
                e.1 += p;
            } else {
                merged.push((f, p));
            }
        }

        let start = if merged[0].0.is_constant() { 1 } else { 0 };
        merged[start..].sort_by(|a, b| {
            a.0.exponents
                .cmp(&b.0.exponents)
                .then_with(|| a.0.coefficients.cmp(&b.0.coefficients))
        });

        merged
    }
}

impl<E: Exponent> MultivariatePolynomial<Zp, E> {
    /// Perform distinct degree factorization on a monic, univariate and
    /// square-free polynomial.
    pub fn distinct_degree_factorization(&self) -> Vec<(usize, Self)> {
        assert!(self.field.get_prime() != 2);
        let Some(var) = self.last_exponents().iter().position(|x| *x > E::zero()) else {
            return vec![(0, self.clone())]; // constant polynomial
        };

        let mut e = self.last_exponents().to_vec();
        e[var] = E::one();
        let x = self.monomial(self.field.one(), e);

        let mut factors = vec![];
        let mut h = x.clone();
        let mut f = self.clone();
        let mut i: usize = 0;
        while !f.is_one() {
            i += 1;

            h = h.exp_mod_univariate((self.field.get_prime() as u64).into(), &mut f);

            let mut g = (&h - &x).univariate_gcd(&f);

            if !g.is_one() {
                f = f.quot_rem_univariate(&mut g).0;
                factors.push((i, g));
            }

            if f.last_exponents()[var] < E::from_u32(2 * (i as u32 + 1)) {
                // f cannot be split any more
                if !f.is_constant() {
                    factors.push((f.last_exponents()[var].to_u32() as usize, f));
                }
                break;
            }
        }

        factors
    }

    /// Perform Cantor-Zassenhaus's probabilistic algorithm for
    /// finding irreducible factors of degree `d`.
    pub fn equal_degree_factorization(&self, d: usize) -> Vec<Self> {
        assert!(self.field.get_prime() != 2);
        let mut s = self.clone().make_monic();

        let Some(var) = self.last_exponents().iter().position(|x| *x > E::zero()) else {
            if d == 1 {
                return vec![s];
            } else {
                panic!("Degree mismatch in equal degree factorization");
            }
        };

        let n = self.degree(var).to_u32() as usize;

        if n == d {
            return vec![s];
        }

        let mut rng = thread_rng();
        let mut random_poly = self.zero_with_capacity(d);
        let mut exp = vec![E::zero(); self.nvars()];

        let factor = loop {
            // generate a random non-constant polynomial
            random_poly.clear();
            for i in 0..n {
                let r = self
                    .field
                    .nth(rng.gen_range(0..self.field.get_prime() as u64));
                if !Zp::is_zero(&r) {
                    exp[var] = E::from_u32(i as u32);
                    random_poly.append_monomial(r, &exp);
                }
            }

            if random_poly.degree(var) == E::zero() {
                continue;
            }

            let g = random_poly.univariate_gcd(&s);

            if !g.is_one() {
                break g;
            }

            let p: Integer = (self.field.get_prime() as u64).into();
            let b = random_poly
                .exp_mod_univariate(&(&p.pow(d as u64) - &1i64.into()) / &2i64.into(), &mut s)
                - self.one();

            let g = b.univariate_gcd(&s);

            if !g.is_one() && g != s {
                break g;
            }
        };

        let mut factors = factor.equal_degree_factorization(d);
        factors.extend((self / &factor).equal_degree_factorization(d));
        factors
    }

    /// Perform distinct and equal degree factorization on a square-free
    /// univariate polynomial.
    fn factor_distinct_equal_degree(&self) -> Vec<Self> {
        let mut factors = vec![];
        for (d2, f2) in self.distinct_degree_factorization() {
            debug!("distinct degree part {} of degree {}", f2, d2);
            for f3 in f2.equal_degree_factorization(d2) {
                factors.push(f3);
            }
        }
        factors
    }
}

impl<E: Exponent> MultivariatePolynomial<IntegerRing, E> {
    /// Hensel lift a solution of `self = u * w mod p` to `self = u * w mod max_p`
    /// where `max_p` is a power of `p`.
    ///
    /// If the lifting is successful, i.e. the error is 0 at some stage,
    /// it will return `Ok((u,w))` where `u` and `w` are the true factors over
    /// the integers. If a true factorization is not possible, it returns
    /// `Err((u,w))` where `u` and `w` are monic.
    pub fn hensel_lift(
        &self,
        mut u: MultivariatePolynomial<Zp, E>,
        mut w: MultivariatePolynomial<Zp, E>,
        gamma: Option<Integer>,
        max_p: &Integer,
    ) -> Result<(Self, Self), (Self, Self)> {
        let lcoeff = self.lcoeff(); // lcoeff % p != 0
        let mut gamma = gamma.unwrap_or(lcoeff.clone());
        let lcoeff_p = lcoeff.to_finite_field(&u.field);
        let gamma_p = gamma.to_finite_field(&u.field);
        let field = u.field;
        let p = Integer::from(field.get_prime());

        let a = self.clone().mul_coeff(gamma.clone());

        u = u.make_monic().mul_coeff(gamma_p);
        w = w.make_monic().mul_coeff(lcoeff_p);

        let (_, s, t) = u.eea_univariate(&w);

        debug_assert!((&s * &u + &t * &w).is_one());

        let sym_map = |e: &u32| field.to_symmetric_integer(e);

        let mut u_i = u.map_coeff(sym_map, Z);
        let mut w_i = w.map_coeff(sym_map, Z);

        // only replace the leading coefficient
        *u_i.coefficients.last_mut().unwrap() = gamma.clone();
        *w_i.coefficients.last_mut().unwrap() = lcoeff;

        let mut e = &a - &(&u_i * &w_i);

        let mut m = p.clone();

        while !e.is_zero() && &m <= max_p {
            let e_p = e.map_coeff(|c| (c / &m).to_finite_field(&field), field);
            let (q, r) = (&e_p * &s).quot_rem_univariate(&mut w);
            let tau = &e_p * &t + q * &u;

            u_i = u_i + tau.map_coeff(sym_map, Z).mul_coeff(m.clone());
            w_i = w_i + r.map_coeff(sym_map, Z).mul_coeff(m.clone());
            e = &a - &(&u_i * &w_i);

            m = &m * &p;
        }

        if e.is_zero() {
            let content = u_i.content();
            if !content.is_one() {
                u_i = u_i.div_coeff(&content);
                gamma = &gamma / &content;
            }

            if !gamma.is_one() {
                w_i = w_i.div_coeff(&gamma); // true division is possible in this case
            }

            Ok((u_i, w_i))
        } else {
            if !u_i.lcoeff().is_one() {
                let inv = u_i.lcoeff().mod_inverse(&m);
                u_i = u_i.map_coeff(|c| (c * &inv).symmetric_mod(&m), Z);
            }

            if !w_i.lcoeff().is_one() {
                let inv = w_i.lcoeff().mod_inverse(&m);
                w_i = w_i.map_coeff(|c| (c * &inv).symmetric_mod(&m), Z);
            }

            Err((u_i, w_i))
        }
    }

    /// Lift multiple factors by creating a binary tree and lifting each product.
    fn multi_factor_hensel_lift(
        &self,
        hs: &[MultivariatePolynomial<Zp, E>],
        max_p: &Integer,
    ) -> Vec<Self> {
        if hs.len() == 1 {
            if self.lcoeff().is_one() {
                return vec![self.clone()];
            } else {
                let inv = self.lcoeff().mod_inverse(max_p);
                let r = self.map_coeff(|c| (c * &inv).symmetric_mod(max_p), Z);
                return vec![r];
            }
        }

        let (gs, hs) = hs.split_at(hs.len() / 2);

        let mut g = gs[0].one();
        for x in gs {
            g = g * x;
        }

        let mut h = hs[0].one();
        for x in hs {
            h = h * x;
        }

        let (g_i, h_i) = self.hensel_lift(g, h, None, max_p).unwrap_or_else(|e| e);
        debug!("lifted halves {} and {}", g_i, h_i);

        let mut factors = g_i.multi_factor_hensel_lift(gs, max_p);
        factors.extend(h_i.multi_factor_hensel_lift(hs, max_p));
        factors
    }

    /// Factor a square-free univariate polynomial over the integers by Hensel
    /// lifting factors computed over a finite field image of the polynomial.
    fn factor_reconstruct(&self) -> Vec<Self> {
        let Some(var) = self.last_exponents().iter().position(|x| *x > E::zero()) else {
            return vec![self.clone()]; // constant polynomial
        };
        let d = self.degree(var).to_u32();

        if d == 1 {
            return vec![self.clone()];
        }

        let max_norm = self.coefficients.iter().map(|x| x.abs()).max().unwrap();
        let bound: Integer =
            &Integer::from(((d + 1) as f64 * 2f64.powi(d as i32 + 1).sqrt()) as u64)
                * &(&Integer::from(2u64).pow(d as u64) * &(&max_norm * &self.lcoeff().abs()));

        // select a prime that does not divide the leading coefficient and
        // that keeps the image square-free
        let mut field;
        let mut f_p;
        let mut i = 0;
        loop {
            if i == LARGE_U32_PRIMES.len() {
                panic!("Ran out of primes during factorization");
            }

            let p = LARGE_U32_PRIMES[i];
            i += 1;

            if Z.rem(&self.lcoeff(), &Integer::Natural(p as i64)).is_zero() {
                continue;
            }

            field = Zp::new(p);
            f_p = self.to_finite_field(&field);
            let df_p = f_p.derivative(var);

            if f_p.univariate_gcd(&df_p).is_one() {
                break;
            }
        }

        let hs: Vec<_> = f_p.factor_distinct_equal_degree();

        if hs.len() == 1 {
            // the polynomial is irreducible
            return vec![self.clone()];
        }

        let p: Integer = (field.get_prime() as i64).into();
        let mut max_p = p.clone();
        while max_p < bound {
            max_p = &max_p * &p;
        }

        let mut factors = self.multi_factor_hensel_lift(&hs, &max_p);

        let mut rec_factors = vec![];
        // factor recombination
        let mut s = 1;

        let mut rest = self.clone();
        'len: while 2 * s <= factors.len() {
            let mut fs = CombinationIterator::new(factors.len(), s);
            while let Some(cs) = fs.next() {
                // check if the constant term matches
                if rest.exponents[..rest.nvars()].iter().all(|e| *e == E::zero()) {
                    let mut g1 = rest.lcoeff();
                    let mut h1 = rest.lcoeff();
                    for i in 0..factors.len() {
                        if factors[i].exponents[..rest.nvars()]
                            .iter()
                            .all(|x| *x == E::zero())
                        {
                            if cs.contains(&i) {
                                g1 = (&g1 * &factors[i].coefficients[0]).symmetric_mod(&max_p);
                            } else {
                                h1 = (&h1 * &factors[i].coefficients[0]).symmetric_mod(&max_p);
                            }
                        }
                    }

                    if &g1 * &h1 != &rest.lcoeff() * &rest.coefficients[0] {
                        continue;
                    }
                }

                let mut g = rest.constant(rest.lcoeff());
                for i in 0..factors.len() {
                    if cs.contains(&i) {
                        g = &g * &factors[i];
                        g = g.map_coeff(|i| i.symmetric_mod(&max_p), Z);
                    }
                }

                let c = g.content();
                g = g.div_coeff(&c);

                let (h, r) = rest.quot_rem(&g, true);

                if r.is_zero() {
                    // should always happen when |g1|_1 * |h1|_1 <= bound
                    rec_factors.push(g);

                    for i in cs.iter().rev() {
                        factors.remove(*i);
                    }

                    let c = h.content();
                    rest = h.div_coeff(&c);

                    continue 'len;
                }
            }

            s += 1;
        }

        rec_factors.push(rest);
        rec_factors
    }

    /// Factor a primitive, square-free polynomial in several variables by a
    /// Kronecker substitution `x_i -> y^(s_i)`: the univariate image is
    /// factored and subsets of its factors are mapped back and verified by
    /// exact division.
    fn factor_multivariate(&self) -> Vec<Self> {
        let vars: Vec<usize> = (0..self.nvars())
            .filter(|&v| self.degree(v) > E::zero())
            .collect();
        debug_assert!(vars.len() > 1);

        // mixed-radix strides; every factor exponent tuple maps to a unique
        // power of the substitution variable
        let mut radix = Vec::with_capacity(vars.len());
        let mut strides = Vec::with_capacity(vars.len());
        let mut stride: u64 = 1;
        for &v in &vars {
            let d = self.degree(v).to_u32() as u64;
            strides.push(stride);
            radix.push(d + 1);
            stride = stride
                .checked_mul(d + 1)
                .filter(|s| *s <= u32::MAX as u64)
                .unwrap_or_else(|| panic!("Degree overflow in Kronecker substitution"));
        }

        let uni_vars = Arc::new(vec![Variable::Temporary(0)]);
        let mut image: MultivariatePolynomial<IntegerRing, u32> =
            MultivariatePolynomial::new(&Z, Some(self.nterms()), uni_vars);
        for t in self {
            let mut n: u64 = 0;
            for (&v, s) in vars.iter().zip(&strides) {
                n += t.exponents[v].to_u32() as u64 * s;
            }
            image.append_monomial(t.coefficient.clone(), &[n as u32]);
        }

        // the substitution is injective on the support, so no terms collapsed
        debug_assert_eq!(image.nterms(), self.nterms());

        let mut uni_factors = vec![];
        for (f, pow) in image.factor_univariate() {
            if f.is_constant() {
                // at most a sign for a primitive input
                continue;
            }
            for _ in 0..pow {
                uni_factors.push(f.clone());
            }
        }

        let mut rec_factors = vec![];
        let mut rest = self.clone();
        let mut s = 1;
        'len: while 2 * s <= uni_factors.len() {
            let mut fs = CombinationIterator::new(uni_factors.len(), s);
            while let Some(cs) = fs.next() {
                let mut prod = image.one();
                for &i in cs {
                    prod = prod * &uni_factors[i];
                }

                let Some(cand) = Self::from_kronecker_image(&prod, &rest, &vars, &strides, &radix)
                else {
                    continue;
                };

                let content = cand.content();
                let mut cand = cand.div_coeff(&content);
                if cand.lcoeff().is_negative() {
                    cand = -cand;
                }

                if cand.is_constant() {
                    continue;
                }

                if let Some(h) = rest.divides(&cand) {
                    rec_factors.push(cand);

                    for i in cs.iter().rev() {
                        uni_factors.remove(*i);
                    }

                    rest = h;
                    continue 'len;
                }
            }

            s += 1;
        }

        rec_factors.push(rest);
        rec_factors
    }

    /// Map a univariate Kronecker image back by mixed-radix decomposition of
    /// every exponent. Returns `None` when an exponent falls outside the
    /// radix bounds, which rules the candidate out.
    fn from_kronecker_image(
        image: &MultivariatePolynomial<IntegerRing, u32>,
        like: &Self,
        vars: &[usize],
        strides: &[u64],
        radix: &[u64],
    ) -> Option<Self> {
        let mut res = like.zero_with_capacity(image.nterms());
        let mut exps = vec![E::zero(); like.nvars()];

        for t in image {
            let mut m = t.exponents[0] as u64;

            for e in exps.iter_mut() {
                *e = E::zero();
            }

            for i in (0..vars.len()).rev() {
                let e = m / strides[i];
                if e >= radix[i] {
                    return None;
                }
                exps[vars[i]] = E::from_u32(e as u32);
                m %= strides[i];
            }

            res.append_monomial(t.coefficient.clone(), &exps);
        }

        Some(res)
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::domains::integer::{Integer, Z};
    use crate::poly::gcd::LARGE_U32_PRIMES;
    use crate::poly::polynomial::MultivariatePolynomial;
    use crate::var::Variable;

    use super::Factorize;

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

    fn assert_factorization(
        p: &MultivariatePolynomial<crate::domains::integer::IntegerRing, u16>,
        expected_count: usize,
    ) {
        let factors = p.factor();

        assert_eq!(
            factors.iter().map(|(_, p)| p).sum::<usize>(),
            expected_count
        );

        let mut product = p.one();
        for (f, pow) in &factors {
            product = product * &f.pow(*pow);
        }
        assert_eq!(&product, p);
    }

    #[test]
    fn constants() {
        let six = poly(&[(6, &[0])], &["x"]);
        assert_eq!(six.factor(), vec![(six.clone(), 1)]);

        let one = poly(&[(1, &[0])], &["x"]);
        assert_eq!(one.factor(), vec![(one.clone(), 1)]);
    }

    #[test]
    fn univariate_square_free() {
        // x^2 - 1 = (x - 1)(x + 1)
        let p = poly(&[(-1, &[0]), (1, &[2])], &["x"]);
        let fs = p.factor();

        assert_eq!(fs.len(), 2);
        assert!(fs.iter().any(|(f, _)| *f == poly(&[(-1, &[0]), (1, &[1])], &["x"])));
        assert!(fs.iter().any(|(f, _)| *f == poly(&[(1, &[0]), (1, &[1])], &["x"])));
    }

    #[test]
    fn univariate_with_multiplicity() {
        // 3(x+1)^2(x-2)
        let f1 = poly(&[(1, &[0]), (1, &[1])], &["x"]);
        let f2 = poly(&[(-2, &[0]), (1, &[1])], &["x"]);
        let p = (&(&f1 * &f1) * &f2).mul_coeff(Integer::Natural(3));

        let fs = p.factor();
        assert!(fs.contains(&(p.constant(Integer::Natural(3)), 1)));
        assert!(fs.contains(&(f1, 2)));
        assert!(fs.contains(&(f2, 1)));
    }

    #[test]
    fn irreducible() {
        // x^2 + x + 1 is irreducible over the integers
        let p = poly(&[(1, &[0]), (1, &[1]), (1, &[2])], &["x"]);
        assert_eq!(p.factor(), vec![(p.clone(), 1)]);
    }

    #[test]
    fn monomial_factors() {
        // -2 x^2 y^3 (x - y) (x + y)
        let d1 = poly(&[(-1, &[0, 1]), (1, &[1, 0])], &["x", "y"]);
        let d2 = poly(&[(1, &[0, 1]), (1, &[1, 0])], &["x", "y"]);
        let m = poly(&[(-2, &[2, 3])], &["x", "y"]);
        let p = &(&d1 * &d2) * &m;

        let fs = p.factor();

        assert!(fs.contains(&(p.constant(Integer::Natural(-2)), 1)));
        assert!(fs.contains(&(poly(&[(1, &[1, 0])], &["x", "y"]), 2)));
        assert!(fs.contains(&(poly(&[(1, &[0, 1])], &["x", "y"]), 3)));
        assert!(fs.contains(&(d1, 1)));
        assert!(fs.contains(&(d2, 1)));
        assert_eq!(fs.len(), 5);
    }

    #[test]
    fn multivariate() {
        // (x + y)(x - y) = x^2 - y^2
        let p = poly(&[(-1, &[0, 2]), (1, &[2, 0])], &["x", "y"]);
        let fs = p.factor();

        assert_eq!(fs.len(), 2);
        assert_factorization(&p, 2);
    }

    #[test]
    fn multivariate_with_multiplicity() {
        // y^3 (x - y)^2 (x + y), reconstructing the full product
        let d1 = poly(&[(-1, &[0, 1]), (1, &[1, 0])], &["x", "y"]);
        let d2 = poly(&[(1, &[0, 1]), (1, &[1, 0])], &["x", "y"]);
        let m = poly(&[(1, &[0, 3])], &["x", "y"]);
        let p = &(&(&d1 * &d1) * &d2) * &m;

        assert_factorization(&p, 6);

        let fs = p.factor();
        assert!(fs.contains(&(d1, 2)));
        assert!(fs.contains(&(d2, 1)));
        assert!(fs.contains(&(poly(&[(1, &[0, 1])], &["x", "y"]), 3)));
    }

    #[test]
    fn square_free() {
        // (1 + x)^2 (1 + y)
        let f1 = poly(&[(1, &[0, 0]), (1, &[1, 0])], &["x", "y"]);
        let f2 = poly(&[(1, &[0, 0]), (1, &[0, 1])], &["x", "y"]);
        let p = &(&f1 * &f1) * &f2;

        let sf = p.square_free_factorization();
        assert!(sf.contains(&(f1, 2)));
        assert!(sf.contains(&(f2, 1)));
    }

    #[test]
    fn combinations() {
        let mut it = super::CombinationIterator::new(4, 2);
        let mut seen = vec![];
        while let Some(cs) = it.next() {
            seen.push(cs.to_vec());
        }

        assert_eq!(seen.len(), 6);
        assert_eq!(seen[0], vec![0, 1]);
        assert_eq!(seen[5], vec![2, 3]);
    }

    #[test]
    fn first_table_prime_is_admissible() {
        // the leading coefficient is divisible by every table prime except
        // the first, so prime selection must try the whole table
        let mut c = Integer::one();
        for p in &LARGE_U32_PRIMES[1..] {
            c = &c * &Integer::from(*p);
        }

        // c*x^2 - 1 is irreducible: c is squarefree, so no a with a^2 = c
        let mut f = poly(&[(-1, &[0])], &["x"]);
        f.append_monomial(c, &[2]);

        let factors = f.factor();
        assert_eq!(factors.len(), 1);
        assert_eq!(factors[0].0, f);
        assert_eq!(factors[0].1, 1);
    }
}
