//! Sparse multivariate polynomial arithmetic over a generic ring.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::Arc;

use ahash::{HashMap, HashMapExt};
use smallvec::{smallvec, SmallVec};

use crate::domains::finite_field::Zp;
use crate::domains::integer::{Integer, IntegerRing};
use crate::domains::{EuclideanDomain, Field, Ring};
use crate::var::Variable;

use super::{Exponent, INLINED_EXPONENTS};

/// Multivariate polynomial with a sparse degree and variable dense representation.
///
/// The i-th monomial is stored as `coefficients[i]` and
/// `exponents[i * nvars .. (i + 1) * nvars]`. Terms are always expanded and
/// sorted in ascending lexicographic order of the exponent tuples, so the
/// leading monomial is the last one.
#[derive(Clone)]
pub struct MultivariatePolynomial<F: Ring, E: Exponent = u16> {
    pub coefficients: Vec<F::Element>,
    pub exponents: Vec<E>,
    pub field: F,
    pub variables: Arc<Vec<Variable>>,
}

impl<F: Ring, E: Exponent> MultivariatePolynomial<F, E> {
    /// Constructs a zero polynomial. Instead of using this constructor,
    /// prefer to create new polynomials from existing ones, so that the
    /// variable map and field are inherited.
    #[inline]
    pub fn new(field: &F, cap: Option<usize>, variables: Arc<Vec<Variable>>) -> Self {
        Self {
            coefficients: Vec::with_capacity(cap.unwrap_or(0)),
            exponents: Vec::with_capacity(cap.unwrap_or(0) * variables.len()),
            field: field.clone(),
            variables,
        }
    }

    /// Constructs a zero polynomial, inheriting the field and variable map
    /// from `self`.
    #[inline]
    pub fn zero(&self) -> Self {
        Self {
            coefficients: vec![],
            exponents: vec![],
            field: self.field.clone(),
            variables: self.variables.clone(),
        }
    }

    /// Constructs a zero polynomial with the given capacity, inheriting the
    /// field and variable map from `self`.
    #[inline]
    pub fn zero_with_capacity(&self, cap: usize) -> Self {
        Self {
            coefficients: Vec::with_capacity(cap),
            exponents: Vec::with_capacity(cap * self.nvars()),
            field: self.field.clone(),
            variables: self.variables.clone(),
        }
    }

    /// Constructs a constant polynomial, inheriting the field and variable
    /// map from `self`.
    #[inline]
    pub fn constant(&self, coeff: F::Element) -> Self {
        if F::is_zero(&coeff) {
            return self.zero();
        }

        Self {
            coefficients: vec![coeff],
            exponents: vec![E::zero(); self.nvars()],
            field: self.field.clone(),
            variables: self.variables.clone(),
        }
    }

    /// Constructs a polynomial that is one, inheriting the field and
    /// variable map from `self`.
    #[inline]
    pub fn one(&self) -> Self {
        Self {
            coefficients: vec![self.field.one()],
            exponents: vec![E::zero(); self.nvars()],
            field: self.field.clone(),
            variables: self.variables.clone(),
        }
    }

    /// Constructs a polynomial with a single term.
    #[inline]
    pub fn monomial(&self, coeff: F::Element, exponents: Vec<E>) -> Self {
        debug_assert!(self.nvars() == exponents.len());

        if F::is_zero(&coeff) {
            return self.zero();
        }

        Self {
            coefficients: vec![coeff],
            exponents,
            field: self.field.clone(),
            variables: self.variables.clone(),
        }
    }

    /// Get the ith monomial.
    pub fn to_monomial_view(&self, i: usize) -> MonomialView<F, E> {
        assert!(i < self.nterms());

        MonomialView {
            coefficient: &self.coefficients[i],
            exponents: self.exponents(i),
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.nterms() == 0
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.nterms() == 1
            && self.field.is_one(&self.coefficients[0])
            && self.exponents.iter().all(|x| x.is_zero())
    }

    /// Returns the number of terms in the polynomial.
    #[inline]
    pub fn nterms(&self) -> usize {
        self.coefficients.len()
    }

    /// Returns the number of variables in the polynomial.
    #[inline]
    pub fn nvars(&self) -> usize {
        self.variables.len()
    }

    /// Returns true if the polynomial is constant.
    #[inline]
    pub fn is_constant(&self) -> bool {
        if self.is_zero() {
            return true;
        }
        if self.nterms() >= 2 {
            return false;
        }
        debug_assert!(!F::is_zero(self.coefficients.first().unwrap()));
        self.exponents.iter().all(|e| e.is_zero())
    }

    /// Get the constant term of the polynomial.
    #[inline]
    pub fn get_constant(&self) -> F::Element {
        if self.is_zero() || !self.exponents(0).iter().all(|e| e.is_zero()) {
            return self.field.zero();
        }

        self.coefficients[0].clone()
    }

    /// Returns the slice for the exponents of the specified monomial.
    #[inline]
    pub fn exponents(&self, index: usize) -> &[E] {
        &self.exponents[index * self.nvars()..(index + 1) * self.nvars()]
    }

    #[inline]
    pub fn last_exponents(&self) -> &[E] {
        debug_assert!(self.nterms() > 0);
        &self.exponents[(self.nterms() - 1) * self.nvars()..self.nterms() * self.nvars()]
    }

    /// Returns the mutable slice for the exponents of the specified monomial.
    #[inline]
    pub fn exponents_mut(&mut self, index: usize) -> &mut [E] {
        let nvars = self.nvars();
        &mut self.exponents[index * nvars..(index + 1) * nvars]
    }

    /// Returns an iterator over the exponents of every monomial.
    #[inline]
    pub fn exponents_iter(&self) -> std::slice::Chunks<E> {
        self.exponents.chunks(self.nvars().max(1))
    }

    /// Get a copy of the variable list.
    pub fn get_vars(&self) -> Arc<Vec<Variable>> {
        self.variables.clone()
    }

    /// Get a reference to the variable list.
    pub fn get_vars_ref(&self) -> &[Variable] {
        self.variables.as_ref()
    }

    /// Unify the variable maps of two polynomials, i.e. rewrite a polynomial
    /// in `x` and one in `y` to two polynomials in `x` and `y`.
    ///
    /// The variable map is inherited from `self` and is extended by the
    /// variables occurring in `other`.
    #[inline(always)]
    pub fn unify_variables(&mut self, other: &mut Self) {
        if self.variables == other.variables {
            return;
        }

        self.unify_variables_impl(other)
    }

    fn unify_variables_impl(&mut self, other: &mut Self) {
        let mut new_var_map = self.variables.as_ref().clone();
        let mut new_var_pos_other = vec![0; other.nvars()];
        for (pos, v) in new_var_pos_other.iter_mut().zip(other.variables.as_ref()) {
            if let Some(p) = new_var_map.iter().position(|x| x == v) {
                *pos = p;
            } else {
                *pos = new_var_map.len();
                new_var_map.push(v.clone());
            }
        }

        let mut newexp = vec![E::zero(); new_var_map.len() * self.nterms()];

        for t in 0..self.nterms() {
            newexp[t * new_var_map.len()..t * new_var_map.len() + self.nvars()]
                .copy_from_slice(self.exponents(t));
        }

        self.variables = Arc::new(new_var_map);
        self.exponents = newexp;

        // reconstruct 'other' with the correct monomial ordering
        let mut newother = Self::new(&other.field, Some(other.nterms()), self.variables.clone());
        let mut newexp = vec![E::zero(); self.nvars()];
        for t in other.into_iter() {
            for c in &mut newexp {
                *c = E::zero();
            }

            for (var, e) in t.exponents.iter().enumerate() {
                newexp[new_var_pos_other[var]] = *e;
            }
            newother.append_monomial(t.coefficient.clone(), &newexp);
        }
        *other = newother;
    }

    /// Rewrite the polynomial in the variable map `variables`, which must be
    /// a superset of the variables actually used. Returns `None` when a
    /// variable with a nonzero power is missing from the new map.
    pub fn to_variables(&self, variables: Arc<Vec<Variable>>) -> Option<Self> {
        if self.variables == variables {
            return Some(self.clone());
        }

        let mut var_pos = vec![None; self.nvars()];
        for (pos, v) in var_pos.iter_mut().zip(self.variables.as_ref()) {
            *pos = variables.iter().position(|x| x == v);
        }

        let mut res = Self::new(&self.field, Some(self.nterms()), variables);
        let mut newexp = vec![E::zero(); res.nvars()];
        for t in self {
            for c in &mut newexp {
                *c = E::zero();
            }

            for (e, pos) in t.exponents.iter().zip(&var_pos) {
                match pos {
                    Some(p) => newexp[*p] = *e,
                    None => {
                        if !e.is_zero() {
                            return None;
                        }
                    }
                }
            }
            res.append_monomial(t.coefficient.clone(), &newexp);
        }

        Some(res)
    }

    /// Reverse the monomial ordering in-place.
    fn reverse(&mut self) {
        let nterms = self.nterms();
        let nvars = self.nvars();
        if nterms < 2 {
            return;
        }

        self.coefficients.reverse();

        let midu = if nterms % 2 == 0 {
            nvars * (nterms / 2)
        } else {
            nvars * (nterms / 2 + 1)
        };

        let (l, r) = self.exponents.split_at_mut(midu);

        let rend = r.len();
        for i in 0..nterms / 2 {
            l[i * nvars..(i + 1) * nvars]
                .swap_with_slice(&mut r[rend - (i + 1) * nvars..rend - i * nvars]);
        }
    }

    /// Append a monomial to the back. It merges with the last monomial if
    /// the exponents are equal.
    #[inline]
    pub fn append_monomial_back(&mut self, coefficient: F::Element, exponents: &[E]) {
        if F::is_zero(&coefficient) {
            return;
        }

        let nterms = self.nterms();
        if nterms > 0 && exponents == self.last_exponents() {
            self.field
                .add_assign(&mut self.coefficients[nterms - 1], &coefficient);

            if F::is_zero(&self.coefficients[nterms - 1]) {
                self.coefficients.pop();
                self.exponents.truncate((nterms - 1) * self.nvars());
            }
        } else {
            self.coefficients.push(coefficient);
            self.exponents.extend_from_slice(exponents);
        }
    }

    /// Appends a monomial to the polynomial.
    pub fn append_monomial(&mut self, coefficient: F::Element, exponents: &[E]) {
        if F::is_zero(&coefficient) {
            return;
        }

        if self.nvars() != exponents.len() {
            panic!(
                "nvars mismatched: got {}, expected {}",
                exponents.len(),
                self.nvars()
            );
        }

        // should we append to the back?
        if self.nterms() == 0 || self.last_exponents().cmp(exponents) == Ordering::Less {
            self.coefficients.push(coefficient);
            self.exponents.extend_from_slice(exponents);
            return;
        }

        if self.exponents(0).cmp(exponents) == Ordering::Greater {
            self.coefficients.insert(0, coefficient);
            self.exponents.splice(0..0, exponents.iter().cloned());
            return;
        }

        // binary search to find the insert-point
        let mut l = 0;
        let mut r = self.nterms();

        while l <= r {
            let m = (l + r) / 2;
            let c = exponents.cmp(self.exponents(m)); // note the reversal

            match c {
                Ordering::Equal => {
                    // add the two coefficients
                    self.field
                        .add_assign(&mut self.coefficients[m], &coefficient);
                    if F::is_zero(&self.coefficients[m]) {
                        // the coefficient becomes zero; remove this monomial
                        self.coefficients.remove(m);
                        let i = m * self.nvars();
                        self.exponents.splice(i..i + self.nvars(), Vec::new());
                    }
                    return;
                }
                Ordering::Greater => {
                    l = m + 1;

                    if l == self.nterms() {
                        self.coefficients.push(coefficient);
                        self.exponents.extend_from_slice(exponents);
                        return;
                    }
                }
                Ordering::Less => {
                    if m == 0 {
                        self.coefficients.insert(0, coefficient);
                        self.exponents.splice(0..0, exponents.iter().cloned());
                        return;
                    }

                    r = m - 1;
                }
            }
        }

        self.coefficients.insert(l, coefficient);
        let i = l * self.nvars();
        self.exponents.splice(i..i, exponents.iter().cloned());
    }

    /// Reset the polynomial to zero, keeping the allocations.
    #[inline]
    pub fn clear(&mut self) {
        self.coefficients.clear();
        self.exponents.clear();
    }

    /// Split the polynomial into a map from the exponents in the variables
    /// `xs` to the polynomial coefficient in the remaining variables.
    pub fn to_multivariate_polynomial_list(&self, xs: &[usize]) -> HashMap<Vec<E>, Self> {
        let mut parts: HashMap<Vec<E>, Self> = HashMap::default();

        let mut rest = vec![E::zero(); self.nvars()];
        for t in self {
            let mut key = vec![E::zero(); self.nvars()];
            rest.copy_from_slice(t.exponents);
            for x in xs {
                key[*x] = t.exponents[*x];
                rest[*x] = E::zero();
            }

            parts
                .entry(key)
                .or_insert_with(|| self.zero())
                .append_monomial(t.coefficient.clone(), &rest);
        }

        parts
    }

    /// Take the derivative of the polynomial w.r.t the variable `var`.
    pub fn derivative(&self, var: usize) -> Self {
        debug_assert!(var < self.nvars());

        let mut res = self.zero_with_capacity(self.nterms());

        let mut exp = vec![E::zero(); self.nvars()];
        for x in self {
            if x.exponents[var] > E::zero() {
                exp.copy_from_slice(x.exponents);
                let pow = exp[var].to_u32() as u64;
                exp[var] = exp[var] - E::one();
                res.append_monomial(self.field.mul(x.coefficient, &self.field.nth(pow)), &exp);
            }
        }

        res
    }

    /// Multiply every coefficient with `other`.
    pub fn mul_coeff(mut self, other: F::Element) -> Self {
        for c in &mut self.coefficients {
            self.field.mul_assign(c, &other);
        }

        self
    }

    /// Map a coefficient to a new domain.
    pub fn map_coeff<U: Ring, T: Fn(&F::Element) -> U::Element>(
        &self,
        f: T,
        field: U,
    ) -> MultivariatePolynomial<U, E> {
        let mut coefficients = Vec::with_capacity(self.coefficients.len());
        let mut exponents = Vec::with_capacity(self.exponents.len());

        for m in self {
            let nc = f(m.coefficient);
            if !U::is_zero(&nc) {
                coefficients.push(nc);
                exponents.extend_from_slice(m.exponents);
            }
        }

        MultivariatePolynomial {
            coefficients,
            exponents,
            field,
            variables: self.variables.clone(),
        }
    }

    /// Add `exponents` to every exponent.
    pub fn mul_exp(mut self, exponents: &[E]) -> Self {
        debug_assert_eq!(self.nvars(), exponents.len());

        if exponents.iter().all(|e| e.is_zero()) {
            return self;
        }

        for e in self.exponents.chunks_mut(exponents.len()) {
            for (e1, e2) in e.iter_mut().zip(exponents) {
                *e1 = e1
                    .checked_add(e2)
                    .unwrap_or_else(|| panic!("Overflow in exponents"));
            }
        }

        self
    }

    /// Get the degree of the variable `x`.
    /// This operation is O(n).
    pub fn degree(&self, x: usize) -> E {
        if self.nvars() == 0 {
            return E::zero();
        }

        let mut max = E::zero();
        for e in self.exponents.iter().skip(x).step_by(self.nvars()) {
            if max < *e {
                max = *e;
            }
        }
        max
    }

    /// Get the highest degree of a variable in the leading monomial.
    pub fn ldegree(&self, v: usize) -> E {
        if self.is_zero() {
            return E::zero();
        }
        self.last_exponents()[v]
    }

    /// Get the highest degree of the leading monomial.
    pub fn ldegree_max(&self) -> E {
        if self.is_zero() {
            return E::zero();
        }
        *self.last_exponents().iter().max().unwrap_or(&E::zero())
    }

    /// Get the leading coefficient.
    pub fn lcoeff(&self) -> F::Element {
        if self.is_zero() {
            return self.field.zero();
        }
        self.coefficients.last().unwrap().clone()
    }

    /// Get the leading coefficient of a multivariate polynomial viewed as a
    /// univariate polynomial in `x`.
    pub fn univariate_lcoeff(&self, x: usize) -> Self {
        let d = self.degree(x);
        let mut lcoeff = self.zero();

        if self.coefficients.is_empty() {
            return lcoeff;
        }

        if d == E::zero() {
            return self.clone();
        }

        let mut e = vec![E::zero(); self.nvars()];
        for t in self {
            if t.exponents[x] == d {
                e.copy_from_slice(t.exponents);
                e[x] = E::zero();
                lcoeff.append_monomial(t.coefficient.clone(), &e);
            }
        }

        lcoeff
    }

    /// Replace a variable `n` in the polynomial by an element from
    /// the ring `v`.
    pub fn replace(&self, n: usize, v: &F::Element) -> Self {
        if (n + 1..self.nvars()).all(|i| self.degree(i) == E::zero()) {
            return self.replace_last(n, v);
        }

        let mut res = self.zero_with_capacity(self.nterms());
        let mut e: SmallVec<[E; INLINED_EXPONENTS]> = smallvec![E::zero(); self.nvars()];

        for t in self {
            if t.exponents[n] == E::zero() {
                res.append_monomial(t.coefficient.clone(), t.exponents);
                continue;
            }

            let c = self.field.mul(
                t.coefficient,
                &self.field.pow(v, t.exponents[n].to_u32() as u64),
            );

            e.copy_from_slice(t.exponents);
            e[n] = E::zero();
            res.append_monomial(c, &e);
        }

        res
    }

    /// Replace the last variable `n` in the polynomial by an element from
    /// the ring `v`. The monomial ordering is preserved, which makes this
    /// faster than [replace](Self::replace).
    pub fn replace_last(&self, n: usize, v: &F::Element) -> Self {
        let mut res = self.zero_with_capacity(self.nterms());
        let mut e: SmallVec<[E; INLINED_EXPONENTS]> = smallvec![E::zero(); self.nvars()];

        for t in self {
            if t.exponents[n] == E::zero() {
                res.append_monomial_back(t.coefficient.clone(), t.exponents);
                continue;
            }

            let c = self.field.mul(
                t.coefficient,
                &self.field.pow(v, t.exponents[n].to_u32() as u64),
            );

            if F::is_zero(&c) {
                continue;
            }

            e.copy_from_slice(t.exponents);
            e[n] = E::zero();

            res.append_monomial_back(c, &e);
        }

        res
    }

    /// Evaluate the polynomial at `r`, which must provide one element per
    /// variable.
    pub fn replace_all(&self, r: &[F::Element]) -> F::Element {
        let mut res = self.field.zero();

        for t in self {
            let mut c = t.coefficient.clone();

            for (i, v) in r.iter().zip(t.exponents) {
                if v != &E::zero() {
                    self.field
                        .mul_assign(&mut c, &self.field.pow(i, v.to_u32() as u64));
                }
            }

            self.field.add_assign(&mut res, &c);
        }

        res
    }

    /// Compute `self^pow`.
    pub fn pow(&self, mut pow: usize) -> Self {
        if pow == 0 {
            return self.one();
        }

        if self.is_constant() {
            return self.constant(self.field.pow(&self.lcoeff(), pow as u64));
        }

        let mut x = self.clone();
        let mut y = self.one();
        while pow != 1 {
            if pow % 2 == 1 {
                y = &y * &x;
                pow -= 1;
            }

            x = &x * &x;
            pow /= 2;
        }

        x * &y
    }

    /// Shift a variable `var` to `var + shift`.
    pub fn shift_var(&self, var: usize, shift: &F::Element) -> Self {
        let d = self.degree(var).to_u32() as usize;

        let y_poly = self.to_univariate_polynomial_list(var);

        let mut v = vec![self.zero(); d + 1];
        for (x_poly, p) in y_poly {
            v[p.to_u32() as usize] = x_poly;
        }

        for k in 0..d {
            for j in (k..d).rev() {
                v[j] = &v[j] + &v[j + 1].clone().mul_coeff(shift.clone());
            }
        }

        let mut poly = self.zero();
        for (i, mut v) in v.into_iter().enumerate() {
            for x in v.exponents.chunks_mut(self.nvars()) {
                x[var] = E::from_u32(i as u32);
            }

            for m in &v {
                poly.append_monomial(m.coefficient.clone(), m.exponents);
            }
        }

        poly
    }

    /// Convert the polynomial to one in a single variable `x`, with
    /// polynomial coefficients in the other variables.
    pub fn to_univariate_polynomial_list(&self, x: usize) -> Vec<(Self, E)> {
        if self.coefficients.is_empty() {
            return vec![];
        }

        // get the maximum degree for variable x
        let mut maxdeg = E::zero();
        for t in 0..self.nterms() {
            let d = self.exponents(t)[x];
            if d > maxdeg {
                maxdeg = d;
            }
        }

        // construct the coefficient per power of x
        let mut result = vec![];
        let mut e: SmallVec<[E; INLINED_EXPONENTS]> = smallvec![E::zero(); self.nvars()];
        for x_deg in 0..maxdeg.to_u32() + 1 {
            let mut a = self.zero();
            for t in 0..self.nterms() {
                if self.exponents(t)[x].to_u32() == x_deg {
                    for (i, ee) in self.exponents(t).iter().enumerate() {
                        e[i] = *ee;
                    }
                    e[x] = E::zero();
                    a.append_monomial(self.coefficients[t].clone(), &e);
                }
            }

            if !a.is_zero() {
                result.push((a, E::from_u32(x_deg)));
            }
        }

        result
    }

    fn mul_sparse(&self, rhs: &Self) -> Self {
        let mut terms: HashMap<SmallVec<[E; INLINED_EXPONENTS]>, F::Element> =
            HashMap::with_capacity(self.nterms() * rhs.nterms().min(4));

        for t1 in self {
            for t2 in rhs {
                let mut exp: SmallVec<[E; INLINED_EXPONENTS]> =
                    SmallVec::with_capacity(self.nvars());
                for (e1, e2) in t1.exponents.iter().zip(t2.exponents) {
                    exp.push(
                        e1.checked_add(e2)
                            .unwrap_or_else(|| panic!("Overflow in exponents")),
                    );
                }

                let c = self.field.mul(t1.coefficient, t2.coefficient);
                match terms.entry(exp) {
                    Entry::Occupied(mut o) => {
                        self.field.add_assign(o.get_mut(), &c);
                    }
                    Entry::Vacant(v) => {
                        v.insert(c);
                    }
                }
            }
        }

        let mut res: Vec<_> = terms.into_iter().collect();
        res.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let mut out = self.zero_with_capacity(res.len());
        for (e, c) in res {
            if !F::is_zero(&c) {
                out.coefficients.push(c);
                out.exponents.extend_from_slice(&e);
            }
        }

        out
    }
}

impl<F: Ring, E: Exponent> Display for MultivariatePolynomial<F, E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;
        for t in self {
            if !first {
                write!(f, "+")?;
            }
            first = false;

            write!(f, "{}", t.coefficient)?;
            for (v, e) in self.variables.iter().zip(t.exponents) {
                if e.is_zero() {
                    continue;
                }
                if e.to_u32() == 1 {
                    write!(f, "*{}", v)?;
                } else {
                    write!(f, "*{}^{}", v, e)?;
                }
            }
        }

        Ok(())
    }
}

impl<F: Ring, E: Exponent> std::fmt::Debug for MultivariatePolynomial<F, E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "[]");
        }
        let mut first = true;
        write!(f, "[ ")?;
        for monomial in self {
            if first {
                first = false;
            } else {
                write!(f, ", ")?;
            }
            write!(
                f,
                "{{ {:?}, {:?} }}",
                monomial.coefficient, monomial.exponents
            )?;
        }
        write!(f, " ]")
    }
}

impl<F: Ring, E: Exponent> PartialEq for MultivariatePolynomial<F, E> {
    fn eq(&self, other: &Self) -> bool {
        if self.variables != other.variables {
            // compare in a common variable map
            let mut a = self.clone();
            let mut b = other.clone();
            a.unify_variables(&mut b);
            return a == b;
        }

        if self.nterms() != other.nterms() {
            return false;
        }

        self.exponents == other.exponents && self.coefficients == other.coefficients
    }
}

impl<F: Ring, E: Exponent> Eq for MultivariatePolynomial<F, E> {}

impl<F: Ring, E: Exponent> Hash for MultivariatePolynomial<F, E> {
    /// Hash the support in a variable-map independent way, so that equal
    /// polynomials in different (sorted) variable maps hash equally.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.nterms().hash(state);
        for t in self {
            t.coefficient.hash(state);
            for (v, e) in self.variables.iter().zip(t.exponents) {
                if !e.is_zero() {
                    v.hash(state);
                    e.hash(state);
                }
            }
        }
    }
}

impl<F: Ring, E: Exponent> Add for MultivariatePolynomial<F, E> {
    type Output = Self;

    fn add(mut self, mut other: Self) -> Self {
        debug_assert_eq!(self.field, other.field);
        self.unify_variables(&mut other);

        if self.is_zero() {
            return other;
        }

        if other.is_zero() {
            return self;
        }

        // merge the two polynomials, which are assumed to be sorted
        let mut new_coefficients = vec![self.field.zero(); self.nterms() + other.nterms()];
        let mut new_exponents: Vec<E> =
            vec![E::zero(); self.nvars() * (self.nterms() + other.nterms())];
        let mut new_nterms = 0;
        let mut i = 0;
        let mut j = 0;

        macro_rules! insert_monomial {
            ($source:expr, $index:expr) => {
                mem::swap(
                    &mut new_coefficients[new_nterms],
                    &mut $source.coefficients[$index],
                );
                new_exponents[new_nterms * $source.nvars()..(new_nterms + 1) * $source.nvars()]
                    .clone_from_slice($source.exponents($index));
                new_nterms += 1;
            };
        }

        while i < self.nterms() && j < other.nterms() {
            match self.exponents(i).cmp(other.exponents(j)) {
                Ordering::Less => {
                    insert_monomial!(self, i);
                    i += 1;
                }
                Ordering::Greater => {
                    insert_monomial!(other, j);
                    j += 1;
                }
                Ordering::Equal => {
                    let coeff = mem::replace(&mut other.coefficients[j], self.field.zero());
                    self.field
                        .add_assign(&mut self.coefficients[i], &coeff);

                    if !F::is_zero(&self.coefficients[i]) {
                        insert_monomial!(self, i);
                    }
                    i += 1;
                    j += 1;
                }
            }
        }

        while i < self.nterms() {
            insert_monomial!(self, i);
            i += 1;
        }

        while j < other.nterms() {
            insert_monomial!(other, j);
            j += 1;
        }

        new_coefficients.truncate(new_nterms);
        new_exponents.truncate(self.nvars() * new_nterms);

        Self {
            coefficients: new_coefficients,
            exponents: new_exponents,
            field: self.field,
            variables: self.variables,
        }
    }
}

impl<'a, F: Ring, E: Exponent> Add<&'a MultivariatePolynomial<F, E>>
    for &MultivariatePolynomial<F, E>
{
    type Output = MultivariatePolynomial<F, E>;

    fn add(self, other: &'a MultivariatePolynomial<F, E>) -> Self::Output {
        self.clone() + other.clone()
    }
}

impl<F: Ring, E: Exponent> Sub for MultivariatePolynomial<F, E> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.add(other.neg())
    }
}

impl<'a, F: Ring, E: Exponent> Sub<&'a MultivariatePolynomial<F, E>>
    for &MultivariatePolynomial<F, E>
{
    type Output = MultivariatePolynomial<F, E>;

    fn sub(self, other: &'a MultivariatePolynomial<F, E>) -> Self::Output {
        self.clone() + other.clone().neg()
    }
}

impl<F: Ring, E: Exponent> Neg for MultivariatePolynomial<F, E> {
    type Output = Self;

    fn neg(mut self) -> Self {
        // negate coefficients of all terms
        for c in &mut self.coefficients {
            *c = self.field.neg(c);
        }
        self
    }
}

impl<'a, F: Ring, E: Exponent> Mul<&'a MultivariatePolynomial<F, E>>
    for &MultivariatePolynomial<F, E>
{
    type Output = MultivariatePolynomial<F, E>;

    fn mul(self, rhs: &'a MultivariatePolynomial<F, E>) -> Self::Output {
        debug_assert_eq!(self.variables, rhs.variables);
        debug_assert_eq!(self.field, rhs.field);

        if self.is_zero() || rhs.is_zero() {
            return self.zero();
        }

        if rhs.nterms() == 1 {
            return self
                .clone()
                .mul_coeff(rhs.coefficients[0].clone())
                .mul_exp(rhs.exponents(0));
        }

        if self.nterms() == 1 {
            return rhs
                .clone()
                .mul_coeff(self.coefficients[0].clone())
                .mul_exp(self.exponents(0));
        }

        self.mul_sparse(rhs)
    }
}

impl<'a, F: Ring, E: Exponent> Mul<&'a MultivariatePolynomial<F, E>>
    for MultivariatePolynomial<F, E>
{
    type Output = MultivariatePolynomial<F, E>;

    #[inline]
    fn mul(self, rhs: &'a MultivariatePolynomial<F, E>) -> Self::Output {
        (&self) * rhs
    }
}

impl<F: Ring, E: Exponent> Mul for MultivariatePolynomial<F, E> {
    type Output = MultivariatePolynomial<F, E>;

    #[inline]
    fn mul(self, rhs: MultivariatePolynomial<F, E>) -> Self::Output {
        (&self) * (&rhs)
    }
}

impl<'a, F: EuclideanDomain, E: Exponent> Div<&'a MultivariatePolynomial<F, E>>
    for &MultivariatePolynomial<F, E>
{
    type Output = MultivariatePolynomial<F, E>;

    fn div(self, rhs: &'a MultivariatePolynomial<F, E>) -> Self::Output {
        let (q, r) = self.quot_rem(rhs, false);

        if !r.is_zero() {
            panic!("No exact division of {} by {}", self, rhs);
        }

        q
    }
}

impl<F: EuclideanDomain, E: Exponent> MultivariatePolynomial<F, E> {
    /// Get the content from the coefficients.
    pub fn content(&self) -> F::Element {
        let mut c = self.field.zero();
        for cc in &self.coefficients {
            if F::one_is_gcd_unit() && self.field.is_one(&c) {
                break;
            }

            c = self.field.gcd(&c, cc);
        }
        c
    }

    /// Divide every coefficient by `other`, which must be an exact division.
    pub fn div_coeff(mut self, other: &F::Element) -> Self {
        for c in &mut self.coefficients {
            let (quot, rem) = self.field.quot_rem(c, other);
            debug_assert!(F::is_zero(&rem));
            *c = quot;
        }
        self
    }

    /// Make the polynomial primitive by dividing out the content.
    pub fn make_primitive(self) -> Self {
        let c = self.content();
        self.div_coeff(&c)
    }

    /// Divide `self` by `div` when the division is exact, otherwise
    /// return `None`. Cheap divisibility tests are performed first.
    pub fn divides(&self, div: &Self) -> Option<Self> {
        if div.is_zero() {
            panic!("Cannot divide by 0 polynomial");
        }

        if self.is_zero() {
            return Some(self.clone());
        }

        // check if the leading coefficients divide
        if !F::is_zero(&self.field.rem(&self.lcoeff(), &div.lcoeff())) {
            return None;
        }

        if (0..self.nvars()).any(|v| self.degree(v) < div.degree(v)) {
            return None;
        }

        if self.field.characteristic().is_zero() {
            // test division of the constant term (evaluation at x_i = 0)
            let c = div.get_constant();
            if !F::is_zero(&c)
                && !self.field.is_one(&c)
                && !F::is_zero(&self.field.rem(&self.get_constant(), &c))
            {
                return None;
            }

            // test division at x_i = 1
            let mut num = self.field.zero();
            for c in &self.coefficients {
                self.field.add_assign(&mut num, c);
            }
            let mut den = self.field.zero();
            for c in &div.coefficients {
                self.field.add_assign(&mut den, c);
            }

            if !F::is_zero(&den)
                && !self.field.is_one(&den)
                && !F::is_zero(&self.field.rem(&num, &den))
            {
                return None;
            }
        }

        let (a, b) = self.quot_rem(div, true);
        if b.nterms() == 0 {
            Some(a)
        } else {
            None
        }
    }

    /// Compute the remainder `self % div`.
    pub fn rem(&self, div: &Self) -> Self {
        self.quot_rem(div, false).1
    }

    /// Divide two multivariate polynomials and return the quotient and
    /// remainder.
    pub fn quot_rem(&self, div: &Self, abort_on_remainder: bool) -> (Self, Self) {
        if div.is_zero() {
            panic!("Cannot divide by 0 polynomial");
        }

        if self.is_zero() {
            return (self.clone(), self.clone());
        }

        if div.is_one() {
            return (self.clone(), self.zero());
        }

        if self.nterms() == div.nterms() {
            if self == div {
                return (self.one(), self.zero());
            }

            // check if one is a multiple of the other
            let (q, r) = self.field.quot_rem(&self.lcoeff(), &div.lcoeff());

            if F::is_zero(&r)
                && self
                    .into_iter()
                    .zip(div)
                    .all(|(t1, t2)| t1.exponents == t2.exponents)
                && self
                    .into_iter()
                    .zip(div)
                    .all(|(t1, t2)| &self.field.mul(t2.coefficient, &q) == t1.coefficient)
            {
                return (self.constant(q), self.zero());
            }
        }

        if div.nterms() == 1 {
            let mut q = self.clone();
            let dive = div.to_monomial_view(0);

            let nvars = q.nvars();
            if nvars > 0 {
                for ee in q.exponents.chunks_mut(nvars) {
                    for (e1, e2) in ee.iter_mut().zip(dive.exponents) {
                        if *e1 >= *e2 {
                            *e1 = *e1 - *e2;
                        } else {
                            return (self.zero(), self.clone());
                        }
                    }
                }
            }

            for c in &mut q.coefficients {
                let (quot, rem) = q.field.quot_rem(c, dive.coefficient);
                *c = quot;
                if !F::is_zero(&rem) {
                    return (self.zero(), self.clone());
                }
            }

            return (q, self.zero());
        }

        // check if the division is univariate in the same variable with a
        // monic divisor
        let degree_sum: Vec<_> = (0..self.nvars())
            .map(|i| self.degree(i).to_u32() as usize + div.degree(i).to_u32() as usize)
            .collect();

        if div.field.is_one(&div.lcoeff()) && degree_sum.iter().filter(|x| **x > 0).count() == 1 {
            return self.quot_rem_univariate_monic(div);
        }

        self.long_division(div, abort_on_remainder)
    }

    /// Classical sparse long division: repeatedly divide the leading
    /// monomial of the dividend, moving underivable leading terms into the
    /// remainder.
    fn long_division(&self, div: &Self, abort_on_remainder: bool) -> (Self, Self) {
        let mut q = self.zero();
        let mut r = self.zero();
        let mut rem = self.clone();

        let div_le = div.last_exponents().to_vec();
        let div_lc = div.lcoeff();
        let mut exp = vec![E::zero(); self.nvars()];

        while !rem.is_zero() {
            let le = rem.last_exponents();

            if le.iter().zip(&div_le).all(|(a, b)| a >= b) {
                let (quot, crem) = self.field.quot_rem(&rem.lcoeff(), &div_lc);

                if F::is_zero(&crem) {
                    for ((e, a), b) in exp.iter_mut().zip(le).zip(&div_le) {
                        *e = *a - *b;
                    }

                    let t = div.clone().mul_coeff(quot.clone()).mul_exp(&exp);

                    // quotient leading monomials strictly decrease
                    q.coefficients.push(quot);
                    q.exponents.extend_from_slice(&exp);

                    rem = rem - t;
                    continue;
                }
            }

            if abort_on_remainder {
                return (self.zero(), self.one());
            }

            // move the leading term into the remainder
            let nvars = rem.nvars();
            let c = rem.coefficients.pop().unwrap();
            let start = rem.exponents.len() - nvars;
            r.coefficients.push(c);
            r.exponents.extend_from_slice(&rem.exponents[start..]);
            rem.exponents.truncate(start);
        }

        q.reverse();
        r.reverse();

        (q, r)
    }

    /// Division of a univariate polynomial by a monic univariate divisor in
    /// the same variable, working from the back.
    pub fn quot_rem_univariate_monic(&self, div: &Self) -> (Self, Self) {
        debug_assert_eq!(div.lcoeff(), self.field.one());
        if self.is_zero() {
            return (self.clone(), self.clone());
        }

        let mut dividendpos = self.nterms() - 1; // work from the back

        let mut q = self.zero_with_capacity(self.nterms());
        let mut r = self.zero();

        // determine the variable
        let mut var = 0;
        for (i, x) in self.last_exponents().iter().enumerate() {
            if !x.is_zero() {
                var = i;
                break;
            }
        }

        let m = div.ldegree_max();
        let mut pow = self.ldegree_max();

        loop {
            // find the power in the dividend if it exists
            let mut coeff = loop {
                if self.exponents(dividendpos)[var] == pow {
                    break self.coefficients[dividendpos].clone();
                }
                if dividendpos == 0 || self.exponents(dividendpos)[var] < pow {
                    break self.field.zero();
                }
                dividendpos -= 1;
            };

            let mut qindex = 0; // starting from highest
            let mut bindex = 0; // starting from lowest
            while bindex < div.nterms() && qindex < q.nterms() {
                while bindex + 1 < div.nterms()
                    && div.exponents(bindex)[var] + q.exponents(qindex)[var] < pow
                {
                    bindex += 1;
                }

                if div.exponents(bindex)[var] + q.exponents(qindex)[var] == pow {
                    self.field.sub_mul_assign(
                        &mut coeff,
                        &div.coefficients[bindex],
                        &q.coefficients[qindex],
                    );
                }

                qindex += 1;
            }

            if !F::is_zero(&coeff) {
                // can the division be performed? if not, add to the rest
                if pow >= m {
                    let nterms = q.nterms();
                    let nvars = q.nvars();
                    q.coefficients.push(coeff);
                    q.exponents.resize((nterms + 1) * nvars, E::zero());
                    q.exponents[nterms * nvars + var] = pow - m;
                } else {
                    let nterms = r.nterms();
                    let nvars = r.nvars();
                    r.coefficients.push(coeff);
                    r.exponents.resize((nterms + 1) * nvars, E::zero());
                    r.exponents[nterms * nvars + var] = pow;
                }
            }

            if pow.is_zero() {
                break;
            }

            pow = pow - E::one();
        }

        q.reverse();
        r.reverse();

        #[cfg(debug_assertions)]
        {
            if !(&q * div + r.clone() - self.clone()).is_zero() {
                panic!("Division failed: ({})/({}): q={}, r={}", self, div, q, r);
            }
        }

        (q, r)
    }
}

impl<F: Field, E: Exponent> MultivariatePolynomial<F, E> {
    /// Make the polynomial monic, i.e., make the leading coefficient `1` by
    /// multiplying all monomials with `1/lcoeff`.
    pub fn make_monic(self) -> Self {
        if !self.field.is_one(&self.lcoeff()) {
            let ci = self.field.inv(&self.lcoeff());
            self.mul_coeff(ci)
        } else {
            self
        }
    }

    /// Optimized division routine for univariate polynomials over a field,
    /// which makes the divisor monic first.
    pub fn quot_rem_univariate(&self, div: &mut Self) -> (Self, Self) {
        if self.is_zero() {
            return (self.clone(), self.clone());
        }

        if div.nterms() == 1 {
            // calculate the inverse once
            let inv = self.field.inv(&div.coefficients[0]);

            if div.is_constant() {
                let mut q = self.clone();
                for c in &mut q.coefficients {
                    self.field.mul_assign(c, &inv);
                }

                return (q, self.zero());
            }

            let mut q = self.zero_with_capacity(self.nterms());
            let mut r = self.zero();
            let dive = div.exponents(0);

            for m in self.into_iter() {
                if m.exponents.iter().zip(dive).all(|(a, b)| a >= b) {
                    q.coefficients.push(self.field.mul(m.coefficient, &inv));

                    for (ee, ed) in m.exponents.iter().zip(dive) {
                        q.exponents.push(*ee - *ed);
                    }
                } else {
                    r.coefficients.push(m.coefficient.clone());
                    r.exponents.extend(m.exponents);
                }
            }
            return (q, r);
        }

        // normalize the lcoeff to 1 to prevent a costly inversion
        if !self.field.is_one(&div.lcoeff()) {
            let o = div.lcoeff();
            let inv = self.field.inv(&div.lcoeff());

            for c in &mut div.coefficients {
                self.field.mul_assign(c, &inv);
            }

            let mut res = self.quot_rem_univariate_monic(div);

            for c in &mut res.0.coefficients {
                self.field.mul_assign(c, &inv);
            }

            for c in &mut div.coefficients {
                self.field.mul_assign(c, &o);
            }

            return res;
        }

        self.quot_rem_univariate_monic(div)
    }

    /// Compute `self^n % m` where `m` is a univariate polynomial.
    pub fn exp_mod_univariate(&self, mut n: Integer, m: &mut Self) -> Self {
        if n.is_zero() {
            return self.one();
        }

        let two = Integer::Natural(2);

        // use binary exponentiation and mod at every stage
        let mut x = self.quot_rem_univariate(m).1;
        let mut y = self.one();
        while !n.is_one() {
            if n.is_odd() {
                y = (&y * &x).quot_rem_univariate(m).1;
                n -= &Integer::one();
            }

            x = (&x * &x).quot_rem_univariate(m).1;
            n = n.quot_rem(&two).0;
        }

        (x * &y).quot_rem_univariate(m).1
    }

    /// Compute `(g, s, t)` where `self * s + other * t = g`
    /// by means of the extended Euclidean algorithm.
    ///
    /// The input must be univariate polynomials, the gcd is monic.
    pub fn eea_univariate(&self, other: &Self) -> (Self, Self, Self) {
        let mut r0 = self.clone().make_monic();
        let mut r1 = other.clone().make_monic();
        let mut s0 = self.constant(self.field.inv(&self.lcoeff()));
        let mut s1 = self.zero();
        let mut t0 = self.zero();
        let mut t1 = self.constant(self.field.inv(&other.lcoeff()));

        while !r1.is_zero() {
            let (q, r) = r0.quot_rem_univariate(&mut r1);
            if F::is_zero(&r.lcoeff()) {
                return (r1, s1, t1);
            }

            let a = self.field.inv(&r.lcoeff());
            (r1, r0) = (r.mul_coeff(a.clone()), r1);
            (s1, s0) = ((s0 - &q * &s1).mul_coeff(a.clone()), s1);
            (t1, t0) = ((t0 - q * &t1).mul_coeff(a), t1);
        }

        (r0, s0, t0)
    }
}

impl<E: Exponent> MultivariatePolynomial<IntegerRing, E> {
    /// Map the coefficients to a finite field.
    pub fn to_finite_field(&self, field: &Zp) -> MultivariatePolynomial<Zp, E> {
        self.map_coeff(|c| c.to_finite_field(field), *field)
    }
}

/// View of a term in a multivariate polynomial.
#[derive(Copy, Clone, Debug)]
pub struct MonomialView<'a, F: 'a + Ring, E: 'a + Exponent> {
    pub coefficient: &'a F::Element,
    pub exponents: &'a [E],
}

/// Iterator over terms in a multivariate polynomial.
pub struct MonomialViewIterator<'a, F: Ring, E: Exponent> {
    poly: &'a MultivariatePolynomial<F, E>,
    index: usize,
}

impl<'a, F: Ring, E: Exponent> Iterator for MonomialViewIterator<'a, F, E> {
    type Item = MonomialView<'a, F, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index == self.poly.nterms() {
            None
        } else {
            let view = MonomialView {
                coefficient: &self.poly.coefficients[self.index],
                exponents: self.poly.exponents(self.index),
            };
            self.index += 1;
            Some(view)
        }
    }
}

impl<'a, F: Ring, E: Exponent> IntoIterator for &'a MultivariatePolynomial<F, E> {
    type Item = MonomialView<'a, F, E>;
    type IntoIter = MonomialViewIterator<'a, F, E>;

    fn into_iter(self) -> Self::IntoIter {
        MonomialViewIterator {
            poly: self,
            index: 0,
        }
    }
}
