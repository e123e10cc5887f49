//! The public polynomial type: an immutable, shareable handle around the
//! raw engine.
//!
//! A [`Polynomial`] is an `Arc` around the canonical representation, so
//! clones and the values returned by queries are cheap. Small integer
//! constants are drawn from a process-wide cache; the factor list is
//! computed once per value and memoized inside the handle.

use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;
use std::sync::{Arc, Mutex, OnceLock};

use ahash::{HashMap, HashMapExt};

use crate::domains::integer::{Integer, IntegerRing, Z};
use crate::error::{Error, Result};
use crate::parser;
use crate::poly::factor::Factorize;
use crate::poly::Exponent;
use crate::poly::polynomial::MultivariatePolynomial;
use crate::printer::PolynomialPrinter;
use crate::var::{Variable, VariableSet};

type Raw = MultivariatePolynomial<IntegerRing, u16>;

/// Entries kept in the small-constant cache before it is wiped.
const CACHE_CAPACITY: usize = 1024;

struct PolyData {
    raw: Raw,
    factors: OnceLock<Vec<Polynomial>>,
}

/// A multivariate polynomial over the integers.
///
/// Values are immutable and cheap to clone. Two polynomials are equal when
/// they have the same terms over their used variables, regardless of how
/// either was constructed.
#[derive(Clone)]
pub struct Polynomial {
    data: Arc<PolyData>,
}

fn empty_basis_raw() -> Raw {
    MultivariatePolynomial::new(&Z, Some(1), Arc::new(Vec::new()))
}

fn zero_instance() -> &'static Polynomial {
    static ZERO: OnceLock<Polynomial> = OnceLock::new();
    ZERO.get_or_init(|| Polynomial::wrap(empty_basis_raw()))
}

fn one_instance() -> &'static Polynomial {
    static ONE: OnceLock<Polynomial> = OnceLock::new();
    ONE.get_or_init(|| Polynomial::wrap(empty_basis_raw().one()))
}

fn minus_one_instance() -> &'static Polynomial {
    static MINUS_ONE: OnceLock<Polynomial> = OnceLock::new();
    MINUS_ONE.get_or_init(|| Polynomial::wrap(empty_basis_raw().constant(Integer::Natural(-1))))
}

/// A small-integer constant, served from the cache.
fn small_constant(n: i64) -> Polynomial {
    static CACHE: OnceLock<Mutex<HashMap<i64, Polynomial>>> = OnceLock::new();

    match n {
        0 => return zero_instance().clone(),
        1 => return one_instance().clone(),
        -1 => return minus_one_instance().clone(),
        _ => {}
    }

    let mut cache = CACHE
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .unwrap();

    if let Some(p) = cache.get(&n) {
        return p.clone();
    }

    let p = Polynomial::wrap(empty_basis_raw().constant(Integer::Natural(n)));

    if cache.len() >= CACHE_CAPACITY {
        cache.clear();
    }
    cache.insert(n, p.clone());

    p
}

impl Polynomial {
    /// The zero polynomial.
    pub fn zero() -> Polynomial {
        zero_instance().clone()
    }

    /// The unit polynomial.
    pub fn one() -> Polynomial {
        one_instance().clone()
    }

    /// Parse an infix expression with `+ - * ^ ( )`, integer literals and
    /// variable names. The variable basis is exactly the set of names that
    /// occur in the input.
    pub fn parse(input: &str) -> Result<Polynomial> {
        Ok(Polynomial::from_raw(parser::parse_polynomial(
            input,
            "polynomial",
        )?))
    }

    /// Parse over an explicitly given basis, which must contain every
    /// variable the input uses.
    pub fn parse_with_variables(input: &str, variables: &VariableSet) -> Result<Polynomial> {
        let raw = parser::parse_polynomial(input, "polynomial")?;
        raw.to_variables(variables.as_arc().clone())
            .map(Polynomial::wrap)
            .ok_or(Error::InvalidVariableSet)
    }

    fn wrap(raw: Raw) -> Polynomial {
        Polynomial {
            data: Arc::new(PolyData {
                raw,
                factors: OnceLock::new(),
            }),
        }
    }

    /// Wrap a raw polynomial, restoring the name-sorted variable basis that
    /// in-place unification may have disturbed.
    pub(crate) fn from_raw(raw: Raw) -> Polynomial {
        if raw.get_vars_ref().windows(2).all(|w| w[0] < w[1]) {
            return Polynomial::wrap(raw);
        }

        let mut vars = raw.get_vars_ref().to_vec();
        vars.sort();
        vars.dedup();

        // the sorted basis covers every used variable
        let sorted = raw.to_variables(Arc::new(vars)).unwrap();
        Polynomial::wrap(sorted)
    }

    pub(crate) fn raw(&self) -> &Raw {
        &self.data.raw
    }

    /// Both operands over the union of their variable bases.
    fn unified(&self, other: &Polynomial) -> (Raw, Raw) {
        let mut a = self.data.raw.clone();
        let mut b = other.data.raw.clone();
        a.unify_variables(&mut b);
        (a, b)
    }

    pub fn is_zero(&self) -> bool {
        self.data.raw.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.data.raw.is_one()
    }

    pub fn is_minus_one(&self) -> bool {
        self.data.raw.is_constant() && self.data.raw.lcoeff() == Integer::Natural(-1)
    }

    /// Whether the polynomial is an integer constant (including zero).
    pub fn is_integer(&self) -> bool {
        self.data.raw.is_constant()
    }

    /// Whether the polynomial has at most one term.
    pub fn is_monomial(&self) -> bool {
        self.data.raw.nterms() <= 1
    }

    /// Whether the polynomial is a single term with a unit coefficient.
    pub fn is_monic(&self) -> bool {
        self.data.raw.nterms() == 1 && self.data.raw.lcoeff().is_one()
    }

    /// Whether the polynomial is a bare variable.
    pub fn is_variable(&self) -> bool {
        self.is_monic()
            && self
                .data
                .raw
                .last_exponents()
                .iter()
                .map(|e| e.to_u32())
                .sum::<u32>()
                == 1
    }

    /// The value as an integer, if the polynomial is constant.
    pub fn as_integer(&self) -> Result<Integer> {
        if self.data.raw.is_constant() {
            Ok(self.data.raw.get_constant())
        } else {
            Err(Error::InvalidArgumentValue("not an integer"))
        }
    }

    /// The value as a variable, if the polynomial is a bare variable.
    pub fn as_variable(&self) -> Result<Variable> {
        if !self.is_variable() {
            return Err(Error::InvalidArgumentValue("not a variable"));
        }

        let raw = &self.data.raw;
        let pos = raw
            .last_exponents()
            .iter()
            .position(|e| !e.is_zero())
            .unwrap(); // is_variable guarantees one

        Ok(raw.get_vars_ref()[pos].clone())
    }

    /// The sign of the leading coefficient; 0 for the zero polynomial.
    pub fn signum(&self) -> i32 {
        if self.is_zero() {
            0
        } else if self.data.raw.lcoeff().is_negative() {
            -1
        } else {
            1
        }
    }

    /// The declared variable basis.
    pub fn variables(&self) -> VariableSet {
        VariableSet::from_arc(self.data.raw.variables.clone())
    }

    /// The variables that actually occur with a nonzero exponent.
    pub fn min_variables(&self) -> VariableSet {
        let raw = &self.data.raw;
        raw.get_vars_ref()
            .iter()
            .enumerate()
            .filter(|(i, _)| raw.degree(*i) > 0)
            .map(|(_, v)| v.clone())
            .collect()
    }

    /// The number of terms.
    pub fn nterms(&self) -> usize {
        self.data.raw.nterms()
    }

    /// Iterate over the terms as monomial polynomials, in canonical order.
    pub fn terms(&self) -> impl Iterator<Item = Polynomial> + '_ {
        let raw = &self.data.raw;
        (0..raw.nterms()).map(move |i| {
            let e = raw.exponents(i).to_vec();
            Polynomial::wrap(raw.monomial(raw.coefficients[i].clone(), e))
        })
    }

    /// The total degree: the maximal exponent sum over all terms.
    pub fn degree(&self) -> u32 {
        self.data
            .raw
            .exponents_iter()
            .map(|e| e.iter().map(|x| x.to_u32()).sum())
            .max()
            .unwrap_or(0)
    }

    /// The maximal exponent sum restricted to the given variables.
    pub fn degree_in(&self, variables: &VariableSet) -> u32 {
        let raw = &self.data.raw;
        let columns: Vec<_> = raw
            .get_vars_ref()
            .iter()
            .enumerate()
            .filter(|(_, v)| variables.contains(v))
            .map(|(i, _)| i)
            .collect();

        if raw.is_zero() || columns.is_empty() {
            return 0;
        }

        raw.exponents_iter()
            .map(|e| columns.iter().map(|i| e[*i].to_u32()).sum())
            .max()
            .unwrap_or(0)
    }

    /// The coefficient of `var^n`, as a polynomial in the remaining
    /// variables.
    pub fn coeff(&self, var: &Variable, n: u32) -> Polynomial {
        let raw = &self.data.raw;
        let Ok(idx) = raw.get_vars_ref().binary_search(var) else {
            return if n == 0 {
                self.clone()
            } else {
                Polynomial::zero()
            };
        };

        let mut res = raw.zero();
        let mut e = vec![0u16; raw.nvars()];
        for t in raw {
            if t.exponents[idx].to_u32() == n {
                e.copy_from_slice(t.exponents);
                e[idx] = 0;
                res.append_monomial(t.coefficient.clone(), &e);
            }
        }

        Polynomial::from_raw(res)
    }

    /// The coefficient of the monomial `vars[0]^exps[0] * ...`, as a
    /// polynomial in the remaining variables.
    pub fn coeff_of(&self, variables: &[Variable], exponents: &[u32]) -> Result<Polynomial> {
        if variables.len() != exponents.len() {
            return Err(Error::InvalidArgumentValue(
                "variables and exponents have different sizes",
            ));
        }

        let raw = &self.data.raw;
        let mut selection = Vec::with_capacity(variables.len());
        for (v, n) in variables.iter().zip(exponents) {
            match raw.get_vars_ref().binary_search(v) {
                Ok(idx) => selection.push((idx, *n)),
                Err(_) if *n == 0 => {}
                Err(_) => return Ok(Polynomial::zero()),
            }
        }

        let mut res = raw.zero();
        let mut e = vec![0u16; raw.nvars()];
        for t in raw {
            if selection.iter().all(|(i, n)| t.exponents[*i].to_u32() == *n) {
                e.copy_from_slice(t.exponents);
                for (i, _) in &selection {
                    e[*i] = 0;
                }
                res.append_monomial(t.coefficient.clone(), &e);
            }
        }

        Ok(Polynomial::from_raw(res))
    }

    /// Decompose into a map from exponent tuples over `variables` to the
    /// polynomial coefficient of that monomial.
    pub fn coeff_dict(&self, variables: &[Variable]) -> HashMap<Vec<u32>, Polynomial> {
        let raw = &self.data.raw;
        let indices: Vec<_> = variables
            .iter()
            .map(|v| raw.get_vars_ref().binary_search(v).ok())
            .collect();

        let mut parts: HashMap<Vec<u32>, Raw> = HashMap::new();
        let mut e = vec![0u16; raw.nvars()];
        for t in raw {
            let key: Vec<u32> = indices
                .iter()
                .map(|i| i.map(|i| t.exponents[i].to_u32()).unwrap_or(0))
                .collect();

            e.copy_from_slice(t.exponents);
            for i in indices.iter().flatten() {
                e[*i] = 0;
            }

            parts
                .entry(key)
                .or_insert_with(|| raw.zero())
                .append_monomial(t.coefficient.clone(), &e);
        }

        parts
            .into_iter()
            .map(|(k, v)| (k, Polynomial::from_raw(v)))
            .collect()
    }

    /// Re-express over another basis, which must contain every used
    /// variable.
    pub fn translate(&self, variables: &VariableSet) -> Result<Polynomial> {
        self.data
            .raw
            .to_variables(variables.as_arc().clone())
            .map(Polynomial::wrap)
            .ok_or(Error::InvalidVariableSet)
    }

    /// Evaluate a variable at an integer. Evaluating a variable that does
    /// not occur is the identity.
    pub fn evaluate(&self, var: &Variable, value: impl Into<Integer>) -> Polynomial {
        let raw = &self.data.raw;
        match raw.get_vars_ref().binary_search(var) {
            Ok(idx) => Polynomial::wrap(raw.replace(idx, &value.into())),
            Err(_) => self.clone(),
        }
    }

    /// Evaluate several variables at once.
    pub fn evaluate_many(&self, variables: &[Variable], values: &[Integer]) -> Result<Polynomial> {
        if variables.len() != values.len() {
            return Err(Error::InvalidArgumentValue(
                "variables and values have different sizes",
            ));
        }

        let mut res = self.clone();
        for (v, value) in variables.iter().zip(values) {
            res = res.evaluate(v, value.clone());
        }
        Ok(res)
    }

    /// Set the given variables to zero.
    pub fn evaluate_at_zero(&self, variables: &VariableSet) -> Polynomial {
        let mut res = self.clone();
        for v in variables {
            res = res.evaluate(v, 0i64);
        }
        res
    }

    /// Set the given variables to one.
    pub fn evaluate_at_one(&self, variables: &VariableSet) -> Polynomial {
        let mut res = self.clone();
        for v in variables {
            res = res.evaluate(v, 1i64);
        }
        res
    }

    /// Shift a variable: `x -> x + amount`.
    pub fn shift(&self, var: &Variable, amount: impl Into<Integer>) -> Polynomial {
        let raw = &self.data.raw;
        match raw.get_vars_ref().binary_search(var) {
            Ok(idx) => Polynomial::wrap(raw.shift_var(idx, &amount.into())),
            Err(_) => self.clone(),
        }
    }

    /// Shift several variables at once.
    pub fn shift_many(&self, variables: &[Variable], amounts: &[Integer]) -> Result<Polynomial> {
        if variables.len() != amounts.len() {
            return Err(Error::InvalidArgumentValue(
                "variables and values have different sizes",
            ));
        }

        let mut res = self.clone();
        for (v, amount) in variables.iter().zip(amounts) {
            res = res.shift(v, amount.clone());
        }
        Ok(res)
    }

    /// Substitute a monomial: every maximal power of `lhs` in a term is
    /// replaced by that power of `rhs`. The left-hand side must be a
    /// nonconstant monomial with a unit coefficient.
    pub fn subs(&self, lhs: &Polynomial, rhs: &Polynomial) -> Result<Polynomial> {
        let mut a = self.data.raw.clone();
        let mut l = lhs.data.raw.clone();
        a.unify_variables(&mut l);
        let mut r = rhs.data.raw.clone();
        a.unify_variables(&mut r);
        l.unify_variables(&mut r);

        if l.is_constant() || l.nterms() != 1 || !l.lcoeff().is_one() {
            return Err(Error::InvalidArgumentValue("invalid lhs for substitution"));
        }

        let pattern = l.last_exponents().to_vec();

        let mut result = a.zero();
        let mut powers: HashMap<u32, Raw> = HashMap::new();
        let mut e = vec![0u16; a.nvars()];

        for t in &a {
            let mut k = u32::MAX;
            for (ei, li) in t.exponents.iter().zip(&pattern) {
                if *li > 0 {
                    k = k.min(ei.to_u32() / li.to_u32());
                }
            }

            for ((res, ei), li) in e.iter_mut().zip(t.exponents).zip(&pattern) {
                *res = ei - (k as u16) * li;
            }

            let monomial = a.monomial(t.coefficient.clone(), e.clone());
            if k == 0 {
                result = result + monomial;
            } else {
                let rp = powers.entry(k).or_insert_with(|| r.pow(k as usize));
                result = result + monomial * &*rp;
            }
        }

        Ok(Polynomial::from_raw(result))
    }

    /// The partial derivative with respect to `var`.
    pub fn diff(&self, var: &Variable) -> Polynomial {
        let raw = &self.data.raw;
        match raw.get_vars_ref().binary_search(var) {
            Ok(idx) => Polynomial::wrap(raw.derivative(idx)),
            Err(_) => Polynomial::zero(),
        }
    }

    /// The `n`-th partial derivative; `n == 0` is the identity.
    pub fn diff_n(&self, var: &Variable, n: u32) -> Polynomial {
        let mut res = self.clone();
        for _ in 0..n {
            if res.is_zero() {
                break;
            }
            res = res.diff(var);
        }
        res
    }

    /// Binary exponentiation; `p^0 == 1`, including `0^0`.
    pub fn pow(&self, n: u32) -> Polynomial {
        Polynomial::wrap(self.data.raw.pow(n as usize))
    }

    /// Exact division.
    pub fn divide_exact(&self, other: &Polynomial) -> Result<Polynomial> {
        if other.is_zero() {
            return Err(Error::DivisionByZero);
        }

        let (a, b) = self.unified(other);
        a.divides(&b)
            .map(Polynomial::from_raw)
            .ok_or(Error::NotDivisible)
    }

    /// The greatest common divisor, with a positive leading coefficient.
    pub fn gcd(&self, other: &Polynomial) -> Polynomial {
        let (a, b) = self.unified(other);
        Polynomial::from_raw(Raw::gcd(&a, &b))
    }

    /// The least common multiple.
    pub fn lcm(&self, other: &Polynomial) -> Polynomial {
        let (a, b) = self.unified(other);
        Polynomial::from_raw(a.lcm(&b))
    }

    /// The irreducible factors, with multiplicity expanded. The first
    /// factor carries the integer content and the sign; the product of the
    /// list reconstructs the polynomial. The list is computed once and
    /// memoized.
    pub fn factors(&self) -> &[Polynomial] {
        self.data.factors.get_or_init(|| {
            if self.is_zero() {
                return vec![self.clone()];
            }

            let mut factors = Vec::new();
            for (f, pow) in self.data.raw.factor() {
                for _ in 0..pow {
                    factors.push(Polynomial::from_raw(f.clone()));
                }
            }
            factors
        })
    }
}

/// The sum of all polynomials in the iterator; 0 when empty.
pub fn sum_all<'a, I: IntoIterator<Item = &'a Polynomial>>(polynomials: I) -> Polynomial {
    polynomials
        .into_iter()
        .fold(Polynomial::zero(), |acc, p| &acc + p)
}

/// The product of all polynomials in the iterator; 1 when empty.
pub fn product_all<'a, I: IntoIterator<Item = &'a Polynomial>>(polynomials: I) -> Polynomial {
    polynomials
        .into_iter()
        .fold(Polynomial::one(), |acc, p| &acc * p)
}

/// The gcd of all polynomials in the iterator; 0 when empty.
pub fn gcd_all<'a, I: IntoIterator<Item = &'a Polynomial>>(polynomials: I) -> Polynomial {
    polynomials
        .into_iter()
        .fold(Polynomial::zero(), |acc, p| acc.gcd(p))
}

/// The lcm of all polynomials in the iterator; at least one is required.
pub fn lcm_all<'a, I: IntoIterator<Item = &'a Polynomial>>(polynomials: I) -> Result<Polynomial> {
    let mut it = polynomials.into_iter();
    let first = it
        .next()
        .ok_or(Error::InvalidArgumentValue("lcm with no arguments"))?;

    Ok(it.fold(first.clone(), |acc, p| acc.lcm(p)))
}

impl Default for Polynomial {
    fn default() -> Polynomial {
        Polynomial::zero()
    }
}

impl PartialEq for Polynomial {
    fn eq(&self, other: &Polynomial) -> bool {
        Arc::ptr_eq(&self.data, &other.data) || self.data.raw == other.data.raw
    }
}

impl Eq for Polynomial {}

impl Hash for Polynomial {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.raw.hash(state)
    }
}

impl Display for Polynomial {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        PolynomialPrinter::new(&self.data.raw).fmt(f)
    }
}

impl fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for Polynomial {
    type Err = Error;

    fn from_str(s: &str) -> Result<Polynomial> {
        Polynomial::parse(s)
    }
}

impl From<i64> for Polynomial {
    fn from(n: i64) -> Polynomial {
        small_constant(n)
    }
}

impl From<i32> for Polynomial {
    fn from(n: i32) -> Polynomial {
        small_constant(n as i64)
    }
}

impl From<Integer> for Polynomial {
    fn from(n: Integer) -> Polynomial {
        match n {
            Integer::Natural(v) => small_constant(v),
            large => Polynomial::wrap(empty_basis_raw().constant(large)),
        }
    }
}

impl From<&Variable> for Polynomial {
    fn from(v: &Variable) -> Polynomial {
        let raw = MultivariatePolynomial::new(&Z, Some(1), Arc::new(vec![v.clone()]));
        let raw = raw.monomial(Integer::one(), vec![1]);
        Polynomial::wrap(raw)
    }
}

impl From<Variable> for Polynomial {
    fn from(v: Variable) -> Polynomial {
        Polynomial::from(&v)
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        let (a, b) = self.unified(rhs);
        Polynomial::from_raw(a + b)
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Polynomial {
        let (a, b) = self.unified(rhs);
        Polynomial::from_raw(a - b)
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        let (a, b) = self.unified(rhs);
        Polynomial::from_raw(&a * &b)
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        Polynomial::wrap(-self.data.raw.clone())
    }
}

macro_rules! forward_binop {
    ($op:ident, $method:ident) => {
        impl $op<Polynomial> for Polynomial {
            type Output = Polynomial;

            fn $method(self, rhs: Polynomial) -> Polynomial {
                (&self).$method(&rhs)
            }
        }

        impl $op<&Polynomial> for Polynomial {
            type Output = Polynomial;

            fn $method(self, rhs: &Polynomial) -> Polynomial {
                (&self).$method(rhs)
            }
        }

        impl $op<Polynomial> for &Polynomial {
            type Output = Polynomial;

            fn $method(self, rhs: Polynomial) -> Polynomial {
                self.$method(&rhs)
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        -&self
    }
}

#[cfg(test)]
mod test {
    use crate::var::{Variable, VariableSet};

    use super::{gcd_all, lcm_all, product_all, sum_all, Polynomial};

    fn p(s: &str) -> Polynomial {
        Polynomial::parse(s).unwrap()
    }

    fn var(s: &str) -> Variable {
        Variable::new(s).unwrap()
    }

    #[test]
    fn construction_and_equality() {
        assert_eq!(Polynomial::from(0i64), Polynomial::zero());
        assert_eq!(Polynomial::from(2i64) + Polynomial::from(-2i64), p("0"));
        assert_eq!(Polynomial::from(&var("x")), p("x"));
        assert_eq!(p("(1+x)^2"), p("1 + 2*x + x^2"));

        // equality across different declared bases
        let a = Polynomial::parse_with_variables(
            "x+1",
            &["x", "y"].iter().map(|n| var(n)).collect::<VariableSet>(),
        )
        .unwrap();
        assert_eq!(a, p("x+1"));
    }

    #[test]
    fn predicates() {
        assert!(p("0").is_zero());
        assert!(p("1").is_one());
        assert!(p("-1").is_minus_one());
        assert!(p("7").is_integer());
        assert!(p("3*x*y^2").is_monomial());
        assert!(p("x*y").is_monic());
        assert!(p("x").is_variable());
        assert!(!p("2*x").is_variable());
        assert!(!p("1+x").is_monomial());

        assert_eq!(p("x").as_variable().unwrap(), var("x"));
        assert!(p("x+1").as_integer().is_err());
        assert_eq!(p("-42").as_integer().unwrap(), (-42i64).into());

        assert_eq!(p("-x+1").signum(), -1);
        assert_eq!(p("0").signum(), 0);
    }

    #[test]
    fn degrees() {
        let q = p("1 + x*y + x*y*z^2");
        assert_eq!(q.degree(), 4);
        assert_eq!(q.degree_in(&[var("z")].into_iter().collect()), 2);
        assert_eq!(q.degree_in(&VariableSet::new()), 0);
        assert_eq!(p("0").degree(), 0);
    }

    #[test]
    fn variable_sets() {
        let q = Polynomial::parse_with_variables(
            "x^2+1",
            &["x", "y"].iter().map(|n| var(n)).collect::<VariableSet>(),
        )
        .unwrap();

        assert_eq!(q.variables().to_string(), "{x, y}");
        assert_eq!(q.min_variables().to_string(), "{x}");

        // dropping a used variable is an error
        let small: VariableSet = [var("y")].into_iter().collect();
        assert!(q.translate(&small).is_err());

        // dropping an unused one is fine
        let back: VariableSet = [var("x")].into_iter().collect();
        assert_eq!(q.translate(&back).unwrap(), p("x^2+1"));
    }

    #[test]
    fn coefficients() {
        let q = p("3 + 2*x*y + x^2 + 5*x^2*y^3");
        assert_eq!(q.coeff(&var("x"), 2), p("1 + 5*y^3"));
        assert_eq!(q.coeff(&var("x"), 0), p("3"));
        assert_eq!(
            q.coeff_of(&[var("x"), var("y")], &[2, 3]).unwrap(),
            p("5")
        );
        assert_eq!(
            q.coeff_of(&[var("x")], &[1, 2]).unwrap_err().to_string(),
            "variables and exponents have different sizes"
        );

        let dict = q.coeff_dict(&[var("x")]);
        assert_eq!(dict.len(), 3);
        assert_eq!(dict[&vec![1]], p("2*y"));
    }

    #[test]
    fn terms_iteration() {
        let q = p("1 - x + 3*x*y");
        let terms: Vec<_> = q.terms().collect();
        assert_eq!(terms.len(), 3);
        assert_eq!(sum_all(&terms), q);
        assert_eq!(terms[0], p("1"));
    }

    #[test]
    fn evaluation_and_shifts() {
        let q = p("x^2*y + 3");
        assert_eq!(q.evaluate(&var("x"), 2), p("4*y+3"));
        assert_eq!(q.evaluate(&var("z"), 5), q);
        assert_eq!(
            q.evaluate_many(&[var("x"), var("y")], &[2i64.into(), 1i64.into()])
                .unwrap(),
            p("7")
        );
        assert!(q.evaluate_many(&[var("x")], &[]).is_err());

        let vs: VariableSet = [var("x"), var("y")].into_iter().collect();
        assert_eq!(q.evaluate_at_zero(&vs), p("3"));
        assert_eq!(q.evaluate_at_one(&vs), p("4"));

        assert_eq!(p("x^2").shift(&var("x"), 1), p("1 + 2*x + x^2"));
    }

    #[test]
    fn substitution() {
        let q = p("x^4*y^2 + x");
        // x^2 -> z
        let r = q.subs(&p("x^2"), &p("z")).unwrap();
        assert_eq!(r, p("z^2*y^2 + x"));

        assert!(q.subs(&p("2*x"), &p("z")).is_err());
        assert!(q.subs(&p("1"), &p("z")).is_err());
        assert_eq!(
            q.subs(&p("x+1"), &p("z")).unwrap_err().to_string(),
            "invalid lhs for substitution"
        );
    }

    #[test]
    fn calculus() {
        let q = p("x^3 + x*y");
        assert_eq!(q.diff(&var("x")), p("3*x^2 + y"));
        assert_eq!(q.diff_n(&var("x"), 2), p("6*x"));
        assert_eq!(q.diff(&var("z")), p("0"));
        assert_eq!(q.diff_n(&var("x"), 0), q);
    }

    #[test]
    fn division() {
        let q = p("x^2 - 1");
        assert_eq!(q.divide_exact(&p("x+1")).unwrap(), p("x-1"));
        assert_eq!(
            q.divide_exact(&p("x+2")).unwrap_err().to_string(),
            "not divisible"
        );
        assert_eq!(
            q.divide_exact(&p("0")).unwrap_err().to_string(),
            "division by zero"
        );
    }

    #[test]
    fn gcd_and_lcm() {
        let a = p("(1+x-y)*(1-z-z^2)");
        let b = p("(1+y+z)*(1-z-z^2)");
        let g = a.gcd(&b);
        assert!(g == p("1-z-z^2") || g == p("-1+z+z^2"));

        let l = p("2*x").lcm(&p("4*x^2"));
        assert_eq!(l, p("4*x^2"));
    }

    #[test]
    fn variadic_helpers() {
        let xs = [p("x"), p("y"), p("1")];
        assert_eq!(sum_all(&xs), p("x+y+1"));
        assert_eq!(product_all(&xs), p("x*y"));
        assert_eq!(sum_all([]), p("0"));
        assert_eq!(product_all([]), p("1"));

        assert_eq!(gcd_all(&[p("2*x"), p("4*x^2")]), p("2*x"));
        assert_eq!(gcd_all([]), p("0"));

        assert_eq!(lcm_all(&[p("2*x"), p("4*x^2")]).unwrap(), p("4*x^2"));
        assert_eq!(
            lcm_all([]).unwrap_err().to_string(),
            "lcm with no arguments"
        );
    }

    #[test]
    fn factor_memo() {
        let q = p("-2*x^4*y^3 + 2*x^2*y^5");
        let fs = q.factors();

        assert_eq!(product_all(fs), q);
        assert_eq!(fs[0], p("-2"));
        assert_eq!(fs.len(), 8); // content, three y, x-y, x+y, two x

        // memoized: same slice on the second call
        let again = q.factors();
        assert_eq!(fs.len(), again.len());
    }

    #[test]
    fn display_round_trip() {
        for s in ["0", "-7", "-1+x^2", "3-x*y+2*x^2*y^3", "x"] {
            let q = p(s);
            assert_eq!(q.to_string(), s);
            assert_eq!(p(&q.to_string()), q);
        }
    }

    #[test]
    fn hash_equality() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(p("(1+x)^2"));
        assert!(set.contains(&p("1+2*x+x^2")));
    }
}
