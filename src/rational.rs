//! Rational functions: quotients of polynomials kept in lowest terms.
//!
//! Every constructor and operation reduces the quotient by the gcd of
//! numerator and denominator and normalizes the denominator to a positive
//! leading coefficient, so equal values always have identical parts. Zero
//! is `0/1`, and a vanishing denominator is always reported as
//! [`Error::DivisionByZero`].

use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use crate::domains::integer::{Integer, IntegerRing};
use crate::error::{Error, Result};
use crate::parser;
use crate::poly::polynomial::MultivariatePolynomial;
use crate::printer::RationalFunctionPrinter;
use crate::polynomial::Polynomial;
use crate::var::{Variable, VariableSet};

type Raw = MultivariatePolynomial<IntegerRing, u16>;

/// A quotient of two polynomials in lowest terms.
#[derive(Clone, PartialEq, Eq)]
pub struct RationalFunction {
    num: Polynomial,
    den: Polynomial,
}

impl RationalFunction {
    /// Create `num / den`, reducing to lowest terms.
    pub fn new(num: impl Into<Polynomial>, den: impl Into<Polynomial>) -> Result<RationalFunction> {
        RationalFunction::reduce(num.into(), den.into())
    }

    /// Parse an infix expression; the full grammar including `/` applies.
    pub fn parse(input: &str) -> Result<RationalFunction> {
        let (num, den) = parser::parse_rational(input, "rational function")?;
        RationalFunction::reduce(Polynomial::from_raw(num), Polynomial::from_raw(den))
    }

    /// The zero rational function, `0/1`.
    pub fn zero() -> RationalFunction {
        RationalFunction {
            num: Polynomial::zero(),
            den: Polynomial::one(),
        }
    }

    fn reduce(num: Polynomial, den: Polynomial) -> Result<RationalFunction> {
        if den.is_zero() {
            return Err(Error::DivisionByZero);
        }

        if num.is_zero() {
            return Ok(RationalFunction::zero());
        }

        let g = num.gcd(&den);
        let mut num = num.divide_exact(&g)?;
        let mut den = den.divide_exact(&g)?;

        if den.signum() < 0 {
            num = -num;
            den = -den;
        }

        Ok(RationalFunction { num, den })
    }

    /// Wrap parts that are already reduced and sign-normalized.
    pub(crate) fn from_reduced(num: Polynomial, den: Polynomial) -> RationalFunction {
        debug_assert!(!den.is_zero());
        RationalFunction { num, den }
    }

    pub(crate) fn raw_parts(&self) -> (&Raw, &Raw) {
        (self.num.raw(), self.den.raw())
    }

    pub fn numerator(&self) -> Polynomial {
        self.num.clone()
    }

    pub fn denominator(&self) -> Polynomial {
        self.den.clone()
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.num.is_one() && self.den.is_one()
    }

    /// Whether the value is an integer constant.
    pub fn is_integer(&self) -> bool {
        self.num.is_integer() && self.den.is_one()
    }

    /// Whether the value is a constant, integer or not.
    pub fn is_fraction(&self) -> bool {
        self.num.is_integer() && self.den.is_integer()
    }

    /// Whether the denominator is 1.
    pub fn is_polynomial(&self) -> bool {
        self.den.is_one()
    }

    pub fn is_minus_one(&self) -> bool {
        self.num.is_minus_one() && self.den.is_one()
    }

    pub fn is_variable(&self) -> bool {
        self.num.is_variable() && self.den.is_one()
    }

    /// The value as an integer, if the rational function is one.
    pub fn as_integer(&self) -> Result<Integer> {
        if self.is_integer() {
            self.num.as_integer()
        } else {
            Err(Error::InvalidArgumentValue("not an integer"))
        }
    }

    /// The value as a numerator/denominator pair of integers, if the
    /// rational function is constant. The pair is already in lowest terms
    /// with a positive denominator.
    pub fn as_fraction(&self) -> Result<(Integer, Integer)> {
        if self.is_fraction() {
            Ok((self.num.as_integer()?, self.den.as_integer()?))
        } else {
            Err(Error::InvalidArgumentValue("not a rational number"))
        }
    }

    /// The numerator, if the denominator is 1.
    pub fn as_polynomial(&self) -> Result<Polynomial> {
        if self.is_polynomial() {
            Ok(self.num.clone())
        } else {
            Err(Error::InvalidArgumentValue("not a polynomial"))
        }
    }

    /// The value as a variable, if the rational function is one.
    pub fn as_variable(&self) -> Result<Variable> {
        if self.is_polynomial() {
            self.num.as_variable()
        } else {
            Err(Error::InvalidArgumentValue("not a variable"))
        }
    }

    /// The variables declared in either part.
    pub fn variables(&self) -> VariableSet {
        self.num.variables().union(&self.den.variables())
    }

    /// The variables that actually occur in either part.
    pub fn min_variables(&self) -> VariableSet {
        self.num.min_variables().union(&self.den.min_variables())
    }

    /// Re-express both parts over another basis.
    pub fn translate(&self, variables: &VariableSet) -> Result<RationalFunction> {
        Ok(RationalFunction::from_reduced(
            self.num.translate(variables)?,
            self.den.translate(variables)?,
        ))
    }

    /// `n`-th power; a negative exponent inverts.
    pub fn pow(&self, n: i64) -> Result<RationalFunction> {
        let e: u32 = n
            .unsigned_abs()
            .try_into()
            .map_err(|_| Error::InvalidArgumentValue("exponent too large"))?;

        if n < 0 {
            if self.is_zero() {
                return Err(Error::DivisionByZero);
            }
            RationalFunction::reduce(self.den.pow(e), self.num.pow(e))
        } else {
            // already coprime
            Ok(RationalFunction::from_reduced(
                self.num.pow(e),
                self.den.pow(e),
            ))
        }
    }

    /// Evaluate a variable at an integer.
    pub fn evaluate(&self, var: &Variable, value: impl Into<Integer>) -> Result<RationalFunction> {
        let value = value.into();
        RationalFunction::reduce(
            self.num.evaluate(var, value.clone()),
            self.den.evaluate(var, value),
        )
    }

    /// Set the given variables to zero.
    pub fn evaluate_at_zero(&self, variables: &VariableSet) -> Result<RationalFunction> {
        RationalFunction::reduce(
            self.num.evaluate_at_zero(variables),
            self.den.evaluate_at_zero(variables),
        )
    }

    /// Set the given variables to one.
    pub fn evaluate_at_one(&self, variables: &VariableSet) -> Result<RationalFunction> {
        RationalFunction::reduce(
            self.num.evaluate_at_one(variables),
            self.den.evaluate_at_one(variables),
        )
    }

    /// Shift a variable: `x -> x + amount`.
    pub fn shift(&self, var: &Variable, amount: impl Into<Integer>) -> RationalFunction {
        let amount = amount.into();
        // a shift never makes the denominator vanish
        RationalFunction::from_reduced(
            self.num.shift(var, amount.clone()),
            self.den.shift(var, amount),
        )
    }

    /// Monomial substitution in both parts.
    pub fn subs(&self, lhs: &Polynomial, rhs: &Polynomial) -> Result<RationalFunction> {
        RationalFunction::reduce(self.num.subs(lhs, rhs)?, self.den.subs(lhs, rhs)?)
    }

    /// The partial derivative, by the quotient rule.
    pub fn diff(&self, var: &Variable) -> RationalFunction {
        let num = &self.num.diff(var) * &self.den - &self.num * &self.den.diff(var);
        let den = &self.den * &self.den;

        // the denominator is a square of a nonzero polynomial
        match RationalFunction::reduce(num, den) {
            Ok(r) => r,
            Err(_) => unreachable!("quotient rule denominator vanished"),
        }
    }

    /// The `n`-th partial derivative; `n == 0` is the identity.
    pub fn diff_n(&self, var: &Variable, n: u32) -> RationalFunction {
        let mut res = self.clone();
        for _ in 0..n {
            if res.is_zero() {
                break;
            }
            res = res.diff(var);
        }
        res
    }
}

impl Add for &RationalFunction {
    type Output = RationalFunction;

    fn add(self, rhs: &RationalFunction) -> RationalFunction {
        // split off the common denominator part to keep intermediates small
        let g = self.den.gcd(&rhs.den);
        let d1 = self.den.divide_exact(&g).unwrap(); // gcd divides
        let d2 = rhs.den.divide_exact(&g).unwrap();

        let num = &self.num * &d2 + &rhs.num * &d1;
        let den = &d1 * &rhs.den;

        if g.is_one() {
            // coprime denominators: the sum is already in lowest terms
            let mut num = num;
            let mut den = den;
            if den.signum() < 0 {
                num = -num;
                den = -den;
            }
            if num.is_zero() {
                return RationalFunction::zero();
            }
            return RationalFunction::from_reduced(num, den);
        }

        match RationalFunction::reduce(num, den) {
            Ok(r) => r,
            Err(_) => unreachable!("sum denominator vanished"),
        }
    }
}

impl Sub for &RationalFunction {
    type Output = RationalFunction;

    fn sub(self, rhs: &RationalFunction) -> RationalFunction {
        self + &(-rhs)
    }
}

impl Mul for &RationalFunction {
    type Output = RationalFunction;

    fn mul(self, rhs: &RationalFunction) -> RationalFunction {
        // cross-cancel before multiplying
        let g1 = self.num.gcd(&rhs.den);
        let g2 = rhs.num.gcd(&self.den);

        let n1 = self.num.divide_exact(&g1).unwrap(); // gcd divides
        let d2 = rhs.den.divide_exact(&g1).unwrap();
        let n2 = rhs.num.divide_exact(&g2).unwrap();
        let d1 = self.den.divide_exact(&g2).unwrap();

        let mut num = &n1 * &n2;
        let mut den = &d1 * &d2;

        if num.is_zero() {
            return RationalFunction::zero();
        }
        if den.signum() < 0 {
            num = -num;
            den = -den;
        }

        RationalFunction::from_reduced(num, den)
    }
}

impl Div for &RationalFunction {
    type Output = RationalFunction;

    fn div(self, rhs: &RationalFunction) -> RationalFunction {
        if rhs.is_zero() {
            panic!("division by zero");
        }

        let inverse = RationalFunction::from_reduced(rhs.den.clone(), rhs.num.clone());
        let mut r = self * &inverse;

        if r.den.signum() < 0 {
            r.num = -r.num;
            r.den = -r.den;
        }
        r
    }
}

impl RationalFunction {
    /// Division that reports a zero divisor as an error instead of
    /// panicking.
    pub fn divide(&self, rhs: &RationalFunction) -> Result<RationalFunction> {
        if rhs.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(self / rhs)
    }
}

impl Neg for &RationalFunction {
    type Output = RationalFunction;

    fn neg(self) -> RationalFunction {
        RationalFunction::from_reduced(-&self.num, self.den.clone())
    }
}

macro_rules! forward_binop {
    ($op:ident, $method:ident) => {
        impl $op<RationalFunction> for RationalFunction {
            type Output = RationalFunction;

            fn $method(self, rhs: RationalFunction) -> RationalFunction {
                (&self).$method(&rhs)
            }
        }

        impl $op<&RationalFunction> for RationalFunction {
            type Output = RationalFunction;

            fn $method(self, rhs: &RationalFunction) -> RationalFunction {
                (&self).$method(rhs)
            }
        }

        impl $op<RationalFunction> for &RationalFunction {
            type Output = RationalFunction;

            fn $method(self, rhs: RationalFunction) -> RationalFunction {
                self.$method(&rhs)
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
forward_binop!(Div, div);

impl Neg for RationalFunction {
    type Output = RationalFunction;

    fn neg(self) -> RationalFunction {
        -&self
    }
}

impl Default for RationalFunction {
    fn default() -> RationalFunction {
        RationalFunction::zero()
    }
}

impl Hash for RationalFunction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.num.hash(state);
        self.den.hash(state);
    }
}

impl Display for RationalFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        RationalFunctionPrinter::new(self.num.raw(), self.den.raw()).fmt(f)
    }
}

impl fmt::Debug for RationalFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for RationalFunction {
    type Err = Error;

    fn from_str(s: &str) -> Result<RationalFunction> {
        RationalFunction::parse(s)
    }
}

impl From<Polynomial> for RationalFunction {
    fn from(p: Polynomial) -> RationalFunction {
        RationalFunction {
            num: p,
            den: Polynomial::one(),
        }
    }
}

impl From<&Polynomial> for RationalFunction {
    fn from(p: &Polynomial) -> RationalFunction {
        RationalFunction::from(p.clone())
    }
}

impl From<i64> for RationalFunction {
    fn from(n: i64) -> RationalFunction {
        RationalFunction::from(Polynomial::from(n))
    }
}

impl From<Integer> for RationalFunction {
    fn from(n: Integer) -> RationalFunction {
        RationalFunction::from(Polynomial::from(n))
    }
}

impl From<&Variable> for RationalFunction {
    fn from(v: &Variable) -> RationalFunction {
        RationalFunction::from(Polynomial::from(v))
    }
}

#[cfg(test)]
mod test {
    use crate::error::Error;
    use crate::polynomial::Polynomial;
    use crate::var::Variable;

    use super::RationalFunction;

    fn r(s: &str) -> RationalFunction {
        RationalFunction::parse(s).unwrap()
    }

    fn p(s: &str) -> Polynomial {
        Polynomial::parse(s).unwrap()
    }

    fn var(s: &str) -> Variable {
        Variable::new(s).unwrap()
    }

    #[test]
    fn normalization() {
        let q = r("(x^2-1)/(x+1)");
        assert_eq!(q.numerator(), p("x-1"));
        assert_eq!(q.denominator(), p("1"));
        assert!(q.is_polynomial());

        // denominator sign is normalized
        let s = r("x/(-1+y)");
        assert_eq!(s.denominator(), p("-1+y"));
        let t = r("x/(1-y)");
        assert_eq!(t.denominator(), p("-1+y"));
        assert_eq!(t.numerator(), p("-x"));

        assert_eq!(r("0/x"), RationalFunction::zero());
        assert_eq!(RationalFunction::new(p("2"), p("4")).unwrap(), r("1/2"));
        assert_eq!(
            RationalFunction::new(p("1"), p("0")).unwrap_err(),
            Error::DivisionByZero
        );
    }

    #[test]
    fn arithmetic() {
        let a = r("1/x");
        let b = r("1/y");
        assert_eq!(&a + &b, r("(x+y)/(x*y)"));
        assert_eq!(&a - &a, RationalFunction::zero());
        assert_eq!(&a * &b, r("1/(x*y)"));
        assert_eq!(&a / &b, r("y/x"));

        let c = r("(x+1)/(x-1)");
        assert_eq!(&c * &c.clone().pow(-1).unwrap(), r("1"));

        // cross-cancellation
        assert_eq!(r("(x^2-y^2)/z") * r("z/(x-y)"), r("x+y"));
    }

    #[test]
    fn powers() {
        let q = r("x/2");
        assert_eq!(q.pow(2).unwrap(), r("x^2/4"));
        assert_eq!(q.pow(-1).unwrap(), r("2/x"));
        assert_eq!(q.pow(0).unwrap(), r("1"));
        assert_eq!(
            RationalFunction::zero().pow(-2).unwrap_err(),
            Error::DivisionByZero
        );

        // exponents beyond u32 are rejected, not clamped
        assert_eq!(
            r("x").pow(i64::MIN).unwrap_err(),
            Error::InvalidArgumentValue("exponent too large")
        );
        assert_eq!(
            r("x").pow(u32::MAX as i64 + 1).unwrap_err(),
            Error::InvalidArgumentValue("exponent too large")
        );
    }

    #[test]
    fn predicates() {
        assert!(r("0").is_zero());
        assert!(r("1").is_one());
        assert!(r("-1").is_minus_one());
        assert!(!r("-1/2").is_minus_one());
        assert!(r("5").is_integer());
        assert!(r("1/2").is_fraction());
        assert!(!r("1/2").is_integer());
        assert!(r("x").is_variable());
        assert!(!r("1/x").is_polynomial());
    }

    #[test]
    fn narrowing() {
        assert_eq!(r("-42").as_integer().unwrap(), (-42i64).into());
        assert_eq!(
            r("1/2").as_integer().unwrap_err().to_string(),
            "not an integer"
        );

        let (num, den) = r("-2/4").as_fraction().unwrap();
        assert_eq!(num, (-1i64).into());
        assert_eq!(den, 2i64.into());
        assert_eq!(
            r("x/2").as_fraction().unwrap_err().to_string(),
            "not a rational number"
        );

        assert_eq!(r("(x^2-1)/(x+1)").as_polynomial().unwrap(), p("x-1"));
        assert_eq!(
            r("1/x").as_polynomial().unwrap_err().to_string(),
            "not a polynomial"
        );

        assert_eq!(r("x").as_variable().unwrap(), var("x"));
        assert_eq!(
            r("1/x").as_variable().unwrap_err().to_string(),
            "not a variable"
        );
        assert_eq!(
            r("2*x").as_variable().unwrap_err().to_string(),
            "not a variable"
        );
    }

    #[test]
    fn evaluation() {
        let q = r("1/(2-x)");
        assert_eq!(q.evaluate(&var("x"), 1).unwrap(), r("1"));
        assert_eq!(q.evaluate(&var("x"), 2).unwrap_err(), Error::DivisionByZero);

        let s = r("(x+y)/(x*y)");
        assert_eq!(s.evaluate(&var("y"), 1).unwrap(), r("(x+1)/x"));
    }

    #[test]
    fn calculus() {
        // d/dx 1/x = -1/x^2
        assert_eq!(r("1/x").diff(&var("x")), r("-1/x^2"));
        // d/dx (x^2/2) = x
        assert_eq!(r("x^2/2").diff(&var("x")), r("x"));
        assert_eq!(r("1/y").diff(&var("x")), RationalFunction::zero());

        // d^2/dx^2 1/x = 2/x^3
        assert_eq!(r("1/x").diff_n(&var("x"), 2), r("2/x^3"));
        let q = r("x/(1+y)");
        assert_eq!(q.diff_n(&var("x"), 0), q);
    }

    #[test]
    fn substitution_and_shift() {
        let q = r("x^2/y");
        assert_eq!(q.subs(&p("x^2"), &p("z")).unwrap(), r("z/y"));
        assert_eq!(r("1/x").shift(&var("x"), 1), r("1/(x+1)"));
    }

    #[test]
    fn display() {
        assert_eq!(r("(1+x)/(2*y)").to_string(), "(1+x)/(2*y)");
        assert_eq!(r("x/2").to_string(), "x/2");
        assert_eq!(r("x/y").to_string(), "x/y");
        assert_eq!(r("3/1").to_string(), "3");

        for s in ["(1+x)/(2*y)", "x/2", "-1/x^2"] {
            assert_eq!(r(&r(s).to_string()), r(s));
        }
    }
}
