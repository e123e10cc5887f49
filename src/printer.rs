//! Canonical textual form for the public types.
//!
//! Terms are printed in storage order, so the leading term comes last. The
//! minus sign of a negative coefficient doubles as the term separator, unit
//! coefficients and unit exponents are suppressed. The output parses back
//! to an equal value.

use std::fmt::{self, Display, Formatter, Write};

use crate::domains::integer::IntegerRing;
use crate::poly::polynomial::MultivariatePolynomial;
use crate::poly::Exponent;

pub(crate) struct PolynomialPrinter<'a, E: Exponent> {
    poly: &'a MultivariatePolynomial<IntegerRing, E>,
}

impl<'a, E: Exponent> PolynomialPrinter<'a, E> {
    pub(crate) fn new(poly: &'a MultivariatePolynomial<IntegerRing, E>) -> Self {
        PolynomialPrinter { poly }
    }
}

impl<E: Exponent> Display for PolynomialPrinter<'_, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.poly.is_zero() {
            return f.write_char('0');
        }

        let vars = self.poly.get_vars_ref();

        let mut first = true;
        for t in self.poly {
            if t.coefficient.is_negative() {
                f.write_char('-')?;
            } else if !first {
                f.write_char('+')?;
            }
            first = false;

            let magnitude = t.coefficient.abs();
            let has_vars = t.exponents.iter().any(|e| !e.is_zero());

            let mut need_star = false;
            if !magnitude.is_one() || !has_vars {
                write!(f, "{}", magnitude)?;
                need_star = true;
            }

            for (v, e) in vars.iter().zip(t.exponents) {
                if e.is_zero() {
                    continue;
                }

                if need_star {
                    f.write_char('*')?;
                }
                need_star = true;

                write!(f, "{}", v)?;
                if e.to_u32() > 1 {
                    write!(f, "^{}", e)?;
                }
            }
        }

        Ok(())
    }
}

pub(crate) struct RationalFunctionPrinter<'a, E: Exponent> {
    num: &'a MultivariatePolynomial<IntegerRing, E>,
    den: &'a MultivariatePolynomial<IntegerRing, E>,
}

impl<'a, E: Exponent> RationalFunctionPrinter<'a, E> {
    pub(crate) fn new(
        num: &'a MultivariatePolynomial<IntegerRing, E>,
        den: &'a MultivariatePolynomial<IntegerRing, E>,
    ) -> Self {
        RationalFunctionPrinter { num, den }
    }
}

/// Whether a denominator prints as a single atom, so that `num/den`
/// parses back with the intended grouping.
fn single_atom<E: Exponent>(p: &MultivariatePolynomial<IntegerRing, E>) -> bool {
    if p.nterms() != 1 {
        return false;
    }

    let vars_used = p.exponents.iter().filter(|e| !e.is_zero()).count();
    if p.lcoeff().is_one() {
        vars_used == 1
    } else {
        vars_used == 0
    }
}

impl<E: Exponent> Display for RationalFunctionPrinter<'_, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.den.is_one() {
            return PolynomialPrinter::new(self.num).fmt(f);
        }

        if self.num.nterms() > 1 {
            write!(f, "({})", PolynomialPrinter::new(self.num))?;
        } else {
            PolynomialPrinter::new(self.num).fmt(f)?;
        }

        if single_atom(self.den) {
            write!(f, "/{}", PolynomialPrinter::new(self.den))
        } else {
            write!(f, "/({})", PolynomialPrinter::new(self.den))
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::domains::integer::{Integer, Z};
    use crate::poly::polynomial::MultivariatePolynomial;
    use crate::var::Variable;

    use super::{PolynomialPrinter, RationalFunctionPrinter};

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
    fn polynomials() {
        let p = poly(&[(-1, &[0, 0]), (1, &[2, 0])], &["x", "y"]);
        assert_eq!(PolynomialPrinter::new(&p).to_string(), "-1+x^2");

        let q = poly(&[(3, &[0, 0]), (-1, &[1, 1]), (2, &[2, 3])], &["x", "y"]);
        assert_eq!(PolynomialPrinter::new(&q).to_string(), "3-x*y+2*x^2*y^3");

        let zero = poly(&[], &["x"]);
        assert_eq!(PolynomialPrinter::new(&zero).to_string(), "0");

        let neg = poly(&[(-7, &[0])], &["x"]);
        assert_eq!(PolynomialPrinter::new(&neg).to_string(), "-7");
    }

    #[test]
    fn rationals() {
        let num = poly(&[(1, &[0]), (1, &[1])], &["x"]);
        let den = poly(&[(2, &[0])], &["x"]);
        assert_eq!(
            RationalFunctionPrinter::new(&num, &den).to_string(),
            "(1+x)/2"
        );

        let x = poly(&[(1, &[1])], &["x"]);
        let one = poly(&[(1, &[0])], &["x"]);
        assert_eq!(RationalFunctionPrinter::new(&x, &one).to_string(), "x");

        let x2 = poly(&[(1, &[2])], &["x"]);
        assert_eq!(RationalFunctionPrinter::new(&one, &x2).to_string(), "1/x^2");

        let two_x = poly(&[(2, &[1])], &["x"]);
        assert_eq!(
            RationalFunctionPrinter::new(&one, &two_x).to_string(),
            "1/(2*x)"
        );

        assert_eq!(
            RationalFunctionPrinter::new(&two_x, &den).to_string(),
            "2*x/2"
        );
    }
}
