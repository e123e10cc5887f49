//! Infix expression parser producing raw polynomials.
//!
//! The grammar covers `+ - * / ^ ( )`, integer literals of arbitrary size
//! and identifiers. Parsing is a two-pass process: the input is tokenized
//! and all identifiers are collected into a sorted variable basis, then the
//! token stream is evaluated over that basis with ordinary recursive
//! descent. Division is only permitted when parsing rational functions;
//! in polynomial mode it yields a dedicated parse error so that a caller
//! can distinguish "not a polynomial" from garbage input.

use std::sync::Arc;

use smartstring::{LazyCompact, SmartString};

use crate::domains::integer::{Integer, IntegerRing, Z};
use crate::error::{Error, ParseErrorKind, Result};
use crate::poly::polynomial::MultivariatePolynomial;
use crate::var::Variable;

type Poly = MultivariatePolynomial<IntegerRing, u16>;

/// Parse a polynomial. Division is rejected with a
/// [`ParseErrorKind::NotPolynomial`] error.
pub(crate) fn parse_polynomial(input: &str, target: &'static str) -> Result<Poly> {
    let mut parser = Parser::new(input, target, false)?;
    let (num, _) = parser.parse()?;
    Ok(num)
}

/// Parse a rational function as an unreduced numerator and denominator
/// over a shared variable basis.
pub(crate) fn parse_rational(input: &str, target: &'static str) -> Result<(Poly, Poly)> {
    let mut parser = Parser::new(input, target, true)?;
    parser.parse()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Number(SmartString<LazyCompact>),
    Identifier(SmartString<LazyCompact>),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    OpenParenthesis,
    CloseParenthesis,
}

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    variables: Arc<Vec<Variable>>,
    input: &'a str,
    target: &'static str,
    allow_division: bool,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, target: &'static str, allow_division: bool) -> Result<Parser<'a>> {
        let tokens = tokenize(input, target)?;

        let mut variables: Vec<_> = tokens
            .iter()
            .filter_map(|t| match t {
                Token::Identifier(name) => Some(Variable::Name(name.clone())),
                _ => None,
            })
            .collect();
        variables.sort();
        variables.dedup();

        Ok(Parser {
            tokens,
            pos: 0,
            variables: Arc::new(variables),
            input,
            target,
            allow_division,
        })
    }

    fn malformed(&self) -> Error {
        Error::parse(ParseErrorKind::Malformed, self.target, self.input)
    }

    fn parse(&mut self) -> Result<(Poly, Poly)> {
        if self.tokens.is_empty() {
            return Err(self.malformed());
        }

        let r = self.expression()?;

        if self.pos != self.tokens.len() {
            return Err(self.malformed());
        }

        Ok(r)
    }

    fn expression(&mut self) -> Result<(Poly, Poly)> {
        let mut acc = self.term()?;

        loop {
            match self.tokens.get(self.pos) {
                Some(Token::Plus) => {
                    self.pos += 1;
                    let r = self.term()?;
                    acc = add_quotients(acc, r);
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    let mut r = self.term()?;
                    r.0 = -r.0;
                    acc = add_quotients(acc, r);
                }
                _ => return Ok(acc),
            }
        }
    }

    fn term(&mut self) -> Result<(Poly, Poly)> {
        let mut acc = self.factor()?;

        loop {
            match self.tokens.get(self.pos) {
                Some(Token::Star) => {
                    self.pos += 1;
                    let r = self.factor()?;
                    acc = (acc.0 * &r.0, acc.1 * &r.1);
                }
                Some(Token::Slash) => {
                    if !self.allow_division {
                        return Err(Error::parse(
                            ParseErrorKind::NotPolynomial,
                            self.target,
                            self.input,
                        ));
                    }

                    self.pos += 1;
                    let r = self.factor()?;

                    if r.0.is_zero() {
                        return Err(Error::DivisionByZero);
                    }

                    acc = (acc.0 * &r.1, acc.1 * &r.0);
                }
                _ => return Ok(acc),
            }
        }
    }

    fn factor(&mut self) -> Result<(Poly, Poly)> {
        let mut negative = false;
        loop {
            match self.tokens.get(self.pos) {
                Some(Token::Minus) => {
                    negative = !negative;
                    self.pos += 1;
                }
                Some(Token::Plus) => self.pos += 1,
                _ => break,
            }
        }

        let mut base = self.atom()?;

        if let Some(Token::Caret) = self.tokens.get(self.pos) {
            self.pos += 1;
            let e = self.exponent()? as usize;
            base = (base.0.pow(e), base.1.pow(e));
        }

        if negative {
            base.0 = -base.0;
        }

        Ok(base)
    }

    fn atom(&mut self) -> Result<(Poly, Poly)> {
        match self.tokens.get(self.pos).cloned() {
            Some(Token::Number(n)) => {
                self.pos += 1;
                let c: Integer = n.parse().map_err(|_| self.malformed())?;
                Ok((self.template().constant(c), self.template().one()))
            }
            Some(Token::Identifier(name)) => {
                self.pos += 1;
                Ok((self.variable(&name), self.template().one()))
            }
            Some(Token::OpenParenthesis) => {
                self.pos += 1;
                let r = self.expression()?;

                if self.tokens.get(self.pos) != Some(&Token::CloseParenthesis) {
                    return Err(self.malformed());
                }
                self.pos += 1;

                Ok(r)
            }
            _ => Err(self.malformed()),
        }
    }

    /// A literal exponent. Anything that does not fit the exponent type is
    /// treated as malformed input.
    fn exponent(&mut self) -> Result<u16> {
        if let Some(Token::Number(n)) = self.tokens.get(self.pos) {
            if let Ok(e) = n.parse::<u16>() {
                self.pos += 1;
                return Ok(e);
            }
        }

        Err(self.malformed())
    }

    fn template(&self) -> Poly {
        MultivariatePolynomial::new(&Z, None, self.variables.clone())
    }

    fn variable(&self, name: &SmartString<LazyCompact>) -> Poly {
        let v = Variable::Name(name.clone());
        let index = self.variables.binary_search(&v).unwrap(); // collected upfront

        let mut e = vec![0u16; self.variables.len()];
        e[index] = 1;
        self.template().monomial(Integer::one(), e)
    }
}

/// Add two unreduced quotients, sharing the denominator when possible.
fn add_quotients(a: (Poly, Poly), b: (Poly, Poly)) -> (Poly, Poly) {
    if a.1 == b.1 {
        (a.0 + b.0, a.1)
    } else {
        (&a.0 * &b.1 + &b.0 * &a.1, a.1 * &b.1)
    }
}

fn tokenize(input: &str, target: &'static str) -> Result<Vec<Token>> {
    let b = input.as_bytes();
    let mut tokens = Vec::with_capacity(b.len() / 2);

    let mut i = 0;
    while i < b.len() {
        match b[i] {
            b' ' | b'\t' | b'\r' | b'\n' => i += 1,
            b'+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            b'-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            b'*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            b'/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            b'^' => {
                tokens.push(Token::Caret);
                i += 1;
            }
            b'(' => {
                tokens.push(Token::OpenParenthesis);
                i += 1;
            }
            b')' => {
                tokens.push(Token::CloseParenthesis);
                i += 1;
            }
            b'0'..=b'9' => {
                let start = i;
                while i < b.len() && b[i].is_ascii_digit() {
                    i += 1;
                }
                tokens.push(Token::Number(input[start..i].into()));
            }
            c if c.is_ascii_alphabetic() => {
                let start = i;
                while i < b.len() && (b[i].is_ascii_alphanumeric() || b[i] == b'_') {
                    i += 1;
                }
                tokens.push(Token::Identifier(input[start..i].into()));
            }
            _ => return Err(Error::parse(ParseErrorKind::Malformed, target, input)),
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod test {
    use crate::domains::integer::Integer;
    use crate::error::{Error, ParseErrorKind};

    use super::{parse_polynomial, parse_rational};

    #[test]
    fn basic() {
        let p = parse_polynomial("1 + x*y^2 - 3*x", "polynomial").unwrap();
        assert_eq!(p.nterms(), 3);
        assert_eq!(p.nvars(), 2);

        let q = parse_polynomial("y^2*x + 1 - x - 2*x", "polynomial").unwrap();
        assert_eq!(p, q);
    }

    #[test]
    fn precedence() {
        // -x^2 is -(x^2), and a*b+c binds the product first
        let p = parse_polynomial("-x^2 + 2*x*x", "polynomial").unwrap();
        let q = parse_polynomial("x^2", "polynomial").unwrap();
        assert_eq!(p, q);

        let r = parse_polynomial("(1+x)*(1-x)", "polynomial").unwrap();
        let s = parse_polynomial("1 - x^2", "polynomial").unwrap();
        assert_eq!(r, s);
    }

    #[test]
    fn unary_signs() {
        let p = parse_polynomial("--x", "polynomial").unwrap();
        let q = parse_polynomial("+x", "polynomial").unwrap();
        assert_eq!(p, q);
    }

    #[test]
    fn large_literal() {
        let p = parse_polynomial("9223372036854775808", "polynomial").unwrap();
        let big: Integer = "9223372036854775808".parse().unwrap();
        assert_eq!(p.lcoeff(), big);
    }

    #[test]
    fn sorted_basis() {
        let p = parse_polynomial("b + a + c", "polynomial").unwrap();
        let names: Vec<_> = p.get_vars_ref().iter().map(|v| v.to_string()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn division_is_not_a_polynomial() {
        let e = parse_polynomial("x/y", "polynomial").unwrap_err();
        assert_eq!(e.parse_kind(), Some(ParseErrorKind::NotPolynomial));
    }

    #[test]
    fn malformed() {
        for bad in ["", "1+", "x +* y", "(x", "x)", "2x", "x^y", "$x", "x^-1"] {
            let e = parse_polynomial(bad, "polynomial").unwrap_err();
            assert_eq!(e.parse_kind(), Some(ParseErrorKind::Malformed), "{}", bad);
        }
    }

    #[test]
    fn rational() {
        let (num, den) = parse_rational("(x^2-1)/(x+1)", "rational function").unwrap();
        assert_eq!(num, parse_polynomial("x^2-1", "polynomial").unwrap());
        assert_eq!(den, parse_polynomial("x+1", "polynomial").unwrap());

        // a polynomial parses with denominator one
        let (_, den) = parse_rational("x+1", "rational function").unwrap();
        assert!(den.is_one());
    }

    #[test]
    fn rational_division_by_zero() {
        assert_eq!(
            parse_rational("1/(x-x)", "rational function").unwrap_err(),
            Error::DivisionByZero
        );
    }
}
