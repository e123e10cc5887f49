//! Sparse multivariate polynomial and rational function arithmetic over
//! arbitrary-precision integers.
//!
//! Polynomials are immutable, cheaply clonable values in a canonical form:
//! the variable basis is name-sorted and terms are kept in ascending
//! lexicographic order of their exponent tuples. On top of the arithmetic
//! operators the crate offers polynomial gcd and lcm, factorization into
//! irreducible factors, rational functions in lowest terms, an infix
//! parser and printer, and a binary serialization format.
//!
//! For example:
//!
//! ```
//! use polyring::Polynomial;
//!
//! let a: Polynomial = "(1+x)*(1-y)".parse().unwrap();
//! let b: Polynomial = "(1+x)*(1+y)".parse().unwrap();
//!
//! assert_eq!(a.gcd(&b).to_string(), "1+x");
//!
//! let p: Polynomial = "x^2 - y^2".parse().unwrap();
//! assert_eq!(p.factors().len(), 2);
//! ```

pub mod domains;
pub mod error;
pub mod poly;
pub mod polynomial;
pub mod rational;
pub mod serialize;
pub mod var;

mod parser;
mod printer;
mod utils;

pub use error::{Error, ParseErrorKind, Result};
pub use polynomial::{gcd_all, lcm_all, product_all, sum_all, Polynomial};
pub use rational::RationalFunction;
pub use var::{Variable, VariableSet};
