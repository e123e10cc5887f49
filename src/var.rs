//! Variables and ordered sets of variables.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::Arc;

use smartstring::{LazyCompact, SmartString};

use crate::error::{Error, ParseErrorKind, Result};

/// A variable, identified by its name.
///
/// A valid name starts with an ASCII letter, followed by letters, digits or
/// underscores. Variables are totally ordered by name, which fixes the
/// canonical monomial order of every polynomial they appear in.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Variable {
    Name(SmartString<LazyCompact>),
    /// Internal placeholder used during variable mapping. It cannot be
    /// constructed from input and never appears in printed output.
    Temporary(usize),
}

impl Variable {
    /// Create a variable, checking that `name` is a valid identifier.
    pub fn new(name: &str) -> Result<Variable> {
        if !is_valid_name(name) {
            return Err(Error::parse(ParseErrorKind::InvalidName, "variable", name));
        }

        Ok(Variable::Name(name.into()))
    }

    /// The name of the variable, if it has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Variable::Name(s) => Some(s),
            Variable::Temporary(_) => None,
        }
    }
}

pub(crate) fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl FromStr for Variable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Variable> {
        Variable::new(s)
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Name(s) => f.write_str(s),
            Variable::Temporary(n) => write!(f, "_t{}", n),
        }
    }
}

/// An immutable set of variables, kept sorted by name.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct VariableSet {
    variables: Arc<Vec<Variable>>,
}

impl VariableSet {
    /// Create an empty set.
    pub fn new() -> VariableSet {
        VariableSet {
            variables: Arc::new(Vec::new()),
        }
    }

    /// Create a set from variable names, validating each one.
    pub fn from_names<'a, I: IntoIterator<Item = &'a str>>(names: I) -> Result<VariableSet> {
        names
            .into_iter()
            .map(Variable::new)
            .collect::<Result<VariableSet>>()
    }

    /// Wrap a sorted, deduplicated variable list.
    pub(crate) fn from_arc(variables: Arc<Vec<Variable>>) -> VariableSet {
        debug_assert!(variables.windows(2).all(|w| w[0] < w[1]));
        VariableSet { variables }
    }

    pub(crate) fn as_arc(&self) -> &Arc<Vec<Variable>> {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<Variable> {
        self.variables.iter()
    }

    pub fn contains(&self, var: &Variable) -> bool {
        self.variables.binary_search(var).is_ok()
    }

    /// The union of two sets.
    pub fn union(&self, other: &VariableSet) -> VariableSet {
        if other.is_empty() || self.variables == other.variables {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }

        let mut vars = Vec::with_capacity(self.len() + other.len());
        let mut it1 = self.iter().peekable();
        let mut it2 = other.iter().peekable();

        loop {
            match (it1.peek(), it2.peek()) {
                (Some(v1), Some(v2)) => {
                    if v1 < v2 {
                        vars.push((*v1).clone());
                        it1.next();
                    } else if v2 < v1 {
                        vars.push((*v2).clone());
                        it2.next();
                    } else {
                        vars.push((*v1).clone());
                        it1.next();
                        it2.next();
                    }
                }
                (Some(_), None) => {
                    vars.extend(it1.cloned());
                    break;
                }
                (None, Some(_)) => {
                    vars.extend(it2.cloned());
                    break;
                }
                (None, None) => break,
            }
        }

        VariableSet {
            variables: Arc::new(vars),
        }
    }
}

impl FromIterator<Variable> for VariableSet {
    fn from_iter<I: IntoIterator<Item = Variable>>(iter: I) -> VariableSet {
        let mut vars: Vec<Variable> = iter.into_iter().collect();
        vars.sort_unstable();
        vars.dedup();

        VariableSet {
            variables: Arc::new(vars),
        }
    }
}

impl<'a> IntoIterator for &'a VariableSet {
    type Item = &'a Variable;
    type IntoIter = std::slice::Iter<'a, Variable>;

    fn into_iter(self) -> Self::IntoIter {
        self.variables.iter()
    }
}

impl Display for VariableSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;

        for (i, v) in self.variables.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            Display::fmt(v, f)?;
        }

        f.write_str("}")
    }
}

#[cfg(test)]
mod test {
    use super::{Variable, VariableSet};

    #[test]
    fn names() {
        assert!(Variable::new("x").is_ok());
        assert!(Variable::new("alpha_2").is_ok());
        assert!(Variable::new("X1").is_ok());

        for bad in ["", "1x", "_x", "x y", "x+y", "é"] {
            let err = Variable::new(bad).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("invalid string for variable: `{}'", bad)
            );
        }
    }

    #[test]
    fn ordering() {
        let x = Variable::new("x").unwrap();
        let y = Variable::new("y").unwrap();
        let x1 = Variable::new("x1").unwrap();

        assert!(x < y);
        assert!(x < x1);
        assert!(x1 < y);
    }

    #[test]
    fn set_union() {
        let s1: VariableSet = ["z", "x"]
            .iter()
            .map(|n| Variable::new(n).unwrap())
            .collect();
        let s2: VariableSet = ["y", "x"]
            .iter()
            .map(|n| Variable::new(n).unwrap())
            .collect();

        let u = s1.union(&s2);
        assert_eq!(u.len(), 3);
        assert_eq!(u.to_string(), "{x, y, z}");

        assert_eq!(s1.union(&VariableSet::new()), s1);
        assert_eq!(VariableSet::new().to_string(), "{}");
    }

    #[test]
    fn set_from_names() {
        let s = VariableSet::from_names(["y", "x", "y"]).unwrap();
        assert_eq!(s.to_string(), "{x, y}");
        assert!(VariableSet::from_names(["x", "1y"]).is_err());
    }

    #[test]
    fn set_membership() {
        let s: VariableSet = ["a", "c"]
            .iter()
            .map(|n| Variable::new(n).unwrap())
            .collect();

        assert!(s.contains(&Variable::new("a").unwrap()));
        assert!(!s.contains(&Variable::new("b").unwrap()));
    }
}
