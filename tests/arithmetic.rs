use polyring::{Polynomial, Variable, VariableSet};

fn p(s: &str) -> Polynomial {
    Polynomial::parse(s).unwrap()
}

fn var(s: &str) -> Variable {
    Variable::new(s).unwrap()
}

#[test]
fn ring_laws() {
    let a = p("1 + x - 2*y");
    let b = p("y^2 - x");
    let c = p("3*x*z + 7");

    assert_eq!(&a + &b, &b + &a);
    assert_eq!(&a * &b, &b * &a);
    assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
    assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));

    assert_eq!(&a + &Polynomial::zero(), a);
    assert_eq!(&a * &Polynomial::one(), a);
    assert_eq!(&a - &a, Polynomial::zero());
    assert_eq!(&a * &Polynomial::zero(), Polynomial::zero());
}

#[test]
fn product_expansion() {
    let a = p("x1");
    let b = p("x2 + x3");
    let c = p("x4");
    let d = p("x5 - x1");

    let lhs = (&a + &b) * (&c + &d) - &a * &c - &b * &c - &b * &d;
    assert_eq!(lhs, &a * &d);
}

#[test]
fn powers() {
    let a = p("1 + x");
    assert_eq!(a.pow(0), p("1"));
    assert_eq!(Polynomial::zero().pow(0), p("1"));
    assert_eq!(a.pow(3), p("1 + 3*x + 3*x^2 + x^3"));
    assert_eq!(a.pow(2), &a * &a);
}

#[test]
fn large_coefficients() {
    // crossing the i64 boundary and back
    let max = p("9223372036854775807");
    let two = &max + &p("2");
    assert_eq!(two.to_string(), "9223372036854775809");
    assert_eq!(&two - &p("2"), max);

    let big = p("9223372036854775808*x^2 - 9223372036854775808");
    assert_eq!(p(&big.to_string()), big);

    let sq = p("4294967296").pow(2);
    assert_eq!(sq, p("18446744073709551616"));
    assert_eq!(sq.as_integer().unwrap().to_string(), "18446744073709551616");
}

#[test]
fn degrees() {
    let q = p("1 + x*y + x*y*z^2");
    assert_eq!(q.degree(), 4);

    let z: VariableSet = [var("z")].into_iter().collect();
    assert_eq!(q.degree_in(&z), 2);
    assert_eq!(q.degree_in(&VariableSet::new()), 0);
    assert_eq!(Polynomial::zero().degree(), 0);
}

#[test]
fn exact_division() {
    let q = p("(1+x)^3*(x-y)");
    assert_eq!(q.divide_exact(&p("(1+x)^2")).unwrap(), p("(1+x)*(x-y)"));
    assert!(q.divide_exact(&p("1+y")).is_err());
    assert!(q.divide_exact(&Polynomial::zero()).is_err());
}

#[test]
fn hashing_is_construction_independent() {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let a = (&p("1+x") * &p("1-x")) + p("x*y");
    let b = p("1 - x^2 + y*x");
    assert_eq!(a, b);

    let mut h1 = DefaultHasher::new();
    let mut h2 = DefaultHasher::new();
    a.hash(&mut h1);
    b.hash(&mut h2);
    assert_eq!(h1.finish(), h2.finish());
}

#[test]
fn display_round_trip() {
    for s in [
        "0",
        "1",
        "-1",
        "x",
        "-1+x^2",
        "3-x*y+2*x^2*y^3",
        "-9223372036854775809",
    ] {
        let q = p(s);
        assert_eq!(q.to_string(), s);
        assert_eq!(p(&q.to_string()), q);
    }
}

#[test]
fn storage_order_is_ascending() {
    // smallest exponent tuple prints first, the leading term last
    assert_eq!(p("x^2 - 1").to_string(), "-1+x^2");
    assert_eq!(p("y + x").to_string(), "x+y");
}
