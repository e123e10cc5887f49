use polyring::{product_all, Polynomial};

fn p(s: &str) -> Polynomial {
    Polynomial::parse(s).unwrap()
}

/// The factor list must multiply back to the input, and every non-constant
/// entry must appear the expected number of times.
fn check(input: &Polynomial, expected: &[(&str, usize)]) {
    let fs = input.factors();
    assert_eq!(product_all(fs), *input);

    let total: usize = expected.iter().map(|(_, n)| n).sum();
    let constants = fs.iter().filter(|f| f.is_integer()).count();
    assert_eq!(fs.len() - constants, total);

    for (s, n) in expected {
        let f = p(s);
        let count = fs.iter().filter(|q| **q == f || **q == -&f).count();
        assert_eq!(count, *n, "{} expected {} times", s, n);
    }
}

#[test]
fn constants_and_monomials() {
    assert_eq!(p("0").factors(), &[p("0")]);
    assert_eq!(p("1").factors(), &[p("1")]);
    assert_eq!(p("-6").factors(), &[p("-6")]);

    let m = p("12*x^2*y");
    let fs = m.factors();
    assert_eq!(product_all(fs), m);
    assert_eq!(fs[0], p("12"));
    assert_eq!(fs.len(), 4); // 12, x, x, y
}

#[test]
fn univariate() {
    check(&p("x^2 - 1"), &[("x-1", 1), ("x+1", 1)]);
    check(&p("x^2 + 2*x + 1"), &[("x+1", 2)]);
    check(&p("x^2 + x + 1"), &[("x^2+x+1", 1)]);
    check(&p("6*x^2 + 5*x + 1"), &[("2*x+1", 1), ("3*x+1", 1)]);
}

#[test]
fn content_and_sign() {
    let q = p("-2*x^2 + 2");
    let fs = q.factors();
    assert_eq!(fs[0], p("-2"));
    check(&q, &[("x-1", 1), ("x+1", 1)]);
}

#[test]
fn multivariate() {
    check(&p("x^2 - y^2"), &[("x-y", 1), ("x+y", 1)]);
    check(
        &p("x^2*y + x*y^2 + x + y"),
        &[("x+y", 1), ("x*y+1", 1)],
    );
}

#[test]
fn multivariate_with_multiplicity() {
    // -2*x*y^3*(x-y)^2*(x+y)
    let q = p("-2*x^4*y^3 + 2*x^3*y^4 + 2*x^2*y^5 - 2*x*y^6");
    check(&q, &[("x", 1), ("y", 3), ("x-y", 2), ("x+y", 1)]);

    let fs = q.factors();
    assert_eq!(fs[0], p("-2"));
    assert_eq!(fs.len(), 8);
}

#[test]
fn irreducible_multivariate() {
    check(&p("1 + x + y"), &[("1+x+y", 1)]);
    check(&p("x^2 + y^2 + 1"), &[("x^2+y^2+1", 1)]);
}

#[test]
fn three_variables() {
    let q = &p("1+x+y") * &p("1-z").pow(2) * &p("x*z - y");
    check(&q, &[("1+x+y", 1), ("1-z", 2), ("x*z-y", 1)]);
}

#[test]
fn larger_coefficients() {
    // (x - 2^40)(x + 2^40)
    let q = p("x^2 - 1208925819614629174706176");
    check(
        &q,
        &[("x - 1099511627776", 1), ("x + 1099511627776", 1)],
    );
}
