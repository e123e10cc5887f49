use polyring::{Error, Polynomial, RationalFunction, Variable};

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
fn lowest_terms() {
    let q = r("(x^2-1)/(x+1)");
    assert_eq!(q.numerator(), p("x-1"));
    assert_eq!(q.denominator(), p("1"));

    // reduction and sign normalization make equal values identical
    assert_eq!(r("2/4"), r("1/2"));
    assert_eq!(r("x/(1-y)"), r("-x/(-1+y)"));
    assert_eq!(r("-x/-y"), r("x/y"));

    assert_eq!(
        RationalFunction::new(p("1"), p("0")).unwrap_err(),
        Error::DivisionByZero
    );
}

#[test]
fn field_laws() {
    let a = r("(1+x)/y");
    let b = r("y/(1-x)");
    let c = r("3/(x*y)");

    assert_eq!(&a + &b, &b + &a);
    assert_eq!(&a * &b, &b * &a);
    assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));

    assert_eq!(&a - &a, RationalFunction::zero());
    assert_eq!(&a * &a.pow(-1).unwrap(), r("1"));
    assert_eq!(a.divide(&a).unwrap(), r("1"));
}

#[test]
fn mixed_with_polynomials() {
    let sum = r("1/x") + RationalFunction::from(p("x"));
    assert_eq!(sum, r("(1+x^2)/x"));

    let q: RationalFunction = p("x^2-y^2").into();
    assert_eq!(&q / &r("x-y"), r("x+y"));
}

#[test]
fn division_by_zero() {
    assert_eq!(
        r("1").divide(&RationalFunction::zero()).unwrap_err(),
        Error::DivisionByZero
    );
    assert_eq!(
        RationalFunction::zero().pow(-1).unwrap_err(),
        Error::DivisionByZero
    );
}

#[test]
fn evaluation() {
    let q = r("1/(2-x)");
    assert_eq!(q.evaluate(&var("x"), 1).unwrap(), r("1"));
    assert_eq!(q.evaluate(&var("x"), 2).unwrap_err(), Error::DivisionByZero);

    let vs = [var("x"), var("y")].into_iter().collect();
    assert_eq!(r("(x+y)/(1+x*y)").evaluate_at_one(&vs).unwrap(), r("1"));
}

#[test]
fn calculus_and_shifts() {
    assert_eq!(r("1/x").diff(&var("x")), r("-1/x^2"));
    assert_eq!(
        r("x/(1+x)").diff(&var("x")),
        r("1/(1+2*x+x^2)")
    );

    assert_eq!(r("1/x").shift(&var("x"), 1), r("1/(1+x)"));
}

#[test]
fn display_round_trip() {
    for s in ["0", "1/2", "x", "1/x^2", "(1+x)/(2*y)", "-1+x^2"] {
        let q = r(s);
        assert_eq!(r(&q.to_string()), q);
    }

    assert_eq!(r("(x^2-1)/(x+1)").to_string(), "-1+x");
    assert_eq!(r("1/(2*x)").to_string(), "1/(2*x)");
}
