use polyring::{gcd_all, lcm_all, Polynomial};

fn p(s: &str) -> Polynomial {
    Polynomial::parse(s).unwrap()
}

#[test]
fn golden_example() {
    let a = p("1 + x - y");
    let b = p("1 + y + z");
    let g = p("1 - z - z^2");

    let r = (&a * &g).gcd(&(&b * &g));
    assert!(r == g || r == -&g);

    // the gcd divides both inputs exactly
    assert!((&a * &g).divide_exact(&r).is_ok());
    assert!((&b * &g).divide_exact(&r).is_ok());
}

#[test]
fn trivial_cases() {
    let a = p("x^2 + y");
    assert_eq!(a.gcd(&Polynomial::zero()), a);
    assert_eq!(Polynomial::zero().gcd(&a), a);
    assert_eq!(a.gcd(&p("1")), p("1"));
    assert_eq!(p("12").gcd(&p("18")), p("6"));
    assert_eq!(a.gcd(&a), a);
}

#[test]
fn monomial_and_content() {
    assert_eq!(p("6*x^2*y").gcd(&p("4*x*y^3")), p("2*x*y"));
    assert_eq!(p("-2*x").gcd(&p("-4*x^2")), p("2*x"));
}

#[test]
fn coprime() {
    assert_eq!(p("1+x").gcd(&p("1+y")), p("1"));
    assert_eq!(p("x^2+1").gcd(&p("x+3")), p("1"));
}

#[test]
fn result_sign_is_positive() {
    let g = p("-x + y"); // negative leading coefficient: leading term is y
    let r = (&g * &p("1+x")).gcd(&(&g * &p("1-x")));
    assert!(r.signum() > 0);
    assert!(r == g || r == -&g);
}

#[test]
fn lcm() {
    assert_eq!(p("2*x").lcm(&p("4*x^2")), p("4*x^2"));

    let a = p("(1+x)*(1+y)");
    let b = p("(1+x)*(1-y)");
    let l = a.lcm(&b);
    assert!(l.divide_exact(&a).is_ok());
    assert!(l.divide_exact(&b).is_ok());
    assert_eq!(l.degree(), 3);
}

#[test]
fn variadic() {
    let g = p("1+x+y");
    let ps = [&g * &p("x"), &g * &p("y"), &g * &p("x-y"), g.clone()];
    assert_eq!(gcd_all(&ps), g);

    assert_eq!(gcd_all([]), Polynomial::zero());
    assert!(lcm_all([]).is_err());
    assert_eq!(
        lcm_all(&[p("2"), p("3"), p("4")]).unwrap(),
        p("12")
    );
}

#[test]
fn deep_multivariate() {
    let g = p("1 + x*y + z^2");
    let a = &g * &p("(1 - x + y^2)^2");
    let b = &g * &p("(1 + z)^3");

    let r = a.gcd(&b);
    assert!(r == g || r == -&g);
}
