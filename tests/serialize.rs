use std::io::Cursor;

use polyring::serialize::{
    polynomial_from_bytes, polynomial_to_bytes, rational_function_from_bytes,
    rational_function_to_bytes, read_polynomial, read_rational_function, write_polynomial,
    write_rational_function,
};
use polyring::{Polynomial, RationalFunction};

fn p(s: &str) -> Polynomial {
    Polynomial::parse(s).unwrap()
}

fn r(s: &str) -> RationalFunction {
    RationalFunction::parse(s).unwrap()
}

#[test]
fn polynomial_stream_round_trip() {
    for s in [
        "0",
        "1",
        "-42",
        "x",
        "1 - x + 3*x*y^2",
        "9223372036854775808*x - 9223372036854775809",
        "x^2*y^3*z^4 + 1208925819614629174706176",
    ] {
        let q = p(s);

        let mut buf = Vec::new();
        write_polynomial(&mut buf, &q).unwrap();
        let back = read_polynomial(Cursor::new(&buf)).unwrap();
        assert_eq!(back, q);
    }
}

#[test]
fn polynomial_bytes_round_trip() {
    let q = p("1 + x*y - 2*y^3");
    let bytes = polynomial_to_bytes(&q);
    assert_eq!(polynomial_from_bytes(&bytes).unwrap(), q);
}

#[test]
fn rational_function_round_trip() {
    for s in ["0", "1/2", "x/y", "(1+x)/(2*y^2)", "-1/x^2"] {
        let q = r(s);

        let mut buf = Vec::new();
        write_rational_function(&mut buf, &q).unwrap();
        let back = read_rational_function(Cursor::new(&buf)).unwrap();
        assert_eq!(back, q);

        let bytes = rational_function_to_bytes(&q);
        assert_eq!(rational_function_from_bytes(&bytes).unwrap(), q);
    }
}

#[test]
fn multiple_values_in_one_stream() {
    let a = p("1+x");
    let b = r("x/y");
    let c = p("-z^5");

    let mut buf = Vec::new();
    write_polynomial(&mut buf, &a).unwrap();
    write_rational_function(&mut buf, &b).unwrap();
    write_polynomial(&mut buf, &c).unwrap();

    let mut cursor = Cursor::new(&buf);
    assert_eq!(read_polynomial(&mut cursor).unwrap(), a);
    assert_eq!(read_rational_function(&mut cursor).unwrap(), b);
    assert_eq!(read_polynomial(&mut cursor).unwrap(), c);
    assert_eq!(cursor.position() as usize, buf.len());
}

#[test]
fn rejects_bad_input() {
    assert!(polynomial_from_bytes(&[]).is_err());
    assert!(polynomial_from_bytes(&[0xff, 0, 0, 0]).is_err());

    // a polynomial payload is not a rational function
    let bytes = polynomial_to_bytes(&p("1+x"));
    assert!(rational_function_from_bytes(&bytes).is_err());

    // truncations of a valid payload never parse
    let bytes = polynomial_to_bytes(&p("1 - x + 3*x*y^2"));
    for len in 0..bytes.len() {
        assert!(polynomial_from_bytes(&bytes[..len]).is_err(), "len {}", len);
    }
}
