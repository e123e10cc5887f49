//! Binary round-trip form for polynomials and rational functions.
//!
//! The layout is little-endian throughout: a magic byte, the variable table
//! as length-prefixed UTF-8 names, the term count, then per term the
//! exponent row followed by the coefficient as a sign byte and a
//! length-prefixed little-endian magnitude. The format round-trips within
//! one build of the crate; it carries no cross-version guarantee.

use std::io::{self, Read, Write};
use std::sync::Arc;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use bytes::{BufMut, Bytes, BytesMut};
use rug::{integer::Order, Integer as MultiPrecisionInteger};

use crate::domains::integer::{Integer, IntegerRing, Z};
use crate::poly::polynomial::MultivariatePolynomial;
use crate::poly::Exponent;
use crate::polynomial::Polynomial;
use crate::rational::RationalFunction;
use crate::var::Variable;

const POLYNOMIAL_MAGIC: u8 = 0x70;
const RATIONAL_MAGIC: u8 = 0x72;

type Poly = MultivariatePolynomial<IntegerRing, u16>;

/// Write a polynomial to a binary stream.
pub fn write_polynomial<W: Write>(mut dest: W, p: &Polynomial) -> io::Result<()> {
    dest.write_u8(POLYNOMIAL_MAGIC)?;
    write_raw(&mut dest, p.raw())
}

/// Read a polynomial written by [`write_polynomial`].
pub fn read_polynomial<R: Read>(mut source: R) -> io::Result<Polynomial> {
    if source.read_u8()? != POLYNOMIAL_MAGIC {
        return Err(invalid("bad magic byte"));
    }

    Ok(Polynomial::from_raw(read_raw(&mut source)?))
}

/// Write a rational function to a binary stream.
pub fn write_rational_function<W: Write>(mut dest: W, r: &RationalFunction) -> io::Result<()> {
    dest.write_u8(RATIONAL_MAGIC)?;
    let (num, den) = r.raw_parts();
    write_raw(&mut dest, num)?;
    write_raw(&mut dest, den)
}

/// Read a rational function written by [`write_rational_function`].
pub fn read_rational_function<R: Read>(mut source: R) -> io::Result<RationalFunction> {
    if source.read_u8()? != RATIONAL_MAGIC {
        return Err(invalid("bad magic byte"));
    }

    let num = read_raw(&mut source)?;
    let den = read_raw(&mut source)?;

    if den.is_zero() {
        return Err(invalid("zero denominator"));
    }

    RationalFunction::new(Polynomial::from_raw(num), Polynomial::from_raw(den))
        .map_err(|e| invalid_owned(e.to_string()))
}

/// Serialize a polynomial into a freshly allocated buffer.
pub fn polynomial_to_bytes(p: &Polynomial) -> Bytes {
    let mut buf = BytesMut::new().writer();
    write_polynomial(&mut buf, p).unwrap(); // in-memory write cannot fail
    buf.into_inner().freeze()
}

/// Deserialize a polynomial from a buffer.
pub fn polynomial_from_bytes(bytes: &[u8]) -> io::Result<Polynomial> {
    read_polynomial(bytes)
}

/// Serialize a rational function into a freshly allocated buffer.
pub fn rational_function_to_bytes(r: &RationalFunction) -> Bytes {
    let mut buf = BytesMut::new().writer();
    write_rational_function(&mut buf, r).unwrap(); // in-memory write cannot fail
    buf.into_inner().freeze()
}

/// Deserialize a rational function from a buffer.
pub fn rational_function_from_bytes(bytes: &[u8]) -> io::Result<RationalFunction> {
    read_rational_function(bytes)
}

fn invalid(msg: &'static str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

fn invalid_owned(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

fn write_raw<W: Write>(dest: &mut W, p: &Poly) -> io::Result<()> {
    let vars = p.get_vars_ref();

    dest.write_u32::<LittleEndian>(vars.len() as u32)?;
    for v in vars {
        match v.name() {
            Some(name) => {
                dest.write_u32::<LittleEndian>(name.len() as u32)?;
                dest.write_all(name.as_bytes())?;
            }
            None => return Err(invalid("unnamed variable")),
        }
    }

    dest.write_u64::<LittleEndian>(p.nterms() as u64)?;

    for t in p {
        for e in t.exponents {
            dest.write_u32::<LittleEndian>(e.to_u32())?;
        }
        write_coefficient(dest, t.coefficient)?;
    }

    Ok(())
}

fn read_raw<R: Read>(source: &mut R) -> io::Result<Poly> {
    let nvars = source.read_u32::<LittleEndian>()? as usize;

    let mut vars = Vec::with_capacity(nvars.min(1024));
    for _ in 0..nvars {
        let len = source.read_u32::<LittleEndian>()? as usize;
        let mut name = vec![0; len];
        source.read_exact(&mut name)?;

        let name = String::from_utf8(name).map_err(|_| invalid("variable name is not UTF-8"))?;
        let v = Variable::new(&name).map_err(|_| invalid("invalid variable name"))?;

        if let Some(last) = vars.last() {
            if *last >= v {
                return Err(invalid("variable table is not sorted"));
            }
        }
        vars.push(v);
    }

    let nterms = source.read_u64::<LittleEndian>()? as usize;

    let mut p = MultivariatePolynomial::new(&Z, Some(nterms.min(1024)), Arc::new(vars));
    let mut exponents = vec![0u16; nvars];
    for _ in 0..nterms {
        for e in &mut exponents {
            let v = source.read_u32::<LittleEndian>()?;
            if v > u16::MAX as u32 {
                return Err(invalid("exponent out of range"));
            }
            *e = v as u16;
        }

        let c = read_coefficient(source)?;
        if Integer::is_zero(&c) {
            return Err(invalid("zero coefficient"));
        }

        p.append_monomial(c, &exponents);
    }

    Ok(p)
}

fn write_coefficient<W: Write>(dest: &mut W, c: &Integer) -> io::Result<()> {
    dest.write_u8(if c.is_negative() { 1 } else { 0 })?;

    match c {
        Integer::Natural(n) => {
            let le = n.unsigned_abs().to_le_bytes();
            let len = 8 - le.iter().rev().take_while(|b| **b == 0).count();
            dest.write_u32::<LittleEndian>(len as u32)?;
            dest.write_all(&le[..len])
        }
        Integer::Large(r) => {
            let digits = r.as_abs().to_digits::<u8>(Order::Lsf);
            dest.write_u32::<LittleEndian>(digits.len() as u32)?;
            dest.write_all(&digits)
        }
    }
}

fn read_coefficient<R: Read>(source: &mut R) -> io::Result<Integer> {
    let sign = source.read_u8()?;
    if sign > 1 {
        return Err(invalid("bad coefficient sign"));
    }

    let len = source.read_u32::<LittleEndian>()? as usize;
    let mut digits = vec![0; len];
    source.read_exact(&mut digits)?;

    let mut c = Integer::from_large(MultiPrecisionInteger::from_digits(&digits, Order::Lsf));
    if sign == 1 {
        c = -c;
    }

    Ok(c)
}
