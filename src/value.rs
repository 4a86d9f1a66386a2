//! Numeric scalar values: real or complex floating point.

use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_complex::Complex64;

/// A numeric literal inside an expression.
///
/// Arithmetic runs in the complex domain and results collapse back to
/// [`Value::Real`] whenever the imaginary part is exactly zero, so equal
/// numbers always share one representation for hashing and equality.
#[derive(Clone, Copy, Debug)]
pub enum Value {
    Real(f64),
    Complex(Complex64),
}

impl Value {
    pub const ZERO: Value = Value::Real(0.0);
    pub const ONE: Value = Value::Real(1.0);

    /// Canonicalise a complex number, collapsing a zero imaginary part.
    pub fn from_complex(z: Complex64) -> Self {
        if z.im == 0.0 {
            Value::Real(z.re)
        } else {
            Value::Complex(z)
        }
    }

    pub fn as_complex(&self) -> Complex64 {
        match *self {
            Value::Real(x) => Complex64::new(x, 0.0),
            Value::Complex(z) => z,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.as_complex() == Complex64::ZERO
    }

    pub fn is_one(&self) -> bool {
        self.as_complex() == Complex64::ONE
    }

    /// The value as an exact integer, if it is one. Power reduction of
    /// self-inverse operators only applies to integral exponents.
    pub fn as_integer(&self) -> Option<i64> {
        match *self {
            Value::Real(x) if x.is_finite() && x.fract() == 0.0 => Some(x as i64),
            _ => None,
        }
    }

    pub fn conjugate(&self) -> Value {
        Value::from_complex(self.as_complex().conj())
    }

    /// The real part, the accessor required of any numeric backend value.
    pub fn real(&self) -> f64 {
        self.as_complex().re
    }

    pub fn pow(&self, other: &Value) -> Value {
        match (self, other) {
            // A non-negative real base (or an integral exponent) stays on
            // the real line.
            (Value::Real(a), Value::Real(b)) if *a >= 0.0 || b.fract() == 0.0 => {
                Value::Real(a.powf(*b))
            }
            _ => Value::from_complex(self.as_complex().powc(other.as_complex())),
        }
    }
}

impl Add for Value {
    type Output = Value;

    fn add(self, rhs: Value) -> Value {
        Value::from_complex(self.as_complex() + rhs.as_complex())
    }
}

impl Sub for Value {
    type Output = Value;

    fn sub(self, rhs: Value) -> Value {
        Value::from_complex(self.as_complex() - rhs.as_complex())
    }
}

impl Mul for Value {
    type Output = Value;

    fn mul(self, rhs: Value) -> Value {
        Value::from_complex(self.as_complex() * rhs.as_complex())
    }
}

impl Div for Value {
    type Output = Value;

    fn div(self, rhs: Value) -> Value {
        Value::from_complex(self.as_complex() / rhs.as_complex())
    }
}

impl Neg for Value {
    type Output = Value;

    fn neg(self) -> Value {
        Value::from_complex(-self.as_complex())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.as_complex() == other.as_complex()
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let z = self.as_complex();
        hash_f64(z.re, state);
        if z.im != 0.0 {
            hash_f64(z.im, state);
        }
    }
}

// Normalises -0.0 so hashing agrees with equality.
fn hash_f64<H: Hasher>(x: f64, state: &mut H) {
    let bits = if x == 0.0 { 0 } else { x.to_bits() };
    state.write_u64(bits);
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Real(x)
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Value::Real(x as f64)
    }
}

impl From<i32> for Value {
    fn from(x: i32) -> Self {
        Value::Real(x as f64)
    }
}

impl From<Complex64> for Value {
    fn from(z: Complex64) -> Self {
        Value::from_complex(z)
    }
}
