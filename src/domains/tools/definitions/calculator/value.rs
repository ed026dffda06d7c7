//! Numeric values and their arithmetic.
//!
//! Integers are 64-bit and checked; any float operand promotes the result to
//! a float. Booleans come out of comparisons and count as 0 or 1 in
//! arithmetic.

use std::fmt;

use super::error::CalcError;
use super::parser::CompareOp;

/// Result of evaluating an expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// Operands of a binary operation after promotion to a common type.
enum Pair {
    Ints(i64, i64),
    Floats(f64, f64),
}

impl Value {
    /// Integer view of the value, if it is not a float.
    pub fn as_int(self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(value),
            Self::Bool(value) => Some(i64::from(value)),
            Self::Float(_) => None,
        }
    }

    /// Float view of the value.
    pub fn to_f64(self) -> f64 {
        match self {
            Self::Int(value) => value as f64,
            Self::Bool(value) => f64::from(u8::from(value)),
            Self::Float(value) => value,
        }
    }

    fn pair(self, rhs: Self) -> Pair {
        match (self.as_int(), rhs.as_int()) {
            (Some(left), Some(right)) => Pair::Ints(left, right),
            _ => Pair::Floats(self.to_f64(), rhs.to_f64()),
        }
    }

    pub fn add(self, rhs: Self) -> Result<Self, CalcError> {
        match self.pair(rhs) {
            Pair::Ints(a, b) => checked(a.checked_add(b)),
            Pair::Floats(a, b) => Ok(Self::Float(a + b)),
        }
    }

    pub fn sub(self, rhs: Self) -> Result<Self, CalcError> {
        match self.pair(rhs) {
            Pair::Ints(a, b) => checked(a.checked_sub(b)),
            Pair::Floats(a, b) => Ok(Self::Float(a - b)),
        }
    }

    pub fn mul(self, rhs: Self) -> Result<Self, CalcError> {
        match self.pair(rhs) {
            Pair::Ints(a, b) => checked(a.checked_mul(b)),
            Pair::Floats(a, b) => Ok(Self::Float(a * b)),
        }
    }

    /// True division, always producing a float.
    pub fn div(self, rhs: Self) -> Result<Self, CalcError> {
        match self.pair(rhs) {
            Pair::Ints(_, 0) => Err(CalcError::ZeroDivision("division by zero")),
            Pair::Ints(a, b) => Ok(Self::Float(a as f64 / b as f64)),
            Pair::Floats(_, b) if b == 0.0 => {
                Err(CalcError::ZeroDivision("float division by zero"))
            }
            Pair::Floats(a, b) => Ok(Self::Float(a / b)),
        }
    }

    /// Division rounded toward negative infinity.
    pub fn floor_div(self, rhs: Self) -> Result<Self, CalcError> {
        match self.pair(rhs) {
            Pair::Ints(_, 0) => Err(CalcError::ZeroDivision(
                "integer division or modulo by zero",
            )),
            Pair::Ints(a, b) => {
                let quotient = a.checked_div(b).ok_or_else(CalcError::integer_overflow)?;
                if a % b != 0 && (a < 0) != (b < 0) {
                    Ok(Self::Int(quotient - 1))
                } else {
                    Ok(Self::Int(quotient))
                }
            }
            Pair::Floats(_, b) if b == 0.0 => {
                Err(CalcError::ZeroDivision("float floor division by zero"))
            }
            Pair::Floats(a, b) => Ok(Self::Float(float_divmod(a, b).0)),
        }
    }

    /// Remainder taking the sign of the divisor.
    pub fn modulo(self, rhs: Self) -> Result<Self, CalcError> {
        match self.pair(rhs) {
            Pair::Ints(_, 0) => Err(CalcError::ZeroDivision(
                "integer division or modulo by zero",
            )),
            Pair::Ints(a, b) => {
                let rem = a.wrapping_rem(b);
                if rem != 0 && (rem < 0) != (b < 0) {
                    Ok(Self::Int(rem + b))
                } else {
                    Ok(Self::Int(rem))
                }
            }
            Pair::Floats(_, b) if b == 0.0 => Err(CalcError::ZeroDivision("float modulo")),
            Pair::Floats(a, b) => Ok(Self::Float(float_divmod(a, b).1)),
        }
    }

    pub fn pow(self, rhs: Self) -> Result<Self, CalcError> {
        match self.pair(rhs) {
            Pair::Ints(0, b) if b < 0 => Err(CalcError::ZeroDivision(
                "0.0 cannot be raised to a negative power",
            )),
            Pair::Ints(a, b) if b < 0 => Ok(Self::Float((a as f64).powf(b as f64))),
            Pair::Ints(a, b) => match a {
                0 | 1 => Ok(Self::Int(if b == 0 { 1 } else { a })),
                -1 => Ok(Self::Int(if b % 2 == 0 { 1 } else { -1 })),
                _ => checked(u32::try_from(b).ok().and_then(|exp| a.checked_pow(exp))),
            },
            Pair::Floats(a, b) => {
                if a == 0.0 && b < 0.0 {
                    return Err(CalcError::ZeroDivision(
                        "0.0 cannot be raised to a negative power",
                    ));
                }
                if a < 0.0 && b.is_finite() && b.fract() != 0.0 {
                    return Err(CalcError::Type(
                        "complex results are not supported".to_string(),
                    ));
                }
                let result = a.powf(b);
                if result.is_infinite() && a.is_finite() && b.is_finite() {
                    return Err(CalcError::Overflow("numerical result out of range"));
                }
                Ok(Self::Float(result))
            }
        }
    }

    pub fn neg(self) -> Result<Self, CalcError> {
        match self {
            Self::Float(value) => Ok(Self::Float(-value)),
            other => checked(other.as_int().and_then(i64::checked_neg)),
        }
    }

    pub fn pos(self) -> Self {
        match self {
            Self::Bool(value) => Self::Int(i64::from(value)),
            other => other,
        }
    }

    pub fn abs(self) -> Result<Self, CalcError> {
        match self {
            Self::Float(value) => Ok(Self::Float(value.abs())),
            other => checked(other.as_int().and_then(i64::checked_abs)),
        }
    }

    /// Evaluate `self <op> rhs`, comparing integers exactly and everything
    /// else as floats.
    pub fn compare(self, op: CompareOp, rhs: Self) -> bool {
        match self.pair(rhs) {
            Pair::Ints(a, b) => op.apply(a, b),
            Pair::Floats(a, b) => op.apply(a, b),
        }
    }
}

/// Floored quotient and remainder of two floats, `b != 0`.
///
/// The quotient is derived from the remainder so that `q * b + r` stays as
/// close to `a` as rounding allows; `(a / b).floor()` alone can be off by one
/// when `a / b` rounds up to an integer.
fn float_divmod(a: f64, b: f64) -> (f64, f64) {
    let mut rem = a % b;
    let mut div = (a - rem) / b;
    if rem != 0.0 {
        if (rem < 0.0) != (b < 0.0) {
            rem += b;
            div -= 1.0;
        }
    } else {
        rem = 0.0_f64.copysign(b);
    }

    let quotient = if div != 0.0 {
        let floor = div.floor();
        if div - floor > 0.5 { floor + 1.0 } else { floor }
    } else {
        0.0_f64.copysign(a / b)
    };
    (quotient, rem)
}

fn checked(value: Option<i64>) -> Result<Value, CalcError> {
    value.map(Value::Int).ok_or_else(CalcError::integer_overflow)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{}", value),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Float(value) => f.write_str(&format_float(*value)),
        }
    }
}

/// Format a float in shortest round-trip form.
///
/// Integral values keep a trailing `.0`; magnitudes outside `[1e-4, 1e16)`
/// use scientific notation with a signed, two-digit exponent.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let formatted = format!("{:e}", value);
        if let Some((mantissa, exponent)) = formatted.split_once('e') {
            if let Ok(exponent) = exponent.parse::<i32>() {
                let sign = if exponent < 0 { '-' } else { '+' };
                return format!("{}e{}{:02}", mantissa, sign, exponent.abs());
            }
        }
        return formatted;
    }

    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
