//! Allow-listed names: the only identifiers an expression may use.

use super::error::CalcError;
use super::value::Value;

/// Functions callable from an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Abs,
    Round,
    Pow,
    Sqrt,
    Sin,
    Cos,
}

/// Named constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

/// A resolved allow-listed name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Function(Function),
    Constant(Constant),
}

impl Symbol {
    /// Resolve `name` against the allow-list.
    pub fn lookup(name: &str) -> Option<Self> {
        let symbol = match name {
            "abs" => Self::Function(Function::Abs),
            "round" => Self::Function(Function::Round),
            "pow" => Self::Function(Function::Pow),
            "sqrt" => Self::Function(Function::Sqrt),
            "sin" => Self::Function(Function::Sin),
            "cos" => Self::Function(Function::Cos),
            "pi" => Self::Constant(Constant::Pi),
            "e" => Self::Constant(Constant::E),
            _ => return None,
        };
        Some(symbol)
    }
}

impl Constant {
    pub fn name(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
        }
    }

    pub fn value(self) -> Value {
        match self {
            Self::Pi => Value::Float(std::f64::consts::PI),
            Self::E => Value::Float(std::f64::consts::E),
        }
    }
}

impl Function {
    pub fn name(self) -> &'static str {
        match self {
            Self::Abs => "abs",
            Self::Round => "round",
            Self::Pow => "pow",
            Self::Sqrt => "sqrt",
            Self::Sin => "sin",
            Self::Cos => "cos",
        }
    }

    /// Apply the function to already evaluated arguments.
    pub fn apply(self, args: &[Value]) -> Result<Value, CalcError> {
        match (self, args) {
            (Self::Abs, [x]) => x.abs(),
            (Self::Round, [x]) => round(*x),
            (Self::Round, [x, ndigits]) => round_to(*x, *ndigits),
            (Self::Pow, [base, exponent]) => base.pow(*exponent),
            (Self::Sqrt, [x]) => {
                let x = x.to_f64();
                if x < 0.0 {
                    return Err(CalcError::Domain);
                }
                Ok(Value::Float(x.sqrt()))
            }
            (Self::Sin, [x]) => trig(*x, f64::sin),
            (Self::Cos, [x]) => trig(*x, f64::cos),
            _ => Err(CalcError::Arity {
                name: self.name(),
                expected: self.expected_arguments(),
                given: args.len(),
            }),
        }
    }

    fn expected_arguments(self) -> &'static str {
        match self {
            Self::Round => "from 1 to 2 arguments",
            Self::Pow => "exactly 2 arguments",
            Self::Abs | Self::Sqrt | Self::Sin | Self::Cos => "exactly one argument",
        }
    }
}

fn trig(x: Value, op: fn(f64) -> f64) -> Result<Value, CalcError> {
    let x = x.to_f64();
    if x.is_infinite() {
        return Err(CalcError::Domain);
    }
    Ok(Value::Float(op(x)))
}

/// Round to the nearest integer, ties to even.
fn round(x: Value) -> Result<Value, CalcError> {
    let value = match x {
        Value::Float(value) => value,
        other => return Ok(other.pos()),
    };
    if value.is_nan() {
        return Err(CalcError::Type("cannot convert float NaN to integer".to_string()));
    }
    if value.is_infinite() {
        return Err(CalcError::Overflow("cannot convert float infinity to integer"));
    }
    let rounded = value.round_ties_even();
    // 2^63 is exactly representable; anything at or above it does not fit.
    if rounded >= 9_223_372_036_854_775_808.0 || rounded < -9_223_372_036_854_775_808.0 {
        return Err(CalcError::integer_overflow());
    }
    Ok(Value::Int(rounded as i64))
}

/// Round to `ndigits` decimal places, ties to even.
fn round_to(x: Value, ndigits: Value) -> Result<Value, CalcError> {
    let ndigits = ndigits.as_int().ok_or_else(|| {
        CalcError::Type("'float' object cannot be interpreted as an integer".to_string())
    })?;
    match x.as_int() {
        Some(value) => round_int(value, ndigits),
        None => Ok(Value::Float(round_float(x.to_f64(), ndigits))),
    }
}

fn round_float(value: f64, ndigits: i64) -> f64 {
    if !value.is_finite() || ndigits > 22 {
        return value;
    }
    if ndigits < -308 {
        return 0.0_f64.copysign(value);
    }
    let scale = 10f64.powi(ndigits as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round_ties_even() / scale
}

fn round_int(value: i64, ndigits: i64) -> Result<Value, CalcError> {
    if ndigits >= 0 {
        return Ok(Value::Int(value));
    }
    let modulus = u32::try_from(ndigits.unsigned_abs())
        .ok()
        .and_then(|exp| 10i64.checked_pow(exp));
    let Some(modulus) = modulus else {
        // 10^19 exceeds i64: only values past the halfway point round away from zero.
        if value.unsigned_abs() > 5_000_000_000_000_000_000 {
            return Err(CalcError::integer_overflow());
        }
        return Ok(Value::Int(0));
    };
    let quotient = value.div_euclid(modulus);
    let twice_rem = value.rem_euclid(modulus) * 2;
    let quotient = if twice_rem > modulus || (twice_rem == modulus && quotient % 2 != 0) {
        quotient + 1
    } else {
        quotient
    };
    quotient
        .checked_mul(modulus)
        .map(Value::Int)
        .ok_or_else(CalcError::integer_overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_allow_list() {
        for name in ["abs", "round", "pow", "sqrt", "sin", "cos", "pi", "e"] {
            assert!(Symbol::lookup(name).is_some(), "{} should resolve", name);
        }
        for name in ["exec", "eval", "__import__", "open", "os", "tan", "PI"] {
            assert!(Symbol::lookup(name).is_none(), "{} should not resolve", name);
        }
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(Function::Sqrt.apply(&[Value::Int(16)]), Ok(Value::Float(4.0)));
        assert_eq!(Function::Sqrt.apply(&[Value::Int(-1)]), Err(CalcError::Domain));
    }

    #[test]
    fn test_trig_domain() {
        assert_eq!(Function::Sin.apply(&[Value::Int(0)]), Ok(Value::Float(0.0)));
        assert_eq!(Function::Cos.apply(&[Value::Int(0)]), Ok(Value::Float(1.0)));
        assert_eq!(
            Function::Cos.apply(&[Value::Float(f64::INFINITY)]),
            Err(CalcError::Domain)
        );
    }

    #[test]
    fn test_round_ties_to_even() {
        assert_eq!(Function::Round.apply(&[Value::Float(2.5)]), Ok(Value::Int(2)));
        assert_eq!(Function::Round.apply(&[Value::Float(3.5)]), Ok(Value::Int(4)));
        assert_eq!(Function::Round.apply(&[Value::Float(-0.5)]), Ok(Value::Int(0)));
        assert_eq!(Function::Round.apply(&[Value::Int(7)]), Ok(Value::Int(7)));
    }

    #[test]
    fn test_round_with_digits() {
        assert_eq!(
            Function::Round.apply(&[Value::Float(3.14159), Value::Int(2)]),
            Ok(Value::Float(3.14))
        );
        assert_eq!(
            Function::Round.apply(&[Value::Int(1250), Value::Int(-2)]),
            Ok(Value::Int(1200))
        );
        assert_eq!(
            Function::Round.apply(&[Value::Int(1350), Value::Int(-2)]),
            Ok(Value::Int(1400))
        );
        assert_eq!(
            Function::Round.apply(&[Value::Int(-1251), Value::Int(-2)]),
            Ok(Value::Int(-1300))
        );
        assert!(matches!(
            Function::Round.apply(&[Value::Float(1.5), Value::Float(1.0)]),
            Err(CalcError::Type(_))
        ));
    }

    #[test]
    fn test_round_non_finite() {
        assert!(Function::Round.apply(&[Value::Float(f64::NAN)]).is_err());
        assert!(Function::Round.apply(&[Value::Float(f64::INFINITY)]).is_err());
        assert!(Function::Round.apply(&[Value::Float(1e300)]).is_err());
    }

    #[test]
    fn test_abs_and_pow() {
        assert_eq!(Function::Abs.apply(&[Value::Int(-3)]), Ok(Value::Int(3)));
        assert_eq!(Function::Abs.apply(&[Value::Float(-2.5)]), Ok(Value::Float(2.5)));
        assert_eq!(
            Function::Pow.apply(&[Value::Int(2), Value::Int(8)]),
            Ok(Value::Int(256))
        );
    }

    #[test]
    fn test_arity_errors() {
        let err = Function::Sqrt.apply(&[Value::Int(1), Value::Int(2)]).unwrap_err();
        assert_eq!(err.to_string(), "sqrt() takes exactly one argument (2 given)");

        let err = Function::Pow.apply(&[Value::Int(1)]).unwrap_err();
        assert_eq!(err.to_string(), "pow() takes exactly 2 arguments (1 given)");

        let err = Function::Round.apply(&[]).unwrap_err();
        assert_eq!(err.to_string(), "round() takes from 1 to 2 arguments (0 given)");
    }
}
