//! Expression evaluation.

use super::error::CalcError;
use super::lexer::tokenize;
use super::parser::{BinaryOp, Expr, UnaryOp, parse};
use super::value::Value;

/// Longest accepted expression, in characters.
pub const MAX_EXPRESSION_LEN: usize = 1024;

/// Tokenize, parse and evaluate `input`.
pub fn evaluate_str(input: &str) -> Result<Value, CalcError> {
    if input.chars().count() > MAX_EXPRESSION_LEN {
        return Err(CalcError::TooLong {
            max: MAX_EXPRESSION_LEN,
        });
    }
    let tokens = tokenize(input)?;
    let expr = parse(&tokens)?;
    evaluate(&expr)
}

/// Evaluate a parsed expression tree.
pub fn evaluate(expr: &Expr) -> Result<Value, CalcError> {
    match expr {
        Expr::Number(value) => Ok(*value),
        Expr::Constant(constant) => Ok(constant.value()),
        Expr::Unary { op, operand } => {
            let value = evaluate(operand)?;
            match op {
                UnaryOp::Neg => value.neg(),
                UnaryOp::Pos => Ok(value.pos()),
            }
        }
        Expr::Binary { op, left, right } => {
            let left = evaluate(left)?;
            let right = evaluate(right)?;
            match op {
                BinaryOp::Add => left.add(right),
                BinaryOp::Sub => left.sub(right),
                BinaryOp::Mul => left.mul(right),
                BinaryOp::Div => left.div(right),
                BinaryOp::FloorDiv => left.floor_div(right),
                BinaryOp::Mod => left.modulo(right),
                BinaryOp::Pow => left.pow(right),
            }
        }
        Expr::Compare { first, rest } => {
            let mut left = evaluate(first)?;
            for (op, operand) in rest {
                let right = evaluate(operand)?;
                if !left.compare(*op, right) {
                    return Ok(Value::Bool(false));
                }
                left = right;
            }
            Ok(Value::Bool(true))
        }
        Expr::Call { function, args } => {
            let args = args.iter().map(evaluate).collect::<Result<Vec<_>, _>>()?;
            function.apply(&args)
        }
    }
}
