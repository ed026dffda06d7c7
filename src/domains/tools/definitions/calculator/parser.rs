//! Recursive-descent parser for arithmetic expressions.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! comparison := sum (cmp_op sum)*
//! sum        := term (('+' | '-') term)*
//! term       := unary (('*' | '/' | '//' | '%') unary)*
//! unary      := ('+' | '-') unary | power
//! power      := primary (('**' | '^') unary)?
//! primary    := NUMBER | NAME | NAME '(' args? ')' | '(' comparison ')'
//! ```
//!
//! Names are resolved against the allow-list while parsing, so an unknown
//! identifier never reaches evaluation.

use super::builtins::{Constant, Function, Symbol};
use super::error::CalcError;
use super::lexer::{Token, TokenKind};
use super::value::Value;

/// Maximum nesting of parentheses, call arguments and prefix operators.
pub const MAX_DEPTH: usize = 64;

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(Value),
    Constant(Constant),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// A comparison chain: `a < b <= c` holds when every adjacent pair holds.
    Compare {
        first: Box<Expr>,
        rest: Vec<(CompareOp, Expr)>,
    },
    Call {
        function: Function,
        args: Vec<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Pos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    NotEq,
}

impl CompareOp {
    fn from_token(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Lt => Some(Self::Lt),
            TokenKind::Le => Some(Self::Le),
            TokenKind::Gt => Some(Self::Gt),
            TokenKind::Ge => Some(Self::Ge),
            TokenKind::EqEq => Some(Self::Eq),
            TokenKind::NotEq => Some(Self::NotEq),
            _ => None,
        }
    }

    /// Apply the comparison to two operands of the same type.
    pub fn apply<T: PartialOrd>(self, left: T, right: T) -> bool {
        match self {
            Self::Lt => left < right,
            Self::Le => left <= right,
            Self::Gt => left > right,
            Self::Ge => left >= right,
            Self::Eq => left == right,
            Self::NotEq => left != right,
        }
    }
}

/// Parse a token stream produced by [`tokenize`](super::lexer::tokenize).
pub fn parse(tokens: &[Token]) -> Result<Expr, CalcError> {
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.comparison()?;
    let token = parser.peek();
    if token.kind != TokenKind::Eof {
        return Err(CalcError::syntax(
            format!("unexpected {}", token.kind),
            token.position,
        ));
    }
    Ok(expr)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> &'a Token {
        // The lexer always terminates the stream with Eof, and Eof is never consumed.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if &self.peek().kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), CalcError> {
        let token = self.peek();
        if &token.kind == kind {
            self.advance();
            Ok(())
        } else {
            Err(CalcError::syntax(
                format!("expected {} but found {}", kind, token.kind),
                token.position,
            ))
        }
    }

    fn enter(&mut self) -> Result<(), CalcError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CalcError::TooDeep { max: MAX_DEPTH });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn comparison(&mut self) -> Result<Expr, CalcError> {
        let first = self.sum()?;
        let mut rest = Vec::new();
        while let Some(op) = CompareOp::from_token(&self.peek().kind) {
            self.advance();
            rest.push((op, self.sum()?));
        }
        if rest.is_empty() {
            Ok(first)
        } else {
            Ok(Expr::Compare {
                first: Box::new(first),
                rest,
            })
        }
    }

    fn sum(&mut self) -> Result<Expr, CalcError> {
        let mut left = self.term()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.term()?;
            left = binary(op, left, right);
        }
    }

    fn term(&mut self) -> Result<Expr, CalcError> {
        let mut left = self.unary()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::DoubleSlash => BinaryOp::FloorDiv,
                TokenKind::Percent => BinaryOp::Mod,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.unary()?;
            left = binary(op, left, right);
        }
    }

    fn unary(&mut self) -> Result<Expr, CalcError> {
        let op = match self.peek().kind {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Pos,
            _ => return self.power(),
        };
        self.advance();
        self.enter()?;
        let operand = self.unary()?;
        self.leave();
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn power(&mut self) -> Result<Expr, CalcError> {
        let base = self.primary()?;
        if matches!(self.peek().kind, TokenKind::DoubleStar | TokenKind::Caret) {
            self.advance();
            self.enter()?;
            let exponent = self.unary()?;
            self.leave();
            return Ok(binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, CalcError> {
        let token = self.advance();
        match &token.kind {
            TokenKind::Int(value) => Ok(Expr::Number(Value::Int(*value))),
            TokenKind::Float(value) => Ok(Expr::Number(Value::Float(*value))),
            TokenKind::Name(name) => self.name(name),
            TokenKind::LParen => {
                self.enter()?;
                let inner = self.comparison()?;
                self.expect(&TokenKind::RParen)?;
                self.leave();
                Ok(inner)
            }
            other => Err(CalcError::syntax(
                format!("unexpected {}", other),
                token.position,
            )),
        }
    }

    fn name(&mut self, name: &str) -> Result<Expr, CalcError> {
        let called = self.peek().kind == TokenKind::LParen;
        match Symbol::lookup(name) {
            None => Err(CalcError::UnknownName(name.to_string())),
            Some(Symbol::Constant(constant)) if called => {
                Err(CalcError::NotCallable(constant.name()))
            }
            Some(Symbol::Constant(constant)) => Ok(Expr::Constant(constant)),
            Some(Symbol::Function(function)) if called => {
                self.advance();
                let args = self.arguments()?;
                Ok(Expr::Call { function, args })
            }
            Some(Symbol::Function(function)) => Err(CalcError::UncalledFunction(function.name())),
        }
    }

    /// Parse call arguments after the opening parenthesis.
    fn arguments(&mut self) -> Result<Vec<Expr>, CalcError> {
        self.enter()?;
        let mut args = Vec::new();
        while !self.eat(&TokenKind::RParen) {
            args.push(self.comparison()?);
            if !self.eat(&TokenKind::Comma) {
                self.expect(&TokenKind::RParen)?;
                break;
            }
        }
        self.leave();
        Ok(args)
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}
