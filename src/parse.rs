use log::{debug, trace};

use crate::errors::*;
use crate::expr::{BinaryOp, Expr, UnaryOp};
use crate::lexer::{bracket_balance, Token, TokenKind};
use crate::percent::rewrite_layman_percentage;

// Checks that do not need the tree: brackets are balanced, there are no
// numbers without an operator between them, and all characters are known
fn validate(tokens: &[Token]) -> Result<(), CalcError> {
    let balance = bracket_balance(tokens);
    if balance > 0 {
        return Err(CalcError::OpenBracketMismatch);
    }
    if balance < 0 {
        return Err(CalcError::ClosingBracketMismatch);
    }

    let adjacent = tokens
        .windows(2)
        .any(|w| matches!((w[0], w[1]), (Token::Number(..), Token::Number(..))));
    if adjacent {
        return Err(CalcError::InsufficientOps);
    }

    match tokens.iter().find(|t| t.kind() == TokenKind::Invalid) {
        Some(Token::Unknown(c)) => Err(CalcError::InvalidChar(*c)),
        Some(t) => Err(CalcError::UnexpectedToken(t.to_string())),
        None => Ok(()),
    }
}

/// Recursive descent parser. Grammar, from the lowest priority:
///
/// ```text
/// expression := term (('+' | '-') term)*
/// term       := power (('*' | '/') power)*
/// power      := factor ('^' power)?
/// factor     := number | '(' expression ')' | ('+' | '-') factor | '%' factor
/// ```
struct ExprParser {
    tokens: Vec<Token>,
    cursor: usize,
}

impl ExprParser {
    fn current(&self) -> Result<Token, CalcError> {
        match self.tokens.get(self.cursor) {
            Some(t) => Ok(*t),
            None => Err(CalcError::EmptyExpression),
        }
    }

    fn binary_op(c: char) -> Result<BinaryOp, CalcError> {
        BinaryOp::from_char(c).ok_or_else(|| CalcError::UnexpectedToken(c.to_string()))
    }

    fn expression(&mut self) -> Result<Expr, CalcError> {
        let mut lhs = self.term()?;
        while let Token::Additive(c) = self.current()? {
            self.cursor += 1;
            let rhs = self.term()?;
            lhs = Expr::binary(Self::binary_op(c)?, lhs, rhs);
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, CalcError> {
        let mut lhs = self.power()?;
        while let Token::Multiplicative(c) = self.current()? {
            self.cursor += 1;
            let rhs = self.power()?;
            lhs = Expr::binary(Self::binary_op(c)?, lhs, rhs);
        }
        Ok(lhs)
    }

    // right-associative: 2^3^2 is 2^(3^2)
    fn power(&mut self) -> Result<Expr, CalcError> {
        let lhs = self.factor()?;
        if self.current()? == Token::Exponential {
            self.cursor += 1;
            let rhs = self.power()?;
            return Ok(Expr::binary(BinaryOp::Pow, lhs, rhs));
        }
        Ok(lhs)
    }

    fn factor(&mut self) -> Result<Expr, CalcError> {
        let token = self.current()?;
        match token {
            Token::Number(v) => {
                self.cursor += 1;
                Ok(Expr::Operand(v))
            }
            // brackets were balanced before the layman rewrite, so they are
            // not matched here: the closing one is just skipped
            Token::Bracket(..) => {
                self.cursor += 1;
                let e = self.expression()?;
                self.cursor += 1;
                Ok(e)
            }
            Token::Additive(..) | Token::Percentage => {
                self.cursor += 1;
                let symbol = token.to_string();
                let op = symbol
                    .chars()
                    .next()
                    .and_then(UnaryOp::from_char)
                    .ok_or_else(|| CalcError::UnexpectedToken(symbol.clone()))?;
                Ok(Expr::unary(op, self.factor()?))
            }
            Token::Eof => Err(CalcError::EmptyExpression),
            Token::Multiplicative(..) | Token::Exponential | Token::Unknown(..) => {
                Err(CalcError::UnexpectedToken(token.to_string()))
            }
        }
    }
}

/// Builds an expression tree from a token list produced by `tokenize`.
/// Layman percentages (`A + B%`) are rewritten to `(A) * (1 + B%)` first.
/// Tokens after a complete expression are ignored
pub fn parse(tokens: Vec<Token>) -> Result<Expr, CalcError> {
    if let Err(e) = validate(&tokens) {
        debug!("rejected before parsing: {}", e);
        return Err(e);
    }

    let tokens = rewrite_layman_percentage(tokens);
    trace!("after layman rewrite: {:?}", tokens);

    let mut parser = ExprParser { tokens, cursor: 0 };
    match parser.expression() {
        Ok(e) => {
            trace!("tree: {}", e);
            Ok(e)
        }
        Err(e) => {
            debug!("syntax error at token {}: {}", parser.cursor, e);
            Err(e)
        }
    }
}
