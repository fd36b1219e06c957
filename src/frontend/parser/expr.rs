//! Expression productions

use super::ast::{BinOp, Expr};
use super::state::ParseError;
use super::{Parser, MAX_NESTING_DEPTH};
use crate::frontend::lexer::{Token, TokenKind};
use crate::util::span::Span;

impl<I> Parser<I>
where
    I: Iterator<Item = char>,
{
    /// addsub := muldiv (('+' | '-') muldiv)*
    pub(super) fn parse_add_sub(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_mul_div()?;
        loop {
            let op = match self.state.peek_kind()? {
                Some(TokenKind::Plus) => BinOp::Add,
                Some(TokenKind::Minus) => BinOp::Sub,
                _ => return Ok(left),
            };
            self.state.bump()?;
            let right = self.parse_mul_div()?;
            left = Expr::binary(op, left, right);
        }
    }

    /// muldiv := exp (('*' | '/') exp)*
    fn parse_mul_div(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_exp()?;
        loop {
            let op = match self.state.peek_kind()? {
                Some(TokenKind::Star) => BinOp::Mul,
                Some(TokenKind::Slash) => BinOp::Div,
                _ => return Ok(left),
            };
            self.state.bump()?;
            let right = self.parse_exp()?;
            left = Expr::binary(op, left, right);
        }
    }

    /// exp := atom ('^' exp)?
    fn parse_exp(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_atom()?;
        if self.state.at(TokenKind::Caret)? {
            let caret = self.state.expect(TokenKind::Caret)?;
            self.descend(caret.span)?;
            let exponent = self.parse_exp()?;
            self.depth -= 1;
            return Ok(Expr::pow(base, exponent));
        }
        Ok(base)
    }

    /// atom := NUMBER | DECIMAL | IDENT | IDENT '(' addsub ')' | '(' addsub ')'
    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        let token = self.state.bump_required("an expression")?;
        match token.kind {
            TokenKind::Number | TokenKind::DecimalNumber => parse_number(token),
            TokenKind::Identifier => {
                if self.state.at(TokenKind::LParen)? {
                    let open = self.state.expect(TokenKind::LParen)?;
                    self.descend(open.span)?;
                    let operand = self.parse_add_sub()?;
                    self.state.expect(TokenKind::RParen)?;
                    self.depth -= 1;
                    Ok(Expr::call(token.text, operand))
                } else {
                    Ok(Expr::Variable(token.text))
                }
            }
            TokenKind::LParen => {
                self.descend(token.span)?;
                let inner = self.parse_add_sub()?;
                self.state.expect(TokenKind::RParen)?;
                self.depth -= 1;
                Ok(inner)
            }
            _ => Err(ParseError::unexpected(token)),
        }
    }
}

impl<I> Parser<I>
where
    I: Iterator<Item = char>,
{
    /// Enter one nesting level opened by the token at `span`
    fn descend(
        &mut self,
        span: Span,
    ) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                span,
            });
        }
        self.depth += 1;
        Ok(())
    }
}

fn parse_number(token: Token) -> Result<Expr, ParseError> {
    match token.text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Expr::Number(value)),
        _ => Err(ParseError::InvalidNumber {
            text: token.text,
            span: token.span,
        }),
    }
}
