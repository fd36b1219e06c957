//! Tokenizer implementation
//!
//! Maximal-munch lexer: characters are appended to a buffer one at a time and
//! the buffer is re-matched against every token rule after each append. The
//! token grows while some rule still matches; the first extension that matches
//! nothing commits the previous match and keeps the extra character for the
//! next token.

use crate::frontend::lexer::tokens::*;
use crate::util::span::{Position, Span};
use std::collections::VecDeque;
use std::str::Chars;
use tracing::trace;

/// Main lexer structure
pub struct Lexer<I>
where
    I: Iterator<Item = char>,
{
    chars: I,
    exhausted: bool,
    /// Characters read but not yet committed to a token
    buffer: String,
    /// Position of the first buffered character
    buffer_start: Position,
    /// Tokens produced by lookahead and not yet consumed
    pending: VecDeque<Token>,
}

impl<'a> Lexer<Chars<'a>> {
    /// Create a new lexer for the given source
    pub fn new(source: &'a str) -> Self {
        Self::from_chars(source.chars())
    }
}

impl<I> Lexer<I>
where
    I: Iterator<Item = char>,
{
    /// Create a lexer over any character stream
    pub fn from_chars(chars: I) -> Self {
        Self {
            chars,
            exhausted: false,
            buffer: String::new(),
            buffer_start: Position::start(),
            pending: VecDeque::new(),
        }
    }

    /// Position of the first character not yet handed out as a token
    pub fn position(&self) -> Position {
        self.pending
            .front()
            .map(|t| t.span.start)
            .unwrap_or(self.buffer_start)
    }

    /// Consume the next token; `Ok(None)` at end of input
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        if self.pending.is_empty() && !self.scan()? {
            return Ok(None);
        }
        Ok(self.pending.pop_front())
    }

    /// Look at the `n`-th upcoming token (0 is the next one) without consuming it
    pub fn peek(
        &mut self,
        n: usize,
    ) -> Result<Option<&Token>, LexError> {
        while self.pending.len() <= n {
            if !self.scan()? {
                break;
            }
        }
        Ok(self.pending.get(n))
    }

    fn next_char(&mut self) -> Option<char> {
        if self.exhausted {
            return None;
        }
        let c = self.chars.next();
        if c.is_none() {
            self.exhausted = true;
        }
        c
    }

    /// Scan one significant token into the pending queue.
    ///
    /// Returns `Ok(false)` when the input is exhausted cleanly.
    fn scan(&mut self) -> Result<bool, LexError> {
        loop {
            let mut active = if self.buffer.is_empty() {
                None
            } else {
                TokenKind::classify(&self.buffer).map(|kind| (kind, self.buffer.len()))
            };

            while let Some(c) = self.next_char() {
                self.buffer.push(c);
                match TokenKind::classify(&self.buffer) {
                    Some(kind) => active = Some((kind, self.buffer.len())),
                    None if active.is_some() => break,
                    None => {}
                }
            }

            let Some((kind, len)) = active else {
                if self.buffer.is_empty() {
                    return Ok(false);
                }
                let text = std::mem::take(&mut self.buffer);
                return Err(LexError::UnmatchedInput {
                    text,
                    position: self.buffer_start,
                });
            };

            let rest = self.buffer.split_off(len);
            let text = std::mem::replace(&mut self.buffer, rest);
            let span = Span::covering(self.buffer_start, &text);
            self.buffer_start = span.end;

            if kind.is_trivia() {
                continue;
            }

            trace!(kind = ?kind, text = %text, "token");
            self.pending.push_back(Token::new(kind, text, span));
            return Ok(true);
        }
    }
}

impl<I> Iterator for Lexer<I>
where
    I: Iterator<Item = char>,
{
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}
