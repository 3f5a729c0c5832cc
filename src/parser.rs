//! Recursive-descent value parser.
//!
//! Builds the value tree from the token stream, enforcing the nesting depth
//! limit and reporting every syntax error with the expectation that was
//! active when the offending token surfaced. The current token is buffered
//! as a `Result`, so a scan failure is only converted into a decode error at
//! the moment the parser actually looks at it; that is what ties diagnostics
//! like `invalid number` to the right "Expected ..." context.

use crate::config::Config;
use crate::error::{DecodeError, DecodeResult, Expectation, Found, ScanError};
use crate::lexer::{Lexer, Spanned, Token};
use crate::types::{Array, Object, Value};

/// Parser state over a token stream.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Result<Spanned, ScanError>,
    max_depth: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser for the given input.
    ///
    /// Inputs containing raw NUL bytes are rejected here, before any
    /// tokenization: NULs mark UTF-16/UTF-32 encoded text, which would
    /// otherwise be mis-tokenized byte by byte.
    pub fn new(input: &'a [u8], config: &Config) -> DecodeResult<Self> {
        if input.contains(&0) {
            return Err(DecodeError::UnsupportedEncoding);
        }
        let mut lexer = Lexer::new(input, config.refuse_invalid_numbers);
        let current = lexer.next_token();
        Ok(Self {
            lexer,
            current,
            max_depth: config.max_depth,
            depth: 0,
        })
    }

    /// Parse one complete document: a single value followed by end-of-input.
    pub fn parse(&mut self) -> DecodeResult<Value> {
        let value = self.parse_value()?;
        let spanned = self.current(Expectation::TheEnd)?;
        match spanned.token {
            Token::End => Ok(value),
            _ => Err(Self::unexpected(Expectation::TheEnd, spanned)),
        }
    }

    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    /// View the current token, converting a buffered scan failure into a
    /// decode error tagged with what the parser was looking for.
    fn current(&self, expected: Expectation) -> DecodeResult<&Spanned> {
        match &self.current {
            Ok(spanned) => Ok(spanned),
            Err(scan) => Err(DecodeError::Unexpected {
                expected,
                found: Found::Scan(scan.kind),
                offset: scan.offset,
            }),
        }
    }

    fn unexpected(expected: Expectation, spanned: &Spanned) -> DecodeError {
        DecodeError::Unexpected {
            expected,
            found: Found::Token(spanned.token.kind()),
            offset: spanned.offset,
        }
    }

    fn parse_value(&mut self) -> DecodeResult<Value> {
        let spanned = self.current(Expectation::Value)?;
        let value = match &spanned.token {
            Token::Null => Value::Null,
            Token::Bool(b) => Value::Bool(*b),
            Token::Number(n) => Value::Number(*n),
            Token::String(s) => Value::String(s.clone()),
            Token::ArrBegin => {
                let open = spanned.offset;
                return self.parse_array(open);
            }
            Token::ObjBegin => {
                let open = spanned.offset;
                return self.parse_object(open);
            }
            _ => return Err(Self::unexpected(Expectation::Value, spanned)),
        };
        self.advance();
        Ok(value)
    }

    fn enter(&mut self, open: usize) -> DecodeResult<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(DecodeError::ExcessiveNesting {
                depth: self.depth,
                offset: open,
            });
        }
        Ok(())
    }

    fn parse_array(&mut self, open: usize) -> DecodeResult<Value> {
        self.enter(open)?;
        self.advance(); // consume '['

        let mut array = Array::new();
        if matches!(self.current(Expectation::Value)?.token, Token::ArrEnd) {
            self.advance();
            self.depth -= 1;
            return Ok(Value::Array(array));
        }

        loop {
            array.push(self.parse_value()?);
            let spanned = self.current(Expectation::CommaOrArrayEnd)?;
            match spanned.token {
                Token::Comma => self.advance(),
                Token::ArrEnd => {
                    self.advance();
                    break;
                }
                _ => return Err(Self::unexpected(Expectation::CommaOrArrayEnd, spanned)),
            }
        }

        self.depth -= 1;
        Ok(Value::Array(array))
    }

    fn parse_object(&mut self, open: usize) -> DecodeResult<Value> {
        self.enter(open)?;
        self.advance(); // consume '{'

        let mut object = Object::new();
        if matches!(self.current(Expectation::ObjectKeyString)?.token, Token::ObjEnd) {
            self.advance();
            self.depth -= 1;
            return Ok(Value::Object(object));
        }

        loop {
            let spanned = self.current(Expectation::ObjectKeyString)?;
            let key = match &spanned.token {
                Token::String(s) => s.clone(),
                _ => return Err(Self::unexpected(Expectation::ObjectKeyString, spanned)),
            };
            self.advance();

            let spanned = self.current(Expectation::Colon)?;
            match spanned.token {
                Token::Colon => self.advance(),
                _ => return Err(Self::unexpected(Expectation::Colon, spanned)),
            }

            // Duplicate keys are permitted; the last occurrence wins.
            let value = self.parse_value()?;
            object.insert(key, value);

            let spanned = self.current(Expectation::CommaOrObjectEnd)?;
            match spanned.token {
                Token::Comma => self.advance(),
                Token::ObjEnd => {
                    self.advance();
                    break;
                }
                _ => return Err(Self::unexpected(Expectation::CommaOrObjectEnd, spanned)),
            }
        }

        self.depth -= 1;
        Ok(Value::Object(object))
    }
}

/// Decode a document with an explicit configuration.
pub fn parse_document(input: &[u8], config: &Config) -> DecodeResult<Value> {
    let mut parser = Parser::new(input, config)?;
    parser.parse()
}
