//! Decode and encode error types.
//!
//! Every syntax error reports what the parser was looking for, what it found
//! instead, and a 1-based byte offset into the original input:
//!
//! ```text
//! Expected value but found invalid token at character 1
//! ```
//!
//! The "found" half is either a token-class name (`T_END`, `T_OBJ_END`, ...)
//! or, when the lexer itself failed, the scan-failure text (`invalid token`,
//! `invalid number`, ...). The message vocabulary is a compatibility
//! contract; tests assert the full strings.

use std::fmt;

use thiserror::Error;

/// Token classes as they appear in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `{`
    ObjBegin,
    /// `}`
    ObjEnd,
    /// `[`
    ArrBegin,
    /// `]`
    ArrEnd,
    /// String literal
    String,
    /// Numeric literal
    Number,
    /// `true` or `false`
    Boolean,
    /// `null`
    Null,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// End of input
    End,
}

impl TokenKind {
    /// Diagnostic name for this token class.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::ObjBegin => "T_OBJ_BEGIN",
            TokenKind::ObjEnd => "T_OBJ_END",
            TokenKind::ArrBegin => "T_ARR_BEGIN",
            TokenKind::ArrEnd => "T_ARR_END",
            TokenKind::String => "T_STRING",
            TokenKind::Number => "T_NUMBER",
            TokenKind::Boolean => "T_BOOLEAN",
            TokenKind::Null => "T_NULL",
            TokenKind::Colon => "T_COLON",
            TokenKind::Comma => "T_COMMA",
            TokenKind::End => "T_END",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why the lexer could not produce a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanErrorKind {
    /// No token class matches the input at this position.
    InvalidToken,
    /// A numeric-looking prefix did not complete a valid literal.
    InvalidNumber,
    /// Unrecognized character after a backslash in a string.
    InvalidEscape,
    /// Malformed `\uXXXX` escape or broken surrogate pair.
    InvalidUnicodeEscape,
    /// Input ended inside a string literal.
    UnterminatedString,
}

impl ScanErrorKind {
    /// Diagnostic text for this failure.
    pub const fn message(self) -> &'static str {
        match self {
            ScanErrorKind::InvalidToken => "invalid token",
            ScanErrorKind::InvalidNumber => "invalid number",
            ScanErrorKind::InvalidEscape => "invalid escape code",
            ScanErrorKind::InvalidUnicodeEscape => "invalid unicode escape code",
            ScanErrorKind::UnterminatedString => "unexpected end of string",
        }
    }
}

impl fmt::Display for ScanErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A scan failure and the 1-based byte offset it applies to.
///
/// For most failures the offset is the first offending byte. Escape failures
/// point at the backslash that introduced the escape; a broken surrogate pair
/// points at the backslash of the first `\u` unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanError {
    /// Failure classification.
    pub kind: ScanErrorKind,
    /// 1-based byte offset into the input.
    pub offset: usize,
}

/// What the parser was looking for when a syntax error surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// Any value.
    Value,
    /// A string used as an object member key.
    ObjectKeyString,
    /// The `:` between a key and its value.
    Colon,
    /// `,` or `}` after an object member.
    CommaOrObjectEnd,
    /// `,` or `]` after an array element.
    CommaOrArrayEnd,
    /// End of input after the top-level value.
    TheEnd,
}

impl Expectation {
    /// Diagnostic text for this expectation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Expectation::Value => "value",
            Expectation::ObjectKeyString => "object key string",
            Expectation::Colon => "colon",
            Expectation::CommaOrObjectEnd => "comma or object end",
            Expectation::CommaOrArrayEnd => "comma or array end",
            Expectation::TheEnd => "the end",
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The offending item in an `Expected ... but found ...` diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Found {
    /// A well-formed token of the wrong class.
    Token(TokenKind),
    /// A scan failure.
    Scan(ScanErrorKind),
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Token(kind) => f.write_str(kind.name()),
            Found::Scan(kind) => f.write_str(kind.message()),
        }
    }
}

/// Errors produced while decoding JSON text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A token (or scan failure) appeared where another construct was
    /// required.
    #[error("Expected {expected} but found {found} at character {offset}")]
    Unexpected {
        /// What the parser was looking for.
        expected: Expectation,
        /// What it found instead.
        found: Found,
        /// 1-based byte offset of the offending token.
        offset: usize,
    },
    /// The nesting depth limit was exceeded while building the value tree.
    #[error("excessive nesting ({depth}) at character {offset}")]
    ExcessiveNesting {
        /// Depth reached when the limit tripped.
        depth: usize,
        /// 1-based byte offset of the opening bracket or brace.
        offset: usize,
    },
    /// The input contains raw NUL bytes, which marks UTF-16/UTF-32 encoded
    /// text. Raised before any tokenization.
    #[error("JSON parser does not support UTF-16 or UTF-32")]
    UnsupportedEncoding,
}

impl DecodeError {
    /// 1-based byte offset, when the error is tied to an input position.
    pub fn offset(&self) -> Option<usize> {
        match self {
            DecodeError::Unexpected { offset, .. }
            | DecodeError::ExcessiveNesting { offset, .. } => Some(*offset),
            DecodeError::UnsupportedEncoding => None,
        }
    }
}

/// Errors produced while encoding a value tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The value tree is nested deeper than the configured limit.
    #[error("excessive nesting ({0})")]
    ExcessiveNesting(usize),
}

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for encode operations.
pub type EncodeResult<T> = Result<T, EncodeError>;
