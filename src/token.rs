//! Tokens and their lazy typed accessors.
//!
//! A [`Token`] is one lexical unit pulled from a tokenizer: a discriminant
//! ([`Kind`]), an optional byte window into the source, and an optional
//! error. Literal payloads stay as raw bytes until one of the `as_*`
//! accessors decodes them, so walking a document costs nothing for tokens
//! the caller does not look at.

use std::borrow::Cow;
use std::fmt;

use crate::error::{Error, Result};
use crate::scanner::{token_eq, unquote};

/// Discriminant identifying a token's category.
///
/// `None` is a sentinel meaning "no token cached"; it is never returned to
/// callers. `EndOfDocument` separates successive top-level JSON values in a
/// multi-document stream, and `EndOfInput` is emitted once the input is
/// exhausted after an `EndOfDocument` has been observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    None,
    EndOfDocument,
    EndOfInput,
    String,
    Number,
    Boolean,
    Null,
    Error,
    ObjectBegin,
    ObjectEnd,
    ArrayBegin,
    ArrayEnd,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::None => "<none>",
            Kind::EndOfDocument => "<eod>",
            Kind::EndOfInput => "<eof>",
            Kind::String => "<string>",
            Kind::Number => "<number>",
            Kind::Boolean => "<boolean>",
            Kind::Null => "<null>",
            Kind::Error => "<error>",
            Kind::ObjectBegin => "'{'",
            Kind::ObjectEnd => "'}'",
            Kind::ArrayBegin => "'['",
            Kind::ArrayEnd => "']'",
        })
    }
}

/// One lexical unit plus its raw bytes.
///
/// `data` is non-empty for `String`, `Number`, and `Boolean` tokens only.
/// For `String` tokens it includes both quote bytes. The byte tokenizer
/// borrows `data` straight out of the caller's buffer; the stream tokenizer
/// hands out owned copies because a refill may relocate its buffer.
#[derive(Debug)]
pub struct Token<'de> {
    pub kind: Kind,
    pub data: Cow<'de, [u8]>,
    pub err: Option<Error>,
}

impl<'de> Token<'de> {
    pub(crate) fn bare(kind: Kind) -> Self {
        Token {
            kind,
            data: Cow::Borrowed(&[]),
            err: None,
        }
    }

    pub(crate) fn borrowed(kind: Kind, data: &'de [u8]) -> Self {
        Token {
            kind,
            data: Cow::Borrowed(data),
            err: None,
        }
    }

    pub(crate) fn owned(kind: Kind, data: Vec<u8>) -> Token<'static> {
        Token {
            kind,
            data: Cow::Owned(data),
            err: None,
        }
    }

    pub(crate) fn failed(err: Error) -> Token<'static> {
        Token {
            kind: Kind::Error,
            data: Cow::Borrowed(&[]),
            err: Some(err),
        }
    }

    /// Consumes the token and returns its error, substituting a generic
    /// mismatch for the (unreachable) case of an `Error` token without one.
    pub(crate) fn into_err(self) -> Error {
        self.err
            .unwrap_or_else(|| Error::mismatch("", "well-formed JSON"))
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == Kind::Error
    }

    #[must_use]
    pub fn is_eod(&self) -> bool {
        self.kind == Kind::EndOfDocument
    }

    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.kind == Kind::EndOfInput
    }

    /// Returns `true` for `ObjectBegin` and `ArrayBegin`.
    #[must_use]
    pub fn is_begin(&self) -> bool {
        matches!(self.kind, Kind::ObjectBegin | Kind::ArrayBegin)
    }

    /// Returns `true` for `ObjectEnd` and `ArrayEnd`.
    #[must_use]
    pub fn is_end(&self) -> bool {
        matches!(self.kind, Kind::ObjectEnd | Kind::ArrayEnd)
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.kind == Kind::Null
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        self.kind == Kind::ObjectBegin
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        self.kind == Kind::ArrayBegin
    }

    /// Boolean value of a `Boolean` token. `Null` coerces to `false`; any
    /// other kind is a mismatch reported against `context`.
    pub fn as_bool(&self, context: &str) -> Result<bool> {
        match self.kind {
            Kind::Boolean => Ok(self.data.first() == Some(&b't')),
            Kind::Null => Ok(false),
            _ => Err(Error::mismatch(context, "boolean")),
        }
    }

    /// Unquoted, escape-expanded string value of a `String` token. `Null`
    /// coerces to the empty string.
    pub fn as_string(&self, context: &str) -> Result<String> {
        match self.kind {
            Kind::String => Ok(unquote(&self.data)),
            Kind::Null => Ok(String::new()),
            _ => Err(Error::mismatch(context, "string")),
        }
    }

    /// Parses a `Number` token's lexeme as `f64`. `Null` coerces to `0`.
    pub fn as_f64(&self, context: &str) -> Result<f64> {
        match self.kind {
            Kind::Number => std::str::from_utf8(&self.data)
                .ok()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| Error::mismatch(context, "float64")),
            Kind::Null => Ok(0.0),
            _ => Err(Error::mismatch(context, "float64")),
        }
    }

    /// Parses a `Number` token's lexeme as `i64`. Non-integral lexemes are
    /// mismatches; `Null` coerces to `0`.
    pub fn as_i64(&self, context: &str) -> Result<i64> {
        match self.kind {
            Kind::Number => std::str::from_utf8(&self.data)
                .ok()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| Error::mismatch(context, "int64")),
            Kind::Null => Ok(0),
            _ => Err(Error::mismatch(context, "int64")),
        }
    }

    /// Returns the exact numeric lexeme of a `Number` token. `Null` coerces
    /// to `0`.
    pub fn as_number(&self, context: &str) -> Result<Number> {
        match self.kind {
            Kind::Number => Ok(Number::from_lexeme(&self.data)),
            Kind::Null => Ok(Number::from_lexeme(b"0")),
            _ => Err(Error::mismatch(context, "number")),
        }
    }

    /// Compares a `String` token against `expected` without materialising
    /// the decoded string. This is the fast path generated decoders use for
    /// property-name dispatch.
    #[must_use]
    pub fn eq_str(&self, expected: &str) -> bool {
        token_eq(&self.data, expected)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.err {
            Some(err) => write!(f, "{} {}", self.kind, err),
            None if self.data.is_empty() => self.kind.fmt(f),
            None => write!(f, "{} `{}`", self.kind, String::from_utf8_lossy(&self.data)),
        }
    }
}

/// A JSON number kept as its exact source lexeme.
///
/// Produced by [`Token::as_number`] and by `decode` in `use_number` mode,
/// so callers that care about precision beyond `f64` can defer conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Number(Box<str>);

impl Number {
    pub(crate) fn from_lexeme(data: &[u8]) -> Self {
        Number(String::from_utf8_lossy(data).into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.0.parse().ok()
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
