//! Error types shared by the tokenizers, the typed accessors, and the
//! encoder.

use std::io;

use thiserror::Error;

/// Fixed message for truncated input. The stream tokenizer keys its refill
/// protocol on this exact string.
pub(crate) const UNEXPECTED_EOF: &str = "unexpected end of JSON input";

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A description of a JSON syntax error.
///
/// `offset` is the byte position within the current input window at which
/// the error was detected. For the stream tokenizer the window is the
/// current refill buffer, not the whole stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    pub offset: usize,
}

impl SyntaxError {
    pub(crate) fn invalid(c: u8, context: &str, offset: usize) -> Self {
        SyntaxError {
            message: format!("invalid character {} {}", quote_char(c), context),
            offset,
        }
    }

    pub(crate) fn unexpected_eof(offset: usize) -> Self {
        SyntaxError {
            message: UNEXPECTED_EOF.into(),
            offset,
        }
    }

    /// Returns `true` if this error reports truncated input rather than a
    /// malformed byte.
    #[must_use]
    pub fn is_unexpected_eof(&self) -> bool {
        self.message == UNEXPECTED_EOF
    }
}

/// Any error surfaced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed JSON input.
    #[error("{0}")]
    Syntax(#[from] SyntaxError),
    /// A typed accessor or decode helper met a token of the wrong kind.
    /// `context` is the caller-supplied field path, e.g. `employee.Address`.
    #[error("json: {context} expects {expected}")]
    Mismatch {
        context: String,
        expected: &'static str,
    },
    /// The stream tokenizer's reader failed.
    #[error("{0}")]
    Io(#[from] io::Error),
    /// The encoder was handed a value JSON cannot represent.
    #[error("json: unsupported value: {0}")]
    UnsupportedValue(String),
}

impl Error {
    pub(crate) fn mismatch(context: &str, expected: &'static str) -> Self {
        Error::Mismatch {
            context: context.into(),
            expected,
        }
    }

    /// Returns `true` for the unexpected-end-of-input syntax error.
    #[must_use]
    pub fn is_unexpected_eof(&self) -> bool {
        matches!(self, Error::Syntax(e) if e.is_unexpected_eof())
    }
}

/// Formats `c` as a single-quoted character literal for syntax error
/// messages. `'` and `"` are special-cased; everything else follows the
/// usual character escape rules, with bytes above 0x7F read as their
/// Latin-1 code points.
pub(crate) fn quote_char(c: u8) -> String {
    match c {
        b'\'' => r"'\''".into(),
        b'"' => "'\"'".into(),
        0x07 => r"'\a'".into(),
        0x08 => r"'\b'".into(),
        b'\t' => r"'\t'".into(),
        b'\n' => r"'\n'".into(),
        0x0b => r"'\v'".into(),
        0x0c => r"'\f'".into(),
        b'\r' => r"'\r'".into(),
        0x20..=0x7e => format!("'{}'", c as char),
        0x00..=0x1f | 0x7f => format!(r"'\x{c:02x}'"),
        0x80..=0x9f => format!(r"'\u{c:04x}'"),
        _ => format!("'{}'", char::from(c)),
    }
}
