//! The tokenizer contract and its byte-slice implementation.
//!
//! [`Tokenizer`] is the surface the decode helpers and generated decoders
//! program against; [`ByteTokenizer`] drives the scanner over a borrowed
//! buffer and emits tokens whose payloads alias that buffer. The trait is
//! lifetime-parameterised so borrowed tokens outlive the `&mut self` calls
//! that produced them — a `ByteTokenizer<'de>` hands out `Token<'de>`,
//! while the stream tokenizer hands out owned `Token<'static>` values.

use crate::error::{Error, Result};
use crate::scanner::{RawToken, Scanner};
use crate::token::{Kind, Token};
use crate::value::{Array, Map, Value};

/// Pull interface over a stream of JSON tokens.
///
/// `skip` and `decode` are written once against `next`/`peek`; `marshal`
/// differs per implementation (the byte tokenizer carves the source slice,
/// the stream tokenizer re-emits from its refill buffer).
pub trait Tokenizer<'de> {
    /// Returns the next token, consuming the peek cache if one is present.
    /// Errors come back as tokens of kind [`Kind::Error`]; after one, the
    /// tokenizer must be reset before reuse.
    fn next(&mut self) -> Token<'de>;

    /// Returns the next token without consuming it. Idempotent.
    fn peek(&mut self) -> &Token<'de>;

    /// Reads one complete value and returns its raw bytes, structural
    /// punctuation included, surrounding whitespace excluded.
    fn marshal(&mut self) -> Result<Vec<u8>>;

    /// Consumes one complete value: a scalar token, or a container through
    /// its matching end. Stops at the first error token.
    fn skip(&mut self) -> Result<()> {
        let mut depth = 0i64;
        loop {
            let t = self.next();
            if t.is_error() {
                return Err(t.into_err());
            }
            if t.is_begin() {
                depth += 1;
            } else if t.is_end() {
                depth -= 1;
            }
            if depth == 0 {
                return Ok(());
            }
        }
    }

    /// Reads one complete value into a dynamically typed [`Value`].
    ///
    /// With `use_number` set, numbers keep their exact lexemes as
    /// [`Value::NumberLit`] instead of parsing to `f64`. Duplicate object
    /// keys resolve last-write-wins.
    fn decode(&mut self, use_number: bool) -> Result<Value> {
        let t = self.next();
        match t.kind {
            Kind::Null => Ok(Value::Null),
            Kind::String => Ok(Value::String(t.as_string("")?)),
            Kind::Boolean => Ok(Value::Boolean(t.as_bool("")?)),
            Kind::Number => {
                if use_number {
                    Ok(Value::NumberLit(t.as_number("")?))
                } else {
                    Ok(Value::Number(t.as_f64("")?))
                }
            }
            Kind::ObjectBegin => {
                let mut map = Map::new();
                loop {
                    let key = self.next();
                    if key.is_error() {
                        return Err(key.into_err());
                    }
                    if key.kind == Kind::ObjectEnd {
                        return Ok(Value::Object(map));
                    }
                    let key = key.as_string("")?;
                    let val = self.decode(use_number)?;
                    map.insert(key, val);
                }
            }
            Kind::ArrayBegin => {
                let mut arr = Array::new();
                loop {
                    let p = self.peek();
                    if p.kind == Kind::ArrayEnd || p.is_error() {
                        break;
                    }
                    arr.push(self.decode(use_number)?);
                }
                let t = self.next();
                if t.is_error() {
                    return Err(t.into_err());
                }
                Ok(Value::Array(arr))
            }
            Kind::Error => Err(t.into_err()),
            _ => Err(Error::mismatch("", "value")),
        }
    }
}

/// Pull tokenizer over a fixed byte slice.
///
/// Emitted literal tokens borrow their `data` windows from the input, so
/// walking a document performs no heap allocation; the structural stack is
/// preallocated and only grows past fifty levels of nesting.
///
/// # Examples
///
/// ```
/// use jsontok::{ByteTokenizer, Kind, Tokenizer};
///
/// let mut de = ByteTokenizer::new(br#"{"name":"Alice"}"#);
/// assert_eq!(de.next().kind, Kind::ObjectBegin);
/// assert!(de.next().eq_str("name"));
/// assert_eq!(de.next().as_string("name").unwrap(), "Alice");
/// assert_eq!(de.next().kind, Kind::ObjectEnd);
/// assert_eq!(de.next().kind, Kind::EndOfDocument);
/// assert_eq!(de.next().kind, Kind::EndOfInput);
/// ```
#[derive(Debug)]
pub struct ByteTokenizer<'de> {
    buf: &'de [u8],
    scan: Scanner,
    peeked: Option<Token<'de>>,
}

impl<'de> ByteTokenizer<'de> {
    #[must_use]
    pub fn new(buf: &'de [u8]) -> Self {
        ByteTokenizer {
            buf,
            scan: Scanner::new(),
            peeked: None,
        }
    }

    /// Rewinds onto a new input, reusing the structural stack's allocation.
    /// Afterwards the tokenizer is indistinguishable from a fresh one.
    pub fn reset(&mut self, buf: &'de [u8]) {
        self.buf = buf;
        self.scan.reset();
        self.peeked = None;
    }

    fn materialize(&self, raw: RawToken) -> Token<'de> {
        let buf = self.buf;
        match raw.err {
            Some(err) => Token::failed(Error::Syntax(err)),
            None => match raw.kind {
                Kind::String | Kind::Number | Kind::Boolean => {
                    Token::borrowed(raw.kind, &buf[raw.span])
                }
                kind => Token::bare(kind),
            },
        }
    }
}

impl<'de> Tokenizer<'de> for ByteTokenizer<'de> {
    fn next(&mut self) -> Token<'de> {
        if let Some(t) = self.peeked.take() {
            return t;
        }
        let raw = self.scan.next_token(self.buf);
        self.materialize(raw)
    }

    fn peek(&mut self) -> &Token<'de> {
        if self.peeked.is_none() {
            let raw = self.scan.next_token(self.buf);
            self.peeked = Some(self.materialize(raw));
        }
        self.peeked.as_ref().expect("peek cache filled above")
    }

    fn marshal(&mut self) -> Result<Vec<u8>> {
        if self.peek().is_error() {
            return Err(self.next().into_err());
        }
        let (kind, data_len) = {
            let t = self.peek();
            (t.kind, t.data.len())
        };
        // The peeked token has already been scanned, so the cursor sits just
        // past it; its source length recovers the starting offset.
        let token_len = match kind {
            Kind::ObjectBegin | Kind::ArrayBegin | Kind::ObjectEnd | Kind::ArrayEnd => 1,
            Kind::Null => 4,
            Kind::String | Kind::Number | Kind::Boolean => data_len,
            _ => 0,
        };
        let start = self.scan.pos() - token_len;
        self.skip()?;
        Ok(self.buf[start..self.scan.pos()].to_vec())
    }
}
