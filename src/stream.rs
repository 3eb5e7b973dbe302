//! Streaming adapter: the scanner over a reader-fed refill buffer.
//!
//! [`StreamTokenizer`] owns a growable buffer and re-runs the scanner
//! whenever it runs out of bytes mid-value. Before each scan attempt it
//! snapshots the cursor and inter-value state; when the scanner reports
//! truncated input — or a number that reaches the buffer tail, the one
//! lexeme with no self-delimiting terminator — the consumed prefix is
//! compacted away, more bytes are read, the snapshot is restored, and the
//! scan retried. Only a genuine reader EOF lets the pending token surface.
//!
//! Emitted tokens carry owned payloads: a later refill may relocate the
//! buffer, so borrowed windows could not survive the next call.

use std::io::{self, Read};

use crate::error::{Error, Result};
use crate::scanner::{RawToken, Scanner};
use crate::token::{Kind, Token};
use crate::tokenizer::Tokenizer;

const INITIAL_CAPACITY: usize = 4 * 1024;

/// Pull tokenizer over an [`io::Read`] stream.
///
/// Semantics match [`crate::ByteTokenizer`] fed the same bytes; the only
/// blocking point is the underlying reader. Multi-document streams work the
/// same way, with `EndOfInput` emitted once the reader reports EOF.
#[derive(Debug)]
pub struct StreamTokenizer<R> {
    reader: R,
    buf: Vec<u8>,
    scan: Scanner,
    peeked: Option<Token<'static>>,
}

impl<R: Read> StreamTokenizer<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        StreamTokenizer {
            reader,
            buf: Vec::with_capacity(INITIAL_CAPACITY),
            scan: Scanner::new(),
            peeked: None,
        }
    }

    /// Rewinds onto a new reader, clearing the buffer and all parser state.
    pub fn reset(&mut self, reader: R) {
        self.reader = reader;
        self.buf.clear();
        self.scan.reset();
        self.peeked = None;
    }

    fn materialize(&self, raw: RawToken) -> Token<'static> {
        match raw.err {
            Some(err) => Token::failed(Error::Syntax(err)),
            None => match raw.kind {
                Kind::String | Kind::Number | Kind::Boolean => {
                    Token::owned(raw.kind, self.buf[raw.span].to_vec())
                }
                kind => Token::bare(kind),
            },
        }
    }

    fn refill_token(&mut self) -> Token<'static> {
        let snap = self.scan.snapshot();
        let mut start = snap.pos;
        loop {
            let raw = self.scan.next_token(&self.buf);
            let pending = match &raw.err {
                Some(err) => err.is_unexpected_eof(),
                None => match raw.kind {
                    Kind::EndOfInput => true,
                    // A number that touches the buffer tail may continue in
                    // bytes not yet read; it must be re-lexed after refill.
                    Kind::Number => self.scan.pos() == self.buf.len(),
                    _ => false,
                },
            };
            if !pending {
                return self.materialize(raw);
            }

            // Compact the unconsumed tail to the front of the buffer.
            let n = self.buf.len() - start;
            if start > 0 {
                self.buf.copy_within(start.., 0);
                self.buf.truncate(n);
            }
            if n == self.buf.capacity() {
                self.buf.reserve(self.buf.capacity());
            }
            let raw = raw.rebase(start);
            self.scan.set_pos(n);

            match self.fill(n) {
                // Reader exhausted: the pending token is the answer, be it
                // `EndOfInput`, an unexpected-EOF error, or a tail number.
                Ok(0) => return self.materialize(raw),
                Ok(_) => {
                    self.scan.restore(snap.rewound());
                    start = 0;
                }
                Err(err) => return Token::failed(Error::Io(err)),
            }
        }
    }

    /// Reads into the free tail beyond `len` valid bytes. Retries
    /// interrupted reads; `Ok(0)` means the reader reported EOF.
    fn fill(&mut self, len: usize) -> io::Result<usize> {
        self.buf.resize(self.buf.capacity(), 0);
        loop {
            match self.reader.read(&mut self.buf[len..]) {
                Ok(n) => {
                    self.buf.truncate(len + n);
                    return Ok(n);
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => {
                    self.buf.truncate(len);
                    return Err(err);
                }
            }
        }
    }

    fn marshal_value(&mut self, out: &mut Vec<u8>) -> Result<()> {
        let t = self.next();
        match t.kind {
            Kind::Error => Err(t.into_err()),
            Kind::Null => {
                out.extend_from_slice(b"null");
                Ok(())
            }
            Kind::String | Kind::Number | Kind::Boolean => {
                out.extend_from_slice(&t.data);
                Ok(())
            }
            Kind::ObjectBegin => {
                out.push(b'{');
                let mut comma = false;
                loop {
                    let key = self.next();
                    if key.is_error() {
                        return Err(key.into_err());
                    }
                    if key.kind == Kind::ObjectEnd {
                        out.push(b'}');
                        return Ok(());
                    }
                    if comma {
                        out.push(b',');
                    }
                    comma = true;
                    out.extend_from_slice(&key.data);
                    out.push(b':');
                    self.marshal_value(out)?;
                }
            }
            Kind::ArrayBegin => {
                out.push(b'[');
                let mut comma = false;
                loop {
                    match self.peek().kind {
                        Kind::Error => return Err(self.next().into_err()),
                        Kind::ArrayEnd => {
                            self.next();
                            out.push(b']');
                            return Ok(());
                        }
                        _ => {}
                    }
                    if comma {
                        out.push(b',');
                    }
                    comma = true;
                    self.marshal_value(out)?;
                }
            }
            _ => Ok(()),
        }
    }
}

impl<R: Read> Tokenizer<'static> for StreamTokenizer<R> {
    fn next(&mut self) -> Token<'static> {
        if let Some(t) = self.peeked.take() {
            return t;
        }
        self.refill_token()
    }

    fn peek(&mut self) -> &Token<'static> {
        if self.peeked.is_none() {
            let t = self.refill_token();
            self.peeked = Some(t);
        }
        self.peeked.as_ref().expect("peek cache filled above")
    }

    /// Unlike the byte tokenizer's slice carve-out, containers are
    /// re-tokenised and re-emitted with canonical punctuation, since the
    /// source bytes may span several refills.
    fn marshal(&mut self) -> Result<Vec<u8>> {
        let t = self.next();
        match t.kind {
            Kind::Error => Err(t.into_err()),
            Kind::Null => Ok(b"null".to_vec()),
            Kind::String | Kind::Number | Kind::Boolean => Ok(t.data.into_owned()),
            _ => {
                self.peeked = Some(t);
                let mut out = Vec::new();
                self.marshal_value(&mut out)?;
                Ok(out)
            }
        }
    }
}
