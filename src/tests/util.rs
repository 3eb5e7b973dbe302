use std::io::{self, Read};

use crate::{Error, Kind, Token, Tokenizer, Value};

/// Wraps a reader so every `read` hands over at most one byte, forcing the
/// stream tokenizer through its refill path on every token.
pub(crate) struct OneByte<R>(pub(crate) R);

impl<R: Read> Read for OneByte<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.0.read(&mut buf[..1])
    }
}

/// One observed token: its kind and a copy of its payload bytes, with
/// errors collapsed into the `Error` kind.
pub(crate) type Observed = (Kind, Vec<u8>);

pub(crate) fn observe(t: &Token<'_>) -> Observed {
    (t.kind, t.data.to_vec())
}

/// Drains `de` until end of input or the first error, which terminates the
/// stream with an `Error` entry.
pub(crate) fn drain<'de, T: Tokenizer<'de>>(de: &mut T) -> Vec<Observed> {
    let mut out = Vec::new();
    loop {
        let t = de.next();
        out.push(observe(&t));
        if t.is_error() || t.is_eof() {
            return out;
        }
    }
}

/// Walks every document in `doc` with a byte tokenizer, returning the
/// non-synthetic tokens, or the first error.
pub(crate) fn walk(doc: &str) -> Result<Vec<Observed>, Error> {
    let mut de = crate::ByteTokenizer::new(doc.as_bytes());
    let mut out = Vec::new();
    loop {
        let t = de.next();
        if let Some(err) = t.err {
            return Err(err);
        }
        if t.is_eof() {
            return Ok(out);
        }
        if !t.is_eod() {
            out.push(observe(&t));
        }
    }
}

/// Converts a `serde_json` value into this crate's value universe for
/// differential checks against the reference implementation.
pub(crate) fn from_serde(v: &serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(*b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap()),
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(a) => Value::Array(a.iter().map(from_serde).collect()),
        serde_json::Value::Object(m) => Value::Object(
            m.iter()
                .map(|(k, v)| (k.clone(), from_serde(v)))
                .collect(),
        ),
    }
}
