//! JSON writing for the dynamic value universe and custom encoders.
//!
//! [`Writer`] exposes the primitive and structural pieces a generated
//! encoder would call; [`Encoder`] layers multi-document (ND-JSON) output
//! on top; [`to_vec`] is the one-shot convenience. Output is compact:
//! no whitespace is ever emitted.

use std::io::Write;

use crate::error::{Error, Result};
use crate::token::Number;
use crate::value::Value;

/// Serialises `v` into a fresh buffer.
///
/// # Examples
///
/// ```
/// use jsontok::{to_vec, Value};
///
/// let v = Value::Array(vec![Value::Null, Value::Boolean(true)]);
/// assert_eq!(to_vec(&v).unwrap(), b"[null,true]");
/// ```
pub fn to_vec(v: &Value) -> Result<Vec<u8>> {
    let mut w = Writer::new(Vec::new());
    w.value(v)?;
    Ok(w.into_inner())
}

/// Types that can write themselves as JSON through a [`Writer`].
pub trait WriteJson {
    fn write_json<W: Write>(&self, w: &mut Writer<W>) -> Result<()>;
}

impl WriteJson for Value {
    fn write_json<W: Write>(&self, w: &mut Writer<W>) -> Result<()> {
        w.value(self)
    }
}

/// Low-level JSON writer over any [`Write`] sink.
#[derive(Debug)]
pub struct Writer<W> {
    w: W,
}

impl<W: Write> Writer<W> {
    pub fn new(w: W) -> Self {
        Writer { w }
    }

    pub fn into_inner(self) -> W {
        self.w
    }

    /// Writes any [`Value`]. Fails for non-finite numbers.
    pub fn value(&mut self, v: &Value) -> Result<()> {
        match v {
            Value::Null => self.null(),
            Value::Boolean(b) => self.boolean(*b),
            Value::Number(n) => self.float64(*n),
            Value::NumberLit(n) => self.number(n),
            Value::String(s) => self.string(s),
            Value::Array(arr) => {
                self.begin_array()?;
                for (i, elem) in arr.iter().enumerate() {
                    if i > 0 {
                        self.comma()?;
                    }
                    self.value(elem)?;
                }
                self.end_array()
            }
            Value::Object(map) => {
                self.begin_object()?;
                for (i, (key, val)) in map.iter().enumerate() {
                    if i > 0 {
                        self.comma()?;
                    }
                    self.prop(key)?;
                    self.value(val)?;
                }
                self.end_object()
            }
        }
    }

    pub fn null(&mut self) -> Result<()> {
        self.w.write_all(b"null")?;
        Ok(())
    }

    pub fn boolean(&mut self, v: bool) -> Result<()> {
        self.w.write_all(if v { b"true" } else { b"false" })?;
        Ok(())
    }

    pub fn int(&mut self, v: i64) -> Result<()> {
        write!(self.w, "{v}")?;
        Ok(())
    }

    pub fn uint(&mut self, v: u64) -> Result<()> {
        write!(self.w, "{v}")?;
        Ok(())
    }

    /// Writes a number lexeme verbatim, preserving its exact source form.
    pub fn number(&mut self, v: &Number) -> Result<()> {
        self.w.write_all(v.as_str().as_bytes())?;
        Ok(())
    }

    pub fn float32(&mut self, f: f32) -> Result<()> {
        if !f.is_finite() {
            return Err(Error::UnsupportedValue(format!("{f}")));
        }
        let abs = f.abs();
        if abs != 0.0 && !(1e-6..1e21).contains(&abs) {
            self.exponent(&format!("{f:e}"))
        } else {
            write!(self.w, "{f}")?;
            Ok(())
        }
    }

    pub fn float64(&mut self, f: f64) -> Result<()> {
        if !f.is_finite() {
            return Err(Error::UnsupportedValue(format!("{f}")));
        }
        let abs = f.abs();
        if abs != 0.0 && !(1e-6..1e21).contains(&abs) {
            self.exponent(&format!("{f:e}"))
        } else {
            write!(self.w, "{f}")?;
            Ok(())
        }
    }

    /// Rewrites Rust's `1.5e21` exponent form as `1.5e+21`: positive
    /// exponents gain an explicit sign, and single-digit negative exponents
    /// stay unpadded (`1e-9`, never `1e-09`).
    fn exponent(&mut self, s: &str) -> Result<()> {
        match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => {
                write!(self.w, "{mantissa}e+{exp}")?;
            }
            _ => self.w.write_all(s.as_bytes())?,
        }
        Ok(())
    }

    /// Writes a quoted, escaped string. Beyond the mandatory escapes, the
    /// line separators U+2028 and U+2029 are escaped so the output stays
    /// valid inside JavaScript source.
    pub fn string(&mut self, s: &str) -> Result<()> {
        self.w.write_all(b"\"")?;
        let mut start = 0;
        for (i, c) in s.char_indices() {
            let escaped = matches!(c, '"' | '\\' | '\u{2028}' | '\u{2029}') || (c as u32) < 0x20;
            if !escaped {
                continue;
            }
            if start < i {
                self.w.write_all(&s.as_bytes()[start..i])?;
            }
            match c {
                '"' => self.w.write_all(b"\\\"")?,
                '\\' => self.w.write_all(b"\\\\")?,
                '\n' => self.w.write_all(b"\\n")?,
                '\r' => self.w.write_all(b"\\r")?,
                '\u{c}' => self.w.write_all(b"\\f")?,
                '\t' => self.w.write_all(b"\\t")?,
                '\u{2028}' => self.w.write_all(b"\\u2028")?,
                '\u{2029}' => self.w.write_all(b"\\u2029")?,
                _ => write!(self.w, "\\u{:04x}", c as u32)?,
            }
            start = i + c.len_utf8();
        }
        if start < s.len() {
            self.w.write_all(&s.as_bytes()[start..])?;
        }
        self.w.write_all(b"\"")?;
        Ok(())
    }

    /// Writes pre-serialised JSON text verbatim.
    pub fn raw(&mut self, s: &str) -> Result<()> {
        self.w.write_all(s.as_bytes())?;
        Ok(())
    }

    pub fn begin_object(&mut self) -> Result<()> {
        self.w.write_all(b"{")?;
        Ok(())
    }

    /// Writes an object key and its trailing colon.
    pub fn prop(&mut self, name: &str) -> Result<()> {
        self.string(name)?;
        self.w.write_all(b":")?;
        Ok(())
    }

    pub fn end_object(&mut self) -> Result<()> {
        self.w.write_all(b"}")?;
        Ok(())
    }

    pub fn begin_array(&mut self) -> Result<()> {
        self.w.write_all(b"[")?;
        Ok(())
    }

    pub fn end_array(&mut self) -> Result<()> {
        self.w.write_all(b"]")?;
        Ok(())
    }

    pub fn comma(&mut self) -> Result<()> {
        self.w.write_all(b",")?;
        Ok(())
    }
}

/// Streaming encoder for multi-document output such as ND-JSON.
///
/// # Examples
///
/// ```
/// use jsontok::{Encoder, Value};
///
/// let mut enc = Encoder::new(Vec::new());
/// enc.encode(&Value::Number(1.0)).unwrap();
/// enc.newline().unwrap();
/// enc.encode(&Value::Boolean(false)).unwrap();
/// enc.newline().unwrap();
/// assert_eq!(enc.into_inner(), b"1\nfalse\n");
/// ```
#[derive(Debug)]
pub struct Encoder<W> {
    w: Writer<W>,
}

impl<W: Write> Encoder<W> {
    pub fn new(w: W) -> Self {
        Encoder { w: Writer::new(w) }
    }

    pub fn into_inner(self) -> W {
        self.w.into_inner()
    }

    /// Writes one value — anything with the [`WriteJson`] capability.
    pub fn encode<T: WriteJson + ?Sized>(&mut self, v: &T) -> Result<()> {
        v.write_json(&mut self.w)
    }

    pub fn newline(&mut self) -> Result<()> {
        self.w.raw("\n")
    }
}
