//! Higher-order decode helpers targeted by generated decoders.
//!
//! Generated per-type decoders own only the per-property and per-item
//! logic; the structural framing — begin/end tokens, comma discipline,
//! permissive `null` — lives here. A `null` in place of a whole object or
//! array succeeds without invoking the callback at all, mirroring the
//! leave-the-field-alone policy generated code applies to scalars.

use crate::error::{Error, Result};
use crate::token::{Kind, Token};
use crate::tokenizer::Tokenizer;

/// Decodes one JSON object, handing each property key to `per_prop`.
///
/// The callback must consume the property's value (with a typed accessor,
/// a nested decode helper, or [`Tokenizer::skip`] for unknown keys).
/// `context` names the field path reported on mismatch.
///
/// # Examples
///
/// ```
/// use jsontok::{decode_object, ByteTokenizer, Tokenizer};
///
/// let mut name = String::new();
/// let mut de = ByteTokenizer::new(br#"{"name":"Alice","junk":[1,2]}"#);
/// decode_object("employee", &mut de, |de, prop| {
///     if prop.eq_str("name") {
///         name = de.next().as_string("employee.name")?;
///         Ok(())
///     } else {
///         de.skip()
///     }
/// })
/// .unwrap();
/// assert_eq!(name, "Alice");
/// ```
pub fn decode_object<'de, T, F>(context: &str, de: &mut T, mut per_prop: F) -> Result<()>
where
    T: Tokenizer<'de> + ?Sized,
    F: FnMut(&mut T, Token<'de>) -> Result<()>,
{
    let t = de.next();
    if t.is_null() {
        return Ok(());
    }
    if t.is_error() {
        return Err(t.into_err());
    }
    if t.kind != Kind::ObjectBegin {
        return Err(Error::mismatch(context, "object"));
    }
    loop {
        let t = de.next();
        if t.is_error() {
            return Err(t.into_err());
        }
        if t.is_end() {
            return Ok(());
        }
        per_prop(de, t)?;
    }
}

/// Decodes one JSON array, invoking `per_item` once per element.
///
/// The callback must consume exactly one value each call.
pub fn decode_array<'de, T, F>(context: &str, de: &mut T, mut per_item: F) -> Result<()>
where
    T: Tokenizer<'de> + ?Sized,
    F: FnMut(&mut T) -> Result<()>,
{
    let t = de.next();
    if t.is_null() {
        return Ok(());
    }
    if t.is_error() {
        return Err(t.into_err());
    }
    if t.kind != Kind::ArrayBegin {
        return Err(Error::mismatch(context, "array"));
    }
    while !de.peek().is_end() {
        per_item(de)?;
    }
    let end = de.next();
    if end.is_error() {
        return Err(end.into_err());
    }
    Ok(())
}

/// Types that can rebuild themselves from the raw bytes of one JSON value.
///
/// This is the extension point generated decoders use for fields whose
/// types own their JSON representation (timestamps and the like): the
/// sub-value is captured with [`Tokenizer::marshal`] and handed over
/// verbatim.
pub trait FromJsonBytes: Sized {
    fn from_json_bytes(bytes: &[u8]) -> Result<Self>;
}
