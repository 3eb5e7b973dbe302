//! Pull-based streaming JSON tokenizer with lazy typed accessors.
//!
//! The core is a hand-written state machine that emits one [`Token`] per
//! call from a caller-owned byte buffer, allocation-free in the steady
//! state; [`StreamTokenizer`] layers the same machine over any
//! [`std::io::Read`] by refilling and re-scanning. Literal payloads decode
//! lazily through typed accessors, [`Tokenizer::decode`] builds a dynamic
//! [`Value`], and [`decode_object`]/[`decode_array`] carry the structural
//! framing for generated per-type decoders.
//!
//! # Examples
//!
//! ```
//! use jsontok::{ByteTokenizer, Kind, Tokenizer};
//!
//! let mut de = ByteTokenizer::new(br#"{"name":"Alice","age":30}"#);
//! assert_eq!(de.next().kind, Kind::ObjectBegin);
//! assert!(de.next().eq_str("name"));
//! assert_eq!(de.next().as_string("name").unwrap(), "Alice");
//! assert!(de.next().eq_str("age"));
//! assert_eq!(de.next().as_i64("age").unwrap(), 30);
//! assert_eq!(de.next().kind, Kind::ObjectEnd);
//! ```

mod decode;
mod encode;
mod error;
mod scanner;
mod stream;
mod token;
mod tokenizer;
mod value;

pub use decode::{decode_array, decode_object, FromJsonBytes};
pub use encode::{to_vec, Encoder, WriteJson, Writer};
pub use error::{Error, Result, SyntaxError};
pub use stream::StreamTokenizer;
pub use token::{Kind, Number, Token};
pub use tokenizer::{ByteTokenizer, Tokenizer};
pub use value::{Array, Map, Value};

#[cfg(test)]
mod tests;
