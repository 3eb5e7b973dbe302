//! End-to-end scenarios for the stream tokenizer, driven through readers
//! that hand over one byte at a time so every token crosses a refill.

use std::io::{self, Read};

use jsontok::{ByteTokenizer, Error, Kind, StreamTokenizer, Tokenizer, Value};

struct OneByte<R>(R);

impl<R: Read> Read for OneByte<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.0.read(&mut buf[..1])
    }
}

fn one_byte(doc: &str) -> StreamTokenizer<OneByte<&[u8]>> {
    StreamTokenizer::new(OneByte(doc.as_bytes()))
}

fn expect(de: &mut impl Tokenizer<'static>, steps: &[(Kind, &str)]) {
    for (i, (kind, data)) in steps.iter().enumerate() {
        let t = de.next();
        assert_eq!(t.kind, *kind, "step {i}");
        assert_eq!(&*t.data, data.as_bytes(), "step {i}");
    }
}

#[test]
fn numbers_split_across_refills() {
    // A number at the buffer tail is re-tokenised after each refill, so the
    // leading-zero split lands in the same places as the byte tokenizer.
    let mut de = one_byte("0123  456");
    expect(
        &mut de,
        &[
            (Kind::Number, "0"),
            (Kind::EndOfDocument, ""),
            (Kind::Number, "123"),
            (Kind::EndOfDocument, ""),
            (Kind::Number, "456"),
            (Kind::EndOfDocument, ""),
            (Kind::EndOfInput, ""),
        ],
    );
}

#[test]
fn string_documents() {
    let mut de = one_byte(r#""one""two"  "three"  "four""#);
    expect(
        &mut de,
        &[
            (Kind::String, r#""one""#),
            (Kind::EndOfDocument, ""),
            (Kind::String, r#""two""#),
            (Kind::EndOfDocument, ""),
            (Kind::String, r#""three""#),
            (Kind::EndOfDocument, ""),
            (Kind::String, r#""four""#),
            (Kind::EndOfDocument, ""),
            (Kind::EndOfInput, ""),
        ],
    );
}

#[test]
fn mixed_top_level_documents() {
    let mut de = one_byte(r#"{}   123  "one" truefalse"two" []"#);
    expect(
        &mut de,
        &[
            (Kind::ObjectBegin, ""),
            (Kind::ObjectEnd, ""),
            (Kind::EndOfDocument, ""),
            (Kind::Number, "123"),
            (Kind::EndOfDocument, ""),
            (Kind::String, r#""one""#),
            (Kind::EndOfDocument, ""),
            (Kind::Boolean, "true"),
            (Kind::EndOfDocument, ""),
            (Kind::Boolean, "false"),
            (Kind::EndOfDocument, ""),
            (Kind::String, r#""two""#),
            (Kind::EndOfDocument, ""),
            (Kind::ArrayBegin, ""),
            (Kind::ArrayEnd, ""),
            (Kind::EndOfDocument, ""),
            (Kind::EndOfInput, ""),
        ],
    );
}

#[test]
fn stream_decode_matches_byte_decode() {
    let doc = r#"{"name":"Sánchez","tags":["a","b",null],"metrics":{"height":1.7e2,"ok":true}}"#;
    let mut byte = ByteTokenizer::new(doc.as_bytes());
    let want = byte.decode(false).unwrap();

    let mut stream = one_byte(doc);
    assert_eq!(stream.decode(false).unwrap(), want);
    assert!(stream.next().is_eod());
    assert!(stream.next().is_eof());
}

#[test]
fn multi_document_decode() {
    let mut de = one_byte(r#"{} 123 "one""#);
    assert_eq!(de.decode(false).unwrap(), Value::Object(jsontok::Map::new()));
    assert!(de.next().is_eod());
    assert_eq!(de.decode(false).unwrap(), Value::Number(123.0));
    assert!(de.next().is_eod());
    assert_eq!(de.decode(false).unwrap(), Value::String("one".into()));
    assert!(de.next().is_eod());
    assert!(de.next().is_eof());
}

#[test]
fn values_larger_than_the_initial_buffer() {
    // A single string token bigger than the 4 KiB initial buffer forces
    // compaction plus geometric growth mid-literal.
    let body = "x".repeat(10_000);
    let doc = format!(r#"["{body}", 42]"#);
    let mut de = StreamTokenizer::new(doc.as_bytes());
    let got = de.decode(false).unwrap();
    assert_eq!(
        got,
        Value::Array(vec![Value::String(body), Value::Number(42.0)])
    );
}

#[test]
fn truncated_documents_surface_unexpected_eof() {
    for doc in [r#"{"a":1"#, r#""abc"#, "[1,2", "tru"] {
        let mut de = one_byte(doc);
        loop {
            let t = de.next();
            if t.is_error() {
                let err = t.err.unwrap();
                assert!(err.is_unexpected_eof(), "{doc:?}: {err}");
                break;
            }
            assert!(!t.is_eof(), "{doc:?} completed without error");
        }
    }
}

#[test]
fn reader_failures_become_io_error_tokens() {
    struct Failing;
    impl Read for Failing {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "boom"))
        }
    }

    let mut de = StreamTokenizer::new(Failing);
    let t = de.next();
    assert!(t.is_error());
    assert!(matches!(t.err, Some(Error::Io(_))));
}

#[test]
fn marshal_reemits_sub_values() {
    let doc = r#"{"Raw":{"Street":"HSR","City":"BEML"}}"#;
    let mut de = one_byte(doc);
    assert_eq!(de.next().kind, Kind::ObjectBegin);
    assert!(de.next().eq_str("Raw"));
    assert_eq!(de.marshal().unwrap(), br#"{"Street":"HSR","City":"BEML"}"#);
    assert_eq!(de.next().kind, Kind::ObjectEnd);

    // Container re-emission is canonical: interior whitespace is dropped.
    let mut de = one_byte("[ 1 , true , \"x\" ]");
    assert_eq!(de.marshal().unwrap(), br#"[1,true,"x"]"#);

    // Scalars marshal to their exact lexemes.
    let mut de = one_byte("12.50");
    assert_eq!(de.marshal().unwrap(), b"12.50");
    let mut de = one_byte("null");
    assert_eq!(de.marshal().unwrap(), b"null");
}

#[test]
fn reset_reuses_the_tokenizer() {
    let mut de = one_byte(r#"{"a":1}"#);
    de.decode(false).unwrap();
    de.reset(OneByte(b"[true]"));
    assert_eq!(
        de.decode(false).unwrap(),
        Value::Array(vec![Value::Boolean(true)])
    );
}

#[test]
fn skip_works_across_refills() {
    let mut de = one_byte(r#"{"junk":[1,2,{"x":true}],"k":7}"#);
    assert_eq!(de.next().kind, Kind::ObjectBegin);
    assert!(de.next().eq_str("junk"));
    de.skip().unwrap();
    assert!(de.next().eq_str("k"));
    assert_eq!(de.next().as_i64("k").unwrap(), 7);
}
