//! Number lexing per RFC 8259: `[-] ( 0 | [1-9] digit* ) [ . digit+ ]
//! [ [eE] [+-]? digit+ ]`.
//!
//! A leading zero never takes more digits, so `012` lexes as `0` followed
//! by a stray `1` that the structural layer flags (or, at the top level,
//! as the separate documents `0` and `12`).

use super::{RawToken, Scanner};
use crate::token::Kind;

impl Scanner {
    pub(super) fn number(&mut self, buf: &[u8]) -> RawToken {
        self.mark = self.pos;

        // optional -
        if self.pos < buf.len() && buf[self.pos] == b'-' {
            self.pos += 1;
        }

        // integer part
        if self.pos == buf.len() {
            return self.unexpected_eof();
        }
        match buf[self.pos] {
            b'0' => self.pos += 1,
            b'1'..=b'9' => {
                self.pos += 1;
                self.digits(buf);
            }
            _ => return self.invalid(buf, "in numeric literal"),
        }

        // fraction
        if self.pos < buf.len() && buf[self.pos] == b'.' {
            self.pos += 1;
            if let Some(t) = self.one_or_more_digits(buf, "after decimal point in numeric literal")
            {
                return t;
            }
        }

        // exponent
        if self.pos < buf.len() && matches!(buf[self.pos], b'e' | b'E') {
            self.pos += 1;
            if self.pos < buf.len() && matches!(buf[self.pos], b'+' | b'-') {
                self.pos += 1;
            }
            if let Some(t) = self.one_or_more_digits(buf, "in exponent of numeric literal") {
                return t;
            }
        }

        RawToken::lexeme(Kind::Number, self.mark..self.pos)
    }

    fn digits(&mut self, buf: &[u8]) {
        while self.pos < buf.len() && buf[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
    }

    fn one_or_more_digits(&mut self, buf: &[u8], context: &str) -> Option<RawToken> {
        if self.pos == buf.len() {
            return Some(self.unexpected_eof());
        }
        if !buf[self.pos].is_ascii_digit() {
            return Some(self.invalid(buf, context));
        }
        self.pos += 1;
        self.digits(buf);
        None
    }
}
