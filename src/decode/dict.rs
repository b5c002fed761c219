//! Decoder for the dict-literal recording format.
//!
//! Files hold a single literal list of records, one per sample:
//!
//! ```text
//! [{'Key': 0, 'Value': 142.5}, {'Key': 1, 'Value': 141.0}, ...]
//! ```
//!
//! Single or double quoted strings, tuples, `None`, `True` and `False` are
//! accepted by the literal parser; only `Key` and `Value` are used.

use crate::decode::decoder::Decoder;
use crate::error::{CtgError, Result};
use crate::signal::Recording;
use std::fs;
use std::path::Path;

/// Parsed literal value.
#[derive(Debug, Clone, PartialEq)]
enum Literal {
    List(Vec<Literal>),
    Dict(Vec<(Literal, Literal)>),
    Str(String),
    Number(f64),
    Bool(bool),
    None,
}

impl Literal {
    fn as_number(&self) -> Option<f64> {
        match self {
            Literal::Number(n) => Some(*n),
            _ => None,
        }
    }

    fn get(&self, key: &str) -> Option<&Literal> {
        match self {
            Literal::Dict(entries) => entries.iter().find_map(|(k, v)| match k {
                Literal::Str(s) if s == key => Some(v),
                _ => None,
            }),
            _ => None,
        }
    }
}

/// Deepest list, tuple or dict nesting accepted. Recordings nest two levels.
const MAX_DEPTH: usize = 64;

/// Recursive-descent parser over the raw bytes of a literal.
struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
            depth: 0,
        }
    }

    fn error(&self, message: impl Into<String>) -> String {
        format!("{} at offset {}", message.into(), self.pos)
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_whitespace();
        self.bytes.get(self.pos).copied()
    }

    fn expect(&mut self, byte: u8) -> std::result::Result<(), String> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", byte as char)))
        }
    }

    fn descend(&mut self) -> std::result::Result<(), String> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_document(&mut self) -> std::result::Result<Literal, String> {
        let value = self.parse_value()?;
        if self.peek().is_some() {
            return Err(self.error("trailing characters"));
        }
        Ok(value)
    }

    fn parse_value(&mut self) -> std::result::Result<Literal, String> {
        match self.peek() {
            Some(b'[') => self.parse_sequence(b'[', b']').map(Literal::List),
            Some(b'(') => self.parse_sequence(b'(', b')').map(Literal::List),
            Some(b'{') => self.parse_dict(),
            Some(quote @ (b'\'' | b'"')) => self.parse_string(quote).map(Literal::Str),
            Some(b) if b == b'-' || b == b'+' || b == b'.' || b.is_ascii_digit() => {
                self.parse_number()
            }
            Some(b) if b.is_ascii_alphabetic() => self.parse_keyword(),
            Some(_) => Err(self.error("unexpected character")),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_sequence(
        &mut self,
        open: u8,
        close: u8,
    ) -> std::result::Result<Vec<Literal>, String> {
        self.expect(open)?;
        self.descend()?;
        let mut items = Vec::new();
        loop {
            if self.peek() == Some(close) {
                self.pos += 1;
                self.depth -= 1;
                return Ok(items);
            }
            items.push(self.parse_value()?);
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b) if b == close => {}
                _ => return Err(self.error(format!("expected ',' or '{}'", close as char))),
            }
        }
    }

    fn parse_dict(&mut self) -> std::result::Result<Literal, String> {
        self.expect(b'{')?;
        self.descend()?;
        let mut entries = Vec::new();
        loop {
            if self.peek() == Some(b'}') {
                self.pos += 1;
                self.depth -= 1;
                return Ok(Literal::Dict(entries));
            }
            let key = self.parse_value()?;
            self.expect(b':')?;
            let value = self.parse_value()?;
            entries.push((key, value));
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {}
                _ => return Err(self.error("expected ',' or '}'")),
            }
        }
    }

    fn parse_string(&mut self, quote: u8) -> std::result::Result<String, String> {
        self.pos += 1;
        let mut out = Vec::new();
        while let Some(&b) = self.bytes.get(self.pos) {
            self.pos += 1;
            match b {
                b'\\' => {
                    let escaped = self
                        .bytes
                        .get(self.pos)
                        .copied()
                        .ok_or_else(|| self.error("unterminated escape"))?;
                    self.pos += 1;
                    out.push(match escaped {
                        b'n' => b'\n',
                        b't' => b'\t',
                        b'r' => b'\r',
                        other => other,
                    });
                }
                b if b == quote => {
                    return String::from_utf8(out)
                        .map_err(|_| self.error("invalid UTF-8 in string"));
                }
                b => out.push(b),
            }
        }
        Err(self.error("unterminated string"))
    }

    fn parse_number(&mut self) -> std::result::Result<Literal, String> {
        let start = self.pos;
        while let Some(&b) = self.bytes.get(self.pos) {
            if b.is_ascii_digit() || matches!(b, b'-' | b'+' | b'.' | b'e' | b'E' | b'_') {
                self.pos += 1;
            } else {
                break;
            }
        }
        let token: String = String::from_utf8_lossy(&self.bytes[start..self.pos])
            .chars()
            .filter(|c| *c != '_')
            .collect();
        token
            .parse::<f64>()
            .map(Literal::Number)
            .map_err(|_| format!("invalid number '{}' at offset {}", token, start))
    }

    fn parse_keyword(&mut self) -> std::result::Result<Literal, String> {
        let start = self.pos;
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
        {
            self.pos += 1;
        }
        match &self.bytes[start..self.pos] {
            b"None" => Ok(Literal::None),
            b"True" => Ok(Literal::Bool(true)),
            b"False" => Ok(Literal::Bool(false)),
            other => Err(format!(
                "unknown name '{}' at offset {}",
                String::from_utf8_lossy(other),
                start
            )),
        }
    }
}

/// Parses the dict-literal text into a recording.
///
/// Returns `Ok(None)` for blank input or an empty list.
pub fn parse_records(text: &str) -> std::result::Result<Option<Recording>, String> {
    if text.trim().is_empty() {
        return Ok(None);
    }

    let Literal::List(records) = Parser::new(text).parse_document()? else {
        return Err("top-level literal is not a list".to_string());
    };
    if records.is_empty() {
        return Ok(None);
    }

    let mut points = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        let x = record
            .get("Key")
            .and_then(Literal::as_number)
            .ok_or_else(|| format!("record {} has no numeric 'Key'", i))?;
        let value = record
            .get("Value")
            .and_then(Literal::as_number)
            .ok_or_else(|| format!("record {} has no numeric 'Value'", i))?;
        points.push((x, value));
    }

    Ok(Some(Recording::from_points(points)))
}

/// Decoder for files holding a dict-literal list of `Key`/`Value` records.
#[derive(Debug, Clone, Copy, Default)]
pub struct DictDecoder;

impl Decoder for DictDecoder {
    fn read(&self, path: &Path) -> Result<Option<Recording>> {
        let text = fs::read_to_string(path)?;
        tracing::debug!(file = %path.display(), "file opened");
        parse_records(&text).map_err(|message| CtgError::Decode {
            path: path.display().to_string(),
            message,
        })
    }

    fn name(&self) -> &str {
        "dict"
    }
}
