//! JSON lexer/tokenizer.
//!
//! Converts raw input bytes into tokens for the parser. The input is checked
//! for UTF-8 validity once, up front, so string contents between escapes can
//! be copied as `&str` slices.

use super::limits::Limits;
use crate::error::{JsonError, JsonResult};

/// Token types produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Left brace `{`
    LeftBrace,
    /// Right brace `}`
    RightBrace,
    /// Left bracket `[`
    LeftBracket,
    /// Right bracket `]`
    RightBracket,
    /// Colon `:`
    Colon,
    /// Comma `,`
    Comma,
    /// Null literal
    Null,
    /// True literal
    True,
    /// False literal
    False,
    /// String value (unescaped)
    String(String),
    /// Number value (raw text, validated by the parser)
    Number(String),
    /// End of input
    Eof,
}

/// JSON lexer that tokenizes input.
pub struct Lexer<'a> {
    text: &'a str,
    input: &'a [u8],
    pos: usize,
    token_start: usize,
    limits: Limits,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a [u8], limits: Limits) -> JsonResult<Self> {
        if input.len() as u64 > limits.max_input_size {
            return Err(JsonError::InputTooLarge(
                input.len() as u64,
                limits.max_input_size,
            ));
        }

        let text = std::str::from_utf8(input)
            .map_err(|e| JsonError::syntax(e.valid_up_to(), "invalid UTF-8"))?;

        Ok(Self {
            text,
            input,
            pos: 0,
            token_start: 0,
            limits,
        })
    }

    /// Get the current position in the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Byte offset where the most recently returned token began.
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let b = self.input.get(self.pos).copied();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    fn error_here(&self, message: &str) -> JsonError {
        JsonError::syntax(self.pos, message)
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    fn punct(&mut self, token: Token) -> JsonResult<Token> {
        self.pos += 1;
        Ok(token)
    }

    /// Read the next token from the input.
    pub fn next_token(&mut self) -> JsonResult<Token> {
        self.skip_whitespace();
        self.token_start = self.pos;

        match self.peek() {
            None => Ok(Token::Eof),
            Some(b'{') => self.punct(Token::LeftBrace),
            Some(b'}') => self.punct(Token::RightBrace),
            Some(b'[') => self.punct(Token::LeftBracket),
            Some(b']') => self.punct(Token::RightBracket),
            Some(b':') => self.punct(Token::Colon),
            Some(b',') => self.punct(Token::Comma),
            Some(b'"') => self.read_string(),
            Some(b'-' | b'0'..=b'9') => Ok(self.read_number()),
            Some(b't') => self.read_literal(b"true", Token::True),
            Some(b'f') => self.read_literal(b"false", Token::False),
            Some(b'n') => self.read_literal(b"null", Token::Null),
            Some(_) => Err(self.error_here("invalid value")),
        }
    }

    /// Read a string token, handling escape sequences.
    fn read_string(&mut self) -> JsonResult<Token> {
        // Opening quote
        self.pos += 1;

        let mut result = String::new();
        loop {
            let run_start = self.pos;
            while let Some(b) = self.peek() {
                if b == b'"' || b == b'\\' {
                    break;
                }
                self.pos += 1;
            }
            // Runs end on ASCII bytes, so they sit on char boundaries.
            let run = self
                .text
                .get(run_start..self.pos)
                .ok_or_else(|| JsonError::syntax(run_start, "invalid UTF-8"))?;
            result.push_str(run);
            self.check_string_length(result.len())?;

            match self.advance() {
                None => {
                    return Err(JsonError::syntax(self.token_start, "unterminated string"))
                }
                Some(b'"') => break,
                _ => {
                    let escaped = self.read_escape_sequence()?;
                    result.push(escaped);
                    self.check_string_length(result.len())?;
                }
            }
        }

        Ok(Token::String(result))
    }

    fn check_string_length(&self, len: usize) -> JsonResult<()> {
        if len as u64 > self.limits.max_string_length {
            return Err(JsonError::StringTooLong(
                len as u64,
                self.limits.max_string_length,
            ));
        }
        Ok(())
    }

    /// Read an escape sequence after a backslash.
    fn read_escape_sequence(&mut self) -> JsonResult<char> {
        let escape_pos = self.pos - 1;
        match self.advance() {
            None => Err(JsonError::syntax(self.token_start, "unterminated string")),
            Some(b'"') => Ok('"'),
            Some(b'\\') => Ok('\\'),
            Some(b'/') => Ok('/'),
            Some(b'b') => Ok('\x08'),
            Some(b'f') => Ok('\x0C'),
            Some(b'n') => Ok('\n'),
            Some(b'r') => Ok('\r'),
            Some(b't') => Ok('\t'),
            Some(b'u') => self.read_unicode_escape(escape_pos),
            Some(_) => Err(JsonError::syntax(escape_pos, "invalid escape character")),
        }
    }

    /// Read a \uXXXX escape, combining a surrogate pair into one code point.
    fn read_unicode_escape(&mut self, escape_pos: usize) -> JsonResult<char> {
        let unit = self.read_hex4()?;

        if (0xD800..=0xDBFF).contains(&unit) {
            if self.advance() != Some(b'\\') || self.advance() != Some(b'u') {
                return Err(JsonError::syntax(escape_pos, "unpaired surrogate"));
            }
            let low = self.read_hex4()?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(JsonError::syntax(escape_pos, "unpaired surrogate"));
            }
            let combined = 0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
            return char::from_u32(combined)
                .ok_or_else(|| JsonError::syntax(escape_pos, "invalid unicode escape"));
        }

        if (0xDC00..=0xDFFF).contains(&unit) {
            return Err(JsonError::syntax(escape_pos, "unpaired surrogate"));
        }

        char::from_u32(u32::from(unit))
            .ok_or_else(|| JsonError::syntax(escape_pos, "invalid unicode escape"))
    }

    /// Read 4 hex digits and return the value.
    fn read_hex4(&mut self) -> JsonResult<u16> {
        let mut value: u16 = 0;
        for _ in 0..4 {
            let digit = match self.peek() {
                Some(b @ b'0'..=b'9') => b - b'0',
                Some(b @ b'a'..=b'f') => b - b'a' + 10,
                Some(b @ b'A'..=b'F') => b - b'A' + 10,
                _ => return Err(self.error_here("invalid unicode escape")),
            };
            self.pos += 1;
            value = (value << 4) | u16::from(digit);
        }
        Ok(value)
    }

    /// Read a number token: the maximal run of number-ish bytes.
    ///
    /// The run is validated and converted by the parser, so `1-2` lexes as
    /// one token and is rejected there as a whole.
    fn read_number(&mut self) -> Token {
        let start = self.pos;
        while let Some(b'0'..=b'9' | b'.' | b'-' | b'+' | b'e' | b'E') = self.peek() {
            self.pos += 1;
        }
        // The run is ASCII, so this slice cannot fail.
        let raw = self.text.get(start..self.pos).unwrap_or_default();
        Token::Number(raw.to_string())
    }

    /// Match a keyword literal exactly.
    fn read_literal(&mut self, keyword: &[u8], token: Token) -> JsonResult<Token> {
        if self.input[self.pos..].starts_with(keyword) {
            self.pos += keyword.len();
            Ok(token)
        } else {
            Err(self.error_here("invalid literal"))
        }
    }
}
