//! JSON parser.
//!
//! Recursive descent over the lexer's token stream, one production per value
//! kind. Nesting depth is counted on entry to every array and object so that
//! the recursion is bounded by [`Limits::max_nesting_depth`].
//!
//! Duplicate object keys are accepted: the later value overwrites the
//! earlier one and the key keeps its first position.

use super::lexer::{Lexer, Token};
use super::limits::Limits;
use super::types::{Map, Value};
use crate::error::{JsonError, JsonResult};

/// JSON parser state: token stream, lookahead, and current depth.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    current_pos: usize,
    limits: Limits,
    depth: u64,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input.
    pub fn new(input: &'a [u8], limits: Limits) -> JsonResult<Self> {
        let mut lexer = Lexer::new(input, limits)?;
        let current = lexer.next_token()?;
        let current_pos = lexer.token_start();
        Ok(Self {
            lexer,
            current,
            current_pos,
            limits,
            depth: 0,
        })
    }

    /// Parse the input and return a Value.
    pub fn parse(&mut self) -> JsonResult<Value> {
        let value = self.parse_value()?;

        if self.current != Token::Eof {
            return Err(JsonError::syntax(self.current_pos, "trailing input"));
        }

        Ok(value)
    }

    fn advance(&mut self) -> JsonResult<()> {
        self.current = match self.lexer.next_token() {
            Ok(token) => token,
            // Past the top-level value every byte is trailing input.
            Err(_) if self.depth == 0 => {
                return Err(JsonError::syntax(self.lexer.token_start(), "trailing input"));
            }
            Err(e) => return Err(e),
        };
        self.current_pos = self.lexer.token_start();
        Ok(())
    }

    fn error(&self, message: &str) -> JsonError {
        match self.current {
            Token::Eof => JsonError::syntax(self.current_pos, "unexpected end of input"),
            _ => JsonError::syntax(self.current_pos, message),
        }
    }

    /// Parse a single JSON value.
    fn parse_value(&mut self) -> JsonResult<Value> {
        match &self.current {
            Token::Null => {
                self.advance()?;
                Ok(Value::Null)
            }
            Token::True => {
                self.advance()?;
                Ok(Value::Bool(true))
            }
            Token::False => {
                self.advance()?;
                Ok(Value::Bool(false))
            }
            Token::String(s) => {
                let value = Value::String(s.clone());
                self.advance()?;
                Ok(value)
            }
            Token::Number(s) => {
                let value = parse_number(s, self.current_pos)?;
                self.advance()?;
                Ok(Value::Number(value))
            }
            Token::LeftBrace => self.parse_object(),
            Token::LeftBracket => self.parse_array(),
            _ => Err(self.error("invalid value")),
        }
    }

    fn enter(&mut self) -> JsonResult<()> {
        self.depth += 1;
        if self.depth > self.limits.max_nesting_depth {
            tracing::debug!(
                target: "jsontree::parser",
                depth = self.depth,
                limit = self.limits.max_nesting_depth,
                "nesting limit reached"
            );
            return Err(JsonError::DepthExceeded {
                depth: self.depth,
                limit: self.limits.max_nesting_depth,
            });
        }
        Ok(())
    }

    /// Parse a JSON object.
    fn parse_object(&mut self) -> JsonResult<Value> {
        self.enter()?;

        // Consume opening brace
        self.advance()?;

        let mut map = Map::new();

        if self.current == Token::RightBrace {
            self.depth -= 1;
            self.advance()?;
            return Ok(Value::Object(map));
        }

        loop {
            let key = match &self.current {
                Token::String(s) => s.clone(),
                _ => return Err(self.error("expected string key in object")),
            };
            self.advance()?;

            if self.current != Token::Colon {
                return Err(self.error("expected ':' in object"));
            }
            self.advance()?;

            let value = self.parse_value()?;
            map.insert(key, value);

            if map.len() as u64 > self.limits.max_object_fields {
                return Err(JsonError::TooManyFields(
                    map.len() as u64,
                    self.limits.max_object_fields,
                ));
            }

            match &self.current {
                Token::Comma => {
                    self.advance()?;
                    if self.current == Token::RightBrace {
                        return Err(JsonError::syntax(
                            self.current_pos,
                            "trailing comma in object",
                        ));
                    }
                }
                Token::RightBrace => {
                    self.depth -= 1;
                    self.advance()?;
                    break;
                }
                _ => return Err(self.error("expected ',' or '}' in object")),
            }
        }

        Ok(Value::Object(map))
    }

    /// Parse a JSON array.
    fn parse_array(&mut self) -> JsonResult<Value> {
        self.enter()?;

        // Consume opening bracket
        self.advance()?;

        let mut arr = Vec::new();

        if self.current == Token::RightBracket {
            self.depth -= 1;
            self.advance()?;
            return Ok(Value::Array(arr));
        }

        loop {
            let value = self.parse_value()?;
            arr.push(value);

            if arr.len() as u64 > self.limits.max_array_length {
                return Err(JsonError::ArrayTooLong(
                    arr.len() as u64,
                    self.limits.max_array_length,
                ));
            }

            match &self.current {
                Token::Comma => {
                    self.advance()?;
                    if self.current == Token::RightBracket {
                        return Err(JsonError::syntax(
                            self.current_pos,
                            "trailing comma in array",
                        ));
                    }
                }
                Token::RightBracket => {
                    self.depth -= 1;
                    self.advance()?;
                    break;
                }
                _ => return Err(self.error("expected ',' or ']' in array")),
            }
        }

        Ok(Value::Array(arr))
    }
}

/// Check a raw number run against the JSON number grammar:
/// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
fn is_json_number(raw: &[u8]) -> bool {
    fn digits(raw: &[u8], mut i: usize) -> usize {
        while i < raw.len() && raw[i].is_ascii_digit() {
            i += 1;
        }
        i
    }

    let mut i = 0;
    if raw.first() == Some(&b'-') {
        i += 1;
    }

    match raw.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => i = digits(raw, i + 1),
        _ => return false,
    }

    if raw.get(i) == Some(&b'.') {
        let end = digits(raw, i + 1);
        if end == i + 1 {
            return false;
        }
        i = end;
    }

    if let Some(b'e' | b'E') = raw.get(i) {
        i += 1;
        if let Some(b'+' | b'-') = raw.get(i) {
            i += 1;
        }
        let end = digits(raw, i);
        if end == i {
            return false;
        }
        i = end;
    }

    i == raw.len()
}

/// Validate and convert a number token.
fn parse_number(raw: &str, position: usize) -> JsonResult<f64> {
    if !is_json_number(raw.as_bytes()) {
        return Err(JsonError::syntax(position, "invalid number"));
    }
    let value: f64 = raw
        .parse()
        .map_err(|_| JsonError::syntax(position, "invalid number"))?;
    if !value.is_finite() {
        return Err(JsonError::syntax(position, "number out of range"));
    }
    Ok(value)
}

/// Parse JSON text into a Value with [`Limits::standard`].
pub fn parse(input: &[u8]) -> JsonResult<Value> {
    parse_with_limits(input, Limits::standard())
}

/// Parse JSON text into a Value with custom limits.
pub fn parse_with_limits(input: &[u8], limits: Limits) -> JsonResult<Value> {
    tracing::trace!(target: "jsontree::parser", len = input.len(), "parsing");
    let mut parser = Parser::new(input, limits)?;
    let result = parser.parse();
    if let Err(e) = &result {
        tracing::debug!(target: "jsontree::parser", error = %e, "parse failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(input: &str) -> JsonResult<Value> {
        parse(input.as_bytes())
    }

    #[test]
    fn test_parse_null() {
        assert_eq!(parse_str("null").unwrap(), Value::Null);
    }

    #[test]
    fn test_parse_booleans() {
        assert_eq!(parse_str("true").unwrap(), Value::Bool(true));
        assert_eq!(parse_str("false").unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_str("42").unwrap(), Value::Number(42.0));
        assert_eq!(parse_str("-123").unwrap(), Value::Number(-123.0));
        assert_eq!(parse_str("0").unwrap(), Value::Number(0.0));
        assert_eq!(parse_str("3.25").unwrap(), Value::Number(3.25));
        assert_eq!(parse_str("1e3").unwrap(), Value::Number(1000.0));
        assert_eq!(parse_str("-2.5E-1").unwrap(), Value::Number(-0.25));
    }

    #[test]
    fn test_malformed_numbers_rejected() {
        for input in ["01", "1.", "-", "--1", "1-2", "1e", "1e+", "1.2.3", "+1"] {
            assert!(parse_str(input).is_err(), "{input} should be rejected");
        }
        assert_eq!(
            parse_str("1-2").unwrap_err(),
            JsonError::syntax(0, "invalid number")
        );
    }

    #[test]
    fn test_number_out_of_range() {
        assert_eq!(
            parse_str("1e400").unwrap_err(),
            JsonError::syntax(0, "number out of range")
        );
    }

    #[test]
    fn test_json_number_grammar() {
        assert!(is_json_number(b"0"));
        assert!(is_json_number(b"-0.0e0"));
        assert!(is_json_number(b"123.456E+78"));
        assert!(!is_json_number(b""));
        assert!(!is_json_number(b"00"));
        assert!(!is_json_number(b".5"));
    }

    #[test]
    fn test_parse_string() {
        assert_eq!(
            parse_str(r#""hello""#).unwrap(),
            Value::String("hello".to_string())
        );
    }

    #[test]
    fn test_parse_array() {
        let result = parse_str("[1, 2, 3]").unwrap();
        assert_eq!(
            result,
            Value::Array(vec![
                Value::Number(1.0),
                Value::Number(2.0),
                Value::Number(3.0),
            ])
        );
    }

    #[test]
    fn test_parse_object() {
        let result = parse_str(r#"{"a": 1, "b": 2}"#).unwrap();
        let mut expected = Map::new();
        expected.insert("a".to_string(), Value::Number(1.0));
        expected.insert("b".to_string(), Value::Number(2.0));
        assert_eq!(result, Value::Object(expected));
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let result = parse_str(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
        let obj = result.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj.get("a"), Some(&Value::Number(3.0)));
        assert_eq!(obj.get_index(0).map(|(k, _)| k.as_str()), Some("a"));
    }

    #[test]
    fn test_nesting_depth_limit() {
        let limits = Limits::restricted().with_max_depth(2);

        assert!(parse_with_limits(b"[[1]]", limits).is_ok());

        let result = parse_with_limits(b"[[[1]]]", limits);
        assert_eq!(
            result.unwrap_err(),
            JsonError::DepthExceeded { depth: 3, limit: 2 }
        );
    }

    #[test]
    fn test_default_depth_guard_on_deep_input() {
        let deep = "[".repeat(100_000);
        assert!(matches!(
            parse_str(&deep),
            Err(JsonError::DepthExceeded { .. })
        ));
    }

    #[test]
    fn test_object_field_limit() {
        let limits = Limits {
            max_object_fields: 2,
            ..Limits::standard()
        };
        let result = parse_with_limits(br#"{"a": 1, "b": 2, "c": 3}"#, limits);
        assert!(matches!(result, Err(JsonError::TooManyFields(3, 2))));
    }

    #[test]
    fn test_array_length_limit() {
        let limits = Limits {
            max_array_length: 2,
            ..Limits::standard()
        };
        let result = parse_with_limits(b"[1, 2, 3]", limits);
        assert!(matches!(result, Err(JsonError::ArrayTooLong(3, 2))));
    }

    #[test]
    fn test_trailing_content_rejected() {
        assert_eq!(
            parse_str("null extra").unwrap_err(),
            JsonError::syntax(5, "trailing input")
        );
        assert_eq!(
            parse_str("{} {}").unwrap_err(),
            JsonError::syntax(3, "trailing input")
        );
        assert_eq!(
            parse_str("[1] @").unwrap_err(),
            JsonError::syntax(4, "trailing input")
        );
        assert_eq!(
            parse_str(r#"1 "open"#).unwrap_err(),
            JsonError::syntax(2, "trailing input")
        );
    }

    #[test]
    fn test_lexer_errors_inside_value_kept() {
        assert_eq!(
            parse_str("[1, @]").unwrap_err(),
            JsonError::syntax(4, "invalid value")
        );
        assert_eq!(
            parse_str("@").unwrap_err(),
            JsonError::syntax(0, "invalid value")
        );
    }

    #[test]
    fn test_trailing_comma_rejected() {
        assert!(parse_str("[1, 2,]").is_err());
        assert_eq!(
            parse_str(r#"{"a":1,}"#).unwrap_err(),
            JsonError::syntax(7, "trailing comma in object")
        );
    }

    #[test]
    fn test_missing_separators() {
        assert_eq!(
            parse_str(r#"{"a" 1}"#).unwrap_err(),
            JsonError::syntax(5, "expected ':' in object")
        );
        assert_eq!(
            parse_str("[1 2]").unwrap_err(),
            JsonError::syntax(3, "expected ',' or ']' in array")
        );
        assert_eq!(
            parse_str(r#"{1: 2}"#).unwrap_err(),
            JsonError::syntax(1, "expected string key in object")
        );
    }

    #[test]
    fn test_unexpected_end() {
        assert_eq!(
            parse_str("[1,").unwrap_err(),
            JsonError::syntax(3, "unexpected end of input")
        );
        assert_eq!(
            parse_str("").unwrap_err(),
            JsonError::syntax(0, "unexpected end of input")
        );
    }

    #[test]
    fn test_nested_structure() {
        let result = parse_str(r#"{"arr": [1, {"nested": true}], "num": 42}"#).unwrap();
        assert!(result.is_object());
        let arr = result.get("arr").unwrap();
        assert!(arr.is_array());
        assert_eq!(
            arr.get_index(1).and_then(|v| v.get("nested")),
            Some(&Value::Bool(true))
        );
    }
}
