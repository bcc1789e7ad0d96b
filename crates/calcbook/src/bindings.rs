//! Input bindings
//!
//! Inputs arrive as a dictionary literal such as `{"distance": 10, "time": 2}`.
//! Keys may be double-quoted, single-quoted or bare identifiers; values are
//! numeric literals only. Nothing in the text is ever evaluated.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Variable name (lower-cased) to value
pub type Bindings = HashMap<String, f64>;

/// Parse a bindings literal
///
/// Blank text means no bindings. Keys are lower-cased; when two keys fold to
/// the same name the later value wins.
///
/// # Example
/// ```rust
/// use calcbook::parse_bindings;
///
/// let inputs = parse_bindings("{'Distance': 10, time: 2.5e0}").unwrap();
/// assert_eq!(inputs["distance"], 10.0);
/// assert_eq!(inputs["time"], 2.5);
/// assert!(parse_bindings("").unwrap().is_empty());
/// assert!(parse_bindings("{'x': __import__('os')}").is_err());
/// ```
pub fn parse_bindings(text: &str) -> Result<Bindings> {
    let mut parser = BindingsParser::new(text);
    parser.skip_whitespace();
    if parser.at_end() {
        return Ok(Bindings::new());
    }
    let bindings = parser.parse_object()?;
    parser.skip_whitespace();
    if !parser.at_end() {
        return Err(parser.error("unexpected text after closing '}'"));
    }
    Ok(bindings)
}

/// Character scanner over the bindings text
struct BindingsParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> BindingsParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, char::is_whitespace) {
            self.advance();
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        self.skip_whitespace();
        match self.peek_char() {
            Some(c) if c == expected => {
                self.advance();
                Ok(())
            }
            Some(c) => Err(self.error(&format!("expected '{}', found '{}'", expected, c))),
            None => Err(self.error(&format!("expected '{}', found end of input", expected))),
        }
    }

    fn error(&self, message: &str) -> Error {
        Error::InvalidInputFormat(format!("{} at position {}", message, self.pos))
    }

    // === Grammar ===

    /// `{` [entry (`,` entry)* [`,`]] `}`
    fn parse_object(&mut self) -> Result<Bindings> {
        self.expect('{')?;
        let mut bindings = Bindings::new();

        loop {
            self.skip_whitespace();
            if self.peek_char() == Some('}') {
                self.advance();
                return Ok(bindings);
            }

            let key = self.parse_key()?;
            self.expect(':')?;
            let value = self.parse_number()?;
            bindings.insert(key.to_lowercase(), value);

            self.skip_whitespace();
            match self.peek_char() {
                Some(',') => self.advance(),
                Some('}') => {
                    self.advance();
                    return Ok(bindings);
                }
                Some(c) => return Err(self.error(&format!("expected ',' or '}}', found '{}'", c))),
                None => return Err(self.error("missing closing '}'")),
            }
        }
    }

    fn parse_key(&mut self) -> Result<String> {
        self.skip_whitespace();
        match self.peek_char() {
            Some(quote @ ('"' | '\'')) => self.parse_quoted(quote),
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let start = self.pos;
                while self
                    .peek_char()
                    .map_or(false, |c| c.is_ascii_alphanumeric() || c == '_')
                {
                    self.advance();
                }
                Ok(self.input[start..self.pos].to_string())
            }
            Some(c) => Err(self.error(&format!("expected a key, found '{}'", c))),
            None => Err(self.error("expected a key, found end of input")),
        }
    }

    fn parse_quoted(&mut self, quote: char) -> Result<String> {
        self.advance();
        let mut key = String::new();

        loop {
            match self.peek_char() {
                None => return Err(self.error("unterminated string")),
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.peek_char() {
                        Some(escaped @ ('\\' | '"' | '\'')) => {
                            key.push(escaped);
                            self.advance();
                        }
                        Some(c) => return Err(self.error(&format!("unsupported escape '\\{}'", c))),
                        None => return Err(self.error("unterminated string")),
                    }
                }
                Some(c) => {
                    key.push(c);
                    self.advance();
                }
            }
        }

        if key.trim().is_empty() {
            return Err(self.error("empty key"));
        }
        Ok(key.trim().to_string())
    }

    /// `[+-] (digits [. digits] | . digits) [(e|E) [+-] digits]`
    fn parse_number(&mut self) -> Result<f64> {
        self.skip_whitespace();
        let start = self.pos;

        if matches!(self.peek_char(), Some('+' | '-')) {
            self.advance();
        }

        let int_digits = self.skip_digits();
        let mut frac_digits = 0;
        if self.peek_char() == Some('.') {
            self.advance();
            frac_digits = self.skip_digits();
        }
        if int_digits == 0 && frac_digits == 0 {
            self.pos = start;
            let found = self
                .peek_char()
                .map_or_else(|| "end of input".to_string(), |c| format!("'{}'", c));
            return Err(self.error(&format!("expected a number, found {}", found)));
        }

        if matches!(self.peek_char(), Some('e' | 'E')) {
            self.advance();
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.advance();
            }
            if self.skip_digits() == 0 {
                return Err(self.error("missing exponent digits"));
            }
        }

        let literal = &self.input[start..self.pos];
        let value: f64 = literal
            .parse()
            .map_err(|_| self.error(&format!("invalid number '{}'", literal)))?;
        if !value.is_finite() {
            return Err(self.error(&format!("number '{}' is out of range", literal)));
        }
        Ok(value)
    }

    fn skip_digits(&mut self) -> usize {
        let mut count = 0;
        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
            count += 1;
        }
        count
    }
}
