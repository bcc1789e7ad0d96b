//! Expression parser
//!
//! A recursive descent parser for algebraic expressions with Python-style
//! operator precedence.

use crate::ast::{BinaryOperator, Constant, FormulaExpr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};

/// Deepest nesting of parentheses, signs, exponents and function calls
pub const MAX_NESTING: usize = 128;

/// Parse an expression string into an AST
///
/// Variable and function names are lower-cased. `pi` (any case) and `E` are
/// constants. Both `**` and `^` mean exponentiation. Runs of `+`/`-` or
/// `*`/`/`/`%` with two or more operators become a flat
/// [`FormulaExpr::Chain`]; nesting deeper than [`MAX_NESTING`] is a parse
/// error.
///
/// # Example
/// ```rust
/// use calcbook_formula::parse_expression;
///
/// let ast = parse_expression("1 + 2").unwrap();
/// let ast = parse_expression("pi * r**2").unwrap();
/// let ast = parse_expression("sqrt(x^2 + y^2)").unwrap();
/// ```
pub fn parse_expression(input: &str) -> FormulaResult<FormulaExpr> {
    let mut parser = ExpressionParser::new(input);

    if matches!(parser.current_token(), Token::Eof) {
        return Err(FormulaError::Parse("Empty expression".into()));
    }

    let expr = parser.parse_expression()?;

    // Make sure we consumed all input
    if !matches!(parser.current_token(), Token::Eof) {
        return Err(FormulaError::Parse(format!(
            "Unexpected {} after expression",
            parser.current_token().describe()
        )));
    }

    Ok(expr)
}

/// Token types
#[derive(Debug, Clone, PartialEq)]
enum Token {
    // Literals
    Number(f64),

    // Variable, constant or function name (original case)
    Identifier(String),

    // Operators
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    Caret,
    Percent,
    Comma,

    // Delimiters
    LeftParen,
    RightParen,

    // A character no token starts with
    Invalid(char),

    // End of input
    Eof,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number {}", n),
            Token::Identifier(name) => format!("name '{}'", name),
            Token::Plus => "'+'".into(),
            Token::Minus => "'-'".into(),
            Token::Star => "'*'".into(),
            Token::DoubleStar => "'**'".into(),
            Token::Slash => "'/'".into(),
            Token::Caret => "'^'".into(),
            Token::Percent => "'%'".into(),
            Token::Comma => "','".into(),
            Token::LeftParen => "'('".into(),
            Token::RightParen => "')'".into(),
            Token::Invalid(c) => format!("character '{}'", c),
            Token::Eof => "end of input".into(),
        }
    }
}

/// Expression parser
struct ExpressionParser<'a> {
    input: &'a str,
    pos: usize,
    current_token: Option<Token>,
    depth: usize,
}

impl<'a> ExpressionParser<'a> {
    fn new(input: &'a str) -> Self {
        let mut parser = Self {
            input,
            pos: 0,
            current_token: None,
            depth: 0,
        };
        parser.advance_token();
        parser
    }

    // === Token scanning ===

    fn advance_token(&mut self) {
        self.current_token = Some(self.scan_token());
    }

    fn scan_token(&mut self) -> Token {
        self.skip_whitespace();

        let c = match self.peek_char() {
            Some(c) => c,
            None => return Token::Eof,
        };

        // Single-character tokens
        let single = match c {
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '/' => Some(Token::Slash),
            '^' => Some(Token::Caret),
            '%' => Some(Token::Percent),
            ',' => Some(Token::Comma),
            '(' => Some(Token::LeftParen),
            ')' => Some(Token::RightParen),
            _ => None,
        };
        if let Some(token) = single {
            self.advance();
            return token;
        }

        if c == '*' {
            self.advance();
            if self.peek_char() == Some('*') {
                self.advance();
                return Token::DoubleStar;
            }
            return Token::Star;
        }

        // Number
        if c.is_ascii_digit()
            || (c == '.' && self.peek_char_at(1).map_or(false, |c| c.is_ascii_digit()))
        {
            return self.scan_number();
        }

        // Identifier
        if c.is_ascii_alphabetic() || c == '_' {
            return self.scan_identifier();
        }

        self.advance();
        Token::Invalid(c)
    }

    fn scan_number(&mut self) -> Token {
        let start = self.pos;

        // Integer part
        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }

        // Decimal part
        if self.peek_char() == Some('.') {
            self.advance();
            while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        // Exponent part, only when digits follow (so `2e` stays a number then a name)
        if self.peek_char().map_or(false, |c| c == 'e' || c == 'E') {
            let sign = self
                .peek_char_at(1)
                .map_or(false, |c| c == '+' || c == '-');
            let digit_offset = if sign { 2 } else { 1 };
            if self
                .peek_char_at(digit_offset)
                .map_or(false, |c| c.is_ascii_digit())
            {
                for _ in 0..digit_offset {
                    self.advance();
                }
                while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        let num_str = &self.input[start..self.pos];
        match num_str.parse::<f64>() {
            Ok(num) => Token::Number(num),
            // Only reachable for malformed digit runs; surface as invalid input
            Err(_) => Token::Invalid(num_str.chars().next().unwrap_or('.')),
        }
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.pos;

        while self
            .peek_char()
            .map_or(false, |c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }

        Token::Identifier(self.input[start..self.pos].to_string())
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn current_token(&self) -> &Token {
        self.current_token.as_ref().unwrap_or(&Token::Eof)
    }

    fn consume(&mut self) -> Token {
        let token = self.current_token.take().unwrap_or(Token::Eof);
        self.advance_token();
        token
    }

    fn expect(&mut self, expected: &Token) -> FormulaResult<()> {
        if self.current_token() == expected {
            self.consume();
            Ok(())
        } else {
            Err(FormulaError::Parse(format!(
                "Expected {}, got {}",
                expected.describe(),
                self.current_token().describe()
            )))
        }
    }

    // === Expression parsing with precedence ===
    // Precedence (lowest to highest):
    // 1. Addition/Subtraction: +, -
    // 2. Multiplication/Division/Modulo: *, /, %
    // 3. Unary: -, +
    // 4. Exponentiation: **, ^ (right associative, binds tighter than a unary
    //    operator on its left: -2**2 = -4)
    // 5. Primary: numbers, names, function calls, parentheses

    fn parse_expression(&mut self) -> FormulaResult<FormulaExpr> {
        self.parse_additive()
    }

    fn parse_additive(&mut self) -> FormulaResult<FormulaExpr> {
        let first = self.parse_multiplicative()?;
        let mut rest = Vec::new();

        loop {
            let op = match self.current_token() {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => break,
            };

            self.consume();
            rest.push((op, self.parse_multiplicative()?));
        }

        Ok(Self::chain(first, rest))
    }

    fn parse_multiplicative(&mut self) -> FormulaResult<FormulaExpr> {
        let first = self.parse_unary()?;
        let mut rest = Vec::new();

        loop {
            let op = match self.current_token() {
                Token::Star => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                Token::Percent => BinaryOperator::Modulo,
                _ => break,
            };

            self.consume();
            rest.push((op, self.parse_unary()?));
        }

        Ok(Self::chain(first, rest))
    }

    /// A lone operand, a single binary operation, or a flat chain
    fn chain(first: FormulaExpr, mut rest: Vec<(BinaryOperator, FormulaExpr)>) -> FormulaExpr {
        if rest.len() > 1 {
            return FormulaExpr::Chain {
                first: Box::new(first),
                rest,
            };
        }
        match rest.pop() {
            Some((op, right)) => FormulaExpr::BinaryOp {
                op,
                left: Box::new(first),
                right: Box::new(right),
            },
            None => first,
        }
    }

    /// Every nested construct passes through here, so this is where depth
    /// is counted
    fn parse_unary(&mut self) -> FormulaResult<FormulaExpr> {
        if self.depth >= MAX_NESTING {
            return Err(FormulaError::Parse(format!(
                "expression nested too deeply (limit {})",
                MAX_NESTING
            )));
        }
        self.depth += 1;
        let result = self.parse_signed();
        self.depth -= 1;
        result
    }

    fn parse_signed(&mut self) -> FormulaResult<FormulaExpr> {
        if matches!(self.current_token(), Token::Minus) {
            self.consume();
            let operand = self.parse_unary()?;
            return Ok(FormulaExpr::UnaryOp {
                op: UnaryOperator::Negate,
                operand: Box::new(operand),
            });
        }

        // Prefix plus (no-op)
        if matches!(self.current_token(), Token::Plus) {
            self.consume();
            return self.parse_unary();
        }

        self.parse_power()
    }

    fn parse_power(&mut self) -> FormulaResult<FormulaExpr> {
        let left = self.parse_primary()?;

        if matches!(self.current_token(), Token::DoubleStar | Token::Caret) {
            self.consume();
            // The exponent may carry its own sign: 2**-1
            let right = self.parse_unary()?;
            return Ok(FormulaExpr::BinaryOp {
                op: BinaryOperator::Power,
                left: Box::new(left),
                right: Box::new(right),
            });
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> FormulaResult<FormulaExpr> {
        match self.current_token().clone() {
            Token::Number(n) => {
                self.consume();
                Ok(FormulaExpr::Number(n))
            }

            Token::LeftParen => {
                self.consume();
                let expr = self.parse_expression()?;
                self.expect(&Token::RightParen)?;
                Ok(expr)
            }

            Token::Identifier(name) => {
                self.consume();
                if matches!(self.current_token(), Token::LeftParen) {
                    self.parse_function_call(name)
                } else {
                    Ok(Self::name_to_expr(name))
                }
            }

            other => Err(FormulaError::Parse(format!(
                "Unexpected {}",
                other.describe()
            ))),
        }
    }

    // Names are case-insensitive everywhere, so `PI` and `Pi` are the
    // constant too; only `E` depends on case, keeping `e` free as a variable.
    fn name_to_expr(name: String) -> FormulaExpr {
        if name == "E" {
            return FormulaExpr::Constant(Constant::E);
        }
        let lower = name.to_lowercase();
        if lower == "pi" {
            return FormulaExpr::Constant(Constant::Pi);
        }
        FormulaExpr::Variable(lower)
    }

    fn parse_function_call(&mut self, name: String) -> FormulaResult<FormulaExpr> {
        self.expect(&Token::LeftParen)?;

        let mut args = Vec::new();

        if !matches!(self.current_token(), Token::RightParen) {
            args.push(self.parse_expression()?);

            while matches!(self.current_token(), Token::Comma) {
                self.consume();
                args.push(self.parse_expression()?);
            }
        }

        self.expect(&Token::RightParen)?;

        Ok(FormulaExpr::Function {
            name: name.to_lowercase(),
            args,
        })
    }
}
