//! `name = expression` equations

use crate::ast::FormulaExpr;
use crate::error::{FormulaError, FormulaResult};
use crate::parser::parse_expression;
use crate::variables::free_variables;

/// A parsed equation: the result column name and the expression computing it
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    /// Result name, trimmed and lower-cased
    pub result_name: String,
    /// Right-hand side
    pub expression: FormulaExpr,
}

impl Equation {
    /// Free variables of the right-hand side, in first-appearance order
    pub fn variables(&self) -> Vec<String> {
        free_variables(&self.expression)
    }
}

/// Parse `<identifier> = <expression>`
///
/// The text is split on the first `=`. The left side must be a single
/// identifier other than a constant. It may also appear on the right side
/// (`x = x + 1`), in which case the result replaces that input in the row.
pub fn parse_equation(text: &str) -> FormulaResult<Equation> {
    let (lhs, rhs) = text
        .split_once('=')
        .ok_or_else(|| FormulaError::Malformed("expected '<name> = <expression>'".into()))?;

    let result_name = lhs.trim().to_lowercase();
    if !is_identifier(&result_name) {
        return Err(FormulaError::Malformed(format!(
            "'{}' is not a valid result name",
            lhs.trim()
        )));
    }
    if result_name == "pi" || lhs.trim() == "E" {
        return Err(FormulaError::Malformed(format!(
            "'{}' is a constant and cannot be a result name",
            lhs.trim()
        )));
    }

    let expression = parse_expression(rhs)?;

    Ok(Equation {
        result_name,
        expression,
    })
}

/// ASCII identifier: a letter or underscore, then letters, digits, underscores
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_equation() {
        let eq = parse_equation("  Speed =Distance/ Time ").unwrap();
        assert_eq!(eq.result_name, "speed");
        assert_eq!(eq.variables(), vec!["distance", "time"]);
    }

    #[test]
    fn test_splits_on_first_equals() {
        // The remainder is handed to the expression parser, which rejects '='
        assert!(matches!(
            parse_equation("a = b = c"),
            Err(FormulaError::Parse(_))
        ));
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            parse_equation("speed distance / time"),
            Err(FormulaError::Malformed(_))
        ));
        assert!(matches!(
            parse_equation(" = 1 + 2"),
            Err(FormulaError::Malformed(_))
        ));
        assert!(matches!(
            parse_equation("a b = 1"),
            Err(FormulaError::Malformed(_))
        ));
        assert!(matches!(
            parse_equation("2x = 1"),
            Err(FormulaError::Malformed(_))
        ));
        assert!(matches!(
            parse_equation("PI = 3"),
            Err(FormulaError::Malformed(_))
        ));
    }

    #[test]
    fn test_result_may_be_an_input() {
        let eq = parse_equation("X = x + 1").unwrap();
        assert_eq!(eq.result_name, "x");
        assert_eq!(eq.variables(), vec!["x"]);
    }

    #[test]
    fn test_parse_error_on_rhs() {
        assert!(matches!(
            parse_equation("y = (x + "),
            Err(FormulaError::Parse(_))
        ));
        assert!(matches!(parse_equation("y ="), Err(FormulaError::Parse(_))));
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("x"));
        assert!(is_identifier("_tmp2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("9a"));
        assert!(!is_identifier("a-b"));
    }
}
