//! Turning formula and input text into a new table row

use calcbook_core::{Row, Table};
use calcbook_formula::{evaluate as evaluate_expression, parse_equation, EvaluationContext};

use crate::bindings::parse_bindings;
use crate::error::{Error, Result};
use crate::merge::merge_row;

/// A successful calculation
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Lower-cased result name
    pub result_name: String,
    /// Computed value
    pub result: f64,
    /// Free variables of the formula, in first-appearance order
    pub variables: Vec<String>,
    /// The appended row: each variable's input, then the result
    pub row: Row,
    /// The existing table with the row merged in
    pub table: Table,
}

/// Evaluate `formula` against `inputs` and merge the result into `existing`
///
/// Steps fail in order: formula shape, expression syntax, input format,
/// missing variables, numeric evaluation. `existing` is never modified.
///
/// # Example
/// ```rust
/// use calcbook::{evaluate, Table};
///
/// let eval = evaluate("Speed = Distance / Time", r#"{"distance": 10, "time": 2}"#, &Table::new()).unwrap();
/// assert_eq!(eval.result_name, "speed");
/// assert_eq!(eval.result, 5.0);
/// assert_eq!(eval.table.columns(), &["distance", "time", "speed"]);
/// ```
pub fn evaluate(formula: &str, inputs: &str, existing: &Table) -> Result<Evaluation> {
    let equation = parse_equation(formula)?;
    let variables = equation.variables();

    let bindings = parse_bindings(inputs)?;

    let missing: Vec<String> = variables
        .iter()
        .filter(|v| !bindings.contains_key(v.as_str()))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(Error::MissingVariables(missing));
    }

    let result = evaluate_expression(&equation.expression, &EvaluationContext::new(&bindings))?;

    let mut row = Row::new();
    for variable in &variables {
        row.set(variable.as_str(), bindings[variable.as_str()]);
    }
    row.set(equation.result_name.as_str(), result);

    let table = merge_row(existing, row.clone());
    // The merged copy carries the assigned order
    let row = table.rows().last().cloned().unwrap_or(row);

    Ok(Evaluation {
        result_name: equation.result_name,
        result,
        variables,
        row,
        table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use calcbook_core::CellValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_speed() {
        let eval = evaluate(
            "Speed = Distance / Time",
            r#"{"distance": 10, "time": 2}"#,
            &Table::new(),
        )
        .unwrap();

        assert_eq!(
            eval.row,
            Row::new()
                .with("distance", 10.0)
                .with("time", 2.0)
                .with("speed", 5.0)
                .with_order(1)
        );
    }

    #[test]
    fn test_area_uses_pi() {
        let eval = evaluate("area = pi * r**2", r#"{"r": 2}"#, &Table::new()).unwrap();
        assert_eq!(eval.result, std::f64::consts::PI * 4.0);
        assert_eq!(eval.row.get("r"), Some(&CellValue::Number(2.0)));
    }

    #[test]
    fn test_missing_variables_listed_in_order() {
        let err = evaluate("v = a * b + c", "{B: 1}", &Table::new()).unwrap_err();
        assert!(matches!(err, Error::MissingVariables(ref vars) if vars == &["a", "c"]));
    }

    #[test]
    fn test_unused_inputs_are_not_stored() {
        let eval = evaluate("y = 2 * x", "{x: 3, z: 9}", &Table::new()).unwrap();
        assert_eq!(eval.row.get("z"), None);
        assert_eq!(eval.table.columns(), &["x", "y"]);
    }

    #[test]
    fn test_error_precedence() {
        // Formula errors are reported before input errors
        assert!(matches!(
            evaluate("no equals", "not a dict", &Table::new()),
            Err(Error::MalformedFormula(_))
        ));
        assert!(matches!(
            evaluate("y = (x", "not a dict", &Table::new()),
            Err(Error::ParseError(_))
        ));
        assert!(matches!(
            evaluate("y = x", "not a dict", &Table::new()),
            Err(Error::InvalidInputFormat(_))
        ));
        assert!(matches!(
            evaluate("y = x / 0", "{x: 1}", &Table::new()),
            Err(Error::EvaluationError(_))
        ));
        assert!(matches!(
            evaluate("y = nosuch(x)", "{x: 1}", &Table::new()),
            Err(Error::EvaluationError(_))
        ));
    }

    #[test]
    fn test_constant_formula_needs_no_inputs() {
        let eval = evaluate("two_pi = 2 * pi", "", &Table::new()).unwrap();
        assert_eq!(eval.variables, Vec::<String>::new());
        assert_eq!(eval.table.columns(), &["two_pi"]);
    }

    #[test]
    fn test_result_replaces_its_own_input() {
        let eval = evaluate("x = x + 1", "{x: 1}", &Table::new()).unwrap();
        assert_eq!(eval.result, 2.0);
        assert_eq!(eval.row, Row::new().with("x", 2.0).with_order(1));
        assert_eq!(eval.table.columns(), &["x"]);
    }

    #[test]
    fn test_long_formulas() {
        let sum = format!("y = {}", vec!["x"; 1000].join(" + "));
        assert_eq!(evaluate(&sum, "{x: 1}", &Table::new()).unwrap().result, 1000.0);

        let nested = format!("y = {}x{}", "(".repeat(1000), ")".repeat(1000));
        assert!(matches!(
            evaluate(&nested, "{x: 1}", &Table::new()),
            Err(Error::ParseError(_))
        ));

        let signs = format!("y = {}x", "-".repeat(200_000));
        assert!(matches!(
            evaluate(&signs, "{x: 1}", &Table::new()),
            Err(Error::ParseError(_))
        ));
    }

    #[test]
    fn test_existing_table_untouched_on_failure() {
        let existing = evaluate("y = 2 * x", "{x: 1}", &Table::new()).unwrap().table;
        let before = existing.clone();
        assert!(evaluate("y = 2 * x", "{}", &existing).is_err());
        assert_eq!(existing, before);
    }
}
