//! Free-variable extraction

use crate::ast::FormulaExpr;

/// Collect the free variables of an expression
///
/// Names come back lower-cased, de-duplicated, in the order they first
/// appear reading left to right. Constants and function names are not
/// variables.
pub fn free_variables(expr: &FormulaExpr) -> Vec<String> {
    let mut vars = Vec::new();
    free_variables_recursive(expr, &mut vars);
    vars
}

fn free_variables_recursive(expr: &FormulaExpr, vars: &mut Vec<String>) {
    match expr {
        FormulaExpr::Variable(name) => {
            if !vars.iter().any(|v| v == name) {
                vars.push(name.clone());
            }
        }
        FormulaExpr::BinaryOp { left, right, .. } => {
            free_variables_recursive(left, vars);
            free_variables_recursive(right, vars);
        }
        FormulaExpr::Chain { first, rest } => {
            free_variables_recursive(first, vars);
            for (_, operand) in rest {
                free_variables_recursive(operand, vars);
            }
        }
        FormulaExpr::UnaryOp { operand, .. } => {
            free_variables_recursive(operand, vars);
        }
        FormulaExpr::Function { args, .. } => {
            for arg in args {
                free_variables_recursive(arg, vars);
            }
        }
        FormulaExpr::Number(_) | FormulaExpr::Constant(_) => {}
    }
}
