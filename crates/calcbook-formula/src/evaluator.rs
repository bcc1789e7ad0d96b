//! Formula evaluator
//!
//! Evaluates expression ASTs to `f64` values.

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use crate::functions::FunctionRegistry;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Global function registry (lazily initialized)
static FUNCTION_REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();

fn get_function_registry() -> &'static FunctionRegistry {
    FUNCTION_REGISTRY.get_or_init(FunctionRegistry::new)
}

/// Variable bindings available during evaluation
#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluationContext<'a> {
    /// Bindings keyed by lower-cased name
    pub variables: Option<&'a HashMap<String, f64>>,
}

impl<'a> EvaluationContext<'a> {
    /// Create a context over a set of bindings
    pub fn new(variables: &'a HashMap<String, f64>) -> Self {
        Self {
            variables: Some(variables),
        }
    }

    /// Create a context with no bindings (constant expressions only)
    pub fn simple() -> Self {
        Self { variables: None }
    }

    /// Look up a variable binding
    pub fn get_variable(&self, name: &str) -> Option<f64> {
        self.variables.and_then(|vars| vars.get(name).copied())
    }
}

/// Evaluate an expression
///
/// Every intermediate result must be finite; overflow, NaN, division by zero
/// and out-of-domain function arguments are reported as
/// [`FormulaError::Evaluation`].
pub fn evaluate(expr: &FormulaExpr, ctx: &EvaluationContext) -> FormulaResult<f64> {
    let value = match expr {
        // === Literals ===
        FormulaExpr::Number(n) => *n,
        FormulaExpr::Constant(c) => c.value(),

        // === Variables ===
        FormulaExpr::Variable(name) => ctx
            .get_variable(name)
            .ok_or_else(|| FormulaError::UnboundVariable(name.clone()))?,

        // === Operators ===
        FormulaExpr::BinaryOp { op, left, right } => evaluate_binary_op(*op, left, right, ctx)?,

        FormulaExpr::Chain { first, rest } => evaluate_chain(first, rest, ctx)?,

        FormulaExpr::UnaryOp { op, operand } => evaluate_unary_op(*op, operand, ctx)?,

        // === Functions ===
        FormulaExpr::Function { name, args } => evaluate_function(name, args, ctx)?,
    };

    check_finite(value)
}

fn check_finite(value: f64) -> FormulaResult<f64> {
    if value.is_nan() {
        Err(FormulaError::Evaluation("result is not a number".into()))
    } else if value.is_infinite() {
        Err(FormulaError::Evaluation("result is infinite".into()))
    } else {
        Ok(value)
    }
}

/// Evaluate a binary operation
fn evaluate_binary_op(
    op: BinaryOperator,
    left: &FormulaExpr,
    right: &FormulaExpr,
    ctx: &EvaluationContext,
) -> FormulaResult<f64> {
    // Evaluate operands first
    let l = evaluate(left, ctx)?;
    let r = evaluate(right, ctx)?;

    apply_binary_op(op, l, r)
}

/// Fold a chain left to right; every partial result must be finite
fn evaluate_chain(
    first: &FormulaExpr,
    rest: &[(BinaryOperator, FormulaExpr)],
    ctx: &EvaluationContext,
) -> FormulaResult<f64> {
    let mut acc = evaluate(first, ctx)?;
    for (op, operand) in rest {
        let r = evaluate(operand, ctx)?;
        acc = check_finite(apply_binary_op(*op, acc, r)?)?;
    }
    Ok(acc)
}

fn apply_binary_op(op: BinaryOperator, l: f64, r: f64) -> FormulaResult<f64> {
    match op {
        BinaryOperator::Add => Ok(l + r),
        BinaryOperator::Subtract => Ok(l - r),
        BinaryOperator::Multiply => Ok(l * r),
        BinaryOperator::Divide => {
            if r == 0.0 {
                Err(FormulaError::Evaluation("division by zero".into()))
            } else {
                Ok(l / r)
            }
        }
        BinaryOperator::Modulo => {
            if r == 0.0 {
                Err(FormulaError::Evaluation("modulo by zero".into()))
            } else {
                // Floored: the result takes the sign of the divisor
                let m = l % r;
                if m != 0.0 && (m < 0.0) != (r < 0.0) {
                    Ok(m + r)
                } else {
                    Ok(m)
                }
            }
        }
        BinaryOperator::Power => {
            if l == 0.0 && r < 0.0 {
                return Err(FormulaError::Evaluation(
                    "zero raised to a negative power".into(),
                ));
            }
            if l < 0.0 && r.fract() != 0.0 {
                return Err(FormulaError::Evaluation(format!(
                    "negative base {} with non-integer exponent {}",
                    l, r
                )));
            }
            Ok(l.powf(r))
        }
    }
}

/// Evaluate a unary operation
fn evaluate_unary_op(
    op: UnaryOperator,
    operand: &FormulaExpr,
    ctx: &EvaluationContext,
) -> FormulaResult<f64> {
    let value = evaluate(operand, ctx)?;

    match op {
        UnaryOperator::Negate => Ok(-value),
    }
}

/// Evaluate a function call
fn evaluate_function(
    name: &str,
    args: &[FormulaExpr],
    ctx: &EvaluationContext,
) -> FormulaResult<f64> {
    let registry = get_function_registry();

    let func = registry
        .get(name)
        .ok_or_else(|| FormulaError::UnknownFunction(name.to_string()))?;

    // Check argument count
    if args.len() < func.min_args {
        return Err(FormulaError::ArgumentCount {
            function: name.to_string(),
            expected: format!("at least {}", func.min_args),
            actual: args.len(),
        });
    }

    if let Some(max) = func.max_args {
        if args.len() > max {
            return Err(FormulaError::ArgumentCount {
                function: name.to_string(),
                expected: format!("at most {}", max),
                actual: args.len(),
            });
        }
    }

    // Evaluate arguments
    let mut evaluated_args = Vec::with_capacity(args.len());
    for arg in args {
        evaluated_args.push(evaluate(arg, ctx)?);
    }

    // Call the function
    (func.implementation)(&evaluated_args)
}
