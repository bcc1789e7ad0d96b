//! # calcbook-formula
//!
//! Algebraic formula parser and evaluator for calcbook.
//!
//! This crate provides:
//! - Equation parsing (`speed = distance / time` → result name + AST)
//! - Expression parsing (text → AST)
//! - Free-variable extraction
//! - Numeric evaluation (AST + bindings → `f64`)
//! - Built-in elementary functions (trig, logarithms, roots, rounding)
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use calcbook_formula::{evaluate, free_variables, parse_equation, EvaluationContext};
//!
//! let equation = parse_equation("Speed = Distance / Time").unwrap();
//! assert_eq!(equation.result_name, "speed");
//! assert_eq!(free_variables(&equation.expression), vec!["distance", "time"]);
//!
//! let vars = HashMap::from([("distance".to_string(), 10.0), ("time".to_string(), 2.0)]);
//! let ctx = EvaluationContext::new(&vars);
//! assert_eq!(evaluate(&equation.expression, &ctx).unwrap(), 5.0);
//! ```

pub mod ast;
pub mod equation;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod parser;
pub mod variables;

pub use ast::{BinaryOperator, Constant, FormulaExpr, UnaryOperator};
pub use equation::{parse_equation, Equation};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, EvaluationContext};
pub use parser::parse_expression;
pub use variables::free_variables;
