//! Formula Abstract Syntax Tree types

/// Formula expression AST
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaExpr {
    // === Literals ===
    /// Numeric literal
    Number(f64),
    /// Named mathematical constant
    Constant(Constant),

    // === Variables ===
    /// Free variable, name lower-cased
    Variable(String),

    // === Operators ===
    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<FormulaExpr>,
        right: Box<FormulaExpr>,
    },
    /// Run of two or more same-precedence operators applied left to right:
    /// `first op rhs op rhs ...`. Kept flat so its depth does not grow
    /// with its length.
    Chain {
        first: Box<FormulaExpr>,
        rest: Vec<(BinaryOperator, FormulaExpr)>,
    },
    /// Unary operation
    UnaryOp {
        op: UnaryOperator,
        operand: Box<FormulaExpr>,
    },

    // === Function call ===
    /// Function call, name lower-cased
    Function {
        name: String,
        args: Vec<FormulaExpr>,
    },
}

/// Built-in constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    /// π, written `pi` in any letter case
    Pi,
    /// Euler's number, written `E`
    E,
}

impl Constant {
    /// Numeric value of the constant
    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// Floored modulo, sign follows the divisor
    Modulo,
    Power,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
}
