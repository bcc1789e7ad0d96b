//! Built-in functions

pub mod math;
pub mod trig;

use crate::error::{FormulaError, FormulaResult};
use std::collections::HashMap;

/// Function implementation signature
///
/// Arguments arrive already evaluated and counted against the definition's
/// arity bounds.
pub type FunctionImpl = fn(&[f64]) -> FormulaResult<f64>;

/// Function definition
pub struct FunctionDef {
    /// Function name (lowercase)
    pub name: &'static str,
    /// Minimum arguments
    pub min_args: usize,
    /// Maximum arguments (None = unlimited)
    pub max_args: Option<usize>,
    /// Implementation
    pub implementation: FunctionImpl,
}

/// Function registry
pub struct FunctionRegistry {
    functions: HashMap<String, FunctionDef>,
}

impl FunctionRegistry {
    /// Create a new registry with all built-in functions
    pub fn new() -> Self {
        let mut registry = Self {
            functions: HashMap::new(),
        };

        registry.register_math_functions();
        registry.register_trig_functions();

        registry
    }

    /// Look up a function by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(&name.to_lowercase())
    }

    /// Register a function
    pub fn register(&mut self, def: FunctionDef) {
        self.functions.insert(def.name.to_lowercase(), def);
    }

    /// Names of all registered functions, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.functions.values().map(|f| f.name).collect();
        names.sort_unstable();
        names
    }

    fn unary(&mut self, name: &'static str, implementation: FunctionImpl) {
        self.register(FunctionDef {
            name,
            min_args: 1,
            max_args: Some(1),
            implementation,
        });
    }

    fn register_math_functions(&mut self) {
        self.unary("abs", math::fn_abs);
        self.unary("sqrt", math::fn_sqrt);
        self.unary("cbrt", math::fn_cbrt);
        self.unary("exp", math::fn_exp);
        self.unary("ln", math::fn_ln);
        self.unary("log10", math::fn_log10);
        self.unary("log2", math::fn_log2);
        self.unary("floor", math::fn_floor);
        self.unary("ceiling", math::fn_ceiling);
        self.unary("ceil", math::fn_ceiling);
        self.unary("sign", math::fn_sign);
        self.unary("factorial", math::fn_factorial);

        // LOG(x, [base]) - natural log unless a base is given
        self.register(FunctionDef {
            name: "log",
            min_args: 1,
            max_args: Some(2),
            implementation: math::fn_log,
        });

        // ROUND(x, [digits])
        self.register(FunctionDef {
            name: "round",
            min_args: 1,
            max_args: Some(2),
            implementation: math::fn_round,
        });

        // ROOT(x, n)
        self.register(FunctionDef {
            name: "root",
            min_args: 2,
            max_args: Some(2),
            implementation: math::fn_root,
        });

        // POW(x, y)
        self.register(FunctionDef {
            name: "pow",
            min_args: 2,
            max_args: Some(2),
            implementation: math::fn_pow,
        });

        // MIN / MAX
        self.register(FunctionDef {
            name: "min",
            min_args: 1,
            max_args: None,
            implementation: math::fn_min,
        });
        self.register(FunctionDef {
            name: "max",
            min_args: 1,
            max_args: None,
            implementation: math::fn_max,
        });
    }

    fn register_trig_functions(&mut self) {
        self.unary("sin", trig::fn_sin);
        self.unary("cos", trig::fn_cos);
        self.unary("tan", trig::fn_tan);
        self.unary("asin", trig::fn_asin);
        self.unary("acos", trig::fn_acos);
        self.unary("atan", trig::fn_atan);
        self.unary("sinh", trig::fn_sinh);
        self.unary("cosh", trig::fn_cosh);
        self.unary("tanh", trig::fn_tanh);
        self.unary("asinh", trig::fn_asinh);
        self.unary("acosh", trig::fn_acosh);
        self.unary("atanh", trig::fn_atanh);

        // ATAN2(y, x)
        self.register(FunctionDef {
            name: "atan2",
            min_args: 2,
            max_args: Some(2),
            implementation: trig::fn_atan2,
        });
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Domain error for `function` given `value`
pub(crate) fn domain_error(function: &str, value: f64) -> FormulaError {
    FormulaError::Evaluation(format!("{} is undefined for {}", function, value))
}
