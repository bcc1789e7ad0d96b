//! Math functions

use super::domain_error;
use crate::error::{FormulaError, FormulaResult};

/// Largest n whose factorial fits in an f64
const MAX_FACTORIAL: f64 = 170.0;

/// ABS(x)
pub fn fn_abs(args: &[f64]) -> FormulaResult<f64> {
    Ok(args[0].abs())
}

/// SQRT(x) - x must be non-negative
pub fn fn_sqrt(args: &[f64]) -> FormulaResult<f64> {
    let x = args[0];
    if x < 0.0 {
        return Err(domain_error("sqrt", x));
    }
    Ok(x.sqrt())
}

/// CBRT(x) - real cube root, defined for negative x
pub fn fn_cbrt(args: &[f64]) -> FormulaResult<f64> {
    Ok(args[0].cbrt())
}

/// ROOT(x, n) - real n-th root; odd roots of negative numbers are allowed
pub fn fn_root(args: &[f64]) -> FormulaResult<f64> {
    let (x, n) = (args[0], args[1]);
    if n == 0.0 {
        return Err(FormulaError::Evaluation("zeroth root is undefined".into()));
    }
    if x < 0.0 {
        let odd_integer = n.fract() == 0.0 && n % 2.0 != 0.0;
        if !odd_integer {
            return Err(domain_error("root", x));
        }
        return Ok(-(-x).powf(1.0 / n));
    }
    Ok(x.powf(1.0 / n))
}

/// EXP(x)
pub fn fn_exp(args: &[f64]) -> FormulaResult<f64> {
    Ok(args[0].exp())
}

fn positive(function: &str, x: f64) -> FormulaResult<f64> {
    if x <= 0.0 {
        Err(domain_error(function, x))
    } else {
        Ok(x)
    }
}

/// LOG(x, [base]) - natural logarithm unless a base is given
pub fn fn_log(args: &[f64]) -> FormulaResult<f64> {
    let x = positive("log", args[0])?;
    match args.get(1) {
        None => Ok(x.ln()),
        Some(&base) => {
            let base = positive("log base", base)?;
            if base == 1.0 {
                return Err(FormulaError::Evaluation("log base 1 is undefined".into()));
            }
            Ok(x.ln() / base.ln())
        }
    }
}

/// LN(x)
pub fn fn_ln(args: &[f64]) -> FormulaResult<f64> {
    Ok(positive("ln", args[0])?.ln())
}

/// LOG10(x)
pub fn fn_log10(args: &[f64]) -> FormulaResult<f64> {
    Ok(positive("log10", args[0])?.log10())
}

/// LOG2(x)
pub fn fn_log2(args: &[f64]) -> FormulaResult<f64> {
    Ok(positive("log2", args[0])?.log2())
}

/// FLOOR(x)
pub fn fn_floor(args: &[f64]) -> FormulaResult<f64> {
    Ok(args[0].floor())
}

/// CEILING(x)
pub fn fn_ceiling(args: &[f64]) -> FormulaResult<f64> {
    Ok(args[0].ceil())
}

/// ROUND(x, [digits]) - rounds half away from zero
///
/// Negative digits round to the left of the decimal point.
pub fn fn_round(args: &[f64]) -> FormulaResult<f64> {
    let x = args[0];
    let digits = args.get(1).copied().unwrap_or(0.0);
    if digits.fract() != 0.0 {
        return Err(FormulaError::Evaluation(format!(
            "round digits must be an integer, got {}",
            digits
        )));
    }

    if digits.abs() > 308.0 {
        return Ok(if digits > 0.0 { x } else { 0.0 });
    }
    // f64::round is already half-away-from-zero
    let multiplier = 10_f64.powi(digits.abs() as i32);
    if digits >= 0.0 {
        let scaled = x * multiplier;
        if !scaled.is_finite() {
            return Ok(x);
        }
        Ok(scaled.round() / multiplier)
    } else {
        Ok((x / multiplier).round() * multiplier)
    }
}

/// SIGN(x) - -1, 0 or 1
pub fn fn_sign(args: &[f64]) -> FormulaResult<f64> {
    let x = args[0];
    Ok(if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    })
}

/// MIN(x, ...)
pub fn fn_min(args: &[f64]) -> FormulaResult<f64> {
    Ok(args.iter().copied().fold(f64::INFINITY, f64::min))
}

/// MAX(x, ...)
pub fn fn_max(args: &[f64]) -> FormulaResult<f64> {
    Ok(args.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

/// POW(x, y) - same rules as the `**` operator
pub fn fn_pow(args: &[f64]) -> FormulaResult<f64> {
    let (x, y) = (args[0], args[1]);
    if x == 0.0 && y < 0.0 {
        return Err(FormulaError::Evaluation(
            "zero raised to a negative power".into(),
        ));
    }
    if x < 0.0 && y.fract() != 0.0 {
        return Err(domain_error("pow", x));
    }
    Ok(x.powf(y))
}

/// FACTORIAL(n) - n must be a non-negative integer no larger than 170
pub fn fn_factorial(args: &[f64]) -> FormulaResult<f64> {
    let n = args[0];
    if n < 0.0 || n.fract() != 0.0 || n > MAX_FACTORIAL {
        return Err(domain_error("factorial", n));
    }
    Ok((1..=n as u32).fold(1.0, |acc, k| acc * k as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(fn_round(&[2.5]).unwrap(), 3.0);
        assert_eq!(fn_round(&[-2.5]).unwrap(), -3.0);
        assert_eq!(fn_round(&[2.4]).unwrap(), 2.0);
        assert_eq!(fn_round(&[3.14159, 2.0]).unwrap(), 3.14);
        assert_eq!(fn_round(&[1234.0, -2.0]).unwrap(), 1200.0);
        assert!(fn_round(&[1.0, 0.5]).is_err());
    }

    #[test]
    fn test_logs() {
        assert_eq!(fn_log(&[8.0, 2.0]).unwrap(), 3.0);
        assert_eq!(fn_log(&[1.0]).unwrap(), 0.0);
        assert_eq!(fn_log10(&[1000.0]).unwrap(), 3.0);
        assert_eq!(fn_log2(&[8.0]).unwrap(), 3.0);
        assert!(fn_ln(&[0.0]).is_err());
        assert!(fn_log(&[-1.0]).is_err());
        assert!(fn_log(&[5.0, 1.0]).is_err());
    }

    #[test]
    fn test_roots() {
        assert_eq!(fn_sqrt(&[9.0]).unwrap(), 3.0);
        assert!(fn_sqrt(&[-1.0]).is_err());
        assert_eq!(fn_cbrt(&[-27.0]).unwrap(), -3.0);
        assert!((fn_root(&[16.0, 4.0]).unwrap() - 2.0).abs() < 1e-12);
        assert!((fn_root(&[-8.0, 3.0]).unwrap() + 2.0).abs() < 1e-12);
        assert!(fn_root(&[-16.0, 4.0]).is_err());
        assert!(fn_root(&[4.0, 0.0]).is_err());
    }

    #[test]
    fn test_factorial() {
        assert_eq!(fn_factorial(&[0.0]).unwrap(), 1.0);
        assert_eq!(fn_factorial(&[5.0]).unwrap(), 120.0);
        assert!(fn_factorial(&[170.0]).unwrap().is_finite());
        assert!(fn_factorial(&[171.0]).is_err());
        assert!(fn_factorial(&[-1.0]).is_err());
        assert!(fn_factorial(&[2.5]).is_err());
    }

    #[test]
    fn test_min_max_sign() {
        assert_eq!(fn_min(&[3.0, -1.0, 2.0]).unwrap(), -1.0);
        assert_eq!(fn_max(&[3.0, -1.0, 2.0]).unwrap(), 3.0);
        assert_eq!(fn_sign(&[-4.0]).unwrap(), -1.0);
        assert_eq!(fn_sign(&[0.0]).unwrap(), 0.0);
        assert_eq!(fn_floor(&[-1.5]).unwrap(), -2.0);
        assert_eq!(fn_ceiling(&[-1.5]).unwrap(), -1.0);
    }
}
