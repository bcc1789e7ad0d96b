//! Trigonometric and hyperbolic functions (radians)

use super::domain_error;
use crate::error::FormulaResult;

pub fn fn_sin(args: &[f64]) -> FormulaResult<f64> {
    Ok(args[0].sin())
}

pub fn fn_cos(args: &[f64]) -> FormulaResult<f64> {
    Ok(args[0].cos())
}

pub fn fn_tan(args: &[f64]) -> FormulaResult<f64> {
    Ok(args[0].tan())
}

fn unit_interval(function: &str, x: f64) -> FormulaResult<f64> {
    if !(-1.0..=1.0).contains(&x) {
        return Err(domain_error(function, x));
    }
    Ok(x)
}

/// ASIN(x) - x in [-1, 1]
pub fn fn_asin(args: &[f64]) -> FormulaResult<f64> {
    Ok(unit_interval("asin", args[0])?.asin())
}

/// ACOS(x) - x in [-1, 1]
pub fn fn_acos(args: &[f64]) -> FormulaResult<f64> {
    Ok(unit_interval("acos", args[0])?.acos())
}

pub fn fn_atan(args: &[f64]) -> FormulaResult<f64> {
    Ok(args[0].atan())
}

/// ATAN2(y, x)
pub fn fn_atan2(args: &[f64]) -> FormulaResult<f64> {
    Ok(args[0].atan2(args[1]))
}

pub fn fn_sinh(args: &[f64]) -> FormulaResult<f64> {
    Ok(args[0].sinh())
}

pub fn fn_cosh(args: &[f64]) -> FormulaResult<f64> {
    Ok(args[0].cosh())
}

pub fn fn_tanh(args: &[f64]) -> FormulaResult<f64> {
    Ok(args[0].tanh())
}

pub fn fn_asinh(args: &[f64]) -> FormulaResult<f64> {
    Ok(args[0].asinh())
}

/// ACOSH(x) - x >= 1
pub fn fn_acosh(args: &[f64]) -> FormulaResult<f64> {
    let x = args[0];
    if x < 1.0 {
        return Err(domain_error("acosh", x));
    }
    Ok(x.acosh())
}

/// ATANH(x) - x in (-1, 1)
pub fn fn_atanh(args: &[f64]) -> FormulaResult<f64> {
    let x = args[0];
    if x <= -1.0 || x >= 1.0 {
        return Err(domain_error("atanh", x));
    }
    Ok(x.atanh())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_basic_trig() {
        assert_eq!(fn_sin(&[0.0]).unwrap(), 0.0);
        assert_eq!(fn_cos(&[0.0]).unwrap(), 1.0);
        assert!((fn_sin(&[FRAC_PI_2]).unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(fn_atan2(&[0.0, -1.0]).unwrap(), PI);
    }

    #[test]
    fn test_inverse_domains() {
        assert_eq!(fn_asin(&[1.0]).unwrap(), FRAC_PI_2);
        assert!(fn_asin(&[1.5]).is_err());
        assert!(fn_acos(&[-2.0]).is_err());
        assert_eq!(fn_acosh(&[1.0]).unwrap(), 0.0);
        assert!(fn_acosh(&[0.5]).is_err());
        assert!(fn_atanh(&[1.0]).is_err());
        assert_eq!(fn_atanh(&[0.0]).unwrap(), 0.0);
    }
}
