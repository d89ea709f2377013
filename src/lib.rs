//! # Layman percentage calculator
//!
//! Evaluates arithmetic expressions the way a pocket calculator user expects.
//! All numbers are `f64`, and the result of every operation is rounded to 15
//! significant digits, so `0.1 + 0.2` is `0.3` and `6.9 + 900%` is `69`.
//!
//! Operators (starting from highest priority):
//! * `+`, `-`, `%` - unary plus, unary minus, percentage
//! * `^` - power, right-associative: `2 ^ 3 ^ 2` is `2 ^ 9`
//! * `*`, `/` - multiplication, division
//! * `+`, `-` - addition, subtraction
//!
//! Percentage depends on where it is used:
//! * alone it is a hundredth: `50%` -> `0.5`, `2 * 50%` -> `1`
//! * after addition or subtraction it is a percent of everything to the left:
//! `100 + 10%` -> `110`, `100 - 31%` -> `69`, `100 + 10% + 10%` -> `121`
//!
//! Any invalid expression evaluates to NaN. Use `eval` to find out why an
//! expression was rejected. Division by zero is not an error: `1/0` is
//! infinity

#[macro_use]
extern crate pest_derive;

pub mod errors;
pub mod expr;
pub mod lexer;
pub mod parse;
mod percent;
mod proptests;
pub mod value;

use log::debug;

use crate::lexer::tokenize;
use crate::value::*;

/// Calculator settings
#[derive(Clone, Debug)]
pub struct Calculator {
    precision: usize,
}

impl Default for Calculator {
    fn default() -> Calculator {
        Calculator { precision: PRECISION }
    }
}

impl Calculator {
    pub fn new() -> Self {
        Default::default()
    }

    /// Changes the number of significant digits results are rounded to.
    /// The value is clamped to 1..=17
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision.max(1).min(MAX_PRECISION);
        self
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Evaluates an expression and returns either result or the reason why
    /// the expression is invalid
    pub fn eval(&self, expr: &str) -> CalcResult {
        let tokens = tokenize(expr, true);
        let tree = parse::parse(tokens)?;
        let v = tree.calculate(self.precision);
        debug!("{:?} = {}", expr, v);
        Ok(v)
    }

    /// Evaluates an expression. Any error is returned as NaN
    pub fn evaluate(&self, expr: &str) -> f64 {
        self.eval(expr).unwrap_or(f64::NAN)
    }

    /// Evaluates an expression and formats the result for display
    pub fn display(&self, expr: &str) -> String {
        format_f64(self.evaluate(expr))
    }
}

/// Evaluates an expression with default settings and returns either result or error
pub fn eval(expr: &str) -> CalcResult {
    Calculator::new().eval(expr)
}

/// Evaluates an expression with default settings. Invalid expressions give NaN
pub fn evaluate(expr: &str) -> f64 {
    Calculator::new().evaluate(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;

    #[test]
    fn test_errors() {
        let exprs = [
            "", "a", "(", ")", "+", "-", "*", "%", "/", ".", "a1", "1a", "()", "2**", "2 3", "2//", "2..", "..2",
            "2..2", "2+(3", "(2+3", "2+3)", "2.2.2", "(2+3))", "7\t*6", "7\n*6", "7\u{a0}*6", "  7\t*\n6 ",
            "1 ^ (1/0)", "(-1) ^ (1/0)", "1 ^ (-1/0)", "100% ^ +100 ^ 50 ^ 2 - 1%",
        ];
        for expr in exprs.iter() {
            let v = evaluate(expr);
            assert!(v.is_nan(), "'{}' must be NaN, got {}", expr, v);
        }
    }

    #[test]
    fn test_arithmetic() {
        let cases: [(&'static str, f64); 25] = [
            ("69", 69.0),
            ("-69", -69.0),
            ("-(69)", -69.0),
            ("(-69)", -69.0),
            ("23 * 3", 69.0),
            ("34 + 35", 69.0),
            ("2%%", 0.0002),
            ("-69%", -0.69),
            ("138 - 69", 69.0),
            ("1/0", f64::INFINITY),
            ("100 - 31%", 69.0),
            ("(-69%)", -0.69),
            ("6.9 + 900%", 69.0),
            ("476.1 / 6.9", 69.0),
            ("6.9 * 1000%", 69.0),
            ("2 ^ 2", 4.0),
            ("(2) ^ (2)", 4.0),
            ("2 ^ 3 ^ 2", 512.0),
            ("(2 ^ 3) ^ 2", 64.0),
            ("0.1 + 0.2", 0.3),
            ("-1/0", f64::NEG_INFINITY),
            ("  7 *  6 ", 42.0),
            ("2 ^ 50 - 15", 1125899906842610.0),
            ("1000000000000005 + 0", 1000000000000010.0),
            ("100000000000000.5 + 0", 100000000000001.0),
        ];
        for (expr, res) in cases.iter() {
            assert_eq!(evaluate(expr), *res, "{}", expr);
        }
    }

    #[test]
    fn test_layman_percentage() {
        let cases: [(&'static str, f64); 8] = [
            ("100 + 10%", 110.0),
            ("100 + (100 + 10%)", 210.0),
            ("100 + 10% + 10%", 121.0),
            ("100 + (100 + 10%) + 10%", 231.0),
            ("100 + (100 + 10% + 10%)", 221.0),
            ("100 + ((100 * 2) + 10% + (4/2))", 322.0),
            ("(100 + 10%)", 110.0),
            ("200 - 50% + 50%", 150.0),
        ];
        for (expr, res) in cases.iter() {
            assert_eq!(evaluate(expr), *res, "{}", expr);
        }
    }

    #[test]
    fn test_eval_reason() {
        assert_eq!(eval("2 + 2"), Ok(4.0));
        assert_eq!(eval("2 3"), Err(CalcError::InsufficientOps));
        assert_eq!(eval("2 + x"), Err(CalcError::InvalidChar('x')));
        assert_eq!(eval("(2"), Err(CalcError::OpenBracketMismatch));
        assert_eq!(eval("2 +"), Err(CalcError::EmptyExpression));
        // a broken number is a value, not a syntax error
        assert!(eval("2.2.2 + 1").unwrap().is_nan());
    }

    #[test]
    fn test_idempotent() {
        let calc = Calculator::new();
        for expr in ["100 + 10% + 10%", "2 ^ 3 ^ 2", "2 3", "6.9 + 900%"].iter() {
            let first = calc.evaluate(expr);
            let second = calc.evaluate(expr);
            assert!(first == second || (first.is_nan() && second.is_nan()), "{}", expr);
        }
    }

    #[test]
    fn test_precision() {
        let calc = Calculator::new();
        assert_eq!(calc.precision(), 15);
        assert_eq!(calc.evaluate("2 / 3"), 0.666666666666667);
        let calc = Calculator::new().with_precision(3);
        assert_eq!(calc.evaluate("2 / 3"), 0.667);
        assert_eq!(calc.evaluate("1234 * 1"), 1230.0);
        assert_eq!(Calculator::new().with_precision(0).precision(), 1);
        assert_eq!(Calculator::new().with_precision(100).precision(), 17);
    }

    #[test]
    fn test_display() {
        let calc = Calculator::new();
        assert_eq!(calc.display("100 + 10%"), "110");
        assert_eq!(calc.display("-69%"), "-0.69");
        assert_eq!(calc.display("1/0"), "Infinity");
        assert_eq!(calc.display("2 +"), "NaN");
    }
}
