//! Capability interface to the symbolic algebra engine.
//!
//! The calculator depends on this narrow trait rather than on the concrete
//! engine's object model, so the pipeline stages never touch engine
//! internals: they consume the returned `Expr` handle read-only and hand it
//! back through the trait.

use crate::symbolic::symbolic_engine::Expr;
use num_complex::Complex64;

pub trait SymbolicEngine {
    /// Parses algebraic text into an expression tree, preserving the
    /// literal structure (no eager simplification).
    fn parse(&self, text: &str) -> Result<Expr, String>;

    /// Indefinite integral with respect to `var`, tidied for display.
    fn integrate(&self, expr: &Expr, var: &str) -> Result<Expr, String>;

    /// Definite integral over [lower, upper], returned as an expression so
    /// downstream typesetting is uniform with the indefinite case.
    fn integrate_between(
        &self,
        expr: &Expr,
        var: &str,
        lower: f64,
        upper: f64,
    ) -> Result<Expr, String>;

    /// Typeset (LaTeX) representation of an expression.
    fn to_typeset(&self, expr: &Expr) -> String;

    /// Typeset representation of the integral statement itself.
    fn typeset_integral(&self, expr: &Expr, var: &str, limits: Option<(f64, f64)>) -> String;

    /// Compiles the expression into a real-valued callable of `var`.
    fn compile(&self, expr: &Expr, var: &str) -> Box<dyn Fn(f64) -> f64>;

    /// Complex-valued callable, used to rescue evaluations that leave the
    /// real line.
    fn compile_complex(&self, expr: &Expr, var: &str) -> Box<dyn Fn(Complex64) -> Complex64>;
}

/// The in-crate engine: the `Expr` tree with its parsing, integration,
/// LaTeX and lambdification methods.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExprEngine;

impl SymbolicEngine for ExprEngine {
    fn parse(&self, text: &str) -> Result<Expr, String> {
        Expr::parse_expression(text)
    }

    fn integrate(&self, expr: &Expr, var: &str) -> Result<Expr, String> {
        expr.integrate(var).map(|e| e.simplify_())
    }

    fn integrate_between(
        &self,
        expr: &Expr,
        var: &str,
        lower: f64,
        upper: f64,
    ) -> Result<Expr, String> {
        expr.definite_integrate(var, lower, upper).map(Expr::Const)
    }

    fn to_typeset(&self, expr: &Expr) -> String {
        expr.to_latex()
    }

    fn typeset_integral(&self, expr: &Expr, var: &str, limits: Option<(f64, f64)>) -> String {
        expr.integral_latex(var, limits)
    }

    fn compile(&self, expr: &Expr, var: &str) -> Box<dyn Fn(f64) -> f64> {
        expr.lambdify1D_of(var)
    }

    fn compile_complex(&self, expr: &Expr, var: &str) -> Box<dyn Fn(Complex64) -> Complex64> {
        expr.lambdify1D_complex_of(var)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_engine_round_trip() {
        let engine = ExprEngine;
        let expr = engine.parse("x^2").unwrap();
        let integral = engine.integrate(&expr, "x").unwrap();
        let f = engine.compile(&integral, "x");
        assert_relative_eq!(f(3.0), 9.0, epsilon = 1e-10);
    }

    #[test]
    fn test_engine_definite() {
        let engine = ExprEngine;
        let expr = engine.parse("x^2").unwrap();
        let result = engine.integrate_between(&expr, "x", 0.0, 2.0).unwrap();
        match result {
            Expr::Const(v) => assert_relative_eq!(v, 8.0 / 3.0, epsilon = 1e-10),
            other => panic!("expected a constant, got {}", other),
        }
    }

    #[test]
    fn test_engine_parse_error_is_reported() {
        let engine = ExprEngine;
        assert!(engine.parse("(x +").is_err());
    }
}
