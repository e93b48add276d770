//! Symbolic evaluation stage: parse the canonical text and integrate it,
//! producing the symbolic result plus typeset forms of both the integral
//! statement and the result.
//!
//! This stage has no side effects; for a given input it always produces the
//! same output, which is what makes repeated "Calculate" clicks idempotent.

use crate::calculator::engine::SymbolicEngine;
use crate::calculator::input_normalizer::{LimitPair, NormalizedExpression};
use crate::symbolic::symbolic_engine::Expr;
use log::debug;

/// Outcome of a successful integration. Owned by this evaluation request
/// and consumed read-only by the typeset and plot branches.
#[derive(Debug, Clone)]
pub struct SymbolicResult {
    /// The integral (antiderivative, or a constant for definite bounds).
    pub result: Expr,
    /// Typeset form of the integral statement, bounds included when given.
    pub integral_latex: String,
    /// Typeset form of the result.
    pub result_latex: String,
}

/// Parses the normalized expression and integrates it, indefinite or
/// definite depending on the limits. Returns the original (pre-integration)
/// expression alongside the result: the plotter samples the original.
///
/// Engine failures (parse, unsupported shape, singular definite integral)
/// come back as `Err` with the engine's message attached.
pub fn evaluate(
    engine: &dyn SymbolicEngine,
    normalized: &NormalizedExpression,
    limits: Option<LimitPair>,
) -> Result<(Expr, SymbolicResult), String> {
    let expr = engine.parse(&normalized.canonical_text)?;
    let var = normalized.variable.as_str();
    debug!("parsed expression: {}", expr);

    let (result, limit_tuple) = match limits {
        Some(pair) => (
            engine.integrate_between(&expr, var, pair.lower, pair.upper)?,
            Some((pair.lower, pair.upper)),
        ),
        None => (engine.integrate(&expr, var)?, None),
    };
    debug!("integration result: {}", result);

    let integral_latex = engine.typeset_integral(&expr, var, limit_tuple);
    let result_latex = engine.to_typeset(&result);

    Ok((
        expr,
        SymbolicResult {
            result,
            integral_latex,
            result_latex,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::engine::ExprEngine;
    use approx::assert_relative_eq;

    fn normalized(text: &str, var: &str) -> NormalizedExpression {
        NormalizedExpression {
            canonical_text: text.to_string(),
            variable: var.to_string(),
        }
    }

    #[test]
    fn test_indefinite_square() {
        let engine = ExprEngine;
        let (original, result) = evaluate(&engine, &normalized("x^2", "x"), None).unwrap();
        assert_eq!(format!("{}", original), "(x ^ 2)");
        // x^3/3 up to the additive constant
        assert_relative_eq!(result.result.eval_at("x", 3.0), 9.0, epsilon = 1e-10);
        assert_eq!(result.integral_latex, "\\int x^{2}\\, dx");
        assert!(!result.result_latex.is_empty());
    }

    #[test]
    fn test_definite_square() {
        let engine = ExprEngine;
        let limits = Some(LimitPair {
            lower: 0.0,
            upper: 2.0,
        });
        let (_, result) = evaluate(&engine, &normalized("x^2", "x"), limits).unwrap();
        match result.result {
            Expr::Const(v) => assert_relative_eq!(v, 8.0 / 3.0, epsilon = 1e-10),
            ref other => panic!("expected a constant, got {}", other),
        }
        assert!(result.integral_latex.contains("\\limits_{0}^{2}"));
    }

    #[test]
    fn test_indefinite_sin() {
        let engine = ExprEngine;
        let (_, result) = evaluate(&engine, &normalized("sin(x)", "x"), None).unwrap();
        // -cos(x): value at 0 is -1
        assert_relative_eq!(result.result.eval_at("x", 0.0), -1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_parse_failure_propagates() {
        let engine = ExprEngine;
        assert!(evaluate(&engine, &normalized("(x +", "x"), None).is_err());
    }

    #[test]
    fn test_singular_definite_integral_fails() {
        let engine = ExprEngine;
        let limits = Some(LimitPair {
            lower: -1.0,
            upper: 1.0,
        });
        assert!(evaluate(&engine, &normalized("1/x", "x"), limits).is_err());
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let engine = ExprEngine;
        let input = normalized("x^2 + sin(x)", "x");
        let (_, first) = evaluate(&engine, &input, None).unwrap();
        let (_, second) = evaluate(&engine, &input, None).unwrap();
        assert_eq!(first.result, second.result);
        assert_eq!(first.integral_latex, second.integral_latex);
        assert_eq!(first.result_latex, second.result_latex);
    }
}
