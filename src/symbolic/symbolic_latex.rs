//! LaTeX printer for symbolic expressions and integral statements.
//!
//! `to_latex` renders an `Expr` in standard mathematical markup;
//! `integral_latex` renders the integral *statement* (with bounds when the
//! integration is definite). The definite form deliberately emits the
//! `\limits` placement directive, matching what algebra engines produce;
//! the typeset renderer strips it for surfaces that cannot handle it.

use crate::symbolic::symbolic_engine::Expr;

impl Expr {
    /// Renders the expression as LaTeX markup.
    pub fn to_latex(&self) -> String {
        match self {
            Expr::Var(name) => name.clone(),
            Expr::Const(val) => format!("{}", val),
            Expr::Add(lhs, rhs) => format!("{} + {}", lhs.to_latex(), rhs.to_latex()),
            Expr::Sub(lhs, rhs) => format!("{} - {}", lhs.to_latex(), rhs.latex_operand()),
            Expr::Mul(lhs, rhs) => format!(
                "{} \\cdot {}",
                lhs.latex_operand(),
                rhs.latex_operand()
            ),
            Expr::Div(lhs, rhs) => {
                format!("\\frac{{{}}}{{{}}}", lhs.to_latex(), rhs.to_latex())
            }
            Expr::Pow(base, exp) => {
                format!("{}^{{{}}}", base.latex_base(), exp.to_latex())
            }
            Expr::Exp(expr) => format!("e^{{{}}}", expr.to_latex()),
            Expr::Ln(expr) => format!("\\ln\\left({}\\right)", expr.to_latex()),
            Expr::sin(expr) => format!("\\sin\\left({}\\right)", expr.to_latex()),
            Expr::cos(expr) => format!("\\cos\\left({}\\right)", expr.to_latex()),
            Expr::tg(expr) => format!("\\tan\\left({}\\right)", expr.to_latex()),
            Expr::ctg(expr) => format!("\\cot\\left({}\\right)", expr.to_latex()),
            Expr::arcsin(expr) => format!("\\arcsin\\left({}\\right)", expr.to_latex()),
            Expr::arccos(expr) => format!("\\arccos\\left({}\\right)", expr.to_latex()),
            Expr::arctg(expr) => format!("\\arctan\\left({}\\right)", expr.to_latex()),
            Expr::arcctg(expr) => {
                format!("\\operatorname{{arccot}}\\left({}\\right)", expr.to_latex())
            }
        }
    }

    /// Operand form: sums and differences get protective parentheses.
    fn latex_operand(&self) -> String {
        match self {
            Expr::Add(_, _) | Expr::Sub(_, _) => {
                format!("\\left({}\\right)", self.to_latex())
            }
            _ => self.to_latex(),
        }
    }

    /// Base-of-power form: anything but a plain symbol or number gets
    /// parentheses so the exponent binds to the whole base.
    fn latex_base(&self) -> String {
        match self {
            Expr::Var(_) | Expr::Const(_) => self.to_latex(),
            _ => format!("\\left({}\\right)", self.to_latex()),
        }
    }

    /// Renders the integral statement for this integrand: with bounds
    /// (definite) or without (indefinite).
    pub fn integral_latex(&self, var: &str, limits: Option<(f64, f64)>) -> String {
        match limits {
            Some((lower, upper)) => format!(
                "\\int\\limits_{{{}}}^{{{}}} {}\\, d{}",
                lower,
                upper,
                self.to_latex(),
                var
            ),
            None => format!("\\int {}\\, d{}", self.to_latex(), var),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Expr {
        Expr::parse_expression(s).unwrap()
    }

    #[test]
    fn test_power_latex() {
        assert_eq!(parse("x^2").to_latex(), "x^{2}");
    }

    #[test]
    fn test_fraction_latex() {
        assert_eq!(parse("1/x").to_latex(), "\\frac{1}{x}");
    }

    #[test]
    fn test_sin_latex() {
        assert_eq!(parse("sin(x)").to_latex(), "\\sin\\left(x\\right)");
    }

    #[test]
    fn test_mul_wraps_sums() {
        assert_eq!(parse("(x+1)*2").to_latex(), "\\left(x + 1\\right) \\cdot 2");
    }

    #[test]
    fn test_pow_wraps_composite_base() {
        assert_eq!(parse("(x+1)^2").to_latex(), "\\left(x + 1\\right)^{2}");
    }

    #[test]
    fn test_exp_latex() {
        assert_eq!(parse("exp(2*x)").to_latex(), "e^{2 \\cdot x}");
    }

    #[test]
    fn test_indefinite_statement() {
        let latex = parse("x^2").integral_latex("x", None);
        assert_eq!(latex, "\\int x^{2}\\, dx");
    }

    #[test]
    fn test_definite_statement_carries_limits_directive() {
        let latex = parse("x^2").integral_latex("x", Some((0.0, 2.0)));
        assert_eq!(latex, "\\int\\limits_{0}^{2} x^{2}\\, dx");
    }
}
