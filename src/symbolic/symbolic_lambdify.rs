//! LAMBDIFICATION - Converting Symbolic Expressions to Executable Functions
//!
//! Turns an `Expr` tree into a nested closure that mirrors the tree
//! structure, with no runtime parsing or interpretation. Two flavours are
//! provided: a real-valued closure for ordinary sampling and a
//! complex-valued closure used as a retry when the real evaluation leaves
//! the real line (ln of a negative argument, fractional powers of
//! negatives).

use crate::symbolic::symbolic_engine::Expr;
use num_complex::Complex64;
use std::f64::consts::PI;

impl Expr {
    /// Converts the expression into an executable closure of the given
    /// variable.
    ///
    /// Any other variable left in the tree evaluates to NaN, which the
    /// callers surface as a non-finite evaluation rather than a fault.
    ///
    /// # Examples
    /// ```
    /// use RustedIntegral::symbolic::symbolic_engine::Expr;
    /// let expr = Expr::parse_expression("x^2").unwrap();
    /// let f = expr.lambdify1D_of("x");
    /// assert_eq!(f(3.0), 9.0);
    /// ```
    pub fn lambdify1D_of(&self, var: &str) -> Box<dyn Fn(f64) -> f64> {
        match self {
            Expr::Var(name) => {
                if name == var {
                    Box::new(|x| x)
                } else {
                    Box::new(|_| f64::NAN)
                }
            }
            Expr::Const(val) => {
                let val = *val;
                Box::new(move |_| val)
            }
            Expr::Add(lhs, rhs) => {
                let lf = lhs.lambdify1D_of(var);
                let rf = rhs.lambdify1D_of(var);
                Box::new(move |x| lf(x) + rf(x))
            }
            Expr::Sub(lhs, rhs) => {
                let lf = lhs.lambdify1D_of(var);
                let rf = rhs.lambdify1D_of(var);
                Box::new(move |x| lf(x) - rf(x))
            }
            Expr::Mul(lhs, rhs) => {
                let lf = lhs.lambdify1D_of(var);
                let rf = rhs.lambdify1D_of(var);
                Box::new(move |x| lf(x) * rf(x))
            }
            Expr::Div(lhs, rhs) => {
                let lf = lhs.lambdify1D_of(var);
                let rf = rhs.lambdify1D_of(var);
                Box::new(move |x| lf(x) / rf(x))
            }
            Expr::Pow(base, exp) => {
                let bf = base.lambdify1D_of(var);
                let ef = exp.lambdify1D_of(var);
                Box::new(move |x| bf(x).powf(ef(x)))
            }
            Expr::Exp(e) => {
                let f = e.lambdify1D_of(var);
                Box::new(move |x| f(x).exp())
            }
            Expr::Ln(e) => {
                let f = e.lambdify1D_of(var);
                Box::new(move |x| f(x).ln())
            }
            Expr::sin(e) => {
                let f = e.lambdify1D_of(var);
                Box::new(move |x| f(x).sin())
            }
            Expr::cos(e) => {
                let f = e.lambdify1D_of(var);
                Box::new(move |x| f(x).cos())
            }
            Expr::tg(e) => {
                let f = e.lambdify1D_of(var);
                Box::new(move |x| f(x).tan())
            }
            Expr::ctg(e) => {
                let f = e.lambdify1D_of(var);
                Box::new(move |x| 1.0 / f(x).tan())
            }
            Expr::arcsin(e) => {
                let f = e.lambdify1D_of(var);
                Box::new(move |x| f(x).asin())
            }
            Expr::arccos(e) => {
                let f = e.lambdify1D_of(var);
                Box::new(move |x| f(x).acos())
            }
            Expr::arctg(e) => {
                let f = e.lambdify1D_of(var);
                Box::new(move |x| f(x).atan())
            }
            Expr::arcctg(e) => {
                let f = e.lambdify1D_of(var);
                Box::new(move |x| (PI / 2.0) - f(x).atan())
            }
        }
    }

    /// Convenience wrapper for single-variable expressions: the variable is
    /// detected automatically. Constant expressions are accepted too.
    pub fn lambdify1D(&self) -> Result<Box<dyn Fn(f64) -> f64>, String> {
        let vars = self.all_arguments_are_variables();
        match vars.len() {
            0 | 1 => {
                let var = vars.first().cloned().unwrap_or_default();
                Ok(self.lambdify1D_of(&var))
            }
            _ => Err(format!(
                "lambdify1D can only be used with expressions containing exactly one variable, found: {:?}",
                vars
            )),
        }
    }

    /// Complex-valued counterpart of lambdify1D_of, used as a retry when the
    /// real evaluation produces non-finite values.
    pub fn lambdify1D_complex_of(&self, var: &str) -> Box<dyn Fn(Complex64) -> Complex64> {
        match self {
            Expr::Var(name) => {
                if name == var {
                    Box::new(|z| z)
                } else {
                    Box::new(|_| Complex64::new(f64::NAN, 0.0))
                }
            }
            Expr::Const(val) => {
                let val = *val;
                Box::new(move |_| Complex64::new(val, 0.0))
            }
            Expr::Add(lhs, rhs) => {
                let lf = lhs.lambdify1D_complex_of(var);
                let rf = rhs.lambdify1D_complex_of(var);
                Box::new(move |z| lf(z) + rf(z))
            }
            Expr::Sub(lhs, rhs) => {
                let lf = lhs.lambdify1D_complex_of(var);
                let rf = rhs.lambdify1D_complex_of(var);
                Box::new(move |z| lf(z) - rf(z))
            }
            Expr::Mul(lhs, rhs) => {
                let lf = lhs.lambdify1D_complex_of(var);
                let rf = rhs.lambdify1D_complex_of(var);
                Box::new(move |z| lf(z) * rf(z))
            }
            Expr::Div(lhs, rhs) => {
                let lf = lhs.lambdify1D_complex_of(var);
                let rf = rhs.lambdify1D_complex_of(var);
                Box::new(move |z| lf(z) / rf(z))
            }
            Expr::Pow(base, exp) => {
                let bf = base.lambdify1D_complex_of(var);
                let ef = exp.lambdify1D_complex_of(var);
                Box::new(move |z| bf(z).powc(ef(z)))
            }
            Expr::Exp(e) => {
                let f = e.lambdify1D_complex_of(var);
                Box::new(move |z| f(z).exp())
            }
            Expr::Ln(e) => {
                let f = e.lambdify1D_complex_of(var);
                Box::new(move |z| f(z).ln())
            }
            Expr::sin(e) => {
                let f = e.lambdify1D_complex_of(var);
                Box::new(move |z| f(z).sin())
            }
            Expr::cos(e) => {
                let f = e.lambdify1D_complex_of(var);
                Box::new(move |z| f(z).cos())
            }
            Expr::tg(e) => {
                let f = e.lambdify1D_complex_of(var);
                Box::new(move |z| f(z).tan())
            }
            Expr::ctg(e) => {
                let f = e.lambdify1D_complex_of(var);
                Box::new(move |z| Complex64::new(1.0, 0.0) / f(z).tan())
            }
            Expr::arcsin(e) => {
                let f = e.lambdify1D_complex_of(var);
                Box::new(move |z| f(z).asin())
            }
            Expr::arccos(e) => {
                let f = e.lambdify1D_complex_of(var);
                Box::new(move |z| f(z).acos())
            }
            Expr::arctg(e) => {
                let f = e.lambdify1D_complex_of(var);
                Box::new(move |z| f(z).atan())
            }
            Expr::arcctg(e) => {
                let f = e.lambdify1D_complex_of(var);
                Box::new(move |z| Complex64::new(PI / 2.0, 0.0) - f(z).atan())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lambdify_variable() {
        let x = Expr::Var("x".to_string());
        let f = x.lambdify1D_of("x");
        assert_eq!(f(5.0), 5.0);
    }

    #[test]
    fn test_lambdify_constant() {
        let c = Expr::Const(42.0);
        let f = c.lambdify1D_of("x");
        assert_eq!(f(100.0), 42.0);
    }

    #[test]
    fn test_lambdify_polynomial() {
        let x = Expr::Var("x".to_string());
        // x^2 + 2x + 1
        let expr = x.clone() * x.clone() + x.clone() * Expr::Const(2.0) + Expr::Const(1.0);
        let f = expr.lambdify1D_of("x");
        assert_eq!(f(3.0), 16.0);
    }

    #[test]
    fn test_lambdify_trigonometric() {
        let expr = Expr::sin(Box::new(Expr::Var("x".to_string())));
        let f = expr.lambdify1D_of("x");
        assert_relative_eq!(f(0.0), 0.0, epsilon = 1e-10);
        assert_relative_eq!(f(PI / 2.0), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_lambdify_exponential() {
        let expr = Expr::Exp(Box::new(Expr::Var("x".to_string())));
        let f = expr.lambdify1D_of("x");
        assert_relative_eq!(f(1.0), std::f64::consts::E, epsilon = 1e-10);
    }

    #[test]
    fn test_lambdify_unbound_variable_is_nan() {
        let expr = Expr::Var("y".to_string());
        let f = expr.lambdify1D_of("x");
        assert!(f(1.0).is_nan());
    }

    #[test]
    fn test_lambdify1d_rejects_multivariate() {
        let expr = Expr::Var("x".to_string()) + Expr::Var("y".to_string());
        assert!(expr.lambdify1D().is_err());
    }

    #[test]
    fn test_complex_ln_of_negative() {
        let expr = Expr::Ln(Box::new(Expr::Var("x".to_string())));
        let f = expr.lambdify1D_complex_of("x");
        let z = f(Complex64::new(-5.0, 0.0));
        assert_relative_eq!(z.re, 5.0f64.ln(), epsilon = 1e-10);
        assert_relative_eq!(z.im, PI, epsilon = 1e-10);
    }

    #[test]
    fn test_complex_agrees_with_real_on_real_line() {
        let expr = Expr::parse_expression("x^2 + sin(x)").unwrap();
        let fr = expr.lambdify1D_of("x");
        let fc = expr.lambdify1D_complex_of("x");
        let z = fc(Complex64::new(1.3, 0.0));
        assert_relative_eq!(z.re, fr(1.3), epsilon = 1e-10);
        assert_relative_eq!(z.im, 0.0, epsilon = 1e-10);
    }
}
