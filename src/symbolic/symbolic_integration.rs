//! Rule-based analytic integration.
//!
//! The integrator walks the expression tree and applies the classical
//! table rules: linearity, the power rule, constant factors, exponentials,
//! logarithms and trigonometric functions of linear arguments. Shapes with
//! no matching rule produce an `Err` naming the offending subexpression;
//! the definite integrator then falls back to Gauss-Legendre quadrature.
//!
//! Results are returned unsimplified; callers tidy them with `simplify_()`.

use crate::symbolic::symbolic_engine::Expr;
use gauss_quad::GaussLegendre;

/// Degree of the Gauss-Legendre fallback quadrature.
const QUAD_DEGREE: usize = 64;

impl Expr {
    /// Main integration method - integrates with respect to a variable.
    /// Returns the indefinite integral (without constant of integration).
    pub fn integrate(&self, var: &str) -> Result<Expr, String> {
        // expressions free of the variable integrate as constants
        if !self.contains_variable(var) {
            return Ok(self.clone() * Expr::Var(var.to_string()));
        }
        match self {
            // handled by the constant case above
            Expr::Const(c) => Ok(Expr::Const(*c) * Expr::Var(var.to_string())),

            // ∫ x dx = x²/2
            Expr::Var(name) => {
                if name == var {
                    Ok(Expr::Pow(
                        Box::new(Expr::Var(var.to_string())),
                        Box::new(Expr::Const(2.0)),
                    ) / Expr::Const(2.0))
                } else {
                    Ok(Expr::Var(name.clone()) * Expr::Var(var.to_string()))
                }
            }

            // ∫ (f + g) dx = ∫ f dx + ∫ g dx
            Expr::Add(lhs, rhs) => {
                let lhs_int = lhs.integrate(var)?;
                let rhs_int = rhs.integrate(var)?;
                Ok(lhs_int + rhs_int)
            }

            // ∫ (f - g) dx = ∫ f dx - ∫ g dx
            Expr::Sub(lhs, rhs) => {
                let lhs_int = lhs.integrate(var)?;
                let rhs_int = rhs.integrate(var)?;
                Ok(lhs_int - rhs_int)
            }

            Expr::Mul(lhs, rhs) => self.integrate_multiplication(lhs, rhs, var),

            Expr::Div(lhs, rhs) => self.integrate_division(lhs, rhs, var),

            Expr::Pow(base, exp) => self.integrate_power(base, exp, var),

            Expr::Exp(inner) => self.integrate_exponential(inner, var),

            Expr::Ln(inner) => self.integrate_logarithm(inner, var),

            Expr::sin(inner) => {
                // ∫ sin(ax+b) dx = -cos(ax+b)/a
                let (a, _) = linear_coeffs(inner, var)
                    .ok_or_else(|| format!("Cannot integrate sin({})", inner))?;
                Ok(-(Expr::cos(inner.clone()) / Expr::Const(a)))
            }

            Expr::cos(inner) => {
                // ∫ cos(ax+b) dx = sin(ax+b)/a
                let (a, _) = linear_coeffs(inner, var)
                    .ok_or_else(|| format!("Cannot integrate cos({})", inner))?;
                Ok(Expr::sin(inner.clone()) / Expr::Const(a))
            }

            Expr::tg(inner) => {
                // ∫ tg(ax+b) dx = -ln(cos(ax+b))/a
                let (a, _) = linear_coeffs(inner, var)
                    .ok_or_else(|| format!("Cannot integrate tg({})", inner))?;
                Ok(-(Expr::Ln(Box::new(Expr::cos(inner.clone()))) / Expr::Const(a)))
            }

            Expr::ctg(inner) => {
                // ∫ ctg(ax+b) dx = ln(sin(ax+b))/a
                let (a, _) = linear_coeffs(inner, var)
                    .ok_or_else(|| format!("Cannot integrate ctg({})", inner))?;
                Ok(Expr::Ln(Box::new(Expr::sin(inner.clone()))) / Expr::Const(a))
            }

            // ∫ arcsin(x) dx = x*arcsin(x) + sqrt(1-x²)
            Expr::arcsin(inner) => match inner.as_ref() {
                Expr::Var(name) if name == var => {
                    let x = Expr::Var(var.to_string());
                    let root = (Expr::Const(1.0) - x.clone().pow(Expr::Const(2.0)))
                        .pow(Expr::Const(0.5));
                    Ok(x.clone() * Expr::arcsin(Box::new(x)) + root)
                }
                _ => Err(format!("Cannot integrate arcsin({})", inner)),
            },

            // ∫ arccos(x) dx = x*arccos(x) - sqrt(1-x²)
            Expr::arccos(inner) => match inner.as_ref() {
                Expr::Var(name) if name == var => {
                    let x = Expr::Var(var.to_string());
                    let root = (Expr::Const(1.0) - x.clone().pow(Expr::Const(2.0)))
                        .pow(Expr::Const(0.5));
                    Ok(x.clone() * Expr::arccos(Box::new(x)) - root)
                }
                _ => Err(format!("Cannot integrate arccos({})", inner)),
            },

            // ∫ arctg(x) dx = x*arctg(x) - ln(1+x²)/2
            Expr::arctg(inner) => match inner.as_ref() {
                Expr::Var(name) if name == var => {
                    let x = Expr::Var(var.to_string());
                    let ln_term = (Expr::Const(1.0) + x.clone().pow(Expr::Const(2.0))).ln()
                        / Expr::Const(2.0);
                    Ok(x.clone() * Expr::arctg(Box::new(x)) - ln_term)
                }
                _ => Err(format!("Cannot integrate arctg({})", inner)),
            },

            // ∫ arcctg(x) dx = x*arcctg(x) + ln(1+x²)/2
            Expr::arcctg(inner) => match inner.as_ref() {
                Expr::Var(name) if name == var => {
                    let x = Expr::Var(var.to_string());
                    let ln_term = (Expr::Const(1.0) + x.clone().pow(Expr::Const(2.0))).ln()
                        / Expr::Const(2.0);
                    Ok(x.clone() * Expr::arcctg(Box::new(x)) + ln_term)
                }
                _ => Err(format!("Cannot integrate arcctg({})", inner)),
            },
        }
    }

    fn integrate_multiplication(&self, lhs: &Expr, rhs: &Expr, var: &str) -> Result<Expr, String> {
        // constant factor either side
        if !lhs.contains_variable(var) {
            let rhs_int = rhs.integrate(var)?;
            return Ok(lhs.clone() * rhs_int);
        }
        if !rhs.contains_variable(var) {
            let lhs_int = lhs.integrate(var)?;
            return Ok(rhs.clone() * lhs_int);
        }

        // ∫ x*e^x dx = (x - 1)*e^x, integration by parts
        if let Some(result) = by_parts_var_times_exp(lhs, rhs, var) {
            return Ok(result);
        }
        if let Some(result) = by_parts_var_times_exp(rhs, lhs, var) {
            return Ok(result);
        }

        Err(format!("Cannot integrate product: {} * {}", lhs, rhs))
    }

    fn integrate_division(&self, lhs: &Expr, rhs: &Expr, var: &str) -> Result<Expr, String> {
        // ∫ f(x)/c dx = (1/c) * ∫ f(x) dx
        if !rhs.contains_variable(var) {
            let lhs_int = lhs.integrate(var)?;
            return Ok(lhs_int / rhs.clone());
        }

        // ∫ c/(ax+b) dx = (c/a) * ln(ax+b)
        if !lhs.contains_variable(var) {
            if let Some((a, _)) = linear_coeffs(rhs, var) {
                return Ok(lhs.clone() * Expr::Ln(Box::new(rhs.clone())) / Expr::Const(a));
            }
        }

        Err(format!("Cannot integrate division: {} / {}", lhs, rhs))
    }

    fn integrate_power(&self, base: &Expr, exp: &Expr, var: &str) -> Result<Expr, String> {
        // ∫ (ax+b)^n dx for constant n
        if let Expr::Const(n) = exp {
            if let Some((a, _)) = linear_coeffs(base, var) {
                if (*n - (-1.0)).abs() < f64::EPSILON {
                    // ∫ (ax+b)^(-1) dx = ln(ax+b)/a
                    return Ok(Expr::Ln(Box::new(base.clone())) / Expr::Const(a));
                }
                let new_exp = Expr::Const(n + 1.0);
                let integrated = Expr::Pow(Box::new(base.clone()), Box::new(new_exp))
                    / (Expr::Const(a) * Expr::Const(n + 1.0));
                return Ok(integrated);
            }
        }

        // ∫ c^x dx = c^x / ln(c)
        if let (Expr::Const(c), Expr::Var(x)) = (base, exp) {
            if x == var && *c > 0.0 && (*c - 1.0).abs() > f64::EPSILON {
                return Ok(Expr::Pow(
                    Box::new(Expr::Const(*c)),
                    Box::new(Expr::Var(var.to_string())),
                ) / Expr::Ln(Box::new(Expr::Const(*c))));
            }
        }

        Err(format!("Cannot integrate power: ({})^({})", base, exp))
    }

    fn integrate_exponential(&self, inner: &Expr, var: &str) -> Result<Expr, String> {
        // ∫ e^(ax+b) dx = e^(ax+b)/a
        if let Some((a, _)) = linear_coeffs(inner, var) {
            return Ok(inner.clone().exp() / Expr::Const(a));
        }
        Err(format!("Cannot integrate exponential: e^({})", inner))
    }

    fn integrate_logarithm(&self, inner: &Expr, var: &str) -> Result<Expr, String> {
        // ∫ ln(ax+b) dx = (ax+b)*(ln(ax+b) - 1)/a, integration by parts
        if let Some((a, _)) = linear_coeffs(inner, var) {
            let u = inner.clone();
            return Ok(
                u.clone() * (Expr::Ln(Box::new(u)) - Expr::Const(1.0)) / Expr::Const(a)
            );
        }
        Err(format!("Cannot integrate logarithm: ln({})", inner))
    }

    /// Definite integration using the fundamental theorem of calculus, with
    /// Gauss-Legendre quadrature when no antiderivative is found. A
    /// non-finite value (a singularity inside the interval) is an error,
    /// never a number.
    pub fn definite_integrate(&self, var: &str, lower: f64, upper: f64) -> Result<f64, String> {
        match self.integrate(var) {
            Ok(indefinite) => {
                let f = indefinite.lambdify1D_of(var);
                let value = f(upper) - f(lower);
                if value.is_finite() {
                    Ok(value)
                } else {
                    Err(format!(
                        "Definite integral of {} over [{}, {}] is not finite (singularity inside the interval?)",
                        self, lower, upper
                    ))
                }
            }
            Err(_) => self.numerical_quadrature(var, lower, upper),
        }
    }

    /// Gauss-Legendre fallback for integrands without an analytic rule.
    pub fn numerical_quadrature(&self, var: &str, lower: f64, upper: f64) -> Result<f64, String> {
        let quad = GaussLegendre::new(QUAD_DEGREE)
            .map_err(|e| format!("Failed to create Gauss-Legendre quadrature: {:?}", e))?;
        let f = self.lambdify1D_of(var);
        let value = quad.integrate(lower, upper, |x| f(x));
        if value.is_finite() {
            Ok(value)
        } else {
            Err(format!(
                "Numerical quadrature of {} over [{}, {}] did not converge to a finite value",
                self, lower, upper
            ))
        }
    }
}

/// Matches expressions of the form a*x + b (a != 0) and returns (a, b).
/// Bare `x` yields (1, 0); shapes like 2*x, x*2, 2*x + 1, x - 3 all match.
fn linear_coeffs(expr: &Expr, var: &str) -> Option<(f64, f64)> {
    match expr {
        Expr::Var(name) if name == var => Some((1.0, 0.0)),
        // a must be nonzero, so a bare constant does not match
        Expr::Const(_) => None,
        Expr::Mul(lhs, rhs) => match (lhs.as_ref(), rhs.as_ref()) {
            (Expr::Const(a), Expr::Var(x)) if x == var && *a != 0.0 => Some((*a, 0.0)),
            (Expr::Var(x), Expr::Const(a)) if x == var && *a != 0.0 => Some((*a, 0.0)),
            _ => None,
        },
        Expr::Add(lhs, rhs) => {
            if let (Some((a, b)), Expr::Const(c)) = (linear_coeffs(lhs, var), rhs.as_ref()) {
                return Some((a, b + c));
            }
            if let (Expr::Const(c), Some((a, b))) = (lhs.as_ref(), linear_coeffs(rhs, var)) {
                return Some((a, b + c));
            }
            None
        }
        Expr::Sub(lhs, rhs) => {
            if let (Some((a, b)), Expr::Const(c)) = (linear_coeffs(lhs, var), rhs.as_ref()) {
                return Some((a, b - c));
            }
            None
        }
        _ => None,
    }
}

/// ∫ x*e^x dx = (x - 1)*e^x when the pair is exactly (x, e^x).
fn by_parts_var_times_exp(u: &Expr, v: &Expr, var: &str) -> Option<Expr> {
    if let (Expr::Var(x), Expr::Exp(inner)) = (u, v) {
        if x == var {
            if let Expr::Var(y) = inner.as_ref() {
                if y == var {
                    let x_expr = Expr::Var(var.to_string());
                    return Some(
                        (x_expr.clone() - Expr::Const(1.0)) * Expr::Exp(Box::new(x_expr)),
                    );
                }
            }
        }
    }
    None
}
