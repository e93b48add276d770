//! # Symbolic Expression Simplification Module
//!
//! Algebraic simplification used to tidy integration results before they are
//! displayed or typeset. Two complementary techniques are applied
//! recursively until a fixed point:
//!
//! 1. **Constant Folding**: arithmetic on numerical constants is evaluated
//! 2. **Algebraic Identities**: x + 0 = x, x * 1 = x, 0 * x = 0, x^1 = x,
//!    x^0 = 1, x - x = 0
//!
//! The parser never calls into this module: parsed expressions keep the
//! literal structure the user wrote, so the typeset integral statement
//! matches user intent. Only integration output is simplified.

use crate::symbolic::symbolic_engine::Expr;

impl Expr {
    /// Applies one recursive pass of constant folding and identity rules.
    fn simplify_once(&self) -> Expr {
        match self {
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => {
                let lhs = lhs.simplify_once();
                let rhs = rhs.simplify_once();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b),
                    _ if lhs.is_zero() => rhs,
                    _ if rhs.is_zero() => lhs,
                    _ => Expr::Add(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Sub(lhs, rhs) => {
                let lhs = lhs.simplify_once();
                let rhs = rhs.simplify_once();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b),
                    _ if rhs.is_zero() => lhs,
                    _ if lhs == rhs => Expr::Const(0.0),
                    _ => Expr::Sub(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Mul(lhs, rhs) => {
                let lhs = lhs.simplify_once();
                let rhs = rhs.simplify_once();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
                    _ if lhs.is_zero() || rhs.is_zero() => Expr::Const(0.0),
                    (Expr::Const(a), _) if *a == 1.0 => rhs,
                    (_, Expr::Const(b)) if *b == 1.0 => lhs,
                    _ => Expr::Mul(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Div(lhs, rhs) => {
                let lhs = lhs.simplify_once();
                let rhs = rhs.simplify_once();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) if *b != 0.0 => Expr::Const(a / b),
                    _ if lhs.is_zero() && !rhs.is_zero() => Expr::Const(0.0),
                    (_, Expr::Const(b)) if *b == 1.0 => lhs,
                    _ => Expr::Div(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Pow(base, exp) => {
                let base = base.simplify_once();
                let exp = exp.simplify_once();
                match (&base, &exp) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a.powf(*b)),
                    (_, Expr::Const(b)) if *b == 1.0 => base,
                    (_, Expr::Const(b)) if *b == 0.0 => Expr::Const(1.0),
                    _ => Expr::Pow(Box::new(base), Box::new(exp)),
                }
            }
            Expr::Exp(e) => Expr::Exp(Box::new(e.simplify_once())),
            Expr::Ln(e) => Expr::Ln(Box::new(e.simplify_once())),
            Expr::sin(e) => Expr::sin(Box::new(e.simplify_once())),
            Expr::cos(e) => Expr::cos(Box::new(e.simplify_once())),
            Expr::tg(e) => Expr::tg(Box::new(e.simplify_once())),
            Expr::ctg(e) => Expr::ctg(Box::new(e.simplify_once())),
            Expr::arcsin(e) => Expr::arcsin(Box::new(e.simplify_once())),
            Expr::arccos(e) => Expr::arccos(Box::new(e.simplify_once())),
            Expr::arctg(e) => Expr::arctg(Box::new(e.simplify_once())),
            Expr::arcctg(e) => Expr::arcctg(Box::new(e.simplify_once())),
        }
    }

    /// Simplifies until no rule applies anymore. The iteration bound guards
    /// against oscillating rewrites.
    pub fn simplify_(&self) -> Expr {
        let mut current = self.clone();
        for _ in 0..16 {
            let next = current.simplify_once();
            if next == current {
                break;
            }
            current = next;
        }
        current
    }
}
