/// core symbolic expression type and its basic manipulation methods
pub mod symbolic_engine;
/// a module turns a String expression into a symbolic expression
pub mod parse_expr;
/// rule-based analytic integration with a quadrature fallback
pub mod symbolic_integration;
/// conversion of symbolic expressions into executable Rust closures
pub mod symbolic_lambdify;
/// LaTeX printer for expressions and integral statements
pub mod symbolic_latex;
/// algebraic simplification of symbolic expressions
pub mod symbolic_simplify;
/// bracket scanning helpers and small numeric utilities
pub mod utils;
