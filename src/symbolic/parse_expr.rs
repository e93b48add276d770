use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::{
    brackets_balanced, find_char_position_outside_brackets, find_pair_to_this_bracket,
    find_rightmost_operator_outside_brackets,
};
use std::f64::consts::PI;

/// a module turns a String expression into a symbolic expression
///
/// The grammar is scanned outside-in: the rightmost `+`/`-` outside brackets
/// splits first (left associativity), then the rightmost `*`/`/`, then `^`
/// (right associative), then function calls like `sin(...)`, and finally
/// constants, variables and fully bracketed subexpressions.
///
/// # Example
/// ```
/// use RustedIntegral::symbolic::parse_expr::parse_expression_str;
/// let expr = parse_expression_str("x^2 + sin(x)").unwrap();
/// println!("{}", expr);
/// ```
///
/// The parser builds the tree exactly as written and performs no
/// simplification, so the displayed integral statement matches user intent.
pub fn parse_expression_str(input: &str) -> Result<Expr, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Invalid expression format: empty expression".to_string());
    }
    if !brackets_balanced(input) {
        return Err(format!("Unbalanced brackets in expression: {}", input));
    }

    // plain number first so scientific notation survives the sign scan
    if let Ok(value) = input.parse::<f64>() {
        return Ok(Expr::Const(value));
    }

    // expression that is ALL in brackets
    if input.starts_with('(') {
        if let Some(end) = find_pair_to_this_bracket(input) {
            if end == input.len() - 1 {
                return parse_expression_str(&input[1..end]);
            }
        }
    }

    // addition and subtraction
    if let Some((pos, op)) = find_rightmost_additive_operator(input) {
        let left = input[..pos].trim();
        let right = input[pos + 1..].trim();
        if right.is_empty() {
            return Err(format!("Invalid expression format: {}", input));
        }
        // unary minus
        if left.is_empty() {
            let inner = parse_expression_str(right)?;
            return if op == '-' { Ok(-inner) } else { Ok(inner) };
        }
        let lhs = parse_expression_str(left)?;
        let rhs = parse_expression_str(right)?;
        return match op {
            '+' => Ok(lhs + rhs),
            _ => Ok(lhs - rhs),
        };
    }

    // multiplication and division
    if let Some((pos, op)) = find_rightmost_operator_outside_brackets(input, &['*', '/']) {
        let left = input[..pos].trim();
        let right = input[pos + 1..].trim();
        if left.is_empty() || right.is_empty() {
            return Err(format!("Invalid expression format: {}", input));
        }
        let lhs = parse_expression_str(left)?;
        let rhs = parse_expression_str(right)?;
        return match op {
            '*' => Ok(lhs * rhs),
            _ => Ok(lhs / rhs),
        };
    }

    // exponentiation, right associative
    if let Some(pos) = find_char_position_outside_brackets(input, '^') {
        let base = input[..pos].trim();
        let exponent = input[pos + 1..].trim();
        if base.is_empty() || exponent.is_empty() {
            return Err(format!("Invalid expression format: {}", input));
        }
        let base_expr = parse_expression_str(base)?;
        let exponent_expr = parse_expression_str(exponent)?;
        return Ok(Expr::Pow(Box::new(base_expr), Box::new(exponent_expr)));
    }

    // function calls; both mathematical (tg, arctg) and programming (tan,
    // atan) spellings are accepted
    let functions: &[(&str, fn(Box<Expr>) -> Expr)] = &[
        ("exp", Expr::Exp),
        ("ln", Expr::Ln),
        ("log", Expr::Ln),
        ("sin", Expr::sin),
        ("cos", Expr::cos),
        ("tg", Expr::tg),
        ("tan", Expr::tg),
        ("ctg", Expr::ctg),
        ("cot", Expr::ctg),
        ("arcsin", Expr::arcsin),
        ("asin", Expr::arcsin),
        ("arccos", Expr::arccos),
        ("acos", Expr::arccos),
        ("arctg", Expr::arctg),
        ("arctan", Expr::arctg),
        ("atan", Expr::arctg),
        ("arcctg", Expr::arcctg),
        ("acot", Expr::arcctg),
    ];
    for (name, constructor) in functions {
        let prefix_len = name.len();
        if input.starts_with(name) && input[prefix_len..].starts_with('(') && input.ends_with(')') {
            if let Some(end) = find_pair_to_this_bracket(&input[prefix_len..]) {
                if prefix_len + end == input.len() - 1 {
                    let inner = input[prefix_len + 1..input.len() - 1].trim();
                    return Ok(constructor(Box::new(parse_expression_str(inner)?)));
                }
            }
        }
    }

    // constants and variables
    if input == "pi" {
        return Ok(Expr::Const(PI));
    }
    let is_identifier = input
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_')
        && input.chars().next().is_some_and(|c| !c.is_ascii_digit());
    if is_identifier {
        return Ok(Expr::Var(input.to_string()));
    }

    Err(format!("Invalid expression format: {}", input))
}

/// Rightmost `+`/`-` outside brackets that is a real operator, not the
/// exponent sign of scientific notation (the `-` in `1e-5`).
fn find_rightmost_additive_operator(input: &str) -> Option<(usize, char)> {
    let bytes = input.as_bytes();
    let mut depth = 0i32;
    for (i, &b) in bytes.iter().enumerate().rev() {
        match b {
            b')' => depth += 1,
            b'(' => depth -= 1,
            b'+' | b'-' if depth == 0 => {
                let is_exponent_sign = i >= 2
                    && (bytes[i - 1] == b'e' || bytes[i - 1] == b'E')
                    && bytes[i - 2].is_ascii_digit();
                if !is_exponent_sign {
                    return Some((i, b as char));
                }
            }
            _ => {}
        }
    }
    None
}

impl Expr {
    /// Parses a string into a symbolic expression.
    ///
    /// # Supported Syntax
    /// - Variables: x, y, var_name
    /// - Constants: 3.14, -2.5, 1e-6, pi
    /// - Operators: +, -, *, /, ^
    /// - Functions: sin, cos, tan, exp, ln, arcsin, etc.
    /// - Parentheses for grouping
    pub fn parse_expression(input: &str) -> Result<Expr, String> {
        parse_expression_str(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_constant() {
        let expr = parse_expression_str("42").unwrap();
        assert_eq!(expr, Expr::Const(42.0));
    }

    #[test]
    fn test_parse_scientific_notation() {
        let expr = parse_expression_str("1e-5").unwrap();
        assert_eq!(expr, Expr::Const(1e-5));
    }

    #[test]
    fn test_parse_variable() {
        let expr = parse_expression_str("x").unwrap();
        assert_eq!(expr, Expr::Var("x".to_string()));
    }

    #[test]
    fn test_parse_pi() {
        let expr = parse_expression_str("pi").unwrap();
        assert_eq!(expr, Expr::Const(PI));
    }

    #[test]
    fn test_parse_addition() {
        let expr = parse_expression_str("x + 2").unwrap();
        assert_eq!(
            expr,
            Expr::Add(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(2.0))
            )
        );
    }

    #[test]
    fn test_parse_subtraction() {
        let expr = parse_expression_str("x - 2").unwrap();
        assert_eq!(
            expr,
            Expr::Sub(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(2.0))
            )
        );
    }

    #[test]
    fn test_parse_multiplication() {
        let expr = parse_expression_str("x * 2").unwrap();
        assert_eq!(
            expr,
            Expr::Mul(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(2.0))
            )
        );
    }

    #[test]
    fn test_parse_division() {
        let expr = parse_expression_str("1/x").unwrap();
        assert_eq!(
            expr,
            Expr::Div(
                Box::new(Expr::Const(1.0)),
                Box::new(Expr::Var("x".to_string()))
            )
        );
    }

    #[test]
    fn test_parse_power() {
        let expr = parse_expression_str("x^2").unwrap();
        assert_eq!(
            expr,
            Expr::Pow(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(2.0))
            )
        );
    }

    #[test]
    fn test_parse_left_associativity() {
        let expr = parse_expression_str("x^2 - x - 1").unwrap();
        let x = Expr::Var("x".to_string());
        let expected = x.clone().pow(Expr::Const(2.0)) - x - Expr::Const(1.0);
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_parse_exponential() {
        let expr = parse_expression_str("exp(x)").unwrap();
        assert_eq!(expr, Expr::Exp(Box::new(Expr::Var("x".to_string()))));
    }

    #[test]
    fn test_parse_logarithm() {
        let expr = parse_expression_str("log(x)").unwrap();
        assert_eq!(expr, Expr::Ln(Box::new(Expr::Var("x".to_string()))));
    }

    #[test]
    fn test_parse_sin() {
        let expr = parse_expression_str("sin(x)").unwrap();
        assert_eq!(expr, Expr::sin(Box::new(Expr::Var("x".to_string()))));
    }

    #[test]
    fn test_parse_tan_alias() {
        assert_eq!(
            parse_expression_str("tan(x)").unwrap(),
            parse_expression_str("tg(x)").unwrap()
        );
    }

    #[test]
    fn test_parse_arcsin() {
        let expr = parse_expression_str("arcsin(x)").unwrap();
        assert_eq!(expr, Expr::arcsin(Box::new(Expr::Var("x".to_string()))));
    }

    #[test]
    fn test_parse_nested_trig() {
        let expr = parse_expression_str("sin(cos(x))").unwrap();
        assert_eq!(
            expr,
            Expr::sin(Box::new(Expr::cos(Box::new(Expr::Var("x".to_string())))))
        );
    }

    #[test]
    fn test_parse_trig_of_sum() {
        let expr = parse_expression_str("sin(x + 1)").unwrap();
        assert_eq!(
            expr,
            Expr::sin(Box::new(Expr::Add(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(1.0))
            )))
        );
    }

    #[test]
    fn test_parse_with_brackets() {
        let expr = parse_expression_str("(x + y) * z").unwrap();
        assert_eq!(
            expr,
            Expr::Mul(
                Box::new(Expr::Add(
                    Box::new(Expr::Var("x".to_string())),
                    Box::new(Expr::Var("y".to_string()))
                )),
                Box::new(Expr::Var("z".to_string()))
            )
        );
    }

    #[test]
    fn test_parse_complex_expression() {
        let expr = parse_expression_str("(x + y) * (z - 2) / exp(w)").unwrap();
        let x = Box::new(Expr::Var("x".to_string()));
        let y = Box::new(Expr::Var("y".to_string()));
        let z = Box::new(Expr::Var("z".to_string()));
        let w = Box::new(Expr::Var("w".to_string()));
        let c = Box::new(Expr::Const(2.0));
        let x_plus_y = Box::new(Expr::Add(x, y));
        let z_minus_c = Box::new(Expr::Sub(z, c));
        let e = Box::new(Expr::Exp(w));
        let expected = Expr::Div(Box::new(Expr::Mul(x_plus_y, z_minus_c)), e);
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_parse_scientific_notation_inside_sum() {
        let expr = parse_expression_str("x + 1e-5").unwrap();
        assert_eq!(
            expr,
            Expr::Add(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(1e-5))
            )
        );
    }

    #[test]
    fn test_parse_unary_minus() {
        let expr = parse_expression_str("-x").unwrap();
        assert_eq!(
            expr,
            Expr::Mul(
                Box::new(Expr::Const(-1.0)),
                Box::new(Expr::Var("x".to_string()))
            )
        );
    }

    #[test]
    fn test_invalid_expression() {
        assert!(parse_expression_str("(x +").is_err());
        assert!(parse_expression_str("").is_err());
        assert!(parse_expression_str("x +").is_err());
    }

    #[test]
    fn test_unmatched_brackets() {
        assert!(parse_expression_str("(x + y").is_err());
    }
}
