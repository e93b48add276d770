//! Input normalization: raw user text in, canonical expression text and a
//! validated variable/limit set out.
//!
//! Only the exponent token is rewritten (Python-style `**` becomes the
//! engine's `^`); semantic validation of the expression itself is delegated
//! to the symbolic evaluator.

use regex::Regex;

/// The three free-text fields the surrounding UI hands over on each
/// "Calculate" action. Not retained after the evaluation.
#[derive(Debug, Clone, Default)]
pub struct RawInput {
    pub function_text: String,
    pub variable_text: String,
    pub limits_text: String,
}

/// Canonical expression text plus the validated variable name.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedExpression {
    pub canonical_text: String,
    pub variable: String,
}

/// Integration bounds; present only when the limits field holds exactly two
/// comma-separated numeric tokens. Absence means indefinite integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimitPair {
    pub lower: f64,
    pub upper: f64,
}

/// Shown verbatim when the limits field cannot be read as two numbers.
pub const BAD_LIMITS_MESSAGE: &str =
    "Please enter valid lower and upper limits separated by a comma.";

/// Validates and canonicalizes one evaluation request.
pub fn normalize(input: &RawInput) -> Result<(NormalizedExpression, Option<LimitPair>), String> {
    let function_text = input.function_text.trim();
    if function_text.is_empty() {
        return Err("Please enter a function to integrate.".to_string());
    }
    // the engine's power operator is '^'
    let canonical_text = function_text.replace("**", "^");

    let variable = input.variable_text.trim();
    let identifier = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex is valid");
    if !identifier.is_match(variable) {
        return Err(format!(
            "Please enter a valid variable name (an identifier), got: '{}'",
            variable
        ));
    }

    let limits = parse_limits(&input.limits_text)?;

    Ok((
        NormalizedExpression {
            canonical_text,
            variable: variable.to_string(),
        },
        limits,
    ))
}

/// Empty limits text is a valid "no bounds" state; anything else must be
/// exactly two comma-separated floats.
fn parse_limits(limits_text: &str) -> Result<Option<LimitPair>, String> {
    let limits_text = limits_text.trim();
    if limits_text.is_empty() {
        return Ok(None);
    }
    let tokens: Vec<&str> = limits_text.split(',').collect();
    if tokens.len() != 2 {
        return Err(BAD_LIMITS_MESSAGE.to_string());
    }
    let lower = tokens[0]
        .trim()
        .parse::<f64>()
        .map_err(|_| BAD_LIMITS_MESSAGE.to_string())?;
    let upper = tokens[1]
        .trim()
        .parse::<f64>()
        .map_err(|_| BAD_LIMITS_MESSAGE.to_string())?;
    Ok(Some(LimitPair { lower, upper }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(function: &str, variable: &str, limits: &str) -> RawInput {
        RawInput {
            function_text: function.to_string(),
            variable_text: variable.to_string(),
            limits_text: limits.to_string(),
        }
    }

    #[test]
    fn test_empty_limits_is_indefinite() {
        let (normalized, limits) = normalize(&raw("x^2", "x", "")).unwrap();
        assert_eq!(normalized.canonical_text, "x^2");
        assert_eq!(normalized.variable, "x");
        assert!(limits.is_none());
    }

    #[test]
    fn test_two_limits_parse() {
        let (_, limits) = normalize(&raw("x^2", "x", "0,2")).unwrap();
        assert_eq!(
            limits,
            Some(LimitPair {
                lower: 0.0,
                upper: 2.0
            })
        );
    }

    #[test]
    fn test_limits_with_spaces() {
        let (_, limits) = normalize(&raw("x^2", "x", " -1.5 , 2.5 ")).unwrap();
        assert_eq!(
            limits,
            Some(LimitPair {
                lower: -1.5,
                upper: 2.5
            })
        );
    }

    #[test]
    fn test_three_limit_tokens_rejected() {
        let err = normalize(&raw("x^2", "x", "0,2,4")).unwrap_err();
        assert_eq!(err, BAD_LIMITS_MESSAGE);
    }

    #[test]
    fn test_one_limit_token_rejected() {
        let err = normalize(&raw("x^2", "x", "0")).unwrap_err();
        assert_eq!(err, BAD_LIMITS_MESSAGE);
    }

    #[test]
    fn test_non_numeric_limit_rejected() {
        let err = normalize(&raw("x^2", "x", "a,2")).unwrap_err();
        assert_eq!(err, BAD_LIMITS_MESSAGE);
    }

    #[test]
    fn test_double_star_rewritten_to_caret() {
        let (normalized, _) = normalize(&raw("x**2 + x**3", "x", "")).unwrap();
        assert_eq!(normalized.canonical_text, "x^2 + x^3");
    }

    #[test]
    fn test_empty_variable_rejected() {
        assert!(normalize(&raw("x^2", "", "")).is_err());
    }

    #[test]
    fn test_numeric_variable_rejected() {
        assert!(normalize(&raw("x^2", "2x", "")).is_err());
    }

    #[test]
    fn test_empty_function_rejected() {
        assert!(normalize(&raw("", "x", "")).is_err());
    }
}
