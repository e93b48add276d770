// the collection of utility functions mainly for bracket parsing and sampling

/// find the first position of the given char that is outside brackets
pub fn find_char_position_outside_brackets(s: &str, c: char) -> Option<usize> {
    let mut depth = 0usize;
    for (i, ch) in s.chars().enumerate() {
        if ch == '(' {
            depth += 1;
        } else if ch == ')' {
            depth = depth.saturating_sub(1);
        } else if ch == c && depth == 0 {
            return Some(i);
        }
    }
    None
}

/// find the rightmost occurrence of any of the given operators outside
/// brackets; returns (position, operator)
pub fn find_rightmost_operator_outside_brackets(
    input: &str,
    operators: &[char],
) -> Option<(usize, char)> {
    let mut depth = 0i32;
    let mut last: Option<(usize, char)> = None;
    for (i, c) in input.chars().enumerate() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ if depth == 0 && operators.contains(&c) => {
                last = Some((i, c));
            }
            _ => {}
        }
    }
    last
}

/// position of the closing bracket matching the first opening bracket
pub fn find_pair_to_this_bracket(input: &str) -> Option<usize> {
    let mut stack = 0usize;
    for (i, c) in input.chars().enumerate() {
        if c == '(' {
            stack += 1;
        } else if c == ')' {
            if stack == 0 {
                return None;
            }
            stack -= 1;
            if stack == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// check that every opening bracket has a matching closing one
pub fn brackets_balanced(s: &str) -> bool {
    let mut stack = 0i32;
    for c in s.chars() {
        match c {
            '(' => stack += 1,
            ')' => {
                stack -= 1;
                if stack < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    stack == 0
}

/// evenly spaced grid of num_values points over [start, end], endpoints
/// included
pub fn linspace(start: f64, end: f64, num_values: usize) -> Vec<f64> {
    let mut values = Vec::with_capacity(num_values);
    if num_values == 1 {
        values.push(start);
        return values;
    }
    let step = (end - start) / (num_values as f64 - 1.0);
    for i in 0..num_values {
        values.push(start + (i as f64 * step));
    }
    values
}
