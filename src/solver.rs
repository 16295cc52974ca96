//! Quadratic equation solver.
//!
//! This is the job function the pool parallelizes: a pure mapping from three
//! raw input tokens to one formatted answer line. Malformed input never
//! escapes as an error; it is folded into the answer string, so the pool can
//! treat every invocation as a success.

/// Epsilon guard for discriminants and near-zero results, compensating for
/// floating point precision loss.
const EPSILON: f64 = 1e-7;

/// Solves `a*x^2 + b*x + c = 0` from three string tokens and formats the
/// answer.
///
/// The result is prefixed with the echoed input, e.g.
/// `(1 -3 2) => (1 2) Xmin=1.5`. For a genuine quadratic (`a != 0`) the
/// roots are followed by the parabola extremum (`Xmin` for `a > 0`, `Xmax`
/// for `a < 0`). With `a == 0` the equation degenerates to a linear one:
/// `b != 0` gives the single root `-c/b`, while `b == 0` leaves either every
/// `x` (when `c == 0`) or no solution at all.
///
/// Tokens that do not parse as integers produce `invalid argument` or
/// `out of range` in place of roots.
pub fn calculate_roots(a_str: String, b_str: String, c_str: String) -> String {
    let mut answer = format!("({} {} {}) => ", a_str, b_str, c_str);

    let (a, b, c) = match (parse_token(&a_str), parse_token(&b_str), parse_token(&c_str)) {
        (Ok(a), Ok(b), Ok(c)) => (a, b, c),
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
            answer.push_str(e);
            return answer;
        }
    };

    if a == 0 {
        answer.push_str(&solve_linear(b, c));
    } else {
        answer.push_str(&solve_quadratic(a, b, c));
    }
    answer
}

fn parse_token(token: &str) -> Result<i32, &'static str> {
    token.parse::<i32>().map_err(|e| {
        use std::num::IntErrorKind;
        match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => "out of range",
            _ => "invalid argument",
        }
    })
}

/// `b*x + c = 0`
fn solve_linear(b: i32, c: i32) -> String {
    if b == 0 {
        if c == 0 {
            // any x satisfies 0 = 0
            "(x \u{2208} R)".to_string()
        } else {
            "no solution".to_string()
        }
    } else {
        let x = -f64::from(c) / f64::from(b);
        format!("({})", format_root(x))
    }
}

/// `a*x^2 + b*x + c = 0`, `a != 0`
fn solve_quadratic(a: i32, b: i32, c: i32) -> String {
    let (fa, fb, fc) = (f64::from(a), f64::from(b), f64::from(c));
    let d = fb * fb - 4.0 * fa * fc;

    let mut answer = if d < -EPSILON {
        "no roots".to_string()
    } else if d.abs() < EPSILON {
        let x = -fb / (2.0 * fa);
        format!("({})", format_root(x))
    } else {
        // Pair the subtraction-free root with its Vieta counterpart to avoid
        // cancellation when b*b dominates 4ac.
        let b_sign = if b < 0 { -1.0 } else { 1.0 };
        let temp = -0.5 * (fb + b_sign * d.sqrt());
        let x1 = fc / temp;
        let x2 = temp / fa;
        format!("({} {})", format_root(x1), format_root(x2))
    };

    let x_extremum = -fb / (2.0 * fa);
    let label = if a > 0 { "Xmin" } else { "Xmax" };
    answer.push_str(&format!(" {}={}", label, format_root(x_extremum)));
    answer
}

/// Renders a root to at most 6 significant digits, snapping values within
/// [`EPSILON`] of zero to plain `0`.
fn format_root(x: f64) -> String {
    if x.abs() < EPSILON {
        return "0".to_string();
    }
    let magnitude = x.abs().log10().floor();
    let factor = 10f64.powf(5.0 - magnitude);
    let rounded = (x * factor).round() / factor;
    format!("{}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(a: &str, b: &str, c: &str) -> String {
        calculate_roots(a.to_string(), b.to_string(), c.to_string())
    }

    #[test]
    fn test_two_roots_with_extremum() {
        assert_eq!(solve("1", "-3", "2"), "(1 -3 2) => (1 2) Xmin=1.5");
    }

    #[test]
    fn test_root_at_zero_is_not_negative_zero() {
        assert_eq!(solve("1", "2", "0"), "(1 2 0) => (0 -2) Xmin=-1");
    }

    #[test]
    fn test_double_root() {
        assert_eq!(solve("1", "2", "1"), "(1 2 1) => (-1) Xmin=-1");
    }

    #[test]
    fn test_no_real_roots() {
        assert_eq!(solve("1", "0", "1"), "(1 0 1) => no roots Xmin=0");
    }

    #[test]
    fn test_negative_leading_coefficient_reports_maximum() {
        assert_eq!(solve("-1", "0", "4"), "(-1 0 4) => (-2 2) Xmax=0");
    }

    #[test]
    fn test_linear_root() {
        assert_eq!(solve("0", "2", "-4"), "(0 2 -4) => (2)");
    }

    #[test]
    fn test_linear_with_zero_constant() {
        assert_eq!(solve("0", "5", "0"), "(0 5 0) => (0)");
    }

    #[test]
    fn test_degenerate_no_solution() {
        assert_eq!(solve("0", "0", "5"), "(0 0 5) => no solution");
    }

    #[test]
    fn test_degenerate_any_x() {
        assert_eq!(solve("0", "0", "0"), "(0 0 0) => (x \u{2208} R)");
    }

    #[test]
    fn test_invalid_argument() {
        assert_eq!(solve("1", "two", "3"), "(1 two 3) => invalid argument");
        assert_eq!(solve("", "2", "3"), "( 2 3) => invalid argument");
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            solve("99999999999", "0", "0"),
            "(99999999999 0 0) => out of range"
        );
        assert_eq!(
            solve("1", "-99999999999", "0"),
            "(1 -99999999999 0) => out of range"
        );
    }

    #[test]
    fn test_fractional_root_rounds_to_six_significant_digits() {
        // 3x + 1 = 0 -> x = -1/3
        assert_eq!(solve("0", "3", "1"), "(0 3 1) => (-0.333333)");
    }
}
