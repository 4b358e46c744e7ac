//! Local arithmetic evaluator - the last backend in the chain.
//!
//! Guarantees that trivial arithmetic keeps working when every external
//! service is down. Anything with variables or an equals sign is out of its
//! reach and takes a reduced-capability path instead of failing.

use crate::error::SolveError;
use crate::providers::Provider;
use crate::solution::{SolveResult, Step};
use async_trait::async_trait;

/// Sentinel solution for input the evaluator cannot attempt.
pub const UNAVAILABLE_SOLUTION: &str = "API unavailable - try simple arithmetic only";

#[derive(Debug, Default)]
pub struct LocalEvaluator;

impl LocalEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate a problem as plain numeric arithmetic.
    ///
    /// Input containing an equals sign or any letter is never evaluated
    /// numerically; it gets the reduced-capability result. Everything else
    /// must reduce to a finite number or the evaluation fails with
    /// `InvalidExpression`.
    pub fn evaluate(&self, problem: &str) -> Result<SolveResult, SolveError> {
        let cleaned: String = problem.split_whitespace().collect();

        if cleaned.contains('=') || cleaned.chars().any(|c| c.is_ascii_alphabetic()) {
            return Ok(Self::unavailable_result(problem));
        }

        // Letters were already ruled out above; stripping again keeps the
        // tokenizer input closed under the permitted alphabet.
        let sanitized: String = cleaned
            .chars()
            .filter(|c| !c.is_ascii_alphabetic())
            .collect();

        let value = eval_expression(&sanitized)?;
        let rendered = format_number(value);

        let steps = vec![
            Step::from_raw(&format!("\\text{{Original problem: }} {}", problem)),
            Step::from_raw(&format!("\\text{{Simplify: }} {}", cleaned)),
            Step::from_raw(&format!("\\text{{Calculate: }} {}", rendered)),
        ];

        Ok(SolveResult::new(steps, Step::from_raw(&rendered)))
    }

    /// Result for equations and anything else only the external services
    /// can handle.
    fn unavailable_result(problem: &str) -> SolveResult {
        let steps = vec![
            Step::from_raw(&format!("\\text{{Original problem: }} {}", problem)),
            Step::from_raw("\\text{Sorry, the external API is unavailable.}"),
            Step::from_raw("\\text{For complex equations and algebra problems,}"),
            Step::from_raw("\\text{we need to connect to our solver service.}"),
        ];
        SolveResult::new(steps, Step::from_raw(UNAVAILABLE_SOLUTION))
    }
}

#[async_trait]
impl Provider for LocalEvaluator {
    fn name(&self) -> &'static str {
        "local-evaluator"
    }

    async fn solve(&self, problem: &str) -> Result<SolveResult, SolveError> {
        self.evaluate(problem)
    }
}

/// Integral values print bare, everything else in the shortest form that
/// round-trips.
fn format_number(value: f64) -> String {
    format!("{}", value)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

/// Tokenize a sanitized expression. Only digits, `.`, the four basic
/// operators, `^` and parentheses are permitted; anything else is rejected
/// so evaluation can never reach beyond literal arithmetic.
fn tokenize(input: &str) -> Result<Vec<Token>, SolveError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            '0'..='9' | '.' => {
                let mut end = start;
                while let Some(&(i, d)) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        end = i + d.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let literal = &input[start..end];
                let value: f64 = literal.parse().map_err(|_| {
                    SolveError::InvalidExpression(format!("bad number literal '{}'", literal))
                })?;
                tokens.push(Token::Number(value));
            }
            '+' => {
                tokens.push(Token::Plus);
                chars.next();
            }
            '-' => {
                tokens.push(Token::Minus);
                chars.next();
            }
            '*' => {
                tokens.push(Token::Star);
                chars.next();
            }
            '/' => {
                tokens.push(Token::Slash);
                chars.next();
            }
            '^' => {
                tokens.push(Token::Caret);
                chars.next();
            }
            '(' => {
                tokens.push(Token::LParen);
                chars.next();
            }
            ')' => {
                tokens.push(Token::RParen);
                chars.next();
            }
            _ => {
                return Err(SolveError::InvalidExpression(format!(
                    "unexpected character '{}'",
                    c
                )));
            }
        }
    }

    Ok(tokens)
}

/// Evaluate a sanitized expression down to a single finite number.
fn eval_expression(input: &str) -> Result<f64, SolveError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(SolveError::InvalidExpression("empty expression".to_string()));
    }

    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.parse_additive()?;
    if parser.pos != parser.tokens.len() {
        return Err(SolveError::InvalidExpression(
            "trailing input after expression".to_string(),
        ));
    }
    if !value.is_finite() {
        return Err(SolveError::InvalidExpression(
            "expression does not reduce to a finite number".to_string(),
        ));
    }

    Ok(value)
}

/// Recursive-descent evaluation. Precedence, loosest to tightest:
/// `+ -`, `* /`, unary sign, `^` (right-associative).
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_additive(&mut self) -> Result<f64, SolveError> {
        let mut value = self.parse_term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.advance();
                    value += self.parse_term()?;
                }
                Token::Minus => {
                    self.advance();
                    value -= self.parse_term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn parse_term(&mut self) -> Result<f64, SolveError> {
        let mut value = self.parse_unary()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.advance();
                    value *= self.parse_unary()?;
                }
                Token::Slash => {
                    self.advance();
                    value /= self.parse_unary()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn parse_unary(&mut self) -> Result<f64, SolveError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.advance();
                Ok(-self.parse_unary()?)
            }
            Some(Token::Plus) => {
                self.advance();
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> Result<f64, SolveError> {
        let base = self.parse_primary()?;
        if let Some(Token::Caret) = self.peek() {
            self.advance();
            // Right-associative; the exponent may carry its own sign.
            let exponent = self.parse_unary()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<f64, SolveError> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::LParen) => {
                let value = self.parse_additive()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    _ => Err(SolveError::InvalidExpression(
                        "missing closing parenthesis".to_string(),
                    )),
                }
            }
            other => Err(SolveError::InvalidExpression(format!(
                "unexpected token {:?}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn solution_of(problem: &str) -> String {
        LocalEvaluator::new()
            .evaluate(problem)
            .unwrap()
            .solution()
            .to_string()
    }

    #[test]
    fn test_basic_precedence() {
        assert_eq!(solution_of("2+3*4"), "14");
    }

    #[test]
    fn test_whitespace_is_stripped() {
        assert_eq!(solution_of(" 2 +  3 * 4 "), "14");
    }

    #[test]
    fn test_parentheses() {
        assert_eq!(solution_of("(1+2)*3"), "9");
    }

    #[test]
    fn test_division_yields_fraction() {
        assert_eq!(solution_of("10/4"), "2.5");
    }

    #[test]
    fn test_exponentiation_right_associative() {
        assert_eq!(solution_of("2^3"), "8");
        assert_eq!(solution_of("2^3^2"), "512");
    }

    #[test]
    fn test_unary_signs() {
        assert_eq!(solution_of("-3+5"), "2");
        assert_eq!(solution_of("2+ +3"), "5");
        assert_eq!(solution_of("2^-1"), "0.5");
    }

    #[test]
    fn test_decimal_arithmetic() {
        let value = eval_expression("0.1+0.2").unwrap();
        assert_relative_eq!(value, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_steps_carry_problem_and_cleaned_form() {
        let result = LocalEvaluator::new().evaluate("2 + 3*4").unwrap();
        let steps: Vec<String> = result.steps().iter().map(|s| s.to_string()).collect();
        assert_eq!(steps[0], "\\text{Original problem: } 2 + 3*4");
        assert_eq!(steps[1], "\\text{Simplify: } 2+3*4");
        assert_eq!(steps[2], "\\text{Calculate: } 14");
    }

    #[test]
    fn test_equation_takes_unavailable_path() {
        let result = LocalEvaluator::new().evaluate("2x + 3 = 7").unwrap();
        assert_eq!(result.solution().to_string(), UNAVAILABLE_SOLUTION);
        assert!(result.steps()[0].to_string().contains("2x + 3 = 7"));
    }

    #[test]
    fn test_any_letter_takes_unavailable_path() {
        // Stricter than the bare `x` check: `sin(30)` is not arithmetic.
        let result = LocalEvaluator::new().evaluate("sin(30)+2").unwrap();
        assert_eq!(result.solution().to_string(), UNAVAILABLE_SOLUTION);
    }

    #[test]
    fn test_invalid_expressions_fail() {
        let evaluator = LocalEvaluator::new();
        assert!(matches!(
            evaluator.evaluate("2+*3"),
            Err(SolveError::InvalidExpression(_))
        ));
        assert!(matches!(
            evaluator.evaluate("1.2.3"),
            Err(SolveError::InvalidExpression(_))
        ));
        assert!(matches!(
            evaluator.evaluate("(2+3"),
            Err(SolveError::InvalidExpression(_))
        ));
        assert!(matches!(
            evaluator.evaluate(""),
            Err(SolveError::InvalidExpression(_))
        ));
    }

    #[test]
    fn test_division_by_zero_is_rejected() {
        assert!(matches!(
            LocalEvaluator::new().evaluate("1/0"),
            Err(SolveError::InvalidExpression(_))
        ));
    }
}
