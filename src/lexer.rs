use std::fmt;
use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Operator {
    Plus,
    Minus,
    Star,
    Slash,
    Log,

    // Anything outside the recognized set, kept verbatim for reporting
    Unknown(String),
}

impl Operator {
    pub fn lex(token: &str) -> Operator {
        match token {
            "+" => Operator::Plus,
            "-" => Operator::Minus,
            "*" => Operator::Star,
            "/" => Operator::Slash,
            "log" => Operator::Log,
            other => Operator::Unknown(other.to_string()),
        }
    }

    pub fn lexeme(&self) -> &str {
        match self {
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Star => "*",
            Operator::Slash => "/",
            Operator::Log => "log",
            Operator::Unknown(token) => token,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexeme())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OperandError {
    #[error("invalid integer literal {0:?}")]
    Invalid(String),
}

/// Parses a base-10 integer operand.
///
/// Surrounding whitespace is ignored, one leading sign is accepted and single
/// underscores may separate digits (`1_000`).
pub fn parse_operand(token: &str) -> Result<i64, OperandError> {
    let invalid = || OperandError::Invalid(token.to_string());
    let literal = token.trim();
    let digits = literal.trim_start_matches(['+', '-']);
    if literal.len() - digits.len() > 1 || !separators_between_digits(digits) {
        return Err(invalid());
    }

    literal.replace('_', "").parse::<i64>().map_err(|_| invalid())
}

fn separators_between_digits(digits: &str) -> bool {
    let bytes = digits.as_bytes();
    bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && i + 1 < bytes.len()
                && bytes[i - 1].is_ascii_digit()
                && bytes[i + 1].is_ascii_digit())
    })
}
