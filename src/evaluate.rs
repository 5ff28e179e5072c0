use crate::lexer::{parse_operand, Operator};
use std::fmt;
use std::io::{self, Write};
use thiserror::Error;
use tracing::debug;

pub const TYPE_ERROR: &str = "Math Type error!";
pub const DIVIDE_BY_ZERO: &str = "You cannot divide by zero!";
pub const DOMAIN_ERROR: &str = "Math domain error!";
pub const EVERYTHING_OK: &str = "Everything OK";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Integer(i128),
    Real(f64),
    Empty,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{}", value),
            Value::Real(value) => write!(f, "{}", format_real(*value)),
            Value::Empty => Ok(()),
        }
    }
}

/// Renders a float the way the reference calculator does: `2.0`, `0.5`,
/// `5e-06`, `1e+17`.
///
/// `{:?}` already switches to exponent form at the same magnitudes; only the
/// exponent needs an explicit sign and at least two digits.
fn format_real(value: f64) -> String {
    let repr = format!("{:?}", value);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}

impl From<i128> for Value {
    fn from(n: i128) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Real(n)
    }
}

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),
    #[error("failed to write result")]
    Io(#[from] io::Error),
}

type Result<T> = std::result::Result<T, EvalError>;

/// Outcome of one evaluation: diagnostic lines followed by the result.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub messages: Vec<&'static str>,
    pub value: Value,
}

impl Evaluation {
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        for message in &self.messages {
            writeln!(out, "{}", message)?;
        }
        writeln!(out, "{}", self.value)?;
        out.flush()
    }
}

pub struct Evaluate {
    messages: Vec<&'static str>,
}

impl Evaluate {
    pub fn new() -> Self {
        Evaluate {
            messages: Vec::new(),
        }
    }

    /// Applies `operator` to the two operand tokens.
    ///
    /// Type, division and domain failures are reported as messages with an
    /// empty result. Only an unrecognized operator is an `Err`.
    pub fn evaluate(
        mut self,
        operand1: &str,
        operand2: &str,
        operator: &str,
    ) -> Result<Evaluation> {
        let operator = Operator::lex(operator);

        let (left, right) = match (parse_operand(operand1), parse_operand(operand2)) {
            (Ok(left), Ok(right)) => (left, right),
            (Err(error), _) | (_, Err(error)) => {
                debug!(%error, "operand rejected");
                self.messages.push(TYPE_ERROR);
                return Ok(self.finish(Value::Empty));
            }
        };
        debug!(left, right, %operator, "evaluating");

        let value = match operator {
            Operator::Plus => Self::integer_operation(left, right, |a, b| a + b),
            Operator::Minus => Self::integer_operation(left, right, |a, b| a - b),
            Operator::Star => Self::integer_operation(left, right, |a, b| a * b),
            Operator::Slash => self.visit_division(left, right),
            Operator::Log => self.visit_log(left, right),
            Operator::Unknown(token) => {
                debug!(%token, "no operator matched");
                return Err(EvalError::UnknownOperator(token));
            }
        };

        Ok(self.finish(value))
    }

    // i64 operands cannot overflow i128 under +, - or *.
    fn integer_operation<F>(left: i64, right: i64, op: F) -> Value
    where
        F: Fn(i128, i128) -> i128,
    {
        op(i128::from(left), i128::from(right)).into()
    }

    fn visit_division(&mut self, left: i64, right: i64) -> Value {
        // Negative divisors are rejected along with zero.
        if right > 0 {
            true_divide(left, right).into()
        } else {
            debug!(right, "divisor not positive");
            self.messages.push(DIVIDE_BY_ZERO);
            Value::Empty
        }
    }

    fn visit_log(&mut self, value: i64, base: i64) -> Value {
        if value <= 0 || base <= 0 {
            debug!(value, base, "logarithm of non-positive operand");
            self.messages.push(DOMAIN_ERROR);
            return Value::Empty;
        }

        let ln_base = (base as f64).ln();
        if ln_base == 0.0 {
            debug!(base, "logarithm with base 1");
            self.messages.push(DOMAIN_ERROR);
            return Value::Empty;
        }

        self.messages.push(EVERYTHING_OK);
        ((value as f64).ln() / ln_base).into()
    }

    fn finish(self, value: Value) -> Evaluation {
        Evaluation {
            messages: self.messages,
            value,
        }
    }
}

// Integers up to 2^53 convert to f64 exactly.
const EXACT_F64_LIMIT: u64 = 1 << 53;

/// Divides two integers with a single rounding to the nearest f64.
fn true_divide(left: i64, right: i64) -> f64 {
    let numerator = left.unsigned_abs();
    let divisor = right.unsigned_abs();
    if numerator <= EXACT_F64_LIMIT && divisor <= EXACT_F64_LIMIT {
        return left as f64 / right as f64;
    }

    // Scale so the quotient carries at least 56 bits, then fold any remainder
    // into the lowest bit. That bit sits below the rounding position, so the
    // u128 -> f64 conversion rounds the exact quotient once.
    let bits = |n: u64| 64 - n.leading_zeros() as i32;
    let shift = (56 + bits(divisor) - bits(numerator)).max(0);
    let scaled = u128::from(numerator) << shift;
    let quotient = scaled / u128::from(divisor);
    let sticky = u128::from(scaled % u128::from(divisor) != 0);

    // 2^-shift, built from its exponent bits; the product stays normal.
    let scale = f64::from_bits(((1023 - shift) as u64) << 52);
    let magnitude = (quotient | sticky) as f64 * scale;
    if (left < 0) != (right < 0) {
        -magnitude
    } else {
        magnitude
    }
}

/// Evaluates the three argument tokens and writes the messages and result to `out`.
pub fn calculate<W: Write>(
    operand1: &str,
    operand2: &str,
    operator: &str,
    out: W,
) -> Result<Evaluation> {
    let evaluation = Evaluate::new().evaluate(operand1, operand2, operator)?;
    evaluation.write_to(out)?;
    Ok(evaluation)
}
