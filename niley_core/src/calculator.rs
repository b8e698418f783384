//! Restricted arithmetic evaluator
//!
//! Grammar:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := ('+' | '-') factor | number | '(' expr ')'
//! ```
//!
//! Only numeric literals, the four operators, parentheses and whitespace
//! are accepted. Any other character is an error.

use crate::error::CalcError;

/// Longest expression the assistant will evaluate.
pub const MAX_EXPRESSION_LEN: usize = 50;

/// Evaluate an arithmetic expression.
pub fn evaluate(expr: &str) -> Result<f64, CalcError> {
    let expr = expr.trim();
    if expr.is_empty() {
        return Err(CalcError::Empty);
    }
    if expr.chars().count() > MAX_EXPRESSION_LEN {
        return Err(CalcError::TooLong(MAX_EXPRESSION_LEN));
    }

    let mut parser = Parser::new(expr);
    let value = parser.expr()?;
    parser.skip_whitespace();
    if let Some((pos, ch)) = parser.peek() {
        return Err(CalcError::UnexpectedChar { ch, pos });
    }
    if !value.is_finite() {
        return Err(CalcError::NotFinite);
    }
    Ok(value)
}

/// Evaluate and render the result as a sentence for the user.
pub fn describe(expr: &str) -> String {
    match evaluate(expr) {
        Ok(value) => format!("The result is {}", format_number(value)),
        Err(CalcError::Empty) => "Please provide a valid mathematical expression.".to_string(),
        Err(CalcError::TooLong(_)) => "Expression too long for calculation.".to_string(),
        Err(CalcError::DivisionByZero) => "Cannot divide by zero.".to_string(),
        Err(CalcError::NotFinite) => {
            "I couldn't calculate that. Please check the expression.".to_string()
        }
        Err(_) => "Invalid mathematical expression. Please use numbers and basic operators (+, -, *, /)."
            .to_string(),
    }
}

/// Integral values print without a fractional part.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        // avoid "-0"
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

struct Parser<'a> {
    chars: Vec<(usize, char)>,
    pos: usize,
    src: &'a str,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            chars: src.char_indices().collect(),
            pos: 0,
            src,
        }
    }

    fn peek(&self) -> Option<(usize, char)> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some((_, c)) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn next_significant(&mut self) -> Option<(usize, char)> {
        self.skip_whitespace();
        self.peek()
    }

    fn expr(&mut self) -> Result<f64, CalcError> {
        let mut value = self.term()?;
        while let Some((_, op @ ('+' | '-'))) = self.next_significant() {
            self.pos += 1;
            let rhs = self.term()?;
            if op == '+' {
                value += rhs;
            } else {
                value -= rhs;
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.factor()?;
        while let Some((_, op @ ('*' | '/'))) = self.next_significant() {
            self.pos += 1;
            let rhs = self.factor()?;
            if op == '*' {
                value *= rhs;
            } else {
                if rhs == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                value /= rhs;
            }
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, CalcError> {
        match self.next_significant() {
            None => Err(CalcError::UnexpectedEnd),
            Some((_, '+')) => {
                self.pos += 1;
                self.factor()
            }
            Some((_, '-')) => {
                self.pos += 1;
                Ok(-self.factor()?)
            }
            Some((_, '(')) => {
                self.pos += 1;
                let value = self.expr()?;
                match self.next_significant() {
                    Some((_, ')')) => {
                        self.pos += 1;
                        Ok(value)
                    }
                    Some((pos, ch)) => Err(CalcError::UnexpectedChar { ch, pos }),
                    None => Err(CalcError::UnexpectedEnd),
                }
            }
            Some((_, c)) if c.is_ascii_digit() || c == '.' => self.number(),
            Some((pos, ch)) => Err(CalcError::UnexpectedChar { ch, pos }),
        }
    }

    fn number(&mut self) -> Result<f64, CalcError> {
        let start = self.peek().map(|(i, _)| i).unwrap_or(self.src.len());
        while matches!(self.peek(), Some((_, c)) if c.is_ascii_digit() || c == '.') {
            self.pos += 1;
        }
        let end = self.peek().map(|(i, _)| i).unwrap_or(self.src.len());
        let literal = &self.src[start..end];
        literal
            .parse::<f64>()
            .map_err(|_| CalcError::InvalidNumber(literal.to_string()))
    }
}
