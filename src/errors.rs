use std::fmt;

/// Reason why an expression was rejected. `evaluate` folds all of them into NaN
#[derive(Clone, PartialEq)]
pub enum CalcError {
    OpenBracketMismatch,
    ClosingBracketMismatch,
    InsufficientOps,
    InvalidChar(char),
    UnexpectedToken(String),
    EmptyExpression,
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            CalcError::OpenBracketMismatch => write!(f, "Mismatched opening bracket"),
            CalcError::ClosingBracketMismatch => write!(f, "Mismatched closing bracket"),
            CalcError::InsufficientOps => write!(f, "Too many numbers"),
            CalcError::InvalidChar(c) => write!(f, "Invalid character '{}'", c),
            CalcError::UnexpectedToken(s) => write!(f, "Unexpected token '{}'", s),
            CalcError::EmptyExpression => write!(f, "Nothing to calculate"),
        }
    }
}

impl fmt::Debug for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            CalcError::OpenBracketMismatch => write!(f, "OpenBracketMismatch"),
            CalcError::ClosingBracketMismatch => write!(f, "ClosingBracketMismatch"),
            CalcError::InsufficientOps => write!(f, "InsufficientOps"),
            CalcError::InvalidChar(c) => write!(f, "InvalidChar({:?})", c),
            CalcError::UnexpectedToken(s) => write!(f, "UnexpectedToken({:?})", s),
            CalcError::EmptyExpression => write!(f, "EmptyExpression"),
        }
    }
}

impl std::error::Error for CalcError {}
