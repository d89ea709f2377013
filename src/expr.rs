use std::fmt;

use crate::value::round_to_precision;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UnaryOp {
    /// `+x`
    Identity,
    /// `-x`
    Negate,
    /// `x%`, stored as a prefix operator
    Percent,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Expression tree produced by the parser
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Operand(f64),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

impl UnaryOp {
    pub fn from_char(c: char) -> Option<UnaryOp> {
        match c {
            '+' => Some(UnaryOp::Identity),
            '-' => Some(UnaryOp::Negate),
            '%' => Some(UnaryOp::Percent),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            UnaryOp::Identity => '+',
            UnaryOp::Negate => '-',
            UnaryOp::Percent => '%',
        }
    }

    // sign changes are exact, only the division is rounded
    pub fn apply(self, v: f64, precision: usize) -> f64 {
        match self {
            UnaryOp::Identity => v,
            UnaryOp::Negate => -v,
            UnaryOp::Percent => round_to_precision(v / 100.0, precision),
        }
    }
}

impl BinaryOp {
    pub fn from_char(c: char) -> Option<BinaryOp> {
        match c {
            '+' => Some(BinaryOp::Add),
            '-' => Some(BinaryOp::Sub),
            '*' => Some(BinaryOp::Mul),
            '/' => Some(BinaryOp::Div),
            '^' => Some(BinaryOp::Pow),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
            BinaryOp::Pow => '^',
        }
    }

    pub fn apply(self, lhs: f64, rhs: f64, precision: usize) -> f64 {
        let v = match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => lhs / rhs,
            // powf gives 1 for `NaN^0` and `1^NaN`; a broken literal must poison the result
            BinaryOp::Pow if lhs.is_nan() || rhs.is_nan() => f64::NAN,
            // powf gives 1 here as well, the limit does not exist
            BinaryOp::Pow if lhs.abs() == 1.0 && rhs.is_infinite() => f64::NAN,
            BinaryOp::Pow => lhs.powf(rhs),
        };
        round_to_precision(v, precision)
    }
}

impl Expr {
    pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
        Expr::Unary(op, Box::new(operand))
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        Expr::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    /// Evaluates the tree bottom-up, rounding the result of every operation
    /// to `precision` significant digits
    pub fn calculate(&self, precision: usize) -> f64 {
        match self {
            Expr::Operand(v) => *v,
            Expr::Unary(op, operand) => op.apply(operand.calculate(precision), precision),
            Expr::Binary(op, lhs, rhs) => op.apply(lhs.calculate(precision), rhs.calculate(precision), precision),
        }
    }
}

// Fully bracketed form, every operation gets its own pair of brackets
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Operand(v) => write!(f, "{}", v),
            Expr::Unary(op, operand) => write!(f, "{}{}", op.symbol(), operand),
            Expr::Binary(op, lhs, rhs) => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
        }
    }
}
