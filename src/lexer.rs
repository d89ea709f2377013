use log::trace;
use pest::Parser;
use std::fmt;

#[derive(Parser)]
#[grammar = "calc.pest"]
struct CalcLexer;

/// Broad class of a token
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    Operand,
    Operator,
    Separator,
    Invalid,
    Eof,
}

/// Lexical unit of an expression. `%` is stored as a prefix operator: `5%`
/// is lexed as `Percentage, Number(5)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token {
    /// Numeric literal. Malformed literals, like `1.2.3`, hold NaN
    Number(f64),
    /// `+` or `-`
    Additive(char),
    /// `*` or `/`
    Multiplicative(char),
    /// `^`
    Exponential,
    /// `%`
    Percentage,
    /// `(` or `)`
    Bracket(char),
    /// Any character the calculator does not know
    Unknown(char),
    Eof,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Number(..) => TokenKind::Operand,
            Token::Additive(..) | Token::Multiplicative(..) | Token::Exponential | Token::Percentage => {
                TokenKind::Operator
            }
            Token::Bracket(..) => TokenKind::Separator,
            Token::Unknown(..) => TokenKind::Invalid,
            Token::Eof => TokenKind::Eof,
        }
    }

    pub fn is_open_bracket(&self) -> bool {
        *self == Token::Bracket('(')
    }

    pub fn is_close_bracket(&self) -> bool {
        *self == Token::Bracket(')')
    }
}

// Source text of a token: lexing it again gives the same token back
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Number(v) => write!(f, "{}", v),
            Token::Additive(c) | Token::Multiplicative(c) | Token::Bracket(c) | Token::Unknown(c) => {
                write!(f, "{}", c)
            }
            Token::Exponential => write!(f, "^"),
            Token::Percentage => write!(f, "%"),
            Token::Eof => Ok(()),
        }
    }
}

/// Difference between the number of opening and closing brackets
pub(crate) fn bracket_balance(tokens: &[Token]) -> i64 {
    tokens.iter().fold(0, |acc, t| {
        if t.is_open_bracket() {
            acc + 1
        } else if t.is_close_bracket() {
            acc - 1
        } else {
            acc
        }
    })
}

/// Splits a text into tokens. Never fails: bad characters become
/// `Token::Unknown` and are rejected by the parser later.
/// `terminate` appends `Token::Eof` at the end of the list
pub fn tokenize(text: &str, terminate: bool) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();

    let pairs = match CalcLexer::parse(Rule::tokens, text) {
        Ok(p) => p,
        // unreachable with the catch-all `unknown` rule, but keep the input rejectable
        Err(..) => {
            tokens.extend(text.chars().map(Token::Unknown));
            if terminate {
                tokens.push(Token::Eof);
            }
            return tokens;
        }
    };

    for pair in pairs.flatten() {
        let rule = pair.as_rule();
        let s = pair.as_str();
        let c = s.chars().next().unwrap_or('\0');
        match rule {
            Rule::tokens => {}
            Rule::additive => tokens.push(Token::Additive(c)),
            Rule::multiplicative => tokens.push(Token::Multiplicative(c)),
            Rule::exponential => tokens.push(Token::Exponential),
            Rule::bracket => tokens.push(Token::Bracket(c)),
            Rule::percent => {
                // A% -> %A
                let at = tokens.len().saturating_sub(1);
                tokens.insert(at, Token::Percentage);
            }
            Rule::number => tokens.push(Token::Number(s.parse::<f64>().unwrap_or(f64::NAN))),
            Rule::unknown => tokens.push(Token::Unknown(c)),
            Rule::EOI => {
                if terminate {
                    tokens.push(Token::Eof);
                }
            }
            _ => tokens.push(Token::Unknown(c)),
        }
    }

    trace!("tokenize {:?}: {:?}", text, tokens);
    tokens
}
