//! Layman percentage: `A + B%` means "A increased by B percent", not "A plus
//! B hundredths". The lexer already turned `B%` into the prefix form `%B`, so
//! the pattern to look for is `<something> <+|-> % <operand>`. It is rewritten
//! to `(A) * (1 <+|-> %B)` before the tree is built.

use log::debug;

use crate::lexer::{bracket_balance, tokenize, Token};

// Returns the additive operator if the percentage at `pos` follows the layman
// pattern. The additive must be a binary one: it needs something but an
// opening bracket before it, otherwise it is just a sign of the percentage
fn layman_operator(tokens: &[Token], pos: usize) -> Option<char> {
    if pos < 2 {
        return None;
    }
    let bound = tokens[pos - 2];
    if bound == Token::Eof || bound.is_open_bracket() {
        return None;
    }
    match tokens[pos - 1] {
        Token::Additive(op) => Some(op),
        _ => None,
    }
}

// Where to put the opening bracket of the new `(A)` group.
// `left` is everything before the percentage, `right_balance` is the bracket
// balance of everything after it.
// When both sides are inside an unbalanced group, the bracket goes before the
// nearest unclosed `(` (the first token is never checked, and if no such
// bracket is found, nothing is inserted). Otherwise the group starts at the
// very beginning of the expression
fn group_start(left: &[Token], right_balance: i64) -> Option<usize> {
    if bracket_balance(left) == 0 || right_balance == 0 {
        return Some(0);
    }

    let mut count = 0;
    for i in (1..left.len()).rev() {
        if left[i].is_open_bracket() {
            count += 1;
        } else if left[i].is_close_bracket() {
            count -= 1;
        }
        if count > 0 {
            return Some(i);
        }
    }
    None
}

/// Rewrites every layman percentage in the token list. Every rewrite builds a
/// new list, the cursor then jumps over the inserted tokens, so the `1 + %B`
/// from the replacement is never rewritten again
pub(crate) fn rewrite_layman_percentage(tokens: Vec<Token>) -> Vec<Token> {
    let mut tokens = tokens;
    let mut cursor = 0;

    while let Some(&current) = tokens.get(cursor) {
        if current == Token::Eof {
            break;
        }
        if current != Token::Percentage {
            cursor += 1;
            continue;
        }

        let op = match layman_operator(&tokens, cursor) {
            Some(op) => op,
            None => {
                cursor += 1;
                continue;
            }
        };
        let next = match tokens.get(cursor + 1) {
            Some(&t) if t != Token::Eof => t,
            _ => {
                cursor += 1;
                continue;
            }
        };

        let substitute = format!(") * (1 {} {}%)", op, next);
        let replacement = tokenize(&substitute, false);
        let open_at = group_start(&tokens[..cursor], bracket_balance(&tokens[cursor + 1..]));
        debug!("layman percentage at {}: '{}', group opens at {:?}", cursor, substitute, open_at);

        let mut rewritten = Vec::with_capacity(tokens.len() + replacement.len() + 1);
        match open_at {
            Some(at) => {
                rewritten.extend_from_slice(&tokens[..at]);
                rewritten.push(Token::Bracket('('));
                rewritten.extend_from_slice(&tokens[at..cursor - 1]);
            }
            None => rewritten.extend_from_slice(&tokens[..cursor - 1]),
        }
        rewritten.extend_from_slice(&replacement);
        rewritten.extend_from_slice(&tokens[cursor + 2..]);

        cursor += replacement.len();
        tokens = rewritten;
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewritten(expr: &str) -> String {
        rewrite_layman_percentage(tokenize(expr, true))
            .iter()
            .map(|t| t.to_string())
            .collect()
    }

    #[test]
    fn test_single() {
        assert_eq!(rewritten("100 + 10%"), "(100)*(1+%10)");
        assert_eq!(rewritten("100 - 31%"), "(100)*(1-%31)");
        assert_eq!(rewritten("2 * 3 + 0.5%"), "(2*3)*(1+%0.5)");
    }

    #[test]
    fn test_unary_untouched() {
        assert_eq!(rewritten("-69%"), "-%69");
        assert_eq!(rewritten("(-69%)"), "(-%69)");
        assert_eq!(rewritten("2%%"), "%%2");
        assert_eq!(rewritten("6.9 * 1000%"), "6.9*%1000");
        assert_eq!(rewritten("5 ^ 10%"), "5^%10");
    }

    #[test]
    fn test_chained() {
        assert_eq!(rewritten("100 + 10% + 10%"), "((100)*(1+%10))*(1+%10)");
        assert_eq!(rewritten("100 + 10% - 10%"), "((100)*(1+%10))*(1-%10)");
    }

    #[test]
    fn test_nested() {
        assert_eq!(rewritten("100 + (100 + 10%)"), "100+((100)*(1+%10))");
        assert_eq!(rewritten("100 + (100 + 10%) + 10%"), "(100+((100)*(1+%10)))*(1+%10)");
        assert_eq!(rewritten("100 + (100 + 10% + 10%)"), "100+(((100)*(1+%10))*(1+%10))");
        assert_eq!(
            rewritten("100 + ((100 * 2) + 10% + (4/2))"),
            "100+(((100*2))*(1+%10)+(4/2))"
        );
    }

    #[test]
    fn test_group_at_start() {
        // the enclosing bracket is the very first token: no group is opened,
        // and the extra closing bracket is left for the parser to ignore
        assert_eq!(rewritten("(100 + 10%)"), "(100)*(1+%10))");
    }
}
