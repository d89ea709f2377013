use dtoa;
use std::str;

use crate::errors::*;

/// Expression calculation result: either value or error
pub type CalcResult = Result<f64, CalcError>;

/// Number of significant digits every arithmetic result is rounded to
pub const PRECISION: usize = 15;
/// The most significant digits an f64 can hold without loss
pub const MAX_PRECISION: usize = 17;

// Enough fractional digits to print any f64 exactly in exponent form
const EXACT_DIGITS: usize = 767;

/// Rounds a number to `digits` significant digits. Kills binary noise like
/// `68.99999999999999` while leaving infinities and NaN untouched.
/// Ties are rounded away from zero: `100000000000000.5` -> `100000000000001`.
/// Negative zero comes back as positive zero.
pub fn round_to_precision(g: f64, digits: usize) -> f64 {
    if g == 0.0 {
        return 0.0;
    }
    if !g.is_finite() {
        return g;
    }
    let digits = digits.max(1).min(MAX_PRECISION);

    // exact decimal expansion of |g|: "d.ddd...e<exp>"
    let exact = format!("{:.*e}", EXACT_DIGITS, g.abs());
    let (mantissa, exp) = match exact.find('e') {
        Some(pos) => (&exact[..pos], &exact[pos + 1..]),
        None => return g,
    };
    let mut exp = match exp.parse::<i32>() {
        Ok(e) => e,
        Err(..) => return g,
    };
    let all: Vec<u8> = mantissa.bytes().filter(|b| b.is_ascii_digit()).map(|b| b - b'0').collect();
    if all.len() <= digits {
        return g;
    }

    let mut kept = all[..digits].to_vec();
    if all[digits] >= 5 {
        let mut i = kept.len();
        loop {
            if i == 0 {
                // 9.99..9 -> 10.00..0
                kept.insert(0, 1);
                kept.pop();
                exp += 1;
                break;
            }
            i -= 1;
            if kept[i] == 9 {
                kept[i] = 0;
            } else {
                kept[i] += 1;
                break;
            }
        }
    }

    let digits: String = kept.iter().map(|d| char::from(b'0' + d)).collect();
    let sign = if g < 0.0 { "-" } else { "" };
    let s = format!("{}{}e{}", sign, digits, exp - (digits.len() as i32 - 1));
    match s.parse::<f64>() {
        Ok(v) if v == 0.0 => 0.0,
        Ok(v) => v,
        Err(..) => g,
    }
}

const F64_BUF_LEN: usize = 48;

/// Formats a result for display: shortest representation, no trailing `.0`
pub fn format_f64(g: f64) -> String {
    if g.is_nan() {
        return "NaN".to_string();
    }
    if g.is_infinite() {
        return if g > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    }

    let mut buf = [b'\0'; F64_BUF_LEN];
    let s = match dtoa::write(&mut buf[..], g) {
        Ok(len) => match str::from_utf8(&buf[..len]) {
            Ok(s) => s.to_string(),
            Err(..) => format!("{}", g),
        },
        Err(..) => format!("{}", g),
    };
    match s.strip_suffix(".0") {
        Some(int) => int.to_string(),
        None => s,
    }
}
