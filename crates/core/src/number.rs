//! Number literal scanning
//!
//! Two grammars are accepted here. Ledger amounts use a strict decimal
//! literal (`-12.5`, `1.5e-7`, `9999999999999999e80`). Request tokens use the
//! looser rules of JavaScript's `Number()`: surrounding whitespace is ignored,
//! an empty string is zero, and `Infinity` and `0x`/`0o`/`0b` integers count as
//! numbers. Digit separators (`1_000`) are rejected by both.

use bigdecimal::{BigDecimal, num_bigint::BigInt, Zero};

/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`
struct Literal<'a> {
    negative: bool,
    int: &'a str,
    frac: &'a str,
    exp: &'a str,
}

fn scan(raw: &str) -> Option<Literal<'_>> {
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let (mantissa, exp) = match rest.find(['e', 'E']) {
        Some(at) => {
            let exp = &rest[at + 1..];
            let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            if !all_digits(digits) {
                return None;
            }
            (&rest[..at], exp)
        }
        None => (rest, "0"),
    };

    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int.is_empty() && frac.is_empty() {
        return None;
    }
    if !int.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(Literal {
        negative,
        int,
        frac,
        exp,
    })
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl Literal<'_> {
    /// `None` when the exponent does not fit the decimal scale
    fn to_decimal(&self) -> Option<BigDecimal> {
        let digits = format!("{}{}", self.int, self.frac);
        let mut mantissa = BigInt::parse_bytes(digits.as_bytes(), 10)?;
        if self.negative {
            mantissa = -mantissa;
        }
        let exp: i64 = self.exp.parse().ok()?;
        let scale = i64::try_from(self.frac.len()).ok()?.checked_sub(exp)?;
        Some(BigDecimal::new(mantissa, scale))
    }
}

/// Strict decimal literal, as found in ledger amounts and limits
pub(crate) fn parse_decimal(raw: &str) -> Option<BigDecimal> {
    scan(raw)?.to_decimal()
}

/// Result of JavaScript-style `Number(raw)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum JsNumber {
    NaN,
    Infinite,
    Finite(BigDecimal),
}

pub(crate) fn js_number(raw: &str) -> JsNumber {
    let s = raw.trim();
    if s.is_empty() {
        return JsNumber::Finite(BigDecimal::zero());
    }
    if matches!(s, "Infinity" | "+Infinity" | "-Infinity") {
        return JsNumber::Infinite;
    }
    if let Some(value) = radix_integer(s) {
        return JsNumber::Finite(value);
    }
    match scan(s) {
        // Exponent out of scale range: Number() saturates or underflows
        Some(literal) => match literal.to_decimal() {
            Some(value) => JsNumber::Finite(value),
            None if literal.exp.starts_with('-') => JsNumber::Finite(BigDecimal::zero()),
            None => JsNumber::Infinite,
        },
        None => JsNumber::NaN,
    }
}

/// Unsigned `0x` / `0o` / `0b` integer
fn radix_integer(s: &str) -> Option<BigDecimal> {
    let (radix, digits) = match s.get(..2)? {
        "0x" | "0X" => (16, &s[2..]),
        "0o" | "0O" => (8, &s[2..]),
        "0b" | "0B" => (2, &s[2..]),
        _ => return None,
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let value = BigInt::parse_bytes(digits.as_bytes(), radix)?;
    Some(BigDecimal::new(value, 0))
}
