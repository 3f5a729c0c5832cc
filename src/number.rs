//! Extended numeric grammar.
//!
//! Accepts a superset of strict JSON numbers: optional leading `+`, leading
//! zeros, `0x` hex integers, and case-insensitive `Inf`/`Infinity`/`NaN`
//! (the sign in front of NaN is ignored). Scanning is longest-valid-prefix:
//! the token ends at the last byte that still forms a valid literal and
//! whatever follows is left in place for the lexer, so `0.4eg10` yields the
//! number `0.4` with the dangling `e` surfacing as the next (invalid) token.

fn ci_match(input: &[u8], pos: usize, lit: &[u8]) -> bool {
    input
        .get(pos..pos + lit.len())
        .is_some_and(|s| s.eq_ignore_ascii_case(lit))
}

/// True when the byte at `pos` can start a numeric token.
pub(crate) fn starts_number(input: &[u8], pos: usize) -> bool {
    match input.get(pos) {
        Some(b'+' | b'-' | b'0'..=b'9') => true,
        Some(_) => ci_match(input, pos, b"inf") || ci_match(input, pos, b"nan"),
        None => false,
    }
}

/// True when the token at `pos` uses a form outside strict JSON grammar:
/// leading `+`, a leading zero followed by a digit, hex, or a non-finite
/// literal.
pub(crate) fn extended_form(input: &[u8], pos: usize) -> bool {
    let mut p = pos;
    match input.get(p) {
        Some(b'+') => return true,
        Some(b'-') => p += 1,
        _ => {}
    }
    match input.get(p) {
        Some(b'0') => matches!(input.get(p + 1), Some(b'x' | b'X' | b'0'..=b'9')),
        Some(b'1'..=b'9') => false,
        _ => ci_match(input, p, b"inf") || ci_match(input, p, b"nan"),
    }
}

/// Scan the numeric token starting at `pos`.
///
/// On success returns the value and the position one past the consumed
/// literal. `None` means no valid literal prefix exists at `pos`.
pub(crate) fn scan(input: &[u8], pos: usize) -> Option<(f64, usize)> {
    let mut p = pos;
    let mut negative = false;
    match input.get(p) {
        Some(b'+') => p += 1,
        Some(b'-') => {
            negative = true;
            p += 1;
        }
        _ => {}
    }

    if ci_match(input, p, b"infinity") {
        let value = if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        return Some((value, p + 8));
    }
    if ci_match(input, p, b"inf") {
        let value = if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        return Some((value, p + 3));
    }
    if ci_match(input, p, b"nan") {
        return Some((f64::NAN, p + 3));
    }

    // Hex integers need at least one digit after the prefix; otherwise the
    // leading zero is consumed as an ordinary number below.
    if input.get(p) == Some(&b'0')
        && matches!(input.get(p + 1), Some(b'x' | b'X'))
        && input.get(p + 2).is_some_and(u8::is_ascii_hexdigit)
    {
        let mut q = p + 2;
        let mut value = 0f64;
        while let Some(b) = input.get(q) {
            let digit = match b {
                b'0'..=b'9' => b - b'0',
                b'a'..=b'f' => b - b'a' + 10,
                b'A'..=b'F' => b - b'A' + 10,
                _ => break,
            };
            value = value * 16.0 + f64::from(digit);
            q += 1;
        }
        return Some((if negative { -value } else { value }, q));
    }

    // Decimal: digits (leading zeros welcome), optional fraction, optional
    // exponent. The exponent marker is only consumed when digits follow it.
    let mut q = p;
    let mut int_digits = 0usize;
    while input.get(q).is_some_and(u8::is_ascii_digit) {
        q += 1;
        int_digits += 1;
    }
    let mut frac_digits = 0usize;
    let dot_ok = int_digits > 0 || input.get(q + 1).is_some_and(u8::is_ascii_digit);
    if input.get(q) == Some(&b'.') && dot_ok {
        q += 1;
        while input.get(q).is_some_and(u8::is_ascii_digit) {
            q += 1;
            frac_digits += 1;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }
    if matches!(input.get(q), Some(b'e' | b'E')) {
        let mut r = q + 1;
        if matches!(input.get(r), Some(b'+' | b'-')) {
            r += 1;
        }
        let mut exp_digits = 0usize;
        while input.get(r).is_some_and(u8::is_ascii_digit) {
            r += 1;
            exp_digits += 1;
        }
        if exp_digits > 0 {
            q = r;
        }
    }

    let text = std::str::from_utf8(&input[pos..q]).ok()?;
    let value = text.parse::<f64>().ok()?;
    Some((value, q))
}
