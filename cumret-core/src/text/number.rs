//! Culture-invariant number parsing and formatting.

const CURRENCY: char = '¤';
const GENERAL_PRECISION: usize = 15;

fn is_number_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\u{0b}' | '\u{0c}' | '\r')
}

/// Parses a number written with invariant symbols in the permissive "any"
/// style: surrounding whitespace, leading or trailing sign, parentheses for
/// negatives, currency symbol, `,` group separators in the integral part,
/// `.` decimal point and an exponent.
pub fn parse_invariant(text: &str) -> Option<f64> {
    let t = text.trim_matches(is_number_space);
    match t {
        "NaN" => return Some(f64::NAN),
        "Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let mut body = t;
    let mut negative = false;
    let mut signed = false;
    let mut paren = false;
    let mut currency = false;

    // leading decorations, any order, each at most once
    loop {
        let Some(c) = body.chars().next() else { break };
        match c {
            '(' if !paren && !signed => {
                paren = true;
                negative = true;
            }
            '+' | '-' if !signed && !paren => {
                signed = true;
                negative = c == '-';
            }
            CURRENCY if !currency => currency = true,
            // only a currency symbol may be followed by spaces
            c if is_number_space(c) && currency => {}
            _ => break,
        }
        body = &body[c.len_utf8()..];
    }

    // trailing decorations
    loop {
        let Some(c) = body.chars().next_back() else { break };
        match c {
            ')' if paren => paren = false,
            '+' | '-' if !signed => {
                signed = true;
                negative = c == '-';
            }
            CURRENCY if !currency => currency = true,
            c if is_number_space(c) => {}
            _ => break,
        }
        body = &body[..body.len() - c.len_utf8()];
    }
    if paren {
        return None;
    }

    let clean = clean_digits(body)?;
    let value: f64 = clean.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Validates `int[.frac][e[+-]exp]` (with group separators in `int`) and
/// returns it without separators.
fn clean_digits(body: &str) -> Option<String> {
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(at) => (&body[..at], Some(&body[at + 1..])),
        None => (body, None),
    };
    let (integral, fraction) = match mantissa.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (mantissa, None),
    };

    let int_digits: String = integral.chars().filter(|&c| c != ',').collect();
    if !int_digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if integral.starts_with(',') {
        return None;
    }
    let frac_digits = fraction.unwrap_or("");
    if !frac_digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(body.len() + 2);
    out.push_str(if int_digits.is_empty() { "0" } else { &int_digits });
    if !frac_digits.is_empty() {
        out.push('.');
        out.push_str(frac_digits);
    }
    if let Some(exp) = exponent {
        let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        out.push('e');
        out.push_str(exp);
    }
    Some(out)
}

/// Formats a double in the general format with 15 significant digits using
/// invariant symbols: `.` decimal point, no group separators, `E+XX`
/// exponents outside `1e-5..1e15`.
pub fn format_invariant(value: f64) -> String {
    if value.is_nan() {
        return "NaN".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }
    if value == 0.0 {
        return "0".into();
    }

    let sci = format!("{:.*e}", GENERAL_PRECISION - 1, value.abs());
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = digits.trim_end_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };

    let mut out = String::with_capacity(24);
    if value < 0.0 {
        out.push('-');
    }

    if exp >= GENERAL_PRECISION as i32 || exp < -5 {
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        out.push('E');
        out.push(if exp < 0 { '-' } else { '+' });
        out.push_str(&format!("{:02}", exp.abs()));
    } else if exp >= 0 {
        let int_len = exp as usize + 1;
        if digits.len() <= int_len {
            out.push_str(digits);
            out.extend(std::iter::repeat_n('0', int_len - digits.len()));
        } else {
            out.push_str(&digits[..int_len]);
            out.push('.');
            out.push_str(&digits[int_len..]);
        }
    } else {
        out.push_str("0.");
        out.extend(std::iter::repeat_n('0', (-exp - 1) as usize));
        out.push_str(digits);
    }
    out
}
