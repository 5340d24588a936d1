use crate::error::{ParseError, ParseErrorKind, Res, Saturated};

/// Bit size used when the caller passes 0: the platform word.
pub const WORD_BITS: u32 = usize::BITS;

const TRUE_LITERALS: &[&str] = &["1", "t", "T", "TRUE", "true", "True"];
const FALSE_LITERALS: &[&str] = &["0", "f", "F", "FALSE", "false", "False"];

pub fn parse_bool(text: &str) -> Res<bool> {
    if TRUE_LITERALS.contains(&text) {
        Ok(true)
    } else if FALSE_LITERALS.contains(&text) {
        Ok(false)
    } else {
        Err(ParseError::syntax(text, "bool"))
    }
}

fn bit_size(bits: u32, text: &str, target: &'static str) -> Res<u32> {
    match bits {
        0 => Ok(WORD_BITS),
        1..=64 => Ok(bits),
        _ => Err(ParseError::new(
            ParseErrorKind::InvalidBitSize(bits),
            text,
            target,
        )),
    }
}

fn max_unsigned(bits: u32) -> u64 {
    if bits == 64 {
        u64::MAX
    } else {
        (1 << bits) - 1
    }
}

/// Picks the base and the digits to read. Base 0 means "look at the prefix".
fn radix<'a>(text: &'a str, base: u32, target: &'static str) -> Res<(&'a str, u32)> {
    match base {
        0 => {
            if let Some(digits) = text
                .strip_prefix("0x")
                .or_else(|| text.strip_prefix("0X"))
            {
                Ok((digits, 16))
            } else if text.len() > 1 && text.starts_with('0') {
                Ok((text, 8))
            } else {
                Ok((text, 10))
            }
        }
        2..=36 => Ok((text, base)),
        _ => Err(ParseError::new(
            ParseErrorKind::InvalidBase(base),
            text,
            target,
        )),
    }
}

/// Stops with a range error at the first digit that takes the value past
/// `max`, before looking at the rest of the text.
fn digits_to_u64(
    text: &str,
    digits: &str,
    base: u32,
    max: u64,
    target: &'static str,
) -> Res<u64> {
    if digits.is_empty() {
        return Err(ParseError::syntax(text, target));
    }

    let mut n: u64 = 0;
    for c in digits.chars() {
        let digit = match c.to_digit(36) {
            Some(d) if d < base => d,
            _ => return Err(ParseError::syntax(text, target)),
        };
        n = match n
            .checked_mul(base as u64)
            .and_then(|n| n.checked_add(digit as u64))
        {
            Some(n) if n <= max => n,
            _ => return Err(ParseError::range(text, target, Saturated::Uint(max))),
        };
    }
    Ok(n)
}

pub fn parse_uint(text: &str, base: u32, bits: u32) -> Res<u64> {
    const TARGET: &str = "uint";

    let bits = bit_size(bits, text, TARGET)?;
    let (digits, base) = radix(text, base, TARGET)?;
    digits_to_u64(text, digits, base, max_unsigned(bits), TARGET)
}

pub fn parse_int(text: &str, base: u32, bits: u32) -> Res<i64> {
    const TARGET: &str = "int";

    let bits = bit_size(bits, text, TARGET)?;
    let (negative, unsigned) = if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest)
    } else {
        (false, text)
    };

    let (digits, base) = radix(unsigned, base, TARGET)?;
    let magnitude = match digits_to_u64(text, digits, base, max_unsigned(bits), TARGET) {
        Ok(n) => n,
        Err(e) if e.is_range() => u64::MAX,
        Err(e) => return Err(e),
    };

    let cutoff = 1u64 << (bits - 1);
    if !negative && magnitude >= cutoff {
        let max = (cutoff - 1) as i64;
        return Err(ParseError::range(text, TARGET, Saturated::Int(max)));
    }
    if negative && magnitude > cutoff {
        let min = -(cutoff as i128) as i64;
        return Err(ParseError::range(text, TARGET, Saturated::Int(min)));
    }

    let n = magnitude as i64;
    Ok(if negative { n.wrapping_neg() } else { n })
}

fn is_infinity_literal(text: &str) -> bool {
    let unsigned = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Parses a float at 32 or 64 bit precision. The result is always an `f64`,
/// but at 32 bits it converts to `f32` without loss.
pub fn parse_float(text: &str, bits: u32) -> Res<f64> {
    const TARGET: &str = "float";

    let value = match bits {
        32 => text.parse::<f32>().map(f64::from),
        64 => text.parse::<f64>(),
        _ => {
            return Err(ParseError::new(
                ParseErrorKind::InvalidBitSize(bits),
                text,
                TARGET,
            ))
        }
    }
    .map_err(|_| ParseError::syntax(text, TARGET))?;

    if value.is_infinite() && !is_infinity_literal(text) {
        Err(ParseError::range(text, TARGET, Saturated::Float(value)))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_bool() {
        for s in TRUE_LITERALS {
            assert_eq!(parse_bool(s), Ok(true));
        }
        for s in FALSE_LITERALS {
            assert_eq!(parse_bool(s), Ok(false));
        }
        assert!(parse_bool("yes").unwrap_err().is_syntax());
        assert!(parse_bool("tRUE").unwrap_err().is_syntax());
        assert!(parse_bool("").unwrap_err().is_syntax());
    }

    #[test]
    fn test_parse_int_base_inference() {
        assert_eq!(parse_int("0x1A", 0, 0), Ok(26));
        assert_eq!(parse_int("0X1a", 0, 0), Ok(26));
        assert_eq!(parse_int("017", 0, 0), Ok(15));
        assert_eq!(parse_int("0", 0, 0), Ok(0));
        assert_eq!(parse_int("-42", 0, 0), Ok(-42));
        assert_eq!(parse_int("+7", 0, 0), Ok(7));
        assert!(parse_int("08", 0, 0).unwrap_err().is_syntax());
        assert!(parse_int("0x", 0, 0).unwrap_err().is_syntax());
    }

    #[test]
    fn test_parse_int_explicit_base() {
        assert_eq!(parse_int("ff", 16, 64), Ok(255));
        assert_eq!(parse_int("101", 2, 8), Ok(5));
        assert_eq!(parse_int("zz", 36, 64), Ok(35 * 36 + 35));
        assert!(parse_int("2", 2, 8).unwrap_err().is_syntax());
    }

    #[test]
    fn test_parse_int_errors() {
        assert!(parse_int("", 10, 8).unwrap_err().is_syntax());
        assert!(parse_int("-", 10, 8).unwrap_err().is_syntax());
        assert!(parse_int("1 2", 10, 64).unwrap_err().is_syntax());

        let e = parse_int("300", 10, 8).unwrap_err();
        assert!(e.is_range());
        assert_eq!(e.saturated, Some(Saturated::Int(127)));

        let e = parse_int("-129", 10, 8).unwrap_err();
        assert_eq!(e.saturated, Some(Saturated::Int(-128)));

        assert_eq!(
            parse_int("12", 1, 64).unwrap_err().kind,
            ParseErrorKind::InvalidBase(1)
        );
        assert_eq!(
            parse_int("12", 10, 65).unwrap_err().kind,
            ParseErrorKind::InvalidBitSize(65)
        );
    }

    #[test]
    fn test_parse_int_limits() {
        assert_eq!(parse_int("127", 10, 8), Ok(127));
        assert_eq!(parse_int("-128", 10, 8), Ok(-128));
        assert_eq!(parse_int("9223372036854775807", 10, 64), Ok(i64::MAX));
        assert_eq!(parse_int("-9223372036854775808", 10, 64), Ok(i64::MIN));

        let e = parse_int("99999999999999999999999", 10, 64).unwrap_err();
        assert!(e.is_range());
        assert_eq!(e.saturated, Some(Saturated::Int(i64::MAX)));
    }

    #[test]
    fn test_overflow_reported_before_bad_digit() {
        let e = parse_int("300x", 10, 8).unwrap_err();
        assert!(e.is_range());
        assert_eq!(e.saturated, Some(Saturated::Int(127)));

        let e = parse_uint("256z", 10, 8).unwrap_err();
        assert!(e.is_range());
        assert_eq!(e.saturated, Some(Saturated::Uint(255)));

        // Fits so far, so the bad digit is what gets reported.
        assert!(parse_int("-20x", 10, 8).unwrap_err().is_syntax());
    }

    #[test]
    fn test_parse_uint() {
        assert_eq!(parse_uint("255", 10, 8), Ok(255));
        assert_eq!(parse_uint("0x10", 0, 16), Ok(16));
        assert_eq!(parse_uint("18446744073709551615", 10, 64), Ok(u64::MAX));
        assert!(parse_uint("-1", 10, 64).unwrap_err().is_syntax());
        assert!(parse_uint("+1", 10, 64).unwrap_err().is_syntax());

        let e = parse_uint("256", 10, 8).unwrap_err();
        assert!(e.is_range());
        assert_eq!(e.saturated, Some(Saturated::Uint(255)));

        let e = parse_uint("18446744073709551616", 10, 64).unwrap_err();
        assert_eq!(e.saturated, Some(Saturated::Uint(u64::MAX)));
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float("3.25", 64), Ok(3.25));
        assert_eq!(parse_float("-1e3", 64), Ok(-1000.0));
        assert_eq!(parse_float(".5", 32), Ok(0.5));
        assert_eq!(parse_float("0.1", 32), Ok(0.1f32 as f64));
        assert_eq!(parse_float("inf", 64), Ok(f64::INFINITY));
        assert_eq!(parse_float("-Infinity", 64), Ok(f64::NEG_INFINITY));
        assert!(parse_float("NaN", 64).unwrap().is_nan());
        assert!(parse_float("", 64).unwrap_err().is_syntax());
        assert!(parse_float("1.2.3", 64).unwrap_err().is_syntax());
        assert_eq!(
            parse_float("1", 16).unwrap_err().kind,
            ParseErrorKind::InvalidBitSize(16)
        );
    }

    #[test]
    fn test_parse_float_range() {
        let e = parse_float("1e400", 64).unwrap_err();
        assert!(e.is_range());
        assert_eq!(e.saturated, Some(Saturated::Float(f64::INFINITY)));

        let e = parse_float("-1e39", 32).unwrap_err();
        assert!(e.is_range());
        assert_eq!(e.saturated, Some(Saturated::Float(f64::NEG_INFINITY)));

        assert_eq!(parse_float("1e39", 64), Ok(1e39));
    }
}
