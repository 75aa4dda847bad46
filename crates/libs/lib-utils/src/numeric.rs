//! # Numeric Coercion
//!
//! Contract responses are not trusted to carry one exact numeric encoding.
//! The same field may arrive as a JSON number, a decimal string, a `0x` hex
//! string or a float. These helpers normalize all of them and fall back to
//! zero (or `false`) for anything unparseable instead of failing.

use serde_json::Value;

/// Parse a decimal or `0x`-prefixed hex string into `u128`.
///
/// Decimal strings with a fractional part are truncated (`"12.9"` → 12).
/// Well-formed values too large for `u128` (uint256 words) saturate at
/// `u128::MAX`. Negative, empty, or malformed input yields 0.
pub fn parse_u128_lenient(raw: &str) -> u128 {
    let s = raw.trim().trim_matches('"');
    if s.is_empty() {
        return 0;
    }

    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return parse_digits(hex, 16);
    }

    let integral = s.split('.').next().unwrap_or("");
    parse_digits(integral, 10)
}

fn parse_digits(digits: &str, radix: u32) -> u128 {
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return 0;
    }
    // Only overflow is left once every digit is valid.
    u128::from_str_radix(digits, radix).unwrap_or(u128::MAX)
}

/// Coerce an arbitrary JSON value into `u128`.
pub fn coerce_u128(value: &Value) -> u128 {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                v as u128
            } else if let Some(f) = n.as_f64() {
                if f.is_finite() && f > 0.0 {
                    f as u128
                } else {
                    0
                }
            } else {
                0
            }
        }
        Value::String(s) => parse_u128_lenient(s),
        Value::Bool(b) => u128::from(*b),
        _ => 0,
    }
}

/// Coerce an arbitrary JSON value into `u64`, saturating on overflow.
pub fn coerce_u64(value: &Value) -> u64 {
    u64::try_from(coerce_u128(value)).unwrap_or(u64::MAX)
}

/// Coerce an arbitrary JSON value into `i64` (used for timestamps).
///
/// Negative JSON integers are preserved; everything else goes through the
/// unsigned path and saturates at `i64::MAX`.
pub fn coerce_i64(value: &Value) -> i64 {
    if let Value::Number(n) = value {
        if let Some(v) = n.as_i64() {
            return v;
        }
    }
    i64::try_from(coerce_u128(value)).unwrap_or(i64::MAX)
}

/// Coerce an arbitrary JSON value into a boolean.
///
/// Accepts booleans, non-zero numbers, and the strings `"true"`/`"1"`.
pub fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(_) => coerce_u128(value) != 0,
        Value::String(s) => {
            let s = s.trim();
            s.eq_ignore_ascii_case("true") || s == "1"
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_lenient() {
        assert_eq!(parse_u128_lenient("1000"), 1000);
        assert_eq!(parse_u128_lenient(" 0x10 "), 16);
        assert_eq!(parse_u128_lenient("12.9"), 12);
        assert_eq!(parse_u128_lenient("-5"), 0);
        assert_eq!(parse_u128_lenient("garbage"), 0);
        assert_eq!(parse_u128_lenient(""), 0);
    }

    #[test]
    fn test_amounts_beyond_u64() {
        // 1e24 base units, typical for an 18-decimal token
        let v = json!("1000000000000000000000000");
        assert_eq!(coerce_u128(&v), 1_000_000_000_000_000_000_000_000);
        assert_eq!(coerce_u64(&v), u64::MAX);
    }

    #[test]
    fn test_oversize_words_saturate() {
        let uint256_max = format!("0x{}", "f".repeat(64));
        assert_eq!(parse_u128_lenient(&uint256_max), u128::MAX);

        let uint256_max_decimal =
            "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        assert_eq!(uint256_max_decimal.len(), 78);
        assert_eq!(parse_u128_lenient(uint256_max_decimal), u128::MAX);

        assert_eq!(coerce_u64(&json!(uint256_max)), u64::MAX);
        assert_eq!(coerce_i64(&json!(uint256_max_decimal)), i64::MAX);

        // Malformed stays zero regardless of length.
        assert_eq!(parse_u128_lenient(&format!("0x{}", "g".repeat(64))), 0);
        assert_eq!(parse_u128_lenient("0x"), 0);
        assert_eq!(parse_u128_lenient("+5"), 0);
    }

    #[test]
    fn test_coerce_shapes() {
        assert_eq!(coerce_u64(&json!(42)), 42);
        assert_eq!(coerce_u64(&json!(42.7)), 42);
        assert_eq!(coerce_u64(&json!("0x2a")), 42);
        assert_eq!(coerce_u64(&json!(null)), 0);
        assert_eq!(coerce_u64(&json!([1, 2])), 0);
        assert_eq!(coerce_u64(&json!(-3)), 0);
        assert_eq!(coerce_i64(&json!(-3)), -3);
        assert_eq!(coerce_i64(&json!("1700000000")), 1_700_000_000);
    }

    #[test]
    fn test_coerce_bool() {
        assert!(coerce_bool(&json!(true)));
        assert!(coerce_bool(&json!(1)));
        assert!(coerce_bool(&json!("TRUE")));
        assert!(!coerce_bool(&json!("no")));
        assert!(!coerce_bool(&json!(0)));
        assert!(!coerce_bool(&json!(null)));
    }
}
