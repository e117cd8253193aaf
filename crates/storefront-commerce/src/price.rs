//! Parsing of price text rendered on product cards.
//!
//! Cards show prices like `"¥99.50"`. The cart stores the number, so the
//! currency prefix is removed and the rest is read with the same leniency a
//! browser applies to `parseFloat`: leading whitespace is skipped, the longest
//! numeric prefix wins, and text with no numeric prefix yields `NaN`.

/// Currency prefix printed before prices on the storefront.
pub const DEFAULT_CURRENCY_PREFIX: &str = "\u{00a5}";

/// Parse a displayed price, removing the first occurrence of `currency_prefix`.
///
/// ```
/// use storefront_commerce::price::parse_price;
/// assert_eq!(parse_price("¥99.50", "¥"), 99.5);
/// assert!(parse_price("", "¥").is_nan());
/// ```
pub fn parse_price(text: &str, currency_prefix: &str) -> f64 {
    if currency_prefix.is_empty() {
        return parse_float_prefix(text);
    }
    parse_float_prefix(&text.replacen(currency_prefix, "", 1))
}

/// Read the longest decimal-number prefix of `text`, or `NaN` if there is none.
pub fn parse_float_prefix(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let rest = &s[end..];
    if rest.starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when it has digits.
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_yen_prefix() {
        assert_eq!(parse_price("¥99.50", DEFAULT_CURRENCY_PREFIX), 99.5);
        assert_eq!(parse_price("  ¥ 12", DEFAULT_CURRENCY_PREFIX), 12.0);
    }

    #[test]
    fn test_only_first_prefix_removed() {
        assert!(parse_price("¥¥5", DEFAULT_CURRENCY_PREFIX).is_nan());
    }

    #[test]
    fn test_missing_price_is_nan() {
        assert!(parse_price("", DEFAULT_CURRENCY_PREFIX).is_nan());
        assert!(parse_price("¥", DEFAULT_CURRENCY_PREFIX).is_nan());
        assert!(parse_price("free", DEFAULT_CURRENCY_PREFIX).is_nan());
    }

    #[test]
    fn test_longest_numeric_prefix() {
        assert_eq!(parse_float_prefix("1,299.00"), 1.0);
        assert_eq!(parse_float_prefix("12.5 each"), 12.5);
        assert_eq!(parse_float_prefix(".5"), 0.5);
        assert_eq!(parse_float_prefix("5."), 5.0);
        assert_eq!(parse_float_prefix("-3.25"), -3.25);
        assert_eq!(parse_float_prefix("1e3"), 1000.0);
        assert_eq!(parse_float_prefix("2e"), 2.0);
        assert_eq!(parse_float_prefix("2e+x"), 2.0);
        assert!(parse_float_prefix(".").is_nan());
        assert!(parse_float_prefix("-").is_nan());
    }

    #[test]
    fn test_infinity() {
        assert_eq!(parse_float_prefix("Infinity"), f64::INFINITY);
        assert_eq!(parse_float_prefix("-Infinityx"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_empty_prefix_parses_whole_text() {
        assert_eq!(parse_price("7.25", ""), 7.25);
    }
}
