//! Number and text formatting for node labels.

use crate::core::constants::PERCENTAGE_PRECISION;
use crate::core::types::DataCount;
use crate::io::dump::Threshold;

/// Format a float with `precision` decimals, or in its shortest round-trip
/// form when `precision` is `None`.
///
/// The shortest form writes exponents with a sign and at least two digits
/// (`1e-05`, `1.5e+16`), and non-finite values as `nan`, `inf` and `-inf`.
pub fn format_value(value: f64, precision: Option<usize>) -> String {
    match precision {
        Some(digits) => format!("{:.*}", digits, value),
        None => shortest_repr(value),
    }
}

fn shortest_repr(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    let repr = format!("{:?}", value);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}

/// Format a threshold; categorical thresholds are never rounded.
pub fn format_threshold(threshold: &Threshold, precision: Option<usize>) -> String {
    match threshold {
        Threshold::Numeric(value) => format_value(*value, precision),
        Threshold::Categorical(categories) => escape_html(categories),
    }
}

/// Share of the root's records, `count / total * 100`, with two decimals.
pub fn format_percentage(count: DataCount, total: DataCount) -> String {
    let share = count as f64 / total as f64 * 100.0;
    format_value(share, Some(PERCENTAGE_PRECISION))
}

/// Escape text for inclusion in a Graphviz HTML-like label.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fixed_precision() {
        assert_eq!(format_value(17.5, Some(3)), "17.500");
        assert_eq!(format_value(-0.123456, Some(2)), "-0.12");
        assert_eq!(format_value(2.0, Some(0)), "2");
    }

    #[test]
    fn test_no_rounding() {
        assert_eq!(format_value(0.1, None), "0.1");
        assert_eq!(format_value(3.0, None), "3.0");
        assert_eq!(format_value(-12.625, None), "-12.625");
    }

    #[test]
    fn test_no_rounding_exponents() {
        assert_eq!(format_value(0.0001, None), "0.0001");
        assert_eq!(format_value(0.00001, None), "1e-05");
        assert_eq!(format_value(-2.5e-120, None), "-2.5e-120");
        assert_eq!(format_value(1e15, None), "1000000000000000.0");
        assert_eq!(format_value(1e16, None), "1e+16");
        assert_eq!(format_value(1.5e300, None), "1.5e+300");
        assert_eq!(format_value(f64::NAN, None), "nan");
        assert_eq!(format_value(f64::NEG_INFINITY, None), "-inf");
    }

    #[test]
    fn test_threshold_formatting() {
        assert_eq!(format_threshold(&Threshold::Numeric(1.23456), Some(3)), "1.235");
        assert_eq!(
            format_threshold(&Threshold::Categorical("1||4".into()), Some(3)),
            "1||4"
        );
    }

    #[test]
    fn test_percentage() {
        assert_eq!(format_percentage(50, 200), "25.00");
        assert_eq!(format_percentage(1, 3), "33.33");
        assert_eq!(format_percentage(200, 200), "100.00");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b & c>\"d\""), "a&lt;b &amp; c&gt;&quot;d&quot;");
        assert_eq!(escape_html("mean radius"), "mean radius");
    }

    proptest! {
        #[test]
        fn prop_precision_yields_exact_decimals(value in -1.0e6f64..1.0e6, digits in 0usize..10) {
            let text = format_value(value, Some(digits));
            let decimals = text.split('.').nth(1).map_or(0, str::len);
            prop_assert_eq!(decimals, digits);
        }

        #[test]
        fn prop_no_rounding_round_trips(value in -1.0e6f64..1.0e6) {
            let text = format_value(value, None);
            prop_assert_eq!(text.parse::<f64>().unwrap(), value);
        }

        #[test]
        fn prop_exponent_form_round_trips(value in prop::num::f64::NORMAL) {
            let text = format_value(value, None);
            prop_assert_eq!(text.parse::<f64>().unwrap(), value);
            if let Some((_, exponent)) = text.split_once('e') {
                prop_assert!(exponent.starts_with('+') || exponent.starts_with('-'));
                prop_assert!(exponent.len() >= 3);
            }
        }
    }
}
