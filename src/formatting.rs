/// Number formatting for chat output
///
/// Precision depends on magnitude:
/// - `None` renders as "N/A", zero as "0"
/// - below 0.001: six decimals
/// - below 1: four decimals
/// - otherwise two decimals with `,` thousands grouping
///
/// The sign is kept; only the magnitude selects the branch.
use num_format::{Locale, ToFormattedString};
use serde_json::Value;

pub const NOT_AVAILABLE: &str = "N/A";

pub fn format_number(value: Option<f64>) -> String {
    let value = match value {
        Some(v) => v,
        None => return NOT_AVAILABLE.to_string(),
    };

    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude < 0.001 {
        format!("{:.6}", value)
    } else if magnitude < 1.0 {
        format!("{:.4}", value)
    } else {
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{}{}", sign, group_thousands(&format!("{:.2}", magnitude)))
    }
}

/// Format a raw JSON field with the same rules
///
/// Numbers and numeric strings go through [`format_number`]. Null or a
/// missing field is "N/A"; anything else renders as its literal text.
pub fn format_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
        Some(Value::Number(n)) => format_number(n.as_f64()),
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(parsed) => format_number(Some(parsed)),
            Err(_) => s.clone(),
        },
        Some(other) => other.to_string(),
    }
}

/// Insert `,` separators into the integer part of a "1234.56" string
fn group_thousands(fixed: &str) -> String {
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed, ""));

    let grouped = match int_part.parse::<u128>() {
        Ok(n) => n.to_formatted_string(&Locale::en),
        Err(_) => {
            // beyond u128: group the digit string directly
            let digits: Vec<char> = int_part.chars().collect();
            let mut out = String::with_capacity(digits.len() + digits.len() / 3);
            for (i, c) in digits.iter().enumerate() {
                if i > 0 && (digits.len() - i) % 3 == 0 {
                    out.push(',');
                }
                out.push(*c);
            }
            out
        }
    };

    if frac_part.is_empty() {
        grouped
    } else {
        format!("{}.{}", grouped, frac_part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_none_and_zero() {
        assert_eq!(format_number(None), "N/A");
        assert_eq!(format_number(Some(0.0)), "0");
        assert_eq!(format_number(Some(-0.0)), "0");
    }

    #[test]
    fn test_precision_bands() {
        assert_eq!(format_number(Some(0.0005)), "0.000500");
        assert_eq!(format_number(Some(0.00012345678)), "0.000123");
        assert_eq!(format_number(Some(0.001)), "0.0010");
        assert_eq!(format_number(Some(0.5)), "0.5000");
        assert_eq!(format_number(Some(1.0)), "1.00");
        assert_eq!(format_number(Some(12.3456789)), "12.35");
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format_number(Some(1234.5)), "1,234.50");
        assert_eq!(format_number(Some(1234567.891)), "1,234,567.89");
        assert_eq!(format_number(Some(999.999)), "1,000.00");
        assert_eq!(
            format_number(Some(2f64.powi(70))),
            "1,180,591,620,717,411,303,424.00"
        );
        assert_eq!(
            format_number(Some(2f64.powi(130))),
            "1,361,129,467,683,753,853,853,498,429,727,072,845,824.00"
        );
    }

    #[test]
    fn test_negative_values_use_magnitude() {
        assert_eq!(format_number(Some(-0.0005)), "-0.000500");
        assert_eq!(format_number(Some(-0.25)), "-0.2500");
        assert_eq!(format_number(Some(-1234.5)), "-1,234.50");
    }

    #[test]
    fn test_non_finite_values_render_literally() {
        assert_eq!(format_number(Some(f64::NAN)), "NaN");
        assert_eq!(format_number(Some(f64::INFINITY)), "inf");
    }

    #[test]
    fn test_two_decimal_band_property() {
        for x in [1.0, 7.25, 42.0, 999.5, 10_000.0, 123_456.789, 9.87e12] {
            let rendered = format_number(Some(x));
            let (int_part, frac) = rendered.split_once('.').unwrap();
            assert_eq!(frac.len(), 2, "{}", rendered);
            for group in int_part.split(',').skip(1) {
                assert_eq!(group.len(), 3, "{}", rendered);
            }
            assert!(int_part.split(',').next().unwrap().len() <= 3, "{}", rendered);
        }
    }

    #[test]
    fn test_small_band_properties() {
        for x in [0.000001, 0.00042, 0.000999] {
            let rendered = format_number(Some(x));
            assert_eq!(rendered.split_once('.').unwrap().1.len(), 6);
        }
        for x in [0.001, 0.0123, 0.5, 0.9999] {
            let rendered = format_number(Some(x));
            assert_eq!(rendered.split_once('.').unwrap().1.len(), 4);
        }
    }

    #[test]
    fn test_format_value_coercion() {
        assert_eq!(format_value(None), "N/A");
        assert_eq!(format_value(Some(&Value::Null)), "N/A");
        assert_eq!(format_value(Some(&json!(2500))), "2,500.00");
        assert_eq!(format_value(Some(&json!("0.5"))), "0.5000");
        assert_eq!(format_value(Some(&json!("abc"))), "abc");
        assert_eq!(format_value(Some(&json!(true))), "true");
    }

    #[test]
    fn test_format_value_counts() {
        assert_eq!(format_value(Some(&json!(0))), "0");
        assert_eq!(format_value(Some(&json!(4000))), "4,000.00");
        assert_eq!(format_value(Some(&json!(10.5))), "10.50");
    }
}
