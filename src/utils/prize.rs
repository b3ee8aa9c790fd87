//! Prize label parsing

/// Extract the monetary amount embedded in a free-text prize label.
///
/// Labels are display strings like `"$500"`, `"₹1,500 + trophy"`, or
/// `"Gaming Headset"`. Every character except digits and decimal points is
/// stripped; if nothing numeric remains, the prize is treated as
/// non-monetary and the credited amount is zero. This never errors: an
/// unparseable label means "no wallet credit", not a failed settlement.
pub fn parse_amount(label: &str) -> f64 {
    let numeric: String = label
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    numeric.parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_currency() {
        assert_eq!(parse_amount("$500"), 500.0);
        assert_eq!(parse_amount("500"), 500.0);
    }

    #[test]
    fn test_thousands_separators_are_stripped() {
        assert_eq!(parse_amount("₹1,500"), 1500.0);
    }

    #[test]
    fn test_fractional_amount() {
        assert_eq!(parse_amount("Rs 49.50"), 49.5);
    }

    #[test]
    fn test_non_monetary_prize_is_zero() {
        assert_eq!(parse_amount("Gaming Headset"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
    }

    #[test]
    fn test_multiple_decimal_points_fall_back_to_zero() {
        // "v2.5.1 Merch Pack" strips to "2.5.1", which is not a number
        assert_eq!(parse_amount("v2.5.1 Merch Pack"), 0.0);
    }
}
