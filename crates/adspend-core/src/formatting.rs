use chrono::NaiveDate;

/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use adspend_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    // Handle the sign separately so the thousands grouping works on the
    // absolute value.
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Round to the requested decimal places.
    // Add a tiny epsilon (half ULP at the target precision) before rounding
    // to avoid IEEE 754 binary-representation issues at exact midpoints.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    // Build the thousands-separated integer portion.
    let int_str = integer_part.to_string();
    let grouped = group_thousands(&int_str);

    let result = if decimals == 0 {
        grouped
    } else {
        // Format the fractional part to the exact number of decimals.
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        // `frac_str` starts with "0.", e.g. "0.50". Strip the leading "0".
        let decimal_digits = &frac_str[1..]; // ".50"
        format!("{}{}", grouped, decimal_digits)
    };

    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a monetary amount as a BRL string with two decimal places and
/// thousands separators.
///
/// # Examples
///
/// ```
/// use adspend_core::formatting::format_currency;
///
/// assert_eq!(format_currency(1234.56),  "R$ 1,234.56");
/// assert_eq!(format_currency(0.0),      "R$ 0.00");
/// assert_eq!(format_currency(-9.99),    "R$ -9.99");
/// ```
pub fn format_currency(amount: f64) -> String {
    if amount < 0.0 {
        format!("R$ -{}", format_number(amount.abs(), 2))
    } else {
        format!("R$ {}", format_number(amount, 2))
    }
}

/// Format a nullable integer count. Null renders as `"-"`.
///
/// # Examples
///
/// ```
/// use adspend_core::formatting::format_count;
///
/// assert_eq!(format_count(Some(4_321)), "4,321");
/// assert_eq!(format_count(None), "-");
/// ```
pub fn format_count(count: Option<u64>) -> String {
    match count {
        Some(c) => group_thousands(&c.to_string()),
        None => "-".to_string(),
    }
}

/// Format a nullable efficiency ratio (CPC / CPM) with four decimal places.
/// Null renders as `"-"`.
///
/// # Examples
///
/// ```
/// use adspend_core::formatting::format_ratio;
///
/// assert_eq!(format_ratio(Some(2.575)), "2.5750");
/// assert_eq!(format_ratio(None), "-");
/// ```
pub fn format_ratio(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) => format!("{:.4}", r),
        None => "-".to_string(),
    }
}

/// Format a calendar date the way the canonical file stores it (ISO).
///
/// # Examples
///
/// ```
/// use adspend_core::formatting::format_date;
/// use chrono::NaiveDate;
///
/// let d = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
/// assert_eq!(format_date(d), "2025-01-15");
/// ```
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` if `whole` is zero to avoid division by zero.
///
/// # Examples
///
/// ```
/// use adspend_core::formatting::percentage;
///
/// assert!((percentage(50.0, 200.0, 1) - 25.0).abs() < 1e-9);
/// assert_eq!(percentage(0.0, 0.0, 2), 0.0);
/// ```
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let raw = (part / whole) * 100.0;
    let factor = 10_f64.powi(decimal_places as i32);
    (raw * factor).round() / factor
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── format_number ────────────────────────────────────────────────────────

    #[test]
    fn test_format_number_zero() {
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(0.0, 2), "0.00");
    }

    #[test]
    fn test_format_number_no_thousands() {
        assert_eq!(format_number(123.456, 2), "123.46");
    }

    #[test]
    fn test_format_number_with_thousands() {
        assert_eq!(format_number(1_234.5, 1), "1,234.5");
    }

    #[test]
    fn test_format_number_millions() {
        assert_eq!(format_number(1_234_567.0, 0), "1,234,567");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-9_876.5, 1), "-9,876.5");
    }

    #[test]
    fn test_format_number_rounds_up() {
        assert_eq!(format_number(1.005, 2), "1.01");
    }

    // ── format_currency ──────────────────────────────────────────────────────

    #[test]
    fn test_format_currency_positive() {
        assert_eq!(format_currency(1_234.56), "R$ 1,234.56");
    }

    #[test]
    fn test_format_currency_zero() {
        assert_eq!(format_currency(0.0), "R$ 0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(-9.99), "R$ -9.99");
    }

    #[test]
    fn test_format_currency_large() {
        assert_eq!(format_currency(1_000_000.0), "R$ 1,000,000.00");
    }

    // ── format_count ─────────────────────────────────────────────────────────

    #[test]
    fn test_format_count_present() {
        assert_eq!(format_count(Some(0)), "0");
        assert_eq!(format_count(Some(999)), "999");
        assert_eq!(format_count(Some(1_000)), "1,000");
        assert_eq!(format_count(Some(12_345_678)), "12,345,678");
    }

    #[test]
    fn test_format_count_null() {
        assert_eq!(format_count(None), "-");
    }

    // ── format_ratio ─────────────────────────────────────────────────────────

    #[test]
    fn test_format_ratio_present() {
        assert_eq!(format_ratio(Some(2.575)), "2.5750");
        assert_eq!(format_ratio(Some(0.0)), "0.0000");
    }

    #[test]
    fn test_format_ratio_null() {
        assert_eq!(format_ratio(None), "-");
    }

    // ── format_date ──────────────────────────────────────────────────────────

    #[test]
    fn test_format_date_iso() {
        let d = NaiveDate::from_ymd_opt(2025, 10, 31).unwrap();
        assert_eq!(format_date(d), "2025-10-31");
    }

    #[test]
    fn test_format_date_pads_month_and_day() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        assert_eq!(format_date(d), "2025-01-02");
    }

    // ── percentage ───────────────────────────────────────────────────────────

    #[test]
    fn test_percentage_basic() {
        let p = percentage(50.0, 200.0, 1);
        assert!((p - 25.0).abs() < 1e-9, "percentage = {p}");
    }

    #[test]
    fn test_percentage_zero_whole() {
        assert_eq!(percentage(10.0, 0.0, 2), 0.0);
    }

    #[test]
    fn test_percentage_rounding() {
        let p = percentage(1.0, 3.0, 2);
        assert!((p - 33.33).abs() < 1e-2, "percentage = {p}");
    }

    // ── group_thousands (via format_count) ───────────────────────────────────

    #[test]
    fn test_group_thousands_boundaries() {
        assert_eq!(format_count(Some(5)), "5");
        assert_eq!(format_count(Some(1_234)), "1,234");
        assert_eq!(format_count(Some(1_234_567)), "1,234,567");
    }
}
