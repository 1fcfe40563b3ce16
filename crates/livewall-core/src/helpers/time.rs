// crates/livewall-core/src/helpers/time.rs
//
// Seconds ↔ text for the trim fields and the metadata badges.
//
// The trim fields are free text. They are written from a TrimPlan with
// format_field and read back with parse_field only when an export request
// is built, so half-typed input never disturbs the session.

/// Seconds as trim-field text. Whole numbers print without a decimal point.
///
/// ```
/// use livewall_core::helpers::time::format_field;
/// assert_eq!(format_field(60.0), "60");
/// assert_eq!(format_field(45.6), "45.6");
/// assert_eq!(format_field(0.0),  "0");
/// ```
pub fn format_field(secs: f64) -> String {
    format!("{secs}")
}

/// Parse trim-field text as seconds. Empty, unparsable or non-finite → 0.
///
/// Accepts a leading numeric prefix the way a lenient float parser would, so
/// `"12.5s"` reads as 12.5.
///
/// ```
/// use livewall_core::helpers::time::parse_field;
/// assert_eq!(parse_field(" 12.5 "), 12.5);
/// assert_eq!(parse_field("12.5s"),  12.5);
/// assert_eq!(parse_field("abc"),    0.0);
/// assert_eq!(parse_field(""),       0.0);
/// ```
pub fn parse_field(text: &str) -> f64 {
    let t = text.trim();
    if let Ok(v) = t.parse::<f64>() {
        return if v.is_finite() { v } else { 0.0 };
    }
    // Longest prefix that parses.
    let mut end = 0;
    for (i, c) in t.char_indices() {
        if c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E') {
            end = i + c.len_utf8();
        } else {
            break;
        }
    }
    (1..=end).rev()
        .filter_map(|n| t.get(..n))
        .find_map(|p| p.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Badge text for a duration: two decimals and a trailing `s`.
///
/// ```
/// use livewall_core::helpers::time::format_seconds;
/// assert_eq!(format_seconds(90.0),   "90.00s");
/// assert_eq!(format_seconds(45.678), "45.68s");
/// ```
pub fn format_seconds(secs: f64) -> String {
    format!("{secs:.2}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_round_trip_of_plan_values() {
        for v in [0.0, 5.0, 45.6, 59.9, 60.0] {
            assert_eq!(parse_field(&format_field(v)), v);
        }
    }

    #[test]
    fn parse_rejects_infinity_and_nan() {
        assert_eq!(parse_field("inf"), 0.0);
        assert_eq!(parse_field("NaN"), 0.0);
        assert_eq!(parse_field("1e999"), 0.0);
    }

    #[test]
    fn parse_keeps_sign() {
        assert_eq!(parse_field("-3"), -3.0);
    }

    #[test]
    fn parse_stops_at_garbage() {
        assert_eq!(parse_field("7.25 seconds"), 7.25);
        assert_eq!(parse_field("1.2.3"), 1.2);
        assert_eq!(parse_field("."), 0.0);
    }
}
