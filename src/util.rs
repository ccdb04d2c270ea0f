// Parsing and formatting helpers.
//
// Cells are normalized once at the load boundary: after `normalize_cell`
// every value is either real text or absent, so no other module has to
// recognise "nan" or "N/A" style markers.
use num_format::{Locale, ToFormattedString};

/// Display text for any missing value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Cell texts the scorecard export uses for a missing value. Matching is
/// exact and case-sensitive, so "Nancy" or "NONE" stay text.
pub const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Trim a raw CSV cell and drop empty cells and missing-value markers.
pub fn normalize_cell(raw: &str) -> Option<String> {
    let s = raw.trim();
    if s.is_empty() || MISSING_MARKERS.contains(&s) {
        return None;
    }
    Some(s.to_string())
}

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that are common in CSV exports.
///
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters (this also rejects
///   `nan` and `inf`).
/// - Strips thousands separators like `","` before parsing.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(',', "");
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Decode ISO-8859-1 bytes. Every byte maps to the code point of the same value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Render an optional score the way the tables show it: the shortest
/// representation of the value, or `N/A`.
pub fn format_score(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals plus locale-aware thousands separators (`1,234,567.89`).
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Used for counts in console messages (e.g., `1,204 rows loaded`).
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_cell_drops_missing_markers() {
        assert_eq!(normalize_cell("  Yes "), Some("Yes".to_string()));
        assert_eq!(normalize_cell(""), None);
        assert_eq!(normalize_cell("   "), None);
        assert_eq!(normalize_cell("nan"), None);
        assert_eq!(normalize_cell("NaN"), None);
        assert_eq!(normalize_cell("Nancy"), Some("Nancy".to_string()));
    }

    #[test]
    fn normalize_cell_drops_spreadsheet_null_texts() {
        for marker in ["NA", "N/A", "n/a", "#N/A", "NULL", "null", "None", " <NA> "] {
            assert_eq!(normalize_cell(marker), None, "{marker}");
        }
        assert_eq!(normalize_cell("NAN"), Some("NAN".to_string()));
        assert_eq!(normalize_cell("Nairobi"), Some("Nairobi".to_string()));
    }

    #[test]
    fn parse_f64_safe_handles_csv_noise() {
        assert_eq!(parse_f64_safe(Some(" 0.75 ")), Some(0.75));
        assert_eq!(parse_f64_safe(Some("1,250")), Some(1250.0));
        assert_eq!(parse_f64_safe(Some("n/a")), None);
        assert_eq!(parse_f64_safe(Some("")), None);
        assert_eq!(parse_f64_safe(None), None);
    }

    #[test]
    fn latin1_decoding_maps_bytes_to_code_points() {
        assert_eq!(decode_latin1(b"Universit\xe9"), "Universit\u{e9}");
        assert_eq!(decode_latin1(b"de\xc3\x9ened"), "de\u{c3}\u{9e}ned");
    }

    #[test]
    fn rounding_and_formatting() {
        assert_eq!(round_to(66.666_666, 2), 66.67);
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-12.5, 1), "-12.5");
        assert_eq!(format_number(0.0, 2), "0.00");
        assert_eq!(format_int(12045usize), "12,045");
        assert_eq!(format_score(Some(0.5)), "0.5");
        assert_eq!(format_score(None), "N/A");
    }
}
