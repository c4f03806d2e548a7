//! Cell-level parsing for the fire log.
//!
//! BDIFF exports are produced by spreadsheet tools, so numbers may carry a
//! decimal comma, thousands separators, or a spurious `.0` suffix.

/// Parses a year cell (`2008` or `2008.0`).
#[must_use]
pub fn parse_year(s: &str) -> Option<i32> {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_suffix(".0").unwrap_or(trimmed);
    trimmed.parse().ok()
}

/// Parses a burned area in hectares.
///
/// Blank cells are missing values (`Ok(None)`). Both `.` and `,` are
/// accepted as decimal separator and spaces are ignored.
///
/// # Errors
///
/// Returns a description of the problem if the cell is not a finite,
/// non-negative number.
pub fn parse_hectares(s: &str) -> Result<Option<f64>, String> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return Ok(None);
    }

    let value: f64 = cleaned
        .parse()
        .map_err(|_| format!("invalid burned area {s:?}"))?;

    if !value.is_finite() || value < 0.0 {
        return Err(format!("burned area out of range: {s:?}"));
    }

    Ok(Some(value))
}

/// Returns the trimmed cell, or `None` when it is blank.
#[must_use]
pub fn parse_optional_text(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_years() {
        assert_eq!(parse_year("2008"), Some(2008));
        assert_eq!(parse_year(" 2008.0 "), Some(2008));
        assert_eq!(parse_year("deux mille"), None);
        assert_eq!(parse_year(""), None);
    }

    #[test]
    fn parses_decimal_separators() {
        assert_eq!(parse_hectares("1.5").unwrap(), Some(1.5));
        assert_eq!(parse_hectares("1,5").unwrap(), Some(1.5));
        assert_eq!(parse_hectares("1 234,5").unwrap(), Some(1234.5));
    }

    #[test]
    fn blank_area_is_missing() {
        assert_eq!(parse_hectares("").unwrap(), None);
        assert_eq!(parse_hectares("   ").unwrap(), None);
    }

    #[test]
    fn rejects_bad_areas() {
        assert!(parse_hectares("abc").is_err());
        assert!(parse_hectares("-3").is_err());
        assert!(parse_hectares("inf").is_err());
    }

    #[test]
    fn optional_text() {
        assert_eq!(parse_optional_text(" 12345 "), Some("12345".to_string()));
        assert_eq!(parse_optional_text(""), None);
    }
}
