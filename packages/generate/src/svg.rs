//! Small helpers shared by the SVG and HTML writers.

/// Escapes text for use in XML/HTML content and attribute values.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Formats a number for display: integers without a fraction, other values
/// with at most two decimals.
#[must_use]
pub fn format_number(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{value:.0}")
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<a href="x">L'Escale & co</a>"#),
            "&lt;a href=&quot;x&quot;&gt;L&#39;Escale &amp; co&lt;/a&gt;"
        );
    }

    #[test]
    fn formats_numbers() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(3.75), "3.75");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(12.346), "12.35");
        assert_eq!(format_number(2.001), "2");
    }
}
