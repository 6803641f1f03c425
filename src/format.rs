//! Display Formatting
//!
//! Currency, axis and label formatting shared by the browser dashboard and
//! the terminal client. Formatting is locale-independent: two decimals and
//! `,` thousands separators, prefixed with the peso sign.

use chrono::NaiveTime;
use regex::{Captures, Regex};

/// Currency symbol prefixed to every money value
pub const CURRENCY: &str = "₱";

/// Insert `,` thousands separators into a numeric string.
///
/// Every run of digits is grouped in threes from its right end. A run that
/// directly follows a letter or `_` also gets a separator in front when its
/// length is a multiple of three. Two-digit fractions like `.89` stay
/// untouched.
///
/// ```
/// use storefront_dashboard::format::number_with_commas;
///
/// assert_eq!(number_with_commas("1234567.89"), "1,234,567.89");
/// assert_eq!(number_with_commas("0.00"), "0.00");
/// ```
pub fn number_with_commas(input: &str) -> String {
    let Ok(digits) = Regex::new(r"[0-9]+") else {
        return input.to_string();
    };

    digits
        .replace_all(input, |caps: &Captures| {
            let run = &caps[0];
            let start = caps.get(0).map_or(0, |m| m.start());
            let after_word = input[..start].chars().next_back().map_or(false, is_word_char);

            let mut out = String::with_capacity(run.len() + run.len() / 3 + 1);
            for (i, c) in run.chars().enumerate() {
                let remaining = run.len() - i;
                if remaining % 3 == 0 && (i > 0 || after_word) {
                    out.push(',');
                }
                out.push(c);
            }
            out
        })
        .into_owned()
}

/// Word character as in a JS regex `\w` (ASCII letters, digits, `_`)
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Fixed-point string with two decimals
pub fn fixed2(value: f64) -> String {
    format!("{:.2}", value)
}

/// `₱1,234.50`
pub fn peso(value: f64) -> String {
    format!("{}{}", CURRENCY, number_with_commas(&fixed2(value)))
}

/// Y-axis tick label in thousands, e.g. `₱2.5k`
pub fn thousands_tick(value: f64) -> String {
    format!("{}{}k", CURRENCY, value / 1000.0)
}

/// Rounded percentage share of `value` in `total` (0 when total is 0)
pub fn percentage_share(value: f64, total: f64) -> i64 {
    if total == 0.0 {
        return 0;
    }
    (value / total * 100.0).round() as i64
}

/// Tooltip for one point of a line series: `This Week: ₱1,200.00`
pub fn series_tooltip(label: &str, value: Option<f64>) -> String {
    let mut text = String::new();
    if !label.is_empty() {
        text.push_str(label);
        text.push_str(": ");
    }
    if let Some(v) = value {
        text.push_str(&peso(v));
    }
    text
}

/// Tooltip for one doughnut segment: `Memory: ₱15,000.00 (15%)`
pub fn segment_tooltip(label: &str, value: f64, total: f64) -> String {
    format!(
        "{}: {} ({}%)",
        label,
        peso(value),
        percentage_share(value, total)
    )
}

/// `Last updated: 14:05:09`
pub fn last_updated_label(time: NaiveTime) -> String {
    format!("Last updated: {}", time.format("%H:%M:%S"))
}

/// Escape text for interpolation into HTML markup
pub fn escape_html(text: &str) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_with_commas() {
        assert_eq!(number_with_commas("1234567.89"), "1,234,567.89");
        assert_eq!(number_with_commas("0.00"), "0.00");
        assert_eq!(number_with_commas("999.99"), "999.99");
        assert_eq!(number_with_commas("1000.00"), "1,000.00");
        assert_eq!(number_with_commas("-1234.50"), "-1,234.50");
        assert_eq!(number_with_commas("12345"), "12,345");
        assert_eq!(number_with_commas(""), "");
    }

    #[test]
    fn test_number_with_commas_long_fraction() {
        // Digit groups after the point are grouped too
        assert_eq!(number_with_commas("1234.5678"), "1,234.5,678");
    }

    #[test]
    fn test_number_with_commas_after_letter() {
        assert_eq!(number_with_commas("SKU123"), "SKU,123");
        assert_eq!(number_with_commas("SKU-123"), "SKU-123");
        assert_eq!(number_with_commas("x1234"), "x1,234");
    }

    #[test]
    fn test_peso() {
        assert_eq!(peso(1234567.891), "₱1,234,567.89");
        assert_eq!(peso(0.0), "₱0.00");
        assert_eq!(peso(12500.0), "₱12,500.00");
    }

    #[test]
    fn test_thousands_tick() {
        assert_eq!(thousands_tick(2500.0), "₱2.5k");
        assert_eq!(thousands_tick(10000.0), "₱10k");
        assert_eq!(thousands_tick(0.0), "₱0k");
    }

    #[test]
    fn test_tooltips() {
        assert_eq!(series_tooltip("This Week", Some(1200.0)), "This Week: ₱1,200.00");
        assert_eq!(series_tooltip("", Some(5.0)), "₱5.00");
        assert_eq!(series_tooltip("Last Week", None), "Last Week: ");
        assert_eq!(
            segment_tooltip("Memory", 15000.0, 100000.0),
            "Memory: ₱15,000.00 (15%)"
        );
        assert_eq!(percentage_share(1.0, 0.0), 0);
        assert_eq!(percentage_share(1.0, 3.0), 33);
    }

    #[test]
    fn test_last_updated_label() {
        let time = NaiveTime::from_hms_opt(9, 5, 7).unwrap();
        assert_eq!(last_updated_label(time), "Last updated: 09:05:07");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }
}
