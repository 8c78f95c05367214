//! Utility functions and helpers

/// Format the integer part of a number with thousands separators.
///
/// Any sign and fractional part are kept as given: `-1234.5` becomes `-1,234.5`.
pub fn format_number<T: ToString>(n: T) -> String {
    let s = n.to_string();
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (int_part, frac_part) = match rest.find('.') {
        Some(pos) => rest.split_at(pos),
        None => (rest, ""),
    };

    let mut result = String::new();
    let mut count = 0;
    for c in int_part.chars().rev() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    let grouped: String = result.chars().rev().collect();
    format!("{}{}{}", sign, grouped, frac_part)
}

/// Escape text for safe inclusion in HTML bodies and quoted attributes
pub fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
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

/// Attach a currency glyph to a raw amount.
///
/// The amount text is not parsed or rounded.
pub fn format_amount(amount: &str, symbol: &str, symbol_before: bool) -> String {
    if symbol_before {
        format!("{}{}", symbol, amount)
    } else {
        format!("{} {}", amount, symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(-1234.5), "-1,234.5");
        assert_eq!(format_number("650.00"), "650.00");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>alert('x')</script> & \"q\""),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; &quot;q&quot;"
        );
        assert_eq!(escape_html("Nike"), "Nike");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount("200", "$", true), "$200");
        assert_eq!(format_amount("12.5", "€", false), "12.5 €");
        assert_eq!(format_amount("", "$", true), "$");
    }
}
