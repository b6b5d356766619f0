//! Markup helpers shared by every flow renderer

/// Escape text for use in element content and double-quoted attributes
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

/// Escaped text, or `-` when blank
#[must_use]
pub fn or_dash(text: Option<&str>) -> String {
    match text {
        Some(value) if !value.is_empty() => escape(value),
        _ => "-".to_string(),
    }
}

/// `<img>` tag, only when a URL is present
#[must_use]
pub fn image(src: Option<&str>, alt: &str, width: u32) -> String {
    match src {
        Some(url) if !url.is_empty() => format!(
            r#"<img src="{}" alt="{}" width="{width}" />"#,
            escape(url),
            escape(alt)
        ),
        _ => String::new(),
    }
}

/// Group digits in thousands, `47351567` -> `47,351,567`
#[must_use]
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("Grifo · Ñandú"), "Grifo · Ñandú");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("")), "-");
        assert_eq!(or_dash(Some("Gryffindor")), "Gryffindor");
    }

    #[test]
    fn test_image_omitted_without_url() {
        assert_eq!(image(None, "x", 10), "");
        assert_eq!(image(Some(""), "x", 10), "");
        assert_eq!(
            image(Some("https://img/a.png"), "A & B", 120),
            r#"<img src="https://img/a.png" alt="A &amp; B" width="120" />"#
        );
    }

    #[rstest]
    #[case(0, "0")]
    #[case(999, "999")]
    #[case(1000, "1,000")]
    #[case(47351567, "47,351,567")]
    #[case(1402112000, "1,402,112,000")]
    fn test_thousands(#[case] value: u64, #[case] expected: &str) {
        assert_eq!(thousands(value), expected);
    }
}
