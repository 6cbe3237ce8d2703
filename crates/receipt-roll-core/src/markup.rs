//! Checks and edits applied to receipt HTML before conversion.

use std::sync::LazyLock;

use regex::{Match, Regex};

use crate::error::{Error, Result};

#[allow(clippy::expect_used)] // literal pattern, checked by the tests below
static BODY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<body.*?>").expect("body tag pattern is valid"));

/// Shown above the receipt when no license is present
pub const UNLICENSED_BANNER: &str = "<center><b>UNLICENSED</b><br>This receipt was rendered without a license.<br></center><hr>";

fn body_tag(html: &str) -> Result<Match<'_>> {
    BODY_TAG
        .find(html)
        .ok_or_else(|| Error::InvalidMarkup("<body> tag not present in the input html".to_string()))
}

/// Fail unless the markup has an opening `<body>` tag.
pub fn ensure_body(html: &str) -> Result<()> {
    body_tag(html).map(|_| ())
}

/// Insert `fragment` right after the opening `<body>` tag.
pub fn insert_after_body(html: &str, fragment: &str) -> Result<String> {
    let end = body_tag(html)?.end();

    let mut out = String::with_capacity(html.len() + fragment.len());
    out.push_str(&html[..end]);
    out.push_str(fragment);
    out.push_str(&html[end..]);
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_body_found_case_insensitive_with_attributes() {
        assert!(ensure_body("<html><BODY class=\"r\">x</BODY></html>").is_ok());
    }

    #[test]
    fn test_body_tag_may_span_lines() {
        assert!(ensure_body("<body\n  style=\"margin:0\"\n>x</body>").is_ok());
    }

    #[test]
    fn test_missing_body_rejected() {
        let result = ensure_body("<html><p>Total 12.00</p></html>");
        assert!(matches!(result, Err(Error::InvalidMarkup(_))));
    }

    #[test]
    fn test_insert_after_first_body_only() {
        let html = "<body bgcolor=white><p>a</p></body><body>";
        let out = insert_after_body(html, "<hr>").unwrap();
        assert_eq!(out, "<body bgcolor=white><hr><p>a</p></body><body>");
    }
}
