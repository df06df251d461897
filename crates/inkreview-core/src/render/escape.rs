//! HTML escaping for server-supplied text

use std::fmt;

/// HTML that is safe to insert into the page
///
/// Only produced by escaping text or by rendering one of the crate's
/// templates, so untrusted text cannot reach the DOM without passing
/// through [`escape_html`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub(crate) fn trusted(html: impl Into<String>) -> Self {
        Markup(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Markup {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub fn escape_html(text: &str) -> Markup {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    Markup(escaped)
}

/// Escape `text` and turn its line breaks into `<br>`
///
/// Both real newlines and the two-character sequence `\n` count as line
/// breaks: the service sometimes double-encodes text it got from the model.
pub fn format_multiline(text: &str) -> Markup {
    if text.is_empty() {
        return Markup::default();
    }
    let escaped = escape_html(text).into_string();
    Markup(escaped.replace("\\n", "<br>").replace('\n', "<br>"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_escape_html_basic() {
        assert_eq!(escape_html("hello").as_str(), "hello");
        assert_eq!(escape_html("<script>").as_str(), "&lt;script&gt;");
        assert_eq!(escape_html("a & b").as_str(), "a &amp; b");
        assert_eq!(
            escape_html(r#"say "hi" & 'bye'"#).as_str(),
            "say &quot;hi&quot; &amp; &#39;bye&#39;"
        );
    }

    #[test]
    fn test_escape_keeps_korean() {
        assert_eq!(escape_html("대상문구").as_str(), "대상문구");
    }

    #[test]
    fn test_format_multiline_escapes_before_breaking() {
        assert_eq!(
            format_multiline("<b>line1\nline2").as_str(),
            "&lt;b&gt;line1<br>line2"
        );
    }

    #[test]
    fn test_format_multiline_literal_backslash_n() {
        assert_eq!(format_multiline(r"one\ntwo").as_str(), "one<br>two");
        assert_eq!(format_multiline("one\\n\ntwo").as_str(), "one<br><br>two");
    }

    #[test]
    fn test_format_multiline_empty() {
        assert!(format_multiline("").is_empty());
    }

    proptest! {
        #[test]
        fn escaped_text_has_no_raw_markup(s in ".*") {
            let escaped = escape_html(&s);
            prop_assert!(!escaped.as_str().contains('<'));
            prop_assert!(!escaped.as_str().contains('>'));
            prop_assert!(!escaped.as_str().contains('"'));
        }

        #[test]
        fn multiline_only_emits_br_tags(s in ".*") {
            let formatted = format_multiline(&s).into_string();
            let stripped = formatted.replace("<br>", "");
            prop_assert!(!stripped.contains('<'));
            prop_assert!(!stripped.contains('>'));
        }

        #[test]
        fn escape_preserves_safe_text(s in "[a-zA-Z0-9 .,가-힣]{0,64}") {
            prop_assert_eq!(escape_html(&s).into_string(), s);
        }
    }
}
