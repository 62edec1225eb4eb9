/// Rich markup → lightweight markup. Implementations must be pure: equal input,
/// equal output.
pub trait Converter: Send + Sync {
    fn to_markdown(&self, html: &str) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Html2MdConverter;

impl Converter for Html2MdConverter {
    fn to_markdown(&self, html: &str) -> String {
        html2md::parse_html(html)
    }
}

/// Collapse leftover non-breaking spaces (escaped or literal) and trim.
pub fn finish_markdown(markdown: &str) -> String {
    markdown
        .replace("&nbsp;", " ")
        .replace('\u{a0}', " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::finish_markdown;

    #[test]
    fn nbsp_escapes_and_chars_become_spaces() {
        assert_eq!(finish_markdown("\n a&nbsp;b\u{a0}c \n"), "a b c");
    }
}
