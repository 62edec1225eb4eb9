//! WordPress-style auto-paragraph: blank-line separated text becomes `<p>`
//! blocks and single newlines become `<br />`. Block-level markup is left
//! unwrapped and `<pre>` contents are never touched.

use std::sync::LazyLock;

use regex::Regex;

const ALL_BLOCKS: &str = "(?:table|thead|tfoot|caption|col|colgroup|tbody|tr|td|th|div|dl|dd|dt|ul|ol|li|pre|form|map|area|blockquote|address|math|style|p|h[1-6]|hr|fieldset|legend|section|article|aside|hgroup|header|footer|nav|figure|figcaption|details|menu|summary)";

static PRE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<pre[\s>].*?</pre>").expect("static regex"));
static BLOCK_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)(<{ALL_BLOCKS}[\s/>])")).expect("static regex"));
static BLOCK_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)(</{ALL_BLOCKS}>)")).expect("static regex"));
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("static regex"));
static EXTRA_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\n+").expect("static regex"));
static EMPTY_P: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<p>\s*</p>").expect("static regex"));
static P_AROUND_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)<p>\s*(</?{ALL_BLOCKS}[^>]*>)\s*</p>")).expect("static regex")
});
static P_BEFORE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)<p>\s*(</?{ALL_BLOCKS}[^>]*>)")).expect("static regex")
});
static P_AFTER_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)(</?{ALL_BLOCKS}[^>]*>)\s*</p>")).expect("static regex")
});
static BR_AFTER_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)(</?{ALL_BLOCKS}[^>]*>)\s*<br />")).expect("static regex")
});
static BR_BEFORE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br />(\s*</?(?:p|li|div|dl|dd|dt|th|pre|td|ul|ol)[^>]*>)")
        .expect("static regex")
});

pub fn autop(html: &str) -> String {
    let normalized = html.replace("\r\n", "\n").replace('\r', "\n");
    if normalized.trim().is_empty() {
        return String::new();
    }

    // Park <pre> blocks behind placeholders so nothing below rewrites them.
    let mut parked = Vec::new();
    let text = PRE_BLOCK.replace_all(&normalized, |caps: &regex::Captures<'_>| {
        let placeholder = format!("<pre wp-pre-tag-{}></pre>", parked.len());
        parked.push(caps[0].to_string());
        placeholder
    });

    let text = BLOCK_OPEN.replace_all(&text, "\n\n$1");
    let text = BLOCK_CLOSE.replace_all(&text, "$1\n\n");
    let text = EXTRA_NEWLINES.replace_all(&text, "\n\n");

    let mut out = String::with_capacity(text.len() + 64);
    for block in PARAGRAPH_BREAK.split(text.trim()) {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }
        out.push_str("<p>");
        out.push_str(&line_breaks(block));
        out.push_str("</p>\n");
    }

    let out = EMPTY_P.replace_all(&out, "");
    let out = P_AROUND_BLOCK.replace_all(&out, "$1");
    let out = out
        .replace("<p><blockquote>", "<blockquote><p>")
        .replace("</blockquote></p>", "</p></blockquote>");
    let out = P_BEFORE_BLOCK.replace_all(&out, "$1");
    let out = P_AFTER_BLOCK.replace_all(&out, "$1");
    let out = BR_AFTER_BLOCK.replace_all(&out, "$1");
    let mut out = BR_BEFORE_BLOCK.replace_all(&out, "$1").into_owned();

    for (index, original) in parked.iter().enumerate() {
        out = out.replace(&format!("<pre wp-pre-tag-{index}></pre>"), original);
    }
    out
}

/// Single newlines inside a paragraph become `<br />` unless one is already there.
fn line_breaks(block: &str) -> String {
    let mut joined = String::with_capacity(block.len());
    let mut lines = block.lines().map(str::trim_end).peekable();
    while let Some(line) = lines.next() {
        joined.push_str(line);
        if lines.peek().is_some() {
            if !line.ends_with("<br />") && !line.ends_with("<br>") {
                joined.push_str("<br />");
            }
            joined.push('\n');
        }
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::autop;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_lines_split_paragraphs() {
        assert_eq!(autop("First\n\nSecond"), "<p>First</p>\n<p>Second</p>\n");
    }

    #[test]
    fn single_newline_becomes_br() {
        assert_eq!(autop("a\nb"), "<p>a<br />\nb</p>\n");
    }

    #[test]
    fn block_elements_are_not_wrapped() {
        let out = autop("<div>inside</div>\n\nafter");
        assert!(!out.contains("<p><div>"), "{out}");
        assert!(out.contains("<div>inside</div>"), "{out}");
        assert!(out.contains("<p>after</p>"), "{out}");
    }

    #[test]
    fn inline_markup_is_wrapped() {
        assert_eq!(
            autop("<strong>bold</strong> text"),
            "<p><strong>bold</strong> text</p>\n"
        );
    }

    #[test]
    fn pre_contents_survive_untouched() {
        let out = autop("Intro\n\n<pre>line 1\n\nline 2</pre>");
        assert!(out.contains("<pre>line 1\n\nline 2</pre>"), "{out}");
        assert!(out.contains("<p>Intro</p>"), "{out}");
        assert!(!out.contains("<p><pre>"), "{out}");
    }

    #[test]
    fn whitespace_only_input_is_empty() {
        assert_eq!(autop(" \n\n "), "");
    }
}
