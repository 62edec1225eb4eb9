/// URL-safe slug: every run of non-alphanumeric characters becomes one hyphen,
/// the result is lowercased and stripped of leading/trailing hyphens.
///
/// Alphanumeric is Unicode-aware, so `"Café Crème"` becomes `"café-crème"`.
pub fn sluggify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;
    for ch in input.chars() {
        if ch.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::sluggify;

    #[test]
    fn punctuation_runs_collapse_to_single_hyphen() {
        assert_eq!(sluggify("Hello, World!"), "hello-world");
        assert_eq!(sluggify("a -- b"), "a-b");
    }

    #[test]
    fn leading_and_trailing_separators_are_dropped() {
        assert_eq!(sluggify("  ...Draft Idea?  "), "draft-idea");
    }

    #[test]
    fn unicode_letters_survive() {
        assert_eq!(sluggify("Café Crème"), "café-crème");
    }

    #[test]
    fn no_alphanumerics_yields_empty() {
        assert_eq!(sluggify("!!! ???"), "");
    }
}
