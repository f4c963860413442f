/// Derives the URL-safe slug for a task description: lowercased ASCII
/// alphanumerics, every other run of characters collapsed to one hyphen,
/// no leading or trailing hyphen.
pub fn slugify(description: &str) -> String {
    let mut slug = String::with_capacity(description.len());
    let mut pending_hyphen = false;
    for ch in description.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Buy milk"), "buy-milk");
        assert_eq!(slugify("Call Mom at 5PM"), "call-mom-at-5pm");
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(slugify("Don't forget: the keys!"), "don-t-forget-the-keys");
        assert_eq!(slugify("  leading & trailing  "), "leading-trailing");
    }

    #[test]
    fn collapses_runs_to_one_hyphen() {
        assert_eq!(slugify("a --- b"), "a-b");
        assert_eq!(slugify("a...b"), "a-b");
    }

    #[test]
    fn drops_non_ascii() {
        assert_eq!(slugify("Café ☕ time"), "caf-time");
        assert_eq!(slugify("日本語"), "");
    }

    #[test]
    fn punctuation_only_yields_empty() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }
}
