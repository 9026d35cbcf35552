/// Title-cases a string the way entity titles are displayed: a cased letter
/// is upper-cased when it starts a word and lower-cased otherwise. Anything
/// that is not a cased letter (digits, punctuation, spaces) starts a new word.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous_cased = false;
    for ch in input.chars() {
        let cased = ch.is_lowercase() || ch.is_uppercase();
        if cased {
            if previous_cased {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
        } else {
            out.push(ch);
        }
        previous_cased = cased;
    }
    out
}

/// Normalizes a user-typed topic or an entity title for display.
///
/// `"barack_obama"` and `"barack%20obama "` both become `"Barack Obama"`.
pub fn clean_keyword(input: &str) -> String {
    title_case(input)
        .replace('_', " ")
        .replace("%20", " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_words() {
        assert_eq!(title_case("hello wORLD"), "Hello World");
        assert_eq!(title_case("rust-lang"), "Rust-Lang");
        assert_eq!(title_case("o'neil"), "O'Neil");
    }

    #[test]
    fn test_title_case_digits_start_words() {
        assert_eq!(title_case("1st place"), "1St Place");
    }

    #[test]
    fn test_clean_keyword_underscores_and_encoded_spaces() {
        assert_eq!(clean_keyword("barack_obama"), "Barack Obama");
        assert_eq!(clean_keyword("  new%20york "), "New York");
        assert_eq!(clean_keyword("Paris"), "Paris");
    }

    #[test]
    fn test_clean_keyword_non_ascii() {
        assert_eq!(clean_keyword("élysée_palace"), "Élysée Palace");
    }

    #[test]
    fn test_clean_keyword_empty() {
        assert_eq!(clean_keyword("   "), "");
    }
}
