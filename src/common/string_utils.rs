//! String utility functions for deriving environment defaults from the app name.

/// Capitalize the first letter of every whitespace-separated word
///
/// Non-word characters inside a word (hyphens, underscores) are left alone, so
/// "my-app" becomes "My-app" and "my blog app" becomes "My Blog App".
pub fn title_case_words(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut at_word_start = true;
    for c in name.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            result.push(c);
        } else if at_word_start {
            at_word_start = false;
            result.extend(c.to_uppercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Derive a database name from the app name
///
/// Lowercases the name and normalizes separators (hyphens and spaces) to
/// underscores, so "My-Blog App" becomes "my_blog_app".
pub fn database_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_words() {
        assert_eq!(title_case_words("my-app"), "My-app");
        assert_eq!(title_case_words("my blog app"), "My Blog App");
        assert_eq!(title_case_words("APP"), "APP");
        assert_eq!(title_case_words(""), "");
    }

    #[test]
    fn test_title_case_preserves_whitespace() {
        assert_eq!(title_case_words("my  app"), "My  App");
    }

    #[test]
    fn test_database_name() {
        assert_eq!(database_name("my-app"), "my_app");
        assert_eq!(database_name("My-Blog App"), "my_blog_app");
        assert_eq!(database_name("shop"), "shop");
    }
}
