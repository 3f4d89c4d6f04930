//! Theme identifier validation.

use regex::Regex;
use std::sync::OnceLock;

/// Regex pattern for valid theme names.
/// Format: starts with a lowercase letter, followed by up to 63 lowercase
/// letters, digits, underscores, or hyphens.
const THEME_NAME_PATTERN: &str = r"^[a-z][a-z0-9_-]{0,63}$";

static THEME_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

fn theme_name_regex() -> &'static Regex {
    THEME_NAME_REGEX.get_or_init(|| Regex::new(THEME_NAME_PATTERN).expect("invalid regex pattern"))
}

/// Checks if a theme name is a valid identifier.
///
/// Valid names are always a single safe path segment, so they can be used
/// directly as output and scratch file stems.
pub fn is_valid_theme_name(name: &str) -> bool {
    theme_name_regex().is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_theme_names() {
        assert!(is_valid_theme_name("operator"));
        assert!(is_valid_theme_name("map"));
        assert!(is_valid_theme_name("x"));
        assert!(is_valid_theme_name("night-shift_2"));
    }

    #[test]
    fn test_invalid_theme_names() {
        assert!(!is_valid_theme_name(""));
        assert!(!is_valid_theme_name("Operator"));
        assert!(!is_valid_theme_name("2tape"));
        assert!(!is_valid_theme_name("../tape"));
        assert!(!is_valid_theme_name("tape.ogg"));
        assert!(!is_valid_theme_name("sub/dir"));
        assert!(!is_valid_theme_name(&"a".repeat(65)));
    }
}
