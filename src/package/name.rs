/// Check that a package name only uses the allowed charset: `[0-9a-z_+-]`.
///
/// This says nothing about whether the package exists in any repository.
pub fn is_valid_package_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '+' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["zlib", "gtk+3", "python-3_12", "libx11", "0ad"] {
            assert!(is_valid_package_name(name), "{} should be valid", name);
        }
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", "Zlib", "foo bar", "foo/bar", "../etc", "päckage", "foo;bar"] {
            assert!(!is_valid_package_name(name), "{:?} should be invalid", name);
        }
    }
}
