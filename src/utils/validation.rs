//! Centralized validation and helper functions.

use std::path::{Component, Path};

/// Maximum length of a length-prefixed string in an index header (DOS protection)
pub const MAX_HEADER_STRING_LENGTH: usize = 64 * 1024;

/// Maximum size of an alias file that will be read for metadata
pub const MAX_ALIAS_FILE_SIZE: u64 = 1024 * 1024;

/// Check that a length-prefixed header string is within bounds.
///
/// Returns an error message if the declared length exceeds the maximum,
/// None if safe to read.
///
/// # Example
/// ```ignore
/// if let Some(msg) = check_header_string_length(len) {
///     return Err(ParseError::InvalidFormat(msg));
/// }
/// ```
#[must_use]
pub fn check_header_string_length(len: usize) -> Option<String> {
    if len > MAX_HEADER_STRING_LENGTH {
        Some(format!(
            "String of {len} bytes exceeds maximum of {MAX_HEADER_STRING_LENGTH}"
        ))
    } else {
        None
    }
}

/// Check that an alias file is small enough to read.
#[must_use]
pub fn check_alias_file_size(size: u64) -> Option<String> {
    if size > MAX_ALIAS_FILE_SIZE {
        Some(format!(
            "Alias file of {size} bytes exceeds maximum of {MAX_ALIAS_FILE_SIZE}"
        ))
    } else {
        None
    }
}

/// Build a catalog identifier from a path relative to the scan root.
///
/// Components are joined with `/` regardless of platform. Returns None if the
/// path is empty, escapes the root, or is not valid UTF-8.
///
/// # Examples
///
/// ```
/// use seqserver::utils::validation::identifier_from_relative;
/// use std::path::Path;
///
/// assert_eq!(
///     identifier_from_relative(Path::new("proteins/ants")).as_deref(),
///     Some("proteins/ants")
/// );
/// assert_eq!(identifier_from_relative(Path::new("../ants")), None);
/// assert_eq!(identifier_from_relative(Path::new("")), None);
/// ```
#[must_use]
pub fn identifier_from_relative(relative: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            _ => return None,
        }
    }

    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

/// Whether a configuration value should be treated as absent.
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_string_limit() {
        assert!(check_header_string_length(0).is_none());
        assert!(check_header_string_length(MAX_HEADER_STRING_LENGTH).is_none());
        assert!(check_header_string_length(MAX_HEADER_STRING_LENGTH + 1).is_some());
    }

    #[test]
    fn test_alias_file_limit() {
        assert!(check_alias_file_size(512).is_none());
        assert!(check_alias_file_size(MAX_ALIAS_FILE_SIZE + 1).is_some());
    }

    #[test]
    fn test_identifier_from_relative() {
        assert_eq!(
            identifier_from_relative(Path::new("a/b/c.subset")).as_deref(),
            Some("a/b/c.subset")
        );
        assert_eq!(
            identifier_from_relative(Path::new("./nested/db")).as_deref(),
            Some("nested/db")
        );
        assert_eq!(identifier_from_relative(Path::new("/abs/db")), None);
        assert_eq!(identifier_from_relative(Path::new("a/../b")), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_identifier_rejects_non_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"db\xff");
        assert_eq!(identifier_from_relative(Path::new(name)), None);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("  \t"));
        assert!(!is_blank("/db"));
    }
}
