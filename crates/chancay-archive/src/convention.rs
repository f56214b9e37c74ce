//! Path convention for day-file entries.

/// Normalizes path separators to forward slashes.
///
/// ZIP archives produced on Windows carry backslash-separated entry
/// names; both styles must match the same convention.
#[must_use]
pub fn normalize_separators(name: &str) -> String {
    name.replace('\\', "/")
}

/// Returns true if a normalized entry name is a day file under an
/// `lday` directory segment.
#[must_use]
pub fn is_day_entry(normalized: &str) -> bool {
    normalized.ends_with(".day") && normalized.contains("/lday/")
}

/// Returns the base filename of a normalized entry name
/// (e.g., `sh/lday/sh600000.day` -> `sh600000.day`).
#[must_use]
pub fn entry_basename(normalized: &str) -> &str {
    normalized.rsplit('/').next().unwrap_or(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_separators() {
        assert_eq!(
            normalize_separators(r"vipdoc\sh\lday\sh600000.day"),
            "vipdoc/sh/lday/sh600000.day"
        );
        assert_eq!(
            normalize_separators("vipdoc/sh/lday/sh600000.day"),
            "vipdoc/sh/lday/sh600000.day"
        );
    }

    #[test]
    fn test_is_day_entry() {
        assert!(is_day_entry("vipdoc/sh/lday/sh600000.day"));
        assert!(is_day_entry("sz/lday/sz000001.day"));
        // Wrong directory segment.
        assert!(!is_day_entry("vipdoc/sh/minline/sh600000.day"));
        // Wrong suffix.
        assert!(!is_day_entry("vipdoc/sh/lday/sh600000.dat"));
        // Directory entry, not a file.
        assert!(!is_day_entry("vipdoc/sh/lday/"));
    }

    #[test]
    fn test_entry_basename() {
        assert_eq!(entry_basename("vipdoc/sh/lday/sh600000.day"), "sh600000.day");
        assert_eq!(entry_basename("sh600000.day"), "sh600000.day");
    }
}
