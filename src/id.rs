//! Identity canonicalization for crate entities
//!
//! Maps raw source strings (local paths or URIs) onto the crate's internal
//! ID convention: forward slashes everywhere, a single trailing slash on
//! local dataset IDs, none on file IDs, and remote URIs left untouched.

use url::Url;

/// Replace backslash path separators with forward slashes
pub fn normalize_separators(raw: &str) -> String {
    raw.replace('\\', "/")
}

/// Check whether an ID is an absolute URI with a scheme
///
/// Single-character schemes are rejected so Windows drive prefixes
/// ("C:/data") classify as local paths.
pub fn is_remote_id(id: &str) -> bool {
    match Url::parse(id) {
        Ok(url) => url.scheme().len() > 1,
        Err(_) => false,
    }
}

/// Canonical ID for a file source: no trailing slash
pub fn canonical_file_id(raw: &str) -> String {
    let id = normalize_separators(raw);
    if is_remote_id(&id) {
        return id;
    }
    id.trim_end_matches('/').to_string()
}

/// Canonical ID for a dataset source: exactly one trailing slash,
/// unless the source is a remote URI
pub fn canonical_dataset_id(raw: &str) -> String {
    let id = normalize_separators(raw);
    if id.is_empty() || is_remote_id(&id) {
        return id;
    }
    format!("{}/", id.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_remote_id() {
        assert!(is_remote_id("https://workflowhub.eu/workflows/471?version=1"));
        assert!(is_remote_id("http://example.org"));
        assert!(is_remote_id("urn:uuid:1234"));

        assert!(!is_remote_id("./"));
        assert!(!is_remote_id("a/b"));
        assert!(!is_remote_id("#person1"));
        assert!(!is_remote_id("ro-crate-metadata.json"));
        // Drive letters are paths, not schemes
        assert!(!is_remote_id("C:/data/file.txt"));
    }

    #[test]
    fn test_canonical_dataset_id_appends_slash() {
        assert_eq!(canonical_dataset_id("a/b"), "a/b/");
        assert_eq!(canonical_dataset_id("a/b/"), "a/b/");
    }

    #[test]
    fn test_canonical_dataset_id_is_unix_path() {
        assert_eq!(canonical_dataset_id("a\\b"), "a/b/");
        assert_eq!(canonical_dataset_id("dataset\\test\\path"), "dataset/test/path/");
    }

    #[test]
    fn test_canonical_dataset_id_remote_untouched() {
        assert_eq!(
            canonical_dataset_id("https://workflowhub.eu/workflows/471?version=1"),
            "https://workflowhub.eu/workflows/471?version=1"
        );
        assert_eq!(canonical_dataset_id("https://x/y"), "https://x/y");
    }

    #[test]
    fn test_canonical_file_id() {
        assert_eq!(canonical_file_id("data.csv"), "data.csv");
        assert_eq!(canonical_file_id("data.csv/"), "data.csv");
        assert_eq!(canonical_file_id("sub\\data.csv"), "sub/data.csv");
        assert_eq!(
            canonical_file_id("https://example.org/data.csv"),
            "https://example.org/data.csv"
        );
    }

    #[test]
    fn test_canonicalization_is_idempotent() {
        for raw in ["a/b", "a\\b", "https://x/y", "./"] {
            let once = canonical_dataset_id(raw);
            assert_eq!(canonical_dataset_id(&once), once);
        }
        for raw in ["data.csv", "sub\\data.csv", "https://x/y"] {
            let once = canonical_file_id(raw);
            assert_eq!(canonical_file_id(&once), once);
        }
    }

    #[test]
    fn test_root_id_round_trips() {
        assert_eq!(canonical_dataset_id("./"), "./");
    }
}
