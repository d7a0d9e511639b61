//! Extension allow-list check.
//!
//! The extension is the text after the last `.` of the final path segment.
//! A file without a dot yields its whole name, which no sane allow-list
//! contains. Comparison is exact and case-sensitive: `photo.JPG` passes only
//! if `"JPG"` is listed.

/// Extension of the last segment of `path`, or the whole segment if it has
/// no `.`.
pub fn extension(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.rsplit('.').next().unwrap_or(name)
}

/// True if the extension of `path` is listed in `allowed`.
pub fn is_authorized<S: AsRef<str>>(path: &str, allowed: &[S]) -> bool {
    let ext = extension(path);
    allowed.iter().any(|a| a.as_ref() == ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listed_extension_is_authorized() {
        assert!(is_authorized("filename.jpg", &["jpg", "png", "gif"]));
    }

    #[test]
    fn unlisted_extension_is_rejected() {
        assert!(!is_authorized("filename.jpeg", &["jpg", "png", "gif"]));
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert!(!is_authorized("photo.JPG", &["jpg"]));
        assert!(is_authorized("photo.JPG", &["jpg", "JPG"]));
    }

    #[test]
    fn only_last_dot_counts() {
        assert_eq!(extension("archive.tar.gz"), "gz");
        assert!(is_authorized("one/images/photo.min.png", &["png"]));
    }

    #[test]
    fn dots_in_directories_are_ignored() {
        assert_eq!(extension("v1.2/README"), "README");
        assert!(!is_authorized("v1.png/notes", &["png"]));
    }

    #[test]
    fn no_extension_yields_file_name() {
        assert_eq!(extension("images/Makefile"), "Makefile");
        assert!(!is_authorized("images/Makefile", &["jpg"]));
    }

    #[test]
    fn empty_allow_list_rejects_everything() {
        let none: &[String] = &[];
        assert!(!is_authorized("a.png", none));
    }
}
