use std::path::{MAIN_SEPARATOR, Path};

/// Convert a native absolute path into the root-relative, backslash
/// separated form the EFU format expects.
///
/// `path` must be a descendant of `root`; a trailing separator on
/// `root` is tolerated. Returns `None` when either path is not valid
/// UTF-8 and so cannot be rendered into the manifest.
pub fn windows_path(path: &Path, root: &Path) -> Option<String> {
    let path = path.to_str()?;
    let root = root.to_str()?;

    let root = root.trim_end_matches(MAIN_SEPARATOR);
    let rel = path.strip_prefix(root).unwrap_or(path);
    let rel = rel.trim_start_matches(MAIN_SEPARATOR);

    Some(rel.replace(MAIN_SEPARATOR, "\\"))
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
