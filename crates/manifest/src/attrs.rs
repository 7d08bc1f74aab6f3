use bitflags::bitflags;

bitflags! {
    /// The subset of DOS file attribute bits the EFU format carries.
    ///
    /// Ref: https://learn.microsoft.com/en-us/windows/win32/fileio/file-attribute-constants
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FileAttributes: u32 {
        const READONLY  = 0x0000_0001;
        const HIDDEN    = 0x0000_0002;
        const DIRECTORY = 0x0000_0010;
    }
}

/// Map POSIX conventions onto the DOS attribute bits: dotfiles are
/// hidden, entries the current user cannot write are read-only.
pub fn derive_attributes(name: &str, is_dir: bool, writable: bool) -> FileAttributes {
    let mut attrs = FileAttributes::empty();

    if name.starts_with('.') {
        attrs.insert(FileAttributes::HIDDEN);
    }
    if !writable {
        attrs.insert(FileAttributes::READONLY);
    }
    if is_dir {
        attrs.insert(FileAttributes::DIRECTORY);
    }

    attrs
}

#[cfg(test)]
#[path = "attrs_tests.rs"]
mod tests;
