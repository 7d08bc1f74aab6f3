use std::{
    fs::{self, Metadata},
    io::ErrorKind,
    path::{Path, PathBuf},
    time::SystemTime,
};

use log::warn;

use crate::record::{EntryMeta, EntryStat, ScanEntry, UnixTime};

/// Depth-first, pull-based traversal of a directory tree.
///
/// Yields one `ScanEntry` per file or directory strictly below the
/// root; the root itself is never yielded. Symlinks are reported but
/// never followed. Directories that cannot be listed are logged and
/// skipped; the walk itself never fails.
pub struct Walker {
    start: Option<PathBuf>,
    stack: Vec<fs::ReadDir>,
}

impl Walker {
    pub fn new(root: impl Into<PathBuf>) -> Walker {
        Walker {
            start: Some(root.into()),
            stack: Vec::new(),
        }
    }

    fn push_dir(&mut self, dir: &Path) {
        match fs::read_dir(dir) {
            Ok(rd) => self.stack.push(rd),
            Err(e) => warn!("[walk] read_dir({:?}) failed: {e}", dir),
        }
    }
}

impl Iterator for Walker {
    type Item = ScanEntry;

    fn next(&mut self) -> Option<ScanEntry> {
        if let Some(root) = self.start.take() {
            self.push_dir(&root);
        }

        loop {
            let rd = self.stack.last_mut()?;
            match rd.next() {
                None => {
                    self.stack.pop();
                }
                Some(Err(e)) => {
                    warn!("[walk] error reading entry: {e}");
                }
                Some(Ok(entry)) => {
                    let outcome = inspect_entry(&entry);
                    if should_recurse(&outcome) {
                        let dir = outcome.full_path.clone();
                        self.push_dir(&dir);
                    }
                    return Some(outcome);
                }
            }
        }
    }
}

fn should_recurse(e: &ScanEntry) -> bool {
    e.is_dir && !e.is_symlink
}

fn inspect_entry(entry: &fs::DirEntry) -> ScanEntry {
    let full_path = entry.path();
    let name = entry.file_name();

    // d_type from the listing, as a fallback when the stat itself fails.
    let listed_type = entry.file_type().ok();

    // DirEntry::metadata does not traverse symlinks (lstat semantics).
    let (meta, metadata) = match entry.metadata() {
        Ok(md) => {
            let stat = EntryStat {
                size: md.len(),
                mtime: to_unix(md.modified().ok()),
                ctime: ctime_of(&md),
                writable: is_writable(&full_path),
            };
            (EntryMeta::Stat(stat), Some(md))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => (EntryMeta::Vanished, None),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => (EntryMeta::PermissionDenied, None),
        Err(e) => {
            warn!("[walk] stat({:?}) failed: {e}", full_path);
            (EntryMeta::Vanished, None)
        }
    };

    let (is_dir, is_symlink) = match (&metadata, listed_type) {
        (Some(md), _) => (md.is_dir(), md.is_symlink()),
        (None, Some(ft)) => (ft.is_dir(), ft.is_symlink()),
        (None, None) => (false, false),
    };

    ScanEntry {
        full_path,
        name,
        is_dir,
        is_symlink,
        meta,
    }
}

fn to_unix(t: Option<SystemTime>) -> UnixTime {
    t.map(UnixTime::from_system).unwrap_or(UnixTime::ZERO)
}

#[cfg(unix)]
fn ctime_of(md: &Metadata) -> UnixTime {
    use std::os::unix::fs::MetadataExt;

    UnixTime::new(md.ctime(), md.ctime_nsec().clamp(0, 999_999_999) as u32)
}

#[cfg(not(unix))]
fn ctime_of(md: &Metadata) -> UnixTime {
    to_unix(md.created().ok())
}

#[cfg(unix)]
fn is_writable(path: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(cpath) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // access(2) checks the effective user, like the original tool's
    // writability probe.
    unsafe { libc::access(cpath.as_ptr(), libc::W_OK) == 0 }
}

#[cfg(not(unix))]
fn is_writable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|md| !md.permissions().readonly())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
