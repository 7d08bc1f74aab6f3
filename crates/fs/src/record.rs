use std::ffi::OsString;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// One filesystem entry discovered during the walk.
///
/// Lives only for the duration of one row; the walk never aggregates
/// entries in memory.
#[derive(Debug)]
pub struct ScanEntry {
    pub full_path: PathBuf,
    /// Base name, kept as an `OsString` so entries with non-UTF-8 names
    /// still flow through the walk (they are dropped at render time).
    pub name: OsString,
    pub is_dir: bool,
    pub is_symlink: bool,
    pub meta: EntryMeta,
}

/// Outcome of the metadata read for one entry.
#[derive(Debug)]
pub enum EntryMeta {
    /// Metadata was read successfully.
    Stat(EntryStat),
    /// The entry's metadata exists but cannot be accessed. A degraded
    /// row is still emitted for it.
    PermissionDenied,
    /// The entry disappeared between the directory listing and the stat
    /// call. No row is emitted.
    Vanished,
}

#[derive(Debug)]
pub struct EntryStat {
    /// Byte size as reported by the filesystem (raw, including for
    /// directories; the manifest layer zeroes directory sizes).
    pub size: u64,
    /// Last modification time. Zero when unavailable.
    pub mtime: UnixTime,
    /// Status-change time on Unix, creation time elsewhere.
    pub ctime: UnixTime,
    /// Whether the current user may write to the entry.
    pub writable: bool,
}

/// A point in time as signed seconds plus nanoseconds since the UNIX
/// epoch.
///
/// Negative `secs` with `nanos` in `[0, 1e9)` follows the timespec
/// convention, so pre-1970 stamps stay representable all the way down
/// to the FILETIME epoch (1601).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnixTime {
    pub secs: i64,
    pub nanos: u32,
}

impl UnixTime {
    pub const ZERO: UnixTime = UnixTime { secs: 0, nanos: 0 };

    pub fn new(secs: i64, nanos: u32) -> UnixTime {
        UnixTime { secs, nanos }
    }

    pub fn from_system(t: SystemTime) -> UnixTime {
        match t.duration_since(UNIX_EPOCH) {
            Ok(d) => UnixTime {
                secs: d.as_secs() as i64,
                nanos: d.subsec_nanos(),
            },
            Err(e) => {
                let before = e.duration();
                let mut secs = -(before.as_secs() as i64);
                let mut nanos = before.subsec_nanos();
                if nanos > 0 {
                    secs -= 1;
                    nanos = 1_000_000_000 - nanos;
                }
                UnixTime { secs, nanos }
            }
        }
    }
}
