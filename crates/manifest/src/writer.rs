use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

use log::{debug, warn};

use efulist_fs::{EntryMeta, ScanEntry, Walker};
use efulist_runtime::{manifest_path, temp_path};

use crate::{attrs::derive_attributes, path::windows_path, time::windows_time};

const HEADER_FIELDS: [&str; 5] = [
    "Filename",
    "Size",
    "Date Modified",
    "Date Created",
    "Attributes",
];

/// The reference tool's CSV dialect terminates records with CRLF on
/// every platform.
const LINE_TERMINATOR: &str = "\r\n";

/// Scan one root and publish `<root>/.everything_index.efu`.
///
/// Rows are streamed to a `-scanning` sibling while the walk runs; only
/// a fully written manifest is renamed over the published path. On any
/// whole-scan I/O failure the temp file is left in place for inspection
/// and the previously published manifest stays untouched.
pub fn scan_root(root: &Path) -> io::Result<()> {
    let temp = temp_path(root);
    let published = manifest_path(root);

    debug!("[scan] {} -> {}", root.display(), published.display());

    let file = File::create(&temp)?;
    let mut out = BufWriter::new(file);

    write_header(&mut out)?;

    let mut rows = 0u64;
    for entry in Walker::new(root) {
        // Our own output files would make back-to-back scans of an
        // unchanged tree produce different manifests.
        if entry.full_path == temp || entry.full_path == published {
            continue;
        }
        if write_row(&mut out, root, &entry)? {
            rows += 1;
        }
    }

    // The handle must be closed before the rename publishes the file.
    let file = out.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp, &published)?;
    debug!("[scan] published {} ({rows} rows)", published.display());

    Ok(())
}

/// Header fields are rendered unquoted, unlike data rows. The reference
/// tool's own exports have this asymmetry and consumers expect it.
fn write_header(out: &mut impl Write) -> io::Result<()> {
    write!(out, "{}{}", HEADER_FIELDS.join(","), LINE_TERMINATOR)
}

/// Emit one data row. Returns false when the entry is dropped (vanished
/// mid-walk, or its name cannot be rendered).
fn write_row(out: &mut impl Write, root: &Path, entry: &ScanEntry) -> io::Result<bool> {
    let (size, modified, created, writable) = match &entry.meta {
        EntryMeta::Stat(stat) => (
            if entry.is_dir { 0 } else { stat.size },
            windows_time(stat.mtime.secs, stat.mtime.nanos),
            windows_time(stat.ctime.secs, stat.ctime.nanos),
            stat.writable,
        ),
        EntryMeta::PermissionDenied => {
            debug!("[scan] metadata denied for {:?}, degraded row", entry.full_path);
            (0, 0, 0, false)
        }
        EntryMeta::Vanished => return Ok(false),
    };

    let Some(rel) = windows_path(&entry.full_path, root) else {
        warn!("[scan] dropping unencodable entry {:?}", entry.full_path);
        return Ok(false);
    };

    let attrs = derive_attributes(&entry.name.to_string_lossy(), entry.is_dir, writable);

    write!(
        out,
        "{},{size},{modified},{created},{}{LINE_TERMINATOR}",
        quote(&rel),
        attrs.bits()
    )?;

    Ok(true)
}

/// Quote a non-numeric field, doubling any embedded quotes.
fn quote(field: &str) -> String {
    let mut quoted = String::with_capacity(field.len() + 2);
    quoted.push('"');
    for ch in field.chars() {
        if ch == '"' {
            quoted.push('"');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
