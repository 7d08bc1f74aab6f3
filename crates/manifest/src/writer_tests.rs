use super::*;

use std::fs::{create_dir, read_to_string, write};

use filetime::{FileTime, set_file_mtime};
use tempfile::tempdir;

use efulist_runtime::{manifest_path, temp_path};

const EPOCH_FILETIME: &str = "116444736000000000";

fn manifest_lines(root: &Path) -> Vec<String> {
    let text = read_to_string(manifest_path(root)).expect("read manifest");
    assert!(text.ends_with("\r\n"), "manifest must end with CRLF");
    text.split("\r\n")
        .filter(|l| !l.is_empty())
        .map(str::to_owned)
        .collect()
}

fn find_row<'a>(lines: &'a [String], filename_field: &str) -> &'a str {
    lines
        .iter()
        .find(|l| l.starts_with(&format!("{filename_field},")))
        .unwrap_or_else(|| panic!("no row starting with {filename_field:?} in {lines:?}"))
}

#[test]
fn quote_wraps_and_doubles_embedded_quotes() {
    assert_eq!(quote("sub\\f.txt"), "\"sub\\f.txt\"");
    assert_eq!(quote("we\"ird"), "\"we\"\"ird\"");
    assert_eq!(quote(""), "\"\"");
}

#[test]
fn end_to_end_tree_matches_reference_rows() {
    let tmp = tempdir().expect("create temp dir");
    let root = tmp.path();

    create_dir(root.join("sub")).expect("create sub");
    write(root.join("sub").join("f.txt"), b"12345").expect("write f.txt");

    let epoch = FileTime::from_unix_time(0, 0);
    set_file_mtime(root.join("sub").join("f.txt"), epoch).expect("set file mtime");
    set_file_mtime(root.join("sub"), epoch).expect("set dir mtime");

    scan_root(root).expect("scan");

    let lines = manifest_lines(root);
    assert_eq!(
        lines[0],
        "Filename,Size,Date Modified,Date Created,Attributes"
    );
    assert_eq!(lines.len(), 3);

    let dir_row: Vec<&str> = find_row(&lines, "\"sub\"").split(',').collect();
    assert_eq!(dir_row[1], "0");
    assert_eq!(dir_row[2], EPOCH_FILETIME);
    assert_eq!(dir_row[4], "16");

    let file_row: Vec<&str> = find_row(&lines, "\"sub\\f.txt\"").split(',').collect();
    assert_eq!(file_row[1], "5");
    assert_eq!(file_row[2], EPOCH_FILETIME);
    assert_eq!(file_row[4], "0");

    // ctime cannot be pinned from userspace; it must still be a plausible
    // FILETIME at or after the UNIX epoch.
    let created: u64 = file_row[3].parse().expect("numeric created field");
    assert!(created >= 116_444_736_000_000_000);
}

#[test]
fn header_stays_unquoted_while_data_rows_quote_filenames() {
    let tmp = tempdir().expect("create temp dir");
    let root = tmp.path();

    write(root.join("a,b.txt"), b"x").expect("write a,b.txt");

    scan_root(root).expect("scan");

    let lines = manifest_lines(root);
    assert_eq!(
        lines[0],
        "Filename,Size,Date Modified,Date Created,Attributes"
    );
    assert!(
        lines[1].starts_with("\"a,b.txt\","),
        "data row must quote the filename: {:?}",
        lines[1]
    );
}

#[test]
fn hidden_and_directory_bits_appear_in_rows() {
    let tmp = tempdir().expect("create temp dir");
    let root = tmp.path();

    write(root.join(".dotfile"), b"x").expect("write dotfile");
    create_dir(root.join(".dotdir")).expect("create dotdir");

    scan_root(root).expect("scan");

    let lines = manifest_lines(root);

    let file_row: Vec<&str> = find_row(&lines, "\".dotfile\"").split(',').collect();
    assert_eq!(file_row[4], "2");

    let dir_row: Vec<&str> = find_row(&lines, "\".dotdir\"").split(',').collect();
    assert_eq!(dir_row[4], "18");
}

#[test]
fn vanished_entries_produce_no_row() {
    use std::ffi::OsString;
    use std::path::PathBuf;

    let entry = ScanEntry {
        full_path: PathBuf::from("/r/ghost.txt"),
        name: OsString::from("ghost.txt"),
        is_dir: false,
        is_symlink: false,
        meta: EntryMeta::Vanished,
    };

    let mut out = Vec::new();
    let written = write_row(&mut out, Path::new("/r"), &entry).expect("write_row");

    assert!(!written, "a vanished entry must not count as a row");
    assert!(out.is_empty(), "nothing may be written for it: {out:?}");
}

#[test]
fn pre_epoch_mtimes_survive_into_the_manifest() {
    let tmp = tempdir().expect("create temp dir");
    let root = tmp.path();

    write(root.join("old.txt"), b"x").expect("write old.txt");
    set_file_mtime(root.join("old.txt"), FileTime::from_unix_time(-1000, 0))
        .expect("set mtime");

    scan_root(root).expect("scan");

    let lines = manifest_lines(root);
    let row: Vec<&str> = find_row(&lines, "\"old.txt\"").split(',').collect();
    // 1000 s before the UNIX epoch, still within the FILETIME domain.
    assert_eq!(row[2], "116444726000000000");
}

#[test]
fn rescanning_an_unchanged_tree_is_byte_identical() {
    let tmp = tempdir().expect("create temp dir");
    let root = tmp.path();

    create_dir(root.join("sub")).expect("create sub");
    write(root.join("sub").join("f.txt"), b"abc").expect("write f.txt");
    write(root.join("top.txt"), b"defg").expect("write top.txt");

    scan_root(root).expect("first scan");
    let first = read_to_string(manifest_path(root)).expect("read first manifest");

    scan_root(root).expect("second scan");
    let second = read_to_string(manifest_path(root)).expect("read second manifest");

    assert_eq!(first, second);
}

#[test]
fn own_output_files_are_not_indexed() {
    let tmp = tempdir().expect("create temp dir");
    let root = tmp.path();

    write(root.join("data.bin"), b"x").expect("write data.bin");

    scan_root(root).expect("first scan");
    scan_root(root).expect("second scan");

    let lines = manifest_lines(root);
    assert_eq!(lines.len(), 2, "only header and data.bin: {lines:?}");
    assert!(lines[1].starts_with("\"data.bin\","));
}

#[test]
fn stale_temp_file_is_truncated_and_replaced() {
    let tmp = tempdir().expect("create temp dir");
    let root = tmp.path();

    write(root.join("f"), b"x").expect("write f");
    write(temp_path(root), b"left over from a killed scan").expect("write stale temp");

    scan_root(root).expect("scan");

    assert!(!temp_path(root).exists(), "temp must be renamed away");
    let lines = manifest_lines(root);
    assert_eq!(
        lines[0],
        "Filename,Size,Date Modified,Date Created,Attributes"
    );
}

#[cfg(unix)]
#[test]
fn failed_scan_leaves_previous_manifest_untouched() {
    use std::fs::set_permissions;
    use std::os::unix::fs::PermissionsExt;

    if unsafe { libc::geteuid() } == 0 {
        return;
    }

    let tmp = tempdir().expect("create temp dir");
    let root = tmp.path();

    write(root.join("f"), b"x").expect("write f");
    scan_root(root).expect("initial scan");
    let before = read_to_string(manifest_path(root)).expect("read manifest");

    // No write permission on the root: the temp file cannot be opened.
    set_permissions(root, std::fs::Permissions::from_mode(0o500)).expect("chmod root");
    let result = scan_root(root);
    set_permissions(root, std::fs::Permissions::from_mode(0o755)).expect("restore perms");

    assert!(result.is_err(), "scan must report the open failure");
    let after = read_to_string(manifest_path(root)).expect("read manifest");
    assert_eq!(before, after);
}

#[cfg(unix)]
#[test]
fn permission_denied_metadata_yields_degraded_row() {
    use std::fs::set_permissions;
    use std::os::unix::fs::PermissionsExt;

    if unsafe { libc::geteuid() } == 0 {
        return;
    }

    let tmp = tempdir().expect("create temp dir");
    let root = tmp.path();

    let locked = root.join("locked");
    create_dir(&locked).expect("create locked");
    write(locked.join("secret.txt"), b"cannot stat me").expect("write secret");
    set_permissions(&locked, std::fs::Permissions::from_mode(0o400)).expect("chmod locked");

    scan_root(root).expect("scan");
    set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).expect("restore perms");

    let lines = manifest_lines(root);
    let row = find_row(&lines, "\"locked\\secret.txt\"");
    // Zeroed size and timestamps, READONLY from assumed-unwritable.
    assert_eq!(row, "\"locked\\secret.txt\",0,0,0,1");
}

#[cfg(unix)]
#[test]
fn non_utf8_names_are_dropped_without_failing_the_scan() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let tmp = tempdir().expect("create temp dir");
    let root = tmp.path();

    write(root.join("good.txt"), b"ok").expect("write good.txt");
    write(root.join(OsStr::from_bytes(b"bad\xff")), b"x").expect("write bad name");

    scan_root(root).expect("scan");

    let lines = manifest_lines(root);
    assert_eq!(lines.len(), 2, "header plus the one encodable row: {lines:?}");
    assert!(lines[1].starts_with("\"good.txt\","));
}
