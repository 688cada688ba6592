//! Behaviour of the host filesystem implementation

#![cfg(unix)]

use pretty_assertions::assert_eq;
use rstest::rstest;
use snaptree_fs::{Error, Filesystem, LocalFs, NodeKind, Timestamp};
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs::{self, File, FileTimes, Permissions};
use std::os::unix::fs::{MetadataExt, PermissionsExt, symlink};
use std::path::Path;
use std::time::{Duration, UNIX_EPOCH};
use tempfile::tempdir;

fn set_mtime(path: &Path, secs: u64) {
    let time = UNIX_EPOCH + Duration::from_secs(secs);
    File::open(path)
        .unwrap()
        .set_times(FileTimes::new().set_modified(time).set_accessed(time))
        .unwrap();
}

#[test]
fn stat_missing_path_is_none() {
    let dir = tempdir().unwrap();
    let fs = LocalFs::new();

    assert_eq!(fs.stat(&dir.path().join("absent")).unwrap(), None);
    assert!(!fs.exists(&dir.path().join("absent")).unwrap());
}

#[test]
fn stat_below_a_file_is_none() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("file");
    fs::write(&file, "x").unwrap();

    assert_eq!(LocalFs::new().stat(&file.join("child")).unwrap(), None);
}

#[test]
fn dangling_symlink_exists() {
    let dir = tempdir().unwrap();
    let link = dir.path().join("link");
    symlink(dir.path().join("nowhere"), &link).unwrap();

    let node = LocalFs::new().stat(&link).unwrap().unwrap();

    assert_eq!(node.kind, NodeKind::Symlink);
}

#[test]
fn stat_existing_reports_not_found() {
    let dir = tempdir().unwrap();
    let err = LocalFs::new()
        .stat_existing(&dir.path().join("absent"))
        .unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
}

#[test]
fn list_child_names_is_a_set_of_names() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), "").unwrap();
    fs::create_dir(dir.path().join("b")).unwrap();
    fs::write(dir.path().join("b/nested"), "").unwrap();

    let names = LocalFs::new().list_child_names(dir.path()).unwrap();

    let expected: HashSet<OsString> = ["a", "b"].into_iter().map(OsString::from).collect();
    assert_eq!(names, expected);
}

#[test]
fn copy_entry_preserves_content_mode_and_mtime() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let dest = dir.path().join("dest");
    fs::write(&src, "payload").unwrap();
    fs::set_permissions(&src, Permissions::from_mode(0o640)).unwrap();
    set_mtime(&src, 1_000_000);

    let fs_impl = LocalFs::new();
    fs_impl.copy_entry(&src, &dest).unwrap();

    let src_node = fs_impl.stat_existing(&src).unwrap();
    let dest_node = fs_impl.stat_existing(&dest).unwrap();
    assert_eq!(fs::read_to_string(&dest).unwrap(), "payload");
    assert_eq!(dest_node.mode, src_node.mode);
    assert_eq!(dest_node.mtime, Timestamp::new(1_000_000, 0));
    assert_ne!(dest_node.ino, src_node.ino);
}

#[test]
fn copy_entry_recreates_symlink_without_following() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("link");
    let dest = dir.path().join("copy");
    symlink("relative/target", &src).unwrap();

    LocalFs::new().copy_entry(&src, &dest).unwrap();

    assert!(fs::symlink_metadata(&dest).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_link(&dest).unwrap(), Path::new("relative/target"));
}

#[test]
fn copy_entry_rejects_directories() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("dir");
    fs::create_dir(&src).unwrap();

    let err = LocalFs::new()
        .copy_entry(&src, &dir.path().join("dest"))
        .unwrap_err();

    assert!(matches!(err, Error::UnsupportedFileType { .. }));
}

#[test]
fn copy_metadata_stamps_directory() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let dest = dir.path().join("dest");
    fs::create_dir(&src).unwrap();
    fs::create_dir(&dest).unwrap();
    fs::set_permissions(&src, Permissions::from_mode(0o750)).unwrap();
    set_mtime(&src, 42);

    let fs_impl = LocalFs::new();
    fs_impl.copy_metadata(&src, &dest).unwrap();

    let dest_node = fs_impl.stat_existing(&dest).unwrap();
    assert_eq!(dest_node.permissions(), 0o750);
    assert_eq!(dest_node.mtime, Timestamp::new(42, 0));
}

#[test]
fn set_permissions_changes_mode_bits_only() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("locked");
    fs::create_dir(&target).unwrap();
    set_mtime(&target, 42);

    let fs_impl = LocalFs::new();
    fs_impl.set_permissions(&target, 0o555).unwrap();

    let node = fs_impl.stat_existing(&target).unwrap();
    assert_eq!(node.permissions(), 0o555);
    assert_eq!(node.mtime, Timestamp::new(42, 0));
    fs_impl.set_permissions(&target, 0o755).unwrap();
}

#[test]
fn hard_link_shares_inode() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    let dest = dir.path().join("dest");
    fs::write(&src, "shared").unwrap();

    LocalFs::new().hard_link(&src, &dest).unwrap();

    assert_eq!(
        fs::metadata(&src).unwrap().ino(),
        fs::metadata(&dest).unwrap().ino()
    );
}

#[test]
fn set_ownership_to_current_owner_succeeds() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("file");
    fs::write(&file, "").unwrap();
    let meta = fs::metadata(&file).unwrap();

    LocalFs::new()
        .set_ownership(&file, meta.uid(), meta.gid())
        .unwrap();
}

#[rstest]
#[case::file(false)]
#[case::tree(true)]
fn remove_leaves_nothing_behind(#[case] as_tree: bool) {
    let dir = tempdir().unwrap();
    let target = dir.path().join("target");
    let fs_impl = LocalFs::new();
    if as_tree {
        fs::create_dir_all(target.join("a/b")).unwrap();
        fs::write(target.join("a/b/c"), "").unwrap();
        fs_impl.remove_tree(&target).unwrap();
    } else {
        fs::write(&target, "").unwrap();
        fs_impl.remove_file(&target).unwrap();
    }

    assert!(!fs_impl.exists(&target).unwrap());
}

#[test]
fn create_dir_without_parent_is_io_error_with_path() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("missing/child");

    let err = LocalFs::new().create_dir(&nested).unwrap_err();

    match err {
        Error::Io { path, .. } => assert_eq!(path, nested),
        other => panic!("Expected Io error, got {:?}", other),
    }
}
