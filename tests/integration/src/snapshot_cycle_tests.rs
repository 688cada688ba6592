//! Successive snapshots of a live tree, the way a backup job takes them.
//!
//! Each snapshot is a merge of the previous snapshot (reference) and the
//! live tree (single source). Unchanged files end up as hard links into the
//! previous snapshot; changed ones are taken from the live tree.

use pretty_assertions::assert_eq;
use snaptree_core::preconditions::check_merge;
use snaptree_core::{ComparisonOptions, Engine, Recorder, RunReport};
use snaptree_fs::LocalFs;
use snaptree_test_utils::TestTree;

fn snapshot(tree: &TestTree, previous: &str, next: &str, sources: &[&str]) -> RunReport {
    let fs = LocalFs::new();
    let options = ComparisonOptions::default();
    let sources: Vec<_> = sources.iter().map(|rel| tree.path(rel)).collect();
    let (reference, dest) = (tree.path(previous), tree.path(next));

    check_merge(&fs, &reference, &dest, &sources, &options).unwrap();
    let mut recorder = Recorder::new();
    Engine::new(&fs, &options, &mut recorder)
        .merge(&reference, &dest, &sources)
        .unwrap();
    recorder.into_report()
}

/// Write a new file in place of the old one, leaving other links intact.
fn save(tree: &TestTree, rel: &str, content: &str, secs: u64) {
    std::fs::remove_file(tree.path(rel)).unwrap();
    tree.file_with_mtime(rel, content, secs);
}

fn live(tree: &TestTree) {
    tree.file_with_mtime("live/notes.txt", "monday", 1_000);
    tree.file_with_mtime("live/photos/cat.jpg", "meow", 1_000);
    tree.file_with_mtime("live/photos/dog.jpg", "woof", 1_000);
    tree.symlink("live/latest", "photos/dog.jpg");
    tree.dir("snaps");
}

#[test]
fn first_snapshot_captures_live_tree() {
    let tree = TestTree::new();
    live(&tree);

    let report = snapshot(&tree, "snaps/0", "snaps/1", &["live"]);

    assert!(!report.has_conflicts());
    assert_eq!(tree.listing("snaps/1"), tree.listing("live"));
}

#[test]
fn unchanged_files_are_shared_between_snapshots() {
    let tree = TestTree::new();
    live(&tree);
    snapshot(&tree, "snaps/0", "snaps/1", &["live"]);
    save(&tree, "live/notes.txt", "tuesday", 2_000);

    let report = snapshot(&tree, "snaps/1", "snaps/2", &["live"]);

    assert!(!report.has_conflicts());
    assert_eq!(tree.inode("snaps/2/photos/cat.jpg"), tree.inode("snaps/1/photos/cat.jpg"));
    assert_eq!(tree.read("snaps/2/notes.txt"), "tuesday");
    assert_eq!(tree.read("snaps/1/notes.txt"), "monday");
}

#[test]
fn deletions_and_additions_show_up_in_next_snapshot_only() {
    let tree = TestTree::new();
    live(&tree);
    snapshot(&tree, "snaps/0", "snaps/1", &["live"]);
    std::fs::remove_file(tree.path("live/photos/dog.jpg")).unwrap();
    tree.file_with_mtime("live/photos/bird.jpg", "tweet", 3_000);

    snapshot(&tree, "snaps/1", "snaps/2", &["live"]);

    tree.assert_absent("snaps/2/photos/dog.jpg");
    tree.assert_exists("snaps/1/photos/dog.jpg");
    assert_eq!(tree.read("snaps/2/photos/bird.jpg"), "tweet");
    tree.assert_absent("snaps/1/photos/bird.jpg");
}

#[test]
fn restoring_a_snapshot_reproduces_it() {
    let tree = TestTree::new();
    live(&tree);
    snapshot(&tree, "snaps/0", "snaps/1", &["live"]);
    save(&tree, "live/notes.txt", "wednesday", 4_000);
    snapshot(&tree, "snaps/1", "snaps/2", &["live"]);

    let report = snapshot(&tree, "snaps/1", "restored", &[]);

    assert!(!report.has_conflicts());
    assert_eq!(tree.listing("restored"), tree.listing("snaps/1"));
    assert_eq!(tree.read("restored/notes.txt"), "monday");
}

#[test]
fn two_live_trees_with_disjoint_edits_merge_cleanly() {
    let tree = TestTree::new();
    live(&tree);
    snapshot(&tree, "snaps/0", "snaps/1", &["live"]);
    // A second machine starts from the same snapshot
    snapshot(&tree, "snaps/1", "laptop", &[]);
    save(&tree, "live/notes.txt", "desktop edit", 5_000);
    save(&tree, "laptop/photos/cat.jpg", "purr", 5_000);

    let report = snapshot(&tree, "snaps/1", "snaps/2", &["live", "laptop"]);

    assert!(!report.has_conflicts());
    assert_eq!(tree.read("snaps/2/notes.txt"), "desktop edit");
    assert_eq!(tree.read("snaps/2/photos/cat.jpg"), "purr");
    assert_eq!(tree.read("snaps/2/photos/dog.jpg"), "woof");
}

#[test]
fn same_file_edited_on_both_machines_is_reported() {
    let tree = TestTree::new();
    live(&tree);
    snapshot(&tree, "snaps/0", "snaps/1", &["live"]);
    snapshot(&tree, "snaps/1", "laptop", &[]);
    save(&tree, "live/notes.txt", "desktop edit", 5_000);
    save(&tree, "laptop/notes.txt", "laptop edit!", 6_000);

    let report = snapshot(&tree, "snaps/1", "snaps/2", &["live", "laptop"]);

    assert_eq!(report.conflicts.len(), 1);
    assert_eq!(report.conflicts[0].reference, tree.path("snaps/1/notes.txt"));
    tree.assert_absent("snaps/2/notes.txt");
    tree.assert_exists("snaps/2/photos/cat.jpg");
}
