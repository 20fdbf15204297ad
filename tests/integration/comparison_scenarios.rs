//! End-to-end comparison scenarios on real directory trees

use super::test_utils::{compare, compare_with, set_mtime, write_file, TreePair, FIXED_MTIME};
use std::ffi::OsStr;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::{symlink, PermissionsExt};
use treecmp::compare::attributes::format_mtime;
use treecmp::compare::TreeComparison;
use treecmp::exclude::ExclusionRules;

/// Identical trees report nothing
#[test]
fn test_identical_trees_report_nothing() {
    let pair = TreePair::new();
    pair.write_both("a/file1", "x");
    pair.write_both("a/b/c/deep", "deep content");
    pair.write_both("top", "");
    symlink("a/file1", pair.left_path().join("link")).unwrap();
    symlink("a/file1", pair.right_path().join("link")).unwrap();
    pair.freeze();

    let (left, right) = pair.trees();
    let (text, summary) = compare_with(&TreeComparison::new(&left, &right, &ExclusionRules::default()));

    assert_eq!(text, "");
    assert!(!summary.has_differences());
}

/// Same size, different content: only the checksum differs
#[test]
fn test_content_change_same_size() {
    let pair = TreePair::new();
    write_file(pair.left_path(), "a/file1", "x");
    write_file(pair.right_path(), "a/file1", "y");
    for root in [pair.left_path(), pair.right_path()] {
        fs::set_permissions(root.join("a/file1"), fs::Permissions::from_mode(0o644)).unwrap();
    }
    pair.freeze();

    let (left, right) = pair.trees();
    assert_eq!(
        compare(&left, &right, &ExclusionRules::default()),
        "file a/file1 differs\nA: checksum\nB: checksum\n"
    );
}

/// Different lengths report size before checksum
#[test]
fn test_content_change_different_size() {
    let pair = TreePair::new();
    write_file(pair.left_path(), "a/file1", "x");
    write_file(pair.right_path(), "a/file1", "yy");
    pair.freeze();

    let (left, right) = pair.trees();
    assert_eq!(
        compare(&left, &right, &ExclusionRules::default()),
        "file a/file1 differs\nA: size=1, checksum\nB: size=2, checksum\n"
    );
}

/// A type mismatch reports the type only, and mismatched directories are not entered
#[test]
fn test_type_mismatch_short_circuits() {
    let pair = TreePair::new();
    write_file(pair.left_path(), "x", "file");
    write_file(pair.right_path(), "x/inner", "never compared");
    pair.freeze();

    let (left, right) = pair.trees();
    assert_eq!(
        compare(&left, &right, &ExclusionRules::default()),
        "file x differs\nA:      type=file\nB: type=directory\n"
    );
}

/// Symlinks compare by target only
#[test]
fn test_symlink_target_difference() {
    let pair = TreePair::new();
    symlink("/a", pair.left_path().join("link")).unwrap();
    symlink("/b", pair.right_path().join("link")).unwrap();

    let (left, right) = pair.trees();
    assert_eq!(
        compare(&left, &right, &ExclusionRules::default()),
        "symbolic_link link differs\nA: target=/a\nB: target=/b\n"
    );
}

/// Symlinks pointing to a directory are not followed
#[test]
fn test_symlink_to_directory_not_descended() {
    let pair = TreePair::new();
    write_file(pair.left_path(), "real/file", "left");
    write_file(pair.right_path(), "real/file", "left");
    symlink("real", pair.left_path().join("alias")).unwrap();
    symlink("real", pair.right_path().join("alias")).unwrap();
    write_file(pair.left_path(), "real/extra", "only here");
    pair.freeze();

    let (left, right) = pair.trees();
    assert_eq!(
        compare(&left, &right, &ExclusionRules::default()),
        "only in A: file real/extra\n"
    );
}

#[test]
fn test_mode_difference() {
    let pair = TreePair::new();
    pair.write_both("f", "same");
    fs::set_permissions(pair.left_path().join("f"), fs::Permissions::from_mode(0o644)).unwrap();
    fs::set_permissions(pair.right_path().join("f"), fs::Permissions::from_mode(0o600)).unwrap();
    pair.freeze();

    let (left, right) = pair.trees();
    assert_eq!(
        compare(&left, &right, &ExclusionRules::default()),
        "file f differs\nA: mode=-rw-r--r--\nB: mode=-rw-------\n"
    );
}

/// A pure mtime difference is reported unless ignored
#[test]
fn test_pure_mtime_difference() {
    let pair = TreePair::new();
    pair.write_both("f", "same");
    pair.freeze();
    set_mtime(&pair.right_path().join("f"), FIXED_MTIME + 3600);

    let (left, right) = pair.trees();
    let rules = ExclusionRules::default();

    assert_eq!(
        compare(&left, &right, &rules),
        format!(
            "file f differs\nA: mtime={}\nB: mtime={}\n",
            format_mtime(FIXED_MTIME),
            format_mtime(FIXED_MTIME + 3600)
        )
    );

    let ignoring = TreeComparison::new(&left, &right, &rules).ignore_mtime_only(true);
    let (text, summary) = compare_with(&ignoring);
    assert_eq!(text, "");
    assert_eq!(summary.differing, 0);
}

/// Ignoring pure mtime differences keeps content changes
#[test]
fn test_ignore_mtime_keeps_content_change() {
    let pair = TreePair::new();
    write_file(pair.left_path(), "f", "one");
    write_file(pair.right_path(), "f", "two");
    pair.freeze();
    set_mtime(&pair.right_path().join("f"), FIXED_MTIME + 60);

    let (left, right) = pair.trees();
    let rules = ExclusionRules::default();
    let ignoring = TreeComparison::new(&left, &right, &rules).ignore_mtime_only(true);

    let (text, _) = compare_with(&ignoring);
    assert!(text.starts_with("file f differs\n"));
    assert!(text.contains("mtime="));
    assert!(text.contains("checksum"));
}

/// Modified after the right tree's cutoff: every difference is suppressed
#[test]
fn test_threshold_suppresses_whole_diff() {
    let pair = TreePair::new();
    write_file(pair.left_path(), "f", "old");
    write_file(pair.right_path(), "f", "rewritten later");
    pair.freeze();
    set_mtime(&pair.right_path().join("f"), FIXED_MTIME + 100);

    let (left, right) = pair.trees();
    let right = right.with_mtime_threshold(Some(FIXED_MTIME + 50));

    assert_eq!(compare(&left, &right, &ExclusionRules::default()), "");
}

/// The threshold does not apply when the entry was not modified after it
#[test]
fn test_threshold_not_reached() {
    let pair = TreePair::new();
    write_file(pair.left_path(), "f", "old");
    write_file(pair.right_path(), "f", "new");
    pair.freeze();
    set_mtime(&pair.right_path().join("f"), FIXED_MTIME + 100);

    let (left, right) = pair.trees();
    let right = right.with_mtime_threshold(Some(FIXED_MTIME + 100));

    let text = compare(&left, &right, &ExclusionRules::default());
    assert!(text.starts_with("file f differs\n"));
    assert!(text.contains("checksum"));
}

/// Precomposed and decomposed spellings of a name pair up
#[test]
fn test_unicode_composition_variants_match() {
    let pair = TreePair::new();
    write_file(pair.left_path(), "cafe\u{0301}", "menu");
    write_file(pair.right_path(), "caf\u{e9}", "menu");
    pair.freeze();

    let (left, right) = pair.trees();
    assert_eq!(compare(&left, &right, &ExclusionRules::default()), "");
}

/// Compatibility variants are different names
#[test]
fn test_compatibility_variants_stay_distinct() {
    let pair = TreePair::new();
    write_file(pair.left_path(), "a\u{a0}b", "x");
    write_file(pair.right_path(), "a b", "x");
    pair.freeze();

    let (left, right) = pair.trees();
    assert_eq!(
        compare(&left, &right, &ExclusionRules::default()),
        "only in B: file a b\nonly in A: file a\u{a0}b\n"
    );
}

/// Names that are not valid UTF-8 are matched by their raw bytes
#[test]
fn test_distinct_invalid_utf8_names_not_paired() {
    let pair = TreePair::new();
    fs::write(pair.left_path().join(OsStr::from_bytes(b"x\xff")), "same").unwrap();
    fs::write(pair.right_path().join(OsStr::from_bytes(b"x\xfe")), "same").unwrap();
    fs::write(pair.left_path().join(OsStr::from_bytes(b"y\x80")), "shared").unwrap();
    fs::write(pair.right_path().join(OsStr::from_bytes(b"y\x80")), "shared").unwrap();
    pair.freeze();

    let (left, right) = pair.trees();
    assert_eq!(
        compare(&left, &right, &ExclusionRules::default()),
        "only in B: file x\\xfe\nonly in A: file x\\xff\n"
    );
}

/// Running twice over unchanged trees gives identical bytes
#[test]
fn test_comparison_is_idempotent() {
    let pair = TreePair::new();
    write_file(pair.left_path(), "a/x", "1");
    write_file(pair.right_path(), "a/x", "22");
    write_file(pair.left_path(), "b", "only left");
    write_file(pair.right_path(), "c/d", "only right");
    symlink("/t1", pair.left_path().join("l")).unwrap();
    symlink("/t2", pair.right_path().join("l")).unwrap();
    pair.freeze();

    let (left, right) = pair.trees();
    let rules = ExclusionRules::default();
    let first = compare(&left, &right, &rules);
    let second = compare(&left, &right, &rules);

    assert!(!first.is_empty());
    assert_eq!(first, second);
}
