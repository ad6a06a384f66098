use std::fs;
use std::path::{Path, PathBuf};

use mirrorcheck::{audit, AuditError, IgnoreSet, WriterSink};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Create a source tree and a mirror that carries only part of it.
///
/// Structure:
/// ```
/// tmp/
///   src/
///     report.txt
///     notes.md
///     lost.txt            (not on mirror)
///     photos/
///       a.jpg
///       b.jpg             (not on mirror)
///     gone/               (not on mirror)
///       one.txt
///       nested/
///         two.txt
///   smb/
///     report.txt
///     notes.md
///     photos/
///       a.jpg
/// ```
fn setup_trees() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    let smb = dir.path().join("smb");

    for root in [&src, &smb] {
        fs::create_dir_all(root.join("photos")).unwrap();
        fs::write(root.join("report.txt"), "quarterly report").unwrap();
        fs::write(root.join("notes.md"), "some notes").unwrap();
        fs::write(root.join("photos").join("a.jpg"), "jpeg").unwrap();
    }

    fs::write(src.join("lost.txt"), "only in source").unwrap();
    fs::write(src.join("photos").join("b.jpg"), "jpeg").unwrap();
    fs::create_dir_all(src.join("gone").join("nested")).unwrap();
    fs::write(src.join("gone").join("one.txt"), "1").unwrap();
    fs::write(src.join("gone").join("nested").join("two.txt"), "2").unwrap();

    dir
}

fn roots(dir: &tempfile::TempDir) -> (PathBuf, PathBuf) {
    (dir.path().join("src"), dir.path().join("smb"))
}

fn sorted(paths: Vec<PathBuf>) -> Vec<String> {
    let mut out: Vec<String> = paths
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    out.sort();
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn reports_entries_missing_from_mirror() {
    let dir = setup_trees();
    let (src, smb) = roots(&dir);

    let results = audit().source(src).mirror(smb).collect().unwrap();

    assert_eq!(
        sorted(results.missing),
        vec![
            "/gone",
            "/gone/nested",
            "/gone/nested/two.txt",
            "/gone/one.txt",
            "/lost.txt",
            "/photos/b.jpg",
        ]
    );
    assert_eq!(results.stats.missing, 6);
    assert_eq!(results.stats.unresolved, 1);
}

#[test]
fn parent_reported_before_its_children() {
    let dir = setup_trees();
    let (src, smb) = roots(&dir);

    let missing = audit().source(src).mirror(smb).collect().unwrap().missing;
    let pos = |p: &str| missing.iter().position(|m| m == Path::new(p)).unwrap();

    assert!(pos("/gone") < pos("/gone/one.txt"));
    assert!(pos("/gone") < pos("/gone/nested"));
    assert!(pos("/gone/nested") < pos("/gone/nested/two.txt"));
}

#[test]
fn every_entry_under_unmatched_directory_is_reported() {
    let dir = setup_trees();
    let (src, smb) = roots(&dir);

    let missing = audit().source(&src).mirror(smb).collect().unwrap().missing;

    let gone = src.join("gone");
    for entry in walkdir::WalkDir::new(&gone) {
        let entry = entry.unwrap();
        let relative = Path::new("/").join(entry.path().strip_prefix(&src).unwrap());
        assert!(missing.contains(&relative), "{} not reported", relative.display());
    }
}

#[test]
fn tree_against_itself_is_clean() {
    let dir = setup_trees();
    let (src, _) = roots(&dir);

    let results = audit().source(&src).mirror(&src).collect().unwrap();
    assert!(results.missing.is_empty());
    assert_eq!(results.stats.entries, 10);
}

#[test]
fn repeated_runs_report_the_same_set() {
    let dir = setup_trees();
    let (src, smb) = roots(&dir);

    let first = audit().source(&src).mirror(&smb).collect().unwrap().missing;
    let second = audit().source(&src).mirror(&smb).collect().unwrap().missing;
    assert_eq!(sorted(first), sorted(second));
}

#[test]
fn ignore_file_skips_names_everywhere() {
    let dir = setup_trees();
    let (src, smb) = roots(&dir);
    fs::write(src.join(".DS_Store"), "").unwrap();
    fs::create_dir(src.join("photos").join(".DS_Store")).unwrap();
    fs::write(src.join("photos").join(".DS_Store").join("junk"), "").unwrap();

    let ignore_path = dir.path().join("ignore.txt");
    fs::write(&ignore_path, "# junk\n.DS_Store\n/gone\n").unwrap();
    let ignore = IgnoreSet::load(&ignore_path).unwrap();

    let results = audit().source(src).mirror(smb).ignore(ignore).collect().unwrap();

    assert_eq!(sorted(results.missing), vec!["/lost.txt", "/photos/b.jpg"]);
    assert_eq!(results.stats.ignored, 3);
}

#[cfg(unix)]
#[test]
fn symlinks_follow_the_symlink_option() {
    let dir = setup_trees();
    let (src, smb) = roots(&dir);
    std::os::unix::fs::symlink("report.txt", src.join("latest")).unwrap();
    std::os::unix::fs::symlink("photos", src.join("pics")).unwrap();

    let quiet = audit().source(&src).mirror(&smb).collect().unwrap().missing;
    assert!(!quiet.iter().any(|p| p == Path::new("/latest") || p == Path::new("/pics")));

    let loud = audit()
        .source(&src)
        .mirror(&smb)
        .report_symlinks(true)
        .collect()
        .unwrap()
        .missing;
    assert!(loud.contains(&PathBuf::from("/latest")));
    assert!(loud.contains(&PathBuf::from("/pics")));
    assert!(!loud.iter().any(|p| p.starts_with("/pics") && p != Path::new("/pics")));
}

#[cfg(unix)]
#[test]
fn non_utf8_names_are_reported_with_placeholder() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    let smb = dir.path().join("smb");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&smb).unwrap();

    // Some filesystems refuse invalid UTF-8 names outright.
    if fs::write(src.join(OsStr::from_bytes(b"caf\xe9.txt")), "x").is_err() {
        return;
    }

    let mut sink = WriterSink::new(Vec::new());
    audit().source(&src).mirror(&smb).run(&mut sink).unwrap();

    let out = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(out, "/caf\u{FFFD}.txt\n");
}

#[test]
fn missing_root_fails_before_walking() {
    let dir = setup_trees();
    let (src, _) = roots(&dir);

    let err = audit()
        .source(&src)
        .mirror(dir.path().join("not-mounted"))
        .collect()
        .unwrap_err();
    assert!(matches!(err, AuditError::NotFound(_)));
}

#[test]
fn unset_root_is_rejected() {
    let err = audit().source("/").collect().unwrap_err();
    assert!(matches!(err, AuditError::MissingRoot("mirror")));
    assert_eq!(err.to_string(), "no mirror root provided");
}

#[test]
fn file_as_root_fails_before_walking() {
    let dir = setup_trees();
    let (src, smb) = roots(&dir);
    let file = src.join("report.txt");

    let err = audit().source(&file).mirror(&smb).collect().unwrap_err();
    assert!(matches!(err, AuditError::InvalidRoot(ref p) if *p == file));

    let err = audit().source(&src).mirror(smb.join("notes.md")).collect().unwrap_err();
    assert!(matches!(err, AuditError::InvalidRoot(_)));
}

#[test]
fn file_on_mirror_where_source_has_directory() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    let smb = dir.path().join("smb");
    fs::create_dir_all(src.join("a")).unwrap();
    fs::create_dir_all(&smb).unwrap();
    fs::write(src.join("a").join("x.txt"), "x").unwrap();
    fs::write(src.join("z.txt"), "z").unwrap();
    fs::write(smb.join("a"), "a file, not a directory").unwrap();

    let results = audit().source(src).mirror(smb).collect().unwrap();
    assert_eq!(sorted(results.missing), vec!["/a/x.txt", "/z.txt"]);
}
