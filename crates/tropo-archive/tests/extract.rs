mod common;

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use tropo_archive::{ArchiveFormat, Compression, EntryStatus, Error, detect_file, extract_file};

#[test]
fn extract_zip_into_empty_dir() {
    let scratch = tempfile::tempdir().unwrap();
    let archive = scratch.path().join("runtime.jar");
    common::write_zip(
        &archive,
        &[
            ("bin/", ""),
            ("bin/interp", "#!/bin/sh\necho interp\n"),
            ("Lib/", ""),
            ("Lib/os.py", "import posix\n"),
            ("META-INF/MANIFEST.MF", "Manifest-Version: 1.0\n"),
        ],
    );
    let target = scratch.path().join("rt");

    let report = extract_file(&archive, &target).unwrap();

    assert_eq!(report.format, ArchiveFormat::Zip);
    assert_eq!(report.written(), 3);
    let expected: BTreeSet<PathBuf> = [
        target.join("bin").join("interp"),
        target.join("Lib").join("os.py"),
        target.join("META-INF").join("MANIFEST.MF"),
    ]
    .into_iter()
    .collect();
    assert_eq!(report.files(), expected);

    assert_eq!(
        fs::read(target.join("bin/interp")).unwrap(),
        b"#!/bin/sh\necho interp\n"
    );
    assert_eq!(fs::read(target.join("Lib/os.py")).unwrap(), b"import posix\n");
}

#[test]
fn reextract_keeps_existing_content() {
    let scratch = tempfile::tempdir().unwrap();
    let archive = scratch.path().join("tool-1.0.egg");
    common::write_zip(
        &archive,
        &[("tool.py", "print('tool')\n"), ("EGG-INFO/PKG-INFO", "Name: tool\n")],
    );
    let target = scratch.path().join("egg");

    let first = extract_file(&archive, &target).unwrap();
    fs::write(target.join("tool.py"), "print('patched')\n").unwrap();
    let second = extract_file(&archive, &target).unwrap();

    assert_eq!(first.files(), second.files());
    assert_eq!(second.written(), 0);
    assert!(second.entries.iter().all(|e| e.status == EntryStatus::Skipped));
    assert_eq!(
        fs::read_to_string(target.join("tool.py")).unwrap(),
        "print('patched')\n"
    );
}

#[test]
fn reextract_fills_in_missing_files_only() {
    let scratch = tempfile::tempdir().unwrap();
    let archive = scratch.path().join("runtime.jar");
    common::write_zip(&archive, &[("a.py", "a"), ("b.py", "b")]);
    let target = scratch.path().join("rt");

    extract_file(&archive, &target).unwrap();
    fs::remove_file(target.join("b.py")).unwrap();
    let report = extract_file(&archive, &target).unwrap();

    assert_eq!(report.written(), 1);
    assert_eq!(report.skipped(), 1);
    assert_eq!(fs::read(target.join("b.py")).unwrap(), b"b");
}

#[test]
fn extract_tar_gz() {
    let scratch = tempfile::tempdir().unwrap();
    let archive = scratch.path().join("runtime.tar.gz");
    common::write_tar_gz(
        &archive,
        &[
            ("bin/interp", 0o755, "#!/bin/sh\n"),
            ("Lib/site.py", 0o644, "# site\n"),
        ],
    );
    let target = scratch.path().join("rt");

    let report = extract_file(&archive, &target).unwrap();

    assert_eq!(report.format, ArchiveFormat::Tar(Compression::Gzip));
    assert_eq!(report.written(), 2);
    assert_eq!(fs::read(target.join("Lib/site.py")).unwrap(), b"# site\n");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(target.join("bin/interp")).unwrap().permissions().mode();
        assert_ne!(mode & 0o111, 0);
    }
}

#[test]
fn unsupported_format_is_rejected() {
    let scratch = tempfile::tempdir().unwrap();
    let archive = scratch.path().join("runtime.jar");
    fs::write(&archive, "definitely not an archive").unwrap();

    assert_eq!(detect_file(&archive).unwrap(), None);
    let err = extract_file(&archive, scratch.path().join("rt")).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat));
}

#[test]
fn missing_archive_reports_path() {
    let scratch = tempfile::tempdir().unwrap();
    let archive = scratch.path().join("missing.jar");

    let err = extract_file(&archive, scratch.path().join("rt")).unwrap_err();

    match err {
        Error::Open { path, .. } => assert_eq!(path, archive),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn blocked_parent_directory_fails() {
    let scratch = tempfile::tempdir().unwrap();
    let archive = scratch.path().join("runtime.jar");
    common::write_zip(&archive, &[("Lib/os.py", "os")]);
    let target = scratch.path().join("rt");
    fs::create_dir_all(&target).unwrap();
    fs::write(target.join("Lib"), "a file where a directory should be").unwrap();

    let err = extract_file(&archive, &target).unwrap_err();
    assert!(matches!(err, Error::DirectoryCreationFailed { .. }));
}
