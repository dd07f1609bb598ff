use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use zip::write::SimpleFileOptions;

fn tropo(dir: &Path, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tropo"));
    cmd.args(args).current_dir(dir).stdin(Stdio::null());
    for (key, _) in std::env::vars() {
        if key.starts_with("TROPO_") {
            cmd.env_remove(key);
        }
    }
    cmd.env_remove("RUST_LOG");
    cmd.output().unwrap()
}

fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
    for (name, data) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(data.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

#[test]
fn generate_without_sources_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();

    let out = tropo(dir.path(), &["generate"]);

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stderr).contains("does not exist"));
    assert!(!dir.path().join("target").exists());
}

#[test]
fn generate_requires_runtime_dependency() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src/main/troposphere")).unwrap();

    let out = tropo(dir.path(), &[]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("jython-standalone dependency not found"), "{stderr}");
    assert!(stderr.contains("[[dependencies]]"), "{stderr}");
}

#[test]
fn list_prints_sources_and_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("tpl");
    fs::create_dir_all(src.join("sub")).unwrap();
    fs::write(src.join("sub/b.tr"), "").unwrap();
    fs::write(src.join("a.tr"), "").unwrap();
    fs::write(src.join("notes.md"), "").unwrap();

    let out = tropo(dir.path(), &["list", "--source-dir", "tpl", "--output-dir", "gen"]);

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("gen/a.template"));
    assert!(lines[1].ends_with("gen/sub/b.template"));
}

/// Full run against a stand-in `java` that echoes the script it is given.
#[cfg(unix)]
#[test]
fn generate_end_to_end() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write_zip(&root.join("jython.jar"), &[("Lib/os.py", "import posix\n")]);
    fs::create_dir_all(root.join("resources")).unwrap();
    write_zip(
        &root.join("resources/setuptools-0.6c11-py2.5.egg"),
        &[("easy_install.py", "main()\n")],
    );

    // argv after the launcher: -cp CP -Dpython.home=. -Dpython.executable=jython MAIN SCRIPT ...
    let java = root.join("fake-java");
    fs::write(
        &java,
        "#!/bin/sh\ncase \"$6\" in\n  *.tr) cat \"$6\" ;;\n  *) echo \"$@\" > install.log ;;\nesac\n",
    )
    .unwrap();
    fs::set_permissions(&java, fs::Permissions::from_mode(0o755)).unwrap();

    fs::write(
        root.join("tropo.toml"),
        r#"
        libraries = ["boto"]

        [[dependencies]]
        group = "org.python"
        artifact = "jython-standalone"
        version = "2.5.2"
        path = "jython.jar"
        "#,
    )
    .unwrap();
    let src = root.join("src/main/troposphere");
    fs::create_dir_all(src.join("sub")).unwrap();
    fs::write(src.join("a.tr"), "stack a\n").unwrap();
    fs::write(src.join("sub/b.tr"), "stack b\n").unwrap();

    let out = tropo(root, &["generate", "--java", java.to_str().unwrap()]);

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let generated = root.join("target/generated-sources/troposphere");
    assert_eq!(fs::read_to_string(generated.join("a.template")).unwrap(), "stack a\n");
    assert_eq!(fs::read_to_string(generated.join("sub/b.template")).unwrap(), "stack b\n");

    let rt = root.join("target/troposphere-build-tmp");
    assert!(rt.join("Lib/os.py").is_file());
    assert!(rt.join("jython").is_file());
    assert_eq!(
        fs::read_to_string(rt.join("Lib/site-packages/setuptools.pth")).unwrap(),
        "./setuptools-0.6c11-py2.5.egg\n"
    );
    let install = fs::read_to_string(rt.join("install.log")).unwrap();
    assert!(install.contains("Lib/site-packages/setuptools-0.6c11-py2.5.egg/easy_install.py"));
    assert!(install.trim_end().ends_with("boto"));
}

#[cfg(unix)]
#[test]
fn failing_script_fails_the_run() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_zip(&root.join("jython.jar"), &[("Lib/os.py", "")]);
    write_zip(&root.join("setuptools.egg"), &[("easy_install.py", "")]);
    let java = root.join("fake-java");
    fs::write(&java, "#!/bin/sh\necho partial\nexit 3\n").unwrap();
    fs::set_permissions(&java, fs::Permissions::from_mode(0o755)).unwrap();
    fs::create_dir_all(root.join("tpl")).unwrap();
    fs::write(root.join("tpl/a.tr"), "").unwrap();

    let out = tropo(
        root,
        &[
            "--source-dir", "tpl", "--output-dir", "gen", "--runtime", "jython.jar",
            "--bootstrap", "setuptools.egg", "--java", java.to_str().unwrap(),
            "--library", "boto",
        ],
    );

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("return code 3"), "{stderr}");
}

#[cfg(not(feature = "embedded-bootstrap"))]
#[test]
fn missing_bootstrap_egg_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_zip(&root.join("jython.jar"), &[("Lib/os.py", "")]);
    fs::create_dir_all(root.join("tpl")).unwrap();

    let out = tropo(root, &["stage", "--source-dir", "tpl", "--runtime", "jython.jar"]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("bootstrap resource 'setuptools-0.6c11-py2.5.egg' not found"),
        "{stderr}"
    );
}
