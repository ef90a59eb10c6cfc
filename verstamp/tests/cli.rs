use std::{fs, path::Path, process::Command};

use escargot::CargoRun;

fn verstamp() -> CargoRun {
    escargot::CargoBuild::new()
        .bin("verstamp")
        .current_release()
        .current_target()
        .run()
        .unwrap()
}

fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(["-c", "user.name=verstamp", "-c", "user.email=verstamp@example.com"])
        .args(["-c", "commit.gpgsign=false", "-c", "tag.gpgsign=false"])
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn prints_embedded_version_info() {
    let output = verstamp().command().output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("stdout is UTF-8 string");
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 3, "{stdout}");
    assert!(lines[0].starts_with("package "));
    assert!(lines[1].starts_with("git sha = "));
    assert!(lines[2].starts_with("git decription = "));
}

#[test]
fn show_json_matches_text() {
    let run = verstamp();
    let text = run.command().arg("show").output().unwrap();
    let json = run
        .command()
        .args(["show", "--format", "json"])
        .output()
        .unwrap();
    assert!(text.status.success() && json.status.success());

    let text = String::from_utf8(text.stdout).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&json.stdout).unwrap();
    let package = json["package"].as_str().unwrap();
    assert_eq!(text.lines().next().unwrap(), format!("package {package}"));
}

#[test_with::executable(git)]
#[test]
fn generate_is_idempotent() {
    let repo = tempfile::tempdir().unwrap();
    git(repo.path(), &["init", "-q"]);
    fs::write(repo.path().join("file.txt"), "hello").unwrap();
    git(repo.path(), &["add", "file.txt"]);
    git(repo.path(), &["commit", "-q", "-m", "hello"]);
    git(repo.path(), &["tag", "v2.7.1"]);

    let out_dir = tempfile::tempdir().unwrap();
    let out = out_dir.path().join("gen/version_info.rs");
    let run = verstamp();
    let generate = || {
        run.command()
            .arg("generate")
            .arg("--repo")
            .arg(repo.path())
            .arg("--out")
            .arg(&out)
            .env("RUST_LOG", "info")
            .output()
            .unwrap()
    };

    let first = generate();
    assert!(first.status.success(), "{}", String::from_utf8_lossy(&first.stderr));
    assert_eq!(String::from_utf8(first.stdout).unwrap(), "2.7.1\n");
    let artifact = fs::read_to_string(&out).unwrap();
    assert!(artifact.contains(r#"pub const PACKAGE: &str = "2.7.1";"#));
    assert!(artifact.contains(r#"pub const GIT_DESCRIPTION: &str = "v2.7.1";"#));

    let second = generate();
    assert!(second.status.success());
    assert!(String::from_utf8_lossy(&second.stderr).contains("already up to date"));
    assert_eq!(fs::read_to_string(&out).unwrap(), artifact);
}

#[test]
fn generate_with_missing_repo_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = verstamp()
        .command()
        .arg("generate")
        .arg("--repo")
        .arg(dir.path().join("missing"))
        .arg("--out")
        .arg(dir.path().join("version_info.rs"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
    assert!(!dir.path().join("version_info.rs").exists());
}

#[test_with::executable(git)]
#[test]
fn generate_outside_a_repository_fails() {
    let dir = tempfile::tempdir().unwrap();
    let plain = dir.path().join("plain");
    fs::create_dir(&plain).unwrap();
    let probe = Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .current_dir(&plain)
        .output()
        .unwrap();
    if probe.status.success() {
        // The temp dir lives inside some checkout on this machine.
        return;
    }

    let output = verstamp()
        .command()
        .arg("generate")
        .arg("--repo")
        .arg(&plain)
        .arg("--out")
        .arg(dir.path().join("version_info.rs"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("exited with"));
    assert!(!dir.path().join("version_info.rs").exists());
}
