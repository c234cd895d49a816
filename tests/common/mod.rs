#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const AUTHOR_NAME: &str = "fake_user";
pub const AUTHOR_EMAIL: &str = "fake_email@email.com";
pub const AUTHOR_DATE: &str = "2023-01-01 12:00:00 +0000"; // %Y-%m-%d %H:%M:%S %z

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository holding `1.txt`, `a/2.txt` and `a/b/3.txt`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_pit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(&repository_dir.path().join("1.txt"), "one");
    write_file(&repository_dir.path().join("a").join("2.txt"), "two");
    write_file(
        &repository_dir.path().join("a").join("b").join("3.txt"),
        "three",
    );

    repository_dir
}

pub fn run_pit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("pit").expect("Failed to find pit binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn pit_commit_tree(dir: &Path, tree: &str, parents: &[&str], message: &str) -> Command {
    let mut cmd = run_pit_command(dir, &["commit-tree", tree, "-m", message]);
    for parent in parents {
        cmd.arg("-p").arg(parent);
    }
    cmd.envs(vec![
        ("GIT_AUTHOR_NAME", AUTHOR_NAME),
        ("GIT_AUTHOR_EMAIL", AUTHOR_EMAIL),
        ("GIT_AUTHOR_DATE", AUTHOR_DATE),
    ]);
    cmd
}

/// Run a command that must succeed and return its trimmed stdout
pub fn stdout_of(mut cmd: Command) -> String {
    let output = cmd.output().expect("Failed to run pit");
    assert!(
        output.status.success(),
        "pit failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout)
        .expect("pit printed non UTF-8 output")
        .trim_end()
        .to_string()
}

pub fn write_file(path: &Path, content: &str) {
    // make sure the parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create directory {:?}: {}", parent, e));
    }

    std::fs::write(path, content)
        .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", path, e));
}

/// Number of loose objects under `.git/objects`
pub fn count_objects(dir: &Path) -> usize {
    let objects_path = dir.join(".git").join("objects");

    std::fs::read_dir(objects_path)
        .expect("Failed to read objects directory")
        .map(|fan_out| {
            std::fs::read_dir(fan_out.expect("Failed to read entry").path())
                .expect("Failed to read fan-out directory")
                .count()
        })
        .sum()
}
