use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

use common::{repository_dir, run_pit_command};

#[test]
fn new_repository_initiated_with_git_directory() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    let dir_absolute_path = dir.path().canonicalize()?.display().to_string();
    let mut sut = Command::cargo_bin("pit")?;

    sut.arg("init").arg(dir.path());

    sut.assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^Initialized git directory at .+\n$",
        )?)
        .stdout(predicate::str::contains(dir_absolute_path));

    assert!(dir.path().join(".git").join("objects").is_dir());
    assert!(dir.path().join(".git").join("refs").join("heads").is_dir());
    assert_eq!(
        std::fs::read_to_string(dir.path().join(".git").join("HEAD"))?,
        "ref: refs/heads/main\n"
    );

    Ok(())
}

#[rstest]
fn init_creates_missing_directories(repository_dir: TempDir) {
    let target = repository_dir.path().join("nested").join("repo");

    run_pit_command(repository_dir.path(), &["init", "nested/repo"])
        .assert()
        .success();

    assert!(target.join(".git").join("HEAD").is_file());
}

#[rstest]
fn reinit_keeps_existing_head(repository_dir: TempDir) {
    let head_path = repository_dir.path().join(".git").join("HEAD");

    run_pit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    std::fs::write(&head_path, "ref: refs/heads/trunk\n").unwrap();

    run_pit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(head_path).unwrap(),
        "ref: refs/heads/trunk\n"
    );
}
