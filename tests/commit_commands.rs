use assert_fs::TempDir;
use fake::Fake;
use fake::faker::lorem::en::Words;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

use common::{
    AUTHOR_EMAIL, AUTHOR_NAME, init_repository_dir, pit_commit_tree, run_pit_command, stdout_of,
};

const ROOT_TREE: &str = "88484bd9e7919fa9b7dfeb008fb8f6c85743d171";
const INITIAL_COMMIT: &str = "e972be13fc5b660dd06f6de2e96b36a6b93bbcd7";

#[rstest]
fn commit_tree_matches_git(init_repository_dir: TempDir) {
    let tree = stdout_of(run_pit_command(init_repository_dir.path(), &["write-tree"]));

    let commit = stdout_of(pit_commit_tree(
        init_repository_dir.path(),
        &tree,
        &[],
        "Initial commit",
    ));

    assert_eq!(commit, INITIAL_COMMIT);
}

#[rstest]
fn commit_with_parent_reads_back(init_repository_dir: TempDir) {
    let tree = stdout_of(run_pit_command(init_repository_dir.path(), &["write-tree"]));
    let message = Words(3..6).fake::<Vec<String>>().join(" ");

    let parent = stdout_of(pit_commit_tree(
        init_repository_dir.path(),
        &tree,
        &[],
        "Initial commit",
    ));
    let commit = stdout_of(pit_commit_tree(
        init_repository_dir.path(),
        &tree,
        &[parent.as_str()],
        &message,
    ));

    let content = stdout_of(run_pit_command(
        init_repository_dir.path(),
        &["cat-file", "-p", &commit],
    ));

    let identity = format!("{AUTHOR_NAME} <{AUTHOR_EMAIL}> 1672574400 +0000");
    assert_eq!(
        content,
        format!(
            "tree {ROOT_TREE}\nparent {parent}\nauthor {identity}\ncommitter {identity}\n\n{message}"
        )
    );
}

#[rstest]
fn commit_tree_rejects_unknown_tree(init_repository_dir: TempDir) {
    pit_commit_tree(init_repository_dir.path(), INITIAL_COMMIT, &[], "Dangling")
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!(
            "Not a valid object name {INITIAL_COMMIT}"
        )));
}
