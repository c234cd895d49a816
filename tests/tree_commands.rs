use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

use common::{count_objects, init_repository_dir, repository_dir, run_pit_command, stdout_of};

const ROOT_TREE: &str = "88484bd9e7919fa9b7dfeb008fb8f6c85743d171";
const ONE_BLOB: &str = "43dd47ea691c90a5fa7827892c70241913351963";
const A_TREE: &str = "202bc192d34beb85d0301ec8c8940cd0252cc48a";

#[rstest]
fn write_tree_snapshots_nested_directories(init_repository_dir: TempDir) {
    let oid = stdout_of(run_pit_command(init_repository_dir.path(), &["write-tree"]));

    assert_eq!(oid, ROOT_TREE);
    // 3 blobs + 3 trees
    assert_eq!(count_objects(init_repository_dir.path()), 6);
}

#[rstest]
fn write_tree_is_repeatable(init_repository_dir: TempDir) {
    let first = stdout_of(run_pit_command(init_repository_dir.path(), &["write-tree"]));
    let second = stdout_of(run_pit_command(init_repository_dir.path(), &["write-tree"]));

    assert_eq!(first, second);
    assert_eq!(count_objects(init_repository_dir.path()), 6);
}

#[rstest]
fn write_tree_on_empty_worktree_fails(repository_dir: TempDir) {
    run_pit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    std::fs::create_dir_all(repository_dir.path().join("empty").join("nested")).unwrap();

    run_pit_command(repository_dir.path(), &["write-tree"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to snapshot"));
    assert_eq!(count_objects(repository_dir.path()), 0);
}

#[rstest]
fn ls_tree_lists_root_entries(init_repository_dir: TempDir) {
    run_pit_command(init_repository_dir.path(), &["write-tree"])
        .assert()
        .success();

    let listing = stdout_of(run_pit_command(
        init_repository_dir.path(),
        &["ls-tree", ROOT_TREE],
    ));

    assert_eq!(
        listing,
        format!("100644 blob {ONE_BLOB}\t1.txt\n040000 tree {A_TREE}\ta")
    );
}

#[rstest]
fn ls_tree_name_only(init_repository_dir: TempDir) {
    run_pit_command(init_repository_dir.path(), &["write-tree"])
        .assert()
        .success();

    run_pit_command(
        init_repository_dir.path(),
        &["ls-tree", "--name-only", A_TREE],
    )
    .assert()
    .success()
    .stdout("2.txt\nb\n");
}

#[rstest]
fn ls_tree_rejects_blobs(init_repository_dir: TempDir) {
    run_pit_command(init_repository_dir.path(), &["write-tree"])
        .assert()
        .success();

    run_pit_command(init_repository_dir.path(), &["ls-tree", ONE_BLOB])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a tree object"));
}

#[rstest]
fn cat_file_prints_trees_as_listing(init_repository_dir: TempDir) {
    run_pit_command(init_repository_dir.path(), &["write-tree"])
        .assert()
        .success();

    run_pit_command(init_repository_dir.path(), &["cat-file", "-p", ROOT_TREE])
        .assert()
        .success()
        .stdout(format!(
            "100644 blob {ONE_BLOB}\t1.txt\n040000 tree {A_TREE}\ta\n"
        ));
}
