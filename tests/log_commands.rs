use assert_fs::TempDir;
use common::command::{
    committed_repository_dir, populated_repository_dir, run_tinybit_command, stdout_of,
    tinybit_commit,
};
use predicates::prelude::*;
use rstest::rstest;

mod common;

#[rstest]
fn log_shows_commits_newest_first(committed_repository_dir: TempDir) {
    tinybit_commit(committed_repository_dir.path(), "Second commit")
        .assert()
        .success();

    let output = stdout_of(&mut run_tinybit_command(
        committed_repository_dir.path(),
        &["log"],
    ));

    pretty_assertions::assert_eq!(
        output,
        "commit 2178e0f5f275de1aed8e32eb07bbdb6b75866457\n\
         Author: fake_user <fake_email@email.com>\n\
         Date:   Sun Jan 1 12:00:00 2023 +0000\n\
         \n\
         \x20   Second commit\n\
         \n\
         commit e972be13fc5b660dd06f6de2e96b36a6b93bbcd7\n\
         Author: fake_user <fake_email@email.com>\n\
         Date:   Sun Jan 1 12:00:00 2023 +0000\n\
         \n\
         \x20   Initial commit\n"
    );
}

#[rstest]
fn log_max_count_limits_the_walk(committed_repository_dir: TempDir) {
    tinybit_commit(committed_repository_dir.path(), "Second commit")
        .assert()
        .success();

    run_tinybit_command(committed_repository_dir.path(), &["log", "-n", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Second commit"))
        .stdout(predicate::str::contains("Initial commit").not());
}

#[rstest]
fn log_on_an_unborn_branch_fails(populated_repository_dir: TempDir) {
    run_tinybit_command(populated_repository_dir.path(), &["log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not have any commits yet"));
}
