use crate::common::FIXED_DATE;
use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub fn run_tinybit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("tinybit").expect("Failed to find tinybit binary");
    cmd.current_dir(dir);
    cmd.env_remove("RUST_LOG");
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// `commit -m <message>` with a fixed author, committer and date
pub fn tinybit_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_tinybit_command(dir, &["commit", "-m", message]);
    cmd.envs(vec![
        ("GIT_AUTHOR_NAME", "fake_user"),
        ("GIT_AUTHOR_EMAIL", "fake_email@email.com"),
        ("GIT_AUTHOR_DATE", FIXED_DATE), // %Y-%m-%d %H:%M:%S %z
        ("GIT_COMMITTER_NAME", "fake_user"),
        ("GIT_COMMITTER_EMAIL", "fake_email@email.com"),
        ("GIT_COMMITTER_DATE", FIXED_DATE),
    ]);
    cmd
}

pub fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("stdout is not UTF-8")
}

/// An initialized working tree holding `1.txt`, `a/2.txt` and `a/b/3.txt`
#[fixture]
pub fn populated_repository_dir() -> TempDir {
    let repository_dir = TempDir::new().expect("Failed to create temp dir");
    run_tinybit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(repository_dir.path().join("1.txt"), "one".to_string()));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    repository_dir
}

/// [`populated_repository_dir`] with everything committed as "Initial commit"
#[fixture]
pub fn committed_repository_dir(populated_repository_dir: TempDir) -> TempDir {
    tinybit_commit(populated_repository_dir.path(), "Initial commit")
        .assert()
        .success();

    populated_repository_dir
}
