use assert_fs::TempDir;
use assert_fs::prelude::{FileWriteStr, PathChild};
use common::command::{run_tinybit_command, stdout_of};
use common::repository_dir;
use fake::Fake;
use fake::faker::lorem::en::Words;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

#[rstest]
fn hash_object_prints_the_blob_hash_without_storing(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    repository_dir.child("hello.txt").write_str("hello")?;

    run_tinybit_command(repository_dir.path(), &["hash-object", "hello.txt"])
        .assert()
        .success()
        .stdout("b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0\n");

    assert!(!repository_dir.path().join(".vcsdir").exists());
    Ok(())
}

#[rstest]
fn hash_object_with_write_stores_a_compressed_object(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_tinybit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    repository_dir.child("hello.txt").write_str("hello\n")?;

    run_tinybit_command(repository_dir.path(), &["hash-object", "-w", "hello.txt"])
        .assert()
        .success()
        .stdout("ce013625030ba8dba906f756967f9e9ca394464a\n");

    let object_path = repository_dir
        .path()
        .join(".vcsdir/objects/ce/013625030ba8dba906f756967f9e9ca394464a");
    assert!(object_path.is_file());
    Ok(())
}

#[rstest]
fn hash_object_with_write_outside_a_repository_fails(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    repository_dir.child("hello.txt").write_str("hello")?;

    run_tinybit_command(repository_dir.path(), &["hash-object", "-w", "hello.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a repository"));
    Ok(())
}

#[rstest]
fn cat_file_prints_stored_blob_content(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = Words(5..20).fake::<Vec<String>>().join(" ");
    run_tinybit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    repository_dir.child("words.txt").write_str(&content)?;

    let oid = stdout_of(&mut run_tinybit_command(
        repository_dir.path(),
        &["hash-object", "-w", "words.txt"],
    ));

    run_tinybit_command(repository_dir.path(), &["cat-file", "-p", oid.trim()])
        .assert()
        .success()
        .stdout(content);
    Ok(())
}

#[rstest]
fn cat_file_of_a_missing_object_fails(repository_dir: TempDir) {
    run_tinybit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_tinybit_command(
        repository_dir.path(),
        &["cat-file", "-p", "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("not found"));
}

#[rstest]
#[case("abc")]
#[case("zz013625030ba8dba906f756967f9e9ca394464a")]
fn cat_file_rejects_malformed_hashes(repository_dir: TempDir, #[case] sha: &str) {
    run_tinybit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_tinybit_command(repository_dir.path(), &["cat-file", "-p", sha])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid object hash"));
}
