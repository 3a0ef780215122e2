#![allow(dead_code)]

pub mod command;
pub mod file;

use assert_fs::TempDir;
use chrono::DateTime;
use rstest::fixture;
use tinybit::{CommitConfig, Identity, InitOptions, Repository};

pub const FIXED_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A freshly initialized repository whose output is discarded
pub fn open_repository(dir: &TempDir) -> Repository {
    let repository = Repository::new(dir.path(), Box::new(std::io::sink()))
        .expect("Failed to open repository");
    repository
        .initialize(&InitOptions::default())
        .expect("Failed to initialize repository");
    repository
}

/// Author and committer `fake_user`, dated 2023-01-01 12:00:00 UTC
pub fn fixed_config() -> CommitConfig {
    let date = DateTime::parse_from_str(FIXED_DATE, "%Y-%m-%d %H:%M:%S %z").expect("valid date");
    CommitConfig::new(Identity::new("fake_user".to_string(), "fake_email@email.com".to_string()).with_date(date))
}

pub fn random_config() -> CommitConfig {
    use fake::Fake;
    use fake::faker::internet::en::FreeEmail;
    use fake::faker::name::en::Name;

    CommitConfig::new(Identity::new(Name().fake::<String>(), FreeEmail().fake::<String>()))
}
