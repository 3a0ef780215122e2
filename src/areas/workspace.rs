//! Working-tree file discovery for the command line
//!
//! Collects files to commit, relative to the working tree root with `/`
//! separators, skipping the repository directory.

use crate::areas::commit_builder::CommitFile;
use crate::areas::repository::REPOSITORY_DIR;
use crate::artifacts::objects::entry_mode::FileMode;
use anyhow::Context;
use is_executable::IsExecutable;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [REPOSITORY_DIR, ".", ".."];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List files under each of `paths`, sorted and without duplicates
    pub fn list_files(&self, paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for path in paths {
            let absolute = std::fs::canonicalize(self.path.join(path))
                .with_context(|| format!("The specified path does not exist: {:?}", path))?;
            let relative = absolute
                .strip_prefix(self.path.as_ref())
                .with_context(|| format!("{:?} is outside the working tree", path))?;
            if Self::is_ignored(relative) {
                continue;
            }

            files.extend(
                WalkDir::new(&absolute)
                    .into_iter()
                    .filter_entry(|entry| !Self::is_ignored_name(&entry.file_name().to_string_lossy()))
                    .filter_map(|entry| entry.ok())
                    .filter(|entry| entry.file_type().is_file())
                    .filter_map(|entry| {
                        entry
                            .path()
                            .strip_prefix(self.path.as_ref())
                            .ok()
                            .map(Path::to_path_buf)
                    }),
            );
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Read a file into a commit entry, marking executables `100755`
    pub fn read_commit_file(&self, file_path: &Path) -> anyhow::Result<CommitFile> {
        let absolute = self.path.join(file_path);
        let content = std::fs::read(&absolute)
            .with_context(|| format!("Unable to read file {}", absolute.display()))?;
        let mode = if absolute.is_executable() {
            FileMode::Executable
        } else {
            FileMode::Regular
        };

        Ok(CommitFile::new(Self::to_tree_path(file_path)?, mode, content))
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Vec<u8>> {
        let absolute = self.path.join(file_path);
        std::fs::read(&absolute).with_context(|| format!("Unable to read file {}", absolute.display()))
    }

    fn to_tree_path(file_path: &Path) -> anyhow::Result<String> {
        let segments = file_path
            .components()
            .map(|component| match component {
                Component::Normal(name) => name
                    .to_str()
                    .with_context(|| format!("{:?} is not valid UTF-8", file_path)),
                _ => anyhow::bail!("{:?} is not a plain relative path", file_path),
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(segments.join("/"))
    }

    fn is_ignored(path: &Path) -> bool {
        path.components().any(|component| match component {
            Component::Normal(name) => Self::is_ignored_name(&name.to_string_lossy()),
            _ => false,
        })
    }

    fn is_ignored_name(name: &str) -> bool {
        IGNORED_PATHS.contains(&name)
    }
}
