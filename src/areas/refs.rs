//! References (HEAD and branch tips)
//!
//! HEAD is a symbolic reference naming the active branch; each branch is a
//! small text file under `refs/heads/` holding the hash of its tip commit, or
//! nothing while the branch is unborn.
//!
//! ## File Format
//!
//! - HEAD: `ref: refs/heads/<branch>\n`
//! - Branch: a 40-character hash followed by a newline, or empty

use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, IoContext, Result};
use file_guard::Lock;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// References manager
///
/// Branch updates hold an exclusive lock on the branch file for the whole
/// read-compare-write sequence.
#[derive(Debug)]
pub struct Refs {
    /// Path to the repository directory (typically `.vcsdir`)
    path: Box<Path>,
}

impl Refs {
    pub fn new(path: Box<Path>) -> Self {
        Refs { path }
    }

    /// Lay out `refs/heads/`, HEAD and an empty default branch file
    ///
    /// Existing files are left untouched, so running it twice is harmless.
    pub fn init(&self, default_branch: &BranchName) -> Result<()> {
        let heads_path = self.heads_path();
        std::fs::create_dir_all(&heads_path)
            .io_context(|| format!("failed to create {}", heads_path.display()))?;

        let sym_ref = default_branch.to_sym_ref_name();
        let head_path = self.head_path();
        if !head_path.exists() {
            std::fs::write(&head_path, format!("ref: {}\n", sym_ref.as_ref_path()))
                .io_context(|| format!("failed to write {}", head_path.display()))?;
        }

        let branch_path = self.path.join(sym_ref.as_ref_path());
        if !branch_path.exists() {
            create_parent_dirs(&branch_path)?;
            std::fs::write(&branch_path, b"")
                .io_context(|| format!("failed to create branch file {}", branch_path.display()))?;
        }

        Ok(())
    }

    /// Read the ref HEAD points to, e.g. `refs/heads/main`
    pub fn read_head(&self) -> Result<SymRefName> {
        let head_path = self.head_path();
        let content = match std::fs::read_to_string(&head_path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NotARepository {
                    path: self.path.to_path_buf(),
                });
            }
            Err(source) => {
                return Err(Error::Io {
                    context: format!("failed to read {}", head_path.display()),
                    source,
                });
            }
        };

        let symref_match = regex::Regex::new(SYMREF_REGEX)
            .ok()
            .and_then(|re| re.captures(content.trim()).map(|caps| caps[1].to_string()));

        match symref_match {
            Some(sym_ref_name) => SymRefName::try_parse(sym_ref_name),
            None => Err(Error::InvalidRef(format!(
                "{HEAD_REF_NAME} is not a symbolic ref: {:?}",
                content.trim()
            ))),
        }
    }

    /// Read the commit a branch points to
    ///
    /// A missing or empty branch file is an unborn branch and yields `None`.
    pub fn read_ref_commit(&self, sym_ref: &SymRefName) -> Result<Option<ObjectId>> {
        let ref_path = self.path.join(sym_ref.as_ref_path());
        match std::fs::read_to_string(&ref_path) {
            Ok(content) => parse_ref_content(&content),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::Io {
                context: format!("failed to read ref file {}", ref_path.display()),
                source,
            }),
        }
    }

    /// Read the commit HEAD resolves to, `None` on an unborn branch
    pub fn read_head_commit(&self) -> Result<Option<ObjectId>> {
        self.read_ref_commit(&self.read_head()?)
    }

    /// Replace a branch tip, provided it still holds `expected`
    ///
    /// The branch file is locked exclusively while its current value is read,
    /// compared and overwritten. A mismatch fails with
    /// [`Error::ConcurrentUpdate`] and leaves the file untouched.
    pub fn write_ref_commit(
        &self,
        sym_ref: &SymRefName,
        expected: Option<&ObjectId>,
        commit_id: &ObjectId,
    ) -> Result<()> {
        let ref_path = self.path.join(sym_ref.as_ref_path());
        create_parent_dirs(&ref_path)?;

        // open the ref file as RDWR and CREAT, without truncating before the lock is held
        let mut ref_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&ref_path)
            .io_context(|| format!("failed to open ref file {}", ref_path.display()))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)
            .io_context(|| format!("failed to lock ref file {}", ref_path.display()))?;
        let file: &mut File = &mut lock;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .io_context(|| format!("failed to read ref file {}", ref_path.display()))?;
        let actual = parse_ref_content(&content)?;

        if actual.as_ref() != expected {
            tracing::warn!(
                ref_name = %sym_ref,
                expected = ?expected.map(ObjectId::to_string),
                actual = ?actual.as_ref().map(ObjectId::to_string),
                "ref changed since it was read"
            );
            return Err(Error::ConcurrentUpdate {
                ref_name: sym_ref.to_string(),
                expected: expected.cloned(),
                actual,
            });
        }

        overwrite(file, format!("{commit_id}\n").as_bytes())
            .io_context(|| format!("failed to write ref file {}", ref_path.display()))?;

        tracing::debug!(ref_name = %sym_ref, oid = %commit_id, "updated ref");
        Ok(())
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }
}

fn parse_ref_content(content: &str) -> Result<Option<ObjectId>> {
    let content = content.trim();
    if content.is_empty() {
        return Ok(None);
    }

    ObjectId::try_parse(content).map(Some)
}

fn overwrite(file: &mut File, content: &[u8]) -> std::io::Result<()> {
    file.set_len(0)?;
    file.seek(SeekFrom::Start(0))?;
    file.write_all(content)?;
    file.flush()
}

fn create_parent_dirs(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) => std::fs::create_dir_all(parent)
            .io_context(|| format!("failed to create directory {}", parent.display())),
        None => Ok(()),
    }
}
