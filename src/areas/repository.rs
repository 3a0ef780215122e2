use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::config::InitOptions;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, IoContext, Result};
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Name of the repository directory inside the working tree
pub const REPOSITORY_DIR: &str = ".vcsdir";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Bind to a working tree, creating the directory if needed
    ///
    /// Nothing inside the repository directory is touched until
    /// [`Repository::initialize`] or a write operation runs.
    pub fn new(path: impl AsRef<Path>, writer: Box<dyn std::io::Write>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            std::fs::create_dir_all(path)
                .io_context(|| format!("failed to create {}", path.display()))?;
        }
        let path = path
            .canonicalize()
            .io_context(|| format!("failed to resolve {}", path.display()))?;

        let git_path = path.join(REPOSITORY_DIR);
        let database = Database::new(git_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(git_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            workspace,
            refs,
        })
    }

    /// Create the repository layout: objects store, branch namespace and HEAD
    ///
    /// Re-running on an initialized repository leaves existing paths as they are.
    pub fn initialize(&self, options: &InitOptions) -> Result<()> {
        let default_branch = BranchName::try_parse(options.default_branch.as_str())?;
        let objects_path = self.database.objects_path();

        std::fs::create_dir_all(objects_path)
            .io_context(|| format!("failed to create {}", objects_path.display()))?;
        self.refs.init(&default_branch)?;

        let git_path = self.git_path();
        tracing::debug!(path = %git_path.display(), branch = %default_branch, "initialized repository");
        Ok(())
    }

    /// Fail with [`Error::NotARepository`] unless HEAD and the object store exist
    pub fn ensure_initialized(&self) -> Result<()> {
        if self.refs.head_path().is_file() && self.database.objects_path().is_dir() {
            Ok(())
        } else {
            Err(Error::NotARepository {
                path: self.git_path(),
            })
        }
    }

    /// Walk the first-parent chain starting at `start`, or at HEAD when `None`
    pub fn history(&self, start: Option<ObjectId>) -> Result<History<'_>> {
        let next = match start {
            Some(oid) => Some(oid),
            None => self.refs.read_head_commit()?,
        };

        Ok(History {
            database: &self.database,
            next,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn git_path(&self) -> std::path::PathBuf {
        self.path.join(REPOSITORY_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }
}

/// Iterator over a commit and its first-parent ancestors
pub struct History<'r> {
    database: &'r Database,
    next: Option<ObjectId>,
}

impl Iterator for History<'_> {
    type Item = Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = self.next.take()?;

        match self.database.parse_object_as_commit(&oid) {
            Ok(Some(commit)) => {
                self.next = commit.parent().cloned();
                Some(Ok((oid, commit)))
            }
            Ok(None) => Some(Err(Error::corrupt(&oid, "expected a commit object"))),
            Err(err) => Some(Err(err)),
        }
    }
}
