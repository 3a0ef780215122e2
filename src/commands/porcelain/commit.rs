use crate::areas::repository::Repository;
use crate::artifacts::core::config::{CommitConfig, EntryOrder, TreeLayout};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct CommitOptions {
    pub message: String,
    pub paths: Vec<PathBuf>,
    pub tree_layout: TreeLayout,
    pub entry_order: EntryOrder,
}

impl Repository {
    pub fn commit(&self, opts: &CommitOptions) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let config = CommitConfig::load_from_env()?
            .with_tree_layout(opts.tree_layout)
            .with_entry_order(opts.entry_order);

        let paths = if opts.paths.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            opts.paths.clone()
        };
        let files = self
            .workspace()
            .list_files(&paths)?
            .iter()
            .map(|file_path| self.workspace().read_commit_file(file_path))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let mut message = opts.message.trim().to_string();
        message.push('\n');

        let commit_id = self.commit_files(files, &message, &config)?;
        let commit = self
            .database()
            .parse_object_as_commit(&commit_id)?
            .ok_or_else(|| anyhow::anyhow!("Commit object not found: {}", commit_id))?;

        let branch = self.refs().read_head()?.branch_name();
        let is_root = match commit.parent() {
            Some(_) => "",
            None => " (root-commit)",
        };

        writeln!(
            self.writer(),
            "[{}{} {}] {}",
            branch,
            is_root,
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(())
    }
}
