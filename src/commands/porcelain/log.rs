use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub max_count: Option<usize>,
}

impl Repository {
    pub fn log(&self, opts: &LogOptions) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let head = self.refs().read_head()?;
        let Some(tip) = self.refs().read_ref_commit(&head)? else {
            anyhow::bail!(
                "your current branch '{}' does not have any commits yet",
                head.branch_name()
            );
        };

        let history = self
            .history(Some(tip))?
            .take(opts.max_count.unwrap_or(usize::MAX));

        for (index, entry) in history.enumerate() {
            let (commit_oid, commit) = entry?;
            if index > 0 {
                writeln!(self.writer())?;
            }
            self.show_commit_medium(&commit_oid, &commit)?;
        }

        Ok(())
    }

    fn show_commit_medium(&self, commit_oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{}",
            format!("commit {}", commit_oid).yellow()
        )?;
        writeln!(self.writer(), "Author: {}", commit.author().identity())?;
        writeln!(
            self.writer(),
            "Date:   {}",
            commit.author().readable_timestamp()
        )?;
        writeln!(self.writer())?;
        for message_line in commit.message().lines() {
            writeln!(self.writer(), "    {}", message_line)?;
        }

        Ok(())
    }
}
