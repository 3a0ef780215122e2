use crate::areas::repository::Repository;
use crate::artifacts::core::config::InitOptions;
use anyhow::Context;

impl Repository {
    pub fn init(&self, options: &InitOptions) -> anyhow::Result<()> {
        self.initialize(options)
            .context("Failed to initialize the repository")?;

        writeln!(
            self.writer(),
            "Initialized empty repository in {}",
            self.git_path().display()
        )?;

        Ok(())
    }
}
