//! Commit and repository configuration
//!
//! Identities, the default branch and tree-building choices are handed to the
//! repository explicitly instead of being read from process-wide state, so
//! callers (and tests) control timestamps and signatures.

use crate::artifacts::objects::commit::Author;
use anyhow::Context;
use chrono::{DateTime, FixedOffset};
use derive_new::new;

pub const DEFAULT_BRANCH: &str = "main";

/// How committed paths are turned into tree objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeLayout {
    /// Every path is a single top-level entry, slashes included
    Flat,
    /// One tree object per directory
    #[default]
    Nested,
}

/// Order of entries inside each written tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryOrder {
    /// Keep the order in which paths were handed in
    Given,
    /// Git's canonical order; equal file sets hash equally regardless of input order
    #[default]
    Sorted,
}

/// Name and email of a signer, with an optional fixed date
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Identity {
    pub name: String,
    pub email: String,
    #[new(default)]
    pub date: Option<DateTime<FixedOffset>>,
}

impl Identity {
    pub fn with_date(mut self, date: DateTime<FixedOffset>) -> Self {
        self.date = Some(date);
        self
    }

    /// Produce a signature, stamped now in UTC unless a date is fixed
    pub fn stamp(&self) -> Author {
        match self.date {
            Some(date) => Author::new_with_timestamp(self.name.clone(), self.email.clone(), date),
            None => Author::new(self.name.clone(), self.email.clone()),
        }
    }

    fn load_from_env(prefix: &str) -> anyhow::Result<Option<Self>> {
        let name = std::env::var(format!("{prefix}_NAME")).ok();
        let email = std::env::var(format!("{prefix}_EMAIL")).ok();
        let date = std::env::var(format!("{prefix}_DATE"))
            .ok()
            .map(|date| parse_date(&date).with_context(|| format!("{prefix}_DATE is invalid")))
            .transpose()?;

        Ok(match (name, email) {
            (Some(name), Some(email)) => Some(Identity { name, email, date }),
            _ => None,
        })
    }
}

fn parse_date(date: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(date)
        .or_else(|_| DateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S %z"))
        .with_context(|| format!("unrecognized date {date:?}"))
}

/// Everything the commit builder needs besides the files and the message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitConfig {
    pub author: Identity,
    pub committer: Identity,
    pub tree_layout: TreeLayout,
    pub entry_order: EntryOrder,
}

impl CommitConfig {
    /// Use the same identity for author and committer with default tree options
    pub fn new(identity: Identity) -> Self {
        CommitConfig {
            author: identity.clone(),
            committer: identity,
            tree_layout: TreeLayout::default(),
            entry_order: EntryOrder::default(),
        }
    }

    pub fn with_tree_layout(mut self, tree_layout: TreeLayout) -> Self {
        self.tree_layout = tree_layout;
        self
    }

    pub fn with_entry_order(mut self, entry_order: EntryOrder) -> Self {
        self.entry_order = entry_order;
        self
    }

    /// Load identities from the environment
    ///
    /// Reads GIT_AUTHOR_NAME, GIT_AUTHOR_EMAIL, and optionally GIT_AUTHOR_DATE.
    /// The GIT_COMMITTER_* variables fall back to the author when unset.
    pub fn load_from_env() -> anyhow::Result<Self> {
        let author = Identity::load_from_env("GIT_AUTHOR")?
            .context("GIT_AUTHOR_NAME and GIT_AUTHOR_EMAIL must be set")?;
        let committer = Identity::load_from_env("GIT_COMMITTER")?.unwrap_or_else(|| author.clone());

        Ok(CommitConfig {
            committer,
            ..CommitConfig::new(author)
        })
    }
}

/// Options for laying out a fresh repository
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct InitOptions {
    pub default_branch: String,
}

impl Default for InitOptions {
    fn default() -> Self {
        InitOptions {
            default_branch: DEFAULT_BRANCH.to_string(),
        }
    }
}
