use crate::artifacts::branch::{INVALID_BRANCH_NAME_REGEX, REF_PREFIX};
use crate::errors::{Error, Result};

/// Full path of a branch ref relative to the repository directory,
/// e.g. `refs/heads/main`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymRefName(String);

impl SymRefName {
    /// Validate a ref path read from HEAD or handed in by a caller
    ///
    /// Only paths under `refs/heads/` naming a valid branch are accepted, which
    /// also keeps ref writes inside the repository directory.
    pub fn try_parse(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        match name.strip_prefix(REF_PREFIX) {
            Some(branch) if BranchName::is_valid(branch) => Ok(Self(name)),
            _ => Err(Error::InvalidRef(name)),
        }
    }

    pub fn as_ref_path(&self) -> &str {
        &self.0
    }

    pub fn branch_name(&self) -> BranchName {
        let branch = self.0.strip_prefix(REF_PREFIX).unwrap_or(&self.0);
        BranchName(branch.to_string())
    }
}

impl std::fmt::Display for SymRefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if Self::is_valid(&name) {
            Ok(Self(name))
        } else {
            Err(Error::InvalidRef(format!("invalid branch name: {name}")))
        }
    }

    fn is_valid(name: &str) -> bool {
        !name.is_empty()
            && !name.contains("//")
            && regex::Regex::new(INVALID_BRANCH_NAME_REGEX).is_ok_and(|re| !re.is_match(name))
    }

    pub fn to_sym_ref_name(&self) -> SymRefName {
        SymRefName(format!("{REF_PREFIX}{}", self.0))
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
