use crate::artifacts::objects::object::DecodeError;

#[derive(Debug, Clone, Copy, Eq, Ord, Default, PartialEq, PartialOrd)]
pub enum FileMode {
    #[default]
    Regular,
    Executable,
}

/// Mode of a tree entry, written as an octal string in the tree payload
///
/// Symlinks and gitlinks are never produced by the commit builder but are
/// read back from trees written elsewhere.
#[derive(Debug, Clone, Copy, Eq, Ord, PartialEq, PartialOrd)]
pub enum EntryMode {
    File(FileMode),
    Directory,
    Symlink,
    /// Submodule commit
    Gitlink,
}

impl Default for EntryMode {
    fn default() -> Self {
        EntryMode::File(FileMode::Regular)
    }
}

impl EntryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryMode::File(FileMode::Regular) => "100644",
            EntryMode::File(FileMode::Executable) => "100755",
            EntryMode::Directory => "40000",
            EntryMode::Symlink => "120000",
            EntryMode::Gitlink => "160000",
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, EntryMode::Directory)
    }
}

impl From<FileMode> for EntryMode {
    fn from(mode: FileMode) -> Self {
        EntryMode::File(mode)
    }
}

impl TryFrom<&str> for EntryMode {
    type Error = DecodeError;

    fn try_from(value: &str) -> Result<Self, DecodeError> {
        match value {
            "100644" => Ok(EntryMode::File(FileMode::Regular)),
            "100755" => Ok(EntryMode::File(FileMode::Executable)),
            "40000" => Ok(EntryMode::Directory),
            "120000" => Ok(EntryMode::Symlink),
            "160000" => Ok(EntryMode::Gitlink),
            _ => Err(DecodeError::new(format!("invalid entry mode {value:?}"))),
        }
    }
}

impl std::fmt::Display for EntryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("100644", EntryMode::File(FileMode::Regular))]
    #[case("100755", EntryMode::File(FileMode::Executable))]
    #[case("40000", EntryMode::Directory)]
    #[case("120000", EntryMode::Symlink)]
    #[case("160000", EntryMode::Gitlink)]
    fn parses_modes_git_writes(#[case] raw: &str, #[case] expected: EntryMode) {
        let mode = EntryMode::try_from(raw).unwrap();

        pretty_assertions::assert_eq!(mode, expected);
        pretty_assertions::assert_eq!(mode.as_str(), raw);
    }

    #[rstest]
    #[case("040000")]
    #[case("100664")]
    #[case("")]
    fn rejects_unknown_modes(#[case] raw: &str) {
        assert!(EntryMode::try_from(raw).is_err());
    }
}
