//! Tree object
//!
//! Trees are directory snapshots: an ordered list of `(mode, name, oid)` entries
//! pointing at blobs or nested trees.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! Entry references are raw hash bytes, unlike commits which reference their
//! tree and parent in hex text.

use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::{DecodeError, Object, Packable, Unpackable, with_header};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::Bytes;
use std::cmp::Ordering;
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: EntryMode,
    pub name: String,
    pub oid: ObjectId,
}

impl TreeEntry {
    /// Create an entry, rejecting names that cannot be encoded
    pub fn new(mode: EntryMode, name: impl Into<String>, oid: ObjectId) -> Result<Self> {
        let name = name.into();
        if name.is_empty() || name.contains('\0') {
            return Err(Error::InvalidPath(name));
        }

        Ok(TreeEntry { mode, name, oid })
    }

    /// Create an entry from a hex hash, as handed in by callers outside the codec
    ///
    /// A malformed hash is rejected with [`Error::InvalidHash`] before anything
    /// is encoded.
    pub fn from_hex(mode: EntryMode, name: impl Into<String>, hash_hex: &str) -> Result<Self> {
        Self::new(mode, name, ObjectId::try_parse(hash_hex)?)
    }

    pub fn object_type(&self) -> ObjectType {
        match self.mode {
            EntryMode::Directory => ObjectType::Tree,
            EntryMode::Gitlink => ObjectType::Commit,
            EntryMode::File(_) | EntryMode::Symlink => ObjectType::Blob,
        }
    }

    /// Name as it takes part in canonical ordering: directories sort as `name/`
    fn sort_key(&self) -> impl Iterator<Item = u8> + '_ {
        let suffix = self.mode.is_tree().then_some(b'/');
        self.name.bytes().chain(suffix)
    }

    fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(other.sort_key())
    }
}

/// Encode an ordered list of entries as a tree object
///
/// Entries are written in the order given.
pub fn encode_tree(entries: &[TreeEntry]) -> Bytes {
    let mut content_bytes = Vec::new();
    for entry in entries {
        content_bytes.extend_from_slice(entry.mode.as_str().as_bytes());
        content_bytes.push(b' ');
        content_bytes.extend_from_slice(entry.name.as_bytes());
        content_bytes.push(0);
        content_bytes.extend_from_slice(&entry.oid.to_raw_bytes());
    }

    with_header(ObjectType::Tree, &content_bytes)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new(entries: Vec<TreeEntry>) -> Self {
        Tree { entries }
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<TreeEntry> {
        self.entries
    }

    pub fn find(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Reorder entries the way git does, directories compared as `name/`
    pub fn sort_canonical(&mut self) {
        self.entries.sort_by(TreeEntry::canonical_cmp);
    }
}

impl Packable for Tree {
    fn serialize(&self) -> Bytes {
        encode_tree(&self.entries)
    }
}

impl Unpackable for Tree {
    fn deserialize(mut reader: impl BufRead) -> std::result::Result<Self, DecodeError> {
        let mut entries = Vec::new();

        // Reuse scratch buffers to reduce allocs
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            // Read "mode " (space-delimited)
            let n = reader.read_until(b' ', &mut mode_bytes)?;
            if n == 0 {
                break; // clean EOF: no more entries
            }
            if mode_bytes.pop() != Some(b' ') {
                return Err(DecodeError::new("unexpected EOF in mode"));
            }
            let mode = std::str::from_utf8(&mode_bytes)
                .map_err(|_| DecodeError::new("entry mode is not ASCII"))?;
            let mode = EntryMode::try_from(mode)?;

            // Read "name\0"
            name_bytes.clear();
            reader.read_until(b'\0', &mut name_bytes)?;
            if name_bytes.pop() != Some(b'\0') {
                return Err(DecodeError::new("unexpected EOF in name"));
            }
            let name = String::from_utf8(name_bytes.clone())
                .map_err(|_| DecodeError::new("entry name is not UTF-8"))?;

            let oid = ObjectId::read_h40_from(&mut reader)
                .map_err(|_| DecodeError::new("unexpected EOF in object id"))?;

            entries.push(TreeEntry { mode, name, oid });
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "{:0>6} {} {}\t{}",
                    entry.mode.as_str(),
                    entry.object_type(),
                    entry.oid,
                    entry.name
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::blob::encode_blob;
    use crate::artifacts::objects::entry_mode::FileMode;
    use crate::artifacts::objects::object::{hash_of, split_header};
    use rstest::{fixture, rstest};
    use std::io::Cursor;

    #[fixture]
    fn hello_oid() -> ObjectId {
        hash_of(&encode_blob(b"hello"))
    }

    #[test]
    fn empty_tree_matches_git() {
        let encoded = encode_tree(&[]);

        pretty_assertions::assert_eq!(&encoded[..], b"tree 0\0");
        pretty_assertions::assert_eq!(
            hash_of(&encoded).as_ref(),
            "4b825dc642cb6eb9a060e54bf8d69288fbee4904"
        );
    }

    #[rstest]
    fn entry_hash_is_stored_as_raw_bytes(hello_oid: ObjectId) {
        let entry = TreeEntry::new(FileMode::Regular.into(), "a.txt", hello_oid.clone()).unwrap();
        let encoded = encode_tree(&[entry]);

        let mut expected = b"tree 33\0100644 a.txt\0".to_vec();
        expected.extend_from_slice(&hello_oid.to_raw_bytes());
        pretty_assertions::assert_eq!(encoded.to_vec(), expected);
    }

    #[test]
    fn from_hex_rejects_invalid_hash() {
        let err = TreeEntry::from_hex(EntryMode::default(), "a.txt", "not-a-hash").unwrap_err();
        assert!(matches!(err, Error::InvalidHash(_)));
    }

    #[rstest]
    #[case("")]
    #[case("a\0b")]
    fn rejects_unencodable_names(#[case] name: &str, hello_oid: ObjectId) {
        let err = TreeEntry::new(EntryMode::default(), name, hello_oid).unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
    }

    #[rstest]
    fn entries_keep_caller_order(hello_oid: ObjectId) {
        let tree = Tree::new(vec![
            TreeEntry::new(EntryMode::default(), "b.txt", hello_oid.clone()).unwrap(),
            TreeEntry::new(EntryMode::default(), "a.txt", hello_oid.clone()).unwrap(),
        ]);
        let encoded = tree.serialize();
        let (_, payload) = split_header(&encoded).unwrap();

        let decoded = Tree::deserialize(Cursor::new(payload)).unwrap();
        let names = decoded
            .entries()
            .iter()
            .map(|entry| entry.name.as_str())
            .collect::<Vec<_>>();
        pretty_assertions::assert_eq!(names, vec!["b.txt", "a.txt"]);
        pretty_assertions::assert_eq!(decoded, tree);
    }

    #[rstest]
    fn canonical_order_sorts_directories_with_trailing_slash(hello_oid: ObjectId) {
        let mut tree = Tree::new(vec![
            TreeEntry::new(EntryMode::default(), "a.txt", hello_oid.clone()).unwrap(),
            TreeEntry::new(EntryMode::Directory, "a", hello_oid.clone()).unwrap(),
            TreeEntry::new(EntryMode::default(), "a-b", hello_oid.clone()).unwrap(),
        ]);
        tree.sort_canonical();

        let names = tree
            .entries()
            .iter()
            .map(|entry| entry.name.as_str())
            .collect::<Vec<_>>();
        // '-' (0x2d) < '.' (0x2e) < '/' (0x2f)
        pretty_assertions::assert_eq!(names, vec!["a-b", "a.txt", "a"]);
    }

    #[rstest]
    fn symlink_and_gitlink_entries_decode(hello_oid: ObjectId) {
        let mut payload = b"120000 link\0".to_vec();
        payload.extend_from_slice(&hello_oid.to_raw_bytes());
        payload.extend_from_slice(b"160000 vendor\0");
        payload.extend_from_slice(&hello_oid.to_raw_bytes());

        let tree = Tree::deserialize(Cursor::new(payload)).unwrap();

        pretty_assertions::assert_eq!(tree.entries()[0].mode, EntryMode::Symlink);
        pretty_assertions::assert_eq!(tree.entries()[0].object_type(), ObjectType::Blob);
        pretty_assertions::assert_eq!(tree.entries()[1].mode, EntryMode::Gitlink);
        pretty_assertions::assert_eq!(tree.entries()[1].object_type(), ObjectType::Commit);
        assert!(tree.display().contains("160000 commit"));
    }

    #[test]
    fn truncated_entry_is_rejected() {
        let payload = b"100644 a.txt\0\x01\x02".to_vec();
        assert!(Tree::deserialize(Cursor::new(payload)).is_err());
    }
}
