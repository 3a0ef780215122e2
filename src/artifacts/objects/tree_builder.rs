//! Building tree objects from a flat list of file paths
//!
//! In the nested layout paths are split on `/` and every directory becomes its
//! own tree object, referenced from its parent with mode `40000`. The flat
//! layout writes every path as a single top-level entry.
//!
//! Subtrees are written before the tree that references them, since a parent
//! cannot be encoded until its children's IDs are known.

use crate::artifacts::core::config::{EntryOrder, TreeLayout};
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use crate::errors::{Error, Result};

#[derive(Debug, Clone)]
enum Node {
    Leaf { mode: EntryMode, oid: ObjectId },
    Directory(TreeBuilder),
}

/// Ownership tree of pending entries keyed by path segment
///
/// Keeps first-insertion order so [`EntryOrder::Given`] can reproduce the
/// caller's order.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    entries: Vec<(String, Node)>,
}

impl TreeBuilder {
    pub fn build<'p>(
        layout: TreeLayout,
        files: impl IntoIterator<Item = (&'p str, EntryMode, ObjectId)>,
    ) -> Result<Self> {
        let mut root = Self::default();

        for (path, mode, oid) in files {
            match layout {
                TreeLayout::Flat => root.insert(&[path], mode, oid),
                TreeLayout::Nested => root.insert(&split_path(path)?, mode, oid),
            }
        }

        Ok(root)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a leaf under `segments`, creating intermediate directories
    ///
    /// A later path replaces whatever an earlier one left under the same name,
    /// so `a` followed by `a/b` turns the file `a` into a directory.
    fn insert(&mut self, segments: &[&str], mode: EntryMode, oid: ObjectId) {
        let Some((name, rest)) = segments.split_first() else {
            return;
        };
        let position = self.entries.iter().position(|(entry, _)| entry == name);

        if rest.is_empty() {
            let leaf = Node::Leaf { mode, oid };
            match position {
                Some(index) => self.entries[index].1 = leaf,
                None => self.entries.push((name.to_string(), leaf)),
            }
            return;
        }

        let index = match position {
            Some(index) if matches!(self.entries[index].1, Node::Directory(_)) => index,
            Some(index) => {
                self.entries[index].1 = Node::Directory(Self::default());
                index
            }
            None => {
                self.entries
                    .push((name.to_string(), Node::Directory(Self::default())));
                self.entries.len() - 1
            }
        };

        if let Node::Directory(subtree) = &mut self.entries[index].1 {
            subtree.insert(rest, mode, oid);
        }
    }

    /// Write every subtree children-first, then this tree
    ///
    /// `store` persists one tree and returns its ID; the root's ID is returned.
    pub fn write<F>(self, order: EntryOrder, store: &mut F) -> Result<ObjectId>
    where
        F: FnMut(&Tree) -> Result<ObjectId>,
    {
        let mut entries = Vec::with_capacity(self.entries.len());
        for (name, node) in self.entries {
            let entry = match node {
                Node::Leaf { mode, oid } => TreeEntry::new(mode, name, oid)?,
                Node::Directory(subtree) => {
                    let oid = subtree.write(order, store)?;
                    TreeEntry::new(EntryMode::Directory, name, oid)?
                }
            };
            entries.push(entry);
        }

        let mut tree = Tree::new(entries);
        if order == EntryOrder::Sorted {
            tree.sort_canonical();
        }

        store(&tree)
    }
}

fn split_path(path: &str) -> Result<Vec<&str>> {
    let segments = path.split('/').collect::<Vec<_>>();
    if segments
        .iter()
        .any(|segment| segment.is_empty() || *segment == "." || *segment == "..")
    {
        return Err(Error::InvalidPath(path.to_string()));
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::blob::encode_blob;
    use crate::artifacts::objects::object::{Object, hash_of};
    use rstest::{fixture, rstest};
    use std::collections::HashMap;

    #[fixture]
    fn blob_oid() -> ObjectId {
        hash_of(&encode_blob(b"content"))
    }

    fn write_all(builder: TreeBuilder, order: EntryOrder) -> (ObjectId, HashMap<ObjectId, Tree>) {
        let mut written = HashMap::new();
        let mut store = |tree: &Tree| {
            let oid = tree.object_id();
            written.insert(oid.clone(), tree.clone());
            Ok(oid)
        };
        let root = builder.write(order, &mut store).unwrap();
        (root, written)
    }

    fn names(tree: &Tree) -> Vec<&str> {
        tree.entries().iter().map(|entry| entry.name.as_str()).collect()
    }

    #[rstest]
    fn nested_layout_creates_subtrees(blob_oid: ObjectId) {
        let files = vec![
            ("b.txt", EntryMode::default(), blob_oid.clone()),
            ("dir/sub/c.txt", EntryMode::default(), blob_oid.clone()),
            ("dir/a.txt", EntryMode::default(), blob_oid.clone()),
        ];
        let builder = TreeBuilder::build(TreeLayout::Nested, files).unwrap();
        let (root, written) = write_all(builder, EntryOrder::Sorted);

        pretty_assertions::assert_eq!(written.len(), 3);
        let root_tree = &written[&root];
        pretty_assertions::assert_eq!(names(root_tree), vec!["b.txt", "dir"]);

        let dir = root_tree.find("dir").unwrap();
        pretty_assertions::assert_eq!(dir.mode, EntryMode::Directory);
        pretty_assertions::assert_eq!(names(&written[&dir.oid]), vec!["a.txt", "sub"]);
    }

    #[rstest]
    fn flat_layout_keeps_slashes_in_names(blob_oid: ObjectId) {
        let files = vec![
            ("dir/a.txt", EntryMode::default(), blob_oid.clone()),
            ("b.txt", EntryMode::default(), blob_oid.clone()),
        ];
        let builder = TreeBuilder::build(TreeLayout::Flat, files).unwrap();
        let (root, written) = write_all(builder, EntryOrder::Given);

        pretty_assertions::assert_eq!(written.len(), 1);
        pretty_assertions::assert_eq!(names(&written[&root]), vec!["dir/a.txt", "b.txt"]);
    }

    #[rstest]
    fn given_order_changes_the_hash_sorted_order_does_not(blob_oid: ObjectId) {
        let forward = vec![
            ("a.txt", EntryMode::default(), blob_oid.clone()),
            ("b.txt", EntryMode::default(), blob_oid.clone()),
        ];
        let backward = forward.iter().rev().cloned().collect::<Vec<_>>();

        let hash = |files: Vec<(&str, EntryMode, ObjectId)>, order| {
            let builder = TreeBuilder::build(TreeLayout::Nested, files).unwrap();
            write_all(builder, order).0
        };

        assert_ne!(
            hash(forward.clone(), EntryOrder::Given),
            hash(backward.clone(), EntryOrder::Given)
        );
        pretty_assertions::assert_eq!(
            hash(forward, EntryOrder::Sorted),
            hash(backward, EntryOrder::Sorted)
        );
    }

    #[rstest]
    fn later_path_replaces_earlier_one(blob_oid: ObjectId) {
        let other = hash_of(&encode_blob(b"other"));
        let files = vec![
            ("a", EntryMode::default(), blob_oid.clone()),
            ("a/b", EntryMode::default(), blob_oid.clone()),
            ("c", EntryMode::default(), blob_oid),
            ("c", EntryMode::default(), other.clone()),
        ];
        let builder = TreeBuilder::build(TreeLayout::Nested, files).unwrap();
        let (root, written) = write_all(builder, EntryOrder::Given);

        let root_tree = &written[&root];
        pretty_assertions::assert_eq!(root_tree.find("a").unwrap().mode, EntryMode::Directory);
        pretty_assertions::assert_eq!(root_tree.find("c").unwrap().oid, other);
    }

    #[rstest]
    fn flat_layout_keeps_the_last_duplicate(blob_oid: ObjectId) {
        let other = hash_of(&encode_blob(b"other"));
        let files = vec![
            ("dir/a.txt", EntryMode::default(), blob_oid),
            ("dir/a.txt", EntryMode::default(), other.clone()),
        ];
        let builder = TreeBuilder::build(TreeLayout::Flat, files).unwrap();
        let (root, written) = write_all(builder, EntryOrder::Sorted);

        pretty_assertions::assert_eq!(written[&root].entries().len(), 1);
        pretty_assertions::assert_eq!(written[&root].find("dir/a.txt").unwrap().oid, other);
    }

    #[test]
    fn empty_input_builds_the_empty_tree() {
        let builder = TreeBuilder::build(TreeLayout::Nested, Vec::new()).unwrap();
        assert!(builder.is_empty());

        let (root, _) = write_all(builder, EntryOrder::Sorted);
        pretty_assertions::assert_eq!(root.as_ref(), "4b825dc642cb6eb9a060e54bf8d69288fbee4904");
    }

    #[rstest]
    #[case("")]
    #[case("/abs")]
    #[case("dir/")]
    #[case("a//b")]
    #[case("../escape")]
    #[case("./a")]
    fn rejects_unusable_paths(#[case] path: &str, blob_oid: ObjectId) {
        let err = TreeBuilder::build(TreeLayout::Nested, vec![(path, EntryMode::default(), blob_oid)])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
    }
}
