//! Arena-based tree builder
//!
//! Every file and directory below the repository root becomes a node in a flat
//! arena and directories refer to their children by `NodeId`. Paths are only
//! hashed while registering entries; the post-order walk that writes tree
//! objects works purely on indices.
//!
//! ## Ordering
//!
//! A directory lists its children in the order they were first attached while
//! walking the index from first to last entry. Children are never sorted, so
//! the root address depends on discovery order as well as on content.

use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{DIRECTORY_MODE, Tree, TreeEntry};
use crate::errors::{Error, Result};
use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Index of a node inside the builder's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
enum NodeKind {
    File { mode: u32, oid: ObjectId },
    Directory { children: Vec<NodeId>, oid: Option<ObjectId> },
}

#[derive(Debug)]
struct Node {
    /// Final path segment, used as the entry name in the parent tree
    name: OsString,
    kind: NodeKind,
    attached: bool,
}

#[derive(Debug)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
    lookup: HashMap<PathBuf, NodeId>,
    root: NodeId,
}

impl TreeBuilder {
    /// Register every index entry and its ancestor directories below `root`
    ///
    /// Fails with `UnmanagedFile` as soon as an entry turns out not to live
    /// under `root`; nothing is written in that case.
    pub fn new(root: &Path, entries: &[IndexEntry]) -> Result<Self> {
        let mut builder = TreeBuilder {
            nodes: Vec::new(),
            lookup: HashMap::new(),
            root: NodeId(0),
        };
        builder.root = builder.insert(root, Self::directory(root));

        for entry in entries {
            builder.register_file(root, entry)?;
        }

        for entry in entries {
            builder.attach_ancestors(root, &entry.path)?;
        }

        Ok(builder)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Children of a directory node in attachment order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.nodes[id.0].kind {
            NodeKind::Directory { children, .. } => children,
            NodeKind::File { .. } => &[],
        }
    }

    /// Address written for a directory node, once `build` has visited it
    pub fn tree_oid(&self, id: NodeId) -> Option<&ObjectId> {
        match &self.nodes[id.0].kind {
            NodeKind::Directory { oid, .. } => oid.as_ref(),
            NodeKind::File { .. } => None,
        }
    }

    pub fn name(&self, id: NodeId) -> &OsStr {
        &self.nodes[id.0].name
    }

    /// Write one tree per directory, children before parents
    ///
    /// `store` persists a tree and returns its address. The address of the
    /// root tree is returned.
    pub fn build<F>(&mut self, store: &mut F) -> Result<ObjectId>
    where
        F: FnMut(&Tree) -> Result<ObjectId>,
    {
        self.write_directory(self.root, store)
    }

    fn write_directory<F>(&mut self, id: NodeId, store: &mut F) -> Result<ObjectId>
    where
        F: FnMut(&Tree) -> Result<ObjectId>,
    {
        let children = self.children(id).to_vec();

        let mut tree = Tree::default();
        for child in children {
            let (mode, oid) = match self.file(child) {
                Some(file) => file,
                None => (DIRECTORY_MODE, self.write_directory(child, store)?),
            };
            tree.push(TreeEntry::new(mode, self.nodes[child.0].name.clone(), oid));
        }

        let tree_oid = store(&tree)?;
        if let NodeKind::Directory { oid, .. } = &mut self.nodes[id.0].kind {
            *oid = Some(tree_oid.clone());
        }

        Ok(tree_oid)
    }

    fn file(&self, id: NodeId) -> Option<(u32, ObjectId)> {
        match &self.nodes[id.0].kind {
            NodeKind::File { mode, oid } => Some((*mode, oid.clone())),
            NodeKind::Directory { .. } => None,
        }
    }

    fn register_file(&mut self, root: &Path, entry: &IndexEntry) -> Result<()> {
        if entry.path == root {
            return Err(Error::UnmanagedFile(entry.path.clone()));
        }

        let kind = NodeKind::File {
            mode: entry.mode,
            oid: entry.oid.clone(),
        };

        match self.lookup.get(entry.path.as_path()) {
            // a later entry for the same path replaces the earlier one
            Some(&id) => self.nodes[id.0].kind = kind,
            None => {
                self.insert(&entry.path, Node::new(Self::segment(&entry.path), kind));
            }
        }

        Ok(())
    }

    fn attach_ancestors(&mut self, root: &Path, file_path: &Path) -> Result<()> {
        let mut path = file_path;

        loop {
            let parent = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .ok_or_else(|| Error::UnmanagedFile(file_path.to_path_buf()))?;

            let parent_id = match self.lookup.get(parent) {
                Some(&id) => id,
                None => self.insert(parent, Self::directory(parent)),
            };
            let child_id = self.lookup[path];
            self.attach(parent_id, child_id, parent)?;

            if parent == root {
                return Ok(());
            }
            path = parent;
        }
    }

    fn attach(&mut self, parent: NodeId, child: NodeId, parent_path: &Path) -> Result<()> {
        if self.nodes[child.0].attached {
            return Ok(());
        }

        match &mut self.nodes[parent.0].kind {
            NodeKind::Directory { children, .. } => children.push(child),
            NodeKind::File { .. } => {
                return Err(Error::IndexCorrupt(format!(
                    "{} is tracked both as a file and as a directory",
                    parent_path.display()
                )));
            }
        }
        self.nodes[child.0].attached = true;

        Ok(())
    }

    fn insert(&mut self, path: &Path, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.lookup.insert(path.to_path_buf(), id);
        id
    }

    fn directory(path: &Path) -> Node {
        Node::new(
            Self::segment(path),
            NodeKind::Directory {
                children: Vec::new(),
                oid: None,
            },
        )
    }

    fn segment(path: &Path) -> OsString {
        path.file_name().map(OsStr::to_os_string).unwrap_or_default()
    }
}

impl Node {
    fn new(name: OsString, kind: NodeKind) -> Self {
        Node {
            name,
            kind,
            attached: false,
        }
    }
}
