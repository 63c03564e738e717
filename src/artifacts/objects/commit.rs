//! Commit object
//!
//! A commit wraps the address of a root tree, an optional parent commit and a
//! message.
//!
//! ## Format
//!
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>      (omitted for the first commit)
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{Object, Unpackable, invalid_data};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::io::{self, BufRead};

#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Commit {
    tree_oid: ObjectId,
    parent: Option<ObjectId>,
    message: String,
}

impl Commit {
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> io::Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        let (headers, message) = content
            .split_once("\n\n")
            .ok_or_else(|| invalid_data("commit is missing the message separator"))?;
        let mut lines = headers.lines();

        let tree_oid = lines
            .next()
            .and_then(|line| line.strip_prefix("tree "))
            .ok_or_else(|| invalid_data("commit is missing its tree line"))?;
        let tree_oid =
            ObjectId::try_parse(tree_oid).map_err(|e| invalid_data(e.to_string()))?;

        let parent = match lines.next() {
            None => None,
            Some(line) => {
                let parent = line
                    .strip_prefix("parent ")
                    .ok_or_else(|| invalid_data("unexpected commit header line"))?;
                Some(ObjectId::try_parse(parent).map_err(|e| invalid_data(e.to_string()))?)
            }
        };

        if lines.next().is_some() {
            return Err(invalid_data("unexpected commit header line"));
        }

        let message = message.strip_suffix('\n').unwrap_or(message).to_string();

        Ok(Self::new(tree_oid, parent, message))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn payload(&self) -> io::Result<Bytes> {
        Ok(Bytes::from(self.display()))
    }

    fn display(&self) -> String {
        let mut content = format!("tree {}\n", self.tree_oid);
        if let Some(parent) = &self.parent {
            content.push_str(&format!("parent {parent}\n"));
        }
        content.push('\n');
        content.push_str(&self.message);
        content.push('\n');

        content
    }
}
