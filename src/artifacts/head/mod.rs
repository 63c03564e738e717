//! HEAD pointer record
//!
//! HEAD is a small `key: value` text file:
//!
//! ```text
//! latest: <commit-sha>
//! current: <commit-sha>
//! ```
//!
//! Both keys are always written with the same address. They are kept apart in
//! the file so that readers written against either key keep working.

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Regex pattern for one `key: value` line
static HEAD_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([^:\s]+)\s*:\s*([^:]*?)\s*$").expect("valid HEAD regex"));

pub const LATEST_KEY: &str = "latest";
pub const CURRENT_KEY: &str = "current";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadRecord {
    latest: Option<ObjectId>,
    current: Option<ObjectId>,
}

impl HeadRecord {
    pub fn latest(&self) -> Option<&ObjectId> {
        self.latest.as_ref()
    }

    pub fn current(&self) -> Option<&ObjectId> {
        self.current.as_ref()
    }

    /// Record pointing both keys at `commit`
    pub fn advance(self, commit: ObjectId) -> Self {
        HeadRecord {
            latest: Some(commit.clone()),
            current: Some(commit),
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut record = HeadRecord::default();

        for line in content.lines().filter(|line| !line.trim().is_empty()) {
            let captures = HEAD_LINE
                .captures(line)
                .ok_or_else(|| Error::HeadCorrupt(format!("malformed line {line:?}")))?;
            let value = || {
                ObjectId::try_parse(&captures[2])
                    .map_err(|_| Error::HeadCorrupt(format!("invalid address {:?}", &captures[2])))
            };

            match &captures[1] {
                LATEST_KEY => record.latest = Some(value()?),
                CURRENT_KEY => record.current = Some(value()?),
                key => tracing::debug!(key, "ignoring unknown HEAD key"),
            }
        }

        Ok(record)
    }

    pub fn render(&self) -> String {
        let mut content = String::new();
        if let Some(latest) = &self.latest {
            content.push_str(&format!("{LATEST_KEY}: {latest}\n"));
        }
        if let Some(current) = &self.current {
            content.push_str(&format!("{CURRENT_KEY}: {current}\n"));
        }
        content
    }
}
