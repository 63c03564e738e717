//! Repository configuration
//!
//! - Store layout names (`.twig`, `objects`, `index`, `HEAD`)
//! - Ignore patterns read from `.twigignore`
//! - `TWIG_LOG` log filter, read by the binary at startup

use crate::errors::Result;
use regex::Regex;
use std::path::Path;

/// Name of the store directory placed at the repository root
pub const STORE_DIR: &str = ".twig";

pub const OBJECTS_DIR: &str = "objects";

pub const INDEX_FILE: &str = "index";

pub const HEAD_FILE: &str = "HEAD";

/// Optional ignore file at the repository root, one regex per line
pub const IGNORE_FILE: &str = ".twigignore";

/// Environment variable holding the `tracing` filter directives
pub const LOG_ENV: &str = "TWIG_LOG";

/// Always excludes the store's own directory
const STORE_PATTERN: &str = r"/\.twig/";

/// Regexes matched anywhere in a file's path string
#[derive(Debug, Clone)]
pub struct IgnorePatterns {
    patterns: Vec<Regex>,
}

impl IgnorePatterns {
    /// Load the implicit store pattern plus every line of `<root>/.twigignore`
    pub fn load(root: &Path) -> Result<Self> {
        let ignore_path = root.join(IGNORE_FILE);
        let content = if ignore_path.is_file() {
            std::fs::read_to_string(&ignore_path)?
        } else {
            String::new()
        };

        let patterns = Self::parse(&content)?;
        tracing::debug!(count = patterns.patterns.len(), "ignore patterns loaded");

        Ok(patterns)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let patterns = std::iter::once(STORE_PATTERN)
            .chain(content.lines().map(str::trim).filter(|line| !line.is_empty()))
            .map(Regex::new)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(IgnorePatterns { patterns })
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.patterns.iter().any(|pattern| pattern.is_match(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use rstest::rstest;

    #[rstest]
    #[case("/repo/.twig/objects/ab/cdef", true)]
    #[case("/repo/.twig/index", true)]
    #[case("/repo/src/.twigrc", false)]
    #[case("/repo/src/main.rs", false)]
    fn store_directory_is_always_ignored(#[case] path: &str, #[case] ignored: bool) {
        let patterns = IgnorePatterns::parse("").unwrap();
        assert_eq!(patterns.is_ignored(Path::new(path)), ignored);
    }

    #[rstest]
    #[case("/repo/target/debug/app", true)]
    #[case("/repo/notes.log", true)]
    #[case("/repo/src/logger.rs", false)]
    #[case("/repo/src/main.rs", false)]
    fn patterns_match_anywhere_in_path(#[case] path: &str, #[case] ignored: bool) {
        let patterns = IgnorePatterns::parse("target/\n\n   \\.log$  \n").unwrap();
        assert_eq!(patterns.is_ignored(Path::new(path)), ignored);
    }

    #[test]
    fn invalid_pattern_is_reported() {
        assert!(matches!(
            IgnorePatterns::parse("(unclosed"),
            Err(Error::InvalidIgnorePattern(_))
        ));
    }
}
