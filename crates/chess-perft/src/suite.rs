//! Perft suite files.
//!
//! A suite is a TOML file holding a list of `[[case]]` tables, each naming a
//! position and the node count expected at a given depth.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a suite file.
#[derive(Error, Debug)]
pub enum SuiteError {
    /// Failed to read the suite file from disk.
    #[error("Failed to read suite file: {0}")]
    Read(#[from] std::io::Error),
    /// The suite file is not valid TOML or is missing case fields.
    #[error("Failed to parse suite: {0}")]
    Parse(#[from] toml::de::Error),
}

/// One position with its expected node count.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PerftCase {
    pub name: String,
    pub fen: String,
    pub depth: u32,
    pub nodes: u64,
}

#[derive(Debug, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct Suite {
    #[serde(default, rename = "case")]
    pub cases: Vec<PerftCase>,
}

impl Suite {
    /// Reads and parses a suite file.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError::Read`] if the file cannot be read, or
    /// [`SuiteError::Parse`] if it is not a valid suite.
    pub fn load(path: &Path) -> Result<Self, SuiteError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Cases no deeper than `max_depth`, or every case when there is no limit.
    pub fn cases_within(&self, max_depth: Option<u32>) -> impl Iterator<Item = &PerftCase> {
        self.cases
            .iter()
            .filter(move |case| max_depth.map_or(true, |max| case.depth <= max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUITE: &str = r#"
[[case]]
name = "startpos"
fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
depth = 3
nodes = 8902

[[case]]
name = "position 3"
fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"
depth = 5
nodes = 674624
"#;

    #[test]
    fn test_parse_suite() {
        let suite: Suite = toml::from_str(SUITE).unwrap();
        assert_eq!(suite.cases.len(), 2);
        assert_eq!(suite.cases[0].name, "startpos");
        assert_eq!(suite.cases[0].depth, 3);
        assert_eq!(suite.cases[0].nodes, 8_902);
        assert_eq!(suite.cases[1].fen, "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1");
    }

    #[test]
    fn test_empty_suite() {
        let suite: Suite = toml::from_str("").unwrap();
        assert_eq!(suite, Suite::default());
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let result: Result<Suite, _> = toml::from_str("[[case]]\nname = \"x\"\ndepth = 1\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_cases_within_depth() {
        let suite: Suite = toml::from_str(SUITE).unwrap();
        let shallow: Vec<_> = suite.cases_within(Some(4)).map(|c| c.name.as_str()).collect();
        assert_eq!(shallow, vec!["startpos"]);
        assert_eq!(suite.cases_within(None).count(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Suite::load(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, SuiteError::Read(_)));
    }

    #[test]
    fn test_bundled_suite_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("perft-suite.toml");
        let suite = Suite::load(&path).unwrap();
        assert!(!suite.cases.is_empty());
        for case in &suite.cases {
            assert!(chess_rules::Game::from_fen(&case.fen).is_ok(), "{}", case.name);
        }
    }
}
