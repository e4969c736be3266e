//! Fixture loading and management.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use miniprintf_core::Arg;
use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// Fixture schema version this harness reads and writes.
pub const FIXTURE_VERSION: &str = "v1";

/// Destination size used when a case does not set `capacity`.
pub const DEFAULT_CAPACITY: usize = 256;

/// One formatting argument as stored in fixture JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FixtureArg {
    Int(i64),
    Uint(u64),
    Double(f64),
    Str(String),
    /// A null `char *`.
    NullStr,
    Ptr(u64),
}

impl FixtureArg {
    /// Borrow as an engine argument.
    #[must_use]
    pub fn to_arg(&self) -> Arg<'_> {
        match self {
            Self::Int(v) => Arg::Int(*v),
            Self::Uint(v) => Arg::Uint(*v),
            Self::Double(v) => Arg::Double(*v),
            Self::Str(s) => Arg::Str(Some(s.as_bytes())),
            Self::NullStr => Arg::Str(None),
            Self::Ptr(p) => Arg::Ptr(*p as usize),
        }
    }
}

impl fmt::Display for FixtureArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "int:{v}"),
            Self::Uint(v) => write!(f, "uint:{v}"),
            Self::Double(v) => write!(f, "double:{v:?}"),
            Self::Str(s) => write!(f, "str:{s}"),
            Self::NullStr => f.write_str("null"),
            Self::Ptr(p) => write!(f, "ptr:{p:#x}"),
        }
    }
}

/// Parses the command-line spelling: `int:-5`, `uint:0xff`, `double:2.5`,
/// `str:text`, `ptr:0x1000`, `null`.
impl FromStr for FixtureArg {
    type Err = HarnessError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw == "null" {
            return Ok(Self::NullStr);
        }
        let invalid = || HarnessError::InvalidArgument(raw.to_string());
        let (kind, value) = raw.split_once(':').ok_or_else(invalid)?;
        match kind {
            "int" => {
                let (negative, digits) = match value.strip_prefix('-') {
                    Some(rest) => (true, rest),
                    None => (false, value),
                };
                let magnitude = parse_unsigned(digits).ok_or_else(invalid)?;
                let v = if negative {
                    0i64.checked_sub_unsigned(magnitude)
                } else {
                    i64::try_from(magnitude).ok()
                };
                v.map(Self::Int).ok_or_else(invalid)
            }
            "uint" => parse_unsigned(value).map(Self::Uint).ok_or_else(invalid),
            "ptr" => parse_unsigned(value).map(Self::Ptr).ok_or_else(invalid),
            "double" => value.parse().map(Self::Double).map_err(|_| invalid()),
            "str" => Ok(Self::Str(value.to_string())),
            _ => Err(invalid()),
        }
    }
}

fn parse_unsigned(raw: &str) -> Option<u64> {
    let s = raw.trim().replace('_', "");
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Conversion family the case exercises (e.g. `integer`, `float/fixed`).
    pub section: String,
    pub format: String,
    pub args: Vec<FixtureArg>,
    /// Destination size handed to `snprintf`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
    /// Bytes stored before the terminator.
    pub expected_output: String,
    /// Value `snprintf` returns: the untruncated length.
    pub expected_return: usize,
}

impl FixtureCase {
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity.unwrap_or(DEFAULT_CAPACITY)
    }

    #[must_use]
    pub fn arguments(&self) -> Vec<Arg<'_>> {
        self.args.iter().map(FixtureArg::to_arg).collect()
    }

    /// Check that the expectations are self-consistent: the stored output is
    /// the returned length clipped to the capacity.
    pub fn validate(&self) -> Result<(), HarnessError> {
        let invalid = |message: String| HarnessError::InvalidFixture {
            case: self.name.clone(),
            message,
        };
        if self.name.trim().is_empty() {
            return Err(invalid("empty case name".to_string()));
        }
        let stored = self.expected_return.min(self.capacity().saturating_sub(1));
        if self.expected_output.len() != stored {
            return Err(invalid(format!(
                "expected_output has {} bytes but return {} with capacity {} stores {stored}",
                self.expected_output.len(),
                self.expected_return,
                self.capacity()
            )));
        }
        Ok(())
    }
}

/// A collection of fixture cases for a function family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Function family name.
    pub family: String,
    /// UTC timestamp of capture.
    pub captured_at: String,
    /// Individual test cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load and validate a fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path)?;
        let set = Self::from_json(&content)?;
        set.validate()?;
        Ok(set)
    }

    /// Schema version, unique case names, and per-case consistency.
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.version != FIXTURE_VERSION {
            return Err(HarnessError::InvalidFixture {
                case: self.family.clone(),
                message: format!(
                    "unsupported version '{}', expected {FIXTURE_VERSION}",
                    self.version
                ),
            });
        }
        let mut seen = BTreeSet::new();
        for case in &self.cases {
            if !seen.insert(case.name.as_str()) {
                return Err(HarnessError::InvalidFixture {
                    case: case.name.clone(),
                    message: "duplicate case name".to_string(),
                });
            }
            case.validate()?;
        }
        Ok(())
    }
}

/// Paths of all `*.json` files in `dir`, sorted.
pub fn fixture_paths(dir: &Path) -> Result<Vec<PathBuf>, HarnessError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_SET: &str = r#"{
        "version":"v1",
        "family":"stdio/printf",
        "captured_at":"2026-10-17T00:00:00Z",
        "cases":[
            {"name":"pad","section":"integer","format":"%05d","args":[{"type":"int","value":-42}],"expected_output":"-0042","expected_return":5},
            {"name":"trunc","section":"capacity","format":"%s","args":[{"type":"str","value":"hello"}],"capacity":4,"expected_output":"hel","expected_return":5},
            {"name":"nil","section":"string","format":"%s","args":[{"type":"null_str"}],"expected_output":"(null)","expected_return":6}
        ]
    }"#;

    #[test]
    fn parses_tagged_arguments() {
        let set = FixtureSet::from_json(SMALL_SET).expect("valid fixture json");
        assert_eq!(set.cases.len(), 3);
        assert_eq!(set.cases[0].args, vec![FixtureArg::Int(-42)]);
        assert_eq!(set.cases[1].capacity(), 4);
        assert_eq!(set.cases[2].args, vec![FixtureArg::NullStr]);
        assert_eq!(set.cases[2].capacity(), DEFAULT_CAPACITY);
        set.validate().expect("consistent fixture");
    }

    #[test]
    fn round_trips_through_json() {
        let set = FixtureSet::from_json(SMALL_SET).expect("valid fixture json");
        let again = FixtureSet::from_json(&set.to_json().expect("serialize")).expect("reparse");
        assert_eq!(again.cases[1].capacity, Some(4));
        assert_eq!(again.cases[2].args, set.cases[2].args);
    }

    #[test]
    fn rejects_inconsistent_expectation() {
        let mut set = FixtureSet::from_json(SMALL_SET).expect("valid fixture json");
        set.cases[1].expected_output = "hell".to_string();
        let err = set.validate().expect_err("truncation mismatch");
        assert!(matches!(err, HarnessError::InvalidFixture { ref case, .. } if case == "trunc"));
    }

    #[test]
    fn rejects_duplicate_names_and_unknown_version() {
        let mut set = FixtureSet::from_json(SMALL_SET).expect("valid fixture json");
        set.cases[1].name = "pad".to_string();
        assert!(set.validate().is_err());

        let mut set = FixtureSet::from_json(SMALL_SET).expect("valid fixture json");
        set.version = "v2".to_string();
        assert!(set.validate().is_err());
    }

    #[test]
    fn command_line_arguments_parse() {
        assert_eq!("int:-7".parse::<FixtureArg>().ok(), Some(FixtureArg::Int(-7)));
        assert_eq!(
            "int:-9223372036854775808".parse::<FixtureArg>().ok(),
            Some(FixtureArg::Int(i64::MIN))
        );
        assert_eq!("uint:0xff".parse::<FixtureArg>().ok(), Some(FixtureArg::Uint(255)));
        assert_eq!("double:2.5".parse::<FixtureArg>().ok(), Some(FixtureArg::Double(2.5)));
        assert_eq!(
            "str:a:b".parse::<FixtureArg>().ok(),
            Some(FixtureArg::Str("a:b".to_string()))
        );
        assert_eq!("null".parse::<FixtureArg>().ok(), Some(FixtureArg::NullStr));
        assert_eq!("ptr:4096".parse::<FixtureArg>().ok(), Some(FixtureArg::Ptr(4096)));
        assert!("int:9223372036854775808".parse::<FixtureArg>().is_err());
        assert!("float:1".parse::<FixtureArg>().is_err());
        assert!("42".parse::<FixtureArg>().is_err());
    }

    #[test]
    fn display_matches_parse() {
        for arg in [
            FixtureArg::Int(-3),
            FixtureArg::Uint(9),
            FixtureArg::Double(0.1),
            FixtureArg::Str("x y".to_string()),
            FixtureArg::NullStr,
        ] {
            assert_eq!(arg.to_string().parse::<FixtureArg>().ok(), Some(arg));
        }
    }
}
