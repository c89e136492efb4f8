//! Error types of the mapping loader and the identity resolver.

use crate::parser::ParsingError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading a name/code listing or a feature table.
///
/// Every variant names the input it stems from, record errors also the
/// 1-based line number and the offending record.
#[derive(Error, Debug)]
pub enum MappingError {
    #[error("Could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed input in {origin}: {source}")]
    Malformed {
        origin: String,
        source: ParsingError,
    },
    #[error("{origin} line {line}: expected {expected} fields but found {found} in record '{record}'")]
    FieldCount {
        origin: String,
        line: usize,
        expected: usize,
        found: usize,
        record: String,
    },
    #[error("{origin}: header has no column '{column}'")]
    MissingColumn { origin: String, column: String },
    #[error("{origin}: no header row")]
    MissingHeader { origin: String },
}

/// Errors of the identity resolver.
#[derive(Error, Debug, PartialEq)]
pub enum ResolveError {
    /// A code duplicated only in the feature table has several names in the
    /// reference listing, which the second disambiguation pass cannot handle.
    #[error("code '{code}' is ambiguous in the reference listing ({}) but was not resolved in the first pass", .names.join(", "))]
    AmbiguousReference { code: String, names: Vec<String> },
}
