//! Pipeline-level error type.

use crate::identity::{MappingError, ResolveError};
use crate::parser::ParsingError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors aborting a reconciliation run.
///
/// Any of these aborts the run before a single output file is written.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error - {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid tree file - {0}")]
    Parsing(#[from] ParsingError),
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("Could not load configuration {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Invalid configuration - {0}")]
    InvalidConfig(String),
    #[error("No trees found in {}", .0.display())]
    NoTrees(PathBuf),
    #[error("All leaves of tree {index} were pruned; the exclusion sets are likely misconfigured")]
    DegenerateTree { index: usize },
}
