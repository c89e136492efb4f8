//! Low-level parsing infrastructure.
//!
//! This module provides the byte parser shared by the Newick parser, the
//! NEXUS tree extraction and the delimited record reader, along with the
//! error type and label quoting helpers.

pub mod byte_parser;
pub mod byte_source;
pub mod parsing_error;
pub mod records;
pub mod utils;

pub use parsing_error::ParsingError;
