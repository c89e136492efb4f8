//! Mapping loader: turns the raw listings of both sources into
//! [NameCodeMapping]s.
//!
//! Two input shapes are supported:
//! - The *reference listing* belonging to the tree: one `code<TAB>name`
//!   record per line. A sentinel code (`XXX` by default) marks languages
//!   without a code; those are collected as untranslatable instead of
//!   entering the mapping. An empty code is treated like the sentinel.
//! - The *feature table* export: a header row followed by data rows, with a
//!   name column and a code column found by header name. Rows whose code is
//!   the placeholder (`?` by default) or empty are ignored.
//!
//! Malformed records (wrong field count) fail fast with
//! [MappingError::FieldCount]. No disambiguation happens here.

use crate::identity::error::MappingError;
use crate::identity::mapping::NameCodeMapping;
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::InMemoryByteSource;
use crate::parser::records::{Record, RecordReader};
use std::path::Path;
use tracing::{info, warn};

/// Number of fields of a reference listing record: code and name
const LISTING_FIELDS: usize = 2;

// ============================================================================
// Formats
// ============================================================================
/// Layout of a reference listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingFormat {
    /// Field delimiter, tab by default
    pub delimiter: u8,
    /// Code marking a name without code, `XXX` by default
    pub untranslatable_code: String,
}

impl Default for ListingFormat {
    fn default() -> Self {
        Self {
            delimiter: b'\t',
            untranslatable_code: "XXX".to_string(),
        }
    }
}

/// Layout of a feature table export.
#[derive(Debug, Clone, PartialEq)]
pub struct TableFormat {
    /// Field delimiter, comma by default
    pub delimiter: u8,
    /// Header of the column holding language names
    pub name_column: String,
    /// Header of the column holding codes
    pub code_column: String,
    /// Placeholder for a missing code, `?` by default
    pub missing_code: String,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            delimiter: b',',
            name_column: "Name".to_string(),
            code_column: "iso_code".to_string(),
            missing_code: "?".to_string(),
        }
    }
}

// ============================================================================
// Reference listing
// ============================================================================
/// Result of loading a reference listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceListing {
    /// Names with a code
    pub mapping: NameCodeMapping,
    /// Names marked as having no code, in input order
    pub untranslatable: Vec<String>,
}

/// Loads a reference listing from a file.
pub fn load_reference_listing<P: AsRef<Path>>(
    path: P,
    format: &ListingFormat,
) -> Result<ReferenceListing, MappingError> {
    let path = path.as_ref();
    let records = read_records(path, format.delimiter)?;
    let listing = reference_listing_from_records(records, &path.display().to_string(), format)?;

    info!(
        "Loaded {} names with code and {} untranslatable names from {}",
        listing.mapping.len(),
        listing.untranslatable.len(),
        path.display()
    );
    Ok(listing)
}

/// Parses a reference listing from a string; `origin` names the input in errors.
pub fn parse_reference_listing(
    input: &str,
    origin: &str,
    format: &ListingFormat,
) -> Result<ReferenceListing, MappingError> {
    let records = split_records(ByteParser::for_str(input), format.delimiter, origin)?;
    reference_listing_from_records(records, origin, format)
}

fn reference_listing_from_records(
    records: Vec<Record>,
    origin: &str,
    format: &ListingFormat,
) -> Result<ReferenceListing, MappingError> {
    let mut listing = ReferenceListing::default();

    for record in records {
        check_field_count(&record, LISTING_FIELDS, origin, format.delimiter)?;
        let code = record.fields[0].trim();
        let name = record.fields[1].trim();

        if code.is_empty() {
            warn!("{origin} line {}: '{name}' has no code, treated as untranslatable", record.line);
            listing.untranslatable.push(name.to_string());
        } else if code == format.untranslatable_code {
            listing.untranslatable.push(name.to_string());
        } else if let Some(previous) = listing.mapping.insert(name, code) {
            warn!(
                "{origin} line {}: '{name}' listed again, code '{previous}' replaced by '{code}'",
                record.line
            );
        }
    }

    Ok(listing)
}

// ============================================================================
// Feature table
// ============================================================================
/// Loads the name/code mapping from a feature table file.
pub fn load_feature_table<P: AsRef<Path>>(
    path: P,
    format: &TableFormat,
) -> Result<NameCodeMapping, MappingError> {
    let path = path.as_ref();
    let records = read_records(path, format.delimiter)?;
    let mapping = feature_mapping_from_records(records, &path.display().to_string(), format)?;

    info!("Loaded {} names with code from {}", mapping.len(), path.display());
    Ok(mapping)
}

/// Parses the name/code mapping from feature table contents;
/// `origin` names the input in errors.
pub fn parse_feature_table(
    input: &str,
    origin: &str,
    format: &TableFormat,
) -> Result<NameCodeMapping, MappingError> {
    let records = split_records(ByteParser::for_str(input), format.delimiter, origin)?;
    feature_mapping_from_records(records, origin, format)
}

fn feature_mapping_from_records(
    records: Vec<Record>,
    origin: &str,
    format: &TableFormat,
) -> Result<NameCodeMapping, MappingError> {
    let mut records = records.into_iter();
    let header = records.next().ok_or_else(|| MappingError::MissingHeader {
        origin: origin.to_string(),
    })?;

    let column = |name: &str| {
        header
            .fields
            .iter()
            .position(|field| field.trim() == name)
            .ok_or_else(|| MappingError::MissingColumn {
                origin: origin.to_string(),
                column: name.to_string(),
            })
    };
    let name_index = column(&format.name_column)?;
    let code_index = column(&format.code_column)?;

    let mut mapping = NameCodeMapping::new();
    for record in records {
        check_field_count(&record, header.fields.len(), origin, format.delimiter)?;
        let name = record.fields[name_index].trim();
        let code = record.fields[code_index].trim();

        if code.is_empty() || code == format.missing_code {
            continue;
        }
        if let Some(previous) = mapping.insert(name, code) {
            warn!(
                "{origin} line {}: '{name}' listed again, code '{previous}' replaced by '{code}'",
                record.line
            );
        }
    }

    Ok(mapping)
}

// ============================================================================
// Helpers (private)
// ============================================================================
fn read_records(path: &Path, delimiter: u8) -> Result<Vec<Record>, MappingError> {
    let contents = std::fs::read(path).map_err(|source| MappingError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parser = ByteParser::new(InMemoryByteSource::from_vec(contents));
    split_records(parser, delimiter, &path.display().to_string())
}

fn split_records(
    parser: ByteParser<InMemoryByteSource>,
    delimiter: u8,
    origin: &str,
) -> Result<Vec<Record>, MappingError> {
    RecordReader::new(parser, delimiter)
        .read_all()
        .map_err(|source| MappingError::Malformed {
            origin: origin.to_string(),
            source,
        })
}

fn check_field_count(
    record: &Record,
    expected: usize,
    origin: &str,
    delimiter: u8,
) -> Result<(), MappingError> {
    if record.fields.len() == expected {
        return Ok(());
    }

    Err(MappingError::FieldCount {
        origin: origin.to_string(),
        line: record.line,
        expected,
        found: record.fields.len(),
        record: record.joined(delimiter),
    })
}
