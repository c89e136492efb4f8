//! Runtime configuration of a reconciliation run.
//!
//! Loaded from a TOML file; every field has a default matching the file
//! names and layout of the Austronesian reference tree and the WALS
//! language export. Command line arguments override single fields.

use crate::error::PipelineError;
use crate::identity::{ListingFormat, TableFormat};
use crate::newick::LengthFormat;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration of a reconciliation run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PipelineConfig {
    /// NEXUS (or Newick) file with the reference tree(s).
    #[serde(default = "default_tree_file")]
    pub tree_file: PathBuf,

    /// Listing of `code<delimiter>name` records for the tree's languages.
    #[serde(default = "default_reference_listing")]
    pub reference_listing: PathBuf,

    /// Field delimiter of the reference listing.
    #[serde(default = "default_listing_delimiter")]
    pub listing_delimiter: char,

    /// Code marking tree languages without a code.
    #[serde(default = "default_untranslatable_code")]
    pub untranslatable_code: String,

    /// Feature table export with a header row.
    #[serde(default = "default_feature_table")]
    pub feature_table: PathBuf,

    /// Field delimiter of the feature table.
    #[serde(default = "default_feature_delimiter")]
    pub feature_delimiter: char,

    /// Header of the feature table column with language names.
    #[serde(default = "default_name_column")]
    pub name_column: String,

    /// Header of the feature table column with codes.
    #[serde(default = "default_code_column")]
    pub code_column: String,

    /// Placeholder for a missing code in the feature table.
    #[serde(default = "default_missing_code")]
    pub missing_code: String,

    /// Output file for the pruned trees, one Newick string per line.
    #[serde(default = "default_output_tree")]
    pub output_tree: PathBuf,

    /// Output file for the surviving leaf codes, one per line.
    #[serde(default = "default_language_list")]
    pub language_list: PathBuf,

    /// Optional output of the final reference mapping, in listing format.
    #[serde(default)]
    pub reference_mapping_out: Option<PathBuf>,

    /// Optional output of the final feature mapping, in listing format.
    #[serde(default)]
    pub feature_mapping_out: Option<PathBuf>,

    /// Number of decimals of written branch lengths.
    /// When unset, the shortest exact fixed-point representation is used.
    #[serde(default)]
    pub branch_length_precision: Option<usize>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_tree_file() -> PathBuf {
    PathBuf::from("a400-m1pcv-time.mcct.trees")
}

fn default_reference_listing() -> PathBuf {
    PathBuf::from("iso.austronesian.txt")
}

fn default_listing_delimiter() -> char {
    '\t'
}

fn default_untranslatable_code() -> String {
    "XXX".to_string()
}

fn default_feature_table() -> PathBuf {
    PathBuf::from("language.csv")
}

fn default_feature_delimiter() -> char {
    ','
}

fn default_name_column() -> String {
    "Name".to_string()
}

fn default_code_column() -> String {
    "iso_code".to_string()
}

fn default_missing_code() -> String {
    "?".to_string()
}

fn default_output_tree() -> PathBuf {
    PathBuf::from("austronesian.nex")
}

fn default_language_list() -> PathBuf {
    PathBuf::from("language_list.txt")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tree_file: default_tree_file(),
            reference_listing: default_reference_listing(),
            listing_delimiter: default_listing_delimiter(),
            untranslatable_code: default_untranslatable_code(),
            feature_table: default_feature_table(),
            feature_delimiter: default_feature_delimiter(),
            name_column: default_name_column(),
            code_column: default_code_column(),
            missing_code: default_missing_code(),
            output_tree: default_output_tree(),
            language_list: default_language_list(),
            reference_mapping_out: None,
            feature_mapping_out: None,
            branch_length_precision: None,
            log_level: default_log_level(),
        }
    }
}

impl PipelineConfig {
    /// Loads configuration from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let config_error = |source: Box<dyn std::error::Error + Send + Sync>| PipelineError::Config {
            path: path.to_path_buf(),
            source,
        };

        let contents = fs::read_to_string(path).map_err(|e| config_error(e.into()))?;
        toml::from_str(&contents).map_err(|e| config_error(e.into()))
    }

    /// Layout of the reference listing.
    pub fn listing_format(&self) -> Result<ListingFormat, PipelineError> {
        Ok(ListingFormat {
            delimiter: ascii_delimiter("listing_delimiter", self.listing_delimiter)?,
            untranslatable_code: self.untranslatable_code.clone(),
        })
    }

    /// Layout of the feature table.
    pub fn table_format(&self) -> Result<TableFormat, PipelineError> {
        Ok(TableFormat {
            delimiter: ascii_delimiter("feature_delimiter", self.feature_delimiter)?,
            name_column: self.name_column.clone(),
            code_column: self.code_column.clone(),
            missing_code: self.missing_code.clone(),
        })
    }

    /// Formatting of written branch lengths.
    pub fn length_format(&self) -> LengthFormat {
        match self.branch_length_precision {
            Some(decimals) => LengthFormat::Decimals(decimals),
            None => LengthFormat::Shortest,
        }
    }
}

fn ascii_delimiter(field: &str, delimiter: char) -> Result<u8, PipelineError> {
    if delimiter.is_ascii() && delimiter != '"' && delimiter != '\n' && delimiter != '\r' {
        Ok(delimiter as u8)
    } else {
        Err(PipelineError::InvalidConfig(format!(
            "{field} must be a single ASCII character other than a quote or line break, got {delimiter:?}"
        )))
    }
}
