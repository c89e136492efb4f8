//! Language identity reconciliation between the reference tree's listing and
//! the feature table.
//!
//! Both sources name languages differently, so both are mapped to a shared
//! code first:
//! 1. [loader] parses each source's raw listing into a [NameCodeMapping].
//! 2. [resolver] detects codes used by several names, disambiguates them and
//!    emits duplicate-free mappings together with one [ExclusionSet] per source.
//!
//! The resulting [Resolution] drives the tree transformation
//! (see [crate::transform]) and the external table reformatting.

pub mod error;
pub mod loader;
pub mod mapping;
pub mod resolver;

pub use error::{MappingError, ResolveError};
pub use loader::{
    ListingFormat, ReferenceListing, TableFormat, load_feature_table, load_reference_listing,
    parse_feature_table, parse_reference_listing,
};
pub use mapping::{ExclusionSet, NameCodeMapping};
pub use resolver::{Disambiguation, Resolution, ResolvePass, resolve};
