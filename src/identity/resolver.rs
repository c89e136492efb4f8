//! Identity resolver: disambiguates codes shared by several names and
//! produces duplicate-free mappings plus exclusion sets for both sources.
//!
//! # Policy
//! A code split across several names of the *same* source can only be
//! resolved if the other source agrees on exactly one of those names
//! (case-insensitive). That name is kept; all other names with the code are
//! excluded from both sources. Without such agreement every name with the
//! code is excluded. The same holds if a source spells the agreed name in
//! several casings, as these cannot be kept apart.
//!
//! Two passes apply this policy:
//! 1. Codes duplicated in the reference listing. Exclusions extend both
//!    sources.
//! 2. Codes duplicated in the feature table that pass 1 did not handle.
//!    Only the feature exclusions are extended; the reference listing must
//!    have at most one name for such a code, which is checked.
//!
//! Both passes run through the same routine, [disambiguate_codes].

use crate::identity::error::ResolveError;
use crate::identity::loader::ReferenceListing;
use crate::identity::mapping::{ExclusionSet, NameCodeMapping};
use std::collections::BTreeSet;
use tracing::{debug, info};

// =#========================================================================#=
// RESOLUTION
// =#========================================================================#=
/// Outcome of [resolve].
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Lowercased names to drop from the reference side (tree leaves)
    pub reference_exclusions: ExclusionSet,
    /// Lowercased names to drop from the feature table
    pub feature_exclusions: ExclusionSet,
    /// Injective reference mapping
    pub reference_mapping: NameCodeMapping,
    /// Injective feature mapping
    pub feature_mapping: NameCodeMapping,
    /// Decisions taken for duplicated codes, in processing order
    pub decisions: Vec<Disambiguation>,
}

impl Resolution {
    /// Returns the codes present in both final mappings, sorted.
    pub fn shared_codes(&self) -> Vec<&str> {
        let feature_codes = self.feature_mapping.codes();
        self.reference_mapping
            .codes()
            .into_iter()
            .filter(|code| feature_codes.contains(code))
            .collect()
    }
}

/// Pass in which a duplicated code was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvePass {
    /// Code duplicated in the reference listing
    ReferenceDuplicates,
    /// Code duplicated in the feature table only
    FeatureDuplicates,
}

/// Decision taken for one duplicated code.
#[derive(Debug, Clone, PartialEq)]
pub struct Disambiguation {
    /// The duplicated code
    pub code: String,
    /// Pass that handled the code
    pub pass: ResolvePass,
    /// Lowercased name agreed on by both sources, `None` if the code was dropped
    pub kept: Option<String>,
    /// Lowercased names excluded from the source with the duplicate
    pub excluded: Vec<String>,
    /// Lowercased names excluded from the other source
    pub excluded_other: Vec<String>,
}

/// What a pass may do with the source that does not have the duplicate.
enum Counterpart<'a> {
    /// Exclude its names for the code as well
    Extend(&'a mut ExclusionSet),
    /// Leave it untouched; it must have at most one name for the code
    Unambiguous,
}

// =#========================================================================#=
// RESOLVE
// =#========================================================================#=
/// Resolves the identities of both sources.
///
/// Untranslatable reference names are always excluded. The returned
/// mappings are injective, and every name removed from a mapping is in the
/// corresponding exclusion set. The result does not depend on input order.
///
/// # Example
/// ```
/// use isoprune::identity::{NameCodeMapping, ReferenceListing, resolve};
///
/// let reference = ReferenceListing {
///     mapping: [("Foo", "L1"), ("Bar", "L1"), ("Baz", "L2")].into_iter().collect(),
///     untranslatable: vec!["Qux".to_string()],
/// };
/// let features: NameCodeMapping = [("foo", "L1"), ("Baz", "L2")].into_iter().collect();
///
/// let resolution = resolve(&reference, &features).unwrap();
/// assert_eq!(resolution.reference_mapping.get("Foo"), Some("L1"));
/// assert_eq!(resolution.reference_mapping.get("Bar"), None);
/// assert!(resolution.reference_exclusions.contains("qux"));
/// assert_eq!(resolution.shared_codes(), vec!["L1", "L2"]);
/// ```
pub fn resolve(
    reference: &ReferenceListing,
    features: &NameCodeMapping,
) -> Result<Resolution, ResolveError> {
    let mut reference_mapping = reference.mapping.clone();
    let mut feature_mapping = features.clone();
    let mut reference_exclusions: ExclusionSet =
        reference.untranslatable.iter().map(String::as_str).collect();
    let mut feature_exclusions = ExclusionSet::new();

    // Pass 1: codes duplicated in the reference listing
    let reference_duplicates = reference_mapping.duplicated_codes();
    let mut decisions = disambiguate_codes(
        &reference_duplicates,
        ResolvePass::ReferenceDuplicates,
        (&reference_mapping, &mut reference_exclusions),
        (&feature_mapping, Counterpart::Extend(&mut feature_exclusions)),
    )?;

    // Pass 2: codes duplicated in the feature table only
    let feature_duplicates: BTreeSet<String> = feature_mapping
        .duplicated_codes()
        .difference(&reference_duplicates)
        .cloned()
        .collect();
    decisions.extend(disambiguate_codes(
        &feature_duplicates,
        ResolvePass::FeatureDuplicates,
        (&feature_mapping, &mut feature_exclusions),
        (&reference_mapping, Counterpart::Unambiguous),
    )?);

    let removed_reference = reference_mapping.remove_excluded(&reference_exclusions);
    let removed_features = feature_mapping.remove_excluded(&feature_exclusions);

    info!(
        "Resolved {} duplicated codes; removed {} reference and {} feature names, {} codes shared",
        decisions.len(),
        removed_reference.len(),
        removed_features.len(),
        reference_mapping
            .codes()
            .intersection(&feature_mapping.codes())
            .count()
    );

    Ok(Resolution {
        reference_exclusions,
        feature_exclusions,
        reference_mapping,
        feature_mapping,
        decisions,
    })
}

/// Applies the disambiguation policy to each of the given codes, which are
/// duplicated in the `duplicated` source.
///
/// For each code, the lowercased names of both sources are intersected. With
/// exactly one common name, every other name is excluded; otherwise all names
/// are. Exclusions of the counterpart are only extended for
/// [Counterpart::Extend]; for [Counterpart::Unambiguous] the counterpart is
/// checked to have at most one name for the code.
fn disambiguate_codes(
    codes: &BTreeSet<String>,
    pass: ResolvePass,
    duplicated: (&NameCodeMapping, &mut ExclusionSet),
    counterpart: (&NameCodeMapping, Counterpart<'_>),
) -> Result<Vec<Disambiguation>, ResolveError> {
    let (duplicated_mapping, duplicated_exclusions) = duplicated;
    let (other_mapping, mut other_exclusions) = counterpart;

    let mut decisions = Vec::with_capacity(codes.len());
    for code in codes {
        if let Counterpart::Unambiguous = other_exclusions {
            let names = other_mapping.names_for(code);
            if names.len() > 1 {
                return Err(ResolveError::AmbiguousReference {
                    code: code.clone(),
                    names: names.into_iter().map(str::to_string).collect(),
                });
            }
        }

        let names = duplicated_mapping.lowercase_names_for(code);
        let other_names = other_mapping.lowercase_names_for(code);
        let common: Vec<&String> = names.intersection(&other_names).collect();
        let kept = match common.as_slice() {
            [true_name]
                if has_single_spelling(duplicated_mapping, code, true_name)
                    && has_single_spelling(other_mapping, code, true_name) =>
            {
                Some((*true_name).clone())
            }
            _ => None,
        };
        let is_dropped = |name: &&String| Some(*name) != kept.as_ref();

        let excluded: Vec<String> = names.iter().filter(is_dropped).cloned().collect();
        duplicated_exclusions.extend(excluded.iter().map(String::as_str));

        let excluded_other: Vec<String> = match &mut other_exclusions {
            Counterpart::Extend(exclusions) => {
                let excluded_other: Vec<String> =
                    other_names.iter().filter(is_dropped).cloned().collect();
                exclusions.extend(excluded_other.iter().map(String::as_str));
                excluded_other
            }
            Counterpart::Unambiguous => Vec::new(),
        };

        match &kept {
            Some(name) => debug!(
                "Code '{code}': keeping '{name}', excluding {excluded:?} and {excluded_other:?}"
            ),
            None => debug!(
                "Code '{code}': no unique common name, excluding {excluded:?} and {excluded_other:?}"
            ),
        }

        decisions.push(Disambiguation {
            code: code.clone(),
            pass,
            kept,
            excluded,
            excluded_other,
        });
    }

    Ok(decisions)
}

/// Returns `true` if exactly one name with the code lowercases to `name`.
///
/// Exclusions are case-insensitive, so spellings such as `Foo` and `FOO`
/// cannot be told apart; keeping one would keep both.
fn has_single_spelling(mapping: &NameCodeMapping, code: &str, name: &str) -> bool {
    mapping
        .names_for(code)
        .into_iter()
        .filter(|candidate| candidate.to_lowercase() == name)
        .count()
        == 1
}
