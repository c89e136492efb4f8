//! Name to code mappings and exclusion sets.

use crate::parser::records::quote_field;
use std::collections::{BTreeMap, BTreeSet};

// =#========================================================================#=
// NAME CODE MAPPING
// =#========================================================================#=
/// Mapping from language names (source-specific casing) to external
/// identifier codes, one instance per source.
///
/// Entries are kept sorted by name, so iteration and everything derived
/// from it is deterministic.
///
/// After identity resolution each code appears at most once
/// (see [NameCodeMapping::is_injective]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameCodeMapping {
    entries: BTreeMap<String, String>,
}

impl NameCodeMapping {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a name with its code, returning the code previously stored
    /// for exactly this name, if any.
    pub fn insert<N: Into<String>, C: Into<String>>(&mut self, name: N, code: C) -> Option<String> {
        self.entries.insert(name.into(), code.into())
    }

    /// Returns the code of the given name (exact match).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Returns the number of names in this mapping.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if this mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over `(name, code)` pairs, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, code)| (name.as_str(), code.as_str()))
    }

    /// Returns the set of codes in this mapping.
    pub fn codes(&self) -> BTreeSet<&str> {
        self.entries.values().map(String::as_str).collect()
    }

    /// Returns the codes that appear under two or more distinct names.
    pub fn duplicated_codes(&self) -> BTreeSet<String> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for code in self.entries.values() {
            *counts.entry(code).or_default() += 1;
        }

        counts
            .into_iter()
            .filter(|&(_, count)| count > 1)
            .map(|(code, _)| code.to_string())
            .collect()
    }

    /// Returns the distinct names (original casing) mapping to the given code.
    pub fn names_for(&self, code: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, c)| c.as_str() == code)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Returns the lowercased names mapping to the given code.
    pub fn lowercase_names_for(&self, code: &str) -> BTreeSet<String> {
        self.names_for(code)
            .into_iter()
            .map(str::to_lowercase)
            .collect()
    }

    /// Returns `true` if each code appears under at most one name.
    pub fn is_injective(&self) -> bool {
        self.duplicated_codes().is_empty()
    }

    /// Removes every entry whose name is in the exclusion set (compared
    /// case-insensitively), returning the removed names.
    pub fn remove_excluded(&mut self, exclusions: &ExclusionSet) -> Vec<String> {
        let removed: Vec<String> = self
            .entries
            .keys()
            .filter(|name| exclusions.contains(name))
            .cloned()
            .collect();
        for name in &removed {
            self.entries.remove(name);
        }

        removed
    }

    /// Renders this mapping as listing, one `code<delimiter>name` record per
    /// line, sorted by code and then name. Fields are quoted where needed, so
    /// the listing reads back with the mapping loader.
    pub fn to_listing(&self, delimiter: u8) -> String {
        let mut pairs: Vec<(&str, &str)> = self.iter().map(|(name, code)| (code, name)).collect();
        pairs.sort_unstable();

        pairs
            .into_iter()
            .map(|(code, name)| {
                format!(
                    "{}{}{}\n",
                    quote_field(code, delimiter),
                    delimiter as char,
                    quote_field(name, delimiter)
                )
            })
            .collect()
    }
}

impl<N: Into<String>, C: Into<String>> FromIterator<(N, C)> for NameCodeMapping {
    fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
        let mut mapping = NameCodeMapping::new();
        for (name, code) in iter {
            mapping.insert(name, code);
        }
        mapping
    }
}

// =#========================================================================#=
// EXCLUSION SET
// =#========================================================================#=
/// Set of lowercased language names to be dropped from a source.
///
/// Only grows during resolution. Membership tests are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExclusionSet {
    names: BTreeSet<String>,
}

impl ExclusionSet {
    /// Creates an empty exclusion set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a name (lowercased), returning `true` if it was not present yet.
    pub fn insert(&mut self, name: &str) -> bool {
        self.names.insert(name.to_lowercase())
    }

    /// Returns `true` if the lowercased name is in this set.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }

    /// Returns the number of names in this set.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if this set is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns an iterator over the lowercased names, sorted.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<'a> Extend<&'a str> for ExclusionSet {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name);
        }
    }
}

impl<'a> FromIterator<&'a str> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = ExclusionSet::new();
        set.extend(iter);
        set
    }
}
