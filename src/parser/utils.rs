//! Utility functions for label quoting in Newick output.
//!
//! Labels are written verbatim where possible. A label that would otherwise
//! be read back differently (whitespace, Newick punctuation, quotes) is
//! wrapped in single quotes with internal single quotes doubled, which the
//! parser reverses.

/// Characters that force a label to be quoted.
const SPECIAL_CHARS: &[char] = &[' ', ',', ';', '\t', '\n', '\r', '(', ')', ':', '[', ']', '\''];

/// Checks if a label can be written without quotes.
///
/// # Examples
/// ```
/// # use isoprune::parser::utils::is_plain;
/// assert!(is_plain("tgl"));
/// assert!(is_plain("Nukuoro_Atoll"));
/// assert!(!is_plain("East Futuna"));
/// assert!(!is_plain("Ma'anyan"));
/// assert!(!is_plain("pa(i)wan"));
/// ```
pub fn is_plain(label: &str) -> bool {
    !label.contains(SPECIAL_CHARS)
}

/// Quotes a label for safe use in Newick output.
///
/// Plain labels are returned as-is. Everything else is wrapped in single
/// quotes and internal single quotes are doubled.
///
/// # Examples
/// ```
/// # use isoprune::parser::utils::quote_label;
/// assert_eq!(quote_label("tgl"), "tgl");
/// assert_eq!(quote_label("East Futuna"), "'East Futuna'");
/// assert_eq!(quote_label("Ma'anyan"), "'Ma''anyan'");
/// assert_eq!(quote_label(""), "");
/// ```
pub fn quote_label(label: &str) -> String {
    if is_plain(label) {
        return label.to_string();
    }

    format!("'{}'", label.replace('\'', "''"))
}
