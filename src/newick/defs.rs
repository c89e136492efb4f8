//! Constants for Newick parsing.

/// Newick label delimiters: parentheses, comma, colon, semicolon, whitespace, comment start
pub(crate) const NEWICK_LABEL_DELIMITERS: &[u8] = b"([,:; \n\t\r)]";

/// Valid characters of a (possibly scientific notation) branch length
pub(crate) fn is_branch_length_byte(b: u8) -> bool {
    b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E')
}
