//! Low-level byte-by-byte parser for text input.
//!
//! This module provides [ByteParser] for parsing text-based formats with support
//! for peeking, consuming, pattern matching, and quote-aware label parsing. Used as
//! the foundation for the Newick parser, the NEXUS tree extraction and the
//! delimited record reader.

use crate::parser::byte_source::{ByteSource, InMemoryByteSource};
use crate::parser::parsing_error::ParsingError;

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser with support for peeking, consuming, and pattern matching.
///
/// Structural matching assumes ASCII, labels are collected as raw bytes and
/// decoded as UTF-8 (lossy), since language names regularly carry diacritics.
///
/// # Features
/// - Case-insensitive matching for ASCII characters
/// - Whitespace and comment skipping
/// - Quote-aware label parsing (single quotes with escaping)
/// - Context extraction for error reporting
///
/// # Example
/// ```
/// use isoprune::parser::byte_parser::{ByteParser, ConsumeMode};
///
/// let mut parser = ByteParser::for_str("tree TREE1 = [&R] (A:1.0,B:1.0);");
/// assert!(parser.consume_if_word("TREE"));
/// parser.consume_until(b'=', ConsumeMode::Inclusive);
/// parser.skip_comment_and_whitespace().unwrap();
/// assert_eq!(parser.peek(), Some(b'('));
/// ```
pub struct ByteParser<S: ByteSource> {
    source: S,
}

impl ByteParser<InMemoryByteSource> {
    /// Creates a new `ByteParser` from a string by copying it into a Vec.
    pub fn for_str(input: &str) -> Self {
        Self::new(InMemoryByteSource::from_vec(input.as_bytes().to_vec()))
    }
}

impl<S: ByteSource> ByteParser<S> {
    /// Creates a new `ByteParser` from a byte source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Peeks at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.source.peek()
    }

    /// Gets the current byte and advances the position (consumes it).
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        self.source.next_byte()
    }

    /// Skips (consumes) all consecutive whitespace characters.
    ///
    /// Whitespace includes: space (' '), tab ('\t'), newline ('\n'), and carriage return ('\r').
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b == b' ' || b == b'\t' || b == b'\n' || b == b'\r' {
                self.next_byte();
            } else {
                break;
            }
        }
    }

    /// Skips (consumes) a NEXUS-style comment if present.
    ///
    /// Comments are enclosed in square brackets `[...]`, which also covers
    /// tree annotations like `[&R]` or `[&height=0.12]`.
    ///
    /// # Returns
    /// * `Ok(true)` - A comment was found and consumed
    /// * `Ok(false)` - No comment at current position
    /// * `Err(ParsingError)` - Comment was opened but never closed
    pub fn skip_comment(&mut self) -> Result<bool, ParsingError> {
        if self.consume_if(b'[') {
            if !self.consume_until(b']', ConsumeMode::Inclusive) {
                return Err(ParsingError::unclosed_comment(self));
            }
            return Ok(true);
        }

        Ok(false)
    }

    /// Skips (consumes) all consecutive whitespace and comments.
    ///
    /// # Errors
    /// Returns an error if an unclosed comment is encountered.
    pub fn skip_comment_and_whitespace(&mut self) -> Result<(), ParsingError> {
        self.skip_whitespace();

        while self.skip_comment()? {
            self.skip_whitespace();
        }

        Ok(())
    }

    /// Checks if the current byte matches the target byte (case-insensitive for ASCII).
    pub fn peek_is(&self, ch: u8) -> bool {
        self.peek()
            .is_some_and(|b| b.eq_ignore_ascii_case(&ch))
    }

    /// Checks if the following bytes match the given word (case-insensitive).
    ///
    /// This is a peek operation, the parser position is not changed.
    pub fn peek_is_word(&self, word: &str) -> bool {
        let sequence = word.as_bytes();
        let context = self.source.peek_slice(sequence.len());
        context.len() == sequence.len() && context.eq_ignore_ascii_case(sequence)
    }

    /// Consumes the current byte if it matches the target byte (case-insensitive).
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek_is(ch) {
            self.next_byte();
            true
        } else {
            false
        }
    }

    /// Consumes the next bytes if they match the given word (case-insensitive).
    ///
    /// # Returns
    /// `true` if the word was matched and consumed, `false` otherwise
    pub fn consume_if_word(&mut self, word: &str) -> bool {
        if !self.peek_is_word(word) {
            return false;
        }

        for _ in 0..word.len() {
            self.next_byte();
        }

        true
    }

    /// Consumes the given keyword (case-insensitive) if it is followed by
    /// whitespace, a comment or EOF, so that e.g. `tree` does not match `trees;`.
    ///
    /// # Returns
    /// `true` if the keyword was matched and consumed, `false` otherwise
    pub fn consume_if_keyword(&mut self, keyword: &str) -> bool {
        let lookahead = self.source.peek_slice(keyword.len() + 1);
        let terminated = match lookahead.get(keyword.len()) {
            None => true,
            Some(b) => b.is_ascii_whitespace() || *b == b'[',
        };

        terminated && self.consume_if_word(keyword)
    }

    /// Skips (consumes) the rest of the current line, including the line break.
    pub fn skip_line(&mut self) {
        self.consume_until(b'\n', ConsumeMode::Inclusive);
    }

    /// Consumes bytes until the target byte is found.
    ///
    /// # Arguments
    /// * `target` - The byte to search for
    /// * `mode` - Whether to consume the target byte (`Inclusive`) or stop before it (`Exclusive`)
    ///
    /// # Returns
    /// `true` if the target was found, `false` if EOF was reached first
    pub fn consume_until(&mut self, target: u8, mode: ConsumeMode) -> bool {
        while let Some(b) = self.peek() {
            if b == target {
                if mode == ConsumeMode::Inclusive {
                    self.next_byte();
                }
                return true;
            }
            self.next_byte();
        }
        false
    }

    /// Returns whether the end of data (EOF) has been reached.
    pub fn is_eof(&self) -> bool {
        self.source.is_eof()
    }

    /// Returns the current parser position (byte offset) in the input.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Returns a string from up to `k` bytes from the current position for error context.
    ///
    /// Invalid UTF-8 sequences are replaced with the Unicode replacement character.
    pub fn get_context_as_string(&self, k: usize) -> String {
        String::from_utf8_lossy(self.source.peek_slice(k)).into_owned()
    }

    /// Parses a label (quoted or unquoted) with the given delimiter set.
    ///
    /// Leading whitespace and comments are skipped. Detects whether the label
    /// is quoted (single quotes) or unquoted and dispatches accordingly.
    /// An empty string is returned if a delimiter follows right away,
    /// e.g. for unnamed leaves in `(,)`.
    pub fn parse_label(&mut self, delimiters: &[u8]) -> Result<String, ParsingError> {
        self.skip_comment_and_whitespace()?;

        if self.peek() == Some(b'\'') {
            self.parse_quoted_label()
        } else {
            Ok(self.parse_unquoted_label(delimiters))
        }
    }

    /// Parses a quoted label enclosed in single quotes with escape support.
    ///
    /// Assumes the opening quote has not been consumed yet. Single quotes within
    /// the label are escaped by doubling them (e.g. `'Wilson''s'` becomes `Wilson's`).
    ///
    /// # Errors
    /// Returns an error if EOF is reached before the closing quote.
    pub fn parse_quoted_label(&mut self) -> Result<String, ParsingError> {
        self.next_byte(); // consume opening '

        let mut bytes = Vec::new();
        loop {
            match self.next_byte() {
                Some(b'\'') => {
                    if self.peek() == Some(b'\'') {
                        bytes.push(b'\'');
                        self.next_byte();
                    } else {
                        break;
                    }
                }
                Some(b) => bytes.push(b),
                None => return Err(ParsingError::unclosed_quote(self)),
            }
        }

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Parses an unquoted label until any of the given delimiters (or EOF) is encountered.
    pub fn parse_unquoted_label(&mut self, delimiters: &[u8]) -> String {
        let mut bytes = Vec::new();

        while let Some(b) = self.peek() {
            if delimiters.contains(&b) {
                break;
            }
            bytes.push(b);
            self.next_byte();
        }

        String::from_utf8_lossy(&bytes).into_owned()
    }
}

/// Specifies whether to consume or leave the target when using `consume_until` methods.
///
/// # Examples
/// ```
/// use isoprune::parser::byte_parser::{ByteParser, ConsumeMode};
///
/// let mut parser = ByteParser::for_str("tree STATE_0 = ((A:0.5,B:0.5):0.3,C:0.8);");
///
/// // Inclusive: consume up to and including '=', e.g. to start of Newick string
/// parser.consume_until(b'=', ConsumeMode::Inclusive);
/// assert_eq!(parser.peek(), Some(b' '));
///
/// let mut parser = ByteParser::for_str("('Wilson''s_Storm-petrel')");
///
/// // Exclusive: consume up to but not including "'"
/// parser.consume_until(b'\'', ConsumeMode::Exclusive);
/// assert_eq!(parser.peek(), Some(b'\''));
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ConsumeMode {
    /// Consume the target byte along with everything before it.
    Inclusive,

    /// Stop before the target byte without consuming it.
    Exclusive,
}
