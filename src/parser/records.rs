//! Delimited record reading for name/code listings and feature tables.
//!
//! Both inputs of the mapping loader are line-oriented: a tab-separated
//! `code<TAB>name` listing and a comma-separated table export with a header
//! row. [RecordReader] splits such input into [Record]s on top of
//! [ByteParser]. Fields may be enclosed in double quotes, in which case the
//! delimiter and line breaks lose their meaning and `""` stands for a
//! literal quote. Blank lines are skipped. [quote_field] writes fields
//! under the same rules.

use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;
use std::borrow::Cow;

/// One record of delimited input, remembering the line it started on.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// 1-based line number of the first byte of this record
    pub line: usize,
    /// Field values, in input order, with surrounding quotes removed
    pub fields: Vec<String>,
}

impl Record {
    /// Returns the field values re-joined with the given delimiter,
    /// used to quote the offending record in error messages.
    pub fn joined(&self, delimiter: u8) -> String {
        self.fields.join(&(delimiter as char).to_string())
    }
}

/// Splits delimited text into [Record]s.
pub struct RecordReader<S: ByteSource> {
    parser: ByteParser<S>,
    delimiter: u8,
    line: usize,
}

impl<S: ByteSource> RecordReader<S> {
    /// Creates a reader over the given byte parser, splitting fields on `delimiter`.
    pub fn new(parser: ByteParser<S>, delimiter: u8) -> Self {
        Self {
            parser,
            delimiter,
            line: 1,
        }
    }

    /// Reads the next non-blank record.
    ///
    /// # Returns
    /// * `Ok(Some(Record))` - The next record
    /// * `Ok(None)` - If EOF was reached
    /// * `Err(ParsingError)` - If a quoted field is never closed
    pub fn next_record(&mut self) -> Result<Option<Record>, ParsingError> {
        loop {
            if self.parser.is_eof() {
                return Ok(None);
            }

            let start_line = self.line;
            let fields = self.read_fields()?;
            let is_blank = fields.len() == 1 && fields[0].trim().is_empty();
            if !is_blank {
                return Ok(Some(Record {
                    line: start_line,
                    fields,
                }));
            }
        }
    }

    /// Reads all remaining records.
    pub fn read_all(&mut self) -> Result<Vec<Record>, ParsingError> {
        let mut records = Vec::new();
        while let Some(record) = self.next_record()? {
            records.push(record);
        }
        Ok(records)
    }

    /// Reads fields up to and including the next line break (or EOF).
    fn read_fields(&mut self) -> Result<Vec<String>, ParsingError> {
        let mut fields = Vec::new();
        let mut current = Vec::new();

        loop {
            match self.parser.next_byte() {
                None => break,
                Some(b'\n') => {
                    self.line += 1;
                    break;
                }
                Some(b'\r') => {
                    // CRLF or lone CR both end the record
                    if self.parser.peek() == Some(b'\n') {
                        self.parser.next_byte();
                    }
                    self.line += 1;
                    break;
                }
                Some(b'"') if current.iter().all(|b: &u8| b.is_ascii_whitespace()) => {
                    current.clear();
                    self.read_quoted(&mut current)?;
                }
                Some(b) if b == self.delimiter => {
                    fields.push(String::from_utf8_lossy(&current).into_owned());
                    current.clear();
                }
                Some(b) => current.push(b),
            }
        }

        fields.push(String::from_utf8_lossy(&current).into_owned());
        Ok(fields)
    }

    /// Reads the rest of a double-quoted field, opening quote already consumed.
    fn read_quoted(&mut self, buffer: &mut Vec<u8>) -> Result<(), ParsingError> {
        loop {
            match self.parser.next_byte() {
                Some(b'"') => {
                    if self.parser.peek() == Some(b'"') {
                        buffer.push(b'"');
                        self.parser.next_byte();
                    } else {
                        return Ok(());
                    }
                }
                Some(b) => {
                    if b == b'\n' {
                        self.line += 1;
                    }
                    buffer.push(b);
                }
                None => return Err(ParsingError::unclosed_quote(&self.parser)),
            }
        }
    }
}

/// Quotes a field for delimited output if it contains the delimiter, a
/// double quote or a line break, doubling inner quotes.
///
/// # Example
/// ```
/// use isoprune::parser::records::quote_field;
///
/// assert_eq!(quote_field("Paiwan", b','), "Paiwan");
/// assert_eq!(quote_field("Tagalog, Manila", b','), "\"Tagalog, Manila\"");
/// assert_eq!(quote_field("Tagalog, Manila", b'\t'), "Tagalog, Manila");
/// assert_eq!(quote_field("The \"Kwaio\"", b','), "\"The \"\"Kwaio\"\"\"");
/// ```
pub fn quote_field(field: &str, delimiter: u8) -> Cow<'_, str> {
    let needs_quotes = field
        .bytes()
        .any(|b| b == delimiter || matches!(b, b'"' | b'\n' | b'\r'));
    if needs_quotes {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
