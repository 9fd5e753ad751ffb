use std::fmt;

use watto::Pod;

use crate::raw;
use crate::SymbolTableError;

type Result<T, E = SymbolTableError> = std::result::Result<T, E>;

/// An address record resolved against the string table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolRecord<'data> {
    address: u64,
    line: u32,
    file: Option<&'data str>,
    symbol: Option<&'data str>,
}

impl<'data> SymbolRecord<'data> {
    /// The instruction address of this record.
    pub fn address(&self) -> u64 {
        self.address
    }

    /// The source line.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The source file, if the record references one.
    pub fn file(&self) -> Option<&'data str> {
        self.file
    }

    /// The symbol name, if the record references one.
    pub fn symbol(&self) -> Option<&'data str> {
        self.symbol
    }
}

/// Renders `0x<address> <file>:<line> <symbol>`, with missing strings left empty.
impl fmt::Display for SymbolRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:#x} {}:{} {}",
            self.address,
            self.file.unwrap_or_default(),
            self.line,
            self.symbol.unwrap_or_default()
        )
    }
}

/// A decoded symbol table.
///
/// Records keep the order in which they are stored in the file; they are neither sorted nor
/// deduplicated. Strings borrow from the buffer passed to [`SymbolTable::parse`].
#[derive(Clone, PartialEq, Eq)]
pub struct SymbolTable<'data> {
    pub(crate) records: Vec<SymbolRecord<'data>>,
    string_bytes: usize,
}

impl fmt::Debug for SymbolTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolTable")
            .field("records", &self.records.len())
            .field("string_bytes", &self.string_bytes)
            .finish()
    }
}

impl<'data> SymbolTable<'data> {
    /// Decodes a symbol table from its binary representation.
    ///
    /// Fails if the buffer is shorter than the header or the declared records, or if any record
    /// references a string that cannot be read. No partial table is returned on failure.
    #[tracing::instrument(level = "trace", name = "SymbolTable::parse", skip_all)]
    pub fn parse(buf: &'data [u8]) -> Result<Self> {
        let (header, rest) = raw::RawHeader::ref_from_prefix(buf)
            .ok_or(SymbolTableError::TruncatedHeader { found: buf.len() })?;

        let count = header.record_count();
        let expected = (count as usize).saturating_mul(raw::RECORD_SIZE);
        let truncated = SymbolTableError::TruncatedRecords {
            count,
            expected,
            found: rest.len(),
        };
        if rest.len() < expected {
            return Err(truncated);
        }
        let (raw_records, string_bytes) =
            raw::RawRecord::slice_from_prefix(rest, count as usize).ok_or(truncated)?;

        tracing::trace!(
            records = count,
            string_bytes = string_bytes.len(),
            "decoding symbol table"
        );

        let records = raw_records
            .iter()
            .enumerate()
            .map(|(index, raw_record)| {
                Ok(SymbolRecord {
                    address: raw_record.address(),
                    line: raw_record.line(),
                    file: read_string(string_bytes, index, raw_record.file_offset())?,
                    symbol: read_string(string_bytes, index, raw_record.symbol_offset())?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SymbolTable {
            records,
            string_bytes: string_bytes.len(),
        })
    }

    /// The number of records in the table.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record at `index` in file order.
    pub fn get(&self, index: usize) -> Option<&SymbolRecord<'data>> {
        self.records.get(index)
    }

    /// All records in file order.
    pub fn records(&self) -> &[SymbolRecord<'data>] {
        &self.records
    }
}

/// Reads the newline-terminated string at `offset`, trimmed of surrounding whitespace.
///
/// [`raw::NO_STRING`] yields `None` without touching the string table.
fn read_string(string_bytes: &[u8], index: usize, offset: u32) -> Result<Option<&str>> {
    if offset == raw::NO_STRING {
        return Ok(None);
    }

    let tail = string_bytes.get(offset as usize..).ok_or(
        SymbolTableError::StringOffsetOutOfRange {
            index,
            offset,
            len: string_bytes.len(),
        },
    )?;
    let end = tail
        .iter()
        .position(|&b| b == b'\n')
        .ok_or(SymbolTableError::UnterminatedString { index, offset })?;
    let string = std::str::from_utf8(&tail[..end]).map_err(|source| {
        SymbolTableError::BadEncoding {
            index,
            offset,
            source,
        }
    })?;

    Ok(Some(string.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_string() {
        let strings = b"main.c\n  padded \t\n\nno newline";

        assert_eq!(read_string(strings, 0, 0), Ok(Some("main.c")));
        assert_eq!(read_string(strings, 0, 7), Ok(Some("padded")));
        assert_eq!(read_string(strings, 0, 18), Ok(Some("")));
        // offsets may point into the middle of another string
        assert_eq!(read_string(strings, 0, 2), Ok(Some("in.c")));
        assert_eq!(read_string(strings, 0, raw::NO_STRING), Ok(None));
    }

    #[test]
    fn test_read_string_sentinel_on_empty_table() {
        assert_eq!(read_string(b"", 3, raw::NO_STRING), Ok(None));
    }

    #[test]
    fn test_read_string_unterminated() {
        let strings = b"main.c\nno newline";

        assert_eq!(
            read_string(strings, 5, 7),
            Err(SymbolTableError::UnterminatedString {
                index: 5,
                offset: 7
            })
        );
        // an offset equal to the length addresses the empty, unterminated tail
        assert_eq!(
            read_string(strings, 5, strings.len() as u32),
            Err(SymbolTableError::UnterminatedString {
                index: 5,
                offset: strings.len() as u32
            })
        );
    }

    #[test]
    fn test_read_string_out_of_range() {
        let strings = b"main.c\n";

        assert_eq!(
            read_string(strings, 1, 8),
            Err(SymbolTableError::StringOffsetOutOfRange {
                index: 1,
                offset: 8,
                len: 7
            })
        );
    }

    #[test]
    fn test_read_string_bad_encoding() {
        let strings = b"ma\xffin\n";

        let err = read_string(strings, 2, 0).unwrap_err();
        assert!(matches!(
            err,
            SymbolTableError::BadEncoding {
                index: 2,
                offset: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_display_record() {
        let record = SymbolRecord {
            address: 0x1a2b,
            line: 17,
            file: Some("net/socket.cpp"),
            symbol: Some("FSocket::Recv"),
        };
        assert_eq!(record.to_string(), "0x1a2b net/socket.cpp:17 FSocket::Recv");

        let record = SymbolRecord {
            address: 0,
            line: 0,
            file: None,
            symbol: None,
        };
        assert_eq!(record.to_string(), "0x0 :0 ");
    }
}
