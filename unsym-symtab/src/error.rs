use std::str::Utf8Error;

use thiserror::Error;

/// An error returned when decoding or querying a [`SymbolTable`](crate::SymbolTable).
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SymbolTableError {
    /// The buffer is too small to hold the header.
    #[error("truncated header: expected {expected} bytes, found {found}", expected = crate::raw::HEADER_SIZE)]
    TruncatedHeader {
        /// Number of bytes available.
        found: usize,
    },

    /// The buffer ends before all records declared in the header.
    #[error("truncated records: {count} records need {expected} bytes, found {found}")]
    TruncatedRecords {
        /// Number of records declared in the header.
        count: u32,
        /// Number of bytes needed for all records.
        expected: usize,
        /// Number of bytes available after the header.
        found: usize,
    },

    /// A string offset points past the end of the string table.
    #[error("record {index}: string offset {offset} out of range ({len} string bytes)")]
    StringOffsetOutOfRange {
        /// Index of the referencing record.
        index: usize,
        /// The offending offset.
        offset: u32,
        /// Size of the string table.
        len: usize,
    },

    /// A string runs to the end of the string table without a terminating newline.
    #[error("record {index}: string at offset {offset} is not newline-terminated")]
    UnterminatedString {
        /// Index of the referencing record.
        index: usize,
        /// Offset of the string.
        offset: u32,
    },

    /// A string is not valid UTF-8.
    #[error("record {index}: string at offset {offset} is not valid utf-8")]
    BadEncoding {
        /// Index of the referencing record.
        index: usize,
        /// Offset of the string.
        offset: u32,
        /// The decoding error.
        #[source]
        source: Utf8Error,
    },

    /// A lookup was performed on a table without records.
    #[error("symbol table is empty")]
    EmptyTable,
}
