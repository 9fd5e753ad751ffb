//! The raw symbol table binary format internals.
//!
//! All integers are stored little-endian and without any padding. The structs in this module
//! mirror the on-disk layout byte for byte, so their fields hold the *stored* representation;
//! use the accessor methods to get native values.
use watto::Pod;

/// Sentinel string offset denoting that a record has no file or symbol.
pub const NO_STRING: u32 = u32::MAX;

/// Size of the [`RawHeader`] in bytes.
pub const HEADER_SIZE: usize = 4;

/// Size of a single [`RawRecord`] in bytes.
pub const RECORD_SIZE: usize = 20;

/// The symbol table header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C, packed)]
pub struct RawHeader {
    record_count: u32,
}

impl RawHeader {
    /// Creates a header declaring `record_count` records.
    pub fn new(record_count: u32) -> Self {
        Self {
            record_count: record_count.to_le(),
        }
    }

    /// The number of [`RawRecord`]s following the header.
    pub fn record_count(&self) -> u32 {
        u32::from_le(self.record_count)
    }
}

/// A single fixed-size address record.
///
/// `file_offset` and `symbol_offset` are byte offsets into the string table, or [`NO_STRING`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C, packed)]
pub struct RawRecord {
    address: u64,
    line: u32,
    file_offset: u32,
    symbol_offset: u32,
}

impl RawRecord {
    /// Creates a record from native values.
    pub fn new(address: u64, line: u32, file_offset: u32, symbol_offset: u32) -> Self {
        Self {
            address: address.to_le(),
            line: line.to_le(),
            file_offset: file_offset.to_le(),
            symbol_offset: symbol_offset.to_le(),
        }
    }

    /// The instruction address covered by this record.
    pub fn address(&self) -> u64 {
        u64::from_le(self.address)
    }

    /// The source line.
    pub fn line(&self) -> u32 {
        u32::from_le(self.line)
    }

    /// Offset of the file name in the string table.
    pub fn file_offset(&self) -> u32 {
        u32::from_le(self.file_offset)
    }

    /// Offset of the symbol name in the string table.
    pub fn symbol_offset(&self) -> u32 {
        u32::from_le(self.symbol_offset)
    }
}

unsafe impl Pod for RawHeader {}
unsafe impl Pod for RawRecord {}
