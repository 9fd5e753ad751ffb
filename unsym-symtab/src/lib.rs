//! Decoding of flat symbol tables and resolution of instruction addresses.
//!
//! # Structure of a symbol table
//!
//! A symbol table is a small binary file written alongside a build. It consists of three parts,
//! laid out back to back without any padding:
//!
//! ```text
//! [header]       record_count: u32
//! [records]      record_count × { address: u64, line: u32, file_offset: u32, symbol_offset: u32 }
//! [string table] all remaining bytes
//! ```
//!
//! All integers are little-endian. Each record is 20 bytes; see the [`raw`] module.
//!
//! Records reference their file and symbol names by byte offset into the string table. A string
//! runs from its offset up to the next `'\n'` and is trimmed of surrounding whitespace. The offset
//! [`raw::NO_STRING`] (`u32::MAX`) marks a missing string.
//!
//! Records are stored in whatever order the producer emitted them. They are not required to be
//! sorted by address and may contain duplicate addresses.
//!
//! # Lookups
//!
//! [`SymbolTable::lookup`] scans all records for the queried address:
//!
//! 1. The first record whose address equals the query is an exact match.
//! 2. Otherwise the record with the smallest absolute distance to the query is returned as a
//!    best guess. Ties go to the record that comes first in the file.
//!
//! # Example
//!
//! ```
//! use unsym_symtab::{MatchKind, SymbolTable};
//!
//! let mut buf = Vec::new();
//! buf.extend_from_slice(&1u32.to_le_bytes()); // one record
//! buf.extend_from_slice(&0x1000u64.to_le_bytes()); // address
//! buf.extend_from_slice(&42u32.to_le_bytes()); // line
//! buf.extend_from_slice(&0u32.to_le_bytes()); // file at offset 0
//! buf.extend_from_slice(&7u32.to_le_bytes()); // symbol at offset 7
//! buf.extend_from_slice(b"main.c\nmain\n");
//!
//! let table = SymbolTable::parse(&buf).unwrap();
//!
//! let location = table.lookup(0x1000).unwrap();
//! assert_eq!(location.kind(), MatchKind::Exact);
//! assert_eq!(location.to_string(), "0x1000 main.c:42 main");
//!
//! let location = table.lookup(0x1004).unwrap();
//! assert_eq!(location.to_string(), "G: 0x1000 main.c:42 main");
//! ```

#![warn(missing_docs)]

mod error;
mod lookup;
pub mod raw;
mod table;

pub use error::SymbolTableError;
pub use lookup::*;
pub use table::*;
