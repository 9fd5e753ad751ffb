//! Test helpers for `unsym`.
#![warn(missing_docs)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Sentinel string offset for a missing file or symbol.
pub const NO_STRING: u32 = u32::MAX;

/// Returns the full path to the specified fixture.
///
/// Fixtures are stored in the `unsym-testutils/fixtures` directory and paths should be given
/// relative to that location.
///
/// # Example
///
/// ```
/// use unsym_testutils::fixture;
///
/// let path = fixture("linux/server.sym");
/// assert!(path.ends_with("linux/server.sym"));
/// ```
pub fn fixture<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut full_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    full_path.push("fixtures");

    let path = path.as_ref();
    full_path.push(path);

    assert!(
        full_path.exists(),
        "Fixture does not exist: {}",
        full_path.display()
    );

    full_path
}

/// Encodes synthetic symbol tables.
///
/// Strings added through [`record`](Self::record) are newline-terminated and deduplicated, so
/// records sharing a file name also share its offset. Use [`raw_record`](Self::raw_record) and
/// [`raw_strings`](Self::raw_strings) to craft malformed tables.
///
/// # Example
///
/// ```
/// use unsym_testutils::SymbolTableBuilder;
///
/// let buf = SymbolTableBuilder::new()
///     .record(0x1000, 10, Some("main.c"), Some("main"))
///     .record(0x1010, 0, None, None)
///     .build();
///
/// assert_eq!(buf.len(), 4 + 2 * 20 + "main.c\nmain\n".len());
/// ```
#[derive(Clone, Debug, Default)]
pub struct SymbolTableBuilder {
    records: Vec<(u64, u32, u32, u32)>,
    strings: Vec<u8>,
    offsets: HashMap<String, u32>,
    declared_count: Option<u32>,
}

impl SymbolTableBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record, interning its file and symbol.
    pub fn record(
        &mut self,
        address: u64,
        line: u32,
        file: Option<&str>,
        symbol: Option<&str>,
    ) -> &mut Self {
        let file_offset = file.map_or(NO_STRING, |file| self.intern(file));
        let symbol_offset = symbol.map_or(NO_STRING, |symbol| self.intern(symbol));
        self.raw_record(address, line, file_offset, symbol_offset)
    }

    /// Appends a record with explicit string offsets.
    pub fn raw_record(
        &mut self,
        address: u64,
        line: u32,
        file_offset: u32,
        symbol_offset: u32,
    ) -> &mut Self {
        self.records.push((address, line, file_offset, symbol_offset));
        self
    }

    /// Appends bytes verbatim to the string table and returns their offset.
    pub fn raw_strings(&mut self, bytes: &[u8]) -> u32 {
        let offset = self.strings.len() as u32;
        self.strings.extend_from_slice(bytes);
        offset
    }

    /// Overrides the record count written to the header.
    pub fn declared_count(&mut self, count: u32) -> &mut Self {
        self.declared_count = Some(count);
        self
    }

    /// Writes the header, all records and the string table.
    pub fn build(&self) -> Vec<u8> {
        let count = self.declared_count.unwrap_or(self.records.len() as u32);

        let mut buf = Vec::with_capacity(4 + self.records.len() * 20 + self.strings.len());
        buf.extend_from_slice(&count.to_le_bytes());
        for &(address, line, file_offset, symbol_offset) in &self.records {
            buf.extend_from_slice(&address.to_le_bytes());
            buf.extend_from_slice(&line.to_le_bytes());
            buf.extend_from_slice(&file_offset.to_le_bytes());
            buf.extend_from_slice(&symbol_offset.to_le_bytes());
        }
        buf.extend_from_slice(&self.strings);
        buf
    }

    fn intern(&mut self, string: &str) -> u32 {
        if let Some(&offset) = self.offsets.get(string) {
            return offset;
        }

        let offset = self.strings.len() as u32;
        self.strings.extend_from_slice(string.as_bytes());
        self.strings.push(b'\n');
        self.offsets.insert(string.to_owned(), offset);
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interning() {
        let buf = SymbolTableBuilder::new()
            .record(1, 1, Some("a.c"), Some("f"))
            .record(2, 2, Some("a.c"), Some("g"))
            .build();

        // header + 2 records + "a.c\nf\ng\n"
        assert_eq!(buf.len(), 4 + 40 + 8);
        assert_eq!(&buf[..4], &2u32.to_le_bytes());
        assert_eq!(&buf[44..], b"a.c\nf\ng\n");
        // both records point at offset 0 for the file
        assert_eq!(&buf[16..20], &0u32.to_le_bytes());
        assert_eq!(&buf[36..40], &0u32.to_le_bytes());
    }

    #[test]
    fn test_declared_count() {
        let buf = SymbolTableBuilder::new()
            .record(1, 1, None, None)
            .declared_count(5)
            .build();

        assert_eq!(&buf[..4], &5u32.to_le_bytes());
        assert_eq!(buf.len(), 24);
    }
}
