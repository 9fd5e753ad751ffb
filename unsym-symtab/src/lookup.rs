use std::fmt;

use crate::{SymbolRecord, SymbolTable, SymbolTableError};

/// How a [`ResolvedLocation`] was matched to the queried address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchKind {
    /// The record's address equals the queried address.
    Exact,
    /// No record matched exactly; this is the record closest to the queried address.
    BestGuess,
}

/// The result of [`SymbolTable::lookup`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedLocation<'table, 'data> {
    record: &'table SymbolRecord<'data>,
    index: usize,
    kind: MatchKind,
    distance: u64,
}

impl<'table, 'data> ResolvedLocation<'table, 'data> {
    /// The matched record.
    pub fn record(&self) -> &'table SymbolRecord<'data> {
        self.record
    }

    /// Position of the matched record in the table.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether this is an exact or best-guess match.
    pub fn kind(&self) -> MatchKind {
        self.kind
    }

    /// Returns `true` for exact matches.
    pub fn is_exact(&self) -> bool {
        self.kind == MatchKind::Exact
    }

    /// Absolute distance between the queried address and the record's address.
    pub fn distance(&self) -> u64 {
        self.distance
    }
}

/// Renders the record, prefixed with `G: ` for best-guess matches.
impl fmt::Display for ResolvedLocation<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == MatchKind::BestGuess {
            f.write_str("G: ")?;
        }
        fmt::Display::fmt(self.record, f)
    }
}

impl<'data> SymbolTable<'data> {
    /// Resolves `addr` to the record with the exact address, or to the closest one.
    ///
    /// When several records share the queried address, or the smallest distance, the first one in
    /// file order wins. Every query scans the whole table.
    #[tracing::instrument(level = "trace", name = "SymbolTable::lookup", skip_all)]
    pub fn lookup(&self, addr: u64) -> Result<ResolvedLocation<'_, 'data>, SymbolTableError> {
        let mut closest: Option<(usize, u64)> = None;

        for (index, record) in self.records.iter().enumerate() {
            if record.address() == addr {
                return Ok(ResolvedLocation {
                    record,
                    index,
                    kind: MatchKind::Exact,
                    distance: 0,
                });
            }

            let distance = record.address().abs_diff(addr);
            if closest.map_or(true, |(_, best)| distance < best) {
                closest = Some((index, distance));
            }
        }

        let (index, distance) = closest.ok_or(SymbolTableError::EmptyTable)?;
        tracing::debug!(addr, index, distance, "no exact match, using closest record");

        Ok(ResolvedLocation {
            record: &self.records[index],
            index,
            kind: MatchKind::BestGuess,
            distance,
        })
    }
}
