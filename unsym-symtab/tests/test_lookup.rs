use similar_asserts::assert_eq;

use unsym_common::ByteView;
use unsym_symtab::{MatchKind, SymbolTable, SymbolTableError};
use unsym_testutils::{fixture, SymbolTableBuilder};

type Error = Box<dyn std::error::Error>;

fn table_with_addresses(addresses: &[u64]) -> Vec<u8> {
    let mut builder = SymbolTableBuilder::new();
    for (i, &address) in addresses.iter().enumerate() {
        let symbol = format!("fn{}", i);
        builder.record(address, i as u32, Some("lib.c"), Some(&symbol));
    }
    builder.build()
}

#[test]
fn test_exact_match_first_wins() -> Result<(), Error> {
    let buf = table_with_addresses(&[10, 20, 20, 30]);
    let table = SymbolTable::parse(&buf)?;

    let location = table.lookup(20)?;
    assert_eq!(location.kind(), MatchKind::Exact);
    assert!(location.is_exact());
    assert_eq!(location.index(), 1);
    assert_eq!(location.distance(), 0);
    assert_eq!(location.record().symbol(), Some("fn1"));

    Ok(())
}

#[test]
fn test_exact_match_beats_earlier_near_miss() -> Result<(), Error> {
    let buf = table_with_addresses(&[21, 19, 20]);
    let table = SymbolTable::parse(&buf)?;

    let location = table.lookup(20)?;
    assert!(location.is_exact());
    assert_eq!(location.index(), 2);

    Ok(())
}

#[test]
fn test_best_guess_tie_goes_to_first() -> Result<(), Error> {
    let buf = table_with_addresses(&[10, 50]);
    let table = SymbolTable::parse(&buf)?;

    let location = table.lookup(30)?;
    assert_eq!(location.kind(), MatchKind::BestGuess);
    assert_eq!(location.index(), 0);
    assert_eq!(location.record().address(), 10);
    assert_eq!(location.distance(), 20);

    // the order in the file decides, not the address
    let buf = table_with_addresses(&[50, 10]);
    let table = SymbolTable::parse(&buf)?;
    assert_eq!(table.lookup(30)?.record().address(), 50);

    Ok(())
}

#[test]
fn test_best_guess_nearest() -> Result<(), Error> {
    let buf = table_with_addresses(&[10, 50]);
    let table = SymbolTable::parse(&buf)?;

    let location = table.lookup(31)?;
    assert_eq!(location.kind(), MatchKind::BestGuess);
    assert_eq!(location.record().address(), 50);
    assert_eq!(location.distance(), 19);

    // below and above all records
    assert_eq!(table.lookup(0)?.record().address(), 10);
    assert_eq!(table.lookup(u64::MAX)?.record().address(), 50);

    Ok(())
}

#[test]
fn test_no_wraparound_on_large_addresses() -> Result<(), Error> {
    let buf = table_with_addresses(&[u64::MAX - 1, 0, 1 << 63]);
    let table = SymbolTable::parse(&buf)?;

    let location = table.lookup(u64::MAX)?;
    assert_eq!(location.record().address(), u64::MAX - 1);
    assert_eq!(location.distance(), 1);

    let location = table.lookup(5)?;
    assert_eq!(location.record().address(), 0);
    assert_eq!(location.distance(), 5);

    Ok(())
}

#[test]
fn test_empty_table() -> Result<(), Error> {
    let buf = SymbolTableBuilder::new().build();
    let table = SymbolTable::parse(&buf)?;

    assert_eq!(table.lookup(0), Err(SymbolTableError::EmptyTable));
    assert_eq!(table.lookup(0x1234), Err(SymbolTableError::EmptyTable));

    Ok(())
}

#[test]
fn test_single_record_always_matches() -> Result<(), Error> {
    let buf = table_with_addresses(&[0x400]);
    let table = SymbolTable::parse(&buf)?;

    assert!(table.lookup(0x400)?.is_exact());
    assert_eq!(table.lookup(0x10_0000)?.index(), 0);

    Ok(())
}

#[test]
fn test_lookup_linux() -> Result<(), Error> {
    let buffer = ByteView::open(fixture("linux/server.sym"))?;
    let table = SymbolTable::parse(&buffer)?;

    let lookup = |addr: u64| table.lookup(addr).map(|location| location.to_string());

    assert_eq!(lookup(0x2000)?, "0x2000 src/engine/tick.cpp:88 UEngine::Tick");
    assert_eq!(lookup(0x1040)?, "0x1040 src/main.cpp:12 main");
    assert_eq!(lookup(0x1a00)?, "G: 0x1800 src/net/socket.cpp:5 FSocket::Recv");
    assert_eq!(lookup(0x3000)?, "0x3000 :0 __libc_start_main");
    assert_eq!(lookup(0x3100)?, "0x3100 :0 ");
    assert_eq!(lookup(0x3080)?, "G: 0x3000 :0 __libc_start_main");
    assert_eq!(lookup(0)?, "G: 0x1000 src/main.cpp:10 main");

    Ok(())
}
