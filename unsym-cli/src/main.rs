use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::ValueParser;
use clap::{value_parser, Arg, ArgMatches, Command};
use tracing_subscriber::{fmt, EnvFilter};

use unsym::common::{parse_hex_address, ByteView, HexAddr};
use unsym::stackdump::StackDump;
use unsym::symtab::{SymbolTable, SymbolTableError};

/// Prints the first `count` records of the table, for debugging the symbol file itself.
fn dump_records<W: Write>(out: &mut W, table: &SymbolTable<'_>, count: usize) -> Result<()> {
    writeln!(out, "Records: {}", table.len())?;
    for record in table.records().iter().take(count) {
        writeln!(out, "Rec: {:?}", record)?;
    }
    Ok(())
}

/// Resolves every call of every thread relative to `base` and prints the result.
fn write_report<W: Write>(
    out: &mut W,
    table: &SymbolTable<'_>,
    dump: &StackDump,
    base: u64,
) -> Result<()> {
    writeln!(out, "Base Address: {}", HexAddr(base))?;
    writeln!(out, "Stacks for process: {}", dump.pid().unwrap_or_default())?;

    for stack in dump.stacks() {
        writeln!(out, "\tThreadID: {}", stack.tid)?;
        for call in &stack.calls {
            let relative = call.address.wrapping_sub(base);
            if relative > call.address {
                tracing::warn!(
                    address = %HexAddr(call.address),
                    "call address below the base address"
                );
            }

            match table.lookup(relative) {
                Ok(location) => writeln!(out, "\t\t{} {}", HexAddr(relative), location)?,
                Err(SymbolTableError::EmptyTable) => writeln!(out, "\t\t{} ", HexAddr(relative))?,
                Err(err) => return Err(err.into()),
            }
        }
    }

    Ok(())
}

fn execute(matches: &ArgMatches) -> Result<()> {
    // both positionals are `required`, clap exits before we get here without them
    let path = matches.get_one::<PathBuf>("symbols").unwrap();
    let base = *matches.get_one::<u64>("base_address").unwrap();

    let view = ByteView::open(path)
        .with_context(|| format!("failed to open symbol file {}", path.display()))?;
    let table = SymbolTable::parse(&view).context("failed to decode symbol table")?;
    tracing::info!(records = table.len(), "loaded symbol table");

    if let Some(&count) = matches.get_one::<usize>("dump") {
        dump_records(&mut io::stderr().lock(), &table, count)?;
    }

    let dump = StackDump::from_reader(io::stdin().lock()).context("failed to parse stack dump")?;

    let mut out = BufWriter::new(io::stdout().lock());
    write_report(&mut out, &table, &dump, base)?;
    out.flush()?;

    Ok(())
}

fn main() {
    let matches = Command::new("unsym")
        .about("Resolves the call stacks of a stack dump read from stdin against a symbol table")
        .after_help("Example: eu-stack -p $PID | unsym UnrealServer.sym 0x200000")
        .arg(
            Arg::new("symbols")
                .required(true)
                .value_name("SYMBOLS")
                .value_parser(value_parser!(PathBuf))
                .help("Path to the symbol table file"),
        )
        .arg(
            Arg::new("base_address")
                .required(true)
                .value_name("BASE_ADDR")
                .value_parser(ValueParser::new(parse_hex_address))
                .help("Load address of the binary in hex, with an optional 0x prefix"),
        )
        .arg(
            Arg::new("dump")
                .long("dump")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Print the first N records of the symbol table to stderr"),
        )
        .get_matches();

    // Tracing subscriber controlled by `RUST_LOG`
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .event_format(fmt::format().compact().with_target(false).without_time())
        .init();

    if let Err(e) = execute(&matches) {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}
