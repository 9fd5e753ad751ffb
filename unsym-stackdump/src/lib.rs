//! Parsing of textual call stack dumps.
//!
//! Stack samplers such as `eu-stack` print the call stacks of all threads of a process as plain
//! text:
//!
//! ```text
//! PID 4242
//! TID 4242:
//! #0  0x00007f3a2c8e1000 in UEngine::Tick ()
//! #1  0x00007f3a2c8d0040 in main ()
//! TID 4250:
//! #0  0x00007f3a2c8d1800
//! ```
//!
//! Only the leading token and the address of each line are interpreted; anything after the
//! address is ignored. Addresses are hexadecimal with an optional `0x` prefix.
//!
//! [`StackDump::parse`] and [`StackDump::from_reader`] decode such a dump into per-thread
//! [`CallStack`]s. Parsing stops at the first malformed line and reports it as a
//! [`StackDumpError`].

#![warn(missing_docs)]

mod dump;
mod error;
mod parser;

pub use dump::*;
pub use error::*;
