//! Common functionality for `unsym`.
//!
//! This crate exposes a set of key types:
//!
//!  - [`ByteView`]: Gives access to binary data in-memory or on the file system.
//!  - [`parse_hex_address`]: Parses the hex addresses used by stack dumps and the command line.
//!  - [`HexAddr`]: Renders an address the way all `unsym` output does.

#![warn(missing_docs)]

mod addr;
mod byteview;

pub use crate::addr::*;
pub use crate::byteview::*;
