//! `unsym` resolves raw call stack addresses into source locations.
//!
//! A sampler attached to a running process prints the call stacks of all its threads as lists of
//! absolute instruction addresses. Together with a symbol table produced at build time and the
//! address the binary was loaded at, each of those addresses can be mapped back to a file, line
//! and symbol name.
//!
//! The individual parts live in their own crates and are re-exported here behind features:
//!
//! | Feature     | Module        | Contents                                              |
//! |-------------|---------------|-------------------------------------------------------|
//! |             | [`common`]    | `ByteView` and hex address helpers                    |
//! | `symtab`    | `symtab`      | Symbol table decoding and address lookup (default)    |
//! | `stackdump` | `stackdump`   | Parsing of textual per-thread call stack dumps        |

#![warn(missing_docs)]

#[doc(inline)]
pub use unsym_common as common;
#[doc(inline)]
#[cfg(feature = "stackdump")]
pub use unsym_stackdump as stackdump;
#[doc(inline)]
#[cfg(feature = "symtab")]
pub use unsym_symtab as symtab;
