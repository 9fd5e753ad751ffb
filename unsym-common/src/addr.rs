use std::fmt;
use std::num::ParseIntError;

use thiserror::Error;

/// An error returned by [`parse_hex_address`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid hex address {input:?}")]
pub struct ParseAddressError {
    input: String,
    #[source]
    source: Option<ParseIntError>,
}

impl ParseAddressError {
    /// The text that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Parses a hexadecimal address with an optional, lower-case `0x` prefix.
///
/// Only the exact prefix `0x` is stripped; `0X` is rejected. The remaining text must consist of
/// hex digits only, so signs are rejected as well.
///
/// ```
/// use unsym_common::parse_hex_address;
///
/// assert_eq!(parse_hex_address("0x200000").unwrap(), 0x200000);
/// assert_eq!(parse_hex_address("7fff1234").unwrap(), 0x7fff1234);
/// assert!(parse_hex_address("0X10").is_err());
/// ```
pub fn parse_hex_address(input: &str) -> Result<u64, ParseAddressError> {
    let digits = input.strip_prefix("0x").unwrap_or(input);

    // `from_str_radix` accepts a leading `+`
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParseAddressError {
            input: input.to_owned(),
            source: None,
        });
    }

    u64::from_str_radix(digits, 16).map_err(|source| ParseAddressError {
        input: input.to_owned(),
        source: Some(source),
    })
}

/// Formats an address as lower-case hex with a `0x` prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct HexAddr(pub u64);

impl fmt::Display for HexAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_optional() {
        assert_eq!(parse_hex_address("0x10"), Ok(0x10));
        assert_eq!(parse_hex_address("10"), Ok(0x10));
        assert_eq!(parse_hex_address("0xffffffffffffffff"), Ok(u64::MAX));
    }

    #[test]
    fn test_upper_case_digits() {
        assert_eq!(parse_hex_address("0xDEADbeef"), Ok(0xdead_beef));
    }

    #[test]
    fn test_invalid() {
        let err = parse_hex_address("0xzz").unwrap_err();
        assert_eq!(err.input(), "0xzz");
        assert_eq!(err.to_string(), "invalid hex address \"0xzz\"");

        assert!(parse_hex_address("").is_err());
        assert!(parse_hex_address("0x").is_err());
        assert!(parse_hex_address("0X10").is_err());
        assert!(parse_hex_address("0x1_0").is_err());
        assert!(parse_hex_address("+10").is_err());
        assert!(parse_hex_address("0x+10").is_err());
        assert!(parse_hex_address("0x10000000000000000").is_err());
    }

    #[test]
    fn test_signed() {
        for input in ["+10", "0x+10", "-10", "0x-10", "+"] {
            let err = parse_hex_address(input).unwrap_err();
            assert_eq!(err.input(), input);
            assert!(std::error::Error::source(&err).is_none());
        }
    }

    #[test]
    fn test_hex_display() {
        assert_eq!(HexAddr(0).to_string(), "0x0");
        assert_eq!(HexAddr(0x200000).to_string(), "0x200000");
    }
}
