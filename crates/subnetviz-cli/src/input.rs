//! Text input validation
//!
//! The engine only ever sees well-formed integers; everything that can go
//! wrong with what a user typed is caught and reported here.

use clap::ValueEnum;
use std::fmt;
use std::net::Ipv6Addr;
use subnetviz_cidr::{CidrTable, MaskKind, MAX_PREFIX_LEN};
use subnetviz_core::{Address, SubnetError};
use thiserror::Error;

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("No IP address entered.")]
    NoInput,

    #[error("Invalid IPv4 address: {0}")]
    InvalidIp(String),

    #[error("Invalid IPv4 address: {0}. Only IPv4 addresses are accepted, not IPv6.")]
    IsIpv6(String),

    #[error("Invalid octet {octet:?} for base {base}: must be 0-255")]
    InvalidOctet { octet: String, base: Base },

    #[error("Invalid CIDR prefix: {0}. A valid prefix is between 0 and 32 inclusive.")]
    InvalidCidr(String),

    #[error("CIDR prefix out of range: {0}. Enter a value between 0 and 32 inclusive.")]
    CidrRange(u32),

    #[error("Invalid netmask or wildcard mask: {0}")]
    InvalidMask(String),

    #[error("Missing netmask, wildcard mask, or CIDR prefix.")]
    EmptyMaskOrPrefix,

    #[error("The mask {mask} is not a valid {expected}.")]
    MaskTypeMismatch { mask: String, expected: MaskKind },

    #[error("The mask {0} is both a netmask and a wildcard; pass --mask-kind to choose.")]
    AmbiguousMask(String),
}

pub type Result<T> = std::result::Result<T, InputError>;

/// Radix octets are written in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Base {
    #[value(alias = "bin")]
    Binary,
    #[value(alias = "oct")]
    Octal,
    #[default]
    #[value(alias = "dec")]
    Decimal,
    #[value(alias = "hexadecimal")]
    Hex,
}

impl Base {
    pub fn radix(&self) -> u32 {
        match self {
            Base::Binary => 2,
            Base::Octal => 8,
            Base::Decimal => 10,
            Base::Hex => 16,
        }
    }

    fn prefix(&self) -> Option<&'static str> {
        match self {
            Base::Binary => Some("0b"),
            Base::Octal => Some("0o"),
            Base::Decimal => None,
            Base::Hex => Some("0x"),
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Base::Binary => f.write_str("binary"),
            Base::Octal => f.write_str("octal"),
            Base::Decimal => f.write_str("decimal"),
            Base::Hex => f.write_str("hex"),
        }
    }
}

/// How the mask argument should be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MaskInput {
    Prefix,
    Netmask,
    Wildcard,
}

impl MaskInput {
    fn mask_kind(&self) -> Option<MaskKind> {
        match self {
            MaskInput::Prefix => None,
            MaskInput::Netmask => Some(MaskKind::Netmask),
            MaskInput::Wildcard => Some(MaskKind::Wildcard),
        }
    }
}

/// Parse one octet written in `base`
///
/// A radix prefix matching the base (`0x`, `0o`, `0b`) is accepted. Sign
/// characters are not.
pub fn parse_octet(text: &str, base: Base) -> Result<u8> {
    let trimmed = text.trim();
    let digits = base
        .prefix()
        .and_then(|p| trimmed.strip_prefix(p))
        .unwrap_or(trimmed);
    let invalid = || InputError::InvalidOctet {
        octet: trimmed.to_string(),
        base,
    };

    // from_str_radix takes a leading '+'
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(base.radix())) {
        return Err(invalid());
    }
    u8::from_str_radix(digits, base.radix()).map_err(|_| invalid())
}

/// Parse a dotted address whose octets are written in `base`
///
/// Leading zeros are allowed, so `010.000.000.001` is 10.0.0.1.
pub fn parse_address(text: &str, base: Base) -> Result<Address> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InputError::NoInput);
    }
    if text.parse::<Ipv6Addr>().is_ok() {
        return Err(InputError::IsIpv6(text.to_string()));
    }

    let parts: Vec<&str> = text.split('.').collect();
    if parts.len() != 4 {
        return Err(InputError::InvalidIp(text.to_string()));
    }

    let mut octets = [0u8; 4];
    for (slot, part) in octets.iter_mut().zip(&parts) {
        *slot = parse_octet(part, base)?;
    }
    let [a, b, c, d] = octets;
    Ok(Address::from_octets(a, b, c, d))
}

fn parse_prefix(text: &str) -> Result<u8> {
    let value: u32 = text
        .parse()
        .map_err(|_| InputError::InvalidCidr(text.to_string()))?;
    if value > u32::from(MAX_PREFIX_LEN) {
        return Err(InputError::CidrRange(value));
    }
    Ok(value as u8)
}

/// Resolve a prefix, netmask or wildcard argument to a prefix length
///
/// Without an explicit `kind`, text shorter than three characters is a
/// prefix and anything longer is a dotted mask whose kind is inferred.
pub fn parse_mask(text: &str, kind: Option<MaskInput>) -> Result<u8> {
    let text = text.trim();
    let text = text.strip_prefix('/').unwrap_or(text);
    if text.is_empty() {
        return Err(InputError::EmptyMaskOrPrefix);
    }

    let is_prefix = match kind {
        Some(k) => k == MaskInput::Prefix,
        None => text.len() < 3,
    };
    if is_prefix {
        return parse_prefix(text);
    }

    let mask = parse_address(text, Base::Decimal)
        .map_err(|_| InputError::InvalidMask(text.to_string()))?;
    let mask_kind = kind.and_then(|k| k.mask_kind());

    CidrTable::global()
        .resolve_mask(mask, mask_kind)
        .map_err(|err| match (err, mask_kind) {
            (SubnetError::AmbiguousMask(_), _) => InputError::AmbiguousMask(text.to_string()),
            (_, Some(expected)) if CidrTable::global().resolve_mask(mask, None).is_ok() => {
                InputError::MaskTypeMismatch {
                    mask: text.to_string(),
                    expected,
                }
            }
            _ => InputError::InvalidMask(text.to_string()),
        })
}

/// Parse a batch line: `address` or `address/prefix`
pub fn parse_target(text: &str) -> Result<(Address, Option<u8>)> {
    match text.trim().split_once('/') {
        Some((addr, prefix)) => Ok((
            parse_address(addr, Base::Decimal)?,
            Some(parse_prefix(prefix.trim())?),
        )),
        None => Ok((parse_address(text, Base::Decimal)?, None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_address() {
        assert_eq!(
            parse_address("192.168.1.10", Base::Decimal),
            Ok(Address::from_octets(192, 168, 1, 10))
        );
        assert_eq!(
            parse_address(" 010.000.000.001 ", Base::Decimal),
            Ok(Address::from_octets(10, 0, 0, 1))
        );
    }

    #[test]
    fn test_parse_address_in_other_bases() {
        assert_eq!(
            parse_address("C0.A8.01.0A", Base::Hex),
            Ok(Address::from_octets(192, 168, 1, 10))
        );
        assert_eq!(
            parse_address("0xc0.0xa8.0x1.0xa", Base::Hex),
            Ok(Address::from_octets(192, 168, 1, 10))
        );
        assert_eq!(
            parse_address("300.250.1.12", Base::Octal),
            Ok(Address::from_octets(192, 168, 1, 10))
        );
        assert_eq!(
            parse_address("11000000.10101000.00000001.00001010", Base::Binary),
            Ok(Address::from_octets(192, 168, 1, 10))
        );
    }

    #[test]
    fn test_parse_address_errors() {
        assert_eq!(parse_address("   ", Base::Decimal), Err(InputError::NoInput));
        assert_eq!(
            parse_address("1.2.3", Base::Decimal),
            Err(InputError::InvalidIp("1.2.3".to_string()))
        );
        assert_eq!(
            parse_address("256.0.0.1", Base::Decimal),
            Err(InputError::InvalidOctet {
                octet: "256".to_string(),
                base: Base::Decimal
            })
        );
        assert!(matches!(
            parse_address("2001:db8::1", Base::Decimal),
            Err(InputError::IsIpv6(_))
        ));
        assert!(matches!(
            parse_address("1.2.3.9", Base::Octal),
            Err(InputError::InvalidOctet { .. })
        ));
    }

    #[test]
    fn test_parse_octet() {
        assert_eq!(parse_octet("FF", Base::Hex), Ok(255));
        assert_eq!(parse_octet("377", Base::Octal), Ok(255));
        assert_eq!(parse_octet("0b101", Base::Binary), Ok(5));
        assert!(parse_octet("400", Base::Octal).is_err());
        assert!(parse_octet("", Base::Decimal).is_err());
        assert!(parse_octet("0x", Base::Hex).is_err());
    }

    #[test]
    fn test_parse_octet_rejects_sign() {
        assert_eq!(
            parse_octet("+1", Base::Decimal),
            Err(InputError::InvalidOctet {
                octet: "+1".to_string(),
                base: Base::Decimal
            })
        );
        assert!(parse_octet("-0", Base::Decimal).is_err());
        assert!(parse_octet("0x+f", Base::Hex).is_err());
        assert!(matches!(
            parse_address("+1.+2.+3.+4", Base::Decimal),
            Err(InputError::InvalidOctet { .. })
        ));
    }

    #[test]
    fn test_parse_mask_prefix() {
        assert_eq!(parse_mask("24", None), Ok(24));
        assert_eq!(parse_mask("/8", None), Ok(8));
        assert_eq!(parse_mask("0", None), Ok(0));
        assert_eq!(parse_mask("32", Some(MaskInput::Prefix)), Ok(32));
        assert_eq!(parse_mask("33", None), Err(InputError::CidrRange(33)));
        assert_eq!(
            parse_mask("x", None),
            Err(InputError::InvalidCidr("x".to_string()))
        );
        assert_eq!(parse_mask("", None), Err(InputError::EmptyMaskOrPrefix));
    }

    #[test]
    fn test_parse_mask_dotted() {
        assert_eq!(parse_mask("255.255.255.0", None), Ok(24));
        assert_eq!(parse_mask("0.0.0.255", None), Ok(24));
        assert_eq!(parse_mask("255.255.255.192", Some(MaskInput::Netmask)), Ok(26));
        assert_eq!(parse_mask("0.0.0.63", Some(MaskInput::Wildcard)), Ok(26));
    }

    #[test]
    fn test_parse_mask_invalid() {
        assert_eq!(
            parse_mask("255.0.255.0", None),
            Err(InputError::InvalidMask("255.0.255.0".to_string()))
        );
        assert_eq!(
            parse_mask("not.a.mask.x", None),
            Err(InputError::InvalidMask("not.a.mask.x".to_string()))
        );
    }

    #[test]
    fn test_parse_mask_type_mismatch() {
        assert_eq!(
            parse_mask("0.0.0.255", Some(MaskInput::Netmask)),
            Err(InputError::MaskTypeMismatch {
                mask: "0.0.0.255".to_string(),
                expected: MaskKind::Netmask,
            })
        );
    }

    #[test]
    fn test_parse_mask_ambiguous() {
        assert_eq!(
            parse_mask("255.255.255.255", None),
            Err(InputError::AmbiguousMask("255.255.255.255".to_string()))
        );
        assert_eq!(parse_mask("255.255.255.255", Some(MaskInput::Netmask)), Ok(32));
        assert_eq!(parse_mask("255.255.255.255", Some(MaskInput::Wildcard)), Ok(0));
        assert_eq!(parse_mask("0.0.0.0", Some(MaskInput::Netmask)), Ok(0));
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(
            parse_target("10.1.2.3/16"),
            Ok((Address::from_octets(10, 1, 2, 3), Some(16)))
        );
        assert_eq!(
            parse_target("8.8.8.8"),
            Ok((Address::from_octets(8, 8, 8, 8), None))
        );
        assert_eq!(parse_target("8.8.8.8/40"), Err(InputError::CidrRange(40)));
    }
}
