//! Core types for subnetviz
//!
//! This crate provides the foundational types shared by the other subnetviz crates:
//! - [`Address`] - IPv4 address as a 32-bit unsigned integer
//! - [`AddressFormat`] - Textual renderings of an address
//! - [`SubnetError`] - Error types
//!
//! ```
//! use subnetviz_core::Address;
//!
//! let addr = Address::from_octets(192, 168, 1, 10);
//! assert_eq!(addr.to_string(), "192.168.1.10");
//! assert_eq!(addr.octet(2), 1);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use thiserror::Error;

pub mod format;

pub use format::AddressFormat;

/// IPv4 address
///
/// The integer is the canonical representation. Every textual form is
/// derived from it.
///
/// # Examples
///
/// ```
/// use subnetviz_core::Address;
///
/// let google = Address(0x08080808);
/// assert_eq!(google, Address::from_octets(8, 8, 8, 8));
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Address(pub u32);

impl Address {
    /// 0.0.0.0
    pub const MIN: Address = Address(0);
    /// 255.255.255.255
    pub const MAX: Address = Address(u32::MAX);

    /// Build an address from its four octets, most significant first
    pub const fn from_octets(a: u8, b: u8, c: u8, d: u8) -> Self {
        Address(u32::from_be_bytes([a, b, c, d]))
    }

    /// Octet `index` (0 is the most significant)
    ///
    /// # Panics
    ///
    /// Panics if `index > 3`.
    pub const fn octet(self, index: usize) -> u8 {
        assert!(index < 4, "octet index out of range");
        ((self.0 >> (24 - 8 * index)) & 0xFF) as u8
    }

    /// All four octets, most significant first
    pub const fn octets(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Bit `index` (0 is the most significant)
    ///
    /// # Panics
    ///
    /// Panics if `index > 31`.
    pub const fn bit(self, index: usize) -> u8 {
        assert!(index < 32, "bit index out of range");
        ((self.0 >> (31 - index)) & 1) as u8
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.octets();
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

impl From<u32> for Address {
    fn from(value: u32) -> Self {
        Address(value)
    }
}

impl From<Address> for u32 {
    fn from(value: Address) -> Self {
        value.0
    }
}

impl From<Ipv4Addr> for Address {
    fn from(value: Ipv4Addr) -> Self {
        Address(u32::from(value))
    }
}

impl From<Address> for Ipv4Addr {
    fn from(value: Address) -> Self {
        Ipv4Addr::from(value.0)
    }
}

/// Error types for subnet arithmetic
///
/// Every variant is a deterministic function of the input, so none of them
/// is worth retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubnetError {
    /// Prefix length outside 0-32
    #[error("Prefix length out of range: {0} (must be 0-32)")]
    OutOfRange(u8),

    /// Range start is after range end
    #[error("Invalid range: start {start} is greater than end {end}")]
    InvalidRange { start: Address, end: Address },

    /// Range decomposition found no aligned block
    #[error("No aligned CIDR block found while decomposing {start} - {end}")]
    AlgorithmInvariantViolated { start: Address, end: Address },

    /// Value is not a contiguous netmask or wildcard mask
    #[error("Invalid netmask or wildcard mask: {0}")]
    InvalidMask(Address),

    /// Mask is both a valid netmask and a valid wildcard
    #[error("Ambiguous mask: {0} is both a netmask and a wildcard, specify which")]
    AmbiguousMask(Address),
}

/// Result type alias for subnet operations
pub type Result<T> = std::result::Result<T, SubnetError>;
