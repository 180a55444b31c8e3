//! CIDR arithmetic for IPv4
//!
//! Provides utilities for working with CIDR blocks:
//! - Per-prefix netmask/wildcard table ([`CidrTable`])
//! - Network, broadcast and usable host derivation
//! - Netmask / wildcard to prefix resolution
//! - Minimal block decomposition of an arbitrary address range
//!
//! # Examples
//!
//! ```
//! use subnetviz_cidr::SubnetBlock;
//! use subnetviz_core::Address;
//!
//! let block = SubnetBlock::new(Address::from_octets(192, 168, 1, 77), 24).unwrap();
//! assert_eq!(block.network(), Address(0xC0A80100)); // 192.168.1.0
//! assert!(block.contains(Address(0xC0A80101))); // 192.168.1.1
//! assert!(!block.contains(Address(0xC0A80001))); // 192.168.0.1
//! assert_eq!(block.to_string(), "192.168.1.0/24");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use subnetviz_core::{Address, Result, SubnetError};

pub mod range;
pub mod summary;
pub mod table;

pub use range::blocks_for_range;
pub use summary::SubnetSummary;
pub use table::{
    broadcast, host_range, netmask, network, wildcard, CidrEntry, CidrTable, MaskKind,
    MAX_PREFIX_LEN,
};

/// CIDR block: a network address and prefix length
///
/// The network address always has its host bits cleared. Deserialized
/// blocks go through [`SubnetBlock::new`] as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawBlock")]
pub struct SubnetBlock {
    /// Network address (base IP)
    network: Address,
    /// Prefix length (0-32)
    prefix_len: u8,
}

impl SubnetBlock {
    /// Block of length `prefix_len` that contains `address`
    ///
    /// # Arguments
    ///
    /// * `address` - Any address inside the block
    /// * `prefix_len` - Prefix length (0-32)
    pub fn new(address: Address, prefix_len: u8) -> Result<Self> {
        Ok(Self {
            network: network(address, prefix_len)?,
            prefix_len,
        })
    }

    /// Get network address
    pub fn network(&self) -> Address {
        self.network
    }

    /// Get prefix length
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    fn entry(&self) -> &'static CidrEntry {
        // prefix_len was validated on construction
        &CidrTable::global().entries()[self.prefix_len as usize]
    }

    /// Get network mask
    pub fn netmask(&self) -> Address {
        self.entry().netmask
    }

    pub fn wildcard(&self) -> Address {
        self.entry().wildcard
    }

    /// Get broadcast address
    pub fn broadcast(&self) -> Address {
        Address(self.network.0 | self.wildcard().0)
    }

    /// First usable host, `None` for /31 and /32
    pub fn first_usable(&self) -> Option<Address> {
        self.entry()
            .has_usable_hosts()
            .then(|| Address(self.network.0 + 1))
    }

    /// Last usable host, `None` for /31 and /32
    pub fn last_usable(&self) -> Option<Address> {
        self.entry()
            .has_usable_hosts()
            .then(|| Address(self.broadcast().0 - 1))
    }

    /// Total number of addresses in this block
    pub fn size(&self) -> u64 {
        self.entry().num_addresses
    }

    /// Check if address is in this block
    pub fn contains(&self, address: Address) -> bool {
        (address.0 & self.netmask().0) == self.network.0
    }

    /// Adjacent block of the same length, `None` past 255.255.255.255
    pub fn next(&self) -> Option<SubnetBlock> {
        let next = self.broadcast().0.checked_add(1)?;
        Some(Self {
            network: Address(next),
            prefix_len: self.prefix_len,
        })
    }
}

/// Wire form of [`SubnetBlock`] before validation
#[derive(Deserialize)]
struct RawBlock {
    network: Address,
    prefix_len: u8,
}

impl TryFrom<RawBlock> for SubnetBlock {
    type Error = SubnetError;

    fn try_from(raw: RawBlock) -> Result<Self> {
        SubnetBlock::new(raw.network, raw.prefix_len)
    }
}

impl fmt::Display for SubnetBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix_len)
    }
}
