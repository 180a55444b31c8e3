//! Everything derived from an address and prefix length

use serde::{Deserialize, Serialize};
use subnetviz_core::{Address, Result};

use crate::{CidrEntry, CidrTable, SubnetBlock};

/// Derived values for `address/prefix_len`
///
/// # Examples
///
/// ```
/// use subnetviz_cidr::SubnetSummary;
/// use subnetviz_core::Address;
///
/// let summary = SubnetSummary::new(Address::from_octets(172, 16, 5, 5), 20).unwrap();
/// assert_eq!(summary.network.to_string(), "172.16.0.0");
/// assert_eq!(summary.broadcast.to_string(), "172.16.15.255");
/// assert_eq!(summary.next_subnet.unwrap().to_string(), "172.16.16.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetSummary {
    pub address: Address,
    pub prefix_len: u8,
    pub host_bits: u8,
    pub netmask: Address,
    pub wildcard: Address,
    pub network: Address,
    pub broadcast: Address,
    /// `None` for /31 and /32
    pub first_host: Option<Address>,
    /// `None` for /31 and /32
    pub last_host: Option<Address>,
    /// Network of the following block of the same size, `None` if it would wrap
    pub next_subnet: Option<Address>,
    pub total_addresses: u64,
    pub usable_hosts: u64,
}

impl SubnetSummary {
    pub fn new(address: Address, prefix_len: u8) -> Result<Self> {
        let entry = CidrTable::global().entry(prefix_len)?;
        Ok(Self::from_entry(address, entry))
    }

    /// Summaries of every block containing `address`, /0 through /32
    pub fn all_prefixes(address: Address) -> Vec<Self> {
        CidrTable::global()
            .iter()
            .map(|entry| Self::from_entry(address, entry))
            .collect()
    }

    fn from_entry(address: Address, entry: &CidrEntry) -> Self {
        let block = SubnetBlock {
            network: Address(address.0 & entry.netmask.0),
            prefix_len: entry.prefix_len,
        };

        Self {
            address,
            prefix_len: entry.prefix_len,
            host_bits: entry.host_bits,
            netmask: entry.netmask,
            wildcard: entry.wildcard,
            network: block.network(),
            broadcast: block.broadcast(),
            first_host: block.first_usable(),
            last_host: block.last_usable(),
            next_subnet: block.next().map(|b| b.network()),
            total_addresses: entry.num_addresses,
            usable_hosts: entry.num_usable_hosts,
        }
    }

    /// The block this summary describes
    pub fn block(&self) -> SubnetBlock {
        SubnetBlock {
            network: self.network,
            prefix_len: self.prefix_len,
        }
    }
}
