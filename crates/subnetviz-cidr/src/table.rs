//! Precomputed per-prefix mask table
//!
//! There are only 33 distinct IPv4 prefix lengths, so every mask and count
//! is computed once and shared for the life of the process.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use subnetviz_core::{Address, Result, SubnetError};

/// Longest IPv4 prefix
pub const MAX_PREFIX_LEN: u8 = 32;

static CIDR_TABLE: Lazy<CidrTable> = Lazy::new(CidrTable::build);

/// Mask values and counts for one prefix length
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CidrEntry {
    /// Network bits
    pub prefix_len: u8,
    /// Host bits (32 - prefix_len)
    pub host_bits: u8,
    pub netmask: Address,
    pub wildcard: Address,
    /// 2^host_bits
    pub num_addresses: u64,
    /// num_addresses - 2, or 0 for /31 and /32
    pub num_usable_hosts: u64,
}

impl CidrEntry {
    fn new(prefix_len: u8) -> Self {
        let host_bits = MAX_PREFIX_LEN - prefix_len;

        // A u32 shift by 32 overflows, so /0 is spelled out.
        let netmask = if prefix_len == 0 {
            0
        } else {
            u32::MAX << host_bits
        };
        let wildcard = u32::MAX - netmask;
        let num_addresses = 1u64 << host_bits;

        Self {
            prefix_len,
            host_bits,
            netmask: Address(netmask),
            wildcard: Address(wildcard),
            num_addresses,
            num_usable_hosts: if num_addresses > 2 { num_addresses - 2 } else { 0 },
        }
    }

    /// One character per bit: `N` for network bits, `H` for host bits
    pub fn bitmap(&self) -> String {
        let mut map = "N".repeat(self.prefix_len as usize);
        map.push_str(&"H".repeat(self.host_bits as usize));
        map
    }

    /// Whether the prefix leaves room for usable hosts
    pub fn has_usable_hosts(&self) -> bool {
        self.num_usable_hosts > 0
    }
}

/// Which half of a prefix's mask pair a value is supposed to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskKind {
    Netmask,
    Wildcard,
}

impl fmt::Display for MaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskKind::Netmask => f.write_str("netmask"),
            MaskKind::Wildcard => f.write_str("wildcard"),
        }
    }
}

/// Table of all 33 prefix lengths
///
/// # Examples
///
/// ```
/// use subnetviz_cidr::CidrTable;
/// use subnetviz_core::Address;
///
/// let entry = CidrTable::global().entry(24).unwrap();
/// assert_eq!(entry.netmask, Address::from_octets(255, 255, 255, 0));
/// assert_eq!(entry.num_usable_hosts, 254);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CidrTable {
    entries: [CidrEntry; 33],
}

impl CidrTable {
    /// Compute every entry from scratch
    ///
    /// Prefer [`CidrTable::global`]; this exists for callers that want
    /// their own copy.
    pub fn build() -> Self {
        Self {
            entries: std::array::from_fn(|p| CidrEntry::new(p as u8)),
        }
    }

    /// Shared process-wide table, built on first use
    pub fn global() -> &'static CidrTable {
        &CIDR_TABLE
    }

    /// Entry for `prefix_len`
    pub fn entry(&self, prefix_len: u8) -> Result<&CidrEntry> {
        self.entries
            .get(prefix_len as usize)
            .ok_or(SubnetError::OutOfRange(prefix_len))
    }

    /// All entries, /0 first
    pub fn entries(&self) -> &[CidrEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CidrEntry> {
        self.entries.iter()
    }

    /// Prefix length whose netmask (or wildcard) equals `mask`
    ///
    /// Fails with [`SubnetError::InvalidMask`] when `mask` is not a
    /// contiguous mask of the requested kind.
    pub fn prefix_for_mask(&self, mask: Address, kind: MaskKind) -> Result<u8> {
        self.entries
            .iter()
            .find(|e| match kind {
                MaskKind::Netmask => e.netmask == mask,
                MaskKind::Wildcard => e.wildcard == mask,
            })
            .map(|e| e.prefix_len)
            .ok_or(SubnetError::InvalidMask(mask))
    }

    /// Prefix length for `mask`, inferring the kind when `kind` is `None`
    ///
    /// `0.0.0.0` and `255.255.255.255` are each both a netmask and a
    /// wildcard, with opposite meanings. For those two values the caller
    /// must pass a kind, otherwise [`SubnetError::AmbiguousMask`] is returned.
    pub fn resolve_mask(&self, mask: Address, kind: Option<MaskKind>) -> Result<u8> {
        if let Some(kind) = kind {
            return self.prefix_for_mask(mask, kind);
        }

        match (
            self.prefix_for_mask(mask, MaskKind::Netmask),
            self.prefix_for_mask(mask, MaskKind::Wildcard),
        ) {
            (Ok(_), Ok(_)) => Err(SubnetError::AmbiguousMask(mask)),
            (Ok(prefix_len), Err(_)) | (Err(_), Ok(prefix_len)) => Ok(prefix_len),
            (Err(err), Err(_)) => Err(err),
        }
    }
}

impl Default for CidrTable {
    fn default() -> Self {
        Self::build()
    }
}

impl<'a> IntoIterator for &'a CidrTable {
    type Item = &'a CidrEntry;
    type IntoIter = std::slice::Iter<'a, CidrEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Netmask for `prefix_len`
pub fn netmask(prefix_len: u8) -> Result<Address> {
    Ok(CidrTable::global().entry(prefix_len)?.netmask)
}

/// Wildcard mask for `prefix_len`
pub fn wildcard(prefix_len: u8) -> Result<Address> {
    Ok(CidrTable::global().entry(prefix_len)?.wildcard)
}

/// Address with every host bit cleared
pub fn network(address: Address, prefix_len: u8) -> Result<Address> {
    Ok(Address(address.0 & netmask(prefix_len)?.0))
}

/// Address with every host bit set
pub fn broadcast(address: Address, prefix_len: u8) -> Result<Address> {
    Ok(Address(address.0 | wildcard(prefix_len)?.0))
}

/// First and last usable host of the block containing `address`
///
/// `None` for /31 and /32, which have no usable host range.
pub fn host_range(address: Address, prefix_len: u8) -> Result<Option<(Address, Address)>> {
    let entry = CidrTable::global().entry(prefix_len)?;
    if !entry.has_usable_hosts() {
        return Ok(None);
    }

    let network = address.0 & entry.netmask.0;
    let broadcast = address.0 | entry.wildcard.0;
    Ok(Some((Address(network + 1), Address(broadcast - 1))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_33_entries() {
        let table = CidrTable::build();
        assert_eq!(table.entries().len(), 33);
        for (p, entry) in table.iter().enumerate() {
            assert_eq!(entry.prefix_len as usize, p);
            assert_eq!(entry.host_bits as usize, 32 - p);
        }
    }

    #[test]
    fn test_slash_0() {
        let entry = CidrTable::global().entry(0).unwrap();
        assert_eq!(entry.netmask, Address(0));
        assert_eq!(entry.wildcard, Address::MAX);
        assert_eq!(entry.num_addresses, 1u64 << 32);
        assert_eq!(entry.num_usable_hosts, (1u64 << 32) - 2);
    }

    #[test]
    fn test_slash_24() {
        let entry = CidrTable::global().entry(24).unwrap();
        assert_eq!(entry.netmask, Address(0xFFFFFF00));
        assert_eq!(entry.wildcard, Address(0x000000FF));
        assert_eq!(entry.num_addresses, 256);
        assert_eq!(entry.num_usable_hosts, 254);
    }

    #[test]
    fn test_slash_31_and_32_have_no_hosts() {
        let table = CidrTable::global();
        assert_eq!(table.entry(31).unwrap().num_addresses, 2);
        assert_eq!(table.entry(31).unwrap().num_usable_hosts, 0);
        assert_eq!(table.entry(32).unwrap().num_addresses, 1);
        assert_eq!(table.entry(32).unwrap().num_usable_hosts, 0);
        assert_eq!(table.entry(32).unwrap().netmask, Address::MAX);
        assert_eq!(table.entry(30).unwrap().num_usable_hosts, 2);
    }

    #[test]
    fn test_entry_out_of_range() {
        assert_eq!(
            CidrTable::global().entry(33),
            Err(SubnetError::OutOfRange(33))
        );
        assert!(netmask(200).is_err());
        assert!(network(Address(1), 33).is_err());
    }

    #[test]
    fn test_bitmap() {
        let table = CidrTable::global();
        assert_eq!(table.entry(0).unwrap().bitmap(), "H".repeat(32));
        assert_eq!(table.entry(32).unwrap().bitmap(), "N".repeat(32));
        assert_eq!(
            table.entry(20).unwrap().bitmap(),
            format!("{}{}", "N".repeat(20), "H".repeat(12))
        );
    }

    #[test]
    fn test_global_matches_build() {
        assert_eq!(CidrTable::global(), &CidrTable::build());
    }

    #[test]
    fn test_network_and_broadcast() {
        let addr = Address::from_octets(192, 168, 1, 130);
        assert_eq!(network(addr, 24).unwrap(), Address::from_octets(192, 168, 1, 0));
        assert_eq!(broadcast(addr, 24).unwrap(), Address::from_octets(192, 168, 1, 255));
        assert_eq!(network(addr, 25).unwrap(), Address::from_octets(192, 168, 1, 128));
        assert_eq!(network(addr, 0).unwrap(), Address(0));
        assert_eq!(broadcast(addr, 0).unwrap(), Address::MAX);
        assert_eq!(network(addr, 32).unwrap(), addr);
        assert_eq!(broadcast(addr, 32).unwrap(), addr);
    }

    #[test]
    fn test_host_range() {
        let addr = Address::from_octets(10, 1, 2, 3);
        assert_eq!(
            host_range(addr, 24).unwrap(),
            Some((Address::from_octets(10, 1, 2, 1), Address::from_octets(10, 1, 2, 254)))
        );
        assert_eq!(
            host_range(addr, 30).unwrap(),
            Some((Address::from_octets(10, 1, 2, 1), Address::from_octets(10, 1, 2, 2)))
        );
        assert_eq!(host_range(addr, 31).unwrap(), None);
        assert_eq!(host_range(addr, 32).unwrap(), None);
    }

    #[test]
    fn test_prefix_for_netmask() {
        let table = CidrTable::global();
        let mask = Address::from_octets(255, 255, 240, 0);
        assert_eq!(table.prefix_for_mask(mask, MaskKind::Netmask), Ok(20));
        assert_eq!(
            table.prefix_for_mask(mask, MaskKind::Wildcard),
            Err(SubnetError::InvalidMask(mask))
        );
    }

    #[test]
    fn test_prefix_for_wildcard() {
        let table = CidrTable::global();
        let mask = Address::from_octets(0, 0, 0, 255);
        assert_eq!(table.prefix_for_mask(mask, MaskKind::Wildcard), Ok(24));
    }

    #[test]
    fn test_resolve_mask_infers_kind() {
        let table = CidrTable::global();
        assert_eq!(
            table.resolve_mask(Address::from_octets(255, 255, 255, 0), None),
            Ok(24)
        );
        assert_eq!(table.resolve_mask(Address::from_octets(0, 0, 3, 255), None), Ok(22));
    }

    #[test]
    fn test_resolve_mask_rejects_non_contiguous() {
        let mask = Address::from_octets(255, 0, 255, 0);
        assert_eq!(
            CidrTable::global().resolve_mask(mask, None),
            Err(SubnetError::InvalidMask(mask))
        );
    }

    #[test]
    fn test_resolve_mask_ambiguous_values() {
        let table = CidrTable::global();

        assert_eq!(
            table.resolve_mask(Address::MAX, None),
            Err(SubnetError::AmbiguousMask(Address::MAX))
        );
        assert_eq!(table.resolve_mask(Address::MAX, Some(MaskKind::Netmask)), Ok(32));
        assert_eq!(table.resolve_mask(Address::MAX, Some(MaskKind::Wildcard)), Ok(0));

        assert_eq!(
            table.resolve_mask(Address(0), None),
            Err(SubnetError::AmbiguousMask(Address(0)))
        );
        assert_eq!(table.resolve_mask(Address(0), Some(MaskKind::Netmask)), Ok(0));
        assert_eq!(table.resolve_mask(Address(0), Some(MaskKind::Wildcard)), Ok(32));
    }

    #[test]
    fn test_mask_kind_display() {
        assert_eq!(MaskKind::Netmask.to_string(), "netmask");
        assert_eq!(
            serde_json::to_string(&MaskKind::Wildcard).unwrap(),
            "\"wildcard\""
        );
    }
}
