//! Minimal CIDR decomposition of an inclusive address range
//!
//! A block of size `2^k` must start on a multiple of `2^k`, so the largest
//! block that fits the remaining span is often not usable at an unaligned
//! start. From the current frontier we try the smallest prefix whose block
//! could cover the whole span, then lengthen the prefix until the block is
//! both aligned at the frontier and inside the range.

use subnetviz_core::{Address, Result, SubnetError};

use crate::{CidrTable, SubnetBlock, MAX_PREFIX_LEN};

/// Fewest disjoint blocks whose union is exactly `start..=end`
///
/// Blocks are returned in ascending address order.
///
/// # Examples
///
/// ```
/// use subnetviz_cidr::blocks_for_range;
/// use subnetviz_core::Address;
///
/// let blocks = blocks_for_range(
///     Address::from_octets(10, 0, 0, 0),
///     Address::from_octets(10, 0, 1, 255),
/// ).unwrap();
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].to_string(), "10.0.0.0/23");
/// ```
pub fn blocks_for_range(start: Address, end: Address) -> Result<Vec<SubnetBlock>> {
    if start > end {
        return Err(SubnetError::InvalidRange { start, end });
    }

    let entries = CidrTable::global().entries();
    let last = u64::from(end.0);
    // u64 so the frontier can step past 255.255.255.255
    let mut frontier = u64::from(start.0);
    let mut blocks = Vec::new();

    while frontier <= last {
        let current = frontier as u32;

        if frontier == last {
            blocks.push(SubnetBlock {
                network: Address(current),
                prefix_len: MAX_PREFIX_LEN,
            });
            break;
        }

        // Smallest k with 2^k >= span; span <= 2^32 so k <= 32.
        let span = last - frontier + 1;
        let k0 = span.next_power_of_two().trailing_zeros() as u8;

        let entry = entries[usize::from(MAX_PREFIX_LEN - k0)..]
            .iter()
            .find(|e| {
                current & e.netmask.0 == current && u64::from(current | e.wildcard.0) <= last
            })
            .ok_or(SubnetError::AlgorithmInvariantViolated { start, end })?;

        blocks.push(SubnetBlock {
            network: Address(current),
            prefix_len: entry.prefix_len,
        });
        frontier = u64::from(current | entry.wildcard.0) + 1;
    }

    Ok(blocks)
}
