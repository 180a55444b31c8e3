use rand::{rngs::StdRng, Rng, SeedableRng};
use subnetviz_cidr::{blocks_for_range, broadcast, network, CidrTable, SubnetBlock};
use subnetviz_core::Address;

/// Independent decomposition driven by trailing zeros of the frontier.
fn reference_block_count(start: u32, end: u32) -> usize {
    let mut cur = u64::from(start);
    let last = u64::from(end);
    let mut count = 0;
    while cur <= last {
        let mut size_bits = if cur == 0 { 32 } else { cur.trailing_zeros().min(32) };
        while cur + (1u64 << size_bits) - 1 > last {
            size_bits -= 1;
        }
        cur += 1u64 << size_bits;
        count += 1;
    }
    count
}

/// Checks the union is exactly `start..=end`, blocks are aligned, disjoint
/// and sorted, and the count matches the reference.
fn check_decomposition(start: u32, end: u32) {
    let blocks = blocks_for_range(Address(start), Address(end))
        .unwrap_or_else(|e| panic!("{start:#x}-{end:#x}: {e}"));

    let mut expected_next = u64::from(start);
    for block in &blocks {
        assert_eq!(
            u64::from(block.network().0),
            expected_next,
            "gap or overlap before {block} in {start:#x}-{end:#x}"
        );
        assert_eq!(
            network(block.network(), block.prefix_len()).unwrap(),
            block.network(),
            "{block} is not aligned"
        );
        expected_next = u64::from(block.broadcast().0) + 1;
    }
    assert_eq!(expected_next, u64::from(end) + 1, "union does not end at {end:#x}");

    let total: u64 = blocks.iter().map(SubnetBlock::size).sum();
    assert_eq!(total, u64::from(end) - u64::from(start) + 1);

    assert_eq!(
        blocks.len(),
        reference_block_count(start, end),
        "not minimal for {start:#x}-{end:#x}"
    );
}

#[test]
fn test_mask_invariants_for_every_prefix() {
    for entry in CidrTable::global() {
        assert_eq!(entry.netmask.0 | entry.wildcard.0, u32::MAX, "/{}", entry.prefix_len);
        assert_eq!(entry.netmask.0 & entry.wildcard.0, 0, "/{}", entry.prefix_len);
        assert_eq!(entry.num_addresses, 1u64 << entry.host_bits);
    }
}

#[test]
fn test_network_le_address_le_broadcast() {
    let mut rng = StdRng::seed_from_u64(7);
    let samples = (0..2_000)
        .map(|_| rng.gen::<u32>())
        .chain([0, 1, u32::MAX - 1, u32::MAX]);

    for value in samples {
        let addr = Address(value);
        for p in 0..=32u8 {
            let net = network(addr, p).unwrap();
            let bcast = broadcast(addr, p).unwrap();
            assert!(net <= addr && addr <= bcast, "{addr}/{p}");
        }
    }
}

#[test]
fn test_unaligned_example_union() {
    let start = Address::from_octets(192, 168, 1, 5);
    let end = Address::from_octets(192, 168, 1, 20);
    check_decomposition(start.0, end.0);

    let covered: Vec<u32> = blocks_for_range(start, end)
        .unwrap()
        .iter()
        .flat_map(|b| b.network().0..=b.broadcast().0)
        .collect();
    let expected: Vec<u32> = (start.0..=end.0).collect();
    assert_eq!(covered, expected);
}

#[test]
fn test_exhaustive_small_ranges() {
    for start in 0u32..=96 {
        for end in start..=160 {
            check_decomposition(start, end);
        }
    }
}

#[test]
fn test_exhaustive_ranges_near_top() {
    for start in (u32::MAX - 96)..=u32::MAX {
        for end in start..=u32::MAX {
            check_decomposition(start, end);
        }
    }
}

#[test]
fn test_random_large_ranges() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..5_000 {
        let a: u32 = rng.gen();
        let b: u32 = rng.gen();
        check_decomposition(a.min(b), a.max(b));
    }
}

#[test]
fn test_single_address_everywhere() {
    let mut rng = StdRng::seed_from_u64(99);
    for value in (0..1_000).map(|_| rng.gen::<u32>()).chain([0, u32::MAX]) {
        let blocks = blocks_for_range(Address(value), Address(value)).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].network(), Address(value));
        assert_eq!(blocks[0].prefix_len(), 32);
    }
}

#[test]
fn test_every_prefix_block_is_one_block() {
    let base = Address::from_octets(10, 0, 0, 0);
    for p in 8..=32u8 {
        let block = SubnetBlock::new(base, p).unwrap();
        let blocks = blocks_for_range(block.network(), block.broadcast()).unwrap();
        assert_eq!(blocks, vec![block]);
    }
}
