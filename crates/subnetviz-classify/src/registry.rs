//! IANA IPv4 special-purpose address registry
//!
//! Source: <https://www.iana.org/assignments/iana-ipv4-special-registry/iana-ipv4-special-registry.xhtml>
//!
//! Rows are grouped by prefix length, longest first. Lookups walk the
//! groups in this order.

use serde::Serialize;
use subnetviz_core::Address;

/// RFC citation for a special block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reference {
    pub label: &'static str,
    pub url: &'static str,
}

/// One row of the special-use registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpecialBlock {
    pub prefix_len: u8,
    pub network: Address,
    /// CIDR text as listed by IANA (some rows cover two /32s)
    pub notation: &'static str,
    pub description: &'static str,
    pub references: &'static [Reference],
}

/// Prefix lengths present in [`SPECIAL_BLOCKS`], in lookup order
pub const REGISTERED_PREFIX_LENS: [u8; 9] = [32, 29, 24, 16, 15, 12, 10, 8, 4];

const fn block(
    prefix_len: u8,
    network: Address,
    notation: &'static str,
    description: &'static str,
    references: &'static [Reference],
) -> SpecialBlock {
    SpecialBlock {
        prefix_len,
        network,
        notation,
        description,
        references,
    }
}

macro_rules! rfc {
    ($label:expr, $url:expr $(,)?) => {
        Reference {
            label: $label,
            url: $url,
        }
    };
}

const RFC1122: Reference = rfc!(
    "[RFC1122], Section 3.2.1.3",
    "https://www.rfc-editor.org/rfc/rfc1122.html#page-29",
);
const RFC1918: Reference = rfc!("[RFC1918]", "https://www.rfc-editor.org/rfc/rfc1918.html");
const RFC5737: Reference = rfc!("[RFC5737]", "https://www.rfc-editor.org/rfc/rfc5737.html");
const NAT64_DISCOVERY: &[Reference] = &[
    rfc!("[RFC8880]", "https://www.rfc-editor.org/rfc/rfc8880.html"),
    rfc!(
        "[RFC7050], Section 2.2",
        "https://www.rfc-editor.org/rfc/rfc7050.html#section-2.2",
    ),
];

/// Special-use blocks ordered by [`REGISTERED_PREFIX_LENS`]
pub static SPECIAL_BLOCKS: &[SpecialBlock] = &[
    // /32
    block(
        32,
        Address::from_octets(0, 0, 0, 0),
        "0.0.0.0/32",
        "\"This host on this network\"",
        &[RFC1122],
    ),
    block(
        32,
        Address::from_octets(192, 0, 0, 8),
        "192.0.0.8/32",
        "IPv4 dummy address",
        &[rfc!("[RFC7600]", "https://www.rfc-editor.org/rfc/rfc7600.html")],
    ),
    block(
        32,
        Address::from_octets(192, 0, 0, 9),
        "192.0.0.9/32",
        "Port Control Protocol Anycast",
        &[rfc!("[RFC7723]", "https://www.rfc-editor.org/rfc/rfc7723.html")],
    ),
    block(
        32,
        Address::from_octets(192, 0, 0, 10),
        "192.0.0.10/32",
        "Traversal Using Relays around NAT Anycast",
        &[rfc!("[RFC8155]", "https://www.rfc-editor.org/rfc/rfc8155.html")],
    ),
    block(
        32,
        Address::from_octets(192, 0, 0, 170),
        "192.0.0.170/32, 192.0.0.171/32",
        "NAT64/DNS64 Discovery",
        NAT64_DISCOVERY,
    ),
    block(
        32,
        Address::from_octets(192, 0, 0, 171),
        "192.0.0.170/32, 192.0.0.171/32",
        "NAT64/DNS64 Discovery",
        NAT64_DISCOVERY,
    ),
    block(
        32,
        Address::from_octets(255, 255, 255, 255),
        "255.255.255.255/32",
        "Limited Broadcast",
        &[
            rfc!("[RFC8190]", "https://www.rfc-editor.org/rfc/rfc8190.html"),
            rfc!(
                "[RFC919], Section 7",
                "https://www.rfc-editor.org/rfc/rfc919.html#section-7",
            ),
        ],
    ),
    // /29
    block(
        29,
        Address::from_octets(192, 0, 0, 0),
        "192.0.0.0/29",
        "IPv4 Service Continuity Prefix",
        &[rfc!("[RFC7335]", "https://www.rfc-editor.org/rfc/rfc7335.html")],
    ),
    // /24
    block(
        24,
        Address::from_octets(192, 0, 0, 0),
        "192.0.0.0/24",
        "IETF Protocol Assignments",
        &[rfc!(
            "[RFC6890], Section 2.1",
            "https://www.rfc-editor.org/rfc/rfc6890.html#section-2.1",
        )],
    ),
    block(
        24,
        Address::from_octets(192, 0, 2, 0),
        "192.0.2.0/24",
        "Documentation (TEST-NET-1)",
        &[RFC5737],
    ),
    block(
        24,
        Address::from_octets(192, 31, 196, 0),
        "192.31.196.0/24",
        "AS112-v4",
        &[rfc!("[RFC7535]", "https://www.rfc-editor.org/rfc/rfc7535.html")],
    ),
    block(
        24,
        Address::from_octets(192, 52, 193, 0),
        "192.52.193.0/24",
        "AMT",
        &[rfc!("[RFC7450]", "https://www.rfc-editor.org/rfc/rfc7450.html")],
    ),
    block(
        24,
        Address::from_octets(192, 88, 99, 0),
        "192.88.99.0/24",
        "Deprecated (6to4 Relay Anycast)",
        &[rfc!("[RFC7526]", "https://www.rfc-editor.org/rfc/rfc7526.html")],
    ),
    block(
        24,
        Address::from_octets(192, 175, 48, 0),
        "192.175.48.0/24",
        "Direct Delegation AS112 Service",
        &[rfc!("[RFC7534]", "https://www.rfc-editor.org/rfc/rfc7534.html")],
    ),
    block(
        24,
        Address::from_octets(198, 51, 100, 0),
        "198.51.100.0/24",
        "Documentation (TEST-NET-2)",
        &[RFC5737],
    ),
    block(
        24,
        Address::from_octets(203, 0, 113, 0),
        "203.0.113.0/24",
        "Documentation (TEST-NET-3)",
        &[RFC5737],
    ),
    // /16
    block(
        16,
        Address::from_octets(169, 254, 0, 0),
        "169.254.0.0/16",
        "Link Local",
        &[rfc!("[RFC3927]", "https://www.rfc-editor.org/rfc/rfc3927.html")],
    ),
    block(
        16,
        Address::from_octets(192, 168, 0, 0),
        "192.168.0.0/16",
        "Private-Use",
        &[RFC1918],
    ),
    // /15
    block(
        15,
        Address::from_octets(198, 18, 0, 0),
        "198.18.0.0/15",
        "Benchmarking",
        &[rfc!("[RFC2544]", "https://www.rfc-editor.org/rfc/rfc2544.html")],
    ),
    // /12
    block(
        12,
        Address::from_octets(172, 16, 0, 0),
        "172.16.0.0/12",
        "Private-Use",
        &[RFC1918],
    ),
    // /10
    block(
        10,
        Address::from_octets(100, 64, 0, 0),
        "100.64.0.0/10",
        "Shared Address Space",
        &[rfc!("[RFC6598]", "https://www.rfc-editor.org/rfc/rfc6598.html")],
    ),
    // /8
    block(
        8,
        Address::from_octets(0, 0, 0, 0),
        "0.0.0.0/8",
        "\"This network\"",
        &[rfc!(
            "[RFC791], Section 3.2",
            "https://www.rfc-editor.org/rfc/rfc791.html#section-3.2",
        )],
    ),
    block(
        8,
        Address::from_octets(10, 0, 0, 0),
        "10.0.0.0/8",
        "Private-Use",
        &[RFC1918],
    ),
    block(
        8,
        Address::from_octets(127, 0, 0, 0),
        "127.0.0.0/8",
        "Loopback",
        &[RFC1122],
    ),
    // /4
    block(
        4,
        Address::from_octets(240, 0, 0, 0),
        "240.0.0.0/4",
        "Reserved",
        &[rfc!(
            "[RFC1112], Section 4",
            "https://www.rfc-editor.org/rfc/rfc1112.html#section-4",
        )],
    ),
];

/// Rows registered at exactly `prefix_len`
pub fn blocks_with_prefix(prefix_len: u8) -> impl Iterator<Item = &'static SpecialBlock> {
    SPECIAL_BLOCKS
        .iter()
        .filter(move |b| b.prefix_len == prefix_len)
}
