//! Classification of IPv4 addresses
//!
//! Answers three questions about an address:
//! - Which historical class (A-E) its leading bits put it in
//! - Whether it is RFC 1918 private-use space
//! - Which IANA special-purpose blocks contain it
//!
//! # Examples
//!
//! ```
//! use subnetviz_classify::{classify, is_private, IpClass};
//! use subnetviz_core::Address;
//!
//! let addr = Address::from_octets(172, 16, 5, 5);
//! assert_eq!(classify(addr).class, IpClass::B);
//! assert!(is_private(addr));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use subnetviz_cidr::network;
use subnetviz_core::Address;

pub mod registry;

pub use registry::{Reference, SpecialBlock, REGISTERED_PREFIX_LENS, SPECIAL_BLOCKS};

/// RFC 1918 blocks
const PRIVATE_BLOCKS: [(Address, u8); 3] = [
    (Address::from_octets(10, 0, 0, 0), 8),
    (Address::from_octets(172, 16, 0, 0), 12),
    (Address::from_octets(192, 168, 0, 0), 16),
];

/// Classful network class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IpClass {
    A,
    B,
    C,
    D,
    E,
}

impl IpClass {
    /// First-octet range covered by the class
    pub fn first_octet_range(&self) -> &'static str {
        match self {
            IpClass::A => "0 - 127",
            IpClass::B => "128 - 191",
            IpClass::C => "192 - 223",
            IpClass::D => "224 - 239",
            IpClass::E => "240 - 255",
        }
    }

    /// Index of the bit that decided the class
    ///
    /// D and E are told apart by the same bit, so both report 3.
    pub fn distinguishing_bit(&self) -> usize {
        match self {
            IpClass::A => 0,
            IpClass::B => 1,
            IpClass::C => 2,
            IpClass::D | IpClass::E => 3,
        }
    }
}

impl fmt::Display for IpClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            IpClass::A => "A",
            IpClass::B => "B",
            IpClass::C => "C",
            IpClass::D => "D",
            IpClass::E => "E",
        };
        f.write_str(letter)
    }
}

/// Class of an address and the first-octet range of that class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub class: IpClass,
    pub class_range: &'static str,
}

/// Classful class from the leading bits
pub fn classify(address: Address) -> Classification {
    let class = if address.bit(0) == 0 {
        IpClass::A
    } else if address.bit(1) == 0 {
        IpClass::B
    } else if address.bit(2) == 0 {
        IpClass::C
    } else if address.bit(3) == 0 {
        IpClass::D
    } else {
        IpClass::E
    };

    Classification {
        class,
        class_range: class.first_octet_range(),
    }
}

/// True for 10.0.0.0/8, 172.16.0.0/12 and 192.168.0.0/16
pub fn is_private(address: Address) -> bool {
    PRIVATE_BLOCKS
        .iter()
        .any(|&(block, prefix_len)| network(address, prefix_len) == Ok(block))
}

/// Special-purpose blocks containing `address`, in registry order
pub fn special_notes(address: Address) -> Vec<&'static SpecialBlock> {
    Classifier::default().special_notes(address)
}

/// Order in which matching special blocks are reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoteOrder {
    /// Registry order, grouped by [`REGISTERED_PREFIX_LENS`]
    #[default]
    Registry,
    /// Longest prefix first
    MostSpecificFirst,
    /// Shortest prefix first
    LeastSpecificFirst,
}

/// Classifier settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub note_order: NoteOrder,
}

/// Everything the classifier knows about one address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressProfile {
    pub address: Address,
    pub classification: Classification,
    pub is_private: bool,
    pub special_notes: Vec<&'static SpecialBlock>,
}

/// Classifier over the static special-use registry
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Every registry row whose block contains `address`
    ///
    /// An address can sit in several rows at once, e.g. 192.0.0.9 is
    /// matched by both a /32 and a /24 row. All of them are returned.
    pub fn special_notes(&self, address: Address) -> Vec<&'static SpecialBlock> {
        let mut notes: Vec<&'static SpecialBlock> = REGISTERED_PREFIX_LENS
            .iter()
            .filter_map(|&p| network(address, p).ok().map(|masked| (p, masked)))
            .flat_map(|(p, masked)| {
                registry::blocks_with_prefix(p).filter(move |b| b.network == masked)
            })
            .collect();

        match self.config.note_order {
            NoteOrder::Registry => {}
            NoteOrder::MostSpecificFirst => {
                notes.sort_by(|a, b| b.prefix_len.cmp(&a.prefix_len));
            }
            NoteOrder::LeastSpecificFirst => {
                notes.sort_by_key(|b| b.prefix_len);
            }
        }
        notes
    }

    /// Class, privacy and special notes in one value
    pub fn profile(&self, address: Address) -> AddressProfile {
        AddressProfile {
            address,
            classification: classify(address),
            is_private: is_private(address),
            special_notes: self.special_notes(address),
        }
    }
}
