//! Textual renderings of an IPv4 address
//!
//! Every representation is computed from the integer value, octet `i` being
//! `(address >> (24 - 8*i)) & 0xFF` and bit `i` being `(address >> (31 - i)) & 1`.

use serde::{Deserialize, Serialize};

use crate::Address;

/// All textual forms of a single address
///
/// # Examples
///
/// ```
/// use subnetviz_core::{Address, AddressFormat};
///
/// let fmt = AddressFormat::new(Address::from_octets(192, 168, 1, 10));
/// assert_eq!(fmt.dotted_hex, "C0.A8.01.0A");
/// assert_eq!(fmt.dotted_binary, "11000000.10101000.00000001.00001010");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressFormat {
    pub address: Address,
    pub dotted_decimal: String,
    pub dotted_binary: String,
    pub dotted_hex: String,
    pub dotted_octal: String,
    pub decimal_octets: [u8; 4],
    pub binary_bits: [u8; 32],
    pub hex_octets: [String; 4],
    pub octal_octets: [String; 4],
}

impl AddressFormat {
    /// Render `address` in every supported form
    pub fn new(address: Address) -> Self {
        let decimal_octets = address.octets();
        let hex_octets = decimal_octets.map(|o| format!("{:02X}", o));
        let octal_octets = decimal_octets.map(|o| format!("{:o}", o));
        let binary_octets = decimal_octets.map(|o| format!("{:08b}", o));

        let mut binary_bits = [0u8; 32];
        for (index, bit) in binary_bits.iter_mut().enumerate() {
            *bit = address.bit(index);
        }

        Self {
            address,
            dotted_decimal: address.to_string(),
            dotted_binary: binary_octets.join("."),
            dotted_hex: hex_octets.join("."),
            dotted_octal: octal_octets.join("."),
            decimal_octets,
            binary_bits,
            hex_octets,
            octal_octets,
        }
    }

    /// Rebuild the address from the decimal octets
    pub fn to_address(&self) -> Address {
        let [a, b, c, d] = self.decimal_octets;
        Address::from_octets(a, b, c, d)
    }
}

impl From<Address> for AddressFormat {
    fn from(address: Address) -> Self {
        Self::new(address)
    }
}
