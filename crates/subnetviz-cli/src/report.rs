//! Serializable results for each command

use serde::Serialize;
use subnetviz_cidr::{blocks_for_range, CidrEntry, CidrTable, SubnetSummary};
use subnetviz_classify::{Classifier, IpClass, SpecialBlock};
use subnetviz_core::{Address, AddressFormat, Result};

/// Full breakdown of `address/prefix_len`
#[derive(Debug, Clone, Serialize)]
pub struct InfoReport {
    pub cidr: String,
    pub prefix_len: u8,
    pub host_bits: u8,
    pub bitmap: String,
    pub address: AddressFormat,
    pub netmask: AddressFormat,
    pub wildcard: AddressFormat,
    pub network: AddressFormat,
    pub broadcast: AddressFormat,
    pub first_host: Option<AddressFormat>,
    pub last_host: Option<AddressFormat>,
    pub next_subnet: Option<String>,
    pub total_addresses: u64,
    pub usable_hosts: u64,
    pub class: IpClass,
    pub class_range: &'static str,
    pub is_private: bool,
    pub special_notes: Vec<&'static SpecialBlock>,
}

impl InfoReport {
    pub fn build(address: Address, prefix_len: u8, classifier: &Classifier) -> Result<Self> {
        let summary = SubnetSummary::new(address, prefix_len)?;
        let entry = CidrTable::global().entry(prefix_len)?;
        let profile = classifier.profile(address);

        Ok(Self {
            cidr: format!("{}/{}", summary.network, prefix_len),
            prefix_len,
            host_bits: summary.host_bits,
            bitmap: entry.bitmap(),
            address: AddressFormat::new(address),
            netmask: AddressFormat::new(summary.netmask),
            wildcard: AddressFormat::new(summary.wildcard),
            network: AddressFormat::new(summary.network),
            broadcast: AddressFormat::new(summary.broadcast),
            first_host: summary.first_host.map(AddressFormat::new),
            last_host: summary.last_host.map(AddressFormat::new),
            next_subnet: summary.next_subnet.map(|a| a.to_string()),
            total_addresses: summary.total_addresses,
            usable_hosts: summary.usable_hosts,
            class: profile.classification.class,
            class_range: profile.classification.class_range,
            is_private: profile.is_private,
            special_notes: profile.special_notes,
        })
    }
}

/// Class, privacy and registry matches for one address
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyReport {
    pub address: String,
    pub class: IpClass,
    pub class_range: &'static str,
    pub is_private: bool,
    pub special_notes: Vec<&'static SpecialBlock>,
}

impl ClassifyReport {
    pub fn build(address: Address, classifier: &Classifier) -> Self {
        let profile = classifier.profile(address);
        Self {
            address: address.to_string(),
            class: profile.classification.class,
            class_range: profile.classification.class_range,
            is_private: profile.is_private,
            special_notes: profile.special_notes,
        }
    }
}

/// Minimal block cover of an inclusive range
#[derive(Debug, Clone, Serialize)]
pub struct RangeReport {
    pub start: String,
    pub end: String,
    pub total_addresses: u64,
    pub blocks: Vec<String>,
}

impl RangeReport {
    pub fn build(start: Address, end: Address) -> Result<Self> {
        let blocks = blocks_for_range(start, end)?;
        Ok(Self {
            start: start.to_string(),
            end: end.to_string(),
            total_addresses: blocks.iter().map(|b| b.size()).sum(),
            blocks: blocks.iter().map(|b| b.to_string()).collect(),
        })
    }
}

/// One prefix length of the mask table
#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    pub prefix_len: u8,
    pub netmask: String,
    pub wildcard: String,
    pub host_bits: u8,
    pub num_addresses: u64,
    pub num_usable_hosts: u64,
    pub bitmap: String,
}

impl From<&CidrEntry> for TableRow {
    fn from(entry: &CidrEntry) -> Self {
        Self {
            prefix_len: entry.prefix_len,
            netmask: entry.netmask.to_string(),
            wildcard: entry.wildcard.to_string(),
            host_bits: entry.host_bits,
            num_addresses: entry.num_addresses,
            num_usable_hosts: entry.num_usable_hosts,
            bitmap: entry.bitmap(),
        }
    }
}

pub fn table_rows() -> Vec<TableRow> {
    CidrTable::global().iter().map(TableRow::from).collect()
}

/// Flat per-line result of a batch run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchRow {
    pub input: String,
    pub network: Option<String>,
    pub broadcast: Option<String>,
    pub class: Option<String>,
    pub is_private: Option<bool>,
    pub special_notes: Option<String>,
    pub error: Option<String>,
}

impl BatchRow {
    pub fn failed(input: impl Into<String>, error: impl ToString) -> Self {
        Self {
            input: input.into(),
            error: Some(error.to_string()),
            ..Default::default()
        }
    }
}
