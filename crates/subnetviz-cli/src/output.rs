//! Rendering reports as text, JSON or CSV

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use subnetviz_classify::SpecialBlock;
use subnetviz_core::AddressFormat;

use crate::report::{BatchRow, ClassifyReport, InfoReport, RangeReport, TableRow};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table output
    Human,
    /// JSON output (pretty-printed)
    Json,
    /// JSON output (compact)
    JsonCompact,
    /// CSV output
    Csv,
}

/// A report that knows how to print itself in every format
pub trait Render: Serialize {
    fn print_human(&self);
    fn write_csv<W: std::io::Write>(&self, wtr: &mut csv::Writer<W>) -> Result<()>;
}

pub fn print<R: Render>(report: &R, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => report.print_human(),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::JsonCompact => println!("{}", serde_json::to_string(report)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            report.write_csv(&mut wtr)?;
            wtr.flush()?;
        }
    }
    Ok(())
}

fn heading(title: &str) {
    println!();
    println!("{}", title.bold().cyan());
    println!("{}", "─".repeat(60).dimmed());
}

fn field(name: &str, value: impl std::fmt::Display) {
    println!("{:>16}: {}", name.bold(), value);
}

fn address_field(name: &str, fmt: &AddressFormat) {
    field(name, format!("{:<16} {}", fmt.dotted_decimal, fmt.dotted_binary.dimmed()));
}

fn optional_address_field(name: &str, fmt: Option<&AddressFormat>) {
    match fmt {
        Some(fmt) => address_field(name, fmt),
        None => field(name, "n/a".dimmed()),
    }
}

fn notes_fields(notes: &[&SpecialBlock]) {
    if notes.is_empty() {
        field("Special use", "none".dimmed());
        return;
    }
    for note in notes {
        let refs: Vec<&str> = note.references.iter().map(|r| r.label).collect();
        field(
            "Special use",
            format!("{} {} {}", note.notation.yellow(), note.description, refs.join(", ").dimmed()),
        );
    }
}

fn yes_no(value: bool) -> colored::ColoredString {
    if value {
        "yes".green()
    } else {
        "no".normal()
    }
}

fn joined_notes(notes: &[&SpecialBlock]) -> String {
    notes
        .iter()
        .map(|n| n.notation)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Render for InfoReport {
    fn print_human(&self) {
        heading(&format!("Subnet {}", self.cidr));
        address_field("Address", &self.address);
        field("Hex", &self.address.dotted_hex);
        field("Octal", &self.address.dotted_octal);
        address_field("Netmask", &self.netmask);
        address_field("Wildcard", &self.wildcard);
        field("Bitmap", &self.bitmap);
        address_field("Network", &self.network);
        address_field("Broadcast", &self.broadcast);
        optional_address_field("First host", self.first_host.as_ref());
        optional_address_field("Last host", self.last_host.as_ref());
        field(
            "Next subnet",
            self.next_subnet.as_deref().unwrap_or("n/a"),
        );
        field("Host bits", self.host_bits);
        field("Addresses", self.total_addresses);
        field("Usable hosts", self.usable_hosts.to_string().green());
        field("Class", format!("{} ({})", self.class, self.class_range));
        field("Private", yes_no(self.is_private));
        notes_fields(&self.special_notes);
        println!();
    }

    fn write_csv<W: std::io::Write>(&self, wtr: &mut csv::Writer<W>) -> Result<()> {
        let host = |f: &Option<AddressFormat>| {
            f.as_ref()
                .map(|f| f.dotted_decimal.clone())
                .unwrap_or_default()
        };
        wtr.write_record([
            "cidr",
            "address",
            "netmask",
            "wildcard",
            "network",
            "broadcast",
            "first_host",
            "last_host",
            "next_subnet",
            "total_addresses",
            "usable_hosts",
            "class",
            "is_private",
            "special_notes",
        ])?;
        wtr.write_record([
            self.cidr.clone(),
            self.address.dotted_decimal.clone(),
            self.netmask.dotted_decimal.clone(),
            self.wildcard.dotted_decimal.clone(),
            self.network.dotted_decimal.clone(),
            self.broadcast.dotted_decimal.clone(),
            host(&self.first_host),
            host(&self.last_host),
            self.next_subnet.clone().unwrap_or_default(),
            self.total_addresses.to_string(),
            self.usable_hosts.to_string(),
            self.class.to_string(),
            self.is_private.to_string(),
            joined_notes(&self.special_notes),
        ])?;
        Ok(())
    }
}

impl Render for ClassifyReport {
    fn print_human(&self) {
        heading(&format!("Address {}", self.address));
        field("Class", format!("{} ({})", self.class, self.class_range));
        field("Private", yes_no(self.is_private));
        notes_fields(&self.special_notes);
        println!();
    }

    fn write_csv<W: std::io::Write>(&self, wtr: &mut csv::Writer<W>) -> Result<()> {
        wtr.write_record(["address", "class", "class_range", "is_private", "special_notes"])?;
        wtr.write_record([
            self.address.clone(),
            self.class.to_string(),
            self.class_range.to_string(),
            self.is_private.to_string(),
            joined_notes(&self.special_notes),
        ])?;
        Ok(())
    }
}

impl Render for RangeReport {
    fn print_human(&self) {
        heading(&format!("Range {} - {}", self.start, self.end));
        field("Addresses", self.total_addresses);
        field("Blocks", self.blocks.len());
        for block in &self.blocks {
            println!("{:>16}  {}", "", block.green());
        }
        println!();
    }

    fn write_csv<W: std::io::Write>(&self, wtr: &mut csv::Writer<W>) -> Result<()> {
        wtr.write_record(["block"])?;
        for block in &self.blocks {
            wtr.write_record([block])?;
        }
        Ok(())
    }
}

impl Render for Vec<TableRow> {
    fn print_human(&self) {
        heading("CIDR Table");
        println!(
            "{:>4}  {:<16} {:<16} {:>5} {:>13} {:>13}",
            "/p".bold(),
            "Netmask".bold(),
            "Wildcard".bold(),
            "Host".bold(),
            "Addresses".bold(),
            "Usable".bold()
        );
        for row in self {
            println!(
                "{:>4}  {:<16} {:<16} {:>5} {:>13} {:>13}",
                format!("/{}", row.prefix_len),
                row.netmask,
                row.wildcard,
                row.host_bits,
                row.num_addresses,
                row.num_usable_hosts
            );
        }
        println!();
    }

    fn write_csv<W: std::io::Write>(&self, wtr: &mut csv::Writer<W>) -> Result<()> {
        for row in self {
            wtr.serialize(row)?;
        }
        Ok(())
    }
}

impl Render for Vec<BatchRow> {
    fn print_human(&self) {
        heading(&format!("Batch ({} inputs)", self.len()));
        for row in self {
            match &row.error {
                Some(err) => println!("{:<20} {}", row.input, err.red()),
                None => println!(
                    "{:<20} class {}  private {}  {}{}",
                    row.input,
                    row.class.as_deref().unwrap_or("?"),
                    yes_no(row.is_private.unwrap_or(false)),
                    row.network
                        .as_ref()
                        .zip(row.broadcast.as_ref())
                        .map(|(n, b)| format!("{} - {}  ", n, b))
                        .unwrap_or_default(),
                    row.special_notes.as_deref().unwrap_or("").yellow()
                ),
            }
        }
        println!();
    }

    fn write_csv<W: std::io::Write>(&self, wtr: &mut csv::Writer<W>) -> Result<()> {
        for row in self {
            wtr.serialize(row)?;
        }
        Ok(())
    }
}
