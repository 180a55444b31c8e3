use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use subnetviz_classify::{Classifier, ClassifierConfig, NoteOrder};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod batch;
mod input;
mod output;
mod report;

use batch::BatchProcessor;
use input::{parse_address, parse_mask, Base, MaskInput};
use output::OutputFormat;
use report::{ClassifyReport, InfoReport, RangeReport};

/// Environment variable overriding the log filter
const LOG_ENV: &str = "SUBNETVIZ_LOG";

/// IPv4 subnet calculator and address classifier
#[derive(Parser)]
#[command(name = "subnetviz")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "human", global = true)]
    output: OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show everything derived from an address and mask
    Info(InfoArgs),
    /// Classify an address and list matching special-use blocks
    Classify(ClassifyArgs),
    /// Decompose an inclusive address range into CIDR blocks
    Range(RangeArgs),
    /// Print the netmask table for every prefix length
    Table,
    /// Classify many addresses from a file or stdin
    Batch(BatchArgs),
}

#[derive(Parser)]
struct InfoArgs {
    /// IPv4 address
    #[arg(value_name = "ADDRESS")]
    address: String,

    /// CIDR prefix (e.g. 24), netmask or wildcard mask
    #[arg(value_name = "MASK")]
    mask: String,

    /// How to read MASK (inferred when omitted)
    #[arg(short = 'k', long, value_enum)]
    mask_kind: Option<MaskInput>,

    /// Base the address octets are written in
    #[arg(short, long, value_enum, default_value = "decimal")]
    base: Base,

    #[arg(long, value_enum, default_value = "registry")]
    note_order: NoteOrderArg,
}

#[derive(Parser)]
struct ClassifyArgs {
    /// IPv4 address
    #[arg(value_name = "ADDRESS")]
    address: String,

    /// Base the address octets are written in
    #[arg(short, long, value_enum, default_value = "decimal")]
    base: Base,

    /// Order of matching special-use blocks
    #[arg(long, value_enum, default_value = "registry")]
    note_order: NoteOrderArg,
}

#[derive(Parser)]
struct RangeArgs {
    /// First address of the range
    #[arg(value_name = "START")]
    start: String,

    /// Last address of the range (inclusive)
    #[arg(value_name = "END")]
    end: String,
}

#[derive(Parser)]
struct BatchArgs {
    /// Input file (use '-' for stdin)
    #[arg(short, long, value_name = "FILE")]
    file: Option<String>,

    /// Number of worker threads
    #[arg(short, long)]
    threads: Option<usize>,

    /// Order of matching special-use blocks
    #[arg(long, value_enum, default_value = "registry")]
    note_order: NoteOrderArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum NoteOrderArg {
    /// IANA registry order
    Registry,
    /// Longest prefix first
    MostSpecific,
    /// Shortest prefix first
    LeastSpecific,
}

impl From<NoteOrderArg> for NoteOrder {
    fn from(arg: NoteOrderArg) -> Self {
        match arg {
            NoteOrderArg::Registry => NoteOrder::Registry,
            NoteOrderArg::MostSpecific => NoteOrder::MostSpecificFirst,
            NoteOrderArg::LeastSpecific => NoteOrder::LeastSpecificFirst,
        }
    }
}

fn classifier(order: NoteOrderArg) -> Classifier {
    Classifier::new(ClassifierConfig {
        note_order: order.into(),
    })
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Info(args) => handle_info(args, cli.output)?,
        Commands::Classify(args) => handle_classify(args, cli.output)?,
        Commands::Range(args) => handle_range(args, cli.output)?,
        Commands::Table => output::print(&report::table_rows(), cli.output)?,
        Commands::Batch(args) => handle_batch(args, cli.output)?,
    }

    Ok(())
}

fn handle_info(args: InfoArgs, format: OutputFormat) -> Result<()> {
    let address = parse_address(&args.address, args.base)?;
    let prefix_len = parse_mask(&args.mask, args.mask_kind)?;
    debug!(%address, prefix_len, "computing subnet info");

    let report = InfoReport::build(address, prefix_len, &classifier(args.note_order))?;
    output::print(&report, format)
}

fn handle_classify(args: ClassifyArgs, format: OutputFormat) -> Result<()> {
    let address = parse_address(&args.address, args.base)?;
    debug!(%address, "classifying");

    let report = ClassifyReport::build(address, &classifier(args.note_order));
    output::print(&report, format)
}

fn handle_range(args: RangeArgs, format: OutputFormat) -> Result<()> {
    let start = parse_address(&args.start, Base::Decimal)?;
    let end = parse_address(&args.end, Base::Decimal)?;
    debug!(%start, %end, "decomposing range");

    let report = RangeReport::build(start, end)?;
    debug!(blocks = report.blocks.len(), "range decomposed");
    output::print(&report, format)
}

fn handle_batch(args: BatchArgs, format: OutputFormat) -> Result<()> {
    let lines = read_lines(args.file.as_deref())?;
    let processor = BatchProcessor::new(classifier(args.note_order), args.threads)?;
    info!(
        lines = lines.len(),
        threads = processor.thread_count(),
        "starting batch"
    );

    let rows = processor.process_lines(lines);
    output::print(&rows, format)
}

fn read_lines(file: Option<&str>) -> Result<Vec<String>> {
    match file {
        None | Some("-") => {
            debug!("reading from stdin");
            io::stdin()
                .lock()
                .lines()
                .collect::<io::Result<_>>()
                .context("failed to read stdin")
        }
        Some(path) => {
            debug!(path, "reading from file");
            let file = File::open(path).with_context(|| format!("failed to open {}", path))?;
            BufReader::new(file)
                .lines()
                .collect::<io::Result<_>>()
                .with_context(|| format!("failed to read {}", path))
        }
    }
}
