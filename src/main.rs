//! hashmemo - list a directory, fingerprint every entry, annotate the results.
//!
//! Usage:
//!   hashmemo [PATH]                 Inventory table for PATH
//!   hashmemo [PATH] -m NAME=TEXT    Attach a memo before rendering
//!   hashmemo digest FILE...         Digest individual files
//!   hashmemo copy [PATH] NAME       Print one entry's digest (for a clipboard)
//!   hashmemo export [PATH]          Export the inventory to JSON
//!   hashmemo --help                 Show help

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, eyre};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use hashmemo_scan::{
    DigestAlgorithm, DigestComputer, DirectoryInventory, InventoryConfig, InventoryTable, SortKey,
    SortOrder,
};

#[derive(Parser)]
#[command(
    name = "hashmemo",
    version,
    about = "Fingerprint and annotate the entries of a directory",
    long_about = "hashmemo lists the immediate children of a directory, computes a \
                  content digest for each one, and shows them in a sortable table \
                  together with your memos.\n\n\
                  Memos live only for the duration of the run."
)]
struct Cli {
    /// Directory to inventory (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Digest algorithm: sha256, sha3-256 or blake3
    #[arg(short, long, default_value = "sha256", global = true)]
    algorithm: DigestAlgorithm,

    /// Skip entries whose name starts with a dot
    #[arg(long, global = true)]
    no_hidden: bool,

    /// Column to sort by: name, digest, memo, kind or size
    #[arg(short, long, default_value = "name")]
    sort: SortKey,

    /// Reverse the sort order
    #[arg(short, long)]
    reverse: bool,

    /// Attach a memo to an entry, as NAME=TEXT (repeatable)
    #[arg(short, long = "memo", value_name = "NAME=TEXT")]
    memos: Vec<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Log every digested entry
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Digest individual files
    Digest {
        /// Files to digest
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print the digest of one entry and nothing else
    Copy {
        /// Directory to inventory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Entry name
        name: String,
    },

    /// Export the inventory to JSON
    Export {
        /// Directory to inventory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match &cli.command {
        Some(Command::Digest { files }) => {
            run_digest(files, cli.algorithm);
        }
        Some(Command::Copy { path, name }) => {
            run_copy(&inventory_config(&cli, path)?, name)?;
        }
        Some(Command::Export { path, output }) => {
            run_export(&inventory_config(&cli, path)?, output.as_deref())?;
        }
        None => {
            let config = inventory_config(&cli, &cli.path)?;
            let order = if cli.reverse {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            };
            run_table(&config, &cli.memos, cli.sort, order, cli.format)?;
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn setup_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn inventory_config(cli: &Cli, path: &Path) -> Result<InventoryConfig> {
    InventoryConfig::builder()
        .root(path)
        .algorithm(cli.algorithm)
        .include_hidden(!cli.no_hidden)
        .build()
        .map_err(|e| eyre!("Invalid configuration: {e}"))
}

fn build_inventory(config: &InventoryConfig) -> Result<InventoryTable> {
    DirectoryInventory::new()
        .build(config)
        .with_context(|| format!("Cannot inventory {}", config.root.display()))
}

/// Build the table, apply memo edits, and render it.
fn run_table(
    config: &InventoryConfig,
    memos: &[String],
    sort: SortKey,
    order: SortOrder,
    format: OutputFormat,
) -> Result<()> {
    let mut table = build_inventory(config)?;

    for assignment in memos {
        let (name, text) = parse_memo_assignment(assignment)?;
        let id = table.require(name)?;
        table.set_memo(id, text)?;
    }

    match format {
        OutputFormat::Text => print_table(&table, sort, order),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&table)?),
    }

    Ok(())
}

/// Digest files one by one; failures print in place of the digest.
fn run_digest(files: &[PathBuf], algorithm: DigestAlgorithm) {
    let computer = DigestComputer::new(algorithm);
    for file in files {
        println!("{}  {}", computer.digest_hex(file), file.display());
    }
}

/// Print the digest cell of a single entry.
fn run_copy(config: &InventoryConfig, name: &str) -> Result<()> {
    let table = build_inventory(config)?;
    let id = table.require(name)?;
    if let Some(text) = table.digest_text(id) {
        println!("{text}");
    }
    Ok(())
}

/// Export the inventory table to JSON.
fn run_export(config: &InventoryConfig, output: Option<&Path>) -> Result<()> {
    let table = build_inventory(config)?;
    let json = serde_json::to_string_pretty(&table)?;

    match output {
        Some(output_path) => {
            std::fs::write(output_path, json)
                .with_context(|| format!("Cannot write {}", output_path.display()))?;
            eprintln!("Exported to {}", output_path.display());
        }
        None => {
            println!("{json}");
        }
    }

    Ok(())
}

/// Split `NAME=TEXT` at the first `=`. The text may be empty.
fn parse_memo_assignment(assignment: &str) -> Result<(&str, &str)> {
    match assignment.split_once('=') {
        Some((name, text)) if !name.is_empty() => Ok((name, text)),
        _ => Err(eyre!("Memo must be NAME=TEXT, got {assignment:?}")),
    }
}

fn print_table(table: &InventoryTable, sort: SortKey, order: SortOrder) {
    let hex_width = table.config.algorithm.hex_len();

    println!();
    println!("{}", "─".repeat(hex_width + 60));
    println!(
        " {} - {} entries, {}",
        table.root_path.display(),
        table.len(),
        table.config.algorithm
    );
    println!(
        " {} files, {} directories, {} digest failures",
        table.stats.files, table.stats.directories, table.stats.digest_failures
    );
    println!(
        " Digested {} in {:.2}s",
        format_size(table.stats.bytes_digested),
        table.duration.as_secs_f64()
    );
    println!("{}", "─".repeat(hex_width + 60));
    println!(
        " {:<28} {:<hex_width$} {:<20} {:>5} {:>10}",
        "Name", "Digest", "Memo", "Dir", "Size"
    );

    for id in table.sorted_ids(sort, order) {
        let Some(entry) = table.get(id) else {
            continue;
        };
        let memo = table.memo_text(id).unwrap_or_default();
        println!(
            " {:<28} {:<hex_width$} {:<20} {:>5} {:>10}",
            truncate(&entry.name, 28),
            entry.digest.display_text(),
            truncate(memo, 20),
            if entry.is_dir() { "yes" } else { "no" },
            if entry.is_dir() {
                "-".to_string()
            } else {
                format_size(entry.size)
            },
        );
    }
    println!();
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// Truncate a string to max characters.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 1).collect();
        format!("{kept}…")
    }
}
