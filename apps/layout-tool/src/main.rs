//! CLI tool for struct layout inspection.
//!
//! Provides commands for:
//! - Printing resolved layouts from a schema file
//! - Decoding binary records through a struct layout

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use struct_buffer_core::schema_file::load_schema_file_with;
use struct_buffer_core::{LayoutConfig, SharedBuffer, StructRegistry};

/// Command-line arguments for the layout tool.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Maximum struct size in bytes accepted while resolving the schema
    #[arg(long, global = true)]
    max_struct_size: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved layout of one or all structs
    Show {
        /// Schema file (JSON)
        schema: PathBuf,

        /// Only show this struct
        #[arg(long = "struct")]
        struct_name: Option<String>,

        /// Emit JSON instead of a text table
        #[arg(long)]
        json: bool,
    },
    /// Decode a binary file through a struct layout
    Decode {
        /// Schema file (JSON)
        schema: PathBuf,

        /// Struct to decode
        #[arg(long = "struct")]
        struct_name: String,

        /// Binary data file
        data: PathBuf,

        /// Byte offset of the first record
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Number of consecutive records to decode
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    let config = match args.max_struct_size {
        Some(limit) => LayoutConfig::with_max_struct_size(limit),
        None => LayoutConfig::default(),
    };

    match args.command {
        Command::Show {
            schema,
            struct_name,
            json,
        } => {
            let registry = load_registry(&schema, &config)?;
            print!("{}", show(&registry, struct_name.as_deref(), json)?);
        }
        Command::Decode {
            schema,
            struct_name,
            data,
            offset,
            count,
        } => {
            let registry = load_registry(&schema, &config)?;
            let bytes = std::fs::read(&data)
                .with_context(|| format!("Failed to read data file {}", data.display()))?;
            println!("{}", decode(&registry, &struct_name, bytes, offset, count)?);
        }
    }

    Ok(())
}

fn load_registry(path: &Path, config: &LayoutConfig) -> anyhow::Result<StructRegistry> {
    load_schema_file_with(path, config)
        .with_context(|| format!("Failed to load schema {}", path.display()))
}

/// Renders layouts as text tables or a JSON array of reports.
fn show(
    registry: &StructRegistry,
    struct_name: Option<&str>,
    json: bool,
) -> anyhow::Result<String> {
    let names = match struct_name {
        Some(name) => vec![name.to_string()],
        None => registry.names(),
    };

    let mut reports = Vec::with_capacity(names.len());
    for name in &names {
        reports.push(registry.require(name)?.report());
    }

    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&reports)?));
    }

    Ok(reports
        .iter()
        .map(|report| report.to_string())
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Decodes `count` back-to-back records starting at `offset` into JSON.
fn decode(
    registry: &StructRegistry,
    struct_name: &str,
    bytes: Vec<u8>,
    offset: usize,
    count: usize,
) -> anyhow::Result<String> {
    if count == 0 {
        bail!("--count must be at least 1");
    }

    let descriptor = registry.require(struct_name)?;
    let available = bytes.len().saturating_sub(offset);
    if descriptor.size() > 0 && available % descriptor.size() != 0 {
        tracing::warn!(
            "{} bytes after offset {} is not a multiple of the {}-byte record size",
            available,
            offset,
            descriptor.size()
        );
    }

    let buffer = SharedBuffer::from_bytes(bytes);
    let fitting = available / descriptor.size().max(1) + 1;
    let mut records = Vec::with_capacity(count.min(fitting));
    for i in 0..count {
        let base = i
            .checked_mul(descriptor.size())
            .and_then(|delta| delta.checked_add(offset))
            .context("Record offset overflow")?;
        let view = descriptor
            .create_at(&buffer, base)
            .with_context(|| format!("Record {} does not fit in the data file", i))?;
        records.push(view.to_json());
    }

    let value = if count == 1 {
        records.remove(0)
    } else {
        serde_json::Value::Array(records)
    };
    Ok(serde_json::to_string_pretty(&value)?)
}
