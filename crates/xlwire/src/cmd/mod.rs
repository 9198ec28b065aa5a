use std::path::PathBuf;

use clap::{Args, Subcommand};
use xlwire::schema::Family;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod catalog;
pub mod decode;
pub mod status;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a captured receive buffer.
    Decode(DecodeArgs),
    /// List the registered record variants.
    Catalog(CatalogArgs),
    /// Classify and describe a driver status code.
    Status(StatusArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Catalog(args) => catalog::run(args, format),
        Command::Status(args) => status::run(args, format),
        Command::Version(args) => version::run(args, format),
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// File holding the raw buffer bytes.
    pub file: PathBuf,
    /// Protocol family of the buffer.
    #[arg(long, short)]
    pub family: Family,
    /// Record count reported by the driver.
    #[arg(long, short)]
    pub count: usize,
    /// Byte offset of the first record within the file.
    #[arg(long, default_value_t = 0)]
    pub offset: usize,
    /// Stop at the first unregistered tag instead of skipping it.
    #[arg(long)]
    pub abort_on_unknown: bool,
    /// Reject self-describing records larger than this.
    #[arg(long, value_name = "BYTES")]
    pub max_event_size: Option<usize>,
}

#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Only list variants of this family.
    #[arg(long, short)]
    pub family: Option<Family>,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Status code, decimal or 0x-prefixed hex.
    #[arg(value_parser = parse_code)]
    pub code: u16,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Include build target and enabled features.
    #[arg(long)]
    pub extended: bool,
}

fn parse_code(raw: &str) -> Result<u16, String> {
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => raw.parse(),
    };
    parsed.map_err(|err| format!("invalid status code {raw:?}: {err}"))
}
