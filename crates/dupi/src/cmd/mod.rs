use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use dupi_export::ExportConfig;
use dupi_pdu::{DEFAULT_MAX_PAYLOAD, DEFAULT_SAMPLING, DEFAULT_SITE_NAME};

use crate::exit::{io_error, CliResult};
use crate::output::OutputFormat;

pub mod encode;
pub mod export;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a flow log event to PDUs and send them to the collector.
    Export(ExportArgs),
    /// Convert a flow log event to PDUs without sending them.
    Encode(EncodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Export(args) => export::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct DestinationArgs {
    /// Collector host name or address.
    #[arg(long, env = "DESTINATION_HOST")]
    pub host: String,
    /// Collector UDP port.
    #[arg(long, env = "DESTINATION_PORT")]
    pub port: u16,
}

#[derive(Args, Debug)]
pub struct EncodingArgs {
    /// Site label written into every PDU header (16 bytes max).
    #[arg(long, env = "SITE_NAME", default_value = DEFAULT_SITE_NAME)]
    pub site_name: String,
    /// Maximum datagram payload in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_PAYLOAD)]
    pub max_payload: usize,
    /// Sampling factor 1/n written into every PDU header.
    #[arg(long, default_value_t = DEFAULT_SAMPLING)]
    pub sampling: u32,
}

impl EncodingArgs {
    pub fn config(&self, host: &str, port: u16) -> ExportConfig {
        ExportConfig {
            site_name: self.site_name.clone(),
            max_payload: self.max_payload,
            sampling: self.sampling,
            ..ExportConfig::new(host, port)
        }
    }
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Event file (trigger event or decoded message); `-` reads stdin.
    pub input: PathBuf,
    #[command(flatten)]
    pub destination: DestinationArgs,
    #[command(flatten)]
    pub encoding: EncodingArgs,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Event file (trigger event or decoded message); `-` reads stdin.
    pub input: PathBuf,
    #[command(flatten)]
    pub encoding: EncodingArgs,
    /// Write each PDU to DIR/pdu-NNNN.bin.
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Read the whole input, from stdin when the path is `-`.
pub fn read_input(path: &Path) -> CliResult<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .map_err(|err| io_error("failed reading stdin", err))?;
        return Ok(buf);
    }
    std::fs::read(path).map_err(|err| io_error(&format!("failed reading {}", path.display()), err))
}
