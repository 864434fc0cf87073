mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "dupi", version, about = "Flow log to DUPI PDU exporter")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr). `debug` dumps every record field.
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_export_subcommand() {
        let cli = Cli::try_parse_from([
            "dupi",
            "export",
            "event.json",
            "--host",
            "collector",
            "--port",
            "9995",
        ])
        .expect("export args should parse");

        let Command::Export(args) = cli.command else {
            panic!("expected export command");
        };
        assert_eq!(args.destination.host, "collector");
        assert_eq!(args.destination.port, 9995);
        assert_eq!(args.encoding.max_payload, 1472);
        assert_eq!(args.encoding.sampling, 1);
    }

    #[test]
    fn rejects_out_of_range_port() {
        let err = Cli::try_parse_from([
            "dupi",
            "export",
            "event.json",
            "--host",
            "collector",
            "--port",
            "70000",
        ])
        .expect_err("port above u16 should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn parses_encode_subcommand() {
        let cli = Cli::try_parse_from([
            "dupi",
            "--format",
            "json",
            "encode",
            "-",
            "--site-name",
            "dc1",
            "--out-dir",
            "/tmp/pdus",
        ])
        .expect("encode args should parse");

        let Command::Encode(args) = cli.command else {
            panic!("expected encode command");
        };
        assert_eq!(args.encoding.site_name, "dc1");
        assert!(args.out_dir.is_some());
        assert!(matches!(cli.format, Some(OutputFormat::Json)));
    }

    #[test]
    fn encoding_args_build_config() {
        let cli = Cli::try_parse_from(["dupi", "encode", "x.json", "--sampling", "8"])
            .expect("encode args should parse");
        let Command::Encode(args) = cli.command else {
            panic!("expected encode command");
        };
        let config = args.encoding.config("collector", 9995);
        assert_eq!(config.sampling, 8);
        assert_eq!(config.destination_port, 9995);
    }
}
