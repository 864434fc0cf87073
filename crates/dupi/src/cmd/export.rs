use dupi_export::{decode_event, ExportError, Exporter, TracingSink};
use dupi_transport::UdpTransport;
use tracing::warn;

use crate::cmd::{read_input, ExportArgs};
use crate::exit::{export_exit_code, CliResult, SUCCESS};
use crate::output::{print_status, OutputFormat};

pub fn run(args: ExportArgs, format: OutputFormat) -> CliResult<i32> {
    let config = match args
        .encoding
        .config(&args.destination.host, args.destination.port)
        .validate()
    {
        Ok(config) => config,
        Err(err) => return Ok(report_failure(err.into(), format)),
    };

    let input = read_input(&args.input)?;
    let message = match decode_event(&input) {
        Ok(message) => message,
        Err(err) => return Ok(report_failure(err.into(), format)),
    };

    let mut exporter = Exporter::new(config, UdpTransport::new());
    match exporter.export(&message, &TracingSink) {
        Ok(report) => {
            print_status(&report.status(), &report.pdus, format);
            Ok(SUCCESS)
        }
        Err(err) => {
            print_status(&err.status(), &[], format);
            Ok(export_exit_code(&err))
        }
    }
}

/// Print the failure status and pick the exit code.
fn report_failure(err: ExportError, format: OutputFormat) -> i32 {
    warn!(error = %err, "export failed");
    print_status(&err.status(), &[], format);
    export_exit_code(&err)
}
