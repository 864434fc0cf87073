use std::path::Path;

use dupi_export::{decode_event, CaptureTransport, ExportError, Exporter, TracingSink};

use crate::cmd::{read_input, EncodeArgs};
use crate::exit::{config_error, export_exit_code, io_error, CliError, CliResult, SUCCESS};
use crate::output::{print_encoded, OutputFormat};

/// Dry runs never resolve or reach this destination.
const DRY_RUN_HOST: &str = "dry-run";
const DRY_RUN_PORT: u16 = 9;

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let config = args
        .encoding
        .config(DRY_RUN_HOST, DRY_RUN_PORT)
        .validate()
        .map_err(config_error)?;

    let input = read_input(&args.input)?;
    let message = decode_event(&input).map_err(|err| export_failure(err.into()))?;

    let mut exporter = Exporter::new(config, CaptureTransport::new());
    let report = exporter
        .export(&message, &TracingSink)
        .map_err(export_failure)?;

    if let Some(dir) = &args.out_dir {
        write_pdus(dir, exporter.transport())?;
    }

    print_encoded(report.records, &report.pdus, format);
    Ok(SUCCESS)
}

fn export_failure(err: ExportError) -> CliError {
    CliError::new(export_exit_code(&err), err.to_string())
}

fn write_pdus(dir: &Path, capture: &CaptureTransport) -> CliResult<()> {
    std::fs::create_dir_all(dir)
        .map_err(|err| io_error(&format!("failed creating {}", dir.display()), err))?;
    for (i, pdu) in capture.datagrams().enumerate() {
        let path = dir.join(format!("pdu-{:04}.bin", i + 1));
        std::fs::write(&path, pdu)
            .map_err(|err| io_error(&format!("failed writing {}", path.display()), err))?;
    }
    Ok(())
}
