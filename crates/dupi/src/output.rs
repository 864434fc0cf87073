use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use dupi_export::{EmittedPdu, ExportStatus};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct EncodeOutput<'a> {
    records: usize,
    pdus: &'a [EmittedPdu],
}

/// Print the caller-facing status of an export, with the PDUs sent so far.
pub fn print_status(status: &ExportStatus, pdus: &[EmittedPdu], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(status).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            if !pdus.is_empty() {
                println!("{}", pdu_table(pdus));
            }
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["STATUS", "BODY"])
                .add_row(vec![status.status_code.to_string(), status.body.clone()]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for pdu in pdus {
                println!("pdu={} flows={} bytes={}", pdu.index, pdu.flows, pdu.bytes);
            }
            println!("status={} body={}", status.status_code, status.body);
        }
    }
}

/// Print the PDUs a dry run produced.
pub fn print_encoded(records: usize, pdus: &[EmittedPdu], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = EncodeOutput { records, pdus };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            println!("{}", pdu_table(pdus));
            println!("{records} record(s) in {} PDU(s)", pdus.len());
        }
        OutputFormat::Pretty => {
            for pdu in pdus {
                println!("pdu={} flows={} bytes={}", pdu.index, pdu.flows, pdu.bytes);
            }
            println!("records={records} pdus={}", pdus.len());
        }
    }
}

fn pdu_table(pdus: &[EmittedPdu]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["PDU", "FLOWS", "BYTES"]);
    for pdu in pdus {
        table.add_row(vec![
            pdu.index.to_string(),
            pdu.flows.to_string(),
            pdu.bytes.to_string(),
        ]);
    }
    table
}
