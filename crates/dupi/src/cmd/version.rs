use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("dupi {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: dupi");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("pdu_version: {}", dupi_pdu::PDU_VERSION);
    println!("header_size: {}", dupi_pdu::HEADER_SIZE);
    println!("record_size: {}", dupi_pdu::RECORD_SIZE);
    println!(
        "max_records_per_pdu: {} (at {} bytes)",
        dupi_pdu::BatchLimits::DEFAULT.max_records(),
        dupi_pdu::DEFAULT_MAX_PAYLOAD
    );
    println!(
        "build_target: {}",
        option_env!("DUPI_BUILD_TARGET").unwrap_or("unknown")
    );

    Ok(SUCCESS)
}
