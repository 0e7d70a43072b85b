use fir_coeffgen::config::{Cli, Parser};
use fir_coeffgen::logging::init_logging;
use fir_coeffgen::{pipeline, report};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_config());

    let spec = cli.filter_spec();
    match pipeline::design(&spec) {
        Ok(design) => {
            print!("{}", report::render(&design));
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(design = spec.design.name(), "coefficient generation failed");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
