//! Shipment discounts CLI

use std::process::ExitCode;

use clap::Parser;
use shipment_discounts::{cli::Cli, diagnostics};
use tracing::{error, info};

const FAILURE_NOTICE: &str = "An error occurred while running the application.";

fn main() -> ExitCode {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(source) = diagnostics::init(&cli.diagnostics()) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for diagnostics errors"
        )]
        {
            eprintln!("{source}");
        }

        return ExitCode::FAILURE;
    }

    info!("The application started.");

    match cli.run() {
        Ok(lines) => {
            #[expect(clippy::print_stdout, reason = "processed lines are echoed to the console")]
            {
                for line in &lines {
                    println!("{line}");
                }
            }

            info!("The application ended successfully.");

            ExitCode::SUCCESS
        }
        Err(source) => {
            error!("An error occurred: {source}");

            #[expect(clippy::print_stdout, reason = "single user facing failure notice")]
            {
                println!("{FAILURE_NOTICE}");
            }

            ExitCode::FAILURE
        }
    }
}
