//! `feincms3-testapp`: resolve embeds and render the demo site.

use std::process::ExitCode;

use clap::Parser;

use feincms3_rs_core::logging::setup_logging;
use feincms3_rs_core::SETTINGS;
use feincms3_testapp::cli::{load_settings, run, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match load_settings(cli.settings.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    SETTINGS.configure(settings);
    let settings = SETTINGS.get();
    setup_logging(settings);
    tracing::debug!(endpoint = %settings.oembed.endpoint, "Settings loaded");

    match run(&cli.command, settings).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
