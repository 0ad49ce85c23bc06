//! recipe-ci CLI - CI job graph generator for recipe build farms
//!
//! Entry point for the recipe-ci command-line application.

use anyhow::Result;
use clap::Parser;

use recipe_ci::cli::output::display_error;
use recipe_ci::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output_config = cli.output_config();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(output_config.log_level().into()),
        )
        .init();

    // Run the command and handle errors
    match cli.run() {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
