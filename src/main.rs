mod cli;

use anyhow::Result;
use casegen_core::cli::{Cli, Commands};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Cli::parse();
    init_tracing(&args.log_level);
    casegen_core::load_dotenv();

    match args.selected_command() {
        Commands::Interactive => cli::handle_interactive_command(&args).await?,
        Commands::Generate {
            id,
            text,
            text_file,
        } => {
            return cli::handle_generate_command(&args, &id, text.as_deref(), text_file.as_deref())
                .await;
        }
        Commands::Prompt { id, text } => cli::handle_prompt_command(&args, &id, &text)?,
        Commands::Samples => cli::handle_samples_command(&args)?,
        Commands::Config { output, force } => {
            cli::handle_config_command(output.as_deref(), force)?
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Log to stderr so stdout only carries generated output
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
