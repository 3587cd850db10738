use super::bootstrap::print_markdown;
use anyhow::Result;
use casegen_core::cli::Cli;
use casegen_core::ui::sidebar;

/// Handle the samples command
pub fn handle_samples_command(args: &Cli) -> Result<()> {
    print_markdown(args, &sidebar::sidebar_markdown());
    Ok(())
}
