use super::bootstrap::{load_config, load_template};
use anyhow::Result;
use casegen_core::cli::Cli;

/// Handle the prompt command: print the rendered prompt without calling the model
pub fn handle_prompt_command(args: &Cli, id: &str, text: &str) -> Result<()> {
    let manager = load_config(args)?;
    let template = load_template(&manager)?;
    println!("{}", template.render(id, text));
    Ok(())
}
