use anyhow::{Context, Result, bail};
use casegen_core::CasegenConfig;
use console::style;
use std::path::Path;

/// Handle the config command: print or write a sample `casegen.toml`
pub fn handle_config_command(output: Option<&Path>, force: bool) -> Result<()> {
    let Some(output) = output else {
        print!("{}", CasegenConfig::sample_toml()?);
        return Ok(());
    };

    let written = CasegenConfig::create_sample_config(output, force)
        .with_context(|| format!("failed to write {}", output.display()))?;
    if !written {
        bail!(
            "{} already exists; pass --force to overwrite it",
            output.display()
        );
    }

    eprintln!(
        "{} Configuration written to {}",
        style("✓").green().bold(),
        output.display()
    );
    Ok(())
}
