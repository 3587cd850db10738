use super::bootstrap::{build_controller, load_config, make_sink, resolve_api_key};
use anyhow::{Context, Result};
use casegen_core::cli::Cli;
use std::path::Path;
use std::process::ExitCode;

/// Handle the generate command: one requirement, output on stdout
///
/// Exits with failure when the generation is rejected or fails.
pub async fn handle_generate_command(
    args: &Cli,
    id: &str,
    text: Option<&str>,
    text_file: Option<&Path>,
) -> Result<ExitCode> {
    let text = match (text, text_file) {
        (Some(text), _) => text.to_string(),
        (None, Some(path)) => read_requirement_text(path).await?,
        (None, None) => String::new(),
    };

    let manager = load_config(args)?;
    let api_key = resolve_api_key(&manager)?;
    let controller = build_controller(&manager, api_key)?;

    let mut sink = make_sink(args, &manager);
    let outcome = controller.generate(id, &text, sink.as_mut()).await;

    Ok(if outcome.is_completed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn read_requirement_text(path: &Path) -> Result<String> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read requirement text from {}", path.display()))?;
    Ok(content.trim_end_matches(['\r', '\n']).to_string())
}
