use anyhow::{Context, Result};
use casegen_core::cli::Cli;
use casegen_core::config::constants::{models, ui};
use casegen_core::ui::Spinner;
use casegen_core::{
    ApiKey, ApiKeySources, Client, ClientConfig, ConfigManager, DisplaySink,
    InteractionController, MarkdownRenderer, PlainSink, PromptTemplate, TerminalSink, get_api_key,
};
use console::style;
use is_terminal::IsTerminal;
use tracing::{debug, info, warn};

/// Load `casegen.toml` and apply command-line overrides
pub fn load_config(args: &Cli) -> Result<ConfigManager> {
    let mut manager = match &args.config {
        Some(path) => ConfigManager::load_from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => ConfigManager::load().context("failed to load configuration")?,
    };

    if let Some(model) = &args.model {
        manager.config_mut().model.name = model.clone();
    }
    if let Some(env_var) = &args.api_key_env {
        manager.config_mut().credentials.env_var = env_var.clone();
    }

    let model = &manager.config().model.name;
    if !models::google::SUPPORTED_MODELS.contains(&model.as_str()) {
        warn!(model = %model, "model is not in the list of known Gemini models");
    }

    match manager.config_path() {
        Some(path) => debug!(path = %path.display(), "using configuration file"),
        None => debug!("using default configuration"),
    }
    Ok(manager)
}

/// Resolve the API key once, reporting the result on stderr
pub fn resolve_api_key(manager: &ConfigManager) -> Result<ApiKey> {
    let cwd = std::env::current_dir().context("cannot determine current dir")?;
    let sources = ApiKeySources::for_workspace(&cwd)
        .with_primary_env(manager.config().credentials.env_var.clone());

    match get_api_key(&sources) {
        Ok((api_key, source)) => {
            info!(source = %source, "API key resolved");
            eprintln!("{} {}", style("✓").green().bold(), style(ui::KEY_CONFIGURED).green());
            Ok(api_key)
        }
        Err(e) => {
            eprintln!("{}", style(ui::KEY_MISSING).red().bold());
            Err(e).context("cannot start without a Gemini API key")
        }
    }
}

pub fn load_template(manager: &ConfigManager) -> Result<PromptTemplate> {
    match &manager.config().prompt.template_path {
        Some(path) => {
            let path = manager.resolve(path);
            debug!(path = %path.display(), "loading prompt template");
            Ok(PromptTemplate::from_file(&path)?)
        }
        None => Ok(PromptTemplate::builtin()),
    }
}

pub fn build_controller(
    manager: &ConfigManager,
    api_key: ApiKey,
) -> Result<InteractionController<Client>> {
    let config = manager.config();
    let template = load_template(manager)?;
    let client = Client::with_config(
        api_key,
        ClientConfig::from_sections(&config.model, &config.client),
    )?;
    debug!(model = %config.model.name, "gemini client ready");
    Ok(InteractionController::new(client, template))
}

/// Whether output should be repainted in place
pub fn use_terminal(args: &Cli) -> bool {
    !args.plain && std::io::stdout().is_terminal()
}

/// Display sink for one generation
pub fn make_sink(args: &Cli, manager: &ConfigManager) -> Box<dyn DisplaySink> {
    if use_terminal(args) {
        let renderer = MarkdownRenderer::new(manager.config().ui.render_markdown);
        Box::new(TerminalSink::stdout(renderer).with_spinner(Spinner::new(ui::BUSY_MESSAGE)))
    } else {
        Box::new(PlainSink::stdout())
    }
}

/// Print Markdown to stdout, styled when stdout is a terminal
pub fn print_markdown(args: &Cli, markdown: &str) {
    let renderer = MarkdownRenderer::new(use_terminal(args));
    print!("{}", renderer.render(markdown));
}
