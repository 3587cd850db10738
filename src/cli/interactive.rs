use super::bootstrap::{build_controller, load_config, make_sink, print_markdown, resolve_api_key};
use anyhow::{Result, bail};
use casegen_core::RequirementForm;
use casegen_core::cli::Cli;
use casegen_core::config::constants::ui;
use casegen_core::ui::sidebar;
use console::style;
use is_terminal::IsTerminal;
use tracing::debug;

/// Handle the interactive command: form, generate, repeat
pub async fn handle_interactive_command(args: &Cli) -> Result<()> {
    if !std::io::stdin().is_terminal() {
        bail!("interactive mode needs a terminal; use `casegen generate --id <ID> --text <TEXT>`");
    }

    let manager = load_config(args)?;
    let api_key = resolve_api_key(&manager)?;
    let controller = build_controller(&manager, api_key)?;

    print_markdown(args, &sidebar::header_markdown());
    if manager.config().ui.show_sidebar {
        print_markdown(args, &sidebar::sidebar_markdown());
    }

    let form = RequirementForm::new();
    loop {
        let input = form.prompt()?;

        if form.confirm_generate()? {
            println!();
            println!("{}", style(ui::OUTPUT_HEADER).cyan().bold());
            let mut sink = make_sink(args, &manager);
            let outcome = controller.generate_input(&input, sink.as_mut()).await;
            debug!(completed = outcome.is_completed(), "generation finished");
            println!();
        }

        if !form.ask_again()? {
            break;
        }
    }

    Ok(())
}
