//! CLI argument parsing

use clap::{ColorChoice, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/// Command line for casegen
#[derive(Parser, Debug)]
#[command(
    name = "casegen",
    version,
    about = "AI-powered test case generator for healthcare software requirements\n\nQuick Start:\n  export GOOGLE_API_KEY=\"your_key\"\n  casegen",
    color = ColorChoice::Auto
)]
pub struct Cli {
    /// Configuration file (default: ./casegen.toml, ./.casegen/casegen.toml, ~/.casegen/casegen.toml)
    #[arg(long, global = true, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Gemini model ID, e.g. gemini-1.5-flash-latest
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Environment variable holding the API key (checked before GOOGLE_API_KEY and GEMINI_API_KEY)
    #[arg(long, global = true, value_name = "NAME")]
    pub api_key_env: Option<String>,

    /// Log level when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_name = "LEVEL")]
    pub log_level: String,

    /// Write raw Markdown without in-place repainting
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands; none means `interactive`
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Enter requirements in a form and stream generated test cases (default)
    Interactive,

    /// Generate test cases for one requirement and print them to stdout
    Generate {
        /// Requirement ID, e.g. REQ-045
        #[arg(long)]
        id: String,

        /// Requirement text
        #[arg(long, conflicts_with = "text_file", required_unless_present = "text_file")]
        text: Option<String>,

        /// Read the requirement text from a file
        #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
        text_file: Option<PathBuf>,
    },

    /// Print the prompt that would be sent for a requirement
    Prompt {
        /// Requirement ID
        #[arg(long)]
        id: String,

        /// Requirement text
        #[arg(long)]
        text: String,
    },

    /// Show the About blurb and sample requirements
    Samples,

    /// Print or write a sample casegen.toml
    Config {
        /// Write to this file instead of stdout
        #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long, requires = "output")]
        force: bool,
    },
}

impl Cli {
    /// Selected command, `interactive` when none was given
    pub fn selected_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Interactive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_interactive() {
        let cli = Cli::parse_from(["casegen"]);
        assert!(matches!(cli.selected_command(), Commands::Interactive));
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_generate_requires_text_or_file() {
        assert!(Cli::try_parse_from(["casegen", "generate", "--id", "REQ-1"]).is_err());
        assert!(
            Cli::try_parse_from([
                "casegen", "generate", "--id", "R", "--text", "t", "--text-file", "f"
            ])
            .is_err()
        );

        let cli = Cli::try_parse_from(["casegen", "generate", "--id", "REQ-1", "--text", "t"])
            .unwrap();
        match cli.selected_command() {
            Commands::Generate { id, text, text_file } => {
                assert_eq!(id, "REQ-1");
                assert_eq!(text.as_deref(), Some("t"));
                assert!(text_file.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_offline_commands_parse() {
        let cli = Cli::try_parse_from(["casegen", "prompt", "--id", "R", "--text", "t"]).unwrap();
        assert!(matches!(cli.selected_command(), Commands::Prompt { .. }));

        let cli = Cli::try_parse_from(["casegen", "samples"]).unwrap();
        assert!(matches!(cli.selected_command(), Commands::Samples));

        let cli = Cli::try_parse_from(["casegen", "config"]).unwrap();
        assert!(matches!(
            cli.selected_command(),
            Commands::Config { output: None, force: false }
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "casegen",
            "samples",
            "--model",
            "gemini-2.5-flash",
            "--plain",
        ])
        .unwrap();
        assert_eq!(cli.model.as_deref(), Some("gemini-2.5-flash"));
        assert!(cli.plain);
    }
}
