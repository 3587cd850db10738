//! Command handlers
//!
//! Each handler wires configuration, the credential and the core together
//! for one subcommand.

mod bootstrap;
pub mod config;
pub mod generate;
pub mod interactive;
pub mod prompt;
pub mod samples;

pub use config::handle_config_command;
pub use generate::handle_generate_command;
pub use interactive::handle_interactive_command;
pub use prompt::handle_prompt_command;
pub use samples::handle_samples_command;
