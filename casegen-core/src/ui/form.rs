//! Requirement entry form
//!
//! Two inputs and a trigger: a single-line requirement ID and a multi-line
//! requirement text that ends at the first empty line.

use crate::config::constants::ui;
use crate::core::RequirementInput;
use anyhow::Result;
use console::{Term, style};
use dialoguer::{Confirm, Input};
use std::io;

/// Interactive form drawn on stderr so stdout only carries output
pub struct RequirementForm {
    term: Term,
}

impl Default for RequirementForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RequirementForm {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    /// Ask for the requirement ID and text
    pub fn prompt(&self) -> Result<RequirementInput> {
        self.term
            .write_line(&style(ui::INPUT_HEADER).bold().to_string())?;

        let identifier: String = Input::new()
            .with_prompt(format!(
                "{} {}",
                ui::REQ_ID_LABEL,
                style(ui::REQ_ID_PLACEHOLDER).dim()
            ))
            .allow_empty(true)
            .interact_text_on(&self.term)?;

        self.term.write_line(&format!(
            "{} {}",
            style(ui::REQ_TEXT_LABEL).bold(),
            style("(finish with an empty line)").dim()
        ))?;
        self.term
            .write_line(&style(ui::REQ_TEXT_PLACEHOLDER).dim().italic().to_string())?;

        let text = collect_text_lines(std::iter::from_fn(|| Some(self.term.read_line())))?;

        Ok(RequirementInput::new(identifier, text))
    }

    /// The generate trigger
    pub fn confirm_generate(&self) -> Result<bool> {
        let confirmed = Confirm::new()
            .with_prompt(ui::GENERATE_ACTION)
            .default(true)
            .interact_on(&self.term)?;
        Ok(confirmed)
    }

    /// Whether to enter another requirement after a run
    pub fn ask_again(&self) -> Result<bool> {
        let again = Confirm::new()
            .with_prompt("Generate test cases for another requirement?")
            .default(true)
            .interact_on(&self.term)?;
        Ok(again)
    }
}

/// Join lines up to (not including) the first empty one.
///
/// End of input also ends the text.
pub fn collect_text_lines<I>(lines: I) -> io::Result<String>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut collected = Vec::new();
    for line in lines {
        let line = line?;
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            break;
        }
        collected.push(line.to_string());
    }
    Ok(collected.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(input: &[&str]) -> Vec<io::Result<String>> {
        input.iter().map(|l| Ok(l.to_string())).collect()
    }

    #[test]
    fn test_collect_stops_at_empty_line() {
        let text = collect_text_lines(lines(&["As a nurse,", "I want alerts", "", "ignored"]))
            .unwrap();
        assert_eq!(text, "As a nurse,\nI want alerts");
    }

    #[test]
    fn test_collect_keeps_inner_whitespace() {
        let text = collect_text_lines(lines(&["  indented\r", " "])).unwrap();
        assert_eq!(text, "  indented\n ");
    }

    #[test]
    fn test_collect_propagates_read_errors() {
        let input = vec![
            Ok("first".to_string()),
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "closed")),
        ];
        assert!(collect_text_lines(input).is_err());
    }

    #[test]
    fn test_collect_empty_input() {
        assert_eq!(collect_text_lines(lines(&[])).unwrap(), "");
    }
}
