//! Test case prompt template
//!
//! The skeleton is static data with two slots. Rendering is a single pass
//! over the skeleton: inserted values are copied verbatim and never rescanned,
//! so a value that itself contains `{req_text}` stays literal.

use crate::config::api_keys::ConfigurationError;
use std::borrow::Cow;
use std::path::Path;

/// Slot replaced by the requirement identifier
pub const REQ_ID_SLOT: &str = "{req_id}";
/// Slot replaced by the requirement text
pub const REQ_TEXT_SLOT: &str = "{req_text}";

const BUILTIN_SKELETON: &str = include_str!("../../prompts/test_cases.md");

/// Fixed instructional prompt with requirement slots
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    skeleton: Cow<'static, str>,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PromptTemplate {
    /// The built-in healthcare QA skeleton
    pub fn builtin() -> Self {
        Self {
            skeleton: Cow::Borrowed(BUILTIN_SKELETON),
        }
    }

    /// Use a custom skeleton. Both slots must be present.
    pub fn from_skeleton(skeleton: impl Into<String>) -> Result<Self, String> {
        let skeleton = skeleton.into();
        let missing: Vec<&str> = [REQ_ID_SLOT, REQ_TEXT_SLOT]
            .into_iter()
            .filter(|slot| !skeleton.contains(slot))
            .collect();
        if !missing.is_empty() {
            return Err(format!("missing slot(s): {}", missing.join(", ")));
        }
        Ok(Self {
            skeleton: Cow::Owned(skeleton),
        })
    }

    /// Load a custom skeleton from disk
    pub fn from_file(path: &Path) -> Result<Self, ConfigurationError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_skeleton(content).map_err(|message| ConfigurationError::InvalidTemplate {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn skeleton(&self) -> &str {
        &self.skeleton
    }

    /// Substitute the requirement into the skeleton
    pub fn render(&self, identifier: &str, text: &str) -> String {
        let slots = [(REQ_ID_SLOT, identifier), (REQ_TEXT_SLOT, text)];
        let mut output =
            String::with_capacity(self.skeleton.len() + identifier.len() + text.len());
        let mut rest: &str = &self.skeleton;

        loop {
            let next = slots
                .iter()
                .filter_map(|(slot, value)| rest.find(slot).map(|pos| (pos, *slot, *value)))
                .min_by_key(|(pos, _, _)| *pos);

            match next {
                Some((pos, slot, value)) => {
                    output.push_str(&rest[..pos]);
                    output.push_str(value);
                    rest = &rest[pos + slot.len()..];
                }
                None => {
                    output.push_str(rest);
                    break;
                }
            }
        }

        output
    }
}
