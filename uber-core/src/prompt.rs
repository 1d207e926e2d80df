//! Interactive input.

use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::error::{Result, UberError};

/// Checks an answer; an `Err` makes the prompt ask again.
pub type Validator<'a> = &'a dyn Fn(&str) -> Result<()>;

/// Source of interactive answers.
pub trait Prompter {
    /// Ask for a line of text. An empty answer takes `default` when one is given.
    fn ask(&self, prompt: &str, default: Option<&str>, validator: Option<Validator<'_>>)
        -> Result<String>;

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;

    /// Show a section title ahead of a group of questions.
    fn heading(&self, title: &str);
}

/// `Prompter` that reads from the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(
        &self,
        prompt: &str,
        default: Option<&str>,
        validator: Option<Validator<'_>>,
    ) -> Result<String> {
        let theme = ColorfulTheme::default();
        let mut input = Input::<String>::with_theme(&theme).with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        if let Some(validator) = validator {
            input = input.validate_with(move |answer: &String| -> std::result::Result<(), String> {
                validator(answer).map_err(|e| match e {
                    UberError::Validation(message) => message,
                    other => other.to_string(),
                })
            });
        }
        Ok(input.interact_text()?)
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Ok(Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    fn heading(&self, title: &str) {
        crate::uber_println!("{}", title);
    }
}
