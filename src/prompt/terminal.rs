//! Interactive decision provider on the terminal.
//!
//! Prompts are written to stderr so stdout stays usable for `--json` output.
//! Keys are read in raw mode: digits pick an option, `y`/`n` answer two-way
//! prompts, Esc picks the last option.

use super::{DecisionProvider, Prompt};
use crate::models::KeywordEntry;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::Write;

/// Asks questions on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalDecider {
    /// Print the keyword list after every change
    pub echo_keywords: bool,
}

impl TerminalDecider {
    /// Creates a terminal decider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn print_prompt(prompt: &Prompt) -> Result<()> {
        let mut err = std::io::stderr().lock();
        writeln!(err)?;
        writeln!(err, "== {} ==", prompt.title)?;
        writeln!(err, "{}", prompt.message)?;
        writeln!(err)?;
        for (idx, option) in prompt.options.iter().enumerate() {
            writeln!(err, "  [{}] {}", idx + 1, option)?;
        }
        write!(err, "> ")?;
        err.flush()?;
        Ok(())
    }
}

impl DecisionProvider for TerminalDecider {
    fn choose(&mut self, prompt: &Prompt) -> Result<usize> {
        if prompt.options.is_empty() {
            anyhow::bail!("Prompt '{}' has no options", prompt.title);
        }
        Self::print_prompt(prompt)?;

        enable_raw_mode().context("Failed to enable raw mode")?;
        let answer = read_option(prompt.options.len());
        disable_raw_mode().context("Failed to disable raw mode")?;

        let answer = answer?;
        eprintln!("{}", prompt.options[answer]);
        Ok(answer)
    }

    fn notify(&mut self, title: &str, message: &str) -> Result<()> {
        eprintln!();
        eprintln!("== {title} ==");
        eprintln!("{message}");
        eprint!("(press any key) ");
        std::io::stderr().flush()?;

        enable_raw_mode().context("Failed to enable raw mode")?;
        let result = wait_for_key();
        disable_raw_mode().context("Failed to disable raw mode")?;
        eprintln!();
        result
    }

    fn keywords_changed(&mut self, entries: &[KeywordEntry]) {
        if !self.echo_keywords {
            return;
        }
        eprintln!("Keywords ({}):", entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            eprintln!("  {:>3}  {:<24} {}", idx, entry.keyword, entry.handler);
        }
    }
}

/// Reads keys until one maps to an option index.
fn read_option(count: usize) -> Result<usize> {
    loop {
        let Event::Key(key) = event::read().context("Failed to read terminal input")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            anyhow::bail!("Prompt interrupted");
        }
        match key.code {
            KeyCode::Esc => return Ok(count - 1),
            KeyCode::Char(c) => {
                if let Some(option) = key_to_option(c, count) {
                    return Ok(option);
                }
            }
            _ => {}
        }
    }
}

fn wait_for_key() -> Result<()> {
    loop {
        if let Event::Key(key) = event::read().context("Failed to read terminal input")? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}

/// Maps a typed character to an option index.
fn key_to_option(c: char, count: usize) -> Option<usize> {
    if let Some(digit) = c.to_digit(10) {
        let digit = digit as usize;
        return (1..=count).contains(&digit).then(|| digit - 1);
    }
    if count == 2 {
        return match c.to_ascii_lowercase() {
            'y' => Some(0),
            'n' => Some(1),
            _ => None,
        };
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_to_option_digits() {
        assert_eq!(key_to_option('1', 3), Some(0));
        assert_eq!(key_to_option('3', 3), Some(2));
        assert_eq!(key_to_option('4', 3), None);
        assert_eq!(key_to_option('0', 3), None);
    }

    #[test]
    fn test_key_to_option_yes_no() {
        assert_eq!(key_to_option('y', 2), Some(0));
        assert_eq!(key_to_option('N', 2), Some(1));
        assert_eq!(key_to_option('y', 3), None);
    }
}
