//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, BufRead, Write};

use anyhow::Result;
use console::style;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_cancelled, display_dry_run_plan, display_error,
    display_manual_push_instruction, display_status, display_success, display_updated_files,
    display_version_change,
};

/// Source of yes/no answers for the release workflow's confirmation steps.
pub trait Prompter {
    /// Ask a yes/no question; `Ok(true)` means go ahead.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Interprets an answer to a `(Y/n)` prompt.
///
/// Empty input accepts (the default is yes); otherwise only "y" or "yes"
/// (case-insensitive, surrounding whitespace ignored) accept.
pub fn parse_confirmation(input: &str) -> bool {
    let response = input.trim().to_lowercase();
    response.is_empty() || response == "y" || response == "yes"
}

/// Prompts on the terminal, reading answers from stdin.
pub struct TerminalPrompter<R> {
    input: R,
}

impl TerminalPrompter<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        TerminalPrompter {
            input: io::stdin().lock(),
        }
    }
}

impl<R: BufRead> TerminalPrompter<R> {
    pub fn from_reader(input: R) -> Self {
        TerminalPrompter { input }
    }
}

impl<R: BufRead> Prompter for TerminalPrompter<R> {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        print!("{} ({}/n) ", prompt, style("Y").bold());
        io::stdout().flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 {
            // stdin closed: never assume consent
            return Ok(false);
        }

        Ok(parse_confirmation(&line))
    }
}

/// Accepts every prompt (`--yes`).
pub struct AutoConfirm;

impl Prompter for AutoConfirm {
    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_confirmation_defaults_to_yes() {
        assert!(parse_confirmation(""));
        assert!(parse_confirmation("\n"));
        assert!(parse_confirmation("   \r\n"));
    }

    #[test]
    fn test_parse_confirmation_accepts_yes() {
        assert!(parse_confirmation("y"));
        assert!(parse_confirmation("Y\n"));
        assert!(parse_confirmation(" yes "));
        assert!(parse_confirmation("YES"));
    }

    #[test]
    fn test_parse_confirmation_rejects_others() {
        assert!(!parse_confirmation("n"));
        assert!(!parse_confirmation("no"));
        assert!(!parse_confirmation("yep"));
        assert!(!parse_confirmation("q"));
    }

    #[test]
    fn test_terminal_prompter_reads_lines() {
        let mut prompter = TerminalPrompter::from_reader(Cursor::new("\nn\nyes\n"));
        assert!(prompter.confirm("First?").unwrap());
        assert!(!prompter.confirm("Second?").unwrap());
        assert!(prompter.confirm("Third?").unwrap());
    }

    #[test]
    fn test_terminal_prompter_eof_declines() {
        let mut prompter = TerminalPrompter::from_reader(Cursor::new(""));
        assert!(!prompter.confirm("Continue?").unwrap());
    }

    #[test]
    fn test_auto_confirm() {
        assert!(AutoConfirm.confirm("Push?").unwrap());
    }
}
