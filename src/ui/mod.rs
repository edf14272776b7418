//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Styled console output
//! - This module - Interactive confirmation

use std::io::{self, BufRead, Write};

use console::style;

pub mod formatter;

pub use formatter::{Reporter, SCRIPT_NAME};

/// Yes/no confirmation capability.
///
/// The tag workflow only sees the answer, which keeps it deterministic
/// under test.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> io::Result<bool>;
}

/// Asks on the terminal and blocks until one line is read from stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> io::Result<bool> {
        print!("{} ", prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;

        Ok(is_affirmative(&input))
    }
}

/// Only `y` (any case, surrounding whitespace ignored) counts as yes.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// The two-line prompt shown before committing and tagging a release.
pub fn tag_prompt(version: &str) -> String {
    let name = style(format!("[{}]", SCRIPT_NAME)).bold().cyan();
    let tip = style("⚠️ This operation will perform git add, commit, and tag actions.").yellow();
    format!(
        "{} {}\n{} Are you sure you want to create a Git commit and tag for v{}? (y/N):",
        name, tip, name, version
    )
}
