//! Formatting of console output.
//!
//! The `format_*` methods are pure and return the styled line; the
//! matching printing methods write it to stdout (or stderr for errors).

use console::style;

use crate::boundary::BoundaryWarning;

/// Prefix shown on every line the tool prints.
pub const SCRIPT_NAME: &str = "Auto Release";

/// Console reporter for one run of the tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    dry_run: bool,
}

impl Reporter {
    pub fn new(dry_run: bool) -> Self {
        Reporter { dry_run }
    }

    fn prefix(&self) -> String {
        let name = style(format!("[{}]", SCRIPT_NAME)).bold().cyan();
        if self.dry_run {
            format!("{}{}", name, style(" (dry run)").dim())
        } else {
            name.to_string()
        }
    }

    pub fn format_info(&self, message: &str) -> String {
        format!("{} {}", self.prefix(), message)
    }

    pub fn format_success(&self, message: &str) -> String {
        format!("{} ✨ {}", self.prefix(), style(message).green())
    }

    pub fn format_warn(&self, message: &str) -> String {
        format!("{} ⚠️ {}", self.prefix(), style(message).yellow())
    }

    pub fn format_error(&self, message: &str) -> String {
        format!("{} ❌ {}", self.prefix(), style(message).red())
    }

    pub fn info(&self, message: &str) {
        println!("{}", self.format_info(message));
    }

    pub fn success(&self, message: &str) {
        println!("{}", self.format_success(message));
    }

    pub fn warn(&self, message: &str) {
        println!("{}", self.format_warn(message));
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}", self.format_error(message));
    }

    /// Display a boundary warning to the user.
    pub fn boundary(&self, warning: &BoundaryWarning) {
        self.warn(&warning.to_string());
    }
}
