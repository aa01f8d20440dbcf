//! Output mode detection and a central printer
//!
//! Console rendering adapts to where stdout goes: an interactive terminal
//! gets colors and unicode, CI and piped output get plain text.

use std::io::{self, IsTerminal};

/// Where output is going, and what it can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Interactive terminal with colors and unicode
    Interactive,
    /// CI environment, plain text
    Ci,
    /// Piped output, plain text
    Plain,
}

impl OutputMode {
    pub fn detect() -> Self {
        if is_ci::cached() {
            return OutputMode::Ci;
        }
        if io::stdout().is_terminal() {
            OutputMode::Interactive
        } else {
            OutputMode::Plain
        }
    }

    pub fn colors_enabled(&self) -> bool {
        matches!(self, OutputMode::Interactive)
    }

    pub fn unicode_enabled(&self) -> bool {
        matches!(self, OutputMode::Interactive)
    }
}

impl Default for OutputMode {
    fn default() -> Self {
        Self::detect()
    }
}

/// Mode-aware print functions for the CLI
#[derive(Debug, Clone)]
pub struct Printer {
    mode: OutputMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            mode: OutputMode::detect(),
        }
    }

    pub fn with_mode(mode: OutputMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn println(&self, message: &str) {
        println!("{}", message);
    }

    pub fn newline(&self) {
        println!();
    }

    pub fn separator(&self) {
        let line = if self.mode.unicode_enabled() {
            "━".repeat(60)
        } else {
            "-".repeat(60)
        };
        println!("{}", line);
    }

    pub fn header(&self, text: &str) {
        use colored::Colorize;
        if self.mode.colors_enabled() {
            println!("{}", text.cyan().bold());
        } else {
            println!("{}", text);
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        use colored::Colorize;
        if self.mode.colors_enabled() {
            println!("  {}: {}", key.cyan(), value);
        } else {
            println!("  {}: {}", key, value);
        }
    }

    pub fn success(&self, message: &str) {
        use colored::Colorize;
        let symbol = if self.mode.unicode_enabled() { "✓" } else { "[OK]" };
        if self.mode.colors_enabled() {
            println!("{} {}", symbol.green(), message.green());
        } else {
            println!("{} {}", symbol, message);
        }
    }

    pub fn warning(&self, message: &str) {
        use colored::Colorize;
        let symbol = if self.mode.unicode_enabled() { "⚠" } else { "[WARN]" };
        if self.mode.colors_enabled() {
            println!("{} {}", symbol.yellow(), message.yellow());
        } else {
            println!("{} {}", symbol, message);
        }
    }

    pub fn error(&self, message: &str) {
        use colored::Colorize;
        let symbol = if self.mode.unicode_enabled() { "✗" } else { "[ERROR]" };
        if self.mode.colors_enabled() {
            eprintln!("{} {}", symbol.red(), message.red());
        } else {
            eprintln!("{} {}", symbol, message);
        }
    }
}
