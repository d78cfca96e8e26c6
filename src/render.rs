//! Terminal presentation shared by the binaries.

use crossterm::style::Stylize;
use crossterm::tty::IsTty;

/// Decides whether text gets ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    color: bool,
}

impl Palette {
    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn colored() -> Self {
        Self { color: true }
    }

    /// Colors unless disabled by flag, by a non-empty `NO_COLOR`, or because
    /// stdout is not a terminal.
    pub fn detect(no_color_flag: bool) -> Self {
        let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self {
            color: !no_color_flag && !no_color_env && std::io::stdout().is_tty(),
        }
    }

    pub fn is_colored(&self) -> bool {
        self.color
    }

    /// Regular bot output.
    pub fn success(&self, text: &str) -> String {
        self.paint(text, |t| t.yellow().to_string())
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(text, |t| t.red().to_string())
    }

    /// Left column of a listing.
    pub fn key(&self, text: &str) -> String {
        self.paint(text, |t| t.yellow().to_string())
    }

    /// Right column of a listing.
    pub fn value(&self, text: &str) -> String {
        self.paint(text, |t| t.green().to_string())
    }

    pub fn directory(&self, text: &str) -> String {
        self.paint(text, |t| t.green().to_string())
    }

    pub fn file(&self, text: &str) -> String {
        self.paint(text, |t| t.red().to_string())
    }

    fn paint(&self, text: &str, style: impl FnOnce(&str) -> String) -> String {
        if self.color {
            style(text)
        } else {
            text.to_string()
        }
    }
}
