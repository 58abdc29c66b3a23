//! Badges and text styles.

use owo_colors::{OwoColorize, Style};

/// Badge types for status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Err,
    Info,
}

impl Badge {
    /// Get badge with symbol for display.
    pub fn display(&self, unicode: bool) -> &'static str {
        match (self, unicode) {
            (Self::Ok, true) => "[\u{2713}]",   // [✓]
            (Self::Err, true) => "[\u{2717}]",  // [✗]
            (Self::Info, true) => "[\u{2139}]", // [ℹ]
            (Self::Ok, false) => "[OK]",
            (Self::Err, false) => "[ERR]",
            (Self::Info, false) => "[INFO]",
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Self::Ok => styles::green(),
            Self::Err => styles::red(),
            Self::Info => styles::cyan(),
        }
    }
}

/// Pin marker shown next to the pinned collection.
pub fn pin_marker(unicode: bool) -> &'static str {
    if unicode {
        "\u{2605}" // ★
    } else {
        "*"
    }
}

/// Completion checkbox for an entry.
pub fn checkbox(completed: bool, unicode: bool) -> &'static str {
    match (completed, unicode) {
        (true, true) => "\u{2611}",  // ☑
        (false, true) => "\u{2610}", // ☐
        (true, false) => "[x]",
        (false, false) => "[ ]",
    }
}

/// Apply `style` when color is enabled.
pub fn styled(text: &str, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

pub mod styles {
    use owo_colors::Style;

    pub fn bold() -> Style {
        Style::new().bold()
    }

    pub fn dim() -> Style {
        Style::new().dimmed()
    }

    pub fn green() -> Style {
        Style::new().green()
    }

    pub fn red() -> Style {
        Style::new().red()
    }

    pub fn cyan() -> Style {
        Style::new().cyan()
    }
}
