// Terminal styling for reporter and listing output

use console::Style;

/// Roles a piece of output can play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colour {
    Passed,
    Failed,
    Skipped,
    Headers,
    /// De-emphasised text such as hidden tests and locations
    Secondary,
}

impl Colour {
    fn style(self) -> Style {
        match self {
            Colour::Passed => Style::new().green(),
            Colour::Failed => Style::new().red().bold(),
            Colour::Skipped => Style::new().yellow(),
            Colour::Headers => Style::new().cyan().bold(),
            Colour::Secondary => Style::new().dim(),
        }
    }
}

/// Wraps text in styles. Never changes the text itself, only what surrounds it.
#[derive(Debug, Clone, Copy)]
pub struct Colorizer {
    enabled: bool,
}

impl Colorizer {
    /// Styling is applied only when `enabled` and the terminal supports it
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn paint(&self, text: &str, colour: Colour) -> String {
        if !self.enabled {
            return text.to_string();
        }
        colour.style().apply_to(text).to_string()
    }
}

impl Default for Colorizer {
    fn default() -> Self {
        Self::plain()
    }
}
