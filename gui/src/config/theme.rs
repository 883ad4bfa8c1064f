// Theme colors for the window chrome and the signal table.
use shared::models::Signal;

#[derive(Debug, Clone, PartialEq)]
pub struct ThemePalette {
    pub background: String,
    pub foreground: String,
    pub border: String,
    pub buy: String,
    pub sell: String,
    pub neutral: String,
    pub error: String,
}

impl ThemePalette {
    pub fn default_dark() -> Self {
        Self {
            background: "#1e1e1e".to_string(),
            foreground: "#d1d4dc".to_string(),
            border: "#565656".to_string(),
            buy: "#26a69a".to_string(),
            sell: "#ef5350".to_string(),
            neutral: "#9e9e9e".to_string(),
            error: "#ff6b6b".to_string(),
        }
    }

    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            foreground: "#000000".to_string(),
            border: "#e0e0e0".to_string(),
            buy: "#4caf50".to_string(),
            sell: "#f44336".to_string(),
            neutral: "#757575".to_string(),
            error: "#c62828".to_string(),
        }
    }

    /// Unknown names fall back to the light palette.
    pub fn by_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("dark") {
            Self::default_dark()
        } else {
            Self::default_light()
        }
    }

    pub fn signal_color(&self, signal: Signal) -> &str {
        match signal {
            Signal::Buy => &self.buy,
            Signal::Sell => &self.sell,
            Signal::Neutral => &self.neutral,
        }
    }
}
