use beatkeeper::Severity;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Colors used to grade the player's tempo
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Theme {
    pub good: Color,
    pub warning: Color,
    pub error: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            good: Color::Rgb(0x4C, 0xAF, 0x50),
            warning: Color::Rgb(0xFF, 0x98, 0x00),
            error: Color::Rgb(0xF4, 0x43, 0x36),
            accent: Color::Cyan,
        }
    }
}

impl Theme {
    pub const fn severity(&self, severity: Severity) -> Color {
        match severity {
            Severity::Ok => self.good,
            Severity::Warning => self.warning,
            Severity::Fatal => self.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_colors() {
        let theme = Theme::default();
        assert_eq!(theme.severity(Severity::Ok), theme.good);
        assert_eq!(theme.severity(Severity::Warning), theme.warning);
        assert_eq!(theme.severity(Severity::Fatal), theme.error);
    }
}
