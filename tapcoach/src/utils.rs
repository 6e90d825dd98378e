use std::time::Duration;

use beatkeeper::FeedbackLevel;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block, BorderType},
};

/// A block with a rounded border
pub const ROUNDED_BLOCK: Block = Block::bordered().border_type(BorderType::Rounded);

pub fn center(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [area_horizontal] = Layout::horizontal([horizontal])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([vertical])
        .flex(Flex::Center)
        .areas(area_horizontal);
    area
}

/// The hint shown to the player for a feedback level
pub const fn feedback_text(feedback: FeedbackLevel) -> &'static str {
    match feedback {
        FeedbackLevel::Slow => "Speed up!",
        FeedbackLevel::Good => "Good tempo!",
        FeedbackLevel::Fast => "Slow down!",
    }
}

/// Formats a duration as `m:ss`
pub fn clock_time(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Human readable name of a key
pub fn key_name(key: char) -> String {
    match key {
        ' ' => "SPACE".to_string(),
        other => other.to_uppercase().to_string(),
    }
}

/// Helper methods for keyevents
pub trait KeyEventHelper {
    /// Returns true if the keyevent contains a pressed key
    fn is_press(&self) -> bool;

    /// Returns true if the keyevent contains the given modifiers
    fn has_mods(&self, mods: KeyModifiers) -> bool;

    /// Returns true if the keyevent contains a character that matches the input
    fn is_char(&self, character: char) -> bool;

    /// Returns true if the keyevent matches the given character, and is being pressed
    fn is_press_char(&self, character: char) -> bool {
        self.is_press() && self.is_char(character)
    }

    /// Returns true if the keyevent matches the given character, and is being pressed with CTRL
    fn is_ctrl_press_char(&self, character: char) -> bool {
        self.has_mods(KeyModifiers::CONTROL) && self.is_press_char(character)
    }
}

impl KeyEventHelper for KeyEvent {
    fn is_press(&self) -> bool {
        self.kind == KeyEventKind::Press
    }

    fn is_char(&self, character: char) -> bool {
        self.code == KeyCode::Char(character)
    }

    fn has_mods(&self, mods: KeyModifiers) -> bool {
        self.modifiers.contains(mods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_text() {
        assert_eq!(feedback_text(FeedbackLevel::Slow), "Speed up!");
        assert_eq!(feedback_text(FeedbackLevel::Good), "Good tempo!");
        assert_eq!(feedback_text(FeedbackLevel::Fast), "Slow down!");
    }

    #[test]
    fn test_clock_time() {
        assert_eq!(clock_time(Duration::ZERO), "0:00");
        assert_eq!(clock_time(Duration::from_secs(70)), "1:10");
        assert_eq!(clock_time(Duration::from_millis(301_900)), "5:01");
    }

    #[test]
    fn test_key_name() {
        assert_eq!(key_name(' '), "SPACE");
        assert_eq!(key_name('j'), "J");
    }

    #[test]
    fn test_key_helpers() {
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(key.is_ctrl_press_char('q'));
        assert!(!key.is_ctrl_press_char('r'));

        let plain = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(plain.is_press_char('q'));
        assert!(!plain.is_ctrl_press_char('q'));
    }
}
