use beatkeeper::{
    Bpm, Classification, GameState, MAX_ACCEPTABLE_BPM, MIN_ACCEPTABLE_BPM, Notification,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
};

use super::Context;
use crate::utils::{center, feedback_text, key_name};

/// Page: Warmup
///
/// Counts the calibration taps and shows the live tempo
#[derive(Debug)]
pub struct Warmup {
    count: usize,
    total: usize,
    reading: Option<(Bpm, Classification)>,
    /// Set after an off-target warm-up, holding the average if there was one
    retry: Option<Option<Bpm>>,
}

impl Warmup {
    pub fn new(state: &GameState) -> Self {
        Self {
            count: state.warmup_taps.len(),
            total: state.warmup_taps.capacity().unwrap_or_default(),
            reading: None,
            retry: None,
        }
    }

    pub fn apply(&mut self, notification: &Notification) {
        match notification {
            Notification::WarmupProgress { count, total } => {
                self.count = *count;
                self.total = *total;
                if *count == 1 {
                    self.reading = None;
                }
            }
            Notification::Feedback {
                bpm,
                classification,
                ..
            } => {
                self.reading = Some((*bpm, *classification));
                self.retry = None;
            }
            Notification::WarmupRetry { bpm } => {
                self.count = 0;
                self.retry = Some(*bpm);
            }
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, context: &Context) {
        let theme = &context.settings.theme;
        let area = center(area, Constraint::Percentage(80), Constraint::Length(9));

        let mut lines = vec![
            Line::from(format!(
                "Tap <{}> steadily at {MIN_ACCEPTABLE_BPM}-{MAX_ACCEPTABLE_BPM} BPM",
                key_name(context.settings.tap_key)
            ))
            .centered(),
            Line::default(),
        ];

        match self.reading {
            Some((bpm, classification)) => {
                let color = theme.severity(classification.severity);
                lines.push(
                    Line::from(vec![
                        Span::styled(format!("{bpm} BPM"), Style::new().fg(color).bold()),
                        Span::raw("  "),
                        Span::styled(
                            feedback_text(classification.feedback),
                            Style::new().fg(color),
                        ),
                    ])
                    .centered(),
                );
            }
            None => lines.push(Line::from("Waiting for taps...").italic().centered()),
        }

        if let Some(retry) = self.retry {
            let reason = retry.map_or_else(
                || "Could not find a tempo".to_string(),
                |bpm| format!("Your average was {bpm} BPM"),
            );
            lines.push(Line::default());
            lines.push(
                Line::from(format!("{reason}. Try again!"))
                    .fg(theme.warning)
                    .centered(),
            );
        }

        let [text_area, gauge_area] =
            Layout::vertical([Constraint::Length(6), Constraint::Length(3)]).areas(area);

        frame.render_widget(Paragraph::new(lines), text_area);

        let ratio = if self.total == 0 {
            0.0
        } else {
            (self.count as f64 / self.total as f64).clamp(0.0, 1.0)
        };
        let gauge = Gauge::default()
            .gauge_style(Style::new().fg(theme.accent))
            .label(format!("{}/{}", self.count, self.total))
            .ratio(ratio);
        frame.render_widget(gauge, gauge_area);
    }

    pub fn render_top(&self, _context: &Context) -> Option<Line<'_>> {
        Some(Line::raw("WARM-UP"))
    }
}

#[cfg(test)]
mod tests {
    use beatkeeper::Mode;
    use beatkeeper::tolerance::classify_warmup;

    use super::*;

    #[test]
    fn test_progress_and_retry() {
        let mut page = Warmup::new(&GameState::default());
        assert_eq!(page.count, 0);

        page.apply(&Notification::WarmupProgress { count: 2, total: 8 });
        page.apply(&Notification::Feedback {
            mode: Mode::Warmup,
            bpm: 150,
            classification: classify_warmup(150),
            beat_count: None,
        });
        assert_eq!(page.count, 2);
        assert_eq!(page.reading.map(|(bpm, _)| bpm), Some(150));

        page.apply(&Notification::WarmupRetry { bpm: Some(150) });
        assert_eq!(page.count, 0);
        assert_eq!(page.retry, Some(Some(150)));

        // The next round starts clean
        page.apply(&Notification::WarmupProgress { count: 1, total: 8 });
        assert_eq!(page.reading, None);
        assert_eq!(page.retry, Some(Some(150)));
    }
}
