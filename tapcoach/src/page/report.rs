use std::time::Duration;

use beatkeeper::{GameState, Notification, Outcome, Summary};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::Paragraph,
};

use super::Context;
use crate::utils::{center, clock_time};

/// Page: Report
///
/// How the game went
#[derive(Debug)]
pub struct Report {
    outcome: Option<Outcome>,
    summary: Option<Summary>,
}

impl Report {
    pub const fn new(state: &GameState) -> Self {
        Self {
            outcome: state.outcome,
            summary: state.summary,
        }
    }

    pub fn apply(&mut self, notification: &Notification) {
        if let Notification::GameOver { outcome, summary } = notification {
            self.outcome = Some(*outcome);
            self.summary = Some(*summary);
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, context: &Context) {
        let theme = &context.settings.theme;

        let mut lines = vec![match self.outcome {
            Some(Outcome::Success) => Line::styled(
                "You kept the beat until the end!",
                Style::new().fg(theme.good).bold(),
            ),
            Some(Outcome::Failure) => {
                Line::styled("You lost the beat!", Style::new().fg(theme.error).bold())
            }
            None => Line::raw("Game over"),
        }
        .centered()];
        lines.push(Line::default());

        match self.summary {
            Some(summary) if summary.has_tempo() => {
                lines.extend([
                    Line::from(format!("Average: {} BPM", summary.average_bpm)),
                    Line::from(format!(
                        "Range: {} - {} BPM",
                        summary.min_bpm, summary.max_bpm
                    )),
                    Line::from(format!("Taps: {}", summary.total_taps)),
                    Line::from(format!(
                        "Time: {}",
                        clock_time(Duration::from_millis(
                            u64::try_from(summary.duration_ms).unwrap_or_default()
                        ))
                    )),
                    Line::from(format!("Consistency: {:.1}%", summary.consistency)),
                ]);
            }
            Some(summary) => {
                lines.push(Line::from(format!(
                    "Taps: {} (not enough for a tempo)",
                    summary.total_taps
                )));
            }
            None => {}
        }

        lines.push(Line::default());
        lines.push(Line::from("Press <R> to play again").fg(theme.accent));

        let lines: Vec<Line> = lines.into_iter().map(Line::centered).collect();
        let height = lines.len() as u16;
        let area = center(area, Constraint::Percentage(80), Constraint::Length(height));
        frame.render_widget(Paragraph::new(lines), area);
    }

    pub fn render_top(&self, _context: &Context) -> Option<Line<'_>> {
        Some(Line::raw("RESULT"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_over_fills_report() {
        let mut page = Report::new(&GameState::default());
        assert_eq!(page.outcome, None);

        let summary = Summary {
            average_bpm: 100,
            min_bpm: 98,
            max_bpm: 102,
            total_taps: 12,
            duration_ms: 6600,
            consistency: 97.5,
        };
        page.apply(&Notification::GameOver {
            outcome: Outcome::Success,
            summary,
        });
        assert_eq!(page.outcome, Some(Outcome::Success));
        assert_eq!(page.summary, Some(summary));
    }
}
