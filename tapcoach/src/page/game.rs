use beatkeeper::tolerance::{classify, gauge_ratio};
use beatkeeper::{Bpm, Classification, GameState, MAX_BPM, MIN_BPM, Notification};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Gauge, LineGauge, Paragraph},
};

use super::Context;
use crate::utils::{center, clock_time, feedback_text};

/// Page: Game
///
/// Live tempo readout while the backing track plays
#[derive(Debug)]
pub struct Game {
    bpm: Bpm,
    classification: Classification,
    beat_count: usize,
}

impl Game {
    pub fn new(state: &GameState) -> Self {
        Self {
            bpm: state.current_bpm,
            classification: classify(state.current_bpm),
            beat_count: state.beat_count,
        }
    }

    pub fn apply(&mut self, notification: &Notification) {
        if let Notification::Feedback {
            bpm,
            classification,
            beat_count,
            ..
        } = notification
        {
            self.bpm = *bpm;
            self.classification = *classification;
            if let Some(count) = beat_count {
                self.beat_count = *count;
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, context: &Context) {
        let theme = &context.settings.theme;
        let color = theme.severity(self.classification.severity);
        let area = center(area, Constraint::Percentage(80), Constraint::Length(8));

        let [reading_area, tempo_area, _, track_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .areas(area);

        let reading = Paragraph::new(vec![
            Line::from(vec![
                Span::styled(self.bpm.to_string(), Style::new().fg(color).bold()),
                Span::raw(" BPM"),
            ])
            .centered(),
            Line::styled(
                feedback_text(self.classification.feedback),
                Style::new().fg(color),
            )
            .centered(),
            Line::from(format!("Beats: {}", self.beat_count)).centered(),
        ]);
        frame.render_widget(reading, reading_area);

        let tempo = LineGauge::default()
            .filled_style(Style::new().fg(color))
            .unfilled_style(Style::new().fg(Color::DarkGray))
            .label(format!("{MIN_BPM}-{MAX_BPM}"))
            .ratio(gauge_ratio(self.bpm));
        frame.render_widget(tempo, tempo_area);

        let player = context.player;
        let track = Gauge::default()
            .gauge_style(Style::new().fg(theme.accent))
            .label(format!(
                "{}  {} / {}",
                player.track().title,
                clock_time(player.position()),
                clock_time(player.track().duration())
            ))
            .use_unicode(true)
            .ratio(player.progress());
        frame.render_widget(track, track_area);
    }

    pub fn render_top(&self, _context: &Context) -> Option<Line<'_>> {
        Some(Line::raw("PLAYING"))
    }
}
