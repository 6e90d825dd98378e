use beatkeeper::{MAX_BPM, MIN_BPM, STANDARD_BPM};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Context;
use crate::utils::{center, clock_time, key_name};

/// Page: Start
///
/// Shows the chosen track and how to begin
pub struct Start;

impl Start {
    pub fn render(&self, frame: &mut Frame, area: Rect, context: &Context) {
        let accent = context.settings.theme.accent;
        let track = context.player.track();

        let lines = vec![
            Line::from(format!("TAP ALONG AT {STANDARD_BPM} BPM")).bold().centered(),
            Line::default(),
            Line::from(vec![
                Span::raw("Track: "),
                Span::styled(&track.title, Style::new().fg(accent).bold()),
                Span::raw(format!(" ({})", clock_time(track.duration()))),
            ])
            .centered(),
            Line::from(format!("Playback rate: {}x", context.player.rate())).centered(),
            Line::default(),
            Line::from(vec![
                Span::raw("Press "),
                Span::styled("<ENTER>", Style::new().fg(accent).bold()),
                Span::raw(" to warm up, then tap "),
                Span::styled(
                    format!("<{}>", key_name(context.settings.tap_key)),
                    Style::new().fg(accent).bold(),
                ),
                Span::raw(" on every beat"),
            ])
            .centered(),
            Line::from(format!(
                "Keep between {MIN_BPM} and {MAX_BPM} BPM until the song ends"
            ))
            .centered(),
        ];

        let height = lines.len() as u16;
        let body = center(area, Constraint::Percentage(90), Constraint::Length(height));

        frame.render_widget(Paragraph::new(lines), body);
    }
}
