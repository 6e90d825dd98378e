use beatkeeper::{GameState, Mode, Notification};
use ratatui::{Frame, layout::Rect, text::Line};

pub mod game;
pub mod report;
pub mod start;
pub mod warmup;

pub use game::Game;
pub use report::Report;
pub use start::Start;
pub use warmup::Warmup;

use crate::{config::Settings, player::SimulatedPlayer};

/// Everything a page may look at while rendering
pub struct Context<'a> {
    pub settings: &'a Settings,
    pub player: &'a SimulatedPlayer,
}

macro_rules! make_page_enum {
    ($($t:tt),*) => {
        pub enum Page {
            $(
                $t(Box<$t>),
            )*
        }

        $(
            impl From<$t> for Page {
                fn from(value: $t) -> Page {
                    Page::$t(Box::new(value))
                }
            }
        )*
    };
}

make_page_enum!(Start, Warmup, Game, Report);

impl Page {
    /// The page shown while the engine is in the given mode
    pub fn for_mode(mode: Mode, state: &GameState) -> Self {
        match mode {
            Mode::Start => Start.into(),
            Mode::Warmup => Warmup::new(state).into(),
            Mode::Game => Game::new(state).into(),
            Mode::Result => Report::new(state).into(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, context: &Context) {
        match self {
            Self::Start(page) => page.render(frame, area, context),
            Self::Warmup(page) => page.render(frame, area, context),
            Self::Game(page) => page.render(frame, area, context),
            Self::Report(page) => page.render(frame, area, context),
        }
    }

    pub fn render_top(&self, context: &Context) -> Option<Line<'_>> {
        match self {
            Self::Start(_) => None,
            Self::Warmup(page) => page.render_top(context),
            Self::Game(page) => page.render_top(context),
            Self::Report(page) => page.render_top(context),
        }
    }

    /// Feeds a notification to the page
    pub fn apply(&mut self, notification: &Notification) {
        match self {
            Self::Start(_) => {}
            Self::Warmup(page) => page.apply(notification),
            Self::Game(page) => page.apply(notification),
            Self::Report(page) => page.apply(notification),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_for_mode() {
        let state = GameState::default();
        assert!(matches!(Page::for_mode(Mode::Start, &state), Page::Start(_)));
        assert!(matches!(Page::for_mode(Mode::Warmup, &state), Page::Warmup(_)));
        assert!(matches!(Page::for_mode(Mode::Game, &state), Page::Game(_)));
        assert!(matches!(Page::for_mode(Mode::Result, &state), Page::Report(_)));
    }
}
