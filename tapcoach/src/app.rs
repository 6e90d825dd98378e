use std::io;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use beatkeeper::clock::{Clock, MonotonicClock};
use beatkeeper::{Millis, Notification, TempoEngine};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{DefaultTerminal, Frame, style::Stylize, text::ToLine, widgets::Padding};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::page::{Context, Page};
use crate::player::SimulatedPlayer;
use crate::utils::{KeyEventHelper, ROUNDED_BLOCK};

/// How long to wait for input before drawing the next frame
const FRAME_TIME: Duration = Duration::from_millis(16);

/// An app message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// The tap key was pressed at the given time
    Tap(Millis),
    /// Begin (or restart) the warm-up
    StartWarmup,
    /// Back to the start page
    Reset,
    /// Quit the application
    Quit,
}

/// The app itself
pub struct App {
    engine: TempoEngine<SimulatedPlayer>,
    clock: MonotonicClock,
    settings: Settings,
    notifications: Receiver<Notification>,
    page: Page,
}

impl App {
    /// Creates a new `App`
    pub fn new(settings: Settings, player: SimulatedPlayer) -> Self {
        let (sender, notifications) = mpsc::channel();

        let mut engine = TempoEngine::new(player);
        engine.subscribe(move |notification: &Notification| {
            // The receiver lives as long as the app, so a failed send only happens on shutdown
            let _ = sender.send(notification.clone());
        });
        engine.init();

        let page = Page::for_mode(engine.state().mode, engine.state());

        Self {
            engine,
            clock: MonotonicClock::new(),
            settings,
            notifications,
            page,
        }
    }

    /// Runs the app
    pub fn run(&mut self) -> io::Result<()> {
        let mut terminal = ratatui::init();
        let result = self.event_loop(&mut terminal);
        ratatui::restore();
        result
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        loop {
            let event = event::poll(FRAME_TIME)?.then(event::read).transpose()?;
            if let Some(message) = event.and_then(|event| self.handle_events(&event)) {
                if message == Message::Quit {
                    break;
                }
                self.handle_message(message);
            }

            if self.engine.media_mut().poll_ended() {
                self.engine.on_media_ended();
            }

            self.drain_notifications();
            terminal.draw(|frame| self.draw(frame))?;
        }

        info!("Quitting");
        Ok(())
    }

    /// Forwards a message to the engine
    fn handle_message(&mut self, message: Message) {
        match message {
            Message::Tap(timestamp) => {
                let response = self.engine.on_tap(timestamp);
                debug!(timestamp, ?response, "Tap");
            }
            Message::StartWarmup => {
                self.engine.start_warmup();
            }
            Message::Reset => self.engine.reset_game(),
            Message::Quit => {}
        }
    }

    /// Hands everything the engine published since the last frame to the page
    fn drain_notifications(&mut self) {
        while let Ok(notification) = self.notifications.try_recv() {
            match &notification {
                Notification::ModeChanged { mode, bpm } => {
                    info!(%mode, bpm, "Mode changed");
                    self.page = Page::for_mode(*mode, self.engine.state());
                    continue;
                }
                Notification::WarmupRetry { bpm } => {
                    warn!(?bpm, "Warm-up off target, retrying");
                }
                Notification::GameOver { outcome, summary } => {
                    info!(%outcome, ?summary, "Game over");
                }
                _ => {}
            }
            self.page.apply(&notification);
        }
    }

    /// Draws the next frame
    fn draw(&self, frame: &mut Frame) {
        let context = Context {
            settings: &self.settings,
            player: self.engine.media(),
        };

        let mut block = ROUNDED_BLOCK
            .padding(Padding::new(1, 1, 0, 0))
            .title_top("TAPCOACH".to_line().bold().centered())
            .title_top("<CTRL-Q> to exit".to_line().right_aligned());

        if let Some(top_msg) = self.page.render_top(&context) {
            block = block.title_top(top_msg);
        }

        let area = frame.area();
        let content = block.inner(area);

        frame.render_widget(block, area);

        self.page.render(frame, content, &context);
    }

    /// Global event handler
    fn handle_events(&self, event: &Event) -> Option<Message> {
        match event {
            Event::Key(key) => self.handle_key_event(key),
            _ => None,
        }
    }

    /// Global key events
    fn handle_key_event(&self, key: &KeyEvent) -> Option<Message> {
        if !key.is_press() {
            return None;
        }

        if key.is_ctrl_press_char('q') {
            return Some(Message::Quit);
        }

        if key.is_char(self.settings.tap_key) {
            return Some(Message::Tap(self.clock.now()));
        }

        match key.code {
            KeyCode::Enter => Some(Message::StartWarmup),
            KeyCode::Esc | KeyCode::Char('r') => Some(Message::Reset),
            _ => None,
        }
    }
}
