//! # Notification Module - State Change Events
//!
//! The engine never renders anything. Instead it publishes a fixed set of typed
//! notifications to every subscriber, and a presentation layer turns those into
//! whatever it draws.
//!
//! ```rust
//! use std::sync::mpsc;
//!
//! use beatkeeper::engine::TempoEngine;
//! use beatkeeper::{Mode, Notification};
//!
//! let (sender, receiver) = mpsc::channel();
//! let mut engine = TempoEngine::without_media();
//! engine.subscribe(move |notification: &Notification| {
//!     let _ = sender.send(notification.clone());
//! });
//!
//! engine.start_warmup();
//!
//! let first = receiver.try_recv().unwrap();
//! assert!(matches!(first, Notification::ModeChanged { mode: Mode::Warmup, .. }));
//! ```

use std::fmt;

use crate::engine::{Mode, Outcome};
use crate::summary::Summary;
use crate::tolerance::Classification;
use crate::Bpm;

/// Everything the engine reports to its subscribers
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// The engine entered a new mode
    ModeChanged {
        mode: Mode,
        /// The BPM shown on entering the mode
        bpm: Bpm,
    },

    /// A warm-up tap was accepted
    WarmupProgress { count: usize, total: usize },

    /// A fresh tempo reading after a tap
    Feedback {
        mode: Mode,
        bpm: Bpm,
        classification: Classification,
        /// Taps so far in the game, `None` during warm-up
        beat_count: Option<usize>,
    },

    /// The warm-up average was off target and the warm-up starts over
    ///
    /// `bpm` is `None` if the taps could not produce an average at all.
    WarmupRetry { bpm: Option<Bpm> },

    /// The game ended
    GameOver { outcome: Outcome, summary: Summary },
}

impl Notification {
    /// The mode the engine is in once this notification is published
    pub const fn mode(&self) -> Mode {
        match self {
            Self::ModeChanged { mode, .. } | Self::Feedback { mode, .. } => *mode,
            Self::WarmupProgress { .. } | Self::WarmupRetry { .. } => Mode::Warmup,
            Self::GameOver { .. } => Mode::Result,
        }
    }
}

/// Handle for removing a subscriber again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Notification)>;

/// The set of callbacks notified on every state change
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Subscriber)>,
}

impl Subscribers {
    pub fn subscribe(&mut self, subscriber: Subscriber) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, subscriber));
        id
    }

    /// Returns false if no subscriber has the given id
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn publish(&mut self, notification: &Notification) {
        for (_, subscriber) in &mut self.entries {
            subscriber(notification);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_publish_reaches_every_subscriber() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut subscribers = Subscribers::default();

        for tag in 0..3 {
            let seen = Rc::clone(&seen);
            subscribers.subscribe(Box::new(move |_: &Notification| seen.borrow_mut().push(tag)));
        }

        subscribers.publish(&Notification::WarmupRetry { bpm: None });
        assert_eq!(*seen.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut subscribers = Subscribers::default();

        let counter = Rc::clone(&count);
        let id = subscribers.subscribe(Box::new(move |_: &Notification| *counter.borrow_mut() += 1));
        assert_eq!(subscribers.len(), 1);

        assert!(subscribers.unsubscribe(id));
        assert!(!subscribers.unsubscribe(id));
        assert_eq!(subscribers.len(), 0);

        subscribers.publish(&Notification::WarmupProgress { count: 1, total: 8 });
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut subscribers = Subscribers::default();
        let first = subscribers.subscribe(Box::new(|_: &Notification| {}));
        subscribers.unsubscribe(first);
        let second = subscribers.subscribe(Box::new(|_: &Notification| {}));
        assert_ne!(first, second);
    }

    #[test]
    fn test_mode_of_notification() {
        let notification = Notification::WarmupProgress { count: 2, total: 8 };
        assert_eq!(notification.mode(), Mode::Warmup);

        let notification = Notification::GameOver {
            outcome: Outcome::Success,
            summary: Summary::default(),
        };
        assert_eq!(notification.mode(), Mode::Result);
    }
}
