//! Echo messages to the bottom line of the terminal.
//!
//! A message is visible only for a limited time after being set, after which the
//! message line is drawn empty.

use std::time::{Duration, Instant};

pub struct Echo {
    text: String,
    time: Option<Instant>,
    expiry: Duration,
}

impl Echo {
    /// Creates an empty echo whose messages expire after `expiry`.
    pub fn new(expiry: Duration) -> Echo {
        Echo {
            text: String::new(),
            time: None,
            expiry,
        }
    }

    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.time = Some(Instant::now());
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.time = None;
    }

    /// Returns the current message if it has not yet expired.
    pub fn text(&self) -> Option<&str> {
        self.text_at(Instant::now())
    }

    fn text_at(&self, now: Instant) -> Option<&str> {
        match self.time {
            Some(time) if self.text.len() > 0 && now.duration_since(time) < self.expiry => {
                Some(self.text.as_str())
            }
            _ => None,
        }
    }
}
