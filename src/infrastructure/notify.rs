//! Notifier implementations
//!
//! The engine treats notification as fire-and-forget; this module provides a
//! capturing notifier for assertions and demos. Real delivery channels plug
//! in behind the same trait.

use std::sync::Mutex;

use anyhow::Result;

use crate::domain::ports::{Notification, Notifier};

/// Notifier that records every message it is handed
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything delivered so far, in order
    pub fn sent(&self) -> Vec<Notification> {
        match self.sent.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) -> Result<()> {
        match self.sent.lock() {
            Ok(mut guard) => guard.push(notification.clone()),
            Err(poisoned) => poisoned.into_inner().push(notification.clone()),
        }
        Ok(())
    }
}
