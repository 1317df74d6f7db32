// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Local notification state kept in step with the backend by polling.
//!
//! Polls replace state wholesale, so a late or failed poll can at worst
//! leave stale data on screen until the next successful one. Read/delete
//! actions update local state first and tell the backend afterwards.

use crate::error::ApiError;
use crate::models::Notification;
use chrono::{NaiveDateTime, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub trait NotificationFeed {
    fn unread_count(&self, user_id: i64) -> Result<u32, ApiError>;
    fn unread(&self, user_id: i64) -> Result<Vec<Notification>, ApiError>;
    fn mark_read(&self, id: i64) -> Result<(), ApiError>;
    fn mark_all_read(&self, user_id: i64) -> Result<(), ApiError>;
    fn delete(&self, id: i64) -> Result<(), ApiError>;
}

#[derive(Debug, Default)]
pub struct NotificationCenter {
    user_id: i64,
    notifications: Vec<Notification>,
    unread_count: u32,
    polls: u64,
    failed_polls: u64,
}

impl NotificationCenter {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            ..Default::default()
        }
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> u32 {
        self.unread_count
    }

    pub fn failed_polls(&self) -> u64 {
        self.failed_polls
    }

    /// Fetch count and list; returns whether state was refreshed.
    pub fn poll(&mut self, feed: &dyn NotificationFeed) -> bool {
        self.polls += 1;
        let fetched = feed
            .unread_count(self.user_id)
            .and_then(|count| feed.unread(self.user_id).map(|list| (count, list)));
        match fetched {
            Ok((count, list)) => {
                debug!(count, listed = list.len(), "notifications polled");
                self.unread_count = count;
                self.notifications = list;
                true
            }
            Err(e) => {
                self.failed_polls += 1;
                warn!(error = %e, "notification poll failed; keeping previous state");
                false
            }
        }
    }

    pub fn mark_read(&mut self, feed: &dyn NotificationFeed, id: i64) -> ActionOutcome {
        let mut applied = false;
        if let Some(n) = self.notifications.iter_mut().find(|n| n.id == id) {
            applied = true;
            if !n.is_read {
                n.is_read = true;
                self.unread_count = self.unread_count.saturating_sub(1);
            }
        }
        let confirmed = match feed.mark_read(id) {
            Ok(()) => true,
            Err(e) => {
                warn!(id, error = %e, "mark as read failed on the server");
                false
            }
        };
        ActionOutcome { applied, confirmed }
    }

    pub fn mark_all_read(&mut self, feed: &dyn NotificationFeed) -> ActionOutcome {
        for n in &mut self.notifications {
            n.is_read = true;
        }
        self.unread_count = 0;
        let confirmed = match feed.mark_all_read(self.user_id) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "mark all as read failed on the server");
                false
            }
        };
        ActionOutcome {
            applied: true,
            confirmed,
        }
    }

    /// Removes locally first; ids missing from the local view are still sent to the server.
    pub fn delete(&mut self, feed: &dyn NotificationFeed, id: i64) -> ActionOutcome {
        let applied = match self.notifications.iter().position(|n| n.id == id) {
            Some(pos) => {
                let removed = self.notifications.remove(pos);
                if !removed.is_read {
                    self.unread_count = self.unread_count.saturating_sub(1);
                }
                true
            }
            None => false,
        };
        let confirmed = match feed.delete(id) {
            Ok(()) => true,
            Err(e) => {
                warn!(id, error = %e, "notification delete failed on the server");
                false
            }
        };
        ActionOutcome { applied, confirmed }
    }
}

/// Result of an optimistic action: whether local state changed, and whether
/// the backend accepted the call. Local state is not rolled back either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionOutcome {
    pub applied: bool,
    pub confirmed: bool,
}

const STOP_CHECK: Duration = Duration::from_millis(100);

/// Runs [`NotificationCenter::poll`] on a fixed interval.
///
/// Polls are strictly sequential, so they never overlap. There is no
/// retry or backoff: a failed tick simply waits for the next one.
pub struct Poller {
    interval: Duration,
    stop: Arc<AtomicBool>,
}

impl Poller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Poll until `max_ticks` is reached (if any) or the stop flag is set.
    /// `on_tick` sees the center after every poll, refreshed or not.
    pub fn run<F>(
        &self,
        center: &mut NotificationCenter,
        feed: &dyn NotificationFeed,
        max_ticks: Option<u64>,
        mut on_tick: F,
    ) -> u64
    where
        F: FnMut(&NotificationCenter, bool),
    {
        let mut ticks = 0u64;
        while !self.stop.load(Ordering::Relaxed) {
            let refreshed = center.poll(feed);
            ticks += 1;
            on_tick(center, refreshed);
            if max_ticks.is_some_and(|m| ticks >= m) {
                break;
            }
            self.wait();
        }
        ticks
    }

    // Sleeps out the interval in slices; returns early once stop is set.
    fn wait(&self) {
        let deadline = Instant::now() + self.interval;
        while !self.stop.load(Ordering::Relaxed) {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            thread::sleep((deadline - now).min(STOP_CHECK));
        }
    }
}

/// "just now", "5m ago", "3h ago", "2d ago"; falls back to the date after a month.
pub fn time_ago(created: NaiveDateTime, now: NaiveDateTime) -> String {
    let secs = (now - created).num_seconds();
    if secs < 60 {
        "just now".to_string()
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3600)
    } else if secs < 30 * 86_400 {
        format!("{}d ago", secs / 86_400)
    } else {
        created.date().to_string()
    }
}

/// Backend-supplied `timeAgo` if present, otherwise derived from `createdAt`.
pub fn display_age(n: &Notification) -> String {
    if let Some(t) = n.time_ago.as_deref().filter(|s| !s.trim().is_empty()) {
        return t.to_string();
    }
    n.created_at
        .map(|c| time_ago(c, Utc::now().naive_utc()))
        .unwrap_or_default()
}
