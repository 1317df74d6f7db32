// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finboard::error::ApiError;
use finboard::models::Notification;
use finboard::notifications::{
    ActionOutcome, NotificationCenter, NotificationFeed, Poller, time_ago,
};
use std::cell::{Cell, RefCell};
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

#[derive(Default)]
struct FakeFeed {
    items: RefCell<Vec<Notification>>,
    fail: Cell<bool>,
    calls: RefCell<Vec<String>>,
}

impl FakeFeed {
    fn with(items: Vec<Notification>) -> Self {
        Self {
            items: RefCell::new(items),
            ..Default::default()
        }
    }

    fn check(&self) -> Result<(), ApiError> {
        if self.fail.get() {
            return Err(ApiError::from_status(503, "down"));
        }
        Ok(())
    }
}

impl NotificationFeed for FakeFeed {
    fn unread_count(&self, _user_id: i64) -> Result<u32, ApiError> {
        self.check()?;
        Ok(self.items.borrow().iter().filter(|n| !n.is_read).count() as u32)
    }

    fn unread(&self, _user_id: i64) -> Result<Vec<Notification>, ApiError> {
        self.check()?;
        Ok(self.items.borrow().iter().filter(|n| !n.is_read).cloned().collect())
    }

    fn mark_read(&self, id: i64) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(format!("read {}", id));
        self.check()
    }

    fn mark_all_read(&self, user_id: i64) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(format!("read-all {}", user_id));
        self.check()
    }

    fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(format!("delete {}", id));
        self.check()
    }
}

fn note(id: i64, read: bool) -> Notification {
    Notification {
        id,
        title: format!("n{}", id),
        message: "budget alert".into(),
        kind: Some("budget".into()),
        priority: Some("high".into()),
        is_read: read,
        time_ago: None,
        created_at: None,
    }
}

#[test]
fn poll_replaces_state() {
    let feed = FakeFeed::with(vec![note(1, false), note(2, false), note(3, true)]);
    let mut c = NotificationCenter::new(7);
    assert!(c.poll(&feed));
    assert_eq!(c.unread_count(), 2);
    assert_eq!(c.notifications().len(), 2);

    feed.items.borrow_mut().push(note(4, false));
    assert!(c.poll(&feed));
    assert_eq!(c.unread_count(), 3);
}

#[test]
fn failed_poll_keeps_stale_state() {
    let feed = FakeFeed::with(vec![note(1, false)]);
    let mut c = NotificationCenter::new(7);
    c.poll(&feed);
    feed.fail.set(true);
    assert!(!c.poll(&feed));
    assert_eq!(c.unread_count(), 1);
    assert_eq!(c.notifications()[0].id, 1);
    assert_eq!(c.failed_polls(), 1);
}

#[test]
fn mark_all_read_zeroes_everything() {
    let feed = FakeFeed::with(vec![note(1, false), note(2, false)]);
    let mut c = NotificationCenter::new(7);
    c.poll(&feed);
    c.mark_all_read(&feed);
    assert_eq!(c.unread_count(), 0);
    assert!(c.notifications().iter().all(|n| n.is_read));
    assert_eq!(feed.calls.borrow().as_slice(), ["read-all 7"]);
}

#[test]
fn mark_all_read_is_optimistic_even_when_server_fails() {
    let feed = FakeFeed::with(vec![note(1, false)]);
    let mut c = NotificationCenter::new(7);
    c.poll(&feed);
    feed.fail.set(true);
    let outcome = c.mark_all_read(&feed);
    assert!(!outcome.confirmed);
    assert_eq!(c.unread_count(), 0);
    assert!(c.notifications().iter().all(|n| n.is_read));
}

#[test]
fn mark_read_decrements_once() {
    let feed = FakeFeed::with(vec![note(1, false), note(2, false)]);
    let mut c = NotificationCenter::new(7);
    c.poll(&feed);
    c.mark_read(&feed, 1);
    c.mark_read(&feed, 1);
    assert_eq!(c.unread_count(), 1);
    // unknown id: no local change, server still told
    c.mark_read(&feed, 99);
    assert_eq!(c.unread_count(), 1);
    assert_eq!(feed.calls.borrow().len(), 3);
}

#[test]
fn delete_removes_only_that_notification() {
    let feed = FakeFeed::with(vec![note(1, false), note(2, false), note(3, false)]);
    let mut c = NotificationCenter::new(7);
    c.poll(&feed);
    assert_eq!(
        c.delete(&feed, 2),
        ActionOutcome {
            applied: true,
            confirmed: true
        }
    );
    let ids: Vec<i64> = c.notifications().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(c.unread_count(), 2);
    assert!(!c.delete(&feed, 2).applied);
}

#[test]
fn server_rejection_is_reported_but_not_rolled_back() {
    let feed = FakeFeed::with(vec![note(1, false), note(2, false)]);
    let mut c = NotificationCenter::new(7);
    c.poll(&feed);
    feed.fail.set(true);

    let read = c.mark_read(&feed, 1);
    assert_eq!(
        read,
        ActionOutcome {
            applied: true,
            confirmed: false
        }
    );
    assert_eq!(c.unread_count(), 1);

    let gone = c.delete(&feed, 2);
    assert!(gone.applied && !gone.confirmed);
    assert_eq!(c.unread_count(), 0);
    assert_eq!(c.notifications().len(), 1);
}

#[test]
fn poller_stops_after_count() {
    let feed = FakeFeed::with(vec![note(1, false)]);
    let mut c = NotificationCenter::new(7);
    let poller = Poller::new(Duration::from_millis(1));
    let mut seen = Vec::new();
    let ticks = poller.run(&mut c, &feed, Some(3), |c, ok| seen.push((c.unread_count(), ok)));
    assert_eq!(ticks, 3);
    assert_eq!(seen, vec![(1, true), (1, true), (1, true)]);
}

#[test]
fn poller_honours_stop_flag() {
    let feed = FakeFeed::with(vec![]);
    let mut c = NotificationCenter::new(7);
    let poller = Poller::new(Duration::from_millis(1));
    let stop = poller.stop_handle();
    let ticks = poller.run(&mut c, &feed, None, |_, _| {
        stop.store(true, Ordering::Relaxed)
    });
    assert_eq!(ticks, 1);
}

#[test]
fn stop_interrupts_a_long_interval() {
    let feed = FakeFeed::with(vec![note(1, false)]);
    let mut c = NotificationCenter::new(7);
    let poller = Poller::new(Duration::from_secs(60));
    let stop = poller.stop_handle();
    let stopper = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(50));
        stop.store(true, Ordering::Relaxed);
    });
    let started = Instant::now();
    let ticks = poller.run(&mut c, &feed, None, |_, _| {});
    stopper.join().unwrap();
    assert_eq!(ticks, 1);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn relative_ages() {
    let base = NaiveDate::from_ymd_opt(2025, 3, 10)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let at = |secs: i64| base + chrono::Duration::seconds(secs);
    assert_eq!(time_ago(base, at(30)), "just now");
    assert_eq!(time_ago(base, at(5 * 60)), "5m ago");
    assert_eq!(time_ago(base, at(3 * 3600)), "3h ago");
    assert_eq!(time_ago(base, at(2 * 86_400)), "2d ago");
    assert_eq!(time_ago(base, at(40 * 86_400)), "2025-03-10");
}
