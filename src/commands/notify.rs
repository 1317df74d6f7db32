// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Ctx;
use crate::models::Notification;
use crate::notifications::{ActionOutcome, NotificationCenter, NotificationFeed, Poller, display_age};
use crate::utils::{maybe_print_json, parse_id, pretty_table};
use anyhow::{Context, Result};
use std::time::Duration;

pub fn handle(ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    let session = ctx.session()?;
    let api = ctx.api.notifications();
    match m.subcommand() {
        Some(("list", sub)) => {
            let list = if sub.get_flag("all") {
                api.all(session.user_id)
            } else {
                api.unread(session.user_id)
            }
            .context("Fetch notifications")?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &list)? {
                println!(
                    "{}",
                    pretty_table(
                        &["Id", "", "Title", "Message", "Priority", "When"],
                        notification_rows(&list)
                    )
                );
            }
        }
        Some(("read", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let mut center = NotificationCenter::new(session.user_id);
            center.poll(&api);
            let outcome = center.mark_read(&api, id);
            println!("Marked notification {} as read ({} unread)", id, center.unread_count());
            warn_unconfirmed(outcome);
        }
        Some(("read-all", _)) => {
            let mut center = NotificationCenter::new(session.user_id);
            center.poll(&api);
            let outcome = center.mark_all_read(&api);
            println!("All notifications marked as read");
            warn_unconfirmed(outcome);
        }
        Some(("rm", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let mut center = NotificationCenter::new(session.user_id);
            center.poll(&api);
            let outcome = center.delete(&api, id);
            println!("Deleted notification {} ({} unread)", id, center.unread_count());
            warn_unconfirmed(outcome);
        }
        Some(("watch", sub)) => {
            let secs = sub
                .get_one::<u64>("interval")
                .copied()
                .unwrap_or(ctx.config.notifications.poll_interval_secs)
                .max(1);
            let count = sub.get_one::<u64>("count").copied();
            let mut center = NotificationCenter::new(session.user_id);
            let poller = Poller::new(Duration::from_secs(secs));
            let mut last_seen: Option<u32> = None;
            poller.run(&mut center, &api, count, |c, refreshed| {
                if !refreshed {
                    eprintln!("poll failed; showing last known state");
                    return;
                }
                if last_seen != Some(c.unread_count()) {
                    println!("{} unread", c.unread_count());
                    for n in c.notifications() {
                        println!("  [{}] {} - {}", n.id, n.title, n.message);
                    }
                    last_seen = Some(c.unread_count());
                }
            });
        }
        _ => {}
    }
    Ok(())
}

fn warn_unconfirmed(outcome: ActionOutcome) {
    if !outcome.confirmed {
        eprintln!("note: not confirmed by the server; the next refresh will show its state");
    }
}

pub fn notification_rows(list: &[Notification]) -> Vec<Vec<String>> {
    list.iter()
        .map(|n| {
            vec![
                n.id.to_string(),
                if n.is_read { " " } else { "●" }.to_string(),
                n.title.clone(),
                n.message.clone(),
                n.priority.clone().unwrap_or_default(),
                display_age(n),
            ]
        })
        .collect()
}
