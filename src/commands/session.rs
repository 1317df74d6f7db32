// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::{Session, display_currency, set_display_currency};
use crate::utils::pretty_table;
use anyhow::{Result, bail};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("use", sub)) => {
            let s = session_from(sub);
            s.save(conn)?;
            println!("Now acting as user {} ({})", s.user_id, s.name);
        }
        Some(("show", _)) => match Session::load(conn)? {
            Some(s) => {
                let rows = vec![
                    vec!["User id".into(), s.user_id.to_string()],
                    vec!["Name".into(), s.name],
                    vec!["Email".into(), s.email.unwrap_or_default()],
                    vec!["Currency".into(), display_currency(conn)?],
                ];
                println!("{}", pretty_table(&["Field", "Value"], rows));
            }
            None => println!("No active session"),
        },
        Some(("clear", _)) => {
            if Session::clear(conn)? {
                println!("Session cleared");
            } else {
                println!("No active session");
            }
        }
        Some(("currency", sub)) => {
            let code = sub.get_one::<String>("code").unwrap().trim();
            if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                bail!("Invalid currency code '{}', expected e.g. USD", code);
            }
            set_display_currency(conn, code)?;
            println!("Display currency set to {}", code.to_uppercase());
        }
        _ => {}
    }
    Ok(())
}

pub fn session_from(sub: &clap::ArgMatches) -> Session {
    let user_id = *sub.get_one::<i64>("user-id").unwrap();
    let name = sub
        .get_one::<String>("name")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("user {}", user_id));
    let email = sub
        .get_one::<String>("email")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    Session {
        user_id,
        name,
        email,
    }
}
