// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{delete_settings, get_setting, set_setting};
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use serde::Serialize;

const PREFIX: &str = "session.";

/// The user every backend call is made on behalf of.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub user_id: i64,
    pub name: String,
    pub email: Option<String>,
}

impl Session {
    pub fn load(conn: &Connection) -> Result<Option<Session>> {
        let Some(raw_id) = get_setting(conn, "session.user_id")? else {
            return Ok(None);
        };
        let user_id = raw_id
            .parse::<i64>()
            .with_context(|| format!("Corrupt session user id '{}'", raw_id))?;
        let name = get_setting(conn, "session.name")?.unwrap_or_default();
        let email = get_setting(conn, "session.email")?;
        Ok(Some(Session {
            user_id,
            name,
            email,
        }))
    }

    pub fn require(conn: &Connection) -> Result<Session> {
        Session::load(conn)?
            .ok_or_else(|| anyhow!("No active session; run `finboard session use --user-id <ID>`"))
    }

    pub fn save(&self, conn: &Connection) -> Result<()> {
        // Replace, not merge: a stale email must not survive a user switch.
        delete_settings(conn, PREFIX)?;
        set_setting(conn, "session.user_id", &self.user_id.to_string())?;
        set_setting(conn, "session.name", &self.name)?;
        if let Some(e) = &self.email {
            set_setting(conn, "session.email", e)?;
        }
        Ok(())
    }

    pub fn clear(conn: &Connection) -> Result<bool> {
        Ok(delete_settings(conn, PREFIX)? > 0)
    }
}

pub fn display_currency(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, "display_currency")?.unwrap_or_else(|| "USD".to_string()))
}

pub fn set_display_currency(conn: &Connection, ccy: &str) -> Result<()> {
    set_setting(conn, "display_currency", &ccy.trim().to_uppercase())
}
