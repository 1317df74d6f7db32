// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod categories;
pub mod config;
pub mod dashboard;
pub mod doctor;
pub mod exporter;
pub mod goals;
pub mod notify;
pub mod reports;
pub mod session;
pub mod transactions;

use crate::api::ApiClient;
use crate::config::Config;
use crate::session::{Session, display_currency};
use anyhow::Result;
use rusqlite::Connection;

/// What every backend-facing command needs.
pub struct Ctx<'a> {
    pub conn: &'a Connection,
    pub config: &'a Config,
    pub api: &'a ApiClient,
}

impl Ctx<'_> {
    pub fn session(&self) -> Result<Session> {
        Session::require(self.conn)
    }

    pub fn currency(&self) -> Result<String> {
        display_currency(self.conn)
    }
}
