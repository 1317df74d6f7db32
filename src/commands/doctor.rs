// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Ctx;
use crate::session::Session;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(ctx: &Ctx) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Session
    if Session::load(ctx.conn)?.is_none() {
        rows.push(vec!["no_session".into(), "run `finboard session use --user-id <ID>`".into()]);
    }

    // 2) Backend reachability
    match ctx.api.ping() {
        Ok(status) if status >= 500 => rows.push(vec![
            "backend_error".into(),
            format!("{} answered HTTP {}", ctx.api.base_url(), status),
        ]),
        Ok(_) => {}
        Err(e) => rows.push(vec!["backend_unreachable".into(), e.to_string()]),
    }

    // 3) Report storage
    if ctx.config.storage.bucket_url.is_none() {
        rows.push(vec![
            "storage_unconfigured".into(),
            "report uploads will get mock URLs".into(),
        ]);
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
