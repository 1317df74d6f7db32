// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Ctx;
use crate::models::{NewReport, Report};
use crate::reports::{self, HttpObjectStore, ObjectStore, ReportBackend, ReportList};
use crate::utils::{maybe_print_json, parse_id, pretty_table};
use anyhow::{Context, Result, anyhow};
use std::path::Path;

pub fn handle(ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    let session = ctx.session()?;
    let api = ctx.api.reports();
    match m.subcommand() {
        Some(("list", sub)) => {
            let list = ReportList::fetch(&api, session.user_id).context("Fetch reports")?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &list.reports())? {
                println!(
                    "{}",
                    pretty_table(&["Id", "Name", "Type", "Format", "Created"], report_rows(list.reports()))
                );
            }
        }
        Some(("open", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let list = ReportList::fetch(&api, session.user_id).context("Fetch reports")?;
            let r = list
                .find(id)
                .ok_or_else(|| anyhow!("Report {} not found", id))?;
            println!("{}", r.url);
        }
        Some(("rm", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            let mut list = ReportList::fetch(&api, session.user_id).context("Fetch reports")?;
            match list.delete(&api, id)? {
                Some(r) => println!("Deleted report {} '{}' ({} left)", id, r.name, list.reports().len()),
                None => println!("Deleted report {}", id),
            }
        }
        Some(("upload", sub)) => upload(ctx, &api, session.user_id, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn report_rows(list: &[Report]) -> Vec<Vec<String>> {
    list.iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.name.clone(),
                r.report_type.clone().unwrap_or_default(),
                r.format.clone().unwrap_or_default(),
                r.created_at
                    .map(|c| c.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default(),
            ]
        })
        .collect()
}

fn upload(ctx: &Ctx, backend: &dyn ReportBackend, user_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let path = Path::new(sub.get_one::<String>("file").unwrap());
    let filename = path
        .file_name()
        .and_then(|f| f.to_str())
        .ok_or_else(|| anyhow!("Invalid report path {}", path.display()))?
        .to_string();
    let bytes = std::fs::read(path).with_context(|| format!("Read {}", path.display()))?;
    let store = match ctx.config.storage.bucket_url.as_deref() {
        Some(url) => Some(HttpObjectStore::new(url, ctx.config.api.timeout_secs)?),
        None => None,
    };
    let outcome = reports::upload(
        store.as_ref().map(|s| s as &dyn ObjectStore),
        user_id,
        &filename,
        bytes,
        reports::content_type_for(&filename),
    )?;
    let req = new_report(sub, user_id, &filename, &outcome.url);
    let created = backend.register(&req).context("Register report")?;
    println!("Uploaded report {} '{}' -> {}", created.id, created.name, outcome.url);
    if outcome.mocked {
        println!("(no object store configured; the URL is a placeholder)");
    }
    Ok(())
}

pub fn new_report(sub: &clap::ArgMatches, user_id: i64, filename: &str, url: &str) -> NewReport {
    let (stem, ext) = filename.rsplit_once('.').unwrap_or((filename, ""));
    NewReport {
        user_id,
        name: sub
            .get_one::<String>("name")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| stem.to_string()),
        report_type: sub
            .get_one::<String>("type")
            .cloned()
            .unwrap_or_else(|| "monthly-summary".to_string()),
        format: if ext.is_empty() { "bin".to_string() } else { ext.to_ascii_lowercase() },
        url: url.to_string(),
    }
}
