// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Ctx;
use super::transactions::{TransactionRow, filter_from, rows_for};
use anyhow::{Context, Result, bail};
use serde_json::json;

pub fn handle(ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(ctx, sub),
        _ => Ok(()),
    }
}

fn export_transactions(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    check_format(&fmt)?;

    let session = ctx.session()?;
    let categories = ctx
        .api
        .categories()
        .list(session.user_id)
        .context("Fetch categories")?;
    let filter = filter_from(sub, &categories)?;
    let txs = ctx
        .api
        .transactions()
        .list(session.user_id, &filter)
        .context("Fetch transactions")?;
    let mut rows = rows_for(txs, &categories, None);
    // Exports read oldest first.
    rows.reverse();
    write_rows(&rows, &fmt, out)?;
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}

fn check_format(fmt: &str) -> Result<()> {
    match fmt {
        "csv" | "json" => Ok(()),
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
}

pub fn write_rows(rows: &[TransactionRow], fmt: &str, out: &str) -> Result<()> {
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
            wtr.write_record(["id", "date", "type", "category", "amount", "description", "tags"])?;
            for r in rows {
                wtr.write_record([
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.description.clone(),
                    r.tags.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = rows
                .iter()
                .map(|r| {
                    json!({
                        "id": r.id, "date": r.date, "type": r.kind, "category": r.category,
                        "amount": r.amount, "description": r.description,
                        "tags": r.tags.split(',').filter(|t| !t.is_empty()).collect::<Vec<_>>()
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Write {}", out))?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    Ok(())
}
