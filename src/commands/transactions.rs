// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Ctx;
use crate::api::categories::find_by_name;
use crate::api::transactions::TransactionFilter;
use crate::budget_view::ImpactView;
use crate::models::{Category, FlowType, NewTransaction, Transaction};
use crate::utils::{
    fmt_money, fmt_percent, maybe_print_json, parse_date, parse_decimal, parse_id, parse_tags,
    pretty_table,
};
use crate::validation;
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use serde::Serialize;

pub fn handle(ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("rm", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            ctx.api.transactions().delete(id)?;
            println!("Deleted transaction {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn flow(sub: &clap::ArgMatches) -> Option<FlowType> {
    match sub.get_one::<String>("type").map(String::as_str) {
        Some("income") => Some(FlowType::Income),
        Some("expense") => Some(FlowType::Expense),
        _ => None,
    }
}

fn lookup<'c>(categories: &'c [Category], name: &str) -> Result<&'c Category> {
    find_by_name(categories, name).ok_or_else(|| anyhow!("Category '{}' not found", name.trim()))
}

pub fn new_transaction_from(
    sub: &clap::ArgMatches,
    user_id: i64,
    categories: &[Category],
    today: NaiveDate,
) -> Result<NewTransaction> {
    let category = lookup(categories, sub.get_one::<String>("category").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today,
    };
    let req = NewTransaction {
        user_id,
        kind: flow(sub).unwrap_or(FlowType::Expense),
        category_id: category.id,
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        date,
        description: sub
            .get_one::<String>("description")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        tags: sub
            .get_one::<String>("tags")
            .map(|s| parse_tags(s))
            .unwrap_or_default(),
    };
    validation::transaction(&req)?;
    Ok(req)
}

fn add(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let session = ctx.session()?;
    let categories = ctx
        .api
        .categories()
        .list(session.user_id)
        .context("Fetch categories")?;
    let today = chrono::Local::now().date_naive();
    let req = new_transaction_from(sub, session.user_id, &categories, today)?;
    let receipt = ctx.api.transactions().create(&req).context("Record transaction")?;
    let ccy = ctx.currency()?;
    let t = &receipt.transaction;
    println!(
        "Recorded {} {} on {} (id {})",
        t.kind.as_str(),
        fmt_money(&t.amount, &ccy),
        t.date,
        t.id
    );
    let impacts: Vec<ImpactView> = receipt.budget_impacts.iter().map(ImpactView::from).collect();
    if !impacts.is_empty() {
        println!("{}", pretty_table(&["Budget", "Category", "Before", "After", "Status"], impact_rows(&impacts)));
    }
    for i in impacts.iter().filter(|i| i.over_budget) {
        println!("⚠ '{}' is over budget", i.budget);
    }
    Ok(())
}

pub fn impact_rows(impacts: &[ImpactView]) -> Vec<Vec<String>> {
    impacts
        .iter()
        .map(|i| {
            let status = if i.over_budget {
                "over budget".to_string()
            } else if i.crossed_tier() {
                format!("now {}", i.after.tier.label())
            } else {
                i.after.tier.label().to_string()
            };
            vec![
                i.budget.clone(),
                i.category.clone(),
                fmt_percent(&i.before.percent),
                fmt_percent(&i.after.percent),
                status,
            ]
        })
        .collect()
}

pub fn filter_from(sub: &clap::ArgMatches, categories: &[Category]) -> Result<TransactionFilter> {
    let category_id = match sub.get_one::<String>("category") {
        Some(name) => Some(lookup(categories, name)?.id),
        None => None,
    };
    let from = sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?;
    let to = sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?;
    if let (Some(f), Some(t)) = (from, to) {
        validation::ordered("from", f, "to", t)?;
    }
    Ok(TransactionFilter {
        kind: flow(sub),
        category_id,
        from,
        to,
    })
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub description: String,
    pub tags: String,
}

/// Newest first, optionally truncated; category names are filled from `categories`
/// when the backend left them out.
pub fn rows_for(
    mut txs: Vec<Transaction>,
    categories: &[Category],
    limit: Option<usize>,
) -> Vec<TransactionRow> {
    txs.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    if let Some(n) = limit {
        txs.truncate(n);
    }
    txs.into_iter()
        .map(|t| {
            let category = t
                .category_name
                .clone()
                .or_else(|| {
                    categories
                        .iter()
                        .find(|c| c.id == t.category_id)
                        .map(|c| c.name.clone())
                })
                .unwrap_or_else(|| format!("#{}", t.category_id));
            let signed = match t.kind {
                FlowType::Income => t.amount,
                FlowType::Expense => -t.amount,
            };
            TransactionRow {
                id: t.id,
                date: t.date.to_string(),
                kind: t.kind.as_str().to_string(),
                category,
                amount: format!("{:.2}", signed),
                description: t.description.unwrap_or_default(),
                tags: t.tags.join(","),
            }
        })
        .collect()
}

fn list(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
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
    let data = rows_for(txs, &categories, sub.get_one::<usize>("limit").copied());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.description.clone(),
                    r.tags.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Type", "Category", "Amount", "Description", "Tags"],
                rows,
            )
        );
    }
    Ok(())
}
