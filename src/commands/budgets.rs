// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Ctx;
use crate::api::budgets::SeriesPeriod;
use crate::api::categories::find_by_name;
use crate::budget_view::BudgetView;
use crate::models::{BudgetType, Category, NewAllocation, NewBudget, SpendingPoint};
use crate::progress::render_bar;
use crate::utils::{
    fmt_money, fmt_percent, maybe_print_json, parse_date, parse_decimal, parse_id, pretty_table,
};
use crate::validation;
use anyhow::{Context, Result, anyhow};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

pub fn handle(ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("show", sub)) => show(ctx, sub)?,
        Some(("create", sub)) => create(ctx, sub)?,
        Some(("delete", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            ctx.api.budgets().delete(id)?;
            println!("Deleted budget {}", id);
        }
        Some(("chart", sub)) => chart(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let session = ctx.session()?;
    let budgets = ctx
        .api
        .budgets()
        .list(session.user_id)
        .context("Fetch budgets")?;
    let views: Vec<BudgetView> = budgets.iter().map(BudgetView::from).collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &views)? {
        println!(
            "{}",
            pretty_table(
                &["Id", "Name", "Period", "Budget", "Spent", "Remaining", "Progress", "Status"],
                budget_rows(&views, &ctx.currency()?),
            )
        );
    }
    Ok(())
}

pub fn budget_rows(views: &[BudgetView], ccy: &str) -> Vec<Vec<String>> {
    views
        .iter()
        .map(|v| {
            vec![
                v.id.to_string(),
                v.name.clone(),
                v.period.as_str().to_string(),
                fmt_money(&v.total, ccy),
                fmt_money(&v.spent, ccy),
                fmt_money(&v.remaining, ccy),
                format!("{} {}", render_bar(&v.progress, 10), fmt_percent(&v.progress.percent)),
                v.progress.tier.label().to_string(),
            ]
        })
        .collect()
}

fn show(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    let budget = ctx.api.budgets().get(id).with_context(|| format!("Fetch budget {}", id))?;
    let view = BudgetView::from(&budget);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        return Ok(());
    }
    let ccy = ctx.currency()?;
    let period = match (view.start, view.end) {
        (Some(s), Some(e)) => format!("{} ({} .. {})", view.period.as_str(), s, e),
        _ => view.period.as_str().to_string(),
    };
    println!("{} [{}]", view.name, period);
    println!(
        "{} of {} spent {} {} ({})",
        fmt_money(&view.spent, &ccy),
        fmt_money(&view.total, &ccy),
        render_bar(&view.progress, 20),
        fmt_percent(&view.progress.percent),
        view.progress.tier.label()
    );
    let rows: Vec<Vec<String>> = view
        .categories
        .iter()
        .map(|c| {
            vec![
                format!("{} {}", c.icon, c.name),
                fmt_money(&c.allocated, &ccy),
                fmt_money(&c.spent, &ccy),
                fmt_money(&c.remaining, &ccy),
                format!("{} {}", render_bar(&c.progress, 10), fmt_percent(&c.progress.percent)),
                c.progress.tier.label().to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Category", "Allocated", "Spent", "Remaining", "Progress", "Status"],
            rows
        )
    );
    if view.allocated > view.total {
        println!(
            "Note: allocations ({}) exceed the budget total ({})",
            fmt_money(&view.allocated, &ccy),
            fmt_money(&view.total, &ccy)
        );
    }
    Ok(())
}

fn create(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let session = ctx.session()?;
    let categories = if sub.get_many::<String>("allocate").is_some() {
        ctx.api.categories().list(session.user_id).context("Fetch categories")?
    } else {
        Vec::new()
    };
    let req = new_budget_from(sub, session.user_id, &categories)?;
    let created = ctx.api.budgets().create(&req).context("Create budget")?;
    println!(
        "Created budget {} '{}' ({} {})",
        created.id,
        created.name,
        fmt_money(&created.total_amount, &ctx.currency()?),
        created.kind.as_str()
    );
    Ok(())
}

/// Build and validate a create request from the command line.
pub fn new_budget_from(
    sub: &clap::ArgMatches,
    user_id: i64,
    categories: &[Category],
) -> Result<NewBudget> {
    let kind = match sub.get_one::<String>("type").map(String::as_str) {
        Some("annually") => BudgetType::Annually,
        _ => BudgetType::Monthly,
    };
    let mut allocations = Vec::new();
    if let Some(vals) = sub.get_many::<String>("allocate") {
        for raw in vals {
            let (name, amount) = parse_allocation(raw)?;
            let cat = find_by_name(categories, &name)
                .ok_or_else(|| anyhow!("Category '{}' not found", name))?;
            allocations.push(NewAllocation {
                category_id: cat.id,
                allocated_amount: amount,
            });
        }
    }
    let req = NewBudget {
        user_id,
        name: sub.get_one::<String>("name").unwrap().trim().to_string(),
        kind,
        total_amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        start_date: parse_date(sub.get_one::<String>("start").unwrap())?,
        end_date: parse_date(sub.get_one::<String>("end").unwrap())?,
        categories: allocations,
    };
    validation::budget(&req)?;
    Ok(req)
}

/// `Groceries=250.00` -> ("Groceries", 250.00)
pub fn parse_allocation(raw: &str) -> Result<(String, Decimal)> {
    let (name, amount) = raw
        .rsplit_once('=')
        .ok_or_else(|| anyhow!("Invalid allocation '{}', expected CATEGORY=AMOUNT", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("Invalid allocation '{}', category is empty", raw));
    }
    Ok((name.to_string(), parse_decimal(amount)?))
}

fn chart(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    let period = sub
        .get_one::<String>("period")
        .and_then(|p| SeriesPeriod::parse(p))
        .unwrap_or(SeriesPeriod::Daily);
    let budget = ctx.api.budgets().get(id).with_context(|| format!("Fetch budget {}", id))?;
    let points = ctx
        .api
        .budgets()
        .spending(id, period)
        .with_context(|| format!("Fetch {} spending for budget {}", period.as_str(), id))?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &points)? {
        return Ok(());
    }
    let ccy = ctx.currency()?;
    println!("{} - {} spending", budget.name, period.as_str());
    println!(
        "{}",
        pretty_table(
            &["Period", "Spent", "Cumulative", ""],
            chart_rows(&points, budget.total_amount, &ccy, 30)
        )
    );
    Ok(())
}

/// One row per bucket; the bar is the cumulative amount scaled against the
/// budget total (or the largest cumulative value when that is bigger).
pub fn chart_rows(
    points: &[SpendingPoint],
    total: Decimal,
    ccy: &str,
    width: usize,
) -> Vec<Vec<String>> {
    let peak = points
        .iter()
        .map(|p| p.cumulative)
        .fold(total, Decimal::max);
    points
        .iter()
        .map(|p| {
            // cumulative <= peak, so the ratio stays within 0..=1 before scaling.
            let filled = p
                .cumulative
                .max(Decimal::ZERO)
                .checked_div(peak)
                .and_then(|r| r.checked_mul(Decimal::from(width as u64)))
                .and_then(|n| n.round().to_usize())
                .unwrap_or(0)
                .min(width);
            vec![
                p.label.clone(),
                fmt_money(&p.amount, ccy),
                fmt_money(&p.cumulative, ccy),
                "█".repeat(filled),
            ]
        })
        .collect()
}
