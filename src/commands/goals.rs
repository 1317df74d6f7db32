// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Ctx;
use crate::models::{Goal, NewGoal, NewSavingRecord};
use crate::progress::{GoalProgress, GoalStatus, Progress, render_bar};
use crate::utils::{
    fmt_money, fmt_percent, maybe_print_json, parse_date, parse_decimal, parse_id, pretty_table,
};
use crate::validation;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    match m.subcommand() {
        Some(("list", sub)) => list(ctx, sub, today)?,
        Some(("show", sub)) => show(ctx, sub, today)?,
        Some(("create", sub)) => {
            let session = ctx.session()?;
            let req = new_goal_from(sub, session.user_id, today)?;
            let g = ctx.api.goals().create(&req).context("Create goal")?;
            println!(
                "Created goal {} '{}' targeting {} by {}",
                g.id,
                g.name,
                fmt_money(&g.target_amount, &ctx.currency()?),
                g.deadline
            );
        }
        Some(("contribute", sub)) => contribute(ctx, sub, today)?,
        Some(("savings", sub)) => savings(ctx, sub)?,
        Some(("rm", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            ctx.api.goals().delete(id)?;
            println!("Deleted goal {}", id);
        }
        Some(("rm-saving", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            ctx.api.goals().delete_saving(id)?;
            println!("Deleted saving record {}", id);
        }
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct GoalView {
    #[serde(flatten)]
    pub goal: Goal,
    pub progress: GoalProgress,
}

impl GoalView {
    pub fn new(goal: Goal, today: NaiveDate) -> Self {
        let progress = GoalProgress::of(goal.current_amount, goal.target_amount, goal.deadline, today);
        Self { goal, progress }
    }
}

fn status_label(s: GoalStatus) -> &'static str {
    match s {
        GoalStatus::Completed => "completed",
        GoalStatus::Overdue => "overdue",
        GoalStatus::InProgress => "in progress",
    }
}

fn bar(p: &GoalProgress, width: usize) -> String {
    // Reuse the budget bar; tier is irrelevant for drawing.
    render_bar(&Progress::of(p.bar, Decimal::ONE_HUNDRED), width)
}

pub fn goal_rows(views: &[GoalView], ccy: &str) -> Vec<Vec<String>> {
    views
        .iter()
        .map(|v| {
            let p = &v.progress;
            vec![
                v.goal.id.to_string(),
                v.goal.name.clone(),
                format!(
                    "{} / {}",
                    fmt_money(&v.goal.current_amount, ccy),
                    fmt_money(&v.goal.target_amount, ccy)
                ),
                format!("{} {}", bar(p, 10), fmt_percent(&p.percent)),
                v.goal.deadline.to_string(),
                p.monthly_needed
                    .map(|m| fmt_money(&m, ccy))
                    .unwrap_or_else(|| "-".into()),
                status_label(p.status).to_string(),
            ]
        })
        .collect()
}

fn list(ctx: &Ctx, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let session = ctx.session()?;
    let goals = ctx.api.goals().list(session.user_id).context("Fetch goals")?;
    let views: Vec<GoalView> = goals.into_iter().map(|g| GoalView::new(g, today)).collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &views)? {
        println!(
            "{}",
            pretty_table(
                &["Id", "Goal", "Saved", "Progress", "Deadline", "Per month", "Status"],
                goal_rows(&views, &ctx.currency()?),
            )
        );
    }
    Ok(())
}

fn show(ctx: &Ctx, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    let goal = ctx.api.goals().get(id).with_context(|| format!("Fetch goal {}", id))?;
    let records = ctx
        .api
        .goals()
        .savings(id)
        .with_context(|| format!("Fetch savings for goal {}", id))?;
    let view = GoalView::new(goal, today);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        return Ok(());
    }
    let ccy = ctx.currency()?;
    let p = &view.progress;
    println!("{}", view.goal.name);
    if let Some(d) = view.goal.description.as_deref().filter(|d| !d.trim().is_empty()) {
        println!("{}", d);
    }
    println!(
        "{} of {} saved {} {}",
        fmt_money(&view.goal.current_amount, &ccy),
        fmt_money(&view.goal.target_amount, &ccy),
        bar(p, 20),
        fmt_percent(&p.percent)
    );
    match p.status {
        GoalStatus::Completed => println!("Goal reached"),
        GoalStatus::Overdue => println!(
            "Deadline {} passed {} days ago; {} still to go",
            view.goal.deadline,
            -p.days_left,
            fmt_money(&p.remaining, &ccy)
        ),
        GoalStatus::InProgress => println!(
            "{} days left, {} to go (about {} per month)",
            p.days_left,
            fmt_money(&p.remaining, &ccy),
            fmt_money(&p.monthly_needed.unwrap_or_default(), &ccy)
        ),
    }
    let total = records
        .iter()
        .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.amount));
    let rows = records
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.date.to_string(),
                fmt_money(&r.amount, &ccy),
                r.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Id", "Date", "Amount", "Description"], rows));
    println!("{} contributions totalling {}", records.len(), fmt_money(&total, &ccy));
    Ok(())
}

pub fn new_goal_from(sub: &clap::ArgMatches, user_id: i64, today: NaiveDate) -> Result<NewGoal> {
    let req = NewGoal {
        user_id,
        name: sub.get_one::<String>("name").unwrap().trim().to_string(),
        target_amount: parse_decimal(sub.get_one::<String>("target").unwrap())?,
        deadline: parse_date(sub.get_one::<String>("deadline").unwrap())?,
        description: sub
            .get_one::<String>("description")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    };
    validation::goal(&req, today)?;
    Ok(req)
}

pub fn saving_from(sub: &clap::ArgMatches, today: NaiveDate) -> Result<NewSavingRecord> {
    let req = NewSavingRecord {
        goal_id: parse_id(sub.get_one::<String>("id").unwrap())?,
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        date: match sub.get_one::<String>("date") {
            Some(d) => parse_date(d)?,
            None => today,
        },
        description: sub
            .get_one::<String>("description")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    };
    validation::saving(&req)?;
    Ok(req)
}

fn contribute(ctx: &Ctx, sub: &clap::ArgMatches, today: NaiveDate) -> Result<()> {
    let req = saving_from(sub, today)?;
    ctx.api.goals().add_saving(&req).context("Record saving")?;
    // Refetch: the running total is owned by the backend.
    let goal = ctx.api.goals().get(req.goal_id)?;
    let ccy = ctx.currency()?;
    let view = GoalView::new(goal, today);
    println!(
        "Added {} to '{}': {} of {} ({})",
        fmt_money(&req.amount, &ccy),
        view.goal.name,
        fmt_money(&view.goal.current_amount, &ccy),
        fmt_money(&view.goal.target_amount, &ccy),
        fmt_percent(&view.progress.percent)
    );
    if view.progress.status == GoalStatus::Completed {
        println!("🎉 Goal reached!");
    }
    Ok(())
}

fn savings(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    let records = ctx.api.goals().savings(id)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &records)? {
        let ccy = ctx.currency()?;
        let rows = records
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.to_string(),
                    fmt_money(&r.amount, &ccy),
                    r.description.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Id", "Date", "Amount", "Description"], rows));
    }
    Ok(())
}
