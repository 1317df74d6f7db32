// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Ctx;
use super::goals::GoalView;
use crate::budget_view::{BudgetTotals, BudgetView};
use crate::notifications::NotificationCenter;
use crate::progress::{GoalStatus, Progress, render_bar};
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub budgets: BudgetTotals,
    pub goals_total: usize,
    pub goals_completed: usize,
    pub goals_overdue: usize,
    pub saved: Decimal,
    pub targeted: Decimal,
    pub unread_notifications: u32,
}

impl Dashboard {
    pub fn build(budgets: &[BudgetView], goals: &[GoalView], unread: u32) -> Self {
        let count = |s: GoalStatus| goals.iter().filter(|g| g.progress.status == s).count();
        Dashboard {
            budgets: BudgetTotals::of(budgets),
            goals_total: goals.len(),
            goals_completed: count(GoalStatus::Completed),
            goals_overdue: count(GoalStatus::Overdue),
            saved: goals
                .iter()
                .fold(Decimal::ZERO, |acc, g| acc.saturating_add(g.goal.current_amount)),
            targeted: goals
                .iter()
                .fold(Decimal::ZERO, |acc, g| acc.saturating_add(g.goal.target_amount)),
            unread_notifications: unread,
        }
    }
}

pub fn handle(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let session = ctx.session()?;
    let today = chrono::Local::now().date_naive();
    let budgets: Vec<BudgetView> = ctx
        .api
        .budgets()
        .list(session.user_id)
        .context("Fetch budgets")?
        .iter()
        .map(BudgetView::from)
        .collect();
    let goals: Vec<GoalView> = ctx
        .api
        .goals()
        .list(session.user_id)
        .context("Fetch goals")?
        .into_iter()
        .map(|g| GoalView::new(g, today))
        .collect();
    // The badge degrades to 0 rather than failing the whole dashboard.
    let mut center = NotificationCenter::new(session.user_id);
    center.poll(&ctx.api.notifications());
    let dash = Dashboard::build(&budgets, &goals, center.unread_count());
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &dash)? {
        return Ok(());
    }
    let ccy = ctx.currency()?;
    let bp = dash.budgets.progress();
    let gp = Progress::of(dash.saved, dash.targeted);
    println!("Hello, {}", session.name);
    let rows = vec![
        vec![
            "Budgets".to_string(),
            format!(
                "{} spent of {} across {}",
                fmt_money(&dash.budgets.spent, &ccy),
                fmt_money(&dash.budgets.total, &ccy),
                dash.budgets.budgets
            ),
            format!("{} {}", render_bar(&bp, 10), fmt_percent(&bp.percent)),
        ],
        vec![
            "Attention".to_string(),
            format!(
                "{} exceeded, {} warning",
                dash.budgets.exceeded, dash.budgets.warning
            ),
            String::new(),
        ],
        vec![
            "Goals".to_string(),
            format!(
                "{} saved of {} ({} done, {} overdue)",
                fmt_money(&dash.saved, &ccy),
                fmt_money(&dash.targeted, &ccy),
                dash.goals_completed,
                dash.goals_overdue
            ),
            format!("{} {}", render_bar(&gp, 10), fmt_percent(&gp.percent)),
        ],
        vec![
            "Notifications".to_string(),
            format!("{} unread", dash.unread_notifications),
            String::new(),
        ],
    ];
    println!("{}", pretty_table(&["", "Summary", "Progress"], rows));
    Ok(())
}
