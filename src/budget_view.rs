// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::category_style::resolve_with;
use crate::models::{Budget, BudgetCategory, BudgetImpact, BudgetType};
use crate::progress::{Progress, Tier};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BudgetView {
    pub id: i64,
    pub name: String,
    pub period: BudgetType,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub total: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    /// Sum of the per-category allocations (may differ from `total`).
    pub allocated: Decimal,
    pub progress: Progress,
    pub categories: Vec<AllocationView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AllocationView {
    pub category_id: i64,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub allocated: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub progress: Progress,
}

impl From<&BudgetCategory> for AllocationView {
    fn from(c: &BudgetCategory) -> Self {
        let (icon, color) = resolve_with(&c.category_name, c.icon.as_deref(), c.color.as_deref());
        AllocationView {
            category_id: c.category_id,
            name: c.category_name.clone(),
            icon,
            color,
            allocated: c.allocated_amount,
            spent: c.spent_amount,
            remaining: c.allocated_amount.saturating_sub(c.spent_amount),
            progress: Progress::of(c.spent_amount, c.allocated_amount),
        }
    }
}

impl From<&Budget> for BudgetView {
    fn from(b: &Budget) -> Self {
        let categories: Vec<AllocationView> = b.categories.iter().map(AllocationView::from).collect();
        let allocated = categories
            .iter()
            .fold(Decimal::ZERO, |acc, c| acc.saturating_add(c.allocated));
        BudgetView {
            id: b.id,
            name: b.name.clone(),
            period: b.kind,
            start: b.start_date,
            end: b.end_date,
            total: b.total_amount,
            spent: b.spent_amount,
            remaining: b.total_amount.saturating_sub(b.spent_amount),
            allocated,
            progress: Progress::of(b.spent_amount, b.total_amount),
            categories,
        }
    }
}

impl BudgetView {
    pub fn over_budget(&self) -> impl Iterator<Item = &AllocationView> {
        self.categories.iter().filter(|c| c.spent > c.allocated)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImpactView {
    pub budget_id: i64,
    pub budget: String,
    pub category: String,
    pub before: Progress,
    pub after: Progress,
    pub over_budget: bool,
}

impl From<&BudgetImpact> for ImpactView {
    fn from(i: &BudgetImpact) -> Self {
        let after = Progress::of(i.new_spent, i.allocated_amount);
        ImpactView {
            budget_id: i.budget_id,
            budget: i.budget_name.clone(),
            category: i.category_name.clone().unwrap_or_default(),
            before: Progress::of(i.previous_spent, i.allocated_amount),
            after,
            // Trust the server's flag, but a spent > allocated impact is over budget regardless.
            over_budget: i.is_over_budget
                || (i.allocated_amount > Decimal::ZERO && i.new_spent > i.allocated_amount),
        }
    }
}

impl ImpactView {
    /// True when the write moved the budget into a worse tier.
    pub fn crossed_tier(&self) -> bool {
        rank(self.after.tier) > rank(self.before.tier)
    }
}

fn rank(t: Tier) -> u8 {
    match t {
        Tier::OnTrack => 0,
        Tier::Warning => 1,
        Tier::Exceeded => 2,
    }
}

/// Totals across every budget the user has, for the dashboard.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BudgetTotals {
    pub budgets: usize,
    pub total: Decimal,
    pub spent: Decimal,
    pub exceeded: usize,
    pub warning: usize,
}

impl BudgetTotals {
    pub fn of(views: &[BudgetView]) -> Self {
        let mut t = BudgetTotals {
            budgets: views.len(),
            ..Default::default()
        };
        for v in views {
            t.total = t.total.saturating_add(v.total);
            t.spent = t.spent.saturating_add(v.spent);
            match v.progress.tier {
                Tier::Exceeded => t.exceeded += 1,
                Tier::Warning => t.warning += 1,
                Tier::OnTrack => {}
            }
        }
        t
    }

    pub fn progress(&self) -> Progress {
        Progress::of(self.spent, self.total)
    }
}
