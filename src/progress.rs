// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    OnTrack,
    Warning,
    Exceeded,
}

impl Tier {
    /// <= 50% on track, <= 80% warning, anything above is exceeded.
    pub fn for_percent(p: Decimal) -> Tier {
        if p <= Decimal::from(50) {
            Tier::OnTrack
        } else if p <= Decimal::from(80) {
            Tier::Warning
        } else {
            Tier::Exceeded
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Tier::OnTrack => "#4CAF50",
            Tier::Warning => "#FF9800",
            Tier::Exceeded => "#F44336",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::OnTrack => "on track",
            Tier::Warning => "warning",
            Tier::Exceeded => "exceeded",
        }
    }
}

/// `spent / allocated * 100`; zero when nothing (or a negative amount) is allocated.
/// Results too large for a `Decimal` saturate at `Decimal::MAX` / `Decimal::MIN`.
pub fn percent(spent: Decimal, allocated: Decimal) -> Decimal {
    if allocated <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    spent
        .checked_div(allocated)
        .and_then(|r| r.checked_mul(HUNDRED))
        .unwrap_or(if spent.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

pub fn bar_percent(p: Decimal) -> Decimal {
    p.clamp(Decimal::ZERO, HUNDRED)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    /// Unclamped, rounded to one decimal place.
    pub percent: Decimal,
    /// What the bar shows: `percent` clamped to 0..=100.
    pub bar: Decimal,
    pub tier: Tier,
}

impl Progress {
    pub fn of(spent: Decimal, allocated: Decimal) -> Progress {
        let raw = percent(spent, allocated);
        Progress {
            percent: raw.round_dp(1),
            bar: bar_percent(raw).round_dp(1),
            tier: Tier::for_percent(raw),
        }
    }
}

pub fn render_bar(p: &Progress, width: usize) -> String {
    let width = width.max(1);
    let filled = (p.bar * Decimal::from(width as u64) / HUNDRED)
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(width);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    Completed,
    Overdue,
    InProgress,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub percent: Decimal,
    pub bar: Decimal,
    pub remaining: Decimal,
    pub days_left: i64,
    /// Saving needed per (30-day) month to hit the target on time; `None` once done or overdue.
    pub monthly_needed: Option<Decimal>,
    pub status: GoalStatus,
}

impl GoalProgress {
    pub fn of(current: Decimal, target: Decimal, deadline: NaiveDate, today: NaiveDate) -> Self {
        let raw = percent(current, target);
        let remaining = target.saturating_sub(current).max(Decimal::ZERO);
        let days_left = (deadline - today).num_days();
        let status = if target > Decimal::ZERO && current >= target {
            GoalStatus::Completed
        } else if days_left < 0 {
            GoalStatus::Overdue
        } else {
            GoalStatus::InProgress
        };
        let monthly_needed = match status {
            GoalStatus::InProgress => {
                let months = (Decimal::from(days_left) / Decimal::from(30)).max(Decimal::ONE);
                Some((remaining / months).round_dp(2))
            }
            _ => None,
        };
        GoalProgress {
            percent: raw.round_dp(1),
            bar: bar_percent(raw).round_dp(1),
            remaining,
            days_left,
            monthly_needed,
            status,
        }
    }
}
