// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::FormError;
use crate::models::{NewBudget, NewCategory, NewGoal, NewSavingRecord, NewTransaction};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("static color pattern"));

pub fn non_empty(field: &'static str, v: &str) -> Result<(), FormError> {
    if v.trim().is_empty() {
        return Err(FormError::Empty(field));
    }
    Ok(())
}

pub fn positive(field: &'static str, v: Decimal) -> Result<(), FormError> {
    if v <= Decimal::ZERO {
        return Err(FormError::NotPositive(field));
    }
    Ok(())
}

pub fn ordered(
    start_field: &'static str,
    start: NaiveDate,
    end_field: &'static str,
    end: NaiveDate,
) -> Result<(), FormError> {
    if start > end {
        return Err(FormError::DateOrder {
            start_field,
            start: start.to_string(),
            end_field,
            end: end.to_string(),
        });
    }
    Ok(())
}

pub fn color(v: &str) -> Result<(), FormError> {
    if !HEX_COLOR.is_match(v) {
        return Err(FormError::InvalidColor(v.to_string()));
    }
    Ok(())
}

pub fn budget(b: &NewBudget) -> Result<(), FormError> {
    non_empty("name", &b.name)?;
    positive("total amount", b.total_amount)?;
    ordered("start date", b.start_date, "end date", b.end_date)?;
    for a in &b.categories {
        positive("allocated amount", a.allocated_amount)?;
    }
    Ok(())
}

pub fn transaction(t: &NewTransaction) -> Result<(), FormError> {
    positive("amount", t.amount)
}

pub fn category(c: &NewCategory) -> Result<(), FormError> {
    non_empty("name", &c.name)?;
    non_empty("icon", &c.icon)?;
    color(&c.color)
}

pub fn goal(g: &NewGoal, today: NaiveDate) -> Result<(), FormError> {
    non_empty("name", &g.name)?;
    positive("target amount", g.target_amount)?;
    if g.deadline <= today {
        return Err(FormError::DeadlineInPast(g.deadline.to_string()));
    }
    Ok(())
}

pub fn saving(s: &NewSavingRecord) -> Result<(), FormError> {
    positive("amount", s.amount)
}
