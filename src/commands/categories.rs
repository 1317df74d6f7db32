// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Ctx;
use crate::category_style::{known, resolve, resolve_with};
use crate::models::{Category, FlowType, NewCategory};
use crate::utils::{maybe_print_json, parse_id, pretty_table};
use crate::validation;
use anyhow::{Context, Result};

pub fn handle(ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let session = ctx.session()?;
            let cats = ctx
                .api
                .categories()
                .list(session.user_id)
                .context("Fetch categories")?;
            let styled = styled(&cats);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &styled)? {
                let rows = styled
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.to_string(),
                            format!("{} {}", c.icon.as_deref().unwrap_or_default(), c.name),
                            c.kind.as_str().to_string(),
                            c.color.clone().unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Id", "Category", "Type", "Color"], rows));
            }
        }
        Some(("add", sub)) => {
            let session = ctx.session()?;
            let req = new_category_from(sub, session.user_id)?;
            let created = ctx.api.categories().create(&req).context("Create category")?;
            println!("Added category '{}' {} (id {})", created.name, req.icon, created.id);
        }
        Some(("rm", sub)) => {
            let id = parse_id(sub.get_one::<String>("id").unwrap())?;
            ctx.api.categories().delete(id)?;
            println!("Removed category {}", id);
        }
        Some(("style", sub)) => style(sub),
        _ => {}
    }
    Ok(())
}

/// Categories with icon/color always present: backend values, else resolved from the name.
pub fn styled(cats: &[Category]) -> Vec<Category> {
    cats.iter()
        .map(|c| {
            let (icon, color) = resolve_with(&c.name, c.icon.as_deref(), c.color.as_deref());
            Category {
                icon: Some(icon),
                color: Some(color),
                ..c.clone()
            }
        })
        .collect()
}

/// Icon and color default to what the name resolves to.
pub fn new_category_from(sub: &clap::ArgMatches, user_id: i64) -> Result<NewCategory> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let kind = match sub.get_one::<String>("type").map(String::as_str) {
        Some("income") => FlowType::Income,
        _ => FlowType::Expense,
    };
    let (icon, color) = resolve_with(
        &name,
        sub.get_one::<String>("icon").map(|s| s.trim()),
        sub.get_one::<String>("color").map(|s| s.trim()),
    );
    let req = NewCategory {
        user_id,
        name,
        kind,
        icon,
        color,
    };
    validation::category(&req)?;
    Ok(req)
}

fn style(sub: &clap::ArgMatches) {
    match sub.get_one::<String>("name") {
        Some(name) => {
            let s = resolve(name);
            println!("{} {} {}", name.trim(), s.icon, s.color);
        }
        None => {
            let rows = known()
                .map(|(k, s)| vec![k.to_string(), s.icon.to_string(), s.color.to_string()])
                .collect();
            println!("{}", pretty_table(&["Category", "Icon", "Color"], rows));
        }
    }
}
