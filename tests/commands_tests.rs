// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finboard::budget_view::BudgetView;
use finboard::cli;
use finboard::commands::dashboard::Dashboard;
use finboard::commands::goals::{GoalView, new_goal_from, saving_from};
use finboard::commands::{budgets, categories, exporter, reports, transactions};
use finboard::error::FormError;
use finboard::models::{Budget, BudgetType, Category, FlowType, Goal, SpendingPoint, Transaction};
use rust_decimal::Decimal;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn day(y: i32, m: u32, dd: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, dd).unwrap()
}

/// Matches of the innermost subcommand, e.g. `budget create`.
fn leaf(args: &[&str]) -> clap::ArgMatches {
    let m = cli::build_cli().get_matches_from(args);
    let (_, group) = m.subcommand().unwrap();
    let (_, sub) = group.subcommand().unwrap();
    sub.clone()
}

fn cats() -> Vec<Category> {
    vec![
        Category {
            id: 3,
            name: "Groceries".into(),
            kind: FlowType::Expense,
            icon: None,
            color: None,
        },
        Category {
            id: 4,
            name: "Dining Out".into(),
            kind: FlowType::Expense,
            icon: Some("🍝".into()),
            color: Some("#AA0000".into()),
        },
        Category {
            id: 7,
            name: "Salary".into(),
            kind: FlowType::Income,
            icon: None,
            color: None,
        },
    ]
}

fn form_error(e: &anyhow::Error) -> &FormError {
    e.downcast_ref::<FormError>().expect("form error")
}

#[test]
fn budget_create_resolves_allocations() {
    let sub = leaf(&[
        "finboard", "budget", "create", "--name", " March ", "--type", "monthly", "--amount", "1000",
        "--start", "2026-03-01", "--end", "2026-03-31", "--allocate", "groceries=400",
        "--allocate", "dining out = 150.50",
    ]);
    let req = budgets::new_budget_from(&sub, 9, &cats()).unwrap();
    assert_eq!(req.name, "March");
    assert_eq!(req.kind, BudgetType::Monthly);
    assert_eq!(req.total_amount, d("1000"));
    assert_eq!(req.categories.len(), 2);
    assert_eq!(req.categories[0].category_id, 3);
    assert_eq!(req.categories[1].category_id, 4);
    assert_eq!(req.categories[1].allocated_amount, d("150.50"));
}

#[test]
fn budget_create_rejects_bad_input() {
    let unknown = leaf(&[
        "finboard", "budget", "create", "--name", "X", "--amount", "10", "--start", "2026-03-01",
        "--end", "2026-03-31", "--allocate", "Pets=5",
    ]);
    let err = budgets::new_budget_from(&unknown, 9, &cats()).unwrap_err();
    assert!(err.to_string().contains("Pets"));

    let backwards = leaf(&[
        "finboard", "budget", "create", "--name", "X", "--amount", "10", "--start", "2026-04-01",
        "--end", "2026-03-01",
    ]);
    let err = budgets::new_budget_from(&backwards, 9, &cats()).unwrap_err();
    assert!(matches!(form_error(&err), FormError::DateOrder { .. }));

    let zero = leaf(&[
        "finboard", "budget", "create", "--name", "X", "--amount", "0", "--start", "2026-03-01",
        "--end", "2026-03-31",
    ]);
    let err = budgets::new_budget_from(&zero, 9, &cats()).unwrap_err();
    assert_eq!(form_error(&err), &FormError::NotPositive("total amount"));

    assert!(budgets::parse_allocation("Groceries").is_err());
    assert!(budgets::parse_allocation("=5").is_err());
    // Only the last '=' splits, so names may contain one.
    assert_eq!(budgets::parse_allocation("A=B=5").unwrap(), ("A=B".to_string(), d("5")));
}

#[test]
fn chart_bars_scale_to_the_larger_of_total_and_peak() {
    let points = vec![
        SpendingPoint {
            label: "2026-03-01".into(),
            amount: d("300"),
            cumulative: d("300"),
        },
        SpendingPoint {
            label: "2026-03-02".into(),
            amount: d("700"),
            cumulative: d("1000"),
        },
    ];
    let rows = budgets::chart_rows(&points, d("1000"), "USD", 10);
    assert_eq!(rows[0][3], "█".repeat(3));
    assert_eq!(rows[1][3], "█".repeat(10));
    assert_eq!(rows[1][2], "USD 1000.00");

    let over = budgets::chart_rows(&points, d("500"), "USD", 10);
    assert_eq!(over[1][3], "█".repeat(10));

    let huge = vec![SpendingPoint {
        label: "2026-03-01".into(),
        amount: Decimal::MAX,
        cumulative: Decimal::MAX,
    }];
    let rows = budgets::chart_rows(&huge, Decimal::ZERO, "USD", 40);
    assert_eq!(rows[0][3], "█".repeat(40));
}

#[test]
fn tx_add_builds_request() {
    let sub = leaf(&[
        "finboard", "tx", "add", "--category", "GROCERIES", "--amount", "42.10", "--tags",
        "food, weekly,Food,,",
    ]);
    let today = day(2026, 3, 5);
    let req = transactions::new_transaction_from(&sub, 1, &cats(), today).unwrap();
    assert_eq!(req.kind, FlowType::Expense);
    assert_eq!(req.category_id, 3);
    assert_eq!(req.date, today);
    assert_eq!(req.tags, vec!["food".to_string(), "weekly".to_string()]);
    assert_eq!(req.description, None);
}

#[test]
fn tx_add_rejects_zero_amount() {
    let sub = leaf(&["finboard", "tx", "add", "--type", "income", "--category", "Salary", "--amount", "0"]);
    let err = transactions::new_transaction_from(&sub, 1, &cats(), day(2026, 3, 5)).unwrap_err();
    assert_eq!(form_error(&err), &FormError::NotPositive("amount"));
}

#[test]
fn tx_filter_checks_date_order() {
    let ok = leaf(&[
        "finboard", "tx", "list", "--type", "expense", "--category", "dining out", "--from",
        "2026-03-01", "--to", "2026-03-31",
    ]);
    let f = transactions::filter_from(&ok, &cats()).unwrap();
    assert_eq!(f.kind, Some(FlowType::Expense));
    assert_eq!(f.category_id, Some(4));

    let bad = leaf(&["finboard", "tx", "list", "--from", "2026-04-01", "--to", "2026-03-01"]);
    let err = transactions::filter_from(&bad, &cats()).unwrap_err();
    assert!(matches!(form_error(&err), FormError::DateOrder { .. }));
}

fn txs() -> Vec<Transaction> {
    vec![
        Transaction {
            id: 1,
            kind: FlowType::Expense,
            category_id: 3,
            category_name: None,
            amount: d("12.5"),
            date: day(2026, 3, 1),
            description: Some("milk".into()),
            tags: vec!["food".into()],
        },
        Transaction {
            id: 2,
            kind: FlowType::Income,
            category_id: 7,
            category_name: Some("Paycheck".into()),
            amount: d("2000"),
            date: day(2026, 3, 3),
            description: None,
            tags: vec![],
        },
        Transaction {
            id: 3,
            kind: FlowType::Expense,
            category_id: 99,
            category_name: None,
            amount: d("5"),
            date: day(2026, 3, 2),
            description: None,
            tags: vec!["misc".into(), "cash".into()],
        },
    ]
}

#[test]
fn rows_are_newest_first_and_signed() {
    let rows = transactions::rows_for(txs(), &cats(), None);
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
    assert_eq!(rows[0].amount, "2000.00");
    assert_eq!(rows[0].category, "Paycheck");
    assert_eq!(rows[1].category, "#99");
    assert_eq!(rows[2].amount, "-12.50");
    assert_eq!(rows[2].category, "Groceries");

    assert_eq!(transactions::rows_for(txs(), &cats(), Some(1)).len(), 1);
}

#[test]
fn export_csv_and_json() {
    let dir = tempfile::tempdir().unwrap();
    let rows = transactions::rows_for(txs(), &cats(), None);

    let csv_path = dir.path().join("tx.csv");
    exporter::write_rows(&rows, "csv", csv_path.to_str().unwrap()).unwrap();
    let mut rdr = csv::Reader::from_path(&csv_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["id", "date", "type", "category", "amount", "description", "tags"]
    );
    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 3);
    assert_eq!(&records[1][6], "misc,cash");

    let json_path = dir.path().join("tx.json");
    exporter::write_rows(&rows, "json", json_path.to_str().unwrap()).unwrap();
    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(v[0]["type"], "income");
    assert_eq!(v[0]["tags"], serde_json::json!([]));
    assert_eq!(v[1]["tags"], serde_json::json!(["misc", "cash"]));

    let err = exporter::write_rows(&rows, "xlsx", dir.path().join("x").to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("Unknown format"));
}

#[test]
fn category_add_fills_style_from_name() {
    let sub = leaf(&["finboard", "category", "add", "--name", "Weekly Groceries"]);
    let req = categories::new_category_from(&sub, 1).unwrap();
    assert_eq!(req.icon, "🛒");
    assert_eq!(req.color, "#8BC34A");
    assert_eq!(req.kind, FlowType::Expense);

    let bad = leaf(&["finboard", "category", "add", "--name", "Pets", "--color", "red"]);
    let err = categories::new_category_from(&bad, 1).unwrap_err();
    assert_eq!(form_error(&err), &FormError::InvalidColor("red".into()));

    let styled = categories::styled(&cats());
    assert_eq!(styled[0].icon.as_deref(), Some("🛒"));
    assert_eq!(styled[1].color.as_deref(), Some("#AA0000"));
}

#[test]
fn goal_forms() {
    let today = day(2026, 3, 5);
    let due_today = leaf(&[
        "finboard", "goal", "create", "--name", "Bike", "--target", "800", "--deadline", "2026-03-05",
    ]);
    let err = new_goal_from(&due_today, 1, today).unwrap_err();
    assert!(matches!(form_error(&err), FormError::DeadlineInPast(_)));

    let ok = leaf(&[
        "finboard", "goal", "create", "--name", "Bike", "--target", "800", "--deadline", "2026-06-03",
        "--description", "  ",
    ]);
    let g = new_goal_from(&ok, 1, today).unwrap();
    assert_eq!(g.description, None);

    let saving = leaf(&["finboard", "goal", "contribute", "4", "--amount", "25"]);
    let s = saving_from(&saving, today).unwrap();
    assert_eq!((s.goal_id, s.amount, s.date), (4, d("25"), today));

    let zero = leaf(&["finboard", "goal", "contribute", "4", "--amount", "0"]);
    assert!(saving_from(&zero, today).is_err());
}

#[test]
fn report_upload_defaults() {
    let sub = leaf(&["finboard", "report", "upload", "--file", "out/March Summary.PDF"]);
    let r = reports::new_report(&sub, 5, "March Summary.PDF", "https://x/y");
    assert_eq!(r.name, "March Summary");
    assert_eq!(r.format, "pdf");
    assert_eq!(r.report_type, "monthly-summary");
    assert_eq!(r.user_id, 5);

    let named = leaf(&[
        "finboard", "report", "upload", "--file", "dump", "--name", "Q1", "--type", "quarterly",
    ]);
    let r = reports::new_report(&named, 5, "dump", "https://x/y");
    assert_eq!((r.name.as_str(), r.format.as_str(), r.report_type.as_str()), ("Q1", "bin", "quarterly"));
}

#[test]
fn dashboard_summarises_goals_and_budgets() {
    let today = day(2026, 3, 5);
    let goal = |id: i64, current: &str, deadline: NaiveDate| Goal {
        id,
        name: format!("g{}", id),
        target_amount: d("100"),
        current_amount: d(current),
        deadline,
        description: None,
    };
    let goals = vec![
        GoalView::new(goal(1, "100", day(2026, 6, 1)), today),
        GoalView::new(goal(2, "10", day(2026, 1, 1)), today),
        GoalView::new(goal(3, "40", day(2026, 9, 1)), today),
    ];
    let budget = Budget {
        id: 1,
        name: "March".into(),
        kind: BudgetType::Monthly,
        total_amount: d("500"),
        spent_amount: d("450"),
        progress: None,
        start_date: None,
        end_date: None,
        categories: vec![],
    };
    let dash = Dashboard::build(&[BudgetView::from(&budget)], &goals, 4);
    assert_eq!(dash.goals_total, 3);
    assert_eq!(dash.goals_completed, 1);
    assert_eq!(dash.goals_overdue, 1);
    assert_eq!(dash.saved, d("150"));
    assert_eq!(dash.targeted, d("300"));
    assert_eq!(dash.budgets.exceeded, 1);
    assert_eq!(dash.unread_notifications, 4);
}
