// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finboard::api::decode_body;
use finboard::budget_view::{BudgetTotals, BudgetView, ImpactView};
use finboard::models::{Budget, BudgetImpact, BudgetType, TransactionReceipt};
use finboard::progress::Tier;
use rust_decimal::Decimal;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

const BUDGETS: &str = r##"{
  "success": true,
  "data": {
    "$values": [
      {
        "id": 1,
        "name": "March",
        "type": "Monthly",
        "totalAmount": 1000,
        "spentAmount": 850,
        "progress": 85,
        "startDate": "2026-03-01T00:00:00",
        "endDate": "2026-03-31T00:00:00Z",
        "categories": [
          {"categoryId": 3, "categoryName": "Groceries", "allocatedAmount": 400, "spentAmount": 500, "icon": null, "color": ""},
          {"categoryId": 4, "categoryName": "Gym", "allocatedAmount": 100, "spentAmount": 20, "icon": "🏋️", "color": "#123456"}
        ]
      },
      {
        "id": 2,
        "name": "2026",
        "budgetType": "annually",
        "totalAmount": 12000,
        "spentAmount": 3000
      }
    ]
  }
}"##;

fn budgets() -> Vec<Budget> {
    decode_body(BUDGETS).unwrap()
}

#[test]
fn backend_envelope_decodes() {
    let list = budgets();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].kind, BudgetType::Monthly);
    assert_eq!(list[1].kind, BudgetType::Annually);
    assert_eq!(list[0].start_date, NaiveDate::from_ymd_opt(2026, 3, 1));
    assert_eq!(list[0].end_date, NaiveDate::from_ymd_opt(2026, 3, 31));
    assert!(list[1].categories.is_empty());
    assert_eq!(list[1].start_date, None);
}

#[test]
fn view_fills_in_style_and_progress() {
    let list = budgets();
    let v = BudgetView::from(&list[0]);
    assert_eq!(v.remaining, d("150"));
    assert_eq!(v.allocated, d("500"));
    assert_eq!(v.progress.percent, d("85"));
    assert_eq!(v.progress.tier, Tier::Exceeded);

    let groceries = &v.categories[0];
    assert_eq!(groceries.icon, "🛒");
    assert_eq!(groceries.color, "#8BC34A");
    assert_eq!(groceries.remaining, d("-100"));
    assert_eq!(groceries.progress.percent, d("125"));
    assert_eq!(groceries.progress.bar, d("100"));

    let gym = &v.categories[1];
    assert_eq!(gym.icon, "🏋️");
    assert_eq!(gym.color, "#123456");

    let over: Vec<i64> = v.over_budget().map(|c| c.category_id).collect();
    assert_eq!(over, vec![3]);
}

#[test]
fn totals_count_tiers() {
    let views: Vec<BudgetView> = budgets().iter().map(BudgetView::from).collect();
    let t = BudgetTotals::of(&views);
    assert_eq!(t.budgets, 2);
    assert_eq!(t.total, d("13000"));
    assert_eq!(t.spent, d("3850"));
    assert_eq!(t.exceeded, 1);
    assert_eq!(t.warning, 0);
    assert_eq!(t.progress().tier, Tier::OnTrack);
    assert_eq!(BudgetTotals::of(&[]).progress().percent, Decimal::ZERO);
}

fn impact(allocated: &str, before: &str, after: &str, flag: bool) -> ImpactView {
    ImpactView::from(&BudgetImpact {
        budget_id: 1,
        budget_name: "March".into(),
        category_name: Some("Dining".into()),
        allocated_amount: d(allocated),
        previous_spent: d(before),
        new_spent: d(after),
        is_over_budget: flag,
    })
}

#[test]
fn impact_over_budget_and_tier_changes() {
    let i = impact("200", "150", "250", false);
    assert!(i.over_budget);
    assert!(i.crossed_tier());
    assert_eq!(i.before.tier, Tier::Warning);
    assert_eq!(i.after.tier, Tier::Exceeded);

    let calm = impact("200", "10", "20", false);
    assert!(!calm.over_budget);
    assert!(!calm.crossed_tier());

    // Server flag wins even when the numbers disagree.
    assert!(impact("200", "10", "20", true).over_budget);
}

#[test]
fn receipt_with_impacts_decodes() {
    let body = r#"{"data": {
        "transaction": {"id": 9, "type": "Expense", "categoryId": 3, "amount": 42, "date": "2026-03-05T12:30:00"},
        "budgetImpacts": [{"budgetId": 1, "budgetName": "March", "allocatedAmount": 400, "previousSpent": 380, "newSpent": 422, "isOverBudget": true}]
    }}"#;
    let r: TransactionReceipt = decode_body(body).unwrap();
    assert_eq!(r.transaction.id, 9);
    assert_eq!(r.transaction.date, NaiveDate::from_ymd_opt(2026, 3, 5).unwrap());
    assert!(r.transaction.tags.is_empty());
    assert_eq!(r.budget_impacts.len(), 1);
    assert!(ImpactView::from(&r.budget_impacts[0]).over_budget);
}

#[test]
fn nested_dotnet_collections_decode() {
    let body = r#"{"$id": "1", "$values": [
        {
            "id": 5,
            "name": "April",
            "type": "monthly",
            "totalAmount": 600,
            "spentAmount": 120,
            "categories": {"$id": "3", "$values": [
                {"categoryId": 3, "categoryName": "Groceries", "allocatedAmount": 300, "spentAmount": 120}
            ]}
        }
    ]}"#;
    let list: Vec<Budget> = decode_body(body).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].categories.len(), 1);
    assert_eq!(BudgetView::from(&list[0]).categories[0].progress.percent, d("40"));

    let receipt = r#"{"transaction": {"id": 1, "type": "expense", "categoryId": 3, "amount": 5,
        "date": "2026-04-02", "tags": {"$values": ["weekly"]}},
        "budgetImpacts": {"$id": "9", "$values": [{"budgetId": 5, "budgetName": "April"}]}}"#;
    let r: TransactionReceipt = decode_body(receipt).unwrap();
    assert_eq!(r.transaction.tags, vec!["weekly".to_string()]);
    assert_eq!(r.budget_impacts[0].budget_id, 5);
}
