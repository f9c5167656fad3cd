//! Finance-report and sales-ledger aggregation.
//!
//! Both feed the same dashboard section: monthly finance reports carry
//! the sales/costs/profit trend, sales ledgers carry per-transaction
//! amounts rolled up into monthly sums and the average ticket size.

use sauna_model::{
    CellValue, FinanceMonth, FinanceSummary, NormalizedTable, SemanticField,
};

use crate::aggregate::month_key;
use crate::normalize::normalize_month;

/// Reduces a monthly finance report (month, sales, costs) to the
/// profit trend. Division by zero sales yields a 0 profit rate.
#[must_use]
pub fn summarize_finance(table: &NormalizedTable) -> FinanceSummary {
    let mut summary = FinanceSummary::default();
    for row in &table.rows {
        let Some(month) = row.get(&SemanticField::Month).and_then(CellValue::as_text) else {
            continue;
        };
        let month = normalize_month(month);
        let sales = row
            .get(&SemanticField::Sales)
            .and_then(CellValue::as_number)
            .unwrap_or(0.0);
        let costs = row
            .get(&SemanticField::Costs)
            .and_then(CellValue::as_number)
            .unwrap_or(0.0);
        let profit = sales - costs;
        let profit_rate = if sales == 0.0 {
            0.0
        } else {
            profit / sales * 100.0
        };
        summary.monthly_trend.insert(
            month,
            FinanceMonth {
                sales,
                costs,
                profit,
                profit_rate,
            },
        );
    }
    summary.latest_month = summary.monthly_trend.keys().next_back().cloned();
    summary
}

/// Reduces a sales ledger (one row per transaction) to monthly sums,
/// the grand total and the average transaction amount.
///
/// The transaction month comes from the date column, falling back to a
/// month column, then to `fallback_month` from the filename.
#[must_use]
pub fn summarize_sales(table: &NormalizedTable, fallback_month: Option<&str>) -> FinanceSummary {
    let mut summary = FinanceSummary::default();
    let mut transactions = 0u64;
    for row in &table.rows {
        let amount = row
            .get(&SemanticField::Amount)
            .and_then(CellValue::as_number)
            .or_else(|| {
                row.get(&SemanticField::Sales)
                    .and_then(CellValue::as_number)
            });
        let Some(amount) = amount else {
            continue;
        };
        transactions += 1;
        summary.total_sales += amount;
        let month = row
            .get(&SemanticField::Date)
            .and_then(CellValue::as_date)
            .map(month_key)
            .or_else(|| {
                row.get(&SemanticField::Month)
                    .and_then(CellValue::as_text)
                    .map(normalize_month)
            })
            .or_else(|| fallback_month.map(str::to_string));
        if let Some(month) = month {
            *summary.monthly_sales.entry(month).or_insert(0.0) += amount;
        }
        if let Some(member_type) = row
            .get(&SemanticField::MemberType)
            .and_then(CellValue::as_text)
        {
            *summary
                .member_type_sales
                .entry(member_type.to_string())
                .or_insert(0.0) += amount;
        }
    }
    summary.average_transaction = if transactions == 0 {
        0.0
    } else {
        summary.total_sales / transactions as f64
    };
    summary
}
