//! Data structures that map to the `expenses` table or to query results.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::types::chrono::{DateTime, Utc};

/// Fields collected by the capture flow, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub user_id: u64,
    pub amount: Decimal,
    pub category: String,
    pub payment_method: String,
    pub is_necessary: bool,
}

/// One line of the detailed listing.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDetail {
    pub amount: Decimal,
    pub category: String,
    pub payment_method: String,
    pub created_at: DateTime<Utc>,
}

/// Sum of amounts sharing one category or payment method.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct GroupedTotal {
    pub label: String,
    pub total: Decimal,
}

/// Column a grouped report aggregates by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    Category,
    PaymentMethod,
}

impl GroupField {
    /// Column name interpolated into the grouping query. Only these two literals can reach SQL.
    pub fn column(self) -> &'static str {
        match self {
            GroupField::Category => "category",
            GroupField::PaymentMethod => "payment_method",
        }
    }
}

/// Inclusive calendar range; `start <= end` is expected but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }
}
