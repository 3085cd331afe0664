//! The persistence boundary seen by the conversation flows.
//!
//! Faults never cross this boundary: they are logged here and replaced by the contract's
//! fallback (`false` for writes, empty rows or zero for reads).

use super::expenses;
use super::models::{DateRange, ExpenseDetail, GroupField, GroupedTotal, NewExpense};
use async_trait::async_trait;
use chrono::FixedOffset;
use rust_decimal::Decimal;
use sqlx::PgPool;

#[async_trait]
pub trait ExpenseGateway: Send + Sync {
    /// Stores one expense with a server-side timestamp. Returns `false` on any fault.
    async fn write_expense(&self, expense: &NewExpense) -> bool;
    /// Per-label sums ordered by descending total.
    async fn read_grouped(
        &self,
        user_id: u64,
        range: DateRange,
        field: GroupField,
    ) -> Vec<GroupedTotal>;
    /// Individual expenses, newest first.
    async fn read_detail(&self, user_id: u64, range: DateRange) -> Vec<ExpenseDetail>;
    async fn read_total(&self, user_id: u64, range: DateRange) -> Decimal;
}

/// Postgres-backed gateway.
#[derive(Clone)]
pub struct PgGateway {
    pool: PgPool,
    offset_minutes: i32,
}

impl PgGateway {
    pub fn new(pool: PgPool, offset: FixedOffset) -> Self {
        Self {
            pool,
            offset_minutes: offset.local_minus_utc() / 60,
        }
    }
}

#[async_trait]
impl ExpenseGateway for PgGateway {
    async fn write_expense(&self, expense: &NewExpense) -> bool {
        match expenses::insert_expense(&self.pool, expense).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(target="db.expenses", user_id=expense.user_id, error=?e, "insert failed");
                false
            }
        }
    }

    async fn read_grouped(
        &self,
        user_id: u64,
        range: DateRange,
        field: GroupField,
    ) -> Vec<GroupedTotal> {
        expenses::sum_grouped(&self.pool, user_id, range, field, self.offset_minutes)
            .await
            .unwrap_or_else(|e| {
                tracing::error!(target="db.expenses", user_id, field=field.column(), error=?e, "grouped report failed");
                Vec::new()
            })
    }

    async fn read_detail(&self, user_id: u64, range: DateRange) -> Vec<ExpenseDetail> {
        expenses::list_detail(&self.pool, user_id, range, self.offset_minutes)
            .await
            .unwrap_or_else(|e| {
                tracing::error!(target="db.expenses", user_id, error=?e, "detail listing failed");
                Vec::new()
            })
    }

    async fn read_total(&self, user_id: u64, range: DateRange) -> Decimal {
        expenses::sum_total(&self.pool, user_id, range, self.offset_minutes)
            .await
            .unwrap_or_else(|e| {
                tracing::error!(target="db.expenses", user_id, error=?e, "total query failed");
                Decimal::ZERO
            })
    }
}
