//! Raw queries against the `expenses` table.
//!
//! Every function takes the pool directly, so a connection is checked out for the
//! duration of one statement and released when it finishes. Calendar filtering uses
//! the UTC timestamp shifted by `offset_minutes`.

use super::models::{DateRange, ExpenseDetail, GroupField, GroupedTotal, NewExpense};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

// Calendar day of `created_at` in the configured local offset.
const LOCAL_DAY: &str = "((created_at AT TIME ZONE 'UTC') + make_interval(mins => $4))::date";

/// Inserts one expense; `created_at` is filled in by the database.
#[instrument(level = "debug", skip(pool, expense), fields(user_id = expense.user_id))]
pub async fn insert_expense(pool: &PgPool, expense: &NewExpense) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO expenses (user_id, amount, category, payment_method, is_necessary, created_at)
         VALUES ($1, $2, $3, $4, $5, NOW())",
    )
    .bind(expense.user_id as i64)
    .bind(expense.amount)
    .bind(&expense.category)
    .bind(&expense.payment_method)
    .bind(expense.is_necessary)
    .execute(pool)
    .await?;
    Ok(())
}

/// Sums amounts per category or payment method, largest total first.
#[instrument(level = "debug", skip(pool))]
pub async fn sum_grouped(
    pool: &PgPool,
    user_id: u64,
    range: DateRange,
    field: GroupField,
    offset_minutes: i32,
) -> Result<Vec<GroupedTotal>, sqlx::Error> {
    let column = field.column();
    let query_str = format!(
        "SELECT {column} AS label, SUM(amount) AS total
         FROM expenses
         WHERE user_id = $1 AND {LOCAL_DAY} BETWEEN $2 AND $3
         GROUP BY {column}
         ORDER BY SUM(amount) DESC"
    );
    sqlx::query_as::<_, GroupedTotal>(&query_str)
        .bind(user_id as i64)
        .bind(range.start)
        .bind(range.end)
        .bind(offset_minutes)
        .fetch_all(pool)
        .await
}

/// Lists every expense in the range, newest first.
#[instrument(level = "debug", skip(pool))]
pub async fn list_detail(
    pool: &PgPool,
    user_id: u64,
    range: DateRange,
    offset_minutes: i32,
) -> Result<Vec<ExpenseDetail>, sqlx::Error> {
    let query_str = format!(
        "SELECT amount, category, payment_method, created_at
         FROM expenses
         WHERE user_id = $1 AND {LOCAL_DAY} BETWEEN $2 AND $3
         ORDER BY created_at DESC"
    );
    sqlx::query_as::<_, ExpenseDetail>(&query_str)
        .bind(user_id as i64)
        .bind(range.start)
        .bind(range.end)
        .bind(offset_minutes)
        .fetch_all(pool)
        .await
}

/// Total spent in the range; zero when there are no rows.
#[instrument(level = "debug", skip(pool))]
pub async fn sum_total(
    pool: &PgPool,
    user_id: u64,
    range: DateRange,
    offset_minutes: i32,
) -> Result<Decimal, sqlx::Error> {
    let query_str = format!(
        "SELECT COALESCE(SUM(amount), 0) FROM expenses
         WHERE user_id = $1 AND {LOCAL_DAY} BETWEEN $2 AND $3"
    );
    sqlx::query_scalar::<_, Decimal>(&query_str)
        .bind(user_id as i64)
        .bind(range.start)
        .bind(range.end)
        .bind(offset_minutes)
        .fetch_one(pool)
        .await
}
