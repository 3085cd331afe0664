//! In-memory gateway shared by the flow tests.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use guarda_din_bot::database::ExpenseGateway;
use guarda_din_bot::database::models::{
    DateRange, ExpenseDetail, GroupField, GroupedTotal, NewExpense,
};
use guarda_din_bot::flow::FlowContext;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct Stored {
    pub expense: NewExpense,
    pub created_at: chrono::DateTime<Utc>,
}

#[derive(Default)]
pub struct MemoryGateway {
    pub rows: Mutex<Vec<Stored>>,
    pub fail_writes: bool,
    pub grouped_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    pub total_calls: AtomicUsize,
}

impl MemoryGateway {
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn saved(&self) -> Vec<NewExpense> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.expense.clone())
            .collect()
    }

    fn matching(&self, user_id: u64, range: DateRange) -> Vec<(NewExpense, chrono::DateTime<Utc>)> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.expense.user_id == user_id && in_range(range, s.created_at.date_naive()))
            .map(|s| (s.expense.clone(), s.created_at))
            .collect()
    }
}

fn in_range(range: DateRange, day: NaiveDate) -> bool {
    range.start <= day && day <= range.end
}

#[async_trait]
impl ExpenseGateway for MemoryGateway {
    async fn write_expense(&self, expense: &NewExpense) -> bool {
        if self.fail_writes {
            return false;
        }
        self.rows.lock().unwrap().push(Stored {
            expense: expense.clone(),
            created_at: Utc::now(),
        });
        true
    }

    async fn read_grouped(
        &self,
        user_id: u64,
        range: DateRange,
        field: GroupField,
    ) -> Vec<GroupedTotal> {
        self.grouped_calls.fetch_add(1, Ordering::SeqCst);
        let mut sums: HashMap<String, Decimal> = HashMap::new();
        for (e, _) in self.matching(user_id, range) {
            let label = match field {
                GroupField::Category => e.category,
                GroupField::PaymentMethod => e.payment_method,
            };
            *sums.entry(label).or_default() += e.amount;
        }
        let mut rows: Vec<GroupedTotal> = sums
            .into_iter()
            .map(|(label, total)| GroupedTotal { label, total })
            .collect();
        rows.sort_by(|a, b| b.total.cmp(&a.total));
        rows
    }

    async fn read_detail(&self, user_id: u64, range: DateRange) -> Vec<ExpenseDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let mut rows: Vec<ExpenseDetail> = self
            .matching(user_id, range)
            .into_iter()
            .map(|(e, created_at)| ExpenseDetail {
                amount: e.amount,
                category: e.category,
                payment_method: e.payment_method,
                created_at,
            })
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }

    async fn read_total(&self, user_id: u64, range: DateRange) -> Decimal {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        self.matching(user_id, range).iter().map(|(e, _)| e.amount).sum()
    }
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn ctx(gateway: &MemoryGateway, user_id: u64) -> FlowContext<'_> {
    FlowContext {
        gateway,
        user_id,
        today: today(),
    }
}

pub fn add(gateway: &MemoryGateway, user_id: u64, amount: Decimal, category: &str, payment: &str) {
    gateway.rows.lock().unwrap().push(Stored {
        expense: NewExpense {
            user_id,
            amount,
            category: category.to_string(),
            payment_method: payment.to_string(),
            is_necessary: true,
        },
        created_at: Utc::now(),
    });
}
