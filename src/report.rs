//! Report aggregation: period shortcuts, report kinds and the rendered report bodies.
//!
//! Every report issues exactly one listing/grouping read. The detailed view adds a
//! separate total query, made only when there is something to list.

use crate::database::ExpenseGateway;
use crate::database::models::{DateRange, ExpenseDetail, GroupField, GroupedTotal};
use crate::format::{format_currency, short_date};
use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;

pub const EMPTY_REPORT: &str = "Nenhum gasto neste período.";
/// Discord rejects message bodies longer than this.
pub const MAX_MESSAGE_LEN: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodShortcut {
    Today,
    Yesterday,
    CurrentMonth,
    PreviousMonth,
}

impl PeriodShortcut {
    pub const ALL: [PeriodShortcut; 4] = [
        PeriodShortcut::Today,
        PeriodShortcut::Yesterday,
        PeriodShortcut::CurrentMonth,
        PeriodShortcut::PreviousMonth,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::CurrentMonth => "curr_month",
            Self::PreviousMonth => "last_month",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Today => "Hoje",
            Self::Yesterday => "Ontem",
            Self::CurrentMonth => "Este Mês",
            Self::PreviousMonth => "Mês Passado",
        }
    }

    /// Concrete range for this shortcut relative to `today`.
    pub fn resolve(self, today: NaiveDate) -> DateRange {
        let first_of_month = today.with_day(1).unwrap_or(today);
        match self {
            Self::Today => DateRange::single_day(today),
            Self::Yesterday => DateRange::single_day(day_before(today)),
            Self::CurrentMonth => DateRange::new(first_of_month, today),
            Self::PreviousMonth => {
                let end = day_before(first_of_month);
                DateRange::new(end.with_day(1).unwrap_or(end), end)
            }
        }
    }
}

fn day_before(day: NaiveDate) -> NaiveDate {
    day.checked_sub_days(Days::new(1)).unwrap_or(day)
}

/// `05/03 a 12/03` label for manually typed ranges.
pub fn manual_label(range: DateRange) -> String {
    format!("{} a {}", short_date(range.start), short_date(range.end))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Detailed,
    ByCategory,
    ByPaymentMethod,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [
        ReportKind::Detailed,
        ReportKind::ByCategory,
        ReportKind::ByPaymentMethod,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Detailed => "extrato",
            Self::ByCategory => "categoria",
            Self::ByPaymentMethod => "pagamento",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Detailed => "Extrato Detalhado",
            Self::ByCategory => "Por Categoria",
            Self::ByPaymentMethod => "Por Pagamento",
        }
    }

    fn group_field(self) -> Option<GroupField> {
        match self {
            Self::Detailed => None,
            Self::ByCategory => Some(GroupField::Category),
            Self::ByPaymentMethod => Some(GroupField::PaymentMethod),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// No expenses in the period. Not an error.
    Empty,
    Ready(String),
}

impl ReportOutcome {
    pub fn into_text(self) -> String {
        match self {
            ReportOutcome::Empty => EMPTY_REPORT.to_string(),
            ReportOutcome::Ready(text) => text,
        }
    }
}

pub async fn build_report(
    gateway: &dyn ExpenseGateway,
    user_id: u64,
    range: DateRange,
    kind: ReportKind,
) -> ReportOutcome {
    match kind.group_field() {
        None => {
            let rows = gateway.read_detail(user_id, range).await;
            if rows.is_empty() {
                return ReportOutcome::Empty;
            }
            let total = gateway.read_total(user_id, range).await;
            ReportOutcome::Ready(render_detail(range, &rows, total))
        }
        Some(field) => {
            let rows = gateway.read_grouped(user_id, range, field).await;
            if rows.is_empty() {
                return ReportOutcome::Empty;
            }
            ReportOutcome::Ready(render_grouped(field, &rows))
        }
    }
}

pub fn render_detail(range: DateRange, rows: &[ExpenseDetail], total: Decimal) -> String {
    let header = format!(
        "**Extrato ({} - {})**\n\n",
        short_date(range.start),
        short_date(range.end)
    );
    let footer = format!("\n**TOTAL: {}**", format_currency(total));
    let lines = rows.iter().map(|r| {
        format!(
            "• {} ({} - {})\n",
            format_currency(r.amount),
            r.category,
            r.payment_method
        )
    });
    assemble(header, lines, rows.len(), footer)
}

/// Grand total is the sum of the rows shown, not a separate query.
pub fn render_grouped(field: GroupField, rows: &[GroupedTotal]) -> String {
    let header = match field {
        GroupField::Category => "**Resumo por Categoria:**\n\n",
        GroupField::PaymentMethod => "**Resumo por Pagamento:**\n\n",
    }
    .to_string();
    let grand_total: Decimal = rows.iter().map(|r| r.total).sum();
    let footer = format!("\n**Total Geral:** {}", format_currency(grand_total));
    let lines = rows
        .iter()
        .map(|r| format!("▫️ **{}:** {}\n", r.label, format_currency(r.total)));
    assemble(header, lines, rows.len(), footer)
}

// Joins header, lines and footer, dropping trailing lines (with a count) once the
// message would exceed the transport limit.
fn assemble(
    header: String,
    lines: impl Iterator<Item = String>,
    line_count: usize,
    footer: String,
) -> String {
    // Room for the "omitted" note.
    const NOTE_RESERVE: usize = 48;
    let budget = MAX_MESSAGE_LEN.saturating_sub(footer.chars().count() + NOTE_RESERVE);
    let mut body = header;
    let mut used = body.chars().count();
    let mut shown = 0usize;
    for line in lines {
        let len = line.chars().count();
        if used + len > budget {
            break;
        }
        used += len;
        body.push_str(&line);
        shown += 1;
    }
    if shown < line_count {
        body.push_str(&format!("… e mais {} lançamento(s)\n", line_count - shown));
    }
    body.push_str(&footer);
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn shortcuts_resolve_against_today() {
        let today = d(2024, 3, 15);
        assert_eq!(
            PeriodShortcut::Today.resolve(today),
            DateRange::single_day(today)
        );
        assert_eq!(
            PeriodShortcut::Yesterday.resolve(today),
            DateRange::single_day(d(2024, 3, 14))
        );
        assert_eq!(
            PeriodShortcut::CurrentMonth.resolve(today),
            DateRange::new(d(2024, 3, 1), today)
        );
        assert_eq!(
            PeriodShortcut::PreviousMonth.resolve(today),
            DateRange::new(d(2024, 2, 1), d(2024, 2, 29))
        );
    }

    #[test]
    fn previous_month_crosses_year() {
        assert_eq!(
            PeriodShortcut::PreviousMonth.resolve(d(2025, 1, 1)),
            DateRange::new(d(2024, 12, 1), d(2024, 12, 31))
        );
        assert_eq!(
            PeriodShortcut::Yesterday.resolve(d(2025, 1, 1)),
            DateRange::single_day(d(2024, 12, 31))
        );
    }

    #[test]
    fn keys_round_trip() {
        for p in PeriodShortcut::ALL {
            assert_eq!(PeriodShortcut::from_key(p.key()), Some(p));
        }
        for k in ReportKind::ALL {
            assert_eq!(ReportKind::from_key(k.key()), Some(k));
        }
        assert_eq!(PeriodShortcut::from_key("custom"), None);
    }

    #[test]
    fn grouped_total_is_sum_of_rows() {
        let rows = vec![
            GroupedTotal {
                label: "Mercado".into(),
                total: Decimal::new(10050, 2),
            },
            GroupedTotal {
                label: "Lazer".into(),
                total: Decimal::new(2000, 2),
            },
        ];
        let text = render_grouped(GroupField::Category, &rows);
        assert!(text.starts_with("**Resumo por Categoria:**"));
        assert!(text.contains("▫️ **Mercado:** R$ 100,50"));
        assert!(text.ends_with("**Total Geral:** R$ 120,50"));
    }

    #[test]
    fn long_listing_is_truncated_under_limit() {
        let rows: Vec<GroupedTotal> = (0..400)
            .map(|i| GroupedTotal {
                label: format!("Categoria {i}"),
                total: Decimal::ONE,
            })
            .collect();
        let text = render_grouped(GroupField::PaymentMethod, &rows);
        assert!(text.chars().count() <= MAX_MESSAGE_LEN);
        assert!(text.contains("… e mais"));
        assert!(text.ends_with("**Total Geral:** R$ 400,00"));
    }
}
