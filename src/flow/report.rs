//! Report flow: period → (manual start/end dates) → report type → render.

use super::{Advance, Choice, FlowContext, FlowState, Input, Prompt, Reply, Selection, Tone, Transition};
use crate::constants::SAME_DAY_SENTINEL;
use crate::database::models::DateRange;
use crate::format::parse_date_flexible;
use crate::report::{PeriodShortcut, ReportKind, build_report, manual_label};
use chrono::NaiveDate;

pub const ASK_PERIOD: &str = "**Período da consulta:**";
pub const ASK_START_DATE: &str = "Digite a data inicial (DD/MM/AAAA):";
pub const ASK_END_DATE: &str = "Digite a data final (ou 'ok' para ser igual à inicial):";
pub const INVALID_START_DATE: &str = "Data inválida. Use DD/MM/AAAA.";
pub const INVALID_END_DATE: &str = "Data inválida.";
pub const MANUAL_PERIOD_LABEL: &str = "Outra Data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportStep {
    AwaitingPeriodChoice,
    AwaitingStartDateManual,
    AwaitingEndDateManual { start: NaiveDate },
    AwaitingReportType { range: DateRange, label: String },
}

pub fn begin() -> (ReportStep, Vec<Reply>) {
    (
        ReportStep::AwaitingPeriodChoice,
        vec![Reply::Send(period_prompt())],
    )
}

fn stay(step: ReportStep, replies: Vec<Reply>) -> Advance {
    Advance::Moved(Transition::stay(FlowState::Report(step), replies))
}

pub async fn advance(step: ReportStep, input: Input, ctx: &FlowContext<'_>) -> Advance {
    use ReportStep::*;
    match (step, input) {
        (AwaitingPeriodChoice, Input::Select(Selection::Period(shortcut))) => {
            let range = shortcut.resolve(ctx.today);
            let label = shortcut.label().to_string();
            let prompt = report_type_prompt(&label);
            stay(
                AwaitingReportType { range, label: label.clone() },
                vec![Reply::Finalize(format!("Período: {label}")), Reply::Send(prompt)],
            )
        }
        (AwaitingPeriodChoice, Input::Select(Selection::PeriodManual)) => stay(
            AwaitingStartDateManual,
            vec![
                Reply::Finalize("Período: Personalizado".to_string()),
                Reply::send(ASK_START_DATE),
            ],
        ),

        (AwaitingStartDateManual, Input::Text(text)) => match parse_date_flexible(&text) {
            Ok(start) => stay(AwaitingEndDateManual { start }, vec![Reply::send(ASK_END_DATE)]),
            Err(_) => stay(AwaitingStartDateManual, vec![Reply::send(INVALID_START_DATE)]),
        },
        (AwaitingEndDateManual { start }, Input::Text(text)) => {
            let end = if text.trim().eq_ignore_ascii_case(SAME_DAY_SENTINEL) {
                Ok(start)
            } else {
                parse_date_flexible(&text)
            };
            match end {
                // start > end is passed through unchanged; the query then matches nothing.
                Ok(end) => {
                    let range = DateRange::new(start, end);
                    let label = manual_label(range);
                    let prompt = report_type_prompt(&label);
                    stay(AwaitingReportType { range, label }, vec![Reply::Send(prompt)])
                }
                Err(_) => stay(
                    AwaitingEndDateManual { start },
                    vec![Reply::send(INVALID_END_DATE)],
                ),
            }
        }

        (AwaitingReportType { range, .. }, Input::Select(Selection::Report(kind))) => {
            let outcome = build_report(ctx.gateway, ctx.user_id, range, kind).await;
            tracing::debug!(target="flow.report", user_id=ctx.user_id, kind=kind.key(), start=%range.start, end=%range.end, "report rendered");
            Advance::Moved(Transition::done(vec![
                Reply::Finalize(format!("Relatório: {}", kind.label())),
                Reply::send(outcome.into_text()),
            ]))
        }

        (step, _) => Advance::Rejected(FlowState::Report(step)),
    }
}

pub fn period_prompt() -> Prompt {
    let shortcut = |p: PeriodShortcut| Choice::new(Selection::Period(p), p.label(), Tone::Primary);
    Prompt::with_rows(
        ASK_PERIOD,
        vec![
            vec![
                shortcut(PeriodShortcut::Today),
                shortcut(PeriodShortcut::Yesterday),
            ],
            vec![
                shortcut(PeriodShortcut::CurrentMonth),
                shortcut(PeriodShortcut::PreviousMonth),
            ],
            vec![Choice::new(
                Selection::PeriodManual,
                MANUAL_PERIOD_LABEL,
                Tone::Secondary,
            )],
        ],
    )
}

pub fn report_type_prompt(label: &str) -> Prompt {
    Prompt::with_rows(
        format!("🔎 O que deseja ver de **{label}**?"),
        ReportKind::ALL
            .into_iter()
            .map(|k| vec![Choice::new(Selection::Report(k), k.label(), Tone::Primary)])
            .collect(),
    )
}
