//! Centralized custom_id strings for the expense and report buttons.
//! Every id is `<family>_<kind>_<payload>`; the family decides which handler gets it.

use crate::constants::{is_known_category, is_known_payment_method};
use crate::flow::Selection;
use crate::report::{PeriodShortcut, ReportKind};

pub const EXPENSE_FAMILY: &str = "exp";
pub const REPORT_FAMILY: &str = "rep";

pub const EXP_CATEGORY_PREFIX: &str = "exp_cat_"; // followed by category label
pub const EXP_CATEGORY_OTHER: &str = "exp_cat_other";
pub const EXP_PAYMENT_PREFIX: &str = "exp_pay_"; // followed by payment method label
pub const EXP_PAYMENT_OTHER: &str = "exp_pay_other";
pub const EXP_NECESSARY_YES: &str = "exp_nec_yes";
pub const EXP_NECESSARY_NO: &str = "exp_nec_no";
pub const REP_PERIOD_PREFIX: &str = "rep_period_"; // followed by shortcut key
pub const REP_PERIOD_MANUAL: &str = "rep_period_custom";
pub const REP_VIEW_PREFIX: &str = "rep_view_"; // followed by report kind key

/// The family segment before the first underscore.
pub fn family(id: &str) -> &str {
    id.split('_').next().unwrap_or("")
}

pub fn selection_id(selection: &Selection) -> String {
    match selection {
        Selection::Category(label) => format!("{EXP_CATEGORY_PREFIX}{label}"),
        Selection::CategoryOther => EXP_CATEGORY_OTHER.to_string(),
        Selection::PaymentMethod(label) => format!("{EXP_PAYMENT_PREFIX}{label}"),
        Selection::PaymentMethodOther => EXP_PAYMENT_OTHER.to_string(),
        Selection::Necessity(true) => EXP_NECESSARY_YES.to_string(),
        Selection::Necessity(false) => EXP_NECESSARY_NO.to_string(),
        Selection::Period(p) => format!("{REP_PERIOD_PREFIX}{}", p.key()),
        Selection::PeriodManual => REP_PERIOD_MANUAL.to_string(),
        Selection::Report(k) => format!("{REP_VIEW_PREFIX}{}", k.key()),
    }
}

/// Parses a custom_id back into a selection. Labels outside the fixed lists are rejected.
pub fn parse_selection(id: &str) -> Option<Selection> {
    match id {
        EXP_CATEGORY_OTHER => return Some(Selection::CategoryOther),
        EXP_PAYMENT_OTHER => return Some(Selection::PaymentMethodOther),
        EXP_NECESSARY_YES => return Some(Selection::Necessity(true)),
        EXP_NECESSARY_NO => return Some(Selection::Necessity(false)),
        REP_PERIOD_MANUAL => return Some(Selection::PeriodManual),
        _ => {}
    }
    if let Some(label) = id.strip_prefix(EXP_CATEGORY_PREFIX) {
        return is_known_category(label).then(|| Selection::Category(label.to_string()));
    }
    if let Some(label) = id.strip_prefix(EXP_PAYMENT_PREFIX) {
        return is_known_payment_method(label)
            .then(|| Selection::PaymentMethod(label.to_string()));
    }
    if let Some(key) = id.strip_prefix(REP_PERIOD_PREFIX) {
        return PeriodShortcut::from_key(key).map(Selection::Period);
    }
    if let Some(key) = id.strip_prefix(REP_VIEW_PREFIX) {
        return ReportKind::from_key(key).map(Selection::Report);
    }
    None
}
