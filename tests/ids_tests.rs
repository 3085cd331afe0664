use guarda_din_bot::constants::{CATEGORIES, PAYMENT_METHODS};
use guarda_din_bot::flow::Selection;
use guarda_din_bot::interactions::ids::{
    EXPENSE_FAMILY, REPORT_FAMILY, family, parse_selection, selection_id,
};
use guarda_din_bot::report::{PeriodShortcut, ReportKind};

#[test]
fn every_button_id_parses_back() {
    let mut all = vec![
        Selection::CategoryOther,
        Selection::PaymentMethodOther,
        Selection::Necessity(true),
        Selection::Necessity(false),
        Selection::PeriodManual,
    ];
    all.extend(CATEGORIES.iter().map(|c| Selection::Category(c.to_string())));
    all.extend(PAYMENT_METHODS.iter().map(|p| Selection::PaymentMethod(p.to_string())));
    all.extend(PeriodShortcut::ALL.into_iter().map(Selection::Period));
    all.extend(ReportKind::ALL.into_iter().map(Selection::Report));

    for selection in all {
        let id = selection_id(&selection);
        assert!(id.len() <= 100, "custom_id too long: {id}");
        assert_eq!(parse_selection(&id), Some(selection), "id {id}");
    }
}

#[test]
fn families_route_to_the_right_flow() {
    assert_eq!(family(&selection_id(&Selection::Necessity(true))), EXPENSE_FAMILY);
    assert_eq!(
        family(&selection_id(&Selection::Period(PeriodShortcut::Today))),
        REPORT_FAMILY
    );
    assert_eq!(family("saga_tavern"), "saga");
}

#[test]
fn known_ids_match_wire_format() {
    assert_eq!(parse_selection("exp_cat_Mercado"), Some(Selection::Category("Mercado".into())));
    assert_eq!(parse_selection("exp_pay_VR/VA"), Some(Selection::PaymentMethod("VR/VA".into())));
    assert_eq!(
        parse_selection("rep_period_last_month"),
        Some(Selection::Period(PeriodShortcut::PreviousMonth))
    );
    assert_eq!(
        parse_selection("rep_view_extrato"),
        Some(Selection::Report(ReportKind::Detailed))
    );
}

#[test]
fn unknown_ids_are_rejected() {
    assert!(parse_selection("exp_cat_Viagem").is_none());
    assert!(parse_selection("exp_pay_").is_none());
    assert!(parse_selection("rep_period_tomorrow").is_none());
    assert!(parse_selection("rep_view_").is_none());
    assert!(parse_selection("exp_nec_maybe").is_none());
    assert!(parse_selection("").is_none());
}
