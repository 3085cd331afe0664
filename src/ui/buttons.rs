//! Central button construction helpers ensuring consistent padding and style.
use crate::flow::{Choice, Tone};
use crate::interactions::ids::selection_id;
use crate::ui::style::{pad_narrow, pad_std};
use serenity::builder::{CreateActionRow, CreateButton};
use serenity::model::application::ButtonStyle;

pub struct Btn;
impl Btn {
    pub fn primary(id: &str, label: &str) -> CreateButton {
        CreateButton::new(id)
            .label(pad_narrow(label))
            .style(ButtonStyle::Primary)
    }
    pub fn success(id: &str, label: &str) -> CreateButton {
        CreateButton::new(id)
            .label(pad_std(label))
            .style(ButtonStyle::Success)
    }
    pub fn secondary(id: &str, label: &str) -> CreateButton {
        CreateButton::new(id)
            .label(pad_narrow(label))
            .style(ButtonStyle::Secondary)
    }
    pub fn danger(id: &str, label: &str) -> CreateButton {
        CreateButton::new(id)
            .label(pad_std(label))
            .style(ButtonStyle::Danger)
    }

    pub fn from_choice(choice: &Choice) -> CreateButton {
        let id = selection_id(&choice.selection);
        match choice.tone {
            Tone::Primary => Self::primary(&id, &choice.label),
            Tone::Secondary => Self::secondary(&id, &choice.label),
            Tone::Success => Self::success(&id, &choice.label),
            Tone::Danger => Self::danger(&id, &choice.label),
        }
    }
}

/// One action row per row of choices; empty rows are skipped.
pub fn choice_rows(rows: &[Vec<Choice>]) -> Vec<CreateActionRow> {
    rows.iter()
        .filter(|r| !r.is_empty())
        .map(|r| CreateActionRow::Buttons(r.iter().map(Btn::from_choice).collect()))
        .collect()
}
