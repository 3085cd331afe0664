//! Central UI style constants and helpers.
pub const COLOR_HELP: u32 = 0x2ECC71; // Green
pub const COLOR_ALERT: u32 = 0xE74C3C; // Red

// Target widths for padded button labels (approx char counts before Discord trimming)
pub const BTN_W_NARROW: usize = 10; // category / payment choices
pub const BTN_W_STD: usize = 16; // necessity yes/no

/// Pads a label with trailing spaces so rows of buttons line up better.
/// Discord collapses long runs of trailing spaces, so the pad is clamped to 2.
pub fn pad_label(label: &str, target_min: usize) -> String {
    let len = label.chars().count();
    if len >= target_min {
        return label.to_string();
    }
    format!("{label}{pad}", pad = " ".repeat((target_min - len).min(2)))
}

pub fn pad_std(label: &str) -> String {
    pad_label(label, BTN_W_STD)
}
pub fn pad_narrow(label: &str) -> String {
    pad_label(label, BTN_W_NARROW)
}

use serenity::builder::CreateEmbed;

/// Convenience builder for an alert/error-styled embed.
pub fn error_embed<T: Into<String>, U: Into<String>>(title: T, description: U) -> CreateEmbed {
    CreateEmbed::new()
        .title(title)
        .description(description)
        .color(COLOR_ALERT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_is_clamped() {
        assert_eq!(pad_label("Pix", 10), "Pix  ");
        assert_eq!(pad_label("Alimentação", 10), "Alimentação");
    }
}
