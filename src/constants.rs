// Fixed choices offered as buttons. "Outro" opens a free-text turn instead.
pub const CATEGORIES: &[&str] = &[
    "Mercado",
    "Alimentação",
    "Transporte",
    "Lazer",
    "Saúde",
    "Casa",
];
pub const PAYMENT_METHODS: &[&str] = &["Pix", "Crédito", "Débito", "Dinheiro", "VR/VA"];
pub const OTHER_LABEL: &str = "Outro";

/// Typed instead of an end date to reuse the start date.
pub const SAME_DAY_SENTINEL: &str = "ok";

// Buttons per action row (Discord caps rows at 5).
pub const CATEGORY_ROW_WIDTH: usize = 4;
pub const PAYMENT_ROW_WIDTH: usize = 2;

/// Longest custom category or payment method accepted, in characters.
/// Keeps echoed labels well inside Discord's message and button limits.
pub const MAX_CUSTOM_LABEL_LEN: usize = 50;

pub const DEFAULT_COMMAND_PREFIX: &str = "!";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

pub fn is_known_category(label: &str) -> bool {
    CATEGORIES.contains(&label)
}

pub fn is_known_payment_method(label: &str) -> bool {
    PAYMENT_METHODS.contains(&label)
}
