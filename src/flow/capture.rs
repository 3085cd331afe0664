//! Expense capture: amount → category → payment method → necessity → save.

use super::{Advance, Choice, FlowContext, FlowState, Input, Prompt, Reply, Selection, Tone, Transition, rows_of};
use crate::constants::{
    CATEGORIES, CATEGORY_ROW_WIDTH, MAX_CUSTOM_LABEL_LEN, OTHER_LABEL, PAYMENT_METHODS,
    PAYMENT_ROW_WIDTH, is_known_category, is_known_payment_method,
};
use crate::database::models::NewExpense;
use crate::format::{ParseError, format_currency, parse_amount};
use rust_decimal::Decimal;

pub const ASK_AMOUNT: &str = "Digite o **valor** do gasto (ex: 15,90):";
pub const INVALID_AMOUNT: &str = "Valor inválido. Digite apenas números (ex: 10.50).";
pub const NON_POSITIVE_AMOUNT: &str = "O valor precisa ser maior que zero.";
pub const AMOUNT_TOO_LARGE: &str = "Valor muito alto. O máximo é R$ 9.999.999.999,99.";
pub const ASK_CUSTOM_CATEGORY: &str = "Digite o nome da categoria:";
pub const ASK_CUSTOM_PAYMENT: &str = "Digite a forma de pagamento:";
pub const SAVE_FAILED: &str = "Erro ao salvar no banco de dados.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureStep {
    AwaitingAmount,
    AwaitingCategory {
        amount: Decimal,
    },
    AwaitingCategoryCustom {
        amount: Decimal,
    },
    AwaitingPaymentMethod {
        amount: Decimal,
        category: String,
    },
    AwaitingPaymentMethodCustom {
        amount: Decimal,
        category: String,
    },
    AwaitingNecessity {
        amount: Decimal,
        category: String,
        payment_method: String,
    },
}

pub fn begin() -> (CaptureStep, Vec<Reply>) {
    (CaptureStep::AwaitingAmount, vec![Reply::send(ASK_AMOUNT)])
}

fn stay(step: CaptureStep, replies: Vec<Reply>) -> Advance {
    Advance::Moved(Transition::stay(FlowState::Capture(step), replies))
}

fn reject(step: CaptureStep) -> Advance {
    Advance::Rejected(FlowState::Capture(step))
}

pub async fn advance(step: CaptureStep, input: Input, ctx: &FlowContext<'_>) -> Advance {
    use CaptureStep::*;
    match (step, input) {
        (AwaitingAmount, Input::Text(text)) => match parse_amount(&text) {
            Ok(amount) => stay(AwaitingCategory { amount }, vec![Reply::Send(category_prompt())]),
            Err(ParseError::NonPositiveAmount) => {
                stay(AwaitingAmount, vec![Reply::send(NON_POSITIVE_AMOUNT)])
            }
            Err(ParseError::AmountTooLarge) => {
                stay(AwaitingAmount, vec![Reply::send(AMOUNT_TOO_LARGE)])
            }
            Err(_) => stay(AwaitingAmount, vec![Reply::send(INVALID_AMOUNT)]),
        },

        (AwaitingCategory { amount }, Input::Select(Selection::CategoryOther)) => stay(
            AwaitingCategoryCustom { amount },
            vec![
                Reply::Finalize(format!("Categoria: {OTHER_LABEL}")),
                Reply::send(ASK_CUSTOM_CATEGORY),
            ],
        ),
        (AwaitingCategory { amount }, Input::Select(Selection::Category(label)))
            if is_known_category(&label) =>
        {
            let prompt = payment_prompt(&label);
            stay(
                AwaitingPaymentMethod {
                    amount,
                    category: label.clone(),
                },
                vec![Reply::Finalize(format!("Categoria: {label}")), Reply::Send(prompt)],
            )
        }
        (AwaitingCategoryCustom { amount }, Input::Text(text)) => {
            match custom_label(&text, ASK_CUSTOM_CATEGORY) {
                Ok(category) => {
                    let prompt = payment_prompt(&category);
                    stay(
                        AwaitingPaymentMethod { amount, category },
                        vec![Reply::Send(prompt)],
                    )
                }
                Err(reprompt) => {
                    stay(AwaitingCategoryCustom { amount }, vec![Reply::send(reprompt)])
                }
            }
        }

        (AwaitingPaymentMethod { amount, category }, Input::Select(Selection::PaymentMethodOther)) => {
            stay(
                AwaitingPaymentMethodCustom { amount, category },
                vec![
                    Reply::Finalize(format!("Pagamento: {OTHER_LABEL}")),
                    Reply::send(ASK_CUSTOM_PAYMENT),
                ],
            )
        }
        (
            AwaitingPaymentMethod { amount, category },
            Input::Select(Selection::PaymentMethod(label)),
        ) if is_known_payment_method(&label) => stay(
            AwaitingNecessity {
                amount,
                category,
                payment_method: label.clone(),
            },
            vec![
                Reply::Finalize(format!("Pagamento: {label}")),
                Reply::Send(necessity_prompt()),
            ],
        ),
        (AwaitingPaymentMethodCustom { amount, category }, Input::Text(text)) => {
            match custom_label(&text, ASK_CUSTOM_PAYMENT) {
                Ok(payment_method) => stay(
                    AwaitingNecessity {
                        amount,
                        category,
                        payment_method,
                    },
                    vec![Reply::Send(necessity_prompt())],
                ),
                Err(reprompt) => stay(
                    AwaitingPaymentMethodCustom { amount, category },
                    vec![Reply::send(reprompt)],
                ),
            }
        }

        (
            AwaitingNecessity {
                amount,
                category,
                payment_method,
            },
            Input::Select(Selection::Necessity(is_necessary)),
        ) => {
            let expense = NewExpense {
                user_id: ctx.user_id,
                amount,
                category,
                payment_method,
                is_necessary,
            };
            let mut replies = vec![Reply::Finalize(format!(
                "Necessidade: {}",
                necessity_label(is_necessary)
            ))];
            // The flow ends whether or not the write succeeds.
            if ctx.gateway.write_expense(&expense).await {
                tracing::info!(target="flow.capture", user_id=ctx.user_id, amount=%expense.amount, "expense saved");
                replies.push(Reply::send(format!(
                    "**Gasto Salvo!**\n{} em {} ({})",
                    format_currency(expense.amount),
                    expense.category,
                    expense.payment_method
                )));
            } else {
                replies.push(Reply::send(SAVE_FAILED));
            }
            Advance::Moved(Transition::done(replies))
        }

        (step, _) => reject(step),
    }
}

/// Reply sent when a custom label is longer than [`MAX_CUSTOM_LABEL_LEN`].
pub fn label_too_long() -> String {
    format!("Nome muito longo (máximo {MAX_CUSTOM_LABEL_LEN} caracteres). Digite novamente:")
}

// Trimmed custom label, or the text to re-prompt with.
fn custom_label(text: &str, ask: &str) -> Result<String, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ask.to_string());
    }
    if trimmed.chars().count() > MAX_CUSTOM_LABEL_LEN {
        return Err(label_too_long());
    }
    Ok(trimmed.to_string())
}

pub fn necessity_label(is_necessary: bool) -> &'static str {
    if is_necessary { "Essencial" } else { "Supérfluo" }
}

pub fn category_prompt() -> Prompt {
    let mut choices: Vec<Choice> = CATEGORIES
        .iter()
        .map(|c| Choice::new(Selection::Category((*c).to_string()), *c, Tone::Primary))
        .collect();
    choices.push(Choice::new(Selection::CategoryOther, OTHER_LABEL, Tone::Secondary));
    Prompt::with_rows(
        "Selecione a **Categoria**:",
        rows_of(choices, CATEGORY_ROW_WIDTH),
    )
}

pub fn payment_prompt(category: &str) -> Prompt {
    let mut choices: Vec<Choice> = PAYMENT_METHODS
        .iter()
        .map(|p| Choice::new(Selection::PaymentMethod((*p).to_string()), *p, Tone::Primary))
        .collect();
    choices.push(Choice::new(Selection::PaymentMethodOther, OTHER_LABEL, Tone::Secondary));
    Prompt::with_rows(
        format!("Qual a **Forma de Pagamento** para {category}?"),
        rows_of(choices, PAYMENT_ROW_WIDTH),
    )
}

pub fn necessity_prompt() -> Prompt {
    Prompt::with_rows(
        "É um gasto **Essencial**?",
        vec![vec![
            Choice::new(Selection::Necessity(true), "Sim (Essencial)", Tone::Success),
            Choice::new(Selection::Necessity(false), "Não (Supérfluo)", Tone::Danger),
        ]],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_prompt_ends_with_other() {
        let prompt = category_prompt();
        let flat: Vec<&Choice> = prompt.rows.iter().flatten().collect();
        assert_eq!(flat.len(), CATEGORIES.len() + 1);
        assert_eq!(flat.last().map(|c| &c.selection), Some(&Selection::CategoryOther));
        assert!(prompt.rows.iter().all(|r| r.len() <= CATEGORY_ROW_WIDTH));
    }

    #[test]
    fn payment_prompt_pairs_buttons() {
        let prompt = payment_prompt("Mercado");
        assert!(prompt.text.contains("Mercado"));
        assert_eq!(prompt.rows.len(), 3);
        assert_eq!(prompt.rows[2].len(), 2);
    }
}
