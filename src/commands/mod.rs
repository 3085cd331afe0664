// src/commands/mod.rs
// Declares the command modules and the shared helpers that start or abort flows.

pub mod cancelar;
pub mod consultar;
pub mod help;
pub mod novo;

use crate::AppState;
use crate::flow::FlowKind;
use crate::interactions::util::{Origin, deliver, reply_text, strip_prompt};
use serenity::model::id::ChannelId;
use serenity::prelude::Context;

pub const CANCELLED: &str = "Operação cancelada.";
pub const NOTHING_TO_CANCEL: &str = "Nenhuma operação em andamento.";

/// Starts a capture or report flow for the invoking user, tidying any displaced prompt.
pub(crate) async fn start_flow(ctx: &Context, app_state: &AppState, origin: Origin<'_>, kind: FlowKind) {
    let channel_id = origin.channel_id();
    let started = app_state
        .conversations
        .start(origin.user_id(), channel_id.get(), kind)
        .await;
    if let Some(old) = started.replaced
        && let Some(message_id) = old.prompt_message_id
    {
        strip_prompt(ctx, ChannelId::new(old.channel_id), message_id, CANCELLED).await;
    }
    tracing::info!(target="flow", user_id=origin.user_id(), kind=?kind, "flow started");
    deliver(ctx, app_state, origin, started.replies).await;
}

pub(crate) async fn cancel_flow(ctx: &Context, app_state: &AppState, origin: Origin<'_>) {
    match app_state.conversations.cancel(origin.user_id()).await {
        Some(old) => {
            if let Some(message_id) = old.prompt_message_id {
                strip_prompt(ctx, ChannelId::new(old.channel_id), message_id, CANCELLED).await;
            }
            reply_text(ctx, origin, CANCELLED).await;
        }
        None => reply_text(ctx, origin, NOTHING_TO_CANCEL).await,
    }
}
