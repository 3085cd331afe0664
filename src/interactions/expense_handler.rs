//! Handles button presses for the capture (`exp_*`) and report (`rep_*`) flows.

use super::ids::parse_selection;
use super::util::{Origin, defer_component, deliver, notify_component};
use crate::AppState;
use crate::flow::Dispatch;
use serenity::model::application::ComponentInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

pub const STALE_TITLE: &str = "Opção indisponível";
pub const STALE_TEXT: &str = "Esta opção não está mais disponível.";
pub const NO_SESSION_TEXT: &str =
    "Nenhuma operação em andamento. Use novo ou consultar para começar.";

#[tracing::instrument(level="debug", skip(ctx, component, app_state), fields(user_id = component.user.id.get(), cid = %component.data.custom_id))]
pub async fn handle(ctx: &Context, component: &ComponentInteraction, app_state: Arc<AppState>) {
    defer_component(ctx, component).await;

    let Some(selection) = parse_selection(&component.data.custom_id) else {
        notify_component(ctx, component, STALE_TITLE, STALE_TEXT).await;
        return;
    };

    let user_id = component.user.id.get();
    let flow_ctx = app_state.flow_context(user_id);
    let dispatch = app_state
        .conversations
        .dispatch_selection(user_id, component.message.id.get(), selection, &flow_ctx)
        .await;

    match dispatch {
        Dispatch::Replied { replies, .. } => {
            deliver(ctx, &app_state, Origin::Component(component), replies).await;
        }
        Dispatch::NoSession => {
            notify_component(ctx, component, STALE_TITLE, NO_SESSION_TEXT).await;
        }
        Dispatch::Stale | Dispatch::Ignored => {
            notify_component(ctx, component, STALE_TITLE, STALE_TEXT).await;
        }
    }
}
