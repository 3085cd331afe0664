//! `consultar`: choose a period and a report type.

use super::start_flow;
use crate::AppState;
use crate::flow::FlowKind;
use crate::interactions::util::Origin;
use serenity::builder::CreateCommand;
use serenity::model::application::CommandInteraction;
use serenity::model::channel::Message;
use serenity::prelude::*;

pub fn register() -> CreateCommand {
    CreateCommand::new("consultar").description("Relatórios e extratos de gastos.")
}

pub async fn run_prefix(ctx: &Context, msg: &Message, app_state: &AppState) {
    start_flow(ctx, app_state, Origin::Message(msg), FlowKind::Report).await;
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction, app_state: &AppState) {
    start_flow(ctx, app_state, Origin::Command(interaction), FlowKind::Report).await;
}
