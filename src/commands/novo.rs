//! `novo`: start recording an expense.

use super::start_flow;
use crate::AppState;
use crate::flow::FlowKind;
use crate::interactions::util::Origin;
use serenity::builder::CreateCommand;
use serenity::model::application::CommandInteraction;
use serenity::model::channel::Message;
use serenity::prelude::*;

pub fn register() -> CreateCommand {
    CreateCommand::new("novo").description("Cadastrar um gasto.")
}

pub async fn run_prefix(ctx: &Context, msg: &Message, app_state: &AppState) {
    start_flow(ctx, app_state, Origin::Message(msg), FlowKind::Capture).await;
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction, app_state: &AppState) {
    start_flow(ctx, app_state, Origin::Command(interaction), FlowKind::Capture).await;
}
