//! `cancelar`: abort whatever flow the user has open.

use super::cancel_flow;
use crate::AppState;
use crate::interactions::util::Origin;
use serenity::builder::CreateCommand;
use serenity::model::application::CommandInteraction;
use serenity::model::channel::Message;
use serenity::prelude::*;

pub fn register() -> CreateCommand {
    CreateCommand::new("cancelar").description("Cancelar a operação atual.")
}

pub async fn run_prefix(ctx: &Context, msg: &Message, app_state: &AppState) {
    cancel_flow(ctx, app_state, Origin::Message(msg)).await;
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction, app_state: &AppState) {
    cancel_flow(ctx, app_state, Origin::Command(interaction)).await;
}
