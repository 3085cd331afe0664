use crate::interactions::util::{Origin, deliver};
use crate::{AppState, commands, interactions};
use serenity::async_trait;
use serenity::builder::CreateCommand;
use serenity::client::Context;
use serenity::model::application::{Command as AppCommand, Interaction};
use serenity::model::{channel::Message, gateway::Ready, id::GuildId};
use serenity::prelude::EventHandler;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Novo,
    Consultar,
    Cancelar,
    Unknown,
}

impl FromStr for Command {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "start" | "help" | "h" => Ok(Command::Help),
            "novo" => Ok(Command::Novo),
            "consultar" => Ok(Command::Consultar),
            "cancelar" => Ok(Command::Cancelar),
            _ => Ok(Command::Unknown),
        }
    }
}

/// Extracts the command word from a prefixed message, e.g. `!novo` → `novo`.
pub fn parse_prefixed<'a>(content: &'a str, prefix: &str) -> Option<&'a str> {
    content
        .trim_start()
        .strip_prefix(prefix)?
        .split_whitespace()
        .next()
}

pub fn commands_to_register() -> Vec<CreateCommand> {
    vec![
        commands::help::register_start(),
        commands::help::register(),
        commands::novo::register(),
        commands::consultar::register(),
        commands::cancelar::register(),
    ]
}

pub struct Handler {
    /// When set, slash commands are registered here and other guilds are ignored.
    pub allowed_guild_id: Option<GuildId>,
}

impl Handler {
    fn accepts_guild(&self, guild_id: Option<GuildId>) -> bool {
        // Direct messages are always accepted.
        match (self.allowed_guild_id, guild_id) {
            (Some(allowed), Some(g)) => allowed == g,
            _ => true,
        }
    }
}

async fn app_state(ctx: &Context) -> Option<Arc<AppState>> {
    let state = AppState::from_ctx(ctx).await;
    if state.is_none() {
        tracing::error!(target = "handler", "AppState missing from TypeMap");
    }
    state
}

#[async_trait]
impl EventHandler for Handler {
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Some(app_state) = app_state(&ctx).await else {
            return;
        };
        if let Interaction::Command(command) = &interaction {
            if !self.accepts_guild(command.guild_id) {
                return;
            }
            match command.data.name.as_str() {
                "start" | "help" => commands::help::run_slash(&ctx, command, &app_state).await,
                "novo" => commands::novo::run_slash(&ctx, command, &app_state).await,
                "consultar" => commands::consultar::run_slash(&ctx, command, &app_state).await,
                "cancelar" => commands::cancelar::run_slash(&ctx, command, &app_state).await,
                _ => {}
            }
        } else if let Interaction::Component(component) = &interaction {
            if !self.accepts_guild(component.guild_id) {
                return;
            }
            let command_family = interactions::ids::family(&component.data.custom_id);
            match command_family {
                interactions::ids::EXPENSE_FAMILY | interactions::ids::REPORT_FAMILY => {
                    interactions::expense_handler::handle(&ctx, component, app_state).await
                }
                _ => {}
            }
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot || !self.accepts_guild(msg.guild_id) {
            return;
        }
        let Some(app_state) = app_state(&ctx).await else {
            return;
        };

        if let Some(command_str) = parse_prefixed(&msg.content, &app_state.prefix) {
            match Command::from_str(command_str).unwrap_or(Command::Unknown) {
                Command::Help => commands::help::run_prefix(&ctx, &msg, &app_state).await,
                Command::Novo => commands::novo::run_prefix(&ctx, &msg, &app_state).await,
                Command::Consultar => {
                    commands::consultar::run_prefix(&ctx, &msg, &app_state).await
                }
                Command::Cancelar => commands::cancelar::run_prefix(&ctx, &msg, &app_state).await,
                Command::Unknown => {}
            }
            return;
        }

        // Free text only matters to a session waiting for typed input in this channel.
        let user_id = msg.author.id.get();
        let channel_id = msg.channel_id.get();
        if !app_state.conversations.awaits_text(user_id, channel_id).await {
            return;
        }
        let flow_ctx = app_state.flow_context(user_id);
        let dispatch = app_state
            .conversations
            .dispatch_text(user_id, channel_id, msg.content.clone(), &flow_ctx)
            .await;
        if let crate::flow::Dispatch::Replied { replies, .. } = dispatch {
            deliver(&ctx, &app_state, Origin::Message(&msg), replies).await;
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!(target="handler", user=%ready.user.name, "connected and ready");
        let result = match self.allowed_guild_id {
            Some(guild_id) => guild_id
                .set_commands(&ctx.http, commands_to_register())
                .await
                .map(|c| c.len()),
            None => AppCommand::set_global_commands(&ctx.http, commands_to_register())
                .await
                .map(|c| c.len()),
        };
        match result {
            Ok(count) => tracing::info!(target="handler", count, "registered slash commands"),
            Err(e) => tracing::error!(target="handler", error=?e, "error registering slash commands"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed_commands_are_extracted() {
        assert_eq!(parse_prefixed("!novo", "!"), Some("novo"));
        assert_eq!(parse_prefixed("  !consultar agora", "!"), Some("consultar"));
        assert_eq!(parse_prefixed("novo", "!"), None);
        assert_eq!(parse_prefixed("!", "!"), None);
    }

    #[test]
    fn command_words_map_to_commands() {
        assert_eq!(Command::from_str("start"), Ok(Command::Help));
        assert_eq!(Command::from_str("HELP"), Ok(Command::Help));
        assert_eq!(Command::from_str("novo"), Ok(Command::Novo));
        assert_eq!(Command::from_str("cancelar"), Ok(Command::Cancelar));
        assert_eq!(Command::from_str("xyz"), Ok(Command::Unknown));
    }

    #[test]
    fn guild_filter_allows_dms() {
        let handler = Handler {
            allowed_guild_id: Some(GuildId::new(42)),
        };
        assert!(handler.accepts_guild(None));
        assert!(handler.accepts_guild(Some(GuildId::new(42))));
        assert!(!handler.accepts_guild(Some(GuildId::new(7))));
    }
}
