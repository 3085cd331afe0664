//! `start` / `help`: the static list of what the bot can do.

use crate::AppState;
use crate::ui::style::COLOR_HELP;
use serenity::builder::{
    CreateCommand, CreateEmbed, CreateEmbedFooter, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateMessage,
};
use serenity::model::application::CommandInteraction;
use serenity::model::channel::Message;
use serenity::prelude::*;

pub const BOT_NAME: &str = "Guarda Din Bot";

struct CommandInfo {
    name: &'static str,
    description: &'static str,
    /// Shown in the list; hidden entries are aliases.
    listed: bool,
}

const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        name: "novo",
        description: "Cadastrar gasto (Rápido)",
        listed: true,
    },
    CommandInfo {
        name: "consultar",
        description: "Relatórios e Extratos",
        listed: true,
    },
    CommandInfo {
        name: "cancelar",
        description: "Cancelar operação atual",
        listed: true,
    },
    CommandInfo {
        name: "help",
        description: "Mostrar esta ajuda",
        listed: true,
    },
    CommandInfo {
        name: "start",
        description: "Mostrar esta ajuda",
        listed: false,
    },
];

/// Every command name the bot answers to, aliases included.
pub fn all_command_names() -> Vec<&'static str> {
    COMMANDS.iter().map(|c| c.name).collect()
}

/// Markdown body of the help message for the given text-command prefix.
pub fn help_text(prefix: &str) -> String {
    let mut text = String::from("Comandos disponíveis:\n");
    for c in COMMANDS.iter().filter(|c| c.listed) {
        text.push_str(&format!("`{prefix}{}` - {}\n", c.name, c.description));
    }
    text.push_str("\nUse o menu de comandos (/) ou digite o comando.");
    text
}

fn help_embed(prefix: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title(BOT_NAME)
        .description(help_text(prefix))
        .color(COLOR_HELP)
        .footer(CreateEmbedFooter::new("Valores em R$ · datas em DD/MM/AAAA"))
}

pub fn register() -> CreateCommand {
    CreateCommand::new("help").description("Mostra os comandos disponíveis.")
}

pub fn register_start() -> CreateCommand {
    CreateCommand::new("start").description("Mostra os comandos disponíveis.")
}

pub async fn run_prefix(ctx: &Context, msg: &Message, app_state: &AppState) {
    let builder = CreateMessage::new()
        .embed(help_embed(&app_state.prefix))
        .reference_message(msg);
    if let Err(e) = msg.channel_id.send_message(&ctx.http, builder).await {
        tracing::error!(target="cmd.help", error=?e, "failed to send help");
    }
}

pub async fn run_slash(ctx: &Context, interaction: &CommandInteraction, app_state: &AppState) {
    let builder = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .embed(help_embed(&app_state.prefix))
            .ephemeral(true),
    );
    if let Err(e) = interaction.create_response(&ctx.http, builder).await {
        tracing::error!(target="cmd.help", error=?e, "failed to respond to /help");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_prefixed_commands_without_aliases() {
        let text = help_text("!");
        assert!(text.contains("`!novo`"));
        assert!(text.contains("`!consultar`"));
        assert!(text.contains("`!cancelar`"));
        assert!(!text.contains("`!start`"));
    }
}
