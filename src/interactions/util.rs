//! Shared interaction helpers: acknowledging components and executing flow replies
//! against Discord in the order the engine produced them.
use crate::AppState;
use crate::flow::{Prompt, Reply};
use crate::ui::buttons::choice_rows;
use crate::ui::style::error_embed;
use serenity::builder::{
    CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, CreateMessage, EditInteractionResponse, EditMessage,
};
use serenity::model::application::{CommandInteraction, ComponentInteraction};
use serenity::model::channel::Message;
use serenity::model::id::{ChannelId, MessageId};
use serenity::prelude::Context;

/// Where the turn came from; decides how the first reply is delivered.
#[derive(Clone, Copy)]
pub enum Origin<'a> {
    Message(&'a Message),
    Command(&'a CommandInteraction),
    /// Already deferred with `defer_component`.
    Component(&'a ComponentInteraction),
}

impl Origin<'_> {
    pub fn channel_id(&self) -> ChannelId {
        match self {
            Origin::Message(m) => m.channel_id,
            Origin::Command(c) => c.channel_id,
            Origin::Component(c) => c.channel_id,
        }
    }

    pub fn user_id(&self) -> u64 {
        match self {
            Origin::Message(m) => m.author.id.get(),
            Origin::Command(c) => c.user.id.get(),
            Origin::Component(c) => c.user.id.get(),
        }
    }
}

/// Acknowledge a component interaction (non-ephemeral) ignoring duplicate/late errors.
pub async fn defer_component(ctx: &Context, c: &ComponentInteraction) {
    if let Err(e) = c.defer(&ctx.http).await {
        tracing::debug!(target="ui.defer", cid=%c.data.custom_id, error=?e, "defer failed (already acknowledged?)");
    }
}

/// Edit original interaction response; logs failure with a tag for observability.
pub async fn edit_component(
    ctx: &Context,
    c: &ComponentInteraction,
    tag: &str,
    builder: EditInteractionResponse,
) {
    if let Err(e) = c.edit_response(&ctx.http, builder).await {
        tracing::error!(target="ui.edit", cid=%c.data.custom_id, tag=%tag, error=?e, "edit_response failed");
    }
}

/// Private notice after a deferred component, e.g. for stale buttons.
pub async fn notify_component(ctx: &Context, c: &ComponentInteraction, title: &str, text: &str) {
    let builder = CreateInteractionResponseFollowup::new()
        .embed(error_embed(title, text))
        .ephemeral(true);
    if let Err(e) = c.create_followup(&ctx.http, builder).await {
        tracing::error!(target="ui.followup", cid=%c.data.custom_id, error=?e, "followup failed");
    }
}

/// Removes the buttons from a prompt that no longer belongs to a live session.
pub async fn strip_prompt(ctx: &Context, channel_id: ChannelId, message_id: u64, text: &str) {
    let builder = EditMessage::new().content(text).components(vec![]);
    if let Err(e) = channel_id
        .edit_message(&ctx.http, MessageId::new(message_id), builder)
        .await
    {
        tracing::debug!(target="ui.edit", message_id, error=?e, "could not strip old prompt");
    }
}

/// Executes replies in order. Finalize edits the selection's message; Send posts a new
/// message. The last sent prompt with choices becomes the session's active prompt.
pub async fn deliver(ctx: &Context, app_state: &AppState, origin: Origin<'_>, replies: Vec<Reply>) {
    let user_id = origin.user_id();
    let mut command_answered = false;
    for reply in replies {
        match reply {
            Reply::Finalize(text) => match origin {
                Origin::Component(c) => {
                    edit_component(
                        ctx,
                        c,
                        "finalize",
                        EditInteractionResponse::new().content(text).components(vec![]),
                    )
                    .await;
                }
                _ => {
                    tracing::warn!(target="ui.deliver", user_id, "finalize without a component origin");
                }
            },
            Reply::Send(prompt) => {
                let sent = match origin {
                    Origin::Command(cmd) if !command_answered => {
                        command_answered = true;
                        respond_to_command(ctx, cmd, &prompt).await
                    }
                    _ => send_prompt(ctx, origin.channel_id(), &prompt).await,
                };
                if prompt.has_choices()
                    && let Some(message_id) = sent
                {
                    app_state
                        .conversations
                        .attach_prompt(user_id, message_id.get())
                        .await;
                }
            }
        }
    }
}

async fn send_prompt(ctx: &Context, channel_id: ChannelId, prompt: &Prompt) -> Option<MessageId> {
    let builder = CreateMessage::new()
        .content(&prompt.text)
        .components(choice_rows(&prompt.rows));
    match channel_id.send_message(&ctx.http, builder).await {
        Ok(m) => Some(m.id),
        Err(e) => {
            tracing::error!(target="ui.send", channel_id=channel_id.get(), error=?e, "send_message failed");
            None
        }
    }
}

async fn respond_to_command(
    ctx: &Context,
    cmd: &CommandInteraction,
    prompt: &Prompt,
) -> Option<MessageId> {
    let builder = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(&prompt.text)
            .components(choice_rows(&prompt.rows)),
    );
    if let Err(e) = cmd.create_response(&ctx.http, builder).await {
        tracing::error!(target="ui.respond", command=%cmd.data.name, error=?e, "create_response failed");
        return None;
    }
    if !prompt.has_choices() {
        return None;
    }
    match cmd.get_response(&ctx.http).await {
        Ok(m) => Some(m.id),
        Err(e) => {
            tracing::debug!(target="ui.respond", command=%cmd.data.name, error=?e, "get_response failed");
            None
        }
    }
}

/// Answers a command with plain text, whichever way it was invoked.
pub async fn reply_text(ctx: &Context, origin: Origin<'_>, text: &str) {
    let result = match origin {
        Origin::Message(m) => m.reply(&ctx.http, text).await.map(|_| ()),
        Origin::Command(c) => {
            c.create_response(
                &ctx.http,
                CreateInteractionResponse::Message(
                    CreateInteractionResponseMessage::new().content(text),
                ),
            )
            .await
        }
        Origin::Component(c) => c
            .create_followup(
                &ctx.http,
                CreateInteractionResponseFollowup::new().content(text),
            )
            .await
            .map(|_| ()),
    };
    if let Err(e) = result {
        tracing::error!(target="ui.reply", error=?e, "reply failed");
    }
}
