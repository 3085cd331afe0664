use std::sync::Arc;

use anyhow::Context as _;
use serenity::model::gateway::GatewayIntents;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

use guarda_din_bot::config::Config;
use guarda_din_bot::database::{self, PgGateway};
use guarda_din_bot::{AppState, handler};

fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env()
        .context("invalid RUST_LOG directive")?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `.env` is optional; real deployments set the variables directly.
    dotenv::dotenv().ok();
    init_tracing()?;

    let config = Config::from_env().context("incomplete configuration")?;
    tracing::info!(target="startup", config=?config, "configuration loaded");

    let pool = database::init::connect(&config.database)
        .await
        .context("could not connect to Postgres")?;
    database::init::run_migrations(&pool)
        .await
        .context("could not apply migrations")?;

    let gateway = PgGateway::new(pool, config.utc_offset);
    let app_state = Arc::new(AppState::new(
        Arc::new(gateway),
        config.command_prefix.clone(),
        config.utc_offset,
    ));

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler::Handler {
            allowed_guild_id: config.guild_id.map(GuildId::new),
        })
        .await
        .context("error creating the Discord client")?;

    {
        let mut data = client.data.write().await;
        data.insert::<AppState>(app_state);
    }

    tracing::info!(target = "startup", "Guarda Din bot starting");
    client.start().await.context("client error")?;
    Ok(())
}
