use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use crossiebot::bot::{message_handler, BotState};
use crossiebot::config::{BotConfig, LogFormat};
use crossiebot::localization::LocalizationManager;
use crossiebot::sheets::GoogleSpreadsheet;

fn init_tracing(config: &BotConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let writer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(config.log_file.is_none());

    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = BotConfig::from_env()?;
    init_tracing(&config)?;

    info!(
        group_id = config.group_id,
        clue_file = %config.clue_file.display(),
        match_mode = ?config.match_mode,
        "Starting crossie bot"
    );

    let localization = LocalizationManager::new()?;
    let spreadsheet = GoogleSpreadsheet::from_config(&config)?;

    let bot = Bot::new(config.bot_token.clone());
    let me = bot.get_me().await.context("Failed to fetch bot identity")?;
    info!(username = %me.username(), "Bot initialized, starting dispatcher");

    let state = Arc::new(BotState::new(
        config,
        Some(me.username().to_string()),
        spreadsheet,
        &localization,
    ));

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(message_handler::<GoogleSpreadsheet>));

    // One update at a time: a slow spreadsheet write holds back the next message.
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .distribution_function(|_| Some(()))
        .default_handler(|upd| async move {
            tracing::debug!(update_id = ?upd.id, "Unhandled update");
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
