//! Message Handler module for processing incoming Telegram messages

use std::sync::Arc;

use anyhow::Result;
use chrono::Local;
use teloxide::prelude::*;
use teloxide::types::{FileId, InputFile};
use tracing::{debug, info, warn};

use super::replies::Replies;
use super::router::{Action, Inbound, Router};
use crate::clue_matcher::ClueMatcher;
use crate::config::BotConfig;
use crate::localization::LocalizationManager;
use crate::recorder::{ClueRecorder, RecordFailure, RecordOutcome};
use crate::sheets::Spreadsheet;

const UNKNOWN_SENDER: &str = "Unknown";

/// Everything a handler needs, built once in `main`
pub struct BotState<S> {
    pub router: Router,
    pub recorder: ClueRecorder<S>,
    pub replies: Replies,
}

impl<S: Spreadsheet> BotState<S> {
    pub fn new(
        config: BotConfig,
        bot_username: Option<String>,
        spreadsheet: S,
        localization: &LocalizationManager,
    ) -> Self {
        let router = Router::new(
            config.group_id,
            bot_username,
            ClueMatcher::new(config.match_mode),
        );
        let recorder = ClueRecorder::new(
            crate::clue_log::ClueLog::new(config.clue_file.clone()),
            spreadsheet,
            config.clue_tab.clone(),
            config.special_tab.clone(),
        );
        let replies = Replies::new(localization, &config);
        Self {
            router,
            recorder,
            replies,
        }
    }
}

/// Router input for a Telegram text message, `None` for anything else
pub fn inbound_from_message(msg: &Message) -> Option<Inbound> {
    let text = msg.text()?;
    let sender = msg
        .from
        .as_ref()
        .map(|user| user.first_name.clone())
        .or_else(|| msg.chat.title().map(str::to_string))
        .unwrap_or_else(|| UNKNOWN_SENDER.to_string());
    Some(Inbound::new(msg.chat.id.0, sender, text))
}

/// Reply for a failed recording
pub fn failure_reply<'a>(replies: &'a Replies, failure: &RecordFailure) -> &'a str {
    match failure {
        RecordFailure::LocalLog(_) => &replies.local_failure,
        RecordFailure::Spreadsheet(_) => &replies.sheet_failure,
    }
}

async fn report_recording(
    bot: &Bot,
    chat_id: ChatId,
    replies: &Replies,
    result: std::result::Result<RecordOutcome, RecordFailure>,
) -> Result<()> {
    match result {
        Ok(outcome) => {
            debug!(chat_id = %chat_id, rows = ?outcome.rows, "Recording finished");
        }
        Err(failure) => {
            warn!(chat_id = %chat_id, error = %failure, "Recording failed");
            bot.send_message(chat_id, failure_reply(replies, &failure)).await?;
        }
    }
    Ok(())
}

pub async fn message_handler<S: Spreadsheet + 'static>(
    bot: Bot,
    msg: Message,
    state: Arc<BotState<S>>,
) -> Result<()> {
    let Some(inbound) = inbound_from_message(&msg) else {
        return Ok(());
    };
    let Some(action) = state.router.route(&inbound) else {
        return Ok(());
    };

    let chat_id = msg.chat.id;
    let replies = &state.replies;
    let today = Local::now().date_naive();

    match action {
        Action::Greet => {
            info!(chat_id = %chat_id, "Greeting chat");
            bot.send_message(chat_id, &replies.greeting).await?;
        }
        Action::Help => {
            bot.send_message(chat_id, &replies.help).await?;
        }
        Action::KosherSticker => {
            bot.send_sticker(chat_id, InputFile::file_id(FileId(replies.kosher_sticker.clone())))
                .await?;
        }
        Action::Grin => {
            info!(chat_id = %chat_id, text = %inbound.text, "Grinning back");
            bot.send_message(chat_id, &replies.grin).await?;
        }
        Action::SpecialClueUsage => {
            warn!(chat_id = %chat_id, sender = %inbound.sender, "Special clue command without text");
            bot.send_message(chat_id, &replies.splclue_usage).await?;
        }
        Action::SpecialClue(text) => {
            info!(chat_id = %chat_id, sender = %inbound.sender, clue = %text, "Recording special clue");
            let result = state
                .recorder
                .record_special(today, &inbound.sender, text)
                .await;
            report_recording(&bot, chat_id, replies, result).await?;
        }
        Action::Clues(clues) => {
            info!(
                chat_id = %chat_id,
                sender = %inbound.sender,
                clue_count = clues.len(),
                "Recording clues"
            );
            let result = state
                .recorder
                .record_batch(today, &inbound.sender, clues)
                .await;
            report_recording(&bot, chat_id, replies, result).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CrossieError;

    fn create_replies() -> Replies {
        Replies {
            greeting: "hi".to_string(),
            help: "help".to_string(),
            kosher_sticker: "sticker".to_string(),
            grin: "grin".to_string(),
            splclue_usage: "usage".to_string(),
            sheet_failure: "sheet down".to_string(),
            local_failure: "disk full".to_string(),
        }
    }

    #[test]
    fn test_failure_reply_names_the_failed_store() {
        let replies = create_replies();

        let local = RecordFailure::LocalLog(CrossieError::Io("permission denied".to_string()));
        let sheet = RecordFailure::Spreadsheet(CrossieError::Http {
            status: 503,
            message: "unavailable".to_string(),
        });

        assert_eq!(failure_reply(&replies, &local), "disk full");
        assert_eq!(failure_reply(&replies, &sheet), "sheet down");
    }
}
