//! Reply texts, rendered once at startup.

use crate::config::BotConfig;
use crate::localization::LocalizationManager;

/// `:smile:`
pub const GRIN_REPLY: &str = "\u{1F604}";

/// Everything the bot ever sends back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replies {
    pub greeting: String,
    pub help: String,
    pub kosher_sticker: String,
    pub grin: String,
    pub splclue_usage: String,
    pub sheet_failure: String,
    pub local_failure: String,
}

impl Replies {
    pub fn new(localization: &LocalizationManager, config: &BotConfig) -> Self {
        Self {
            greeting: localization.get_message("greeting", None),
            help: format_help(localization, &config.sheet_link),
            kosher_sticker: config.kosher_sticker.clone(),
            grin: GRIN_REPLY.to_string(),
            splclue_usage: localization.get_message("splclue-usage", None),
            sheet_failure: localization.get_message("record-failed-sheet", None),
            local_failure: localization.get_message("record-failed-local", None),
        }
    }
}

/// Help text: spreadsheet link, then one line per command
pub fn format_help(localization: &LocalizationManager, sheet_link: &str) -> String {
    let commands = [
        localization.get_message("help-commands", None),
        localization.get_message("help-start", None),
        localization.get_message("help-help", None),
        localization.get_message("help-kosher", None),
        localization.get_message("help-splclue", None),
    ]
    .join("\n");

    format!(
        "{}\n\n{}",
        localization.get_message_with_args("help-intro", &[("sheet_link", sheet_link)]),
        commands
    )
}
