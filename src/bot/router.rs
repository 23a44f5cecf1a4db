//! Command Router: maps an incoming text message to at most one action.
//!
//! Rules are checked in order and the first one that produces an action wins.
//! Rules restricted to the designated chat are skipped everywhere else, so a
//! message from another chat falls through to the rules after them.

use tracing::debug;

use crate::clue_matcher::{extract_special_clue, has_grin, ClueMatcher};

/// The parts of a Telegram message the router looks at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub chat_id: i64,
    pub sender: String,
    pub text: String,
}

impl Inbound {
    pub fn new(chat_id: i64, sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            sender: sender.into(),
            text: text.into(),
        }
    }
}

/// What the bot should do with a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Greet,
    Help,
    KosherSticker,
    Grin,
    /// `/splclue` with its free-form clue text
    SpecialClue(String),
    /// `/splclue` without any text
    SpecialClueUsage,
    /// Enumerated clues, in message order
    Clues(Vec<String>),
}

/// Where a rule may fire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    AnyChat,
    DesignatedChat,
}

type Matcher = fn(&Router, &Inbound) -> Option<Action>;

/// One (predicate, handler) entry of the dispatch table
pub struct Rule {
    pub name: &'static str,
    pub scope: Scope,
    matcher: Matcher,
}

/// A `/command` addressed to this bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// Lower-cased command name without the slash
    pub name: String,
    /// Everything after the command token, leading whitespace removed
    pub args: &'a str,
}

/// Parse `/name[@bot] args`
///
/// Returns `None` for plain text and for commands addressed to another bot.
pub fn parse_command<'a>(text: &'a str, bot_username: Option<&str>) -> Option<ParsedCommand<'a>> {
    let rest = text.strip_prefix('/')?;
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let (token, args) = rest.split_at(end);

    let (name, mention) = match token.split_once('@') {
        Some((name, mention)) => (name, Some(mention)),
        None => (token, None),
    };
    if name.is_empty() {
        return None;
    }
    if let (Some(mention), Some(me)) = (mention, bot_username) {
        if !mention.eq_ignore_ascii_case(me) {
            return None;
        }
    }

    Some(ParsedCommand {
        name: name.to_lowercase(),
        args: args.trim_start(),
    })
}

/// Ordered dispatch table plus what the rules need to decide
pub struct Router {
    designated_chat: i64,
    bot_username: Option<String>,
    matcher: ClueMatcher,
    rules: Vec<Rule>,
}

impl Router {
    pub fn new(designated_chat: i64, bot_username: Option<String>, matcher: ClueMatcher) -> Self {
        Self {
            designated_chat,
            bot_username,
            matcher,
            rules: default_rules(),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    fn command<'a>(&self, msg: &'a Inbound) -> Option<ParsedCommand<'a>> {
        parse_command(&msg.text, self.bot_username.as_deref())
    }

    fn is_command(&self, msg: &Inbound, name: &str) -> bool {
        self.command(msg).is_some_and(|c| c.name == name)
    }

    /// The action for `msg`, or `None` when no rule applies
    pub fn route(&self, msg: &Inbound) -> Option<Action> {
        for rule in &self.rules {
            if rule.scope == Scope::DesignatedChat && msg.chat_id != self.designated_chat {
                continue;
            }
            if let Some(action) = (rule.matcher)(self, msg) {
                debug!(chat_id = msg.chat_id, rule = rule.name, "Message routed");
                return Some(action);
            }
        }
        None
    }
}

fn default_rules() -> Vec<Rule> {
    vec![
        Rule {
            name: "start",
            scope: Scope::AnyChat,
            matcher: |router, msg| router.is_command(msg, "start").then_some(Action::Greet),
        },
        Rule {
            name: "help",
            scope: Scope::AnyChat,
            matcher: |router, msg| router.is_command(msg, "help").then_some(Action::Help),
        },
        Rule {
            name: "kosher",
            scope: Scope::AnyChat,
            matcher: |router, msg| router.is_command(msg, "kosher").then_some(Action::KosherSticker),
        },
        Rule {
            name: "splclue",
            scope: Scope::DesignatedChat,
            matcher: |router, msg| {
                let command = router.command(msg).filter(|c| c.name == "splclue")?;
                Some(match extract_special_clue(command.args) {
                    Ok(text) => Action::SpecialClue(text),
                    Err(_) => Action::SpecialClueUsage,
                })
            },
        },
        Rule {
            name: "clues",
            scope: Scope::DesignatedChat,
            matcher: |router, msg| {
                let clues = router.matcher.find_clues(&msg.text);
                (!clues.is_empty()).then_some(Action::Clues(clues))
            },
        },
        Rule {
            name: "grin",
            scope: Scope::AnyChat,
            matcher: |_, msg| has_grin(&msg.text).then_some(Action::Grin),
        },
    ]
}
