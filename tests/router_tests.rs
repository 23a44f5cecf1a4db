use crossiebot::bot::router::{Action, Inbound, Router};
use crossiebot::clue_matcher::ClueMatcher;

const GROUP: i64 = -1001234567890;
const ELSEWHERE: i64 = 42;

fn router() -> Router {
    Router::new(GROUP, Some("crossiebot".to_string()), ClueMatcher::default())
}

fn msg(chat_id: i64, text: &str) -> Inbound {
    Inbound::new(chat_id, "Asha", text)
}

#[test]
fn test_open_commands_work_in_any_chat() {
    let router = router();
    for chat in [GROUP, ELSEWHERE] {
        assert_eq!(router.route(&msg(chat, "/start")), Some(Action::Greet));
        assert_eq!(router.route(&msg(chat, "/help")), Some(Action::Help));
        assert_eq!(router.route(&msg(chat, "/kosher")), Some(Action::KosherSticker));
        assert_eq!(router.route(&msg(chat, "/HELP@CrossieBot")), Some(Action::Help));
    }
}

#[test]
fn test_clues_in_designated_chat() {
    let router = router();
    assert_eq!(
        router.route(&msg(GROUP, "Capital of France (5)")),
        Some(Action::Clues(vec!["Capital of France (5)".to_string()]))
    );
}

#[test]
fn test_restricted_commands_are_silent_elsewhere() {
    let router = router();
    assert_eq!(router.route(&msg(ELSEWHERE, "Capital of France (5)")), None);
    assert_eq!(router.route(&msg(ELSEWHERE, "/splclue A picture clue")), None);
    assert_eq!(router.route(&msg(ELSEWHERE, "/splclue")), None);
}

#[test]
fn test_special_clue() {
    let router = router();
    assert_eq!(
        router.route(&msg(GROUP, "/splclue\nLine one\nLine two")),
        Some(Action::SpecialClue("Line one\nLine two".to_string()))
    );
    assert_eq!(
        router.route(&msg(GROUP, "/splclue@crossiebot Hidden (in plain sight)")),
        Some(Action::SpecialClue("Hidden (in plain sight)".to_string()))
    );
}

#[test]
fn test_special_clue_without_text() {
    let router = router();
    assert_eq!(router.route(&msg(GROUP, "/splclue")), Some(Action::SpecialClueUsage));
    assert_eq!(router.route(&msg(GROUP, "/splclue   \n ")), Some(Action::SpecialClueUsage));
}

#[test]
fn test_special_clue_wins_over_clue_pattern() {
    let router = router();
    assert_eq!(
        router.route(&msg(GROUP, "/splclue Capital of France (5)")),
        Some(Action::SpecialClue("Capital of France (5)".to_string()))
    );
}

#[test]
fn test_clue_wins_over_grin_in_designated_chat() {
    let router = router();
    let text = "Capital of France (5) \u{1F604}";
    assert_eq!(
        router.route(&msg(GROUP, text)),
        Some(Action::Clues(vec!["Capital of France (5)".to_string()]))
    );
    // Outside the designated chat the clue rule is skipped and the emoji rule fires.
    assert_eq!(router.route(&msg(ELSEWHERE, text)), Some(Action::Grin));
}

#[test]
fn test_grin_anywhere() {
    let router = router();
    assert_eq!(router.route(&msg(ELSEWHERE, "ha \u{1F601}")), Some(Action::Grin));
    assert_eq!(router.route(&msg(GROUP, "\u{1F604}")), Some(Action::Grin));
}

#[test]
fn test_nothing_to_do() {
    let router = router();
    assert_eq!(router.route(&msg(GROUP, "good morning")), None);
    assert_eq!(router.route(&msg(GROUP, "/unknown")), None);
    assert_eq!(router.route(&msg(GROUP, "/start@someotherbot")), None);
}

#[test]
fn test_open_command_with_clue_text_is_still_the_command() {
    let router = router();
    assert_eq!(router.route(&msg(GROUP, "/help Capital of France (5)")), Some(Action::Help));
}
