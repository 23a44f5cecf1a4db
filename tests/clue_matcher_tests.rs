#[cfg(test)]
mod tests {
    use crossiebot::clue_matcher::{extract_special_clue, has_grin, ClueMatcher};
    use crossiebot::config::MatchMode;

    fn create_matcher() -> ClueMatcher {
        ClueMatcher::new(MatchMode::Scan)
    }

    #[test]
    fn test_matcher_creation() {
        let matcher = create_matcher();
        assert!(!matcher.pattern_str().is_empty());
        assert_eq!(matcher.mode(), MatchMode::Scan);
    }

    #[test]
    fn test_no_enumeration_no_clues() {
        let matcher = create_matcher();
        for text in [
            "",
            "just chatting",
            "see you at 5",
            "brackets (but no numbers)",
            "zero is not an enumeration (0)",
            "(5)",
        ] {
            assert!(matcher.find_clues(text).is_empty(), "{text:?}");
            assert!(!matcher.has_clues(text), "{text:?}");
        }
    }

    #[test]
    fn test_capital_of_france() {
        let matcher = create_matcher();
        let clues = matcher.find_clues("Capital of France (5)");
        assert_eq!(clues, vec!["Capital of France (5)"]);
        assert!(clues[0].ends_with(')'));
    }

    #[test]
    fn test_two_clues_in_document_order() {
        let matcher = create_matcher();
        let clues = matcher.find_clues("A (3) B (4,2)");

        assert_eq!(clues.len(), 2);
        assert_eq!(clues[0], "A (3)");
        assert_eq!(clues[1], "B (4,2)");
        assert!(clues.iter().all(|c| !c.contains(" B ")));
    }

    #[test]
    fn test_enumeration_variants() {
        let matcher = create_matcher();
        assert_eq!(matcher.find_clues("Pie in the sky (5,3)"), vec!["Pie in the sky (5,3)"]);
        assert_eq!(matcher.find_clues("Split up (5-2)"), vec!["Split up (5-2)"]);
        assert_eq!(matcher.find_clues("Spaced out (3, 4)"), vec!["Spaced out (3, 4)"]);
        assert_eq!(matcher.find_clues("Long one (12)"), vec!["Long one (12)"]);
        assert_eq!(matcher.find_clues("No gap(6)"), vec!["No gap(6)"]);
    }

    #[test]
    fn test_parenthetical_text_inside_clue() {
        let matcher = create_matcher();
        assert_eq!(
            matcher.find_clues("Bird (not a crow) in the garden (5)"),
            vec!["Bird (not a crow) in the garden (5)"]
        );
    }

    #[test]
    fn test_multi_line_message() {
        let matcher = create_matcher();
        let text = "Morning all\n1a Capital of France (5)\n2d Pie in the sky (5,3)\nhave fun";
        assert_eq!(
            matcher.find_clues(text),
            vec!["1a Capital of France (5)", "2d Pie in the sky (5,3)"]
        );
    }

    #[test]
    fn test_comma_separated_clues() {
        let matcher = create_matcher();
        assert_eq!(
            matcher.find_clues("Capital of France (5), Pie in the sky (5,3)"),
            vec!["Capital of France (5)", "Pie in the sky (5,3)"]
        );
    }

    #[test]
    fn test_semicolon_separated_clues() {
        let matcher = create_matcher();
        assert_eq!(
            matcher.find_clues("1a Capital (5); 2d Pie (5,3)"),
            vec!["1a Capital (5)", "2d Pie (5,3)"]
        );
        assert_eq!(
            matcher.find_clues("Capital (5);; : Pie (5,3)."),
            vec!["Capital (5)", "Pie (5,3)"]
        );
    }

    #[test]
    fn test_legacy_mode_keeps_greedy_span() {
        let matcher = ClueMatcher::new(MatchMode::Legacy);
        assert_eq!(matcher.find_clues("Capital of France (5)"), vec!["Capital of France (5)"]);
        assert_eq!(matcher.find_clues("A (3) B (4,2)"), vec!["A (3) B (4,2)"]);
        assert_eq!(
            matcher.find_clues("Capital of France (5) any takers?"),
            vec!["Capital of France (5)"]
        );
    }

    #[test]
    fn test_special_clue_keeps_everything_after_command() {
        assert_eq!(
            extract_special_clue("\nWhat's this?\nA picture clue").unwrap(),
            "What's this?\nA picture clue"
        );
        assert!(extract_special_clue("   ").is_err());
    }

    #[test]
    fn test_emoji_trigger() {
        assert!(has_grin("\u{1F604}"));
        assert!(has_grin("well done \u{1F601}\u{1F601}"));
        assert!(!has_grin("well done"));
    }
}
