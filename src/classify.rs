//! Keyword gates: reply language and basketball topic detection.

const LITHUANIAN_LETTERS: &[char] = &['ą', 'č', 'ę', 'ė', 'į', 'š', 'ų', 'ū', 'ž'];

const LITHUANIAN_KEYWORDS: &[&str] = &[
    "krepšinis",
    "rezultatai",
    "komanda",
    "žaidėjas",
    "lyga",
    "lietuva",
    "lkl",
    "eurolyga",
];

const BASKETBALL_KEYWORDS: &[&str] = &[
    "basketball",
    "nba",
    "euroleague",
    "zalgiris",
    "rytas",
    "lkl",
    "lietuvos rytas",
    "lietkabelis",
    "neptunas",
    "siauliai",
    "jonava",
    "kedainiai",
    "dzukija",
    "pieno zvaigzdes",
    "prienai",
    "wolves vilnius",
    "lietuvos krepsinis",
    "lithuanian basketball",
    "lithuania basketball",
    "lietuvos krepsinio lyga",
];

const OTHER_SPORTS: &[&str] = &[
    "football",
    "soccer",
    "tennis",
    "hockey",
    "baseball",
    "golf",
    "cricket",
    "rugby",
    "volleyball",
    "swimming",
    "cycling",
    "skiing",
    "boxing",
    "mma",
    "ufc",
    "f1",
    "formula 1",
    "motorsport",
    "athletics",
    "track and field",
    "badminton",
    "table tennis",
    "ping pong",
    "handball",
    "wrestling",
    "gymnastics",
    "rowing",
    "sailing",
    "surfing",
    "skateboarding",
    "snowboarding",
    "ice skating",
    "karate",
    "judo",
    "taekwondo",
    "martial arts",
];

/// Reply language chosen for a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Lithuanian,
}

pub fn detect_language(text: &str) -> Language {
    let lower = text.to_lowercase();
    if contains_lithuanian_letters(&lower) || contains_any(&lower, LITHUANIAN_KEYWORDS) {
        Language::Lithuanian
    } else {
        Language::English
    }
}

/// Basketball keywords win over other sports; text matching neither is let through.
pub fn is_in_domain(text: &str) -> bool {
    let lower = text.to_lowercase();
    if contains_any(&lower, BASKETBALL_KEYWORDS) {
        return true;
    }
    !contains_any(&lower, OTHER_SPORTS)
}

fn contains_lithuanian_letters(lower: &str) -> bool {
    lower.chars().any(|c| LITHUANIAN_LETTERS.contains(&c))
}

fn contains_any(lower: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| lower.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_question_stays_english() {
        assert_eq!(
            detect_language("What was the Zalgiris score yesterday?"),
            Language::English
        );
    }

    #[test]
    fn lithuanian_letter_switches_language() {
        assert_eq!(detect_language("Kas laimėjo?"), Language::Lithuanian);
    }

    #[test]
    fn uppercase_lithuanian_letter_is_detected() {
        assert_eq!(detect_language("ŽALGIRIS"), Language::Lithuanian);
    }

    #[test]
    fn lithuanian_keyword_without_diacritics_switches_language() {
        assert_eq!(detect_language("LKL results please"), Language::Lithuanian);
        assert_eq!(detect_language("Eurolyga today"), Language::Lithuanian);
    }

    #[test]
    fn empty_text_is_english() {
        assert_eq!(detect_language(""), Language::English);
    }

    #[test]
    fn basketball_keyword_is_in_domain() {
        assert!(is_in_domain("What was the Zalgiris score yesterday?"));
        assert!(is_in_domain("NBA standings"));
    }

    #[test]
    fn other_sport_is_off_domain() {
        assert!(!is_in_domain("What was the football score?"));
        assert!(!is_in_domain("Who won the Table Tennis final?"));
    }

    #[test]
    fn basketball_keyword_beats_other_sport() {
        assert!(is_in_domain("Is basketball more popular than football?"));
        assert!(is_in_domain("Rytas vs hockey club"));
    }

    #[test]
    fn unmatched_text_defaults_to_in_domain() {
        assert!(is_in_domain("Who won last night?"));
        assert!(is_in_domain(""));
    }

    #[test]
    fn matching_is_substring_based() {
        // "golf" inside "golfers" still counts as another sport
        assert!(!is_in_domain("best golfers of the year"));
    }
}
