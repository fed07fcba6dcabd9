use ragchat::trigger::*;

#[test]
fn test_weather_today_triggers() {
    assert!(should_search("What's the weather today?"));
}

#[test]
fn test_joke_does_not_trigger() {
    assert!(!should_search("tell me a joke"));
}

#[test]
fn test_case_insensitive() {
    assert!(should_search("BREAKING: something happened"));
    assert!(should_search("Who Is the mayor of Paris"));
}

#[test]
fn test_phrases() {
    assert!(should_search("what is the capital of Peru"));
    assert!(should_search("price of bitcoin"));
    assert!(should_search("please define entropy"));
}

#[test]
fn test_substring_inside_longer_word_still_triggers() {
    // "now" inside "nowhere", "live" inside "delivery"
    assert!(should_search("nowhere to go"));
    assert!(should_search("how does delivery work"));
    assert!(should_search("I need an updated recipe"));
}

#[test]
fn test_blank_input_never_triggers() {
    assert!(!should_search(""));
    assert!(!should_search("   \n\t"));
}

#[test]
fn test_every_keyword_triggers_on_its_own() {
    for keyword in SEARCH_KEYWORDS {
        assert!(should_search(keyword), "{keyword} should trigger");
        assert!(
            should_search(&format!("tell me the {} please", keyword.to_uppercase())),
            "{keyword} should trigger in upper case"
        );
    }
}

#[test]
fn test_messages_without_keywords() {
    for message in [
        "tell me a joke",
        "write a haiku about cats",
        "how do I reverse a linked list",
        "translate hello into french",
    ] {
        assert!(!should_search(message), "{message} should not trigger");
    }
}
