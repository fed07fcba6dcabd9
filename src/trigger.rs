/// Words and phrases that mark a message as needing live data.
///
/// Matching is plain substring containment on the lower-cased message, so a
/// keyword buried inside a longer word still fires ("now" in "nowhere",
/// "live" in "delivery"). That is a known limitation and is kept as is:
/// changing it would change which messages get augmented.
pub const SEARCH_KEYWORDS: &[&str] = &[
    // time sensitivity
    "breaking",
    "latest",
    "current",
    "today",
    "live",
    "update",
    "emergency",
    "alert",
    "trending",
    "headline",
    "recent",
    "news",
    "developing",
    "real-time",
    "urgent",
    "immediate",
    "now",
    "yesterday",
    // topics
    "global",
    "world",
    "election",
    "weather",
    "stock",
    "finance",
    "sports",
    "results",
    "polls",
    "technology",
    "market",
    "viral",
    "scoop",
    // question patterns
    "price of",
    "who is",
    "what is the capital of",
    "define",
];

/// Returns true when `message` contains any of [`SEARCH_KEYWORDS`],
/// case-insensitively. Blank input never triggers.
pub fn should_search(message: &str) -> bool {
    if message.trim().is_empty() {
        return false;
    }
    let lower = message.to_lowercase();
    SEARCH_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}
