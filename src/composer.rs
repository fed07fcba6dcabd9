/// Merges scraped snippets with the user's message.
///
/// With no snippets the message goes through untouched. Otherwise the
/// snippets are joined with newlines, in the order given, inside a `"""`
/// fence, and the original question is repeated verbatim after it.
pub fn compose(original: &str, snippets: &[String]) -> String {
    if snippets.is_empty() {
        return original.to_string();
    }
    format!(
        "Based on the following web search results:\n\"\"\"\n{}\n\"\"\"\n\nAnswer the user's original question: {}",
        snippets.join("\n"),
        original
    )
}
