use std::error::Error as StdError;
use thiserror::Error;

/// Renders an error and every `source()` below it as `outer: inner: root`.
/// reqwest's own `Display` stops at the outermost layer, which hides the
/// actual cause ("Connection refused", "operation timed out").
pub fn error_chain(err: &dyn StdError) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.ends_with(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}

/// Reasons the snippet scrape came back empty. Never surfaced to the chat
/// caller; `Scrapper::search` logs these and yields no snippets.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    #[error("invalid search url: {0}")]
    Url(#[from] url::ParseError),

    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("search page returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("no snippets extracted from search results page")]
    NoSnippets,
}

/// Generation failures. The `Display` text of each variant is what the
/// user sees in place of an answer.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Error calling Ollama API: {cause}")]
    Transport {
        cause: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Error calling Ollama API: request timed out ({cause})")]
    Timeout {
        cause: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Error calling Ollama API: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Error from Ollama API: {code} - {body}")]
    Status { code: u16, body: String },

    #[error("Error from Ollama API: {0}")]
    UnreadableStatus(u16),

    #[error("No valid response received from Ollama.")]
    EmptyResponse,
}

impl From<reqwest::Error> for GenerationError {
    fn from(source: reqwest::Error) -> Self {
        let cause = error_chain(&source);
        if source.is_timeout() {
            GenerationError::Timeout { cause, source }
        } else {
            GenerationError::Transport { cause, source }
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} is not a valid url ({value}): {source}")]
    InvalidUrl {
        key: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("OLLAMA_MODEL_NAME must not be empty")]
    EmptyModelName,

    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("failed to set up search scraping: {0}")]
    Scrapper(#[from] ScrapeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_carry_the_code() {
        let err = GenerationError::Status {
            code: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Error from Ollama API: 500 - boom");
        assert_eq!(
            GenerationError::UnreadableStatus(503).to_string(),
            "Error from Ollama API: 503"
        );
    }

    #[derive(Debug, Error)]
    #[error("outer")]
    struct Outer(#[source] std::io::Error);

    #[test]
    fn error_chain_includes_root_cause() {
        let err = Outer(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "Connection refused",
        ));
        assert_eq!(error_chain(&err), "outer: Connection refused");
    }

    #[test]
    fn error_chain_skips_repeated_text() {
        let err = std::io::Error::other("boom");
        assert_eq!(error_chain(&err), "boom");
    }

    #[test]
    fn empty_response_is_distinct_from_empty_string() {
        let text = GenerationError::EmptyResponse.to_string();
        assert!(!text.is_empty());
        assert_eq!(text, "No valid response received from Ollama.");
    }
}
