use thiserror::Error;

/// Failure reported by a [`crate::Tokenizer`] implementation.  The pipeline
/// has no fallback tokenizer, so this is propagated unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("tokenizer failed: {0}")]
pub struct TokenizeError(pub String);

/// Everything that can stop a document from being summarized.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SummaryError {
    /// The markup could not be turned into a usable document tree.  Fatal for
    /// that document; retrying with the same input gives the same result.
    #[error("could not parse markup: {0}")]
    MarkupParse(String),
    /// Every stage of the candidate chain fell below the length threshold.
    /// Callers should skip the page rather than publish an empty summary.
    #[error("no article found (longest candidate had {longest} chars, {threshold} required)")]
    NoArticleFound { longest: usize, threshold: usize },
    #[error(transparent)]
    Tokenization(#[from] TokenizeError),
    #[error("unsupported language tag: {0:?}")]
    UnsupportedLanguage(String),
}
