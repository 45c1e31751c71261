//! Extractive summaries for news articles: the top sentences (in their
//! original order) and the top keywords of an arbitrary article page, with
//! no per-site scraping rules.
//!
//! ## Quick start
//!
//! ```rust
//! use gist_rs::{summarize, Language, SummarizeOptions};
//!
//! let html = "<html><body><article><p>Not nearly long enough to count as an article.</p></article></body></html>";
//! let result = summarize(html, Language::English, &SummarizeOptions::default());
//!
//! // Pages without a long enough article body are reported, not summarized.
//! assert!(matches!(result, Err(gist_rs::SummaryError::NoArticleFound { .. })));
//! ```
//!
//! ## Pipeline
//!
//! 1. **Markup normalization** inserts line breaks after block
//!    closing tags, parses, and strips noise tags and blocks whose id/class
//!    carries a noise marker.
//! 2. **Candidate extraction** runs an ordered table of [`CandidateRule`]s
//!    (`<article>` tags, then containers by id, then by class) and keeps the
//!    longest text found.
//! 3. **Scoring** ([`scoring`]) counts content words, boosts proper nouns,
//!    zeroes numbers, sums word scores per sentence and boosts sentences that
//!    mention money.
//! 4. **Selection** keeps the best sentences and restores document order.
//!
//! Tokenization sits behind the [`Tokenizer`] trait; [`RuleTokenizer`] is the
//! bundled implementation.

#[macro_use]
mod logging;
mod errors;
mod extractor;
mod models;
mod node_utils;
pub mod scoring;
mod utils;

use logging::logger::{Listener, PerfLogger};
use logging::logging_defs::*;
use logging::PerfConsoleListener;
use rayon::prelude::*;
use std::rc::Rc;

pub use errors::{SummaryError, TokenizeError};
pub use models::{
    ArticleSummary, CandidateRule, Document, ExtractOptions, Extraction, Language,
    MatchAttribute, Metadata, ScoringOptions, SummarizeOptions,
};
pub use logging::PERF_SPANS_ENV;
pub use node_utils::NodeExt;
pub use scoring::tokenizer::{RuleTokenizer, SentenceSpan, Tokenizer};
pub use scoring::vocabulary::Vocabulary;

/// Small text helpers used by the pipeline.
pub mod shared_utils {
    pub use crate::scoring::clean_article;
    pub use crate::utils::{
        char_len, insert_block_breaks, is_numeric_token, normalize_text, title_case,
    };
}

/// Thin wrappers around the underlying HTML parser.
///
/// [`NodeRef`] is the reference-counted DOM node type used throughout the crate.
/// [`parse_html`] parses a complete HTML document into a [`NodeRef`] tree.
pub mod parser {
    use kuchikikiki::traits::TendrilSink;
    pub use kuchikikiki::NodeRef;
    pub use crate::node_utils::NodeExt;

    /// Parse an HTML string into a [`NodeRef`] document tree.
    ///
    /// The parser follows the HTML5 specification; an implicit `<html>`, `<head>`,
    /// and `<body>` are synthesised when missing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gist_rs::parser::parse_html;
    ///
    /// let doc = parse_html("<div><p>hello</p></div>");
    /// assert!(doc.select_first("p").is_ok());
    /// ```
    pub fn parse_html(html: &str) -> NodeRef {
        kuchikikiki::parse_html().one(html)
    }
}

fn create_perf_logger() -> PerfLogger {
    let listeners = vec![Listener::new(Rc::new(PerfConsoleListener::from_env()))];
    PerfLogger::new(listeners)
}

/// Run only the normalizer and the candidate chain: page metadata plus the
/// article text, or [`SummaryError::NoArticleFound`].
pub fn extract_article(html: &str, options: &ExtractOptions) -> Result<Extraction, SummaryError> {
    let logger = create_perf_logger();
    extractor::Extractor::new(html, options, &logger).extract()
}

/// Summarize one page with the bundled tokenizer and the shared vocabulary
/// for `language`.
///
/// # Errors
///
/// * [`SummaryError::MarkupParse`] for empty or body-less documents.
/// * [`SummaryError::NoArticleFound`] when no candidate region is long
///   enough, or when the article yields no usable sentence; treat this as
///   "skip the page".
pub fn summarize(
    html: &str,
    language: Language,
    options: &SummarizeOptions,
) -> Result<ArticleSummary, SummaryError> {
    summarize_with(
        html,
        language,
        &RuleTokenizer,
        Vocabulary::for_language(language),
        options,
    )
}

/// Like [`summarize`], with a caller-supplied tokenizer and vocabulary.
pub fn summarize_with(
    html: &str,
    language: Language,
    tokenizer: &dyn Tokenizer,
    vocabulary: &Vocabulary,
    options: &SummarizeOptions,
) -> Result<ArticleSummary, SummaryError> {
    let logger = create_perf_logger();
    start_span!(logger, SUMMARIZE);
    let result = extractor::Extractor::new(html, &options.extraction, &logger)
        .extract()
        .and_then(|extraction| {
            annotate_span!(
                logger,
                SUMMARIZE,
                "article text from rule {}: {} chars",
                extraction.rule,
                utils::char_len(extraction.text.as_str())
            );
            let scored = scoring::Scorer::new(
                tokenizer,
                vocabulary,
                &options.scoring,
                language,
                &logger,
            )
            .score(extraction.text.as_str())?;
            if scored.summary.is_empty() {
                return Err(SummaryError::NoArticleFound {
                    longest: utils::content_len(extraction.text.as_str()),
                    threshold: options.extraction.min_article_length,
                });
            }
            Ok(ArticleSummary {
                title: extraction.metadata.title,
                published_time: extraction.metadata.published_time,
                summary: scored.summary,
                keywords: scored.keywords,
                reduction: scored.reduction,
            })
        });
    end_span!(logger, SUMMARIZE);
    result
}

/// Summarize many pages in parallel.  Every page gets its own pipeline
/// instance; only the read-only vocabulary is shared.  Results come back in
/// input order.
pub fn summarize_many(
    documents: &[Document],
    language: Language,
    options: &SummarizeOptions,
) -> Vec<Result<ArticleSummary, SummaryError>> {
    documents
        .par_iter()
        .map(|doc| summarize(doc.html.as_str(), language, options))
        .collect()
}
