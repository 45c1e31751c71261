pub mod selector;
pub mod sentences;
pub mod tokenizer;
pub mod vocabulary;
pub mod words;

use crate::errors::TokenizeError;
use crate::logging::logger::*;
use crate::logging::logging_defs::*;
use crate::models::{Language, ScoringOptions};
use crate::utils::{char_len, normalize_text};
use selector::{reduction, select_keywords, select_sentences};
use sentences::score_sentences;
use tokenizer::Tokenizer;
use vocabulary::Vocabulary;
use words::score_words;

/// What the scorer hands back for one article.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredArticle {
    pub summary: Vec<String>,
    pub keywords: Vec<String>,
    pub reduction: f64,
}

/// Trim every line of the extracted text and collapse its whitespace runs,
/// drop blank lines and lines shorter than `min_line_length` characters,
/// and join the rest with single spaces.
pub fn clean_article(text: &str, min_line_length: usize) -> String {
    text.lines()
        .map(|line| normalize_text(line.trim()))
        .filter(|line| !line.is_empty() && char_len(line) >= min_line_length)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs word scoring, sentence scoring and selection over one article text.
pub(crate) struct Scorer<'a> {
    tokenizer: &'a dyn Tokenizer,
    vocabulary: &'a Vocabulary,
    options: &'a ScoringOptions,
    language: Language,
    logger: &'a PerfLogger,
}

impl<'a> Scorer<'a> {
    pub fn new(
        tokenizer: &'a dyn Tokenizer,
        vocabulary: &'a Vocabulary,
        options: &'a ScoringOptions,
        language: Language,
        logger: &'a PerfLogger,
    ) -> Scorer<'a> {
        Scorer {
            tokenizer,
            vocabulary,
            options,
            language,
            logger,
        }
    }

    pub fn score(&self, article_text: &str) -> Result<ScoredArticle, TokenizeError> {
        let logger = self.logger;
        let cleaned = clean_article(article_text, self.options.min_line_length);

        start_span!(logger, SCORE_WORDS);
        let words = self.tokenizer.segment_words(cleaned.as_str(), self.language)?;
        let table = score_words(&words, self.vocabulary, self.options);
        annotate_span!(
            logger,
            SCORE_WORDS,
            "{} tokens, {} distinct content words",
            words.len(),
            table.len()
        );
        end_span!(logger, SCORE_WORDS);

        start_span!(logger, SCORE_SENTENCES);
        let sentences = self
            .tokenizer
            .segment_sentences(cleaned.as_str(), self.language)?;
        let scored = score_sentences(
            &sentences,
            &table,
            self.vocabulary,
            self.tokenizer,
            self.language,
            self.options,
        )?;
        annotate_span!(
            logger,
            SCORE_SENTENCES,
            "{} sentences, {} after de-duplication",
            sentences.len(),
            scored.len()
        );
        end_span!(logger, SCORE_SENTENCES);

        start_span!(logger, SELECT_TOP);
        let summary = select_sentences(&scored, self.options);
        let keywords = select_keywords(&table, self.options);
        let reduction = reduction(&summary, cleaned.as_str());
        end_span!(logger, SELECT_TOP);

        Ok(ScoredArticle {
            summary,
            keywords,
            reduction,
        })
    }
}
