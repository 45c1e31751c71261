use crate::errors::SummaryError;
use crate::utils::{CONTENT_MARKERS, NOISE_MARKERS, NOISE_TAGS};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Languages with a bundled stop-word list and tokenizer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Language {
    English,
    #[default]
    Spanish,
}

impl Language {
    /// The ISO 639-1 tag for this language.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
        }
    }
}

impl FromStr for Language {
    type Err = SummaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "eng" | "english" => Ok(Language::English),
            "es" | "spa" | "spanish" | "español" => Ok(Language::Spanish),
            _ => Err(SummaryError::UnsupportedLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A fetched page, handed over by whatever did the fetching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// The page markup, already decoded.
    pub html: String,
    /// The character encoding the markup was decoded from (e.g. `"utf-8"`).
    /// Informational only.
    pub encoding: String,
}

impl Document {
    pub fn new(html: impl Into<String>) -> Document {
        Document {
            html: html.into(),
            encoding: String::from("utf-8"),
        }
    }
}

/// Page metadata read before noise tags (headings, `<time>`) are stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// `<title>` text, or the first `<h1>` when the title is too short.
    pub title: String,
    /// Publish timestamp from a `*time*` meta property or a `<time>` element.
    pub published_time: String,
}

/// The output of [`crate::extract_article`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub metadata: Metadata,
    /// The longest qualifying candidate text, exactly as it came out of the
    /// document tree (line breaks included).
    pub text: String,
    /// Label of the candidate rule that produced `text`.
    pub rule: String,
}

/// The output of [`crate::summarize`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleSummary {
    pub title: String,
    pub published_time: String,
    /// At most `max_sentences` sentences, in document order.
    pub summary: Vec<String>,
    /// At most `max_keywords` words, in rank order.
    pub keywords: Vec<String>,
    /// How much shorter the summary is than the cleaned article, in percent.
    pub reduction: f64,
}

/// Which attribute of a candidate node a [`CandidateRule`] inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchAttribute {
    /// Every node matching the selector is a candidate.
    Any,
    /// The lowercased `id` must contain one of the markers.
    Id,
    /// The lowercased, concatenated class list must contain one of the markers.
    Class,
}

/// One stage of the candidate-region fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRule {
    /// Human-readable name, used in logs and in [`Extraction::rule`].
    pub label: String,
    /// CSS selector for the nodes this stage considers.
    pub selector: String,
    pub attribute: MatchAttribute,
    /// Substrings looked for in the chosen attribute.  Ignored for
    /// [`MatchAttribute::Any`].
    pub markers: Vec<String>,
    /// Once the best candidate reaches this many characters, later stages
    /// are skipped.
    pub min_length: usize,
}

impl CandidateRule {
    pub fn new(
        label: &str,
        selector: &str,
        attribute: MatchAttribute,
        markers: &[&str],
        min_length: usize,
    ) -> CandidateRule {
        CandidateRule {
            label: label.to_string(),
            selector: selector.to_string(),
            attribute,
            markers: markers.iter().map(|m| m.to_string()).collect(),
            min_length,
        }
    }

    /// The standard chain: `<article>` elements, then `div`/`section` by id,
    /// then `div`/`section` by class.
    pub fn default_chain(char_threshold: usize) -> Vec<CandidateRule> {
        vec![
            CandidateRule::new("article", "article", MatchAttribute::Any, &[], char_threshold),
            CandidateRule::new(
                "container-id",
                "div, section",
                MatchAttribute::Id,
                CONTENT_MARKERS,
                char_threshold,
            ),
            CandidateRule::new(
                "container-class",
                "div, section",
                MatchAttribute::Class,
                CONTENT_MARKERS,
                char_threshold,
            ),
        ]
    }
}

/// Knobs for the markup normalizer and the candidate extractor.
///
/// # Examples
///
/// ```rust
/// use gist_rs::ExtractOptions;
///
/// let mut opts = ExtractOptions::with_char_threshold(300);
/// opts.noise_markers.push(String::from("newsletter"));
/// assert_eq!(opts.rules.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Default per-stage threshold; used to build [`rules`][Self::rules].
    pub char_threshold: usize,
    /// The extracted text must reach this many characters, otherwise the
    /// page is reported as [`SummaryError::NoArticleFound`].
    pub min_article_length: usize,
    /// Tags removed wholesale before extraction.
    pub noise_tags: Vec<String>,
    /// Id/class substrings that mark a block as noise.
    pub noise_markers: Vec<String>,
    /// The ordered fallback chain.
    pub rules: Vec<CandidateRule>,
}

impl ExtractOptions {
    /// Defaults with every threshold set to `char_threshold`.
    pub fn with_char_threshold(char_threshold: usize) -> ExtractOptions {
        ExtractOptions {
            char_threshold,
            min_article_length: char_threshold,
            noise_tags: NOISE_TAGS.iter().map(|t| t.to_string()).collect(),
            noise_markers: NOISE_MARKERS.iter().map(|m| m.to_string()).collect(),
            rules: CandidateRule::default_chain(char_threshold),
        }
    }
}

impl Default for ExtractOptions {
    fn default() -> ExtractOptions {
        ExtractOptions::with_char_threshold(650)
    }
}

/// Knobs for word scoring, sentence scoring and top-N selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringOptions {
    /// Applied once to the count of words that start uppercase and are at
    /// least [`proper_noun_min_length`][Self::proper_noun_min_length] chars.
    pub proper_noun_multiplier: f64,
    pub proper_noun_min_length: usize,
    /// Applied once to sentences mentioning a financial term.
    pub financial_multiplier: f64,
    pub max_sentences: usize,
    pub max_keywords: usize,
    /// Shorter sentences are skipped during selection.
    pub min_sentence_length: usize,
    /// Lines of the article text shorter than this (after trimming) are
    /// dropped before tokenizing.  `0` keeps every non-blank line; `150`
    /// drops captions, bylines and other short fragments.
    pub min_line_length: usize,
    /// Skip keywords that equal, contain or are contained in an
    /// already-chosen keyword, ignoring case (folds plurals together).
    pub fold_keyword_variants: bool,
}

impl Default for ScoringOptions {
    fn default() -> ScoringOptions {
        ScoringOptions {
            proper_noun_multiplier: 3.0,
            proper_noun_min_length: 4,
            financial_multiplier: 1.5,
            max_sentences: 5,
            max_keywords: 5,
            min_sentence_length: 3,
            min_line_length: 0,
            fold_keyword_variants: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummarizeOptions {
    pub extraction: ExtractOptions,
    pub scoring: ScoringOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_tags_parse() {
        assert_eq!("es".parse::<Language>(), Ok(Language::Spanish));
        assert_eq!(" English ".parse::<Language>(), Ok(Language::English));
        assert_eq!(
            "fr".parse::<Language>(),
            Err(SummaryError::UnsupportedLanguage(String::from("fr")))
        );
        assert_eq!(Language::Spanish.to_string(), "es");
    }

    #[test]
    fn default_chain_uses_the_threshold_everywhere() {
        let opts = ExtractOptions::with_char_threshold(42);
        assert_eq!(opts.min_article_length, 42);
        let labels: Vec<_> = opts.rules.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["article", "container-id", "container-class"]);
        assert!(opts.rules.iter().all(|r| r.min_length == 42));
        assert!(opts.rules[0].markers.is_empty());
        assert!(opts.rules[1].markers.contains(&String::from("cuerpo")));
    }
}
