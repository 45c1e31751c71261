//! Sentence and word segmentation.
//!
//! The scorers only talk to the [`Tokenizer`] trait, so a model-backed
//! segmenter can replace [`RuleTokenizer`] without touching them.

use crate::errors::TokenizeError;
use crate::models::Language;
use regex::Regex;
use std::sync::LazyLock;

/// A word, or a single punctuation/symbol character.
static WORD_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+(?:['’\-]\w+)*|[^\w\s]").unwrap());

/// Terminal punctuation, any closing quotes or brackets, then whitespace.
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[.!?…]+["'”’»)\]]*\s+"#).unwrap());

/// When a period after a known abbreviation does not end the sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Continues {
    /// Titles and the like: never.
    Always,
    /// Only before a number ("No. 5").
    BeforeNumber,
    /// Only before a lowercase word ("etc. y").
    BeforeLowercase,
}

const ENGLISH_ABBREVIATIONS: &[(&str, Continues)] = &[
    ("mr", Continues::Always),
    ("mrs", Continues::Always),
    ("ms", Continues::Always),
    ("dr", Continues::Always),
    ("prof", Continues::Always),
    ("sr", Continues::Always),
    ("jr", Continues::Always),
    ("st", Continues::Always),
    ("vs", Continues::Always),
    ("gen", Continues::Always),
    ("gov", Continues::Always),
    ("sen", Continues::Always),
    ("rep", Continues::Always),
    ("no", Continues::BeforeNumber),
    ("etc", Continues::BeforeLowercase),
    ("inc", Continues::BeforeLowercase),
    ("corp", Continues::BeforeLowercase),
    ("ltd", Continues::BeforeLowercase),
];

const SPANISH_ABBREVIATIONS: &[(&str, Continues)] = &[
    ("sr", Continues::Always),
    ("sra", Continues::Always),
    ("srta", Continues::Always),
    ("dr", Continues::Always),
    ("dra", Continues::Always),
    ("lic", Continues::Always),
    ("ing", Continues::Always),
    ("ej", Continues::Always),
    ("pág", Continues::Always),
    ("av", Continues::Always),
    ("gral", Continues::Always),
    ("ee", Continues::Always),
    ("núm", Continues::BeforeNumber),
    ("etc", Continues::BeforeLowercase),
    ("uu", Continues::BeforeLowercase),
];

/// One sentence of the input: byte offsets into the segmented text and the
/// trimmed sentence itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceSpan {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Segmentation capability consumed by the scorers.  Both operations must
/// be deterministic and preserve input order.
pub trait Tokenizer: Send + Sync {
    fn segment_sentences(
        &self,
        text: &str,
        language: Language,
    ) -> Result<Vec<SentenceSpan>, TokenizeError>;

    fn segment_words(&self, text: &str, language: Language) -> Result<Vec<String>, TokenizeError>;
}

/// Regex-based segmenter.  Splits sentences on terminal punctuation followed
/// by whitespace, except after a known abbreviation, and emits punctuation
/// marks as separate word tokens.  Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleTokenizer;

fn abbreviations(language: Language) -> &'static [(&'static str, Continues)] {
    match language {
        Language::English => ENGLISH_ABBREVIATIONS,
        Language::Spanish => SPANISH_ABBREVIATIONS,
    }
}

/// `true` when the single period at `at` closes an abbreviation such as
/// "Sr." rather than a sentence.  `next` is the first character after the
/// break.
fn ends_abbreviation(text: &str, at: usize, next: Option<char>, language: Language) -> bool {
    let before = &text[..at];
    let word = before
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default()
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    let continues = abbreviations(language)
        .iter()
        .find(|(abbreviation, _)| *abbreviation == word.as_str())
        .map(|(_, continues)| *continues);
    match continues {
        Some(Continues::Always) => true,
        Some(Continues::BeforeNumber) => next.is_some_and(|c| c.is_numeric()),
        Some(Continues::BeforeLowercase) => next.is_some_and(char::is_lowercase),
        None => false,
    }
}

fn push_span(text: &str, start: usize, end: usize, spans: &mut Vec<SentenceSpan>) {
    let raw = &text[start..end];
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }
    let offset = start + (raw.len() - raw.trim_start().len());
    spans.push(SentenceSpan {
        start: offset,
        end: offset + trimmed.len(),
        text: trimmed.to_string(),
    });
}

impl Tokenizer for RuleTokenizer {
    fn segment_sentences(
        &self,
        text: &str,
        language: Language,
    ) -> Result<Vec<SentenceSpan>, TokenizeError> {
        let mut spans = vec![];
        let mut start = 0;
        for m in SENTENCE_BREAK.find_iter(text) {
            let terminator = m.as_str();
            let single_period = terminator.starts_with('.') && !terminator.starts_with("..");
            let next = text[m.end()..].chars().next();
            if single_period && ends_abbreviation(text, m.start(), next, language) {
                continue;
            }
            push_span(text, start, m.end(), &mut spans);
            start = m.end();
        }
        push_span(text, start, text.len(), &mut spans);
        Ok(spans)
    }

    fn segment_words(&self, text: &str, _language: Language) -> Result<Vec<String>, TokenizeError> {
        Ok(WORD_TOKEN
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect())
    }
}
