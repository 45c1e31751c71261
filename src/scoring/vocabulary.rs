//! Stop-word and financial-term sets.
//!
//! Stop words come from the `stop-words` crate (stopwords-iso lists) and are
//! merged with a hand-kept list of punctuation and filler words that news
//! pages are full of.  The per-language sets are built once, on first use,
//! and never change afterwards, so any number of threads may read them.

use crate::models::Language;
use crate::utils::title_case;
use rustc_hash::FxHashSet;
use std::sync::LazyLock;
use stop_words::{get, LANGUAGE};

/// Tokens that never score, whatever the language: punctuation the word
/// segmenter emits on its own, and filler words that show up in photo
/// credits and spelled-out numbers.
pub const COMMON_WORDS: &[&str] = &[
    " ", "  ", "\u{a0}", "#", ",", "|", "-", "–", "—", "‘", "’", ";", "(", ")", "[", "]", "{",
    "}", ".", "…", ":", "¿", "?", "¡", "!", "“", "/", "\\", "”", "\"", "'", "%", "•", "«", "»",
    "*", "&", "+", "=", "<", ">", "@", "·", "foto", "photo", "video", "redacción", "nueve", "diez",
    "cien", "mil", "miles", "ciento", "cientos", "millones", "vale",
];

/// Substrings that flag a sentence as money-related.  Matched against the
/// lowercased sentence, so they need no surrounding whitespace.
pub const FINANCIAL_TERMS: &[&str] = &[
    "$", "€", "£", "pesos", "dólar", "libras", "euros", "dollar", "pound", "mdp", "mdd",
];

static ENGLISH: LazyLock<Vocabulary> =
    LazyLock::new(|| Vocabulary::new(bundled_stop_words(Language::English), FINANCIAL_TERMS));
static SPANISH: LazyLock<Vocabulary> =
    LazyLock::new(|| Vocabulary::new(bundled_stop_words(Language::Spanish), FINANCIAL_TERMS));

fn bundled_stop_words(language: Language) -> Vec<String> {
    let lang = match language {
        Language::English => LANGUAGE::English,
        Language::Spanish => LANGUAGE::Spanish,
    };
    get(lang).iter().map(|s| s.to_string()).collect()
}

/// Read-only word lists used by the scorers.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// Stop words plus [`COMMON_WORDS`], each stored as written, uppercased
    /// and title-cased.
    common_words: FxHashSet<String>,
    /// Lowercase, in priority order.
    financial_terms: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary from custom lists.  [`COMMON_WORDS`] is always
    /// included.
    pub fn new<I, S, J, T>(stop_words: I, financial_terms: J) -> Vocabulary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        J: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut common_words = FxHashSet::default();
        let bundled = COMMON_WORDS.iter().map(|w| w.to_string());
        for word in bundled.chain(stop_words.into_iter().map(|w| w.as_ref().to_string())) {
            common_words.insert(word.to_uppercase());
            common_words.insert(title_case(word.as_str()));
            common_words.insert(word);
        }
        Vocabulary {
            common_words,
            financial_terms: financial_terms
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// The shared vocabulary for `language`.
    pub fn for_language(language: Language) -> &'static Vocabulary {
        match language {
            Language::English => &*ENGLISH,
            Language::Spanish => &*SPANISH,
        }
    }

    /// Exact-match test against the case-expanded common-word set.
    pub fn is_common(&self, token: &str) -> bool {
        self.common_words.contains(token)
    }

    /// The first financial term contained in `lowercase_text`, if any.
    pub fn financial_term_in(&self, lowercase_text: &str) -> Option<&str> {
        self.financial_terms
            .iter()
            .find(|term| lowercase_text.contains(term.as_str()))
            .map(|term| term.as_str())
    }

    pub fn common_word_count(&self) -> usize {
        self.common_words.len()
    }
}
