use super::vocabulary::Vocabulary;
use crate::models::ScoringOptions;
use crate::utils::{char_len, is_numeric_token, starts_uppercase};
use rustc_hash::FxHashMap;

/// Word → score, keyed by surface form (case preserved).  Iteration follows
/// the order in which words were first counted, which is what breaks ties
/// between equally scored keywords.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordScoreTable {
    entries: Vec<(String, f64)>,
    index: FxHashMap<String, usize>,
}

impl WordScoreTable {
    pub fn new() -> WordScoreTable {
        WordScoreTable::default()
    }

    fn increment(&mut self, word: &str) {
        match self.index.get(word) {
            Some(&i) => self.entries[i].1 += 1.0,
            None => {
                self.index.insert(word.to_string(), self.entries.len());
                self.entries.push((word.to_string(), 1.0));
            }
        }
    }

    /// The score of `word`; unknown words score 0.
    pub fn get(&self, word: &str) -> f64 {
        self.index
            .get(word)
            .map(|&i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(w, s)| (w.as_str(), *s))
    }

    /// Entries by descending score; equal scores keep first-seen order.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

/// Count every token that is not a common word, then adjust per distinct
/// word: capitalised words of at least `proper_noun_min_length` characters
/// get their count multiplied once by `proper_noun_multiplier`, and purely
/// numeric tokens drop to 0.
pub fn score_words(
    tokens: &[String],
    vocabulary: &Vocabulary,
    options: &ScoringOptions,
) -> WordScoreTable {
    let mut table = WordScoreTable::new();
    for token in tokens {
        if !vocabulary.is_common(token.as_str()) {
            table.increment(token.as_str());
        }
    }

    for (word, score) in table.entries.iter_mut() {
        if starts_uppercase(word) && char_len(word) >= options.proper_noun_min_length {
            *score *= options.proper_noun_multiplier;
        }
        if is_numeric_token(word) {
            *score = 0.0;
        }
    }
    table
}
