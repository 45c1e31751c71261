use super::tokenizer::{SentenceSpan, Tokenizer};
use super::vocabulary::Vocabulary;
use super::words::WordScoreTable;
use crate::errors::TokenizeError;
use crate::models::{Language, ScoringOptions};
use rustc_hash::FxHashSet;

/// A sentence with its score and its position among the segmented
/// sentences.  The position is what restores document order after ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSentence {
    pub score: f64,
    pub index: usize,
    pub text: String,
}

/// Sum of the word scores of every non-common token, multiplied once by
/// `financial_multiplier` if the lowercased sentence mentions a financial
/// term.
pub fn score_sentence(
    text: &str,
    tokens: &[String],
    table: &WordScoreTable,
    vocabulary: &Vocabulary,
    options: &ScoringOptions,
) -> f64 {
    let sum: f64 = tokens
        .iter()
        .filter(|t| !vocabulary.is_common(t.as_str()))
        .map(|t| table.get(t.as_str()))
        .sum();
    match vocabulary.financial_term_in(text.to_lowercase().as_str()) {
        Some(_) => sum * options.financial_multiplier,
        None => sum,
    }
}

/// Score every distinct sentence.  A sentence whose exact text was already
/// seen is dropped; its index is not reused, so indices may have gaps.
pub fn score_sentences(
    sentences: &[SentenceSpan],
    table: &WordScoreTable,
    vocabulary: &Vocabulary,
    tokenizer: &dyn Tokenizer,
    language: Language,
    options: &ScoringOptions,
) -> Result<Vec<ScoredSentence>, TokenizeError> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut scored = Vec::with_capacity(sentences.len());
    for (index, sentence) in sentences.iter().enumerate() {
        if !seen.insert(sentence.text.as_str()) {
            continue;
        }
        let tokens = tokenizer.segment_words(sentence.text.as_str(), language)?;
        scored.push(ScoredSentence {
            score: score_sentence(sentence.text.as_str(), &tokens, table, vocabulary, options),
            index,
            text: sentence.text.clone(),
        });
    }
    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::tokenizer::RuleTokenizer;
    use crate::scoring::words::score_words;

    const TEXT: &str = "Juan compró acciones. El mercado subió hoy. Juan vendió todo.";

    fn vocab() -> Vocabulary {
        Vocabulary::new(["el", "hoy", "todo"], ["mercado", "acciones"])
    }

    fn score(text: &str, vocabulary: &Vocabulary) -> Vec<ScoredSentence> {
        let options = ScoringOptions::default();
        let words = RuleTokenizer.segment_words(text, Language::Spanish).unwrap();
        let table = score_words(&words, vocabulary, &options);
        let spans = RuleTokenizer.segment_sentences(text, Language::Spanish).unwrap();
        score_sentences(&spans, &table, vocabulary, &RuleTokenizer, Language::Spanish, &options)
            .unwrap()
    }

    #[test]
    fn sums_word_scores_and_applies_the_financial_bonus() {
        let scored = score(TEXT, &vocab());
        let scores: Vec<f64> = scored.iter().map(|s| s.score).collect();
        // Juan = 2 × 3; every other content word counts 1.
        // "Juan compró acciones." = (6 + 1 + 1) × 1.5
        // "El mercado subió hoy." = (1 + 1) × 1.5
        // "Juan vendió todo."     =  6 + 1
        assert_eq!(scores, vec![12.0, 3.0, 7.0]);
        let indices: Vec<usize> = scored.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn financial_bonus_applies_once() {
        let vocabulary = Vocabulary::new(Vec::<&str>::new(), ["pesos", "dólar", "$"]);
        let table = score_words(
            &["tasa".to_string(), "banco".to_string()],
            &vocabulary,
            &ScoringOptions::default(),
        );
        let tokens = vec!["tasa".to_string(), "banco".to_string()];
        let many_terms = score_sentence(
            "Tasa banco: $5 pesos por dólar",
            &tokens,
            &table,
            &vocabulary,
            &ScoringOptions::default(),
        );
        let plain = score_sentence("tasa banco", &tokens, &table, &vocabulary, &ScoringOptions::default());
        assert_eq!(plain, 2.0);
        assert_eq!(many_terms, 3.0);
    }

    #[test]
    fn financial_bonus_can_flip_the_ranking() {
        let text = "Pemex pagó pesos. Pemex ganó fama.";
        let vocabulary = Vocabulary::new(Vec::<&str>::new(), ["pesos"]);
        let scored = score(text, &vocabulary);
        // Pemex = 2 × 3, then pagó/pesos and ganó/fama each add 2.
        assert_eq!(scored[0].score, (6.0 + 2.0) * 1.5);
        assert_eq!(scored[1].score, 6.0 + 2.0);
        assert!(scored[0].score > scored[1].score);
    }

    #[test]
    fn repeated_sentences_are_scored_once() {
        let text = "Sube el dólar. Baja el euro. Sube el dólar.";
        let scored = score(text, &Vocabulary::new(["el"], Vec::<&str>::new()));
        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].index, 0);
        assert_eq!(scored[1].index, 1);
        assert_eq!(scored[1].text, "Baja el euro.");
    }

    #[test]
    fn unknown_words_contribute_nothing() {
        let vocabulary = Vocabulary::new(Vec::<&str>::new(), Vec::<&str>::new());
        let table = WordScoreTable::new();
        let tokens = vec!["nuevo".to_string(), "2020".to_string()];
        let score = score_sentence("nuevo 2020", &tokens, &table, &vocabulary, &ScoringOptions::default());
        assert_eq!(score, 0.0);
    }
}
