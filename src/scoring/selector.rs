//! Top-N selection and chronological reassembly.

use super::sentences::ScoredSentence;
use super::words::WordScoreTable;
use crate::models::ScoringOptions;
use crate::utils::char_len;
use std::cmp::Ordering;

/// Descending score; ties go to the lower index, then to the smaller text.
fn by_rank(a: &ScoredSentence, b: &ScoredSentence) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.index.cmp(&b.index))
        .then_with(|| a.text.cmp(&b.text))
}

/// Pick the `max_sentences` best sentences and return them in document
/// order.  Sentences shorter than `min_sentence_length` characters are
/// skipped without using up a slot.
pub fn select_sentences(scored: &[ScoredSentence], options: &ScoringOptions) -> Vec<String> {
    let mut ranked: Vec<&ScoredSentence> = scored.iter().collect();
    ranked.sort_by(|a, b| by_rank(a, b));

    let mut chosen: Vec<&ScoredSentence> = ranked
        .into_iter()
        .filter(|s| char_len(s.text.as_str()) >= options.min_sentence_length)
        .take(options.max_sentences)
        .collect();

    chosen.sort_by_key(|s| s.index);
    chosen.into_iter().map(|s| s.text.clone()).collect()
}

/// `true` if `candidate` is the same word as, or a plural/derived form of,
/// one of `chosen`, ignoring case.
fn is_variant_of_any(candidate: &str, chosen: &[String]) -> bool {
    let candidate = candidate.to_uppercase();
    chosen.iter().any(|c| {
        let c = c.to_uppercase();
        c.contains(candidate.as_str()) || candidate.contains(c.as_str())
    })
}

/// The `max_keywords` best words, in rank order.
pub fn select_keywords(table: &WordScoreTable, options: &ScoringOptions) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::with_capacity(options.max_keywords);
    for (word, _) in table.ranked() {
        if keywords.len() >= options.max_keywords {
            break;
        }
        if options.fold_keyword_variants && is_variant_of_any(word, &keywords) {
            continue;
        }
        keywords.push(word.to_string());
    }
    keywords
}

/// Percentage of the article that the summary leaves out.
pub fn reduction(summary: &[String], article: &str) -> f64 {
    let article_len = char_len(article);
    if article_len == 0 {
        return 0.0;
    }
    let summary_len: usize = summary.iter().map(|s| char_len(s.as_str())).sum();
    100.0 - (summary_len as f64 / article_len as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::vocabulary::Vocabulary;
    use crate::scoring::words::score_words;

    fn sentence(score: f64, index: usize, text: &str) -> ScoredSentence {
        ScoredSentence {
            score,
            index,
            text: text.to_string(),
        }
    }

    #[test]
    fn best_sentences_come_back_in_document_order() {
        let scored = vec![
            sentence(1.0, 0, "uno"),
            sentence(9.0, 1, "dos"),
            sentence(4.0, 2, "tres"),
            sentence(7.0, 3, "cuatro"),
            sentence(2.0, 4, "cinco"),
            sentence(8.0, 5, "seis"),
            sentence(3.0, 6, "siete"),
        ];
        let summary = select_sentences(&scored, &ScoringOptions::default());
        assert_eq!(summary, vec!["dos", "tres", "cuatro", "seis", "siete"]);
    }

    #[test]
    fn short_sentences_do_not_use_up_slots() {
        let scored = vec![
            sentence(50.0, 0, "\u{200b}."),
            sentence(40.0, 1, "ab"),
            sentence(3.0, 2, "uno"),
            sentence(2.0, 3, "dos"),
        ];
        let options = ScoringOptions {
            max_sentences: 2,
            ..ScoringOptions::default()
        };
        assert_eq!(select_sentences(&scored, &options), vec!["uno", "dos"]);
    }

    #[test]
    fn ties_prefer_the_earlier_sentence() {
        let scored = vec![
            sentence(5.0, 0, "primera"),
            sentence(5.0, 1, "segunda"),
            sentence(5.0, 2, "tercera"),
        ];
        let options = ScoringOptions {
            max_sentences: 2,
            ..ScoringOptions::default()
        };
        assert_eq!(select_sentences(&scored, &options), vec!["primera", "segunda"]);
    }

    #[test]
    fn fewer_sentences_than_slots() {
        let scored = vec![sentence(1.0, 0, "sola")];
        assert_eq!(select_sentences(&scored, &ScoringOptions::default()), vec!["sola"]);
        assert!(select_sentences(&[], &ScoringOptions::default()).is_empty());
    }

    fn table(words: &[&str]) -> WordScoreTable {
        let tokens: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        score_words(
            &tokens,
            &Vocabulary::new(Vec::<&str>::new(), Vec::<&str>::new()),
            &ScoringOptions::default(),
        )
    }

    #[test]
    fn keywords_are_in_rank_order() {
        let t = table(&[
            "tasa", "México", "banco", "tasa", "crédito", "peso", "tasa", "inflación", "meta",
        ]);
        // México = 3, tasa = 3 (first seen earlier), then the singles in order.
        assert_eq!(
            select_keywords(&t, &ScoringOptions::default()),
            vec!["tasa", "México", "banco", "crédito", "peso"]
        );
    }

    #[test]
    fn keyword_variants_fold_when_enabled() {
        let t = table(&["peso", "peso", "pesos", "Pesos", "tasa", "tasas", "banco"]);
        let mut options = ScoringOptions::default();
        assert_eq!(
            select_keywords(&t, &options),
            vec!["Pesos", "peso", "pesos", "tasa", "tasas"]
        );
        options.fold_keyword_variants = true;
        assert_eq!(select_keywords(&t, &options), vec!["Pesos", "tasa", "banco"]);
    }

    #[test]
    fn reduction_percentage() {
        let summary = vec!["abcd".to_string(), "é".to_string()];
        assert_eq!(reduction(&summary, "abcdéfghijklmnopqrst"), 75.0);
        assert_eq!(reduction(&summary, ""), 0.0);
    }
}
