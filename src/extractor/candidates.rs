use super::NormalizedTree;
use crate::logging::logger::*;
use crate::logging::logging_defs::*;
use crate::models::{CandidateRule, MatchAttribute};
use crate::parser::{NodeExt, NodeRef};
use crate::utils::{contains_any, select_descendants};

/// The best text found by the candidate chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    pub text: String,
    /// Length of `text` in characters, ignoring layout whitespace.
    pub length: usize,
    /// Label of the rule that produced `text`, `None` if no node matched.
    pub rule: Option<String>,
}

fn rule_matches(rule: &CandidateRule, node: &NodeRef) -> bool {
    let attr = match rule.attribute {
        MatchAttribute::Any => return true,
        MatchAttribute::Id => node.lowercase_id(),
        MatchAttribute::Class => node.joined_classes(),
    };
    attr.is_some_and(|value| contains_any(value.as_str(), &rule.markers))
}

/// Run the fallback chain over `tree`.
///
/// Every rule scans its matching nodes in document order and replaces the
/// current best text whenever a node's text is *at least as long*, so among
/// equally long candidates the last one wins.  The best text carries over
/// from one rule to the next, which keeps its length non-decreasing along
/// the chain.  A rule only runs when the previous one left the best text
/// shorter than that rule's `min_length`.  Lengths come from
/// [`NodeExt::text_len`], so indentation and block breaks never count.
pub fn extract_article_text(
    tree: &NormalizedTree,
    rules: &[CandidateRule],
    logger: &PerfLogger,
) -> Candidate {
    start_span!(logger, EXTRACT_CANDIDATE);
    let mut best = Candidate::default();
    let mut best_len = 0;

    for rule in rules {
        let mut scanned = 0;
        for node in select_descendants(tree.root(), rule.selector.as_str()) {
            if !rule_matches(rule, &node) {
                continue;
            }
            scanned += 1;
            let len = node.text_len();
            if len >= best_len {
                best = Candidate {
                    text: node.text_contents(),
                    length: len,
                    rule: Some(rule.label.clone()),
                };
                best_len = len;
            }
        }
        annotate_span!(
            logger,
            EXTRACT_CANDIDATE,
            "rule {}: {} candidates, best has {} chars",
            rule.label,
            scanned,
            best_len
        );
        if best_len >= rule.min_length {
            break;
        }
    }

    end_span!(logger, EXTRACT_CANDIDATE);
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::normalize_markup;
    use crate::models::ExtractOptions;

    fn run(html: &str, threshold: usize) -> Candidate {
        let opts = ExtractOptions::with_char_threshold(threshold);
        let logger = PerfLogger::new(vec![]);
        let (tree, _) = normalize_markup(html, &opts, &logger).unwrap();
        extract_article_text(&tree, &opts.rules, &logger)
    }

    #[test]
    fn longest_article_tag_wins() {
        let html = "<article>short decoy</article>\
                    <article>the real and much longer article body</article>\
                    <article>another decoy</article>";
        let best = run(html, 10);
        assert_eq!(best.text, "the real and much longer article body");
        assert_eq!(best.rule.as_deref(), Some("article"));
    }

    #[test]
    fn equal_length_candidates_keep_the_last_one() {
        let html = "<article>first</article><article>last!</article>";
        let best = run(html, 3);
        assert_eq!(best.text, "last!");
    }

    #[test]
    fn a_long_enough_article_stops_the_chain() {
        let html = "<article>long enough text</article>\
                    <div id=\"content\">an even longer block of text that would win</div>";
        let best = run(html, 10);
        assert_eq!(best.text, "long enough text");
        assert_eq!(best.rule.as_deref(), Some("article"));
    }

    #[test]
    fn short_article_falls_back_to_id_then_class() {
        let html = "<article>tiny</article>\
                    <div id=\"cuerpo-nota\">texto por id</div>\
                    <div class=\"entry content\">texto por clase, el mas largo</div>";
        let by_id = run(html, 5);
        assert_eq!(by_id.text, "texto por id");
        assert_eq!(by_id.rule.as_deref(), Some("container-id"));

        let by_class = run(html, 20);
        assert_eq!(by_class.text, "texto por clase, el mas largo");
        assert_eq!(by_class.rule.as_deref(), Some("container-class"));
    }

    #[test]
    fn later_stages_never_shorten_the_result() {
        let html = "<article>an article of medium size</article>\
                    <section id=\"body\">short</section>\
                    <div class=\"note\">tiny</div>";
        let best = run(html, 1000);
        assert_eq!(best.text, "an article of medium size");
        assert_eq!(best.rule.as_deref(), Some("article"));
    }

    #[test]
    fn padding_whitespace_does_not_make_a_candidate_longer() {
        let padded = format!(
            "<article>{}<p>ok</p></article><div id=\"contenido\">texto real del cuerpo</div>",
            "<p>   </p>\n".repeat(200)
        );
        let best = run(padded.as_str(), 10);
        assert_eq!(best.text.trim(), "texto real del cuerpo");
        assert_eq!(best.length, 21);
        assert_eq!(best.rule.as_deref(), Some("container-id"));
    }

    #[test]
    fn nothing_matches_gives_an_empty_candidate() {
        let best = run("<div id=\"menu\">x</div><p>loose paragraph</p>", 10);
        assert_eq!(best, Candidate::default());
    }

    #[test]
    fn spanish_stems_match_in_ids() {
        let rule = CandidateRule::new("id", "div", MatchAttribute::Id, &["artic"], 0);
        let doc = crate::parser::parse_html("<div id=\"Articulo-Principal\">x</div>");
        let div = select_descendants(&doc, "div").remove(0);
        assert!(rule_matches(&rule, &div));
    }
}
