mod candidates;

use crate::errors::SummaryError;
use crate::logging::logger::*;
use crate::logging::logging_defs::*;
use crate::models::{ExtractOptions, Extraction};
use crate::parser::NodeRef;

pub use candidates::extract_article_text;

/// A parsed document with line breaks after every block boundary and all
/// noise removed.  Only lives until the candidate extractor has run.
pub struct NormalizedTree {
    root: NodeRef,
}

impl NormalizedTree {
    pub fn root(&self) -> &NodeRef {
        &self.root
    }
}

mod extractor_utils {
    use super::NormalizedTree;
    use crate::errors::SummaryError;
    use crate::logging::logger::*;
    use crate::logging::logging_defs::*;
    use crate::models::{ExtractOptions, Metadata};
    use crate::parser::{parse_html, NodeExt, NodeRef};
    use crate::utils::{
        char_len, contains_any, insert_block_breaks, remove_tags_with_selector, select_descendants,
    };

    /// Titles this short are usually a site acronym, not the headline.
    const MIN_TITLE_LENGTH: usize = 5;
    /// Dates this short are placeholders ("hoy", "ayer", ...).
    const MIN_DATE_LENGTH: usize = 5;

    /// Insert block breaks and parse.  html5ever recovers from nearly any
    /// malformed input, so the failures here are the ones it cannot paper
    /// over: nothing to parse, or a document without a `<body>` (framesets).
    pub fn parse_marked_up(html: &str, logger: &PerfLogger) -> Result<NodeRef, SummaryError> {
        if html.trim().is_empty() {
            return Err(SummaryError::MarkupParse(String::from("empty document")));
        }
        let marked_up = insert_block_breaks(html);
        add_point_to_span_str!(logger, NORMALIZE_MARKUP, "block_breaks_inserted");
        let doc = parse_html(marked_up.as_str());
        add_point_to_span_str!(logger, NORMALIZE_MARKUP, "parsed");
        if doc.select_first("body").is_err() {
            return Err(SummaryError::MarkupParse(String::from(
                "document has no <body> element",
            )));
        }
        Ok(doc)
    }

    fn flat_text(node: &NodeRef) -> String {
        node.text_contents().replace('\n', " ").trim().to_string()
    }

    fn first_text(doc: &NodeRef, selector: &str) -> String {
        select_descendants(doc, selector)
            .first()
            .map(flat_text)
            .unwrap_or_default()
    }

    /// Strip the timezone offset and `Z` marker from an ISO-8601 timestamp.
    pub fn clean_timestamp(value: &str) -> String {
        value
            .split('+')
            .next()
            .unwrap_or_default()
            .replace('Z', "")
            .trim()
            .to_string()
    }

    /// Title and publish time.  Must run before [`strip_noise`], which
    /// removes the `<h1>` and `<time>` fallbacks.
    pub fn get_metadata(doc: &NodeRef, logger: &PerfLogger) -> Metadata {
        start_span!(logger, GET_METADATA);
        let mut title = first_text(doc, "title");
        if char_len(title.as_str()) <= MIN_TITLE_LENGTH {
            annotate_span!(logger, GET_METADATA, "title {:?} too short, trying <h1>", title);
            let heading = first_text(doc, "h1");
            if !heading.is_empty() {
                title = heading;
            }
        }

        let mut published_time = String::new();
        for meta in select_descendants(doc, "meta") {
            let is_time_property = meta
                .attr_value("property")
                .is_some_and(|p| p.contains("time"));
            if !is_time_property {
                continue;
            }
            if let Some(content) = meta.attr_value("content") {
                published_time = clean_timestamp(content.as_str());
                break;
            }
        }
        if char_len(published_time.as_str()) <= MIN_DATE_LENGTH {
            let time_text = first_text(doc, "time");
            if !time_text.is_empty() {
                published_time = time_text;
            }
        }

        end_span!(logger, GET_METADATA);
        Metadata {
            title,
            published_time,
        }
    }

    /// Remove noise tags, then blocks whose id or class carries a noise
    /// marker.  Over-keeping is fine here: the candidate chain prefers the
    /// longest region anyway.
    pub fn strip_noise(doc: &NodeRef, options: &ExtractOptions, logger: &PerfLogger) {
        for tag in &options.noise_tags {
            remove_tags_with_selector(doc, tag.as_str());
        }
        add_point_to_span_str!(logger, NORMALIZE_MARKUP, "noise_tags_removed");

        for div in select_descendants(doc, "div") {
            if let Some(id) = div.lowercase_id() {
                if contains_any(id.as_str(), &options.noise_markers) {
                    div.detach();
                }
            }
        }
        add_point_to_span_str!(logger, NORMALIZE_MARKUP, "noisy_ids_removed");

        for block in select_descendants(doc, "div, p, blockquote") {
            if let Some(classes) = block.joined_classes() {
                if contains_any(classes.as_str(), &options.noise_markers) {
                    block.detach();
                }
            }
        }
        add_point_to_span_str!(logger, NORMALIZE_MARKUP, "noisy_classes_removed");
    }

    /// Full normalization pass: returns the cleaned tree together with the
    /// metadata read from the unstripped one.
    pub fn normalize_markup(
        html: &str,
        options: &ExtractOptions,
        logger: &PerfLogger,
    ) -> Result<(NormalizedTree, Metadata), SummaryError> {
        start_span!(logger, NORMALIZE_MARKUP);
        let doc = match parse_marked_up(html, logger) {
            Ok(doc) => doc,
            Err(e) => {
                end_span!(logger, NORMALIZE_MARKUP);
                return Err(e);
            }
        };
        let metadata = get_metadata(&doc, logger);
        strip_noise(&doc, options, logger);
        end_span!(logger, NORMALIZE_MARKUP);
        Ok((NormalizedTree { root: doc }, metadata))
    }
}

pub use extractor_utils::normalize_markup;

/// Runs the markup normalizer and the candidate chain over one page.
pub struct Extractor<'a> {
    pub html: &'a str,
    pub options: &'a ExtractOptions,
    logger: &'a PerfLogger,
}

impl<'a> Extractor<'a> {
    pub fn new(html: &'a str, options: &'a ExtractOptions, logger: &'a PerfLogger) -> Extractor<'a> {
        Extractor {
            html,
            options,
            logger,
        }
    }

    pub fn extract(self) -> Result<Extraction, SummaryError> {
        let logger = self.logger;
        let (tree, metadata) = normalize_markup(self.html, self.options, logger)?;
        let candidate = extract_article_text(&tree, &self.options.rules, logger);
        let longest = candidate.length;
        if longest < self.options.min_article_length {
            annotate_span!(
                logger,
                SUMMARIZE,
                "giving up: best candidate has {} chars",
                longest
            );
            return Err(SummaryError::NoArticleFound {
                longest,
                threshold: self.options.min_article_length,
            });
        }
        Ok(Extraction {
            metadata,
            text: candidate.text,
            rule: candidate.rule.unwrap_or_default(),
        })
    }
}
