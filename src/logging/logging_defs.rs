/// Span IDs for performance-logging events.  Each ID must be unique;
/// simply increment when adding a new span.
pub const SUMMARIZE: u64 = 1;
pub const NORMALIZE_MARKUP: u64 = 2;
pub const GET_METADATA: u64 = 3;
pub const EXTRACT_CANDIDATE: u64 = 4;
pub const SCORE_WORDS: u64 = 5;
pub const SCORE_SENTENCES: u64 = 6;
pub const SELECT_TOP: u64 = 7;

pub fn name(span_id: u64) -> &'static str {
    match span_id {
        SUMMARIZE => "SUMMARIZE",
        NORMALIZE_MARKUP => "NORMALIZE_MARKUP",
        GET_METADATA => "GET_METADATA",
        EXTRACT_CANDIDATE => "EXTRACT_CANDIDATE",
        SCORE_WORDS => "SCORE_WORDS",
        SCORE_SENTENCES => "SCORE_SENTENCES",
        SELECT_TOP => "SELECT_TOP",
        _ => "UNKNOWN_SPAN",
    }
}

pub const ALL_SPANS: &[u64] = &[
    SUMMARIZE,
    NORMALIZE_MARKUP,
    GET_METADATA,
    EXTRACT_CANDIDATE,
    SCORE_WORDS,
    SCORE_SENTENCES,
    SELECT_TOP,
];

/// Reverse of [`name`], case-insensitive.
pub fn span_id(span_name: &str) -> Option<u64> {
    ALL_SPANS
        .iter()
        .copied()
        .find(|id| name(*id).eq_ignore_ascii_case(span_name.trim()))
}
