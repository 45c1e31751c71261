//! Span macros over [`super::logger::PerfLogger`].  Each one is a no-op in
//! release builds (guarded by `cfg!(debug_assertions)`), so label formatting
//! costs nothing outside debug builds.
//!
//! | Macro | Forwards to |
//! |---|---|
//! | `start_span!` | `PerfLogger::start` |
//! | `end_span!` | `PerfLogger::end` |
//! | `add_point_to_span_str!` | `PerfLogger::check_point_str` |
//! | `annotate_span!` | `PerfLogger::annotate` (label built with `format!`) |

macro_rules! start_span {
    ($logger:expr, $span_id:expr) => {
        if cfg!(debug_assertions) {
            $logger.start($span_id);
        }
    };
}

macro_rules! add_point_to_span_str {
    ($logger:expr, $span_id:expr, $point_str:expr) => {
        if cfg!(debug_assertions) {
            $logger.check_point_str($span_id, $point_str);
        }
    };
}

macro_rules! annotate_span {
    ($logger:expr, $span_id:expr, $($fmt:tt)+) => {
        if cfg!(debug_assertions) {
            $logger.annotate($span_id, format!($($fmt)+));
        }
    };
}

macro_rules! end_span {
    ($logger:expr, $span_id:expr) => {
        if cfg!(debug_assertions) {
            $logger.end($span_id);
        }
    };
}
