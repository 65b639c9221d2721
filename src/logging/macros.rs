//! Span macros over [`super::logger::PerfLogger`].  They expand to nothing
//! observable in release builds (guarded by `cfg!(debug_assertions)`).

macro_rules! start_span {
    ($logger:ident, $span_id:ident) => {
        if cfg!(debug_assertions) {
            $logger.start($span_id);
        }
    };
}

macro_rules! add_point_to_span {
    ($logger:ident, $span_id:ident, $point:expr) => {
        if cfg!(debug_assertions) {
            $logger.check_point($span_id, $point);
        }
    };
}

macro_rules! annotate_span {
    ($logger:ident, $span_id:ident, $annotation:expr) => {
        if cfg!(debug_assertions) {
            $logger.annotate($span_id, $annotation);
        }
    };
}

macro_rules! end_span {
    ($logger:ident, $span_id:ident) => {
        if cfg!(debug_assertions) {
            $logger.end($span_id);
        }
    };
}
