/// Span IDs for performance-logging events.  Each ID must be unique;
/// simply increment when adding a new span.
pub const EMIT: u64 = 1;
pub const BUILD_TREE: u64 = 2;
pub const FLUSH_SUBSTITUTIONS: u64 = 3;
pub const RENDER_TABLE: u64 = 4;
pub const RENDER_LIST: u64 = 5;
pub const NORMALIZE_OUTPUT: u64 = 6;

pub fn name(span_id: u64) -> &'static str {
    match span_id {
        EMIT => "EMIT",
        BUILD_TREE => "BUILD_TREE",
        FLUSH_SUBSTITUTIONS => "FLUSH_SUBSTITUTIONS",
        RENDER_TABLE => "RENDER_TABLE",
        RENDER_LIST => "RENDER_LIST",
        NORMALIZE_OUTPUT => "NORMALIZE_OUTPUT",
        _ => panic!(
            "Calling logging::logging_defs::name with unknown span_id: {}",
            span_id
        ),
    }
}
