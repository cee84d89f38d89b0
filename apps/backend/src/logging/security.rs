use tracing::warn;

use crate::trace_ctx;

/// Log a rejected administrative or callback token.
pub fn token_rejected(surface: &'static str, path: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        %trace_id,
        surface,
        path,
        "Request carried a missing or wrong token"
    );
}
