use std::time::Duration;

use rand::random;

// Reconnect loop (worker side)
const INITIAL_RETRY_DELAY_SECS: u64 = 1;
const MAX_RETRY_DELAY_SECS: u64 = 60;
const RETRY_DELAY_MULTIPLIER: f64 = 2.0;
const JITTER_PERCENT: f64 = 0.2;

// Producer (request path)
pub const PRODUCER_MAX_ATTEMPTS: u32 = 3;
const PRODUCER_INITIAL_RETRY_DELAY_MS: u64 = 50;
const PRODUCER_MAX_RETRY_DELAY_MS: u64 = 200;

/// Exponential backoff with ±20% jitter, capped at 60s. `attempt` starts at 1.
pub fn reconnect_delay(attempt: u32) -> Duration {
    let exponent = attempt.max(1) as i32 - 1;
    let base_delay = INITIAL_RETRY_DELAY_SECS as f64 * RETRY_DELAY_MULTIPLIER.powi(exponent);
    let capped_delay = base_delay.min(MAX_RETRY_DELAY_SECS as f64);

    let jitter_range = capped_delay * JITTER_PERCENT;
    let jitter = (random::<f64>() * 2.0 - 1.0) * jitter_range;
    let final_delay = (capped_delay + jitter).max(0.1);

    Duration::from_secs_f64(final_delay)
}

/// Short, deterministic backoff for enqueue retries on the request path.
pub fn producer_delay(attempt: u32) -> Duration {
    let exponent = attempt.max(1) - 1;
    let delay_ms = PRODUCER_INITIAL_RETRY_DELAY_MS
        .saturating_mul(2_u64.saturating_pow(exponent))
        .min(PRODUCER_MAX_RETRY_DELAY_MS);
    Duration::from_millis(delay_ms)
}

/// Classify a Redis failure. Auth and protocol errors will not heal by retrying.
pub fn is_transient_redis_error(err: &redis::RedisError) -> bool {
    if err.is_io_error() || err.is_timeout() || err.is_connection_dropped() {
        return true;
    }

    let message = err.to_string().to_lowercase();
    if message.contains("authentication")
        || message.contains("noauth")
        || message.contains("wrongtype")
        || message.contains("unknown command")
    {
        return false;
    }

    message.contains("connection refused")
        || message.contains("connection reset")
        || message.contains("broken pipe")
        || message.contains("timed out")
        || message.contains("loading")
}
