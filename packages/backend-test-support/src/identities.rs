//! Fresh player identities for tests.

use std::sync::atomic::{AtomicU32, Ordering};

use uuid::Uuid;

static NAME_SEQ: AtomicU32 = AtomicU32::new(0);

/// A new opaque player id in the shape the identity middleware issues.
pub fn player_id() -> String {
    Uuid::new_v4().to_string()
}

/// A display name that passes the 2..=20 character rule and is unique
/// within the test process.
///
/// ```
/// use backend_test_support::identities::display_name;
///
/// let a = display_name("ada");
/// let b = display_name("ada");
/// assert_ne!(a, b);
/// assert!(a.chars().count() <= 20);
/// ```
pub fn display_name(prefix: &str) -> String {
    let n = NAME_SEQ.fetch_add(1, Ordering::Relaxed);
    let prefix: String = prefix.chars().take(12).collect();
    format!("{prefix}-{n}")
}
