use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Regex patterns used when scrubbing text that may reach the logs.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// Quoted SQL literal, e.g. a display name echoed back inside a driver error
    pub fn sql_literal() -> &'static Regex {
        static SQL_LITERAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"'(?:[^']|'')*'").unwrap()
        });
        &SQL_LITERAL_REGEX
    }

    /// Opaque secret: a run of 24 or more token characters with no separators
    pub fn opaque_token() -> &'static Regex {
        static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9_+/]{24,}={0,2}").unwrap()
        });
        &TOKEN_REGEX
    }
}

/// Masks values that must not be logged verbatim.
///
/// Quoted SQL literals become `'***'` and opaque token runs become
/// `[REDACTED_TOKEN]`. Hyphenated ids such as room UUIDs are kept so log
/// lines stay correlatable.
pub fn redact(input: &str) -> String {
    let literals = PiiRegexRegistry::sql_literal().replace_all(input, "'***'");
    PiiRegexRegistry::opaque_token()
        .replace_all(&literals, "[REDACTED_TOKEN]")
        .to_string()
}

/// Display wrapper that applies [`redact`] when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}
