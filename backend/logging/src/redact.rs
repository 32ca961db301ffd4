//! Log Redaction Layer
//!
//! Scrubs e-mail addresses, phone numbers and bearer tokens from free text
//! (questions typed by users) before it reaches the logs.

use regex::Regex;
use std::sync::LazyLock;

static TELEPHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{2,3}\)?[-.\s]?\d{3}[-.\s]?\d{3,4}").unwrap()
});
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bearer\s+[a-zA-Z0-9\-\._~+/]+=*").unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = EMAIL_RE.replace_all(input, "[REDACTED_EMAIL]");
    let redacted = TOKEN_RE.replace_all(&redacted, "[REDACTED_TOKEN]");
    TELEPHONE_RE
        .replace_all(&redacted, "[REDACTED_PHONE]")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redaction() {
        let raw = "Ajoute une personne Ali, ali@example.org, +216 71 234 567";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("ali@example.org"));
        assert!(!clean.contains("234 567"));
        assert!(clean.starts_with("Ajoute une personne Ali"));
    }

    #[test]
    fn ages_survive() {
        let raw = "Ajoute une personne Sara qui a 25 ans";
        assert_eq!(redact_sensitive_data(raw), raw);
    }
}
