//! Input validation shared with the statistics service.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::types::Timestamp;

static URI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/[\w\-/]+$").expect("valid uri regex"));

/// Check that a recorded URI looks like an absolute path.
pub fn is_valid_uri(uri: &str) -> bool {
    URI_RE.is_match(uri)
}

/// Check that an address is an IPv4 or IPv6 literal.
pub fn is_valid_ip(ip: &str) -> bool {
    ip.parse::<std::net::IpAddr>().is_ok()
}

/// Validate the URI filter of a stats query.
pub fn validate_uris(uris: &[String]) -> Result<(), CoreError> {
    for uri in uris {
        if !is_valid_uri(uri) {
            return Err(CoreError::Validation(format!("Invalid uri: {uri}")));
        }
    }
    Ok(())
}

/// Validate that a stats query range is well formed.
pub fn validate_range(start: Timestamp, end: Timestamp) -> Result<(), CoreError> {
    if end < start {
        return Err(CoreError::Validation(
            "Range end must not precede range start".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::time::parse_date_time;

    #[test]
    fn accepts_plain_paths() {
        assert!(is_valid_uri("/events"));
        assert!(is_valid_uri("/events/42"));
        assert!(is_valid_uri("/some-path/with_underscores"));
    }

    #[test]
    fn rejects_malformed_uris() {
        assert!(!is_valid_uri("events"));
        assert!(!is_valid_uri("/"));
        assert!(!is_valid_uri("/events?from=0"));
        assert!(!is_valid_uri(""));
    }

    #[test]
    fn recognizes_ip_literals() {
        assert!(is_valid_ip("192.168.0.1"));
        assert!(is_valid_ip("255.255.255.255"));
        assert!(is_valid_ip("::1"));
        assert!(is_valid_ip("2001:db8::7"));
        assert!(!is_valid_ip("256.0.0.1"));
        assert!(!is_valid_ip("192.168.0"));
        assert!(!is_valid_ip("localhost"));
    }

    #[test]
    fn uri_list_fails_on_first_bad_entry() {
        let uris = vec!["/events".to_string(), "bad".to_string()];
        assert_matches!(validate_uris(&uris), Err(CoreError::Validation(_)));
        assert!(validate_uris(&uris[..1]).is_ok());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let start = parse_date_time("2025-06-15 12:00:00").unwrap();
        let end = parse_date_time("2025-06-15 11:00:00").unwrap();
        assert_matches!(validate_range(start, end), Err(CoreError::Validation(_)));
        assert!(validate_range(end, start).is_ok());
        assert!(validate_range(start, start).is_ok());
    }
}
