//! Host grammar checks: IPv4 literals and DNS names.

use once_cell::sync::Lazy;
use regex::Regex;

/// IPv4-based host pattern.
static HOST_IPV4_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})$").unwrap());

/// DNS-name host pattern: dot-separated labels of alphanumerics with inner hyphens.
static HOST_DNS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*$")
        .unwrap()
});

/// Returns true if `host` matches either the IPv4-literal grammar or the
/// DNS-name grammar.
pub(crate) fn is_valid_host(host: &str) -> bool {
    if let Some(captures) = HOST_IPV4_PATTERN.captures(host) {
        // each octet must fit in a byte
        return (1..=4).all(|i| captures[i].parse::<u16>().is_ok_and(|octet| octet <= 255));
    }

    HOST_DNS_PATTERN.is_match(host)
}
