//! IP address and CIDR helpers.
//!
//! Address-family detection and CIDR containment used by the range cache and the
//! batch runner.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use ipnetwork::IpNetwork;

/// Returns true if `label` is a dotted-quad IPv4 address.
pub fn is_ipv4(label: &str) -> bool {
    label.parse::<Ipv4Addr>().is_ok()
}

/// Node type of a raw input label: `ipv4`, `ipv6` or `domain`.
pub fn label_type(label: &str) -> &'static str {
    if is_ipv4(label) {
        "ipv4"
    } else if label.parse::<Ipv6Addr>().is_ok() {
        "ipv6"
    } else {
        "domain"
    }
}

/// Returns true if `address` falls inside `block`.
///
/// `block` is a CIDR block (`8.8.8.0/24`) or a bare address, which is treated as a
/// single-host network. Unparseable input and mismatched address families are
/// non-matches, never errors.
pub fn cidr_contains(address: &str, block: &str) -> bool {
    let Ok(ip) = address.trim().parse::<IpAddr>() else {
        return false;
    };
    match block.trim().parse::<IpNetwork>() {
        Ok(network) => network.contains(ip),
        Err(_) => false,
    }
}

/// Splits a CIDR specification (as returned in a report's `cidr` field) into blocks.
///
/// Blocks are separated by commas and/or whitespace; empty fragments are dropped.
pub fn split_cidr_spec(spec: &str) -> impl Iterator<Item = &str> {
    spec.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|block| !block.is_empty())
}
