//! Stable node identity.

/// Builds the stable id of a node from its type tag and label.
///
/// Pure and deterministic: the same inputs give the same id in every process, which
/// is what lets the host graph deduplicate nodes emitted by separate invocations.
pub fn make_id(node_type: &str, label: &str) -> String {
    format!("{}:{}", node_type, label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_id_is_deterministic() {
        assert_eq!(
            make_id("whois:report", "Google LLC"),
            make_id("whois:report", "Google LLC")
        );
        assert_eq!(make_id("asn", "AS15169"), "asn:AS15169");
    }

    #[test]
    fn test_make_id_separates_types() {
        assert_ne!(make_id("asn", "AS1"), make_id("whois:report", "AS1"));
    }
}
