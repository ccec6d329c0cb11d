//! WHOIS response parsing.
//!
//! Turns the free-form `Key: value` text of a port-43 response into a
//! `WhoisReport` with camel-cased keys.

use std::sync::LazyLock;

use regex::Regex;

use super::types::WhoisReport;

/// `Key: value` lines. Keys start with a letter and stay short, which keeps
/// prose and URLs from being mistaken for fields.
static FIELD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z][A-Za-z0-9 _./()-]{0,63}?)\s*:\s*(.*?)\s*$")
        .expect("field regex is valid")
});

/// Registries outside ARIN send some keys as one lowercase word.
const LOWERCASE_KEYS: &[(&str, &str)] = &[
    ("netname", "netName"),
    ("nethandle", "netHandle"),
    ("netrange", "netRange"),
    ("orgname", "orgName"),
    ("orgid", "orgId"),
    ("originas", "originAs"),
];

/// Parses a raw response into a report.
///
/// Comment lines (`%`, `#`) and lines without a value are ignored. When a key
/// repeats, the last value wins. Returns `None` if no field was found.
pub(crate) fn parse_response(raw: &str) -> Option<WhoisReport> {
    let mut report = WhoisReport::new();
    for (key, value) in fields(raw) {
        report.insert(key, value);
    }
    if report.is_empty() {
        None
    } else {
        Some(report)
    }
}

fn fields(raw: &str) -> impl Iterator<Item = (String, String)> + '_ {
    raw.lines()
        .filter(|line| {
            let trimmed = line.trim_start();
            !trimmed.is_empty() && !trimmed.starts_with('%') && !trimmed.starts_with('#')
        })
        .filter_map(|line| {
            let caps = FIELD_LINE.captures(line)?;
            let value = caps.get(2)?.as_str();
            if value.is_empty() {
                return None;
            }
            let key = camel_case(caps.get(1)?.as_str());
            if key.is_empty() {
                return None;
            }
            Some((key, value.to_string()))
        })
}

/// Converts a WHOIS field name into camelCase.
///
/// Words split on separators, on lower-to-upper transitions and at the end of an
/// acronym: `OrgName` → `orgName`, `OriginAS` → `originAs`, `CIDR` → `cidr`,
/// `Registrar WHOIS Server` → `registrarWhoisServer`. Known single-word registry
/// keys are mapped to the same names: `netname` → `netName`.
pub(crate) fn camel_case(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = key.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_ascii_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }

    let mut out = String::with_capacity(key.len());
    for (i, word) in words.iter().enumerate() {
        let lower = word.to_ascii_lowercase();
        if i == 0 {
            out.push_str(&lower);
        } else {
            let mut chars = lower.chars();
            if let Some(first) = chars.next() {
                out.push(first.to_ascii_uppercase());
                out.extend(chars);
            }
        }
    }

    match LOWERCASE_KEYS.iter().find(|(lower, _)| *lower == out) {
        Some((_, mapped)) => (*mapped).to_string(),
        None => out,
    }
}
