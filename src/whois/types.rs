//! WHOIS data structures.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields tried, in order, for the canonical label of a report.
pub const IDENTITY_FIELDS: &[&str] = &["organization", "orgName", "netHandle", "netName"];

/// Fields tried, in order, for the origin autonomous system.
pub const ASN_FIELDS: &[&str] = &["origin", "originAs", "asn"];

/// Schema-less WHOIS report as returned by a lookup.
///
/// Any key may be missing. The accessors below are the only places that interpret
/// specific keys; everything else is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WhoisReport(Map<String, Value>);

impl WhoisReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Raw access to a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// All fields, verbatim.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Reads a field as text.
    ///
    /// Non-blank strings are returned as-is and numbers are rendered; blank strings,
    /// `null`, booleans, arrays and objects do not resolve.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// First field in `keys` that resolves to text.
    pub fn first_text(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.text(key))
    }

    /// Reads a field as a label whenever it is present.
    ///
    /// Unlike [`text`](Self::text), blank strings are kept as-is and other values
    /// are rendered as JSON text (`null`, `true`, `[..]`).
    pub fn label_text(&self, key: &str) -> Option<String> {
        self.0.get(key).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Canonical identity: `organization`, else `orgName`, else `netHandle`, else `netName`.
    ///
    /// The first key that is present wins, even when its value is blank.
    pub fn identity_label(&self) -> Option<String> {
        IDENTITY_FIELDS.iter().find_map(|key| self.label_text(key))
    }

    /// Origin AS: `origin`, else `originAs`, else `asn`.
    pub fn asn(&self) -> Option<String> {
        self.first_text(ASN_FIELDS)
    }

    /// The `organization` field alone, independent of the identity chain.
    pub fn organization(&self) -> Option<String> {
        self.text("organization")
    }

    /// The raw `cidr` specification, exactly as reported.
    pub fn cidr(&self) -> Option<&str> {
        match self.0.get("cidr")? {
            Value::String(s) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for WhoisReport {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for WhoisReport {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
