//! Graph node data structures.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{AsRefStr, Display, EnumString};

use super::ids::make_id;

/// Node type tags emitted by the whois enrichment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString)]
pub enum NodeKind {
    /// Whois registration report
    #[strum(serialize = "whois:report")]
    WhoisReport,
    /// Autonomous system number
    #[strum(serialize = "asn")]
    Asn,
}

/// Node under investigation, owned by the host graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceNode {
    /// Stable id in the host graph; empty for root nodes
    #[serde(default)]
    pub id: String,
    /// Address or domain being investigated
    #[serde(default)]
    pub label: String,
}

impl SourceNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Node emitted for the host graph to merge.
///
/// `edges` lists the ids of nodes this node is connected *from*, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub label: String,
    pub props: Map<String, Value>,
    pub edges: Vec<String>,
}

impl GraphNode {
    /// Creates a node whose id is derived from `kind` and `label`.
    pub fn new(
        kind: NodeKind,
        label: impl Into<String>,
        props: Map<String, Value>,
        edges: Vec<String>,
    ) -> Self {
        let label = label.into();
        Self {
            id: make_id(kind.as_ref(), &label),
            node_type: kind.to_string(),
            label,
            props,
            edges,
        }
    }

    /// Returns the node kind if the type tag is one this crate emits.
    pub fn kind(&self) -> Option<NodeKind> {
        self.node_type.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_kind_tags() {
        assert_eq!(NodeKind::WhoisReport.to_string(), "whois:report");
        assert_eq!(NodeKind::Asn.as_ref(), "asn");
        assert_eq!("asn".parse::<NodeKind>().ok(), Some(NodeKind::Asn));
        assert!("domain".parse::<NodeKind>().is_err());
    }

    #[test]
    fn test_graph_node_new_derives_id() {
        let node = GraphNode::new(NodeKind::Asn, "AS15169", Map::new(), vec!["n1".into()]);
        assert_eq!(node.id, make_id("asn", "AS15169"));
        assert_eq!(node.node_type, "asn");
        assert_eq!(node.kind(), Some(NodeKind::Asn));
    }

    #[test]
    fn test_graph_node_serializes_type_field() {
        let mut props = Map::new();
        props.insert("asn".into(), json!("AS1"));
        let node = GraphNode::new(NodeKind::Asn, "AS1", props, vec!["a".into(), "b".into()]);
        let value = serde_json::to_value(&node).expect("serialize");
        assert_eq!(
            value,
            json!({
                "id": "asn:AS1",
                "type": "asn",
                "label": "AS1",
                "props": {"asn": "AS1"},
                "edges": ["a", "b"]
            })
        );
    }

    #[test]
    fn test_source_node_deserializes_with_missing_id() {
        let node: SourceNode = serde_json::from_str(r#"{"label":"8.8.8.8"}"#).expect("parse");
        assert_eq!(node, SourceNode::new("", "8.8.8.8"));
    }
}
