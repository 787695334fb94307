//! Domain entities: positioned nodes, edges and the payloads built from them

use serde::{Deserialize, Serialize};

/// A node with precomputed coordinates, ready for a client to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    /// Derived from the full name path, unique within a payload
    pub id: String,
    /// Display label
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub depth: u32,
    pub has_children: bool,
    /// Relative location of the branch payload (root payload children only)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub child_url: Option<String>,
}

/// Directed parent -> child link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Summary view: the taxonomy root and its top-level branches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootPayload {
    pub root: LayoutNode,
    pub children: Vec<LayoutNode>,
    pub edges: Vec<Edge>,
}

/// One branch laid out as its own tree, branch node at the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchPayload {
    pub root_id: String,
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<Edge>,
}

/// A branch payload together with the key it is persisted under.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchBundle {
    pub slug: String,
    pub payload: BranchPayload,
}

/// Complete result of one layout run.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasLayout {
    pub root: RootPayload,
    pub branches: Vec<BranchBundle>,
}

impl AtlasLayout {
    /// Nodes across the root view and all branch payloads, without the
    /// duplicated branch nodes of the root view.
    pub fn distinct_node_count(&self) -> usize {
        1 + self
            .branches
            .iter()
            .map(|b| b.payload.nodes.len())
            .sum::<usize>()
    }
}

/// Round a coordinate to three decimal digits.
///
/// Rounds the exact binary value, so `0.0045` (stored slightly below the
/// tie) becomes `0.004`.
pub fn round3(value: f64) -> f64 {
    format!("{value:.3}").parse().unwrap_or(value)
}

/// Persisted key of a branch payload.
pub fn branch_file_name(slug: &str) -> String {
    format!("branch-{slug}.json")
}

pub const ROOT_FILE_NAME: &str = "root.json";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_node_without_child_url_when_serializing_then_field_omitted() {
        let node = LayoutNode {
            id: "root-a".into(),
            name: "A".into(),
            x: 1.5,
            y: -2.25,
            depth: 1,
            has_children: true,
            child_url: None,
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["hasChildren"], serde_json::json!(true));
        assert!(json.get("childUrl").is_none());
        assert!(json.get("has_children").is_none());
    }

    #[test]
    fn given_branch_payload_when_serializing_then_uses_root_id_key() {
        let payload = BranchPayload {
            root_id: "root-a".into(),
            nodes: vec![],
            edges: vec![Edge::new("root-a", "root-a-a1")],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["rootId"], "root-a");
        assert_eq!(json["edges"][0]["target"], "root-a-a1");
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(1.23456), 1.235);
        assert_eq!(round3(-0.0004), -0.0);
        assert_eq!(round3(100.0), 100.0);
    }

    #[test]
    fn given_decimal_near_tie_when_rounding_then_uses_exact_binary_value() {
        assert_eq!(round3(0.0045), 0.004);
        assert_eq!(round3(1.0005), 1.0);
        assert_eq!(round3(2.0015), 2.002);
        assert!(round3(-0.0001).is_sign_negative());
    }

    #[test]
    fn test_branch_file_name() {
        assert_eq!(branch_file_name("network-security"), "branch-network-security.json");
    }
}
