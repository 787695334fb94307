//! Input taxonomy: an ordered tree of named categories.

use serde_json::{Map, Value};

use crate::domain::DomainError;

/// One category of the taxonomy. Children keep their source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyNode {
    pub name: String,
    pub children: Vec<TaxonomyNode>,
}

impl TaxonomyNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = TaxonomyNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of leaf descendants; a leaf counts itself.
    ///
    /// Used as the visual weight when sharing angular space among siblings.
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            return 1;
        }
        self.children.iter().map(TaxonomyNode::leaf_count).sum()
    }

    /// Total number of nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(TaxonomyNode::node_count)
            .sum::<usize>()
    }

    /// Depth of the deepest descendant relative to this node (leaf = 0).
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.height() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Parse a taxonomy document.
    ///
    /// Every node must carry a string `name`. A missing or `null` `children`
    /// field means the node is a leaf.
    ///
    /// # Errors
    /// `DomainError::MalformedInput` for invalid JSON or a structurally
    /// invalid node; `location` points at the offending node (`$.children[1]`).
    pub fn from_json(input: &str) -> Result<Self, DomainError> {
        let value: Value = serde_json::from_str(input).map_err(|e| {
            DomainError::malformed(format!("line {}:{}", e.line(), e.column()), e.to_string())
        })?;
        Self::from_value(&value, "$")
    }

    fn from_value(value: &Value, location: &str) -> Result<Self, DomainError> {
        let object = value
            .as_object()
            .ok_or_else(|| DomainError::malformed(location, "expected an object"))?;

        let name = match object.get("name") {
            Some(Value::String(name)) => name.clone(),
            Some(_) => return Err(DomainError::malformed(location, "'name' must be a string")),
            None => {
                return Err(DomainError::malformed(
                    location,
                    "missing required field 'name'",
                ))
            }
        };

        let children = Self::children_from(object, location)?;
        Ok(Self { name, children })
    }

    fn children_from(object: &Map<String, Value>, location: &str) -> Result<Vec<Self>, DomainError> {
        match object.get("children") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| Self::from_value(item, &format!("{location}.children[{i}]")))
                .collect(),
            Some(_) => Err(DomainError::malformed(
                location,
                "'children' must be an array",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TaxonomyNode {
        TaxonomyNode::new("Root").with_children([
            TaxonomyNode::new("A").with_children([TaxonomyNode::new("A1"), TaxonomyNode::new("A2")]),
            TaxonomyNode::new("B"),
        ])
    }

    #[test]
    fn given_leaf_when_counting_then_weight_is_one() {
        assert_eq!(TaxonomyNode::new("solo").leaf_count(), 1);
    }

    #[test]
    fn given_nested_tree_when_counting_then_sums_leaves() {
        let root = sample();
        assert_eq!(root.leaf_count(), 3);
        assert_eq!(root.children[0].leaf_count(), 2);
        assert_eq!(root.children[1].leaf_count(), 1);
    }

    #[test]
    fn given_nested_tree_when_measuring_then_counts_nodes_and_height() {
        let root = sample();
        assert_eq!(root.node_count(), 5);
        assert_eq!(root.height(), 2);
    }

    #[test]
    fn given_valid_document_when_parsing_then_preserves_order() {
        let json = r#"{"name":"Root","children":[
            {"name":"A","children":[{"name":"A1"},{"name":"A2"}]},
            {"name":"B"}]}"#;
        assert_eq!(TaxonomyNode::from_json(json).unwrap(), sample());
    }

    #[test]
    fn given_null_or_empty_children_when_parsing_then_node_is_leaf() {
        let json = r#"{"name":"Root","children":[{"name":"A","children":null},{"name":"B","children":[]}]}"#;
        let root = TaxonomyNode::from_json(json).unwrap();
        assert!(root.children.iter().all(TaxonomyNode::is_leaf));
    }

    #[test]
    fn given_missing_name_when_parsing_then_reports_location() {
        let json = r#"{"name":"Root","children":[{"name":"A"},{"children":[]}]}"#;
        let err = TaxonomyNode::from_json(json).unwrap_err();
        match err {
            DomainError::MalformedInput { location, reason } => {
                assert_eq!(location, "$.children[1]");
                assert!(reason.contains("name"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn given_non_string_name_when_parsing_then_fails() {
        let err = TaxonomyNode::from_json(r#"{"name": 42}"#).unwrap_err();
        assert!(matches!(err, DomainError::MalformedInput { .. }));
    }

    #[test]
    fn given_invalid_json_when_parsing_then_fails_with_line_location() {
        let err = TaxonomyNode::from_json("{\"name\": \"Root\",").unwrap_err();
        match err {
            DomainError::MalformedInput { location, .. } => assert!(location.starts_with("line ")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
