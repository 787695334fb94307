//! Branch partitioning: one root summary plus one payload per top-level branch.
//!
//! The root payload places every branch node at depth 1 on the master circle.
//! Each branch payload lays the same branch out again as its own tree, centred
//! on the origin, so a branch node has two different coordinates: one per view.

use std::collections::HashMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::entities::{
    branch_file_name, AtlasLayout, BranchBundle, BranchPayload, Edge, LayoutNode, RootPayload,
};
use crate::domain::layout::RadialLayout;
use crate::domain::sector::Sector;
use crate::domain::slug::{derive_id, slugify};
use crate::domain::{DomainError, TaxonomyNode};

/// Angular extent given to a branch inside its own payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchSweep {
    /// Whole circle, the branch is drawn as an independent tree
    #[default]
    Full,
    /// The branch keeps its proportional share of the master circle
    Share,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionOptions {
    /// Directory part of `childUrl`, relative to the site root
    pub child_url_prefix: String,
    pub branch_sweep: BranchSweep,
}

impl Default for PartitionOptions {
    fn default() -> Self {
        Self {
            child_url_prefix: "data".to_string(),
            branch_sweep: BranchSweep::Full,
        }
    }
}

impl PartitionOptions {
    pub fn child_url(&self, slug: &str) -> String {
        let prefix = self.child_url_prefix.trim_end_matches('/');
        if prefix.is_empty() {
            branch_file_name(slug)
        } else {
            format!("{}/{}", prefix, branch_file_name(slug))
        }
    }
}

/// Split the master taxonomy into the root payload and branch payloads.
///
/// # Errors
/// `DomainError::DuplicateBranch` if two branch names map to the same
/// payload key; their payloads would overwrite each other.
pub fn partition(
    master: &TaxonomyNode,
    engine: &RadialLayout,
    options: &PartitionOptions,
) -> Result<AtlasLayout, DomainError> {
    let slugs = branch_slugs(master)?;
    let root_id = derive_id(&[master.name.as_str()]);

    let weights: Vec<usize> = master.children.iter().map(TaxonomyNode::leaf_count).collect();
    let sectors = Sector::FULL.partition(&weights);
    let plan = engine.rings.plan(master.children.len(), 1);
    debug!(
        branches = master.children.len(),
        rings = plan.ring_count,
        "partition"
    );

    let mut children = Vec::with_capacity(master.children.len());
    let mut edges = Vec::with_capacity(master.children.len());
    for (index, ((branch, sector), slug)) in master
        .children
        .iter()
        .zip(&sectors)
        .zip(&slugs)
        .enumerate()
    {
        let id = derive_id(&[master.name.as_str(), branch.name.as_str()]);
        let (x, y) = RadialLayout::position(plan.radius(0.0, index), *sector);
        edges.push(Edge::new(root_id.as_str(), id.as_str()));
        children.push(LayoutNode {
            id,
            name: engine.label(&branch.name),
            x,
            y,
            depth: 1,
            has_children: !branch.is_leaf(),
            child_url: Some(options.child_url(slug)),
        });
    }

    // Branches do not interact; indexed collect keeps source order.
    let branches: Vec<BranchBundle> = master
        .children
        .par_iter()
        .zip(sectors.par_iter())
        .zip(slugs.par_iter())
        .map(|((branch, sector), slug)| {
            let sweep = match options.branch_sweep {
                BranchSweep::Full => Sector::FULL,
                BranchSweep::Share => *sector,
            };
            let buffer = engine.layout(branch, &[master.name.as_str()], 0, 0.0, sweep);
            BranchBundle {
                slug: slug.clone(),
                payload: BranchPayload {
                    root_id: derive_id(&[master.name.as_str(), branch.name.as_str()]),
                    nodes: buffer.nodes,
                    edges: buffer.edges,
                },
            }
        })
        .collect();

    let root = LayoutNode {
        id: root_id,
        name: engine.label(&master.name),
        x: 0.0,
        y: 0.0,
        depth: 0,
        has_children: !master.is_leaf(),
        child_url: None,
    };

    Ok(AtlasLayout {
        root: RootPayload {
            root,
            children,
            edges,
        },
        branches,
    })
}

/// Payload keys for the branches, in source order.
fn branch_slugs(master: &TaxonomyNode) -> Result<Vec<String>, DomainError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    master
        .children
        .iter()
        .map(|branch| {
            let slug = slugify(&branch.name);
            if let Some(first) = seen.insert(slug.clone(), &branch.name) {
                return Err(DomainError::DuplicateBranch {
                    slug,
                    first: first.to_string(),
                    second: branch.name.clone(),
                });
            }
            Ok(slug)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::f64::consts::TAU;

    const EPS: f64 = 1e-3;

    fn sample() -> TaxonomyNode {
        TaxonomyNode::new("Root").with_children([
            TaxonomyNode::new("A").with_children([TaxonomyNode::new("A1"), TaxonomyNode::new("A2")]),
            TaxonomyNode::new("B"),
        ])
    }

    fn run(master: &TaxonomyNode) -> AtlasLayout {
        partition(master, &RadialLayout::default(), &PartitionOptions::default()).unwrap()
    }

    #[test]
    fn given_sample_when_partitioning_then_root_payload_lists_branches() {
        let layout = run(&sample());

        assert_eq!(layout.root.root.id, "root");
        let ids: Vec<&str> = layout.root.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["root-a", "root-b"]);
        assert_eq!(
            layout.root.edges,
            vec![Edge::new("root", "root-a"), Edge::new("root", "root-b")]
        );
        assert_eq!(
            layout.root.children[0].child_url.as_deref(),
            Some("data/branch-a.json")
        );
        assert!(layout.root.children[0].has_children);
        assert!(!layout.root.children[1].has_children);
    }

    #[test]
    fn given_sample_when_partitioning_then_heavier_branch_gets_two_thirds() {
        let layout = run(&sample());
        let a = &layout.root.children[0];
        let b = &layout.root.children[1];
        // A spans 0..4π/3, B spans 4π/3..2π
        assert!((a.y.atan2(a.x).rem_euclid(TAU) - TAU / 3.0).abs() < EPS);
        assert!((b.y.atan2(b.x).rem_euclid(TAU) - TAU * 5.0 / 6.0).abs() < EPS);
        assert!((a.x.hypot(a.y) - 100.0).abs() < EPS);
    }

    #[test]
    fn given_sample_when_partitioning_then_branch_payload_is_recentred() {
        let layout = run(&sample());
        let branch = &layout.branches[0];

        assert_eq!(branch.slug, "a");
        assert_eq!(branch.payload.root_id, "root-a");
        assert_eq!(branch.payload.nodes.len(), 3);
        let head = &branch.payload.nodes[0];
        assert_eq!((head.id.as_str(), head.depth, head.x, head.y), ("root-a", 0, 0.0, 0.0));
        assert!(branch.payload.nodes[1..].iter().all(|n| n.depth == 1));
        assert_eq!(branch.payload.edges.len(), 2);
    }

    #[test]
    fn given_branch_node_when_comparing_views_then_coordinates_differ() {
        let layout = run(&sample());
        let in_root = &layout.root.children[0];
        let in_branch = &layout.branches[0].payload.nodes[0];

        assert_eq!(in_root.id, in_branch.id);
        assert_eq!((in_root.depth, in_branch.depth), (1, 0));
        assert!(in_root.x != in_branch.x || in_root.y != in_branch.y);
        assert!(in_root.child_url.is_some());
        assert!(in_branch.child_url.is_none());
    }

    #[test]
    fn given_taxonomy_when_partitioning_then_every_node_covered_once() {
        let master = TaxonomyNode::new("Root").with_children([
            TaxonomyNode::new("A").with_children([
                TaxonomyNode::new("A1").with_children([TaxonomyNode::new("x"), TaxonomyNode::new("y")]),
                TaxonomyNode::new("A2"),
            ]),
            TaxonomyNode::new("B"),
            TaxonomyNode::new("C").with_children((0..8).map(|i| TaxonomyNode::new(format!("c{i}")))),
        ]);
        let layout = run(&master);

        let mut seen = HashSet::new();
        assert!(seen.insert(layout.root.root.id.clone()));
        for bundle in &layout.branches {
            for node in &bundle.payload.nodes {
                assert!(seen.insert(node.id.clone()), "duplicate {}", node.id);
            }
        }
        assert_eq!(seen.len(), master.node_count());
        assert_eq!(layout.distinct_node_count(), master.node_count());
        let root_children: HashSet<_> = layout.root.children.iter().map(|c| c.id.clone()).collect();
        assert!(root_children.is_subset(&seen));
    }

    #[test]
    fn given_share_sweep_when_partitioning_then_branch_children_stay_in_share() {
        let options = PartitionOptions {
            branch_sweep: BranchSweep::Share,
            ..PartitionOptions::default()
        };
        let layout = partition(&sample(), &RadialLayout::default(), &options).unwrap();
        for node in &layout.branches[0].payload.nodes[1..] {
            let angle = node.y.atan2(node.x).rem_euclid(TAU);
            assert!(angle <= TAU * 2.0 / 3.0 + EPS);
        }
    }

    #[test]
    fn given_colliding_branch_names_when_partitioning_then_fails() {
        let master = TaxonomyNode::new("Root")
            .with_children([TaxonomyNode::new("Cloud Security"), TaxonomyNode::new("cloud-security")]);
        let err = partition(&master, &RadialLayout::default(), &PartitionOptions::default()).unwrap_err();
        assert!(matches!(err, DomainError::DuplicateBranch { ref slug, .. } if slug == "cloud-security"));
    }

    #[test]
    fn given_leaf_master_when_partitioning_then_root_only() {
        let layout = run(&TaxonomyNode::new("Lonely"));
        assert!(!layout.root.root.has_children);
        assert!(layout.root.children.is_empty());
        assert!(layout.branches.is_empty());
    }

    #[test]
    fn given_prefix_with_trailing_slash_when_building_url_then_single_separator() {
        let options = PartitionOptions {
            child_url_prefix: "static/data/".into(),
            ..PartitionOptions::default()
        };
        assert_eq!(options.child_url("a"), "static/data/branch-a.json");
        let bare = PartitionOptions {
            child_url_prefix: String::new(),
            ..PartitionOptions::default()
        };
        assert_eq!(bare.child_url("a"), "branch-a.json");
    }

    #[test]
    fn given_same_input_when_partitioning_twice_then_identical() {
        assert_eq!(run(&sample()), run(&sample()));
    }
}
