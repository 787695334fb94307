//! Radial tree layout.
//!
//! Each node owns an angular sector handed down by its parent. The node sits
//! in the middle of its sector; its children split the sector proportionally
//! to their leaf counts and are pushed outwards by the ring allocator.
//!
//! Properties:
//! - Deterministic (source order decides sector order)
//! - Child sectors tile the parent sector without gaps or overlap
//! - Radius never influences angles

use tracing::trace;

use crate::domain::entities::{round3, Edge, LayoutNode};
use crate::domain::label::format_label;
use crate::domain::rings::RingAllocator;
use crate::domain::sector::Sector;
use crate::domain::slug::derive_id;
use crate::domain::TaxonomyNode;

/// Nodes and edges collected in pre-order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LayoutBuffer {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<Edge>,
}

/// Stateless radial layout engine; one instance serves a whole run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RadialLayout {
    pub rings: RingAllocator,
    pub multiline_labels: bool,
}

impl RadialLayout {
    pub fn new(rings: RingAllocator, multiline_labels: bool) -> Self {
        Self {
            rings,
            multiline_labels,
        }
    }

    pub fn label(&self, name: &str) -> String {
        if self.multiline_labels {
            format_label(name)
        } else {
            name.to_string()
        }
    }

    /// Position a node on the circle of `radius` at the middle of `sector`.
    pub fn position(radius: f64, sector: Sector) -> (f64, f64) {
        let angle = sector.mid();
        (round3(radius * angle.cos()), round3(radius * angle.sin()))
    }

    /// Lay out a whole subtree starting at `node`.
    ///
    /// `prefix` holds ancestor names above `node`; they only feed id
    /// derivation. `node` becomes the payload root and gets no incoming edge.
    pub fn layout(
        &self,
        node: &TaxonomyNode,
        prefix: &[&str],
        depth: u32,
        radius: f64,
        sector: Sector,
    ) -> LayoutBuffer {
        let mut buffer = LayoutBuffer::default();
        let mut path: Vec<&str> = prefix.to_vec();
        self.place(node, &mut path, None, depth, radius, sector, &mut buffer);
        buffer
    }

    /// Recursive step; `path` is restored before returning.
    #[allow(clippy::too_many_arguments)]
    fn place<'t>(
        &self,
        node: &'t TaxonomyNode,
        path: &mut Vec<&'t str>,
        parent_id: Option<&str>,
        depth: u32,
        radius: f64,
        sector: Sector,
        out: &mut LayoutBuffer,
    ) {
        path.push(&node.name);
        let id = derive_id(path.as_slice());

        let (x, y) = Self::position(radius, sector);
        trace!(%id, depth, radius, start = sector.start, end = sector.end, "place");
        out.nodes.push(LayoutNode {
            id: id.clone(),
            name: self.label(&node.name),
            x,
            y,
            depth,
            has_children: !node.is_leaf(),
            child_url: None,
        });
        if let Some(parent_id) = parent_id {
            out.edges.push(Edge::new(parent_id, id.as_str()));
        }

        if !node.is_leaf() {
            let weights: Vec<usize> = node.children.iter().map(TaxonomyNode::leaf_count).collect();
            let plan = self.rings.plan(node.children.len(), depth + 1);
            for (index, (child, child_sector)) in node
                .children
                .iter()
                .zip(sector.partition(&weights))
                .enumerate()
            {
                let child_radius = plan.radius(radius, index);
                self.place(
                    child,
                    path,
                    Some(id.as_str()),
                    depth + 1,
                    child_radius,
                    child_sector,
                    out,
                );
            }
        }

        path.pop();
    }
}
