//! Neighbourhood trees: every path outward from a starting hyperedge by successive
//! intersection, without revisiting a hyperedge on the same path.
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::hypergraph::{Hyperedge, Hypergraph, Vertex};

#[derive(Clone, Debug)]
pub struct NeighbourhoodTree {
    node: Arc<Hyperedge>,
    children: Vec<NeighbourhoodTree>,
    depth: usize,
    // neighbourhood_at_depth(d) for d in 0..=depth, filled on first use
    layers: OnceLock<Vec<Hypergraph>>,
}

impl NeighbourhoodTree {
    /// Tree of every vertex of `hg`: a synthetic empty root whose children are the trees rooted
    /// at each singleton `{v}`, in ascending vertex order.
    pub fn whole(hg: &Hypergraph) -> Self {
        let pool = share(hg);
        let children: Vec<_> = hg
            .unique_vertices()
            .into_iter()
            .map(|v| Self::grow(&pool, Arc::new(Hyperedge::singleton(v))))
            .collect();
        Self::with_children(Arc::new(Hyperedge::default()), children)
    }

    /// Tree rooted at `root`, growing into the hyperedges of `hg`.
    pub fn new(hg: &Hypergraph, root: Hyperedge) -> Self {
        Self::grow(&share(hg), Arc::new(root))
    }

    // Children are the pool's hyperedges that meet `node`, once every copy of `node` itself has
    // been dropped from the pool. All children grow into that same reduced pool. Over a whole
    // hypergraph this is `remove_all` followed by `neighbourhood_of_hyperedge`.
    fn grow(pool: &[Arc<Hyperedge>], node: Arc<Hyperedge>) -> Self {
        if pool.is_empty() {
            return Self::with_children(node, Vec::new());
        }

        let remaining: Vec<Arc<Hyperedge>> =
            pool.iter().filter(|he| ***he != *node).cloned().collect();

        let children = remaining
            .iter()
            .filter(|he| he.intersects(&node))
            .map(|he| Self::grow(&remaining, Arc::clone(he)))
            .collect();

        Self::with_children(node, children)
    }

    fn with_children(node: Arc<Hyperedge>, children: Vec<NeighbourhoodTree>) -> Self {
        let depth = children.iter().map(|c| c.depth + 1).max().unwrap_or(0);
        Self {
            node,
            children,
            depth,
            layers: OnceLock::new(),
        }
    }

    pub fn node(&self) -> &Hyperedge {
        &self.node
    }

    pub fn children(&self) -> &[NeighbourhoodTree] {
        &self.children
    }

    /// Longest path from this node to a leaf; 0 for a leaf.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The subtree rooted at `{v}`, if `v` is a vertex of the hypergraph this whole tree was
    /// built from.
    pub fn neighbourhood_of_vertex(&self, v: Vertex) -> Option<&NeighbourhoodTree> {
        let singleton = Hyperedge::singleton(v);
        self.children.iter().find(|child| *child.node == singleton)
    }

    /// Hyperedges found exactly `d` steps below this node.
    ///
    /// `d` is clamped to the depth of each subtree on the way down, so a branch that ends early
    /// contributes its last hyperedge.
    pub fn neighbourhood_at_depth(&self, d: usize) -> Hypergraph {
        self.layers()[d.min(self.depth)].clone()
    }

    /// Union of [`Self::neighbourhood_at_depth`] for depths `1..=d`.
    pub fn neighbourhood_down_to_depth(&self, d: usize) -> Hypergraph {
        let layers = self.layers();
        let mut hg = Hypergraph::default();
        for layer in &layers[1..=d.min(self.depth)] {
            hg.union_with(layer);
        }
        hg
    }

    fn layers(&self) -> &[Hypergraph] {
        self.layers
            .get_or_init(|| (0..=self.depth).map(|d| self.collect_at(d)).collect())
    }

    fn collect_at(&self, d: usize) -> Hypergraph {
        let mut hg = Hypergraph::default();
        self.collect_into(d, &mut hg);
        hg
    }

    fn collect_into(&self, d: usize, out: &mut Hypergraph) {
        let d = d.min(self.depth);
        if d == 0 {
            out.append(Hyperedge::clone(&self.node));
            return;
        }
        for child in &self.children {
            child.collect_into(d - 1, out);
        }
    }

    /// Render as nested Mathematica `Tree[node, {children}]` expressions.
    pub fn mathematica(&self) -> String {
        let mut out = String::new();
        self.write_mathematica(&mut out);
        out
    }

    fn write_mathematica(&self, out: &mut String) {
        out.push_str("Tree[");
        out.push_str(&self.node.to_string());
        out.push_str(", {");
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            child.write_mathematica(out);
        }
        out.push_str("}]");
    }
}

/// Indented outline, one node per line.
impl fmt::Display for NeighbourhoodTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

impl NeighbourhoodTree {
    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result {
        writeln!(f, "{}{}", "  ".repeat(level), self.node)?;
        for child in &self.children {
            child.fmt_indented(f, level + 1)?;
        }
        Ok(())
    }
}

fn share(hg: &Hypergraph) -> Vec<Arc<Hyperedge>> {
    hg.iter().cloned().map(Arc::new).collect()
}
