//! Indifference and variety.
//!
//! Two vertices are told apart at the first depth where their neighbourhoods, taken down to that
//! depth, stop being isomorphic. The *relative indifference* of a pair is that depth, or 0 when
//! no depth separates them. A vertex's *absolute indifference* is its worst case over all other
//! vertices, and the *variety* of a hypergraph is the sum of the reciprocals of the absolute
//! indifferences. A hypergraph in which some pair can never be separated is non-Leibnizian and
//! has variety 0.
use log::debug;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::hypergraph::{Hypergraph, Vertex};
use crate::isomorphism::{SearchConfig, find_isomorphism};
use crate::tree::NeighbourhoodTree;

/// Indifference queries over one hypergraph, sharing a single neighbourhood tree.
#[derive(Debug)]
pub struct Indifference {
    tree: NeighbourhoodTree,
    vertices: Vec<Vertex>,
    config: SearchConfig,
}

impl Indifference {
    pub fn new(hg: &Hypergraph) -> Self {
        Self::with_config(hg, SearchConfig::default())
    }

    pub fn with_config(hg: &Hypergraph, config: SearchConfig) -> Self {
        Self {
            tree: NeighbourhoodTree::whole(hg),
            vertices: hg.unique_vertices(),
            config,
        }
    }

    pub fn tree(&self) -> &NeighbourhoodTree {
        &self.tree
    }

    /// Sorted vertices of the hypergraph
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    fn subtree(&self, v: Vertex) -> Result<&NeighbourhoodTree> {
        self.tree
            .neighbourhood_of_vertex(v)
            .ok_or(Error::UnknownVertex(v))
    }

    /// Smallest depth at which `u` and `v` have non-isomorphic neighbourhoods, or 0.
    ///
    /// Always at most the smaller of the two subtree depths.
    pub fn relative(&self, u: Vertex, v: Vertex) -> Result<usize> {
        let tu = self.subtree(u)?;
        let tv = self.subtree(v)?;

        let d = tu.depth().min(tv.depth());
        for i in 1..=d {
            let hu = tu.neighbourhood_down_to_depth(i);
            let hv = tv.neighbourhood_down_to_depth(i);
            if find_isomorphism(&hu, &hv, &self.config)?.is_none() {
                return Ok(i);
            }
        }

        Ok(0)
    }

    /// Largest relative indifference of `u` against every other vertex; 0 as soon as any
    /// partner is indistinguishable from `u`.
    pub fn absolute(&self, u: Vertex) -> Result<usize> {
        self.subtree(u)?;

        let mut worst = 0;
        for &v in self.vertices.iter().filter(|&&v| v != u) {
            match self.relative(u, v)? {
                0 => return Ok(0),
                ri => worst = worst.max(ri),
            }
        }
        Ok(worst)
    }

    /// `(vertex, absolute indifference)` for every vertex in ascending order, computed in
    /// parallel.
    pub fn diagnostics(&self) -> Result<Vec<(Vertex, usize)>> {
        self.vertices
            .par_iter()
            .map(|&v| {
                let ai = self.absolute(v)?;
                debug!("vertex: {v}, ai: {ai}");
                Ok((v, ai))
            })
            .collect()
    }

    /// Sum of `1 / absolute(v)` over all vertices, or 0 if any vertex has indifference 0.
    ///
    /// Stops at the first vertex with indifference 0.
    pub fn variety(&self) -> Result<f64> {
        let mut total = 0.0;
        for &v in &self.vertices {
            let ai = self.absolute(v)?;
            debug!("vertex: {v}, ai: {ai}");
            if ai == 0 {
                return Ok(0.0);
            }
            total += 1.0 / ai as f64;
        }
        Ok(total)
    }
}

/// Variety of `hg` with an unbounded isomorphism search. The empty hypergraph has variety 0.
pub fn variety(hg: &Hypergraph) -> Result<f64> {
    Indifference::new(hg).variety()
}

/// Absolute indifference of every vertex of `hg`, vertex-ascending.
pub fn variety_diagnostics(hg: &Hypergraph) -> Result<Vec<(Vertex, usize)>> {
    Indifference::new(hg).diagnostics()
}

/// Collapse a diagnostics vector into the variety.
pub fn variety_from_diagnostics(diagnostics: &[(Vertex, usize)]) -> f64 {
    if diagnostics.iter().any(|&(_, ai)| ai == 0) {
        return 0.0;
    }
    diagnostics.iter().map(|&(_, ai)| 1.0 / ai as f64).sum()
}
