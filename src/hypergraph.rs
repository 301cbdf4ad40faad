//! Hyperedges, hypergraphs and the frequency structure used to prune isomorphism search.
use std::collections::{BTreeMap, HashMap};

use open_hypergraphs::lax;

use crate::error::Result;
use crate::rule::Rule;

pub type Vertex = usize;

/// An ordered list of vertices.
///
/// Equality is by sequence: `{1,2}` and `{2,1}` are different hyperedges.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Hyperedge(Vec<Vertex>);

impl Hyperedge {
    pub fn new(vertices: impl IntoIterator<Item = Vertex>) -> Self {
        Self(vertices.into_iter().collect())
    }

    pub fn singleton(v: Vertex) -> Self {
        Self(vec![v])
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.0.iter().copied()
    }

    pub fn append(&mut self, v: Vertex) {
        self.0.push(v);
    }

    pub fn append_all(&mut self, other: &Hyperedge) {
        self.0.extend_from_slice(&other.0);
    }

    pub fn contains(&self, v: Vertex) -> bool {
        self.0.contains(&v)
    }

    /// Number of occurrences of `v`
    pub fn frequency_of(&self, v: Vertex) -> usize {
        self.0.iter().filter(|&&u| u == v).count()
    }

    /// Sorted, duplicate-free copy.
    pub fn unique_vertices(&self) -> Hyperedge {
        let mut vertices = self.0.clone();
        vertices.sort_unstable();
        vertices.dedup();
        Hyperedge(vertices)
    }

    pub fn intersects(&self, other: &Hyperedge) -> bool {
        self.0.iter().any(|&v| other.contains(v))
    }

    /// Relabel every vertex through `rule`, preserving order.
    pub fn apply_rule(&self, rule: &Rule) -> Result<Hyperedge> {
        self.iter().map(|v| rule.apply(v)).collect()
    }
}

impl FromIterator<Vertex> for Hyperedge {
    fn from_iter<I: IntoIterator<Item = Vertex>>(iter: I) -> Self {
        Hyperedge(iter.into_iter().collect())
    }
}

impl From<Vec<Vertex>> for Hyperedge {
    fn from(vertices: Vec<Vertex>) -> Self {
        Hyperedge(vertices)
    }
}

/// A list of hyperedges. Order matters only to the removal operations; isomorphism treats the
/// hypergraph as a multiset.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Hypergraph(Vec<Hyperedge>);

impl Hypergraph {
    pub fn new(hyperedges: impl IntoIterator<Item = Hyperedge>) -> Self {
        Self(hyperedges.into_iter().collect())
    }

    /// Build from nested vertex lists, one list per hyperedge.
    pub fn from_lists<L, I>(lists: L) -> Self
    where
        L: IntoIterator<Item = I>,
        I: IntoIterator<Item = Vertex>,
    {
        Self(lists.into_iter().map(Hyperedge::new).collect())
    }

    pub fn hyperedges(&self) -> &[Hyperedge] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hyperedge> {
        self.0.iter()
    }

    pub fn append(&mut self, he: Hyperedge) {
        self.0.push(he);
    }

    /// Concatenate `other` onto `self`, keeping multiplicities.
    pub fn union_with(&mut self, other: &Hypergraph) {
        self.0.extend_from_slice(&other.0);
    }

    /// Sorted, duplicate-free vertex set across all hyperedges.
    pub fn unique_vertices(&self) -> Vec<Vertex> {
        let mut vertices: Vec<Vertex> = self.0.iter().flat_map(Hyperedge::iter).collect();
        vertices.sort_unstable();
        vertices.dedup();
        vertices
    }

    pub fn contains(&self, he: &Hyperedge) -> bool {
        self.0.contains(he)
    }

    /// Total occurrences of `v` across all hyperedges
    pub fn frequency_of(&self, v: Vertex) -> usize {
        self.0.iter().map(|he| he.frequency_of(v)).sum()
    }

    pub fn frequency_of_vertices(&self) -> FrequencyDict {
        let mut counts: HashMap<Vertex, usize> = HashMap::new();
        for v in self.0.iter().flat_map(Hyperedge::iter) {
            *counts.entry(v).or_insert(0) += 1;
        }

        let mut classes: BTreeMap<usize, Vec<Vertex>> = BTreeMap::new();
        for v in self.unique_vertices() {
            classes.entry(counts[&v]).or_default().push(v);
        }
        FrequencyDict(classes)
    }

    /// Hyperedge sizes in non-decreasing order.
    pub fn size_nub(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self.0.iter().map(Hyperedge::len).collect();
        sizes.sort_unstable();
        sizes
    }

    /// Copy without the first hyperedge equal to `he`.
    ///
    /// The isomorphism verifier strikes hyperedges off a count table with the same effect.
    pub fn remove_once(&self, he: &Hyperedge) -> Hypergraph {
        let mut hyperedges = self.0.clone();
        if let Some(position) = hyperedges.iter().position(|x| x == he) {
            hyperedges.remove(position);
        }
        Hypergraph(hyperedges)
    }

    /// Copy without any hyperedge equal to `he`.
    ///
    /// This is how [`NeighbourhoodTree`](crate::tree::NeighbourhoodTree) shrinks its shared pool.
    pub fn remove_all(&self, he: &Hyperedge) -> Hypergraph {
        self.0.iter().filter(|x| *x != he).cloned().collect()
    }

    /// The hyperedges containing `v`
    pub fn neighbourhood_of_vertex(&self, v: Vertex) -> Hypergraph {
        self.0.iter().filter(|he| he.contains(v)).cloned().collect()
    }

    /// The hyperedges sharing at least one vertex with `he` (including `he` itself, if present)
    ///
    /// Taken over `remove_all(he)`, these are the children of `he` in a neighbourhood tree.
    pub fn neighbourhood_of_hyperedge(&self, he: &Hyperedge) -> Hypergraph {
        self.0.iter().filter(|x| x.intersects(he)).cloned().collect()
    }

    pub fn apply_rule(&self, rule: &Rule) -> Result<Hypergraph> {
        self.0.iter().map(|he| he.apply_rule(rule)).collect()
    }
}

impl FromIterator<Hyperedge> for Hypergraph {
    fn from_iter<I: IntoIterator<Item = Hyperedge>>(iter: I) -> Self {
        Hypergraph(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Hypergraph {
    type Item = &'a Hyperedge;
    type IntoIter = std::slice::Iter<'a, Hyperedge>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

////////////////////////////////////////////////////////////////////////////////
// Frequency classes

/// Vertices grouped by how often they occur in a hypergraph.
///
/// Keys are frequencies; each vertex appears under exactly one key, and vertex lists are sorted.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct FrequencyDict(BTreeMap<usize, Vec<Vertex>>);

impl FrequencyDict {
    pub fn get(&self, frequency: usize) -> Option<&[Vertex]> {
        self.0.get(&frequency).map(Vec::as_slice)
    }

    /// Frequencies present, least frequent first.
    pub fn frequencies(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.keys().copied()
    }

    /// `(frequency, vertices)` classes, least frequent first.
    pub fn classes(&self) -> impl Iterator<Item = (usize, &[Vertex])> + '_ {
        self.0.iter().map(|(&k, vs)| (k, vs.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Same frequencies, and the same number of vertices at each one.
    pub fn is_of_same_shape(&self, other: &FrequencyDict) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .all(|(k, vs)| other.0.get(k).is_some_and(|ws| ws.len() == vs.len()))
    }
}

////////////////////////////////////////////////////////////////////////////////
// open-hypergraphs interop

/// Each lax hyperedge becomes `sources ++ targets`. Nodes identified by the quotient map are
/// collapsed onto the smallest node id in their class; labels are dropped.
impl<O, A> From<&lax::Hypergraph<O, A>> for Hypergraph {
    fn from(h: &lax::Hypergraph<O, A>) -> Self {
        let mut classes = NodeClasses::new(h.nodes.len());
        for (v, w) in h.quotient.0.iter().zip(h.quotient.1.iter()) {
            classes.unify(v.0, w.0);
        }

        h.adjacency
            .iter()
            .map(|adjacency| {
                adjacency
                    .sources
                    .iter()
                    .chain(adjacency.targets.iter())
                    .map(|node| classes.find(node.0))
                    .collect::<Hyperedge>()
            })
            .collect()
    }
}

impl<O, A> From<&lax::OpenHypergraph<O, A>> for Hypergraph {
    fn from(f: &lax::OpenHypergraph<O, A>) -> Self {
        Hypergraph::from(&f.hypergraph)
    }
}

/// Union-find over node ids, rooted at the smallest id of each class.
struct NodeClasses {
    parent: Vec<usize>,
}

impl NodeClasses {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn unify(&mut self, x: usize, y: usize) {
        let (x, y) = (self.find(x), self.find(y));
        let (lo, hi) = if x < y { (x, y) } else { (y, x) };
        self.parent[hi] = lo;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> Hypergraph {
        Hypergraph::from_lists([vec![1, 2], vec![2, 3]])
    }

    #[test]
    fn test_hyperedge_predicates() {
        let he = Hyperedge::new([3, 1, 3, 2]);
        assert!(he.contains(3));
        assert!(!he.contains(4));
        assert_eq!(he.frequency_of(3), 2);
        assert_eq!(he.frequency_of(4), 0);
        assert_eq!(he.unique_vertices(), Hyperedge::new([1, 2, 3]));

        assert!(he.intersects(&Hyperedge::new([9, 2])));
        assert!(!he.intersects(&Hyperedge::new([9, 8])));
        assert!(!he.intersects(&Hyperedge::default()));
    }

    #[test]
    fn test_hyperedge_equality_is_ordered() {
        assert_ne!(Hyperedge::new([1, 2]), Hyperedge::new([2, 1]));
        assert_eq!(Hyperedge::new([1, 2]), Hyperedge::new([1, 2]));
    }

    #[test]
    fn test_hyperedge_append() {
        let mut he = Hyperedge::singleton(1);
        he.append(2);
        he.append_all(&Hyperedge::new([3, 4]));
        assert_eq!(he.vertices(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_apply_rule() {
        let rule = Rule::new(&[1, 2, 3], &[3, 2, 1]).unwrap();
        let mapped = path().apply_rule(&rule).unwrap();
        assert_eq!(mapped, Hypergraph::from_lists([vec![3, 2], vec![2, 1]]));

        let partial = Rule::new(&[1, 2], &[2, 1]).unwrap();
        assert!(matches!(
            path().apply_rule(&partial),
            Err(crate::Error::UnmappedVertex(3))
        ));
    }

    #[test]
    fn test_frequencies() {
        let hg = path();
        assert_eq!(hg.unique_vertices(), vec![1, 2, 3]);
        assert_eq!(hg.frequency_of(2), 2);
        assert_eq!(hg.frequency_of(1), 1);

        let f = hg.frequency_of_vertices();
        assert_eq!(f.get(1), Some(&[1, 3][..]));
        assert_eq!(f.get(2), Some(&[2][..]));
        assert_eq!(f.frequencies().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_same_shape() {
        let f = path().frequency_of_vertices();
        let g = Hypergraph::from_lists([vec![7, 8], vec![9, 8]]).frequency_of_vertices();
        let h = Hypergraph::from_lists([vec![1, 2], vec![3, 4]]).frequency_of_vertices();
        assert!(f.is_of_same_shape(&g));
        assert!(!f.is_of_same_shape(&h));
        assert!(!h.is_of_same_shape(&f));
        assert!(FrequencyDict::default().is_of_same_shape(&FrequencyDict::default()));
    }

    #[test]
    fn test_remove_once_and_all() {
        let hg = Hypergraph::from_lists([vec![1, 2], vec![2, 3], vec![1, 2]]);
        let he = Hyperedge::new([1, 2]);

        let once = hg.remove_once(&he);
        assert_eq!(once, Hypergraph::from_lists([vec![2, 3], vec![1, 2]]));

        let all = hg.remove_all(&he);
        assert_eq!(all, Hypergraph::from_lists([vec![2, 3]]));

        // nothing to remove
        assert_eq!(hg.remove_once(&Hyperedge::new([2, 1])), hg);
    }

    #[test]
    fn test_neighbourhoods() {
        let hg = Hypergraph::from_lists([vec![1, 2], vec![2, 3], vec![3, 4]]);
        assert_eq!(hg.neighbourhood_of_vertex(2).len(), 2);
        assert_eq!(
            hg.neighbourhood_of_hyperedge(&Hyperedge::new([3, 4])),
            Hypergraph::from_lists([vec![2, 3], vec![3, 4]])
        );
    }

    #[test]
    fn test_size_nub_and_union() {
        let mut hg = Hypergraph::from_lists([vec![1, 2, 3], vec![4]]);
        hg.union_with(&path());
        assert_eq!(hg.len(), 4);
        assert_eq!(hg.size_nub(), vec![1, 2, 2, 3]);
    }

    #[derive(Clone, PartialEq, Eq, Debug, Hash)]
    pub enum NodeType {
        Int,
        Float,
    }

    #[derive(Clone, PartialEq, Eq, Debug, Hash)]
    pub enum EdgeOp {
        Cast,
        Negate,
        Mul,
    }

    fn cast_and_negate_then_mul() -> lax::OpenHypergraph<NodeType, EdgeOp> {
        let cast = lax::OpenHypergraph::singleton(
            EdgeOp::Cast,
            vec![NodeType::Int],
            vec![NodeType::Float],
        );
        let negate = lax::OpenHypergraph::singleton(
            EdgeOp::Negate,
            vec![NodeType::Float],
            vec![NodeType::Float],
        );
        let mul = lax::OpenHypergraph::singleton(
            EdgeOp::Mul,
            vec![NodeType::Float, NodeType::Float],
            vec![NodeType::Float],
        );

        let cast_and_negate = &cast | &negate;
        (&cast_and_negate >> &mul).expect("composition should succeed")
    }

    #[test]
    fn test_from_open_hypergraph() {
        let circuit = cast_and_negate_then_mul();
        let hg = Hypergraph::from(&circuit);

        // mul's inputs are glued to the outputs of cast and negate
        assert_eq!(hg.len(), 3);
        assert_eq!(hg.unique_vertices().len(), 5);
        assert_eq!(hg.size_nub(), vec![2, 2, 3]);
    }
}
