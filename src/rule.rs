use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::hypergraph::Vertex;

/// An injective relabelling of vertices, read as `domain[i] ↦ codomain[i]`.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Rule(BTreeMap<Vertex, Vertex>);

impl Rule {
    /// Zip two vertex lists into a rule.
    ///
    /// Fails with [`Error::ShapeMismatch`] when the lists have different lengths and with
    /// [`Error::NotInjective`] when a vertex repeats on either side.
    pub fn new(domain: &[Vertex], codomain: &[Vertex]) -> Result<Self> {
        if domain.len() != codomain.len() {
            return Err(Error::ShapeMismatch {
                domain: domain.len(),
                codomain: codomain.len(),
            });
        }

        let mut seen = BTreeSet::new();
        for &v in codomain {
            if !seen.insert(v) {
                return Err(Error::NotInjective(v));
            }
        }

        let mut map = BTreeMap::new();
        for (&u, &v) in domain.iter().zip(codomain) {
            if map.insert(u, v).is_some() {
                return Err(Error::NotInjective(u));
            }
        }

        Ok(Self(map))
    }

    pub fn identity(vertices: impl IntoIterator<Item = Vertex>) -> Self {
        Self(vertices.into_iter().map(|v| (v, v)).collect())
    }

    pub fn get(&self, v: Vertex) -> Option<Vertex> {
        self.0.get(&v).copied()
    }

    /// Image of `v`, or [`Error::UnmappedVertex`] when `v` is outside the domain
    pub fn apply(&self, v: Vertex) -> Result<Vertex> {
        self.get(v).ok_or(Error::UnmappedVertex(v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.0.iter().map(|(&u, &v)| (u, v))
    }

    /// True iff no two vertices share an image
    pub fn is_injective(&self) -> bool {
        let images: BTreeSet<Vertex> = self.0.values().copied().collect();
        images.len() == self.0.len()
    }

    /// Zip pairs without the checks of [`Rule::new`]. Both sides must already be duplicate free.
    pub(crate) fn from_pairs(pairs: impl IntoIterator<Item = (Vertex, Vertex)>) -> Self {
        let mut map = BTreeMap::new();
        for (u, v) in pairs {
            let previous = map.insert(u, v);
            debug_assert!(previous.is_none(), "vertex {u} is mapped twice");
        }
        let rule = Rule(map);
        debug_assert!(rule.is_injective(), "rule is not injective");
        rule
    }

    /// Union of two rules with disjoint domains.
    ///
    /// # Panics
    ///
    /// If the domains overlap. Rules handed out per frequency class never do.
    pub fn combine(&self, other: &Rule) -> Rule {
        let mut map = self.0.clone();
        for (&u, &v) in &other.0 {
            let previous = map.insert(u, v);
            assert!(
                previous.is_none(),
                "combined rules must have disjoint domains, vertex {u} is mapped twice"
            );
        }
        Rule(map)
    }
}


/// Every combination of one rule from `left` with one rule from `right`.
///
/// An empty side is treated as "no constraint" and the other side is returned unchanged, so a
/// frequency class without vertices never wipes out the whole product.
pub fn product(left: &[Rule], right: &[Rule]) -> Vec<Rule> {
    if right.is_empty() {
        return left.to_vec();
    }
    if left.is_empty() {
        return right.to_vec();
    }

    left.iter()
        .flat_map(|l| right.iter().map(move |r| l.combine(r)))
        .collect()
}
