//! Isomorphism of hypergraphs up to vertex relabelling.
//!
//! Two hypergraphs are isomorphic when some bijection of their vertex sets maps the hyperedges of
//! one onto the hyperedges of the other, multiplicities included. A bijection must send each
//! vertex to a vertex of the same frequency, so the search only permutes within frequency
//! classes, after the cheap nogood checks have had a chance to reject the pair outright.
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::hypergraph::{Hyperedge, Hypergraph};
use crate::nogood::nogood;
use crate::rule::Rule;

/// Candidate rule enumeration per frequency class
pub mod candidates;

pub use candidates::{CandidateRules, candidate_count, candidate_rules, class_rules};

/// Limits on a single isomorphism search
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct SearchConfig {
    /// Refuse to search when there are more candidate rules than this. `None` means no limit.
    pub max_candidates: Option<u128>,
}

impl SearchConfig {
    pub fn with_max_candidates(limit: u128) -> Self {
        Self {
            max_candidates: Some(limit),
        }
    }

    fn check(&self, candidates: Option<u128>) -> Result<()> {
        match self.max_candidates {
            Some(limit) if candidates.is_none_or(|n| n > limit) => {
                Err(Error::SearchLimit { candidates, limit })
            }
            _ => Ok(()),
        }
    }
}

/// True iff `f` and `g` are isomorphic. The search is unbounded.
///
/// # Panics
///
/// If the search fails. Without a candidate limit that only happens when an engine invariant
/// is broken.
pub fn is_isomorphic(f: &Hypergraph, g: &Hypergraph) -> bool {
    found(find_isomorphism(f, g, &SearchConfig::default()))
}

fn found(outcome: Result<Option<Rule>>) -> bool {
    match outcome {
        Ok(witness) => witness.is_some(),
        Err(err) => panic!("unbounded isomorphism search failed: {err}"),
    }
}

/// Find a rule mapping `f` onto `g`.
///
/// Candidates are verified in parallel on the rayon pool. Once any worker finds a match the
/// others stop picking up new candidates; which witness is returned is unspecified.
pub fn find_isomorphism(
    f: &Hypergraph,
    g: &Hypergraph,
    config: &SearchConfig,
) -> Result<Option<Rule>> {
    let Ok((f_freq, g_freq)) = nogood(f, g) else {
        return Ok(None);
    };

    let count = candidate_count(&f_freq);
    config.check(count)?;
    debug!(
        "searching {} candidate rules over {} frequency classes",
        count.map_or_else(|| "overflowing".to_string(), |n| n.to_string()),
        f_freq.len()
    );

    let found = AtomicBool::new(false);
    let witness = CandidateRules::new(&f_freq, &g_freq)?
        .par_bridge()
        .find_map_any(|rule| {
            if found.load(Ordering::Relaxed) {
                return None;
            }
            match matches_via_rule(f, &rule, g) {
                Ok(true) => {
                    found.store(true, Ordering::Relaxed);
                    Some(Ok(rule))
                }
                Ok(false) => None,
                Err(err) => Some(Err(err)),
            }
        })
        .transpose()?;

    debug!("isomorphism search finished, found = {}", witness.is_some());
    Ok(witness)
}

/// Check a single, externally supplied rule.
///
/// With `skip_nogood` the invariant checks are not repeated. Fails with
/// [`Error::UnmappedVertex`] if `rule` does not cover every vertex of `f`. A rule that does not
/// map the vertices of `f` one-to-one onto the vertices of `g` is never a witness.
pub fn is_isomorphic_via_rule(
    f: &Hypergraph,
    rule: &Rule,
    g: &Hypergraph,
    skip_nogood: bool,
) -> Result<bool> {
    if !skip_nogood && nogood(f, g).is_err() {
        return Ok(false);
    }
    if !is_bijection_onto(f, rule, g)? {
        return Ok(false);
    }
    matches_via_rule(f, rule, g)
}

fn is_bijection_onto(f: &Hypergraph, rule: &Rule, g: &Hypergraph) -> Result<bool> {
    let domain = f.unique_vertices();
    let mut image = domain
        .iter()
        .map(|&v| rule.apply(v))
        .collect::<Result<Vec<_>>>()?;
    image.sort_unstable();
    image.dedup();
    Ok(image.len() == domain.len() && image == g.unique_vertices())
}

/// Map the hyperedges of `f` one at a time and strike each off a working copy of `g`.
///
/// Counting copies of each hyperedge is [`Hypergraph::remove_once`] without the reallocation.
fn matches_via_rule(f: &Hypergraph, rule: &Rule, g: &Hypergraph) -> Result<bool> {
    if f.len() != g.len() {
        return Ok(false);
    }

    let mut remaining: HashMap<&Hyperedge, usize> = HashMap::with_capacity(g.len());
    for he in g {
        *remaining.entry(he).or_insert(0) += 1;
    }

    for he in f {
        let mapped = he.apply_rule(rule)?;
        match remaining.get_mut(&mapped) {
            Some(count) if *count > 0 => *count -= 1,
            _ => return Ok(false),
        }
    }

    Ok(true)
}

impl Hypergraph {
    pub fn is_isomorphic_to(&self, other: &Hypergraph) -> bool {
        is_isomorphic(self, other)
    }
}
