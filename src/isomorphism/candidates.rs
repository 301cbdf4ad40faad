//! Candidate rules: one bijection per frequency class, combined across classes.
use itertools::Itertools;
use itertools::structs::{MultiProduct, Permutations};

use crate::error::{Error, Result};
use crate::hypergraph::{FrequencyDict, Vertex};
use crate::rule::{Rule, product};

type ClassPermutations<'a> = Permutations<std::iter::Copied<std::slice::Iter<'a, Vertex>>>;

/// Lazily enumerates every frequency-preserving bijection between two hypergraphs.
///
/// Classes are taken least frequent first. Within each class the domain vertices are kept in
/// ascending order and the codomain vertices are permuted. When there are no classes at all the
/// single empty rule is produced, so two vertex-less hypergraphs still get a candidate.
pub struct CandidateRules<'a> {
    domains: Vec<&'a [Vertex]>,
    state: State<'a>,
}

enum State<'a> {
    Empty { done: bool },
    Product(MultiProduct<ClassPermutations<'a>>),
}

impl<'a> CandidateRules<'a> {
    /// Pair up the classes of `f` and `g`, which must have the same shape.
    pub fn new(f: &'a FrequencyDict, g: &'a FrequencyDict) -> Result<Self> {
        let mut domains = Vec::with_capacity(f.len());
        let mut codomains = Vec::with_capacity(f.len());

        for (frequency, domain) in f.classes() {
            let codomain = g.get(frequency).unwrap_or(&[]);
            if codomain.len() != domain.len() {
                return Err(Error::ShapeMismatch {
                    domain: domain.len(),
                    codomain: codomain.len(),
                });
            }
            domains.push(domain);
            codomains.push(codomain);
        }
        if g.len() != f.len() {
            return Err(Error::ShapeMismatch {
                domain: f.len(),
                codomain: g.len(),
            });
        }

        let state = if domains.is_empty() {
            State::Empty { done: false }
        } else {
            State::Product(
                codomains
                    .into_iter()
                    .map(|codomain| codomain.iter().copied().permutations(codomain.len()))
                    .multi_cartesian_product(),
            )
        };

        Ok(Self { domains, state })
    }
}

impl Iterator for CandidateRules<'_> {
    type Item = Rule;

    fn next(&mut self) -> Option<Rule> {
        match &mut self.state {
            State::Empty { done } => {
                if *done {
                    None
                } else {
                    *done = true;
                    Some(Rule::default())
                }
            }
            State::Product(images) => {
                let images = images.next()?;
                let rule = self
                    .domains
                    .iter()
                    .zip(images)
                    .map(|(domain, image)| Rule::from_pairs(domain.iter().copied().zip(image)))
                    .fold(Rule::default(), |acc, class_rule| acc.combine(&class_rule));
                Some(rule)
            }
        }
    }
}

/// Number of candidate rules, `∏ |class|!`, or `None` if that overflows.
pub fn candidate_count(f: &FrequencyDict) -> Option<u128> {
    f.classes().try_fold(1u128, |acc, (_, vertices)| {
        let class = (2..=vertices.len() as u128).try_fold(1u128, |n, k| n.checked_mul(k))?;
        acc.checked_mul(class)
    })
}

/// All bijections from `domain` onto `codomain`, keeping `domain` fixed.
pub fn class_rules(domain: &[Vertex], codomain: &[Vertex]) -> Result<Vec<Rule>> {
    codomain
        .iter()
        .copied()
        .permutations(codomain.len())
        .map(|image| Rule::new(domain, &image))
        .collect()
}

/// Eager version of [`CandidateRules`], multiplying the per-class rule sets together.
pub fn candidate_rules(f: &FrequencyDict, g: &FrequencyDict) -> Result<Vec<Rule>> {
    let mut classes = Vec::with_capacity(f.len());
    for (frequency, domain) in f.classes() {
        classes.push(class_rules(domain, g.get(frequency).unwrap_or(&[]))?);
    }

    if classes.is_empty() {
        return Ok(vec![Rule::default()]);
    }

    // multiply from the end, most frequent class first
    Ok(classes
        .iter()
        .rev()
        .fold(Vec::new(), |acc, class| product(class, &acc)))
}
