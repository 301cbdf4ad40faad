use std::collections::HashMap;
use std::hash::Hash;

use log::trace;

use crate::hypergraph::{FrequencyDict, Hypergraph};

/// Which cheap invariant told two hypergraphs apart
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Nogood {
    HyperedgeCount,
    VertexCount,
    SizeNub,
    FrequencyShape,
}

/// Run the fast nogood checks.
///
/// On success, returns the frequency classes of both hypergraphs so the caller can enumerate
/// candidate rules without recounting.
pub(crate) fn nogood(
    f: &Hypergraph,
    g: &Hypergraph,
) -> Result<(FrequencyDict, FrequencyDict), Nogood> {
    let result = checks(f, g);
    if let Err(reason) = &result {
        trace!("nogood: {reason:?} differs");
    }
    result
}

fn checks(f: &Hypergraph, g: &Hypergraph) -> Result<(FrequencyDict, FrequencyDict), Nogood> {
    if f.len() != g.len() {
        return Err(Nogood::HyperedgeCount);
    }

    if f.unique_vertices().len() != g.unique_vertices().len() {
        return Err(Nogood::VertexCount);
    }

    let f_sizes: Vec<usize> = f.iter().map(|he| he.len()).collect();
    let g_sizes: Vec<usize> = g.iter().map(|he| he.len()).collect();
    if !is_sorted_equal(&f_sizes, &g_sizes) {
        return Err(Nogood::SizeNub);
    }

    let f_freq = f.frequency_of_vertices();
    let g_freq = g.frequency_of_vertices();
    if !f_freq.is_of_same_shape(&g_freq) {
        return Err(Nogood::FrequencyShape);
    }

    Ok((f_freq, g_freq))
}

/// Check that two slices are equal once sorted (exact length and elements)
pub(crate) fn is_sorted_equal<T: Eq + Hash>(x: &[T], y: &[T]) -> bool {
    if x.len() != y.len() {
        return false;
    }

    let mut counts = HashMap::new();

    for item in x {
        *counts.entry(item).or_insert(0usize) += 1;
    }

    for item in y {
        match counts.get_mut(item) {
            Some(count) if *count > 0 => *count -= 1,
            _ => return false,
        }
    }

    true
}
