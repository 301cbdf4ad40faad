//! Structural variety of hypergraphs.
//!
//! For every vertex, find the smallest neighbourhood depth at which it becomes distinguishable
//! from every other vertex, by testing depth-bounded neighbourhoods for isomorphism.
//!
//! ```
//! use hypergraph_variety::{Hypergraph, is_isomorphic, variety_diagnostics};
//!
//! let path: Hypergraph = "{{1,2},{2,3}}".parse()?;
//! let relabelled: Hypergraph = "{{3,2},{2,1}}".parse()?;
//! assert!(is_isomorphic(&path, &relabelled));
//!
//! // the two ends of a path mirror each other
//! assert_eq!(variety_diagnostics(&path)?, vec![(1, 0), (2, 1), (3, 0)]);
//! # Ok::<(), hypergraph_variety::Error>(())
//! ```
pub mod batch;
pub mod error;
pub mod hypergraph;
pub mod isomorphism;
pub mod notation;
pub mod rule;
pub mod tree;
pub mod variety;

// fast nogood checks
mod nogood;

pub use error::{Error, Result};
pub use hypergraph::{FrequencyDict, Hyperedge, Hypergraph, Vertex};
pub use isomorphism::{SearchConfig, find_isomorphism, is_isomorphic, is_isomorphic_via_rule};
pub use rule::Rule;
pub use tree::NeighbourhoodTree;
pub use variety::{Indifference, variety, variety_diagnostics};
