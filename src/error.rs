use std::path::PathBuf;

use thiserror::Error;

use crate::hypergraph::Vertex;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Notation text could not be read as a hyperedge or hypergraph
    #[error("malformed input at byte {position}: {reason}")]
    MalformedInput { position: usize, reason: String },

    /// A rule was built from vertex lists of different lengths
    #[error("rule shape mismatch: {domain} domain vertices, {codomain} codomain vertices")]
    ShapeMismatch { domain: usize, codomain: usize },

    /// A rule was built with a vertex repeated on one side
    #[error("rule is not injective: vertex {0} appears more than once")]
    NotInjective(Vertex),

    #[error("vertex {0} is not in the domain of the rule")]
    UnmappedVertex(Vertex),

    #[error("vertex {0} does not occur in the hypergraph")]
    UnknownVertex(Vertex),

    /// The number of candidate rules is over the configured limit.
    /// `candidates` is `None` when the count itself overflows.
    #[error(
        "isomorphism search would try {} candidate rules (limit {limit})",
        display_count(.candidates)
    )]
    SearchLimit {
        candidates: Option<u128>,
        limit: u128,
    },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn display_count(count: &Option<u128>) -> String {
    match count {
        Some(n) => n.to_string(),
        None => "more than u128::MAX".to_string(),
    }
}

impl Error {
    pub(crate) fn malformed(position: usize, reason: impl Into<String>) -> Self {
        Error::MalformedInput {
            position,
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
