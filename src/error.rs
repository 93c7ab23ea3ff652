use std::io;

use thiserror::Error;

use crate::network::{Capacity, MAX_NODES};

/// Precondition failures of the max-flow solver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("node index {index} is out of range for a network of {nodes} nodes")]
    InvalidIndex { index: usize, nodes: usize },
    #[error("arc {from} -> {to} has negative capacity {capacity}")]
    NegativeCapacity {
        from: usize,
        to: usize,
        capacity: Capacity,
    },
    #[error("row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("gave up after {0} augmenting paths")]
    AugmentationLimit(usize),
    #[error("capacity overflow while augmenting flow")]
    CapacityOverflow,
}

/// Errors produced while building a network from text.
#[derive(Error, Debug)]
pub enum ArcError {
    #[error("node count must be between 1 and {}, got {0}", MAX_NODES)]
    NodeCount(usize),
    #[error("expected a node count, got {0:?}")]
    NodeCountToken(String),
    #[error("expected `<origin> <destination> <capacity>`")]
    Format,
    #[error("node {0} does not exist")]
    UnknownNode(String),
    #[error("capacity must be an integer, got {0:?}")]
    Capacity(String),
    #[error("capacity must not be negative, got {0}")]
    NegativeCapacity(Capacity),
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<ArcError>,
    },
    #[error("unexpected end of input")]
    Eof,
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error(transparent)]
    Arc(#[from] ArcError),
    #[error(transparent)]
    Io(#[from] io::Error),
}
