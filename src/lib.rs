pub mod algorithm;
pub mod error;
pub mod network;
pub mod session;
pub mod state;

pub use algorithm::{max_flow, EdmondsKarp};
pub use error::{ArcError, Error, FlowError};
pub use network::{Capacity, CapacityMatrix, Network};
