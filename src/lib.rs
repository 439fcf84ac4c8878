pub mod error;
pub mod graph;
pub mod import;
pub mod puzzle;
pub mod search;
pub mod types;
pub mod util;

pub use error::{GraphError, ImportError};
pub use graph::Graph;
pub use search::{find_disconnecting_subset, CandidatePool, SearchOutcome};
pub use types::{Edge, NodeId};
