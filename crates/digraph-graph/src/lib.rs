pub mod layout;
pub mod link;
pub mod node;
pub mod selection;
pub mod store;

pub use layout::GridLayout;
pub use link::{LINK_Z_VALUE, Link};
pub use node::{Node, NodeColors};
pub use selection::Selection;
pub use store::{DeletionSummary, GraphError, GraphStore, Placement, RemovedNode};
