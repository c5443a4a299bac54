//! The shared inverted index and the flag that says whether it can be read.

pub mod state;
pub mod store;

pub use state::{IndexState, IndexStateGuard};
pub use store::{IndexStore, PostingSet};
