//! Web search adapters.

mod serper;

pub use serper::SerperSearch;
