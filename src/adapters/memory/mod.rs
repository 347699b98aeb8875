//! In-memory port implementations.
//!
//! These back the test suites; none of them is wired into the production
//! composition in `main`.

mod external;
mod stores;

pub use external::{
    InMemoryDocumentIndex, InMemoryEmailSender, InMemoryFileStorage, InMemoryImageGenerator,
    InMemorySearchProvider, SentEmail,
};
pub use stores::{
    InMemoryChatStore, InMemoryDocumentStore, InMemoryMindmapStore, InMemoryQuizStore,
    InMemoryUserStore, InMemoryWorkspaceStore,
};
