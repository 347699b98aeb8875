//! Domain layer: pure types and invariants, no IO.

pub mod agent;
pub mod chat;
pub mod document;
pub mod foundation;
pub mod mindmap;
pub mod quiz;
pub mod user;
pub mod workspace;
