//! Application layer: the agent engine, generators, auth services and
//! per-operation command handlers.

pub mod agent;
pub mod auth;
pub mod handlers;
pub mod mindmap;
pub mod quiz;
