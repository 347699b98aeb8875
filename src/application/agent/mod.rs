//! The agent subsystem: router, single-decision agents, tools, delegation
//! and the dispatch entry point.

pub mod agent;
pub mod delegation;
pub mod engine;
pub mod router;
pub mod tool;
pub mod tools;

pub use agent::{Agent, AgentError};
pub use delegation::{AgentRegistry, DelegationTool};
pub use engine::AgentEngine;
pub use router::{Router, RouterError};
pub use tool::{Tool, ToolError, ToolOutput};
