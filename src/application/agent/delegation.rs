//! Delegation - one agent handing a query to a peer through a Tool wrapper.
//!
//! The registry is built once per top-level dispatch; agents receive it
//! before any of them runs. No error crosses the delegation boundary: an
//! absent peer or a failing peer both fold into descriptive output text.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;

use crate::domain::agent::AgentName;

use super::agent::Agent;
use super::tool::{Tool, ToolError, ToolOutput};

/// Shared name-to-agent table. Populated exactly once, after every agent in
/// the set has been constructed, so delegation tools can be handed out while
/// their targets are still being built.
#[derive(Default)]
pub struct AgentRegistry {
    agents: OnceLock<HashMap<AgentName, Arc<Agent>>>,
}

impl AgentRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Installs the agent set. Later calls are ignored; the set is fixed for
    /// the lifetime of the dispatch.
    pub fn install(&self, agents: HashMap<AgentName, Arc<Agent>>) {
        let _ = self.agents.set(agents);
    }

    pub fn get(&self, name: AgentName) -> Option<Arc<Agent>> {
        self.agents.get().and_then(|map| map.get(&name).cloned())
    }
}

/// A Tool that forwards its input to a peer agent.
pub struct DelegationTool {
    name: String,
    description: String,
    target: AgentName,
    registry: Arc<AgentRegistry>,
}

impl DelegationTool {
    pub fn new(target: AgentName, registry: Arc<AgentRegistry>) -> Self {
        Self {
            name: format!("Ask {}", target.title()),
            description: format!(
                "Hand the request over to the {} when it is better suited to answer.",
                target.title()
            ),
            target,
            registry,
        }
    }
}

#[async_trait]
impl Tool for DelegationTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn invoke(&self, input: &str) -> Result<ToolOutput, ToolError> {
        let Some(peer) = self.registry.get(self.target) else {
            return Ok(ToolOutput::text(format!("unknown agent: {}", self.target)));
        };
        // Delegated turns run without the caller's history; the forwarded
        // input is self-contained.
        match peer.run(input, &[]).await {
            Ok(output) => Ok(ToolOutput::Text(output)),
            Err(err) => Ok(ToolOutput::text(format!(
                "error delegating to {}: {err}",
                self.target
            ))),
        }
    }
}
