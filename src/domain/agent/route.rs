//! Router output: a destination drawn from the closed agent set plus
//! forwarded inputs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use super::strip_code_fences;

/// The closed, enumerated set of destination agents. The router may only
/// dispatch to one of these; anything else is a typed routing failure, never
/// a silent fall-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentName {
    DocAgent,
    GoogleAgent,
    LlmAgent,
    QuizAgent,
    MindmapAgent,
}

impl AgentName {
    pub const ALL: [AgentName; 5] = [
        AgentName::QuizAgent,
        AgentName::DocAgent,
        AgentName::MindmapAgent,
        AgentName::GoogleAgent,
        AgentName::LlmAgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentName::DocAgent => "doc_agent",
            AgentName::GoogleAgent => "google_agent",
            AgentName::LlmAgent => "llm_agent",
            AgentName::QuizAgent => "quiz_agent",
            AgentName::MindmapAgent => "mindmap_agent",
        }
    }

    /// Human-readable title used in delegation tool names,
    /// e.g. `Doc Agent`.
    pub fn title(&self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for AgentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentName {
    type Err = RouteParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "doc_agent" => Ok(AgentName::DocAgent),
            "google_agent" => Ok(AgentName::GoogleAgent),
            "llm_agent" => Ok(AgentName::LlmAgent),
            "quiz_agent" => Ok(AgentName::QuizAgent),
            "mindmap_agent" => Ok(AgentName::MindmapAgent),
            // The router prompt historically offered a `chat_agent`
            // destination for plain conversation; it maps onto the general
            // LLM agent.
            "chat_agent" => Ok(AgentName::LlmAgent),
            other => Err(RouteParseError::UnknownDestination(other.to_string())),
        }
    }
}

/// Parsed router output.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDecision {
    pub destination: AgentName,
    /// Inputs the router chose to forward to the destination agent.
    pub next_inputs: Map<String, Value>,
}

/// Why a router response could not be turned into a [`RouteDecision`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteParseError {
    #[error("router response is not valid JSON: {0}")]
    Malformed(String),

    #[error("router chose a destination outside the agent set: {0}")]
    UnknownDestination(String),
}

#[derive(Deserialize)]
struct RawRoute {
    destination: String,
    #[serde(default)]
    next_inputs: Map<String, Value>,
}

/// Parses the model's routing response. The destination must be a member of
/// the closed agent set.
pub fn parse_route_decision(raw: &str) -> Result<RouteDecision, RouteParseError> {
    let parsed: RawRoute = serde_json::from_str(strip_code_fences(raw))
        .map_err(|e| RouteParseError::Malformed(e.to_string()))?;
    let destination = parsed.destination.parse::<AgentName>()?;
    Ok(RouteDecision {
        destination,
        next_inputs: parsed.next_inputs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_well_formed_route() {
        let raw = r#"{"destination": "quiz_agent", "next_inputs": {"input": "make a quiz"}}"#;
        let decision = parse_route_decision(raw).unwrap();
        assert_eq!(decision.destination, AgentName::QuizAgent);
        assert_eq!(
            decision.next_inputs.get("input").and_then(|v| v.as_str()),
            Some("make a quiz")
        );
    }

    #[test]
    fn chat_agent_maps_to_llm_agent() {
        let raw = r#"{"destination": "chat_agent", "next_inputs": {}}"#;
        let decision = parse_route_decision(raw).unwrap();
        assert_eq!(decision.destination, AgentName::LlmAgent);
    }

    #[test]
    fn out_of_set_destination_is_a_typed_failure() {
        let raw = r#"{"destination": "pirate_agent", "next_inputs": {}}"#;
        let err = parse_route_decision(raw).unwrap_err();
        assert_eq!(
            err,
            RouteParseError::UnknownDestination("pirate_agent".to_string())
        );
    }

    #[test]
    fn malformed_json_is_a_typed_failure() {
        let err = parse_route_decision("not json at all").unwrap_err();
        assert!(matches!(err, RouteParseError::Malformed(_)));
    }

    #[test]
    fn missing_next_inputs_defaults_to_empty() {
        let decision = parse_route_decision(r#"{"destination": "doc_agent"}"#).unwrap();
        assert!(decision.next_inputs.is_empty());
    }

    #[test]
    fn titles_read_like_names() {
        assert_eq!(AgentName::DocAgent.title(), "Doc Agent");
        assert_eq!(AgentName::MindmapAgent.title(), "Mindmap Agent");
    }
}
