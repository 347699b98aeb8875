//! Per-agent tool decisions parsed from model output.
//!
//! The model is constrained to return either
//! `{"tool": "NONE", "tool_input": "<final answer>"}` or
//! `{"tool": "<name>", "tool_input": "<argument>"}`. Anything else is a
//! typed decision-parse failure; malformed output is never swallowed and
//! never crashes the caller.

use serde::Deserialize;

use super::strip_code_fences;

/// What the agent decided to do with the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolChoice {
    /// Answer directly; the decision's `tool_input` is the final answer.
    Answer,
    /// Invoke the named tool with `tool_input` as its argument.
    Invoke(String),
}

/// A parsed agent decision. Produced once per agent invocation; transient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDecision {
    pub choice: ToolChoice,
    pub tool_input: String,
}

/// A model response that could not be understood as a decision.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("decision parse failure: {0}")]
pub struct DecisionParseError(pub String);

#[derive(Deserialize)]
struct RawDecision {
    tool: String,
    #[serde(default)]
    tool_input: String,
}

/// Parses the model's decision JSON. `"NONE"` (any casing) means answer
/// directly; any other tool string is taken verbatim as a tool name, to be
/// resolved against the agent's registered tools by exact match.
pub fn parse_tool_decision(raw: &str) -> Result<ToolDecision, DecisionParseError> {
    let parsed: RawDecision = serde_json::from_str(strip_code_fences(raw))
        .map_err(|e| DecisionParseError(e.to_string()))?;

    let choice = if parsed.tool.eq_ignore_ascii_case("none") {
        ToolChoice::Answer
    } else {
        ToolChoice::Invoke(parsed.tool)
    };

    Ok(ToolDecision {
        choice,
        tool_input: parsed.tool_input,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_means_direct_answer() {
        let decision =
            parse_tool_decision(r#"{"tool": "NONE", "tool_input": "Paris"}"#).unwrap();
        assert_eq!(decision.choice, ToolChoice::Answer);
        assert_eq!(decision.tool_input, "Paris");
    }

    #[test]
    fn named_tool_is_kept_verbatim() {
        let decision =
            parse_tool_decision(r#"{"tool": "Math solving", "tool_input": "2+2"}"#).unwrap();
        assert_eq!(decision.choice, ToolChoice::Invoke("Math solving".to_string()));
        assert_eq!(decision.tool_input, "2+2");
    }

    #[test]
    fn fenced_json_still_parses() {
        let decision =
            parse_tool_decision("```json\n{\"tool\": \"NONE\", \"tool_input\": \"ok\"}\n```")
                .unwrap();
        assert_eq!(decision.choice, ToolChoice::Answer);
    }

    #[test]
    fn garbage_is_a_typed_parse_failure() {
        let err = parse_tool_decision("I think I'll use the search tool").unwrap_err();
        assert!(err.0.contains("expected"));
    }

    #[test]
    fn missing_tool_field_fails() {
        assert!(parse_tool_decision(r#"{"tool_input": "x"}"#).is_err());
    }
}
