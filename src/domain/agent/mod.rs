//! Pure agent-routing types: the closed agent set, router decisions and
//! per-agent tool decisions, with strict JSON parsing of model output.

mod decision;
mod route;

pub use decision::{parse_tool_decision, DecisionParseError, ToolChoice, ToolDecision};
pub use route::{parse_route_decision, AgentName, RouteDecision, RouteParseError};

/// Strips a surrounding markdown code fence from model output, if present.
/// Models asked for JSON frequently wrap it in ```json ... ``` anyway.
pub(crate) fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fences_are_stripped() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n[]\n```"), "[]");
    }
}
