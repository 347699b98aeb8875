//! Strongly-typed identifier value objects.
//!
//! All entities use database-assigned integer ids (BIGSERIAL), wrapped in
//! newtypes so a workspace id can never be passed where a user id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a user.
    UserId
);
entity_id!(
    /// Unique identifier for a workspace.
    WorkspaceId
);
entity_id!(
    /// Unique identifier for a chat message.
    ChatMessageId
);
entity_id!(
    /// Unique identifier for an uploaded document.
    DocumentId
);
entity_id!(
    /// Unique identifier for an AI-generated document.
    GeneratedDocId
);
entity_id!(
    /// Unique identifier for a quiz.
    QuizId
);
entity_id!(
    /// Unique identifier for a quiz question.
    QuestionId
);
entity_id!(
    /// Unique identifier for a persisted mindmap tree.
    TreeId
);
entity_id!(
    /// Unique identifier for a persisted mindmap node.
    TreeNodeId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_strings() {
        let id = WorkspaceId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!("42".parse::<WorkspaceId>().unwrap(), id);
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = UserId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        let back: UserId = serde_json::from_str("7").unwrap();
        assert_eq!(back, id);
    }
}
