//! Uploaded source documents and AI-generated documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::foundation::{DocumentId, GeneratedDocId, UserId, WorkspaceId};

/// Metadata for an uploaded document that feeds the retrieval index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub filename: String,
    pub workspace_id: WorkspaceId,
    pub uploaded_at: DateTime<Utc>,
}

/// What kind of document the AI produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratedDocKind {
    /// PNG image from the image-generation provider.
    Image,
    /// Markdown summary produced by the language model.
    Summary,
}

impl GeneratedDocKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratedDocKind::Image => "image",
            GeneratedDocKind::Summary => "summary",
        }
    }
}

impl fmt::Display for GeneratedDocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeneratedDocKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(GeneratedDocKind::Image),
            "summary" => Ok(GeneratedDocKind::Summary),
            other => Err(format!("unknown generated doc kind: {}", other)),
        }
    }
}

/// Metadata for an AI-generated document stored under the workspace's
/// generated-docs directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedDoc {
    pub id: GeneratedDocId,
    pub file_name: String,
    pub kind: GeneratedDocKind,
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
}

/// Derives a filesystem-safe file name from a prompt, in the style
/// `<prefix>_<timestamp>.<ext>`.
pub fn safe_file_name(prompt: &str, timestamp: DateTime<Utc>, ext: &str) -> String {
    let prefix: String = prompt
        .chars()
        .take(30)
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}_{}.{}", prefix, timestamp.format("%Y%m%d_%H%M%S"), ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn safe_file_name_strips_specials_and_truncates() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let name = safe_file_name("photosynthesis: light/dark reactions explained", ts, "png");
        assert_eq!(name, "photosynthesis__light_dark_rea_20240501_123000.png");
        assert!(!name.contains('/'));
    }

    #[test]
    fn kind_round_trips() {
        assert_eq!("image".parse::<GeneratedDocKind>().unwrap(), GeneratedDocKind::Image);
        assert_eq!(GeneratedDocKind::Summary.as_str(), "summary");
        assert!("pdf".parse::<GeneratedDocKind>().is_err());
    }
}
