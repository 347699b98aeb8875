//! Mindmap generation - depth-bounded, model-driven tree expansion.
//!
//! Each level is one JSON-constrained model call returning child labels.
//! Subtrees are attached structurally from the recursive call's return
//! value, never located by label lookup, so duplicate labels cannot cause
//! ambiguous attachment.
//!
//! `depth` is the target tree height counting the root as level 1; a depth
//! of 0 or 1 still performs one level of expansion, so the produced tree
//! always has at least the root and its direct children (which may be an
//! empty set when the model finds nothing to expand).

use std::sync::Arc;

use futures::future::BoxFuture;
use serde::Deserialize;
use tracing::debug;

use crate::domain::agent::strip_code_fences;
use crate::domain::mindmap::{Mindmap, MindmapNode};
use crate::ports::{CompletionRequest, LanguageModel, ModelError, ModelRole};

/// A failed generation. Distinct from an empty result: an `Ok` mindmap with
/// no children means the model had nothing to say, an `Err` means a branch
/// could not be expanded at all.
#[derive(Debug, thiserror::Error)]
pub enum MindmapError {
    #[error("model call failed while expanding `{label}`: {source}")]
    Model {
        label: String,
        #[source]
        source: ModelError,
    },

    #[error("model returned malformed child labels for `{label}`: {message}")]
    Malformed { label: String, message: String },
}

pub struct MindmapGenerator {
    model: Arc<dyn LanguageModel>,
}

#[derive(Deserialize)]
struct RawChild {
    label: String,
}

impl MindmapGenerator {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Expands `topic` into a tree of height `depth` (minimum 2: the root
    /// and one level of children). Any malformed or failed expansion fails
    /// the whole generation.
    pub async fn generate(&self, topic: &str, depth: u32) -> Result<Mindmap, MindmapError> {
        let root = self.expand(topic, topic, depth.max(2)).await?;
        debug!(topic, depth, nodes = root.node_count(), "mindmap generated");
        Ok(Mindmap { root, depth })
    }

    /// One expansion step: fetch children of `label`, then recurse into each
    /// child while more than one level of height remains below it. Depth
    /// strictly decreases on every recursive call.
    fn expand<'a>(
        &'a self,
        topic: &'a str,
        label: &'a str,
        depth: u32,
    ) -> BoxFuture<'a, Result<MindmapNode, MindmapError>> {
        Box::pin(async move {
            let labels = self.child_labels(topic, label).await?;
            let remaining = depth.saturating_sub(1);

            let mut node = MindmapNode::new(label);
            if remaining > 1 {
                for child_label in labels {
                    let subtree = self.expand(topic, &child_label, remaining).await?;
                    node.children.push(subtree);
                }
            } else {
                node.children = labels.into_iter().map(MindmapNode::new).collect();
            }
            Ok(node)
        })
    }

    async fn child_labels(&self, topic: &str, label: &str) -> Result<Vec<String>, MindmapError> {
        let request = CompletionRequest::new()
            .with_message(
                ModelRole::System,
                "You are building a mindmap. Given the overall topic and the \
                 current node, list the most important direct sub-topics of the \
                 current node. Respond with a JSON array of objects of the form \
                 [{\"label\": \"<sub-topic>\"}]. Return an empty array if the \
                 node has no meaningful sub-topics.",
            )
            .with_message(
                ModelRole::User,
                format!("Topic: {topic}\nCurrent node: {label}"),
            )
            .with_json_response();

        let raw = self
            .model
            .complete(request)
            .await
            .map_err(|source| MindmapError::Model {
                label: label.to_string(),
                source,
            })?;

        let children: Vec<RawChild> = serde_json::from_str(strip_code_fences(&raw))
            .map_err(|e| MindmapError::Malformed {
                label: label.to_string(),
                message: e.to_string(),
            })?;

        Ok(children.into_iter().map(|c| c.label).collect())
    }
}
