//! Concrete tools handed to the agents.
//!
//! Each tool is constructed per dispatch with the workspace and user it acts
//! for baked in; tools hold no cross-request state of their own.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::application::mindmap::MindmapGenerator;
use crate::application::quiz::QuizGenerator;
use crate::domain::document::{safe_file_name, GeneratedDocKind};
use crate::domain::foundation::{UserId, WorkspaceId};
use crate::domain::mindmap::flatten_bfs;
use crate::ports::{
    CompletionRequest, DocumentIndex, DocumentStore, FileArea, FileStorage, ImageGenerator,
    LanguageModel, MindmapStore, ModelRole, QuizStore, SearchProvider,
};

use super::tool::{Tool, ToolError, ToolOutput};

/// How many retrieved chunks the document-search tool asks for.
const RETRIEVAL_TOP_K: usize = 5;
/// Depth for mindmaps built inside a chat turn.
const CHAT_MINDMAP_DEPTH: u32 = 2;
/// Questions per quiz generated inside a chat turn.
const CHAT_QUIZ_QUESTIONS: usize = 5;

/// Searches the workspace's uploaded documents. Only offered when the
/// workspace has an index.
pub struct DocumentSearchTool {
    pub index: Arc<dyn DocumentIndex>,
    pub workspace_id: WorkspaceId,
}

#[async_trait]
impl Tool for DocumentSearchTool {
    fn name(&self) -> &str {
        "Document search"
    }

    fn description(&self) -> &str {
        "Search the documents uploaded to this workspace and return relevant passages."
    }

    async fn invoke(&self, input: &str) -> Result<ToolOutput, ToolError> {
        let chunks = self
            .index
            .retrieve(self.workspace_id, input, RETRIEVAL_TOP_K)
            .await
            .map_err(|e| ToolError::new(e.to_string()))?;
        Ok(ToolOutput::Snippets(chunks))
    }
}

/// Web search via the configured provider.
pub struct WebSearchTool {
    pub search: Arc<dyn SearchProvider>,
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "Google search"
    }

    fn description(&self) -> &str {
        "Search the web for current information and return short result snippets."
    }

    async fn invoke(&self, input: &str) -> Result<ToolOutput, ToolError> {
        let snippets = self
            .search
            .search(input)
            .await
            .map_err(|e| ToolError::new(e.to_string()))?;
        Ok(ToolOutput::Snippets(snippets))
    }
}

/// Plain conversational answer, one model call.
pub struct DirectAnswerTool {
    pub model: Arc<dyn LanguageModel>,
}

#[async_trait]
impl Tool for DirectAnswerTool {
    fn name(&self) -> &str {
        "Normal conversation"
    }

    fn description(&self) -> &str {
        "Answer a general question or continue the conversation."
    }

    async fn invoke(&self, input: &str) -> Result<ToolOutput, ToolError> {
        let request = CompletionRequest::new()
            .with_message(
                ModelRole::System,
                "You are a helpful learning assistant. Answer clearly and concisely.",
            )
            .with_message(ModelRole::User, input);
        let answer = self
            .model
            .complete(request)
            .await
            .map_err(|e| ToolError::new(e.to_string()))?;
        Ok(ToolOutput::Text(answer))
    }
}

/// Step-by-step math answers, one model call.
pub struct MathTool {
    pub model: Arc<dyn LanguageModel>,
}

#[async_trait]
impl Tool for MathTool {
    fn name(&self) -> &str {
        "Math solving"
    }

    fn description(&self) -> &str {
        "Solve a mathematical problem and show the result."
    }

    async fn invoke(&self, input: &str) -> Result<ToolOutput, ToolError> {
        let request = CompletionRequest::new()
            .with_message(
                ModelRole::System,
                "You are a math tutor. Solve the problem and reply with the \
                 solution, briefly showing how you got there.",
            )
            .with_message(ModelRole::User, input)
            .with_temperature(0.0);
        let answer = self
            .model
            .complete(request)
            .await
            .map_err(|e| ToolError::new(e.to_string()))?;
        Ok(ToolOutput::Text(answer))
    }
}

/// Generates a quiz about the given topic and saves it to the workspace.
pub struct QuizGenerationTool {
    pub generator: Arc<QuizGenerator>,
    pub quizzes: Arc<dyn QuizStore>,
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
}

#[async_trait]
impl Tool for QuizGenerationTool {
    fn name(&self) -> &str {
        "Quiz generation"
    }

    fn description(&self) -> &str {
        "Create a quiz about a topic and save it to the workspace."
    }

    async fn invoke(&self, input: &str) -> Result<ToolOutput, ToolError> {
        let avoid = self
            .quizzes
            .question_texts_for_user(self.user_id)
            .await
            .map_err(|e| ToolError::new(e.to_string()))?;
        let questions = self
            .generator
            .generate(input, CHAT_QUIZ_QUESTIONS, &[], &avoid)
            .await
            .map_err(|e| ToolError::new(e.to_string()))?;

        let title = format!("Quiz: {input}");
        let quiz = self
            .quizzes
            .insert_quiz(&title, self.user_id, self.workspace_id, &questions, None)
            .await
            .map_err(|e| ToolError::new(e.to_string()))?;
        info!(quiz_id = %quiz.id, "quiz created from chat");

        let mut summary = format!(
            "Created the quiz \"{}\" with {} questions:\n",
            quiz.title,
            questions.len()
        );
        for (i, q) in questions.iter().enumerate() {
            summary.push_str(&format!("{}. {}\n", i + 1, q.text));
        }
        Ok(ToolOutput::Text(summary))
    }
}

/// Builds a mindmap of the topic and saves it to the workspace.
pub struct MindmapGenerationTool {
    pub generator: Arc<MindmapGenerator>,
    pub mindmaps: Arc<dyn MindmapStore>,
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
}

#[async_trait]
impl Tool for MindmapGenerationTool {
    fn name(&self) -> &str {
        "Mindmap generation"
    }

    fn description(&self) -> &str {
        "Build a mindmap of a topic and save it to the workspace."
    }

    async fn invoke(&self, input: &str) -> Result<ToolOutput, ToolError> {
        let mindmap = self
            .generator
            .generate(input, CHAT_MINDMAP_DEPTH)
            .await
            .map_err(|e| ToolError::new(e.to_string()))?;

        if !mindmap.is_empty() {
            let nodes = flatten_bfs(&mindmap.root);
            self.mindmaps
                .insert_tree(input, None, self.user_id, self.workspace_id, &nodes)
                .await
                .map_err(|e| ToolError::new(e.to_string()))?;
        }

        let rendered = serde_json::to_string_pretty(&mindmap.root)
            .map_err(|e| ToolError::new(e.to_string()))?;
        Ok(ToolOutput::Text(rendered))
    }
}

/// Writes a markdown summary document and saves it to the workspace.
pub struct SummaryDocTool {
    pub model: Arc<dyn LanguageModel>,
    pub storage: Arc<dyn FileStorage>,
    pub documents: Arc<dyn DocumentStore>,
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
}

#[async_trait]
impl Tool for SummaryDocTool {
    fn name(&self) -> &str {
        "Document creation"
    }

    fn description(&self) -> &str {
        "Write a summary document about a topic and save it to the workspace."
    }

    async fn invoke(&self, input: &str) -> Result<ToolOutput, ToolError> {
        let request = CompletionRequest::new()
            .with_message(
                ModelRole::System,
                "Write a well-structured study document in markdown about the \
                 requested topic, with a title, section headings and concise \
                 explanations.",
            )
            .with_message(ModelRole::User, input);
        let body = self
            .model
            .complete(request)
            .await
            .map_err(|e| ToolError::new(e.to_string()))?;

        let file_name = safe_file_name(input, Utc::now(), "md");
        self.storage
            .save(FileArea::Generated, &file_name, body.as_bytes())
            .await
            .map_err(|e| ToolError::new(e.to_string()))?;
        self.documents
            .insert_generated(
                &file_name,
                GeneratedDocKind::Summary,
                self.workspace_id,
                self.user_id,
            )
            .await
            .map_err(|e| ToolError::new(e.to_string()))?;
        info!(%file_name, "summary document created from chat");

        Ok(ToolOutput::Text(format!(
            "Created the document \"{file_name}\" in this workspace."
        )))
    }
}

/// Generates an image and saves it to the workspace.
pub struct ImageTool {
    pub images: Arc<dyn ImageGenerator>,
    pub storage: Arc<dyn FileStorage>,
    pub documents: Arc<dyn DocumentStore>,
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
}

#[async_trait]
impl Tool for ImageTool {
    fn name(&self) -> &str {
        "Image creation"
    }

    fn description(&self) -> &str {
        "Generate an image from a description and save it to the workspace."
    }

    async fn invoke(&self, input: &str) -> Result<ToolOutput, ToolError> {
        let bytes = self
            .images
            .generate(input)
            .await
            .map_err(|e| ToolError::new(e.to_string()))?;

        let file_name = safe_file_name(input, Utc::now(), "png");
        self.storage
            .save(FileArea::Generated, &file_name, &bytes)
            .await
            .map_err(|e| ToolError::new(e.to_string()))?;
        self.documents
            .insert_generated(
                &file_name,
                GeneratedDocKind::Image,
                self.workspace_id,
                self.user_id,
            )
            .await
            .map_err(|e| ToolError::new(e.to_string()))?;
        info!(%file_name, "image created from chat");

        Ok(ToolOutput::Text(format!(
            "Created the image \"{file_name}\" in this workspace."
        )))
    }
}
