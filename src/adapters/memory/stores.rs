//! In-memory store implementations backing unit and integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::chat::{ChatMessage, ChatRole};
use crate::domain::document::{Document, GeneratedDoc, GeneratedDocKind};
use crate::domain::foundation::{
    ChatMessageId, DocumentId, DomainError, ErrorCode, GeneratedDocId, QuestionId, QuizId,
    TreeId, TreeNodeId, UserId, WorkspaceId,
};
use crate::domain::mindmap::FlatNode;
use crate::domain::quiz::{grade_answer, GeneratedQuestion, Question, Quiz, QuizResult};
use crate::domain::user::{User, VerificationCode};
use crate::domain::workspace::Workspace;
use crate::ports::{
    AnswerSubmission, ChatStore, DocumentStore, MindmapStore, NewUser, QuizStore, TreeNodeRecord,
    TreeRecord, UserStore, WorkspaceStore,
};

fn next(counter: &AtomicI64) -> i64 {
    counter.fetch_add(1, Ordering::SeqCst)
}

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
    codes: Mutex<HashMap<String, VerificationCode>>,
    next_id: AtomicI64,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            codes: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Inserts an unverified user directly, for test setup.
    pub async fn seed_user(&self, username: &str, email: &str, password_hash: &str) -> UserId {
        let id = UserId::new(next(&self.next_id));
        self.users.lock().unwrap().push(User {
            id,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            dob: chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default(),
            is_verified: false,
        });
        id
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::new(ErrorCode::AlreadyExists, "email taken"));
        }
        let stored = User {
            id: UserId::new(next(&self.next_id)),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            dob: user.dob,
            is_verified: false,
        };
        users.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn mark_verified(&self, id: UserId) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.is_verified = true;
                Ok(())
            }
            None => Err(DomainError::not_found("user", id)),
        }
    }

    async fn upsert_verification_code(&self, code: VerificationCode) -> Result<(), DomainError> {
        self.codes.lock().unwrap().insert(code.email.clone(), code);
        Ok(())
    }

    async fn find_verification_code(
        &self,
        email: &str,
    ) -> Result<Option<VerificationCode>, DomainError> {
        Ok(self.codes.lock().unwrap().get(email).cloned())
    }

    async fn delete_verification_code(&self, email: &str) -> Result<(), DomainError> {
        self.codes.lock().unwrap().remove(email);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryWorkspaceStore {
    workspaces: Mutex<Vec<Workspace>>,
    next_id: AtomicI64,
}

impl InMemoryWorkspaceStore {
    pub fn new() -> Self {
        Self {
            workspaces: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl WorkspaceStore for InMemoryWorkspaceStore {
    async fn insert(&self, name: &str, user_id: UserId) -> Result<Workspace, DomainError> {
        let workspace = Workspace {
            id: WorkspaceId::new(next(&self.next_id)),
            name: name.to_string(),
            user_id,
        };
        self.workspaces.lock().unwrap().push(workspace.clone());
        Ok(workspace)
    }

    async fn find_by_id(&self, id: WorkspaceId) -> Result<Option<Workspace>, DomainError> {
        Ok(self
            .workspaces
            .lock()
            .unwrap()
            .iter()
            .find(|w| w.id == id)
            .cloned())
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Workspace>, DomainError> {
        Ok(self
            .workspaces
            .lock()
            .unwrap()
            .iter()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn rename(&self, id: WorkspaceId, name: &str) -> Result<(), DomainError> {
        let mut workspaces = self.workspaces.lock().unwrap();
        match workspaces.iter_mut().find(|w| w.id == id) {
            Some(workspace) => {
                workspace.name = name.to_string();
                Ok(())
            }
            None => Err(DomainError::not_found("workspace", id)),
        }
    }

    async fn delete(&self, id: WorkspaceId) -> Result<(), DomainError> {
        self.workspaces.lock().unwrap().retain(|w| w.id != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryChatStore {
    messages: Mutex<Vec<ChatMessage>>,
    next_id: AtomicI64,
}

impl InMemoryChatStore {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl ChatStore for InMemoryChatStore {
    async fn insert(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
        role: ChatRole,
        content: &str,
    ) -> Result<ChatMessage, DomainError> {
        let message = ChatMessage {
            id: ChatMessageId::new(next(&self.next_id)),
            role,
            content: content.to_string(),
            workspace_id,
            user_id,
            created_at: Utc::now(),
        };
        self.messages.lock().unwrap().push(message.clone());
        Ok(message)
    }

    async fn history(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> Result<Vec<ChatMessage>, DomainError> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.workspace_id == workspace_id && m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn recent(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, DomainError> {
        let mut all = self.history(workspace_id, user_id).await?;
        let keep = limit.max(0) as usize;
        if all.len() > keep {
            all = all.split_off(all.len() - keep);
        }
        Ok(all)
    }

    async fn clear(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> Result<u64, DomainError> {
        let mut messages = self.messages.lock().unwrap();
        let before = messages.len();
        messages.retain(|m| !(m.workspace_id == workspace_id && m.user_id == user_id));
        Ok((before - messages.len()) as u64)
    }
}

#[derive(Default)]
pub struct InMemoryDocumentStore {
    documents: Mutex<Vec<Document>>,
    generated: Mutex<Vec<GeneratedDoc>>,
    next_id: AtomicI64,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            documents: Mutex::new(Vec::new()),
            generated: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn insert(
        &self,
        filename: &str,
        workspace_id: WorkspaceId,
    ) -> Result<Document, DomainError> {
        let document = Document {
            id: DocumentId::new(next(&self.next_id)),
            filename: filename.to_string(),
            workspace_id,
            uploaded_at: Utc::now(),
        };
        self.documents.lock().unwrap().push(document.clone());
        Ok(document)
    }

    async fn find_by_id(&self, id: DocumentId) -> Result<Option<Document>, DomainError> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == id)
            .cloned())
    }

    async fn list_for_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<Document>, DomainError> {
        // Newest first, matching the database ordering.
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|d| d.workspace_id == workspace_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: DocumentId) -> Result<(), DomainError> {
        self.documents.lock().unwrap().retain(|d| d.id != id);
        Ok(())
    }

    async fn insert_generated(
        &self,
        file_name: &str,
        kind: GeneratedDocKind,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> Result<GeneratedDoc, DomainError> {
        let doc = GeneratedDoc {
            id: GeneratedDocId::new(next(&self.next_id)),
            file_name: file_name.to_string(),
            kind,
            workspace_id,
            user_id,
        };
        self.generated.lock().unwrap().push(doc.clone());
        Ok(doc)
    }

    async fn find_generated(
        &self,
        id: GeneratedDocId,
    ) -> Result<Option<GeneratedDoc>, DomainError> {
        Ok(self
            .generated
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == id)
            .cloned())
    }

    async fn list_generated(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<GeneratedDoc>, DomainError> {
        Ok(self
            .generated
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.workspace_id == workspace_id)
            .cloned()
            .collect())
    }

    async fn delete_generated(&self, id: GeneratedDocId) -> Result<(), DomainError> {
        self.generated.lock().unwrap().retain(|d| d.id != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryQuizStore {
    quizzes: Mutex<Vec<Quiz>>,
    questions: Mutex<Vec<Question>>,
    results: Mutex<Vec<QuizResult>>,
    next_id: AtomicI64,
}

impl InMemoryQuizStore {
    pub fn new() -> Self {
        Self {
            quizzes: Mutex::new(Vec::new()),
            questions: Mutex::new(Vec::new()),
            results: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl QuizStore for InMemoryQuizStore {
    async fn insert_quiz(
        &self,
        title: &str,
        user_id: UserId,
        workspace_id: WorkspaceId,
        questions: &[GeneratedQuestion],
        created_for: Option<UserId>,
    ) -> Result<Quiz, DomainError> {
        let quiz = Quiz {
            id: QuizId::new(next(&self.next_id)),
            title: title.to_string(),
            workspace_id,
            user_id,
            created_at: Utc::now(),
        };
        self.quizzes.lock().unwrap().push(quiz.clone());

        let mut stored = self.questions.lock().unwrap();
        for (index, question) in questions.iter().enumerate() {
            stored.push(Question {
                id: QuestionId::new(next(&self.next_id)),
                kind: question.kind,
                text: question.text.clone(),
                options: question.options.clone().unwrap_or_default(),
                correct_answer: question.answer.clone(),
                order_index: index as i32,
                quiz_id: quiz.id,
                created_for: created_for.unwrap_or(user_id),
            });
        }
        Ok(quiz)
    }

    async fn find_quiz(&self, id: QuizId) -> Result<Option<Quiz>, DomainError> {
        Ok(self.quizzes.lock().unwrap().iter().find(|q| q.id == id).cloned())
    }

    async fn list_for_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<Quiz>, DomainError> {
        Ok(self
            .quizzes
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.workspace_id == workspace_id)
            .cloned()
            .collect())
    }

    async fn delete_quiz(&self, id: QuizId) -> Result<(), DomainError> {
        self.quizzes.lock().unwrap().retain(|q| q.id != id);
        self.questions.lock().unwrap().retain(|q| q.quiz_id != id);
        self.results.lock().unwrap().retain(|r| r.quiz_id != id);
        Ok(())
    }

    async fn questions(&self, quiz_id: QuizId) -> Result<Vec<Question>, DomainError> {
        let mut questions: Vec<Question> = self
            .questions
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.quiz_id == quiz_id)
            .cloned()
            .collect();
        questions.sort_by_key(|q| q.order_index);
        Ok(questions)
    }

    async fn questions_for_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<Question>, DomainError> {
        let quiz_ids: Vec<QuizId> = self
            .quizzes
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.workspace_id == workspace_id)
            .map(|q| q.id)
            .collect();
        let mut questions: Vec<Question> = self
            .questions
            .lock()
            .unwrap()
            .iter()
            .filter(|q| quiz_ids.contains(&q.quiz_id))
            .cloned()
            .collect();
        questions.sort_by_key(|q| (q.quiz_id.as_i64(), q.order_index));
        Ok(questions)
    }

    async fn question_texts_for_user(&self, user_id: UserId) -> Result<Vec<String>, DomainError> {
        Ok(self
            .questions
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.created_for == user_id)
            .map(|q| q.text.clone())
            .collect())
    }

    async fn find_question(&self, id: QuestionId) -> Result<Option<Question>, DomainError> {
        Ok(self
            .questions
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.id == id)
            .cloned())
    }

    async fn insert_question(
        &self,
        quiz_id: QuizId,
        question: &GeneratedQuestion,
        created_for: UserId,
    ) -> Result<Question, DomainError> {
        let mut stored = self.questions.lock().unwrap();
        let order_index = stored
            .iter()
            .filter(|q| q.quiz_id == quiz_id)
            .map(|q| q.order_index + 1)
            .max()
            .unwrap_or(0);
        let question = Question {
            id: QuestionId::new(next(&self.next_id)),
            kind: question.kind,
            text: question.text.clone(),
            options: question.options.clone().unwrap_or_default(),
            correct_answer: question.answer.clone(),
            order_index,
            quiz_id,
            created_for,
        };
        stored.push(question.clone());
        Ok(question)
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), DomainError> {
        self.questions.lock().unwrap().retain(|q| q.id != id);
        Ok(())
    }

    async fn record_results(
        &self,
        quiz_id: QuizId,
        user_id: UserId,
        answers: &[AnswerSubmission],
    ) -> Result<Vec<QuizResult>, DomainError> {
        let questions = self.questions(quiz_id).await?;
        let mut results = self.results.lock().unwrap();
        results.retain(|r| !(r.quiz_id == quiz_id && r.user_id == user_id));

        let mut graded = Vec::with_capacity(answers.len());
        for answer in answers {
            let Some(question) = questions.iter().find(|q| q.id == answer.question_id) else {
                return Err(DomainError::not_found("question", answer.question_id));
            };
            let result = QuizResult {
                quiz_id,
                question_id: question.id,
                user_id,
                given_answer: Some(answer.given_answer.clone()),
                is_correct: grade_answer(question.correct_answer.as_deref(), &answer.given_answer),
            };
            results.push(result.clone());
            graded.push(result);
        }
        Ok(graded)
    }

    async fn results_for_user(
        &self,
        quiz_id: QuizId,
        user_id: UserId,
    ) -> Result<Vec<QuizResult>, DomainError> {
        Ok(self
            .results
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.quiz_id == quiz_id && r.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryMindmapStore {
    trees: Mutex<Vec<TreeRecord>>,
    nodes: Mutex<Vec<TreeNodeRecord>>,
    next_id: AtomicI64,
}

impl InMemoryMindmapStore {
    pub fn new() -> Self {
        Self {
            trees: Mutex::new(Vec::new()),
            nodes: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl MindmapStore for InMemoryMindmapStore {
    async fn insert_tree(
        &self,
        name: &str,
        description: Option<&str>,
        user_id: UserId,
        workspace_id: WorkspaceId,
        nodes: &[FlatNode],
    ) -> Result<TreeRecord, DomainError> {
        let tree = TreeRecord {
            id: TreeId::new(next(&self.next_id)),
            name: name.to_string(),
            description: description.map(str::to_string),
            user_id,
            workspace_id,
            created_at: Utc::now(),
        };
        self.trees.lock().unwrap().push(tree.clone());

        // Breadth-first order guarantees a parent's database id exists
        // before any of its children are written.
        let mut id_map: HashMap<usize, TreeNodeId> = HashMap::new();
        let mut stored = self.nodes.lock().unwrap();
        for node in nodes {
            let id = TreeNodeId::new(next(&self.next_id));
            id_map.insert(node.id, id);
            stored.push(TreeNodeRecord {
                id,
                label: node.label.clone(),
                parent_id: node.parent.and_then(|p| id_map.get(&p).copied()),
                tree_id: tree.id,
            });
        }
        Ok(tree)
    }

    async fn find_tree(&self, id: TreeId) -> Result<Option<TreeRecord>, DomainError> {
        Ok(self.trees.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn list_for_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<TreeRecord>, DomainError> {
        Ok(self
            .trees
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.workspace_id == workspace_id)
            .cloned()
            .collect())
    }

    async fn nodes(&self, tree_id: TreeId) -> Result<Vec<TreeNodeRecord>, DomainError> {
        let mut nodes: Vec<TreeNodeRecord> = self
            .nodes
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.tree_id == tree_id)
            .cloned()
            .collect();
        nodes.sort_by_key(|n| n.id);
        Ok(nodes)
    }

    async fn delete_tree(&self, id: TreeId) -> Result<(), DomainError> {
        self.trees.lock().unwrap().retain(|t| t.id != id);
        self.nodes.lock().unwrap().retain(|n| n.tree_id != id);
        Ok(())
    }
}
