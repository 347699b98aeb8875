//! Builds the full API router over in-memory ports and exercises the
//! listing and deletion paths that share a captured segment. Assembling
//! the router at all is part of the test: axum panics at registration
//! time on conflicting captures.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use secrecy::Secret;
use tower::ServiceExt;

use agent_learn::adapters::http::{
    api_router, ApiHandlers, AuthHandlers, ChatHandlers, DocumentHandlers, GeneratedDocHandlers,
    MindmapHandlers, QuizHandlers, WorkspaceHandlers,
};
use agent_learn::adapters::memory::{
    InMemoryChatStore, InMemoryDocumentIndex, InMemoryDocumentStore, InMemoryEmailSender,
    InMemoryFileStorage, InMemoryImageGenerator, InMemoryMindmapStore, InMemoryQuizStore,
    InMemorySearchProvider, InMemoryUserStore, InMemoryWorkspaceStore,
};
use agent_learn::adapters::verification::ExpiringSignupStore;
use agent_learn::application::agent::AgentEngine;
use agent_learn::application::auth::{PasswordHasher, TokenIssuer};
use agent_learn::application::handlers::auth::{
    IdLoginHandler, LoginHandler, SignupHandler, VerifyEmailHandler,
};
use agent_learn::application::handlers::chat::{
    ClearHistoryHandler, GetHistoryHandler, SendMessageHandler,
};
use agent_learn::application::handlers::document::{
    DeleteDocumentHandler, ListDocumentsHandler, UploadDocumentHandler,
};
use agent_learn::application::handlers::generated_doc::{
    CreateGeneratedDocHandler, DeleteGeneratedDocHandler, ListGeneratedDocsHandler,
};
use agent_learn::application::handlers::mindmap::{
    CreateMindmapHandler, DeleteMindmapHandler, ListMindmapsHandler,
};
use agent_learn::application::handlers::quiz::{
    AddQuestionHandler, CheckAnswerHandler, CreateQuizHandler, DeleteQuestionHandler,
    DeleteQuizHandler, GetQuizHandler, GetResultsHandler, ListQuestionsHandler,
    ListQuizzesHandler, QuizAnalysisHandler, SubmitQuizHandler,
};
use agent_learn::application::handlers::workspace::{
    CreateWorkspaceHandler, DeleteWorkspaceHandler, ListWorkspacesHandler,
    RenameWorkspaceHandler,
};
use agent_learn::application::mindmap::MindmapGenerator;
use agent_learn::application::quiz::QuizGenerator;
use agent_learn::domain::foundation::UserId;
use agent_learn::ports::{
    ChatStore, CompletionRequest, DocumentIndex, DocumentStore, EmailSender, FileStorage,
    ImageGenerator, LanguageModel, MindmapStore, ModelError, PendingSignupStore, QuizStore,
    SearchProvider, UserStore, WorkspaceStore,
};

/// Never-called model double; route tests stop before any model call.
struct IdleModel;

#[async_trait]
impl LanguageModel for IdleModel {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, ModelError> {
        Err(ModelError::unavailable("no model in route tests"))
    }
}

struct Fixture {
    app: axum::Router,
    workspaces: Arc<InMemoryWorkspaceStore>,
    tokens: Arc<TokenIssuer>,
}

fn fixture() -> Fixture {
    let model: Arc<dyn LanguageModel> = Arc::new(IdleModel);
    let embeds: Arc<dyn DocumentIndex> = Arc::new(InMemoryDocumentIndex::new());
    let search: Arc<dyn SearchProvider> = Arc::new(InMemorySearchProvider::with_snippets(vec![]));
    let images: Arc<dyn ImageGenerator> = Arc::new(InMemoryImageGenerator);
    let storage: Arc<dyn FileStorage> = Arc::new(InMemoryFileStorage::new());
    let email: Arc<dyn EmailSender> = Arc::new(InMemoryEmailSender::new());
    let pending: Arc<dyn PendingSignupStore> = Arc::new(ExpiringSignupStore::new());

    let users: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
    let workspaces = Arc::new(InMemoryWorkspaceStore::new());
    let workspace_store: Arc<dyn WorkspaceStore> = workspaces.clone();
    let chats: Arc<dyn ChatStore> = Arc::new(InMemoryChatStore::new());
    let documents: Arc<dyn DocumentStore> = Arc::new(InMemoryDocumentStore::new());
    let quizzes: Arc<dyn QuizStore> = Arc::new(InMemoryQuizStore::new());
    let mindmaps: Arc<dyn MindmapStore> = Arc::new(InMemoryMindmapStore::new());

    let hasher = Arc::new(PasswordHasher::new(Secret::new("pepper".to_string())));
    let tokens = Arc::new(TokenIssuer::new(
        &Secret::new("0123456789abcdef0123456789abcdef".to_string()),
        5,
    ));

    let engine = Arc::new(AgentEngine::new(
        model.clone(),
        embeds.clone(),
        search,
        images.clone(),
        storage.clone(),
        chats.clone(),
        quizzes.clone(),
        mindmaps.clone(),
        documents.clone(),
    ));
    let mindmap_generator = Arc::new(MindmapGenerator::new(model.clone()));
    let quiz_generator = Arc::new(QuizGenerator::new(model.clone()));

    let handlers = ApiHandlers {
        auth: AuthHandlers {
            signup: Arc::new(SignupHandler::new(
                users.clone(),
                pending.clone(),
                email,
                hasher.clone(),
                10,
            )),
            verify: Arc::new(VerifyEmailHandler::new(
                users.clone(),
                pending,
                tokens.clone(),
            )),
            login: Arc::new(LoginHandler::new(users.clone(), hasher, tokens.clone())),
            id_login: Arc::new(IdLoginHandler::new(users, tokens.clone())),
        },
        workspaces: WorkspaceHandlers {
            create: Arc::new(CreateWorkspaceHandler::new(workspace_store.clone())),
            list: Arc::new(ListWorkspacesHandler::new(workspace_store.clone())),
            rename: Arc::new(RenameWorkspaceHandler::new(workspace_store.clone())),
            delete: Arc::new(DeleteWorkspaceHandler::new(workspace_store.clone())),
        },
        chats: ChatHandlers {
            send: Arc::new(SendMessageHandler::new(
                workspace_store.clone(),
                chats.clone(),
                engine,
            )),
            history: Arc::new(GetHistoryHandler::new(
                workspace_store.clone(),
                chats.clone(),
            )),
            clear: Arc::new(ClearHistoryHandler::new(workspace_store.clone(), chats)),
        },
        documents: DocumentHandlers {
            upload: Arc::new(UploadDocumentHandler::new(
                workspace_store.clone(),
                documents.clone(),
                storage.clone(),
                embeds,
            )),
            list: Arc::new(ListDocumentsHandler::new(
                workspace_store.clone(),
                documents.clone(),
            )),
            delete: Arc::new(DeleteDocumentHandler::new(
                workspace_store.clone(),
                documents.clone(),
                storage.clone(),
            )),
            storage: storage.clone(),
        },
        generated_docs: GeneratedDocHandlers {
            create: Arc::new(CreateGeneratedDocHandler::new(
                workspace_store.clone(),
                documents.clone(),
                storage.clone(),
                model.clone(),
                images,
            )),
            list: Arc::new(ListGeneratedDocsHandler::new(
                workspace_store.clone(),
                documents.clone(),
            )),
            delete: Arc::new(DeleteGeneratedDocHandler::new(
                workspace_store.clone(),
                documents.clone(),
                storage.clone(),
            )),
            documents,
            storage,
        },
        quizzes: QuizHandlers {
            create: Arc::new(CreateQuizHandler::new(
                workspace_store.clone(),
                quizzes.clone(),
                quiz_generator,
            )),
            list: Arc::new(ListQuizzesHandler::new(
                workspace_store.clone(),
                quizzes.clone(),
            )),
            get: Arc::new(GetQuizHandler::new(workspace_store.clone(), quizzes.clone())),
            delete: Arc::new(DeleteQuizHandler::new(
                workspace_store.clone(),
                quizzes.clone(),
            )),
            add_question: Arc::new(AddQuestionHandler::new(
                workspace_store.clone(),
                quizzes.clone(),
            )),
            list_questions: Arc::new(ListQuestionsHandler::new(
                workspace_store.clone(),
                quizzes.clone(),
            )),
            delete_question: Arc::new(DeleteQuestionHandler::new(
                workspace_store.clone(),
                quizzes.clone(),
            )),
            submit: Arc::new(SubmitQuizHandler::new(quizzes.clone())),
            results: Arc::new(GetResultsHandler::new(quizzes.clone())),
            analysis: Arc::new(QuizAnalysisHandler::new(quizzes, model.clone())),
            check: Arc::new(CheckAnswerHandler::new(model)),
        },
        mindmaps: MindmapHandlers {
            create: Arc::new(CreateMindmapHandler::new(
                workspace_store.clone(),
                mindmaps.clone(),
                mindmap_generator,
            )),
            list: Arc::new(ListMindmapsHandler::new(
                workspace_store.clone(),
                mindmaps.clone(),
            )),
            delete: Arc::new(DeleteMindmapHandler::new(workspace_store, mindmaps)),
        },
    };

    Fixture {
        app: api_router(handlers, tokens.clone()),
        workspaces,
        tokens,
    }
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn listing_routes_reject_anonymous_callers() {
    let fixture = fixture();
    for uri in ["/api/mindmaps/1", "/api/documents/1", "/api/ai-docs/1", "/api/questions/1"] {
        let response = fixture.app.clone().oneshot(get(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn listing_and_deletion_share_their_path_segment() {
    let fixture = fixture();
    let user_id = UserId::new(1);
    let workspace = fixture.workspaces.insert("w", user_id).await.unwrap();
    let token = fixture.tokens.issue(user_id).unwrap();

    for prefix in ["/api/mindmaps", "/api/documents", "/api/ai-docs", "/api/questions"] {
        let uri = format!("{prefix}/{}", workspace.id);
        let response = fixture
            .app
            .clone()
            .oneshot(get(&uri, Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }

    // The same segment routes DELETE by entity id; nothing exists yet.
    let response = fixture
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/mindmaps/99")
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
