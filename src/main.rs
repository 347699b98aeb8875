//! agent-learn server binary.
//!
//! Loads configuration, connects to PostgreSQL, wires the adapters into
//! the application handlers and serves the REST API.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use agent_learn::adapters::ai::OpenAiProvider;
use agent_learn::adapters::email::ResendEmailSender;
use agent_learn::adapters::http::{
    api_router, ApiHandlers, AuthHandlers, ChatHandlers, DocumentHandlers, GeneratedDocHandlers,
    MindmapHandlers, QuizHandlers, WorkspaceHandlers,
};
use agent_learn::adapters::index::EmbeddingIndex;
use agent_learn::adapters::postgres::{
    PostgresChatStore, PostgresDocumentStore, PostgresMindmapStore, PostgresQuizStore,
    PostgresUserStore, PostgresWorkspaceStore,
};
use agent_learn::adapters::search::SerperSearch;
use agent_learn::adapters::storage::LocalFileStorage;
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
use agent_learn::config::AppConfig;
use agent_learn::ports::{
    ChatStore, DocumentIndex, DocumentStore, EmailSender, EmbeddingModel, FileStorage,
    ImageGenerator, LanguageModel, MindmapStore, PendingSignupStore, QuizStore, SearchProvider,
    UserStore, WorkspaceStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;
    sqlx::migrate!().run(&pool).await?;
    info!("database connected and migrated");

    // One provider instance backs all three model ports.
    let provider = Arc::new(OpenAiProvider::new(config.ai.clone())?);
    let model: Arc<dyn LanguageModel> = provider.clone();
    let embedder: Arc<dyn EmbeddingModel> = provider.clone();
    let images: Arc<dyn ImageGenerator> = provider;

    let search: Arc<dyn SearchProvider> = Arc::new(SerperSearch::new(config.search.clone()));
    let email: Arc<dyn EmailSender> = Arc::new(ResendEmailSender::new(config.email.clone()));
    let storage: Arc<dyn FileStorage> = Arc::new(LocalFileStorage::new(&config.storage));
    let index: Arc<dyn DocumentIndex> = Arc::new(EmbeddingIndex::new(
        embedder,
        config.storage.index_path(),
    ));
    let pending: Arc<dyn PendingSignupStore> = Arc::new(ExpiringSignupStore::with_ttl(
        Duration::from_secs(config.auth.code_lifetime_minutes as u64 * 60),
    ));

    let users: Arc<dyn UserStore> = Arc::new(PostgresUserStore::new(pool.clone()));
    let workspaces: Arc<dyn WorkspaceStore> = Arc::new(PostgresWorkspaceStore::new(pool.clone()));
    let chats: Arc<dyn ChatStore> = Arc::new(PostgresChatStore::new(pool.clone()));
    let documents: Arc<dyn DocumentStore> = Arc::new(PostgresDocumentStore::new(pool.clone()));
    let quizzes: Arc<dyn QuizStore> = Arc::new(PostgresQuizStore::new(pool.clone()));
    let mindmaps: Arc<dyn MindmapStore> = Arc::new(PostgresMindmapStore::new(pool));

    let hasher = Arc::new(PasswordHasher::new(config.auth.password_pepper.clone()));
    let tokens = Arc::new(TokenIssuer::new(
        &config.auth.jwt_secret,
        config.auth.token_lifetime_days,
    ));

    let engine = Arc::new(AgentEngine::new(
        model.clone(),
        index.clone(),
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
                config.auth.code_lifetime_minutes,
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
            create: Arc::new(CreateWorkspaceHandler::new(workspaces.clone())),
            list: Arc::new(ListWorkspacesHandler::new(workspaces.clone())),
            rename: Arc::new(RenameWorkspaceHandler::new(workspaces.clone())),
            delete: Arc::new(DeleteWorkspaceHandler::new(workspaces.clone())),
        },
        chats: ChatHandlers {
            send: Arc::new(SendMessageHandler::new(
                workspaces.clone(),
                chats.clone(),
                engine,
            )),
            history: Arc::new(GetHistoryHandler::new(workspaces.clone(), chats.clone())),
            clear: Arc::new(ClearHistoryHandler::new(workspaces.clone(), chats)),
        },
        documents: DocumentHandlers {
            upload: Arc::new(UploadDocumentHandler::new(
                workspaces.clone(),
                documents.clone(),
                storage.clone(),
                index,
            )),
            list: Arc::new(ListDocumentsHandler::new(
                workspaces.clone(),
                documents.clone(),
            )),
            delete: Arc::new(DeleteDocumentHandler::new(
                workspaces.clone(),
                documents.clone(),
                storage.clone(),
            )),
            storage: storage.clone(),
        },
        generated_docs: GeneratedDocHandlers {
            create: Arc::new(CreateGeneratedDocHandler::new(
                workspaces.clone(),
                documents.clone(),
                storage.clone(),
                model.clone(),
                images,
            )),
            list: Arc::new(ListGeneratedDocsHandler::new(
                workspaces.clone(),
                documents.clone(),
            )),
            delete: Arc::new(DeleteGeneratedDocHandler::new(
                workspaces.clone(),
                documents.clone(),
                storage.clone(),
            )),
            documents,
            storage,
        },
        quizzes: QuizHandlers {
            create: Arc::new(CreateQuizHandler::new(
                workspaces.clone(),
                quizzes.clone(),
                quiz_generator,
            )),
            list: Arc::new(ListQuizzesHandler::new(workspaces.clone(), quizzes.clone())),
            get: Arc::new(GetQuizHandler::new(workspaces.clone(), quizzes.clone())),
            delete: Arc::new(DeleteQuizHandler::new(workspaces.clone(), quizzes.clone())),
            add_question: Arc::new(AddQuestionHandler::new(
                workspaces.clone(),
                quizzes.clone(),
            )),
            list_questions: Arc::new(ListQuestionsHandler::new(
                workspaces.clone(),
                quizzes.clone(),
            )),
            delete_question: Arc::new(DeleteQuestionHandler::new(
                workspaces.clone(),
                quizzes.clone(),
            )),
            submit: Arc::new(SubmitQuizHandler::new(quizzes.clone())),
            results: Arc::new(GetResultsHandler::new(quizzes.clone())),
            analysis: Arc::new(QuizAnalysisHandler::new(quizzes, model.clone())),
            check: Arc::new(CheckAnswerHandler::new(model)),
        },
        mindmaps: MindmapHandlers {
            create: Arc::new(CreateMindmapHandler::new(
                workspaces.clone(),
                mindmaps.clone(),
                mindmap_generator,
            )),
            list: Arc::new(ListMindmapsHandler::new(workspaces.clone(), mindmaps.clone())),
            delete: Arc::new(DeleteMindmapHandler::new(workspaces, mindmaps)),
        },
    };

    let app = api_router(handlers, tokens);
    let addr = config.server.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
