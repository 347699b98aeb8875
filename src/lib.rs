//! Agent Learn - AI-assisted learning backend
//!
//! Manages users, workspaces, documents, chat, quizzes and mindmaps, and
//! delegates content generation to a language-model provider through an
//! agent-routing layer.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
