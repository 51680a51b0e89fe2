//! advisor-rag: Retrieval-augmented course advising chatbot
//!
//! Offline, a PDF curriculum report and a course-dependency graph are
//! converted to text documents and loaded into named Chroma collections.
//! Online, a student question retrieves nearest-neighbor passages from those
//! collections and grounds a Gemini answer served over a single HTTP route
//! or a one-shot CLI prompt.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use config::AdvisorConfig;
pub use error::{Error, Result};
pub use server::state::AppState;
pub use types::{AskRequest, AskResponse, CourseGraph, StoredDocument};
