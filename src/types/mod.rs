//! Core types for the advising pipeline

pub mod chunk;
pub mod graph;
pub mod query;

pub use chunk::{ChunkMetadata, SemanticBlock, StoredDocument};
pub use graph::{CourseGraph, CourseNode, GraphFact, GraphMetadata, PrereqEdge};
pub use query::{AskRequest, AskResponse};
