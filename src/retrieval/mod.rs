//! Context retrieval across collections

pub mod retriever;

pub use retriever::{Retriever, FALLBACK_CONTEXT};
