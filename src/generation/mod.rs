//! Persona-styled answer generation

pub mod generator;
pub mod prompt;

pub use generator::AnswerGenerator;
pub use prompt::PromptBuilder;
