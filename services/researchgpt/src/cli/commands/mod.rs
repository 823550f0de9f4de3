//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a specific CLI command.

pub mod chunk;
pub mod completions;
pub mod config;
pub mod info;
pub mod knowledge;
pub mod research;
pub mod session;

// Re-export argument types for use in mod.rs
pub use chunk::ChunkArgs;
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use info::InfoArgs;
pub use research::ResearchArgs;
pub use session::SessionArgs;
