//! Bridge between the UI thread and the tokio worker that talks to the generation service.

pub mod commands;
pub mod runtime;
