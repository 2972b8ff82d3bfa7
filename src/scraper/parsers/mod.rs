//! Parsers turning raw source payloads into race records.

pub mod api;
pub mod extract;
pub mod program;

pub use api::ApiProgramParser;
pub use program::ProgramParser;
