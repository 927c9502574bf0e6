// Candidate profiles: storage, profile parsing, HTTP handlers.

pub mod handlers;
pub mod profile_parser;
pub mod prompts;
pub mod store;
