// Job postings: storage, requirement extraction, HTTP handlers.

pub mod handlers;
pub mod prompts;
pub mod requirements;
pub mod store;
