// Candidate-fit analysis: single and per-job batch scoring via the model.

pub mod analyzer;
pub mod batch;
pub mod handlers;
pub mod prompts;
