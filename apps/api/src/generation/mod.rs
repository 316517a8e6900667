// Resume generation and tailoring: candidate data → prompt → content
// generator → SchemaNormalizer. Also hosts the HTTP handlers for the resume
// API. All LLM calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod prompts;
